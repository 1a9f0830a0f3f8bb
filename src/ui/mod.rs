//! Demo user interface - animated OLED scene + physical buttons.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×32 OLED via I²C
//! - **Buttons**: 3 tactile switches with debouncing (UP, DOWN, SELECT)
//! - **Scene**: a layer widget, a caps toggle, a one-shot spark and a
//!   boot-reverse logo, all composed into one frame buffer per refresh

pub mod buttons;
pub mod display;
pub mod input_logic;

use core::fmt::Write;
use core::sync::atomic::{AtomicU8, Ordering};

use defmt::{info, Format};
use oled_anim::config::DEMO_LAYER_COUNT;
use oled_anim::{
    Blend, Controller, ControllerConfig, Error, OledBuffer, StateDesc, SteadyFrame, Widget,
    WidgetConfig,
};

use crate::frames;

/// Depth of the button event channel.
pub const BUTTON_QUEUE: usize = 4;

/// Physical button events (after debouncing).
#[derive(Clone, Copy, PartialEq, Eq, Format)]
pub enum ButtonEvent {
    Up,
    Down,
    Select,
}

/// Active layer as the keyboard would report it. Written by button
/// handling, read back through the widget's query.
static ACTIVE_LAYER: AtomicU8 = AtomicU8::new(0);

fn active_layer(_: u32) -> u8 {
    ACTIVE_LAYER.load(Ordering::Relaxed)
}

static LAYER_STATES: [StateDesc<'static>; DEMO_LAYER_COUNT as usize] = [
    StateDesc::new(&frames::LAYER_BASE),
    StateDesc::new(&frames::LAYER_LOWER),
    StateDesc::new(&frames::LAYER_RAISE),
    StateDesc::new(&frames::LAYER_ADJUST),
];

static LAYER_WIDGET: WidgetConfig<'static> =
    WidgetConfig::new(&LAYER_STATES, 0, 0, 16, 16).with_query(active_layer, 0);

static CAPS_TOGGLE: ControllerConfig<'static> =
    ControllerConfig::toggle(&frames::CAPS, 0, 24, Blend::Opaque);

static SPARK_ONESHOT: ControllerConfig<'static> =
    ControllerConfig::oneshot(&frames::SPARK, 16, 24, SteadyFrame::First, false)
        .with_blend(Blend::Additive);

static LOGO_BOOTREV: ControllerConfig<'static> =
    ControllerConfig::boot_reverse(&frames::LOGO, 96, 0, true);

/// Everything drawn on the panel.
pub struct Scene {
    layer: Widget<'static>,
    caps: Controller<'static>,
    spark: Controller<'static>,
    logo: Controller<'static>,
}

impl Scene {
    pub fn new(now: u32) -> Result<Self, Error> {
        Ok(Self {
            layer: Widget::new(&LAYER_WIDGET, now)?,
            caps: Controller::new(&CAPS_TOGGLE, now),
            spark: Controller::new(&SPARK_ONESHOT, now),
            logo: Controller::new(&LOGO_BOOTREV, now),
        })
    }

    pub fn on_button(&mut self, event: ButtonEvent, now: u32) {
        let layer = ACTIVE_LAYER.load(Ordering::Relaxed);
        match event {
            ButtonEvent::Up => {
                ACTIVE_LAYER.store(input_logic::layer_up(layer, DEMO_LAYER_COUNT), Ordering::Relaxed);
                self.logo.trigger(now);
            }
            ButtonEvent::Down => {
                ACTIVE_LAYER.store(input_logic::layer_down(layer, DEMO_LAYER_COUNT), Ordering::Relaxed);
                self.logo.trigger(now);
            }
            ButtonEvent::Select => {
                self.caps.trigger(now);
                self.spark.trigger(now);
            }
        }
    }

    /// Compose one frame.
    pub fn render(&mut self, fb: &mut OledBuffer, now: u32) {
        fb.clear();

        if self.layer.tick(fb, now) {
            info!("Layer widget settled on {}", self.layer.state());
        }
        if self.caps.render(fb, now) {
            info!("Caps indicator {}", if self.caps.is_on() { "on" } else { "off" });
        }
        self.spark.render(fb, now);
        if self.logo.render(fb, now) && self.logo.boot_done() {
            info!("Logo settled");
        }

        let mut label: heapless::String<8> = heapless::String::new();
        let _ = write!(label, "L{}", self.layer.state());
        display::draw_label(fb, label.as_str(), 20, 12);
    }
}
