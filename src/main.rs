//! oled-anim demo firmware.
//!
//! nRF52840 + SSD1306 128×32 (I²C) + three buttons. Shows a layer
//! indicator widget, a caps-lock toggle, a one-shot spark and a
//! boot-then-reverse logo, redrawn every `DEMO_REFRESH_MS`.
//!
//! Build: `cargo build --release --features embedded --target thumbv7em-none-eabihf`

#![no_std]
#![no_main]

mod frames;
mod ui;

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Pin};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Ticker};
use oled_anim::config::DEMO_REFRESH_MS;
use oled_anim::OledBuffer;
use ui::{ButtonEvent, Scene, BUTTON_QUEUE};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE> =
    Channel::new();

/// Millisecond clock handed to the animation library. Wraps after ~49 days.
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

#[embassy_executor::task(pool_size = 3)]
async fn button(pin: AnyPin, event: ButtonEvent) {
    ui::buttons::button_task(pin, event, BUTTON_EVENTS.sender()).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("oled-anim demo starting");

    let buttons = [
        (p.P0_11.degrade(), ButtonEvent::Up),
        (p.P0_12.degrade(), ButtonEvent::Down),
        (p.P0_24.degrade(), ButtonEvent::Select),
    ];
    for (pin, event) in buttons {
        if spawner.spawn(button(pin, event)).is_err() {
            warn!("Failed to spawn button task for {}", event);
        }
    }

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let mut display = ui::display::init(i2c);

    let mut scene = match Scene::new(now_ms()) {
        Ok(scene) => scene,
        Err(e) => {
            error!("Invalid scene configuration: {}", e);
            return;
        }
    };

    let mut fb = OledBuffer::new();
    let events = BUTTON_EVENTS.receiver();
    let mut ticker = Ticker::every(Duration::from_millis(DEMO_REFRESH_MS));

    loop {
        // Apply input before drawing so a press shows up this frame.
        while let Ok(event) = events.try_receive() {
            scene.on_button(event, now_ms());
        }

        scene.render(&mut fb, now_ms());
        if let Err(e) = ui::display::present(&mut display, &fb) {
            warn!("Display update failed: {}", e);
        }

        ticker.next().await;
    }
}
