//! GPIO button input with async debouncing.
//!
//! Three physical buttons (active-low with internal pull-up):
//!   - UP     - next keyboard layer
//!   - DOWN   - previous keyboard layer
//!   - SELECT - toggle caps-lock indicator and fire the spark
//!
//! Each button runs in its own task, debounces edges and forwards a
//! `ButtonEvent` to the render loop.

use crate::ui::{ButtonEvent, BUTTON_QUEUE};
use defmt::debug;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};
use oled_anim::config::BUTTON_DEBOUNCE_MS;

/// Press-and-release loop for one button.
pub async fn button_task(
    pin: AnyPin,
    event: ButtonEvent,
    tx: Sender<'static, CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE>,
) -> ! {
    let mut btn = Input::new(pin, Pull::Up);
    let debounce = Duration::from_millis(BUTTON_DEBOUNCE_MS);

    loop {
        btn.wait_for_falling_edge().await;
        Timer::after(debounce).await;
        if !btn.is_low() {
            continue;
        }

        debug!("Button: {}", event);
        // Drop presses while the render loop is behind.
        if tx.try_send(event).is_err() {
            debug!("Button queue full, dropping {}", event);
        }

        btn.wait_for_rising_edge().await;
        Timer::after(debounce).await;
    }
}
