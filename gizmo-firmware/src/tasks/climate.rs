//! Thermo display tasks
//!
//! Thin Embassy wrappers around the core's periodic tasks. Both share the
//! I2C bus (BME280 and SSD1306) through blocking `I2cDevice`s.

use core::cell::RefCell;

use defmt::*;
use embassy_embedded_hal::shared_bus::blocking::i2c::I2cDevice;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Delay, Duration, Instant, Timer};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::{DisplaySize128x64, I2CInterface};
use ssd1306::Ssd1306;

use gizmo_core::scheduler::{InputWatchTask, PeriodicTask, SenseDisplayTask, SenseReport};
use gizmo_drivers::display::MonoTextDisplay;
use gizmo_drivers::sensor::Bme280Sensor;

use super::{Button, Indicator};
use crate::channels::UNIT_CHANGED;

/// Blocking I2C0 bus shared by the sensor and the display
pub type I2cBus = Mutex<CriticalSectionRawMutex, RefCell<I2c<'static, I2C0, Blocking>>>;

/// One device's handle on the shared bus
pub type SharedI2c = I2cDevice<'static, CriticalSectionRawMutex, I2c<'static, I2C0, Blocking>>;

/// BME280 on the shared bus
pub type Sensor = Bme280Sensor<SharedI2c, Delay>;

/// 128x64 SSD1306 on the shared bus
pub type Panel = MonoTextDisplay<
    Ssd1306<I2CInterface<SharedI2c>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>,
>;

/// Input-watch task: button polling and unit toggling
#[embassy_executor::task]
pub async fn input_watch_task(mut task: InputWatchTask<'static, Button, Indicator>) {
    info!("Input watch task started");

    loop {
        let delay_ms = task.run(Instant::now().as_millis());

        if let Some(unit) = task.take_toggle() {
            info!("Display unit: {}", unit.symbol());
            UNIT_CHANGED.signal(unit);
        }

        Timer::after_millis(u64::from(delay_ms)).await;
    }
}

/// Sense/display task: periodic reading and redraw
#[embassy_executor::task]
pub async fn sense_display_task(mut task: SenseDisplayTask<'static, Sensor, Panel>) {
    info!("Sense/display task started");

    loop {
        let delay_ms = task.run(Instant::now().as_millis());
        log_report(task.last_report());

        // Redraw early on a unit change without shifting the read period
        let deadline = Instant::now() + Duration::from_millis(u64::from(delay_ms));
        while let Either::Second(unit) = select(Timer::at(deadline), UNIT_CHANGED.wait()).await {
            debug!("Redraw for unit {}", unit.symbol());
            if let Err(e) = task.refresh() {
                warn!("Display refresh failed: {:?}", e);
            }
        }
    }
}

fn log_report(report: SenseReport) {
    if let Some(e) = report.temperature {
        warn!("Temperature read failed, keeping last value: {:?}", e);
    }
    if let Some(e) = report.humidity {
        warn!("Humidity read failed, keeping last value: {:?}", e);
    }
    if let Some(e) = report.display {
        warn!("Display update failed: {:?}", e);
    }
}
