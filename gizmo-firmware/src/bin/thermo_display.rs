//! Thermo display
//!
//! Shows temperature and humidity from a BME280 on an SSD1306 OLED. A
//! button toggles between Fahrenheit and Celsius; the LED is lit while
//! Celsius is shown.
//!
//! Wiring (Raspberry Pi Pico):
//! - I2C0: SDA GP4, SCL GP5 (BME280 at 0x76, SSD1306 at 0x3C)
//! - Button: GP15 to 3.3 V (internal pull-down)
//! - Indicator LED: GP25 (on-board)

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_embedded_hal::shared_bus::blocking::i2c::I2cDevice;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Delay;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use gizmo_core::safety;
use gizmo_core::scheduler::{InputWatchTask, SenseDisplayTask};
use gizmo_core::sensing::TemperatureUnit;
use gizmo_drivers::display::MonoTextDisplay;
use gizmo_drivers::gpio::{GpioInput, GpioOutput};
use gizmo_drivers::sensor::Bme280Sensor;
use gizmo_firmware::channels::SHARED_DISPLAY;
use gizmo_firmware::config;
use gizmo_firmware::tasks::{self, I2cBus};

// Shared I2C bus (must live forever for the device handles)
static I2C_BUS: StaticCell<I2cBus> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thermo display starting...");

    let p = embassy_rp::init(Default::default());
    let config = config::load();

    let mut led = GpioOutput::active_high(Output::new(p.PIN_25, Level::Low));
    let button = GpioInput::active_high(Input::new(p.PIN_15, Pull::Down));

    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let bus: &'static I2cBus = I2C_BUS.init(Mutex::new(RefCell::new(i2c)));

    let interface = I2CDisplayInterface::new(I2cDevice::new(bus));
    let mut oled = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    match oled.init() {
        Ok(()) => info!("Display initialized"),
        Err(_) => warn!("Display init failed, continuing without it"),
    }

    let mut sensor = Bme280Sensor::new(I2cDevice::new(bus), Delay);
    let failed_checks = safety::wait_until_ready(&mut sensor, &mut led, &mut Delay);
    info!("BME280 ready after {} failed checks", failed_checks);

    let Some((mut unit, readings)) = SHARED_DISPLAY.take_writers() else {
        error!("Display state writers already taken");
        return;
    };
    unit.set(TemperatureUnit::from_celsius_flag(
        config.climate.start_in_celsius,
    ));

    let input = InputWatchTask::new(button, led, unit, &config.climate);
    let sense = SenseDisplayTask::new(
        sensor,
        MonoTextDisplay::new(oled),
        readings,
        &SHARED_DISPLAY,
        &config.climate,
    );

    spawner.spawn(tasks::input_watch_task(input)).unwrap();
    spawner.spawn(tasks::sense_display_task(sense)).unwrap();

    info!("All tasks spawned");
}
