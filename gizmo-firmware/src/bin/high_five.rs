//! High five
//!
//! Raises a servo arm when a hand comes within range of an HC-SR04, holds
//! it briefly, then eases it back down.
//!
//! Wiring (Raspberry Pi Pico):
//! - Servo signal: GP16 (PWM slice 0, channel A)
//! - HC-SR04 trigger: GP2, echo: GP3 (through a 5 V to 3.3 V divider)
//! - Indicator LED: GP25 (on-board)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use gizmo_core::actuation::ActuationController;
use gizmo_core::safety;
use gizmo_core::state::FaultKind;
use gizmo_drivers::actuator::{PwmServo, ServoCalibration};
use gizmo_drivers::gpio::GpioOutput;
use gizmo_firmware::{config, tasks};

/// 125 MHz / 64 = 1.953125 MHz PWM clock
const SERVO_DIVIDER: u8 = 64;

/// 1.953125 MHz / (39061 + 1) = 50 Hz
const SERVO_TOP: u16 = 39_061;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("High five starting...");

    let p = embassy_rp::init(Default::default());
    let config = config::load();

    let mut led = GpioOutput::active_high(Output::new(p.PIN_25, Level::Low));

    let mut pwm_config = PwmConfig::default();
    pwm_config.top = SERVO_TOP;
    pwm_config.divider = SERVO_DIVIDER.into();
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config);

    let servo = PwmServo::new(pwm, ServoCalibration::default());
    let controller = ActuationController::start(
        config.actuation,
        servo.as_ref().map(|_| ()).map_err(|e| *e),
    );
    let mut servo = match (servo, controller.fault()) {
        (Ok(servo), None) => servo,
        (result, fault) => {
            let kind = fault.unwrap_or(FaultKind::ActuatorInit);
            error!("Servo init failed: {:?}, fault {:?}", result.err(), kind);
            safety::halt(&mut led, &mut Delay, kind);
        }
    };
    info!("Servo initialized");

    if let Err(e) = controller.boot_commands().apply(&mut servo, &mut led) {
        warn!("Boot position rejected: {:?}", e);
    }

    let trigger = Output::new(p.PIN_2, Level::Low);
    let echo = Input::new(p.PIN_3, Pull::None);

    spawner
        .spawn(tasks::actuation_task(controller, servo, led, trigger, echo))
        .unwrap();

    info!("All tasks spawned");
}
