//! High-five actuation task
//!
//! Polls the HC-SR04 while the controller is armed and feeds elapsed time
//! and samples to the actuation controller, applying its commands to the
//! servo and indicator.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::pwm::Pwm;
use embassy_time::{Instant, Timer};
use hcsr04_async::{Config, DistanceUnit, Hcsr04, TemperatureUnit};

use gizmo_core::actuation::ActuationController;
use gizmo_core::state::State;
use gizmo_core::traits::SensorError;
use gizmo_drivers::actuator::PwmServo;
use gizmo_drivers::sensor::sample_from_measurement;

use super::Indicator;

/// Servo on an RP2040 PWM slice
pub type Servo = PwmServo<Pwm<'static>>;

/// Air temperature assumed for the speed of sound (°C)
const AMBIENT_TEMPERATURE_C: f64 = 20.0;

/// Actuation task
///
/// Owns the controller; sleeps for as long as the controller allows.
#[embassy_executor::task]
pub async fn actuation_task(
    mut controller: ActuationController,
    mut servo: Servo,
    mut led: Indicator,
    trigger: Output<'static>,
    echo: Input<'static>,
) {
    info!(
        "Actuation task started (threshold {} cm)",
        controller.threshold_cm()
    );

    let config = Config {
        distance_unit: DistanceUnit::Centimeters,
        temperature_unit: TemperatureUnit::Celsius,
    };
    let mut sensor = Hcsr04::new(trigger, echo, config);
    let mut last_tick = Instant::now();

    loop {
        // Samples taken while busy would be dropped by the controller anyway
        let sample = if controller.is_armed() {
            match sample_from_measurement(sensor.measure(AMBIENT_TEMPERATURE_C).await) {
                Ok(s) => {
                    trace!("Distance: {} cm", s.distance_cm);
                    Some(s)
                }
                Err(SensorError::OutOfRange) => {
                    debug!("Distance reading out of range, skipped");
                    None
                }
                Err(e) => {
                    warn!("Distance read failed: {:?}", e);
                    None
                }
            }
        } else {
            None
        };

        let now = Instant::now();
        let delta_ms = (now - last_tick).as_millis() as u32;
        last_tick = now;

        let before = controller.state();
        let commands = controller.tick(delta_ms, sample);
        let after = controller.state();

        if after != before {
            debug!("Actuation: {:?} -> {:?}", before, after);
            if before == State::Idle {
                info!("High five #{}", controller.activations());
            }
        }

        if let Err(e) = commands.apply(&mut servo, &mut led) {
            warn!("Servo command rejected: {:?}", e);
        }

        match controller.next_wake_ms() {
            Some(ms) => Timer::after_millis(u64::from(ms)).await,
            None => {
                error!("Actuation controller faulted, task stopping");
                return;
            }
        }
    }
}
