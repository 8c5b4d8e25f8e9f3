//! Tick-driven actuation controller
//!
//! The controller never sleeps. The driving loop reports how much time
//! has passed and the latest distance sample; the controller answers with
//! the servo and indicator commands to apply and how long the loop may
//! sleep before the next tick.

use gizmo_hal::OutputPin;

use crate::config::ActuationConfig;
use crate::motion::{generate, MotionProfile, PulseWidth};
use crate::sensing::{DistanceTrigger, SensorSample};
use crate::state::{Event, FaultKind, State};
use crate::traits::{ActuatorError, ServoActuator};

/// Outputs produced by a tick
///
/// `None` means "leave as is". When several setpoints are passed in one
/// tick only the last one is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Commands {
    /// New servo setpoint
    pub setpoint: Option<PulseWidth>,
    /// New indicator level
    pub indicator: Option<bool>,
}

impl Commands {
    /// No change
    pub const fn none() -> Self {
        Self {
            setpoint: None,
            indicator: None,
        }
    }

    /// Check if the tick produced nothing to apply
    pub fn is_empty(&self) -> bool {
        self.setpoint.is_none() && self.indicator.is_none()
    }

    /// Apply the commands to the hardware
    ///
    /// The indicator is updated even if the servo rejects the setpoint.
    pub fn apply<A, L>(&self, servo: &mut A, indicator: &mut L) -> Result<(), ActuatorError>
    where
        A: ServoActuator,
        L: OutputPin,
    {
        if let Some(on) = self.indicator {
            indicator.set_level(on.into());
        }
        if let Some(width) = self.setpoint {
            servo.set_pulse_width(width)?;
        }
        Ok(())
    }
}

/// Actuation controller
#[derive(Debug, Clone)]
pub struct ActuationController {
    config: ActuationConfig,
    state: State,
    trigger: DistanceTrigger,
    /// Time left in the current timed phase, or until the next profile step
    timer_ms: u32,
    /// Eased return, present while retracting
    profile: Option<MotionProfile>,
    /// Accepted activations since boot
    activations: u32,
}

impl ActuationController {
    /// Create the controller from the outcome of actuator initialization
    ///
    /// A failed initialization puts the controller straight into the
    /// terminal fault state.
    pub fn start(config: ActuationConfig, init: Result<(), ActuatorError>) -> Self {
        let mut controller = Self {
            trigger: DistanceTrigger::new(config.threshold_cm),
            config,
            state: State::Idle,
            timer_ms: 0,
            profile: None,
            activations: 0,
        };

        if init.is_err() {
            let mut ignored = Commands::none();
            controller.apply(Event::FaultDetected(FaultKind::ActuatorInit), &mut ignored);
        }

        controller
    }

    /// Commands to apply once after power-on: arm at rest, indicator off
    pub fn boot_commands(&self) -> Commands {
        if self.state.is_fault() {
            return Commands::none();
        }
        Commands {
            setpoint: Some(self.config.hand_down()),
            indicator: Some(false),
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Fault that stopped the controller, if any
    pub fn fault(&self) -> Option<FaultKind> {
        match self.state {
            State::Fault(kind) => Some(kind),
            _ => None,
        }
    }

    /// Distance at or below which an armed trigger fires (cm)
    pub fn threshold_cm(&self) -> u16 {
        self.trigger.threshold_cm()
    }

    /// Number of activations accepted since boot
    pub fn activations(&self) -> u32 {
        self.activations
    }

    /// Configuration in use
    pub fn config(&self) -> &ActuationConfig {
        &self.config
    }

    /// Check if the trigger would accept an in-range sample right now
    pub fn is_armed(&self) -> bool {
        self.state.accepts_trigger() && self.trigger.is_armed()
    }

    /// How long the driving loop may sleep before the next tick
    ///
    /// `None` in the fault state, where nothing will ever happen again.
    pub fn next_wake_ms(&self) -> Option<u32> {
        match self.state {
            State::Fault(_) => None,
            State::Idle => Some(self.config.poll_interval_ms),
            State::Extending | State::HoldExtended | State::Retracting | State::Cooldown => {
                Some(self.timer_ms)
            }
        }
    }

    /// Advance by `delta_ms` and offer the latest distance sample
    ///
    /// Time is applied first, carrying any excess through as many phases
    /// as it covers. The sample is only considered if the controller was
    /// idle for the whole tick; samples taken while busy are dropped.
    pub fn tick(&mut self, delta_ms: u32, sample: Option<SensorSample>) -> Commands {
        let mut commands = Commands::none();
        if self.state.is_fault() {
            return commands;
        }

        let was_idle = self.state.accepts_trigger();
        self.advance(delta_ms, &mut commands);

        if was_idle && self.state.accepts_trigger() && self.trigger.accept(sample) {
            self.apply(Event::ObjectDetected, &mut commands);
        }

        commands
    }

    fn advance(&mut self, delta_ms: u32, commands: &mut Commands) {
        let mut remaining = delta_ms;

        loop {
            let event = match self.state {
                State::Idle | State::Fault(_) => return,
                State::Extending => Event::ArmDelayElapsed,
                State::HoldExtended => Event::DwellElapsed,
                State::Cooldown => Event::CooldownElapsed,
                State::Retracting => Event::ProfileComplete,
            };

            if remaining < self.timer_ms {
                self.timer_ms -= remaining;
                return;
            }
            remaining -= self.timer_ms;

            if self.state == State::Retracting && !self.step_profile(commands) {
                continue;
            }
            self.apply(event, commands);
        }
    }

    /// Emit the next profile setpoint; true once the profile is exhausted
    fn step_profile(&mut self, commands: &mut Commands) -> bool {
        let Some(profile) = self.profile.as_mut() else {
            return true;
        };

        if let Some(width) = profile.next() {
            commands.setpoint = Some(width);
        }

        if profile.is_finished() {
            true
        } else {
            self.timer_ms = profile.interval_ms();
            false
        }
    }

    fn apply(&mut self, event: Event, commands: &mut Commands) {
        let next = self.state.transition(event);
        if next == self.state {
            return;
        }
        self.state = next;

        match next {
            State::Extending => {
                self.activations = self.activations.wrapping_add(1);
                self.timer_ms = self.config.arm_delay_ms;
                commands.indicator = Some(true);
            }
            State::HoldExtended => {
                self.timer_ms = self.config.dwell_ms;
                commands.setpoint = Some(self.config.hand_up());
            }
            State::Retracting => {
                let profile = generate(
                    self.config.hand_up(),
                    self.config.hand_down(),
                    self.config.ease_step_us,
                    self.config.ease_interval_ms,
                );
                self.timer_ms = profile.interval_ms();
                self.profile = Some(profile);
            }
            State::Cooldown => {
                self.profile = None;
                self.timer_ms = self.config.cooldown_ms;
                commands.setpoint = Some(self.config.hand_down());
            }
            State::Idle => {
                self.timer_ms = 0;
                self.trigger.rearm();
                commands.indicator = Some(false);
            }
            State::Fault(_) => {
                self.profile = None;
                self.timer_ms = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NEAR: Option<SensorSample> = Some(SensorSample::new(20));
    const FAR: Option<SensorSample> = Some(SensorSample::new(200));

    fn controller() -> ActuationController {
        ActuationController::start(ActuationConfig::default(), Ok(()))
    }

    /// Time from trigger until the arm is back at rest
    fn sequence_ms(config: &ActuationConfig) -> u32 {
        let steps = (config.hand_up_us - config.hand_down_us).div_ceil(config.ease_step_us) + 1;
        config.arm_delay_ms + config.dwell_ms + u32::from(steps) * config.ease_interval_ms
    }

    /// Drive the controller in fixed ticks with a constant sample
    fn run(c: &mut ActuationController, total_ms: u32, step_ms: u32, sample: Option<SensorSample>) {
        let mut t = 0;
        while t < total_ms {
            c.tick(step_ms, sample);
            t += step_ms;
        }
    }

    #[test]
    fn test_boot_commands() {
        let c = controller();
        assert_eq!(c.state(), State::Idle);
        assert_eq!(c.fault(), None);
        assert_eq!(
            c.boot_commands(),
            Commands {
                setpoint: Some(PulseWidth::from_micros(640)),
                indicator: Some(false),
            }
        );
    }

    #[test]
    fn test_init_failure_is_fault() {
        let mut c = ActuationController::start(
            ActuationConfig::default(),
            Err(ActuatorError::InitFailed),
        );
        assert_eq!(c.state(), State::Fault(FaultKind::ActuatorInit));
        assert_eq!(c.fault(), Some(FaultKind::ActuatorInit));
        assert_eq!(c.boot_commands(), Commands::none());
        assert_eq!(c.next_wake_ms(), None);
        assert!(c.tick(10_000, NEAR).is_empty());
        assert!(c.state().is_fault());
        assert_eq!(c.activations(), 0);
    }

    #[test]
    fn test_threshold_from_config() {
        let config = ActuationConfig {
            threshold_cm: 25,
            ..Default::default()
        };
        let mut c = ActuationController::start(config, Ok(()));
        assert_eq!(c.threshold_cm(), 25);

        c.tick(60, Some(SensorSample::new(26)));
        assert_eq!(c.state(), State::Idle);
        c.tick(60, Some(SensorSample::new(25)));
        assert_eq!(c.state(), State::Extending);
    }

    #[test]
    fn test_far_sample_does_nothing() {
        let mut c = controller();
        assert!(c.tick(60, FAR).is_empty());
        assert!(c.tick(60, None).is_empty());
        assert_eq!(c.state(), State::Idle);
        assert_eq!(c.next_wake_ms(), Some(60));
    }

    #[test]
    fn test_sequence_timing() {
        let mut c = controller();

        let cmds = c.tick(0, NEAR);
        assert_eq!(c.state(), State::Extending);
        assert_eq!(cmds.indicator, Some(true));
        assert_eq!(cmds.setpoint, None);
        assert_eq!(c.next_wake_ms(), Some(500));

        assert!(c.tick(499, None).is_empty());
        let cmds = c.tick(1, None);
        assert_eq!(c.state(), State::HoldExtended);
        assert_eq!(cmds.setpoint, Some(PulseWidth::from_micros(1600)));

        c.tick(250, None);
        assert_eq!(c.state(), State::Retracting);

        // 1600 is replayed first, then one 10 µs step every 5 ms
        let cmds = c.tick(5, None);
        assert_eq!(cmds.setpoint, Some(PulseWidth::from_micros(1600)));
        let cmds = c.tick(5, None);
        assert_eq!(cmds.setpoint, Some(PulseWidth::from_micros(1590)));

        // 95 more steps finish at rest
        let mut last = None;
        for _ in 0..95 {
            if let Some(width) = c.tick(5, None).setpoint {
                last = Some(width);
            }
        }
        assert_eq!(last, Some(PulseWidth::from_micros(640)));
        assert_eq!(c.state(), State::Cooldown);

        let cmds = c.tick(999, NEAR);
        assert_eq!(c.state(), State::Cooldown);
        assert_eq!(cmds.indicator, None);

        let cmds = c.tick(1, NEAR);
        assert_eq!(c.state(), State::Idle);
        assert_eq!(cmds.indicator, Some(false));
        assert_eq!(c.activations(), 1);
    }

    #[test]
    fn test_retract_is_monotonic_and_bounded() {
        let mut c = controller();
        c.tick(0, NEAR);
        c.tick(750, None);

        let mut previous = 1600;
        while c.state() == State::Retracting {
            if let Some(width) = c.tick(5, None).setpoint {
                let us = width.as_micros();
                assert!(us <= previous);
                assert!(previous - us <= 10);
                assert!((640..=1600).contains(&us));
                previous = us;
            }
        }
        assert_eq!(previous, 640);
    }

    #[test]
    fn test_large_delta_carries_through_phases() {
        let config = ActuationConfig::default();
        let mut c = controller();
        c.tick(0, NEAR);

        let cmds = c.tick(sequence_ms(&config) + 300, None);
        assert_eq!(c.state(), State::Cooldown);
        assert_eq!(cmds.setpoint, Some(PulseWidth::from_micros(640)));
        assert_eq!(cmds.indicator, None);
        assert_eq!(c.next_wake_ms(), Some(700));

        let cmds = c.tick(10_000, None);
        assert_eq!(c.state(), State::Idle);
        assert_eq!(cmds.indicator, Some(false));
    }

    #[test]
    fn test_sample_ignored_on_return_to_idle_tick() {
        let mut c = controller();
        c.tick(0, NEAR);
        c.tick(60_000, NEAR);
        assert_eq!(c.state(), State::Idle);
        assert_eq!(c.activations(), 1);

        c.tick(0, NEAR);
        assert_eq!(c.state(), State::Extending);
        assert_eq!(c.activations(), 2);
    }

    #[test]
    fn test_continuous_dwell_fires_once_per_cycle() {
        let config = ActuationConfig::default();
        let mut c = controller();

        // Object held in range through the whole sequence
        run(&mut c, sequence_ms(&config) + config.cooldown_ms - 5, 5, NEAR);
        assert_eq!(c.activations(), 1);
        assert_ne!(c.state(), State::Idle);

        // Back to idle on the second tick, fires on the third
        run(&mut c, 15, 5, NEAR);
        assert_eq!(c.activations(), 2);
    }

    #[test]
    fn test_apply_commands() {
        struct Servo(Option<u16>);
        impl ServoActuator for Servo {
            fn set_pulse_width(&mut self, width: PulseWidth) -> Result<(), ActuatorError> {
                self.0 = Some(width.as_micros());
                Ok(())
            }
        }

        struct Led(bool);
        impl OutputPin for Led {
            fn set_high(&mut self) {
                self.0 = true;
            }
            fn set_low(&mut self) {
                self.0 = false;
            }
            fn is_set_high(&self) -> bool {
                self.0
            }
        }

        let c = controller();
        let mut servo = Servo(None);
        let mut led = Led(true);
        c.boot_commands().apply(&mut servo, &mut led).unwrap();
        assert_eq!(servo.0, Some(640));
        assert!(!led.0);

        Commands::none().apply(&mut servo, &mut led).unwrap();
        assert_eq!(servo.0, Some(640));
    }

    proptest! {
        #[test]
        fn prop_never_refires_before_cooldown(
            ticks in prop::collection::vec((1u32..400, any::<bool>()), 1..300),
        ) {
            let config = ActuationConfig::default();
            let min_gap = sequence_ms(&config) + config.cooldown_ms;
            let mut c = controller();
            let mut now = 0u32;
            let mut last_fire: Option<u32> = None;

            for (delta, near) in ticks {
                now += delta;
                let before = c.activations();
                c.tick(delta, if near { NEAR } else { FAR });
                if c.activations() > before {
                    if let Some(prev) = last_fire {
                        prop_assert!(now - prev >= min_gap);
                    }
                    last_fire = Some(now);
                }
            }
        }

        #[test]
        fn prop_setpoints_stay_in_range(
            ticks in prop::collection::vec((0u32..50, any::<bool>()), 1..500),
        ) {
            let mut c = controller();
            for (delta, near) in ticks {
                let cmds = c.tick(delta, if near { NEAR } else { None });
                if let Some(width) = cmds.setpoint {
                    prop_assert!((640..=1600).contains(&width.as_micros()));
                }
                prop_assert_eq!(c.state().indicator_on(), c.state() != State::Idle);
            }
        }
    }
}
