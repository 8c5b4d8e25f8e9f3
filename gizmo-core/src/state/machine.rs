//! State machine definition
//!
//! Servo and indicator behavior is a function of the current state and an
//! event.

use super::events::Event;

/// Actuation states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Armed, polling the distance sensor
    Idle,
    /// Triggered; waiting out the arm delay before raising
    Extending,
    /// Arm raised, holding position
    HoldExtended,
    /// Easing the arm back down
    Retracting,
    /// Arm at rest, trigger still disarmed
    Cooldown,
    /// Unrecoverable startup failure; terminal
    Fault(FaultKind),
}

/// Unrecoverable failure causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Servo driver failed to initialize
    ActuatorInit,
}

impl State {
    /// Check if the distance trigger may fire in this state
    pub fn accepts_trigger(&self) -> bool {
        matches!(self, State::Idle)
    }

    /// Check if the indicator is lit in this state
    ///
    /// Lit from the moment a trigger is accepted until the return to idle.
    pub fn indicator_on(&self) -> bool {
        matches!(
            self,
            State::Extending | State::HoldExtended | State::Retracting | State::Cooldown
        )
    }

    /// Check if this is the fault state
    pub fn is_fault(&self) -> bool {
        matches!(self, State::Fault(_))
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic. `Fault` absorbs every event.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Fault is terminal
            (Fault(kind), _) => Fault(kind),
            (_, FaultDetected(kind)) => Fault(kind),

            (Idle, ObjectDetected) => Extending,
            (Extending, ArmDelayElapsed) => HoldExtended,
            (HoldExtended, DwellElapsed) => Retracting,
            (Retracting, ProfileComplete) => Cooldown,
            (Cooldown, CooldownElapsed) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
