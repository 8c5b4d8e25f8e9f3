//! Events that trigger state transitions

use super::machine::FaultKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Trigger events
    /// Distance trigger accepted an in-range sample
    ObjectDetected,

    // Timer events
    /// Arm delay elapsed; the arm has been raised
    ArmDelayElapsed,
    /// Hold time at the raised position elapsed
    DwellElapsed,
    /// Eased return reached the rest position
    ProfileComplete,
    /// Post-motion cooldown elapsed
    CooldownElapsed,

    // Fault events
    /// Startup failure that cannot be recovered
    FaultDetected(FaultKind),
}
