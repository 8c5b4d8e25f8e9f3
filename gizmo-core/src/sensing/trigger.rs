//! Distance trigger
//!
//! Decides when something in front of the ultrasonic sensor should start
//! an actuation. Once an activation is accepted the trigger stays disarmed
//! until the controller re-arms it at the end of its cooldown, so an object
//! lingering in range cannot re-fire mid-motion.

/// One distance reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSample {
    /// Distance to the nearest object in centimeters
    pub distance_cm: u16,
}

impl SensorSample {
    /// Create a sample from a distance in centimeters
    pub const fn new(distance_cm: u16) -> Self {
        Self { distance_cm }
    }
}

/// Threshold test: true iff the sample is at or inside the threshold
pub const fn should_activate(sample: SensorSample, threshold_cm: u16) -> bool {
    sample.distance_cm <= threshold_cm
}

/// Armable distance trigger
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceTrigger {
    /// Activation threshold (fixed for the trigger's lifetime)
    threshold_cm: u16,
    /// Whether the next in-range sample may fire
    armed: bool,
}

impl DistanceTrigger {
    /// Create an armed trigger
    pub const fn new(threshold_cm: u16) -> Self {
        Self {
            threshold_cm,
            armed: true,
        }
    }

    /// Activation threshold in centimeters
    pub fn threshold_cm(&self) -> u16 {
        self.threshold_cm
    }

    /// Check if the trigger can currently fire
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Offer a sample to the trigger
    ///
    /// `None` means the sensor produced no reading this cycle (echo timeout,
    /// bus error) and never fires. Returns true when an activation is
    /// accepted; the trigger disarms itself in that case.
    pub fn accept(&mut self, sample: Option<SensorSample>) -> bool {
        match sample {
            Some(sample) if self.armed && should_activate(sample, self.threshold_cm) => {
                self.armed = false;
                true
            }
            _ => false,
        }
    }

    /// Re-arm after the actuation sequence and cooldown have finished
    pub fn rearm(&mut self) {
        self.armed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(should_activate(SensorSample::new(40), 40));
        assert!(should_activate(SensorSample::new(0), 40));
        assert!(!should_activate(SensorSample::new(41), 40));
    }

    #[test]
    fn test_accept_disarms() {
        let mut trigger = DistanceTrigger::new(40);
        assert!(trigger.accept(Some(SensorSample::new(12))));
        assert!(!trigger.is_armed());

        // Object still in range: ignored until re-armed
        assert!(!trigger.accept(Some(SensorSample::new(12))));

        trigger.rearm();
        assert!(trigger.accept(Some(SensorSample::new(12))));
    }

    #[test]
    fn test_out_of_range_keeps_armed() {
        let mut trigger = DistanceTrigger::new(40);
        assert!(!trigger.accept(Some(SensorSample::new(200))));
        assert!(trigger.is_armed());
    }

    #[test]
    fn test_missing_sample_never_fires() {
        let mut trigger = DistanceTrigger::new(40);
        assert!(!trigger.accept(None));
        assert!(trigger.is_armed());
    }

    proptest! {
        #[test]
        fn prop_should_activate_matches_comparison(d in any::<u16>(), threshold in any::<u16>()) {
            prop_assert_eq!(should_activate(SensorSample::new(d), threshold), d <= threshold);
        }

        #[test]
        fn prop_armed_trigger_agrees_with_threshold(d in any::<u16>(), threshold in any::<u16>()) {
            let mut trigger = DistanceTrigger::new(threshold);
            prop_assert_eq!(trigger.accept(Some(SensorSample::new(d))), d <= threshold);
        }
    }
}
