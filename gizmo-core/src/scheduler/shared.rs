//! Shared display state
//!
//! Each field is a single atomic word with exactly one writer:
//!
//! - `use_celsius`: written by the input-watch task ([`UnitWriter`])
//! - temperature and humidity: written by the sense task ([`ReadingWriter`])
//!
//! Readers load fields independently. A snapshot may mix a new unit with
//! an older reading, never a half-written value. Writes use `Release` and
//! reads `Acquire`, so a store is visible to the next load on any task.

use portable_atomic::{AtomicBool, AtomicI32, Ordering};

use crate::sensing::TemperatureUnit;

/// Stored in a reading slot until the first successful read
const NO_READING: i32 = i32::MIN;

/// Lock-free state shared between the gadget's tasks
///
/// Usually placed in a `static`; [`take_writers`](Self::take_writers)
/// hands out the writer handles once.
#[derive(Debug)]
pub struct SharedDisplayState {
    use_celsius: AtomicBool,
    temperature_milli: AtomicI32,
    humidity_milli: AtomicI32,
    writers_taken: AtomicBool,
}

/// Values observed by a reader at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplaySnapshot {
    /// Unit the display should use
    pub unit: TemperatureUnit,
    /// Last temperature in milli-°C, `None` before the first reading
    pub temperature_milli: Option<i32>,
    /// Last humidity in milli-percent, `None` before the first reading
    pub humidity_milli: Option<i32>,
}

impl SharedDisplayState {
    /// Create the state with an initial unit and no readings
    pub const fn new(use_celsius: bool) -> Self {
        Self {
            use_celsius: AtomicBool::new(use_celsius),
            temperature_milli: AtomicI32::new(NO_READING),
            humidity_milli: AtomicI32::new(NO_READING),
            writers_taken: AtomicBool::new(false),
        }
    }

    /// Take the writer handles
    ///
    /// Returns `None` on every call after the first, so each field can
    /// only ever have one writer.
    pub fn take_writers(&self) -> Option<(UnitWriter<'_>, ReadingWriter<'_>)> {
        if self.writers_taken.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some((UnitWriter { state: self }, ReadingWriter { state: self }))
    }

    /// Current display unit
    pub fn unit(&self) -> TemperatureUnit {
        TemperatureUnit::from_celsius_flag(self.use_celsius.load(Ordering::Acquire))
    }

    /// Load every field
    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            unit: self.unit(),
            temperature_milli: load_reading(&self.temperature_milli),
            humidity_milli: load_reading(&self.humidity_milli),
        }
    }
}

fn load_reading(slot: &AtomicI32) -> Option<i32> {
    match slot.load(Ordering::Acquire) {
        NO_READING => None,
        value => Some(value),
    }
}

/// Sole writer of the unit flag
#[derive(Debug)]
pub struct UnitWriter<'a> {
    state: &'a SharedDisplayState,
}

impl UnitWriter<'_> {
    /// Current unit
    pub fn unit(&self) -> TemperatureUnit {
        self.state.unit()
    }

    /// Select the unit
    pub fn set(&mut self, unit: TemperatureUnit) {
        self.state
            .use_celsius
            .store(unit == TemperatureUnit::Celsius, Ordering::Release);
    }

    /// Switch to the other unit and return the new one
    pub fn toggle(&mut self) -> TemperatureUnit {
        let next = match self.unit() {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        };
        self.set(next);
        next
    }
}

/// Sole writer of the sensor readings
#[derive(Debug)]
pub struct ReadingWriter<'a> {
    state: &'a SharedDisplayState,
}

impl ReadingWriter<'_> {
    /// Publish a temperature reading in milli-°C
    pub fn store_temperature(&mut self, milli_c: i32) {
        self.state
            .temperature_milli
            .store(milli_c.max(NO_READING + 1), Ordering::Release);
    }

    /// Publish a humidity reading in milli-percent
    pub fn store_humidity(&mut self, milli_percent: i32) {
        self.state
            .humidity_milli
            .store(milli_percent.max(NO_READING + 1), Ordering::Release);
    }
}
