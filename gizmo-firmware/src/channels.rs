//! Inter-task state and signals
//!
//! Statics shared between Embassy tasks. Uses embassy-sync primitives
//! for notifications and the core's lock-free display state for data.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use gizmo_core::scheduler::SharedDisplayState;
use gizmo_core::sensing::TemperatureUnit;

/// Unit flag and latest readings of the thermo display
///
/// Starts in Fahrenheit; `main` applies the configured unit before the
/// tasks are spawned.
pub static SHARED_DISPLAY: SharedDisplayState = SharedDisplayState::new(false);

/// Raised by the input-watch task when the unit changes, so the display
/// can redraw before its next period
pub static UNIT_CHANGED: Signal<CriticalSectionRawMutex, TemperatureUnit> = Signal::new();
