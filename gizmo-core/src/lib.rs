//! Board-agnostic core logic for the Gizmo gadgets
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (servo, climate sensor, text display)
//! - Actuation state machine and its tick-driven controller
//! - Eased motion profiles for servo setpoints
//! - Distance trigger and temperature/humidity unit conversion
//! - Periodic tasks, shared display state and a cooperative scheduler
//! - Fault signalling (blink patterns)
//! - Configuration types and the embedded config parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuation;
pub mod config;
pub mod motion;
pub mod safety;
pub mod scheduler;
pub mod sensing;
pub mod state;
pub mod traits;
