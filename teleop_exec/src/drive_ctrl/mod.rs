//! Drive control module
//!
//! Converts raw joystick samples into drive and mechanism demands once per
//! cycle: input shaping, arcade mixing, output ramping and button toggles.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod arcade;
mod params;
mod ramp;
mod shaper;
mod state;
mod toggle;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use arcade::*;
pub use params::*;
pub use ramp::*;
pub use shaper::*;
pub use state::*;
pub use toggle::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Deadband applied to every joystick axis.
pub const DEFAULT_DEADBAND: f64 = 0.2;

/// Weight used by the ramp for both the current and previous demand.
pub const DEFAULT_RAMP_CONSTANT: f64 = 0.7;
