//! # Telecommand module
//!
//! This module provides the commands which drive the teleoperation executable: match phase
//! changes signalled by the platform and operator joystick samples.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use thiserror::Error;

// Internal
use crate::eqpt::joystick::JoystickFrame;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an event from the platform to be handled by the exec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Tc {
    /// The platform has moved into a new match phase.
    Phase(Phase),

    /// A new joystick sample, held until the next one arrives.
    Joystick(JoystickFrame),
}

/// Match phases of the vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub enum Phase {
    Disabled,
    Autonomous,
    Teleop,
    Test,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        serde_json::from_str(json_str).map_err(TcParseError::InvalidJson)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Disabled
    }
}
