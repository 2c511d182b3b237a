//! # Equipment Interface
//!
//! This module defines the interface structures which pass between the control modules and the
//! equipment they read from or command.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Mechanism (actuator) identifiers and demands
pub mod mech;

/// Operator joystick identifiers and samples
pub mod joystick;
