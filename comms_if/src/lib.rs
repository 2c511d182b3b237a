//! # Communications interface crate.
//!
//! Provides all common interfaces crossing the boundary between the control
//! software and the host platform.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Input commands (telecommands) which drive the executable, from a script or the platform
pub mod tc;

/// Command and state definitions for equipment (mechanisms and operator input)
pub mod eqpt;
