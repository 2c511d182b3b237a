//! # Teleoperation library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the teleoperation crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Global data store for the executable
pub mod data_store;

/// Drive control module - converts joystick samples into drive and mechanism demands
pub mod drive_ctrl;

/// Hardware abstraction - operations the host platform provides to the control modules
pub mod hal;

/// Mechanisms client - writes demands to the mechanisms, limiting them to the valid range
pub mod mech_client;

/// Executable parameters
pub mod params;

/// Phase manager - reconfigures the mechanisms as the match phase changes
pub mod phase_mgr;
