//! Parameters structure for DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use super::{ToggleMode, DEFAULT_DEADBAND, DEFAULT_RAMP_CONSTANT};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for drive control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    // ---- INPUT ----

    /// Axis readings with a magnitude below this are treated as zero.
    pub deadband: f64,

    /// How the arm and gear toggles react to the trigger being held.
    #[serde(default)]
    pub toggle_mode: ToggleMode,

    // ---- DRIVE ----

    /// Weight applied to both the current and previous demand by the ramp.
    pub ramp_constant: f64,

    /// Largest drive demand magnitude the actuators accept. Ramped demands
    /// are limited to this when written.
    ///
    /// Units: normalised
    pub drv_dem_limit: f64,

    // ---- ARM ----

    /// Tower position demand with the arm up.
    ///
    /// Units: encoder ticks
    pub arm_extended_dem: f64,

    /// Tower position demand with the arm down.
    ///
    /// Units: encoder ticks
    pub arm_retracted_dem: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            deadband: DEFAULT_DEADBAND,
            toggle_mode: ToggleMode::Level,
            ramp_constant: DEFAULT_RAMP_CONSTANT,
            drv_dem_limit: 1.0,
            arm_extended_dem: 11000.0,
            arm_retracted_dem: 0.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_from_toml() {
        let p: Params = util::params::from_str(
            "deadband = 0.1\n\
             ramp_constant = 0.5\n\
             drv_dem_limit = 1.0\n\
             arm_extended_dem = 9000.0\n\
             arm_retracted_dem = 0.0\n\
             toggle_mode = \"RisingEdge\"\n"
        ).unwrap();

        assert_eq!(p.deadband, 0.1);
        assert_eq!(p.ramp_constant, 0.5);
        assert_eq!(p.arm_extended_dem, 9000.0);
        assert_eq!(p.toggle_mode, ToggleMode::RisingEdge);
    }

    #[test]
    fn test_toggle_mode_defaults_to_level() {
        let p: Params = util::params::from_str(
            "deadband = 0.2\n\
             ramp_constant = 0.7\n\
             drv_dem_limit = 1.0\n\
             arm_extended_dem = 11000.0\n\
             arm_retracted_dem = 0.0\n"
        ).unwrap();

        assert_eq!(p.toggle_mode, ToggleMode::Level);
    }
}
