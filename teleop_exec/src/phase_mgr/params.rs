//! Parameters structure for PhaseMgr

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use comms_if::eqpt::mech::PidGains;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the phase manager.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Closed loop gains used for every actuator in every mode.
    pub gains: PidGains,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            gains: PidGains {
                p: 0.85,
                i: 0.004,
                d: 0.0192
            }
        }
    }
}
