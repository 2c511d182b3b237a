//! Drive output ramping

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The previous demand passed to the ramp for each drive actuator.
///
/// All values start at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RampState {
    pub front_left: f64,
    pub back_left: f64,
    pub front_right: f64,
    pub back_right: f64,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Ramp a demand to reduce acceleration on the drivetrain.
///
/// The output is `ramp_constant * (target + previous)` and `previous` is
/// replaced by `target` (not by the output). A higher constant gives a harsher
/// response.
///
/// The output is not limited: with a constant above 0.5 and `target` and
/// `previous` of the same sign the magnitude can exceed 1 (for example 1.4
/// for two consecutive full demands). Demands are limited when written to the
/// actuators.
pub fn ramp(target: f64, previous: &mut f64, ramp_constant: f64) -> f64 {
    let output = ramp_constant * target + ramp_constant * *previous;
    *previous = target;
    output
}

#[cfg(test)]
mod test {
    use super::*;
    use util::maths::approx_eq;

    #[test]
    fn test_ramp_stores_target() {
        let mut prev = 0.0;

        assert!(approx_eq(ramp(1.0, &mut prev, 0.7), 0.7, 1e-12));
        assert_eq!(prev, 1.0);

        // Second call uses the stored target, not the previous output
        assert!(approx_eq(ramp(1.0, &mut prev, 0.7), 1.4, 1e-12));
        assert_eq!(prev, 1.0);
    }

    #[test]
    fn test_ramp_to_zero_decays() {
        let mut prev = 0.8;

        let first = ramp(0.0, &mut prev, 0.7);
        assert!(approx_eq(first, 0.56, 1e-12));
        assert_eq!(prev, 0.0);
        assert_eq!(ramp(0.0, &mut prev, 0.7), 0.0);
    }

    #[test]
    fn test_ramp_opposing_demands() {
        let mut prev = -1.0;
        assert!(approx_eq(ramp(1.0, &mut prev, 0.7), 0.0, 1e-12));
    }
}
