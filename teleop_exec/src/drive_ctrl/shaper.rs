//! Joystick axis shaping

/// Shape a raw axis reading.
///
/// Readings with a magnitude below `|deadband|` are zeroed. All other
/// readings are squared with their sign preserved, giving finer control at
/// low speed while still reaching full scale at the extremes.
pub fn shape(raw: f64, deadband: f64) -> f64 {
    if raw.abs() < deadband.abs() {
        return 0.0;
    }

    let sign = if raw < 0.0 { -1.0 } else { 1.0 };

    raw * raw * sign
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deadband() {
        for raw in &[0.0, 0.05, -0.1, 0.19, -0.199] {
            assert_eq!(shape(*raw, 0.2), 0.0);
        }
    }

    #[test]
    fn test_square_keeps_sign() {
        assert_eq!(shape(0.5, 0.2), 0.25);
        assert_eq!(shape(-0.5, 0.2), -0.25);
        assert_eq!(shape(1.0, 0.2), 1.0);
        assert_eq!(shape(-1.0, 0.2), -1.0);
    }

    #[test]
    fn test_deadband_edge_and_sign() {
        // The threshold itself passes through
        assert!((shape(0.2, 0.2) - 0.04).abs() < 1e-12);

        // A negative deadband acts on its magnitude
        assert_eq!(shape(0.1, -0.2), 0.0);

        // Zero deadband shapes everything
        assert!((shape(0.1, 0.0) - 0.01).abs() < 1e-12);
    }
}
