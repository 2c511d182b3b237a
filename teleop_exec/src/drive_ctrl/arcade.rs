//! Single stick arcade drive mixing

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Power demanded for each side of the drivetrain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DriveCommand {
    pub left: f64,
    pub right: f64,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Mix three shaped axis values into a left/right drive command.
///
/// Only the loudest axis is used:
/// - `y` drives straight, left and right both take `y`.
/// - `z` twists on the spot, left takes `-z` and right takes `z`.
/// - `x` (strafe) cannot be followed by a tank drive, so when it is loudest
///   the louder of `y` and `z` is used instead.
///
/// Ties go to the axis checked first (`y`, then `x`, then `z`).
pub fn mix(x: f64, y: f64, z: f64) -> DriveCommand {
    let (ax, ay, az) = (x.abs(), y.abs(), z.abs());

    if ay >= ax && ay >= az {
        straight(y)
    }
    else if ax > ay && ax > az {
        if ay >= az {
            straight(y)
        }
        else {
            twist(z)
        }
    }
    else if az > ay && az >= ax {
        twist(z)
    }
    else {
        DriveCommand::default()
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn straight(y: f64) -> DriveCommand {
    DriveCommand {
        left: y,
        right: y,
    }
}

fn twist(z: f64) -> DriveCommand {
    DriveCommand {
        left: -z,
        right: z,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cmd(left: f64, right: f64) -> DriveCommand {
        DriveCommand { left, right }
    }

    #[test]
    fn test_straight() {
        assert_eq!(mix(0.0, 0.5, 0.3), cmd(0.5, 0.5));
        assert_eq!(mix(0.2, -0.9, 0.0), cmd(-0.9, -0.9));
    }

    #[test]
    fn test_twist() {
        assert_eq!(mix(0.0, 0.1, 0.6), cmd(-0.6, 0.6));
        assert_eq!(mix(0.0, 0.0, -0.4), cmd(0.4, -0.4));
    }

    #[test]
    fn test_strafe_defers() {
        // x loudest, z beats y
        assert_eq!(mix(0.9, 0.1, 0.8), cmd(-0.8, 0.8));

        // x loudest, y beats z
        assert_eq!(mix(-0.9, 0.3, 0.1), cmd(0.3, 0.3));

        // x loudest, y and z tie so y wins
        assert_eq!(mix(0.9, 0.0, 0.0), cmd(0.0, 0.0));
        assert_eq!(mix(0.9, -0.4, 0.4), cmd(-0.4, -0.4));
    }

    #[test]
    fn test_ties() {
        assert_eq!(mix(0.0, 0.0, 0.0), cmd(0.0, 0.0));

        // y ties with z, y wins
        assert_eq!(mix(0.0, 0.5, -0.5), cmd(0.5, 0.5));

        // z ties with x, z wins
        assert_eq!(mix(0.5, 0.0, 0.5), cmd(-0.5, 0.5));
    }
}
