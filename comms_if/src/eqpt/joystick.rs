//! # Joystick Equipment Data

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Raw joystick button identifier, numbered from 1 as on the physical stick.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
pub struct ButtonId(pub u8);

/// One sample of every joystick axis and button.
///
/// Axes are in the range [-1, 1]. `buttons[0]` is button 1, buttons missing from the sample read
/// as released.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct JoystickFrame {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub buttons: Vec<bool>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Joystick axes.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
pub enum AxisId {
    /// Strafe (left/right tilt)
    X,
    /// Forward/backward tilt
    Y,
    /// Twist
    Z,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ButtonId {
    /// The primary trigger button.
    pub const TRIGGER: ButtonId = ButtonId(1);
}

impl JoystickFrame {
    /// Get the value of an axis.
    pub fn axis(&self, axis: AxisId) -> f64 {
        match axis {
            AxisId::X => self.x,
            AxisId::Y => self.y,
            AxisId::Z => self.z,
        }
    }

    /// Get the state of a button, `false` if the button is not in the sample.
    pub fn button(&self, button: ButtonId) -> bool {
        match button.0 {
            0 => false,
            n => self.buttons.get(n as usize - 1).copied().unwrap_or(false),
        }
    }
}
