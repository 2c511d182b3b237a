//! # Hardware abstraction
//!
//! Operations the control modules need from the host platform. The host
//! binding is responsible for any hardware faults, so none of these
//! operations return errors.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Simulated host binding which records every call made to it.
pub mod sim;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{
    joystick::{AxisId, ButtonId, JoystickFrame},
    mech::{ActId, BinActId, BinaryState, LoopMode, PidGains},
};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Source of operator joystick readings.
pub trait OperatorInput {
    /// Read an axis, in the range [-1, 1].
    fn read_axis(&self, axis: AxisId) -> f64;

    /// Read whether a button is currently held down.
    fn read_button(&self, button: ButtonId) -> bool;
}

/// Actuators driven by the control modules.
pub trait MechInterface {
    /// Write a velocity or position demand, depending on the actuator's closed loop mode.
    fn set_dem(&mut self, id: ActId, dem: f64);

    /// Set the state of a double solenoid.
    fn set_binary(&mut self, id: BinActId, state: BinaryState);

    /// Clear the integral accumulator of the actuator's closed loop controller.
    fn reset_iaccum(&mut self, id: ActId);

    /// Select the closed loop mode and gains of an actuator and enable it.
    fn configure_closed_loop(&mut self, id: ActId, mode: LoopMode, gains: PidGains);

    /// Set the actuator's current sensor position as its zero.
    fn zero_position(&mut self, id: ActId);
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

/// A joystick sample is held until the next one is received.
impl OperatorInput for JoystickFrame {
    fn read_axis(&self, axis: AxisId) -> f64 {
        self.axis(axis)
    }

    fn read_button(&self, button: ButtonId) -> bool {
        self.button(button)
    }
}
