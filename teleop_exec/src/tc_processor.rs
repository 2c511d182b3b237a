//! # Telecommand processor module
//!
//! The telecommand processor handles the TCs coming from the input script.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use comms_if::tc::Tc;
use teleop_lib::data_store::DataStore;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore to send commands to different modules.
pub(crate) fn exec(ds: &mut DataStore, tc: &Tc) {

    // Handle different Tcs
    match tc {
        Tc::Phase(p) => {
            debug!("Recieved Phase({:?}) command", p);
            ds.phase_mgr.request(*p);
        },
        Tc::Joystick(frame) => {
            trace!("New joystick sample: {:?}", frame);
            ds.joystick = frame.clone();
        }
    }

}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::{eqpt::joystick::JoystickFrame, tc::Phase};
    use teleop_lib::hal::sim::SimMech;

    #[test]
    fn test_exec() {
        let mut ds = DataStore::default();
        let frame = JoystickFrame { y: 0.6, buttons: vec![true], ..Default::default() };

        exec(&mut ds, &Tc::Joystick(frame.clone()));
        exec(&mut ds, &Tc::Phase(Phase::Teleop));

        assert_eq!(ds.joystick, frame);

        // The phase is entered on the next cycle
        assert_eq!(ds.phase_mgr.current(), Phase::Disabled);
        let mut mech = SimMech::new();
        let rpt = ds.phase_mgr.proc(&mut ds.drive_ctrl, &ds.joystick, &mut mech);
        assert_eq!(rpt.phase, Phase::Teleop);
        assert!(rpt.entered);
    }
}
