//! Implementations for the DriveCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::convert::Infallible;
use log::trace;
use serde::Serialize;

// Internal
use super::{
    mix, ramp, shape,
    DriveCommand, EdgeToggle, Params, RampState};
use comms_if::eqpt::{
    joystick::{AxisId, ButtonId},
    mech::{ActId, BinActId, BinaryState, MechDems, DRV_IDS, NUM_DRV_ACTS}};
use util::{
    params,
    module::State,
    archive::{Archived, Archiver, ArchiveError},
    session::{self, Session}};
use crate::{
    hal::{MechInterface, OperatorInput},
    mech_client::{self, DemLimits, SendReport}};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control module state.
///
/// Owns all state which persists between cycles: the previous demand of each
/// drive actuator's ramp and the arm and gear toggles.
#[derive(Default)]
pub struct DriveCtrl {

    pub(crate) params: Params,

    ramp_state: RampState,

    arm_up: EdgeToggle,

    high_gear: EdgeToggle,

    pub(crate) report: StatusReport,

    last_sent: SendReport,

    arch: Archiver
}

/// Raw operator input for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputData {
    pub x: f64,
    pub y: f64,
    pub z: f64,

    /// State of the trigger, which drives both the arm and gear toggles.
    pub trigger: bool
}

/// Status report for DriveCtrl processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct StatusReport {
    /// Shaped x, y and z axes.
    pub shaped: [f64; 3],

    /// Output of the arcade mix, before ramping.
    pub target: DriveCommand,

    /// Ramped demand of each drive actuator, in `DRV_IDS` order. These are
    /// not limited.
    pub ramped: [f64; NUM_DRV_ACTS],

    /// True for each drive actuator, in `DRV_IDS` order, whose demand was
    /// clamped to the limit when written.
    pub drv_dem_limited: [bool; NUM_DRV_ACTS],

    /// True if the drive integral accumulators were cleared this cycle.
    pub iaccum_reset: bool,

    pub arm_up: bool,

    pub high_gear: bool,
}

/// Flattened record written to the drive control archive each cycle.
#[derive(Serialize)]
struct ArchRecord {
    time_s: f64,
    x: f64,
    y: f64,
    z: f64,
    left_target: f64,
    right_target: f64,
    ramped_fl: f64,
    ramped_bl: f64,
    ramped_fr: f64,
    ramped_br: f64,
    dem_fl: f64,
    dem_bl: f64,
    dem_fr: f64,
    dem_br: f64,
    dem_tower: f64,
    limited_fl: bool,
    limited_bl: bool,
    limited_fr: bool,
    limited_br: bool,
    iaccum_reset: bool,
    arm_up: bool,
    high_gear: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl InputData {
    /// Sample the operator input.
    pub fn read<I>(input: &I) -> Self 
    where
        I: OperatorInput + ?Sized
    {
        Self {
            x: input.read_axis(AxisId::X),
            y: input.read_axis(AxisId::Y),
            z: input.read_axis(AxisId::Z),
            trigger: input.read_button(ButtonId::TRIGGER)
        }
    }
}

impl State for DriveCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;
    
    type InputData = InputData;
    type OutputData = MechDems;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the DriveCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session) 
        -> Result<(), Self::InitError> 
    {
        *self = Self::new(params::load(init_data)?);

        // Archiving is not essential, so continue without it if the file
        // can't be created
        self.arch = match Archiver::from_path(session, "drive_ctrl/drive_ctrl.csv") {
            Ok(a) => a,
            Err(e) => {
                log::warn!("Cannot create the DriveCtrl archive: {}", e);
                Archiver::default()
            }
        };

        Ok(())
    }

    /// Perform cyclic processing of drive control.
    ///
    /// The returned demands contain the ramped drive demands without any
    /// limiting applied.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        let p = &self.params;
        let mut report = StatusReport::default();
        let mut dems = MechDems::default();

        // Shape the axes
        let x = shape(input_data.x, p.deadband);
        let y = shape(input_data.y, p.deadband);
        let z = shape(input_data.z, p.deadband);
        report.shaped = [x, y, z];

        let target = mix(x, y, z);
        report.target = target;

        // With no drive or twist demand clear the drive integral terms so 
        // they don't wind up while the vehicle sits still.
        if y == 0.0 && z == 0.0 {
            dems.reset_iaccum = DRV_IDS.to_vec();
            report.iaccum_reset = true;
        }

        // Ramp each actuator against its own previous demand
        let k = p.ramp_constant;
        let rs = &mut self.ramp_state;
        report.ramped = [
            ramp(target.left, &mut rs.front_left, k),
            ramp(target.left, &mut rs.back_left, k),
            ramp(target.right, &mut rs.front_right, k),
            ramp(target.right, &mut rs.back_right, k),
        ];
        for (id, dem) in DRV_IDS.iter().zip(report.ramped.iter()) {
            dems.dems.insert(*id, *dem);
        }

        // Both toggles read the same button, so they flip together
        report.arm_up = self.arm_up.update(input_data.trigger);
        report.high_gear = self.high_gear.update(input_data.trigger);

        let arm_dem = match report.arm_up {
            true => p.arm_extended_dem,
            false => p.arm_retracted_dem
        };
        dems.dems.insert(ActId::Tower, arm_dem);
        dems.binary.insert(
            BinActId::GearShift, 
            BinaryState::from_high_gear(report.high_gear)
        );

        trace!(
            "DriveCtrl:\n    shaped: {:?}\n    target: {:?}\n    ramped: {:?}\n    \
            arm_up: {}, high_gear: {}",
            report.shaped,
            report.target,
            report.ramped,
            report.arm_up,
            report.high_gear
        );

        self.report = report;

        Ok((dems, report))
    }
}

impl Archived for DriveCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        let r = &self.report;
        let dem = |id: ActId| self.last_sent.written.get(&id).copied().unwrap_or(0.0);

        let record = ArchRecord {
            time_s: session::get_elapsed_seconds(),
            x: r.shaped[0],
            y: r.shaped[1],
            z: r.shaped[2],
            left_target: r.target.left,
            right_target: r.target.right,
            ramped_fl: r.ramped[0],
            ramped_bl: r.ramped[1],
            ramped_fr: r.ramped[2],
            ramped_br: r.ramped[3],
            dem_fl: dem(ActId::DrvFL),
            dem_bl: dem(ActId::DrvBL),
            dem_fr: dem(ActId::DrvFR),
            dem_br: dem(ActId::DrvBR),
            dem_tower: dem(ActId::Tower),
            limited_fl: r.drv_dem_limited[0],
            limited_bl: r.drv_dem_limited[1],
            limited_fr: r.drv_dem_limited[2],
            limited_br: r.drv_dem_limited[3],
            iaccum_reset: r.iaccum_reset,
            arm_up: r.arm_up,
            high_gear: r.high_gear,
        };

        self.arch.serialise(record)
    }
}

impl DriveCtrl {

    /// Create a new drive controller with zeroed ramps and both toggles off.
    pub fn new(params: Params) -> Self {
        Self {
            ramp_state: RampState::default(),
            arm_up: EdgeToggle::new(params.toggle_mode),
            high_gear: EdgeToggle::new(params.toggle_mode),
            report: StatusReport::default(),
            last_sent: SendReport::default(),
            arch: Archiver::default(),
            params,
        }
    }

    /// Run one full cycle: read the operator input, process it and write the
    /// resulting demands to the mechanisms.
    pub fn cycle<I, M>(&mut self, input: &I, mech: &mut M) -> (StatusReport, &SendReport)
    where
        I: OperatorInput + ?Sized,
        M: MechInterface + ?Sized
    {
        let input_data = InputData::read(input);

        let (dems, mut report) = match self.proc(&input_data) {
            Ok(o) => o,
            Err(e) => match e {}
        };

        self.last_sent = mech_client::send_demands(mech, &dems, &self.dem_limits());

        for (flag, id) in report.drv_dem_limited.iter_mut().zip(DRV_IDS.iter()) {
            *flag = self.last_sent.limited.contains(id);
        }
        self.report = report;

        (report, &self.last_sent)
    }

    /// Limits applied when the demands are written.
    pub fn dem_limits(&self) -> DemLimits {
        DemLimits {
            drv_dem_limit: self.params.drv_dem_limit
        }
    }

    /// Previous demand stored by each drive actuator's ramp.
    pub fn ramp_state(&self) -> &RampState {
        &self.ramp_state
    }

    /// Current arm and gear toggle states.
    pub fn toggles(&self) -> (bool, bool) {
        (self.arm_up.state(), self.high_gear.state())
    }

    /// Returns `true` if the archive can be written.
    pub fn is_archiving(&self) -> bool {
        self.arch.is_init()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::{joystick::JoystickFrame, mech::LoopMode};
    use util::maths::approx_eq;
    use crate::drive_ctrl::ToggleMode;
    use crate::hal::sim::{MechCall, SimMech};

    fn frame(x: f64, y: f64, z: f64, trigger: bool) -> JoystickFrame {
        JoystickFrame { x, y, z, buttons: vec![trigger] }
    }

    #[test]
    fn test_idle_cycles_reset_iaccum_and_decay() {
        let mut ctrl = DriveCtrl::new(Params::default());
        let mut mech = SimMech::new();

        // Get the vehicle moving first
        ctrl.cycle(&frame(0.0, 1.0, 0.0, false), &mut mech);
        mech.take_calls();

        // Two idle cycles
        let (rpt_0, _) = ctrl.cycle(&frame(0.0, 0.0, 0.0, false), &mut mech);
        assert!(rpt_0.iaccum_reset);
        assert!(rpt_0.ramped.iter().all(|r| approx_eq(*r, 0.7, 1e-12)));

        let (rpt_1, _) = ctrl.cycle(&frame(0.0, 0.0, 0.0, false), &mut mech);
        assert!(rpt_1.iaccum_reset);
        assert!(rpt_1.ramped.iter().all(|r| *r == 0.0));

        for id in DRV_IDS.iter() {
            assert_eq!(mech.act(*id).num_iaccum_resets, 2);
            assert_eq!(mech.act(*id).dem, 0.0);
        }
        assert_eq!(mech.act(ActId::Tower).num_iaccum_resets, 0);
        assert_eq!(*ctrl.ramp_state(), RampState::default());
    }

    #[test]
    fn test_reset_only_when_y_and_z_zero() {
        let mut ctrl = DriveCtrl::new(Params::default());
        let mut mech = SimMech::new();

        // x outside the deadband on its own still counts as idle
        let (rpt, _) = ctrl.cycle(&frame(0.9, 0.1, 0.0, false), &mut mech);
        assert!(rpt.iaccum_reset);

        let (rpt, _) = ctrl.cycle(&frame(0.0, 0.0, 0.5, false), &mut mech);
        assert!(!rpt.iaccum_reset);
    }

    #[test]
    fn test_full_forward_is_limited_at_write() {
        let mut ctrl = DriveCtrl::new(Params::default());
        let mut mech = SimMech::new();

        ctrl.cycle(&frame(0.0, 1.0, 0.0, false), &mut mech);
        let (rpt, sent) = ctrl.cycle(&frame(0.0, 1.0, 0.0, false), &mut mech);

        // The ramp itself overshoots
        assert!(rpt.ramped.iter().all(|r| approx_eq(*r, 1.4, 1e-12)));

        // But only the limit is written
        assert_eq!(sent.limited, DRV_IDS.to_vec());
        for id in DRV_IDS.iter() {
            assert_eq!(mech.act(*id).dem, 1.0);
        }
        assert_eq!(rpt.drv_dem_limited, [true; NUM_DRV_ACTS]);

        // The first cycle stays within the limit
        let mut ctrl = DriveCtrl::new(Params::default());
        let (rpt, _) = ctrl.cycle(&frame(0.0, 1.0, 0.0, false), &mut mech);
        assert_eq!(rpt.drv_dem_limited, [false; NUM_DRV_ACTS]);
        assert_eq!(ctrl.report.drv_dem_limited, [false; NUM_DRV_ACTS]);
    }

    #[test]
    fn test_twist_drives_sides_apart() {
        let mut ctrl = DriveCtrl::new(Params::default());
        let mut mech = SimMech::new();

        let (rpt, _) = ctrl.cycle(&frame(0.0, 0.0, 0.5, false), &mut mech);

        assert_eq!(rpt.target, DriveCommand { left: -0.25, right: 0.25 });
        assert!(approx_eq(mech.act(ActId::DrvFL).dem, -0.175, 1e-12));
        assert!(approx_eq(mech.act(ActId::DrvBL).dem, -0.175, 1e-12));
        assert!(approx_eq(mech.act(ActId::DrvFR).dem, 0.175, 1e-12));
        assert!(approx_eq(mech.act(ActId::DrvBR).dem, 0.175, 1e-12));
    }

    #[test]
    fn test_trigger_toggles_arm_and_gear_together() {
        let mut ctrl = DriveCtrl::new(Params::default());
        let mut mech = SimMech::new();

        let (rpt, _) = ctrl.cycle(&frame(0.0, 0.0, 0.0, false), &mut mech);
        assert!(!rpt.arm_up && !rpt.high_gear);
        assert_eq!(mech.act(ActId::Tower).dem, 0.0);
        assert_eq!(mech.binary[&BinActId::GearShift], BinaryState::Reverse);

        let (rpt, _) = ctrl.cycle(&frame(0.0, 0.0, 0.0, true), &mut mech);
        assert!(rpt.arm_up && rpt.high_gear);
        assert_eq!(mech.act(ActId::Tower).dem, 11000.0);
        assert_eq!(mech.binary[&BinActId::GearShift], BinaryState::Forward);

        // Level triggered, so holding the trigger flips again
        ctrl.cycle(&frame(0.0, 0.0, 0.0, true), &mut mech);
        assert_eq!(ctrl.toggles(), (false, false));
        assert_eq!(mech.act(ActId::Tower).dem, 0.0);
    }

    #[test]
    fn test_rising_edge_toggles() {
        let mut ctrl = DriveCtrl::new(Params {
            toggle_mode: ToggleMode::RisingEdge,
            ..Default::default()
        });
        let mut mech = SimMech::new();

        for _ in 0..3 {
            ctrl.cycle(&frame(0.0, 0.0, 0.0, true), &mut mech);
        }
        assert_eq!(ctrl.toggles(), (true, true));

        ctrl.cycle(&frame(0.0, 0.0, 0.0, false), &mut mech);
        ctrl.cycle(&frame(0.0, 0.0, 0.0, true), &mut mech);
        assert_eq!(ctrl.toggles(), (false, false));
    }

    #[test]
    fn test_cycle_call_order() {
        let mut ctrl = DriveCtrl::new(Params::default());
        let mut mech = SimMech::new();

        ctrl.cycle(&frame(0.0, 0.0, 0.0, false), &mut mech);

        let calls = mech.take_calls();
        assert_eq!(calls.len(), 10);
        assert!(calls[..4].iter().all(|c| matches!(c, MechCall::ResetIaccum(_))));
        assert_eq!(calls[8], MechCall::SetDem(ActId::Tower, 0.0));
        assert_eq!(
            calls[9], 
            MechCall::SetBinary(BinActId::GearShift, BinaryState::Reverse)
        );

        // DriveCtrl never reconfigures the actuators
        assert!(!calls.iter().any(|c| matches!(c, MechCall::ConfigureClosedLoop(_, LoopMode::Velocity, _))));
    }

    #[test]
    fn test_proc_without_mechanisms() {
        let mut ctrl = DriveCtrl::new(Params::default());

        let (dems, rpt) = ctrl.proc(&InputData { 
            x: 0.0, 
            y: 0.5, 
            z: 0.3, 
            trigger: false 
        }).unwrap();

        assert_eq!(rpt.shaped[..2], [0.0, 0.25]);
        assert!(approx_eq(rpt.shaped[2], 0.09, 1e-12));
        assert_eq!(rpt.target, DriveCommand { left: 0.25, right: 0.25 });
        assert!(!rpt.iaccum_reset);
        assert!(dems.reset_iaccum.is_empty());
        assert_eq!(dems.dems.len(), 5);
        assert!(!ctrl.is_archiving());
    }
}
