//! Main teleoperation executable entry point.
//! 
//! # Architecture
//! 
//! The general execution methodology consists of:
//! 
//!     - Initialise all modules
//!     - Main loop:
//!         - Telecommand processing (phase changes and joystick samples)
//!         - Phase manager processing:
//!             - Phase entry reconfiguration
//!             - Drive control processing (teleop only)
//!         - Archiving
//!         - Cycle management
//! 
//! # Modules
//! 
//! All cyclic modules (e.g. `drive_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!     

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use teleop_lib::{
    data_store::DataStore,
    hal::sim::SimMech,
    params::TeleopExecParams,
};

mod tc_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use color_eyre::{Report, eyre::{WrapErr, eyre}};
use structopt::StructOpt;

// Internal
use util::{
    host, 
    archive::Archived,
    module::State,
    logger::{logger_init, LevelFilter},
    session::Session,
    script_interpreter::{ScriptInterpreter, PendingTcs},
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Teleoperation executable, replays an input script against the simulated
/// mechanisms.
#[derive(Debug, StructOpt)]
#[structopt(name = "teleop_exec")]
struct Opt {
    /// Path to the input script to run.
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Minimum log level, one of "info", "debug" or "trace".
    #[structopt(short, long, default_value = "debug")]
    log_level: LevelFilter,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "teleop_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger. The simulated mechanisms trace every call, which is
    // too much at the cycle rate, so they are capped at debug.
    logger_init(
        opt.log_level, 
        &[("teleop_lib::hal::sim", opt.log_level.min(LevelFilter::Debug))],
        &session
    ).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Teleoperation Executable\n");
    info!(
        "Running on: {:#?}", 
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: TeleopExecParams = util::params::load(
        "teleop_exec.toml"
    ).wrap_err("Could not load exec params")?;

    if !exec_params.cycle_period_valid() {
        return Err(eyre!(
            "Cycle period must be positive and finite, found {} s", 
            exec_params.cycle_period_s
        ));
    }

    let cycle_frequency_hz = 1.0 / exec_params.cycle_period_s;

    info!("Exec parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    info!("Loading script from {:?}", opt.script);

    let mut script = ScriptInterpreter::new(&opt.script)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} TCs\n",
        script.get_duration(),
        script.get_num_tcs()
    );

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.drive_ctrl.init("drive_ctrl.toml", &session)
        .wrap_err("Failed to initialise DriveCtrl")?;
    info!("DriveCtrl init complete");

    ds.phase_mgr.init("phase_mgr.toml", &session)
        .wrap_err("Failed to initialise PhaseMgr")?;
    info!("PhaseMgr init complete");

    let mut mech = SimMech::new();

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(cycle_frequency_hz);

        // ---- TELECOMMAND PROCESSING ----

        match script.get_pending_tcs() {
            PendingTcs::None => (),
            PendingTcs::Some(tc_vec) => {
                for tc in tc_vec.iter() {
                    tc_processor::exec(&mut ds, tc);
                }
            }
            // Exit if end of script reached
            PendingTcs::EndOfScript => {
                info!("End of TC script reached, stopping");
                break
            }
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        let rpt = ds.phase_mgr.proc(&mut ds.drive_ctrl, &ds.joystick, &mut mech);
        ds.phase_rpt = Some(rpt);

        let calls = mech.take_calls();
        trace!("{} mechanism calls this cycle", calls.len());

        if ds.is_1_hz_cycle {
            debug!(
                "Cycle {}: {:?}, arm_up/high_gear: {:?}", 
                ds.num_cycles, 
                rpt.phase, 
                ds.drive_ctrl.toggles()
            );
        }

        // ---- WRITE ARCHIVES ----

        if exec_params.archive && rpt.drive.is_some() {
            if let Err(e) = ds.drive_ctrl.write() {
                warn!("Could not write the DriveCtrl archive: {}", e);
            }
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(exec_params.cycle_period_s)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s", 
                    cycle_dur.as_secs_f64() - exec_params.cycle_period_s
                );
                ds.num_consec_cycle_overruns += 1;

                if ds.num_consec_cycle_overruns > exec_params.max_consec_cycle_overruns {
                    return Err(eyre!(
                        "More than {} consecutive cycle overruns", 
                        exec_params.max_consec_cycle_overruns
                    ));
                }
            }
        }

        ds.cycle_end();
    }

    // ---- SHUTDOWN ----

    info!("End of execution after {} cycles", ds.num_cycles);

    Ok(())
}
