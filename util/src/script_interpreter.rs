//! # Input script interpreter module
//!
//! This module provides an interpreter for input scripts, allowing match phase
//! changes and joystick samples to be replayed into the exec at fixed times.
//!
//! A script contains one command per line in the form `<time_s>: <json>;`,
//! where the JSON is a serialised [`Tc`]:
//!
//! ```text
//! 0.0: {"Phase": "Teleop"};
//! 0.5: {"Joystick": {"x": 0.0, "y": 0.6, "z": 0.0, "buttons": [false]}};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
pub struct Command {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The Telecommand to run
    tc: Tc
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_tcs` to acquire a list of telecommands that need executing.
pub struct ScriptInterpreter {
    _script_path: Option<PathBuf>,
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error("Could not build the script pattern: {0}")]
    PatternError(regex::Error),

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an out of order command at {0} s")]
    OutOfOrder(f64),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError),

    #[error("Script line {0} is not a complete command (missing `;`?)")]
    UnterminatedCommand(usize)
}

#[derive(Debug, PartialEq)]
pub enum PendingTcs {
    None,
    Some(Vec<Tc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());
        
        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_str(&script)?;
        si._script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_str(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of commands
        let mut tc_queue: VecDeque<Command> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .map_err(ScriptError::PatternError)?;

        // Byte ranges of the script consumed by a command
        let mut spans: Vec<(usize, usize)> = vec![];

        for cap in re.captures_iter(script) {
            if let Some(m) = cap.get(0) {
                spans.push((m.start(), m.end()));
            }

            // Parse the exec time
            let exec_time_s: f64 = cap[1].parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            // Commands must be in time order as they are popped from the
            // front of the queue
            if let Some(last) = tc_queue.back() {
                if exec_time_s < last.exec_time_s {
                    return Err(ScriptError::OutOfOrder(exec_time_s));
                }
            }

            // Parse the TC from the payload. The scripts contain JSON only.
            let tc = Tc::from_json(&cap[3])
                .map_err(|e| ScriptError::InvalidTc(exec_time_s, e))?;

            // Build command from the match
            tc_queue.push_back(Command {
                exec_time_s,
                tc
            });
        }

        // Every line holding something other than a comment must have been
        // part of a command
        let mut line_start = 0;
        for (i, line) in script.split('\n').enumerate() {
            let line_end = line_start + line.len();
            let content = line.trim();

            if !content.is_empty() && !content.starts_with('#') {
                let consumed = spans
                    .iter()
                    .any(|(s, e)| *s < line_end && *e > line_start);
                if !consumed {
                    return Err(ScriptError::UnterminatedCommand(i + 1));
                }
            }

            line_start = line_end + 1;
        }

        if tc_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            _script_path: None,
            cmds: tc_queue
        })
    }

    /// Return a vector of pending TCs, or `None` if no TCs need executing now.
    ///
    /// # Panics
    /// - If the session has not been initialised.
    pub fn get_pending_tcs(&mut self) -> PendingTcs {
        self.get_pending_tcs_at(get_elapsed_seconds())
    }

    /// Return a vector of TCs whose execution time is before or at the given
    /// time.
    pub fn get_pending_tcs_at(&mut self, current_time_s: f64) -> PendingTcs {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.is_empty() {
            return PendingTcs::EndOfScript
        }

        let mut tc_vec: Vec<Tc> = vec![];

        // Pop items from the queue while the head's exec time has been reached
        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s > current_time_s {
                break;
            }
            if let Some(cmd) = self.cmds.pop_front() {
                tc_vec.push(cmd.tc);
            }
        }

        // If the vector is longer than 0 return Some, otherwise None
        if tc_vec.len() > 0 {
            PendingTcs::Some(tc_vec)
        }
        else {
            PendingTcs::None
        }
    }

    /// Get the number of TCs in the script
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::tc::Phase;

    const SCRIPT: &str = r#"
        0.0: {"Phase": "Teleop"};
        0.5: {"Joystick": {"y": 0.6, "buttons": [true]}};
        0.5: {"Joystick": {"y": 0.6, "buttons": [false]}};
        2.0: {"Phase": "Disabled"};
    "#;

    #[test]
    fn test_parse_script() {
        let si = ScriptInterpreter::from_str(SCRIPT).unwrap();
        assert_eq!(si.get_num_tcs(), 4);
        assert_eq!(si.get_duration(), 2.0);
    }

    #[test]
    fn test_pending_tcs() {
        let mut si = ScriptInterpreter::from_str(SCRIPT).unwrap();

        assert_eq!(
            si.get_pending_tcs_at(0.1), 
            PendingTcs::Some(vec![Tc::Phase(Phase::Teleop)])
        );
        assert_eq!(si.get_pending_tcs_at(0.2), PendingTcs::None);

        match si.get_pending_tcs_at(0.5) {
            PendingTcs::Some(tcs) => assert_eq!(tcs.len(), 2),
            other => panic!("Expected two joystick TCs, got {:?}", other)
        }

        assert_eq!(
            si.get_pending_tcs_at(5.0), 
            PendingTcs::Some(vec![Tc::Phase(Phase::Disabled)])
        );
        assert_eq!(si.get_pending_tcs_at(5.0), PendingTcs::EndOfScript);
    }

    #[test]
    fn test_bad_scripts() {
        assert!(matches!(
            ScriptInterpreter::from_str("# nothing here"), 
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::from_str(r#"1.0: {"Phase": "Lunch"};"#), 
            Err(ScriptError::InvalidTc(_, _))
        ));
        assert!(matches!(
            ScriptInterpreter::from_str(
                "1.0: {\"Phase\": \"Teleop\"};\n0.5: {\"Phase\": \"Test\"};"
            ), 
            Err(ScriptError::OutOfOrder(_))
        ));
        assert!(matches!(
            ScriptInterpreter::new("/definitely/not/a/script.prs"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }

    #[test]
    fn test_unterminated_command() {
        // The final Disabled has no `;` and must not be silently dropped
        assert!(matches!(
            ScriptInterpreter::from_str(
                "0.0: {\"Phase\": \"Teleop\"};\n6.0: {\"Phase\": \"Disabled\"}\n"
            ),
            Err(ScriptError::UnterminatedCommand(2))
        ));
        assert!(matches!(
            ScriptInterpreter::from_str("1.0 {\"Phase\": \"Teleop\"};"),
            Err(ScriptError::UnterminatedCommand(1))
        ));

        // Comments and blank lines are fine
        let si = ScriptInterpreter::from_str(
            "# start\n\n0.0: {\"Phase\": \"Teleop\"};\n  # end\n"
        ).unwrap();
        assert_eq!(si.get_num_tcs(), 1);
    }
}
