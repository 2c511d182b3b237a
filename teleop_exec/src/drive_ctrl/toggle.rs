//! Button toggles

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A persistent binary flag flipped by a button.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct EdgeToggle {
    /// The current value of the flag.
    state: bool,

    /// Button reading on the previous update, only used in
    /// `ToggleMode::RisingEdge`.
    prev_pressed: bool,

    mode: ToggleMode,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// How a toggle reacts to its button.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ToggleMode {
    /// Flip on every update the button reads pressed. Holding the button
    /// flips the flag on every cycle.
    Level,

    /// Flip only when the button goes from released to pressed.
    RisingEdge,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Flip `state` if the button is pressed and return the resulting value.
///
/// If the button is not pressed `state` is left untouched.
pub fn toggle(button_pressed: bool, state: &mut bool) -> bool {
    if button_pressed {
        *state = !*state;
    }

    *state
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ToggleMode {
    fn default() -> Self {
        ToggleMode::Level
    }
}

impl EdgeToggle {
    /// Create a new toggle which starts in the `false` state.
    pub fn new(mode: ToggleMode) -> Self {
        Self {
            state: false,
            prev_pressed: false,
            mode,
        }
    }

    /// Update the toggle with the current button reading, returning the new
    /// value of the flag.
    pub fn update(&mut self, button_pressed: bool) -> bool {
        let trigger = match self.mode {
            ToggleMode::Level => button_pressed,
            ToggleMode::RisingEdge => button_pressed && !self.prev_pressed,
        };
        self.prev_pressed = button_pressed;

        toggle(trigger, &mut self.state)
    }

    /// The current value of the flag.
    pub fn state(&self) -> bool {
        self.state
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_toggle_flips_when_pressed() {
        let mut state = false;

        assert_eq!(toggle(true, &mut state), true);
        assert!(state);
        assert_eq!(toggle(true, &mut state), false);
        assert!(!state);
    }

    #[test]
    fn test_toggle_released_is_idempotent() {
        for initial in &[false, true] {
            let mut state = *initial;
            for _ in 0..10 {
                assert_eq!(toggle(false, &mut state), *initial);
            }
            assert_eq!(state, *initial);
        }
    }

    #[test]
    fn test_level_toggle_flips_while_held() {
        let mut t = EdgeToggle::new(ToggleMode::Level);
        let seq: Vec<bool> = [true, true, true, false, false]
            .iter()
            .map(|b| t.update(*b))
            .collect();

        assert_eq!(seq, vec![true, false, true, true, true]);
    }

    #[test]
    fn test_rising_edge_toggle_flips_once_per_press() {
        let mut t = EdgeToggle::new(ToggleMode::RisingEdge);
        let seq: Vec<bool> = [true, true, true, false, true, false]
            .iter()
            .map(|b| t.update(*b))
            .collect();

        assert_eq!(seq, vec![true, true, true, true, false, false]);
        assert_eq!(t.state(), false);
    }
}
