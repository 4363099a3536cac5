//! Press-and-hold delete gesture.
//!
//! Expressed as a small state machine, `Idle -> Pressing -> Confirming -> Idle`,
//! independent of any rendering framework or timer facility. Transitions are driven
//! by caller-supplied instants, so the machine is deterministic under test.
//!
//! Flow: a press starts the hold; once the hold has lasted [`HOLD_THRESHOLD`] the
//! machine moves to `Confirming` (the UI shows its confirm/cancel sheet); releasing
//! before the threshold cancels silently. From `Confirming`, `confirm` yields the
//! go-ahead to delete and `cancel` discards the gesture.

use std::time::{Duration, Instant};

/// Minimum hold duration before the confirm sheet appears.
pub const HOLD_THRESHOLD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldState {
    Idle,
    Pressing { pressed_at: Instant },
    Confirming,
}

/// The press-and-hold state machine, one per card view.
#[derive(Debug)]
pub struct HoldToDelete {
    state: HoldState,
}

impl HoldToDelete {
    pub fn new() -> Self {
        Self {
            state: HoldState::Idle,
        }
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    /// A press began (mouse down or touch start). Ignored unless idle.
    pub fn press(&mut self, at: Instant) {
        if self.state == HoldState::Idle {
            self.state = HoldState::Pressing { pressed_at: at };
        }
    }

    /// Clock tick while the press is held. Returns `true` on the tick that crosses
    /// the threshold, i.e. when the UI should reveal the confirm sheet.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let HoldState::Pressing { pressed_at } = self.state {
            if now.duration_since(pressed_at) >= HOLD_THRESHOLD {
                self.state = HoldState::Confirming;
                return true;
            }
        }
        false
    }

    /// The press ended (mouse up, touch end, or pointer leaving the card).
    ///
    /// Releasing before the threshold cancels the gesture silently. Releasing after
    /// the sheet is up leaves it up; the user answers it explicitly.
    pub fn release(&mut self, now: Instant) {
        if let HoldState::Pressing { pressed_at } = self.state {
            self.state = if now.duration_since(pressed_at) >= HOLD_THRESHOLD {
                HoldState::Confirming
            } else {
                HoldState::Idle
            };
        }
    }

    /// The user confirmed deletion. Returns `true` when a delete should proceed;
    /// outside `Confirming` the call is a stale event and does nothing.
    pub fn confirm(&mut self) -> bool {
        if self.state == HoldState::Confirming {
            self.state = HoldState::Idle;
            true
        } else {
            false
        }
    }

    /// The user dismissed the sheet.
    pub fn cancel(&mut self) {
        self.state = HoldState::Idle;
    }
}

impl Default for HoldToDelete {
    fn default() -> Self {
        Self::new()
    }
}
