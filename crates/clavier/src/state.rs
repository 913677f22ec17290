//! Four-state activation lattice and the per-frame transition function.
//!
//! Every control, built-in or custom, carries exactly one [`State`] per frame.
//! The state only moves at a frame boundary through [`State::next`], which
//! folds "is the control active right now" into the previous state so callers
//! can tell a single-frame trigger apart from a continuous hold.

use serde::{Deserialize, Serialize};

/// Activation state of a control for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum State {
    /// Inactive on this frame and the previous one.
    #[default]
    StillInactive,
    /// Became inactive on this frame.
    JustDeactivated,
    /// Became active on this frame.
    JustActivated,
    /// Active on this frame and the previous one.
    StillActive,
}

impl State {
    /// Computes the state for the next frame.
    ///
    /// | `active_now` | from `StillInactive` / `JustDeactivated` | from `JustActivated` / `StillActive` |
    /// |---|---|---|
    /// | `true`  | `JustActivated` | `StillActive` |
    /// | `false` | `StillInactive` | `JustDeactivated` |
    #[must_use]
    pub fn next(self, active_now: bool) -> Self {
        let next = match (active_now, self) {
            (true, Self::StillInactive | Self::JustDeactivated) => Self::JustActivated,
            (true, Self::JustActivated | Self::StillActive) => Self::StillActive,
            (false, Self::JustActivated | Self::StillActive) => Self::JustDeactivated,
            (false, Self::StillInactive | Self::JustDeactivated) => Self::StillInactive,
        };
        debug_assert_eq!(next.is_active(), active_now);
        next
    }

    /// `true` for [`JustActivated`](Self::JustActivated) and
    /// [`StillActive`](Self::StillActive).
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::JustActivated | Self::StillActive)
    }

    /// `true` when the state changed on this frame.
    #[must_use]
    pub fn is_edge(self) -> bool {
        matches!(self, Self::JustActivated | Self::JustDeactivated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [State; 4] = [
        State::StillInactive,
        State::JustDeactivated,
        State::JustActivated,
        State::StillActive,
    ];

    #[test]
    fn test_default_is_still_inactive() {
        assert_eq!(State::default(), State::StillInactive);
    }

    #[test]
    fn test_truth_table() {
        assert_eq!(State::StillInactive.next(true), State::JustActivated);
        assert_eq!(State::JustDeactivated.next(true), State::JustActivated);
        assert_eq!(State::JustActivated.next(true), State::StillActive);
        assert_eq!(State::StillActive.next(true), State::StillActive);

        assert_eq!(State::StillInactive.next(false), State::StillInactive);
        assert_eq!(State::JustDeactivated.next(false), State::StillInactive);
        assert_eq!(State::JustActivated.next(false), State::JustDeactivated);
        assert_eq!(State::StillActive.next(false), State::JustDeactivated);
    }

    #[test]
    fn test_next_always_agrees_with_input() {
        for prev in ALL {
            for active in [true, false] {
                assert_eq!(prev.next(active).is_active(), active, "{prev:?} -> {active}");
            }
        }
    }

    #[test]
    fn test_press_release_cycle_returns_to_start() {
        let s = State::default()
            .next(true)
            .next(true)
            .next(false)
            .next(false);
        assert_eq!(s, State::StillInactive);
    }

    #[test]
    fn test_edge_states() {
        assert!(State::JustActivated.is_edge());
        assert!(State::JustDeactivated.is_edge());
        assert!(!State::StillActive.is_edge());
        assert!(!State::StillInactive.is_edge());
    }
}
