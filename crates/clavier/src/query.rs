//! Read-only predicates over a control's current [`State`].

use crate::state::State;

/// Anything with a queryable activation [`State`].
///
/// Only [`state`](Self::state) is required; every predicate is derived from
/// it and has no side effects, so asking twice between two frame advances
/// always gives the same answer.
pub trait Activation {
    /// The state as of the last frame advance.
    fn state(&self) -> State;

    /// Active this frame, whether newly or continuously.
    fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// Became active on this frame.
    fn is_just_activated(&self) -> bool {
        self.state() == State::JustActivated
    }

    /// Active on this frame and the previous one.
    fn is_still_active(&self) -> bool {
        self.state() == State::StillActive
    }

    /// Became inactive on this frame.
    fn is_just_deactivated(&self) -> bool {
        self.state() == State::JustDeactivated
    }

    /// Inactive on this frame and the previous one.
    fn is_still_inactive(&self) -> bool {
        self.state() == State::StillInactive
    }

    /// Inactive this frame, whether newly or continuously.
    fn is_deactivated(&self) -> bool {
        !self.is_active()
    }
}

impl Activation for State {
    fn state(&self) -> State {
        *self
    }
}

impl<T: Activation + ?Sized> Activation for &T {
    fn state(&self) -> State {
        (**self).state()
    }
}
