//! Notifications Emitted While a Test Runs
//!
//! ## Overview
//!
//! Consumers (a display, a recorder, a clinician's tablet) should not have to
//! diff per-frame state to find out that something happened. The engine
//! raises an event exactly on the frame where it happens:
//!
//! ```text
//! frame:  1   2   3  ...  16  17 ...  901
//! state:  NI  On  On ...  On  On ...  Id
//! event:      PoseOngoing              PoseIdentified, TestFinished
//! ```
//!
//! Two levels exist:
//!
//! - [`PoseEvent`]: edge notifications from the tracker wrapper only
//! - [`SessionEvent`]: everything a running test reports, including counted
//!   errors and test completion
//!
//! ## Memory Model
//!
//! At most one event of each kind can fire on a single frame, so a
//! [`FrameEvents`] list of [`MAX_FRAME_EVENTS`] entries never overflows and
//! lives on the stack.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tracking::FailureMask;

/// Upper bound on events raised by one frame
pub const MAX_FRAME_EVENTS: usize = 4;

/// Events raised on one frame
pub type FrameEvents = heapless::Vec<SessionEvent, MAX_FRAME_EVENTS>;

/// Tracker state-entry edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PoseEvent {
    /// Validation started succeeding after a failure
    Ongoing,
    /// The pose held for the full identification window
    Identified,
}

/// Everything a running balance test can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SessionEvent {
    /// The subject entered the pose
    PoseOngoing,

    /// The pose was held long enough to be confirmed
    PoseIdentified,

    /// A sustained deviation was counted as a balance error
    BalanceError {
        /// Which checks were failing when the error was counted
        mask: FailureMask,
        /// Total errors so far, this one included
        total: u32,
    },

    /// Eyes stayed open long enough to count an error
    EyesOpenError {
        /// Total errors so far, this one included
        total: u32,
    },

    /// The trial ended
    TestFinished {
        /// True when the pose was confirmed, false when time ran out
        identified: bool,
    },
}

impl From<PoseEvent> for SessionEvent {
    fn from(event: PoseEvent) -> Self {
        match event {
            PoseEvent::Ongoing => SessionEvent::PoseOngoing,
            PoseEvent::Identified => SessionEvent::PoseIdentified,
        }
    }
}

impl SessionEvent {
    /// True for events that add to the error count
    pub const fn is_error(&self) -> bool {
        matches!(self, SessionEvent::BalanceError { .. } | SessionEvent::EyesOpenError { .. })
    }
}
