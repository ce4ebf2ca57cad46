//! Edge-triggered wrapper around [`PoseTracker`]

use crate::{events::PoseEvent, skeleton::BodyFrame};

use super::{PoseTracker, PoseValidator, TrackingState, Validation};

/// Reports state-entry edges instead of per-frame states
///
/// The validator is built by the caller and handed in.
///
/// ```rust
/// use bess_core::events::PoseEvent;
/// use bess_core::skeleton::BodyFrame;
/// use bess_core::tracking::{DoubleStanceValidator, Tracker};
///
/// // Without a baseline every frame fails, so nothing is ever raised
/// let mut tracker = Tracker::new(DoubleStanceValidator::default(), 900);
/// assert_eq!(tracker.update(&BodyFrame::new()), None);
/// ```
#[derive(Debug, Clone)]
pub struct Tracker<V> {
    inner: PoseTracker<V>,
    previous: TrackingState,
}

impl<V: PoseValidator> Tracker<V> {
    /// Wrap `validator` with an identification threshold
    pub fn new(validator: V, threshold: u32) -> Self {
        Self {
            inner: PoseTracker::new(validator, threshold),
            previous: TrackingState::NotIdentified,
        }
    }

    /// Process one frame
    ///
    /// Returns an event only on the frame that enters `Identified` (from any
    /// other state) or enters `Ongoing` from `NotIdentified`.
    pub fn update(&mut self, frame: &BodyFrame) -> Option<PoseEvent> {
        let state = self.inner.step(frame);
        let previous = core::mem::replace(&mut self.previous, state);

        match (previous, state) {
            (prev, TrackingState::Identified) if prev != TrackingState::Identified => {
                Some(PoseEvent::Identified)
            }
            (TrackingState::NotIdentified, TrackingState::Ongoing) => Some(PoseEvent::Ongoing),
            _ => None,
        }
    }

    /// State after the last frame
    pub fn state(&self) -> TrackingState {
        self.inner.state()
    }

    /// Validation of the last frame
    pub fn last_validation(&self) -> &Validation {
        self.inner.last_validation()
    }

    /// Progress toward identification, 0 to 100
    pub fn progress(&self) -> u8 {
        self.inner.progress()
    }

    /// Forget all progress and edges
    pub fn reset(&mut self) {
        self.inner.reset();
        self.previous = TrackingState::NotIdentified;
    }

    /// Underlying threshold machine
    pub fn inner(&self) -> &PoseTracker<V> {
        &self.inner
    }

    /// Wrapped validator
    pub fn validator(&self) -> &V {
        self.inner.validator()
    }

    /// Wrapped validator, mutably
    pub fn validator_mut(&mut self) -> &mut V {
        self.inner.validator_mut()
    }
}
