use crate::models::{Decision, SwipeThresholds};

/// State of a single drag, live between drag start and drag end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub origin_offset: f64,
    pub current_offset: f64,
}

impl DragSession {
    fn new() -> Self {
        Self {
            origin_offset: 0.0,
            current_offset: 0.0,
        }
    }
}

/// How a drag ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Offset crossed the threshold
    Commit { decision: Decision, offset: f64 },
    /// Offset stayed inside the threshold; card springs back from `offset`
    Cancel { offset: f64 },
    /// No drag was active
    Idle,
}

/// Turns a horizontal drag into a decision or a cancellation
///
/// The tracker only knows about offsets. Binding a decision to a candidate
/// and locking input during transitions is done by the deck controller.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    thresholds: SwipeThresholds,
    session: Option<DragSession>,
    locked: bool,
}

impl GestureTracker {
    pub fn new(thresholds: SwipeThresholds) -> Self {
        Self {
            thresholds,
            session: None,
            locked: false,
        }
    }

    pub fn thresholds(&self) -> &SwipeThresholds {
        &self.thresholds
    }

    /// Begin a drag session. Returns false if input is locked.
    pub fn on_drag_start(&mut self) -> bool {
        if self.locked {
            tracing::trace!("Drag start ignored while a transition is in flight");
            return false;
        }
        self.session = Some(DragSession::new());
        true
    }

    /// Record the cumulative horizontal displacement since drag start
    pub fn on_drag_move(&mut self, delta_x: f64) {
        let Some(session) = self.session.as_mut() else {
            tracing::trace!("Drag move without active session ignored");
            return;
        };
        if !delta_x.is_finite() {
            tracing::trace!("Non-finite drag sample ignored");
            return;
        }
        session.current_offset = session.origin_offset + delta_x;
    }

    /// End the drag and resolve it against the commit threshold
    ///
    /// The session is discarded in every case.
    pub fn on_drag_end(&mut self) -> Release {
        let Some(session) = self.session.take() else {
            return Release::Idle;
        };
        let offset = session.current_offset;

        match resolve_offset(offset, self.thresholds.commit_threshold) {
            Some(decision) => {
                tracing::debug!("Drag committed {:?} at offset {}", decision, offset);
                Release::Commit { decision, offset }
            }
            None => {
                tracing::debug!("Drag cancelled at offset {}", offset);
                Release::Cancel { offset }
            }
        }
    }

    /// Live offset for rendering; 0 when no drag is active
    pub fn offset(&self) -> f64 {
        self.session.map(|s| s.current_offset).unwrap_or(0.0)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Drop any drag session so the next card renders centered
    pub fn reset(&mut self) {
        self.session = None;
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.locked = false;
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(SwipeThresholds::default())
    }
}

/// Map a release offset to a decision
///
/// The threshold is exclusive: exactly +/- `threshold` does not commit.
#[inline]
pub fn resolve_offset(offset: f64, threshold: f64) -> Option<Decision> {
    if offset > threshold {
        Some(Decision::Request)
    } else if offset < -threshold {
        Some(Decision::Pass)
    } else {
        None
    }
}
