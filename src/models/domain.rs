use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifier of a candidate, unique within one candidate batch
pub type CandidateId = u32;

/// One profile shown on the swipe deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub age: u8,
    #[serde(rename = "imageRef", default)]
    pub image_ref: String,
    #[serde(rename = "interestsSummary", default)]
    pub interests_summary: String,
    #[serde(rename = "languagesSummary", default)]
    pub languages_summary: String,
}

/// Outcome of a resolved swipe or button tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Pass,
    Request,
}

impl Decision {
    /// Direction the card leaves the screen for this decision
    pub fn direction(self) -> SwipeDirection {
        match self {
            Decision::Pass => SwipeDirection::Left,
            Decision::Request => SwipeDirection::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Sign of the horizontal offset in this direction
    pub fn sign(self) -> f64 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// A decision bound to the candidate it applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(rename = "candidateId")]
    pub candidate_id: CandidateId,
    pub decision: Decision,
}

/// Animation the render surface plays after a gesture resolves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    /// Fixed-duration slide of the departing card fully off-screen
    Exit {
        direction: SwipeDirection,
        from_offset: f64,
        to_offset: f64,
        duration: Duration,
    },
    /// Spring back to center; settles asymptotically, no deadline
    SpringBack { from_offset: f64 },
}

/// Result of a commit: what was decided and what to play
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub outcome: Outcome,
    pub animation: Animation,
}

/// Gesture thresholds and exit animation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThresholds {
    /// Offsets strictly beyond +/- this value commit
    pub commit_threshold: f64,
    pub exit_duration: Duration,
    /// Distance the card travels to leave the screen
    pub screen_width: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            commit_threshold: 100.0,
            exit_duration: Duration::from_millis(300),
            screen_width: 390.0,
        }
    }
}

/// Spring constants for the cancel animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub rest_displacement: f64,
    pub rest_speed: f64,
}

impl Default for SpringParams {
    // Equivalent of tension 40 / friction 7
    fn default() -> Self {
        Self {
            stiffness: 230.2,
            damping: 22.0,
            mass: 1.0,
            rest_displacement: 0.001,
            rest_speed: 0.001,
        }
    }
}
