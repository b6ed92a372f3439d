use crate::core::{MatchDeck, OutcomeSink, Playback};
use crate::models::{Animation, Candidate, CandidateId, Decision, SessionSummary, SpringParams};
use crate::services::script::{Step, SwipeScript};
use std::time::Duration;

/// Upper bound on frames for a single animation
const MAX_PLAYBACK_FRAMES: usize = 10_000;

/// Headless render surface
///
/// Replays scripted input against a deck and plays every resulting
/// animation frame by frame, so input locking behaves as on a device.
#[derive(Debug, Clone)]
pub struct Simulator {
    frame: Duration,
    realtime: bool,
    spring: SpringParams,
}

impl Simulator {
    /// `realtime` sleeps one frame interval between frames
    pub fn new(frame: Duration, realtime: bool, spring: SpringParams) -> Self {
        Self {
            frame: frame.max(Duration::from_millis(1)),
            realtime,
            spring,
        }
    }

    pub async fn run<S: OutcomeSink>(
        &self,
        deck: &mut MatchDeck<S>,
        script: &SwipeScript,
        reload: &[Candidate],
    ) -> SessionSummary {
        let mut summary = SessionSummary::default();

        for (index, step) in script.steps.iter().enumerate() {
            tracing::debug!("Step {}: {:?}", index, step);
            match step {
                Step::Drag { samples } => {
                    if !deck.drag_start() {
                        summary.ignored += 1;
                        continue;
                    }
                    for dx in samples {
                        deck.drag_move(*dx);
                        tracing::trace!("Card offset {}", deck.offset());
                    }
                    match deck.drag_end() {
                        Some(animation @ Animation::Exit { .. }) => {
                            record(deck, &mut summary);
                            self.play(&animation).await;
                            deck.finish_transition();
                        }
                        Some(animation @ Animation::SpringBack { .. }) => {
                            summary.cancelled += 1;
                            self.play(&animation).await;
                        }
                        None => summary.ignored += 1,
                    }
                }
                Step::Tap { decision } => match deck.commit(*decision) {
                    Some(transition) => {
                        tally(&mut summary, transition.outcome.decision, transition.outcome.candidate_id);
                        self.play(&transition.animation).await;
                        deck.finish_transition();
                    }
                    None => summary.ignored += 1,
                },
                Step::Reload => deck.reset(reload.to_vec()),
            }
        }

        summary.remaining = deck.deck().remaining();
        summary.exhausted = deck.deck().is_exhausted();
        tracing::info!(
            "Session finished: {} requested, {} passed, {} cancelled, {} remaining",
            summary.requested.len(),
            summary.passed.len(),
            summary.cancelled,
            summary.remaining
        );
        summary
    }

    async fn play(&self, animation: &Animation) {
        let mut playback = Playback::start(animation, self.spring);
        for _ in 0..MAX_PLAYBACK_FRAMES {
            let offset = playback.advance(self.frame);
            tracing::trace!("Frame offset {:.1}", offset);
            if self.realtime {
                tokio::time::sleep(self.frame).await;
            }
            if playback.is_done() {
                return;
            }
        }
        tracing::warn!("Animation did not settle within {} frames", MAX_PLAYBACK_FRAMES);
    }
}

fn record<S: OutcomeSink>(deck: &MatchDeck<S>, summary: &mut SessionSummary) {
    if let Some(transition) = deck.in_flight() {
        tally(summary, transition.outcome.decision, transition.outcome.candidate_id);
    }
}

fn tally(summary: &mut SessionSummary, decision: Decision, candidate_id: CandidateId) {
    match decision {
        Decision::Request => summary.requested.push(candidate_id),
        Decision::Pass => summary.passed.push(candidate_id),
    }
}
