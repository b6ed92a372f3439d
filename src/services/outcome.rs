use crate::core::OutcomeSink;
use crate::models::{CandidateId, Decision, Outcome};
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Sink that only logs; the app's behavior before a backend exists
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

impl OutcomeSink for LoggingSink {
    fn on_match_request(&mut self, candidate_id: CandidateId) {
        tracing::info!("Match request sent for match ID: {}", candidate_id);
    }

    fn on_match_pass(&mut self, candidate_id: CandidateId) {
        tracing::info!("Match passed for match ID: {}", candidate_id);
    }
}

/// Sink that keeps every outcome in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    outcomes: Vec<Outcome>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn requested(&self) -> Vec<CandidateId> {
        self.ids(Decision::Request)
    }

    pub fn passed(&self) -> Vec<CandidateId> {
        self.ids(Decision::Pass)
    }

    fn ids(&self, decision: Decision) -> Vec<CandidateId> {
        self.outcomes
            .iter()
            .filter(|o| o.decision == decision)
            .map(|o| o.candidate_id)
            .collect()
    }
}

impl OutcomeSink for RecordingSink {
    fn on_match_request(&mut self, candidate_id: CandidateId) {
        self.outcomes.push(Outcome { candidate_id, decision: Decision::Request });
    }

    fn on_match_pass(&mut self, candidate_id: CandidateId) {
        self.outcomes.push(Outcome { candidate_id, decision: Decision::Pass });
    }
}

/// Sink forwarding outcomes to an async consumer
///
/// Sending never blocks. If the receiver is gone the outcome is dropped
/// with a warning; the deck does not wait on delivery.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<Outcome>,
}

impl ChannelSink {
    pub fn new() -> (Self, UnboundedReceiver<Outcome>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, outcome: Outcome) {
        if let Err(e) = self.tx.send(outcome) {
            tracing::warn!("Outcome for candidate {} dropped: {}", outcome.candidate_id, e);
        }
    }
}

impl OutcomeSink for ChannelSink {
    fn on_match_request(&mut self, candidate_id: CandidateId) {
        self.send(Outcome { candidate_id, decision: Decision::Request });
    }

    fn on_match_pass(&mut self, candidate_id: CandidateId) {
        self.send(Outcome { candidate_id, decision: Decision::Pass });
    }
}

/// Stand-in for the match backend
///
/// Drains the channel until every sender is dropped, waiting `latency` per
/// outcome, and returns what it received.
pub fn spawn_backend_stub(mut rx: UnboundedReceiver<Outcome>, latency: Duration) -> JoinHandle<Vec<Outcome>> {
    tokio::spawn(async move {
        let mut received = Vec::new();
        while let Some(outcome) = rx.recv().await {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            match outcome.decision {
                Decision::Request => tracing::info!("Backend stub: match request for {}", outcome.candidate_id),
                Decision::Pass => tracing::info!("Backend stub: pass for {}", outcome.candidate_id),
            }
            received.push(outcome);
        }
        tracing::debug!("Backend stub stopped after {} outcomes", received.len());
        received
    })
}
