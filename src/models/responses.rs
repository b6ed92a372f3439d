use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::domain::CandidateId;

/// Issued when a one-time code is "sent"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpChallenge {
    #[serde(rename = "challengeId")]
    pub challenge_id: Uuid,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    #[serde(rename = "codeLength")]
    pub code_length: usize,
    #[serde(rename = "issuedAt")]
    pub issued_at: chrono::DateTime<chrono::Utc>,
}

/// Result of a successful code verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedSession {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    #[serde(rename = "verifiedAt")]
    pub verified_at: chrono::DateTime<chrono::Utc>,
}

/// Tally of a replayed swipe session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub requested: Vec<CandidateId>,
    pub passed: Vec<CandidateId>,
    pub cancelled: usize,
    pub ignored: usize,
    pub remaining: usize,
    pub exhausted: bool,
}
