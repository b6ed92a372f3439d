// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Animation, Candidate, CandidateId, Decision, Outcome, SpringParams, SwipeDirection, SwipeThresholds, Transition};
pub use requests::{LanguageList, PartnerPreferencesRequest, ProfileSetupRequest, VerifyCodeRequest};
pub use responses::{OtpChallenge, SessionSummary, VerifiedSession};
