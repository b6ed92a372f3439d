use crate::core::onboarding::{format_mobile_number, validate_mobile_number, MobileNumberError};
use crate::models::{OtpChallenge, VerifiedSession, VerifyCodeRequest};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in the login flow
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid mobile number: {0}")]
    InvalidMobileNumber(#[from] MobileNumberError),

    #[error("Please enter the complete {expected}-digit code")]
    IncompleteCode { expected: usize },

    #[error("Unknown challenge: {0}")]
    UnknownChallenge(Uuid),
}

/// Simulated one-time-code login
///
/// No code is ever sent and any complete code is accepted. It exists so the
/// onboarding flow has the same shape it will have against a real backend.
pub struct AuthStub {
    code_length: usize,
    verify_delay: Duration,
    pending: HashMap<Uuid, OtpChallenge>,
    session: Option<VerifiedSession>,
}

impl AuthStub {
    pub fn new(code_length: usize, verify_delay: Duration) -> Self {
        Self {
            code_length,
            verify_delay,
            pending: HashMap::new(),
            session: None,
        }
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&VerifiedSession> {
        self.session.as_ref()
    }

    /// Drop the current session; returns it if one was active
    pub fn logout(&mut self) -> Option<VerifiedSession> {
        let session = self.session.take();
        if let Some(session) = &session {
            tracing::info!("Session {} logged out", session.session_id);
        }
        session
    }

    /// "Send" a code to a mobile number
    pub fn request_code(&mut self, mobile_number: &str) -> Result<OtpChallenge, AuthError> {
        let mobile_number = validate_mobile_number(mobile_number)?;

        let challenge = OtpChallenge {
            challenge_id: Uuid::new_v4(),
            mobile_number: mobile_number.to_string(),
            code_length: self.code_length,
            issued_at: chrono::Utc::now(),
        };
        tracing::info!(
            "Code requested for {} (challenge {})",
            format_mobile_number(mobile_number),
            challenge.challenge_id
        );

        self.pending.insert(challenge.challenge_id, challenge.clone());
        Ok(challenge)
    }

    /// Re-issue the code for an existing challenge
    pub fn resend_code(&mut self, challenge_id: Uuid) -> Result<OtpChallenge, AuthError> {
        let challenge = self
            .pending
            .get_mut(&challenge_id)
            .ok_or(AuthError::UnknownChallenge(challenge_id))?;
        challenge.issued_at = chrono::Utc::now();
        tracing::info!("Code resent for challenge {}", challenge_id);
        Ok(challenge.clone())
    }

    /// Verify a code; succeeds for any complete code after the simulated delay
    pub async fn verify_code(&mut self, request: &VerifyCodeRequest) -> Result<VerifiedSession, AuthError> {
        let code_ok = request.code.len() == self.code_length
            && request.code.bytes().all(|b| b.is_ascii_digit());
        if !code_ok {
            return Err(AuthError::IncompleteCode { expected: self.code_length });
        }

        let challenge = self
            .pending
            .remove(&request.challenge_id)
            .ok_or(AuthError::UnknownChallenge(request.challenge_id))?;

        if !self.verify_delay.is_zero() {
            tokio::time::sleep(self.verify_delay).await;
        }

        let session = VerifiedSession {
            session_id: Uuid::new_v4(),
            mobile_number: challenge.mobile_number,
            verified_at: chrono::Utc::now(),
        };
        tracing::info!("Challenge {} verified", request.challenge_id);
        self.session = Some(session.clone());
        Ok(session)
    }
}
