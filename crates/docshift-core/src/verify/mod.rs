//! Existence check for candidate URLs.
//!
//! One HEAD request per call, no retry. Status 200 confirms the candidate;
//! anything else (or a transport failure) is reported with enough detail for
//! the caller to tell the user why no redirect happened.

mod probe;

use std::future::Future;

use crate::rewrite::CandidateUrl;

pub use probe::head_status;

/// Why a candidate could not be confirmed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// The server answered with something other than 200.
    #[error("HTTP status code: {0}")]
    Status(u32),
    /// No HTTP response (DNS, connect, TLS, timeout).
    #[error("{0}")]
    Transport(String),
    /// The blocking probe task panicked or was cancelled.
    #[error("verification task failed: {0}")]
    Task(String),
}

impl VerifyError {
    pub fn status(&self) -> Option<u32> {
        match self {
            VerifyError::Status(code) => Some(*code),
            VerifyError::Transport(_) | VerifyError::Task(_) => None,
        }
    }
}

/// Outcome of a single verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Confirmed(CandidateUrl),
    Failed(VerifyError),
}

impl Verification {
    /// Classify a status code: only 200 confirms.
    pub fn from_status(candidate: CandidateUrl, status: u32) -> Self {
        if status == 200 {
            Verification::Confirmed(candidate)
        } else {
            Verification::Failed(VerifyError::Status(status))
        }
    }

    /// The candidate on success, `None` otherwise.
    pub fn candidate(self) -> Option<CandidateUrl> {
        match self {
            Verification::Confirmed(url) => Some(url),
            Verification::Failed(_) => None,
        }
    }
}

/// Checks whether a candidate URL exists.
pub trait Verifier: Send + Sync {
    fn verify(&self, candidate: &CandidateUrl) -> impl Future<Output = Verification> + Send;
}

/// Production verifier: HEAD via libcurl on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadVerifier;

impl Verifier for HeadVerifier {
    fn verify(&self, candidate: &CandidateUrl) -> impl Future<Output = Verification> + Send {
        let candidate = candidate.clone();
        async move {
            let url = candidate.as_str().to_string();
            match tokio::task::spawn_blocking(move || head_status(&url)).await {
                Ok(Ok(status)) => {
                    tracing::debug!(url = %candidate, status, "HEAD probe");
                    Verification::from_status(candidate, status)
                }
                Ok(Err(e)) => {
                    tracing::debug!(url = %candidate, "HEAD probe failed: {:#}", e);
                    Verification::Failed(VerifyError::Transport(format!("{e:#}")))
                }
                Err(e) => Verification::Failed(VerifyError::Task(e.to_string())),
            }
        }
    }
}
