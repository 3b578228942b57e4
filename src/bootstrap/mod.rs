//! One-time startup work that runs before the shell accepts input
//!
//! The application starts in [`AppPhase::Initializing`] and moves to
//! [`AppPhase::Ready`] exactly once, after [`run_bootstrap`] returns. Bootstrap
//! failures never block startup.

mod auth;

use async_trait::async_trait;

pub use auth::{AuthClient, BootstrapAuthError, CredentialBootstrap, LoginRequest};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppPhase {
    #[default]
    Initializing,
    Ready,
}

impl AppPhase {
    /// One-way transition; calling it again is a no-op.
    pub fn mark_ready(&mut self) -> bool {
        let changed = *self == AppPhase::Initializing;
        *self = AppPhase::Ready;
        changed
    }

    pub fn is_ready(&self) -> bool {
        *self == AppPhase::Ready
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Skipped,
    AlreadyAuthenticated,
    Authenticated,
    Failed(String),
}

#[async_trait]
pub trait BootstrapStep: Send + Sync {
    async fn run(&self) -> BootstrapOutcome;
}

/// Used when auto-login is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBootstrap;

#[async_trait]
impl BootstrapStep for NoopBootstrap {
    async fn run(&self) -> BootstrapOutcome {
        BootstrapOutcome::Skipped
    }
}

pub async fn run_bootstrap(step: &dyn BootstrapStep) -> BootstrapOutcome {
    let outcome = step.run().await;
    match &outcome {
        BootstrapOutcome::Failed(reason) => {
            tracing::warn!(%reason, "bootstrap failed, continuing without credentials")
        }
        other => tracing::info!(outcome = ?other, "bootstrap finished"),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_is_one_way() {
        let mut phase = AppPhase::default();
        assert!(!phase.is_ready());
        assert!(phase.mark_ready());
        assert!(!phase.mark_ready());
        assert!(phase.is_ready());
    }

    #[tokio::test]
    async fn test_noop_is_skipped() {
        assert_eq!(run_bootstrap(&NoopBootstrap).await, BootstrapOutcome::Skipped);
    }
}
