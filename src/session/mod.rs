//! Mock sign-in session and UI theme.
//!
//! Sign-in only checks that both form fields are non-empty. It is not a
//! security boundary.
//!
//! Logout is deferred by a named grace period. Each request is tagged with a
//! token, and only the completion carrying the current token takes effect, so
//! cancelled or repeated requests never race.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::AdminProfile;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Sign-in form submission.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

/// A logout waiting for its grace period to elapse.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PendingLogout {
    pub token: u64,
    pub due_at: DateTime<Utc>,
}

/// What the presentation layer needs to render the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<AdminProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_logout: Option<PendingLogout>,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    profile: AdminProfile,
    logout_grace: Duration,
    pending: Option<PendingLogout>,
    next_token: u64,
}

impl Session {
    pub fn new(profile: AdminProfile, logout_grace: Duration) -> Self {
        Self {
            state: SessionState::LoggedOut,
            profile,
            logout_grace,
            pending: None,
            next_token: 1,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.state == SessionState::LoggedIn
    }

    pub fn logout_grace(&self) -> Duration {
        self.logout_grace
    }

    /// Fail unless signed in.
    pub fn require_signed_in(&self) -> Result<(), AppError> {
        if self.is_signed_in() {
            Ok(())
        } else {
            Err(AppError::Unauthorized("Sign in to continue".to_string()))
        }
    }

    pub fn login(&mut self, form: &LoginForm) -> Result<(), AppError> {
        if self.is_signed_in() {
            return Err(AppError::InvalidState("Already signed in".to_string()));
        }
        if form.email.is_empty() {
            return Err(AppError::Validation("Email is required".to_string()));
        }
        if form.password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }

        self.state = SessionState::LoggedIn;
        tracing::info!(email = %form.email, "Signed in");
        Ok(())
    }

    /// Start the logout grace period, superseding any earlier request.
    pub fn request_logout(&mut self) -> Result<PendingLogout, AppError> {
        self.require_signed_in()?;

        let token = self.next_token;
        self.next_token += 1;

        let grace = chrono::Duration::from_std(self.logout_grace)
            .map_err(|e| AppError::Internal(format!("Logout grace out of range: {}", e)))?;
        let pending = PendingLogout {
            token,
            due_at: Utc::now() + grace,
        };
        self.pending = Some(pending);

        tracing::info!(token, grace = ?self.logout_grace, "Logout requested");
        Ok(pending)
    }

    /// Drop a pending logout. Returns false if none was pending.
    pub fn cancel_logout(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                tracing::info!(token = pending.token, "Logout cancelled");
                true
            }
            None => false,
        }
    }

    /// Finish the logout tagged `token`. Stale tokens are ignored.
    pub fn complete_logout(&mut self, token: u64) -> bool {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                self.state = SessionState::LoggedOut;
                tracing::info!(token, "Signed out");
                true
            }
            _ => {
                tracing::debug!(token, "Ignoring superseded logout");
                false
            }
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            state: self.state,
            profile: self.is_signed_in().then(|| self.profile.clone()),
            pending_logout: self.pending,
        }
    }
}
