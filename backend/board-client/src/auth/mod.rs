//! Two-step sign-in: credentials, then the emailed two-factor code.
//!
//! Both steps are unauthenticated requests. A successful two-factor
//! exchange is the only place a [`Session`] receives a fresh token.

use crate::error::{AuthError, RequestError};
use crate::executor::{GuardedExecutor, Method};
use crate::session::{Portal, Session};

use common::BearerToken;
use models::auth::{
    EmployerSignInRequest, EmployerTfaRequest, HubLoginRequest, HubTfaRequest, LoginResponse,
    TfaResponse,
};

use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// What the user typed on the login page.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Employer domain; required by the employer portal, ignored by the hub.
    pub client_id: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .finish()
    }
}

/// Short-lived token proving the first step succeeded.
#[derive(Clone)]
pub struct TfaChallenge {
    token: BearerToken,
}

impl TfaChallenge {
    pub fn new(token: BearerToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }
}

impl std::fmt::Debug for TfaChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfaChallenge").field("token", &self.token).finish()
    }
}

#[derive(Clone)]
pub struct AuthClient {
    executor: GuardedExecutor,
    portal: Portal,
}

impl AuthClient {
    pub fn new(executor: GuardedExecutor, portal: Portal) -> Self {
        Self { executor, portal }
    }

    pub fn portal(&self) -> Portal {
        self.portal
    }

    /// First step: exchange credentials for a two-factor challenge.
    ///
    /// # Errors
    /// - [`AuthError::InvalidCredentials`] on 401
    /// - [`AuthError::AccountDisabled`] on 422
    /// - [`AuthError::Request`] for any other failure
    pub async fn login(&self, credentials: &Credentials) -> Result<TfaChallenge, AuthError> {
        let endpoint = self.portal.login_endpoint();

        let result: Result<LoginResponse, RequestError> = match self.portal {
            Portal::Hub => {
                let body = HubLoginRequest {
                    email: credentials.email.clone(),
                    password: credentials.password.clone(),
                };
                self.post(endpoint, &body).await
            }
            Portal::Employer => {
                let body = EmployerSignInRequest {
                    client_id: credentials.client_id.clone().unwrap_or_default(),
                    email: credentials.email.clone(),
                    password: credentials.password.clone(),
                };
                self.post(endpoint, &body).await
            }
        };

        let response = result.map_err(|error| match error.status_code() {
            Some(401) => AuthError::invalid_credentials(),
            Some(422) => AuthError::account_disabled(),
            _ => AuthError::Request(error),
        })?;

        if response.token.is_empty() {
            return Err(AuthError::empty_token("token"));
        }

        info!("Credentials accepted on {:?} portal, awaiting two-factor code", self.portal);
        Ok(TfaChallenge::new(BearerToken::new(response.token)))
    }

    /// Second step: exchange the emailed code for a session token.
    ///
    /// On success the session's token is replaced wholesale.
    pub async fn verify_tfa(
        &self,
        challenge: &TfaChallenge,
        tfa_code: &str,
        remember_me: bool,
        session: &Session,
    ) -> Result<(), AuthError> {
        let endpoint = self.portal.tfa_endpoint();
        let challenge_token = challenge.token().as_str().to_string();

        let result: Result<TfaResponse, RequestError> = match self.portal {
            Portal::Hub => {
                let body = HubTfaRequest {
                    tfa_token: challenge_token,
                    tfa_code: tfa_code.to_string(),
                    remember_me,
                };
                self.post(endpoint, &body).await
            }
            Portal::Employer => {
                let body = EmployerTfaRequest {
                    tgt: challenge_token,
                    tfa_code: tfa_code.to_string(),
                    remember_me,
                };
                self.post(endpoint, &body).await
            }
        };

        let response = result.map_err(|error| match error.status_code() {
            Some(401) | Some(422) => {
                warn!("Two-factor code rejected ({})", error.error_category());
                AuthError::invalid_tfa_code()
            }
            _ => AuthError::Request(error),
        })?;

        if response.session_token.is_empty() {
            return Err(AuthError::empty_token("session_token"));
        }

        session.replace(BearerToken::new(response.session_token)).await;
        Ok(())
    }

    /// Forget the session locally.
    pub async fn sign_out(&self, session: &Session) {
        if session.clear().await {
            info!("Signed out, next login at {}", self.portal.login_route());
        }
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.executor
            .unguarded_request(endpoint, Method::Post, Some(body))
            .await
    }
}
