//! Login and two-factor exchange bodies.
//!
//! Both portals sign in in two steps: credentials yield a short-lived
//! two-factor token, and the emailed code exchanged with that token
//! yields the session token.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct HubLoginRequest {
    pub email: String,
    pub password: String,
}

/// Employer sign-in is scoped to the employer domain (`client_id`).
#[derive(Debug, Clone, Serialize)]
pub struct EmployerSignInRequest {
    pub client_id: String,
    pub email: String,
    pub password: String,
}

/// Returned by both `hub/login` and `employer/signin`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HubTfaRequest {
    pub tfa_token: String,
    pub tfa_code: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub remember_me: bool,
}

/// The employer two-factor token is called `tgt` on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct EmployerTfaRequest {
    pub tgt: String,
    pub tfa_code: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub remember_me: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TfaResponse {
    pub session_token: String,
}
