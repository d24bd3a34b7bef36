use const_format::concatcp;
use serde::{Deserialize, Serialize};

pub(crate) const HUB_PREFIX: &str = "hub/";
pub(crate) const EMPLOYER_PREFIX: &str = "employer/";

const HUB_LOGIN_ENDPOINT: &str = concatcp!(HUB_PREFIX, "login");
const HUB_TFA_ENDPOINT: &str = concatcp!(HUB_PREFIX, "tfa");
const EMPLOYER_SIGNIN_ENDPOINT: &str = concatcp!(EMPLOYER_PREFIX, "signin");
const EMPLOYER_TFA_ENDPOINT: &str = concatcp!(EMPLOYER_PREFIX, "tfa");

const HUB_LOGIN_ROUTE: &str = "/login";
const EMPLOYER_LOGIN_ROUTE: &str = "/signin";

/// Which front-end the client is serving.
///
/// The two apps talk to the same backend but sign in through different
/// endpoints and send users to different login pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portal {
    /// Job-seeker web application.
    #[default]
    Hub,
    /// Employer admin console.
    Employer,
}

impl Portal {
    /// Route the user is sent to when the session is missing or expired.
    pub fn login_route(&self) -> &'static str {
        match self {
            Portal::Hub => HUB_LOGIN_ROUTE,
            Portal::Employer => EMPLOYER_LOGIN_ROUTE,
        }
    }

    pub fn login_endpoint(&self) -> &'static str {
        match self {
            Portal::Hub => HUB_LOGIN_ENDPOINT,
            Portal::Employer => EMPLOYER_SIGNIN_ENDPOINT,
        }
    }

    pub fn tfa_endpoint(&self) -> &'static str {
        match self {
            Portal::Hub => HUB_TFA_ENDPOINT,
            Portal::Employer => EMPLOYER_TFA_ENDPOINT,
        }
    }
}
