//! AppAPI request signing and verification
//!
//! Nextcloud and the ExApp authenticate each other with the same shared secret:
//! the `AUTHORIZATION-APP-API` header carries base64(`user:secret`) and
//! `EX-APP-ID` names the app. Outbound calls are signed with [`AppApiCredentials::signed_headers`];
//! inbound calls are checked with [`AppApiCredentials::verify`].

use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;

use crate::constants::{
    HEADER_APP_API_AUTH, HEADER_EX_APP_ID, HEADER_EX_APP_VERSION, HEADER_OCS_API_REQUEST,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppApiError {
    #[error("Missing {0} header")]
    MissingHeader(&'static str),

    #[error("Malformed {0} header")]
    MalformedHeader(&'static str),

    #[error("EX-APP-ID does not match this application")]
    AppIdMismatch,

    #[error("Invalid AppAPI secret")]
    InvalidSecret,
}

/// The Nextcloud account a verified request acts for. Empty for system calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.0
    }

    pub fn is_system(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone)]
pub struct AppApiCredentials {
    app_id: String,
    app_version: String,
    secret: String,
}

impl std::fmt::Debug for AppApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppApiCredentials")
            .field("app_id", &self.app_id)
            .field("app_version", &self.app_version)
            .field("secret", &"<redacted>")
            .finish()
    }
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

impl AppApiCredentials {
    pub fn new(app_id: String, app_version: String, secret: String) -> Self {
        Self {
            app_id,
            app_version,
            secret,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// base64(`user:secret`)
    pub fn authorization_value(&self, user: &str) -> String {
        STANDARD.encode(format!("{}:{}", user, self.secret))
    }

    /// Headers every outbound OCS/WebDAV request carries.
    pub fn signed_headers(&self, user: &str) -> Vec<(&'static str, String)> {
        vec![
            (HEADER_APP_API_AUTH, self.authorization_value(user)),
            (HEADER_EX_APP_ID, self.app_id.clone()),
            (HEADER_EX_APP_VERSION, self.app_version.clone()),
            (HEADER_OCS_API_REQUEST, "true".to_string()),
        ]
    }

    /// Verify the raw header values of an inbound request.
    pub fn verify(
        &self,
        authorization: Option<&str>,
        app_id: Option<&str>,
    ) -> Result<AuthenticatedUser, AppApiError> {
        let app_id = app_id.ok_or(AppApiError::MissingHeader(HEADER_EX_APP_ID))?;
        if app_id != self.app_id {
            return Err(AppApiError::AppIdMismatch);
        }

        let authorization =
            authorization.ok_or(AppApiError::MissingHeader(HEADER_APP_API_AUTH))?;
        let decoded = STANDARD
            .decode(authorization.trim())
            .map_err(|_| AppApiError::MalformedHeader(HEADER_APP_API_AUTH))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| AppApiError::MalformedHeader(HEADER_APP_API_AUTH))?;

        // The user id cannot contain ':' but the secret may.
        let (user, secret) = decoded
            .split_once(':')
            .ok_or(AppApiError::MalformedHeader(HEADER_APP_API_AUTH))?;

        if !secure_compare(secret, &self.secret) {
            return Err(AppApiError::InvalidSecret);
        }

        Ok(AuthenticatedUser(user.to_string()))
    }
}
