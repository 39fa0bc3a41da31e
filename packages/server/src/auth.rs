//! Authorization gate: the signed-in user's email arrives in a trusted
//! request header set by the identity proxy, and must end with one of the
//! allow-listed domains.

use crate::config::{Config, ConfigError};
use http::{HeaderMap, HeaderName};

/// Email of an authorized user, attached to the request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No identity header (or an empty one)
    Unauthenticated,
    /// Signed in, but the email's domain is not allow-listed
    Forbidden { email: String },
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    header: HeaderName,
    allowed_domains: Vec<String>,
}

impl AuthGate {
    pub fn new(header: HeaderName, allowed_domains: Vec<String>) -> Self {
        Self {
            header,
            allowed_domains,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let header = HeaderName::from_bytes(config.identity_header.as_bytes())
            .map_err(|_| ConfigError::InvalidHeader(config.identity_header.clone()))?;
        Ok(Self::new(header, config.allowed_email_domains.clone()))
    }

    pub fn authorize(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let email = headers
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or(AuthError::Unauthenticated)?;

        if is_allowed_email(email, &self.allowed_domains) {
            Ok(Identity(email.to_string()))
        } else {
            Err(AuthError::Forbidden {
                email: email.to_string(),
            })
        }
    }
}

/// Domain match is a case-insensitive suffix match.
pub fn is_allowed_email(email: &str, allowed_domains: &[String]) -> bool {
    let email = email.to_ascii_lowercase();
    allowed_domains
        .iter()
        .any(|domain| !domain.is_empty() && email.ends_with(&domain.to_ascii_lowercase()))
}
