use crate::Error;
use std::time::{Duration, SystemTime};

/// Untyped wrapper over a token-endpoint JSON response.
///
/// Accessors for fields a caller cannot proceed without return
/// `Result`, so a malformed response surfaces as [`Error::MissingField`]
/// at the point of use.
#[derive(Debug, Clone)]
pub struct OAuth2Tokens {
    data: serde_json::Value,
    received_at: SystemTime,
}

impl OAuth2Tokens {
    pub fn new(data: serde_json::Value) -> Self {
        Self {
            data,
            received_at: SystemTime::now(),
        }
    }

    /// The raw token response.
    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    pub fn token_type(&self) -> Result<&str, Error> {
        self.data["token_type"].as_str().ok_or(Error::MissingField {
            field: "token_type",
        })
    }

    pub fn access_token(&self) -> Result<&str, Error> {
        self.data["access_token"]
            .as_str()
            .ok_or(Error::MissingField {
                field: "access_token",
            })
    }

    pub fn access_token_expires_in_seconds(&self) -> Result<u64, Error> {
        self.data["expires_in"].as_u64().ok_or(Error::MissingField {
            field: "expires_in",
        })
    }

    pub fn access_token_expires_at(&self) -> Result<SystemTime, Error> {
        let expires_in = self.access_token_expires_in_seconds()?;
        Ok(self.received_at + Duration::from_secs(expires_in))
    }

    pub fn has_refresh_token(&self) -> bool {
        self.data["refresh_token"].is_string()
    }

    pub fn refresh_token(&self) -> Result<&str, Error> {
        self.data["refresh_token"]
            .as_str()
            .ok_or(Error::MissingField {
                field: "refresh_token",
            })
    }

    pub fn has_scopes(&self) -> bool {
        self.data["scope"].is_string()
    }

    pub fn scopes(&self) -> Result<Vec<String>, Error> {
        let scope = self.data["scope"]
            .as_str()
            .ok_or(Error::MissingField { field: "scope" })?;
        Ok(scope.split(' ').map(String::from).collect())
    }

    /// Account id of the resource owner the token was issued for.
    ///
    /// BookingSync includes this as the `uid` member of the token
    /// response. When it is `None`, the accounts endpoint has to be
    /// fetched at its collection root.
    pub fn resource_owner_id(&self) -> Option<u64> {
        self.data["uid"].as_u64()
    }
}
