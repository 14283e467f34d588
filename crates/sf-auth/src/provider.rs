//! Session caching and strategy resolution.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument};

use crate::cli::{select_org, OrgSource, SfCli};
use crate::config::AuthConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::jwt::JwtBearer;
use crate::oauth::PasswordFlow;

/// Flat session lifetime. Salesforce does not return token expiry
/// metadata, so every session is assumed valid for one hour from
/// acquisition.
const SESSION_TTL_SECS: i64 = 3600;

/// An authenticated session held in the provider's cache slot.
#[derive(Clone)]
struct Session {
    access_token: String,
    instance_url: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    fn new(access_token: String, instance_url: String) -> Self {
        Self {
            access_token,
            instance_url,
            expires_at: Utc::now() + Duration::seconds(SESSION_TTL_SECS),
        }
    }

    fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Supplies access tokens to API clients, authenticating on demand.
///
/// One session is cached at a time. Each token request checks the slot:
/// a valid session is reused as-is, anything else triggers a full
/// strategy resolution and the slot is replaced wholesale. Concurrent
/// requests over an empty or expired slot may each authenticate; the
/// last writer wins and both get a working token.
///
/// Strategy order, first success wins:
///
/// 1. CLI session reuse (any failure falls through)
/// 2. JWT bearer flow, when a private key and subject are configured
///    (failures propagate)
/// 3. Username-password flow, when a username and password are
///    configured (failures propagate)
pub struct TokenProvider {
    config: AuthConfig,
    orgs: Box<dyn OrgSource>,
    session: Mutex<Option<Session>>,
}

impl TokenProvider {
    /// Create a provider backed by the local `sf` CLI.
    pub fn new(config: AuthConfig) -> Self {
        Self::with_org_source(config, Box::new(SfCli::new()))
    }

    /// Create a provider with a custom org source.
    pub fn with_org_source(config: AuthConfig, orgs: Box<dyn OrgSource>) -> Self {
        Self {
            config,
            orgs,
            session: Mutex::new(None),
        }
    }

    /// The provider's configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// The configured Salesforce API version.
    pub fn api_version(&self) -> &str {
        self.config.api_version()
    }

    /// The instance URL API calls should target.
    ///
    /// Returns the cached session's URL when one is held (the token
    /// exchange may have redirected to a My Domain URL), otherwise the
    /// configured URL.
    pub fn instance_url(&self) -> String {
        self.lock_session()
            .as_ref()
            .map(|s| s.instance_url.clone())
            .unwrap_or_else(|| self.config.instance_url().to_string())
    }

    /// Get a valid access token, authenticating if the cached session is
    /// missing or expired.
    #[instrument(skip(self))]
    pub async fn access_token(&self) -> Result<String> {
        if let Some(session) = self.lock_session().as_ref() {
            if session.is_valid() {
                return Ok(session.access_token.clone());
            }
            debug!("cached session expired, re-authenticating");
        }

        let session = self.authenticate().await?;
        let token = session.access_token.clone();
        *self.lock_session() = Some(session);
        Ok(token)
    }

    /// Drop the cached session so the next token request re-authenticates.
    pub fn invalidate(&self) {
        *self.lock_session() = None;
    }

    /// Run the strategy chain and return a fresh session.
    async fn authenticate(&self) -> Result<Session> {
        match self.try_cli().await {
            Ok(session) => {
                info!(instance_url = %session.instance_url, "authenticated via sf CLI session");
                return Ok(session);
            }
            Err(e) => {
                debug!(error = %e, "sf CLI session unavailable, trying next strategy");
            }
        }

        if let (Some(private_key), Some(subject)) =
            (self.config.private_key(), self.config.subject())
        {
            let jwt = JwtBearer::new(self.config.client_id(), subject, private_key);
            let token = jwt.authenticate(self.config.instance_url()).await?;
            info!(instance_url = %token.instance_url, "authenticated via JWT bearer flow");
            return Ok(Session::new(token.access_token, token.instance_url));
        }

        if let (Some(username), Some(password)) =
            (self.config.username(), self.config.password())
        {
            let mut password = password.to_string();
            if let Some(token) = self.config.security_token() {
                password.push_str(token);
            }
            let flow = PasswordFlow::new(
                self.config.client_id(),
                self.config.client_secret().map(str::to_string),
                username,
                password,
            );
            let token = flow.authenticate(self.config.instance_url()).await?;
            info!(instance_url = %token.instance_url, "authenticated via username-password flow");
            return Ok(Session::new(token.access_token, token.instance_url));
        }

        Err(Error::new(ErrorKind::Config(
            "no authentication strategy available: authenticate an org with the sf CLI, \
             or set a private key and subject for the JWT bearer flow, \
             or set a username and password for the username-password flow"
                .to_string(),
        )))
    }

    async fn try_cli(&self) -> Result<Session> {
        let orgs = self.orgs.list_orgs().await?;
        let org = select_org(&orgs, self.config.target_org())?;

        let (Some(access_token), Some(instance_url)) = (org.access_token, org.instance_url) else {
            return Err(Error::new(ErrorKind::SfCli(
                "selected org has no cached session".to_string(),
            )));
        };
        Ok(Session::new(
            access_token,
            instance_url.trim_end_matches('/').to_string(),
        ))
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    fn seed_session(&self, access_token: &str, instance_url: &str, expires_at: DateTime<Utc>) {
        *self.lock_session() = Some(Session {
            access_token: access_token.to_string(),
            instance_url: instance_url.to_string(),
            expires_at,
        });
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("config", &self.config)
            .field("session", &self.lock_session())
            .finish()
    }
}
