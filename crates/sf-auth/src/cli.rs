//! Salesforce CLI session reuse.
//!
//! Shells out to the `sf` CLI and reuses the access token of an org the
//! developer has already authenticated locally. This is the cheapest
//! strategy: no OAuth exchange, no connected app secrets.

use futures::future::BoxFuture;
use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};

/// An org known to the local `sf` CLI.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOrg {
    /// CLI alias for the org, if one was set.
    #[serde(default)]
    pub alias: Option<String>,

    /// Username the org was authenticated as.
    #[serde(default)]
    pub username: Option<String>,

    /// Cached access token for the org's session.
    #[serde(default)]
    pub access_token: Option<String>,

    /// The org's instance URL.
    #[serde(default)]
    pub instance_url: Option<String>,

    /// Connection status as reported by the CLI, `"Connected"` for a
    /// usable session.
    #[serde(default)]
    pub connected_status: Option<String>,

    /// Whether the CLI marks this org as the default.
    #[serde(default)]
    pub is_default_username: bool,
}

impl std::fmt::Debug for CliOrg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliOrg")
            .field("alias", &self.alias)
            .field("username", &self.username)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("instance_url", &self.instance_url)
            .field("connected_status", &self.connected_status)
            .field("is_default_username", &self.is_default_username)
            .finish()
    }
}

/// Source of locally authenticated orgs.
///
/// The production implementation is [`SfCli`]; tests substitute a stub.
pub trait OrgSource: Send + Sync {
    /// List the orgs the local CLI knows about.
    fn list_orgs(&self) -> BoxFuture<'_, Result<Vec<CliOrg>>>;
}

/// [`OrgSource`] backed by the `sf` command-line tool.
pub struct SfCli {
    binary: String,
}

impl SfCli {
    /// Use the `sf` binary from `PATH`.
    pub fn new() -> Self {
        Self {
            binary: "sf".to_string(),
        }
    }

    /// Use a specific binary path.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for SfCli {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct OrgListOutput {
    result: OrgListResult,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrgListResult {
    #[serde(default)]
    non_scratch_orgs: Vec<CliOrg>,
    #[serde(default)]
    scratch_orgs: Vec<CliOrg>,
}

impl OrgSource for SfCli {
    fn list_orgs(&self) -> BoxFuture<'_, Result<Vec<CliOrg>>> {
        Box::pin(async move {
            let output = tokio::process::Command::new(&self.binary)
                .args(["org", "list", "--json"])
                .output()
                .await
                .map_err(|e| {
                    Error::with_source(
                        ErrorKind::SfCli(format!("failed to run {}: {e}", self.binary)),
                        e,
                    )
                })?;

            if !output.status.success() {
                return Err(Error::new(ErrorKind::SfCli(format!(
                    "{} org list exited with {}",
                    self.binary, output.status
                ))));
            }

            let parsed: OrgListOutput = serde_json::from_slice(&output.stdout).map_err(|e| {
                Error::with_source(
                    ErrorKind::SfCli("unexpected org list output".to_string()),
                    e,
                )
            })?;

            let mut orgs = parsed.result.non_scratch_orgs;
            orgs.extend(parsed.result.scratch_orgs);
            Ok(orgs)
        })
    }
}

/// Pick the org to reuse from the CLI's list.
///
/// With a target, the org whose alias or username matches it is chosen
/// and a missing match is an error. Without a target, the CLI's default
/// org wins, then the first connected org.
pub(crate) fn select_org(orgs: &[CliOrg], target: Option<&str>) -> Result<CliOrg> {
    if orgs.is_empty() {
        return Err(Error::new(ErrorKind::SfCli(
            "no orgs authenticated with the sf CLI".to_string(),
        )));
    }

    if let Some(target) = target {
        return orgs
            .iter()
            .find(|org| {
                org.alias.as_deref() == Some(target) || org.username.as_deref() == Some(target)
            })
            .cloned()
            .ok_or_else(|| {
                Error::new(ErrorKind::SfCli(format!(
                    "target org '{target}' not found in sf CLI org list"
                )))
            });
    }

    if let Some(org) = orgs.iter().find(|org| org.is_default_username) {
        return Ok(org.clone());
    }

    orgs.iter()
        .find(|org| org.connected_status.as_deref() == Some("Connected"))
        .cloned()
        .ok_or_else(|| {
            Error::new(ErrorKind::SfCli(
                "no connected org found in sf CLI org list".to_string(),
            ))
        })
}
