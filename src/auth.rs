//! Credential verification and capability checks.
//!
//! `Authenticator` is an enum over backends, mirroring the provider pattern
//! in [`crate::llm`]: `Local` verifies against a JSON credential store on
//! disk; an external identity provider would be a new variant + arm.
//!
//! Credential records carry a per-user salt and the hex SHA-256 digest of
//! `salt ‖ password` — never the password itself. Verification recomputes
//! the digest and compares. Wrong password and unknown user collapse into
//! one error so login failures don't reveal which usernames exist.
//!
//! Authorization is separate from authentication: the authenticated
//! [`User`] carries roles, and [`AccessPolicy`] maps each [`Capability`]
//! to the role it requires. Catalogue curation is gated this way rather
//! than by any shared secret.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("credential store error: {0}")]
    Store(String),
}

// ── Records and principals ────────────────────────────────────────────────────

/// On-disk shape of one credential record in `users.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Per-user salt, any non-empty string.
    pub salt: String,
    /// Lowercase hex SHA-256 of `salt ‖ password`.
    pub digest: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// An authenticated principal.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    roles: Vec<String>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Lowercase hex SHA-256 of `salt ‖ password` — the digest stored in a
/// [`UserRecord`]. Exposed so record generation and verification can never
/// drift apart.
pub fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

// ── Authenticator ─────────────────────────────────────────────────────────────

/// All available authentication backends.
#[derive(Debug, Clone)]
pub enum Authenticator {
    Local(LocalAuthenticator),
}

impl Authenticator {
    /// Construct the local-store backend from `users.json` at `path`.
    pub fn local(path: &Path) -> Result<Self, AuthError> {
        Ok(Authenticator::Local(LocalAuthenticator::open(path)?))
    }

    /// Verify `username`/`password` and return the authenticated user.
    pub fn verify(&self, username: &str, password: &str) -> Result<User, AuthError> {
        match self {
            Authenticator::Local(a) => a.verify(username, password),
        }
    }
}

/// Verifies credentials against a local JSON store.
#[derive(Debug, Clone)]
pub struct LocalAuthenticator {
    users: Vec<UserRecord>,
}

impl LocalAuthenticator {
    /// Load the credential store. Unlike the knowledge blob there is no seed
    /// fallback here — a missing or malformed credential store is an error,
    /// not something to silently paper over.
    pub fn open(path: &Path) -> Result<Self, AuthError> {
        let data = fs::read_to_string(path)
            .map_err(|e| AuthError::Store(format!("cannot read {}: {e}", path.display())))?;
        let users: Vec<UserRecord> = serde_json::from_str(&data)
            .map_err(|e| AuthError::Store(format!("malformed {}: {e}", path.display())))?;
        info!(users = users.len(), path = %path.display(), "credential store loaded");
        Ok(Self { users })
    }

    pub fn verify(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let record = self
            .users
            .iter()
            .find(|u| u.username == username)
            .ok_or(AuthError::InvalidCredentials)?;

        if password_digest(&record.salt, password) != record.digest {
            debug!(%username, "password digest mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(User {
            username: record.username.clone(),
            roles: record.roles.clone(),
        })
    }
}

// ── Capabilities and policy ───────────────────────────────────────────────────

/// Operations gated by policy rather than identity alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Add entries to the knowledge catalogue.
    EnrichKnowledge,
    /// Remove entries from the knowledge catalogue.
    RemoveKnowledge,
}

/// Maps each capability to the role it requires.
///
/// Supplied from outside the checking code so deployments can re-map roles
/// without touching the enrichment flow.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: HashMap<Capability, String>,
}

impl Default for AccessPolicy {
    /// Both curation capabilities require the `editor` role.
    fn default() -> Self {
        let mut rules = HashMap::new();
        rules.insert(Capability::EnrichKnowledge, "editor".to_string());
        rules.insert(Capability::RemoveKnowledge, "editor".to_string());
        Self { rules }
    }
}

impl AccessPolicy {
    pub fn new(rules: HashMap<Capability, String>) -> Self {
        Self { rules }
    }

    /// `true` when `user` holds the role the capability requires.
    /// A capability with no rule is denied to everyone.
    pub fn allows(&self, user: &User, capability: Capability) -> bool {
        self.rules
            .get(&capability)
            .is_some_and(|role| user.has_role(role))
    }
}
