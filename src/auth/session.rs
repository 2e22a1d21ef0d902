use std::fmt;

/// An opaque bearer token. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Credential state for one calculator session.
///
/// Lives only in memory. The orchestrator owns it and is its single writer,
/// which is enforced by `&mut` access.
#[derive(Debug, Default)]
pub struct Session {
    credential: Option<Credential>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with a token already in hand (tests, pre-seeded keys).
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Replace the held credential. Last write wins.
    pub fn store(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    /// Drop the held credential so the next attempt fetches a fresh one.
    pub fn forget(&mut self) {
        self.credential = None;
    }
}
