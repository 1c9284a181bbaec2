//! Draft lifecycle stored-procedure outcomes.
//!
//! `publish_page_draft`, `discard_page_draft`, and `rollback_to_version` each
//! return a status text instead of a bare boolean, so callers can tell an
//! idempotent no-op apart from a genuine failure. Transport failures stay on
//! the `sqlx::Error` path and are not represented here.

/// Outcome of a draft lifecycle stored procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureOutcome {
    /// The procedure applied its effect.
    Applied,
    /// The page had no draft to promote or discard.
    NoDraft,
    /// No page row with the given id exists.
    NotFound,
    /// The requested version snapshot does not exist (rollback only).
    VersionNotFound,
}

impl ProcedureOutcome {
    /// Parse the status text returned by a lifecycle procedure.
    ///
    /// Returns `None` for an unrecognized status, which callers should treat
    /// as a decode failure (schema drift between code and procedures).
    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "ok" => Some(Self::Applied),
            "no_draft" => Some(Self::NoDraft),
            "not_found" => Some(Self::NotFound),
            "version_not_found" => Some(Self::VersionNotFound),
            _ => None,
        }
    }
}
