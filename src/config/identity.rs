//! Identity configuration - which owner's records a process works on.
//!
//! Authentication itself happens elsewhere; this only reads the resulting
//! identity from the environment.

/// Reads the owner identity from `MESS_OWNER_ID`.
///
/// Returns `None` when the variable is unset or blank, which the session
/// treats as "signed out".
#[must_use]
pub fn get_owner_identity() -> Option<String> {
    std::env::var("MESS_OWNER_ID")
        .ok()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}
