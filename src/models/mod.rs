//! Table records and the immutable dataset bundle the dashboard reads from.

pub mod dataset;
pub mod product;
pub mod rating;

/// Reject identifiers that are empty after trimming.
pub(crate) fn require_id(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}
