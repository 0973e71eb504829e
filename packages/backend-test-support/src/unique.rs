//! Unique test identifiers backed by ULIDs.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique::unique_str;
///
/// let a = unique_str("researcher");
/// let b = unique_str("researcher");
/// assert_ne!(a, b);
/// assert!(a.starts_with("researcher-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix.to_lowercase(), Ulid::new().to_string().to_lowercase())
}
