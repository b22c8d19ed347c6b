//! Object key checks shared by the storage adapters.

/// Rejects keys that could escape the bucket.
pub(crate) fn validate_object_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.split('/').any(|segment| segment.is_empty() || segment == "..")
}
