//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_build_date_is_iso_day() {
        assert!(BUILD_DATE.len() == 10 || BUILD_DATE == "unknown");
    }

    #[test]
    fn test_version_string_carries_commit_and_date() {
        assert!(BUILD_VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(BUILD_VERSION.contains(BUILD_COMMIT));
        assert!(BUILD_VERSION.contains(BUILD_DATE));
    }
}
