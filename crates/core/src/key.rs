//! Key prefix handling
//!
//! Adapters namespace objects inside a shared bucket by prepending a fixed
//! prefix to every logical key. The join guarantees exactly one separating
//! slash no matter which side carries boundary slashes.

/// A fixed key prefix, normalized at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    trimmed: String,
}

impl Prefix {
    /// Create a prefix, trimming trailing slashes
    pub fn new(prefix: impl Into<String>) -> Self {
        let raw = prefix.into();
        Self {
            trimmed: raw.trim_end_matches('/').to_string(),
        }
    }

    /// Map a logical key to the full key stored in the backend
    pub fn apply(&self, logical: &str) -> String {
        let logical = logical.trim_start_matches('/');
        if self.trimmed.is_empty() {
            logical.to_string()
        } else {
            format!("{}/{}", self.trimmed, logical)
        }
    }
}

/// Map a logical key through an optional prefix
pub fn full_key(prefix: Option<&Prefix>, logical: &str) -> String {
    match prefix {
        Some(prefix) => prefix.apply(logical),
        None => logical.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_prefix_passes_key_through() {
        assert_eq!(full_key(None, "test.txt"), "test.txt");
        assert_eq!(full_key(None, "/abs/key"), "/abs/key");
    }

    #[test]
    fn test_single_separating_slash() {
        for prefix in ["photos", "photos/", "photos//"] {
            for key in ["test.txt", "/test.txt", "//test.txt"] {
                let prefix = Prefix::new(prefix);
                assert_eq!(prefix.apply(key), "photos/test.txt");
            }
        }
    }

    #[test]
    fn test_nested_prefix_and_key() {
        let prefix = Prefix::new("tenant-a/uploads/");
        assert_eq!(prefix.apply("2026/08/a.png"), "tenant-a/uploads/2026/08/a.png");
    }

    #[test]
    fn test_all_slash_prefix_degenerates_to_none() {
        let prefix = Prefix::new("///");
        assert_eq!(prefix.apply("test.txt"), "test.txt");
    }
}
