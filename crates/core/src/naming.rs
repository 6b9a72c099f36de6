//! Bucket name and object key validation
//!
//! Validates names locally before any network call, and derives a default
//! object key from a local file path.

use std::path::Path;

use crate::error::{Error, Result};

/// Maximum object key length accepted by S3-compatible services
const MAX_KEY_LEN: usize = 1024;

/// Validate a bucket name against the common S3 naming rules
///
/// Accepted: 3-63 characters, lowercase letters, digits, hyphens and dots,
/// starting and ending with a letter or digit. This intentionally rejects
/// names that some backends tolerate but AWS does not.
pub fn validate_bucket_name(name: &str) -> Result<()> {
    if name.len() < 3 || name.len() > 63 {
        return Err(Error::InvalidBucket(format!(
            "'{name}' must be between 3 and 63 characters"
        )));
    }

    let bytes = name.as_bytes();
    if !bytes[0].is_ascii_lowercase() && !bytes[0].is_ascii_digit() {
        return Err(Error::InvalidBucket(format!(
            "'{name}' must start with a lowercase letter or digit"
        )));
    }
    if !bytes[bytes.len() - 1].is_ascii_lowercase() && !bytes[bytes.len() - 1].is_ascii_digit() {
        return Err(Error::InvalidBucket(format!(
            "'{name}' must end with a lowercase letter or digit"
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(Error::InvalidBucket(format!(
            "'{name}' may only contain lowercase letters, digits, hyphens and dots"
        )));
    }

    if name.contains("..") {
        return Err(Error::InvalidBucket(format!(
            "'{name}' must not contain consecutive dots"
        )));
    }

    Ok(())
}

/// Validate an object key
///
/// Keys must be non-empty, at most 1024 bytes, and must not start with a
/// slash (a leading slash silently produces a different key than the user
/// intended on most backends).
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidKey("key cannot be empty".into()));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(Error::InvalidKey(format!(
            "key exceeds {MAX_KEY_LEN} bytes"
        )));
    }
    if key.starts_with('/') {
        return Err(Error::InvalidKey(format!(
            "'{key}' must not start with '/'"
        )));
    }
    Ok(())
}

/// Derive an object key from a local file path
///
/// Uses the file's base name, matching the upload contract: the remote key
/// defaults to the name of the uploaded file.
pub fn key_from_path(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .ok_or_else(|| Error::InvalidKey(format!("cannot derive a key from '{}'", path.display())))?
        .to_string_lossy()
        .to_string();

    validate_key(&name)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_bucket_names() {
        assert!(validate_bucket_name("mybucket").is_ok());
        assert!(validate_bucket_name("my-bucket.backup").is_ok());
        assert!(validate_bucket_name("123bucket").is_ok());
        assert!(validate_bucket_name("abc").is_ok());
    }

    #[test]
    fn test_bucket_name_too_short() {
        assert!(validate_bucket_name("ab").is_err());
    }

    #[test]
    fn test_bucket_name_too_long() {
        let name = "a".repeat(64);
        assert!(validate_bucket_name(&name).is_err());
    }

    #[test]
    fn test_bucket_name_uppercase() {
        assert!(validate_bucket_name("MyBucket").is_err());
    }

    #[test]
    fn test_bucket_name_bad_edges() {
        assert!(validate_bucket_name("-bucket").is_err());
        assert!(validate_bucket_name("bucket-").is_err());
        assert!(validate_bucket_name(".bucket").is_err());
    }

    #[test]
    fn test_bucket_name_consecutive_dots() {
        assert!(validate_bucket_name("my..bucket").is_err());
    }

    #[test]
    fn test_valid_keys() {
        assert!(validate_key("report.pdf").is_ok());
        assert!(validate_key("path/to/report.pdf").is_ok());
    }

    #[test]
    fn test_empty_key() {
        assert!(validate_key("").is_err());
    }

    #[test]
    fn test_key_leading_slash() {
        assert!(validate_key("/report.pdf").is_err());
    }

    #[test]
    fn test_key_too_long() {
        let key = "k".repeat(1025);
        assert!(validate_key(&key).is_err());
    }

    #[test]
    fn test_key_from_path() {
        let key = key_from_path(&PathBuf::from("/tmp/reports/report.pdf")).unwrap();
        assert_eq!(key, "report.pdf");

        let key = key_from_path(&PathBuf::from("./report.pdf")).unwrap();
        assert_eq!(key, "report.pdf");
    }

    #[test]
    fn test_key_from_path_no_file_name() {
        assert!(key_from_path(&PathBuf::from("/")).is_err());
        assert!(key_from_path(&PathBuf::from("..")).is_err());
    }
}
