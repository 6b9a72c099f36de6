//! download command - Download a file from a bucket
//!
//! Retrieves an object and writes it to a local path, creating missing
//! parent directories. An existing destination file is kept as a `.old`
//! backup rather than overwritten.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use sm_core::{validate_bucket_name, validate_key, ObjectStore as _, Result};
use sm_s3::{ClientOptions, S3Client};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Download a file from a bucket
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Bucket name
    pub bucket: String,

    /// Remote key to download
    pub key: String,

    /// Local destination path
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct DownloadOutput {
    status: &'static str,
    bucket: String,
    key: String,
    file: String,
    size_bytes: i64,
    size_human: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup: Option<String>,
}

/// Execute the download command
pub async fn execute(args: DownloadArgs, options: ClientOptions, output: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output);

    if let Err(e) = validate_bucket_name(&args.bucket) {
        formatter.error(&e.to_string());
        return ExitCode::from(&e);
    }
    if let Err(e) = validate_key(&args.key) {
        formatter.error(&e.to_string());
        return ExitCode::from(&e);
    }

    let client = match S3Client::new(options).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::NetworkError;
        }
    };

    let data = match client.get_object(&args.bucket, &args.key).await {
        Ok(d) => d,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    let backup = match prepare_destination(&args.file) {
        Ok(b) => b,
        Err(e) => {
            formatter.error(&format!(
                "Failed to prepare {}: {e}",
                args.file.display()
            ));
            return ExitCode::GeneralError;
        }
    };

    if let Some(backup_path) = &backup {
        formatter.warning(&format!(
            "{} already existed, kept a backup at {}",
            args.file.display(),
            backup_path.display()
        ));
    }

    if let Err(e) = std::fs::write(&args.file, &data) {
        formatter.error(&format!("Failed to write {}: {e}", args.file.display()));
        return ExitCode::GeneralError;
    }

    let size = data.len() as i64;
    let size_human = humansize::format_size(data.len() as u64, humansize::BINARY);

    if formatter.is_json() {
        let output = DownloadOutput {
            status: "success",
            bucket: args.bucket.clone(),
            key: args.key.clone(),
            file: args.file.display().to_string(),
            size_bytes: size,
            size_human,
            backup: backup.map(|p| p.display().to_string()),
        };
        formatter.json(&output);
    } else {
        formatter.success(&format!(
            "Downloaded {}/{} to {} ({size_human})",
            args.bucket,
            args.key,
            args.file.display()
        ));
    }

    ExitCode::Success
}

/// Prepare the destination path for writing
///
/// Creates missing parent directories. If the destination already exists it
/// is renamed to `<path>.old` and the backup path is returned.
fn prepare_destination(path: &Path) -> Result<Option<PathBuf>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if path.is_file() {
        let mut backup = path.as_os_str().to_os_string();
        backup.push(".old");
        let backup = PathBuf::from(backup);
        std::fs::rename(path, &backup)?;
        return Ok(Some(backup));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_destination_fresh_path() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.pdf");

        let backup = prepare_destination(&dest).unwrap();
        assert!(backup.is_none());
        assert!(!dest.exists());
    }

    #[test]
    fn test_prepare_destination_creates_parents() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("a/b/c/out.pdf");

        let backup = prepare_destination(&dest).unwrap();
        assert!(backup.is_none());
        assert!(dest.parent().unwrap().is_dir());
    }

    #[test]
    fn test_prepare_destination_backs_up_existing_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.pdf");
        std::fs::write(&dest, b"old content").unwrap();

        let backup = prepare_destination(&dest).unwrap().unwrap();
        assert_eq!(backup, dir.path().join("out.pdf.old"));
        assert_eq!(std::fs::read(&backup).unwrap(), b"old content");
        assert!(!dest.exists());
    }

    #[test]
    fn test_prepare_destination_bare_file_name() {
        // A bare file name has an empty parent; must not try to create it
        let result = prepare_destination(Path::new("nonexistent-download-target.bin"));
        assert!(result.unwrap().is_none());
    }
}
