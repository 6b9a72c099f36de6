//! upload command - Upload a file to a bucket
//!
//! Reads a local file and stores it under a key derived from the file name
//! (or an explicit key). Creates the bucket if it does not exist yet and
//! refuses to replace an existing object unless --overwrite is given.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sm_core::{key_from_path, validate_bucket_name, validate_key, Error, ObjectInfo, ObjectStore, Result};
use sm_s3::{ClientOptions, S3Client};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Upload a file to a bucket
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Bucket name
    pub bucket: String,

    /// Local file to upload
    pub file: PathBuf,

    /// Remote key (defaults to the file's base name)
    pub key: Option<String>,

    /// Replace the remote object if it already exists
    #[arg(long)]
    pub overwrite: bool,

    /// Content type (guessed from the file extension if omitted)
    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct UploadOutput {
    status: &'static str,
    bucket: String,
    key: String,
    size_bytes: i64,
    size_human: String,
    created_bucket: bool,
}

#[derive(Debug)]
struct UploadOutcome {
    info: ObjectInfo,
    created_bucket: bool,
}

/// Execute the upload command
pub async fn execute(args: UploadArgs, options: ClientOptions, output: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output);

    if let Err(e) = validate_bucket_name(&args.bucket) {
        formatter.error(&e.to_string());
        return ExitCode::from(&e);
    }

    // A missing input file is a local validation failure, not a remote
    // not-found: it is reported before any network call as a usage error.
    if !args.file.is_file() {
        formatter.error(&format!("File not found: {}", args.file.display()));
        return ExitCode::UsageError;
    }

    let key = match &args.key {
        Some(k) => match validate_key(k) {
            Ok(()) => k.clone(),
            Err(e) => {
                formatter.error(&e.to_string());
                return ExitCode::from(&e);
            }
        },
        None => match key_from_path(&args.file) {
            Ok(k) => k,
            Err(e) => {
                formatter.error(&e.to_string());
                return ExitCode::from(&e);
            }
        },
    };

    let data = match std::fs::read(&args.file) {
        Ok(d) => d,
        Err(e) => {
            formatter.error(&format!("Failed to read {}: {e}", args.file.display()));
            return ExitCode::GeneralError;
        }
    };

    let content_type = args.content_type.clone().or_else(|| {
        mime_guess::from_path(&args.file)
            .first()
            .map(|m| m.essence_str().to_string())
    });

    let client = match S3Client::new(options).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::NetworkError;
        }
    };

    match store_object(&client, &args.bucket, &key, data, content_type, args.overwrite).await {
        Ok(outcome) => {
            let size = outcome.info.size_bytes.unwrap_or(0);

            if formatter.is_json() {
                let output = UploadOutput {
                    status: "success",
                    bucket: args.bucket.clone(),
                    key: key.clone(),
                    size_bytes: size,
                    size_human: outcome.info.size_human.clone().unwrap_or_default(),
                    created_bucket: outcome.created_bucket,
                };
                formatter.json(&output);
            } else {
                if outcome.created_bucket {
                    formatter.println(&format!("Created bucket: {}", args.bucket));
                }
                formatter.success(&format!(
                    "Uploaded {} to {}/{} ({})",
                    args.file.display(),
                    args.bucket,
                    key,
                    outcome.info.size_human.unwrap_or_default()
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}

/// Store the object, creating the bucket on demand
///
/// Refuses to clobber an existing key unless `overwrite` is set.
async fn store_object(
    store: &impl ObjectStore,
    bucket: &str,
    key: &str,
    data: Vec<u8>,
    content_type: Option<String>,
    overwrite: bool,
) -> Result<UploadOutcome> {
    let mut created_bucket = false;
    if !store.bucket_exists(bucket).await? {
        store.create_bucket(bucket).await?;
        created_bucket = true;
    }

    if !overwrite && store.object_exists(bucket, key).await? {
        return Err(Error::Conflict(format!(
            "object '{key}' already exists in bucket '{bucket}' (use --overwrite to replace it)"
        )));
    }

    let info = store.put_object(bucket, key, data, content_type).await?;

    Ok(UploadOutcome {
        info,
        created_bucket,
    })
}
