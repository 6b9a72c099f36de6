//! delete-file command - Delete a single file from a bucket
//!
//! Issues one DeleteObject. The object-store delete contract is idempotent:
//! deleting a key that does not exist still succeeds. A missing bucket is
//! an error.

use clap::Args;
use serde::Serialize;
use sm_core::{validate_bucket_name, validate_key, ObjectStore, Result};
use sm_s3::{ClientOptions, S3Client};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Delete a single file from a bucket
#[derive(Args, Debug)]
pub struct DeleteFileArgs {
    /// Bucket name
    pub bucket: String,

    /// Remote key to delete
    pub key: String,
}

#[derive(Debug, Serialize)]
struct DeleteFileOutput {
    status: &'static str,
    bucket: String,
    key: String,
}

/// Execute the delete-file command
pub async fn execute(
    args: DeleteFileArgs,
    options: ClientOptions,
    output: OutputConfig,
) -> ExitCode {
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

    match remove_object(&client, &args.bucket, &args.key).await {
        Ok(()) => {
            if formatter.is_json() {
                let output = DeleteFileOutput {
                    status: "success",
                    bucket: args.bucket.clone(),
                    key: args.key.clone(),
                };
                formatter.json(&output);
            } else {
                formatter.success(&format!("Deleted {}/{}", args.bucket, args.key));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}

async fn remove_object(store: &impl ObjectStore, bucket: &str, key: &str) -> Result<()> {
    store.delete_object(bucket, key).await
}
