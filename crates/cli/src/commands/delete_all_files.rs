//! delete-all-files command - Delete every file in a bucket
//!
//! Lists all keys (following continuation tokens) and deletes them one at a
//! time, sequentially, in listing order. There is no rollback: a failure
//! partway leaves earlier keys deleted and later keys untouched, and the
//! command exits non-zero.

use clap::Args;
use serde::Serialize;
use sm_core::{validate_bucket_name, Error, ListOptions, ObjectStore, Result};
use sm_s3::{ClientOptions, S3Client};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Delete every file in a bucket
#[derive(Args, Debug)]
pub struct DeleteAllFilesArgs {
    /// Bucket name
    pub bucket: String,

    /// Only show what would be deleted (dry run)
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct DryRunOutput {
    status: &'static str,
    bucket: String,
    would_delete: Vec<String>,
    total: usize,
}

#[derive(Debug, Serialize)]
struct DeleteAllFilesOutput {
    status: &'static str,
    bucket: String,
    deleted: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed: Option<String>,
    total: usize,
}

/// Execute the delete-all-files command
pub async fn execute(
    args: DeleteAllFilesArgs,
    options: ClientOptions,
    output: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output);

    if let Err(e) = validate_bucket_name(&args.bucket) {
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

    let keys = match collect_keys(&client, &args.bucket).await {
        Ok(k) => k,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    if keys.is_empty() {
        if formatter.is_json() {
            let output = DeleteAllFilesOutput {
                status: "success",
                bucket: args.bucket.clone(),
                deleted: vec![],
                failed: None,
                total: 0,
            };
            formatter.json(&output);
        } else {
            formatter.success(&format!("Bucket '{}' is already empty.", args.bucket));
        }
        return ExitCode::Success;
    }

    if args.dry_run {
        if formatter.is_json() {
            let output = DryRunOutput {
                status: "dry-run",
                bucket: args.bucket.clone(),
                total: keys.len(),
                would_delete: keys,
            };
            formatter.json(&output);
        } else {
            for key in &keys {
                formatter.println(&format!("Would delete: {}/{key}", args.bucket));
            }
        }
        return ExitCode::Success;
    }

    let (deleted, failure) = delete_keys(&client, &args.bucket, &keys, &formatter).await;

    match failure {
        None => {
            if formatter.is_json() {
                let output = DeleteAllFilesOutput {
                    status: "success",
                    bucket: args.bucket.clone(),
                    total: deleted.len(),
                    deleted,
                    failed: None,
                };
                formatter.json(&output);
            } else {
                formatter.success(&format!(
                    "Deleted {} object(s) from '{}'.",
                    deleted.len(),
                    args.bucket
                ));
            }
            ExitCode::Success
        }
        Some((key, e)) => {
            formatter.error(&format!(
                "Failed to delete '{key}': {e} ({} of {} deleted)",
                deleted.len(),
                keys.len()
            ));
            if formatter.is_json() {
                let output = DeleteAllFilesOutput {
                    status: "partial",
                    bucket: args.bucket.clone(),
                    total: deleted.len(),
                    deleted,
                    failed: Some(key),
                };
                formatter.json(&output);
            }
            ExitCode::from(&e)
        }
    }
}

/// Collect every key in the bucket, following continuation tokens
async fn collect_keys(store: &impl ObjectStore, bucket: &str) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let options = ListOptions {
            max_keys: None,
            continuation_token: continuation_token.clone(),
        };

        let result = store.list_objects(bucket, options).await?;
        keys.extend(result.items.into_iter().map(|item| item.key));

        if !result.truncated {
            break;
        }
        // A truncated listing without a token would loop on the same page
        match result.continuation_token {
            Some(token) => continuation_token = Some(token),
            None => {
                return Err(Error::General(format!(
                    "truncated listing of bucket '{bucket}' carried no continuation token"
                )));
            }
        }
    }

    Ok(keys)
}

/// Delete keys one at a time, halting at the first failure
///
/// Returns the keys that were deleted and, if a delete failed, the failing
/// key with its error. Keys after the failure are never attempted.
async fn delete_keys(
    store: &impl ObjectStore,
    bucket: &str,
    keys: &[String],
    formatter: &Formatter,
) -> (Vec<String>, Option<(String, Error)>) {
    let mut deleted = Vec::new();

    for key in keys {
        match store.delete_object(bucket, key).await {
            Ok(()) => {
                if !formatter.is_json() {
                    formatter.println(&format!("Deleted: {bucket}/{key}"));
                }
                deleted.push(key.clone());
            }
            Err(e) => {
                return (deleted, Some((key.clone(), e)));
            }
        }
    }

    (deleted, None)
}
