//! delete-bucket command - Delete a bucket
//!
//! The bucket must exist and be empty; emptying it is delete-all-files' job.

use clap::Args;
use serde::Serialize;
use sm_core::{validate_bucket_name, Error, ObjectStore, Result};
use sm_s3::{ClientOptions, S3Client};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Delete a bucket (must be empty)
#[derive(Args, Debug)]
pub struct DeleteBucketArgs {
    /// Bucket name
    pub bucket: String,
}

#[derive(Debug, Serialize)]
struct DeleteBucketOutput {
    status: &'static str,
    bucket: String,
}

/// Execute the delete-bucket command
pub async fn execute(
    args: DeleteBucketArgs,
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

    match remove_bucket(&client, &args.bucket).await {
        Ok(()) => {
            if formatter.is_json() {
                let output = DeleteBucketOutput {
                    status: "success",
                    bucket: args.bucket.clone(),
                };
                formatter.json(&output);
            } else {
                formatter.success(&format!("Deleted bucket '{}'.", args.bucket));
            }
            ExitCode::Success
        }
        Err(e) => {
            if matches!(e, Error::Conflict(_)) {
                formatter.error(&format!(
                    "Bucket '{}' is not empty. Run 'delete-all-files {}' first.",
                    args.bucket, args.bucket
                ));
            } else {
                formatter.error(&e.to_string());
            }
            ExitCode::from(&e)
        }
    }
}

/// Delete the bucket after confirming it exists
///
/// The existence check turns the SDK's opaque delete failure on a missing
/// bucket into a consistent not-found error before the delete call.
async fn remove_bucket(store: &impl ObjectStore, bucket: &str) -> Result<()> {
    if !store.bucket_exists(bucket).await? {
        return Err(Error::NotFound(format!("bucket '{bucket}' does not exist")));
    }

    store.delete_bucket(bucket).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::MockStore;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_remove_bucket_success() {
        let mut store = MockStore::new();
        store
            .expect_bucket_exists()
            .with(eq("mybucket"))
            .return_once(|_| Ok(true));
        store
            .expect_delete_bucket()
            .with(eq("mybucket"))
            .times(1)
            .return_once(|_| Ok(()));

        remove_bucket(&store, "mybucket").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_bucket_missing() {
        let mut store = MockStore::new();
        store.expect_bucket_exists().return_once(|_| Ok(false));
        store.expect_delete_bucket().never();

        let err = remove_bucket(&store, "mybucket").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_remove_bucket_not_empty() {
        let mut store = MockStore::new();
        store.expect_bucket_exists().return_once(|_| Ok(true));
        store
            .expect_delete_bucket()
            .return_once(|_| Err(Error::Conflict("bucket 'mybucket' is not empty".into())));

        let err = remove_bucket(&store, "mybucket").await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }
}
