//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Each subcommand maps to a single storage operation; the dispatcher
//! resolves configuration and hands each command its connection options.

use clap::{Parser, Subcommand};

use sm_core::{Config, ConfigManager};
use sm_s3::ClientOptions;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod delete_all_files;
mod delete_bucket;
mod delete_file;
mod download;
mod upload;

/// s3mgr - Object storage manager
///
/// A command-line utility for managing files in S3-compatible object
/// storage. Credentials are resolved through the SDK's standard chain
/// (environment, shared config files, instance metadata).
#[derive(Parser, Debug)]
#[command(name = "s3mgr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Endpoint URL for self-hosted S3-compatible backends
    #[arg(long, global = true, env = "S3MGR_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Region override
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Use path-style addressing (required by most self-hosted backends)
    #[arg(long, global = true, default_value = "false")]
    pub force_path_style: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file to a bucket
    Upload(upload::UploadArgs),

    /// Download a file from a bucket
    Download(download::DownloadArgs),

    /// Delete a single file from a bucket
    DeleteFile(delete_file::DeleteFileArgs),

    /// Delete every file in a bucket
    DeleteAllFiles(delete_all_files::DeleteAllFilesArgs),

    /// Delete a bucket (must be empty)
    DeleteBucket(delete_bucket::DeleteBucketArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Merge command-line flags over config file values into connection options
fn client_options(cli: &Cli, config: &Config) -> ClientOptions {
    ClientOptions {
        endpoint_url: cli
            .endpoint_url
            .clone()
            .or_else(|| config.endpoint.url.clone()),
        region: cli.region.clone().or_else(|| config.endpoint.region.clone()),
        force_path_style: cli.force_path_style || config.endpoint.force_path_style,
    }
}

/// Build output configuration from flags and config file defaults
fn output_config(cli: &Cli, config: &Config) -> OutputConfig {
    OutputConfig {
        json: cli.json || config.defaults.output == "json",
        no_color: cli.no_color || config.defaults.color == "never",
        quiet: cli.quiet,
    }
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    // Completions need neither configuration nor a network connection
    if let Commands::Completions(args) = &cli.command {
        return completions::execute(args);
    }

    let config = match ConfigManager::new().and_then(|m| m.load()) {
        Ok(c) => c,
        Err(e) => {
            // Config failed to load, so output settings come from flags alone
            let formatter = Formatter::new(OutputConfig {
                json: cli.json,
                no_color: cli.no_color,
                quiet: cli.quiet,
            });
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    let options = client_options(&cli, &config);
    let output = output_config(&cli, &config);
    tracing::debug!(?options, "resolved client options");

    if let Some(endpoint) = &options.endpoint_url {
        if let Err(e) = url::Url::parse(endpoint) {
            let e = sm_core::Error::from(e);
            Formatter::new(output.clone()).error(&e.to_string());
            return ExitCode::from(&e);
        }
    }

    match cli.command {
        Commands::Upload(args) => upload::execute(args, options, output).await,
        Commands::Download(args) => download::execute(args, options, output).await,
        Commands::DeleteFile(args) => delete_file::execute(args, options, output).await,
        Commands::DeleteAllFiles(args) => delete_all_files::execute(args, options, output).await,
        Commands::DeleteBucket(args) => delete_bucket::execute(args, options, output).await,
        Commands::Completions(_) => unreachable!("handled above"),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared mock of the ObjectStore trait for command unit tests

    use async_trait::async_trait;
    use mockall::mock;
    use sm_core::{ListOptions, ListResult, ObjectInfo, Result};

    mock! {
        pub Store {}

        #[async_trait]
        impl sm_core::ObjectStore for Store {
            async fn bucket_exists(&self, bucket: &str) -> Result<bool>;
            async fn create_bucket(&self, bucket: &str) -> Result<()>;
            async fn delete_bucket(&self, bucket: &str) -> Result<()>;
            async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult>;
            async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
            async fn put_object(
                &self,
                bucket: &str,
                key: &str,
                data: Vec<u8>,
                content_type: Option<String>,
            ) -> Result<ObjectInfo>;
            async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool>;
            async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;
        }
    }
}
