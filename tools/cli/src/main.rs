//! cfimages CLI - Command line interface for the Cloudflare Images adapter.
//!
//! This tool embeds the adapter the way a host application would: it reads
//! the configuration from flags or the environment, builds the adapter
//! once, and drives its hooks.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cfimages_common::{DocumentId, Error};
use cfimages_storage::cloudflare::{CLOUDFLARE_API_BASE, DEFAULT_VARIANT};
use cfimages_storage::{
    CloudflareImagesAdapter, CloudflareImagesConfig, Document, StorageAdapter, UploadedFile,
};

#[derive(Parser)]
#[command(name = "cfimages")]
#[command(about = "Cloudflare Images storage adapter")]
#[command(version)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    account: AccountArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Adapter settings, usually supplied through the environment.
#[derive(Args)]
struct AccountArgs {
    /// Cloudflare API token.
    #[arg(long, env = "CLOUDFLARE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Cloudflare account identifier.
    #[arg(long, env = "CLOUDFLARE_ACCOUNT_ID", global = true)]
    account_id: Option<String>,

    /// Account hash used in delivery URLs.
    #[arg(long, env = "CLOUDFLARE_ACCOUNT_HASH", global = true)]
    account_hash: Option<String>,

    /// Default delivery variant.
    #[arg(long, env = "CLOUDFLARE_IMAGES_VARIANT", default_value = DEFAULT_VARIANT, global = true)]
    variant: String,

    /// REST API base URL.
    #[arg(long, env = "CLOUDFLARE_API_BASE", default_value = CLOUDFLARE_API_BASE, global = true)]
    api_base: String,

    /// Treat a 404 on delete as success.
    #[arg(long, global = true)]
    idempotent_delete: bool,
}

impl AccountArgs {
    /// Adapter configuration, optionally with a different variant.
    fn to_config(&self, variant: Option<&str>) -> CloudflareImagesConfig {
        CloudflareImagesConfig::new(
            self.api_key.clone().unwrap_or_default(),
            self.account_id.clone().unwrap_or_default(),
            self.account_hash.clone().unwrap_or_default(),
        )
        .with_variant(variant.unwrap_or(&self.variant))
        .with_api_base(self.api_base.clone())
        .with_treat_missing_as_deleted(self.idempotent_delete)
    }

    fn build_adapter(&self, variant: Option<&str>) -> Result<Arc<dyn StorageAdapter>> {
        let adapter = CloudflareImagesAdapter::new(self.to_config(variant))
            .context("Failed to configure Cloudflare Images adapter")?;
        Ok(Arc::new(adapter))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file and print the resulting document.
    Upload {
        /// File to upload.
        #[arg(short, long)]
        file: PathBuf,

        /// Host document id.
        #[arg(short, long)]
        id: String,

        /// MIME type sent with the file.
        #[arg(short, long)]
        mime_type: Option<String>,
    },

    /// Delete a remote image.
    Delete {
        /// Cloudflare image id.
        #[arg(short = 'm', long)]
        image_id: String,

        /// Host document id, used in log output.
        #[arg(short, long, default_value = "cli")]
        id: String,
    },

    /// Print the delivery URL for an image.
    Url {
        /// Cloudflare image id.
        #[arg(short = 'm', long)]
        image_id: String,

        /// Variant to use instead of the configured one.
        #[arg(long = "as")]
        as_variant: Option<String>,
    },

    /// Print the schema fields the adapter contributes.
    Fields,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Upload {
            file,
            id,
            mime_type,
        } => cmd_upload(cli.account.build_adapter(None)?, &file, &id, mime_type).await,

        Commands::Delete { image_id, id } => {
            cmd_delete(cli.account.build_adapter(None)?, &image_id, &id).await
        }

        Commands::Url {
            image_id,
            as_variant,
        } => cmd_url(cli.account.build_adapter(as_variant.as_deref())?, &image_id),

        Commands::Fields => cmd_fields(cli.account.build_adapter(None)?),
    }
}

/// Numeric ids stay numeric so the printed document matches the host's.
fn parse_document_id(raw: &str) -> DocumentId {
    raw.parse::<i64>()
        .map(DocumentId::from)
        .unwrap_or_else(|_| DocumentId::Text(raw.to_string()))
}

async fn read_source(path: &Path) -> cfimages_common::Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(Error::from)
}

/// Upload a file.
async fn cmd_upload(
    adapter: Arc<dyn StorageAdapter>,
    path: &Path,
    id: &str,
    mime_type: Option<String>,
) -> Result<()> {
    info!("Uploading {}", path.display());

    let content = read_source(path)
        .await
        .context("Failed to read source file")?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .context("Source path has no file name")?;

    let mut file = UploadedFile::new(content, filename.clone());
    if let Some(mime) = mime_type {
        file = file.with_mime_type(mime);
    }

    let mut doc = Document::new(parse_document_id(id));
    adapter
        .handle_upload(&mut doc, &file)
        .await
        .context("Upload failed")?;

    println!("{}", serde_json::to_string_pretty(&doc)?);
    println!("URL: {}", adapter.generate_url(&doc, &filename));

    Ok(())
}

/// Delete a remote image.
async fn cmd_delete(adapter: Arc<dyn StorageAdapter>, image_id: &str, id: &str) -> Result<()> {
    let doc = Document::new(parse_document_id(id)).with_cloudflare_id(image_id);

    adapter
        .handle_delete(&doc)
        .await
        .context("Delete failed")?;

    println!("Image deleted: {}", image_id);

    Ok(())
}

/// Print a delivery URL.
fn cmd_url(adapter: Arc<dyn StorageAdapter>, image_id: &str) -> Result<()> {
    let doc = Document::new("cli").with_cloudflare_id(image_id);
    println!("{}", adapter.generate_url(&doc, ""));
    Ok(())
}

/// Print the contributed schema fields.
fn cmd_fields(adapter: Arc<dyn StorageAdapter>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&adapter.fields())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_document_id() {
        assert_eq!(parse_document_id("42"), DocumentId::from(42));
        assert_eq!(
            parse_document_id("65f1c0ffee"),
            DocumentId::Text("65f1c0ffee".to_string())
        );
    }

    #[test]
    fn test_account_args_to_config() {
        let cli = Cli::try_parse_from([
            "cfimages",
            "--api-key",
            "key",
            "--account-id",
            "acc",
            "--account-hash",
            "hash",
            "url",
            "--image-id",
            "img",
        ])
        .unwrap();

        let config = cli.account.to_config(None);
        assert_eq!(config.account_hash, "hash");
        assert_eq!(config.variant, "public");
        assert!(!config.treat_missing_as_deleted);
        assert_eq!(cli.account.to_config(Some("thumb")).variant, "thumb");

        let doc = Document::new(1).with_cloudflare_id("img");
        let adapter = cli.account.build_adapter(None).unwrap();
        assert_eq!(
            adapter.generate_url(&doc, ""),
            "https://imagedelivery.net/hash/img/public"
        );

        let adapter = cli.account.build_adapter(Some("thumb")).unwrap();
        assert_eq!(
            adapter.generate_url(&doc, ""),
            "https://imagedelivery.net/hash/img/thumb"
        );
    }

    #[test]
    fn test_missing_account_settings_fail() {
        let account = AccountArgs {
            api_key: Some("key".to_string()),
            account_id: None,
            account_hash: Some("hash".to_string()),
            variant: DEFAULT_VARIANT.to_string(),
            api_base: CLOUDFLARE_API_BASE.to_string(),
            idempotent_delete: false,
        };
        assert!(account.build_adapter(None).is_err());
    }

    #[tokio::test]
    async fn test_read_source_missing_file_is_io_error() {
        let result = read_source(Path::new("/nonexistent/cfimages/cat.png")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
