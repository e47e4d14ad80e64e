use std::path::{Path, PathBuf};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use super::fetch::fetch_page_data;
use super::{load_config_file, NotionConfig, DEFAULT_BASE_URL};
use crate::prelude::{eprintln, println, *};
use notion_diary_core::notion::artifacts::{
    markdown_file_name, preview, raw_document_file_name, PREVIEW_CHARS,
};
use notion_diary_core::notion::blocks::ResultDocument;
use notion_diary_core::notion::config::DEFAULT_CONFIG_FILE;
use notion_diary_core::notion::diary::notion_json_to_markdown;

/// Options for downloading a diary page
#[derive(Debug, clap::Args, Clone)]
pub struct DownloadOptions {
    /// Notion integration token
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Identifier of the diary page
    #[arg(long, env = "NOTION_PAGE_ID")]
    pub page_id: Option<String>,

    /// JSON config file used when the flags and environment are unset
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory where the JSON and Markdown files are written
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Notion API base URL
    #[arg(long, env = "NOTION_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Result of a successful download
#[derive(Debug)]
pub struct DownloadOutput {
    pub json_path: PathBuf,
    pub markdown_path: PathBuf,
    pub markdown: String,
}

/// Write the raw document and its Markdown rendering into `output_dir`
pub fn save_artifacts(
    output_dir: &Path,
    page_id: &str,
    document: &ResultDocument,
    markdown: &str,
) -> Result<(PathBuf, PathBuf), Error> {
    std::fs::create_dir_all(output_dir)?;

    let json_path = output_dir.join(raw_document_file_name(page_id));
    let json = serde_json::to_string_pretty(document)
        .map_err(|e| Error::Io(format!("Failed to serialize document: {}", e)))?;
    std::fs::write(&json_path, json)?;

    let markdown_path = output_dir.join(markdown_file_name(page_id));
    std::fs::write(&markdown_path, markdown)?;

    Ok((json_path, markdown_path))
}

/// Fetch the page, convert it and persist both artifacts
pub async fn download_data(
    config: &NotionConfig,
    page_id: &str,
    output_dir: &Path,
    spinner: Option<&ProgressBar>,
) -> Result<DownloadOutput, Error> {
    let document = fetch_page_data(config, page_id, spinner).await?;

    let markdown = notion_json_to_markdown(Some(&document), chrono::Local::now().naive_local());
    let (json_path, markdown_path) = save_artifacts(output_dir, page_id, &document, &markdown)?;

    Ok(DownloadOutput {
        json_path,
        markdown_path,
        markdown,
    })
}

/// How a download run ended
#[derive(Debug)]
pub enum DownloadOutcome {
    /// No page id from flags, environment or config file; nothing was requested
    MissingPageId,
    Failed(Error),
    Saved(DownloadOutput),
}

/// Resolve settings and run the download, without reporting the result.
///
/// Never writes anything unless the fetch succeeds.
pub async fn run_download(options: &DownloadOptions, global: &crate::Global) -> DownloadOutcome {
    let file = match load_config_file(&options.config) {
        Ok(file) => file,
        Err(err) => return DownloadOutcome::Failed(err),
    };

    let config = NotionConfig::resolve(
        options.base_url.clone(),
        options.api_key.clone(),
        options.page_id.clone(),
        &file,
    );

    let Some(page_id) = config.page_id.clone() else {
        return DownloadOutcome::MissingPageId;
    };

    println!("📄 Page ID: {}", page_id);
    if global.verbose {
        println!("API base: {}", config.base_url);
        println!("Output directory: {}", options.output_dir.display());
    }

    // Create spinner for progress indication
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = download_data(&config, &page_id, &options.output_dir, Some(&spinner)).await;
    spinner.finish_and_clear();

    match result {
        Ok(output) => DownloadOutcome::Saved(output),
        Err(err) => DownloadOutcome::Failed(err),
    }
}

/// Handle the download command.
///
/// Failures are reported on stderr but never turn into a non-zero exit code.
pub async fn handler(options: DownloadOptions, global: crate::Global) -> Result<()> {
    println!("{}", "🔍 Notion Diary Downloader".bold());
    println!("{}", "=".repeat(50));

    match run_download(&options, &global).await {
        DownloadOutcome::MissingPageId => {
            eprintln!("{}", "❌ Error: Notion page ID not found.".red());
            eprintln!(
                "Set the NOTION_PAGE_ID environment variable or add it to notion_config.json."
            );
        }
        DownloadOutcome::Failed(err) => {
            eprintln!("{} {}", "❌ Error:".red(), err);
        }
        DownloadOutcome::Saved(output) => {
            println!("💾 JSON saved to: {}", output.json_path.display());
            println!(
                "{} {}",
                "✅ Markdown saved to:".green(),
                output.markdown_path.display()
            );

            println!("\n{}", "=".repeat(50));
            println!("📋 Preview (first {} characters):", PREVIEW_CHARS);
            println!("{}", "=".repeat(50));
            println!("{}", preview(&output.markdown, PREVIEW_CHARS));
        }
    }

    Ok(())
}
