use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use colored::Colorize;

use crate::prelude::{println, *};
use notion_diary_core::notion::artifacts::converted_output_path;
use notion_diary_core::notion::blocks::ResultDocument;
use notion_diary_core::notion::diary::notion_json_to_markdown;

/// Options for converting a saved JSON document
#[derive(Debug, clap::Args, Clone)]
pub struct ConvertOptions {
    /// Path to a JSON file produced by `download` (or the raw API response)
    #[clap(value_name = "NOTION_JSON_FILE")]
    pub file: PathBuf,
}

#[derive(Debug)]
pub struct ConvertOutput {
    pub output_path: PathBuf,
    pub markdown: String,
}

/// Read `input`, render it and write the Markdown next to it
pub fn convert_file(input: &Path, generated_at: NaiveDateTime) -> Result<ConvertOutput, Error> {
    let contents = std::fs::read_to_string(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            Error::Input(format!("File {} does not exist", input.display()))
        }
        _ => Error::Io(format!("Failed to read {}: {}", input.display(), e)),
    })?;

    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|_| Error::Input(format!("File {} is not valid JSON", input.display())))?;

    let document = ResultDocument::from_value(&value);
    let markdown = notion_json_to_markdown(document.as_ref(), generated_at);

    let output_path = converted_output_path(input);
    std::fs::write(&output_path, &markdown)?;

    Ok(ConvertOutput {
        output_path,
        markdown,
    })
}

/// Handle the convert command.
///
/// Failures propagate to `main`, which reports them and exits with status 1.
pub async fn handler(options: ConvertOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Converting {}...", options.file.display());
    }

    let output = convert_file(&options.file, chrono::Local::now().naive_local()).map_err(
        |err| match err {
            Error::Input(_) => eyre!("❌ Error: {}", err),
            _ => eyre!("❌ Conversion failed: {}", err),
        },
    )?;

    println!("{}", output.markdown);
    println!(
        "\n{} {}",
        "✅ Conversion complete! Markdown saved to:".green(),
        output.output_path.display()
    );

    Ok(())
}
