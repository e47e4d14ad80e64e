//! Naming of persisted artifacts and console previews

use std::path::{Path, PathBuf};

/// Number of characters shown in the console preview
pub const PREVIEW_CHARS: usize = 500;

const MARKDOWN_SUFFIX: &str = "_markdown.md";

/// `notion_diary_<page_id>.json`
pub fn raw_document_file_name(page_id: &str) -> String {
    format!("notion_diary_{page_id}.json")
}

/// `notion_diary_<page_id>_markdown.md`
pub fn markdown_file_name(page_id: &str) -> String {
    format!("notion_diary_{page_id}{MARKDOWN_SUFFIX}")
}

/// Output path of the standalone converter.
///
/// `diary.json` becomes `diary_markdown.md` next to the input. Inputs without
/// a `.json` extension get the suffix appended so the input is never overwritten.
pub fn converted_output_path(input: &Path) -> PathBuf {
    let is_json = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "json");

    let name = if is_json {
        input.file_stem()
    } else {
        input.file_name()
    };
    let base = name
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    input.with_file_name(format!("{base}{MARKDOWN_SUFFIX}"))
}

/// First `max_chars` characters of `text`, with `...` appended when truncated
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
