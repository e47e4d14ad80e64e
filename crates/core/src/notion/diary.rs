//! Pure transformation of a Notion diary page into Markdown
//!
//! The page is a flat list of blocks. Headings whose first text run is a
//! 6-digit token (e.g. `260101`) start a dated section; every following block
//! belongs to that section until the next dated heading. Sections are rendered
//! in ascending key order, followed by whatever preceded the first dated heading.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::blocks::{Block, ResultDocument};

/// Rendered when there is no document at all
pub const DATA_IS_NULL: &str = "# Notion diary conversion failed\n\nData is null.\n";

/// Rendered when the document holds no blocks
pub const NO_CONTENT_FOUND: &str = "# Notion diary conversion failed\n\nNo content found.\n";

pub const DOCUMENT_TITLE: &str = "# 📔 Notion Diary";
pub const OTHER_CONTENT_TITLE: &str = "Other content";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static DATE_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{6}$").expect("date key pattern is valid"));

/// 6-digit grouping token taken from a heading, e.g. `260101`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateKey(String);

impl DateKey {
    /// Accepts exactly six digits and nothing else
    pub fn parse(text: &str) -> Option<Self> {
        DATE_KEY_PATTERN
            .is_match(text)
            .then(|| DateKey(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Blocks partitioned into dated sections plus the leftover blocks
#[derive(Debug, Default, PartialEq)]
pub struct DateGroups<'a> {
    /// Sorted by key; each group includes its own dated heading(s)
    pub dated: BTreeMap<DateKey, Vec<&'a Block>>,
    /// Blocks seen before any dated heading, in original order
    pub other: Vec<&'a Block>,
}

/// Extract the date key of a heading block.
///
/// Only the first text run is inspected, and it must be exactly six digits.
pub fn extract_date_key(block: &Block) -> Option<DateKey> {
    match block {
        Block::Heading { rich_text, .. } => rich_text
            .first()
            .and_then(|run| DateKey::parse(run.content())),
        _ => None,
    }
}

/// Assign each block to the most recent dated heading before it.
///
/// A key seen twice keeps appending to the same group.
pub fn group_by_date(blocks: &[Block]) -> DateGroups<'_> {
    let mut groups = DateGroups::default();
    let mut current: Option<DateKey> = None;

    for block in blocks {
        if let Some(key) = extract_date_key(block) {
            current = Some(key);
        }

        match &current {
            Some(key) => groups.dated.entry(key.clone()).or_default().push(block),
            None => groups.other.push(block),
        }
    }

    groups
}

/// Render one block as a Markdown fragment.
///
/// Blocks without text runs contribute nothing.
pub fn render_block(block: &Block) -> String {
    if block.rich_text().is_empty() {
        return String::new();
    }

    let text = block.plain_text();

    match block {
        Block::Heading { level, .. } => format!("{} {text}\n", level.marker()),
        Block::Paragraph { .. } => format!("{text}\n\n"),
        Block::Toggle { .. } => format!("> {text}\n"),
        Block::BulletedListItem { .. } => format!("- {text}\n"),
        Block::NumberedListItem { .. } => format!("1. {text}\n"),
        Block::Callout { .. } => format!("> [!NOTE] {text}\n"),
        Block::Unknown { .. } => format!("{text}\n"),
    }
}

/// Render one dated section, skipping the heading that carries the key
fn render_date_section(key: &DateKey, blocks: &[&Block]) -> String {
    let mut section = format!("\n## {key}\n\n");

    for block in blocks {
        if extract_date_key(block).as_ref() == Some(key) {
            continue;
        }
        section.push_str(&render_block(block));
    }

    section
}

/// Render grouped blocks into the final document body
pub fn render_groups(groups: &DateGroups<'_>, generated_at: NaiveDateTime) -> String {
    let mut markdown = format!("{DOCUMENT_TITLE}\n\n");
    markdown.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format(TIMESTAMP_FORMAT)
    ));

    for (key, blocks) in &groups.dated {
        markdown.push_str(&render_date_section(key, blocks));
    }

    if !groups.other.is_empty() {
        markdown.push_str(&format!("\n## {OTHER_CONTENT_TITLE}\n\n"));
        for block in &groups.other {
            markdown.push_str(&render_block(block));
        }
    }

    markdown
}

/// Convert a fetched Notion page into a Markdown diary.
///
/// `generated_at` is printed in the header and is the only input that is not
/// derived from the document.
pub fn notion_json_to_markdown(
    document: Option<&ResultDocument>,
    generated_at: NaiveDateTime,
) -> String {
    let Some(document) = document else {
        return DATA_IS_NULL.to_string();
    };

    if document.results.is_empty() {
        return NO_CONTENT_FOUND.to_string();
    }

    let blocks = document.blocks();
    let groups = group_by_date(&blocks);

    render_groups(&groups, generated_at)
}

// ============================================================================
// Tests
// ============================================================================
