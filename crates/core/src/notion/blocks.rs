//! Domain models for Notion block-children responses
//!
//! Blocks arrive as loosely-typed JSON. They are kept opaque (`serde_json::Value`)
//! inside [`ResultDocument`] so the raw document can be persisted verbatim, and
//! are classified into the closed [`Block`] enum only when rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Domain Models (Input from API)
// ============================================================================

/// One page of `GET /v1/blocks/{id}/children`
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct BlockChildrenResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl BlockChildrenResponse {
    /// Cursor for the next request, or `None` when pagination is exhausted.
    ///
    /// A response that claims `has_more` but carries no usable cursor also
    /// ends pagination.
    pub fn continuation(&self) -> Option<&str> {
        if !self.has_more {
            return None;
        }

        self.next_cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

/// Unified document holding every block of a page, in order
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResultDocument {
    pub object: String,
    pub results: Vec<Value>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl Default for ResultDocument {
    fn default() -> Self {
        Self {
            object: "list".to_string(),
            results: Vec::new(),
            next_cursor: None,
            has_more: false,
        }
    }
}

impl ResultDocument {
    /// Build a document from arbitrary JSON.
    ///
    /// Returns `None` for "empty" values (`null`, `false`, `0`, `""`, `[]`, `{}`),
    /// which render as the "data is null" document. Any other value yields a
    /// document; a missing or non-array `results` field yields no blocks.
    pub fn from_value(value: &Value) -> Option<Self> {
        if is_blank(value) {
            return None;
        }

        let results = value
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Some(Self {
            object: value
                .get("object")
                .and_then(Value::as_str)
                .unwrap_or("list")
                .to_string(),
            results,
            next_cursor: value
                .get("next_cursor")
                .and_then(Value::as_str)
                .map(str::to_string),
            has_more: value
                .get("has_more")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }

    /// Classify every raw block in order
    pub fn blocks(&self) -> Vec<Block> {
        self.results.iter().map(Block::from_value).collect()
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Concatenate paginated block-children responses into one document.
///
/// Block order is preserved; pagination metadata is taken from the last page.
pub fn merge_block_pages(pages: Vec<BlockChildrenResponse>) -> ResultDocument {
    let mut document = ResultDocument::default();

    for page in pages {
        document.results.extend(page.results);
        document.has_more = page.has_more;
        document.next_cursor = page.next_cursor;
    }

    document
}

/// Text payload of a rich-text run
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TextContent {
    #[serde(default)]
    pub content: Option<String>,
}

/// One rich-text run. Annotations and links are ignored.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TextRun {
    #[serde(default)]
    pub text: Option<TextContent>,
}

impl TextRun {
    pub fn new(content: &str) -> Self {
        Self {
            text: Some(TextContent {
                content: Some(content.to_string()),
            }),
        }
    }

    /// Plain content of the run, empty when absent
    pub fn content(&self) -> &str {
        self.text
            .as_ref()
            .and_then(|t| t.content.as_deref())
            .unwrap_or("")
    }
}

// ============================================================================
// Classified Blocks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

impl HeadingLevel {
    pub fn marker(self) -> &'static str {
        match self {
            HeadingLevel::One => "#",
            HeadingLevel::Two => "##",
            HeadingLevel::Three => "###",
        }
    }
}

/// A block classified by its `type` discriminant
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: HeadingLevel,
        rich_text: Vec<TextRun>,
    },
    Paragraph {
        rich_text: Vec<TextRun>,
    },
    Toggle {
        rich_text: Vec<TextRun>,
    },
    BulletedListItem {
        rich_text: Vec<TextRun>,
    },
    NumberedListItem {
        rich_text: Vec<TextRun>,
    },
    Callout {
        rich_text: Vec<TextRun>,
    },
    /// Any other block type, including blocks without a `type` field
    Unknown {
        kind: String,
        rich_text: Vec<TextRun>,
    },
}

impl Block {
    /// Classify a raw block. Never fails: unexpected shapes end up with no text runs.
    pub fn from_value(value: &Value) -> Self {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or("");
        let rich_text = extract_rich_text(value, kind);

        match kind {
            "heading_1" => Block::Heading {
                level: HeadingLevel::One,
                rich_text,
            },
            "heading_2" => Block::Heading {
                level: HeadingLevel::Two,
                rich_text,
            },
            "heading_3" => Block::Heading {
                level: HeadingLevel::Three,
                rich_text,
            },
            "paragraph" => Block::Paragraph { rich_text },
            "toggle" => Block::Toggle { rich_text },
            "bulleted_list_item" => Block::BulletedListItem { rich_text },
            "numbered_list_item" => Block::NumberedListItem { rich_text },
            "callout" => Block::Callout { rich_text },
            other => Block::Unknown {
                kind: other.to_string(),
                rich_text,
            },
        }
    }

    pub fn rich_text(&self) -> &[TextRun] {
        match self {
            Block::Heading { rich_text, .. }
            | Block::Paragraph { rich_text }
            | Block::Toggle { rich_text }
            | Block::BulletedListItem { rich_text }
            | Block::NumberedListItem { rich_text }
            | Block::Callout { rich_text }
            | Block::Unknown { rich_text, .. } => rich_text,
        }
    }

    /// Concatenated content of every text run
    pub fn plain_text(&self) -> String {
        self.rich_text().iter().map(TextRun::content).collect()
    }
}

/// Read `value[kind].rich_text`, keeping run positions even for malformed runs.
fn extract_rich_text(value: &Value, kind: &str) -> Vec<TextRun> {
    value
        .get(kind)
        .and_then(|body| body.get("rich_text"))
        .and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .map(|run| TextRun::deserialize(run).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
