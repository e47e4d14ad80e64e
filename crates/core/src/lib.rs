//! Core library for notion-diary
//!
//! This crate implements the **Functional Core** of the notion-diary application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`notion_diary_core`** (this crate): Pure transformation functions with zero I/O
//! - **`notion-diary`**: HTTP fetching, file persistence and the CLI (the Imperative Shell)
//!
//! All functions in this crate are deterministic and can be tested with fixture
//! JSON, no HTTP mocking required. The only non-derived input of the Markdown
//! conversion, the generation timestamp, is passed in by the caller.
//!
//! # Module Organization
//!
//! - [`notion::blocks`]: API response models and block classification
//! - [`notion::diary`]: Date grouping and Markdown rendering
//! - [`notion::config`]: `notion_config.json` model and setting precedence
//! - [`notion::artifacts`]: Output file naming and previews
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use notion_diary_core::notion::blocks::ResultDocument;
//! use notion_diary_core::notion::diary::notion_json_to_markdown;
//!
//! let value = serde_json::json!({
//!     "results": [
//!         { "type": "heading_1", "heading_1": { "rich_text": [{ "text": { "content": "260101" } }] } },
//!         { "type": "paragraph", "paragraph": { "rich_text": [{ "text": { "content": "Hello" } }] } }
//!     ]
//! });
//!
//! let document = ResultDocument::from_value(&value);
//! let markdown = notion_json_to_markdown(document.as_ref(), chrono::Local::now().naive_local());
//!
//! assert!(markdown.contains("## 260101\n\nHello\n\n"));
//! ```

pub mod notion;
