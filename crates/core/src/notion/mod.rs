/// Notion-related transformations
///
/// Pure functions over Notion API payloads. Nothing here performs I/O.
pub mod artifacts;
pub mod blocks;
pub mod config;
pub mod diary;
