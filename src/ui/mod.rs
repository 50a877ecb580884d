//! Terminal and JSON presentation for the `bucketship` binary
//!
//! ## Structure
//!
//! - `theme` - colors, icons and border glyphs
//! - `primitives` / `widgets` / `blocks` - composable pieces
//! - `views` - per-command renderers
//! - `console` - live deploy progress
//! - `json` - NDJSON output for `--json`

pub mod blocks;
pub mod ci;
pub mod console;
pub mod context;
pub mod error;
pub mod json;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
