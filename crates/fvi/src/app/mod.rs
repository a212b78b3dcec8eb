//! Application layer: the file-selection pipeline and editor hand-off.

pub mod candidates;
pub mod content;
pub mod dedup;
pub mod editor;
pub mod glob_filter;
pub mod pipeline;
pub mod resolve;
pub mod search;
