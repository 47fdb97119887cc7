//! TUI widget modules.

pub mod input_area;
pub mod pager_view;
pub mod status_bar;
pub mod transcript_view;
