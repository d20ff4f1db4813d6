//! Pick-a-Pal TUI - interactive name roster
//!
//! - Entry field for adding names (Edit mode) with `/command` support
//! - Names list, picked-name panel, toggle and snapshot controls
//! - Single-key buttons in Normal mode
//! - Notices shown as modal alerts, dismissed by any key

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use terminal::run;
