//! Presentation Layer
//!
//! Presentation surfaces the messenger drives.

pub mod console;

pub use console::{BoardView, ConsoleSurface, HistoryEntry, SharedView};
