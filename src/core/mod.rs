//! Core logic – the scroll-bound animator and the page model around it.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send` so it can move between async tasks.

pub mod animator;
pub mod assets;
pub mod carousel;
pub mod content;
pub mod counter;
pub mod gate;
pub mod locale;
pub mod page;
pub mod phase;
pub mod progress;
