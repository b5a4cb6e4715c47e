//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into pixels on
//! the terminal.  No filesystem I/O happens here.

pub mod carousel;
pub mod header;
pub mod hero;
pub mod layout;
pub mod page;
pub mod popup;
pub mod sections;
pub mod sketch;
pub mod spinner;
pub mod theme;
