#![forbid(unsafe_code)]

//! The flex command set: windowgram mutations under strict validation.
//!
//! Every command has the shape `apply(windowgram, command) -> result`, where
//! the result carries a new windowgram or the unchanged input plus notices.
//! Arguments are resolved completely before any mutation; a validation
//! failure produces exactly one Error notice and no change, so a command is
//! atomic from the caller's point of view.

pub mod command;
pub mod direction;
pub mod notice;
pub mod size;

pub use command::{FlexCommand, apply};
pub use direction::{Edge, parse_axis};
pub use notice::{FlexResult, Notice, Severity};
pub use size::{SizeArg, split_size_pair};
