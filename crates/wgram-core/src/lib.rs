#![forbid(unsafe_code)]

//! Windowgram model and format conversions.
//!
//! A windowgram is a rectangular character grid describing a terminal
//! multiplexer pane layout: every cell names the pane occupying it. This
//! crate owns the value type, the pane alphabet, the bounding-rectangle
//! geometry, the conversions between the textual and parsed forms, and the
//! mask/mosaic machinery used to compose partial edits.

pub mod alphabet;
pub mod geometry;
pub mod mosaic;
pub mod panes;
pub mod pattern;
pub mod windowgram;

pub use geometry::GridRect;
pub use mosaic::{Mosaic, MosaicLayer, mask_from_panes};
pub use windowgram::{PaneIdError, Windowgram, WindowgramError, purify};
