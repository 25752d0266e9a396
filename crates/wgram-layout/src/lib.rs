#![forbid(unsafe_code)]

//! Split resolution, layout analysis, scaling, and group validation.
//!
//! The split resolver decides whether a windowgram is expressible as nested
//! binary splits and, if so, produces the replayable split plan a terminal
//! multiplexer needs. The analyzer classifies layouts as split, tiled, or
//! layered; the scale engine resizes a windowgram to a character resolution;
//! the group validator vets contiguous pane sets before they are collapsed.

pub mod analyze;
pub mod group;
pub mod scale;
pub mod split;

pub use analyze::{LayoutAnalysis, LayoutKind, analyze};
pub use group::{GroupStatus, group};
pub use scale::{lost_panes, scale, scale_exact, scale_resample};
pub use split::{LinkId, SplitAxis, SplitPlan, SplitRecord, resolve};
