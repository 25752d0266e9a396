//! Layout classification.

use std::fmt;

use wgram_core::{GridRect, Windowgram, WindowgramError};

use crate::split::resolve;

/// Canvas large enough that integer rounding cannot mask a clean break.
const ANALYSIS_CANVAS: u16 = 1024;

/// What a windowgram's arrangement requires of its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Expressible as nested binary splits.
    Split,
    /// No overlaps, but placement must be positioned rather than split.
    Tiled,
    /// At least two panes' bounding boxes overlap.
    Layered,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Split => "split",
            Self::Tiled => "tiled",
            Self::Layered => "layered",
        })
    }
}

/// Classification result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutAnalysis {
    pub kind: LayoutKind,
    /// The first overlapping pane pair, for layered windowgrams.
    pub overlap: Option<(char, char)>,
}

/// Classify a windowgram as split, tiled, or layered.
pub fn analyze(wg: &Windowgram) -> Result<LayoutAnalysis, WindowgramError> {
    let parsed = wg.parse()?;
    let mut panes: Vec<(char, GridRect)> = parsed.into_iter().collect();
    panes.sort_by_key(|&(_, rect)| (rect.y, rect.x));

    if let Some(overlap) = first_overlap(&panes) {
        return Ok(LayoutAnalysis { kind: LayoutKind::Layered, overlap: Some(overlap) });
    }
    let plan = resolve(wg, ANALYSIS_CANVAS, ANALYSIS_CANVAS)?;
    let kind = if plan.is_complete() { LayoutKind::Split } else { LayoutKind::Tiled };
    Ok(LayoutAnalysis { kind, overlap: None })
}

/// First pair of distinct panes whose bounding boxes share a cell, in scan
/// order.
fn first_overlap(panes: &[(char, GridRect)]) -> Option<(char, char)> {
    for (i, &(first, first_rect)) in panes.iter().enumerate() {
        for (j, &(second, second_rect)) in panes.iter().enumerate() {
            if i != j && first_rect.intersects(&second_rect) {
                return Some((first, second));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_stacked_panes_are_split() {
        let analysis = analyze(&Windowgram::new("11\n22\n")).unwrap();
        assert_eq!(analysis.kind, LayoutKind::Split);
        assert_eq!(analysis.overlap, None);
    }

    #[test]
    fn nine_grid_is_split() {
        let analysis = analyze(&Windowgram::new("123\n456\n789\n")).unwrap();
        assert_eq!(analysis.kind, LayoutKind::Split);
    }

    #[test]
    fn pinwheel_is_tiled() {
        let analysis = analyze(&Windowgram::new("112\n452\n433\n")).unwrap();
        assert_eq!(analysis.kind, LayoutKind::Tiled);
        assert_eq!(analysis.overlap, None);
    }

    #[test]
    fn interlocked_bounding_boxes_are_layered() {
        // Pane A occurs at opposite corners, so its bounding box is the whole
        // grid and swallows B and C.
        let analysis = analyze(&Windowgram::new("AB\nCA\n")).unwrap();
        assert_eq!(analysis.kind, LayoutKind::Layered);
        assert_eq!(analysis.overlap, Some(('A', 'B')));
    }

    #[test]
    fn kind_displays_as_lowercase_word() {
        assert_eq!(LayoutKind::Split.to_string(), "split");
        assert_eq!(LayoutKind::Tiled.to_string(), "tiled");
        assert_eq!(LayoutKind::Layered.to_string(), "layered");
    }
}
