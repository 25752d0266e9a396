//! Edge and axis vocabularies for command arguments.
//!
//! Ordering across the command surface is English order: top before bottom,
//! left before right.

use wgram_layout::SplitAxis;

/// One of the four windowgram edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Right,
    Left,
}

impl Edge {
    /// Recognize an edge name or one of its abbreviations.
    #[must_use]
    pub fn parse(arg: &str) -> Option<Edge> {
        match arg.trim().to_ascii_lowercase().as_str() {
            "top" | "t" | "tp" | "north" | "n" | "up" | "u" | "over" | "above" => Some(Edge::Top),
            "bottom" | "b" | "bt" | "south" | "s" | "down" | "d" | "under" | "below" => {
                Some(Edge::Bottom)
            }
            "right" | "r" | "rt" | "east" | "e" => Some(Edge::Right),
            "left" | "l" | "lt" | "west" | "w" => Some(Edge::Left),
            _ => None,
        }
    }

    /// The split axis this edge lies on, plus whether it is the far side.
    #[must_use]
    pub fn axis(self) -> (SplitAxis, bool) {
        match self {
            Edge::Top => (SplitAxis::Vertical, false),
            Edge::Bottom => (SplitAxis::Vertical, true),
            Edge::Right => (SplitAxis::Horizontal, true),
            Edge::Left => (SplitAxis::Horizontal, false),
        }
    }
}

/// Recognize a bare axis name.
#[must_use]
pub fn parse_axis(arg: &str) -> Option<SplitAxis> {
    match arg {
        "v" | "vertical" | "vert" => Some(SplitAxis::Vertical),
        "h" | "horizontal" | "horz" => Some(SplitAxis::Horizontal),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_parse_with_aliases() {
        assert_eq!(Edge::parse("top"), Some(Edge::Top));
        assert_eq!(Edge::parse("N"), Some(Edge::Top));
        assert_eq!(Edge::parse("b"), Some(Edge::Bottom));
        assert_eq!(Edge::parse("under"), Some(Edge::Bottom));
        assert_eq!(Edge::parse("rt"), Some(Edge::Right));
        assert_eq!(Edge::parse("w"), Some(Edge::Left));
        assert_eq!(Edge::parse("middle"), None);
    }

    #[test]
    fn edge_axes_and_negation() {
        assert_eq!(Edge::Top.axis(), (SplitAxis::Vertical, false));
        assert_eq!(Edge::Bottom.axis(), (SplitAxis::Vertical, true));
        assert_eq!(Edge::Right.axis(), (SplitAxis::Horizontal, true));
        assert_eq!(Edge::Left.axis(), (SplitAxis::Horizontal, false));
    }

    #[test]
    fn axes_parse_without_edge_fallback() {
        assert_eq!(parse_axis("vert"), Some(SplitAxis::Vertical));
        assert_eq!(parse_axis("h"), Some(SplitAxis::Horizontal));
        assert_eq!(parse_axis("top"), None);
    }
}
