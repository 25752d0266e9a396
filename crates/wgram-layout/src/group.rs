//! Contiguous-group validation.
//!
//! Before a set of panes can be collapsed into one, the set must fill its
//! own bounding rectangle exactly. The validator masks the set, scans the
//! mask's bounding rectangle for foreign panes, and folds any it finds back
//! into the set until the scan converges; what accumulated is the deficit
//! the caller would need to add.

use wgram_core::alphabet::MASK_ONE;
use wgram_core::{Windowgram, WindowgramError, mask_from_panes, panes};

/// Outcome of grouping a set of panes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupStatus {
    /// The set is exactly a filled rectangle, safe to collapse.
    Success,
    /// A requested pane is not a used pane of the windowgram.
    InvalidPanes,
    /// The set has gaps; `suggestions` is the full set of panes that would
    /// complete it, in canonical order.
    InsufficientPanes { suggestions: String },
}

/// Validate that a pane set forms a filled contiguous rectangle.
pub fn group(wg: &Windowgram, pane_set: &str) -> Result<GroupStatus, WindowgramError> {
    let (used, _) = wg.used_unused();
    for pane in pane_set.chars() {
        if !used.contains(pane) {
            return Ok(GroupStatus::InvalidPanes);
        }
    }

    let grid = wg.char_grid();
    let mut members = panes::assimilated_sorted(pane_set, "");
    let mut suggestions = String::new();
    loop {
        let mask = mask_from_panes(wg, &members)?;
        let (x1, y1, x2, y2) = mask.pane_corners(MASK_ONE);
        let mut deficit = String::new();
        for (row, line) in grid.iter().enumerate() {
            let y = row as u16 + 1;
            for (col, &ch) in line.iter().enumerate() {
                let x = col as u16 + 1;
                if x >= x1 && x <= x2 && y >= y1 && y <= y2 {
                    if !members.contains(ch) && !deficit.contains(ch) {
                        deficit.push(ch);
                    }
                }
            }
        }
        if deficit.is_empty() {
            break;
        }
        // The bounding rectangle may grow as the deficit folds in.
        members = panes::assimilated_sorted(&members, &deficit);
        suggestions = panes::assimilated_sorted(&suggestions, &deficit);
    }

    if suggestions.is_empty() {
        Ok(GroupStatus::Success)
    } else {
        Ok(GroupStatus::InsufficientPanes { suggestions })
    }
}
