//! Ordered pane-list helpers.
//!
//! Pane sets travel as strings kept in canonical alphabet order, matching the
//! windowgram file format where a set of ids is written as a run of symbols.

use crate::alphabet;
use crate::windowgram::Windowgram;

/// Panes used by `before` but not by `after`, in canonical order.
#[must_use]
pub fn diff_lost(before: &Windowgram, after: &Windowgram) -> String {
    let (used_before, _) = before.used_unused();
    let (used_after, _) = after.used_unused();
    used_before.chars().filter(|&ch| !used_after.contains(ch)).collect()
}

/// Move the given panes (where present) from `from` into `to`.
///
/// Both lists come back in canonical order.
#[must_use]
pub fn move_panes(from: &str, to: &str, panes: &str) -> (String, String) {
    let mut from = from.to_string();
    let mut to = to.to_string();
    for pane in panes.chars() {
        if alphabet::is_pane(pane) && (from.contains(pane) || !to.contains(pane)) {
            from = alphabet::symbols(false)
                .filter(|&ch| from.contains(ch) && ch != pane)
                .collect();
            to = alphabet::symbols(false)
                .filter(|&ch| to.contains(ch) || ch == pane)
                .collect();
        }
    }
    (from, to)
}

/// Union of two pane lists, in canonical order.
#[must_use]
pub fn assimilated_sorted(a: &str, b: &str) -> String {
    alphabet::symbols(false)
        .filter(|&ch| a.contains(ch) || b.contains(ch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_lost_reports_vanished_panes() {
        let before = Windowgram::new("12\n34\n");
        let after = Windowgram::new("11\n33\n");
        assert_eq!(diff_lost(&before, &after), "24");
        assert_eq!(diff_lost(&after, &before), "");
    }

    #[test]
    fn move_panes_keeps_canonical_order() {
        let (from, to) = move_panes("0129", "ab", "91");
        assert_eq!(from, "02");
        assert_eq!(to, "19ab");
    }

    #[test]
    fn move_panes_ignores_absent_and_invalid() {
        let (from, to) = move_panes("01", "2", "@2");
        assert_eq!(from, "01");
        assert_eq!(to, "2");
    }

    #[test]
    fn assimilated_sorted_unions() {
        assert_eq!(assimilated_sorted("zA", "0z"), "0zA");
    }
}
