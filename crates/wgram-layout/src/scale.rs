//! Windowgram scaling.
//!
//! Two variants exist. Corner rounding ([`scale`]) maps each pane's corner
//! coordinates independently and recomputes width/height from the mapped
//! corners; nearest-neighbor resampling ([`scale_resample`]) picks a source
//! cell per target cell. They can disagree on how many panes a downscale
//! loses; corner rounding is the accuracy-preferred variant and the one the
//! commands use.

use wgram_core::windowgram::ParsedPanes;
use wgram_core::{GridRect, Windowgram, WindowgramError, panes};

/// Attempt bound for the exactness retry loop.
const EXACT_RETRY_LIMIT: u32 = 16;

/// Scale a windowgram to the target character resolution (corner rounding).
///
/// Panes whose mapped width or height collapses to zero vanish from the
/// result; callers report them via [`lost_panes`].
pub fn scale(wg: &Windowgram, w: u16, h: u16) -> Result<Windowgram, WindowgramError> {
    let parsed = wg.parse()?;
    let (from_w, from_h) = wg.size();
    let ax = f64::from(w) / f64::from(from_w);
    let ay = f64::from(h) / f64::from(from_h);
    let mut scaled = ParsedPanes::default();
    for (&id, rect) in &parsed {
        let x2 = scale_coord(rect.x + rect.w, ax);
        let y2 = scale_coord(rect.y + rect.h, ay);
        let x = scale_coord(rect.x, ax);
        let y = scale_coord(rect.y, ay);
        scaled.insert(id, GridRect::new(x, y, x2 - x, y2 - y));
    }
    Ok(Windowgram::from_parsed(&scaled))
}

/// Map one corner coordinate. The grid is 1-indexed, so the coordinate is
/// shifted to a zero base, multiplied, rounded half-up, and shifted back.
fn scale_coord(coordinate: u16, multiplier: f64) -> u16 {
    let value = f64::from(coordinate - 1) * multiplier;
    let whole = value.trunc();
    let frac = value - whole;
    let rounded = if frac >= 0.5 { whole + 1.0 } else { whole };
    rounded as u16 + 1
}

/// Scale by nearest-neighbor cell resampling.
///
/// Simpler than corner rounding but can lose panes the other variant keeps.
#[must_use]
pub fn scale_resample(wg: &Windowgram, w: u16, h: u16) -> Windowgram {
    let (from_w, from_h) = wg.size();
    if from_w == 0 || from_h == 0 {
        return wg.clone();
    }
    let x_mul = f64::from(w) / f64::from(from_w);
    let y_mul = f64::from(h) / f64::from(from_h);
    let source = wg.char_grid();
    let mut grid = Vec::with_capacity(h as usize);
    for y in 0..h {
        let sy = (f64::from(y) / y_mul) as usize;
        let mut row = Vec::with_capacity(w as usize);
        for x in 0..w {
            let sx = (f64::from(x) / x_mul) as usize;
            row.push(source[sy][sx]);
        }
        grid.push(row);
    }
    Windowgram::from_chars(&grid)
}

/// Scale until `pane` measures exactly `pane_w` by `pane_h`.
///
/// Corner rounding can miss an exact size by one character for a specific
/// pane, which matters when that pane is about to be subdivided into a grid.
/// This rescales the whole windowgram, nudging the requested dimensions by
/// one character toward the observed error, until the pane matches or the
/// attempt bound is reached; the last attempt is returned either way.
pub fn scale_exact(
    wg: &Windowgram,
    w: u16,
    h: u16,
    pane: char,
    pane_w: u16,
    pane_h: u16,
) -> Result<Windowgram, WindowgramError> {
    let measured = wg.has_pane(pane);
    let mut tries = if measured { EXACT_RETRY_LIMIT } else { 1 };
    let (mut try_w, mut try_h) = (w, h);
    loop {
        let result = scale(wg, try_w, try_h)?;
        tries -= 1;
        if !measured || tries == 0 {
            return Ok(result);
        }
        let rect = result.pane_rect(pane);
        if rect.w == pane_w && rect.h == pane_h {
            return Ok(result);
        }
        try_w = nudge(try_w, rect.w, pane_w);
        try_h = nudge(try_h, rect.h, pane_h);
    }
}

fn nudge(request: u16, got: u16, want: u16) -> u16 {
    if got < want {
        request.saturating_add(1)
    } else if got > want {
        request.saturating_sub(1)
    } else {
        request
    }
}

/// Panes present before a scale but gone after it, in canonical order.
#[must_use]
pub fn lost_panes(before: &Windowgram, after: &Windowgram) -> String {
    panes::diff_lost(before, after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upscale_single_pane() {
        let wg = Windowgram::new("1\n");
        let scaled = scale(&wg, 25, 10).unwrap();
        assert_eq!(scaled.size(), (25, 10));
        let (used, _) = scaled.used_unused();
        assert_eq!(used, "1");
    }

    #[test]
    fn upscale_preserves_proportions() {
        let wg = Windowgram::new("12\n34\n");
        let scaled = scale(&wg, 4, 4).unwrap();
        assert_eq!(scaled.as_str(), "1122\n1122\n3344\n3344\n");
    }

    #[test]
    fn downscale_loses_panes_and_reports_them() {
        let wg = Windowgram::new("123\n456\n789\n");
        let scaled = scale(&wg, 2, 2).unwrap();
        assert_eq!(scaled.size(), (2, 2));
        let lost = lost_panes(&wg, &scaled);
        assert_eq!(lost.chars().count(), 5);
        // Shrinking back up cannot resurrect panes.
        let back = scale(&scaled, 3, 3).unwrap();
        let (used_back, _) = back.used_unused();
        assert_eq!(lost_panes(&scaled, &back), "");
        assert!(used_back.chars().count() <= 9);
    }

    #[test]
    fn corner_rounding_and_resampling_can_disagree() {
        // A 2x2 grid pushed through 3x3 then 2x2: corner rounding keeps all
        // four panes, resampling does not.
        let wg = Windowgram::new("12\n34\n");
        let via_corners = scale(&scale(&wg, 3, 3).unwrap(), 2, 2).unwrap();
        let (used, _) = via_corners.used_unused();
        assert_eq!(used, "1234");
        let via_resample = scale_resample(&scale_resample(&wg, 3, 3), 2, 2);
        let (used, _) = via_resample.used_unused();
        assert!(used.chars().count() < 4);
    }

    #[test]
    fn resample_repeats_cells() {
        let wg = Windowgram::new("12\n");
        assert_eq!(scale_resample(&wg, 4, 1).as_str(), "1122\n");
        assert_eq!(scale_resample(&wg, 2, 2).as_str(), "12\n12\n");
    }

    #[test]
    fn exact_scale_hits_the_requested_pane_size() {
        // Grow pane 1 of a 3x3 arrangement until it is exactly 4x4.
        let wg = Windowgram::new("123\n456\n789\n");
        let result = scale_exact(&wg, 12, 12, '5', 4, 4).unwrap();
        let rect = result.pane_rect('5');
        assert_eq!((rect.w, rect.h), (4, 4));
    }

    #[test]
    fn exact_scale_without_the_pane_scales_once() {
        let wg = Windowgram::new("11\n22\n");
        let result = scale_exact(&wg, 6, 6, 'z', 3, 3).unwrap();
        assert_eq!(result.size(), (6, 6));
    }

    #[test]
    fn scale_to_zero_is_blank() {
        let wg = Windowgram::new("12\n34\n");
        let scaled = scale(&wg, 0, 0).unwrap();
        assert!(scaled.is_blank());
    }
}
