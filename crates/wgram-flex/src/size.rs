//! Size argument resolution.
//!
//! Sizes arrive as absolute character counts (`12`), percentages (`50%`), or
//! multipliers (`2x`, `2X`, `2*`), and are resolved against a per-command
//! baseline length by truncation.

/// One parsed size token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeArg {
    Characters(u16),
    Percentage(f64),
    Multiplier(f64),
}

/// Digits-and-dot prefix, the only numeric shape sizes accept.
fn numeric_prefix(text: &str) -> Option<f64> {
    if text.is_empty() || !text.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        return None;
    }
    text.parse().ok()
}

impl SizeArg {
    /// Parse one size token; `None` when malformed.
    #[must_use]
    pub fn parse(arg: &str) -> Option<SizeArg> {
        if let Some(prefix) = arg.strip_suffix(['x', 'X', '*']) {
            return numeric_prefix(prefix).map(SizeArg::Multiplier);
        }
        if let Some(prefix) = arg.strip_suffix('%') {
            return numeric_prefix(prefix).map(SizeArg::Percentage);
        }
        if !arg.is_empty() && arg.chars().all(|ch| ch.is_ascii_digit()) {
            return arg.parse().ok().map(SizeArg::Characters);
        }
        None
    }

    /// Resolve to characters against a baseline length, truncating.
    #[must_use]
    pub fn to_characters(&self, base: u16) -> u16 {
        match self {
            SizeArg::Characters(n) => *n,
            SizeArg::Percentage(p) => (f64::from(base) * p / 100.0) as u16,
            SizeArg::Multiplier(m) => (f64::from(base) * m) as u16,
        }
    }

    /// True when the size meets or exceeds the full baseline.
    #[must_use]
    pub fn at_least_base(&self, base: u16) -> bool {
        match self {
            SizeArg::Characters(n) => *n >= base,
            SizeArg::Percentage(p) => *p >= 100.0,
            SizeArg::Multiplier(m) => *m >= 1.0,
        }
    }

    /// The spelling of the baseline in this argument's unit, for messages.
    #[must_use]
    pub fn base_display(&self, base: u16) -> String {
        match self {
            SizeArg::Characters(_) => base.to_string(),
            SizeArg::Percentage(_) => "100%".to_string(),
            SizeArg::Multiplier(_) => "1x".to_string(),
        }
    }
}

/// Split a combined `WxH`-style token into its two size tokens.
///
/// Accepts a colon (`64:36`) or a times separator (`64x36`), including the
/// ambiguous multiplier forms (`2xx2x`, `200%x2x`, `2xx200%`). A token with
/// no separator applies to both axes.
#[must_use]
pub fn split_size_pair(arg: &str) -> (String, String) {
    if arg.matches(':').count() == 1 {
        if let Some((w, h)) = arg.split_once(':') {
            return (w.to_string(), h.to_string());
        }
    } else if arg.contains('x') {
        let count = arg.matches('x').count();
        let ends_x = arg.ends_with('x');
        if count == 1 && !ends_x {
            if let Some((w, h)) = arg.split_once('x') {
                return (w.to_string(), h.to_string());
            }
        }
        if count == 2 {
            if ends_x {
                if let Some((w, h)) = arg.split_once('x') {
                    return (w.to_string(), h.to_string());
                }
            } else if let Some((w, h)) = arg.rsplit_once('x') {
                return (w.to_string(), h.to_string());
            }
        }
        if count == 3 && ends_x {
            let mut pieces = arg.splitn(3, 'x');
            if let (Some(first), Some(_), Some(rest)) = (pieces.next(), pieces.next(), pieces.next())
            {
                return (format!("{first}x"), rest.to_string());
            }
        }
    }
    (arg.to_string(), arg.to_string())
}
