//! The windowgram value type and its format conversions.
//!
//! Formats, from the outside in:
//!
//! | Form   | Example                  | Description                                 |
//! |--------|--------------------------|---------------------------------------------|
//! | Raw    | `"12\n34 # note\n"`      | File input; may carry comments and padding  |
//! | Text   | `"12\n34\n"`             | Purified lines, newline-terminated          |
//! | Lines  | `["12", "34"]`           | Rows without delimiters                     |
//! | Chars  | `[['1','2'],['3','4']]`  | Cell grid                                   |
//! | Parsed | `{'1': GridRect, ...}`   | Pane id to bounding rectangle, 1-indexed    |
//!
//! A [`Windowgram`] is replaced, never mutated: every transform returns a new
//! value. Callers hold the current windowgram in a variable they reassign.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::alphabet;
use crate::geometry::GridRect;

/// Parse failures for windowgram text. Lines are reported 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowgramError {
    /// A character outside the pane alphabet (or mask alphabet in mask mode).
    InvalidCharacter { line: usize },
    /// A row whose width differs from the rows before it.
    RaggedWidth { line: usize },
    /// No panes at all.
    Empty,
}

impl fmt::Display for WindowgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { line } => {
                write!(f, "windowgram line {line} contains characters outside [0-9a-zA-Z]")
            }
            Self::RaggedWidth { line } => {
                write!(f, "windowgram line {line} width does not match the preceding lines")
            }
            Self::Empty => write!(f, "windowgram contains no panes"),
        }
    }
}

impl std::error::Error for WindowgramError {}

/// Failures when securing a fresh pane id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneIdError {
    /// Every identifier in the alphabet is in use.
    Exhausted,
    /// The requested identifier is not in the alphabet.
    Invalid { id: char },
    /// The requested identifier is already used by the windowgram.
    InUse { id: char },
}

impl fmt::Display for PaneIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "All pane identifiers have been used"),
            Self::Invalid { .. } => write!(f, "Invalid pane identifier"),
            Self::InUse { id } => write!(f, "Pane id `{id}` is in use"),
        }
    }
}

impl std::error::Error for PaneIdError {}

/// Pane id to bounding rectangle.
pub type ParsedPanes = FxHashMap<char, GridRect>;

/// Strip a line's trailing comment and surrounding whitespace.
fn strip_line(line: &str) -> &str {
    let line = match line.find('#') {
        Some(ix) => &line[..ix],
        None => line,
    };
    line.trim()
}

fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    if text.is_empty() {
        text.push('\n');
    }
    text
}

/// Strip comments and whitespace and re-serialize, one row per line.
///
/// Idempotent: purifying already purified text is the identity.
#[must_use]
pub fn purify(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .lines()
        .map(strip_line)
        .filter(|line| !line.is_empty())
        .collect();
    join_lines(&lines)
}

/// A windowgram: purified text in which every cell names a pane.
///
/// Mask-mode windowgrams additionally admit the reserved mask symbols; they
/// exist only inside the mosaic machinery and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Windowgram {
    text: String,
    extend: bool,
}

impl Windowgram {
    /// Import raw text, stripping comments and whitespace.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self { text: purify(raw), extend: false }
    }

    /// Import raw text in mask mode.
    #[must_use]
    pub fn new_mask(raw: &str) -> Self {
        Self { text: purify(raw), extend: true }
    }

    /// Build from rows.
    #[must_use]
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self::new(&join_lines(lines))
    }

    /// Build from a cell grid.
    #[must_use]
    pub fn from_chars(grid: &[Vec<char>]) -> Self {
        let lines: Vec<String> = grid.iter().map(|row| row.iter().collect()).collect();
        Self::from_lines(&lines)
    }

    /// Build from a cell grid in mask mode.
    #[must_use]
    pub fn from_chars_mask(grid: &[Vec<char>]) -> Self {
        let lines: Vec<String> = grid.iter().map(|row| row.iter().collect()).collect();
        Self { text: purify(&join_lines(&lines)), extend: true }
    }

    /// Paint parsed rectangles back into text.
    ///
    /// Panes with any zero metric are skipped; the scale engine reports those
    /// as lost. Cells covered by no rectangle come out transparent, which a
    /// later parse rejects unless the windowgram is in mask mode.
    #[must_use]
    pub fn from_parsed(parsed: &ParsedPanes) -> Self {
        let mut grid: Vec<Vec<char>> = Vec::new();
        let mut ids: Vec<char> = parsed.keys().copied().collect();
        ids.sort_by_key(|&ch| alphabet::ordinal(ch, true));
        for id in ids {
            let rect = parsed[&id];
            if rect.is_absent() {
                continue;
            }
            for y in rect.y..rect.bottom() {
                let row = y as usize - 1;
                while grid.len() <= row {
                    grid.push(Vec::new());
                }
                for x in rect.x..rect.right() {
                    let col = x as usize - 1;
                    while grid[row].len() <= col {
                        grid[row].push(alphabet::MASK_TRANSPARENT);
                    }
                    grid[row][col] = id;
                }
            }
        }
        Self::from_chars(&grid)
    }

    /// The purified text, newline-terminated.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the reserved mask symbols are admitted.
    #[inline]
    #[must_use]
    pub fn is_mask(&self) -> bool {
        self.extend
    }

    /// Rows of the grid.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().filter(|line| !line.is_empty()).collect()
    }

    /// The cell grid.
    #[must_use]
    pub fn char_grid(&self) -> Vec<Vec<char>> {
        self.lines().iter().map(|line| line.chars().collect()).collect()
    }

    /// Width and height in cells; (0, 0) when blank.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        let lines = self.lines();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        (width as u16, lines.len() as u16)
    }

    /// True when the grid has no cells.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        let (w, h) = self.size();
        w == 0 || h == 0
    }

    /// Parse into pane bounding rectangles.
    ///
    /// This is a bounding-box projection, not a fill check: a pane's box may
    /// contain cells belonging to other panes. That condition is what the
    /// layout analyzer reports as an overlap.
    pub fn parse(&self) -> Result<ParsedPanes, WindowgramError> {
        let mut parsed = ParsedPanes::default();
        let mut width = 0usize;
        for (row, line) in self.lines().iter().enumerate() {
            for ch in line.chars() {
                if !alphabet::valid_pane(ch, self.extend) {
                    return Err(WindowgramError::InvalidCharacter { line: row + 1 });
                }
            }
            let len = line.chars().count();
            if row == 0 {
                width = len;
            } else if len != width {
                return Err(WindowgramError::RaggedWidth { line: row + 1 });
            }
            let y = row as u16 + 1;
            for (col, ch) in line.chars().enumerate() {
                let x = col as u16 + 1;
                parsed
                    .entry(ch)
                    .and_modify(|rect| *rect = rect.union(&GridRect::new(x, y, 1, 1)))
                    .or_insert_with(|| GridRect::new(x, y, 1, 1));
            }
        }
        if parsed.is_empty() {
            return Err(WindowgramError::Empty);
        }
        Ok(parsed)
    }

    /// The used/unused partition of the alphabet, in canonical order.
    #[must_use]
    pub fn used_unused(&self) -> (String, String) {
        let mut used = String::new();
        let mut unused = String::new();
        for ch in alphabet::symbols(self.extend) {
            if self.text.contains(ch) {
                used.push(ch);
            } else {
                unused.push(ch);
            }
        }
        (used, unused)
    }

    /// True when the pane occurs anywhere in the grid.
    #[inline]
    #[must_use]
    pub fn has_pane(&self, pane: char) -> bool {
        self.text.contains(pane)
    }

    /// First unused pane id, or `preferred` when it is valid and free.
    pub fn new_pane_id(&self, preferred: Option<char>) -> Result<char, PaneIdError> {
        let (_, unused) = self.used_unused();
        let Some(first) = unused.chars().next() else {
            return Err(PaneIdError::Exhausted);
        };
        match preferred {
            None => Ok(first),
            Some(id) if !alphabet::valid_pane(id, self.extend) => Err(PaneIdError::Invalid { id }),
            Some(id) if !unused.contains(id) => Err(PaneIdError::InUse { id }),
            Some(id) => Ok(id),
        }
    }

    /// Inclusive corners (x1, y1, x2, y2) of a pane's bounding box; zeros
    /// when the pane is absent.
    #[must_use]
    pub fn pane_corners(&self, pane: char) -> (u16, u16, u16, u16) {
        self.pane_rect(pane).corners()
    }

    /// Bounding rectangle of a pane; the all-zero rectangle when absent.
    #[must_use]
    pub fn pane_rect(&self, pane: char) -> GridRect {
        let mut rect = GridRect::ABSENT;
        for (row, line) in self.lines().iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == pane {
                    let cell = GridRect::new(col as u16 + 1, row as u16 + 1, 1, 1);
                    rect = rect.union(&cell);
                }
            }
        }
        rect
    }

    /// Relabel every occurrence of the given panes to one target id.
    ///
    /// No validity checking; callers are expected to have vetted the result.
    #[must_use]
    pub fn rename_panes(&self, panes: &str, target: char) -> Windowgram {
        let text: String = self
            .text
            .chars()
            .map(|ch| if ch != '\n' && panes.contains(ch) { target } else { ch })
            .collect();
        Windowgram { text: purify(&text), extend: self.extend }
    }

    /// Distinct pane ids under the mask-one cells of a same-size mask, in
    /// canonical order.
    #[must_use]
    pub fn panes_from_mask(&self, mask: &Windowgram) -> String {
        let mut covered = String::new();
        for (row, mask_row) in self.char_grid().iter().zip(mask.char_grid()) {
            for (&ch, &m) in row.iter().zip(mask_row.iter()) {
                if m == alphabet::MASK_ONE && !covered.contains(ch) {
                    covered.push(ch);
                }
            }
        }
        let mut ordered: Vec<char> = covered.chars().collect();
        ordered.sort_by_key(|&ch| alphabet::ordinal(ch, self.extend));
        ordered.into_iter().collect()
    }
}
