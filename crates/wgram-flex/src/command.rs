//! The flex command set.
//!
//! Commands are a closed enum dispatched through one match; the mapping from
//! prompt strings to variants lives at the CLI boundary. Each command
//! resolves every argument before touching the windowgram, so a rejected
//! command returns its input byte-identical alongside one Error notice.

use wgram_core::{Mosaic, MosaicLayer, Windowgram, WindowgramError, alphabet, mask_from_panes, panes};
use wgram_layout::{GroupStatus, SplitAxis, group, lost_panes, scale, scale_exact};

use crate::direction::{Edge, parse_axis};
use crate::notice::{FlexResult, Notice};
use crate::size::SizeArg;

/// One windowgram mutation.
///
/// Size and pane arguments stay as the user's tokens; commands resolve them
/// against the windowgram during validation so failures surface as notices
/// rather than parse errors at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlexCommand {
    /// Scale the windowgram to a new character resolution.
    Scale { width: String, height: String },
    /// Append a new pane along one windowgram edge.
    Add { edge: String, size: String, pane: Option<String> },
    /// Break a pane into a grid of new panes.
    Break { pane: String, grid: String, new_panes: Option<String> },
    /// Join contiguous groups of panes, each into a single pane.
    Join { groups: Vec<String> },
    /// Split one pane on an axis or from an edge.
    Split { pane: String, how: String, size: Option<String>, new_panes: Option<String> },
    /// Relabel panes, paired as from/to.
    Rename { pairs: Vec<String> },
    /// Exchange panes, paired as from/to.
    Swap { pairs: Vec<String> },
    /// Reverse horizontally.
    Mirror,
    /// Reverse vertically.
    Flip,
}

impl FlexCommand {
    /// The command's name as entered at the prompt.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scale { .. } => "scale",
            Self::Add { .. } => "add",
            Self::Break { .. } => "break",
            Self::Join { .. } => "join",
            Self::Split { .. } => "split",
            Self::Rename { .. } => "rename",
            Self::Swap { .. } => "swap",
            Self::Mirror => "mirror",
            Self::Flip => "flip",
        }
    }
}

/// Apply one command, returning the new windowgram or the unchanged input
/// with an Error notice.
#[must_use]
pub fn apply(wg: &Windowgram, command: &FlexCommand) -> FlexResult {
    #[cfg(feature = "tracing")]
    tracing::debug!(command = command.name(), "applying flex command");
    let outcome = match command {
        FlexCommand::Scale { width, height } => scale_command(wg, width, height),
        FlexCommand::Add { edge, size, pane } => add_command(wg, edge, size, pane.as_deref()),
        FlexCommand::Break { pane, grid, new_panes } => {
            break_command(wg, pane, grid, new_panes.as_deref())
        }
        FlexCommand::Join { groups } => join_command(wg, groups),
        FlexCommand::Split { pane, how, size, new_panes } => {
            split_command(wg, pane, how, size.as_deref(), new_panes.as_deref())
        }
        FlexCommand::Rename { pairs } => rename_command(wg, pairs),
        FlexCommand::Swap { pairs } => swap_command(wg, pairs),
        FlexCommand::Mirror => mirror_command(wg),
        FlexCommand::Flip => flip_command(wg),
    };
    match outcome {
        Ok((windowgram, notices)) => FlexResult { windowgram, notices },
        Err(notice) => FlexResult { windowgram: wg.clone(), notices: vec![notice] },
    }
}

type CmdResult = Result<(Windowgram, Vec<Notice>), Notice>;

fn core_error(err: WindowgramError) -> Notice {
    Notice::error(err.to_string())
}

fn resolve_size(arg: &str, base: u16) -> Result<u16, Notice> {
    match SizeArg::parse(arg) {
        Some(size) => Ok(size.to_characters(base)),
        None => Err(Notice::error(format!("Invalid size parameter: {arg}"))),
    }
}

fn single_char(arg: &str) -> Option<char> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

fn dedupe_first_seen(chars: impl Iterator<Item = char>) -> String {
    let mut out = String::new();
    for ch in chars {
        if !out.contains(ch) {
            out.push(ch);
        }
    }
    out
}

fn panes_in_use_message(panes_in_use: &str) -> Option<String> {
    if panes_in_use.is_empty() {
        return None;
    }
    let plural = panes_in_use.chars().count() > 1;
    Some(format!(
        "Specified pane{} ({}) {} already in use",
        if plural { "s" } else { "" },
        panes_in_use,
        if plural { "are" } else { "is" },
    ))
}

/// Rebuild the unused pane list so allocation starts at the caller's
/// requested ids and continues from the highest of them, wrapping around.
fn rebuild_preferential(used: &str, unused: &str, new_panes: &str) -> (String, String) {
    let mut work = unused.to_string();
    let mut used = used.to_string();
    let mut head = String::new();
    let mut last: Option<char> = None;
    for ch in new_panes.chars() {
        if alphabet::is_pane(ch) {
            last = Some(ch);
        }
        if work.contains(ch) && !used.contains(ch) {
            head.push(ch);
        }
    }
    let (moved_work, moved_used) = panes::move_panes(&work, &used, &head);
    work = moved_work;
    used = moved_used;

    let mut rotate = 0;
    if let Some(last) = last {
        let last_ord = alphabet::ordinal(last, false).unwrap_or(0);
        for (ix, ch) in work.chars().enumerate() {
            if alphabet::ordinal(ch, false).unwrap_or(0) >= last_ord {
                rotate = ix;
                break;
            }
        }
    }
    let chars: Vec<char> = work.chars().collect();
    let rotated: String = chars[rotate..].iter().chain(chars[..rotate].iter()).collect();
    (used, format!("{head}{rotated}"))
}

// ---------------------------------------------------------------------------
// scale
// ---------------------------------------------------------------------------

fn scale_command(wg: &Windowgram, width: &str, height: &str) -> CmdResult {
    let (from_w, from_h) = wg.size();
    let w = resolve_size(width, from_w)?;
    let h = resolve_size(height, from_h)?;
    let scaled = scale(wg, w, h).map_err(core_error)?;
    let (got_w, got_h) = scaled.size();
    if got_w == 0 || got_h == 0 {
        return Err(Notice::error("Scale produced a blank windowgram, skipping"));
    }
    if got_w != w || got_h != h {
        return Err(Notice::error("Scale produced an erroneous result, skipping"));
    }
    let lost = lost_panes(wg, &scaled);
    let mut notices = Vec::new();
    if !lost.is_empty() {
        notices.push(Notice::warning(format!(
            "Lost {} panes: {}",
            lost.chars().count(),
            lost
        )));
    }
    Ok((scaled, notices))
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

fn add_command(wg: &Windowgram, edge: &str, size: &str, pane: Option<&str>) -> CmdResult {
    let preferred = match pane {
        None => None,
        Some(arg) => match single_char(arg) {
            Some(ch) => Some(ch),
            None => {
                return Err(Notice::error(
                    "Unable to secure a new pane id: Invalid pane identifier",
                ));
            }
        },
    };
    let pane = wg
        .new_pane_id(preferred)
        .map_err(|err| Notice::error(format!("Unable to secure a new pane id: {err}")))?;
    let Some(edge) = Edge::parse(edge) else {
        return Err(Notice::error(
            "The edge you specified is invalid, please specify either: top, bottom, left, or right",
        ));
    };

    let mut lines: Vec<String> = wg.lines().iter().map(|&line| line.to_string()).collect();
    let height = lines.len();
    let width = lines.first().map(|line| line.chars().count()).unwrap_or(0);
    let axis_length = match edge {
        Edge::Top | Edge::Bottom => height as u16,
        Edge::Right | Edge::Left => width as u16,
    };
    let size_chars = resolve_size(size, axis_length)?;
    match edge {
        Edge::Top => {
            for _ in 0..size_chars {
                lines.insert(0, pane.to_string().repeat(width));
            }
        }
        Edge::Bottom => {
            for _ in 0..size_chars {
                lines.push(pane.to_string().repeat(width));
            }
        }
        Edge::Right => {
            let suffix = pane.to_string().repeat(size_chars as usize);
            lines = lines.iter().map(|line| format!("{line}{suffix}")).collect();
        }
        Edge::Left => {
            let prefix = pane.to_string().repeat(size_chars as usize);
            lines = lines.iter().map(|line| format!("{prefix}{line}")).collect();
        }
    }
    let updated = Windowgram::from_lines(&lines);
    if updated.as_str() == wg.as_str() {
        return Ok((wg.clone(), vec![Notice::warning("Addition was too small to register")]));
    }
    Ok((updated, vec![]))
}

// ---------------------------------------------------------------------------
// break
// ---------------------------------------------------------------------------

fn parse_grid(grid: &str) -> Option<(u32, u32)> {
    if grid.matches('x').count() != 1 {
        return None;
    }
    let (cols, rows) = grid.split_once('x')?;
    if cols.is_empty()
        || rows.is_empty()
        || !cols.chars().all(|ch| ch.is_ascii_digit())
        || !rows.chars().all(|ch| ch.is_ascii_digit())
    {
        return None;
    }
    Some((cols.parse().ok()?, rows.parse().ok()?))
}

/// The next extent at or above `extent` evenly divisible by `step`.
fn next_multiple(extent: u16, step: u16) -> u16 {
    if extent > step {
        if extent % step != 0 { (extent / step + 1) * step } else { extent }
    } else {
        step
    }
}

fn break_command(wg: &Windowgram, pane: &str, grid: &str, new_panes: Option<&str>) -> CmdResult {
    let Some(pane) = single_char(pane).filter(|&ch| alphabet::is_pane(ch)) else {
        return Err(Notice::error("The pane you specified is invalid"));
    };
    let (used, unused) = wg.used_unused();
    if unused.contains(pane) {
        return Err(Notice::error("The pane you specified does not exist"));
    }

    // The +1 accounts for the target pane becoming available again.
    let available = unused.chars().count() + 1;
    let Some((gw, gh)) = parse_grid(grid) else {
        return Err(Notice::error(format!("Grid parameter is invalid: {grid}")));
    };
    let count = u64::from(gw) * u64::from(gh);
    if count == 0 {
        return Err(Notice::error("Grid you specified results in no panes"));
    }
    if count > alphabet::MAX_PANES as u64 {
        return Err(Notice::error(format!(
            "Grid is {count} panes, exceeding max of {}",
            alphabet::MAX_PANES
        )));
    }
    if count > available as u64 {
        return Err(Notice::error(format!(
            "Grid is {count} panes, only {available} will be available"
        )));
    }
    let (gw, gh) = (gw as u16, gh as u16);

    // Grow the windowgram until the target pane divides evenly by the grid.
    let (wg_w, wg_h) = wg.size();
    let rect = wg.pane_rect(pane);
    let pane_w = next_multiple(rect.w, gw);
    let pane_h = next_multiple(rect.h, gh);
    let target_w = (u32::from(wg_w) * u32::from(pane_w) / u32::from(rect.w)) as u16;
    let target_h = (u32::from(wg_h) * u32::from(pane_h) / u32::from(rect.h)) as u16;
    let scaled = scale_exact(wg, target_w, target_h, pane, pane_w, pane_h).map_err(core_error)?;
    let rect = scaled.pane_rect(pane);
    if rect.w != pane_w || rect.h != pane_h {
        return Err(Notice::error("The result is not the expected pane size"));
    }

    let (used, mut unused) = panes::move_panes(&used, &unused, &pane.to_string());
    if let Some(seq) = new_panes {
        let in_use: String = seq
            .chars()
            .filter(|&ch| !unused.contains(ch) && ch != pane)
            .collect();
        if let Some(message) = panes_in_use_message(&in_use) {
            return Err(Notice::error(message));
        }
        let (_, reordered) = rebuild_preferential(&used, &unused, seq);
        unused = reordered;
    }

    let replacements: Vec<char> = unused.chars().collect();
    let lines: Vec<String> = scaled
        .lines()
        .iter()
        .enumerate()
        .map(|(iy, line)| {
            line.chars()
                .enumerate()
                .map(|(ix, ch)| {
                    if ch != pane {
                        return ch;
                    }
                    let row_off = iy as u32 + 1 - u32::from(rect.y);
                    let col_off = ix as u32 + 1 - u32::from(rect.x);
                    let index = (row_off * u32::from(gh) / u32::from(rect.h)) * u32::from(gw)
                        + col_off * u32::from(gw) / u32::from(rect.w);
                    replacements[index as usize]
                })
                .collect()
        })
        .collect();
    Ok((Windowgram::from_lines(&lines), vec![]))
}

// ---------------------------------------------------------------------------
// join
// ---------------------------------------------------------------------------

fn join_command(wg: &Windowgram, group_args: &[String]) -> CmdResult {
    if group_args.is_empty() {
        return Err(Notice::error("Please specify at least one group to join"));
    }
    let describe = |ix: usize| format!("{} (\"{}\")", ix + 1, group_args[ix]);

    // Repackage so every group carries a rename target, then vet the groups.
    let mut groups: Vec<(String, char)> = Vec::new();
    let mut clipped = String::new();
    for (ix, raw) in group_args.iter().enumerate() {
        let wrap = |msg: String| Notice::error(format!("Error with argument {}: {msg}", describe(ix)));
        if raw.matches('.').count() > 1 {
            return Err(wrap("Argument contains more than one rename delimiter".into()));
        }
        let invalids =
            dedupe_first_seen(raw.chars().filter(|&ch| !alphabet::is_pane(ch) && ch != '.'));
        if !invalids.is_empty() {
            return Err(wrap(format!("Group contains invalid characters: {invalids}")));
        }
        let (left, right) = match raw.split_once('.') {
            Some((left, right)) => (left.to_string(), right.to_string()),
            None => (raw.clone(), raw.chars().take(1).collect()),
        };
        let Some(target) = right.chars().next() else {
            return Err(wrap("Rename delimiter used but subsequent pane unspecified".into()));
        };
        if right.chars().count() > 1 {
            return Err(wrap("Only one pane should be specified after the rename delimiter".into()));
        }
        let left = dedupe_first_seen(left.chars());
        let mut notfound = String::new();
        for ch in alphabet::symbols(false) {
            if !left.contains(ch) {
                continue;
            }
            if clipped.contains(ch) {
                return Err(wrap(format!("Pane \"{ch}\" was already used by a previous group")));
            }
            if wg.has_pane(ch) {
                clipped.push(ch);
            } else {
                notfound.push(ch);
            }
        }
        if !notfound.is_empty() {
            let plural = if notfound.chars().count() > 1 { "(s) " } else { " " };
            return Err(wrap(format!("Windowgram does not have pane{plural}{notfound}")));
        }
        groups.push((left, target));
    }

    // Rename targets must be free once the joined panes are released.
    let (used, _) = wg.used_unused();
    let mut taken: String = used.chars().filter(|&ch| !clipped.contains(ch)).collect();
    for (ix, (_, target)) in groups.iter().enumerate() {
        if taken.contains(*target) {
            return Err(Notice::error(format!(
                "Error with argument {}: Attempting to rename to pane {target} when it's in use",
                describe(ix)
            )));
        }
        taken.push(*target);
    }

    // Each join is staged as a mosaic layer so unrelated cells are untouched.
    let mut layers = Vec::new();
    for (ix, (left, target)) in groups.iter().enumerate() {
        match group(wg, left).map_err(core_error)? {
            GroupStatus::InvalidPanes => {
                return Err(Notice::error(format!(
                    "Group #{} contains invalid panes",
                    describe(ix)
                )));
            }
            GroupStatus::InsufficientPanes { suggestions } => {
                return Err(Notice::error(format!(
                    "Group #{} isn't whole, but it would be if you add: {suggestions}",
                    describe(ix)
                )));
            }
            GroupStatus::Success => {}
        }
        let mask = mask_from_panes(wg, left).map_err(core_error)?;
        let data = wg.rename_panes(left, *target);
        layers.push(MosaicLayer { data, mask });
    }
    Ok((Mosaic { base: wg.clone(), layers }.flatten(), vec![]))
}

// ---------------------------------------------------------------------------
// split
// ---------------------------------------------------------------------------

fn split_command(
    wg: &Windowgram,
    pane: &str,
    how: &str,
    size: Option<&str>,
    new_panes: Option<&str>,
) -> CmdResult {
    let (_, unused) = wg.used_unused();
    let size_raw = size.unwrap_or("50%");

    let Some(pane) = single_char(pane).filter(|&ch| alphabet::is_pane(ch)) else {
        return Err(Notice::error("The pane you specified is invalid"));
    };
    if unused.contains(pane) {
        return Err(Notice::error("The pane you specified does not exist"));
    }

    // An axis takes the negation from the size; an edge implies it.
    let mut inverse = size_raw.starts_with('-');
    let mut show_inverse = inverse;
    let axis = match parse_axis(how) {
        Some(axis) => axis,
        None => {
            if size_raw.starts_with('-') {
                return Err(Notice::error("Negative size only valid if `how` is vert or horz"));
            }
            let Some(edge) = Edge::parse(how) else {
                return Err(Notice::error("The axis you specified is invalid"));
            };
            let (axis, negate) = edge.axis();
            inverse = negate;
            show_inverse = false;
            axis
        }
    };

    let rect = wg.pane_rect(pane);
    let axis_length = match axis {
        SplitAxis::Horizontal => rect.w,
        SplitAxis::Vertical => rect.h,
    };
    if rect.w < 2 && rect.h < 2 {
        return Err(Notice::error("Pane is too small to be split"));
    }
    if axis_length < 2 {
        return Err(Notice::error("Pane is too small to be split in that way"));
    }

    let stripped = size_raw.trim_start_matches('-');
    let Some(parsed_size) = SizeArg::parse(stripped) else {
        return Err(Notice::error(format!("Invalid size parameter: {size_raw}")));
    };
    let sign = if show_inverse { "-" } else { "" };
    if parsed_size.at_least_base(axis_length) {
        let rep = format!("{sign}{}", parsed_size.base_display(axis_length));
        return Err(Notice::error(format!(
            "Specified size ({size_raw}) is greater or equal to the maximum range ({rep}) of this function"
        )));
    }
    let mut size_chars = parsed_size.to_characters(axis_length);
    if size_chars >= axis_length {
        return Err(Notice::error(format!(
            "Resulting size ({sign}{size_chars} characters) is greater or equal to the axis length ({axis_length})"
        )));
    }
    if size_chars == 0 {
        return Err(Notice::error(format!(
            "Resulting size ({sign}{size_chars} characters) is not valid"
        )));
    }
    if inverse {
        size_chars = axis_length - size_chars;
    }

    if unused.is_empty() {
        return Err(Notice::error("Insufficient panes to split"));
    }
    let mut panes_pair = new_panes.unwrap_or_default().to_string();
    if panes_pair.is_empty() {
        if let Some(first) = unused.chars().next() {
            panes_pair.push(first);
        }
    }
    if panes_pair.chars().count() == 1 {
        panes_pair.push(pane);
    }
    if panes_pair.chars().count() > 2 {
        return Err(Notice::error("Parameter newpanes exceeds the function maximum of two panes"));
    }
    for ch in dedupe_first_seen(panes_pair.chars()).chars() {
        if !alphabet::is_pane(ch) {
            return Err(Notice::error(format!("Invalid pane in newpanes parameter: {ch}")));
        }
    }
    let in_use: String = panes_pair
        .chars()
        .filter(|&ch| !unused.contains(ch) && ch != pane)
        .collect();
    if let Some(message) = panes_in_use_message(&in_use) {
        return Err(Notice::error(message));
    }

    let mut ids = panes_pair.chars();
    let (Some(first), Some(second)) = (ids.next(), ids.next()) else {
        return Err(Notice::error("Insufficient panes to split"));
    };
    let (near, far) = if inverse { (second, first) } else { (first, second) };

    let split_col = rect.x + size_chars;
    let split_row = rect.y + size_chars;
    let lines: Vec<String> = wg
        .lines()
        .iter()
        .enumerate()
        .map(|(iy, line)| {
            line.chars()
                .enumerate()
                .map(|(ix, ch)| {
                    if ch != pane {
                        return ch;
                    }
                    match axis {
                        SplitAxis::Vertical => {
                            if (iy as u16) < split_row - 1 { near } else { far }
                        }
                        SplitAxis::Horizontal => {
                            if (ix as u16) < split_col - 1 { near } else { far }
                        }
                    }
                })
                .collect()
        })
        .collect();
    Ok((Windowgram::from_lines(&lines), vec![]))
}

// ---------------------------------------------------------------------------
// rename
// ---------------------------------------------------------------------------

/// Validate one side of the rename pairs; `seen` accumulation catches panes
/// touched by more than one pair.
fn validate_rename_side(
    pairs: &[(String, String)],
    used: &str,
    unused: &str,
    save_from: &str,
    to_side: bool,
) -> Result<String, Notice> {
    let mut seen = String::new();
    for (pair_no, (from, to)) in pairs.iter().enumerate() {
        let n = pair_no + 1;
        if from.chars().count() != to.chars().count() {
            return Err(Notice::error(format!(
                "Pair {n} count error, both <from> and <to> pane counts must be identical"
            )));
        }
        if let Some((same, _)) = from.chars().zip(to.chars()).find(|(f, t)| f == t) {
            return Err(Notice::error(format!("Pane `{same}` renames to self in pair {n}")));
        }
        let side = if to_side { to } else { from };
        for pane in side.chars() {
            if !alphabet::is_pane(pane) {
                return Err(Notice::error(format!("Invalid pane `{pane}` in pair {n}")));
            }
            if to_side {
                if seen.contains(pane) {
                    return Err(Notice::error(format!(
                        "The <to> pane `{pane}` in pair {n} was already named by another pair"
                    )));
                }
                if !unused.contains(pane) && !save_from.contains(pane) {
                    return Err(Notice::error(format!(
                        "The <to> pane `{pane}` in pair {n} is already being used"
                    )));
                }
            } else {
                if seen.contains(pane) {
                    return Err(Notice::error(format!(
                        "The <from> pane `{pane}` in pair {n} was renamed by another pair"
                    )));
                }
                if !used.contains(pane) {
                    return Err(Notice::error(format!(
                        "The <from> pane `{pane}` in pair {n} is not being used"
                    )));
                }
            }
        }
        seen.push_str(side);
    }
    Ok(seen)
}

fn pair_up(args: &[String]) -> Result<Vec<(String, String)>, Notice> {
    if args.is_empty() || args.len() % 2 != 0 {
        return Err(Notice::error("Insufficient data, every <from> must be followed by <to>"));
    }
    Ok(args
        .chunks(2)
        .map(|chunk| (chunk[0].clone(), chunk[1].clone()))
        .collect())
}

fn rename_command(wg: &Windowgram, args: &[String]) -> CmdResult {
    let pairs = pair_up(args)?;
    let (used, unused) = wg.used_unused();
    let save_from = validate_rename_side(&pairs, &used, &unused, "", false)?;
    validate_rename_side(&pairs, &used, &unused, &save_from, true)?;

    // Each single-pane rename is staged independently, then merged, so pairs
    // that exchange names cannot clobber each other.
    let mut layers = Vec::new();
    for (from, to) in &pairs {
        for (pf, pt) in from.chars().zip(to.chars()) {
            let source = pf.to_string();
            let mask = mask_from_panes(wg, &source).map_err(core_error)?;
            let data = wg.rename_panes(&source, pt);
            layers.push(MosaicLayer { data, mask });
        }
    }
    Ok((Mosaic { base: wg.clone(), layers }.flatten(), vec![]))
}

// ---------------------------------------------------------------------------
// swap
// ---------------------------------------------------------------------------

fn swap_command(wg: &Windowgram, args: &[String]) -> CmdResult {
    let pairs = pair_up(args)?;
    let (used, _) = wg.used_unused();

    let mut swapped = String::new();
    for (pair_no, (from, to)) in pairs.iter().enumerate() {
        let n = pair_no + 1;
        if from.chars().count() != to.chars().count() {
            return Err(Notice::error(format!(
                "Pair {n} count error, both <from> and <to> pane counts must be identical"
            )));
        }
        for (spot, side) in [("<from>", from), ("<to>", to)] {
            if let Some(dup) = side.chars().find(|&ch| side.matches(ch).count() > 1) {
                return Err(Notice::error(format!(
                    "Pane `{dup}` specified multiple times in {spot} of pair {n}"
                )));
            }
        }
        if let Some((same, _)) = from.chars().zip(to.chars()).find(|(f, t)| f == t) {
            return Err(Notice::error(format!("Pane `{same}` swaps to self in pair {n}")));
        }
        let spots = from
            .chars()
            .map(|ch| ("<from>", ch))
            .chain(to.chars().map(|ch| ("<to>", ch)));
        for (spot, pane) in spots {
            if !alphabet::is_pane(pane) {
                return Err(Notice::error(format!("Invalid pane `{pane}` in {spot} of pair {n}")));
            }
            if swapped.contains(pane) {
                return Err(Notice::error(format!(
                    "The {spot} pane `{pane}` in pair {n} is already swapped"
                )));
            }
            if !used.contains(pane) {
                return Err(Notice::error(format!(
                    "The {spot} pane `{pane}` in pair {n} is not being used"
                )));
            }
        }
        swapped.push_str(from);
        swapped.push_str(to);
    }

    // Both directions merge into one from/to map, applied in a single pass.
    let from_all: String = pairs.iter().map(|(f, _)| f.as_str()).collect();
    let to_all: String = pairs.iter().map(|(_, t)| t.as_str()).collect();
    let map_from: Vec<char> = format!("{from_all}{to_all}").chars().collect();
    let map_to: Vec<char> = format!("{to_all}{from_all}").chars().collect();

    let lines: Vec<String> = wg
        .lines()
        .iter()
        .map(|line| {
            line.chars()
                .map(|ch| match map_from.iter().position(|&f| f == ch) {
                    Some(pos) => map_to[pos],
                    None => ch,
                })
                .collect()
        })
        .collect();
    Ok((Windowgram::from_lines(&lines), vec![]))
}

// ---------------------------------------------------------------------------
// mirror / flip
// ---------------------------------------------------------------------------

fn mirror_command(wg: &Windowgram) -> CmdResult {
    let lines: Vec<String> = wg
        .lines()
        .iter()
        .map(|line| line.chars().rev().collect())
        .collect();
    Ok((Windowgram::from_lines(&lines), vec![]))
}

fn flip_command(wg: &Windowgram) -> CmdResult {
    let mut lines: Vec<String> = wg.lines().iter().map(|&line| line.to_string()).collect();
    lines.reverse();
    Ok((Windowgram::from_lines(&lines), vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Severity;

    fn ok(wg: &Windowgram, command: FlexCommand) -> Windowgram {
        let result = apply(wg, &command);
        assert!(
            !result.failed(),
            "command {} failed: {:?}",
            command.name(),
            result.notices
        );
        result.windowgram
    }

    fn error_message(wg: &Windowgram, command: FlexCommand) -> String {
        let result = apply(wg, &command);
        assert!(result.failed(), "command {} unexpectedly succeeded", command.name());
        assert_eq!(result.windowgram.as_str(), wg.as_str(), "failed command must not mutate");
        result.notices[0].message().to_string()
    }

    fn scale_cmd(w: &str, h: &str) -> FlexCommand {
        FlexCommand::Scale { width: w.into(), height: h.into() }
    }

    #[test]
    fn scale_to_exact_dimensions() {
        let wg = Windowgram::new("1\n");
        let scaled = ok(&wg, scale_cmd("25", "10"));
        assert_eq!(scaled.size(), (25, 10));
        assert_eq!(scaled.lines()[0], "1".repeat(25));
    }

    #[test]
    fn scale_reports_lost_panes_as_warning() {
        let wg = Windowgram::new("123\n456\n789\n");
        let result = apply(&wg, &scale_cmd("2", "2"));
        assert!(!result.failed());
        assert_eq!(result.notices.len(), 1);
        assert_eq!(result.notices[0].severity(), Severity::Warning);
        assert_eq!(result.notices[0].message(), "Lost 5 panes: 24568");
        assert_eq!(result.windowgram.as_str(), "13\n79\n");
    }

    #[test]
    fn scale_rejects_bad_size_tokens() {
        let wg = Windowgram::new("12\n");
        assert_eq!(error_message(&wg, scale_cmd("wide", "2")), "Invalid size parameter: wide");
    }

    #[test]
    fn scale_rejects_blank_results() {
        let wg = Windowgram::new("12\n");
        assert_eq!(
            error_message(&wg, scale_cmd("0", "0")),
            "Scale produced a blank windowgram, skipping"
        );
    }

    #[test]
    fn add_appends_to_each_edge() {
        let wg = Windowgram::new("12\n12\n");
        let add = |edge: &str, size: &str| FlexCommand::Add {
            edge: edge.into(),
            size: size.into(),
            pane: None,
        };
        assert_eq!(ok(&wg, add("right", "1")).as_str(), "120\n120\n");
        assert_eq!(ok(&wg, add("left", "1")).as_str(), "012\n012\n");
        assert_eq!(ok(&wg, add("top", "50%")).as_str(), "00\n12\n12\n");
        assert_eq!(ok(&wg, add("bottom", "1")).as_str(), "12\n12\n00\n");
    }

    #[test]
    fn add_honors_the_requested_pane_id() {
        let wg = Windowgram::new("12\n");
        let result = ok(
            &wg,
            FlexCommand::Add { edge: "right".into(), size: "2".into(), pane: Some("Z".into()) },
        );
        assert_eq!(result.as_str(), "12ZZ\n");
    }

    #[test]
    fn add_warns_when_nothing_registers() {
        let wg = Windowgram::new("12\n12\n");
        let result = apply(
            &wg,
            &FlexCommand::Add { edge: "top".into(), size: "10%".into(), pane: None },
        );
        assert!(!result.failed());
        assert_eq!(result.notices[0].message(), "Addition was too small to register");
        assert_eq!(result.windowgram.as_str(), wg.as_str());
    }

    #[test]
    fn add_rejects_taken_or_bad_ids() {
        let wg = Windowgram::new("12\n");
        assert_eq!(
            error_message(
                &wg,
                FlexCommand::Add { edge: "right".into(), size: "1".into(), pane: Some("1".into()) }
            ),
            "Unable to secure a new pane id: Pane id `1` is in use"
        );
        assert_eq!(
            error_message(
                &wg,
                FlexCommand::Add { edge: "middle".into(), size: "1".into(), pane: None }
            ),
            "The edge you specified is invalid, please specify either: top, bottom, left, or right"
        );
    }

    fn break_cmd(pane: &str, grid: &str, ids: Option<&str>) -> FlexCommand {
        FlexCommand::Break {
            pane: pane.into(),
            grid: grid.into(),
            new_panes: ids.map(str::to_string),
        }
    }

    #[test]
    fn break_divides_evenly_without_rescale() {
        // The freed target pane rejoins the id pool, so labels start at 0.
        let wg = Windowgram::new("1111\n1111\n");
        let result = ok(&wg, break_cmd("1", "2x2", None));
        assert_eq!(result.as_str(), "0011\n2233\n");
    }

    #[test]
    fn break_scales_up_to_the_next_fit() {
        let wg = Windowgram::new("1\n");
        let result = ok(&wg, break_cmd("1", "2x2", None));
        assert_eq!(result.as_str(), "01\n23\n");
    }

    #[test]
    fn break_seeds_ids_from_the_requested_pane() {
        let wg = Windowgram::new("1111\n1111\n");
        let result = ok(&wg, break_cmd("1", "2x2", Some("A")));
        assert_eq!(result.as_str(), "AABB\nCCDD\n");
    }

    #[test]
    fn break_validation_errors() {
        let wg = Windowgram::new("12\n");
        assert_eq!(error_message(&wg, break_cmd("%", "2x2", None)), "The pane you specified is invalid");
        assert_eq!(error_message(&wg, break_cmd("9", "2x2", None)), "The pane you specified does not exist");
        assert_eq!(error_message(&wg, break_cmd("1", "2by2", None)), "Grid parameter is invalid: 2by2");
        assert_eq!(error_message(&wg, break_cmd("1", "0x5", None)), "Grid you specified results in no panes");
        assert_eq!(
            error_message(&wg, break_cmd("1", "8x8", None)),
            "Grid is 64 panes, exceeding max of 62"
        );
        assert_eq!(
            error_message(&wg, break_cmd("1", "2x2", Some("2"))),
            "Specified pane (2) is already in use"
        );
    }

    #[test]
    fn join_collapses_a_rectangle() {
        let wg = Windowgram::new("12\n34\n");
        let result = ok(&wg, FlexCommand::Join { groups: vec!["12".into()] });
        assert_eq!(result.as_str(), "11\n34\n");
    }

    #[test]
    fn join_renames_via_the_delimiter() {
        let wg = Windowgram::new("12\n34\n");
        let result = ok(&wg, FlexCommand::Join { groups: vec!["12.a".into(), "34.b".into()] });
        assert_eq!(result.as_str(), "aa\nbb\n");
    }

    #[test]
    fn join_reports_the_exact_completion() {
        let wg = Windowgram::new("AAB\nAAB\nCCC\n");
        assert_eq!(
            error_message(&wg, FlexCommand::Join { groups: vec!["AC".into()] }),
            "Group #1 (\"AC\") isn't whole, but it would be if you add: B"
        );
    }

    #[test]
    fn join_rejects_reusing_a_taken_name() {
        let wg = Windowgram::new("12\n34\n");
        assert_eq!(
            error_message(&wg, FlexCommand::Join { groups: vec!["12.3".into()] }),
            "Error with argument 1 (\"12.3\"): Attempting to rename to pane 3 when it's in use"
        );
        // A name freed by the join itself is fair game.
        let result = ok(&wg, FlexCommand::Join { groups: vec!["12.2".into()] });
        assert_eq!(result.as_str(), "22\n34\n");
    }

    #[test]
    fn join_group_syntax_errors() {
        let wg = Windowgram::new("12\n34\n");
        assert_eq!(
            error_message(&wg, FlexCommand::Join { groups: vec!["1.2.3".into()] }),
            "Error with argument 1 (\"1.2.3\"): Argument contains more than one rename delimiter"
        );
        assert_eq!(
            error_message(&wg, FlexCommand::Join { groups: vec!["12.".into()] }),
            "Error with argument 1 (\"12.\"): Rename delimiter used but subsequent pane unspecified"
        );
        assert_eq!(
            error_message(&wg, FlexCommand::Join { groups: vec!["12.ab".into()] }),
            "Error with argument 1 (\"12.ab\"): Only one pane should be specified after the rename delimiter"
        );
        assert_eq!(
            error_message(&wg, FlexCommand::Join { groups: vec!["19".into()] }),
            "Error with argument 1 (\"19\"): Windowgram does not have pane 9"
        );
    }

    fn split_cmd(pane: &str, how: &str, size: Option<&str>, ids: Option<&str>) -> FlexCommand {
        FlexCommand::Split {
            pane: pane.into(),
            how: how.into(),
            size: size.map(str::to_string),
            new_panes: ids.map(str::to_string),
        }
    }

    #[test]
    fn split_from_an_edge() {
        let wg = Windowgram::new("1111\n1111\n1111\n1111\n");
        let result = ok(&wg, split_cmd("1", "bottom", Some("1"), Some("s")));
        assert_eq!(result.as_str(), "1111\n1111\n1111\nssss\n");
        let result = ok(&wg, split_cmd("1", "left", Some("25%"), None));
        assert_eq!(result.as_str(), "0111\n0111\n0111\n0111\n");
    }

    #[test]
    fn split_on_an_axis_defaults_to_half() {
        let wg = Windowgram::new("1111\n1111\n1111\n1111\n");
        let result = ok(&wg, split_cmd("1", "vertical", None, None));
        assert_eq!(result.as_str(), "0000\n0000\n1111\n1111\n");
        // A negative size inverses the split.
        let result = ok(&wg, split_cmd("1", "v", Some("-1"), None));
        assert_eq!(result.as_str(), "1111\n1111\n1111\n0000\n");
    }

    #[test]
    fn split_validation_errors() {
        let wg = Windowgram::new("12\n");
        assert_eq!(error_message(&wg, split_cmd("9", "v", None, None)), "The pane you specified does not exist");
        assert_eq!(error_message(&wg, split_cmd("1", "diagonal", None, None)), "The axis you specified is invalid");
        assert_eq!(
            error_message(&wg, split_cmd("1", "bottom", Some("-1"), None)),
            "Negative size only valid if `how` is vert or horz"
        );
        assert_eq!(error_message(&wg, split_cmd("1", "v", None, None)), "Pane is too small to be split");

        let tall = Windowgram::new("1\n1\n");
        assert_eq!(
            error_message(&tall, split_cmd("1", "h", None, None)),
            "Pane is too small to be split in that way"
        );
        assert_eq!(
            error_message(&tall, split_cmd("1", "v", Some("2"), None)),
            "Specified size (2) is greater or equal to the maximum range (2) of this function"
        );
        assert_eq!(
            error_message(&tall, split_cmd("1", "v", Some("10%"), None)),
            "Resulting size (0 characters) is not valid"
        );
        assert_eq!(
            error_message(&tall, split_cmd("1", "v", None, Some("abc"))),
            "Parameter newpanes exceeds the function maximum of two panes"
        );
    }

    #[test]
    fn rename_exchanges_names_through_pairs() {
        let wg = Windowgram::new("AB\nab\n");
        let result = ok(
            &wg,
            FlexCommand::Rename { pairs: vec!["Aa".into(), "Bb".into(), "Bb".into(), "Aa".into()] },
        );
        assert_eq!(result.as_str(), "BA\nba\n");
    }

    #[test]
    fn rename_validation_errors() {
        let wg = Windowgram::new("AB\nab\n");
        let rename = |pairs: &[&str]| FlexCommand::Rename {
            pairs: pairs.iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(
            error_message(&wg, rename(&["A"])),
            "Insufficient data, every <from> must be followed by <to>"
        );
        assert_eq!(
            error_message(&wg, rename(&["AB", "C"])),
            "Pair 1 count error, both <from> and <to> pane counts must be identical"
        );
        assert_eq!(error_message(&wg, rename(&["A", "A"])), "Pane `A` renames to self in pair 1");
        assert_eq!(
            error_message(&wg, rename(&["C", "D"])),
            "The <from> pane `C` in pair 1 is not being used"
        );
        assert_eq!(
            error_message(&wg, rename(&["A", "b"])),
            "The <to> pane `b` in pair 1 is already being used"
        );
        assert_eq!(
            error_message(&wg, rename(&["A", "C", "B", "C"])),
            "The <to> pane `C` in pair 2 was already named by another pair"
        );
    }

    #[test]
    fn swap_exchanges_groups_in_one_pass() {
        let wg = Windowgram::new("AB\nab\n");
        let result = ok(&wg, FlexCommand::Swap { pairs: vec!["Aa".into(), "Bb".into()] });
        assert_eq!(result.as_str(), "BA\nba\n");
    }

    #[test]
    fn swap_validation_errors() {
        let wg = Windowgram::new("AB\nab\n");
        let swap = |pairs: &[&str]| FlexCommand::Swap {
            pairs: pairs.iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(error_message(&wg, swap(&["A", "A"])), "Pane `A` swaps to self in pair 1");
        assert_eq!(
            error_message(&wg, swap(&["AA", "Bb"])),
            "Pane `A` specified multiple times in <from> of pair 1"
        );
        assert_eq!(
            error_message(&wg, swap(&["A", "B", "B", "A"])),
            "The <from> pane `B` in pair 2 is already swapped"
        );
        assert_eq!(
            error_message(&wg, swap(&["A", "z"])),
            "The <to> pane `z` in pair 1 is not being used"
        );
    }

    #[test]
    fn mirror_and_flip_reverse_the_grid() {
        let wg = Windowgram::new("12\n34\n");
        assert_eq!(ok(&wg, FlexCommand::Mirror).as_str(), "21\n43\n");
        assert_eq!(ok(&wg, FlexCommand::Flip).as_str(), "34\n12\n");
    }
}
