//! Split plan resolution.
//!
//! Converts a windowgram into the ordered binary splits a terminal
//! multiplexer executes to reproduce the layout. Resolution recurses over
//! axis-aligned rectangular bounds: a pane whose bounding box exactly fills
//! the bounds becomes a leaf; otherwise the resolver hunts for a clean break,
//! a line every touching pane ends exactly on, verified with a scanline over
//! the perpendicular extent. Regions where neither exists stay unresolved,
//! which makes the windowgram non-split-representable.

use serde::{Deserialize, Serialize};
use wgram_core::{GridRect, Windowgram, WindowgramError};

/// Identifier correlating a resolved region with its multiplexer pane index.
///
/// `0` is reserved so link ids are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(u32);

impl LinkId {
    /// The root region's link.
    pub const ROOT: Self = Self(1);

    /// Raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Orientation of one split.
///
/// `Vertical` places the new pane below the remainder; `Horizontal` places
/// it to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAxis {
    Vertical,
    Horizontal,
}

/// One split in replay order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRecord {
    pub link: LinkId,
    /// Link of the region this split was taken from; `None` for the root.
    pub parent: Option<LinkId>,
    /// `None` for the root record, which is not a split.
    pub axis: Option<SplitAxis>,
    /// Screen width of the region at the time of the split, minus the
    /// one-character divider when the split is horizontal.
    pub width: u16,
    /// Screen height, minus the divider when the split is vertical.
    pub height: u16,
    /// Share of the parent's remaining extent consumed by this split.
    pub percent: f32,
}

/// The resolver's output: replayable split records plus the link table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPlan {
    /// Root record first, then splits in the order they must replay.
    pub records: Vec<SplitRecord>,
    /// Link id to multiplexer pane index, after all insertion renumbering.
    pub links: Vec<(LinkId, u16)>,
    /// Pane id to link for every consumed pane.
    pub bindings: Vec<(char, LinkId)>,
    /// Panes the resolver could not consume; empty when the windowgram is
    /// split-representable.
    pub unresolved: Vec<char>,
}

impl SplitPlan {
    /// True when every pane was consumed by the resolution.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Splits in replay order, excluding the root record.
    #[must_use]
    pub fn splits(&self) -> &[SplitRecord] {
        &self.records[1..]
    }

    /// The multiplexer pane index bound to a link.
    #[must_use]
    pub fn pane_index(&self, link: LinkId) -> Option<u16> {
        self.links.iter().find(|(l, _)| *l == link).map(|&(_, ix)| ix)
    }

    /// The link a pane was bound to, if it was consumed.
    #[must_use]
    pub fn link_of(&self, pane: char) -> Option<LinkId> {
        self.bindings.iter().find(|(p, _)| *p == pane).map(|&(_, l)| l)
    }
}

/// Resolve a windowgram against a target screen size.
///
/// The only error is a parse failure; an unsupported layout is reported
/// through [`SplitPlan::unresolved`], not as an error.
pub fn resolve(
    wg: &Windowgram,
    screen_w: u16,
    screen_h: u16,
) -> Result<SplitPlan, WindowgramError> {
    let parsed = wg.parse()?;
    let (grid_w, grid_h) = wg.size();
    let mut panes: Vec<PaneSlot> = parsed
        .into_iter()
        .map(|(id, rect)| PaneSlot { id, rect, link: None })
        .collect();
    // Top to bottom, left to right; the scan order fixes which break wins.
    panes.sort_by_key(|pane| (pane.rect.y, pane.rect.x));

    let mut resolver = Resolver {
        panes,
        records: vec![SplitRecord {
            link: LinkId::ROOT,
            parent: None,
            axis: None,
            width: screen_w,
            height: screen_h,
            percent: 100.0,
        }],
        links: vec![(LinkId::ROOT, 0)],
        next_link: LinkId::ROOT,
        grid_w,
        grid_h,
        screen_w,
        screen_h,
    };
    resolver.fill(LinkId::ROOT, GridRect::new(1, 1, grid_w, grid_h));

    let bindings = resolver
        .panes
        .iter()
        .filter_map(|pane| pane.link.map(|link| (pane.id, link)))
        .collect();
    let unresolved = resolver
        .panes
        .iter()
        .filter(|pane| pane.link.is_none())
        .map(|pane| pane.id)
        .collect();
    Ok(SplitPlan {
        records: resolver.records,
        links: resolver.links,
        bindings,
        unresolved,
    })
}

#[derive(Debug, Clone)]
struct PaneSlot {
    id: char,
    rect: GridRect,
    link: Option<LinkId>,
}

impl PaneSlot {
    fn consumed(&self) -> bool {
        self.link.is_some()
    }

    fn outside(&self, bounds: GridRect) -> bool {
        self.rect.y >= bounds.bottom()
            || self.rect.bottom() <= bounds.y
            || self.rect.x >= bounds.right()
            || self.rect.right() <= bounds.x
    }
}

struct Resolver {
    panes: Vec<PaneSlot>,
    records: Vec<SplitRecord>,
    links: Vec<(LinkId, u16)>,
    next_link: LinkId,
    grid_w: u16,
    grid_h: u16,
    screen_w: u16,
    screen_h: u16,
}

impl Resolver {
    fn fill(&mut self, link: LinkId, bounds: GridRect) {
        // A pane that fits the bounds perfectly becomes this region's leaf.
        for pane in &mut self.panes {
            if !pane.consumed() && pane.rect == bounds {
                #[cfg(feature = "tracing")]
                tracing::debug!(pane = %pane.id, link = link.get(), ?bounds, "leaf bound");
                pane.link = Some(link);
                return;
            }
        }

        let Some((axis, at)) = self.find_break(bounds) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(?bounds, "no clean break, region left unresolved");
            return;
        };

        match axis {
            SplitAxis::Vertical => {
                let first = at - bounds.y;
                let child = self.split(link, axis, bounds.h - first);
                self.fill(link, GridRect::new(bounds.x, bounds.y, bounds.w, first));
                self.fill(child, GridRect::new(bounds.x, at, bounds.w, bounds.h - first));
            }
            SplitAxis::Horizontal => {
                let first = at - bounds.x;
                let child = self.split(link, axis, bounds.w - first);
                self.fill(link, GridRect::new(bounds.x, bounds.y, first, bounds.h));
                self.fill(child, GridRect::new(at, bounds.y, bounds.w - first, bounds.h));
            }
        }
    }

    /// Hunt for a clean break, testing each unconsumed in-bounds pane's edges
    /// in priority order: top, bottom, left, right.
    fn find_break(&self, bounds: GridRect) -> Option<(SplitAxis, u16)> {
        for ix in 0..self.panes.len() {
            let rect = {
                let pane = &self.panes[ix];
                if pane.consumed() || pane.outside(bounds) {
                    continue;
                }
                pane.rect
            };
            if rect.y > bounds.y && self.clean_break(true, rect.y, bounds) {
                return Some((SplitAxis::Vertical, rect.y));
            }
            if rect.bottom() < bounds.bottom() && self.clean_break(true, rect.bottom(), bounds) {
                return Some((SplitAxis::Vertical, rect.bottom()));
            }
            if rect.x > bounds.x && self.clean_break(false, rect.x, bounds) {
                return Some((SplitAxis::Horizontal, rect.x));
            }
            if rect.right() < bounds.right() && self.clean_break(false, rect.right(), bounds) {
                return Some((SplitAxis::Horizontal, rect.right()));
            }
        }
        None
    }

    /// Scanline test: the break at `pos` is clean iff the qualifying pane
    /// edges cover the perpendicular extent of the bounds with no gap.
    fn clean_break(&self, vertical: bool, pos: u16, bounds: GridRect) -> bool {
        let (begin, length) = if vertical {
            (bounds.x, bounds.w)
        } else {
            (bounds.y, bounds.h)
        };
        let mut scanline = vec![false; length as usize];
        for pane in &self.panes {
            if pane.consumed() || pane.outside(bounds) {
                continue;
            }
            let aligned = if vertical {
                pane.rect.y == pos || pane.rect.bottom() == pos
            } else {
                pane.rect.x == pos || pane.rect.right() == pos
            };
            if !aligned {
                continue;
            }
            let (mut span_pos, mut span_len) = if vertical {
                (pane.rect.x, pane.rect.w)
            } else {
                (pane.rect.y, pane.rect.h)
            };
            if span_pos < begin {
                span_len -= begin - span_pos;
                span_pos = begin;
            }
            if span_pos + span_len > begin + length {
                span_len = begin + length - span_pos;
            }
            for n in (span_pos - begin)..(span_pos - begin + span_len) {
                scanline[n as usize] = true;
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(
                pos,
                vertical,
                pane = %pane.id,
                covered = scanline.iter().filter(|&&c| c).count(),
                "scanline extended"
            );
            if scanline.iter().all(|&covered| covered) {
                return true;
            }
        }
        false
    }

    /// Record a split of the region at `link`, where `second_extent` is the
    /// grid-unit extent of the new (below/right) sub-region. Returns the new
    /// region's link.
    fn split(&mut self, link: LinkId, axis: SplitAxis, second_extent: u16) -> LinkId {
        let of_screen = match axis {
            SplitAxis::Vertical => translate(second_extent, self.grid_h, self.screen_h),
            SplitAxis::Horizontal => translate(second_extent, self.grid_w, self.screen_w),
        };

        // Pane indices shift up as insertions occur below them, exactly as a
        // multiplexer renumbers its panes.
        let parent_index = self
            .links
            .iter()
            .find(|(l, _)| *l == link)
            .map(|&(_, ix)| ix)
            .unwrap_or_default();
        for entry in &mut self.links {
            if entry.1 > parent_index {
                entry.1 += 1;
            }
        }

        let parent_pos = self
            .records
            .iter()
            .position(|record| record.link == link)
            .unwrap_or_default();
        let (width, height, percent) = {
            let parent = &self.records[parent_pos];
            match axis {
                SplitAxis::Vertical => (
                    parent.width,
                    of_screen.saturating_sub(1),
                    f32::from(of_screen) / f32::from(parent.height.max(1)) * 100.0,
                ),
                SplitAxis::Horizontal => (
                    of_screen.saturating_sub(1),
                    parent.height,
                    f32::from(of_screen) / f32::from(parent.width.max(1)) * 100.0,
                ),
            }
        };
        // The split is taken out of the parent's remaining extent, so later
        // splits of the same region use the reduced size.
        match axis {
            SplitAxis::Vertical => {
                self.records[parent_pos].height =
                    self.records[parent_pos].height.saturating_sub(of_screen);
            }
            SplitAxis::Horizontal => {
                self.records[parent_pos].width =
                    self.records[parent_pos].width.saturating_sub(of_screen);
            }
        }

        let child = self.next_link.next();
        self.next_link = child;
        self.records.push(SplitRecord {
            link: child,
            parent: Some(link),
            axis: Some(axis),
            width,
            height,
            percent,
        });
        self.links.push((child, parent_index + 1));
        #[cfg(feature = "tracing")]
        tracing::debug!(
            parent = link.get(),
            child = child.get(),
            ?axis,
            percent,
            "split recorded"
        );
        child
    }
}

/// Scale a grid-unit extent to screen characters, truncating.
fn translate(extent: u16, grid: u16, screen: u16) -> u16 {
    if grid == 0 {
        return 0;
    }
    (u32::from(extent) * u32::from(screen) / u32::from(grid)) as u16
}
