//! Masks and mosaic composition.
//!
//! A mosaic is a base windowgram plus ordered (data, mask) overlay pairs,
//! merged bottom to top with the last layer winning per cell. Commands use
//! mosaics to relabel a region through a private copy without disturbing
//! unrelated cells.

use crate::alphabet::{MASK_ONE, MASK_TRANSPARENT, MASK_ZERO};
use crate::geometry::GridRect;
use crate::windowgram::{Windowgram, WindowgramError};

/// One overlay: pane data plus the mask selecting which cells apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicLayer {
    pub data: Windowgram,
    pub mask: Windowgram,
}

/// A base windowgram with ordered overlay layers, bottom to top.
///
/// Every layer must match the base's dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mosaic {
    pub base: Windowgram,
    pub layers: Vec<MosaicLayer>,
}

/// Build a mask covering the named panes' bounding rectangles with mask-one,
/// mask-zero elsewhere. Absent panes contribute nothing.
pub fn mask_from_panes(wg: &Windowgram, panes: &str) -> Result<Windowgram, WindowgramError> {
    let parsed = wg.parse()?;
    let (w, h) = wg.size();
    let mut grid = vec![vec![MASK_ZERO; w as usize]; h as usize];
    for ch in panes.chars() {
        let Some(rect) = parsed.get(&ch).copied() else {
            continue;
        };
        paint_mask(&mut grid, rect);
    }
    Ok(Windowgram::from_chars_mask(&grid))
}

fn paint_mask(grid: &mut [Vec<char>], rect: GridRect) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            grid[y as usize - 1][x as usize - 1] = MASK_ONE;
        }
    }
}

impl Mosaic {
    /// Compose a mosaic from a base and a list of masks.
    ///
    /// Each layer's data is the base with every pane outside the mask's
    /// coverage relabelled to the transparency symbol.
    #[must_use]
    pub fn from_masks(base: &Windowgram, masks: &[Windowgram]) -> Mosaic {
        let mut layers = Vec::with_capacity(masks.len());
        for mask in masks {
            let keep = base.panes_from_mask(mask);
            let grid: Vec<Vec<char>> = base
                .char_grid()
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&ch| if keep.contains(ch) { ch } else { MASK_TRANSPARENT })
                        .collect()
                })
                .collect();
            layers.push(MosaicLayer {
                data: Windowgram::from_chars_mask(&grid),
                mask: mask.clone(),
            });
        }
        Mosaic { base: base.clone(), layers }
    }

    /// Merge the layers over the base, last layer winning per cell.
    #[must_use]
    pub fn flatten(&self) -> Windowgram {
        let mut grid = self.base.char_grid();
        for layer in &self.layers {
            let data = layer.data.char_grid();
            let mask = layer.mask.char_grid();
            debug_assert_eq!(grid.len(), mask.len());
            for (y, row) in grid.iter_mut().enumerate() {
                for (x, cell) in row.iter_mut().enumerate() {
                    if mask[y][x] == MASK_ONE {
                        *cell = data[y][x];
                    }
                }
            }
        }
        Windowgram::from_chars(&grid)
    }
}
