use serde::{Deserialize, Serialize};

use crate::state::NamedResource;

const MIN_COLUMNS: usize = 2;

/// Rows a terminal grid cell occupies.
pub const CELL_HEIGHT: u16 = 4;

/// Cell geometry, in whatever unit the viewport width is measured in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridMetrics {
    pub min_item_width: u16,
    pub item_margin: u16,
    pub padding: u16,
}

impl GridMetrics {
    /// Terminal cells.
    pub const TERMINAL: GridMetrics = GridMetrics {
        min_item_width: 18,
        item_margin: 1,
        padding: 1,
    };

    /// Density-independent pixels, as used by the phone layout.
    pub const TOUCH: GridMetrics = GridMetrics {
        min_item_width: 150,
        item_margin: 5,
        padding: 8,
    };

    pub fn cell_width(&self) -> u16 {
        self.min_item_width + self.item_margin * 2
    }
}

pub fn column_count(width: u16, metrics: GridMetrics) -> usize {
    let usable = width.saturating_sub(metrics.padding.saturating_mul(2));
    let cell = metrics.cell_width().max(1);
    ((usable / cell) as usize).max(MIN_COLUMNS)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridCell<'a> {
    Entry(&'a NamedResource),
    /// Filler completing the last row; carries its absolute slot index.
    Placeholder(usize),
}

impl GridCell<'_> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, GridCell::Placeholder(_))
    }
}

pub fn placeholder_count(len: usize, columns: usize) -> usize {
    if len == 0 || columns == 0 {
        return 0;
    }
    (columns - len % columns) % columns
}

pub fn pad(items: &[NamedResource], columns: usize) -> Vec<GridCell<'_>> {
    let fill = placeholder_count(items.len(), columns);
    items
        .iter()
        .map(GridCell::Entry)
        .chain((items.len()..items.len() + fill).map(GridCell::Placeholder))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Moves a cursor over `len` real entries laid out `columns` wide. Placeholders
/// are never landed on; moving down into a short last row snaps to its last entry.
pub fn step(selected: usize, len: usize, columns: usize, direction: Direction) -> usize {
    if len == 0 {
        return 0;
    }
    let columns = columns.max(1);
    let selected = selected.min(len - 1);
    match direction {
        Direction::Left if selected % columns > 0 => selected - 1,
        Direction::Right if selected % columns + 1 < columns && selected + 1 < len => selected + 1,
        Direction::Up if selected >= columns => selected - columns,
        Direction::Down => {
            let last_row = (len - 1) / columns;
            if selected / columns == last_row {
                selected
            } else {
                (selected + columns).min(len - 1)
            }
        }
        _ => selected,
    }
}

pub fn row_count(len: usize, columns: usize) -> usize {
    len.div_ceil(columns.max(1))
}

/// First row to draw so the selected row stays within `visible_rows`.
pub fn first_visible_row(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let row = selected / columns.max(1);
    row.saturating_sub(visible_rows.saturating_sub(1))
}
