use std::collections::BTreeMap;

use crate::color::RGBColor;

pub mod xlsx;

const MAX_TITLE_LENGTH: usize = 31;
const FORBIDDEN_TITLE_CHARACTERS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// An in-memory spreadsheet grid holding one solid fill per populated cell.
///
/// Columns and rows are indexed starting at 1. The grid carries one uniform
/// column width and row height so rendered cells approximate square pixels.
pub struct Worksheet {
    title: String,
    column_width: f32,
    row_height: f32,
    fills: BTreeMap<(u32, u32), RGBColor>,
}

impl Worksheet {
    /// Creates an empty worksheet. The title is sanitized to the spreadsheet
    /// naming rules: forbidden characters are replaced with '_' and the
    /// result is truncated to 31 characters.
    pub fn new(title: &str, column_width: f32, row_height: f32) -> Self {
        Worksheet {
            title: sanitize_title(title),
            column_width,
            row_height,
            fills: BTreeMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Sets the fill of the cell at the given 1-based coordinate.
    pub fn set_cell_fill(&mut self, column: u32, row: u32, color: RGBColor) {
        if column < 1 || row < 1 {
            panic!("Cell coordinates are 1-based, got ({}, {})", column, row);
        }
        self.fills.insert((row, column), color);
    }

    pub fn cell_fill(&self, column: u32, row: u32) -> Option<RGBColor> {
        self.fills.get(&(row, column)).copied()
    }

    /// (max column, max row) of the populated area, or (0, 0) when empty.
    pub fn dimensions(&self) -> (u32, u32) {
        let mut max_column = 0;
        let mut max_row = 0;
        for &(row, column) in self.fills.keys() {
            max_column = max_column.max(column);
            max_row = max_row.max(row);
        }
        (max_column, max_row)
    }

    pub fn cell_count(&self) -> usize {
        self.fills.len()
    }

    /// Populated cells in row-major order, as ((column, row), fill color).
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), RGBColor)> + '_ {
        self.fills
            .iter()
            .map(|(&(row, column), &color)| ((column, row), color))
    }
}

fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if FORBIDDEN_TITLE_CHARACTERS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .take(MAX_TITLE_LENGTH)
        .collect()
}
