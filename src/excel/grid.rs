//! Library-neutral view of a worksheet as an ordered grid of cells
//!
//! The sheet parser only ever asks for a cell at an absolute (row, column)
//! position, row 0 / column 0 being cell A1. Calamine ranges and the
//! in-memory [`Grid`] both implement [`CellGrid`].

use calamine::{Data, Range};

/// Borrowed view of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Empty,
    Text(&'a str),
    Number(f64),
    Bool(bool),
    /// Dates, durations and error cells: present, but neither text nor number
    Other,
}

impl<'a> CellValue<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            CellValue::Text(s) => Some(*s),
            _ => None,
        }
    }

    /// Numeric reading of the cell: numbers as-is, text trimmed and parsed.
    /// Non-finite values count as malformed.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Rows × columns of cells addressed from A1
pub trait CellGrid {
    /// Number of rows, counted from row 0 through the last used row
    fn row_count(&self) -> usize;

    /// Number of columns, counted from column 0 through the last used column
    fn column_count(&self) -> usize;

    /// Cell at an absolute position; `CellValue::Empty` outside the grid
    fn cell(&self, row: usize, col: usize) -> CellValue<'_>;
}

impl CellGrid for Range<Data> {
    fn row_count(&self) -> usize {
        self.end().map(|(row, _)| row as usize + 1).unwrap_or(0)
    }

    fn column_count(&self) -> usize {
        self.end().map(|(_, col)| col as usize + 1).unwrap_or(0)
    }

    fn cell(&self, row: usize, col: usize) -> CellValue<'_> {
        let (Ok(row), Ok(col)) = (u32::try_from(row), u32::try_from(col)) else {
            return CellValue::Empty;
        };
        match self.get_value((row, col)) {
            None | Some(Data::Empty) => CellValue::Empty,
            Some(Data::String(s)) => CellValue::Text(s),
            Some(Data::Float(f)) => CellValue::Number(*f),
            Some(Data::Int(i)) => CellValue::Number(*i as f64),
            Some(Data::Bool(b)) => CellValue::Bool(*b),
            Some(_) => CellValue::Other,
        }
    }
}

/// Owned cell for the in-memory grid
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(f64::from(n))
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

/// In-memory worksheet, rows may be ragged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, growing the grid as needed
    pub fn set(&mut self, row: usize, col: usize, cell: impl Into<Cell>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = cell.into();
    }
}

impl CellGrid for Grid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn cell(&self, row: usize, col: usize) -> CellValue<'_> {
        match self.rows.get(row).and_then(|cells| cells.get(col)) {
            None | Some(Cell::Empty) => CellValue::Empty,
            Some(Cell::Text(s)) => CellValue::Text(s),
            Some(Cell::Number(n)) => CellValue::Number(*n),
            Some(Cell::Bool(b)) => CellValue::Bool(*b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_set_grows_ragged_rows() {
        let mut grid = Grid::new();
        grid.set(2, 3, "x");
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 4);
        assert_eq!(grid.cell(2, 3), CellValue::Text("x"));
        assert_eq!(grid.cell(0, 0), CellValue::Empty);
        assert_eq!(grid.cell(9, 9), CellValue::Empty);
    }

    #[test]
    fn test_cell_value_as_f64() {
        assert_eq!(CellValue::Number(1.5).as_f64(), Some(1.5));
        assert_eq!(CellValue::Text(" 2.25 ").as_f64(), Some(2.25));
        assert_eq!(CellValue::Text("n/a").as_f64(), None);
        assert_eq!(CellValue::Text("NaN").as_f64(), None);
        assert_eq!(CellValue::Number(f64::INFINITY).as_f64(), None);
        assert_eq!(CellValue::Bool(true).as_f64(), None);
        assert_eq!(CellValue::Empty.as_f64(), None);
    }

    #[test]
    fn test_calamine_range_uses_absolute_positions() {
        // Used range starting at B3, as calamine reports for a sheet with an empty column A
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("Weather: 1.5/D".to_string()));
        range.set_value((3, 2), Data::Int(7));

        assert_eq!(range.row_count(), 4);
        assert_eq!(range.column_count(), 3);
        assert_eq!(range.cell(2, 1), CellValue::Text("Weather: 1.5/D"));
        assert_eq!(range.cell(3, 2), CellValue::Number(7.0));
        assert_eq!(range.cell(0, 0), CellValue::Empty);
    }
}
