//! Richardson extrapolation table shared by the Romberg integrators.

use std::fmt::{self, Write};

/// Lower-triangular table of Richardson extrapolants.
///
/// Row `i` holds `i + 1` entries: the trapezoidal estimate with `2^i`
/// intervals followed by its successive extrapolations. The last diagonal
/// entry is the most refined estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct RichardsonTable<T> {
    rows: Vec<Vec<T>>,
}

impl<T> RichardsonTable<T> {
    /// Start a table from the single-interval trapezoidal estimate.
    pub(crate) fn new(first: T) -> Self {
        Self {
            rows: vec![vec![first]],
        }
    }

    /// Append the next refinement level.
    pub(crate) fn push_row(&mut self, row: Vec<T>) {
        debug_assert_eq!(row.len(), self.rows.len() + 1);
        self.rows.push(row);
    }

    /// All rows, coarsest first.
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    /// Number of refinement levels in the table.
    pub fn levels(&self) -> usize {
        self.rows.len()
    }

    /// Entry at `(row, col)`, both zero-based, `col <= row`.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Most refined estimate (last diagonal entry).
    pub fn best(&self) -> &T {
        let row = &self.rows[self.rows.len() - 1];
        &row[row.len() - 1]
    }

    /// Diagonal entries, coarsest first.
    pub fn diagonal(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.iter().enumerate().map(|(i, row)| &row[i])
    }

    pub(crate) fn into_best(mut self) -> T {
        let mut row = self.rows.swap_remove(self.rows.len() - 1);
        row.swap_remove(row.len() - 1)
    }

    /// Apply `f` to every entry.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> RichardsonTable<U> {
        RichardsonTable {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(&mut f).collect())
                .collect(),
        }
    }
}

impl<T: fmt::Display> RichardsonTable<T> {
    /// Render the table with fixed-width columns.
    pub fn render(&self, width: usize, precision: usize) -> String {
        let mut out = String::new();
        let rule = "=".repeat(68);
        let _ = writeln!(
            out,
            "       Richardson Extrapolation Table for Romberg Integration"
        );
        let _ = writeln!(out, "{rule}");
        for row in &self.rows {
            for entry in row {
                let _ = write!(out, "{entry:>width$.precision$} ");
            }
            out.push('\n');
        }
        let _ = writeln!(out, "{rule}");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RichardsonTable<f64> {
        let mut table = RichardsonTable::new(1.0);
        table.push_row(vec![2.0, 3.0]);
        table.push_row(vec![4.0, 5.0, 6.0]);
        table
    }

    #[test]
    fn test_table_access() {
        let table = sample_table();
        assert_eq!(table.levels(), 3);
        assert_eq!(*table.best(), 6.0);
        assert_eq!(table.get(1, 1), Some(&3.0));
        assert_eq!(table.get(1, 2), None);
        assert_eq!(table.diagonal().copied().collect::<Vec<_>>(), vec![1.0, 3.0, 6.0]);
        assert_eq!(table.clone().into_best(), 6.0);
    }

    #[test]
    fn test_table_map_and_render() {
        let doubled = sample_table().map(|v| v * 2.0);
        assert_eq!(*doubled.best(), 12.0);

        let text = sample_table().render(8, 3);
        assert!(text.contains("Richardson Extrapolation Table"));
        assert!(text.contains("   6.000"));
        assert_eq!(text.lines().count(), 6);
    }
}
