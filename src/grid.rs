//! Column-major poster grid.
//!
//! A raw list of image references is cleaned, repeated cyclically until it
//! fills `columns * ROWS_PER_COLUMN` tiles and then dealt round-robin into
//! columns, so flattened tile `i` lands in column `i % columns`. An empty
//! list produces a grid of empty slots of the same size.

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Poster(String),
    Empty,
}

impl Slot {
    pub fn reference(&self) -> Option<&str> {
        match self {
            Slot::Poster(reference) => Some(reference.as_str()),
            Slot::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: Vec<Vec<Slot>>,
}

/// Clamp a requested column count into `[MIN_COLUMNS, MAX_COLUMNS]`.
pub fn clamp_columns(requested: i64) -> usize {
    requested.clamp(MIN_COLUMNS, MAX_COLUMNS) as usize
}

/// Trim every reference and drop the blank ones, keeping order and duplicates.
pub fn clean_references<S: AsRef<str>>(references: &[S]) -> Vec<String> {
    references
        .iter()
        .map(|r| r.as_ref().trim())
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

impl Grid {
    pub fn build<S: AsRef<str>>(references: &[S], requested_columns: i64) -> Grid {
        let column_count = clamp_columns(requested_columns);
        let usable = clean_references(references);
        let total_tiles = column_count * ROWS_PER_COLUMN;

        let looped = (0..total_tiles).map(|i| {
            if usable.is_empty() {
                Slot::Empty
            } else {
                Slot::Poster(usable[i % usable.len()].clone())
            }
        });

        let mut columns: Vec<Vec<Slot>> = (0..column_count)
            .map(|_| Vec::with_capacity(ROWS_PER_COLUMN))
            .collect();
        for (i, slot) in looped.enumerate() {
            columns[i % column_count].push(slot);
        }

        Grid { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Option<&[Slot]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Slot]> {
        self.columns.iter().map(Vec::as_slice)
    }

    pub fn total_slots(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// True when no slot holds a poster.
    pub fn is_blank(&self) -> bool {
        self.iter().flatten().all(|slot| *slot == Slot::Empty)
    }

    /// Undo the round-robin deal: row by row, column by column.
    pub fn flatten(&self) -> Vec<&Slot> {
        (0..ROWS_PER_COLUMN)
            .flat_map(|row| self.columns.iter().filter_map(move |column| column.get(row)))
            .collect()
    }

    /// Distinct references in first-seen flattened order.
    pub fn distinct_references(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for slot in self.flatten() {
            if let Some(reference) = slot.reference() {
                if !seen.contains(&reference) {
                    seen.push(reference);
                }
            }
        }
        seen
    }
}

/// Last inputs seen and the grid built from them.
///
/// The grid is rebuilt wholesale when either the reference list or the
/// requested column count changes, never patched.
pub struct GridMemo {
    references: Vec<String>,
    requested_columns: i64,
    grid: Grid,
}

impl GridMemo {
    pub fn new(references: Vec<String>, requested_columns: i64) -> GridMemo {
        let grid = Grid::build(&references, requested_columns);
        GridMemo { references, requested_columns, grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn requested_columns(&self) -> i64 {
        self.requested_columns
    }

    /// Returns true when the grid was rebuilt.
    pub fn update(&mut self, references: &[String], requested_columns: i64) -> bool {
        if self.references == references && self.requested_columns == requested_columns {
            return false;
        }
        self.references = references.to_vec();
        self.requested_columns = requested_columns;
        self.grid = Grid::build(&self.references, requested_columns);
        true
    }

    pub fn set_requested_columns(&mut self, requested_columns: i64) -> bool {
        let references = std::mem::take(&mut self.references);
        let rebuilt = self.update(&references, requested_columns);
        if !rebuilt {
            self.references = references;
        }
        rebuilt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn poster(r: &str) -> Slot {
        Slot::Poster(r.to_string())
    }

    #[test]
    fn clamp_stays_in_range() {
        for requested in [-100, -1, 0, 1, 3, 4, 7, 10, 11, 12, i64::MAX, i64::MIN] {
            let columns = clamp_columns(requested);
            assert!((4..=10).contains(&columns), "{requested} -> {columns}");
        }
        assert_eq!(clamp_columns(3), 4);
        assert_eq!(clamp_columns(7), 7);
        assert_eq!(clamp_columns(12), 10);
    }

    #[test]
    fn cleaning_trims_and_drops_blanks() {
        let cleaned = clean_references(&["  a ", "", "   ", "\tb\n", "a"]);
        assert_eq!(cleaned, vec!["a", "b", "a"]);
    }

    #[test]
    fn three_references_over_four_columns() {
        let grid = Grid::build(&["a", "b", "c"], 4);
        assert_eq!(grid.column_count(), 4);
        assert_eq!(grid.total_slots(), 40);

        let column0: Vec<Slot> = ["a", "b", "c", "a", "b", "c", "a", "b", "c", "a"]
            .iter()
            .map(|r| poster(r))
            .collect();
        assert_eq!(grid.column(0), Some(column0.as_slice()));
        assert_eq!(grid.column(3).map(<[Slot]>::len), Some(10));
        assert!(grid.column(4).is_none());

        let flat = grid.flatten();
        assert_eq!(flat.len(), 40);
        assert_eq!(*flat[39], poster("a"));
    }

    #[test]
    fn empty_list_fills_clamped_grid_with_empty_slots() {
        let references: [&str; 0] = [];
        let grid = Grid::build(&references, 12);
        assert_eq!(grid.column_count(), 10);
        assert!(grid.iter().all(|column| column.len() == 10));
        assert!(grid.is_blank());
        assert!(grid.iter().flatten().all(|slot| slot.reference().is_none()));
    }

    #[test]
    fn whitespace_only_list_is_treated_as_empty() {
        let grid = Grid::build(&[" ", "\t", ""], 5);
        assert_eq!(grid.total_slots(), 50);
        assert!(grid.is_blank());
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let grid = Grid::build(&["x", "x", "y"], 4);
        let flat: Vec<_> = grid.flatten().into_iter().take(6).cloned().collect();
        assert_eq!(flat, vec![poster("x"), poster("x"), poster("y"), poster("x"), poster("x"), poster("y")]);
        assert_eq!(grid.distinct_references(), vec!["x", "y"]);
    }

    #[test]
    fn random_inputs_keep_shape_and_cycle() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let len = rng.random_range(0..40);
            let references: Vec<String> = (0..len)
                .map(|_| match rng.random_range(0..4) {
                    0 => "   ".to_string(),
                    n => format!(" poster-{}.jpg ", rng.random_range(0..8) * n),
                })
                .collect();
            let requested = rng.random_range(-20..30);

            let grid = Grid::build(&references, requested);
            let columns = clamp_columns(requested);
            assert_eq!(grid.column_count(), columns);
            assert!(grid.iter().all(|column| column.len() == ROWS_PER_COLUMN));
            assert_eq!(grid.total_slots(), columns * ROWS_PER_COLUMN);

            let usable = clean_references(&references);
            for (i, slot) in grid.flatten().into_iter().enumerate() {
                if usable.is_empty() {
                    assert_eq!(*slot, Slot::Empty);
                } else {
                    assert_eq!(slot.reference(), Some(usable[i % usable.len()].as_str()));
                }
            }

            assert_eq!(grid, Grid::build(&references, requested));
        }
    }

    #[test]
    fn memo_rebuilds_only_on_change() {
        let refs = vec!["a".to_string(), "b".to_string()];
        let mut memo = GridMemo::new(refs.clone(), 7);
        assert!(!memo.update(&refs, 7));

        assert!(memo.set_requested_columns(9));
        assert_eq!(memo.grid().column_count(), 9);
        assert!(!memo.set_requested_columns(9));
        assert_eq!(*memo.grid(), Grid::build(&refs, 9));

        let more = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(memo.update(&more, 9));
        assert_eq!(*memo.grid(), Grid::build(&more, 9));

        // Same clamped width, different request: still a fresh build.
        assert!(memo.update(&more, 42));
        assert_eq!(memo.grid().column_count(), 10);
        assert_eq!(memo.requested_columns(), 42);
    }
}
