use crate::error::Error;
use bit_set::BitSet;

/// A `(row, column)` pair, 0-indexed.
pub(crate) type Position = (usize, usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Kind {
    Safe,
    Hazard,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Visibility {
    Hidden,
    Flagged,
    Revealed,
}

#[derive(Debug)]
pub(crate) struct Cell {
    pub(crate) kind: Kind,
    pub(crate) visibility: Visibility,
    // only meaningful for safe cells, once adjacency has been built
    pub(crate) adjacent_hazards: u8,
    // row-major indices of the clamped 8-neighborhood
    pub(crate) neighbors: BitSet,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            kind: Kind::Safe,
            visibility: Visibility::Hidden,
            adjacent_hazards: 0,
            neighbors: BitSet::new(),
        }
    }
}

impl Cell {
    pub(crate) fn is_hazard(&self) -> bool {
        self.kind == Kind::Hazard
    }

    pub(crate) fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }
}

pub(crate) fn index_from_position((r, c): Position, columns: usize) -> usize {
    r * columns + c
}

pub(crate) fn position_from_index(index: usize, columns: usize) -> Position {
    (index / columns, index % columns)
}

/// Row-major storage for every cell on the board.
#[derive(Debug)]
pub(crate) struct CellStore {
    cells: Vec<Cell>,
    rows: usize,
    columns: usize,
}

impl CellStore {
    pub(crate) fn new(rows: usize, columns: usize) -> Self {
        Self {
            cells: (0..rows * columns).map(|_| Cell::default()).collect(),
            rows,
            columns,
        }
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn columns(&self) -> usize {
        self.columns
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn contains(&self, (r, c): Position) -> bool {
        r < self.rows && c < self.columns
    }

    pub(crate) fn index(&self, position: Position) -> Result<usize, Error> {
        if self.contains(position) {
            Ok(index_from_position(position, self.columns))
        } else {
            Err(Error::OutOfBounds(position))
        }
    }

    pub(crate) fn position(&self, index: usize) -> Position {
        position_from_index(index, self.columns)
    }

    pub(crate) fn cell(&self, position: Position) -> Result<&Cell, Error> {
        let index = self.index(position)?;
        Ok(&self.cells[index])
    }

    pub(crate) fn cell_mut(&mut self, position: Position) -> Result<&mut Cell, Error> {
        let index = self.index(position)?;
        Ok(&mut self.cells[index])
    }

    pub(crate) fn by_index(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub(crate) fn by_index_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// Every cell along with its position, in row-major order.
    pub(crate) fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (position_from_index(i, columns), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_all_hidden_and_safe() {
        let store = CellStore::new(3, 4);
        assert_eq!(store.len(), 12);
        assert!(store.cells().all(|(_, cell)| {
            cell.kind == Kind::Safe
                && cell.visibility == Visibility::Hidden
                && cell.adjacent_hazards == 0
                && cell.neighbors.is_empty()
        }));
    }

    #[test]
    fn cells_are_row_major() {
        let store = CellStore::new(2, 3);
        let positions = store.cells().map(|(p, _)| p).collect::<Vec<_>>();
        assert_eq!(
            positions,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        assert_eq!(store.index((1, 2)).unwrap(), 5);
        assert_eq!(store.position(4), (1, 1));
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut store = CellStore::new(2, 2);
        assert!(matches!(store.cell((2, 0)), Err(Error::OutOfBounds((2, 0)))));
        assert!(matches!(store.cell((0, 2)), Err(Error::OutOfBounds((0, 2)))));
        assert!(matches!(
            store.cell_mut((5, 5)),
            Err(Error::OutOfBounds((5, 5)))
        ));
    }

    #[test]
    fn set_through_cell_mut() {
        let mut store = CellStore::new(2, 2);
        store.cell_mut((1, 0)).unwrap().visibility = Visibility::Flagged;
        assert_eq!(store.cell((1, 0)).unwrap().visibility, Visibility::Flagged);
        assert_eq!(store.cell((0, 1)).unwrap().visibility, Visibility::Hidden);
    }
}
