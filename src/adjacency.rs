use crate::store::{index_from_position, CellStore, Position};
use bit_set::BitSet;

#[derive(Debug, Copy, Clone, PartialEq)]
enum Increment {
    One,
    NegOne,
    Zero,
}

impl Increment {
    // `None` when stepping off the top or left edge
    fn offset(&self, value: usize) -> Option<usize> {
        match *self {
            Self::One => Some(value + 1),
            Self::NegOne => value.checked_sub(1),
            Self::Zero => Some(value),
        }
    }
}

/// Row-major indices of the cells within Chebyshev distance 1 of `position`,
/// clipped to the board.
pub(crate) fn adjacent(
    (row, column): Position,
    rows: usize,
    columns: usize,
) -> impl Iterator<Item = usize> {
    const INCREMENTS: [Increment; 3] = [Increment::NegOne, Increment::Zero, Increment::One];

    INCREMENTS
        .iter()
        .copied()
        .flat_map(|row_incr| std::iter::repeat(row_incr).zip(INCREMENTS))
        .filter_map(move |(row_incr, column_incr)| {
            if (row_incr, column_incr) == (Increment::Zero, Increment::Zero) {
                return None;
            }
            let row_offset = row_incr.offset(row)?;
            let column_offset = column_incr.offset(column)?;
            (row_offset < rows && column_offset < columns)
                .then(|| index_from_position((row_offset, column_offset), columns))
        })
}

/// Fill in every cell's neighbor set and adjacent hazard count.
///
/// Must run once, after hazards are placed and before anything is revealed.
pub(crate) fn build(store: &mut CellStore) {
    let rows = store.rows();
    let columns = store.columns();

    let neighborhoods = (0..store.len())
        .map(|i| {
            let neighbors = adjacent(store.position(i), rows, columns).collect::<BitSet>();
            // sum the neighbors that hold a hazard
            let adjacent_hazards = neighbors.iter().fold(0, |total, index| {
                total + u8::from(store.by_index(index).is_some_and(|cell| cell.is_hazard()))
            });
            debug_assert!(adjacent_hazards <= 8);
            (neighbors, adjacent_hazards)
        })
        .collect::<Vec<_>>();

    for (i, (neighbors, adjacent_hazards)) in neighborhoods.into_iter().enumerate() {
        if let Some(cell) = store.by_index_mut(i) {
            cell.neighbors = neighbors;
            cell.adjacent_hazards = adjacent_hazards;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Kind;

    fn store_with_hazards(rows: usize, columns: usize, hazards: &[Position]) -> CellStore {
        let mut store = CellStore::new(rows, columns);
        for &p in hazards {
            store.cell_mut(p).unwrap().kind = Kind::Hazard;
        }
        build(&mut store);
        store
    }

    #[test]
    fn neighbor_set_sizes() {
        let store = store_with_hazards(4, 5, &[]);
        for ((r, c), cell) in store.cells() {
            let on_row_edge = r == 0 || r == 3;
            let on_column_edge = c == 0 || c == 4;
            let expected = match (on_row_edge, on_column_edge) {
                (true, true) => 3,
                (true, false) | (false, true) => 5,
                (false, false) => 8,
            };
            assert_eq!(cell.neighbors.len(), expected, "cell at {:?}", (r, c));
        }
    }

    #[test]
    fn neighbors_are_symmetric_and_exclude_self() {
        let store = store_with_hazards(3, 3, &[]);
        for (p, cell) in store.cells() {
            let index = store.index(p).unwrap();
            assert!(!cell.neighbors.contains(index));
            for neighbor in &cell.neighbors {
                assert!(store.by_index(neighbor).unwrap().neighbors.contains(index));
            }
        }
    }

    #[test]
    fn no_wraparound() {
        let neighbors = adjacent((0, 2), 3, 3).collect::<Vec<_>>();
        // (0, 1), (1, 1), (1, 2)
        assert_eq!(neighbors, vec![1, 4, 5]);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        let store = store_with_hazards(1, 1, &[]);
        assert!(store.cell((0, 0)).unwrap().neighbors.is_empty());
    }

    #[test]
    fn counts_match_hazardous_neighbors() {
        let store = store_with_hazards(3, 3, &[(0, 0), (2, 2)]);
        let counts = store
            .cells()
            .map(|(_, cell)| cell.adjacent_hazards)
            .collect::<Vec<_>>();
        assert_eq!(counts[1], 1);
        assert_eq!(counts[3], 1);
        assert_eq!(counts[4], 2);
        assert_eq!(counts[2], 0);
        assert_eq!(counts[5], 1);
        assert_eq!(counts[6], 0);

        for (_, cell) in store.cells().filter(|(_, cell)| !cell.is_hazard()) {
            let expected = cell
                .neighbors
                .iter()
                .filter(|&i| store.by_index(i).unwrap().is_hazard())
                .count();
            assert_eq!(usize::from(cell.adjacent_hazards), expected);
        }
    }

    #[test]
    fn surrounded_cell_counts_eight() {
        let hazards = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ];
        let store = store_with_hazards(3, 3, &hazards);
        assert_eq!(store.cell((1, 1)).unwrap().adjacent_hazards, 8);
    }
}
