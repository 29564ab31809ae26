use crate::{
    error::Error,
    store::{CellStore, Position, Visibility},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Reveal {
    /// The cell held a hazard. Nothing was revealed.
    Detonated,
    /// The number of cells newly revealed, including the starting one.
    Revealed(usize),
}

/// Reveal the hidden cell at `position`, cascading through zero-count cells.
///
/// The frontier lives on the heap; a cell's `Revealed` state is its visited
/// marker, so it is set before any of its neighbors are queued. Neighbors are
/// queued in descending index order so that they are popped in ascending order.
pub(crate) fn reveal(store: &mut CellStore, position: Position) -> Result<Reveal, Error> {
    let start = store.index(position)?;
    {
        let cell = store.cell(position)?;
        if cell.visibility != Visibility::Hidden {
            return Err(Error::IllegalTransition {
                position,
                visibility: cell.visibility,
            });
        }
        if cell.is_hazard() {
            return Ok(Reveal::Detonated);
        }
    }

    let mut frontier = vec![start];
    let mut revealed = 0;

    while let Some(index) = frontier.pop() {
        let Some(cell) = store.by_index_mut(index) else {
            continue;
        };
        if !cell.is_hidden() || cell.is_hazard() {
            continue;
        }

        cell.visibility = Visibility::Revealed;
        revealed += 1;

        if cell.adjacent_hazards == 0 {
            let neighbors = cell.neighbors.iter().collect::<Vec<_>>();
            frontier.extend(neighbors.into_iter().rev().filter(|&neighbor| {
                store
                    .by_index(neighbor)
                    .is_some_and(|n| n.is_hidden() && !n.is_hazard())
            }));
        }
    }

    log::trace!("revealed {revealed} cells starting from {position:?}");
    Ok(Reveal::Revealed(revealed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adjacency, store::Kind};

    fn store_with_hazards(rows: usize, columns: usize, hazards: &[Position]) -> CellStore {
        let mut store = CellStore::new(rows, columns);
        for &p in hazards {
            store.cell_mut(p).unwrap().kind = Kind::Hazard;
        }
        adjacency::build(&mut store);
        store
    }

    fn revealed(store: &CellStore) -> Vec<Position> {
        store
            .cells()
            .filter(|(_, cell)| cell.visibility == Visibility::Revealed)
            .map(|(p, _)| p)
            .collect()
    }

    #[test]
    fn hazard_detonates_without_mutation() {
        let mut store = store_with_hazards(3, 3, &[(1, 1)]);
        assert_eq!(reveal(&mut store, (1, 1)).unwrap(), Reveal::Detonated);
        assert!(store.cells().all(|(_, cell)| cell.is_hidden()));
    }

    #[test]
    fn numbered_cell_does_not_cascade() {
        let mut store = store_with_hazards(1, 3, &[(0, 1)]);
        assert_eq!(reveal(&mut store, (0, 0)).unwrap(), Reveal::Revealed(1));
        assert_eq!(store.cell((0, 0)).unwrap().adjacent_hazards, 1);
        assert_eq!(revealed(&store), vec![(0, 0)]);
    }

    #[test]
    fn zero_cell_cascades_up_to_numbered_border() {
        let mut store = store_with_hazards(1, 3, &[(0, 2)]);
        assert_eq!(store.cell((0, 0)).unwrap().adjacent_hazards, 0);
        assert_eq!(store.cell((0, 1)).unwrap().adjacent_hazards, 1);
        assert_eq!(reveal(&mut store, (0, 0)).unwrap(), Reveal::Revealed(2));
        assert_eq!(revealed(&store), vec![(0, 0), (0, 1)]);
        assert!(store.cell((0, 2)).unwrap().is_hidden());
    }

    #[test]
    fn empty_board_reveals_everything() {
        let mut store = store_with_hazards(2, 2, &[]);
        assert_eq!(reveal(&mut store, (1, 0)).unwrap(), Reveal::Revealed(4));
        assert_eq!(revealed(&store).len(), 4);
    }

    #[test]
    fn cascade_skips_flagged_cells() {
        let mut store = store_with_hazards(1, 4, &[]);
        store.cell_mut((0, 2)).unwrap().visibility = Visibility::Flagged;
        assert_eq!(reveal(&mut store, (0, 0)).unwrap(), Reveal::Revealed(2));
        assert_eq!(
            store.cell((0, 2)).unwrap().visibility,
            Visibility::Flagged
        );
        assert!(store.cell((0, 3)).unwrap().is_hidden());
    }

    #[test]
    fn region_is_bounded_by_numbered_cells() {
        // hazard wall down column 2 splits the board
        let hazards = [(0, 2), (1, 2), (2, 2), (3, 2)];
        let mut store = store_with_hazards(4, 5, &hazards);
        reveal(&mut store, (0, 0)).unwrap();
        let cells = revealed(&store);
        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|&(_, c)| c < 2));
    }

    #[test]
    fn large_open_board_does_not_overflow() {
        let mut store = store_with_hazards(400, 400, &[]);
        assert_eq!(
            reveal(&mut store, (200, 200)).unwrap(),
            Reveal::Revealed(400 * 400)
        );
    }

    #[test]
    fn revealing_again_is_rejected_and_changes_nothing() {
        let mut store = store_with_hazards(3, 3, &[]);
        reveal(&mut store, (0, 0)).unwrap();
        let before = revealed(&store);
        assert!(matches!(
            reveal(&mut store, (2, 2)),
            Err(Error::IllegalTransition {
                position: (2, 2),
                visibility: Visibility::Revealed,
            })
        ));
        assert_eq!(revealed(&store), before);
    }

    #[test]
    fn out_of_bounds() {
        let mut store = store_with_hazards(2, 2, &[]);
        assert!(matches!(
            reveal(&mut store, (0, 9)),
            Err(Error::OutOfBounds((0, 9)))
        ));
    }
}
