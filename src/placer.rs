use crate::store::{CellStore, Kind};
use bit_set::BitSet;
use rand::Rng;

/// Choose `hazards` distinct cells uniformly at random and mark them as hazards.
///
/// Rejection sampling: a random row and column are drawn until enough distinct
/// positions have been collected. The caller guarantees `hazards < store.len()`,
/// otherwise this never terminates.
///
/// Returns the row-major indices of the chosen cells.
pub(crate) fn place_hazards<R: Rng>(
    store: &mut CellStore,
    hazards: usize,
    rng: &mut R,
) -> BitSet {
    debug_assert!(hazards < store.len());

    let rows = store.rows();
    let columns = store.columns();
    let mut chosen = BitSet::with_capacity(store.len());
    let mut placed = 0;
    let mut draws = 0_usize;

    while placed < hazards {
        let row = rng.gen_range(0..rows);
        let column = rng.gen_range(0..columns);
        draws += 1;
        placed += usize::from(chosen.insert(row * columns + column));
    }

    for index in &chosen {
        if let Some(cell) = store.by_index_mut(index) {
            cell.kind = Kind::Hazard;
        }
    }

    log::debug!("placed {placed} hazards in {draws} draws");
    chosen
}
