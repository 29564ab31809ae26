use crate::{
    error::Error,
    store::{CellStore, Position, Visibility},
};

/// The result of a flag toggle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Flag {
    pub(crate) flagged: bool,
    pub(crate) hazard: bool,
}

impl Flag {
    /// Change to the outstanding hazard counter: flagging a hazard takes one
    /// off, unflagging one puts it back. Safe cells never count.
    pub(crate) fn hazard_delta(&self) -> isize {
        match (self.hazard, self.flagged) {
            (false, _) => 0,
            (true, true) => -1,
            (true, false) => 1,
        }
    }
}

pub(crate) fn toggle_flag(store: &mut CellStore, position: Position) -> Result<Flag, Error> {
    let cell = store.cell_mut(position)?;
    cell.visibility = match cell.visibility {
        Visibility::Hidden => Visibility::Flagged,
        Visibility::Flagged => Visibility::Hidden,
        Visibility::Revealed => {
            return Err(Error::IllegalTransition {
                position,
                visibility: Visibility::Revealed,
            })
        }
    };

    Ok(Flag {
        flagged: cell.visibility == Visibility::Flagged,
        hazard: cell.is_hazard(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Kind;

    #[test]
    fn toggles_between_hidden_and_flagged() {
        let mut store = CellStore::new(2, 2);
        let flag = toggle_flag(&mut store, (0, 1)).unwrap();
        assert_eq!(
            flag,
            Flag {
                flagged: true,
                hazard: false
            }
        );
        assert_eq!(store.cell((0, 1)).unwrap().visibility, Visibility::Flagged);

        let flag = toggle_flag(&mut store, (0, 1)).unwrap();
        assert!(!flag.flagged);
        assert_eq!(store.cell((0, 1)).unwrap().visibility, Visibility::Hidden);
    }

    #[test]
    fn hazard_delta_round_trips() {
        let mut store = CellStore::new(2, 2);
        store.cell_mut((1, 1)).unwrap().kind = Kind::Hazard;
        let on = toggle_flag(&mut store, (1, 1)).unwrap();
        let off = toggle_flag(&mut store, (1, 1)).unwrap();
        assert_eq!(on.hazard_delta(), -1);
        assert_eq!(off.hazard_delta(), 1);

        let safe = toggle_flag(&mut store, (0, 0)).unwrap();
        assert_eq!(safe.hazard_delta(), 0);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut store = CellStore::new(1, 1);
        store.cell_mut((0, 0)).unwrap().visibility = Visibility::Revealed;
        assert!(matches!(
            toggle_flag(&mut store, (0, 0)),
            Err(Error::IllegalTransition { .. })
        ));
        assert_eq!(store.cell((0, 0)).unwrap().visibility, Visibility::Revealed);
    }

    #[test]
    fn out_of_bounds() {
        let mut store = CellStore::new(1, 1);
        assert!(matches!(
            toggle_flag(&mut store, (1, 0)),
            Err(Error::OutOfBounds((1, 0)))
        ));
    }
}
