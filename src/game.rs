use crate::{
    board::Board,
    error::Error,
    flag,
    reveal::{self, Reveal},
    store::{Kind, Position, Visibility},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    InProgress,
    Win,
    Loss,
}

impl Outcome {
    pub(crate) fn is_over(self) -> bool {
        self != Self::InProgress
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Reveal,
    ToggleFlag,
}

/// A single player move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Intent {
    pub(crate) action: Action,
    pub(crate) position: Position,
}

/// What an accepted intent did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Response {
    /// The cell is flagged; revealing it was refused.
    Protected,
    Revealed(usize),
    Detonated,
    Flagged,
    Unflagged,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct CellSnapshot {
    /// Only known once the cell is revealed or the game is over.
    pub(crate) kind: Option<Kind>,
    pub(crate) visibility: Visibility,
    pub(crate) adjacent_hazards: u8,
    pub(crate) detonated: bool,
}

/// A read-only view of the game for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) rows: usize,
    pub(crate) columns: usize,
    pub(crate) hazards: usize,
    pub(crate) flags: usize,
    pub(crate) outcome: Outcome,
    cells: Vec<CellSnapshot>,
}

impl Snapshot {
    pub(crate) fn cell(&self, (r, c): Position) -> Option<&CellSnapshot> {
        if r < self.rows && c < self.columns {
            self.cells.get(r * self.columns + c)
        } else {
            None
        }
    }
}

/// Mediates every move on a [`Board`] and decides when the game is over.
#[derive(Debug)]
pub(crate) struct Game {
    board: Board,
    remaining_hazards: usize,
    flags: usize,
    outcome: Outcome,
    detonated: Option<Position>,
}

impl Game {
    pub(crate) fn new(board: Board) -> Self {
        Self {
            remaining_hazards: board.hazards(),
            board,
            flags: 0,
            outcome: Outcome::InProgress,
            detonated: None,
        }
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Hazards not yet covered by a flag.
    pub(crate) fn remaining_hazards(&self) -> usize {
        self.remaining_hazards
    }

    pub(crate) fn detonated(&self) -> Option<Position> {
        self.detonated
    }

    pub(crate) fn apply(&mut self, Intent { action, position }: Intent) -> Result<Response, Error> {
        match action {
            Action::Reveal => self.reveal(position),
            Action::ToggleFlag => self.toggle_flag(position),
        }
    }

    pub(crate) fn reveal(&mut self, position: Position) -> Result<Response, Error> {
        self.ensure_in_progress()?;

        let response = match self.board.cell(position)?.visibility {
            Visibility::Flagged => {
                log::info!("refusing to reveal flagged cell at {position:?}");
                Response::Protected
            }
            Visibility::Revealed => {
                return Err(Error::IllegalTransition {
                    position,
                    visibility: Visibility::Revealed,
                })
            }
            Visibility::Hidden => match reveal::reveal(self.board.store_mut(), position)? {
                Reveal::Detonated => {
                    self.detonated = Some(position);
                    self.finish(Outcome::Loss);
                    Response::Detonated
                }
                Reveal::Revealed(count) => Response::Revealed(count),
            },
        };

        self.check_win();
        Ok(response)
    }

    pub(crate) fn toggle_flag(&mut self, position: Position) -> Result<Response, Error> {
        self.ensure_in_progress()?;

        let flag = flag::toggle_flag(self.board.store_mut(), position)?;
        self.remaining_hazards = self
            .remaining_hazards
            .checked_add_signed(flag.hazard_delta())
            .unwrap_or_default();

        let response = if flag.flagged {
            self.flags += 1;
            Response::Flagged
        } else {
            self.flags = self.flags.saturating_sub(1);
            Response::Unflagged
        };

        self.check_win();
        Ok(response)
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        let over = self.outcome.is_over();
        let cells = self
            .board
            .store()
            .cells()
            .map(|(position, cell)| CellSnapshot {
                kind: (over || cell.visibility == Visibility::Revealed).then_some(cell.kind),
                visibility: cell.visibility,
                adjacent_hazards: cell.adjacent_hazards,
                detonated: self.detonated == Some(position),
            })
            .collect();

        Snapshot {
            rows: self.board.rows(),
            columns: self.board.columns(),
            hazards: self.board.hazards(),
            flags: self.flags,
            outcome: self.outcome,
            cells,
        }
    }

    fn ensure_in_progress(&self) -> Result<(), Error> {
        if self.outcome.is_over() {
            log::info!("ignoring move after the game ended: {:?}", self.outcome);
            Err(Error::GameOver(self.outcome))
        } else {
            Ok(())
        }
    }

    // the game is won as soon as every hazard carries a flag, whatever is
    // still hidden
    fn check_win(&mut self) {
        if self.outcome == Outcome::InProgress && self.remaining_hazards == 0 {
            self.finish(Outcome::Win);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        log::info!("game over: {outcome:?}");
        self.outcome = outcome;
    }
}
