use crate::{
    game::Outcome,
    store::{Position, Visibility},
};

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("invalid board configuration {rows}x{columns} with {hazards} hazards: {reason}")]
    InvalidConfiguration {
        rows: usize,
        columns: usize,
        hazards: usize,
        reason: &'static str,
    },

    #[error("position out of bounds: {0:?}")]
    OutOfBounds(Position),

    #[error("cannot act on {visibility:?} cell at {position:?}")]
    IllegalTransition {
        position: Position,
        visibility: Visibility,
    },

    #[error("game is over ({0:?}), no further moves are accepted")]
    GameOver(Outcome),

    #[error("failed to draw to terminal")]
    DrawToTerminal(#[source] std::io::Error),

    #[error("failed to get input event")]
    GetEvent(#[source] std::sync::mpsc::RecvError),

    #[error("failed to get ctrlc handler")]
    SetHandler(#[source] ctrlc::Error),

    #[error("failed to get stdout in raw mode")]
    GetStdoutInRawMode(#[source] std::io::Error),

    #[error("failed to get alternate screen for mouse terminal")]
    GetAlternateScreenForMouseTerminal(#[source] std::io::Error),

    #[error("failed to create terminal object")]
    CreateTerminal(#[source] std::io::Error),

    #[error("failed to convert usize to u16")]
    ConvertUsizeToU16(#[source] std::num::TryFromIntError),
}
