use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid dimensions must be at least 1x1")]
    InvalidSize,
    #[error("Lit chance must be within [0, 1]")]
    InvalidLitChance,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already won, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
