use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    InProgress,
    Won,
}

impl EngineState {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// One game session: owns the grid and tracks the win state machine.
///
/// A freshly generated all-dark grid starts out already won; the design does
/// not special-case that anticlimax. Once won, further flips are rejected
/// with [`GameError::AlreadyEnded`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    grid: Grid,
    state: EngineState,
}

impl PlayEngine {
    pub fn new(grid: Grid) -> Self {
        let state = if grid.is_cleared() {
            EngineState::Won
        } else {
            EngineState::InProgress
        };
        Self { grid, state }
    }

    pub fn from_config(config: GameConfig, generator: impl GridGenerator) -> Self {
        Self::new(generator.generate(config))
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn lit_count(&self) -> CellCount {
        self.grid.lit_count()
    }

    pub fn is_lit(&self, coords: Coord2) -> bool {
        self.grid.is_lit(coords)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Applies one move: flips the target cell and its orthogonal neighbors,
    /// then re-evaluates the win condition.
    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        self.check_in_progress()?;

        let outcome = self.grid.flip_around(coords);
        if matches!(outcome, FlipOutcome::Cleared) {
            self.state = EngineState::Won;
        }

        Ok(outcome)
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_won() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: Coord2, lit: &[Coord2]) -> Grid {
        Grid::from_lit_coords(size, lit).unwrap()
    }

    #[test]
    fn flip_that_clears_the_board_transitions_to_won() {
        // the lit plus shape is exactly what a center flip toggles
        let mut engine = PlayEngine::new(grid((3, 3), &[(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)]));
        assert_eq!(engine.state(), EngineState::InProgress);

        let outcome = engine.flip((1, 1)).unwrap();

        assert_eq!(outcome, FlipOutcome::Cleared);
        assert_eq!(engine.state(), EngineState::Won);
        assert!(engine.is_won());
    }

    #[test]
    fn flip_that_leaves_lit_cells_stays_in_progress() {
        let mut engine = PlayEngine::new(grid((3, 3), &[(0, 0)]));

        let outcome = engine.flip((2, 2)).unwrap();

        assert_eq!(outcome, FlipOutcome::Flipped);
        assert_eq!(engine.state(), EngineState::InProgress);
    }

    #[test]
    fn out_of_bounds_flip_is_accepted_but_changes_nothing() {
        let mut engine = PlayEngine::new(grid((2, 2), &[(1, 1)]));

        let outcome = engine.flip((9, 9)).unwrap();

        assert_eq!(outcome, FlipOutcome::NoChange);
        assert_eq!(engine.lit_count(), 1);
    }

    #[test]
    fn moves_after_winning_are_rejected() {
        let mut engine = PlayEngine::new(grid((2, 2), &[(0, 0), (1, 0), (0, 1)]));

        assert_eq!(engine.flip((0, 0)).unwrap(), FlipOutcome::Cleared);
        assert_eq!(engine.flip((0, 0)), Err(GameError::AlreadyEnded));
        assert!(engine.is_won());
    }

    #[test]
    fn all_dark_grid_starts_already_won() {
        let engine = PlayEngine::new(Grid::dark((4, 4)));

        assert_eq!(engine.state(), EngineState::Won);
    }

    #[test]
    fn center_flip_on_three_by_three_clears_the_plus_shape() {
        let mut engine = PlayEngine::new(grid((3, 3), &[(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)]));

        assert_eq!(engine.lit_count(), 5);
        assert!(engine.is_lit((1, 1)));
        assert!(!engine.is_lit((0, 0)));

        assert_eq!(engine.flip((1, 1)).unwrap(), FlipOutcome::Cleared);
        assert_eq!(engine.lit_count(), 0);
    }
}
