#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub lit_chance: f64,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, lit_chance: f64) -> Self {
        Self { size, lit_chance }
    }

    pub fn new(size: Coord2, lit_chance: f64) -> Result<Self> {
        if size.0 < 1 || size.1 < 1 {
            return Err(GameError::InvalidSize);
        }
        if !(0.0..=1.0).contains(&lit_chance) {
            return Err(GameError::InvalidLitChance);
        }
        Ok(Self::new_unchecked(size, lit_chance))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((5, 5), 0.25)
    }
}

/// The board itself: which cells are currently lit.
///
/// The mask is the single source of truth; winning is always recomputed from
/// it, never cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    lit_mask: Array2<bool>,
}

impl Grid {
    pub fn from_lit_mask(lit_mask: Array2<bool>) -> Self {
        Self { lit_mask }
    }

    pub fn from_lit_coords(size: Coord2, lit_coords: &[Coord2]) -> Result<Self> {
        let mut lit_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in lit_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            lit_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_lit_mask(lit_mask))
    }

    /// An all-unlit grid of the given size.
    pub fn dark(size: Coord2) -> Self {
        Self::from_lit_mask(Array2::default(size.to_nd_index()))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.lit_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.lit_mask.len().try_into().unwrap()
    }

    pub fn lit_count(&self) -> CellCount {
        self.lit_mask
            .iter()
            .filter(|&&lit| lit)
            .count()
            .try_into()
            .unwrap()
    }

    pub fn is_lit(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    /// True iff every cell is unlit.
    pub fn is_cleared(&self) -> bool {
        !self.lit_mask.iter().any(|&lit| lit)
    }

    /// Toggles the target cell and its in-bounds orthogonal neighbors.
    ///
    /// An out-of-bounds target toggles nothing; neighbors that fall off the
    /// board are skipped rather than rejected.
    pub fn flip_around(&mut self, coords: Coord2) -> FlipOutcome {
        if !self.in_bounds(coords) {
            return FlipOutcome::NoChange;
        }

        self.lit_mask[coords.to_nd_index()] ^= true;
        for pos in self.lit_mask.iter_neighbors(coords) {
            self.lit_mask[pos.to_nd_index()] ^= true;
        }

        if self.is_cleared() {
            FlipOutcome::Cleared
        } else {
            FlipOutcome::Flipped
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.lit_mask[(x as usize, y as usize)]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, (x, y): Coord2) -> &mut Self::Output {
        &mut self.lit_mask[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    Flipped,
    Cleared,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            NoChange => false,
            Flipped => true,
            Cleared => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_zero_dimension() {
        assert_eq!(GameConfig::new((0, 5), 0.25), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new((5, 0), 0.25), Err(GameError::InvalidSize));
    }

    #[test]
    fn config_rejects_out_of_range_lit_chance() {
        assert_eq!(
            GameConfig::new((5, 5), -0.1),
            Err(GameError::InvalidLitChance)
        );
        assert_eq!(
            GameConfig::new((5, 5), 1.1),
            Err(GameError::InvalidLitChance)
        );
        assert!(GameConfig::new((5, 5), 0.0).is_ok());
        assert!(GameConfig::new((5, 5), 1.0).is_ok());
    }

    #[test]
    fn from_lit_coords_rejects_out_of_bounds() {
        assert_eq!(
            Grid::from_lit_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn interior_flip_toggles_exactly_five_cells() {
        let mut grid = Grid::dark((3, 3));

        assert_eq!(grid.flip_around((1, 1)), FlipOutcome::Flipped);

        assert_eq!(grid.lit_count(), 5);
        for coords in [(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)] {
            assert!(grid.is_lit(coords), "expected {:?} lit", coords);
        }
    }

    #[test]
    fn corner_flip_toggles_exactly_three_cells() {
        let mut grid = Grid::dark((3, 3));

        grid.flip_around((0, 0));

        assert_eq!(grid.lit_count(), 3);
        for coords in [(0, 0), (1, 0), (0, 1)] {
            assert!(grid.is_lit(coords), "expected {:?} lit", coords);
        }
    }

    #[test]
    fn flip_is_self_inverse() {
        let mut grid = Grid::from_lit_coords((4, 3), &[(0, 2), (3, 1), (1, 1)]).unwrap();
        let before = grid.clone();

        grid.flip_around((2, 1));
        assert_ne!(grid, before);

        grid.flip_around((2, 1));
        assert_eq!(grid, before);
    }

    #[test]
    fn flip_out_of_bounds_is_a_no_op() {
        let mut grid = Grid::from_lit_coords((2, 2), &[(0, 0)]).unwrap();
        let before = grid.clone();

        assert_eq!(grid.flip_around((2, 0)), FlipOutcome::NoChange);
        assert_eq!(grid.flip_around((0, 7)), FlipOutcome::NoChange);
        assert_eq!(grid, before);
    }

    #[test]
    fn clearing_the_last_lit_cells_reports_cleared() {
        // center flip on a dark 3x3 lights the plus shape, flipping it again
        // clears the board
        let mut grid = Grid::dark((3, 3));

        assert_eq!(grid.flip_around((1, 1)), FlipOutcome::Flipped);
        assert!(!grid.is_cleared());

        assert_eq!(grid.flip_around((1, 1)), FlipOutcome::Cleared);
        assert!(grid.is_cleared());
    }

    #[test]
    fn is_cleared_on_degenerate_grids() {
        assert!(Grid::dark((1, 1)).is_cleared());
        assert!(!Grid::from_lit_coords((1, 1), &[(0, 0)]).unwrap().is_cleared());
    }
}
