use super::*;
use ndarray::Array2;

/// Generation strategy that lights each cell independently with the configured
/// chance, nothing else.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: GameConfig) -> Grid {
        use rand::prelude::*;

        let lit_chance = if (0.0..=1.0).contains(&config.lit_chance) {
            config.lit_chance
        } else {
            log::warn!(
                "Lit chance {} out of range, clamped; validate the config instead",
                config.lit_chance
            );
            config.lit_chance.clamp(0.0, 1.0)
        };

        // optimize for the degenerate chances
        if lit_chance == 0.0 {
            return Grid::dark(config.size);
        }
        if lit_chance == 1.0 {
            return Grid::from_lit_mask(Array2::from_elem(config.size.to_nd_index(), true));
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut lit_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for lit in lit_mask.iter_mut() {
            *lit = rng.random_bool(lit_chance);
        }

        Grid::from_lit_mask(lit_mask)
    }
}
