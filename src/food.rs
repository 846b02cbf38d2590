use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::geometry::{Cell, GridGeometry};

/// Random draws tried before falling back to enumerating free cells.
pub const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Picks food cells uniformly among the cells not excluded by the caller.
#[derive(Debug, Clone)]
pub struct FoodPlacer<R> {
    geometry: GridGeometry,
    rng: R,
}

impl<R: Rng> FoodPlacer<R> {
    #[must_use]
    pub fn new(geometry: GridGeometry, rng: R) -> Self {
        Self { geometry, rng }
    }

    /// Returns a free cell, or `None` when every cell is excluded.
    pub fn place(&mut self, excluded: &HashSet<Cell>) -> Option<Cell> {
        if self.geometry.total_cells() == 0 {
            return None;
        }

        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let cell = self.random_cell();
            if !excluded.contains(&cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = self
            .geometry
            .cells()
            .filter(|cell| !excluded.contains(cell))
            .collect();
        debug!(
            "food placement fell back to enumeration: {} free of {} cells",
            free.len(),
            self.geometry.total_cells()
        );

        if free.is_empty() {
            return None;
        }

        let index = self.rng.gen_range(0..free.len());
        Some(free[index])
    }

    fn random_cell(&mut self) -> Cell {
        Cell {
            col: self.rng.gen_range(0..i32::from(self.geometry.width)),
            row: self.rng.gen_range(0..i32::from(self.geometry.height)),
        }
    }
}
