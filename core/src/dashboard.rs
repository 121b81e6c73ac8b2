use serde::{Deserialize, Serialize};

use crate::*;

/// Owns the board for the lifetime of one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    grid: Grid,
}

impl Dashboard {
    /// Creates a board of the given size with every cell filled.
    pub fn new<G: KindGenerator + ?Sized>(width: Dim, height: Dim, generator: &mut G) -> Result<Self> {
        let mut grid = Grid::new(width, height)?;
        grid.fill_full_cells(generator);
        log::debug!("Created {}x{} board", width, height);
        Ok(Self { grid })
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Throws the whole board away and fills it again.
    pub fn update_grid_after_action<G: KindGenerator + ?Sized>(&mut self, generator: &mut G) {
        self.grid.fill_empty_cells();
        self.grid.fill_full_cells(generator);
        log::debug!("Grid was reshuffled");
    }
}
