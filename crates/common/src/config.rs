use glam::IVec2;
use serde::{Deserialize, Deserializer, Serialize};

/// Errors from building a `WorldConfig`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("world dimension {world_dim}px is smaller than the grid size {grid_size}")]
    WorldTooSmall { grid_size: u32, world_dim: u32 },
    #[error("world dimension {0}px does not fit in pixel coordinates")]
    WorldTooLarge(u32),
}

/// Fixed geometry of a session: grid dimension, world size in pixels and the
/// placement reach. Immutable for the lifetime of a session.
///
/// Deserializing goes through `WorldConfig::new`, so a stored config is
/// validated like any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorldConfig {
    grid_size: u32,
    world_dim: u32,
    reach: u32,
}

impl<'de> Deserialize<'de> for WorldConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            grid_size: u32,
            world_dim: u32,
            reach: u32,
        }

        let f = Fields::deserialize(deserializer)?;
        Self::new(f.grid_size, f.world_dim, f.reach).map_err(serde::de::Error::custom)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            world_dim: 512,
            reach: 2,
        }
    }
}

impl WorldConfig {
    pub fn new(grid_size: u32, world_dim: u32, reach: u32) -> Result<Self, ConfigError> {
        if grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if world_dim < grid_size {
            return Err(ConfigError::WorldTooSmall {
                grid_size,
                world_dim,
            });
        }
        if i32::try_from(world_dim).is_err() {
            return Err(ConfigError::WorldTooLarge(world_dim));
        }
        Ok(Self {
            grid_size,
            world_dim,
            reach,
        })
    }

    /// Number of cells along each axis (N).
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Side length of the rendered world in pixels.
    pub fn world_dim(&self) -> u32 {
        self.world_dim
    }

    /// Maximum per-axis cell distance at which the player may place.
    pub fn reach(&self) -> u32 {
        self.reach
    }

    /// Pixel size of one cell. Integer division: 512 / 10 = 51.
    pub fn cell_size(&self) -> i32 {
        (self.world_dim / self.grid_size) as i32
    }

    /// Largest legal player coordinate on either axis.
    pub fn max_position(&self) -> i32 {
        self.world_dim as i32 - self.cell_size()
    }

    /// Where a new player appears: the center of the world.
    pub fn spawn_position(&self) -> IVec2 {
        IVec2::splat(self.world_dim as i32 / 2)
    }
}
