use glam::IVec2;
use tilecraft_common::{CellCoord, Direction, WorldConfig};

/// The player's continuous position in world pixel space.
///
/// The occupied cell is always derived from the position, never stored.
/// Movement ignores the grid entirely: tiles do not block the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    position: IVec2,
    cell_size: i32,
    max_position: i32,
}

impl PlayerState {
    /// A player at the center of the world.
    pub fn spawn(config: &WorldConfig) -> Self {
        Self::at(config, config.spawn_position())
    }

    /// A player at `position`, clamped into the legal range.
    pub fn at(config: &WorldConfig, position: IVec2) -> Self {
        let max_position = config.max_position();
        Self {
            position: position.clamp(IVec2::ZERO, IVec2::splat(max_position)),
            cell_size: config.cell_size(),
            max_position,
        }
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Side length of the player marker, and the distance of one step.
    pub fn size(&self) -> i32 {
        self.cell_size
    }

    /// The grid cell under the player's top-left corner.
    pub fn cell(&self) -> CellCoord {
        CellCoord::from_pixel(self.position, self.cell_size)
    }

    /// Move one cell-size step. Motion past either edge is clamped silently.
    pub fn step(&mut self, direction: Direction) {
        let next = self.position + direction.offset() * self.cell_size;
        self.position = next.clamp(IVec2::ZERO, IVec2::splat(self.max_position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WorldConfig {
        WorldConfig::default()
    }

    #[test]
    fn spawns_at_center_cell() {
        let p = PlayerState::spawn(&config());
        assert_eq!(p.position(), IVec2::new(256, 256));
        assert_eq!(p.cell(), CellCoord::new(5, 5));
        assert_eq!(p.size(), 51);
    }

    #[test]
    fn steps_one_cell_size() {
        let mut p = PlayerState::spawn(&config());
        p.step(Direction::Right);
        assert_eq!(p.position(), IVec2::new(307, 256));
        p.step(Direction::Up);
        assert_eq!(p.position(), IVec2::new(307, 205));
        p.step(Direction::Left);
        p.step(Direction::Down);
        assert_eq!(p.position(), IVec2::new(256, 256));
    }

    #[test]
    fn left_edge_clamps_at_zero() {
        let mut p = PlayerState::at(&config(), IVec2::new(0, 100));
        for _ in 0..5 {
            p.step(Direction::Left);
        }
        assert_eq!(p.position(), IVec2::new(0, 100));
    }

    #[test]
    fn walking_left_from_center_lands_on_zero() {
        let mut p = PlayerState::spawn(&config());
        for _ in 0..20 {
            p.step(Direction::Left);
            assert!(p.position().x >= 0);
        }
        assert_eq!(p.position().x, 0);
        assert_eq!(p.cell().x, 0);
    }

    #[test]
    fn right_edge_clamps_at_max_position() {
        let cfg = config();
        let max = cfg.max_position();
        let mut p = PlayerState::at(&cfg, IVec2::new(max, max));
        for _ in 0..5 {
            p.step(Direction::Right);
            p.step(Direction::Down);
        }
        assert_eq!(p.position(), IVec2::new(max, max));
        assert_eq!(p.cell(), CellCoord::new(9, 9));
    }

    #[test]
    fn out_of_range_start_is_clamped() {
        let p = PlayerState::at(&config(), IVec2::new(-40, 9000));
        assert_eq!(p.position(), IVec2::new(0, 461));
    }
}
