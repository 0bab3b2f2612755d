use tilecraft_common::CellCoord;

/// Why a placement target was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementRejection {
    #[error("target {target} is outside the {size}x{size} grid")]
    OutOfBounds { target: CellCoord, size: u32 },
    #[error("target {target} is {dx},{dy} cells away, reach is {reach}")]
    OutOfReach {
        target: CellCoord,
        dx: u32,
        dy: u32,
        reach: u32,
    },
}

/// Decide whether the player standing on `player` may edit `target`.
///
/// Reach is checked per axis (Chebyshev distance), inclusive: with reach 2,
/// a target two cells away diagonally is allowed. Pure; never touches state.
pub fn validate_placement(
    player: CellCoord,
    target: CellCoord,
    grid_size: u32,
    reach: u32,
) -> Result<(), PlacementRejection> {
    let in_bounds = |v: i32| u32::try_from(v).is_ok_and(|v| v < grid_size);
    if !in_bounds(target.x) || !in_bounds(target.y) {
        return Err(PlacementRejection::OutOfBounds {
            target,
            size: grid_size,
        });
    }
    let (dx, dy) = player.axis_distance(target);
    if dx > reach || dy > reach {
        return Err(PlacementRejection::OutOfReach {
            target,
            dx,
            dy,
            reach,
        });
    }
    Ok(())
}
