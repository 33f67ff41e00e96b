use crate::building::ExtWallsType;

/// Loss of each interior wall crossed (dB).
pub const INTERNAL_WALL_LOSS_DB: f64 = 5.0;

/// Building entry loss through an exterior wall.
pub fn external_wall_loss(walls: ExtWallsType) -> f64 {
    match walls {
        ExtWallsType::Wood => 4.0,
        ExtWallsType::ConcreteWithWindows => 7.0,
        ExtWallsType::ConcreteWithoutWindows => 15.0,
        ExtWallsType::StoneBlocks => 12.0,
    }
}

/// Loss of the interior walls between two rooms of a regular room
/// grid, one wall per room step along each axis.
pub fn internal_walls_loss(a: (u16, u16), b: (u16, u16)) -> f64 {
    let walls = a.0.abs_diff(b.0) + a.1.abs_diff(b.1);
    INTERNAL_WALL_LOSS_DB * f64::from(walls)
}

/// Height gain of an endpoint on the 1-based `floor`: 2 dB less loss
/// for every floor above the ground floor.
pub fn height_loss(floor: u16) -> f64 {
    -2.0 * f64::from(floor.saturating_sub(1))
}
