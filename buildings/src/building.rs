use crate::{error::BuildingsError, mobility::Position};
use std::fmt;

/// Opaque building identifier.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingId(pub u32);

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Building usage, which selects the indoor propagation coefficients.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingType {
    Residential,
    Office,
    Commercial,
}

/// Construction of a building's exterior walls.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtWallsType {
    Wood,
    ConcreteWithWindows,
    ConcreteWithoutWindows,
    StoneBlocks,
}

/// Axis aligned box occupied by a building.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Position,
    pub max: Position,
}

impl Bounds {
    pub fn contains(&self, pos: Position) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x)
            && (self.min.y..=self.max.y).contains(&pos.y)
            && (self.min.z..=self.max.z).contains(&pos.z)
    }
}

/// A building subdivided into a regular grid of floors and rooms.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    id: BuildingId,
    bounds: Bounds,
    building_type: BuildingType,
    ext_walls_type: ExtWallsType,
    floors: u16,
    rooms_x: u16,
    rooms_y: u16,
}

impl Building {
    pub fn builder() -> BuildingBuilder {
        BuildingBuilder {
            id: None,
            bounds: None,
            building_type: BuildingType::Residential,
            ext_walls_type: ExtWallsType::ConcreteWithWindows,
            floors: 1,
            rooms_x: 1,
            rooms_y: 1,
        }
    }

    pub fn id(&self) -> BuildingId {
        self.id
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn building_type(&self) -> BuildingType {
        self.building_type
    }

    pub fn ext_walls_type(&self) -> ExtWallsType {
        self.ext_walls_type
    }

    pub fn floors(&self) -> u16 {
        self.floors
    }

    pub fn rooms(&self) -> (u16, u16) {
        (self.rooms_x, self.rooms_y)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.bounds.contains(pos)
    }

    /// Returns the 1-based floor at height `z`.
    ///
    /// Heights outside the building are clamped to the ground or top
    /// floor.
    pub fn floor_at(&self, z: f64) -> u16 {
        grid_index(self.bounds.min.z, self.bounds.max.z, self.floors, z)
    }

    /// Returns the 1-based `(x, y)` room containing the horizontal
    /// coordinate.
    pub fn room_at(&self, x: f64, y: f64) -> (u16, u16) {
        (
            grid_index(self.bounds.min.x, self.bounds.max.x, self.rooms_x, x),
            grid_index(self.bounds.min.y, self.bounds.max.y, self.rooms_y, y),
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grid_index(lo: f64, hi: f64, cells: u16, v: f64) -> u16 {
    let size = (hi - lo) / f64::from(cells);
    let idx = ((v - lo) / size).floor().max(0.0) as u16;
    idx.min(cells - 1) + 1
}

pub struct BuildingBuilder {
    id: Option<BuildingId>,
    bounds: Option<Bounds>,
    building_type: BuildingType,
    ext_walls_type: ExtWallsType,
    floors: u16,
    rooms_x: u16,
    rooms_y: u16,
}

impl BuildingBuilder {
    /// Building identifier (required).
    #[must_use]
    pub fn id(mut self, id: BuildingId) -> Self {
        self.id = Some(id);
        self
    }

    /// Space occupied by the building (required).
    #[must_use]
    pub fn bounds(mut self, min: Position, max: Position) -> Self {
        self.bounds = Some(Bounds { min, max });
        self
    }

    /// Building usage (defaults to `Residential`).
    #[must_use]
    pub fn building_type(mut self, building_type: BuildingType) -> Self {
        self.building_type = building_type;
        self
    }

    /// Exterior wall construction (defaults to `ConcreteWithWindows`).
    #[must_use]
    pub fn ext_walls_type(mut self, ext_walls_type: ExtWallsType) -> Self {
        self.ext_walls_type = ext_walls_type;
        self
    }

    /// Number of floors (defaults to 1).
    #[must_use]
    pub fn floors(mut self, floors: u16) -> Self {
        self.floors = floors;
        self
    }

    /// Number of rooms along x and y on each floor (defaults to 1x1).
    #[must_use]
    pub fn rooms(mut self, rooms_x: u16, rooms_y: u16) -> Self {
        self.rooms_x = rooms_x;
        self.rooms_y = rooms_y;
        self
    }

    pub fn build(&self) -> Result<Building, BuildingsError> {
        let id = self.id.ok_or(BuildingsError::Builder("id"))?;
        let bounds = self.bounds.ok_or(BuildingsError::Builder("bounds"))?;

        let Bounds { min, max } = bounds;
        if !(min.x < max.x && min.y < max.y && min.z < max.z) {
            return Err(BuildingsError::InvalidBuilding(id, "empty bounds"));
        }
        if min.z < 0.0 {
            return Err(BuildingsError::InvalidBuilding(id, "underground bounds"));
        }
        if self.floors == 0 {
            return Err(BuildingsError::InvalidBuilding(id, "zero floors"));
        }
        if self.rooms_x == 0 || self.rooms_y == 0 {
            return Err(BuildingsError::InvalidBuilding(id, "zero rooms"));
        }

        Ok(Building {
            id,
            bounds,
            building_type: self.building_type,
            ext_walls_type: self.ext_walls_type,
            floors: self.floors,
            rooms_x: self.rooms_x,
            rooms_y: self.rooms_y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Building, BuildingId, BuildingsError, Position};

    fn tower() -> Building {
        Building::builder()
            .id(BuildingId(7))
            .bounds(Position::new(0.0, 0.0, 0.0), Position::new(40.0, 20.0, 30.0))
            .floors(10)
            .rooms(4, 2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_missing_bounds() {
        let err = Building::builder().id(BuildingId(1)).build().unwrap_err();
        assert_eq!(err, BuildingsError::Builder("bounds"));
    }

    #[test]
    fn test_rejects_degenerate() {
        let err = Building::builder()
            .id(BuildingId(1))
            .bounds(Position::new(0.0, 0.0, 0.0), Position::new(10.0, 10.0, 0.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildingsError::InvalidBuilding(BuildingId(1), _)));

        let err = Building::builder()
            .id(BuildingId(2))
            .bounds(Position::new(0.0, 0.0, 0.0), Position::new(10.0, 10.0, 3.0))
            .floors(0)
            .build()
            .unwrap_err();
        assert_eq!(err, BuildingsError::InvalidBuilding(BuildingId(2), "zero floors"));
    }

    #[test]
    fn test_floor_at() {
        let b = tower();
        assert_eq!(b.floor_at(0.0), 1);
        assert_eq!(b.floor_at(2.9), 1);
        assert_eq!(b.floor_at(3.1), 2);
        assert_eq!(b.floor_at(29.9), 10);
        // Roof and above clamp to the top floor.
        assert_eq!(b.floor_at(30.0), 10);
        assert_eq!(b.floor_at(45.0), 10);
    }

    #[test]
    fn test_room_at() {
        let b = tower();
        assert_eq!(b.room_at(1.0, 1.0), (1, 1));
        assert_eq!(b.room_at(39.0, 19.0), (4, 2));
        assert_eq!(b.room_at(15.0, 10.5), (2, 2));
    }

    #[test]
    fn test_contains() {
        let b = tower();
        assert!(b.contains(Position::new(20.0, 10.0, 5.0)));
        assert!(b.contains(Position::new(40.0, 20.0, 30.0)));
        assert!(!b.contains(Position::new(41.0, 10.0, 5.0)));
        assert!(!b.contains(Position::new(20.0, 10.0, 31.0)));
    }
}
