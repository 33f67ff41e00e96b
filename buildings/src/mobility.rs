//! Endpoint descriptors consumed by the propagation models.

use crate::building::{Building, BuildingId};
use std::sync::Arc;

/// Cartesian position in meters; `z` is height above ground.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight line distance to `other`.
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Where an endpoint sits with respect to the buildings in a
/// scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Outdoor,
    Indoor(Indoor),
}

impl Placement {
    pub fn is_indoor(&self) -> bool {
        matches!(self, Placement::Indoor(_))
    }

    pub fn indoor(&self) -> Option<&Indoor> {
        match self {
            Placement::Outdoor => None,
            Placement::Indoor(indoor) => Some(indoor),
        }
    }
}

/// Location of an indoor endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Indoor {
    pub building: Arc<Building>,

    /// 1-based floor number.
    pub floor: u16,

    /// 1-based room index along x.
    pub room_x: u16,

    /// 1-based room index along y.
    pub room_y: u16,
}

impl Indoor {
    pub fn building_id(&self) -> BuildingId {
        self.building.id()
    }
}

/// Something with a position.
///
/// Only implementors that also report a [`Placement`] can be used
/// with building aware propagation models.
pub trait Mobility {
    fn position(&self) -> Position;

    fn distance_to(&self, other: &dyn Mobility) -> f64 {
        self.position().distance(&other.position())
    }

    /// Indoor/outdoor placement, or `None` when this mobility does
    /// not track buildings.
    fn placement(&self) -> Option<&Placement> {
        None
    }
}

/// A fixed position with no building information.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstantPosition(pub Position);

impl Mobility for ConstantPosition {
    fn position(&self) -> Position {
        self.0
    }
}

/// A fixed position that knows whether, and where, it is indoors.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingsMobility {
    position: Position,
    placement: Placement,
}

impl BuildingsMobility {
    pub fn outdoor(position: Position) -> Self {
        Self {
            position,
            placement: Placement::Outdoor,
        }
    }

    pub fn indoor(
        position: Position,
        building: Arc<Building>,
        floor: u16,
        room_x: u16,
        room_y: u16,
    ) -> Self {
        Self {
            position,
            placement: Placement::Indoor(Indoor {
                building,
                floor,
                room_x,
                room_y,
            }),
        }
    }

    /// Places `position` inside the first of `buildings` that contains
    /// it, deriving floor and room from the building's grid. Positions
    /// outside every building are outdoor.
    pub fn locate(position: Position, buildings: &[Arc<Building>]) -> Self {
        match buildings.iter().find(|b| b.contains(position)) {
            Some(building) => {
                let floor = building.floor_at(position.z);
                let (room_x, room_y) = building.room_at(position.x, position.y);
                Self::indoor(position, Arc::clone(building), floor, room_x, room_y)
            }
            None => Self::outdoor(position),
        }
    }

    pub fn is_indoor(&self) -> bool {
        self.placement.is_indoor()
    }
}

impl Mobility for BuildingsMobility {
    fn position(&self) -> Position {
        self.position
    }

    fn placement(&self) -> Option<&Placement> {
        Some(&self.placement)
    }
}

/// Read-only view of one endpoint for the duration of an evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub position: Position,
    pub placement: &'a Placement,
}

impl<'a> Endpoint<'a> {
    pub fn indoor(&self) -> Option<&'a Indoor> {
        self.placement.indoor()
    }

    pub fn distance(&self, other: &Endpoint<'_>) -> f64 {
        self.position.distance(&other.position)
    }
}
