//! Empirical sub-models composed by the hybrid selector.

mod itu_r1238;
mod itu_r1411;
mod okumura_hata;
mod walls;

pub use self::{
    itu_r1238::itu_r1238,
    itu_r1411::{itu_r1411_los, itu_r1411_nlos_over_rooftop},
    okumura_hata::okumura_hata,
    walls::{external_wall_loss, height_loss, internal_walls_loss, INTERNAL_WALL_LOSS_DB},
};
use crate::{mobility::Endpoint, params::ModelConfig};

/// Speed of light in m/s
const C: f64 = 299_792_458.0;

/// Lowest antenna height (meters) the empirical formulas are fed.
///
/// Ground level endpoints are valid, but the height terms of
/// Okumura-Hata and ITU-R P.1411 diverge at zero.
pub const MIN_ANTENNA_HEIGHT_M: f64 = 1.0;

/// The set of loss formulas a building aware model draws from.
///
/// Every method is a pure function of its endpoints and returns a
/// contribution in dB.
pub trait LossModels {
    /// Long range, over the rooftop macro-cell loss.
    fn okumura_hata(&self, a: &Endpoint<'_>, b: &Endpoint<'_>) -> f64;

    /// Short range street canyon and rooftop diffraction loss.
    fn itu_r1411(&self, a: &Endpoint<'_>, b: &Endpoint<'_>) -> f64;

    /// Indoor loss between two endpoints in the same building.
    fn itu_r1238(&self, a: &Endpoint<'_>, b: &Endpoint<'_>) -> f64;

    /// Penetration loss of the exterior wall of `e`'s building.
    fn external_wall_loss(&self, e: &Endpoint<'_>) -> f64;

    /// Penetration loss of the interior walls between `a` and `b`.
    fn internal_walls_loss(&self, a: &Endpoint<'_>, b: &Endpoint<'_>) -> f64;

    /// Height gain correction for `e`'s floor.
    fn height_loss(&self, e: &Endpoint<'_>) -> f64;
}

/// The established empirical formulas, parameterized by a
/// [`ModelConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StandardModels {
    config: ModelConfig,
}

impl StandardModels {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

impl LossModels for StandardModels {
    fn okumura_hata(&self, a: &Endpoint<'_>, b: &Endpoint<'_>) -> f64 {
        okumura_hata(&self.config, a.position, b.position)
    }

    fn itu_r1411(&self, a: &Endpoint<'_>, b: &Endpoint<'_>) -> f64 {
        if a.distance(b) < self.config.nlos_threshold_m {
            itu_r1411_los(&self.config, a.position, b.position)
        } else {
            itu_r1411_nlos_over_rooftop(&self.config, a.position, b.position)
        }
    }

    fn itu_r1238(&self, a: &Endpoint<'_>, b: &Endpoint<'_>) -> f64 {
        let building_type = a
            .indoor()
            .or_else(|| b.indoor())
            .map(|indoor| indoor.building.building_type());
        let floor = |e: &Endpoint<'_>| e.indoor().map_or(1, |indoor| indoor.floor);
        itu_r1238(
            &self.config,
            building_type,
            floor(a).abs_diff(floor(b)),
            a.distance(b),
        )
    }

    fn external_wall_loss(&self, e: &Endpoint<'_>) -> f64 {
        e.indoor().map_or(0.0, |indoor| {
            external_wall_loss(indoor.building.ext_walls_type())
        })
    }

    fn internal_walls_loss(&self, a: &Endpoint<'_>, b: &Endpoint<'_>) -> f64 {
        match (a.indoor(), b.indoor()) {
            (Some(a), Some(b)) => internal_walls_loss((a.room_x, a.room_y), (b.room_x, b.room_y)),
            _ => 0.0,
        }
    }

    fn height_loss(&self, e: &Endpoint<'_>) -> f64 {
        e.indoor().map_or(0.0, |indoor| height_loss(indoor.floor))
    }
}

/// Returns `(hb, hm)`, the base station and mobile heights: the
/// higher and the lower endpoint, each at least
/// [`MIN_ANTENNA_HEIGHT_M`].
fn base_and_mobile(a: f64, b: f64) -> (f64, f64) {
    let (a, b) = (a.max(MIN_ANTENNA_HEIGHT_M), b.max(MIN_ANTENNA_HEIGHT_M));
    if a > b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::{LossModels, StandardModels};
    use crate::{
        building::{Building, BuildingId, BuildingType, ExtWallsType},
        mobility::{Endpoint, Placement, Position},
    };
    use assert_approx_eq::assert_approx_eq;
    use std::sync::Arc;

    fn office() -> Arc<Building> {
        Arc::new(
            Building::builder()
                .id(BuildingId(1))
                .bounds(Position::new(0.0, 0.0, 0.0), Position::new(60.0, 60.0, 30.0))
                .building_type(BuildingType::Office)
                .ext_walls_type(ExtWallsType::StoneBlocks)
                .floors(10)
                .rooms(6, 6)
                .build()
                .unwrap(),
        )
    }

    fn indoor(building: &Arc<Building>, floor: u16, room: (u16, u16)) -> Placement {
        Placement::Indoor(crate::mobility::Indoor {
            building: Arc::clone(building),
            floor,
            room_x: room.0,
            room_y: room.1,
        })
    }

    #[test]
    fn test_outdoor_corrections_are_zero() {
        let models = StandardModels::default();
        let outdoor = Endpoint {
            position: Position::new(0.0, 0.0, 1.5),
            placement: &Placement::Outdoor,
        };
        assert_eq!(models.external_wall_loss(&outdoor), 0.0);
        assert_eq!(models.height_loss(&outdoor), 0.0);
        assert_eq!(models.internal_walls_loss(&outdoor, &outdoor), 0.0);
    }

    #[test]
    fn test_indoor_corrections() {
        let models = StandardModels::default();
        let building = office();
        let pa = indoor(&building, 4, (1, 2));
        let pb = indoor(&building, 1, (3, 5));
        let a = Endpoint {
            position: Position::new(5.0, 15.0, 10.0),
            placement: &pa,
        };
        let b = Endpoint {
            position: Position::new(25.0, 45.0, 1.5),
            placement: &pb,
        };
        assert_eq!(models.external_wall_loss(&a), 12.0);
        assert_eq!(models.height_loss(&a), -6.0);
        assert_eq!(models.height_loss(&b), 0.0);
        assert_eq!(models.internal_walls_loss(&a, &b), 25.0);
    }

    #[test]
    fn test_itu_r1238_uses_floor_difference() {
        let models = StandardModels::default();
        let building = office();
        let pa = indoor(&building, 4, (1, 1));
        let pb = indoor(&building, 1, (1, 1));
        let a = Endpoint {
            position: Position::new(0.0, 0.0, 10.0),
            placement: &pa,
        };
        let b = Endpoint {
            position: Position::new(0.0, 0.0, 0.0),
            placement: &pb,
        };
        // 20log10(2160) + 30log10(10) + (15 + 4 * 2) - 28
        let expected = 20.0 * 2160f64.log10() + 30.0 + 23.0 - 28.0;
        assert_approx_eq!(models.itu_r1238(&a, &b), expected);
        assert_approx_eq!(models.itu_r1238(&b, &a), expected);
    }

    #[test]
    fn test_itu_r1411_switches_at_nlos_threshold() {
        let models = StandardModels::default();
        let config = *models.config();
        let near = Endpoint {
            position: Position::new(199.0, 0.0, 1.5),
            placement: &Placement::Outdoor,
        };
        let far = Endpoint {
            position: Position::new(600.0, 0.0, 1.5),
            placement: &Placement::Outdoor,
        };
        let origin = Endpoint {
            position: Position::new(0.0, 0.0, 30.0),
            placement: &Placement::Outdoor,
        };
        assert_approx_eq!(
            models.itu_r1411(&origin, &near),
            super::itu_r1411_los(&config, origin.position, near.position)
        );
        assert_approx_eq!(
            models.itu_r1411(&origin, &far),
            super::itu_r1411_nlos_over_rooftop(&config, origin.position, far.position)
        );
    }
}
