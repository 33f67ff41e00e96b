//! Hybrid selection between outdoor, indoor and macro-cell models.
//!
//! The selector classifies a pair of endpoints by placement
//! ([`Link`]), separation ([`Range`]) and height ([`Rooftop`]), picks
//! the matching [`Branch`] and sums the sub-model terms that branch
//! prescribes.

use crate::{
    error::BuildingsError,
    mobility::{Endpoint, Mobility, Placement},
    models::{LossModels, StandardModels},
    params::{CitySize, Environment, ModelConfig},
};
use log::{debug, trace};
use std::fmt;

/// Separation (meters) above which a link is considered long range.
pub const LONG_RANGE_THRESHOLD_M: f64 = 1000.0;

/// Default separation (meters) at or below which no loss is computed.
pub const DEFAULT_MIN_DISTANCE_M: f64 = 0.5;

/// Default average rooftop height (meters).
pub const DEFAULT_ROOFTOP_HEIGHT_M: f64 = 20.0;

/// Immutable selector parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridParams {
    min_distance_m: f64,
    rooftop_height_m: f64,
}

impl HybridParams {
    pub fn new(min_distance_m: f64, rooftop_height_m: f64) -> Result<Self, BuildingsError> {
        if !(min_distance_m.is_finite() && min_distance_m >= 0.0) {
            return Err(BuildingsError::InvalidParameter {
                name: "min_distance",
                value: min_distance_m,
            });
        }
        if !(rooftop_height_m.is_finite() && rooftop_height_m > 0.0) {
            return Err(BuildingsError::InvalidParameter {
                name: "rooftop_height",
                value: rooftop_height_m,
            });
        }
        Ok(Self {
            min_distance_m,
            rooftop_height_m,
        })
    }

    /// Separation at or below which the loss is defined as zero.
    pub fn min_distance_m(&self) -> f64 {
        self.min_distance_m
    }

    /// Height at or above which an endpoint is over the rooftops.
    pub fn rooftop_height_m(&self) -> f64 {
        self.rooftop_height_m
    }

    /// Fixed long/short range split, see [`LONG_RANGE_THRESHOLD_M`].
    pub fn long_range_threshold_m(&self) -> f64 {
        LONG_RANGE_THRESHOLD_M
    }
}

impl Default for HybridParams {
    fn default() -> Self {
        Self {
            min_distance_m: DEFAULT_MIN_DISTANCE_M,
            rooftop_height_m: DEFAULT_ROOFTOP_HEIGHT_M,
        }
    }
}

/// Indoor/outdoor status of a pair, first endpoint first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    OutdoorOutdoor,
    OutdoorIndoor,
    IndoorOutdoor,
    IndoorIndoor { same_building: bool },
}

impl Link {
    pub fn classify(a: &Placement, b: &Placement) -> Self {
        match (a, b) {
            (Placement::Outdoor, Placement::Outdoor) => Link::OutdoorOutdoor,
            (Placement::Outdoor, Placement::Indoor(_)) => Link::OutdoorIndoor,
            (Placement::Indoor(_), Placement::Outdoor) => Link::IndoorOutdoor,
            (Placement::Indoor(a), Placement::Indoor(b)) => Link::IndoorIndoor {
                same_building: a.building_id() == b.building_id(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    Short,
    Long,
}

impl Range {
    pub fn classify(distance_m: f64) -> Self {
        if distance_m > LONG_RANGE_THRESHOLD_M {
            Range::Long
        } else {
            Range::Short
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rooftop {
    /// Both endpoints are strictly below the rooftop height.
    BothBelow,
    /// At least one endpoint is at or above the rooftop height.
    NotBothBelow,
}

impl Rooftop {
    pub fn classify(z_a: f64, z_b: f64, rooftop_height_m: f64) -> Self {
        if z_a < rooftop_height_m && z_b < rooftop_height_m {
            Rooftop::BothBelow
        } else {
            Rooftop::NotBothBelow
        }
    }
}

/// The model combination used for a pair.
///
/// Terms are listed as `model(a, b) + correction(endpoint)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Separation at or below the minimum distance; loss is `0`.
    TooClose,
    /// `itu_r1411(a, b)`
    OutdoorOutdoorLongBelowRooftop,
    /// `okumura_hata(a, b)`
    OutdoorOutdoorLongAboveRooftop,
    /// `itu_r1411(a, b)`
    OutdoorOutdoorShort,
    /// `itu_r1411(a, b) + external_wall(b) + height(a)`
    OutdoorIndoorLongBelowRooftop,
    /// `okumura_hata(a, b) + external_wall(b)`
    OutdoorIndoorLongAboveRooftop,
    /// `itu_r1411(a, b) + external_wall(b) + height(b)`
    OutdoorIndoorShort,
    /// `itu_r1238(a, b) + internal_walls(a, b)`
    IndoorIndoorSameBuilding,
    /// `itu_r1411(a, b) + external_wall(a) + external_wall(b)`
    IndoorIndoorDifferentBuildings,
    /// `itu_r1411(a, b) + external_wall(a) + height(a)`
    IndoorOutdoorLongBelowRooftop,
    /// `okumura_hata(a, b) + external_wall(a) + height(a)`
    IndoorOutdoorLongAboveRooftop,
    /// `itu_r1411(a, b) + external_wall(a) + height(a)`
    IndoorOutdoorShort,
}

impl Branch {
    /// Returns the branch for a classified pair.
    ///
    /// Note that the height gain of an outdoor to indoor link is taken
    /// from the outdoor endpoint at long range but from the indoor
    /// endpoint at short range, while an indoor to outdoor link always
    /// corrects the indoor endpoint.
    pub fn select(link: Link, range: Range, rooftop: Rooftop) -> Self {
        match (link, range, rooftop) {
            (Link::OutdoorOutdoor, Range::Long, Rooftop::BothBelow) => {
                Branch::OutdoorOutdoorLongBelowRooftop
            }
            (Link::OutdoorOutdoor, Range::Long, Rooftop::NotBothBelow) => {
                Branch::OutdoorOutdoorLongAboveRooftop
            }
            (Link::OutdoorOutdoor, Range::Short, _) => Branch::OutdoorOutdoorShort,

            (Link::OutdoorIndoor, Range::Long, Rooftop::BothBelow) => {
                Branch::OutdoorIndoorLongBelowRooftop
            }
            (Link::OutdoorIndoor, Range::Long, Rooftop::NotBothBelow) => {
                Branch::OutdoorIndoorLongAboveRooftop
            }
            (Link::OutdoorIndoor, Range::Short, _) => Branch::OutdoorIndoorShort,

            (Link::IndoorIndoor { same_building: true }, _, _) => Branch::IndoorIndoorSameBuilding,
            (Link::IndoorIndoor { same_building: false }, _, _) => {
                Branch::IndoorIndoorDifferentBuildings
            }

            (Link::IndoorOutdoor, Range::Long, Rooftop::BothBelow) => {
                Branch::IndoorOutdoorLongBelowRooftop
            }
            (Link::IndoorOutdoor, Range::Long, Rooftop::NotBothBelow) => {
                Branch::IndoorOutdoorLongAboveRooftop
            }
            (Link::IndoorOutdoor, Range::Short, _) => Branch::IndoorOutdoorShort,
        }
    }

    /// Sums this branch's terms.
    pub fn compose<M>(self, models: &M, a: &Endpoint<'_>, b: &Endpoint<'_>) -> f64
    where
        M: LossModels + ?Sized,
    {
        match self {
            Branch::TooClose => 0.0,
            Branch::OutdoorOutdoorLongBelowRooftop | Branch::OutdoorOutdoorShort => {
                models.itu_r1411(a, b)
            }
            Branch::OutdoorOutdoorLongAboveRooftop => models.okumura_hata(a, b),
            Branch::OutdoorIndoorLongBelowRooftop => {
                models.itu_r1411(a, b) + models.external_wall_loss(b) + models.height_loss(a)
            }
            Branch::OutdoorIndoorLongAboveRooftop => {
                models.okumura_hata(a, b) + models.external_wall_loss(b)
            }
            Branch::OutdoorIndoorShort => {
                models.itu_r1411(a, b) + models.external_wall_loss(b) + models.height_loss(b)
            }
            Branch::IndoorIndoorSameBuilding => {
                models.itu_r1238(a, b) + models.internal_walls_loss(a, b)
            }
            Branch::IndoorIndoorDifferentBuildings => {
                models.itu_r1411(a, b) + models.external_wall_loss(a) + models.external_wall_loss(b)
            }
            Branch::IndoorOutdoorLongBelowRooftop | Branch::IndoorOutdoorShort => {
                models.itu_r1411(a, b) + models.external_wall_loss(a) + models.height_loss(a)
            }
            Branch::IndoorOutdoorLongAboveRooftop => {
                models.okumura_hata(a, b) + models.external_wall_loss(a) + models.height_loss(a)
            }
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Branch::TooClose => "too close",
            Branch::OutdoorOutdoorLongBelowRooftop => "O-O (>1000): below rooftop -> ITU-R P.1411",
            Branch::OutdoorOutdoorLongAboveRooftop => "O-O (>1000): above rooftop -> Okumura-Hata",
            Branch::OutdoorOutdoorShort => "O-O (<1000): street canyon -> ITU-R P.1411",
            Branch::OutdoorIndoorLongBelowRooftop => {
                "O-I (>1000): below rooftop -> ITU-R P.1411 + BEL + HG"
            }
            Branch::OutdoorIndoorLongAboveRooftop => "O-I (>1000): above rooftop -> Okumura-Hata + BEL",
            Branch::OutdoorIndoorShort => "O-I (<1000): ITU-R P.1411 + BEL + HG",
            Branch::IndoorIndoorSameBuilding => "I-I (same building): ITU-R P.1238 + IWL",
            Branch::IndoorIndoorDifferentBuildings => "I-I (different): ITU-R P.1411 + 2*BEL",
            Branch::IndoorOutdoorLongBelowRooftop => {
                "I-O (>1000): below rooftop -> ITU-R P.1411 + BEL + HG"
            }
            Branch::IndoorOutdoorLongAboveRooftop => {
                "I-O (>1000): above rooftop -> Okumura-Hata + BEL + HG"
            }
            Branch::IndoorOutdoorShort => "I-O (<1000): ITU-R P.1411 + BEL + HG",
        };
        f.write_str(label)
    }
}

/// Result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub branch: Branch,
    pub loss_db: f64,
}

/// Building aware propagation loss that picks between street level,
/// macro-cell and indoor models per pair of endpoints.
#[derive(Debug, Clone)]
pub struct HybridBuildings<M = StandardModels> {
    params: HybridParams,
    models: M,
}

impl HybridBuildings<StandardModels> {
    pub fn builder() -> HybridBuildingsBuilder {
        HybridBuildingsBuilder {
            min_distance_m: DEFAULT_MIN_DISTANCE_M,
            rooftop_height_m: DEFAULT_ROOFTOP_HEIGHT_M,
            config: ModelConfig::default(),
        }
    }
}

impl Default for HybridBuildings<StandardModels> {
    fn default() -> Self {
        Self {
            params: HybridParams::default(),
            models: StandardModels::default(),
        }
    }
}

impl<M: LossModels> HybridBuildings<M> {
    /// Returns a selector over a custom set of sub-models.
    pub fn with_models(params: HybridParams, models: M) -> Self {
        Self { params, models }
    }

    pub fn params(&self) -> &HybridParams {
        &self.params
    }

    pub fn models(&self) -> &M {
        &self.models
    }

    /// Returns the loss (dB) between `a` and `b`.
    pub fn loss(&self, a: &dyn Mobility, b: &dyn Mobility) -> Result<f64, BuildingsError> {
        self.evaluate(a, b).map(|evaluation| evaluation.loss_db)
    }

    /// Returns the loss (dB) between `a` and `b` along with the branch
    /// that produced it.
    ///
    /// # Errors
    ///
    /// - [`BuildingsError::NonFinitePosition`] if any coordinate of
    ///   either endpoint is NaN or infinite.
    /// - [`BuildingsError::Underground`] if either endpoint is below
    ///   ground.
    /// - [`BuildingsError::NotBuildingsAware`] if either endpoint does
    ///   not report a placement and the pair is farther apart than the
    ///   minimum distance.
    pub fn evaluate(
        &self,
        a: &dyn Mobility,
        b: &dyn Mobility,
    ) -> Result<Evaluation, BuildingsError> {
        let (pos_a, pos_b) = (a.position(), b.position());
        for value in [pos_a.x, pos_a.y, pos_a.z, pos_b.x, pos_b.y, pos_b.z] {
            if !value.is_finite() {
                return Err(BuildingsError::NonFinitePosition { value });
            }
        }
        for z in [pos_a.z, pos_b.z] {
            if z < 0.0 {
                return Err(BuildingsError::Underground { z });
            }
        }

        let distance = a.distance_to(b);
        if distance <= self.params.min_distance_m {
            debug!("hybrid; {}: distance {distance} m", Branch::TooClose);
            return Ok(Evaluation {
                branch: Branch::TooClose,
                loss_db: 0.0,
            });
        }

        let (Some(placement_a), Some(placement_b)) = (a.placement(), b.placement()) else {
            return Err(BuildingsError::NotBuildingsAware);
        };
        let a = Endpoint {
            position: pos_a,
            placement: placement_a,
        };
        let b = Endpoint {
            position: pos_b,
            placement: placement_b,
        };

        let link = Link::classify(placement_a, placement_b);
        let range = Range::classify(distance);
        let rooftop = Rooftop::classify(pos_a.z, pos_b.z, self.params.rooftop_height_m);
        trace!(
            "hybrid; distance: {distance}, z_a: {}, z_b: {}, rooftop: {}, {link:?}, {range:?}, {rooftop:?}",
            pos_a.z,
            pos_b.z,
            self.params.rooftop_height_m
        );

        let branch = Branch::select(link, range, rooftop);
        let loss_db = branch.compose(&self.models, &a, &b);
        debug!("hybrid; {branch}: {loss_db}");

        Ok(Evaluation { branch, loss_db })
    }
}

pub struct HybridBuildingsBuilder {
    min_distance_m: f64,
    rooftop_height_m: f64,
    config: ModelConfig,
}

impl HybridBuildingsBuilder {
    /// Separation at or below which loss is zero (meters, defaults to
    /// 0.5).
    #[must_use]
    pub fn min_distance(mut self, meters: f64) -> Self {
        self.min_distance_m = meters;
        self
    }

    /// Average rooftop height (meters, defaults to 20). Also used by
    /// the over-rooftop diffraction model.
    #[must_use]
    pub fn rooftop_height(mut self, meters: f64) -> Self {
        self.rooftop_height_m = meters;
        self
    }

    /// Replaces the sub-model configuration. Its rooftop height is
    /// overridden by [`Self::rooftop_height`].
    #[must_use]
    pub fn model_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Carrier frequency (Hz, defaults to 2160 MHz).
    #[must_use]
    pub fn frequency(mut self, hz: f64) -> Self {
        self.config.frequency_hz = hz;
        self
    }

    /// Macro-cell environment (defaults to `Urban`).
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    /// City size (defaults to `Large`).
    #[must_use]
    pub fn city_size(mut self, city_size: CitySize) -> Self {
        self.config.city_size = city_size;
        self
    }

    /// Street width (meters, defaults to 20).
    #[must_use]
    pub fn street_width(mut self, meters: f64) -> Self {
        self.config.street_width_m = meters;
        self
    }

    /// Average separation between buildings (meters, defaults to 50).
    #[must_use]
    pub fn building_separation(mut self, meters: f64) -> Self {
        self.config.building_separation_m = meters;
        self
    }

    /// Street orientation relative to the direct path (degrees, 0 to
    /// 90, defaults to 45).
    #[must_use]
    pub fn street_orientation(mut self, degrees: f64) -> Self {
        self.config.street_orientation_deg = degrees;
        self
    }

    /// Distance at which the street model switches from line of
    /// sight to over-rooftop propagation (meters, defaults to 200).
    #[must_use]
    pub fn nlos_threshold(mut self, meters: f64) -> Self {
        self.config.nlos_threshold_m = meters;
        self
    }

    pub fn build(&self) -> Result<HybridBuildings<StandardModels>, BuildingsError> {
        let params = HybridParams::new(self.min_distance_m, self.rooftop_height_m)?;

        let config = ModelConfig {
            rooftop_height_m: params.rooftop_height_m,
            ..self.config
        };
        let checks = [
            ("frequency", config.frequency_hz, config.frequency_hz > 0.0),
            ("street_width", config.street_width_m, config.street_width_m > 0.0),
            (
                "building_separation",
                config.building_separation_m,
                config.building_separation_m > 0.0,
            ),
            (
                "street_orientation",
                config.street_orientation_deg,
                (0.0..=90.0).contains(&config.street_orientation_deg),
            ),
            ("nlos_threshold", config.nlos_threshold_m, config.nlos_threshold_m >= 0.0),
        ];
        for (name, value, valid) in checks {
            if !(valid && value.is_finite()) {
                return Err(BuildingsError::InvalidParameter { name, value });
            }
        }

        Ok(HybridBuildings::with_models(
            params,
            StandardModels::new(config),
        ))
    }
}
