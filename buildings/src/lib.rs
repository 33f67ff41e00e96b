//! # Building aware radio propagation
//!
//! `buildings` computes path loss between endpoints that may be
//! outdoors or inside buildings, choosing between street level,
//! macro-cell and indoor models per pair.

pub mod building;
mod error;
pub mod hybrid;
pub mod mobility;
pub mod models;
mod params;

pub use crate::{
    building::{Building, BuildingId, BuildingType, ExtWallsType},
    error::BuildingsError,
    hybrid::{Branch, Evaluation, HybridBuildings, HybridParams, LONG_RANGE_THRESHOLD_M},
    mobility::{BuildingsMobility, ConstantPosition, Endpoint, Mobility, Placement, Position},
    models::{LossModels, StandardModels, MIN_ANTENNA_HEIGHT_M},
    params::{CitySize, Environment, ModelConfig},
};
