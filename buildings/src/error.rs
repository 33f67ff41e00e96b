use crate::building::BuildingId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildingsError {
    #[error("endpoint position has a non-finite coordinate {value}")]
    NonFinitePosition { value: f64 },

    #[error("underground endpoints are not supported (z = {z})")]
    Underground { z: f64 },

    #[error("endpoint does not provide an indoor/outdoor placement")]
    NotBuildingsAware,

    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("invalid value {value} for '{name}'")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("invalid building {0}: {1}")]
    InvalidBuilding(BuildingId, &'static str),
}
