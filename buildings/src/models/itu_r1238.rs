use crate::{building::BuildingType, params::ModelConfig};

/// ITU-R P.1238 indoor loss over `distance_m`, crossing `floors`
/// floors.
///
/// Without a building type the residential coefficients are used.
pub fn itu_r1238(
    config: &ModelConfig,
    building_type: Option<BuildingType>,
    floors: u16,
    distance_m: f64,
) -> f64 {
    let n = f64::from(floors);
    let (power_loss_coeff, floor_loss) = match building_type.unwrap_or(BuildingType::Residential) {
        BuildingType::Residential => (28.0, 4.0 * n),
        BuildingType::Office => (30.0, if floors > 0 { 15.0 + 4.0 * (n - 1.0) } else { 0.0 }),
        BuildingType::Commercial => (22.0, if floors > 0 { 6.0 + 3.0 * (n - 1.0) } else { 0.0 }),
    };
    20.0 * (config.frequency_hz / 1e6).log10() + power_loss_coeff * distance_m.log10() + floor_loss
        - 28.0
}
