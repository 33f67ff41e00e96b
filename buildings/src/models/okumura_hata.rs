use super::base_and_mobile;
use crate::{
    mobility::Position,
    params::{CitySize, Environment, ModelConfig},
};

/// Returns the Okumura-Hata macro-cell loss between `a` and `b`.
///
/// Frequencies above 1.5 GHz use the COST-231 extension. The higher
/// endpoint is taken to be the base station.
pub fn okumura_hata(config: &ModelConfig, a: Position, b: Position) -> f64 {
    let f_mhz = config.frequency_hz / 1e6;
    let log_f = f_mhz.log10();
    let (hb, hm) = base_and_mobile(a.z, b.z);
    let log_hb = hb.log10();
    let log_d_km = (a.distance(&b) / 1e3).log10();

    if config.frequency_hz <= 1.5e9 {
        let a_hm = if config.city_size == CitySize::Large {
            if f_mhz < 200.0 {
                8.29 * (1.54 * hm).log10().powi(2) - 1.1
            } else {
                3.2 * (11.75 * hm).log10().powi(2) - 4.97
            }
        } else {
            small_city_correction(log_f, hm)
        };

        let urban = 69.55 + 26.16 * log_f - 13.82 * log_hb + (44.9 - 6.55 * log_hb) * log_d_km
            - a_hm;

        match config.environment {
            Environment::Urban => urban,
            Environment::Suburban => urban - 2.0 * (f_mhz / 28.0).log10().powi(2) - 5.4,
            Environment::OpenAreas => urban - 4.78 * log_f.powi(2) + 18.33 * log_f - 40.94,
        }
    } else {
        // COST-231
        let c_m = if config.city_size == CitySize::Large {
            3.0
        } else {
            0.0
        };
        46.3 + 33.9 * log_f - 13.82 * log_hb + (44.9 - 6.55 * log_hb) * log_d_km
            - small_city_correction(log_f, hm)
            + c_m
    }
}

fn small_city_correction(log_f: f64, hm: f64) -> f64 {
    (1.1 * log_f - 0.7) * hm - (1.56 * log_f - 0.8)
}
