//! ITU-R P.1411 short range outdoor propagation.

use super::{base_and_mobile, C};
use crate::{
    mobility::Position,
    params::{CitySize, ModelConfig},
};
use std::f64::consts::PI;

/// Line of sight loss within a street canyon.
///
/// Returns the midpoint of the recommendation's lower and upper
/// bounds, which are split at the two-ray breakpoint distance.
pub fn itu_r1411_los(config: &ModelConfig, a: Position, b: Position) -> f64 {
    let lambda = C / config.frequency_hz;
    let (hb, hm) = base_and_mobile(a.z, b.z);
    let d = a.distance(&b);

    let l_bp = (20.0 * (lambda.powi(2) / (8.0 * PI * hb * hm)).log10()).abs();
    let r_bp = 4.0 * hb * hm / lambda;
    let ratio = (d / r_bp).log10();

    let (lower, upper) = if d <= r_bp {
        (l_bp + 20.0 * ratio, l_bp + 20.0 + 25.0 * ratio)
    } else {
        (l_bp + 40.0 * ratio, l_bp + 20.0 + 40.0 * ratio)
    };
    (lower + upper) / 2.0
}

/// Non line of sight loss for paths that diffract over rooftops
/// before reaching the street.
pub fn itu_r1411_nlos_over_rooftop(config: &ModelConfig, a: Position, b: Position) -> f64 {
    let f_mhz = config.frequency_hz / 1e6;
    let log_f = f_mhz.log10();
    let (hb, hm) = base_and_mobile(a.z, b.z);
    let hr = config.rooftop_height_m;
    let d = a.distance(&b);
    let log_d_km = (d / 1e3).log10();

    let phi = config.street_orientation_deg;
    let l_ori = if phi < 35.0 {
        -10.0 + 0.354 * phi
    } else if phi < 55.0 {
        2.5 + 0.075 * (phi - 35.0)
    } else {
        4.0 - 0.114 * (phi - 55.0)
    };

    let delta_hb = hb - hr;
    let delta_hm = hr - hm;

    // Rooftop to street diffraction only exists for a mobile below the
    // rooftops.
    let l_rts = if delta_hm > 0.0 {
        -8.2 - 10.0 * config.street_width_m.log10() + 10.0 * log_f + 20.0 * delta_hm.log10()
            + l_ori
    } else {
        0.0
    };

    let (l_bsh, k_a, k_d) = if hb > hr {
        (-18.0 * (1.0 + delta_hb).log10(), 54.0, 18.0)
    } else {
        let k_a = if d >= 500.0 {
            54.0 - 0.8 * delta_hb
        } else {
            54.0 - 1.6 * delta_hb * d / 1e3
        };
        (0.0, k_a, 18.0 - 15.0 * delta_hb / hr)
    };
    let k_f = match config.city_size {
        CitySize::Large => -4.0 + 1.5 * (f_mhz / 925.0 - 1.0),
        CitySize::Small | CitySize::Medium => -4.0 + 0.7 * (f_mhz / 925.0 - 1.0),
    };

    let l_msd = l_bsh + k_a + k_d * log_d_km + k_f * log_f
        - 9.0 * config.building_separation_m.log10();
    let l_bf = 32.4 + 20.0 * log_d_km + 20.0 * log_f;

    if l_rts + l_msd > 0.0 {
        l_bf + l_rts + l_msd
    } else {
        l_bf
    }
}

#[cfg(test)]
mod tests {
    use super::{itu_r1411_los, itu_r1411_nlos_over_rooftop};
    use crate::{mobility::Position, models::MIN_ANTENNA_HEIGHT_M, params::ModelConfig};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_los_grows_with_distance() {
        let config = ModelConfig::default();
        let tx = Position::new(0.0, 0.0, 10.0);
        let near = itu_r1411_los(&config, tx, Position::new(20.0, 0.0, 1.5));
        let mid = itu_r1411_los(&config, tx, Position::new(100.0, 0.0, 1.5));
        let far = itu_r1411_los(&config, tx, Position::new(190.0, 0.0, 1.5));
        assert!(near < mid);
        assert!(mid < far);
    }

    #[test]
    fn test_los_known_value() {
        let config = ModelConfig::default();
        let loss = itu_r1411_los(
            &config,
            Position::new(0.0, 0.0, 10.0),
            Position::new(100.0, 0.0, 1.5),
        );
        assert_approx_eq!(loss, 81.562, 1e-2);
    }

    #[test]
    fn test_nlos_known_value() {
        let config = ModelConfig::default();
        let loss = itu_r1411_nlos_over_rooftop(
            &config,
            Position::new(0.0, 0.0, 30.0),
            Position::new(800.0, 0.0, 1.5),
        );
        assert_approx_eq!(loss, 149.449, 1e-2);
    }

    #[test]
    fn test_nlos_mobile_above_rooftop_is_finite() {
        let config = ModelConfig::default();
        let loss = itu_r1411_nlos_over_rooftop(
            &config,
            Position::new(0.0, 0.0, 40.0),
            Position::new(800.0, 0.0, 25.0),
        );
        assert!(loss.is_finite());
        assert!(loss > 0.0);
    }

    #[test]
    fn test_ground_level_endpoints() {
        let config = ModelConfig::default();
        let ground = Position::new(0.0, 0.0, 0.0);
        let floor = Position::new(0.0, 0.0, MIN_ANTENNA_HEIGHT_M);

        let los = itu_r1411_los(&config, ground, Position::new(100.0, 0.0, 0.0));
        assert!(los.is_finite() && los > 0.0);
        assert_approx_eq!(los, 93.922, 1e-2);
        assert_approx_eq!(
            los,
            itu_r1411_los(&config, floor, Position::new(100.0, 0.0, MIN_ANTENNA_HEIGHT_M))
        );
        let los = itu_r1411_los(
            &config,
            Position::new(0.0, 0.0, 10.0),
            Position::new(100.0, 0.0, 0.0),
        );
        assert!(los.is_finite() && los > 0.0);

        let nlos = itu_r1411_nlos_over_rooftop(
            &config,
            Position::new(0.0, 0.0, 30.0),
            Position::new(800.0, 0.0, 0.0),
        );
        assert!(nlos.is_finite() && nlos > 0.0);
        assert_approx_eq!(nlos, 149.670, 1e-2);
        let nlos = itu_r1411_nlos_over_rooftop(&config, ground, Position::new(800.0, 0.0, 0.0));
        assert!(nlos.is_finite() && nlos > 0.0);
    }
}
