/// Propagation environment for the macro-cell model.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Urban,
    Suburban,
    OpenAreas,
}

/// City size, which selects the mobile antenna height correction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CitySize {
    Small,
    Medium,
    #[default]
    Large,
}

/// Configuration shared by the standard sub-models.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    /// Carrier frequency (Hz).
    pub frequency_hz: f64,

    pub environment: Environment,

    pub city_size: CitySize,

    /// Average rooftop height (meters).
    pub rooftop_height_m: f64,

    /// Street width used by the over-rooftop diffraction model
    /// (meters).
    pub street_width_m: f64,

    /// Average separation between buildings (meters).
    pub building_separation_m: f64,

    /// Angle between the street and the direct path (degrees).
    pub street_orientation_deg: f64,

    /// Distance beyond which the street model stops assuming line of
    /// sight (meters).
    pub nlos_threshold_m: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 2160e6,
            environment: Environment::Urban,
            city_size: CitySize::Large,
            rooftop_height_m: 20.0,
            street_width_m: 20.0,
            building_separation_m: 50.0,
            street_orientation_deg: 45.0,
            nlos_threshold_m: 200.0,
        }
    }
}
