use serde::Deserialize;

use crate::config::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Surface area, in square pixels, that each particle gets.
    pub area_per_particle: f64,
    /// Initial velocity components are drawn from `[-max_speed, max_speed]`.
    pub max_speed: f64,
    pub size_range: [f64; 2],
    pub opacity_range: [f64; 2],

    /// The distance below which the cursor pushes particles away.
    pub repel_radius: f64,
    pub repel_strength: f64,

    /// The distance below which two particles are joined by a line.
    pub link_distance: f64,
    /// Opacity of a link between two particles sitting on top of each other.
    pub link_opacity: f64,

    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self::ambient()
    }
}

impl Settings {
    pub fn ambient() -> Settings {
        Settings {
            area_per_particle: 15000.0,
            max_speed: 0.25,
            size_range: [1.0, 3.0],
            opacity_range: [0.2, 0.7],
            repel_radius: 150.0,
            repel_strength: 0.02,
            link_distance: 120.0,
            link_opacity: 0.1,
            hue: 210.0,
            saturation: 1.0,
            lightness: 0.6,
        }
    }

    /// Roughly twice as many particles, with shorter links so the screen doesn't turn into a mesh.
    pub fn dense() -> Settings {
        Settings {
            area_per_particle: 7500.0,
            link_distance: 90.0,
            ..Settings::ambient()
        }
    }

    pub fn from_json(json: &str) -> Result<Settings, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.area_per_particle > 0.0) {
            return Err(ConfigError::Invalid("area_per_particle must be positive"));
        }
        if !(self.max_speed > 0.0) {
            return Err(ConfigError::Invalid("max_speed must be positive"));
        }
        // `Uniform` panics on an empty range, so these have to be caught here.
        if !(self.size_range[0] > 0.0 && self.size_range[0] < self.size_range[1]) {
            return Err(ConfigError::Invalid("size_range must be a non-empty positive range"));
        }
        let [lo, hi] = self.opacity_range;
        if !(0.0 <= lo && lo < hi && hi <= 1.0) {
            return Err(ConfigError::Invalid("opacity_range must be a non-empty range within [0, 1]"));
        }
        if self.repel_radius < 0.0 || self.link_distance < 0.0 {
            return Err(ConfigError::Invalid("radii must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.link_opacity) {
            return Err(ConfigError::Invalid("link_opacity must be within [0, 1]"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        Settings::ambient().validate().unwrap();
        Settings::dense().validate().unwrap();
    }

    #[test]
    fn json_fills_in_missing_fields() {
        let settings = Settings::from_json(r#"{ "link_distance": 80 }"#).unwrap();
        assert_eq!(settings.link_distance, 80.0);
        assert_eq!(settings.area_per_particle, 15000.0);
        assert_eq!(settings.repel_radius, 150.0);
    }

    #[test]
    fn rejects_empty_ranges() {
        let err = Settings::from_json(r#"{ "size_range": [2, 2] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Settings::from_json(r#"{ "opacity_range": [0.5, 1.5] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Settings::from_json("{ area_per_particle: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
