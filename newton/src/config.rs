use crate::error::ConfigError;
use crate::fractal::{Fractal, FractalSettings};
use crate::func::Polynomial;

/// A named Newton fractal: the polynomial and where to sample it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FractalConfig {
    pub name: String,
    pub polynomial: Polynomial,
    pub settings: FractalSettings,
}

impl FractalConfig {
    pub fn new(name: impl Into<String>, polynomial: Polynomial, settings: FractalSettings) -> Self {
        Self {
            name: name.into(),
            polynomial,
            settings,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.polynomial.validate()?;
        self.settings.validate()
    }

    pub fn fractal(&self) -> Result<Fractal, ConfigError> {
        self.polynomial.validate()?;
        Fractal::new(self.settings.clone())
    }

    pub fn encode(&self) -> Option<String> {
        ron::to_string(&self).ok()
    }

    pub fn encode_compressed(&self) -> Option<String> {
        use base64::Engine;
        use std::io::Write;

        let str = self.encode()?;
        let mut enc = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::best());
        enc.write_all(str.as_bytes()).ok()?;
        let data = enc.finish().ok()?;
        Some(base64::engine::general_purpose::URL_SAFE.encode(data))
    }

    /// Reads a config written as RON, JSON or the output of
    /// [`FractalConfig::encode_compressed`].
    pub fn decode(input: &str) -> Option<Self> {
        use base64::Engine;
        use std::io::Write;

        let input = input.trim();

        if let Ok(config) = ron::from_str(input) {
            return Some(config);
        }
        log::info!("Could not decode RON, trying JSON");
        if let Ok(config) = serde_json::from_str(input) {
            return Some(config);
        }
        log::info!("Could not decode JSON, trying base64");

        let Ok(data) = base64::engine::general_purpose::URL_SAFE.decode(input) else {
            log::warn!("Could not decode base64");
            return None;
        };

        let mut dec = flate2::write::DeflateDecoder::new(Vec::new());
        let Ok(()) = dec.write_all(&data[..]) else {
            log::warn!("Could not inflate");
            return None;
        };
        let Ok(data) = dec.finish() else {
            log::warn!("Could not inflate");
            return None;
        };
        let Ok(input) = String::from_utf8(data) else {
            log::warn!("Resulting data is not a string");
            return None;
        };
        if let Ok(config) = ron::from_str::<FractalConfig>(&input) {
            return Some(config);
        }
        log::warn!("Could not decode RON");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;

    fn quintic() -> FractalConfig {
        FractalConfig::new(
            "quintic",
            Polynomial::from_real(&[1.0, 0.0, 0.0, 1.0, -1.0, 1.0]),
            FractalSettings::new(500, Domain::default()),
        )
    }

    #[test]
    fn compressed_form_decodes() {
        let config = quintic();
        let encoded = config.encode_compressed().unwrap();
        assert!(!encoded.contains('('));
        assert_eq!(FractalConfig::decode(&encoded), Some(config));
    }

    #[test]
    fn hand_written_ron_uses_defaults() {
        let input = r#"
            (
                name: "cubic",
                polynomial: (coefficients: [(1.0, 0.0), (0.0, 0.0), (0.0, 0.0), (-1.0, 0.0)]),
                settings: (resolution: 64),
            )
        "#;
        let config = FractalConfig::decode(input).unwrap();
        assert_eq!(config.name, "cubic");
        assert_eq!(config.polynomial, Polynomial::roots_of_unity(3));
        assert_eq!(config.settings, FractalSettings::new(64, Domain::default()));
    }

    #[test]
    fn json_is_accepted() {
        let input = r#"{
            "name": "shifted",
            "polynomial": { "coefficients": [[1.0, 0.0], [0.0, -2.0]] },
            "settings": {
                "resolution": 10,
                "domain": { "x_min": -2.0, "x_max": 2.0, "y_min": 0.0, "y_max": 1.0 },
                "solver": { "precision_goal": 1e-9, "max_iterations": 20 }
            }
        }"#;
        let config = FractalConfig::decode(input).unwrap();
        assert_eq!(config.settings.domain, Domain::new(-2.0, 2.0, 0.0, 1.0));
        assert_eq!(config.settings.solver.max_iterations, 20);
        assert_eq!(config.settings.tolerance, Default::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(FractalConfig::decode("not a fractal"), None);
    }

    #[test]
    fn fractal_checks_the_polynomial() {
        let mut config = quintic();
        config.polynomial = Polynomial::new(vec![]);
        assert_eq!(config.fractal().err(), Some(ConfigError::EmptyPolynomial));
        assert_eq!(config.validate(), Err(ConfigError::EmptyPolynomial));
    }
}
