//! Serializable navigation setup, as stored in explorer documents.
//!
//! ```json
//! {
//!   "type": "Orbit",
//!   "enabled": true,
//!   "orbit": {
//!     "minOrbit": [-90, null, null],
//!     "maxOrbit": [90, null, null],
//!     "minOffset": [null, null, 0.1],
//!     "maxOffset": [null, null, null]
//!   }
//! }
//! ```
//!
//! JSON has no infinity, so an unbounded component is written as `null`. A `null` reads back as
//! negative infinity in a lower bound and positive infinity in an upper bound.

use bevy_math::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controller::component::OrbitNavigation;

/// Errors that can occur while reading a navigation document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("Navigation document could not be parsed: {0}")]
    Json(#[from] serde_json::Error),

    /// The document describes a navigation type this crate does not implement.
    #[error("Unsupported navigation type: {0}")]
    UnsupportedType(String),

    /// A bound is NaN.
    #[error("Navigation bound {field} is not a number")]
    NotANumber {
        /// The offending field.
        field: &'static str,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// The saved state of a navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationData {
    /// Navigation type. Only `"Orbit"` is supported.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether user input moves the camera.
    pub enabled: bool,
    /// Orbit limits.
    pub orbit: OrbitLimits,
}

/// Clamp bounds of an orbit navigation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitLimits {
    /// Lower orbit bound, degrees.
    #[serde(with = "lower_bound")]
    pub min_orbit: Vec3,
    /// Upper orbit bound, degrees.
    #[serde(with = "upper_bound")]
    pub max_orbit: Vec3,
    /// Lower offset bound.
    #[serde(with = "lower_bound")]
    pub min_offset: Vec3,
    /// Upper offset bound.
    #[serde(with = "upper_bound")]
    pub max_offset: Vec3,
}

/// Name of the only supported navigation type.
pub const ORBIT_NAVIGATION: &str = "Orbit";

impl NavigationData {
    /// Parse and validate a navigation document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Serialize into a navigation document.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the document can be applied to an orbit navigation.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.kind != ORBIT_NAVIGATION {
            return Err(ConfigError::UnsupportedType(self.kind.clone()));
        }
        let fields = [
            ("orbit.minOrbit", self.orbit.min_orbit),
            ("orbit.maxOrbit", self.orbit.max_orbit),
            ("orbit.minOffset", self.orbit.min_offset),
            ("orbit.maxOffset", self.orbit.max_offset),
        ];
        match fields.into_iter().find(|(_, value)| value.is_nan()) {
            Some((field, _)) => Err(ConfigError::NotANumber { field }),
            None => Ok(()),
        }
    }
}

impl OrbitNavigation {
    /// Apply a saved setup. The values take effect on the next update pass.
    pub fn load_config(&mut self, data: &NavigationData) -> ConfigResult<()> {
        data.validate()?;
        self.ins.enabled.set(data.enabled);
        self.ins.min_orbit.set(data.orbit.min_orbit);
        self.ins.max_orbit.set(data.orbit.max_orbit);
        self.ins.min_offset.set(data.orbit.min_offset);
        self.ins.max_offset.set(data.orbit.max_offset);
        Ok(())
    }

    /// Capture the current setup.
    pub fn save_config(&self) -> NavigationData {
        NavigationData {
            kind: ORBIT_NAVIGATION.to_string(),
            enabled: self.ins.enabled.value(),
            orbit: OrbitLimits {
                min_orbit: self.ins.min_orbit.value(),
                max_orbit: self.ins.max_orbit.value(),
                min_offset: self.ins.min_offset.value(),
                max_offset: self.ins.max_offset.value(),
            },
        }
    }
}

fn to_triple(value: Vec3) -> [Option<f32>; 3] {
    value.to_array().map(|v| v.is_finite().then_some(v))
}

fn from_triple(value: [Option<f32>; 3], unbounded: f32) -> Vec3 {
    Vec3::from_array(value.map(|v| v.unwrap_or(unbounded)))
}

mod lower_bound {
    use bevy_math::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        super::to_triple(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let triple = <[Option<f32>; 3]>::deserialize(deserializer)?;
        Ok(super::from_triple(triple, f32::NEG_INFINITY))
    }
}

mod upper_bound {
    use bevy_math::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        super::to_triple(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let triple = <[Option<f32>; 3]>::deserialize(deserializer)?;
        Ok(super::from_triple(triple, f32::INFINITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "type": "Orbit",
        "enabled": false,
        "orbit": {
            "minOrbit": [-45, null, null],
            "maxOrbit": [45, null, null],
            "minOffset": [null, null, 1],
            "maxOffset": [null, null, 500]
        }
    }"#;

    #[test]
    fn null_components_are_unbounded() {
        let data = NavigationData::from_json(DOCUMENT).unwrap();
        assert!(!data.enabled);
        assert_eq!(data.orbit.min_orbit.x, -45.0);
        assert_eq!(data.orbit.min_orbit.y, f32::NEG_INFINITY);
        assert_eq!(data.orbit.max_orbit.z, f32::INFINITY);
        assert_eq!(data.orbit.max_offset, Vec3::new(f32::INFINITY, f32::INFINITY, 500.0));
    }

    #[test]
    fn saved_document_reads_back() {
        let navigation = OrbitNavigation::default();
        let saved = navigation.save_config();
        let json = saved.to_json().unwrap();
        assert!(json.contains("\"minOffset\""));
        assert!(json.contains("null"));
        assert_eq!(NavigationData::from_json(&json).unwrap(), saved);
    }

    #[test]
    fn load_marks_properties_changed() {
        let mut navigation = OrbitNavigation::default();
        let data = NavigationData::from_json(DOCUMENT).unwrap();
        navigation.load_config(&data).unwrap();
        assert!(navigation.ins.enabled.is_changed());
        assert!(navigation.ins.bounds_changed());
        assert_eq!(navigation.save_config(), data);
    }

    #[test]
    fn other_navigation_types_are_rejected() {
        let json = DOCUMENT.replace("\"Orbit\"", "\"Walk\"");
        assert!(matches!(
            NavigationData::from_json(&json),
            Err(ConfigError::UnsupportedType(kind)) if kind == "Walk"
        ));
    }

    #[test]
    fn nan_bounds_are_rejected() {
        let mut data = NavigationData::from_json(DOCUMENT).unwrap();
        data.orbit.max_offset.z = f32::NAN;
        let mut navigation = OrbitNavigation::default();
        assert!(matches!(
            navigation.load_config(&data),
            Err(ConfigError::NotANumber {
                field: "orbit.maxOffset"
            })
        ));
        assert!(!navigation.ins.any_changed());
    }

    #[test]
    fn malformed_documents_fail_to_parse() {
        assert!(matches!(
            NavigationData::from_json("{\"type\": \"Orbit\"}"),
            Err(ConfigError::Json(_))
        ));
    }
}
