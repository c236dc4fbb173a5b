//! MovementConfig — настройки контроллера и physics backend
//!
//! Все поля имеют defaults, JSON может задавать только часть.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Какой physics host отвечает на shape cast и интегрирует velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroundBackend {
    /// Rapier: dynamic rigid body + query pipeline
    Rapier,
    /// Headless stand-in: бесконечная горизонтальная плоскость на `height`
    FlatGround { height: f32 },
}

impl Default for GroundBackend {
    fn default() -> Self {
        Self::Rapier
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Горизонтальная скорость при полном input (m/s)
    pub move_speed: f32,
    /// Подъём начала ground probe над origin персонажа
    pub probe_offset: f32,
    /// Максимальная дистанция sphere cast вниз
    pub probe_distance: f32,
    /// Радиус probe = uniform scale × factor
    pub probe_radius_factor: f32,
    /// Ниже этой длины input считается шумом ("Speed" = 0)
    pub intensity_threshold: f32,
    /// Частота FixedUpdate (ground sensing)
    pub fixed_hz: f64,
    /// Гравитация для FlatGround backend (m/s²)
    pub gravity: f32,
    pub backend: GroundBackend,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            probe_offset: 1.0,
            probe_distance: 2.0,
            probe_radius_factor: 0.5,
            intensity_threshold: 0.001,
            fixed_hz: 60.0,
            gravity: -9.81,
            backend: GroundBackend::default(),
        }
    }
}

impl MovementConfig {
    /// Headless конфиг: плоский пол на заданной высоте вместо Rapier
    pub fn flat_ground(height: f32) -> Self {
        Self {
            backend: GroundBackend::FlatGround { height },
            ..default()
        }
    }

    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_controller_constants() {
        let config = MovementConfig::default();
        assert_eq!(config.move_speed, 10.0);
        assert_eq!(config.probe_offset, 1.0);
        assert_eq!(config.probe_distance, 2.0);
        assert_eq!(config.probe_radius_factor, 0.5);
        assert_eq!(config.intensity_threshold, 0.001);
        assert_eq!(config.backend, GroundBackend::Rapier);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MovementConfig::from_json_str(
            r#"{ "move_speed": 4.5, "backend": { "kind": "flat_ground", "height": -1.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.move_speed, 4.5);
        assert_eq!(config.backend, GroundBackend::FlatGround { height: -1.0 });
        assert_eq!(config.probe_distance, 2.0);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(MovementConfig::from_json_str("{ \"move_speed\": \"fast\" }").is_err());
    }
}
