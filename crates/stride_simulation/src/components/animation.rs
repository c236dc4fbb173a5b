//! AnimationParameters — sink для float параметров анимации
//!
//! Сама анимационная система снаружи: она читает параметры по имени.

use bevy::prelude::*;
use std::collections::HashMap;

pub const SPEED_PARAMETER: &str = "Speed";

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AnimationParameters {
    floats: HashMap<String, f32>,
}

impl AnimationParameters {
    pub fn set_float(&mut self, name: &str, value: f32) {
        match self.floats.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.floats.insert(name.to_string(), value);
            }
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    pub fn speed(&self) -> f32 {
        self.float(SPEED_PARAMETER).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_float_overwrites() {
        let mut params = AnimationParameters::default();
        assert_eq!(params.float("Speed"), None);
        assert_eq!(params.speed(), 0.0);

        params.set_float("Speed", 0.8);
        params.set_float("Speed", 0.3);
        assert_eq!(params.float("Speed"), Some(0.3));
        assert_eq!(params.speed(), 0.3);
    }
}
