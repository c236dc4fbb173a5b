//! InputSample — два логических axis ("Horizontal", "Vertical")

use bevy::prelude::*;

pub const HORIZONTAL_AXIS: &str = "Horizontal";
pub const VERTICAL_AXIS: &str = "Vertical";

/// Input за текущий frame
///
/// # Coordinate System
/// - `horizontal`: -1.0 (left) → +1.0 (right)
/// - `vertical`: -1.0 (backward) → +1.0 (forward)
///
/// История не хранится: host перезаписывает sample каждый frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct InputSample {
    pub horizontal: f32,
    pub vertical: f32,
}

impl InputSample {
    /// Значения вне [-1, 1] обрезаются
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal: horizontal.clamp(-1.0, 1.0),
            vertical: vertical.clamp(-1.0, 1.0),
        }
    }

    /// Запись axis по имени из input map'а (с clamp). Неизвестные имена игнорируются.
    pub fn set_axis(&mut self, name: &str, value: f32) {
        let value = value.clamp(-1.0, 1.0);
        match name {
            HORIZONTAL_AXIS => self.horizontal = value,
            VERTICAL_AXIS => self.vertical = value,
            _ => {}
        }
    }

    /// (h, 0, v) — input в плоскости XZ
    pub fn as_planar(&self) -> Vec3 {
        Vec3::new(self.horizontal, 0.0, self.vertical)
    }
}
