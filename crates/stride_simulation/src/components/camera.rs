//! Camera frame для camera-relative движения
//!
//! Контроллер не владеет камерой: он только читает её forward/right.

use bevy::prelude::*;

/// Marker для камеры, относительно которой двигается игрок
///
/// Если таких камер несколько, берётся первая найденная.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ActiveCamera;

/// Forward и right вектора активной камеры (world space)
///
/// Как Resource работает как явный override (headless прогоны, тесты):
/// если он вставлен, ActiveCamera не читается.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub forward: Vec3,
    pub right: Vec3,
}

impl CameraFrame {
    pub fn new(forward: Vec3, right: Vec3) -> Self {
        Self { forward, right }
    }

    pub fn from_global_transform(transform: &GlobalTransform) -> Self {
        Self {
            forward: transform.forward().as_vec3(),
            right: transform.right().as_vec3(),
        }
    }
}
