//! Компоненты персонажа: тело, контроллер движения, ground sensor

use bevy::prelude::*;

/// Velocity тела персонажа
///
/// Зеркало velocity physics host'а: для Rapier синхронизируется с `Velocity`,
/// для FlatGround интегрируется напрямую в Transform.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
}

/// Горизонтальный базис камеры (forward/right, y = 0, unit length)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct HorizontalBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

/// Контроллер движения (camera-relative)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(PhysicsBody, GroundSensor)]
pub struct MovementController {
    /// Скорость движения (m/s)
    pub move_speed: f32,
    /// Последний невырожденный базис камеры
    ///
    /// Используется когда камера смотрит почти вертикально и forward
    /// теряет горизонтальную проекцию.
    pub last_valid_basis: Option<HorizontalBasis>,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl MovementController {
    pub fn new(move_speed: f32) -> Self {
        Self {
            move_speed,
            last_valid_basis: None,
        }
    }
}

/// Результат ground sensing за последний fixed tick
///
/// Без hysteresis: пересчитывается безусловно каждый tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GroundSensor {
    pub grounded: bool,
    /// Дистанция до поверхности (только если grounded)
    pub distance: Option<f32>,
}
