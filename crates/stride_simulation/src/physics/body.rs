//! Тело персонажа и связь с physics host
//!
//! Архитектура:
//! - PhysicsBody.velocity — то что пишет update_movement
//! - Rapier backend: RigidBody::Dynamic, velocity синхронизируется с `Velocity`
//!   до и после update_movement (гравитацию интегрирует Rapier)
//! - FlatGround backend: gravity + интеграция + посадка на плоскость в FixedUpdate

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, LockedAxes, RigidBody, Velocity};

use super::ground::FlatGround;
use crate::components::{AnimationParameters, InputSample, MovementController, PhysicsBody, Player};
use crate::config::MovementConfig;

/// Капсула персонажа: полувысота цилиндра и радиус (при scale = 1)
pub const CAPSULE_HALF_HEIGHT: f32 = 0.5;
pub const CAPSULE_RADIUS: f32 = 0.5;

/// От origin (центр капсулы) до низа капсулы
pub fn capsule_half_extent(scale_y: f32) -> f32 {
    (CAPSULE_HALF_HEIGHT + CAPSULE_RADIUS) * scale_y.abs()
}

/// Система: Rapier velocity → PhysicsBody (перед update_movement)
///
/// Так update_movement видит актуальную вертикаль после physics step.
pub fn pull_velocity_from_rapier(
    mut query: Query<(&Velocity, &mut PhysicsBody), With<MovementController>>,
) {
    for (rapier_velocity, mut body) in query.iter_mut() {
        body.velocity = rapier_velocity.linvel;
    }
}

/// Система: PhysicsBody → Rapier velocity (после update_movement)
pub fn push_velocity_to_rapier(
    mut query: Query<(&PhysicsBody, &mut Velocity), With<MovementController>>,
) {
    for (body, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = body.velocity;
    }
}

/// Система применения gravity к velocity (FlatGround)
///
/// Гравитация действует всегда: grounded — сенсор для контроллера,
/// опору даёт resolve_ground_contact.
pub fn apply_gravity(
    config: Res<MovementConfig>,
    mut query: Query<&mut PhysicsBody, With<MovementController>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut body in query.iter_mut() {
        body.velocity.y += config.gravity * delta;
    }
}

/// Система интеграции velocity → Transform (FlatGround)
pub fn integrate_velocity_to_transform(
    mut query: Query<(&PhysicsBody, &mut Transform), With<MovementController>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (body, mut transform) in query.iter_mut() {
        transform.translation += body.velocity * delta;
    }
}

/// Система посадки на плоскость (FlatGround)
///
/// Низ капсулы не уходит под плоскость; падение гасится, подъём сохраняется.
pub fn resolve_ground_contact(
    ground: Res<FlatGround>,
    mut query: Query<(&mut PhysicsBody, &mut Transform), With<MovementController>>,
) {
    for (mut body, mut transform) in query.iter_mut() {
        let rest_height = ground.height + capsule_half_extent(transform.scale.y);
        if transform.translation.y <= rest_height {
            transform.translation.y = rest_height;
            body.velocity.y = body.velocity.y.max(0.0);
        }
    }
}

/// Spawn helper для создания персонажа игрока
///
/// Создает entity с полным набором компонентов:
/// - Transform (uniform scale)
/// - MovementController (+ PhysicsBody, GroundSensor через required components)
/// - InputSample, AnimationParameters, Player
/// - Rapier: RigidBody::Dynamic + Collider (capsule), rotation locked
///
/// Rapier компоненты безвредны для FlatGround backend (без Rapier plugin
/// их никто не читает).
pub fn spawn_character(
    commands: &mut Commands,
    position: Vec3,
    scale: f32,
    move_speed: f32,
) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
            MovementController::new(move_speed),
            InputSample::default(),
            AnimationParameters::default(),
            Player,
            // Rapier physics
            RigidBody::Dynamic,
            Collider::capsule_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS),
            LockedAxes::ROTATION_LOCKED,
            Velocity::default(),
        ))
        .id()
}
