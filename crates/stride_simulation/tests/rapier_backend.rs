//! Rapier backend integration test
//!
//! Headless App с настоящим Rapier: MinimalPlugins + TransformPlugin,
//! MovementConfig::default() (backend = Rapier), fixed пол 40×0.2×40
//! с верхней гранью на y = 0.1. Время шагает по 1/60 sec.
//!
//! Проверяем:
//! - sphere cast через Rapier query pipeline (grounded / airborne)
//! - velocity sync: горизонталь из input, вертикаль из Rapier
//! - facing по направлению движения

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::prelude::{Collider, RigidBody, Velocity};
use stride_simulation::*;

const GROUND_TOP: f32 = 0.1;

/// Helper: App с Rapier, камера вдоль +Z, пол под персонажами
fn create_rapier_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(MovementConfig::default())
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .insert_resource(CameraFrame::new(Vec3::Z, Vec3::X))
        .add_plugins(SimulationPlugin);

    app.world_mut().spawn((
        Transform::default(),
        RigidBody::Fixed,
        Collider::cuboid(20.0, GROUND_TOP, 20.0),
    ));
    app
}

fn spawn_at(app: &mut App, position: Vec3) -> Entity {
    let entity = spawn_character(&mut app.world_mut().commands(), position, 1.0, 10.0);
    app.world_mut().flush();
    entity
}

fn set_input(app: &mut App, entity: Entity, horizontal: f32, vertical: f32) {
    let mut input = app.world_mut().get_mut::<InputSample>(entity).unwrap();
    *input = InputSample::new(horizontal, vertical);
}

fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn grounded(app: &App, entity: Entity) -> bool {
    app.world().get::<GroundSensor>(entity).unwrap().grounded
}

fn velocity(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<PhysicsBody>(entity).unwrap().velocity
}

#[test]
fn test_rapier_sphere_cast_senses_ground() {
    let mut app = create_rapier_app();
    // Низ капсулы на верхней грани пола
    let standing = spawn_at(&mut app, Vec3::new(0.0, GROUND_TOP + 1.0, 0.0));
    let high = spawn_at(&mut app, Vec3::new(5.0, 10.0, 0.0));

    run(&mut app, 5);

    assert!(grounded(&app, standing));
    // Собственная капсула не даёт ложного попадания
    assert!(!grounded(&app, high));

    // 2 sec хватает чтобы упасть с ~9m
    run(&mut app, 120);

    assert!(grounded(&app, high));
    let y = app.world().get::<Transform>(high).unwrap().translation.y;
    assert!((y - (GROUND_TOP + 1.0)).abs() < 0.05, "y = {}", y);
}

#[test]
fn test_rapier_strafe_keeps_vertical_velocity_from_physics() {
    let mut app = create_rapier_app();
    let standing = spawn_at(&mut app, Vec3::new(0.0, GROUND_TOP + 1.0, 0.0));
    let falling = spawn_at(&mut app, Vec3::new(10.0, 15.0, 0.0));
    run(&mut app, 3);

    set_input(&mut app, standing, 1.0, 0.0);
    set_input(&mut app, falling, 1.0, 0.0);
    run(&mut app, 30);

    let standing_velocity = velocity(&app, standing);
    assert!((standing_velocity.x - 10.0).abs() < 1e-4);
    assert!(standing_velocity.z.abs() < 1e-4);
    assert!(standing_velocity.y.abs() < 0.1, "vy = {}", standing_velocity.y);

    // Вертикаль интегрирует Rapier, movement её только переносит
    let falling_velocity = velocity(&app, falling);
    assert!((falling_velocity.x - 10.0).abs() < 1e-4);
    assert!(falling_velocity.y < -4.0, "vy = {}", falling_velocity.y);

    // Горизонталь доходит до Rapier body
    let rapier_velocity = app.world().get::<Velocity>(falling).unwrap().linvel;
    assert!((rapier_velocity.x - 10.0).abs() < 1e-3, "linvel = {:?}", rapier_velocity);

    let x = app.world().get::<Transform>(standing).unwrap().translation.x;
    assert!(x > 2.0, "x = {}", x);
}

#[test]
fn test_rapier_facing_follows_movement_direction() {
    let mut app = create_rapier_app();
    let entity = spawn_at(&mut app, Vec3::new(0.0, GROUND_TOP + 1.0, 0.0));
    run(&mut app, 3);

    set_input(&mut app, entity, 1.0, 0.0);
    run(&mut app, 5);
    let forward = app.world().get::<Transform>(entity).unwrap().forward().as_vec3();
    assert!((forward - Vec3::X).length() < 1e-3, "forward = {:?}", forward);

    set_input(&mut app, entity, 0.0, 1.0);
    run(&mut app, 5);
    let forward = app.world().get::<Transform>(entity).unwrap().forward().as_vec3();
    assert!((forward - Vec3::Z).length() < 1e-3, "forward = {:?}", forward);
}
