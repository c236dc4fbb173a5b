//! Headless симуляция Stride
//!
//! Персонаж падает на FlatGround и бегает по scripted (seeded) input,
//! камера зафиксирована через CameraFrame override.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::Rng;
use stride_simulation::{
    create_headless_app, log_info, spawn_character, CameraFrame, DeterministicRng, GroundSensor,
    InputSample, MovementConfig, PhysicsBody, Player,
};

/// Новый input каждые 30 frames (0.5 sec)
const INPUT_HOLD_FRAMES: u32 = 30;

fn scripted_input(
    mut rng: ResMut<DeterministicRng>,
    mut players: Query<&mut InputSample, With<Player>>,
    mut frame: Local<u32>,
) {
    *frame += 1;
    if *frame % INPUT_HOLD_FRAMES != 1 {
        return;
    }

    for mut input in players.iter_mut() {
        // Каждый третий отрезок — стоим на месте
        *input = if rng.rng.gen_ratio(1, 3) {
            InputSample::default()
        } else {
            InputSample::new(rng.rng.gen_range(-1.0..=1.0), rng.rng.gen_range(-1.0..=1.0))
        };
    }
}

fn main() {
    let seed = 42;
    println!("Starting Stride headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    let fixed_hz = app.world().resource::<MovementConfig>().fixed_hz;

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / fixed_hz,
    )))
    .insert_resource(CameraFrame::new(Vec3::NEG_Z, Vec3::X))
    .add_systems(PreUpdate, scripted_input);

    let speed = app.world().resource::<MovementConfig>().move_speed;
    let player = spawn_character(
        &mut app.world_mut().commands(),
        Vec3::new(0.0, 5.0, 0.0),
        1.0,
        speed,
    );
    app.world_mut().flush();

    for tick in 0..600 {
        app.update();

        if tick % 60 == 0 {
            let world = app.world();
            let (Some(transform), Some(body), Some(sensor)) = (
                world.get::<Transform>(player),
                world.get::<PhysicsBody>(player),
                world.get::<GroundSensor>(player),
            ) else {
                continue;
            };
            log_info(&format!(
                "Tick {}: position {:?}, velocity {:?}, grounded {}",
                tick, transform.translation, body.velocity, sensor.grounded
            ));
        }
    }

    println!("Simulation complete!");
}
