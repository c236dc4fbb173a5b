use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody};
use stride_simulation::logger::{self, LogLevel, LogPrinter};
use stride_simulation::{spawn_character, ActiveCamera, MovementConfig, SimulationPlugin};

mod camera;
mod debug_gizmos;
mod input;
mod rendering;

use camera::CameraPlugin;
use debug_gizmos::GroundProbeGizmosPlugin;
use input::PlayerInputPlugin;
use rendering::RenderingSyncPlugin;

/// Simulation logger → Bevy log (tracing)
struct BevyLogger;

impl LogPrinter for BevyLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Info => info!("{}", message),
            LogLevel::Warning => warn!("{}", message),
            LogLevel::Error => error!("{}", message),
        }
    }
}

fn main() {
    logger::set_logger(Box::new(BevyLogger));
    // Grounded пишется каждый tick — в окне оставляем только info+
    logger::set_log_level(LogLevel::Info);

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Stride - Movement Sandbox".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Rapier backend (default config)
        .insert_resource(MovementConfig::default())
        .add_plugins(SimulationPlugin)
        .add_plugins((
            PlayerInputPlugin,
            CameraPlugin,
            RenderingSyncPlugin,
            GroundProbeGizmosPlugin,
        ))
        .add_systems(Startup, setup_scene)
        .run();
}

const GROUND_HALF_EXTENT: f32 = 20.0;
const GROUND_HALF_THICKNESS: f32 = 0.1;

/// Collider пола толщиной 0.2m: верхняя грань ровно на y = 0
fn ground_collider() -> (Transform, RigidBody, Collider) {
    (
        Transform::from_xyz(0.0, -GROUND_HALF_THICKNESS, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(GROUND_HALF_EXTENT, GROUND_HALF_THICKNESS, GROUND_HALF_EXTENT),
    )
}

/// Spawn ground, a few obstacles, lights, camera and the player
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<MovementConfig>,
) {
    // Ground (40x40m): визуальная плоскость на y = 0, collider отдельно под ней
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(GROUND_HALF_EXTENT)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
    commands.spawn(ground_collider());

    // Ступени разной высоты: видно когда probe теряет землю
    for (i, height) in [0.5_f32, 1.0, 2.0, 3.0].into_iter().enumerate() {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(3.0, height, 3.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.5, 0.45, 0.4))),
            Transform::from_xyz(-6.0 + i as f32 * 4.0, height * 0.5, -8.0),
            RigidBody::Fixed,
            Collider::cuboid(1.5, height * 0.5, 1.5),
        ));
    }

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    // Camera (orbit around player) — её forward/right двигают персонажа
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 6.0, 12.0).looking_at(Vec3::ZERO, Vec3::Y),
        camera::OrbitCamera::default(),
        ActiveCamera,
    ));

    let player = spawn_character(&mut commands, Vec3::new(0.0, 3.0, 0.0), 1.0, config.move_speed);
    commands.entity(player).insert(rendering::NeedsVisual);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_collider_top_is_visual_plane() {
        let (transform, _, collider) = ground_collider();
        let cuboid = collider.as_cuboid().unwrap();

        let top = transform.translation.y + cuboid.half_extents().y;
        assert!(top.abs() < 1e-6, "top = {}", top);
    }
}
