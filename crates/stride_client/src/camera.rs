use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::input::InputSystem;
use bevy::prelude::*;
use stride_simulation::Player;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        // До update_movement: движение читает forward/right уже этого frame
        app.add_systems(
            PreUpdate,
            (orbit_camera_controls, follow_player, update_camera_transform)
                .chain()
                .after(InputSystem),
        );
    }
}

#[derive(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,   // Horizontal rotation (radians)
    pub pitch: f32, // Vertical rotation (radians)
    pub sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 12.0,
            yaw: 0.0,
            pitch: std::f32::consts::FRAC_PI_6, // 30°
            sensitivity: 0.005,
            zoom_speed: 1.0,
        }
    }
}

/// Handle mouse input for orbit camera
fn orbit_camera_controls(
    mut query: Query<&mut OrbitCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let mut camera = match query.single_mut() {
        Ok(cam) => cam,
        Err(_) => return,
    };

    // Right mouse button: orbit
    if mouse_buttons.pressed(MouseButton::Right) {
        for motion in mouse_motion.read() {
            camera.yaw -= motion.delta.x * camera.sensitivity;
            camera.pitch -= motion.delta.y * camera.sensitivity;

            // Pitch до ±90° разрешён: вырожденный forward обрабатывает контроллер
            camera.pitch = camera.pitch.clamp(
                -std::f32::consts::FRAC_PI_2,
                std::f32::consts::FRAC_PI_2,
            );
        }
    } else {
        // Consume motion events even when not orbiting
        mouse_motion.clear();
    }

    // Mouse wheel: zoom
    for wheel in mouse_wheel.read() {
        camera.distance -= wheel.y * camera.zoom_speed;
        camera.distance = camera.distance.clamp(3.0, 50.0);
    }
}

/// Focus камеры = позиция игрока
fn follow_player(
    player: Query<&Transform, With<Player>>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };

    for mut camera in cameras.iter_mut() {
        if camera.focus != player_transform.translation {
            camera.focus = player_transform.translation;
        }
    }
}

/// Update camera transform based on orbit parameters
///
/// GlobalTransform пишем сразу: update_movement читает его в этом же frame,
/// а propagate будет только в PostUpdate.
fn update_camera_transform(
    mut query: Query<(&OrbitCamera, &mut Transform, &mut GlobalTransform), Changed<OrbitCamera>>,
) {
    for (camera, mut transform, mut global) in query.iter_mut() {
        // Calculate position from spherical coordinates
        let x = camera.distance * camera.pitch.cos() * camera.yaw.sin();
        let y = camera.distance * camera.pitch.sin();
        let z = camera.distance * camera.pitch.cos() * camera.yaw.cos();

        let position = camera.focus + Vec3::new(x, y, z);

        // Строго сверху up = Y вырожден, берём up вдоль yaw
        let up = if camera.pitch.cos().abs() < 1e-4 {
            Vec3::new(-camera.yaw.sin(), 0.0, -camera.yaw.cos())
        } else {
            Vec3::Y
        };

        *transform = Transform::from_translation(position).looking_at(camera.focus, up);
        *global = GlobalTransform::from(*transform);
    }
}
