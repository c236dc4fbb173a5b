//! Camera-relative математика движения
//!
//! Чистые функции без ECS: input + camera frame → direction, velocity, facing.
//! Системы в `movement::systems` только читают компоненты и применяют результат.

use bevy::prelude::*;

use crate::components::{CameraFrame, HorizontalBasis, InputSample, MovementController};

/// Горизонтальная проекция короче этого считается вырожденной
/// (камера смотрит почти строго вверх/вниз)
pub const DEGENERATE_PROJECTION: f32 = 1e-4;

/// Интенсивность движения для animation blend
///
/// Длина (h, v); всё что не больше `threshold` → ровно 0 (шум стика).
pub fn movement_intensity(input: &InputSample, threshold: f32) -> f32 {
    let magnitude = input.as_planar().length();
    if magnitude > threshold {
        magnitude
    } else {
        0.0
    }
}

/// Обнуляет y и нормализует; None если горизонтальной проекции нет
pub fn flatten(vector: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(vector.x, 0.0, vector.z);
    let length = flat.length();
    if !length.is_finite() || length <= DEGENERATE_PROJECTION {
        return None;
    }
    Some(flat / length)
}

/// Горизонтальный базис камеры
///
/// Forward и right проецируются одинаково. Если right вырожден
/// (камера с roll 90°), он восстанавливается из forward.
pub fn horizontal_basis(frame: &CameraFrame) -> Option<HorizontalBasis> {
    let forward = flatten(frame.forward)?;
    let right = flatten(frame.right).unwrap_or_else(|| forward.cross(Vec3::Y));
    Some(HorizontalBasis { forward, right })
}

/// forward × vertical + right × horizontal
pub fn camera_relative_direction(input: &InputSample, basis: &HorizontalBasis) -> Vec3 {
    basis.forward * input.vertical + basis.right * input.horizontal
}

/// Rotation при которой forward персонажа смотрит вдоль `direction` (up = +Y)
///
/// None для нулевого direction: ориентацию в этом случае не трогаем.
pub fn facing_rotation(direction: Vec3) -> Option<Quat> {
    if direction == Vec3::ZERO {
        return None;
    }
    let direction = Dir3::new(direction).ok()?;
    Some(Transform::IDENTITY.looking_to(direction, Dir3::Y).rotation)
}

/// Результат одного шага UpdateMovement для одного персонажа
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementStep {
    pub intensity: f32,
    pub direction: Vec3,
    /// Полная velocity: direction × speed + сохранённая вертикаль
    pub velocity: Vec3,
    pub facing: Option<Quat>,
    /// Базис который реально использовался (свежий или fallback)
    pub basis: Option<HorizontalBasis>,
    /// true если camera frame был вырожден
    pub degenerate_camera: bool,
}

pub fn compute_movement_step(
    input: &InputSample,
    frame: &CameraFrame,
    controller: &MovementController,
    current_velocity: Vec3,
    intensity_threshold: f32,
) -> MovementStep {
    let intensity = movement_intensity(input, intensity_threshold);

    let fresh = horizontal_basis(frame);
    let degenerate_camera = fresh.is_none();
    let basis = fresh.or(controller.last_valid_basis);

    let direction = basis
        .map(|basis| camera_relative_direction(input, &basis))
        .unwrap_or(Vec3::ZERO);

    // Вертикаль не трогаем: гравитацию/прыжки интегрирует physics host
    let velocity = direction * controller.move_speed + Vec3::Y * current_velocity.y;

    MovementStep {
        intensity,
        direction,
        velocity,
        facing: facing_rotation(direction),
        basis,
        degenerate_camera,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn z_forward_frame() -> CameraFrame {
        CameraFrame::new(Vec3::Z, Vec3::X)
    }

    fn assert_vec_eq(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < 1e-5,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_intensity_below_threshold_is_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..1000 {
            // Точки внутри круга радиуса 0.001
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let radius = rng.gen_range(0.0..=0.000_999_f32);
            let input = InputSample::new(radius * angle.cos(), radius * angle.sin());

            assert_eq!(movement_intensity(&input, 0.001), 0.0);
        }

        assert_eq!(movement_intensity(&InputSample::default(), 0.001), 0.0);
    }

    #[test]
    fn test_intensity_above_threshold_is_magnitude() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..1000 {
            let h: f32 = rng.gen_range(-1.0..=1.0);
            let v: f32 = rng.gen_range(-1.0..=1.0);
            let input = InputSample::new(h, v);
            let expected = (h * h + v * v).sqrt();
            if expected <= 0.0011 {
                continue;
            }

            let intensity = movement_intensity(&input, 0.001);
            assert!((intensity - expected).abs() < 1e-6, "h={} v={}", h, v);
        }
    }

    #[test]
    fn test_forward_input_moves_along_camera_forward() {
        let controller = MovementController::new(10.0);
        let step = compute_movement_step(
            &InputSample::new(0.0, 1.0),
            &z_forward_frame(),
            &controller,
            Vec3::new(3.0, -5.0, 3.0),
            0.001,
        );

        assert_vec_eq(step.velocity, Vec3::new(0.0, -5.0, 10.0));
    }

    #[test]
    fn test_strafe_input_moves_along_camera_right() {
        let controller = MovementController::new(10.0);
        let step = compute_movement_step(
            &InputSample::new(1.0, 0.0),
            &z_forward_frame(),
            &controller,
            Vec3::new(0.0, -5.0, 0.0),
            0.001,
        );

        assert_vec_eq(step.velocity, Vec3::new(10.0, -5.0, 0.0));
    }

    #[test]
    fn test_pitched_camera_forward_is_flattened() {
        // Камера смотрит вперёд и вниз под 45°
        let forward = Vec3::new(0.0, -1.0, 1.0).normalize();
        let frame = CameraFrame::new(forward, Vec3::X);
        let step = compute_movement_step(
            &InputSample::new(0.0, 1.0),
            &frame,
            &MovementController::new(10.0),
            Vec3::ZERO,
            0.001,
        );

        assert_vec_eq(step.velocity, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_rolled_camera_right_is_flattened() {
        // Right с вертикальной составляющей (camera roll)
        let right = Vec3::new(1.0, 1.0, 0.0).normalize();
        let frame = CameraFrame::new(Vec3::Z, right);
        let step = compute_movement_step(
            &InputSample::new(1.0, 0.0),
            &frame,
            &MovementController::new(10.0),
            Vec3::new(0.0, 2.0, 0.0),
            0.001,
        );

        assert_vec_eq(step.velocity, Vec3::new(10.0, 2.0, 0.0));
    }

    #[test]
    fn test_vertical_right_is_rebuilt_from_forward() {
        // Bevy convention: forward = -Z → right = +X
        let basis = horizontal_basis(&CameraFrame::new(Vec3::NEG_Z, Vec3::Y)).unwrap();
        assert_vec_eq(basis.forward, Vec3::NEG_Z);
        assert_vec_eq(basis.right, Vec3::X);
    }

    #[test]
    fn test_degenerate_camera_without_history_stops_horizontal_motion() {
        let frame = CameraFrame::new(Vec3::NEG_Y, Vec3::X);
        let step = compute_movement_step(
            &InputSample::new(0.5, 1.0),
            &frame,
            &MovementController::new(10.0),
            Vec3::new(4.0, -2.0, 4.0),
            0.001,
        );

        assert!(step.degenerate_camera);
        assert!(step.basis.is_none());
        assert_eq!(step.direction, Vec3::ZERO);
        assert_vec_eq(step.velocity, Vec3::new(0.0, -2.0, 0.0));
        assert!(step.facing.is_none());
        // Intensity от камеры не зависит
        assert!((step.intensity - 1.25_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_camera_reuses_last_valid_basis() {
        let mut controller = MovementController::new(10.0);
        controller.last_valid_basis = Some(HorizontalBasis {
            forward: Vec3::X,
            right: Vec3::NEG_Z,
        });

        let frame = CameraFrame::new(Vec3::Y, Vec3::NEG_Z);
        let step = compute_movement_step(
            &InputSample::new(0.0, 1.0),
            &frame,
            &controller,
            Vec3::ZERO,
            0.001,
        );

        assert!(step.degenerate_camera);
        assert_vec_eq(step.velocity, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_facing_forward_axis_matches_direction() {
        let direction = Vec3::new(3.0, 0.0, -4.0);
        let rotation = facing_rotation(direction).unwrap();
        let forward = rotation * Vec3::NEG_Z;

        assert_vec_eq(forward, direction.normalize());
    }

    #[test]
    fn test_zero_direction_has_no_facing() {
        assert!(facing_rotation(Vec3::ZERO).is_none());

        let step = compute_movement_step(
            &InputSample::default(),
            &z_forward_frame(),
            &MovementController::new(10.0),
            Vec3::new(1.0, -5.0, 1.0),
            0.001,
        );
        assert!(step.facing.is_none());
        assert_eq!(step.intensity, 0.0);
        assert_vec_eq(step.velocity, Vec3::new(0.0, -5.0, 0.0));
    }
}
