//! UpdateMovement — per-frame система (Update schedule)
//!
//! FixedUpdate (ground sensing) идёт раньше в том же frame,
//! поэтому здесь grounded уже свежий.

use bevy::prelude::*;

use super::direction::compute_movement_step;
use crate::components::{
    ActiveCamera, AnimationParameters, CameraFrame, InputSample, MovementController, PhysicsBody,
    SPEED_PARAMETER,
};
use crate::config::MovementConfig;
use crate::logger;

/// Camera frame для текущего frame
///
/// Resource override (если вставлен) важнее ActiveCamera в мире.
fn resolve_camera_frame(
    camera_override: Option<&CameraFrame>,
    cameras: &Query<&GlobalTransform, With<ActiveCamera>>,
) -> Option<CameraFrame> {
    if let Some(frame) = camera_override {
        return Some(*frame);
    }
    cameras
        .iter()
        .next()
        .map(CameraFrame::from_global_transform)
}

/// Система: input + camera → velocity, facing, "Speed"
pub fn update_movement(
    config: Res<MovementConfig>,
    camera_override: Option<Res<CameraFrame>>,
    cameras: Query<&GlobalTransform, With<ActiveCamera>>,
    mut characters: Query<(
        Entity,
        &InputSample,
        &mut MovementController,
        &mut PhysicsBody,
        &mut Transform,
        Option<&mut AnimationParameters>,
    )>,
    mut missing_camera_reported: Local<bool>,
    mut degenerate_reported: Local<bool>,
) {
    let Some(frame) = resolve_camera_frame(camera_override.as_deref(), &cameras) else {
        if !*missing_camera_reported {
            logger::log_warning("update_movement: no ActiveCamera or CameraFrame, movement skipped");
            *missing_camera_reported = true;
        }
        return;
    };
    *missing_camera_reported = false;

    for (entity, input, mut controller, mut body, mut transform, animation) in characters.iter_mut() {
        let step = compute_movement_step(
            input,
            &frame,
            &controller,
            body.velocity,
            config.intensity_threshold,
        );

        if let Some(mut animation) = animation {
            animation.set_float(SPEED_PARAMETER, step.intensity);
        }

        if step.degenerate_camera {
            if !*degenerate_reported {
                logger::log_warning(&format!(
                    "update_movement: camera forward {:?} has no horizontal projection, {:?} uses {}",
                    frame.forward,
                    entity,
                    if step.basis.is_some() { "last valid basis" } else { "zero direction" }
                ));
                *degenerate_reported = true;
            }
        } else {
            *degenerate_reported = false;
            controller.last_valid_basis = step.basis;
        }

        body.velocity = step.velocity;

        if let Some(rotation) = step.facing {
            transform.rotation = rotation;
        }
    }
}
