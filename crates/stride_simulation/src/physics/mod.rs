//! Physics module
//!
//! Ground sensing (sphere cast) и связь PhysicsBody с physics host.
//! Два backend: Rapier и FlatGround (headless плоскость).

pub mod body;
pub mod ground;

use bevy::prelude::*;
use bevy_rapier3d::prelude::{NoUserData, RapierPhysicsPlugin};

use crate::config::{GroundBackend, MovementConfig};
use crate::movement::update_movement;

// Re-export основных типов
pub use body::{
    apply_gravity, capsule_half_extent, integrate_velocity_to_transform, pull_velocity_from_rapier,
    push_velocity_to_rapier, resolve_ground_contact, spawn_character, CAPSULE_HALF_HEIGHT,
    CAPSULE_RADIUS,
};
pub use ground::{
    sense_ground, sense_ground_flat, sense_ground_rapier, FlatGround, GroundHit, RapierGroundQuery,
    ShapeCastQuery, SphereProbe,
};

/// Plugin physics host'а
///
/// Регистрирует ground sensing в FixedUpdate и синхронизацию velocity
/// вокруг update_movement, в зависимости от `MovementConfig::backend`.
pub struct CharacterPhysicsPlugin {
    pub backend: GroundBackend,
}

impl Plugin for CharacterPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementConfig>();

        match self.backend {
            GroundBackend::Rapier => {
                if !app.is_plugin_added::<RapierPhysicsPlugin<NoUserData>>() {
                    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
                }

                app.add_systems(FixedUpdate, sense_ground_rapier).add_systems(
                    Update,
                    (
                        pull_velocity_from_rapier.before(update_movement),
                        push_velocity_to_rapier.after(update_movement),
                    ),
                );
            }
            GroundBackend::FlatGround { height } => {
                app.insert_resource(FlatGround { height }).add_systems(
                    FixedUpdate,
                    (
                        sense_ground_flat,
                        apply_gravity,
                        integrate_velocity_to_transform,
                        resolve_ground_contact,
                    )
                        .chain(), // Последовательное выполнение
                );
            }
        }
    }
}
