use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy_rapier3d::plugin::PhysicsSet;
use stride_simulation::{AnimationParameters, MovementController};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (spawn_visuals_for_new_entities, sync_transforms, draw_speed_bars)
                .chain()
                .after(PhysicsSet::Writeback)
                .before(TransformSystem::TransformPropagate),
        );
    }
}

/// Marker: simulation entity needs visual representation
#[derive(Component)]
pub struct NeedsVisual;

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf(pub Entity);

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// Spawn visual representation (capsule + nose) for new characters
fn spawn_visuals_for_new_entities(
    mut commands: Commands,
    query: Query<(Entity, &Transform), (With<MovementController>, With<NeedsVisual>)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (sim_entity, sim_transform) in query.iter() {
        // Capsule 2m: совпадает с collider (half height 0.5 + radius 0.5)
        let visual_entity = commands
            .spawn((
                Mesh3d(meshes.add(Capsule3d::new(0.5, 1.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.2, 0.4, 0.8),
                    ..default()
                })),
                *sim_transform,
                VisualOf(sim_entity),
            ))
            .id();

        // Nose: показывает facing (forward = -Z)
        let nose = commands
            .spawn((
                Mesh3d(meshes.add(Cuboid::new(0.2, 0.2, 0.4))),
                MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.2))),
                Transform::from_xyz(0.0, 0.5, -0.55),
            ))
            .id();

        commands
            .entity(sim_entity)
            .remove::<NeedsVisual>()
            .insert(HasVisual(visual_entity));

        commands.entity(visual_entity).add_child(nose);
    }
}

/// Sync simulation transforms → visual transforms
fn sync_transforms(
    sim_query: Query<(&Transform, &HasVisual), Changed<Transform>>,
    mut visual_query: Query<&mut Transform, (With<VisualOf>, Without<HasVisual>)>,
) {
    for (sim_transform, has_visual) in sim_query.iter() {
        if let Ok(mut visual_transform) = visual_query.get_mut(has_visual.0) {
            *visual_transform = *sim_transform;
        }
    }
}

/// Animation "Speed" над головой персонажа (stand-in для locomotion blend)
fn draw_speed_bars(
    query: Query<(&Transform, &AnimationParameters)>,
    mut gizmos: Gizmos,
) {
    for (transform, params) in query.iter() {
        let bar_width = 1.0;
        let bar_height = 0.1;
        let speed = params.speed().clamp(0.0, 1.0);
        let world_pos = transform.translation + Vec3::Y * 1.4;

        gizmos.rect(
            bevy::math::Isometry3d::new(world_pos, Quat::IDENTITY),
            Vec2::new(bar_width, bar_height),
            Color::srgb(0.3, 0.3, 0.3),
        );

        if speed > 0.0 {
            let fg_pos = world_pos - Vec3::X * (bar_width * (1.0 - speed) * 0.5);
            gizmos.rect(
                bevy::math::Isometry3d::new(fg_pos, Quat::IDENTITY),
                Vec2::new(bar_width * speed, bar_height),
                Color::srgb(0.2, 0.8, 0.2),
            );
        }
    }
}
