//! Debug визуализация ground probe
//!
//! Две wire-сферы: начало sphere cast и его конец на max distance.
//! Цвет: зелёный если grounded, красный если нет.

use bevy::prelude::*;
use stride_simulation::{GroundSensor, MovementConfig, SphereProbe};

pub struct GroundProbeGizmosPlugin;

impl Plugin for GroundProbeGizmosPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_ground_probes);
    }
}

fn draw_ground_probes(
    config: Res<MovementConfig>,
    query: Query<(&Transform, &GroundSensor)>,
    mut gizmos: Gizmos,
) {
    for (transform, sensor) in query.iter() {
        let probe = SphereProbe::below(transform, &config);
        let color = if sensor.grounded {
            Color::srgb(0.2, 0.9, 0.2)
        } else {
            Color::srgb(0.9, 0.2, 0.2)
        };

        gizmos.sphere(bevy::math::Isometry3d::from_translation(probe.origin), probe.radius, color);
        gizmos.sphere(bevy::math::Isometry3d::from_translation(probe.end()), probe.radius, color);
    }
}
