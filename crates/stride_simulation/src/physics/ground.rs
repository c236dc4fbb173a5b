//! Ground sensing через sphere cast вниз
//!
//! Архитектура:
//! - ShapeCastQuery — seam к physics host (Rapier или FlatGround)
//! - sense_ground — чистая функция: probe + query → GroundSensor
//! - sense_ground_* — FixedUpdate системы для конкретного backend
//!
//! Probe: сфера радиуса (scale.x × 0.5) из точки origin + 1.0 вверх,
//! вниз на 2.0. Без smoothing/coyote time: grounded пересчитывается каждый tick.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, QueryFilter, RapierContext, ReadRapierContext, ShapeCastOptions};

use crate::components::GroundSensor;
use crate::config::MovementConfig;
use crate::logger;

/// Параметры sphere cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereProbe {
    pub origin: Vec3,
    pub radius: f32,
    pub direction: Dir3,
    pub max_distance: f32,
}

impl SphereProbe {
    /// Probe под персонажем
    ///
    /// Персонажи — root entities, поэтому Transform.scale и есть lossy scale.
    pub fn below(transform: &Transform, config: &MovementConfig) -> Self {
        Self {
            origin: transform.translation + Vec3::Y * config.probe_offset,
            radius: transform.scale.x.abs() * config.probe_radius_factor,
            direction: Dir3::NEG_Y,
            max_distance: config.probe_distance,
        }
    }

    /// Центр сферы в конце cast (для debug gizmos)
    pub fn end(&self) -> Vec3 {
        self.origin + self.direction * self.max_distance
    }
}

/// Попадание sphere cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// Пройденная сферой дистанция до контакта
    pub distance: f32,
}

/// Shape-cast query service physics host'а
pub trait ShapeCastQuery {
    fn cast_sphere(&self, probe: &SphereProbe) -> Option<GroundHit>;
}

/// grounded = есть попадание в пределах max_distance
pub fn sense_ground(query: &impl ShapeCastQuery, probe: &SphereProbe) -> GroundSensor {
    match query.cast_sphere(probe) {
        Some(hit) if hit.distance <= probe.max_distance => GroundSensor {
            grounded: true,
            distance: Some(hit.distance),
        },
        _ => GroundSensor::default(),
    }
}

/// Headless physics host: бесконечная горизонтальная плоскость
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    pub height: f32,
}

impl ShapeCastQuery for FlatGround {
    fn cast_sphere(&self, probe: &SphereProbe) -> Option<GroundHit> {
        // Зазор между низом сферы и плоскостью
        let gap = probe.origin.y - probe.radius - self.height;
        let descent = -probe.direction.y;

        let distance = if gap <= 0.0 {
            // Сфера уже касается/внутри плоскости
            0.0
        } else if descent > 0.0 {
            gap / descent
        } else {
            return None;
        };

        if distance > probe.max_distance {
            return None;
        }

        Some(GroundHit { distance })
    }
}

/// Rapier query pipeline, без собственного тела персонажа
pub struct RapierGroundQuery<'a, 'c> {
    pub context: &'a RapierContext<'c>,
    pub exclude: Entity,
}

impl ShapeCastQuery for RapierGroundQuery<'_, '_> {
    fn cast_sphere(&self, probe: &SphereProbe) -> Option<GroundHit> {
        let shape = Collider::ball(probe.radius);
        let options = ShapeCastOptions {
            max_time_of_impact: probe.max_distance,
            target_distance: 0.0,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: true,
        };
        let filter = QueryFilter::default()
            .exclude_rigid_body(self.exclude)
            .exclude_sensors();

        // direction — unit vector, поэтому time_of_impact == дистанция
        // cast_shape принимает parry Shape, не bevy Collider
        let (_, hit) = self.context.cast_shape(
            probe.origin,
            Quat::IDENTITY,
            probe.direction.as_vec3(),
            &*shape.raw,
            options,
            filter,
        )?;

        Some(GroundHit {
            distance: hit.time_of_impact,
        })
    }
}

fn log_grounded(entity: Entity, sensor: &GroundSensor) {
    logger::log(&format!("{:?} grounded: {}", entity, sensor.grounded));
}

/// Система ground sensing через Rapier (FixedUpdate)
pub fn sense_ground_rapier(
    config: Res<MovementConfig>,
    rapier_context: ReadRapierContext,
    mut query: Query<(Entity, &Transform, &mut GroundSensor)>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, transform, mut sensor) in query.iter_mut() {
        let probe = SphereProbe::below(transform, &config);
        let caster = RapierGroundQuery {
            context: &context,
            exclude: entity,
        };
        *sensor = sense_ground(&caster, &probe);
        log_grounded(entity, &sensor);
    }
}

/// Система ground sensing против FlatGround (FixedUpdate, headless)
pub fn sense_ground_flat(
    config: Res<MovementConfig>,
    ground: Res<FlatGround>,
    mut query: Query<(Entity, &Transform, &mut GroundSensor)>,
) {
    for (entity, transform, mut sensor) in query.iter_mut() {
        let probe = SphereProbe::below(transform, &config);
        *sensor = sense_ground(&*ground, &probe);
        log_grounded(entity, &sensor);
    }
}
