//! Stride Simulation Core
//!
//! Camera-relative контроллер персонажа на Bevy 0.16 + Rapier.
//!
//! Порядок внутри frame (Bevy schedule):
//! - FixedUpdate (60Hz): ground sensing (sphere cast вниз)
//! - Update: input + camera → velocity, facing, animation "Speed"
//! - PostUpdate: physics host (Rapier step)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod logger;
pub mod movement;
pub mod physics;

pub use components::*;
pub use config::{GroundBackend, MovementConfig};
pub use logger::{log, log_error, log_info, log_warning};
pub use movement::{compute_movement_step, movement_intensity, update_movement, MovementStep};
pub use physics::{spawn_character, CharacterPhysicsPlugin, FlatGround, ShapeCastQuery, SphereProbe};

/// Главный plugin симуляции
///
/// Берёт MovementConfig из App (если вставлен до plugin'а), иначе default.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<MovementConfig>()
            .cloned()
            .unwrap_or_default();

        app
            // Fixed timestep для ground sensing
            .insert_resource(Time::<Fixed>::from_hz(config.fixed_hz))
            .add_plugins(CharacterPhysicsPlugin {
                backend: config.backend,
            })
            .insert_resource(config)
            .register_type::<PhysicsBody>()
            .register_type::<MovementController>()
            .register_type::<GroundSensor>()
            .register_type::<InputSample>()
            .add_systems(Update, update_movement);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Используется headless runner'ом для scripted input.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// FlatGround на y = 0 вместо Rapier. SimulationPlugin добавляется сюда же.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(MovementConfig::flat_ground(0.0))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
