//! ECS Components персонажа
//!
//! Организация по доменам:
//! - character: тело и контроллер (PhysicsBody, MovementController, GroundSensor)
//! - input: InputSample (два логических axis, перезаписываются каждый frame)
//! - camera: ActiveCamera marker + CameraFrame (forward/right активной камеры)
//! - animation: AnimationParameters (sink для "Speed")
//! - player: player control marker (Player)

pub mod animation;
pub mod camera;
pub mod character;
pub mod input;
pub mod player;

// Re-exports для удобного импорта
pub use animation::*;
pub use camera::*;
pub use character::*;
pub use input::*;
pub use player::*;
