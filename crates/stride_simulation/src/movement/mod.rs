//! Movement domain — camera-relative движение персонажа
//!
//! Содержит:
//! - direction: чистая математика (intensity, flatten, direction, facing)
//! - systems: update_movement (Update schedule, один раз за frame)

pub mod direction;
pub mod systems;

pub use direction::*;
pub use systems::*;
