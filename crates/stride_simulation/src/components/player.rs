//! Player control marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Клиент пишет InputSample только в entity с этим компонентом,
/// камера следует за ним же.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
