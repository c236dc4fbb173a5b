//! Keyboard → InputSample
//!
//! Два логических axis как в классических input map'ах:
//! - "Horizontal": A/D, ←/→
//! - "Vertical": W/S, ↑/↓

use bevy::input::InputSystem;
use bevy::prelude::*;
use stride_simulation::{InputSample, Player, HORIZONTAL_AXIS, VERTICAL_AXIS};

pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, read_player_axes.after(InputSystem));
    }
}

/// Input map: axis → (negative keys, positive keys)
const AXIS_BINDINGS: [(&str, [KeyCode; 2], [KeyCode; 2]); 2] = [
    (HORIZONTAL_AXIS, [KeyCode::KeyA, KeyCode::ArrowLeft], [KeyCode::KeyD, KeyCode::ArrowRight]),
    (VERTICAL_AXIS, [KeyCode::KeyS, KeyCode::ArrowDown], [KeyCode::KeyW, KeyCode::ArrowUp]),
];

fn axis(keys: &ButtonInput<KeyCode>, negative: [KeyCode; 2], positive: [KeyCode; 2]) -> f32 {
    let mut value = 0.0;
    if keys.any_pressed(negative) {
        value -= 1.0;
    }
    if keys.any_pressed(positive) {
        value += 1.0;
    }
    value
}

/// Перезаписывает InputSample игрока каждый frame
fn read_player_axes(
    keys: Res<ButtonInput<KeyCode>>,
    mut players: Query<&mut InputSample, With<Player>>,
) {
    let sample = sample_from_keys(&keys);

    for mut input in players.iter_mut() {
        *input = sample;
    }
}

fn sample_from_keys(keys: &ButtonInput<KeyCode>) -> InputSample {
    let mut sample = InputSample::default();
    for (name, negative, positive) in AXIS_BINDINGS {
        sample.set_axis(name, axis(keys, negative, positive));
    }
    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_keys() {
        let mut keys = ButtonInput::<KeyCode>::default();
        let negative = [KeyCode::KeyA, KeyCode::ArrowLeft];
        let positive = [KeyCode::KeyD, KeyCode::ArrowRight];
        assert_eq!(axis(&keys, negative, positive), 0.0);

        keys.press(KeyCode::ArrowRight);
        assert_eq!(axis(&keys, negative, positive), 1.0);

        // Обе стороны нажаты → гасят друг друга
        keys.press(KeyCode::KeyA);
        assert_eq!(axis(&keys, negative, positive), 0.0);

        keys.release(KeyCode::ArrowRight);
        assert_eq!(axis(&keys, negative, positive), -1.0);
    }

    #[test]
    fn test_sample_from_keys_uses_named_axes() {
        let mut keys = ButtonInput::<KeyCode>::default();
        assert_eq!(sample_from_keys(&keys), InputSample::default());

        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::ArrowLeft);
        assert_eq!(sample_from_keys(&keys), InputSample::new(-1.0, 1.0));
    }
}
