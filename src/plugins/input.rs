use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Actionlike, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum DialogueAction {
    /// Skip the reveal or advance past a finished line.
    Confirm,
}

/// Marker for the entity that carries the dialogue `ActionState`.
#[derive(Component, Debug)]
pub struct DialogueInput;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<DialogueAction>::default())
            .add_systems(Startup, spawn_dialogue_input);
    }
}

pub fn get_default_input_map() -> InputMap<DialogueAction> {
    let mut input_map = InputMap::default();

    input_map.insert(DialogueAction::Confirm, MouseButton::Left);
    input_map.insert(DialogueAction::Confirm, KeyCode::Space);
    input_map.insert(DialogueAction::Confirm, KeyCode::Enter);

    input_map
}

fn spawn_dialogue_input(mut commands: Commands) {
    commands.spawn((
        Name::new("DialogueInput"),
        DialogueInput,
        InputManagerBundle::with_map(get_default_input_map()),
    ));
}
