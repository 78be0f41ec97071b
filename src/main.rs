use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use storyprint::components::portrait::{AnimatedPortrait, PortraitShadow};
use storyprint::events::DialogueFinishedEvent;
use storyprint::plugins::dialogue::DialoguePlugin;
use storyprint::resources::character_roster::CharacterRoster;
use storyprint::resources::cli::CliArgs;
use storyprint::resources::dialogue_runner::DialogueRunner;
use storyprint::resources::printer_settings::PrinterSettings;
use storyprint::resources::text_printer::TextPrinter;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.build().disable::<bevy::audio::AudioPlugin>())
        .add_plugins(EguiPlugin)
        .add_plugins(DialoguePlugin::default())
        .insert_resource(CliArgs::parse())
        .add_systems(PreStartup, load_from_cli)
        .add_systems(Startup, spawn_stage)
        .add_systems(Update, exit_when_dialogue_finished)
        .run();
}

/// Loads the settings, roster and script named on the command line.
fn load_from_cli(
    cli: Res<CliArgs>,
    mut printer: ResMut<TextPrinter>,
    mut roster: ResMut<CharacterRoster>,
    mut runner: ResMut<DialogueRunner>,
) {
    *printer = TextPrinter::new(PrinterSettings::load_or_default(cli.settings.as_deref()));

    if let Some(path) = cli.roster.as_deref() {
        match CharacterRoster::load_from_file(path) {
            Ok(loaded) => *roster = loaded,
            Err(e) => error!("{}", e),
        }
    }

    match cli.script.as_deref() {
        Some(path) => match DialogueRunner::load_from_file(path) {
            Ok(loaded) => *runner = loaded,
            Err(e) => error!("{}", e),
        },
        None => warn!("No dialogue script given (use --script <path>)"),
    }
}

/// Camera plus two facing portraits, each with a shadow overlay.
fn spawn_stage(mut commands: Commands) {
    commands.spawn(Camera2d);

    for (participant, side) in [(0usize, JustifyContent::FlexStart), (1, JustifyContent::FlexEnd)] {
        commands
            .spawn(Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: side,
                align_items: AlignItems::FlexEnd,
                padding: UiRect::bottom(Val::Px(140.0)),
                position_type: PositionType::Absolute,
                ..default()
            })
            .with_children(|parent| {
                parent
                    .spawn((
                        Name::new(format!("Portrait{}", participant)),
                        AnimatedPortrait::new(participant),
                        ImageNode::default(),
                        Node {
                            width: Val::Px(256.0),
                            height: Val::Px(256.0),
                            ..default()
                        },
                    ))
                    .with_children(|portrait| {
                        portrait.spawn((
                            PortraitShadow::default(),
                            BackgroundColor(Color::NONE),
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                        ));
                    });
            });
    }
}

fn exit_when_dialogue_finished(
    mut finished: EventReader<DialogueFinishedEvent>,
    mut exit: EventWriter<AppExit>,
) {
    if finished.read().next().is_some() {
        info!("Dialogue finished, exiting");
        exit.send(AppExit::Success);
    }
}
