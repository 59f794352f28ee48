use crate::app::events::PointerHit;
use crate::app::state::{GestureKind, WallGesture};
use crate::app::{AppCommand, AppIntent, AppState, EditorTool};
use crate::core::{Journal, WallEnd};
use glam::Vec2;

use super::map_intent_to_commands;

fn with_gesture(kind: GestureKind) -> AppState {
    let mut state = AppState::new();
    state.editor.gesture = Some(WallGesture {
        kind,
        wall_id: 2,
        parent_id: 1,
        handle: WallEnd::Right,
        grab_point: Vec2::ZERO,
        origin: (Vec2::ZERO, Vec2::X),
        before: None,
        journal: Journal::new(),
    });
    state
}

#[test]
fn build_tool_press_begins_wall_on_active_foundation() {
    let mut state = AppState::new();
    state.editor.active_tool = EditorTool::BuildWall;
    state.editor.active_parent = Some(1);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerPressed {
            world_pos: Vec2::new(1.0, 2.0),
            hit: PointerHit::Empty,
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(
        commands[0],
        AppCommand::BeginWall { parent_id: 1, .. }
    ));
}

#[test]
fn build_tool_without_foundation_maps_to_nothing() {
    let mut state = AppState::new();
    state.editor.active_tool = EditorTool::BuildWall;

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerPressed {
            world_pos: Vec2::ZERO,
            hit: PointerHit::Empty,
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn select_tool_distinguishes_handle_and_body() {
    let state = AppState::new();

    let handle = map_intent_to_commands(
        &state,
        AppIntent::PointerPressed {
            world_pos: Vec2::ZERO,
            hit: PointerHit::WallHandle {
                wall_id: 4,
                end: WallEnd::Left,
            },
        },
    );
    assert!(matches!(
        handle[0],
        AppCommand::BeginResizeWall {
            wall_id: 4,
            end: WallEnd::Left
        }
    ));

    let body = map_intent_to_commands(
        &state,
        AppIntent::PointerPressed {
            world_pos: Vec2::ZERO,
            hit: PointerHit::WallBody { wall_id: 4 },
        },
    );
    assert!(matches!(body[0], AppCommand::BeginMoveWall { wall_id: 4, .. }));
}

#[test]
fn release_updates_then_finishes() {
    let state = with_gesture(GestureKind::Resize);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerReleased {
            world_pos: Vec2::new(3.0, 0.0),
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::UpdateGesture { .. }));
    assert!(matches!(commands[1], AppCommand::FinishGesture));
}

#[test]
fn pointer_left_cancels_construction_but_finishes_resize() {
    let building = with_gesture(GestureKind::Build);
    let commands = map_intent_to_commands(&building, AppIntent::PointerLeft);
    assert!(matches!(commands[..], [AppCommand::CancelGesture]));

    let resizing = with_gesture(GestureKind::Resize);
    let commands = map_intent_to_commands(&resizing, AppIntent::PointerLeft);
    assert!(matches!(commands[..], [AppCommand::FinishGesture]));
}

#[test]
fn pointer_moves_without_gesture_are_ignored() {
    let state = AppState::new();
    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerMoved {
            world_pos: Vec2::ONE,
        },
    );
    assert!(commands.is_empty());
}

#[test]
fn undo_finishes_running_move_first() {
    let state = with_gesture(GestureKind::Move);

    let commands = map_intent_to_commands(&state, AppIntent::UndoRequested);

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::FinishGesture));
    assert!(matches!(commands[1], AppCommand::Undo));
}

#[test]
fn save_options_without_path_uses_config_path() {
    let state = AppState::new();

    let commands =
        map_intent_to_commands(&state, AppIntent::SaveOptionsRequested { path: None });

    match &commands[..] {
        [AppCommand::SaveOptions { path }] => {
            assert!(path.ends_with("solar_wall_editor.toml"));
        }
        other => panic!("Unerwartete Commands: {other:?}"),
    }
}
