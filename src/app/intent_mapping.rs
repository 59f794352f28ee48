//! Mapping von UI-Intents auf mutierende App-Commands.

use super::events::PointerHit;
use super::state::GestureKind;
use super::{AppCommand, AppIntent, AppState, EditorTool};
use crate::shared::EditorOptions;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let gesture_kind = state.editor.gesture.as_ref().map(|g| g.kind);

    match intent {
        AppIntent::SetEditorToolRequested { tool } => {
            let mut commands = finish_running(gesture_kind);
            commands.push(AppCommand::SetEditorTool { tool });
            commands
        }
        AppIntent::SetActiveFoundationRequested { foundation_id } => {
            vec![AppCommand::SetActiveFoundation { foundation_id }]
        }
        AppIntent::PointerPressed { world_pos, hit } => {
            if gesture_kind.is_some() {
                // Verlorenes Pointer-Up: alte Geste zuerst abschließen
                log::debug!("Pointer-Down während laufender Geste");
            }
            let mut commands = finish_running(gesture_kind);
            match (state.editor.active_tool, hit) {
                (_, PointerHit::WallHandle { wall_id, end }) => {
                    commands.push(AppCommand::BeginResizeWall { wall_id, end });
                }
                (EditorTool::Select, PointerHit::WallBody { wall_id }) => {
                    commands.push(AppCommand::BeginMoveWall { wall_id, world_pos });
                }
                (EditorTool::Select, PointerHit::Empty) => {}
                (EditorTool::BuildWall, _) => match state.editor.active_parent {
                    Some(parent_id) => {
                        commands.push(AppCommand::BeginWall {
                            parent_id,
                            world_pos,
                        });
                    }
                    None => log::warn!("Kein aktives Fundament: Wand kann nicht beginnen"),
                },
            }
            commands
        }
        AppIntent::PointerMoved { world_pos } => {
            if gesture_kind.is_some() {
                vec![AppCommand::UpdateGesture { world_pos }]
            } else {
                vec![]
            }
        }
        AppIntent::PointerReleased { world_pos } => {
            if gesture_kind.is_some() {
                vec![
                    AppCommand::UpdateGesture { world_pos },
                    AppCommand::FinishGesture,
                ]
            } else {
                vec![]
            }
        }
        AppIntent::PointerLeft => match gesture_kind {
            Some(GestureKind::Build) => vec![AppCommand::CancelGesture],
            Some(_) => vec![AppCommand::FinishGesture],
            None => vec![],
        },
        AppIntent::DeleteWallRequested { wall_id } => {
            let mut commands = finish_running(gesture_kind);
            commands.push(AppCommand::DeleteWall { wall_id });
            commands
        }
        AppIntent::AddRoofRequested { wall_id } => {
            let mut commands = finish_running(gesture_kind);
            commands.push(AppCommand::AddRoof { wall_id });
            commands
        }
        AppIntent::UndoRequested => {
            let mut commands = finish_running(gesture_kind);
            commands.push(AppCommand::Undo);
            commands
        }
        AppIntent::RedoRequested => {
            let mut commands = finish_running(gesture_kind);
            commands.push(AppCommand::Redo);
            commands
        }
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::ResetOptionsRequested => vec![AppCommand::ResetOptions],
        AppIntent::SaveOptionsRequested { path } => vec![AppCommand::SaveOptions {
            path: path.unwrap_or_else(EditorOptions::config_path),
        }],
    }
}

/// Eine laufende Geste wird vor jedem anderen Command abgeschlossen; ein
/// unfertiger Neubau wird verworfen.
fn finish_running(gesture_kind: Option<GestureKind>) -> Vec<AppCommand> {
    match gesture_kind {
        Some(GestureKind::Build) => vec![AppCommand::CancelGesture],
        Some(_) => vec![AppCommand::FinishGesture],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests;
