//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert Eingabe-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Werkzeug & Fundament ===
            AppCommand::SetEditorTool { tool } => handlers::editing::set_editor_tool(state, tool),
            AppCommand::SetActiveFoundation { foundation_id } => {
                handlers::editing::set_active_foundation(state, foundation_id)
            }

            // === Wand-Gesten ===
            AppCommand::BeginWall {
                parent_id,
                world_pos,
            } => handlers::wall_tool::begin_wall(state, parent_id, world_pos),
            AppCommand::BeginResizeWall { wall_id, end } => {
                handlers::wall_tool::begin_resize(state, wall_id, end)
            }
            AppCommand::BeginMoveWall { wall_id, world_pos } => {
                handlers::wall_tool::begin_move(state, wall_id, world_pos)
            }
            AppCommand::UpdateGesture { world_pos } => {
                handlers::wall_tool::update(state, world_pos)
            }
            AppCommand::FinishGesture => handlers::wall_tool::finish(state),
            AppCommand::CancelGesture => handlers::wall_tool::cancel(state),

            // === Editing ===
            AppCommand::DeleteWall { wall_id } => handlers::editing::delete_wall(state, wall_id),
            AppCommand::AddRoof { wall_id } => handlers::editing::add_roof(state, wall_id),

            // === History ===
            AppCommand::Undo => handlers::history::undo(state),
            AppCommand::Redo => handlers::history::redo(state),

            // === Optionen ===
            AppCommand::ApplyOptions { options } => {
                handlers::options::apply_options(state, options)
            }
            AppCommand::ResetOptions => handlers::options::reset_options(state),
            AppCommand::SaveOptions { path } => handlers::options::save_options(state, &path)?,
        }

        Ok(())
    }
}
