//! Handler für Editor-Werkzeug, aktives Fundament und Wand-Editing.

use crate::app::state::EditorTool;
use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{Element, ElementId};

/// Aktiviert ein Editor-Werkzeug.
pub fn set_editor_tool(state: &mut AppState, tool: EditorTool) {
    state.editor.active_tool = tool;
    log::info!("Editor-Werkzeug: {:?}", tool);
}

/// Setzt das Fundament, auf dem neue Wände entstehen.
pub fn set_active_foundation(state: &mut AppState, foundation_id: ElementId) {
    if !matches!(
        state.store.find_by_id(foundation_id),
        Some(Element::Foundation(_))
    ) {
        log::warn!("Element {} ist kein Fundament", foundation_id);
        return;
    }
    state.editor.active_parent = Some(foundation_id);
    log::info!("Aktives Fundament: {}", foundation_id);
}

/// Löscht eine Wand samt abhängiger Dächer.
pub fn delete_wall(state: &mut AppState, wall_id: ElementId) {
    use_cases::walls::delete_wall(state, wall_id);
}

/// Setzt ein Dach auf die Schleife der Wand.
pub fn add_roof(state: &mut AppState, wall_id: ElementId) {
    use_cases::walls::add_roof(state, wall_id);
}
