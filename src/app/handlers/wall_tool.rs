//! Handler für Wand-Gesten (Pointer-Down bis Pointer-Up).

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{ElementId, WallEnd};
use glam::Vec2;

/// Beginnt eine neue Wand auf dem Fundament.
pub fn begin_wall(state: &mut AppState, parent_id: ElementId, world_pos: Vec2) {
    use_cases::walls::begin_wall(state, parent_id, world_pos);
}

/// Beginnt das Ziehen eines Wandendes.
pub fn begin_resize(state: &mut AppState, wall_id: ElementId, end: WallEnd) {
    use_cases::walls::begin_resize_wall(state, wall_id, end);
}

/// Beginnt das Verschieben einer Wand.
pub fn begin_move(state: &mut AppState, wall_id: ElementId, world_pos: Vec2) {
    use_cases::walls::begin_move_wall(state, wall_id, world_pos);
}

pub fn update(state: &mut AppState, world_pos: Vec2) {
    use_cases::walls::update_gesture(state, world_pos);
}

/// Übernimmt die laufende Geste als einen Undo-Schritt.
pub fn finish(state: &mut AppState) {
    use_cases::walls::finish_gesture(state);
}

pub fn cancel(state: &mut AppState) {
    use_cases::walls::cancel_gesture(state);
}
