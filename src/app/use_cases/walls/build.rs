//! Use-Case: Neue Wand aufziehen.

use super::gesture::{resolve_joint, to_local};
use crate::app::state::{GestureKind, WallGesture};
use crate::app::AppState;
use crate::core::{
    snap_endpoint, Element, ElementId, Journal, SnapRequest, SnapSettings, Wall, WallEnd,
    WallTopology,
};
use glam::Vec2;

/// Beginnt eine neue Wand auf dem Fundament `parent_id`.
///
/// Der Startpunkt rastet wie ein gezogenes Ende ein; trifft er ein freies
/// Wandende, wird sofort verbunden. Bis zum Loslassen ist die Wand vorläufig.
pub fn begin_wall(state: &mut AppState, parent_id: ElementId, world_pos: Vec2) {
    if !matches!(
        state.store.find_by_id(parent_id),
        Some(Element::Foundation(_))
    ) {
        log::warn!("Element {} ist kein Fundament, keine Wand erstellt", parent_id);
        return;
    }
    state.store.drain_changes();

    let local = to_local(&state.store, parent_id, world_pos);
    let wall_id = state.store.next_element_id();
    let snap = snap_endpoint(
        &state.store,
        &SnapRequest {
            wall_id,
            parent_id,
            candidate: local,
            anchor: None,
            exclude: Vec::new(),
        },
        &SnapSettings::interactive(&state.options),
    );

    let mut wall = Wall::new(wall_id, parent_id, snap.position, snap.position);
    wall.height = state.options.wall_height;
    wall.thickness = state.options.wall_thickness;

    let mut gesture = WallGesture {
        kind: GestureKind::Build,
        wall_id,
        parent_id,
        handle: WallEnd::Right,
        grab_point: local,
        origin: (snap.position, snap.position),
        before: None,
        journal: Journal::new(),
    };
    let mut topo = WallTopology::new(&mut state.store, &mut gesture.journal);
    topo.insert_element(Element::from(wall));
    let flipped = resolve_joint(
        &mut topo,
        wall_id,
        WallEnd::Left,
        snap.target,
        state.options.loop_angle_tolerance,
    );
    if flipped {
        gesture.mirror();
    }

    log::debug!(
        "Wand {} begonnen bei ({:.2}, {:.2})",
        wall_id,
        snap.position.x,
        snap.position.y
    );
    state.editor.gesture = Some(gesture);
}
