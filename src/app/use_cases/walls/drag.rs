//! Use-Cases: Wandende ziehen, Wand verschieben und laufende Geste nachführen.

use super::gesture::{detach_stale_joints, resolve_joint, to_local};
use crate::app::state::{GestureKind, WallGesture};
use crate::app::AppState;
use crate::core::snapping::{candidate_index, find_magnet};
use crate::core::{
    snap_endpoint, ElementId, Journal, SnapRequest, SnapSettings, WallEnd, WallTopology,
};
use glam::Vec2;

/// Beginnt das Ziehen eines Wandendes.
pub fn begin_resize_wall(state: &mut AppState, wall_id: ElementId, end: WallEnd) {
    let Some(wall) = state.store.wall(wall_id) else {
        log::warn!("Wand {} existiert nicht", wall_id);
        return;
    };
    let gesture = WallGesture {
        kind: GestureKind::Resize,
        wall_id,
        parent_id: wall.parent_id,
        handle: end,
        grab_point: wall.point(end),
        origin: (wall.left_point, wall.right_point),
        before: Some(wall.state()),
        journal: Journal::new(),
    };
    state.store.drain_changes();
    log::debug!("Wand {}: Ende {:?} wird gezogen", wall_id, end);
    state.editor.gesture = Some(gesture);
}

/// Beginnt das Verschieben einer ganzen Wand.
pub fn begin_move_wall(state: &mut AppState, wall_id: ElementId, world_pos: Vec2) {
    let Some(wall) = state.store.wall(wall_id) else {
        log::warn!("Wand {} existiert nicht", wall_id);
        return;
    };
    let gesture = WallGesture {
        kind: GestureKind::Move,
        wall_id,
        parent_id: wall.parent_id,
        handle: WallEnd::Left,
        grab_point: to_local(&state.store, wall.parent_id, world_pos),
        origin: (wall.left_point, wall.right_point),
        before: Some(wall.state()),
        journal: Journal::new(),
    };
    state.store.drain_changes();
    log::debug!("Wand {} wird verschoben", wall_id);
    state.editor.gesture = Some(gesture);
}

/// Führt die laufende Geste auf die neue Zeigerposition nach.
pub fn update_gesture(state: &mut AppState, world_pos: Vec2) {
    let Some(mut gesture) = state.editor.gesture.take() else {
        return;
    };
    if state.store.wall(gesture.wall_id).is_some() {
        let local = to_local(&state.store, gesture.parent_id, world_pos);
        match gesture.kind {
            GestureKind::Build | GestureKind::Resize => drag_endpoint(state, &mut gesture, local),
            GestureKind::Move => drag_wall(state, &mut gesture, local),
        }
    }
    state.editor.gesture = Some(gesture);
}

/// Gezogenes Ende: einrasten, setzen, Joint auflösen.
fn drag_endpoint(state: &mut AppState, gesture: &mut WallGesture, local: Vec2) {
    let anchor = state
        .store
        .wall(gesture.wall_id)
        .map(|w| w.point(gesture.handle.opposite()));
    let snap = snap_endpoint(
        &state.store,
        &SnapRequest {
            wall_id: gesture.wall_id,
            parent_id: gesture.parent_id,
            candidate: local,
            anchor,
            exclude: Vec::new(),
        },
        &SnapSettings::interactive(&state.options),
    );

    let mut topo = WallTopology::new(&mut state.store, &mut gesture.journal);
    topo.set_endpoint(gesture.wall_id, gesture.handle, snap.position);
    let flipped = resolve_joint(
        &mut topo,
        gesture.wall_id,
        gesture.handle,
        snap.target,
        state.options.loop_angle_tolerance,
    );
    if flipped {
        gesture.mirror();
    }
}

/// Ganze Wand: parallel verschieben, ein Ende darf magnetisch einrasten.
fn drag_wall(state: &mut AppState, gesture: &mut WallGesture, local: Vec2) {
    let wall_id = gesture.wall_id;
    let Some(left) = state.store.wall(wall_id).map(|w| w.left_point) else {
        return;
    };
    let shift = gesture.origin.0 + (local - gesture.grab_point) - left;

    let request = SnapRequest {
        wall_id,
        parent_id: gesture.parent_id,
        candidate: Vec2::ZERO,
        anchor: None,
        exclude: Vec::new(),
    };
    let index = candidate_index(&state.store, &request);
    let threshold = state.options.magnet_threshold;

    let mut topo = WallTopology::new(&mut state.store, &mut gesture.journal);
    topo.translate_wall(wall_id, shift);

    // Nur Magnet, keine Achsenausrichtung: links zuerst
    let snapped = [WallEnd::Left, WallEnd::Right].into_iter().find_map(|end| {
        let point = topo.store().wall(wall_id)?.point(end);
        find_magnet(topo.store(), &index, wall_id, point, threshold)
            .map(|target| (end, target.position - point, target))
    });
    if let Some((_, offset, _)) = &snapped {
        topo.translate_wall(wall_id, *offset);
    }

    detach_stale_joints(
        &mut topo,
        wall_id,
        state.options.settled_magnet_threshold,
    );
    let flipped = match snapped {
        Some((end, _, target)) => resolve_joint(
            &mut topo,
            wall_id,
            end,
            Some(target),
            state.options.loop_angle_tolerance,
        ),
        None => false,
    };
    if flipped {
        gesture.mirror();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Element, Foundation};

    fn state_with_foundation() -> AppState {
        let mut state = AppState::new();
        state.store.append_elements([Element::from(Foundation {
            id: 1,
            center: Vec2::ZERO,
            lx: 40.0,
            ly: 40.0,
        })]);
        state
    }

    #[test]
    fn move_keeps_wall_shape() {
        let mut state = state_with_foundation();
        super::super::begin_wall(&mut state, 1, Vec2::new(0.0, 0.0));
        update_gesture(&mut state, Vec2::new(4.0, 0.0));
        super::super::finish_gesture(&mut state);

        begin_move_wall(&mut state, 2, Vec2::new(2.0, 0.0));
        update_gesture(&mut state, Vec2::new(2.0, 7.0));
        let wall = state.store.wall(2).expect("Wand");
        assert_eq!(wall.left_point, Vec2::new(0.0, 7.0));
        assert_eq!(wall.right_point, Vec2::new(4.0, 7.0));
    }

    #[test]
    fn dragged_end_follows_pointer() {
        let mut state = state_with_foundation();
        super::super::begin_wall(&mut state, 1, Vec2::new(0.0, 0.0));
        update_gesture(&mut state, Vec2::new(3.0, 5.0));
        let wall = state.store.wall(2).expect("Wand");
        assert_eq!(wall.right_point, Vec2::new(3.0, 5.0));
        assert_eq!(state.editor.gesture.as_ref().map(|g| g.handle), Some(WallEnd::Right));
    }
}
