//! Gemeinsame Bausteine der Wand-Gesten.

use crate::core::{
    AttachOutcome, Element, ElementId, ElementStore, MagnetTarget, WallEnd, WallTopology,
};
use glam::Vec2;

/// Rechnet eine Weltposition in lokale Koordinaten der Trägerfläche um.
pub fn to_local(store: &ElementStore, parent_id: ElementId, world_pos: Vec2) -> Vec2 {
    match store.find_by_id(parent_id) {
        Some(Element::Foundation(foundation)) => world_pos - foundation.center,
        _ => world_pos,
    }
}

/// Setzt den Joint am Ende `end` gemäß Magnet-Ergebnis.
///
/// Mit Ziel wird verbunden (bereits bestätigte Verbindungen bleiben unberührt)
/// und danach die Schleife geprüft; ohne Ziel wird ein bestehender Joint gelöst.
/// Gibt `true` zurück, wenn die Wand dabei insgesamt umgekehrt wurde.
pub(super) fn resolve_joint(
    topo: &mut WallTopology<'_>,
    wall_id: ElementId,
    end: WallEnd,
    target: Option<MagnetTarget>,
    loop_tolerance: f32,
) -> bool {
    let current = topo.store().wall(wall_id).and_then(|w| w.joint(end));
    let Some(target) = target else {
        if current.is_some() {
            topo.detach_endpoint(wall_id, end);
        }
        return false;
    };
    if target.joined {
        // Zielende hängt bereits an dieser Wand: bestätigen oder (anderes Ende) ignorieren
        if current.is_some() && current != Some(target.wall_id) {
            topo.detach_endpoint(wall_id, end);
        }
        return false;
    }

    let mut flipped = false;
    let outcome = topo.attach_endpoint(wall_id, end, target.wall_id, target.end);
    if let AttachOutcome::Attached { flipped_walls, .. } = &outcome {
        flipped ^= flipped_walls.contains(&wall_id);
    }
    if outcome.is_attached() {
        let check = topo.check_wall_loop(wall_id, loop_tolerance);
        flipped ^= check.flipped;
    }
    flipped
}

/// Löst Joints, deren Nachbar-Endpunkt nicht mehr am Wandende liegt.
pub(super) fn detach_stale_joints(topo: &mut WallTopology<'_>, wall_id: ElementId, threshold: f32) {
    for end in [WallEnd::Left, WallEnd::Right] {
        let Some(wall) = topo.store().wall(wall_id) else {
            return;
        };
        let Some(neighbor_id) = wall.joint(end) else {
            continue;
        };
        let point = wall.point(end);
        let touching = topo
            .store()
            .wall(neighbor_id)
            .and_then(|n| n.end_joined_to(wall_id).map(|e| n.point(e)));
        if touching.map_or(true, |p| p.distance(point) > threshold) {
            topo.detach_endpoint(wall_id, end);
        }
    }
}
