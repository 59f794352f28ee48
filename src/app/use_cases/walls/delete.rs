//! Use-Case: Wand löschen.

use crate::app::history::{CommandKind, TopologyCommand};
use crate::app::AppState;
use crate::core::{ElementId, Journal, Wall, WallTopology};

/// Löst beide Joints der Wand, entfernt sie und kaskadiert gebrochene Dächer.
/// Ein Undo stellt Wand, Joints und Dach in einem Schritt wieder her.
pub fn delete_wall(state: &mut AppState, wall_id: ElementId) {
    let Some(before) = state.store.wall(wall_id).map(Wall::state) else {
        log::warn!("Wand {} existiert nicht, nichts gelöscht", wall_id);
        return;
    };
    state.store.drain_changes();

    let mut journal = Journal::new();
    let mut topo = WallTopology::new(&mut state.store, &mut journal);
    topo.remove_wall(wall_id);
    let report = topo.cascade_pending_changes(state.options.loop_angle_tolerance);

    log::info!(
        "Wand {} gelöscht ({} abhängige Elemente entfernt)",
        wall_id,
        report.removed_elements.len()
    );
    state.history.push(TopologyCommand::from_journal(
        CommandKind::DeleteWall,
        wall_id,
        Some(before),
        None,
        journal,
    ));
}
