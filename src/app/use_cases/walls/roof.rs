//! Use-Case: Dach auf eine geschlossene Schleife setzen.

use crate::app::history::{CommandKind, TopologyCommand};
use crate::app::AppState;
use crate::core::{ElementId, Journal, Wall, WallTopology};

/// Setzt ein Dach auf die Schleife, in der `wall_id` liegt (rückgängig machbar).
pub fn add_roof(state: &mut AppState, wall_id: ElementId) {
    let before = state.store.wall(wall_id).map(Wall::state);
    state.store.drain_changes();

    let mut journal = Journal::new();
    let roof = WallTopology::new(&mut state.store, &mut journal).add_roof(
        wall_id,
        state.options.roof_rise,
        state.options.loop_angle_tolerance,
    );
    state.store.drain_changes();
    if roof.is_none() {
        return;
    }

    let after = state.store.wall(wall_id).map(Wall::state);
    state.history.push(TopologyCommand::from_journal(
        CommandKind::AddRoof,
        wall_id,
        before,
        after,
        journal,
    ));
}
