//! Use-Cases: Laufende Wand-Geste übernehmen oder verwerfen.

use crate::app::history::TopologyCommand;
use crate::app::state::GestureKind;
use crate::app::AppState;
use crate::core::{Wall, WallTopology};

/// Übernimmt die laufende Geste.
///
/// Zu kurze Wände (Bauen, Ende ziehen) werden komplett zurückgerollt. Sonst
/// werden die Joints aller berührten Wände repariert, die Schleife geprüft und
/// erst danach die aufgelaufenen Änderungen kaskadiert. Alles zusammen wird ein
/// einziger Undo-Eintrag.
pub fn finish_gesture(state: &mut AppState) {
    let Some(mut gesture) = state.editor.gesture.take() else {
        return;
    };
    let wall_id = gesture.wall_id;
    let tolerance = state.options.loop_angle_tolerance;

    let too_short = matches!(gesture.kind, GestureKind::Build | GestureKind::Resize)
        && state
            .store
            .wall(wall_id)
            .map_or(true, |w| w.length() < state.options.min_wall_length);
    if too_short {
        gesture.journal.revert(&mut state.store);
        state.store.drain_changes();
        log::info!(
            "Wand {} kürzer als {:.2}, Geste verworfen",
            wall_id,
            state.options.min_wall_length
        );
        return;
    }

    let touched = gesture.journal.touched_walls();
    let mut topo = WallTopology::new(&mut state.store, &mut gesture.journal);
    let repaired = topo.normalize_joints(&touched);
    if topo.store().wall(wall_id).is_some() {
        topo.check_wall_loop(wall_id, tolerance);
    }
    let report = topo.cascade_pending_changes(tolerance);

    if repaired > 0 {
        log::warn!("{} Joint-Inkonsistenzen beim Abschluss repariert", repaired);
    }
    if !report.is_empty() {
        log::info!(
            "Kaskade: {} Dächer, {} Elemente entfernt",
            report.removed_roofs.len(),
            report.removed_elements.len()
        );
    }
    if gesture.journal.is_empty() {
        log::debug!("Geste an Wand {} ohne Änderung", wall_id);
        return;
    }

    let after = state.store.wall(wall_id).map(Wall::state);
    let command = TopologyCommand::from_journal(
        gesture.kind.command_kind(),
        wall_id,
        gesture.before,
        after,
        gesture.journal,
    );
    log::info!(
        "{:?} an Wand {} übernommen ({} Operationen)",
        command.kind,
        wall_id,
        command.journal.len()
    );
    state.history.push(command);
}

/// Verwirft die laufende Geste und stellt den Zustand davor exakt wieder her.
pub fn cancel_gesture(state: &mut AppState) {
    let Some(gesture) = state.editor.gesture.take() else {
        return;
    };
    gesture.journal.revert(&mut state.store);
    state.store.drain_changes();
    log::info!(
        "Geste an Wand {} abgebrochen ({} Operationen zurückgenommen)",
        gesture.wall_id,
        gesture.journal.len()
    );
}
