//! Handler für Undo/Redo-Operationen.

use crate::app::AppState;

/// Führt einen Undo-Schritt aus, falls vorhanden.
pub fn undo(state: &mut AppState) {
    if let Some(kind) = state.history.undo(&mut state.store) {
        log::info!("Undo ausgeführt: {:?}", kind);
    } else {
        log::debug!("Undo: nichts zu tun");
    }
    // Die Wiederherstellung ist bereits konsistent, keine Kaskade
    state.store.drain_changes();
}

/// Führt einen Redo-Schritt aus, falls vorhanden.
pub fn redo(state: &mut AppState) {
    if let Some(kind) = state.history.redo(&mut state.store) {
        log::info!("Redo ausgeführt: {:?}", kind);
    } else {
        log::debug!("Redo: nichts zu tun");
    }
    state.store.drain_changes();
}
