//! Handler für Laufzeit-Optionen.

use crate::app::AppState;
use crate::shared::EditorOptions;
use std::path::Path;

/// Übernimmt neue Optionen. Persistiert wird nur über [`save_options`].
pub fn apply_options(state: &mut AppState, options: EditorOptions) {
    state.history.set_max_depth(options.undo_max_depth);
    state.options = options;
    log::info!("Optionen übernommen");
}

/// Setzt Optionen auf Standardwerte zurück.
pub fn reset_options(state: &mut AppState) {
    apply_options(state, EditorOptions::default());
}

/// Schreibt die aktuellen Optionen als TOML nach `path`.
pub fn save_options(state: &AppState, path: &Path) -> anyhow::Result<()> {
    state.options.save_to_file(path)?;
    log::info!("Optionen gespeichert: {}", path.display());
    Ok(())
}
