//! Application State: zentrale Datenhaltung.

use super::history::{CommandKind, EditHistory};
use super::CommandLog;
use crate::core::{ElementId, ElementStore, Journal, WallEnd, WallState};
use crate::shared::EditorOptions;
use glam::Vec2;

/// Aktives Editor-Werkzeug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTool {
    /// Standard: Wände anfassen, verschieben und an den Enden ziehen
    #[default]
    Select,
    /// Neue Wände auf dem aktiven Fundament aufziehen
    BuildWall,
}

/// Art der laufenden Wand-Geste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Neue Wand, zweites Ende wird gezogen
    Build,
    /// Ein Ende einer bestehenden Wand wird gezogen
    Resize,
    /// Ganze Wand wird verschoben
    Move,
}

impl GestureKind {
    /// Undo-Art beim Abschluss der Geste.
    pub fn command_kind(self) -> CommandKind {
        match self {
            GestureKind::Build => CommandKind::AddWall,
            GestureKind::Resize => CommandKind::ResizeWall,
            GestureKind::Move => CommandKind::MoveWall,
        }
    }
}

/// Laufende Geste zwischen Pointer-Down und Pointer-Up.
///
/// Alle Mutationen der Geste landen sofort in der Ablage und zusätzlich im
/// Journal; erst beim Loslassen wird daraus ein Undo-Eintrag.
#[derive(Debug, Clone)]
pub struct WallGesture {
    pub kind: GestureKind,
    pub wall_id: ElementId,
    pub parent_id: ElementId,
    /// Gezogenes Ende; spiegelt, wenn die Wand umgekehrt wird
    pub handle: WallEnd,
    /// Zeigerposition beim Start (lokal)
    pub grab_point: Vec2,
    /// Endpunkte beim Start (links, rechts), beim Verschieben mitgeflippt
    pub origin: (Vec2, Vec2),
    /// Wandzustand vor der Geste (`None` beim Bauen)
    pub before: Option<WallState>,
    pub journal: Journal,
}

impl WallGesture {
    /// Die Wand wurde umgekehrt: Griff und Startpunkte tauschen die Seiten.
    pub fn mirror(&mut self) {
        self.handle = self.handle.opposite();
        self.origin = (self.origin.1, self.origin.0);
    }
}

/// Zustand des aktuellen Editor-Werkzeugs
#[derive(Debug, Default)]
pub struct EditorToolState {
    /// Aktives Werkzeug
    pub active_tool: EditorTool,
    /// Fundament, auf dem neue Wände entstehen
    pub active_parent: Option<ElementId>,
    /// Laufende Geste
    pub gesture: Option<WallGesture>,
}

impl EditorToolState {
    /// Erstellt den Standard-Werkzeugzustand (Select-Tool aktiv).
    pub fn new() -> Self {
        Self::default()
    }
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Alle Elemente der Szene
    pub store: ElementStore,
    /// Editor-Werkzeug-State
    pub editor: EditorToolState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Undo/Redo-History (Command-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen (Schwellwerte, Standardmaße)
    pub options: EditorOptions,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit Optionen aus einer TOML-Datei.
    ///
    /// Fehlende oder fehlerhafte Dateien ergeben die Standardwerte.
    pub fn with_config_file(path: &std::path::Path) -> Self {
        Self::with_options(EditorOptions::load_from_file(path))
    }

    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            store: ElementStore::new(),
            editor: EditorToolState::new(),
            command_log: CommandLog::new(),
            history: EditHistory::new_with_capacity(options.undo_max_depth),
            options,
        }
    }

    /// Gibt die Anzahl der Wände zurück (für UI-Anzeige)
    pub fn wall_count(&self) -> usize {
        self.store.walls().count()
    }

    /// Undo/Redo helpers
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Läuft gerade eine Wand-Geste?
    pub fn has_gesture(&self) -> bool {
        self.editor.gesture.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
