//! AppIntent- und AppCommand-Enums für den Intent/Command-Datenfluss.

use super::state::EditorTool;
use crate::core::{ElementId, WallEnd};
use crate::shared::EditorOptions;
use std::path::PathBuf;

/// Was unter dem Zeiger liegt (Hit-Test des Hosts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerHit {
    /// Freie Fläche
    Empty,
    /// Griff an einem Wandende
    WallHandle { wall_id: ElementId, end: WallEnd },
    /// Wandkörper
    WallBody { wall_id: ElementId },
}

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Werkzeug wechseln
    SetEditorToolRequested { tool: EditorTool },
    /// Fundament für neue Wände wählen
    SetActiveFoundationRequested { foundation_id: ElementId },
    /// Zeiger gedrückt (Weltkoordinaten)
    PointerPressed {
        world_pos: glam::Vec2,
        hit: PointerHit,
    },
    /// Zeiger bewegt
    PointerMoved { world_pos: glam::Vec2 },
    /// Zeiger losgelassen
    PointerReleased { world_pos: glam::Vec2 },
    /// Zeiger hat die Zeichenfläche verlassen
    PointerLeft,
    /// Wand löschen
    DeleteWallRequested { wall_id: ElementId },
    /// Dach auf die Schleife der Wand setzen
    AddRoofRequested { wall_id: ElementId },
    /// Undo
    UndoRequested,
    /// Redo
    RedoRequested,
    /// Optionen übernehmen
    OptionsChanged { options: EditorOptions },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptionsRequested,
    /// Optionen speichern (ohne Pfad: neben der Binary)
    SaveOptionsRequested { path: Option<PathBuf> },
}

/// Mutierende App-Commands, die zentral vom Controller ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Editor-Werkzeug setzen
    SetEditorTool { tool: EditorTool },
    /// Aktives Fundament setzen
    SetActiveFoundation { foundation_id: ElementId },
    /// Neue Wand auf `parent_id` beginnen
    BeginWall {
        parent_id: ElementId,
        world_pos: glam::Vec2,
    },
    /// Ende einer Wand anfassen
    BeginResizeWall { wall_id: ElementId, end: WallEnd },
    /// Ganze Wand anfassen
    BeginMoveWall {
        wall_id: ElementId,
        world_pos: glam::Vec2,
    },
    /// Laufende Geste nachführen
    UpdateGesture { world_pos: glam::Vec2 },
    /// Laufende Geste übernehmen (Undo-Eintrag)
    FinishGesture,
    /// Laufende Geste verwerfen
    CancelGesture,
    /// Wand löschen
    DeleteWall { wall_id: ElementId },
    /// Dach erzeugen
    AddRoof { wall_id: ElementId },
    /// Undo
    Undo,
    /// Redo
    Redo,
    /// Optionen übernehmen
    ApplyOptions { options: EditorOptions },
    /// Optionen zurücksetzen
    ResetOptions,
    /// Optionen speichern
    SaveOptions { path: PathBuf },
}
