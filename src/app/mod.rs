//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
/// Application State und Controller
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Elemente, Werkzeug, laufende Geste).
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent, PointerHit};
pub use history::{CommandKind, EditHistory, TopologyCommand};
pub use state::{AppState, EditorTool, EditorToolState, GestureKind, WallGesture};
