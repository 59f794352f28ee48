//! Solar Wall Editor Library.
//! Wand-Topologie, Snapping und Undo/Redo als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, CommandKind, EditorTool, EditorToolState,
    PointerHit,
};
pub use core::{
    ChangeEvent, Element, ElementId, ElementKind, ElementStore, FlipSide, Foundation, Polygon,
    Roof, SolarPanel, Wall, WallEnd, WallTopology,
};
pub use core::{EndpointIndex, Journal, LoopCheck, SnapRequest, SnapResult, SnapSettings};
pub use shared::EditorOptions;
