//! Use-Case-Funktionen für Wand-Gesten und Wand-Editing.
//!
//! Aufgeteilt nach Operation:
//! - `build`: Neue Wand aufziehen
//! - `drag`: Ende ziehen, Wand verschieben, Geste nachführen
//! - `commit`: Geste übernehmen (Reparatur, Schleife, Kaskade, Undo-Eintrag) oder verwerfen
//! - `delete`: Wand löschen
//! - `roof`: Dach auf geschlossene Schleife setzen

mod build;
mod commit;
mod delete;
mod drag;
mod gesture;
mod roof;

pub use build::begin_wall;
pub use commit::{cancel_gesture, finish_gesture};
pub use delete::delete_wall;
pub use drag::{begin_move_wall, begin_resize_wall, update_gesture};
pub use gesture::to_local;
pub use roof::add_roof;
