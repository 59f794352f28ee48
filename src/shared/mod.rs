//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Editor-Optionen, die sowohl `core` (Schwellwerte) als auch
//! `app` (Laufzeit-Konfiguration) lesen.

pub mod options;

pub use options::EditorOptions;
