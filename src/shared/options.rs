//! Zentrale Konfiguration für den Wand-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Magnet / Ausrichtung ────────────────────────────────────────────

/// Magnet-Radius (Welteinheiten) während eines Drags.
pub const MAGNET_THRESHOLD: f32 = 1.0;
/// Magnet-Radius für Prüfungen an bereits abgesetzten Endpunkten.
pub const SETTLED_MAGNET_THRESHOLD: f32 = 0.01;
/// Winkeltoleranz (Radiant) für das Einrasten auf 0, π/2, π, 3π/2.
pub const AXIS_ANGLE_TOLERANCE: f32 = 0.05;
/// Abstand, ab dem eine Koordinate auf die eines fremden Endpunkts einrastet.
pub const COORDINATE_TOLERANCE: f32 = 1.0;

// ── Topologie ───────────────────────────────────────────────────────

/// Erlaubte Abweichung der Schleifen-Winkelsumme von (n−2)π.
pub const LOOP_ANGLE_TOLERANCE: f32 = 0.1;
/// Kürzere Wände werden beim Loslassen verworfen.
pub const MIN_WALL_LENGTH: f32 = 0.1;

// ── Historie ────────────────────────────────────────────────────────

/// Maximale Anzahl an Undo-Schritten.
pub const UNDO_MAX_DEPTH: usize = 100;

// ── Element-Standardwerte ───────────────────────────────────────────

/// Standard-Wandhöhe neuer Wände.
pub const WALL_HEIGHT: f32 = 2.5;
/// Standard-Wandstärke neuer Wände.
pub const WALL_THICKNESS: f32 = 0.2;
/// Standard-Firsthöhe neuer Dächer.
pub const ROOF_RISE: f32 = 1.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `solar_wall_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    // ── Magnet ──────────────────────────────────────────────────
    /// Magnet-Radius während eines Drags
    pub magnet_threshold: f32,
    /// Magnet-Radius für abgesetzte Endpunkte
    pub settled_magnet_threshold: f32,
    /// Winkeltoleranz für Achsen-Ausrichtung
    pub axis_angle_tolerance: f32,
    /// Toleranz für Koordinaten-Ausrichtung an fremden Endpunkten
    pub coordinate_tolerance: f32,
    /// Koordinaten-Ausrichtung an fremden Endpunkten aktiv
    #[serde(default = "default_true")]
    pub align_to_endpoints: bool,

    // ── Topologie ───────────────────────────────────────────────
    /// Toleranz der Winkelsumme geschlossener Schleifen
    pub loop_angle_tolerance: f32,
    /// Mindestlänge einer Wand
    pub min_wall_length: f32,

    // ── Historie ────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    #[serde(default = "default_undo_max_depth")]
    pub undo_max_depth: usize,

    // ── Neue Elemente ───────────────────────────────────────────
    pub wall_height: f32,
    pub wall_thickness: f32,
    #[serde(default = "default_roof_rise")]
    pub roof_rise: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            magnet_threshold: MAGNET_THRESHOLD,
            settled_magnet_threshold: SETTLED_MAGNET_THRESHOLD,
            axis_angle_tolerance: AXIS_ANGLE_TOLERANCE,
            coordinate_tolerance: COORDINATE_TOLERANCE,
            align_to_endpoints: true,

            loop_angle_tolerance: LOOP_ANGLE_TOLERANCE,
            min_wall_length: MIN_WALL_LENGTH,

            undo_max_depth: UNDO_MAX_DEPTH,

            wall_height: WALL_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            roof_rise: ROOF_RISE,
        }
    }
}

/// Serde-Default für boolesche Schalter, die standardmäßig aktiv sind.
fn default_true() -> bool {
    true
}

/// Serde-Default für `undo_max_depth` (Abwärtskompatibilität).
fn default_undo_max_depth() -> usize {
    UNDO_MAX_DEPTH
}

fn default_roof_rise() -> f32 {
    ROOF_RISE
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("solar_wall_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("solar_wall_editor.toml")
    }
}
