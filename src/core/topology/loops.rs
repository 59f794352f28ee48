//! Schleifenerkennung und Umlaufsinn-Korrektur.

use super::{chain_members, ChainDirection, WallTopology};
use crate::core::wall::normalize_angle;
use crate::core::{ElementId, ElementStore, WallEnd};
use std::f32::consts::PI;

/// Ergebnis von [`WallTopology::check_wall_loop`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoopCheck {
    /// Kehrt der Lauf über die linken Joints zur Startwand zurück?
    pub closed: bool,
    /// Besuchte Wände in Laufreihenfolge (nach einem Flip neu abgeschritten)
    pub walls: Vec<ElementId>,
    /// Winkelsumme der Schleife (0 für offene Ketten)
    pub angle_sum: f32,
    /// Wurde die Schleife umgekehrt? Der aktive Griff muss dann spiegeln.
    pub flipped: bool,
}

/// Läuft von `start` über die linken Joints.
///
/// Gibt `(geschlossen, Wände)` zurück. Geschlossen ist der Lauf nur, wenn die
/// letzte Wand wieder auf `start` zeigt und mindestens drei Wände beteiligt sind.
pub fn walk_loop(store: &ElementStore, start: ElementId) -> (bool, Vec<ElementId>) {
    let walls = chain_members(store, start, ChainDirection::Clockwise);
    let closed = walls.len() >= 3
        && walls
            .last()
            .and_then(|id| store.wall(*id))
            .and_then(|w| w.joint(WallEnd::Left))
            == Some(start);
    (closed, walls)
}

/// Summe der Innenwinkel `Σ (3π − (aᵢ − aᵢ₊₁)) mod 2π` mit Umlauf.
pub fn loop_angle_sum(store: &ElementStore, walls: &[ElementId]) -> f32 {
    let angles: Vec<f32> = walls
        .iter()
        .filter_map(|id| store.wall(*id))
        .map(|w| w.relative_angle)
        .collect();
    let n = angles.len();
    (0..n)
        .map(|i| normalize_angle(3.0 * PI - (angles[i] - angles[(i + 1) % n])))
        .sum()
}

/// Soll-Winkelsumme eines korrekt umlaufenen n-Ecks.
pub fn expected_angle_sum(wall_count: usize) -> f32 {
    (wall_count as f32 - 2.0) * PI
}

/// Ist die Schleife kanonisch (gegen den Uhrzeigersinn) umlaufen?
pub fn is_canonical_loop(store: &ElementStore, walls: &[ElementId], tolerance: f32) -> bool {
    (loop_angle_sum(store, walls) - expected_angle_sum(walls.len())).abs() <= tolerance
}

impl WallTopology<'_> {
    /// Prüft, ob `wall` in einer geschlossenen Schleife liegt, und korrigiert
    /// deren Umlaufsinn, wenn die Winkelsumme um mehr als `tolerance` abweicht.
    pub fn check_wall_loop(&mut self, wall: ElementId, tolerance: f32) -> LoopCheck {
        let (closed, walls) = walk_loop(self.store, wall);
        if !closed {
            return LoopCheck {
                closed,
                walls,
                angle_sum: 0.0,
                flipped: false,
            };
        }

        let angle_sum = loop_angle_sum(self.store, &walls);
        let expected = expected_angle_sum(walls.len());
        if (angle_sum - expected).abs() <= tolerance {
            return LoopCheck {
                closed,
                walls,
                angle_sum,
                flipped: false,
            };
        }

        log::info!(
            "Schleife ab Wand {} falsch umlaufen (Summe {:.3}, erwartet {:.3}), wird umgekehrt",
            wall,
            angle_sum,
            expected
        );
        self.flip_wall_loop(&walls);
        let (closed, walls) = walk_loop(self.store, wall);
        let angle_sum = loop_angle_sum(self.store, &walls);
        LoopCheck {
            closed,
            walls,
            angle_sum,
            flipped: true,
        }
    }
}
