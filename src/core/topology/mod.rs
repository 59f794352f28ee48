//! Wand-Topologie: Joint-Graph, Ketten-Flips, Schleifenerkennung und Kaskaden.
//!
//! Alle Operationen laufen über [`WallTopology`], das die Element-Ablage explizit
//! hält und jede primitive Mutation in ein [`Journal`] schreibt. Dadurch ist jede
//! Topologie-Änderung exakt umkehrbar, auch wenn sie Flips ganzer Ketten oder das
//! Löschen abhängiger Elemente auslöst.
//!
//! Konvention: Wand A und B sind verbunden, wenn `A.right_joints == [B]` und
//! `B.left_joints == [A]` („links berührt rechts“). Eine Kette läuft damit über
//! die rechten Joints vorwärts und über die linken Joints rückwärts.

mod cascade;
mod consistency;
mod flip;
mod joints;
mod loops;

pub use cascade::{roof_is_supported, CascadeReport};
pub use flip::{chain_members, ChainDirection, FlipSide};
pub use joints::{end_state, AttachOutcome, EndState, JointRole};
pub use loops::{expected_angle_sum, is_canonical_loop, loop_angle_sum, walk_loop, LoopCheck};

use super::journal::{Journal, TopologyOp};
use super::{Element, ElementId, ElementStore, Wall, WallEnd};
use glam::Vec2;

/// Journalisierender Zugriff auf den Wand-Graphen einer Element-Ablage.
pub struct WallTopology<'a> {
    store: &'a mut ElementStore,
    journal: &'a mut Journal,
}

impl<'a> WallTopology<'a> {
    pub fn new(store: &'a mut ElementStore, journal: &'a mut Journal) -> Self {
        Self { store, journal }
    }

    /// Read-only Sicht auf die Ablage.
    pub fn store(&self) -> &ElementStore {
        self.store
    }

    /// Ändert eine Wand und protokolliert Vorher/Nachher. Gibt `false` zurück,
    /// wenn die Wand nicht existiert.
    fn write_wall<F: FnOnce(&mut Wall)>(&mut self, id: ElementId, f: F) -> bool {
        let Some(wall) = self.store.wall(id) else {
            return false;
        };
        let before = wall.state();
        let mut changed = wall.clone();
        f(&mut changed);
        let after = changed.state();
        if before == after {
            return true;
        }
        self.store.mutate_wall(id, |w| w.apply_state(&after));
        self.journal.push(TopologyOp::WriteWall { id, before, after });
        true
    }

    /// Kehrt eine Wandmenge in einem Schritt um (ein Journal-Eintrag).
    fn flip_walls(&mut self, side: FlipSide, start: ElementId, walls: Vec<ElementId>) {
        if walls.is_empty() {
            return;
        }
        for &id in &walls {
            self.store.mutate_wall(id, Wall::flip);
        }
        self.journal.push(TopologyOp::Flip { side, start, walls });
    }

    /// Fügt ein Element am Ende der Ablage ein.
    pub fn insert_element(&mut self, element: Element) {
        let index = self.store.len();
        self.store.insert_at(index, element.clone());
        self.journal.push(TopologyOp::Insert { index, element });
    }

    /// Entfernt ein Element (ohne Joint-Bereinigung).
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let (index, element) = self.store.remove_indexed(id)?;
        self.journal.push(TopologyOp::Remove {
            index,
            element: element.clone(),
        });
        Some(element)
    }

    /// Setzt die Position eines Wandendes (Joints bleiben unberührt).
    pub fn set_endpoint(&mut self, wall_id: ElementId, end: WallEnd, position: Vec2) -> bool {
        self.write_wall(wall_id, |w| w.set_point(end, position))
    }

    /// Verschiebt eine Wand um `delta` (Joints bleiben unberührt).
    pub fn translate_wall(&mut self, wall_id: ElementId, delta: Vec2) -> bool {
        self.write_wall(wall_id, |w| w.translate(delta))
    }

    /// Setzt oder löscht die Dach-Referenz einer Wand.
    pub fn set_roof(&mut self, wall_id: ElementId, roof_id: Option<ElementId>) -> bool {
        self.write_wall(wall_id, |w| w.roof_id = roof_id)
    }
}
