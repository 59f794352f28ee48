//! Journal der primitiven Topologie-Mutationen einer Geste.
//!
//! Jede Operation trägt die Daten für beide Richtungen; `apply` spielt das
//! Journal vorwärts ab (Redo), `revert` invertiert es in umgekehrter Reihenfolge
//! (Undo, Rollback).

use super::topology::FlipSide;
use super::{Element, ElementId, ElementStore, WallState};

/// Eine umkehrbare Mutation der Element-Ablage.
#[derive(Debug, Clone, PartialEq)]
pub enum TopologyOp {
    /// Zustand einer Wand überschrieben (Geometrie, Joints, Dach-Referenz)
    WriteWall {
        id: ElementId,
        before: WallState,
        after: WallState,
    },
    /// Wände umgekehrt (selbstinvers, wird bei Undo/Redo erneut ausgeführt)
    Flip {
        side: FlipSide,
        start: ElementId,
        walls: Vec<ElementId>,
    },
    /// Element an Position `index` eingefügt
    Insert { index: usize, element: Element },
    /// Element von Position `index` entfernt
    Remove { index: usize, element: Element },
}

/// Geordnete Liste primitiver Mutationen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journal {
    ops: Vec<TopologyOp>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn ops(&self) -> &[TopologyOp] {
        &self.ops
    }

    /// Fügt eine Operation an.
    ///
    /// Aufeinanderfolgende Schreibzugriffe auf dieselbe Wand werden zusammengefasst
    /// (ein Drag erzeugt sonst einen Eintrag pro Mausbewegung); heben sie sich auf,
    /// entfällt der Eintrag.
    pub fn push(&mut self, op: TopologyOp) {
        if let TopologyOp::WriteWall { id, after, .. } = &op {
            if let Some(TopologyOp::WriteWall {
                id: last_id,
                before: last_before,
                after: last_after,
            }) = self.ops.last_mut()
            {
                if last_id == id {
                    last_after.clone_from(after);
                    if last_before == last_after {
                        self.ops.pop();
                    }
                    return;
                }
            }
        }
        self.ops.push(op);
    }

    /// Hängt alle Operationen eines anderen Journals an.
    pub fn append(&mut self, other: Journal) {
        for op in other.ops {
            self.push(op);
        }
    }

    /// Spielt das Journal vorwärts auf der Ablage ab.
    pub fn apply(&self, store: &mut ElementStore) {
        for op in &self.ops {
            apply_op(store, op, true);
        }
    }

    /// Macht das Journal rückgängig (inverse Operationen, umgekehrte Reihenfolge).
    pub fn revert(&self, store: &mut ElementStore) {
        for op in self.ops.iter().rev() {
            apply_op(store, op, false);
        }
    }

    /// IDs aller Wände, deren Zustand das Journal verändert (ohne Duplikate).
    pub fn touched_walls(&self) -> Vec<ElementId> {
        let mut ids = Vec::new();
        let mut add = |id: ElementId| {
            if !ids.contains(&id) {
                ids.push(id);
            }
        };
        for op in &self.ops {
            match op {
                TopologyOp::WriteWall { id, .. } => add(*id),
                TopologyOp::Flip { walls, .. } => walls.iter().copied().for_each(&mut add),
                TopologyOp::Insert { element, .. } | TopologyOp::Remove { element, .. } => {
                    if element.as_wall().is_some() {
                        add(element.id());
                    }
                }
            }
        }
        ids
    }

    /// Wände, deren Joint-Listen sich geändert haben (Schreibzugriffe und Flips).
    pub fn joint_changed_walls(&self) -> Vec<ElementId> {
        let mut ids = Vec::new();
        for op in &self.ops {
            let changed: Vec<ElementId> = match op {
                TopologyOp::WriteWall { id, before, after } => {
                    if before.left_joints != after.left_joints
                        || before.right_joints != after.right_joints
                    {
                        vec![*id]
                    } else {
                        Vec::new()
                    }
                }
                TopologyOp::Flip { walls, .. } => walls.clone(),
                _ => Vec::new(),
            };
            for id in changed {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// Seite des zuletzt ausgeführten Flips (`None` ohne Flip).
    pub fn flip_side(&self) -> FlipSide {
        self.ops
            .iter()
            .rev()
            .find_map(|op| match op {
                TopologyOp::Flip { side, .. } => Some(*side),
                _ => None,
            })
            .unwrap_or(FlipSide::None)
    }

    /// Elemente, die das Journal entfernt und nicht wieder eingefügt hat.
    pub fn removed_elements(&self) -> Vec<Element> {
        let mut removed: Vec<Element> = Vec::new();
        for op in &self.ops {
            match op {
                TopologyOp::Remove { element, .. } => removed.push(element.clone()),
                TopologyOp::Insert { element, .. } => removed.retain(|e| e.id() != element.id()),
                _ => {}
            }
        }
        removed
    }

    /// Elemente, die das Journal eingefügt und nicht wieder entfernt hat.
    pub fn inserted_elements(&self) -> Vec<Element> {
        let mut inserted: Vec<Element> = Vec::new();
        for op in &self.ops {
            match op {
                TopologyOp::Insert { element, .. } => inserted.push(element.clone()),
                TopologyOp::Remove { element, .. } => inserted.retain(|e| e.id() != element.id()),
                _ => {}
            }
        }
        inserted
    }
}

fn apply_op(store: &mut ElementStore, op: &TopologyOp, forward: bool) {
    match op {
        TopologyOp::WriteWall { id, before, after } => {
            let target = if forward { after } else { before };
            if !store.mutate_wall(*id, |w| w.apply_state(target)) {
                log::warn!("Journal: Wand {} fehlt beim Wiederherstellen", id);
            }
        }
        TopologyOp::Flip { walls, .. } => {
            for id in walls {
                store.mutate_wall(*id, |w| w.flip());
            }
        }
        TopologyOp::Insert { index, element } => {
            if forward {
                store.insert_at(*index, element.clone());
            } else {
                store.remove_by_id(element.id());
            }
        }
        TopologyOp::Remove { index, element } => {
            if forward {
                store.remove_by_id(element.id());
            } else {
                store.insert_at(*index, element.clone());
            }
        }
    }
}
