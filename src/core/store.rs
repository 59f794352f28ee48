//! Flache Element-Ablage (Arena) mit Änderungs-Benachrichtigungen.

use super::{Element, ElementId, ElementKind, Wall};
use indexmap::IndexMap;

/// Änderungs-Benachrichtigung nach jeder Mutation der Ablage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Element wurde eingefügt
    Added { id: ElementId, kind: ElementKind },
    /// Element wurde verändert
    Mutated { id: ElementId, kind: ElementKind },
    /// Element wurde entfernt
    Removed { id: ElementId, kind: ElementKind },
}

impl ChangeEvent {
    pub fn id(&self) -> ElementId {
        match self {
            ChangeEvent::Added { id, .. }
            | ChangeEvent::Mutated { id, .. }
            | ChangeEvent::Removed { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ChangeEvent::Added { kind, .. }
            | ChangeEvent::Mutated { kind, .. }
            | ChangeEvent::Removed { kind, .. } => *kind,
        }
    }
}

/// Alle Elemente der Szene, indexiert nach ID in Einfügereihenfolge.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: IndexMap<ElementId, Element>,
    /// Noch nicht abgeholte Änderungs-Benachrichtigungen
    changes: Vec<ChangeEvent>,
}

impl ElementStore {
    /// Erstellt eine leere Ablage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Berechnet die nächste freie Element-ID.
    pub fn next_element_id(&self) -> ElementId {
        self.elements.keys().max().copied().unwrap_or(0) + 1
    }

    pub fn find_by_id(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Wand mit der angegebenen ID (None für fehlende IDs oder andere Element-Arten).
    pub fn wall(&self, id: ElementId) -> Option<&Wall> {
        self.elements.get(&id).and_then(Element::as_wall)
    }

    /// Wendet `f` auf ein Element an. Gibt `false` zurück, wenn die ID fehlt.
    pub fn mutate<F: FnOnce(&mut Element)>(&mut self, id: ElementId, f: F) -> bool {
        let Some(element) = self.elements.get_mut(&id) else {
            return false;
        };
        f(element);
        self.changes.push(ChangeEvent::Mutated {
            id,
            kind: element.kind(),
        });
        true
    }

    /// Wendet `f` auf eine Wand an. Gibt `false` zurück, wenn keine Wand mit der ID existiert.
    pub fn mutate_wall<F: FnOnce(&mut Wall)>(&mut self, id: ElementId, f: F) -> bool {
        let Some(wall) = self.elements.get_mut(&id).and_then(Element::as_wall_mut) else {
            return false;
        };
        f(wall);
        self.changes.push(ChangeEvent::Mutated {
            id,
            kind: ElementKind::Wall,
        });
        true
    }

    /// Wendet `f` auf alle Elemente an, die `predicate` erfüllen. Gibt die Anzahl zurück.
    pub fn bulk_mutate<P, F>(&mut self, predicate: P, mut f: F) -> usize
    where
        P: Fn(&Element) -> bool,
        F: FnMut(&mut Element),
    {
        let mut count = 0;
        for element in self.elements.values_mut() {
            if predicate(element) {
                f(element);
                self.changes.push(ChangeEvent::Mutated {
                    id: element.id(),
                    kind: element.kind(),
                });
                count += 1;
            }
        }
        count
    }

    /// Hängt Elemente an. Bestehende IDs werden an ihrer Position ersetzt.
    pub fn append_elements<I: IntoIterator<Item = Element>>(&mut self, elements: I) {
        for element in elements {
            let id = element.id();
            let kind = element.kind();
            if self.elements.insert(id, element).is_some() {
                log::warn!("Element {} ersetzt (ID bereits vorhanden)", id);
            }
            self.changes.push(ChangeEvent::Added { id, kind });
        }
    }

    /// Fügt ein Element an einer festen Position der Reihenfolge ein.
    pub fn insert_at(&mut self, index: usize, element: Element) {
        let id = element.id();
        let kind = element.kind();
        let index = index.min(self.elements.len());
        self.elements.shift_insert(index, id, element);
        self.changes.push(ChangeEvent::Added { id, kind });
    }

    /// Entfernt ein Element; die Reihenfolge der übrigen bleibt erhalten.
    pub fn remove_by_id(&mut self, id: ElementId) -> Option<Element> {
        self.remove_indexed(id).map(|(_, element)| element)
    }

    /// Entfernt ein Element und liefert zusätzlich seine bisherige Position.
    pub fn remove_indexed(&mut self, id: ElementId) -> Option<(usize, Element)> {
        let (index, _, element) = self.elements.shift_remove_full(&id)?;
        self.changes.push(ChangeEvent::Removed {
            id,
            kind: element.kind(),
        });
        Some((index, element))
    }

    /// Position eines Elements in der Einfügereihenfolge.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.get_index_of(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.elements.values().filter_map(Element::as_wall)
    }

    /// Alle Wände auf der angegebenen Trägerfläche.
    pub fn walls_on(&self, parent_id: ElementId) -> impl Iterator<Item = &Wall> {
        self.walls().filter(move |w| w.parent_id == parent_id)
    }

    /// Direkte Kinder eines Elements.
    pub fn children_of(&self, id: ElementId) -> Vec<ElementId> {
        self.elements
            .values()
            .filter(|e| e.parent_id() == Some(id))
            .map(Element::id)
            .collect()
    }

    /// Alle Nachfahren eines Elements (Eltern stehen vor ihren Kindern).
    pub fn descendants_of(&self, id: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut frontier = vec![id];
        while let Some(current) = frontier.pop() {
            for child in self.children_of(current) {
                if child != id && !result.contains(&child) {
                    result.push(child);
                    frontier.push(child);
                }
            }
        }
        result
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Geordnete Kopie aller Elemente (z.B. für Vergleiche in Tests).
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.values().cloned().collect()
    }

    /// Noch nicht abgeholte Änderungen.
    pub fn pending_changes(&self) -> &[ChangeEvent] {
        &self.changes
    }

    /// Holt alle aufgelaufenen Änderungen ab und leert die Warteschlange.
    pub fn drain_changes(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.changes)
    }
}
