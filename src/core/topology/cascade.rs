//! Strukturelle Folgen von Wandänderungen: Dächer entstehen nur auf geschlossenen
//! Schleifen und verschwinden samt allem, was sie tragen, sobald die Schleife bricht.

use super::loops::{is_canonical_loop, walk_loop};
use super::WallTopology;
use crate::core::{ChangeEvent, Element, ElementId, ElementStore, Roof};

/// Was eine Kaskade entfernt hat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Entfernte Dächer
    pub removed_roofs: Vec<ElementId>,
    /// Alle entfernten Elemente inklusive Dächer und getragener Elemente
    pub removed_elements: Vec<ElementId>,
}

impl CascadeReport {
    pub fn is_empty(&self) -> bool {
        self.removed_elements.is_empty()
    }
}

/// Steht das Dach noch auf einer geschlossenen, kanonisch umlaufenen Schleife
/// aus genau seinen Wänden?
pub fn roof_is_supported(store: &ElementStore, roof: &Roof, tolerance: f32) -> bool {
    let Some(&first) = roof.wall_ids.first() else {
        return false;
    };
    let all_present = roof.wall_ids.iter().all(|id| {
        store
            .wall(*id)
            .is_some_and(|w| w.roof_id == Some(roof.id))
    });
    if !all_present {
        return false;
    }

    let (closed, mut walls) = walk_loop(store, first);
    if !closed {
        return false;
    }
    let canonical = is_canonical_loop(store, &walls, tolerance);
    let mut expected = roof.wall_ids.clone();
    expected.sort_unstable();
    walls.sort_unstable();
    canonical && walls == expected
}

impl WallTopology<'_> {
    /// Setzt ein Dach auf die geschlossene Schleife, in der `wall` liegt.
    ///
    /// Gibt `None` zurück, wenn die Schleife offen oder falsch umlaufen ist oder
    /// bereits ein Dach trägt.
    pub fn add_roof(&mut self, wall: ElementId, rise: f32, tolerance: f32) -> Option<ElementId> {
        let parent_id = self.store.wall(wall)?.parent_id;
        let (closed, walls) = walk_loop(self.store, wall);
        if !closed || !is_canonical_loop(self.store, &walls, tolerance) {
            log::warn!(
                "Dach nicht möglich: Wand {} liegt in keiner geschlossenen Schleife",
                wall
            );
            return None;
        }
        if let Some(existing) = walls
            .iter()
            .find_map(|id| self.store.wall(*id).and_then(|w| w.roof_id))
        {
            log::warn!("Schleife um Wand {} trägt bereits Dach {}", wall, existing);
            return None;
        }

        let roof_id = self.store.next_element_id();
        self.insert_element(Element::from(Roof {
            id: roof_id,
            parent_id,
            wall_ids: walls.clone(),
            rise,
        }));
        for id in &walls {
            self.set_roof(*id, Some(roof_id));
        }
        log::info!("Dach {} auf {} Wänden erstellt", roof_id, walls.len());
        Some(roof_id)
    }

    /// Entfernt ein Dach samt aller getragenen Elemente (tiefste zuerst) und löscht
    /// die Dach-Referenz an seinen Wänden. Gibt die entfernten IDs zurück.
    pub fn remove_roof(&mut self, roof_id: ElementId) -> Vec<ElementId> {
        let Some(roof) = self.store.find_by_id(roof_id).and_then(Element::as_roof).cloned() else {
            return Vec::new();
        };

        let mut removed = Vec::new();
        for id in self.store.descendants_of(roof_id).into_iter().rev() {
            if self.remove_element(id).is_some() {
                removed.push(id);
            }
        }
        for wall_id in &roof.wall_ids {
            if self.store.wall(*wall_id).is_some_and(|w| w.roof_id == Some(roof_id)) {
                self.set_roof(*wall_id, None);
            }
        }
        if self.remove_element(roof_id).is_some() {
            removed.push(roof_id);
        }
        log::info!(
            "Dach {} entfernt ({} getragene Elemente)",
            roof_id,
            removed.len().saturating_sub(1)
        );
        removed
    }

    /// Prüft alle Dächer, deren Wände in `changes` vorkommen, und entfernt die,
    /// deren Schleife nicht mehr trägt.
    pub fn invalidate_roofs(&mut self, changes: &[ChangeEvent], tolerance: f32) -> CascadeReport {
        let changed: Vec<ElementId> = changes.iter().map(ChangeEvent::id).collect();
        let candidates: Vec<Roof> = self
            .store
            .iter()
            .filter_map(Element::as_roof)
            .filter(|roof| roof.wall_ids.iter().any(|id| changed.contains(id)))
            .cloned()
            .collect();

        let mut report = CascadeReport::default();
        for roof in candidates {
            if roof_is_supported(self.store, &roof, tolerance) {
                continue;
            }
            log::debug!("Schleife unter Dach {} gebrochen", roof.id);
            let removed = self.remove_roof(roof.id);
            if !removed.is_empty() {
                report.removed_roofs.push(roof.id);
                report.removed_elements.extend(removed);
            }
        }
        report
    }

    /// Holt die aufgelaufenen Änderungen der Ablage ab und prüft die betroffenen
    /// Dächer (zweite Phase beim Abschluss einer Geste).
    pub fn cascade_pending_changes(&mut self, tolerance: f32) -> CascadeReport {
        let changes = self.store.drain_changes();
        self.invalidate_roofs(&changes, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::core::journal::Journal;
    use crate::core::{Polygon, SolarPanel, WallEnd};
    use glam::Vec2;

    /// Rechteck mit Dach (ID 6), Solarmodul (7) und Umriss am Modul (8).
    fn roofed_rectangle() -> ElementStore {
        let mut store = ccw_rectangle();
        let mut journal = Journal::new();
        let roof_id = WallTopology::new(&mut store, &mut journal)
            .add_roof(2, 1.5, 0.1)
            .expect("Dach auf geschlossener Schleife");
        assert_eq!(roof_id, 6);
        store.append_elements([
            Element::from(SolarPanel {
                id: 7,
                parent_id: 6,
                position: Vec2::new(2.0, 2.0),
                tilt_angle: 0.4,
            }),
            Element::from(Polygon {
                id: 8,
                parent_id: 7,
                vertices: vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            }),
        ]);
        store.drain_changes();
        store
    }

    #[test]
    fn roof_requires_closed_loop() {
        let mut store = store_with_walls(&[(Vec2::ZERO, Vec2::new(5.0, 0.0))]);
        let mut journal = Journal::new();
        assert!(WallTopology::new(&mut store, &mut journal)
            .add_roof(2, 1.0, 0.1)
            .is_none());
        assert!(journal.is_empty());
    }

    #[test]
    fn add_roof_marks_every_loop_wall() {
        let store = roofed_rectangle();
        assert!(store.walls().all(|w| w.roof_id == Some(6)));
        let roof = store.find_by_id(6).and_then(Element::as_roof).expect("Dach");
        assert!(roof_is_supported(&store, roof, 0.1));
    }

    #[test]
    fn intact_loop_keeps_roof() {
        let mut store = roofed_rectangle();
        store.mutate_wall(3, |w| w.height = 3.0);
        let changes = store.drain_changes();
        let mut journal = Journal::new();

        let report = WallTopology::new(&mut store, &mut journal).invalidate_roofs(&changes, 0.1);

        assert!(report.is_empty());
        assert!(store.contains(6));
    }

    #[test]
    fn broken_loop_removes_roof_and_sheltered_elements() {
        let mut store = roofed_rectangle();
        let before = store.snapshot();
        let mut journal = Journal::new();

        WallTopology::new(&mut store, &mut journal).detach_endpoint(4, WallEnd::Right);
        let changes = store.drain_changes();
        let report = WallTopology::new(&mut store, &mut journal).invalidate_roofs(&changes, 0.1);

        assert_eq!(report.removed_roofs, vec![6]);
        assert_eq!(report.removed_elements, vec![8, 7, 6]);
        assert!(store.walls().all(|w| w.roof_id.is_none()));

        // Ein einziges Zurückspielen stellt Joint und Dach wieder her
        journal.revert(&mut store);
        assert_eq!(store.snapshot(), before);
    }
}
