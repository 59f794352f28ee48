//! Reparatur inkonsistenter Joints beim Abschluss einer Geste.

use super::WallTopology;
use crate::core::{ElementId, WallEnd};

impl WallTopology<'_> {
    /// Stellt für die angegebenen Wände gegenseitige Einzel-Joints her.
    ///
    /// Überzählige Einträge werden gekürzt, Verweise auf fehlende Wände oder die
    /// Wand selbst gelöscht. Einseitige Joints werden entfernt, ebenso beide
    /// Seiten, wenn zwei Wände sich mit gleichnamigen Enden referenzieren.
    /// Gibt die Anzahl der Reparaturen zurück.
    pub fn normalize_joints(&mut self, walls: &[ElementId]) -> usize {
        let mut repairs = 0;
        for &id in walls {
            for end in [WallEnd::Left, WallEnd::Right] {
                repairs += self.normalize_end(id, end);
            }
        }
        if repairs > 0 {
            log::warn!("{} Joint-Inkonsistenzen repariert", repairs);
        }
        repairs
    }

    fn normalize_end(&mut self, id: ElementId, end: WallEnd) -> usize {
        let Some(wall) = self.store.wall(id) else {
            return 0;
        };
        let mut repairs = 0;

        if wall.joints(end).len() > 1 {
            log::warn!(
                "Wand {} ({:?}): {} Joints, nur der erste bleibt",
                id,
                end,
                wall.joints(end).len()
            );
            self.write_wall(id, |w| w.joints_mut(end).truncate(1));
            repairs += 1;
        }

        let Some(neighbor_id) = self.store.wall(id).and_then(|w| w.joint(end)) else {
            return repairs;
        };
        let Some(neighbor) = self.store.wall(neighbor_id).filter(|_| neighbor_id != id) else {
            log::warn!(
                "Wand {} ({:?}): ungültiger Verweis auf {}",
                id,
                end,
                neighbor_id
            );
            self.write_wall(id, |w| w.set_joint(end, None));
            return repairs + 1;
        };

        if neighbor.joints(end.opposite()).contains(&id) {
            return repairs;
        }
        if neighbor.joints(end).contains(&id) {
            log::warn!(
                "Wand {} und {} verweisen mit gleichnamigen Enden ({:?}) aufeinander",
                id,
                neighbor_id,
                end
            );
            self.write_wall(neighbor_id, |n| n.joints_mut(end).retain(|j| *j != id));
        } else {
            log::warn!(
                "Wand {} ({:?}): einseitiger Joint zu {} entfernt",
                id,
                end,
                neighbor_id
            );
        }
        self.write_wall(id, |w| w.set_joint(end, None));
        repairs + 1
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::core::journal::Journal;
    use glam::Vec2;

    fn three_walls() -> crate::core::ElementStore {
        store_with_walls(&[
            (Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)),
            (Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0)),
            (Vec2::new(5.0, 5.0), Vec2::new(0.0, 5.0)),
        ])
    }

    #[test]
    fn consistent_graph_needs_no_repair() {
        let mut store = ccw_rectangle();
        let mut journal = Journal::new();
        let repairs =
            WallTopology::new(&mut store, &mut journal).normalize_joints(&[2, 3, 4, 5]);
        assert_eq!(repairs, 0);
        assert!(journal.is_empty());
    }

    #[test]
    fn dangling_and_missing_references_are_cleared() {
        let mut store = three_walls();
        store.mutate_wall(2, |w| w.set_joint(WallEnd::Right, Some(3)));
        store.mutate_wall(3, |w| w.set_joint(WallEnd::Right, Some(99)));
        let mut journal = Journal::new();

        let repairs = WallTopology::new(&mut store, &mut journal).normalize_joints(&[2, 3]);

        assert_eq!(repairs, 2);
        assert!(store.wall(2).expect("Wand 2").right_joints.is_empty());
        assert!(store.wall(3).expect("Wand 3").right_joints.is_empty());
    }

    #[test]
    fn extra_entries_are_truncated() {
        let mut store = three_walls();
        link(&mut store, 2, 3);
        store.mutate_wall(2, |w| w.right_joints.push(4));
        let mut journal = Journal::new();

        let repairs = WallTopology::new(&mut store, &mut journal).normalize_joints(&[2]);

        assert_eq!(repairs, 1);
        assert_eq!(store.wall(2).expect("Wand 2").right_joints, vec![3]);
    }

    #[test]
    fn same_role_conflict_clears_both_sides() {
        let mut store = three_walls();
        store.mutate_wall(3, |w| w.set_joint(WallEnd::Right, Some(4)));
        store.mutate_wall(4, |w| w.set_joint(WallEnd::Right, Some(3)));
        let before = store.snapshot();
        let mut journal = Journal::new();

        WallTopology::new(&mut store, &mut journal).normalize_joints(&[3]);

        assert!(store.wall(3).expect("Wand 3").right_joints.is_empty());
        assert!(store.wall(4).expect("Wand 4").right_joints.is_empty());
        journal.revert(&mut store);
        assert_eq!(store.snapshot(), before);
    }
}
