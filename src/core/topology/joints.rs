//! Verbinden und Lösen einzelner Wandenden.

use super::{ChainDirection, FlipSide, WallTopology};
use crate::core::{Element, ElementId, ElementStore, WallEnd};

/// Rolle einer Wand gegenüber ihrem Nachbarn an einem Ende.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointRole {
    /// Rechtes Ende berührt das linke Ende des Nachbarn
    LeftOfNeighbor,
    /// Linkes Ende berührt das rechte Ende des Nachbarn
    RightOfNeighbor,
}

/// Zustand eines Wandendes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndState {
    Free,
    Joined { neighbor: ElementId, role: JointRole },
}

/// Liest den Zustand eines Wandendes. Fehlende Wände gelten als frei.
pub fn end_state(store: &ElementStore, wall: ElementId, end: WallEnd) -> EndState {
    match store.wall(wall).and_then(|w| w.joint(end)) {
        None => EndState::Free,
        Some(neighbor) => EndState::Joined {
            neighbor,
            role: match end {
                WallEnd::Right => JointRole::LeftOfNeighbor,
                WallEnd::Left => JointRole::RightOfNeighbor,
            },
        },
    }
}

/// Ergebnis von [`WallTopology::attach_endpoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Verbunden; bei gleichnamigen Enden wurde vorher die Kette umgekehrt
    Attached {
        flip: FlipSide,
        flipped_walls: Vec<ElementId>,
    },
    /// Beide Seiten zeigten bereits aufeinander
    AlreadyJoined,
    /// Ziel belegt, Selbstverbindung oder unbekannte Wand (keine Änderung)
    Rejected,
}

impl AttachOutcome {
    pub fn is_attached(&self) -> bool {
        matches!(
            self,
            AttachOutcome::Attached { .. } | AttachOutcome::AlreadyJoined
        )
    }

    pub fn flip_side(&self) -> FlipSide {
        match self {
            AttachOutcome::Attached { flip, .. } => *flip,
            _ => FlipSide::None,
        }
    }
}

impl WallTopology<'_> {
    /// Verbindet `end` von `wall` mit `target_end` von `target`.
    ///
    /// Das Zielende muss frei sein oder bereits auf `wall` zeigen. Sind beide Enden
    /// gleichnamig, wird zuerst die Kette der bearbeiteten Wand umgekehrt
    /// (Zielende links: gegen den Uhrzeigersinn, rechts: im Uhrzeigersinn), damit
    /// immer ein linkes an ein rechtes Ende stößt.
    pub fn attach_endpoint(
        &mut self,
        wall: ElementId,
        end: WallEnd,
        target: ElementId,
        target_end: WallEnd,
    ) -> AttachOutcome {
        if wall == target {
            log::debug!("Wand {} kann nicht mit sich selbst verbunden werden", wall);
            return AttachOutcome::Rejected;
        }
        let (Some(edited), Some(other)) = (self.store.wall(wall), self.store.wall(target)) else {
            return AttachOutcome::Rejected;
        };

        let target_joint = other.joint(target_end);
        if target_joint.is_some_and(|id| id != wall) {
            log::debug!(
                "Wand {} ({:?}) ist belegt, Wand {} bleibt frei",
                target,
                target_end,
                wall
            );
            return AttachOutcome::Rejected;
        }
        if edited.joint(end) == Some(target) && target_joint == Some(wall) {
            return AttachOutcome::AlreadyJoined;
        }
        if edited.joint(end).is_some_and(|id| id != target) {
            self.detach_endpoint(wall, end);
        }

        if end != target_end {
            self.write_wall(wall, |w| w.set_joint(end, Some(target)));
            self.write_wall(target, |w| w.set_joint(target_end, Some(wall)));
            log::debug!(
                "Wand {} ({:?}) mit Wand {} ({:?}) verbunden",
                wall,
                end,
                target,
                target_end
            );
            return AttachOutcome::Attached {
                flip: FlipSide::None,
                flipped_walls: Vec::new(),
            };
        }

        let direction = match target_end {
            WallEnd::Left => ChainDirection::CounterClockwise,
            WallEnd::Right => ChainDirection::Clockwise,
        };
        if super::chain_members(self.store, wall, direction).contains(&target) {
            log::debug!(
                "Wand {} liegt in der Kette von Wand {}, kein Flip",
                target,
                wall
            );
            return AttachOutcome::Rejected;
        }
        let flipped_walls = self.flip_single_chain(wall, direction, Some(target));
        AttachOutcome::Attached {
            flip: direction.side(),
            flipped_walls,
        }
    }

    /// Löst den Joint an `end` auf beiden Seiten. Gibt den bisherigen Nachbarn zurück.
    pub fn detach_endpoint(&mut self, wall: ElementId, end: WallEnd) -> Option<ElementId> {
        let neighbor = self.store.wall(wall)?.joint(end)?;
        self.write_wall(wall, |w| w.set_joint(end, None));

        let back_end = self.store.wall(neighbor).and_then(|n| {
            if n.joints(end.opposite()).contains(&wall) {
                Some(end.opposite())
            } else {
                n.end_joined_to(wall)
            }
        });
        if let Some(back_end) = back_end {
            self.write_wall(neighbor, |n| n.joints_mut(back_end).retain(|id| *id != wall));
        }
        log::debug!("Wand {} ({:?}) von Wand {} gelöst", wall, end, neighbor);
        Some(neighbor)
    }

    /// Löst beide Enden einer Wand und entfernt sie aus der Ablage.
    pub fn remove_wall(&mut self, wall: ElementId) -> Option<Element> {
        self.store.wall(wall)?;
        self.detach_endpoint(wall, WallEnd::Left);
        self.detach_endpoint(wall, WallEnd::Right);
        self.remove_element(wall)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::core::journal::Journal;
    use glam::Vec2;

    fn two_walls() -> ElementStore {
        store_with_walls(&[
            (Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)),
            (Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0)),
        ])
    }

    #[test]
    fn opposite_ends_join_without_flip() {
        let mut store = two_walls();
        let mut journal = Journal::new();
        let outcome = WallTopology::new(&mut store, &mut journal).attach_endpoint(
            3,
            WallEnd::Left,
            2,
            WallEnd::Right,
        );

        assert_eq!(
            outcome,
            AttachOutcome::Attached {
                flip: FlipSide::None,
                flipped_walls: Vec::new()
            }
        );
        assert_eq!(
            end_state(&store, 2, WallEnd::Right),
            EndState::Joined {
                neighbor: 3,
                role: JointRole::LeftOfNeighbor
            }
        );
        assert_eq!(
            end_state(&store, 3, WallEnd::Left),
            EndState::Joined {
                neighbor: 2,
                role: JointRole::RightOfNeighbor
            }
        );
    }

    #[test]
    fn same_ends_flip_edited_chain() {
        // Wand 3 läuft von (5,5) nach (5,0); ihr rechtes Ende trifft das rechte Ende von Wand 2
        let mut store = store_with_walls(&[
            (Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)),
            (Vec2::new(5.0, 5.0), Vec2::new(5.0, 0.0)),
        ]);
        let mut journal = Journal::new();
        let outcome = WallTopology::new(&mut store, &mut journal).attach_endpoint(
            3,
            WallEnd::Right,
            2,
            WallEnd::Right,
        );

        assert_eq!(outcome.flip_side(), FlipSide::Left);
        let w3 = store.wall(3).expect("Wand 3");
        assert_eq!(w3.left_point, Vec2::new(5.0, 0.0));
        assert_eq!(w3.left_joints, vec![2]);
        assert_eq!(store.wall(2).expect("Wand 2").right_joints, vec![3]);
    }

    #[test]
    fn occupied_target_is_rejected_without_changes() {
        let mut store = store_with_walls(&[
            (Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)),
            (Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0)),
            (Vec2::new(5.0, 0.1), Vec2::new(9.0, 0.0)),
        ]);
        link(&mut store, 2, 3);
        let before = store.snapshot();
        let mut journal = Journal::new();
        let outcome = WallTopology::new(&mut store, &mut journal).attach_endpoint(
            4,
            WallEnd::Left,
            2,
            WallEnd::Right,
        );

        assert_eq!(outcome, AttachOutcome::Rejected);
        assert_eq!(store.snapshot(), before);
        assert!(journal.is_empty());
    }

    #[test]
    fn self_join_is_rejected() {
        let mut store = two_walls();
        let mut journal = Journal::new();
        let outcome = WallTopology::new(&mut store, &mut journal).attach_endpoint(
            2,
            WallEnd::Left,
            2,
            WallEnd::Right,
        );
        assert_eq!(outcome, AttachOutcome::Rejected);
    }

    #[test]
    fn attach_twice_reports_already_joined() {
        let mut store = two_walls();
        let mut journal = Journal::new();
        let mut topo = WallTopology::new(&mut store, &mut journal);
        topo.attach_endpoint(3, WallEnd::Left, 2, WallEnd::Right);
        let second = topo.attach_endpoint(3, WallEnd::Left, 2, WallEnd::Right);
        assert_eq!(second, AttachOutcome::AlreadyJoined);
    }

    #[test]
    fn detach_clears_both_sides_and_is_revertible() {
        let mut store = two_walls();
        link(&mut store, 2, 3);
        let before = store.snapshot();
        let mut journal = Journal::new();

        let neighbor =
            WallTopology::new(&mut store, &mut journal).detach_endpoint(2, WallEnd::Right);

        assert_eq!(neighbor, Some(3));
        assert_eq!(end_state(&store, 2, WallEnd::Right), EndState::Free);
        assert_eq!(end_state(&store, 3, WallEnd::Left), EndState::Free);

        journal.revert(&mut store);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn remove_wall_detaches_neighbors() {
        let mut store = ccw_rectangle();
        let mut journal = Journal::new();
        let removed = WallTopology::new(&mut store, &mut journal).remove_wall(3);

        assert!(removed.is_some());
        assert!(store.wall(3).is_none());
        assert!(store.wall(2).expect("Wand 2").right_joints.is_empty());
        assert!(store.wall(4).expect("Wand 4").left_joints.is_empty());
    }
}
