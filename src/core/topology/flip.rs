//! Ketten-Flips: Umkehren zusammenhängender Wandketten.

use super::WallTopology;
use crate::core::{ElementId, ElementStore, WallEnd};

/// Laufrichtung beim Abschreiten einer Kette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainDirection {
    /// Folgt den linken Joints
    Clockwise,
    /// Folgt den rechten Joints
    CounterClockwise,
}

impl ChainDirection {
    /// Joint-Seite, über die die Kette weiterläuft.
    pub fn follow_end(self) -> WallEnd {
        match self {
            ChainDirection::Clockwise => WallEnd::Left,
            ChainDirection::CounterClockwise => WallEnd::Right,
        }
    }

    pub fn side(self) -> FlipSide {
        match self {
            ChainDirection::Clockwise => FlipSide::Left,
            ChainDirection::CounterClockwise => FlipSide::Right,
        }
    }
}

/// Welche Seite bei einer Bearbeitung umgekehrt wurde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipSide {
    /// Kein Flip
    #[default]
    None,
    /// Kette über die linken Joints umgekehrt
    Left,
    /// Kette über die rechten Joints umgekehrt
    Right,
    /// Ganze geschlossene Schleife umgekehrt
    Loop,
}

/// Wände der Kette ab `start` in Laufrichtung (inklusive `start`).
///
/// Endet an einer Wand ohne weiteren Joint oder wenn die Kette zu `start`
/// zurückkehrt. Fremde Zyklen, die `start` nicht enthalten, brechen ebenfalls ab.
pub fn chain_members(
    store: &ElementStore,
    start: ElementId,
    direction: ChainDirection,
) -> Vec<ElementId> {
    let mut members = Vec::new();
    let mut current = Some(start);
    while let Some(id) = current {
        let Some(wall) = store.wall(id) else {
            break;
        };
        members.push(id);
        current = wall
            .joint(direction.follow_end())
            .filter(|next| *next != start && !members.contains(next));
    }
    members
}

impl WallTopology<'_> {
    /// Kehrt die Kette ab `start` in Laufrichtung `direction` um.
    ///
    /// Jede besuchte Wand tauscht Endpunkte und Joint-Listen, der Winkel dreht um π.
    /// Mit `target` wird anschließend das frei gewordene Ende von `start` mit dem
    /// passenden Ende des Ziels verbunden. Gibt die umgekehrten Wände zurück.
    pub fn flip_single_chain(
        &mut self,
        start: ElementId,
        direction: ChainDirection,
        target: Option<ElementId>,
    ) -> Vec<ElementId> {
        let members = chain_members(self.store, start, direction);
        if members.is_empty() {
            return members;
        }
        self.flip_walls(direction.side(), start, members.clone());
        log::debug!(
            "Kette ab Wand {} umgekehrt ({:?}, {} Wände)",
            start,
            direction,
            members.len()
        );

        if let Some(target_id) = target {
            // Nach dem Flip liegt das ehemals freie Ende auf der Gegenseite der Laufrichtung
            let (head_end, target_end) = match direction {
                ChainDirection::CounterClockwise => (WallEnd::Right, WallEnd::Left),
                ChainDirection::Clockwise => (WallEnd::Left, WallEnd::Right),
            };
            self.write_wall(start, |w| w.set_joint(head_end, Some(target_id)));
            self.write_wall(target_id, |w| w.set_joint(target_end, Some(start)));
        }
        members
    }

    /// Kehrt eine geschlossene Schleife in einem Durchgang um.
    pub fn flip_wall_loop(&mut self, walls: &[ElementId]) {
        let Some(&start) = walls.first() else {
            return;
        };
        self.flip_walls(FlipSide::Loop, start, walls.to_vec());
        log::debug!("Schleife ab Wand {} umgekehrt ({} Wände)", start, walls.len());
    }
}
