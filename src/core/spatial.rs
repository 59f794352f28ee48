//! Spatial-Index (KD-Tree) über Wand-Endpunkten für die Magnet-Suche.
//!
//! Verbundene Wände teilen sich Endpunkte, und die Ausrichtung legt Endpunkte
//! bewusst auf gemeinsame Achsenwerte. Der Baum indexiert deshalb nur
//! deduplizierte Positionen und wird als `ImmutableKdTree` in einem Zug aufgebaut,
//! der beliebig viele gleiche Werte auf einer Achse verträgt.

use glam::Vec2;
use indexmap::IndexMap;
use kiddo::{ImmutableKdTree, SquaredEuclidean};

use super::{ElementId, Wall, WallEnd};

/// Unterhalb dieser Anzahl Positionen wird linear gesucht.
const LINEAR_SCAN_LIMIT: usize = 64;

/// Treffer einer Distanzabfrage gegen den Endpunkt-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointMatch {
    /// ID der Wand, zu der der Endpunkt gehört
    pub wall_id: ElementId,
    /// Welches Ende der Wand
    pub end: WallEnd,
    /// Position des Endpunkts
    pub position: Vec2,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f32,
}

/// Ein indexierter Endpunkt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    pub wall_id: ElementId,
    pub end: WallEnd,
    pub position: Vec2,
}

/// Read-only Index über den Endpunkten einer Wandmenge.
///
/// Die Einträge sind nach Wand-ID sortiert (links vor rechts); bei gleicher Distanz
/// gewinnt der frühere Eintrag. Damit ist die Magnet-Auswahl unabhängig von der
/// Reihenfolge der Element-Ablage.
#[derive(Debug, Clone, Default)]
pub struct EndpointIndex {
    /// Nur ab `LINEAR_SCAN_LIMIT` Positionen vorhanden
    tree: Option<ImmutableKdTree<f64, 2>>,
    /// Eindeutige Positionen mit den Indizes aller Endpunkte dort
    positions: Vec<(Vec2, Vec<usize>)>,
    endpoints: Vec<Endpoint>,
}

/// Bitgenauer Schlüssel einer Position (`-0.0` und `0.0` fallen zusammen).
fn position_key(position: Vec2) -> [u32; 2] {
    [(position.x + 0.0).to_bits(), (position.y + 0.0).to_bits()]
}

impl EndpointIndex {
    /// Baut einen Index aus den übergebenen Wänden.
    pub fn from_walls<'a, I>(walls: I) -> Self
    where
        I: IntoIterator<Item = &'a Wall>,
    {
        let mut sorted: Vec<&Wall> = walls.into_iter().collect();
        sorted.sort_unstable_by_key(|w| w.id);

        let endpoints: Vec<Endpoint> = sorted
            .iter()
            .flat_map(|w| {
                [WallEnd::Left, WallEnd::Right].map(|end| Endpoint {
                    wall_id: w.id,
                    end,
                    position: w.point(end),
                })
            })
            .collect();

        let mut grouped: IndexMap<[u32; 2], (Vec2, Vec<usize>)> = IndexMap::new();
        for (index, endpoint) in endpoints.iter().enumerate() {
            grouped
                .entry(position_key(endpoint.position))
                .or_insert_with(|| (endpoint.position, Vec::new()))
                .1
                .push(index);
        }
        let positions: Vec<(Vec2, Vec<usize>)> = grouped.into_values().collect();

        let tree = (positions.len() > LINEAR_SCAN_LIMIT).then(|| {
            let entries: Vec<[f64; 2]> = positions
                .iter()
                .map(|(p, _)| [p.x as f64, p.y as f64])
                .collect();
            ImmutableKdTree::new_from_slice(&entries)
        });

        Self {
            tree,
            positions,
            endpoints,
        }
    }

    /// Gibt die Anzahl indexierter Endpunkte zurück.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Gibt `true` zurück, wenn keine Endpunkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Alle Endpunkte in Indexreihenfolge.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Findet alle Endpunkte innerhalb eines Radius (inklusive), aufsteigend nach Distanz.
    ///
    /// Gleiche Distanzen werden nach Indexreihenfolge (Wand-ID, links vor rechts) sortiert.
    pub fn within_radius(&self, query: Vec2, radius: f32) -> Vec<EndpointMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let slots: Vec<(usize, f32)> = match &self.tree {
            Some(tree) => {
                // Etwas weiter suchen, die exakte Grenze prüft der Filter unten
                let reach = (radius as f64) * (1.0 + 1e-6) + 1e-9;
                tree.within::<SquaredEuclidean>(&[query.x as f64, query.y as f64], reach * reach)
                    .into_iter()
                    .map(|entry| {
                        let slot = entry.item as usize;
                        (slot, self.positions[slot].0.distance(query))
                    })
                    .filter(|(_, distance)| *distance <= radius)
                    .collect()
            }
            None => self
                .positions
                .iter()
                .enumerate()
                .map(|(slot, (position, _))| (slot, position.distance(query)))
                .filter(|(_, distance)| *distance <= radius)
                .collect(),
        };

        let mut hits: Vec<(usize, f32)> = slots
            .into_iter()
            .flat_map(|(slot, distance)| {
                self.positions[slot]
                    .1
                    .iter()
                    .map(move |index| (*index, distance))
            })
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        hits.into_iter()
            .map(|(index, distance)| {
                let endpoint = self.endpoints[index];
                EndpointMatch {
                    wall_id: endpoint.wall_id,
                    end: endpoint.end,
                    position: endpoint.position,
                    distance,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_walls() -> Vec<Wall> {
        vec![
            Wall::new(3, 1, Vec2::new(10.0, 0.0), Vec2::new(10.0, 5.0)),
            Wall::new(1, 1, Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)),
            Wall::new(2, 1, Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0)),
        ]
    }

    /// Wandzug auf der x-Achse, jede Verbindung legt zwei Endpunkte aufeinander.
    fn collinear_walls(count: usize) -> Vec<Wall> {
        (0..count)
            .map(|i| {
                let x = i as f32 * 5.0;
                Wall::new(i as u64 + 2, 1, Vec2::new(x, 0.0), Vec2::new(x + 5.0, 0.0))
            })
            .collect()
    }

    #[test]
    fn nearest_hit_comes_first() {
        let walls = sample_walls();
        let index = EndpointIndex::from_walls(&walls);
        let hits = index.within_radius(Vec2::new(9.8, 4.9), 1.0);

        assert_eq!(hits[0].wall_id, 3);
        assert_eq!(hits[0].end, WallEnd::Right);
        assert!(hits[0].distance < 0.3);
    }

    #[test]
    fn coincident_endpoints_are_ordered_by_wall_id() {
        let walls = sample_walls();
        let index = EndpointIndex::from_walls(&walls);
        let hits = index.within_radius(Vec2::new(5.0, 0.2), 1.0);

        let ids: Vec<(ElementId, WallEnd)> = hits.iter().map(|h| (h.wall_id, h.end)).collect();
        assert_eq!(ids, vec![(1, WallEnd::Right), (2, WallEnd::Left)]);
    }

    #[test]
    fn empty_index_has_no_entries() {
        let index = EndpointIndex::from_walls(&Vec::<Wall>::new());

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.within_radius(Vec2::ZERO, 10.0).is_empty());
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let walls = sample_walls();
        let index = EndpointIndex::from_walls(&walls);
        let hits = index.within_radius(Vec2::new(10.0, 7.0), 2.0);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].wall_id, 3);
    }

    #[test]
    fn collinear_chain_with_shared_endpoints_is_searchable() {
        for count in [40usize, 300] {
            let walls = collinear_walls(count);
            let index = EndpointIndex::from_walls(&walls);

            assert_eq!(index.len(), count * 2);
            assert_eq!(index.positions.len(), count + 1);
            assert_eq!(index.tree.is_some(), count + 1 > LINEAR_SCAN_LIMIT);

            // Verbindungspunkt zwischen Wand 12 und 13
            let hits = index.within_radius(Vec2::new(55.0, 0.3), 1.0);
            let ids: Vec<(ElementId, WallEnd)> =
                hits.iter().map(|h| (h.wall_id, h.end)).collect();
            assert_eq!(ids, vec![(12, WallEnd::Right), (13, WallEnd::Left)]);

            let far = index.within_radius(Vec2::new(2.5, 0.0), 1.0);
            assert!(far.is_empty());
        }
    }

    #[test]
    fn many_coincident_endpoints_are_all_returned() {
        let walls: Vec<Wall> = (0..50u64)
            .map(|i| {
                let angle = i as f32 * 0.1;
                Wall::new(i + 2, 1, Vec2::ZERO, Vec2::new(angle.cos(), angle.sin()) * 8.0)
            })
            .collect();
        let index = EndpointIndex::from_walls(&walls);

        let hits = index.within_radius(Vec2::new(0.1, 0.0), 1.0);
        assert_eq!(hits.len(), 50);
        assert!(hits.iter().all(|h| h.end == WallEnd::Left));
        assert!(hits.windows(2).all(|w| w[0].wall_id < w[1].wall_id));
    }
}
