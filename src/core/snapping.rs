//! Magnet-Suche und Achsen-Ausrichtung für gezogene Wandenden.
//!
//! Reine Funktionen über der Element-Ablage: hier wird nie ein Joint gesetzt.
//! Der Aufrufer entscheidet anhand des [`SnapResult`], ob er verbindet oder löst.

use super::spatial::EndpointIndex;
use super::wall::angle_between;
use super::{ElementId, ElementStore, WallEnd};
use crate::shared::EditorOptions;
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Schwellwerte einer Snap-Abfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSettings {
    pub magnet_threshold: f32,
    pub axis_angle_tolerance: f32,
    pub coordinate_tolerance: f32,
    /// Achsen- und Koordinaten-Ausrichtung als Fallback
    pub align: bool,
    pub align_to_endpoints: bool,
}

impl SnapSettings {
    /// Schwellwerte während eines Drags.
    pub fn interactive(options: &EditorOptions) -> Self {
        Self {
            magnet_threshold: options.magnet_threshold,
            axis_angle_tolerance: options.axis_angle_tolerance,
            coordinate_tolerance: options.coordinate_tolerance,
            align: true,
            align_to_endpoints: options.align_to_endpoints,
        }
    }

    /// Enger Magnet ohne Ausrichtung, für bereits abgesetzte Endpunkte.
    pub fn settled(options: &EditorOptions) -> Self {
        Self {
            magnet_threshold: options.settled_magnet_threshold,
            align: false,
            ..Self::interactive(options)
        }
    }
}

/// Eingabe der Snap-Abfrage.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapRequest {
    /// Die bearbeitete Wand (nie eigenes Magnet-Ziel)
    pub wall_id: ElementId,
    /// Trägerfläche; nur Wände darauf sind Kandidaten
    pub parent_id: ElementId,
    /// Aktuelle Position des gezogenen Endes
    pub candidate: Vec2,
    /// Festes anderes Ende der Wand (für die Achsen-Ausrichtung)
    pub anchor: Option<Vec2>,
    /// Weitere ausgeschlossene Wände
    pub exclude: Vec<ElementId>,
}

/// Gefundenes Magnet-Ziel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetTarget {
    pub wall_id: ElementId,
    pub end: WallEnd,
    pub position: Vec2,
    /// Zeigt das Zielende bereits auf die bearbeitete Wand?
    pub joined: bool,
}

/// Angewendete Ausrichtung.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Alignment {
    /// Eingerastete Achse (0, π/2, π oder 3π/2)
    pub axis_angle: Option<f32>,
    /// x auf eine fremde Endpunkt-Koordinate gesetzt
    pub x_aligned: bool,
    /// y auf eine fremde Endpunkt-Koordinate gesetzt
    pub y_aligned: bool,
}

impl Alignment {
    pub fn is_none(&self) -> bool {
        self.axis_angle.is_none() && !self.x_aligned && !self.y_aligned
    }
}

/// Ergebnis der Snap-Abfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// Korrigierte Position
    pub position: Vec2,
    pub target: Option<MagnetTarget>,
    pub alignment: Alignment,
}

/// Endpunkt-Index der Kandidatenwände einer Anfrage.
pub fn candidate_index(store: &ElementStore, request: &SnapRequest) -> EndpointIndex {
    EndpointIndex::from_walls(
        store
            .walls_on(request.parent_id)
            .filter(|w| w.id != request.wall_id && !request.exclude.contains(&w.id)),
    )
}

/// Korrigiert den gezogenen Endpunkt: Magnet, sonst Ausrichtung und zweiter Magnet.
pub fn snap_endpoint(
    store: &ElementStore,
    request: &SnapRequest,
    settings: &SnapSettings,
) -> SnapResult {
    let index = candidate_index(store, request);
    snap_with_index(store, &index, request, settings)
}

/// Wie [`snap_endpoint`], mit vorab gebautem Index.
pub fn snap_with_index(
    store: &ElementStore,
    index: &EndpointIndex,
    request: &SnapRequest,
    settings: &SnapSettings,
) -> SnapResult {
    if let Some(target) = find_magnet(
        store,
        index,
        request.wall_id,
        request.candidate,
        settings.magnet_threshold,
    ) {
        return SnapResult {
            position: target.position,
            target: Some(target),
            alignment: Alignment::default(),
        };
    }

    if !settings.align {
        return SnapResult {
            position: request.candidate,
            target: None,
            alignment: Alignment::default(),
        };
    }

    let (position, alignment) = align_position(index, request, settings);
    if alignment.is_none() {
        return SnapResult {
            position,
            target: None,
            alignment,
        };
    }

    // Erst nach der Korrektur kann ein Endpunkt in Reichweite liegen
    match find_magnet(
        store,
        index,
        request.wall_id,
        position,
        settings.magnet_threshold,
    ) {
        Some(target) => SnapResult {
            position: target.position,
            target: Some(target),
            alignment,
        },
        None => SnapResult {
            position,
            target: None,
            alignment,
        },
    }
}

/// Nächster Endpunkt innerhalb von `threshold`, der frei ist oder bereits auf
/// `wall_id` zeigt. Gleich weite Endpunkte: kleinere Wand-ID, links vor rechts.
pub fn find_magnet(
    store: &ElementStore,
    index: &EndpointIndex,
    wall_id: ElementId,
    position: Vec2,
    threshold: f32,
) -> Option<MagnetTarget> {
    index
        .within_radius(position, threshold)
        .into_iter()
        .filter(|hit| hit.wall_id != wall_id)
        .find_map(|hit| {
            let joint = store.wall(hit.wall_id)?.joint(hit.end);
            match joint {
                None => Some(MagnetTarget {
                    wall_id: hit.wall_id,
                    end: hit.end,
                    position: hit.position,
                    joined: false,
                }),
                Some(id) if id == wall_id => Some(MagnetTarget {
                    wall_id: hit.wall_id,
                    end: hit.end,
                    position: hit.position,
                    joined: true,
                }),
                Some(_) => None,
            }
        })
}

/// Kürzester Winkelabstand zweier Richtungen.
fn angular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

fn align_position(
    index: &EndpointIndex,
    request: &SnapRequest,
    settings: &SnapSettings,
) -> (Vec2, Alignment) {
    let mut position = request.candidate;
    let mut alignment = Alignment::default();
    let mut lock_x = false;
    let mut lock_y = false;

    if let Some(anchor) = request.anchor.filter(|a| *a != request.candidate) {
        let angle = angle_between(anchor, request.candidate);
        let quadrant = (0..4u8).find(|k| {
            angular_distance(angle, *k as f32 * FRAC_PI_2) <= settings.axis_angle_tolerance
        });
        if let Some(k) = quadrant {
            // 0 und π sind horizontal, π/2 und 3π/2 vertikal
            if k % 2 == 0 {
                position.y = anchor.y;
                lock_y = true;
            } else {
                position.x = anchor.x;
                lock_x = true;
            }
            alignment.axis_angle = Some(k as f32 * FRAC_PI_2);
        }
    }

    if settings.align_to_endpoints {
        let tolerance = settings.coordinate_tolerance;
        if !lock_x {
            if let Some(x) = nearest_coordinate(index, position.x, tolerance, |p| p.x) {
                position.x = x;
                alignment.x_aligned = true;
            }
        }
        if !lock_y {
            if let Some(y) = nearest_coordinate(index, position.y, tolerance, |p| p.y) {
                position.y = y;
                alignment.y_aligned = true;
            }
        }
    }

    if !alignment.is_none() {
        log::debug!(
            "Endpunkt ausgerichtet: ({:.3}, {:.3}) -> ({:.3}, {:.3})",
            request.candidate.x,
            request.candidate.y,
            position.x,
            position.y
        );
    }
    (position, alignment)
}

/// Nächste Endpunkt-Koordinate innerhalb der Toleranz (erster Treffer bei Gleichstand).
fn nearest_coordinate(
    index: &EndpointIndex,
    value: f32,
    tolerance: f32,
    coordinate: impl Fn(Vec2) -> f32,
) -> Option<f32> {
    let mut best: Option<(f32, f32)> = None;
    for endpoint in index.endpoints() {
        let c = coordinate(endpoint.position);
        let d = (c - value).abs();
        if d <= tolerance && best.map_or(true, |(best_d, _)| d < best_d) {
            best = Some((d, c));
        }
    }
    best.map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topology::test_support::*;
    use crate::core::{Element, Foundation, Wall};
    use approx::assert_relative_eq;

    fn settings() -> SnapSettings {
        SnapSettings::interactive(&EditorOptions::default())
    }

    fn request(wall_id: ElementId, candidate: Vec2, anchor: Option<Vec2>) -> SnapRequest {
        SnapRequest {
            wall_id,
            parent_id: PARENT,
            candidate,
            anchor,
            exclude: Vec::new(),
        }
    }

    #[test]
    fn magnet_snaps_to_closest_free_endpoint() {
        let store = store_with_walls(&[
            (Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)),
            (Vec2::new(20.0, 20.0), Vec2::new(25.0, 20.0)),
        ]);
        let result = snap_endpoint(
            &store,
            &request(99, Vec2::new(5.4, 0.3), Some(Vec2::new(5.0, 7.0))),
            &settings(),
        );

        let target = result.target.expect("Magnet erwartet");
        assert_eq!((target.wall_id, target.end), (2, WallEnd::Right));
        assert!(!target.joined);
        assert_eq!(result.position, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn occupied_endpoint_is_only_offered_to_its_neighbor() {
        let mut store = store_with_walls(&[
            (Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)),
            (Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0)),
            (Vec2::new(9.0, 9.0), Vec2::new(12.0, 9.0)),
        ]);
        link(&mut store, 2, 3);

        // Beide Enden bei (5,0) sind belegt: Wand 4 bekommt keinen Magneten
        let foreign = snap_endpoint(&store, &request(4, Vec2::new(5.2, 0.2), None), &settings());
        assert!(foreign.target.is_none());

        let own = snap_endpoint(&store, &request(3, Vec2::new(5.2, 0.2), None), &settings());
        let target = own.target.expect("eigener Nachbar bleibt Ziel");
        assert_eq!((target.wall_id, target.end), (2, WallEnd::Right));
        assert!(target.joined);
    }

    #[test]
    fn equal_distances_prefer_lower_wall_id() {
        let store = store_with_walls(&[
            (Vec2::new(-5.0, 0.0), Vec2::new(0.0, 0.5)),
            (Vec2::new(0.0, -0.5), Vec2::new(0.0, -5.0)),
        ]);
        let result = snap_endpoint(&store, &request(99, Vec2::ZERO, None), &settings());
        let target = result.target.expect("Magnet erwartet");
        assert_eq!((target.wall_id, target.end), (2, WallEnd::Right));
    }

    #[test]
    fn long_collinear_chain_snaps_to_its_free_end() {
        for count in [40usize, 120] {
            let segments: Vec<(Vec2, Vec2)> = (0..count)
                .map(|i| {
                    let x = i as f32 * 5.0;
                    (Vec2::new(x, 0.0), Vec2::new(x + 5.0, 0.0))
                })
                .collect();
            let mut store = store_with_walls(&segments);
            for id in 2..(count as ElementId + 1) {
                link(&mut store, id, id + 1);
            }
            let end_x = count as f32 * 5.0;
            let last = count as ElementId + 1;

            let free = snap_endpoint(
                &store,
                &request(999, Vec2::new(end_x + 0.3, 0.2), None),
                &settings(),
            );
            let target = free.target.expect("freies Kettenende erwartet");
            assert_eq!((target.wall_id, target.end), (last, WallEnd::Right));
            assert_eq!(free.position, Vec2::new(end_x, 0.0));

            // Innere Stoßstellen sind beidseitig belegt
            let inner = snap_endpoint(
                &store,
                &request(999, Vec2::new(50.2, 0.1), None),
                &settings(),
            );
            assert!(inner.target.is_none());
        }
    }

    #[test]
    fn other_parents_and_excluded_walls_are_ignored() {
        let mut store = store_with_walls(&[(Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0))]);
        store.append_elements([
            Element::from(Foundation {
                id: 50,
                center: Vec2::ZERO,
                lx: 10.0,
                ly: 10.0,
            }),
            Element::from(Wall::new(51, 50, Vec2::new(9.0, 0.0), Vec2::new(6.0, 0.0))),
        ]);
        let mut req = request(99, Vec2::new(5.5, 0.0), None);
        req.exclude = vec![2];

        let result = snap_with_index(&store, &candidate_index(&store, &req), &req, &settings());
        assert!(result.target.is_none());
    }

    #[test]
    fn axis_alignment_locks_coordinate_to_anchor() {
        let store = store_with_walls(&[(Vec2::new(30.0, 30.0), Vec2::new(35.0, 30.0))]);
        let result = snap_endpoint(
            &store,
            &request(99, Vec2::new(5.0, 0.2), Some(Vec2::ZERO)),
            &settings(),
        );

        assert!(result.target.is_none());
        assert_eq!(result.position, Vec2::new(5.0, 0.0));
        assert_relative_eq!(result.alignment.axis_angle.expect("Achse"), 0.0);

        let vertical = snap_endpoint(
            &store,
            &request(99, Vec2::new(-0.2, -6.0), Some(Vec2::ZERO)),
            &settings(),
        );
        assert_eq!(vertical.position, Vec2::new(0.0, -6.0));
    }

    #[test]
    fn coordinate_alignment_uses_foreign_endpoints() {
        let store = store_with_walls(&[(Vec2::new(10.0, 3.0), Vec2::new(10.0, 8.0))]);
        let result = snap_endpoint(
            &store,
            &request(99, Vec2::new(4.0, 3.6), Some(Vec2::ZERO)),
            &settings(),
        );

        assert_eq!(result.position, Vec2::new(4.0, 3.0));
        assert!(result.alignment.y_aligned);
        assert!(!result.alignment.x_aligned);
    }

    #[test]
    fn second_magnet_search_after_alignment() {
        let store = store_with_walls(&[(Vec2::new(9.0, 0.0), Vec2::new(9.0, 6.0))]);
        let candidate = Vec2::new(8.3, 0.8);
        assert!(candidate.distance(Vec2::new(9.0, 0.0)) > 1.0);

        let result = snap_endpoint(&store, &request(99, candidate, None), &settings());

        let target = result.target.expect("Magnet nach Ausrichtung");
        assert_eq!((target.wall_id, target.end), (2, WallEnd::Left));
        assert!(result.alignment.x_aligned && result.alignment.y_aligned);
    }

    #[test]
    fn settled_check_uses_tight_threshold() {
        let store = store_with_walls(&[(Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0))]);
        let settled = SnapSettings::settled(&EditorOptions::default());

        let near = snap_endpoint(&store, &request(99, Vec2::new(5.005, 0.0), None), &settled);
        assert!(near.target.is_some());
        let far = snap_endpoint(&store, &request(99, Vec2::new(5.5, 0.0), None), &settled);
        assert!(far.target.is_none());
        assert_eq!(far.position, Vec2::new(5.5, 0.0));
    }
}
