//! Repräsentiert eine Wand mit gerichteten Gelenk-Referenzen (Joints).

use super::ElementId;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Ende einer Wand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallEnd {
    /// Startpunkt (`left_point`)
    Left,
    /// Endpunkt (`right_point`)
    Right,
}

impl WallEnd {
    /// Gibt das gegenüberliegende Ende zurück.
    pub fn opposite(self) -> Self {
        match self {
            WallEnd::Left => WallEnd::Right,
            WallEnd::Right => WallEnd::Left,
        }
    }
}

/// Normalisiert einen Winkel auf `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid kann bei winzigen negativen Werten auf exakt TAU runden
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Richtungswinkel von `from` nach `to`, normalisiert auf `[0, 2π)`.
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    normalize_angle(delta.y.atan2(delta.x))
}

/// Topologie- und Geometriezustand einer Wand (für Undo/Redo-Journale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallState {
    pub left_point: Vec2,
    pub right_point: Vec2,
    pub relative_angle: f32,
    pub left_joints: Vec<ElementId>,
    pub right_joints: Vec<ElementId>,
    pub roof_id: Option<ElementId>,
}

/// Eine Wand auf einer Trägerfläche (Fundament)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Eindeutige Element-ID
    pub id: ElementId,
    /// ID der Trägerfläche
    pub parent_id: ElementId,
    /// Startpunkt in lokalen Koordinaten der Trägerfläche
    pub left_point: Vec2,
    /// Endpunkt in lokalen Koordinaten der Trägerfläche
    pub right_point: Vec2,
    /// Richtung von `left_point` nach `right_point` (Radiant, `[0, 2π)`)
    pub relative_angle: f32,
    /// Nachbar am linken Ende (0 oder 1 Eintrag)
    pub left_joints: Vec<ElementId>,
    /// Nachbar am rechten Ende (0 oder 1 Eintrag)
    pub right_joints: Vec<ElementId>,
    /// Dach, das nur existiert solange die Wandschleife geschlossen ist
    pub roof_id: Option<ElementId>,
    /// Wandhöhe
    pub height: f32,
    /// Wandstärke
    pub thickness: f32,
}

impl Wall {
    /// Erstellt eine freie Wand ohne Joints.
    pub fn new(id: ElementId, parent_id: ElementId, left_point: Vec2, right_point: Vec2) -> Self {
        Self {
            id,
            parent_id,
            left_point,
            right_point,
            relative_angle: angle_between(left_point, right_point),
            left_joints: Vec::new(),
            right_joints: Vec::new(),
            roof_id: None,
            height: crate::shared::options::WALL_HEIGHT,
            thickness: crate::shared::options::WALL_THICKNESS,
        }
    }

    /// Position des angegebenen Endes.
    pub fn point(&self, end: WallEnd) -> Vec2 {
        match end {
            WallEnd::Left => self.left_point,
            WallEnd::Right => self.right_point,
        }
    }

    /// Setzt die Position eines Endes und leitet den Winkel neu ab.
    pub fn set_point(&mut self, end: WallEnd, position: Vec2) {
        match end {
            WallEnd::Left => self.left_point = position,
            WallEnd::Right => self.right_point = position,
        }
        self.update_angle();
    }

    /// Verschiebt beide Endpunkte um `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.left_point += delta;
        self.right_point += delta;
        self.update_angle();
    }

    pub fn joints(&self, end: WallEnd) -> &[ElementId] {
        match end {
            WallEnd::Left => &self.left_joints,
            WallEnd::Right => &self.right_joints,
        }
    }

    pub fn joints_mut(&mut self, end: WallEnd) -> &mut Vec<ElementId> {
        match end {
            WallEnd::Left => &mut self.left_joints,
            WallEnd::Right => &mut self.right_joints,
        }
    }

    /// Nachbar am angegebenen Ende (erster Eintrag).
    pub fn joint(&self, end: WallEnd) -> Option<ElementId> {
        self.joints(end).first().copied()
    }

    /// Ersetzt den Joint eines Endes (höchstens ein Nachbar).
    pub fn set_joint(&mut self, end: WallEnd, neighbor: Option<ElementId>) {
        let joints = self.joints_mut(end);
        joints.clear();
        joints.extend(neighbor);
    }

    /// An welchem Ende ist `neighbor` angeschlossen?
    pub fn end_joined_to(&self, neighbor: ElementId) -> Option<WallEnd> {
        if self.left_joints.contains(&neighbor) {
            Some(WallEnd::Left)
        } else if self.right_joints.contains(&neighbor) {
            Some(WallEnd::Right)
        } else {
            None
        }
    }

    pub fn length(&self) -> f32 {
        self.left_point.distance(self.right_point)
    }

    /// Leitet `relative_angle` aus den Endpunkten ab.
    pub fn update_angle(&mut self) {
        self.relative_angle = angle_between(self.left_point, self.right_point);
    }

    /// Kehrt die Wand um: Endpunkte, Joints und Winkel (+π mod 2π) tauschen.
    ///
    /// Der Winkel wird aus den getauschten Endpunkten abgeleitet, damit zweimaliges
    /// Umkehren bitgenau den Ausgangszustand liefert.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.left_point, &mut self.right_point);
        std::mem::swap(&mut self.left_joints, &mut self.right_joints);
        self.update_angle();
    }

    pub fn state(&self) -> WallState {
        WallState {
            left_point: self.left_point,
            right_point: self.right_point,
            relative_angle: self.relative_angle,
            left_joints: self.left_joints.clone(),
            right_joints: self.right_joints.clone(),
            roof_id: self.roof_id,
        }
    }

    pub fn apply_state(&mut self, state: &WallState) {
        self.left_point = state.left_point;
        self.right_point = state.right_point;
        self.relative_angle = state.relative_angle;
        self.left_joints.clone_from(&state.left_joints);
        self.right_joints.clone_from(&state.right_joints);
        self.roof_id = state.roof_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn new_wall_derives_angle_from_points() {
        let wall = Wall::new(1, 100, Vec2::new(0.0, 0.0), Vec2::new(0.0, 5.0));
        assert_relative_eq!(wall.relative_angle, FRAC_PI_2);
        assert_relative_eq!(wall.length(), 5.0);
    }

    #[test]
    fn normalize_angle_stays_in_range() {
        assert_relative_eq!(normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2);
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-5);
        assert!(normalize_angle(-1e-9) < TAU);
        assert_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn flip_swaps_points_joints_and_rotates_angle() {
        let mut wall = Wall::new(1, 100, Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0));
        wall.set_joint(WallEnd::Right, Some(2));

        wall.flip();

        assert_eq!(wall.left_point, Vec2::new(5.0, 0.0));
        assert_eq!(wall.right_point, Vec2::new(0.0, 0.0));
        assert_eq!(wall.left_joints, vec![2]);
        assert!(wall.right_joints.is_empty());
        assert_relative_eq!(wall.relative_angle, PI);
    }

    #[test]
    fn double_flip_is_bit_exact() {
        let initial = Wall::new(7, 100, Vec2::new(0.3, -1.7), Vec2::new(4.1, 2.9));
        let mut wall = initial.clone();
        wall.flip();
        wall.flip();
        assert_eq!(wall, initial);
        assert_eq!(
            wall.relative_angle.to_bits(),
            initial.relative_angle.to_bits()
        );
    }

    #[test]
    fn state_roundtrip_restores_topology() {
        let mut wall = Wall::new(1, 100, Vec2::ZERO, Vec2::new(1.0, 1.0));
        let before = wall.state();
        wall.set_joint(WallEnd::Left, Some(9));
        wall.set_point(WallEnd::Right, Vec2::new(3.0, 0.0));
        wall.apply_state(&before);
        assert_eq!(wall.state(), before);
    }
}
