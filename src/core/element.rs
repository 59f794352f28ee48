//! Element-Typen der Szene: Fundamente, Wände, Dächer, Solarmodule, Polygone.

use super::Wall;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stabile Element-ID
pub type ElementId = u64;

/// Art eines Elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Foundation,
    Wall,
    Roof,
    SolarPanel,
    Polygon,
}

/// Rechteckiges Fundament, Trägerfläche für Wände und Solarmodule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foundation {
    pub id: ElementId,
    /// Mittelpunkt in Weltkoordinaten
    pub center: Vec2,
    /// Ausdehnung in x-Richtung
    pub lx: f32,
    /// Ausdehnung in y-Richtung
    pub ly: f32,
}

/// Dach über einer geschlossenen Wandschleife
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roof {
    pub id: ElementId,
    /// Fundament, auf dem die tragenden Wände stehen
    pub parent_id: ElementId,
    /// Tragende Wände in Schleifenreihenfolge
    pub wall_ids: Vec<ElementId>,
    /// Firsthöhe über der Wandoberkante
    pub rise: f32,
}

/// Solarkollektor auf einem Fundament oder Dach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarPanel {
    pub id: ElementId,
    pub parent_id: ElementId,
    /// Position in lokalen Koordinaten des Trägers
    pub position: Vec2,
    /// Neigungswinkel (Radiant)
    pub tilt_angle: f32,
}

/// Freies Umriss-Polygon (Annotation) an einem beliebigen Element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub id: ElementId,
    pub parent_id: ElementId,
    pub vertices: Vec<Vec2>,
}

/// Ein Element der flachen Element-Ablage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Foundation(Foundation),
    Wall(Wall),
    Roof(Roof),
    SolarPanel(SolarPanel),
    Polygon(Polygon),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Foundation(f) => f.id,
            Element::Wall(w) => w.id,
            Element::Roof(r) => r.id,
            Element::SolarPanel(p) => p.id,
            Element::Polygon(p) => p.id,
        }
    }

    /// Eltern-Element (Fundamente liegen direkt auf dem Boden).
    pub fn parent_id(&self) -> Option<ElementId> {
        match self {
            Element::Foundation(_) => None,
            Element::Wall(w) => Some(w.parent_id),
            Element::Roof(r) => Some(r.parent_id),
            Element::SolarPanel(p) => Some(p.parent_id),
            Element::Polygon(p) => Some(p.parent_id),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Foundation(_) => ElementKind::Foundation,
            Element::Wall(_) => ElementKind::Wall,
            Element::Roof(_) => ElementKind::Roof,
            Element::SolarPanel(_) => ElementKind::SolarPanel,
            Element::Polygon(_) => ElementKind::Polygon,
        }
    }

    pub fn as_wall(&self) -> Option<&Wall> {
        match self {
            Element::Wall(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_wall_mut(&mut self) -> Option<&mut Wall> {
        match self {
            Element::Wall(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_roof(&self) -> Option<&Roof> {
        match self {
            Element::Roof(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Wall> for Element {
    fn from(wall: Wall) -> Self {
        Element::Wall(wall)
    }
}

impl From<Foundation> for Element {
    fn from(foundation: Foundation) -> Self {
        Element::Foundation(foundation)
    }
}

impl From<Roof> for Element {
    fn from(roof: Roof) -> Self {
        Element::Roof(roof)
    }
}

impl From<SolarPanel> for Element {
    fn from(panel: SolarPanel) -> Self {
        Element::SolarPanel(panel)
    }
}

impl From<Polygon> for Element {
    fn from(polygon: Polygon) -> Self {
        Element::Polygon(polygon)
    }
}
