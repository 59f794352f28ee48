//! Core-Domänentypen: Elemente, Wände, Element-Ablage, Topologie, Snapping, Spatial-Index.

pub mod element;
pub mod journal;
pub mod snapping;
pub mod spatial;
pub mod store;
/// Wand-Topologie-Engine
///
/// Hält den Joint-Graphen konsistent:
/// - Ketten-Flips und Schleifen-Umkehr
/// - Verbinden/Lösen einzelner Enden
/// - Dach-Kaskaden beim Brechen einer Schleife
pub mod topology;
pub mod wall;

pub use element::{Element, ElementId, ElementKind, Foundation, Polygon, Roof, SolarPanel};
pub use journal::{Journal, TopologyOp};
pub use snapping::{snap_endpoint, MagnetTarget, SnapRequest, SnapResult, SnapSettings};
pub use spatial::{EndpointIndex, EndpointMatch};
pub use store::{ChangeEvent, ElementStore};
pub use topology::{AttachOutcome, ChainDirection, FlipSide, LoopCheck, WallTopology};
pub use wall::{Wall, WallEnd, WallState};
