//! Folder-level workflows built on the distance and mapping operations.

pub mod color_mesh;
pub mod distance_map;
mod glyphs;
pub mod overlay;
pub mod scale_bar;

pub use color_mesh::{ColorMeshJob, ColorMeshReport};
pub use distance_map::{color_distance_map, BatchReport, DistanceMapBatch};
pub use overlay::{composite_overlay, resample_nearest, OverlayBatch, OverlayReport};
pub use scale_bar::{ScaleBar, SCALE_BAR_FILE};
