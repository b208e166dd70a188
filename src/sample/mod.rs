pub mod placement;
pub mod radii;
