pub mod grid;
pub mod placements;

pub use grid::{cell_to_center, place_asset, Anchor, GridCell, Placement, PlacementSpec};
pub use placements::{page_layout, placement_for, AssetRole};
