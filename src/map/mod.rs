mod builder;
mod document;
mod grid;

pub use builder::{build, BuildOptions, BuiltMap, MapError};
pub use document::{
    DocumentError, Feature, ItemRecord, MapDocument, MapNode, TileRecord, FEATURE_TILE_GROUP,
    TILE_PLAIN,
};
pub use grid::{Cell, MapGrid, PlacedItem};
