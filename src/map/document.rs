use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Feature category holding tile records.
pub const FEATURE_TILE_GROUP: u8 = 4;
/// Tile record subtype consumed by the grid builder.
pub const TILE_PLAIN: u8 = 5;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read map document {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed map document: {0}")]
    Json(#[from] serde_json::Error),
}

// ── MapDocument ──────────────────────────────────────────────────────────────

/// Parsed map, as produced by the map exporter.
///
/// Only the fields the grid builder reads are modelled; everything else in
/// the file is ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    pub map_width: u32,
    pub map_height: u32,
    #[serde(default)]
    pub nodes: Vec<MapNode>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MapNode {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub tiles: Vec<TileRecord>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TileRecord {
    #[serde(rename = "type")]
    pub kind: u8,
    pub x: i32,
    pub y: i32,
    /// Base ground tile. Absent for cells that only hold items.
    #[serde(default)]
    pub tileid: Option<u32>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ItemRecord {
    pub id: u32,
}

/// Exported files wrap the map in a `data` envelope; bare maps are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentFile {
    Wrapped { data: MapDocument },
    Bare(MapDocument),
}

impl MapDocument {
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let file: DocumentFile = serde_json::from_str(text)?;
        Ok(match file {
            DocumentFile::Wrapped { data } => data,
            DocumentFile::Bare(doc) => doc,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| DocumentError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }

    /// Plain tile records of every tile-group feature, in document order.
    pub fn plain_tiles(&self) -> impl Iterator<Item = &TileRecord> {
        self.nodes
            .iter()
            .flat_map(|node| node.features.iter())
            .filter(|feature| feature.kind == FEATURE_TILE_GROUP)
            .flat_map(|feature| feature.tiles.iter())
            .filter(|tile| tile.kind == TILE_PLAIN)
    }
}
