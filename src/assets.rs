use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use serde::Deserialize;
use tracing::{debug, warn};

// ── Drawable ─────────────────────────────────────────────────────────────────

/// Anything the renderer can draw. The map builder only needs the pixel
/// footprint to align sprites wider than one tile.
pub trait Drawable {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

impl Drawable for RgbaImage {
    fn width(&self) -> u32 { self.dimensions().0 }
    fn height(&self) -> u32 { self.dimensions().1 }
}

impl<T: Drawable> Drawable for Arc<T> {
    fn width(&self) -> u32 { (**self).width() }
    fn height(&self) -> u32 { (**self).height() }
}

// ── AssetProvider ────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("unknown tile id {0}")]
    UnknownTile(u32),
    #[error("unknown item id {0}")]
    UnknownItem(u32),
    #[error("item id {0} has no frames")]
    NoFrames(u32),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid item catalog {path:?}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolves map identifiers to images and movement metadata.
///
/// Implementations are fully loaded before the map is built; every call here
/// is a lookup, never I/O.
pub trait AssetProvider {
    type Image: Drawable + Clone;

    /// Ground image for a base-tile id.
    fn tile_image(&self, tile_id: u32) -> Result<Self::Image, AssetError>;

    /// One or more frames for an item. Multi-frame items contribute one
    /// placed item per frame, in the returned order. An empty list fails the
    /// map build with [`AssetError::NoFrames`].
    fn item_images(&self, item_id: u32) -> Result<Vec<Self::Image>, AssetError>;

    /// Whether the item stops an actor from entering its cell.
    fn is_blocking(&self, item_id: u32) -> Result<bool, AssetError>;
}

// ── FolderAssets ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: u32,
    #[serde(default)]
    blocking: bool,
}

/// Asset provider backed by a directory of PNG files.
///
/// Layout:
/// ```text
/// <root>/tiles/<tile_id>.png
/// <root>/items/<item_id>.png          single-frame item
/// <root>/items/<item_id>_<frame>.png  multi-frame item, frames sorted by index
/// <root>/items.json                   {"items": [{"id": 1234, "blocking": true}]}
/// ```
/// Items missing from the catalog do not block.
#[derive(Default)]
pub struct FolderAssets {
    tiles: HashMap<u32, Arc<RgbaImage>>,
    items: HashMap<u32, Vec<(u32, Arc<RgbaImage>)>>,
    blocking: HashMap<u32, bool>,
}

impl FolderAssets {
    /// Scan `root` recursively and decode every recognised PNG.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, AssetError> {
        let root = root.as_ref();
        let mut assets = Self::default();

        for entry in walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(path = ?err.path(), "skipping unreadable asset entry: {err}");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
        {
            let file_path = entry.path();
            if file_path.extension().and_then(|s| s.to_str()) != Some("png") {
                continue;
            }
            let Some(stem) = file_path.file_stem().and_then(|s| s.to_str()) else { continue };
            let folder = file_path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|s| s.to_str())
                .unwrap_or_default();

            match folder {
                "tiles" => {
                    let Ok(id) = stem.parse::<u32>() else {
                        warn!(path = ?file_path, "tile image name is not a numeric id; skipping");
                        continue;
                    };
                    let img = decode(file_path)?;
                    if assets.tiles.insert(id, img).is_some() {
                        warn!(id, path = ?file_path, "duplicate tile image; keeping the last one");
                    }
                }
                "items" => {
                    let Some((id, frame)) = parse_item_stem(stem) else {
                        warn!(path = ?file_path, "item image name is not <id> or <id>_<frame>; skipping");
                        continue;
                    };
                    let img = decode(file_path)?;
                    assets.items.entry(id).or_default().push((frame, img));
                }
                _ => {}
            }
        }

        for frames in assets.items.values_mut() {
            frames.sort_by_key(|(frame, _)| *frame);
        }

        let catalog_path = root.join("items.json");
        if catalog_path.is_file() {
            let text = std::fs::read_to_string(&catalog_path)
                .map_err(|source| AssetError::Io { path: catalog_path.clone(), source })?;
            let catalog: CatalogFile = serde_json::from_str(&text)
                .map_err(|source| AssetError::Catalog { path: catalog_path.clone(), source })?;
            assets.blocking = catalog.items.into_iter().map(|e| (e.id, e.blocking)).collect();
        }

        debug!(
            tiles = assets.tiles.len(),
            items = assets.items.len(),
            catalog = assets.blocking.len(),
            "loaded folder assets from {:?}",
            root
        );
        Ok(assets)
    }
}

fn decode(path: &Path) -> Result<Arc<RgbaImage>, AssetError> {
    let img = image::open(path)
        .map_err(|source| AssetError::Image { path: path.to_path_buf(), source })?;
    Ok(Arc::new(img.to_rgba8()))
}

/// `"1234"` → `(1234, 0)`, `"1234_2"` → `(1234, 2)`.
fn parse_item_stem(stem: &str) -> Option<(u32, u32)> {
    match stem.split_once('_') {
        Some((id, frame)) => Some((id.parse().ok()?, frame.parse().ok()?)),
        None => Some((stem.parse().ok()?, 0)),
    }
}

impl AssetProvider for FolderAssets {
    type Image = Arc<RgbaImage>;

    fn tile_image(&self, tile_id: u32) -> Result<Self::Image, AssetError> {
        self.tiles.get(&tile_id).cloned().ok_or(AssetError::UnknownTile(tile_id))
    }

    fn item_images(&self, item_id: u32) -> Result<Vec<Self::Image>, AssetError> {
        match self.items.get(&item_id) {
            Some(frames) => Ok(frames.iter().map(|(_, img)| img.clone()).collect()),
            None => Err(AssetError::UnknownItem(item_id)),
        }
    }

    fn is_blocking(&self, item_id: u32) -> Result<bool, AssetError> {
        if !self.items.contains_key(&item_id) {
            return Err(AssetError::UnknownItem(item_id));
        }
        Ok(self.blocking.get(&item_id).copied().unwrap_or(false))
    }
}
