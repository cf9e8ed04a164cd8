#![allow(dead_code)]

use std::collections::HashMap;

use tilewalk::assets::{AssetError, AssetProvider, Drawable};
use tilewalk::config::GameConfig;
use tilewalk::map::{
    self, BuildOptions, BuiltMap, Feature, ItemRecord, MapDocument, MapGrid, MapNode, TileRecord,
    FEATURE_TILE_GROUP, TILE_PLAIN,
};

pub const GRASS: u32 = 100;
pub const WALL: u32 = 200;
pub const FLOWER: u32 = 201;
pub const TREE: u32 = 202;

/// Stand-in image: a name and a pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct Img {
    pub name: String,
    pub w: u32,
    pub h: u32,
}

impl Img {
    pub fn new(name: &str, w: u32, h: u32) -> Self {
        Self { name: name.to_string(), w, h }
    }
}

impl Drawable for Img {
    fn width(&self) -> u32 { self.w }
    fn height(&self) -> u32 { self.h }
}

/// In-memory asset provider: grass ground, a blocking wall, a harmless
/// flower and a two-frame 64px tree that blocks.
pub struct MockAssets {
    tiles: HashMap<u32, Img>,
    items: HashMap<u32, (Vec<Img>, bool)>,
}

impl MockAssets {
    pub fn new() -> Self {
        let mut tiles = HashMap::new();
        tiles.insert(GRASS, Img::new("grass", 32, 32));
        tiles.insert(101, Img::new("sand", 32, 32));

        let mut items = HashMap::new();
        items.insert(WALL, (vec![Img::new("wall", 32, 32)], true));
        items.insert(FLOWER, (vec![Img::new("flower", 32, 32)], false));
        items.insert(
            TREE,
            (vec![Img::new("tree_trunk", 32, 32), Img::new("tree_crown", 64, 64)], true),
        );
        Self { tiles, items }
    }
}

impl AssetProvider for MockAssets {
    type Image = Img;

    fn tile_image(&self, tile_id: u32) -> Result<Img, AssetError> {
        self.tiles.get(&tile_id).cloned().ok_or(AssetError::UnknownTile(tile_id))
    }

    fn item_images(&self, item_id: u32) -> Result<Vec<Img>, AssetError> {
        self.items.get(&item_id).map(|(imgs, _)| imgs.clone()).ok_or(AssetError::UnknownItem(item_id))
    }

    fn is_blocking(&self, item_id: u32) -> Result<bool, AssetError> {
        self.items.get(&item_id).map(|(_, b)| *b).ok_or(AssetError::UnknownItem(item_id))
    }
}

// ── Document helpers ─────────────────────────────────────────────────────────

pub fn tile(x: i32, y: i32, tileid: Option<u32>, items: &[u32]) -> TileRecord {
    TileRecord {
        kind: TILE_PLAIN,
        x,
        y,
        tileid,
        items: items.iter().map(|&id| ItemRecord { id }).collect(),
    }
}

pub fn doc(width: u32, height: u32, tiles: Vec<TileRecord>) -> MapDocument {
    MapDocument {
        map_width: width,
        map_height: height,
        nodes: vec![MapNode {
            features: vec![Feature { kind: FEATURE_TILE_GROUP, tiles }],
        }],
    }
}

/// Grass on every cell, plus extra records applied afterwards.
pub fn open_doc(width: u32, height: u32, extra: Vec<TileRecord>) -> MapDocument {
    let mut tiles = Vec::new();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            tiles.push(tile(x, y, Some(GRASS), &[]));
        }
    }
    tiles.extend(extra);
    doc(width, height, tiles)
}

pub fn build(doc: &MapDocument) -> BuiltMap<Img> {
    map::build(doc, &MockAssets::new(), BuildOptions::default()).expect("map builds")
}

pub fn open_grid(width: u32, height: u32) -> MapGrid<Img> {
    build(&open_doc(width, height, Vec::new())).grid
}

pub fn config() -> GameConfig {
    GameConfig::default()
}
