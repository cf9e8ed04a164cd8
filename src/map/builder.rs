use glam::Vec2;
use tracing::debug;

use crate::assets::{AssetError, AssetProvider, Drawable};
use crate::geometry::cell_origin;
use crate::map::document::{MapDocument, TileRecord};
use crate::map::grid::{MapGrid, PlacedItem};
use crate::renderer::{SpriteRegistration, GROUND_Z, ITEM_Z};

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map dimensions {width}x{height} are empty")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("tile ({x}, {y}) lies outside the {width}x{height} map")]
    OutOfBounds { x: i32, y: i32, width: u32, height: u32 },
    #[error("tile ({x}, {y}): {source}")]
    Asset {
        x: i32,
        y: i32,
        #[source]
        source: AssetError,
    },
}

#[derive(Copy, Clone, Debug)]
pub struct BuildOptions {
    /// Edge length of one cell in world pixels.
    pub tile_size: f32,
    /// Register blocking items half-transparent so obstacles stand out.
    pub highlight_blocking: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { tile_size: crate::DEFAULT_TILE_SIZE, highlight_blocking: false }
    }
}

/// Output of [`build`]: the indexed grid plus every sprite in encounter order,
/// ready to hand to a renderer.
pub struct BuiltMap<I> {
    pub grid: MapGrid<I>,
    pub sprites: Vec<SpriteRegistration<I>>,
}

impl<I> BuiltMap<I> {
    /// Placed items in the order they were encountered in the document.
    pub fn placed_items(&self) -> impl Iterator<Item = &SpriteRegistration<I>> {
        self.sprites.iter().filter(|s| s.z == ITEM_Z)
    }
}

/// Assets for one tile record, resolved before the cell is touched.
struct Resolved<I> {
    ground: Option<I>,
    items: Vec<PlacedItem<I>>,
}

/// Turn a map document into an indexed grid.
///
/// Tile records are applied in document order. A record targeting an already
/// written cell amends it: a new ground id replaces the ground image and items
/// are appended. Any coordinate outside the declared dimensions or any asset
/// that fails to resolve aborts the whole build.
pub fn build<A: AssetProvider>(
    doc: &MapDocument,
    assets: &A,
    options: BuildOptions,
) -> Result<BuiltMap<A::Image>, MapError> {
    let (width, height) = (doc.map_width, doc.map_height);
    if width == 0 || height == 0 {
        return Err(MapError::InvalidDimensions { width, height });
    }

    let mut grid = MapGrid::new(width, height, options.tile_size);
    let mut sprites = Vec::new();
    let mut records = 0usize;

    for tile in doc.plain_tiles() {
        if !grid.in_bounds(tile.x, tile.y) {
            return Err(MapError::OutOfBounds { x: tile.x, y: tile.y, width, height });
        }

        let resolved = resolve(tile, assets, options.tile_size)
            .map_err(|source| MapError::Asset { x: tile.x, y: tile.y, source })?;

        let origin = cell_origin((tile.x, tile.y), options.tile_size);
        if let Some(ground) = &resolved.ground {
            sprites.push(SpriteRegistration::new(ground.clone(), origin, GROUND_Z));
        }
        for item in &resolved.items {
            let alpha = if options.highlight_blocking && item.blocks_movement { 0.5 } else { 1.0 };
            sprites.push(
                SpriteRegistration::new(item.image.clone(), item.world_pos, ITEM_Z).with_alpha(alpha),
            );
        }

        let Some(cell) = grid.slot_mut(tile.x, tile.y) else {
            return Err(MapError::OutOfBounds { x: tile.x, y: tile.y, width, height });
        };
        if resolved.ground.is_some() {
            cell.ground = resolved.ground;
        }
        cell.items.extend(resolved.items);
        cell.refresh_walkable();
        records += 1;
    }

    debug!(
        width,
        height,
        records,
        sprites = sprites.len(),
        walkable = grid.cells().filter(|(_, c)| c.walkable()).count(),
        "map grid built"
    );
    Ok(BuiltMap { grid, sprites })
}

fn resolve<A: AssetProvider>(
    tile: &TileRecord,
    assets: &A,
    tile_size: f32,
) -> Result<Resolved<A::Image>, AssetError> {
    let ground = tile.tileid.map(|id| assets.tile_image(id)).transpose()?;
    let origin = cell_origin((tile.x, tile.y), tile_size);

    let mut items = Vec::new();
    for record in &tile.items {
        let blocks_movement = assets.is_blocking(record.id)?;
        let frames = assets.item_images(record.id)?;
        if frames.is_empty() {
            return Err(AssetError::NoFrames(record.id));
        }
        for image in frames {
            let world_pos = origin - footprint_shift(&image, tile_size);
            items.push(PlacedItem { item_id: record.id, image, blocks_movement, world_pos });
        }
    }
    Ok(Resolved { ground, items })
}

/// Sprites wider than a tile are anchored by their bottom-right tile, so they
/// shift one tile up and to the left. Only the width is checked.
fn footprint_shift(image: &impl Drawable, tile_size: f32) -> Vec2 {
    if image.width() as f32 > tile_size {
        Vec2::splat(tile_size)
    } else {
        Vec2::ZERO
    }
}
