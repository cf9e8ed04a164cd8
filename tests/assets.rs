mod common;

use std::fs;
use std::path::Path;

use glam::Vec2;
use image::{Rgba, RgbaImage};
use tilewalk::assets::{AssetError, AssetProvider, Drawable, FolderAssets};
use tilewalk::map::{self, BuildOptions};

use common::{doc, tile};

fn save_png(path: &Path, w: u32, h: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbaImage::from_pixel(w, h, Rgba([40, 160, 60, 255])).save(path).unwrap();
}

/// tiles/100, a two-frame blocking tree (7) with a wide crown, a single-frame
/// rock (9) missing from the catalog.
fn asset_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    save_png(&root.join("tiles/100.png"), 32, 32);
    save_png(&root.join("items/7_1.png"), 64, 64);
    save_png(&root.join("items/7_0.png"), 32, 32);
    save_png(&root.join("items/9.png"), 32, 32);
    save_png(&root.join("items/readme.png"), 8, 8);
    fs::write(root.join("items.json"), r#"{ "items": [{ "id": 7, "blocking": true }] }"#).unwrap();
    dir
}

#[test]
fn loads_tiles_and_items_from_folder() {
    let dir = asset_dir();
    let assets = FolderAssets::load(dir.path()).unwrap();

    assert_eq!(assets.tile_image(100).unwrap().width(), 32);
    let frames = assets.item_images(7).unwrap();
    let widths: Vec<u32> = frames.iter().map(|f| f.width()).collect();
    assert_eq!(widths, vec![32, 64]);
    assert_eq!(assets.item_images(9).unwrap().len(), 1);
}

#[test]
fn blocking_comes_from_catalog() {
    let dir = asset_dir();
    let assets = FolderAssets::load(dir.path()).unwrap();
    assert!(assets.is_blocking(7).unwrap());
    assert!(!assets.is_blocking(9).unwrap());
}

#[test]
fn unknown_ids_are_errors() {
    let dir = asset_dir();
    let assets = FolderAssets::load(dir.path()).unwrap();
    assert!(matches!(assets.tile_image(1), Err(AssetError::UnknownTile(1))));
    assert!(matches!(assets.item_images(2), Err(AssetError::UnknownItem(2))));
    assert!(matches!(assets.is_blocking(2), Err(AssetError::UnknownItem(2))));
}

#[test]
fn broken_catalog_fails_to_load() {
    let dir = asset_dir();
    fs::write(dir.path().join("items.json"), "{ items: ").unwrap();
    assert!(matches!(FolderAssets::load(dir.path()), Err(AssetError::Catalog { .. })));
}

#[test]
fn undecodable_png_fails_to_load() {
    let dir = asset_dir();
    fs::write(dir.path().join("tiles/101.png"), b"not a png").unwrap();
    assert!(matches!(FolderAssets::load(dir.path()), Err(AssetError::Image { .. })));
}

#[test]
fn unreadable_root_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let assets = FolderAssets::load(dir.path().join("missing")).unwrap();
    assert!(matches!(assets.tile_image(100), Err(AssetError::UnknownTile(100))));
    assert!(matches!(assets.item_images(7), Err(AssetError::UnknownItem(7))));
}

#[test]
fn builds_map_from_folder_assets() {
    let dir = asset_dir();
    let assets = FolderAssets::load(dir.path()).unwrap();
    let document = doc(3, 3, vec![
        tile(0, 0, Some(100), &[9]),
        tile(2, 2, Some(100), &[7]),
    ]);
    let built = map::build(&document, &assets, BuildOptions::default()).unwrap();

    assert!(built.grid.is_walkable(0, 0));
    assert!(!built.grid.is_walkable(2, 2));
    let cell = built.grid.get(2, 2).unwrap();
    assert_eq!(cell.items[0].world_pos, Vec2::new(64.0, 64.0));
    assert_eq!(cell.items[1].world_pos, Vec2::new(32.0, 32.0));
    assert_eq!(built.sprites.len(), 5);
}
