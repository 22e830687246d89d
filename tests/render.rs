//! Headless pixel checks over the full surface pipeline.

use cairo::{Context, Format, ImageSurface};
use std::fs::File;
use tempfile::TempDir;

use sketchboard::assets::{AssetError, AssetProvider, DirTextureProvider};
use sketchboard::board::{DrawingBoard, MemorySurfaceHost};
use sketchboard::draw::color::{BLUE, RED};
use sketchboard::draw::ShapeKind;
use sketchboard::export::PngExporter;
use sketchboard::input::PointerAction;

struct NoAssets;

impl AssetProvider for NoAssets {
    fn load_texture(&self, name: &str) -> Result<ImageSurface, AssetError> {
        Err(AssetError::NotFound(name.to_string()))
    }
}

fn rgba_at(surface: &mut ImageSurface, x: i32, y: i32) -> (u8, u8, u8, u8) {
    let stride = surface.stride() as usize;
    let offset = y as usize * stride + x as usize * 4;
    let data = surface.data().unwrap();
    (
        data[offset + 2],
        data[offset + 1],
        data[offset],
        data[offset + 3],
    )
}

fn board_with_exports(
    temp: &TempDir,
) -> DrawingBoard<MemorySurfaceHost> {
    let host = MemorySurfaceHost::new(64, 64).unwrap();
    let exporter = PngExporter::new(temp.path().join("exports"));
    let mut board = DrawingBoard::new(host, Box::new(NoAssets), Box::new(exporter));
    board.activate().unwrap();
    board
}

#[test]
fn export_round_trips_drawn_pixels() {
    let temp = TempDir::new().unwrap();
    let mut board = board_with_exports(&temp);

    board.select_shape_kind(ShapeKind::Rectangle);
    board.select_color(RED);
    board.on_pointer_event(PointerAction::Down, 8.0, 8.0);
    board.on_pointer_event(PointerAction::Up, 32.0, 32.0);

    let path = board.save().unwrap().expect("saved path");

    let mut file = File::open(path).unwrap();
    let mut exported = ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!((exported.width(), exported.height()), (64, 64));
    assert_eq!(rgba_at(&mut exported, 16, 16), (255, 0, 0, 255));
    assert_eq!(rgba_at(&mut exported, 50, 50), (255, 255, 255, 255));
}

#[test]
fn live_surface_matches_paint_order() {
    let temp = TempDir::new().unwrap();
    let mut board = board_with_exports(&temp);

    board.select_shape_kind(ShapeKind::Rectangle);
    board.select_color(RED);
    board.on_pointer_event(PointerAction::Down, 0.0, 0.0);
    board.on_pointer_event(PointerAction::Up, 40.0, 40.0);

    board.select_color(BLUE);
    board.on_pointer_event(PointerAction::Down, 0.0, 0.0);
    board.on_pointer_event(PointerAction::Up, 20.0, 40.0);

    // Later commit occludes the earlier one where they overlap.
    let surface = board.host_mut().surface_mut();
    assert_eq!(rgba_at(surface, 10, 20), (0, 0, 255, 255));
    assert_eq!(rgba_at(surface, 30, 20), (255, 0, 0, 255));
}

#[test]
fn texture_brush_tiles_the_decoded_asset() {
    let temp = TempDir::new().unwrap();
    let texture_dir = temp.path().join("textures");
    std::fs::create_dir_all(&texture_dir).unwrap();

    // A solid blue 2x2 texture; tiling it fills shapes with blue.
    let tile = ImageSurface::create(Format::ARgb32, 2, 2).unwrap();
    let ctx = Context::new(&tile).unwrap();
    ctx.set_source_rgb(0.0, 0.0, 1.0);
    ctx.paint().unwrap();
    drop(ctx);
    let mut file = File::create(texture_dir.join("plain.png")).unwrap();
    tile.write_to_png(&mut file).unwrap();

    let host = MemorySurfaceHost::new(64, 64).unwrap();
    let exporter = PngExporter::new(temp.path().join("exports"));
    let assets = DirTextureProvider::new(&texture_dir);
    let mut board = DrawingBoard::new(host, Box::new(assets), Box::new(exporter));
    board.activate().unwrap();

    board.select_texture("plain");
    board.select_shape_kind(ShapeKind::Rectangle);
    board.on_pointer_event(PointerAction::Down, 4.0, 4.0);
    board.on_pointer_event(PointerAction::Up, 30.0, 30.0);

    assert_eq!(rgba_at(board.host_mut().surface_mut(), 16, 16), (0, 0, 255, 255));
}

#[test]
fn undo_after_clear_restores_the_visible_drawing() {
    let temp = TempDir::new().unwrap();
    let mut board = board_with_exports(&temp);

    board.select_shape_kind(ShapeKind::Circle);
    board.select_color(BLUE);
    board.on_pointer_event(PointerAction::Down, 10.0, 10.0);
    board.on_pointer_event(PointerAction::Up, 50.0, 40.0);
    assert_eq!(rgba_at(board.host_mut().surface_mut(), 30, 25), (0, 0, 255, 255));

    board.clear();
    assert_eq!(rgba_at(board.host_mut().surface_mut(), 30, 25), (255, 255, 255, 255));

    board.undo();
    assert_eq!(rgba_at(board.host_mut().surface_mut(), 30, 25), (0, 0, 255, 255));
}
