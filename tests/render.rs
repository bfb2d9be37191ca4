use cairo::{Context, ImageSurface};
use inkboard::draw::color::{BLUE, RED, WHITE};
use inkboard::draw::{DisplayRect, RenderOptions, render_strokes};
use inkboard::input::{Actor, PointerEvent};
use inkboard::stroke::{Point, Stroke, StrokeId};
use inkboard::{Board, Config};

fn board(width: f64, height: f64, device_pixel_ratio: f64) -> Board {
    let mut config = Config::default();
    config.surface.width = width;
    config.surface.height = height;
    config.surface.device_pixel_ratio = device_pixel_ratio;
    Board::new(&config, Some(Actor::new("u1", "Demo User")))
}

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

fn read_pixel(surface: &mut ImageSurface, x: usize, y: usize) -> u32 {
    surface.flush();
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    u32::from_ne_bytes(data[offset..offset + 4].try_into().unwrap())
}

fn horizontal(id: &str, color: inkboard::draw::Color, y: f64) -> Stroke {
    Stroke {
        id: StrokeId::from(id),
        points: vec![
            Point::new(5.0, y, 1.0),
            Point::new(50.0, y, 1.0),
            Point::new(95.0, y, 1.0),
        ],
        color,
        width: 10.0,
        author_id: "u1".into(),
        created_at_ms: 0,
    }
}

#[test]
fn later_strokes_paint_over_earlier_ones() {
    let (mut surface, ctx) = surface_with_context(100, 100);
    let strokes = [horizontal("a", RED, 50.0), horizontal("b", BLUE, 50.0)];
    render_strokes(&ctx, &strokes, &RenderOptions::default());
    drop(ctx);

    assert_eq!(read_pixel(&mut surface, 50, 50), 0xff00_00ff);
}

#[test]
fn resize_to_same_size_repaints_identically() {
    let mut board = board(100.0, 100.0, 1.0);
    board.apply_remote_stroke(horizontal("a", RED, 30.0));
    board.apply_remote_stroke(horizontal("b", BLUE, 60.0));
    let before = board.pipeline_mut().surface_mut().snapshot();

    board.resize(DisplayRect::sized(100.0, 100.0));
    let once = board.pipeline_mut().surface_mut().snapshot();
    board.resize(DisplayRect::sized(100.0, 100.0));
    let twice = board.pipeline_mut().surface_mut().snapshot();

    assert_eq!(before, once);
    assert_eq!(once, twice);
}

#[test]
fn resize_through_another_size_matches_single_repaint() {
    let mut board = board(100.0, 100.0, 1.0);
    board.apply_remote_stroke(horizontal("a", RED, 30.0));
    board.apply_remote_stroke(horizontal("b", BLUE, 60.0));

    board.resize(DisplayRect::sized(57.0, 33.0));
    assert_eq!(board.pipeline().surface().backing_size(), (57, 33));
    board.resize(DisplayRect::sized(100.0, 100.0));
    let resized = board.pipeline_mut().surface_mut().snapshot().unwrap();

    let (mut reference, ctx) = surface_with_context(100, 100);
    render_strokes(&ctx, board.store().strokes(), &RenderOptions::default());
    drop(ctx);
    reference.flush();
    let expected = reference.data().unwrap().to_vec();

    assert_eq!(resized, expected);
}

#[test]
fn live_stroke_drops_out_on_resize_and_returns_on_commit() {
    let mut board = board(100.0, 100.0, 1.0);
    board.handle_pointer(&PointerEvent::down(10.0, 50.0));
    board.handle_pointer(&PointerEvent::moved(50.0, 50.0));
    board.handle_pointer(&PointerEvent::moved(90.0, 50.0));
    let live = board.pipeline_mut().surface_mut().pixel(50, 50).unwrap();
    assert_eq!(live >> 24, 0xff);

    board.resize(DisplayRect::sized(57.0, 33.0));
    board.resize(DisplayRect::sized(100.0, 100.0));
    assert!(board.is_drawing());
    assert_eq!(board.pipeline_mut().surface_mut().pixel(50, 50), Some(0));

    board.handle_pointer(&PointerEvent::up(90.0, 50.0));
    let committed = board.pipeline_mut().surface_mut().pixel(50, 50).unwrap();
    assert_eq!(committed >> 24, 0xff);
}

#[test]
fn remote_stroke_mid_draw_repaints_committed_strokes_only() {
    let mut board = board(100.0, 100.0, 1.0);
    board.handle_pointer(&PointerEvent::down(10.0, 50.0));
    board.handle_pointer(&PointerEvent::moved(50.0, 50.0));
    board.handle_pointer(&PointerEvent::moved(90.0, 50.0));

    board.apply_remote_stroke(horizontal("r", BLUE, 20.0));

    assert_eq!(board.pipeline_mut().surface_mut().pixel(50, 50), Some(0));
    assert_eq!(
        board.pipeline_mut().surface_mut().pixel(50, 20),
        Some(0xff00_00ff)
    );
    assert!(board.is_drawing());
}

#[test]
fn resize_keeps_committed_strokes_and_scales_input() {
    let mut board = board(50.0, 50.0, 1.0);
    board.resize(DisplayRect::sized(50.0, 50.0));
    board.resize_backing(DisplayRect::sized(50.0, 50.0), 100, 100);

    board.handle_pointer(&PointerEvent::down(10.0, 25.0));
    board.handle_pointer(&PointerEvent::moved(25.0, 25.0));
    board.handle_pointer(&PointerEvent::moved(40.0, 25.0));
    board.handle_pointer(&PointerEvent::up(40.0, 25.0));

    let stroke = &board.store().strokes()[0];
    assert_eq!((stroke.points[0].x, stroke.points[0].y), (20.0, 50.0));
    assert_eq!((stroke.points[2].x, stroke.points[2].y), (80.0, 50.0));

    let pixel = board.pipeline_mut().surface_mut().pixel(50, 50).unwrap();
    assert_eq!(pixel >> 24, 0xff);
}

#[test]
fn eraser_paints_over_existing_strokes() {
    let mut board = board(100.0, 100.0, 1.0);
    board.apply_remote_stroke(horizontal("a", RED, 50.0));

    board.select_eraser();
    board.set_width(20.0);
    board.handle_pointer(&PointerEvent::down(5.0, 50.0));
    board.handle_pointer(&PointerEvent::moved(50.0, 50.0));
    board.handle_pointer(&PointerEvent::moved(95.0, 50.0));
    board.handle_pointer(&PointerEvent::up(95.0, 50.0));

    assert_eq!(board.store().len(), 2);
    assert_eq!(board.store().strokes()[1].color, WHITE);
    let pixel = board.pipeline_mut().surface_mut().pixel(50, 50).unwrap();
    assert_eq!(pixel, 0xffff_ffff);
}

#[test]
fn background_fills_cleared_canvas() {
    let mut config = Config::default();
    config.surface.width = 20.0;
    config.surface.height = 20.0;
    config.surface.background = Some(inkboard::config::ColorSpec::Name("white".into()));
    let mut board = Board::new(&config, None);

    board.clear_canvas();

    let pixel = board.pipeline_mut().surface_mut().pixel(3, 3).unwrap();
    assert_eq!(pixel, 0xffff_ffff);
}

#[test]
fn exported_png_round_trips_through_cairo() {
    let mut board = board(40.0, 30.0, 2.0);
    board.apply_remote_stroke(horizontal("a", RED, 10.0));

    let png = board.export_png().unwrap();
    let decoded = ImageSurface::create_from_png(&mut png.as_slice()).unwrap();

    assert_eq!((decoded.width(), decoded.height()), (80, 60));
}
