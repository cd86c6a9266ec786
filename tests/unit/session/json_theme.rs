use std::cell::RefCell;

use super::*;
use crate::assets::handle::LoadCompleter;
use crate::foundation::error::ThemeError;

#[derive(Default)]
struct Counting(RefCell<Vec<String>>);

impl ImageLoader for Counting {
    fn begin_load(&self, url: &str, _completer: LoadCompleter) {
        self.0.borrow_mut().push(url.to_string());
    }
}

#[test]
fn new_engine_shows_the_default_stock_theme() {
    let loader = Rc::new(Counting::default());
    let theme = JsonTheme::new(loader.clone(), ThemeOptions::default());
    assert_eq!(theme.theme_name(), "hikaru");
    assert_eq!(theme.style().board_color, "#d2b473");
    assert_eq!(loader.0.borrow().len(), 4, "two stones and two seeded shadows");
    assert_eq!(theme.matrices().len(), 15);
}

#[test]
fn failed_load_keeps_the_previous_theme() {
    let mut theme = JsonTheme::new(Rc::new(Counting::default()), ThemeOptions::default());
    assert!(theme.load(r#"{"name": "slate", "randomSeed": 5}"#));
    let before = theme.style().clone();
    let matrices = theme.matrices().clone();

    assert!(!theme.load(r#"{"name": "broken""#));
    assert_eq!(theme.style(), &before);
    assert_eq!(theme.matrices(), &matrices);
    assert!(matches!(theme.try_load("nope"), Err(ThemeError::Parse(_))));
}

#[test]
fn try_load_reports_ignored_fields() {
    let mut theme = JsonTheme::new(Rc::new(Counting::default()), ThemeOptions::default());
    let report = theme.try_load(r#"{"priority": "high", "glow": 1}"#).unwrap();
    assert_eq!(report.mismatched, vec!["priority"]);
    assert_eq!(report.unknown, vec!["glow"]);
    assert_eq!(theme.sort_key(), 4.0);
    assert_eq!(theme.theme_name(), "JSON Theme");
}

#[test]
fn registered_name_overrides_document_name() {
    let theme = JsonTheme::from_json(
        r#"{"name": "inner"}"#,
        Rc::new(Counting::default()),
        ThemeOptions::default(),
    )
    .unwrap()
    .with_registered_name("outer");
    assert_eq!(theme.theme_name(), "outer");
    assert_eq!(theme.style().theme_name(), "inner");
}

#[test]
fn palette_and_boxes_forward_to_the_config() {
    let theme = JsonTheme::from_json(
        r##"{"boardInkColor": "#123456", "stoneBoundingBox": [0, 0, 1, 1]}"##,
        Rc::new(Counting::default()),
        ThemeOptions::default(),
    )
    .unwrap();
    assert_eq!(theme.line_color(), "#123456");
    assert_eq!(theme.label_text_color(), "#123456");
    assert_eq!(theme.black_text_color(), "#ffffff");
    assert_eq!(theme.stone_bounding_box(), Rect::new(0.0, 0.0, 1.0, 1.0));
    assert!(!theme.stone_casts_shadow(30.0));
}

#[test]
fn options_deserialize_with_defaults() {
    let opts: ThemeOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, ThemeOptions::default());
    let opts: ThemeOptions = serde_json::from_str(r#"{"device_scale": 2.0}"#).unwrap();
    assert_eq!(opts.device_scale, 2.0);
}

struct Instant;

impl ImageLoader for Instant {
    fn begin_load(&self, _url: &str, completer: LoadCompleter) {
        completer.complete(image::RgbaImage::from_pixel(8, 8, image::Rgba([9, 9, 9, 255])));
    }
}

#[test]
fn placing_caches_bitmaps_per_surface_until_released() {
    use crate::render::surface::RecordingSurface;
    use crate::assets::deferred::DrawOutcome;
    use crate::render::placer::StoneDraw;

    let mut theme = JsonTheme::new(Rc::new(Instant), ThemeOptions { device_scale: 2.0 });
    let stones = SurfaceHandle::new(RecordingSurface::new());
    let shadows = SurfaceHandle::new(RecordingSurface::new());

    let sel = theme.pre_render_white(1.0)[0];
    let placed = theme.place_white_stone(&stones, Some(&shadows), sel, 20.0, 20.0, 16.0);
    assert_eq!(placed.stone, StoneDraw::Image(DrawOutcome::Drawn));
    assert_eq!(placed.shadow, Some(DrawOutcome::Drawn));
    assert_eq!(theme.pending_deferred(), 0);
    assert_eq!(theme.advance_deferred(Duration::from_secs(1)), 0);

    assert_eq!(theme.release_surface(&stones), 1);
    assert_eq!(theme.release_surface(&stones), 0);
    assert_eq!(theme.release_surface(&shadows), 1);
}

#[test]
fn rewrapped_surface_shares_one_cache_entry() {
    use crate::render::surface::{RecordingSurface, SurfaceCell};

    let mut theme = JsonTheme::new(Rc::new(Instant), ThemeOptions::default());
    let canvas = Rc::new(SurfaceCell::new(RecordingSurface::new()));
    let sel = theme.pre_render_black(2.0)[0];

    for cx in [0.0, 20.0, 40.0, 60.0, 80.0] {
        let frame = SurfaceHandle::from_rc(canvas.clone());
        theme.place_black_stone(&frame, None, sel, cx, 10.0, 16.0);
    }
    assert_eq!(canvas.borrow().image_draws(), 5);

    let black = theme.images().images(crate::Role::BlackStone)[0].clone();
    assert_eq!(black.cached_surfaces(), 1);

    assert_eq!(theme.release_surface(&SurfaceHandle::from_rc(canvas.clone())), 1);
    assert_eq!(black.cached_surfaces(), 0);
}

#[test]
fn releasing_a_surface_cancels_its_parked_draws() {
    use crate::render::surface::RecordingSurface;

    let mut theme = JsonTheme::new(Rc::new(Counting::default()), ThemeOptions::default());
    let kept = SurfaceHandle::new(RecordingSurface::new());
    let gone = SurfaceHandle::new(RecordingSurface::new());
    let sel = theme.pre_render_white(1.0)[0];

    theme.place_white_stone(&kept, None, sel, 0.0, 0.0, 16.0);
    theme.place_white_stone(&gone, None, sel, 0.0, 0.0, 16.0);
    assert_eq!(theme.pending_deferred(), 2);

    assert_eq!(theme.release_surface(&gone), 0);
    assert_eq!(theme.pending_deferred(), 1);
}
