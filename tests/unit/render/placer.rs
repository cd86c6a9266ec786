use std::rc::Rc;

use super::*;
use crate::assets::handle::{ImageLoader, LoadCompleter};
use crate::config::loader::parse_theme;
use crate::render::surface::{DrawOp, RecordingSurface, Surface, SurfaceCell};

/// Resolves every load immediately with a 32x32 opaque image.
struct Instant;

impl ImageLoader for Instant {
    fn begin_load(&self, _url: &str, completer: LoadCompleter) {
        completer.complete(image::RgbaImage::from_pixel(32, 32, image::Rgba([1, 2, 3, 255])));
    }
}

struct Fixture {
    config: ThemeConfig,
    images: ImageAssetPool,
    matrices: TransformMatrixCache,
    deferred: DeferredDraws,
}

impl Fixture {
    fn new(text: &str) -> Self {
        let (config, _) = parse_theme(text).unwrap();
        Self {
            images: ImageAssetPool::build(&config, &Instant),
            matrices: TransformMatrixCache::build(&config),
            deferred: DeferredDraws::new(1.0),
            config,
        }
    }

    fn placer(&mut self) -> StonePlacer<'_> {
        StonePlacer {
            config: &self.config,
            images: &self.images,
            matrices: &self.matrices,
            deferred: &mut self.deferred,
        }
    }
}

fn recorder() -> (Rc<SurfaceCell<RecordingSurface>>, SurfaceHandle) {
    let rec = Rc::new(SurfaceCell::new(RecordingSurface::new()));
    (rec.clone(), SurfaceHandle::from_rc(rec))
}

#[test]
fn pre_render_yields_fifty_selectors_from_the_recurrence() {
    let sel = pre_render_stone(3.0);
    assert_eq!(sel.len(), PRE_RENDER_COUNT);
    assert_eq!(sel[0], Selector(543.0));
    assert_eq!(sel[1], Selector(543.0 * 181.0 + 29.0 * 543.0));
    for w in sel.windows(2) {
        let r = w[0].value();
        assert_eq!(w[1].value(), r * 181.0 + 29.0 * r);
    }
    assert_eq!(pre_render_stone(3.0), sel);
}

#[test]
fn bounding_boxes_default_and_override() {
    let c = ThemeConfig::default();
    assert_eq!(stone_bounding_box(&c), Rect::new(-1.0, -1.0, 2.0, 2.0));
    assert_eq!(shadow_bounding_box(&c), Rect::new(-0.75, -0.75, 1.25, 1.25));
    assert_eq!(markings_bounding_box(&c), Rect::new(0.0, 0.0, 1.0, 1.0));

    let (c, _) = parse_theme(r#"{"stoneBoundingBox": [0,0,1,1], "shadowBoundingBox": [1,2,3]}"#).unwrap();
    assert_eq!(stone_bounding_box(&c), Rect::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(shadow_bounding_box(&c), Rect::new(-0.75, -0.75, 1.25, 1.25));
}

#[test]
fn shadows_need_radius_and_artwork() {
    let plain = ThemeConfig::default();
    assert!(!stone_casts_shadow(&plain, 50.0));

    let (c, _) = parse_theme(r#"{"blackShadows": ["b.png"]}"#).unwrap();
    assert!(stone_casts_shadow(&c, 10.0));
    assert!(!stone_casts_shadow(&c, 9.99));
}

#[test]
fn vector_fallback_fills_once_and_strokes_only_with_width() {
    let mut f = Fixture::new(r#"{"whiteStoneLineWidth": 0.05, "blackStoneLineWidth": 0}"#);
    let (rec, surface) = recorder();

    let p = f.placer().place(StoneColor::White, &surface, None, Selector(1.0), 10.0, 10.0, 8.0);
    assert_eq!(p.stone, StoneDraw::Vector);
    assert_eq!(p.shadow, None);
    assert_eq!((rec.borrow().fills(), rec.borrow().strokes()), (1, 1));

    rec.borrow_mut().take_ops();
    f.placer().place(StoneColor::Black, &surface, None, Selector(1.0), 10.0, 10.0, 8.0);
    assert_eq!((rec.borrow().fills(), rec.borrow().strokes()), (1, 0));

    match &rec.borrow().ops()[0] {
        DrawOp::Fill { paint, bounds, .. } => {
            assert_eq!(paint, "#000000");
            assert!((bounds.width() - 1.0).abs() < 1e-6);
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn image_transform_is_cell_then_radius_then_bundle() {
    let mut f = Fixture::new(r#"{"blackStones": ["b.png"], "sizes": [1.2]}"#);
    let (rec, surface) = recorder();
    let base = Affine::scale(2.0);
    surface.borrow_mut().set_transform(base);

    let sel = Selector(4.0);
    let p = f.placer().place(StoneColor::Black, &surface, None, sel, 30.0, 40.0, 10.0);
    assert_eq!(p.stone, StoneDraw::Image(DrawOutcome::Drawn));

    let m = f.matrices.bundle(sel).black_stone;
    let expected = base * Affine::translate((30.0, 40.0)) * Affine::scale(20.0) * m;
    let rec = rec.borrow();
    assert_eq!(rec.ops()[0].transform(), expected);
    assert_eq!(rec.transform(), base, "transform restored");
}

#[test]
fn shadow_goes_to_the_shadow_surface_unless_it_is_the_stone_surface() {
    let mut f = Fixture::new(r#"{"whiteStones": ["w.png"], "shadows": ["s.png"]}"#);
    let (stones, stone_surface) = recorder();
    let (shadows, shadow_surface) = recorder();

    let p = f.placer().place(
        StoneColor::White,
        &stone_surface,
        Some(&shadow_surface),
        Selector(2.0),
        0.0,
        0.0,
        12.0,
    );
    assert_eq!(p.shadow, Some(DrawOutcome::Drawn));
    assert_eq!(stones.borrow().image_draws(), 1);
    assert_eq!(shadows.borrow().image_draws(), 1);

    let same = stone_surface.clone();
    let p = f.placer().place(
        StoneColor::White,
        &stone_surface,
        Some(&same),
        Selector(2.0),
        0.0,
        0.0,
        12.0,
    );
    assert_eq!(p.shadow, None);
    assert_eq!(stones.borrow().image_draws(), 2);
}

#[test]
fn vector_disc_uses_the_image_transform_pipeline_and_restores() {
    let mut f = Fixture::new(
        r#"{"blackStoneLineWidth": 0.1, "rotations": [15, 40], "offsets": [[0.1, -0.2]]}"#,
    );
    let (rec, surface) = recorder();
    let base = Affine::translate((7.0, -3.0)) * Affine::scale(1.5);
    surface.borrow_mut().set_transform(base);

    let sel = Selector(9.0);
    let p = f.placer().place(StoneColor::Black, &surface, None, sel, 12.0, 18.0, 6.0);
    assert_eq!(p.stone, StoneDraw::Vector);

    let m = f.matrices.bundle(sel).black_stone;
    assert_ne!(m, Affine::IDENTITY);
    let expected = base * Affine::translate((12.0, 18.0)) * Affine::scale(12.0) * m;
    let rec = rec.borrow();
    assert_eq!(rec.ops().len(), 2);
    assert!(matches!(rec.ops()[0], DrawOp::Fill { .. }));
    assert!(matches!(rec.ops()[1], DrawOp::Stroke { .. }));
    for op in rec.ops() {
        assert_eq!(op.transform(), expected);
    }
    assert_eq!(rec.transform(), base);
}

#[test]
fn shadow_surface_transform_is_restored() {
    let mut f = Fixture::new(r#"{"shadows": ["s.png"], "shadowOffsets": [[0.05, 0.1]]}"#);
    let (stones, stone_surface) = recorder();
    let (shadows, shadow_surface) = recorder();
    let stone_base = Affine::scale(3.0);
    let shadow_base = Affine::translate((100.0, 50.0));
    stone_surface.borrow_mut().set_transform(stone_base);
    shadow_surface.borrow_mut().set_transform(shadow_base);

    let sel = Selector(6.0);
    let p = f.placer().place(
        StoneColor::White,
        &stone_surface,
        Some(&shadow_surface),
        sel,
        4.0,
        5.0,
        10.0,
    );
    assert_eq!(p.stone, StoneDraw::Vector);
    assert_eq!(p.shadow, Some(DrawOutcome::Drawn));

    let m = f.matrices.bundle(sel).white_shadow;
    let expected = shadow_base * Affine::translate((4.0, 5.0)) * Affine::scale(20.0) * m;
    assert_eq!(shadows.borrow().ops()[0].transform(), expected);
    assert_eq!(shadows.borrow().transform(), shadow_base);
    assert_eq!(stones.borrow().transform(), stone_base);
}
