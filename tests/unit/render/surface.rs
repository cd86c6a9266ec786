use super::*;

#[test]
fn recording_surface_tags_ops_with_the_current_transform() {
    let mut s = RecordingSurface::with_transform(Affine::scale(2.0));
    s.concat(Affine::translate((3.0, 4.0)));
    s.draw_image(&RgbaImage::new(4, 2), Rect::new(-0.5, -0.5, 0.5, 0.5));

    let ops = s.ops();
    assert_eq!(ops.len(), 1);
    assert_eq!(
        ops[0].transform(),
        Affine::scale(2.0) * Affine::translate((3.0, 4.0))
    );
    match &ops[0] {
        DrawOp::Image {
            width_px,
            height_px,
            ..
        } => assert_eq!((*width_px, *height_px), (4, 2)),
        other => panic!("unexpected op {other:?}"),
    }
    assert_eq!(s.transform_sets(), 1);
}

#[test]
fn fill_and_stroke_counts() {
    let mut s = RecordingSurface::new();
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((1.0, 1.0));
    s.fill_path(&path, "#fff");
    s.stroke_path(&path, "#000", 0.05);
    s.fill_path(&path, "#fff");

    assert_eq!(s.fills(), 2);
    assert_eq!(s.strokes(), 1);
    assert_eq!(s.image_draws(), 0);
    assert_eq!(s.take_ops().len(), 3);
    assert!(s.ops().is_empty());
}

#[test]
fn handles_have_distinct_ids_and_compare_by_target() {
    let a = SurfaceHandle::new(RecordingSurface::new());
    let b = SurfaceHandle::new(RecordingSurface::new());
    let a2 = a.clone();

    assert_ne!(a.id(), b.id());
    assert!(a.same_target(&a2));
    assert!(!a.same_target(&b));
}

#[test]
fn weak_surface_dies_with_the_last_handle() {
    let rec = Rc::new(SurfaceCell::new(RecordingSurface::new()));
    let handle = SurfaceHandle::from_rc(rec.clone());
    let weak = handle.downgrade();
    assert_eq!(weak.id(), handle.id());
    assert!(weak.upgrade().is_some());

    drop(handle);
    assert!(weak.upgrade().is_some(), "caller still owns the surface");
    drop(rec);
    assert!(weak.upgrade().is_none());
}

#[test]
fn draw_ops_serialize_with_an_op_tag() {
    let op = DrawOp::Fill {
        paint: "#000".to_string(),
        bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
        transform: Affine::IDENTITY,
    };
    let v = serde_json::to_value(&op).unwrap();
    assert_eq!(v["op"], "fill");
    assert_eq!(v["paint"], "#000");
}

#[test]
fn rewrapping_a_cell_keeps_its_identity() {
    let cell = Rc::new(SurfaceCell::new(RecordingSurface::new()));
    let a = SurfaceHandle::from_rc(cell.clone());
    let b = SurfaceHandle::from_rc(cell.clone());
    let other = SurfaceHandle::from_rc(Rc::new(SurfaceCell::new(RecordingSurface::new())));

    assert_eq!(a.id(), cell.id());
    assert_eq!(a.id(), b.id());
    assert!(a.same_target(&b));
    assert!(!a.same_target(&other));
    assert_eq!(b.downgrade().id(), a.id());
}
