use super::{AtlasRect, AtlasTexture, CpuAtlas, ShelfPacker, atlas_edge, min_atlas_edge};

#[test]
fn edge_is_smallest_power_of_two_over_four_lines() {
    assert_eq!(atlas_edge(16, None), Some(64));
    assert_eq!(atlas_edge(17, None), Some(128));
    assert_eq!(atlas_edge(19, None), Some(128));
    assert_eq!(atlas_edge(32, None), Some(128));
    assert_eq!(atlas_edge(0, None), Some(1));
    assert_eq!(atlas_edge(-5, None), Some(1));
}

#[test]
fn requested_edge_rounds_up() {
    assert_eq!(atlas_edge(16, Some(64)), Some(64));
    assert_eq!(atlas_edge(16, Some(100)), Some(128));
    assert_eq!(atlas_edge(16, Some(0)), Some(1));
    assert_eq!(atlas_edge(16, Some(1 << 31)), Some(1 << 31));
}

#[test]
fn edge_past_u32_is_none() {
    assert_eq!(atlas_edge(16, Some(3_000_000_000)), None);
    assert_eq!(atlas_edge(16, Some(u32::MAX)), None);
    assert_eq!(atlas_edge(i32::MAX, None), None);
    assert_eq!(min_atlas_edge(16, Some(3_000_000_000)), 3_000_000_000);
    assert_eq!(min_atlas_edge(i32::MAX, None), u32::MAX);
}

#[test]
fn first_glyph_at_origin_then_gutter() {
    let mut p = ShelfPacker::new(64);
    assert_eq!(p.place(10, 12), Some(AtlasRect { x: 0, y: 0, w: 10, h: 12 }));
    assert_eq!(p.place(5, 7), Some(AtlasRect { x: 11, y: 0, w: 5, h: 7 }));
    assert_eq!(p.cursor(), (17, 0, 12));
}

#[test]
fn shelf_wraps_below_tallest_glyph() {
    let mut p = ShelfPacker::new(32);
    p.place(20, 9).unwrap();
    p.place(5, 4).unwrap();
    // 27 + 10 >= 32: new shelf at 0 + 9 + 1.
    assert_eq!(p.place(10, 3), Some(AtlasRect { x: 0, y: 10, w: 10, h: 3 }));
    assert_eq!(p.cursor(), (11, 10, 3));
}

#[test]
fn glyph_touching_right_edge_opens_new_shelf() {
    let mut p = ShelfPacker::new(16);
    p.place(4, 4).unwrap();
    // 5 + 11 == 16 counts as not fitting.
    assert_eq!(p.place(11, 4), Some(AtlasRect { x: 0, y: 5, w: 11, h: 4 }));
}

#[test]
fn empty_glyph_takes_no_space() {
    let mut p = ShelfPacker::new(64);
    p.place(8, 8).unwrap();
    let before = p.cursor();
    assert_eq!(p.place(0, 10), Some(AtlasRect { x: 0, y: 0, w: 0, h: 0 }));
    assert_eq!(p.place(6, 0), Some(AtlasRect { x: 0, y: 0, w: 0, h: 0 }));
    assert_eq!(p.cursor(), before);
}

#[test]
fn full_atlas_rejects_without_moving_cursor() {
    let mut p = ShelfPacker::new(16);
    assert!(p.place(14, 14).is_some());
    let before = p.cursor();
    assert_eq!(p.place(4, 4), None);
    assert_eq!(p.cursor(), before);
}

#[test]
fn oversized_glyph_never_fits() {
    let mut p = ShelfPacker::new(16);
    assert_eq!(p.place(16, 2), None);
    assert_eq!(p.place(2, 16), None);
    assert_eq!(p.cursor(), (0, 0, 0));
    // Smaller glyphs still place after a rejection.
    assert!(p.place(3, 3).is_some());
}

#[test]
fn packed_rects_are_disjoint_in_bounds_and_guttered() {
    let mut p = ShelfPacker::new(128);
    let mut placed = Vec::new();
    for i in 0..400u32 {
        let (w, h) = (3 + i % 9, 4 + (i * 7) % 11);
        if let Some(r) = p.place(w, h) {
            placed.push(r);
        }
    }
    assert!(placed.len() > 50);

    for (i, a) in placed.iter().enumerate() {
        assert!(a.right() < 128 && a.bottom() < 128, "out of bounds: {a:?}");
        for b in &placed[i + 1..] {
            assert!(!a.intersects(b), "overlap: {a:?} vs {b:?}");
            if a.y == b.y {
                let gap = if a.x < b.x { b.x - a.right() } else { a.x - b.right() };
                assert!(gap >= 1, "no horizontal gutter: {a:?} vs {b:?}");
            } else {
                let (upper, lower) = if a.y < b.y { (a, b) } else { (b, a) };
                assert!(lower.y > upper.bottom(), "no vertical gutter: {a:?} vs {b:?}");
            }
        }
    }
}

#[test]
fn intersects_ignores_empty_rects() {
    let a = AtlasRect { x: 0, y: 0, w: 4, h: 4 };
    let b = AtlasRect { x: 2, y: 2, w: 0, h: 0 };
    assert!(!a.intersects(&b));
    assert!(a.intersects(&AtlasRect { x: 3, y: 3, w: 2, h: 2 }));
    assert!(!a.intersects(&AtlasRect { x: 4, y: 0, w: 2, h: 2 }));
}

#[test]
fn cpu_atlas_starts_zeroed_and_writes_sub_rect() {
    let mut atlas = CpuAtlas::new(8);
    assert!(atlas.pixels().iter().all(|&p| p == 0));

    let rect = AtlasRect { x: 2, y: 3, w: 2, h: 2 };
    atlas.write(rect, &[1, 2, 3, 4]);
    assert_eq!(atlas.write_count(), 1);
    assert_eq!(atlas.pixel(2, 3), 1);
    assert_eq!(atlas.pixel(3, 3), 2);
    assert_eq!(atlas.pixel(2, 4), 3);
    assert_eq!(atlas.pixel(3, 4), 4);
    assert_eq!(atlas.pixel(4, 3), 0);
    assert_eq!(atlas.pixels().iter().filter(|&&p| p != 0).count(), 4);
}

#[test]
fn cpu_atlas_clips_to_bounds() {
    let mut atlas = CpuAtlas::new(4);
    atlas.write(AtlasRect { x: 3, y: 3, w: 2, h: 2 }, &[9, 9, 9, 9]);
    assert_eq!(atlas.pixel(3, 3), 9);
    assert_eq!(atlas.pixel(10, 10), 0);
}
