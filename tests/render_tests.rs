// tests/render_tests.rs

use std::path::Path;

use macroquad::prelude::*;
use pretty_assertions::assert_eq;
use tiled_atlas::{
    FlipFlags, MapDocument, Resources, TileInstance, TileLayer, TileVertex, Tileset, Triangles,
    TrianglesData,
};

fn load(dir: &Path, image_w: u16, image_h: u16, columns: u32, tile_count: u32, tile: (u32, u32)) -> Resources {
    Image::gen_image_color(image_w, image_h, WHITE)
        .export_png(dir.join("tiles.png").to_str().expect("path utf8"));
    let doc = MapDocument {
        width: 2,
        height: 2,
        tile_width: 16,
        tile_height: 16,
        tilesets: vec![Tileset {
            first_gid: 1,
            image: "tiles.png".into(),
            tile_count,
            columns,
            tile_width: tile.0,
            tile_height: tile.1,
            margin: 0,
            spacing: 0,
        }],
        layers: vec![],
    };
    Resources::load(&doc, dir).expect("resources should load")
}

fn positions(data: &TrianglesData) -> Vec<Vec2> {
    data.vertices().iter().map(|v| v.position).collect()
}

#[test]
fn unknown_gid_leaves_target_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let res = load(dir.path(), 32, 16, 2, 2, (16, 16));

    let mut out = TrianglesData::new();
    assert!(res.render(TileInstance(1), Rect::new(0.0, 0.0, 16.0, 16.0), WHITE, &mut out));
    let before = out.clone();

    assert!(!res.render(TileInstance(999_999), Rect::new(50.0, 50.0, 16.0, 16.0), RED, &mut out));
    assert!(!res.render(TileInstance(0), Rect::new(50.0, 50.0, 16.0, 16.0), RED, &mut out));
    assert_eq!(out, before);
}

#[test]
fn render_translates_to_target_centre_and_tints() {
    let dir = tempfile::tempdir().expect("tempdir");
    let res = load(dir.path(), 32, 16, 2, 2, (16, 16));

    let mut out = TrianglesData::new();
    let tint = Color::new(0.5, 0.25, 1.0, 0.75);
    res.render(TileInstance(2), Rect::new(100.0, 40.0, 16.0, 16.0), tint, &mut out);

    assert_eq!(
        positions(&out),
        vec![
            vec2(100.0, 40.0),
            vec2(116.0, 40.0),
            vec2(116.0, 56.0),
            vec2(100.0, 40.0),
            vec2(116.0, 56.0),
            vec2(100.0, 56.0),
        ]
    );
    assert!(out.vertices().iter().all(|v| v.color == tint));
    // second tile samples the right half of the image
    assert_eq!(out.vertices()[0].picture, vec2(16.0, 0.0));
}

#[test]
fn flips_compose_in_fixed_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    // wide tile so the diagonal flip is visible
    let res = load(dir.path(), 32, 16, 1, 1, (32, 16));
    let target = Rect::new(-16.0, -8.0, 32.0, 16.0); // centred on the origin

    let all = FlipFlags {
        diagonal: true,
        horizontal: true,
        vertical: true,
    };
    let hv = FlipFlags {
        diagonal: false,
        ..all
    };

    let mut a = TrianglesData::new();
    let mut b = TrianglesData::new();
    res.render(TileInstance::new(1, all), target, WHITE, &mut a);
    res.render(TileInstance::new(1, hv), target, WHITE, &mut b);

    assert_eq!(a.vertices()[0].position, vec2(-8.0, 16.0));
    assert_eq!(b.vertices()[0].position, vec2(16.0, 8.0));
    assert_ne!(positions(&a), positions(&b));
}

#[test]
fn rendering_never_mutates_the_atlas_template() {
    let dir = tempfile::tempdir().expect("tempdir");
    let res = load(dir.path(), 32, 16, 2, 2, (16, 16));
    let template = res.entry(1).expect("entry").base_geometry().clone();

    let flipped = TileInstance::new(
        1,
        FlipFlags {
            diagonal: true,
            horizontal: true,
            vertical: false,
        },
    );
    let mut out = TrianglesData::new();
    res.render(flipped, Rect::new(300.0, 300.0, 16.0, 16.0), BLUE, &mut out);

    assert_eq!(res.entry(1).expect("entry").base_geometry(), &template);

    let mut plain = TrianglesData::new();
    res.render(TileInstance(1), Rect::new(-8.0, -8.0, 16.0, 16.0), WHITE, &mut plain);
    assert_eq!(plain.vertices(), &template.vertices()[..]);
}

#[test]
fn concurrent_renders_of_one_tile_do_not_interfere() {
    let dir = tempfile::tempdir().expect("tempdir");
    let res = load(dir.path(), 32, 16, 2, 2, (16, 16));

    let outputs: Vec<TrianglesData> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let res = &res;
                s.spawn(move || {
                    let mut out = TrianglesData::new();
                    let x = i as f32 * 100.0;
                    res.render(TileInstance(1), Rect::new(x, 0.0, 16.0, 16.0), WHITE, &mut out);
                    out
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("render thread")).collect()
    });

    for (i, out) in outputs.iter().enumerate() {
        assert_eq!(out.vertices()[0].position, vec2(i as f32 * 100.0, 0.0));
    }
}

/// Records what was written, to check the trait seam is honoured.
#[derive(Default)]
struct Recorder {
    updates: Vec<Vec<TileVertex>>,
}

impl Triangles for Recorder {
    fn update(&mut self, vertices: &[TileVertex]) {
        self.updates.push(vertices.to_vec());
    }
}

#[test]
fn render_writes_through_any_triangles_target() {
    let dir = tempfile::tempdir().expect("tempdir");
    let res = load(dir.path(), 32, 16, 2, 2, (16, 16));

    let mut rec = Recorder::default();
    res.render(TileInstance(1), Rect::new(0.0, 0.0, 16.0, 16.0), WHITE, &mut rec);
    res.render(TileInstance(7), Rect::new(0.0, 0.0, 16.0, 16.0), WHITE, &mut rec);
    assert_eq!(rec.updates.len(), 1);
    assert_eq!(rec.updates[0].len(), 6);
}

#[test]
fn batching_places_layer_rows_y_up() {
    let dir = tempfile::tempdir().expect("tempdir");
    let res = load(dir.path(), 32, 16, 2, 2, (16, 16));
    let layer = TileLayer {
        name: "ground".into(),
        width: 2,
        height: 2,
        data: [1, 0, 0, 2].map(TileInstance).to_vec(),
    };

    let batches = res.batch_tile_layer(&layer, vec2(16.0, 16.0), WHITE);
    assert_eq!(batches.len(), 1);
    let data = batches.values().next().expect("one batch");
    assert_eq!(data.len(), 12);
    // top-left cell lands on the upper row, bottom-right on the lower row
    assert_eq!(data.vertices()[0].position, vec2(0.0, 16.0));
    assert_eq!(data.vertices()[6].position, vec2(16.0, 0.0));
}

#[test]
fn full_screen_layer_batches_into_complete_meshes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let res = load(dir.path(), 32, 16, 2, 2, (16, 16));
    let layer = TileLayer {
        name: "ground".into(),
        width: 200,
        height: 60,
        data: vec![TileInstance(1); 200 * 60],
    };

    let batches = res.batch_tile_layer(&layer, vec2(16.0, 16.0), WHITE);
    let data = batches.values().next().expect("one batch");
    assert_eq!(data.len(), 72_000);

    let meshes = data.to_meshes(vec2(32.0, 16.0), None);
    assert_eq!(meshes.len(), 2);
    for mesh in &meshes {
        assert_eq!(mesh.indices.len(), mesh.vertices.len());
    }
    let total: usize = meshes.iter().map(|m| m.vertices.len()).sum();
    assert_eq!(total, 72_000);
}
