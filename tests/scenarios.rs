use std::fs;

use icon_forge::geometry::Shape;
use icon_forge::{
    BoundsF, Drawable, FsAssetSink, IconGenerator, MemoryAssetSink, ProfileTemplate, PurityRule,
    ShapePrimitive, VariantSpec,
};

/// Routes library logs through the test harness, shown with `--nocapture`.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

/// Smallest box holding every opaque pixel, as `(x0, y0, x1, y1)` exclusive.
fn opaque_extent(image: &image::RgbaImage) -> Option<(u32, u32, u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] > 0)
        .fold(None, |acc, (x, y, _)| {
            Some(match acc {
                None => (x, y, x + 1, y + 1),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
            })
        })
}

fn fill_bounds(spec: &VariantSpec) -> Vec<Option<BoundsF>> {
    spec.layers()
        .iter()
        .map(|layer| match layer.primitive.drawable().unwrap() {
            Drawable::Fill(shape) => Some(Shape::bounds(shape.as_ref())),
            Drawable::Text { .. } => None,
        })
        .collect()
}

#[test]
fn scenario_a_color_background_fills_padded_square() {
    init_logging();
    let spec = ProfileTemplate::color().instantiate(192).unwrap();
    assert_eq!(spec.padding(), 36.0);

    let background = &spec.layers()[0];
    assert!(background.is_background());
    let ShapePrimitive::RoundedRect { bounds, .. } = &background.primitive else {
        panic!("background is not a rounded rect");
    };
    assert_eq!(*bounds, BoundsF::new(36.0, 36.0, 156.0, 156.0));

    let asset = IconGenerator::with_defaults().generate(&spec).unwrap();
    assert_eq!((asset.width, asset.height), (192, 192));

    let image = decode(&asset.encoded_bytes);
    assert_eq!(image.dimensions(), (192, 192));
    assert_eq!(opaque_extent(&image), Some((36, 36, 156, 156)));
    // Rounded corner stays clear, edge midpoints are brand blue.
    assert_eq!(image.get_pixel(36, 36).0[3], 0);
    assert_eq!(image.get_pixel(36, 96).0, [0, 120, 212, 255]);
    assert_eq!(image.get_pixel(96, 150).0, [0, 120, 212, 255]);
}

#[test]
fn scenario_b_outline_is_pure_white_on_transparent() {
    init_logging();
    let spec = ProfileTemplate::outline().instantiate(32).unwrap();
    let asset = IconGenerator::with_defaults().generate(&spec).unwrap();
    let image = decode(&asset.encoded_bytes);

    assert!(PurityRule::pure_white().check(&image).is_ok());
    let opaque: Vec<_> = image.pixels().filter(|p| p.0[3] > 0).collect();
    assert!(!opaque.is_empty());
    assert!(opaque.iter().all(|p| p.0 == [255, 255, 255, 255]));

    // Sparkle center and bubble are both white; the corners stay clear.
    assert_eq!(image.get_pixel(16, 15).0, [255, 255, 255, 255]);
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn scenario_c_three_spoke_star_is_a_geometry_error() {
    init_logging();
    let mut template = ProfileTemplate::color();
    for layer in &mut template.layers {
        if let ShapePrimitive::Star { spoke_count, .. } = &mut layer.primitive {
            *spoke_count = 3;
        }
    }

    let err = template.instantiate(192).unwrap_err();
    assert!(err.is_geometry());
    assert!(err.to_string().starts_with("geometry error:"));

    let mut sink = MemoryAssetSink::new();
    let outcomes = IconGenerator::new(vec![template]).generate_all(&mut sink);
    assert!(outcomes[0].result.as_ref().unwrap_err().is_geometry());
    assert!(sink.is_empty());
}

#[test]
fn scenario_d_prior_asset_is_backed_up() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let color = dir.path().join("color.png");
    fs::write(&color, b"previous color icon").unwrap();

    let mut sink = FsAssetSink::new(dir.path());
    let outcomes = IconGenerator::with_defaults().generate_all(&mut sink);
    assert!(outcomes.iter().all(|o| o.is_ok()));

    let persisted = outcomes[0].result.as_ref().unwrap();
    let record = persisted.backup.as_ref().unwrap();
    assert_eq!(record.original, color);
    assert_eq!(record.backup, dir.path().join("color.png.backup"));
    assert_eq!(fs::read(&record.backup).unwrap(), b"previous color icon");

    let expected = IconGenerator::with_defaults()
        .generate(&ProfileTemplate::color().default_spec().unwrap())
        .unwrap();
    assert_eq!(fs::read(&color).unwrap(), expected.encoded_bytes);

    // Outline had no prior file, so nothing was backed up.
    let outline = outcomes[1].result.as_ref().unwrap();
    assert!(outline.backup.is_none());
    assert!(!dir.path().join("outline.png.backup").exists());
}

#[test]
fn generation_is_byte_identical_across_runs() {
    init_logging();
    for template in ProfileTemplate::defaults() {
        let spec = template.default_spec().unwrap();
        let a = IconGenerator::with_defaults().generate(&spec).unwrap();
        let b = IconGenerator::with_defaults().generate(&spec).unwrap();
        assert_eq!(a.encoded_bytes, b.encoded_bytes, "{} differs", template.name);
    }
}

#[test]
fn every_output_matches_its_declared_size() {
    init_logging();
    let cases = [
        (ProfileTemplate::color(), 192),
        (ProfileTemplate::color(), 96),
        (ProfileTemplate::outline(), 32),
        (ProfileTemplate::outline(), 64),
    ];
    let mut generator = IconGenerator::with_defaults();
    for (template, size) in cases {
        let spec = template.instantiate(size).unwrap();
        let asset = generator.generate(&spec).unwrap();
        assert_eq!((asset.width, asset.height), (size, size));
        assert_eq!(decode(&asset.encoded_bytes).dimensions(), (size, size));
    }
}

#[test]
fn every_output_has_binary_alpha() {
    init_logging();
    let mut generator = IconGenerator::with_defaults();
    for template in ProfileTemplate::defaults() {
        let asset = generator.generate(&template.default_spec().unwrap()).unwrap();
        let image = decode(&asset.encoded_bytes);
        assert!(image.pixels().all(|p| p.0[3] == 0 || p.0[3] == 255));
    }
}

#[test]
fn content_stays_inside_padding() {
    init_logging();
    for template in ProfileTemplate::defaults() {
        let spec = template.default_spec().unwrap();
        let (size, padding) = (spec.size() as f32, spec.padding());
        for (layer, bounds) in spec.layers().iter().zip(fill_bounds(&spec)) {
            let Some(bounds) = bounds else { continue };
            if layer.is_background() {
                continue;
            }
            assert!(
                bounds.lies_within(padding, size - padding, 1e-3),
                "{} {} at {bounds:?}",
                template.name,
                layer.primitive.kind()
            );
        }
    }

    let outline = ProfileTemplate::outline().default_spec().unwrap();
    let asset = IconGenerator::with_defaults().generate(&outline).unwrap();
    let (x0, y0, x1, y1) = opaque_extent(&decode(&asset.encoded_bytes)).unwrap();
    assert!(x0 >= 2 && y0 >= 2 && x1 <= 30 && y1 <= 30);
}

#[test]
fn color_profile_scales_proportionally() {
    init_logging();
    let small = ProfileTemplate::color().instantiate(192).unwrap();
    let large = ProfileTemplate::color().instantiate(384).unwrap();

    let tolerance = 1.0 / 192.0;
    for (a, b) in fill_bounds(&small).into_iter().zip(fill_bounds(&large)) {
        let (Some(a), Some(b)) = (a, b) else { continue };
        let a = a.scaled(1.0 / 192.0);
        let b = b.scaled(1.0 / 384.0);
        for (u, v) in [
            (a.min_x, b.min_x),
            (a.min_y, b.min_y),
            (a.max_x, b.max_x),
            (a.max_y, b.max_y),
        ] {
            assert!((u - v).abs() <= tolerance, "{u} vs {v}");
        }
    }

    let mut generator = IconGenerator::with_defaults();
    let small_px = decode(&generator.generate(&small).unwrap().encoded_bytes);
    let large_px = decode(&generator.generate(&large).unwrap().encoded_bytes);
    assert_eq!(opaque_extent(&small_px), Some((36, 36, 156, 156)));
    assert_eq!(opaque_extent(&large_px), Some((72, 72, 312, 312)));
}

#[test]
fn caller_supplied_profile_set_generates() {
    init_logging();
    let json = r##"{
        "profiles": [
            {
                "name": "mono-dot",
                "fileName": "icons/mono-dot.png",
                "defaultSize": 40,
                "paddingRatio": 0.1,
                "palette": { "brand-white": "#FFFFFF", "transparent": { "hex": "#000000", "alpha": 0 } },
                "purity": "#FFFFFF",
                "layers": [
                    { "kind": "circle", "center": { "x": 0.5, "y": 0.5 }, "radius": 0.35, "color": "brand-white" },
                    { "kind": "line", "from": { "x": 0.3, "y": 0.5 }, "to": { "x": 0.7, "y": 0.5 },
                      "width": 0.1, "color": "transparent" }
                ]
            }
        ]
    }"##;
    let set = icon_forge::ProfileSet::from_json(json).unwrap();

    let mut sink = MemoryAssetSink::new();
    let outcomes = IconGenerator::new(set.profiles).generate_all(&mut sink);
    assert!(outcomes[0].is_ok(), "{:?}", outcomes[0].result);

    let image = decode(sink.get("icons/mono-dot.png").unwrap());
    assert_eq!(image.get_pixel(20, 20).0, [0, 0, 0, 0]);
    assert_eq!(image.get_pixel(20, 12).0, [255, 255, 255, 255]);
}
