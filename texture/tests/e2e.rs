//! 生成したPNGファイルを読み戻して検査するエンドツーエンドテスト

use model::{Color, Hsl, Rect};
use texture::validator::background_color;
use texture::{connected_regions, OutputValidator, Pattern, PixelValidator, TextureConfig};

fn config_in(dir: &tempfile::TempDir) -> TextureConfig {
    TextureConfig {
        output: dir.path().join("highlight-texture.png"),
        ..TextureConfig::default()
    }
}

fn read_back(config: &TextureConfig) -> image::RgbaImage {
    image::open(&config.output)
        .expect("PNGとして読み込めること")
        .to_rgba8()
}

// 純色相 (S=100%, L=50%) のRGBから色相角を求める
fn hue_degrees(color: Color) -> f64 {
    let (r, g, b) = (color.r as f64, color.g as f64, color.b as f64);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;
    let h = if max == r {
        ((g - b) / d).rem_euclid(6.0)
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    h * 60.0
}

#[test]
fn quadrants_file_matches_expected_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    Pattern::Quadrants.generate(&config).unwrap();

    let image = read_back(&config);
    let mut validator = PixelValidator::new().with_size(256, 256);
    validator.add_point(0, 0, Color::YELLOW);
    validator.add_point(255, 255, Color::YELLOW);
    validator.add_point(200, 10, Color::TRANSPARENT);
    validator.add_point(10, 200, Color::TRANSPARENT);
    validator.add_point(128, 128, Color::RED);

    let result = validator.validate(&image);
    assert!(result.success, "{:?}", result.error_message);
}

#[test]
fn quadrants_regions() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    Pattern::Quadrants.generate(&config).unwrap();

    let image = read_back(&config);

    // 黄色の方が透明より多いが、背景は透明として推定される
    let yellow = image.pixels().filter(|p| p.0 == Color::YELLOW.to_array()).count();
    let transparent = image.pixels().filter(|p| p.0 == Color::TRANSPARENT.to_array()).count();
    assert_eq!(yellow, 128 * 128 + 127 * 127);
    assert_eq!(transparent, 2 * 127 * 127);
    let background = background_color(&image).unwrap();
    assert_eq!(background, Color::TRANSPARENT);

    let regions = connected_regions(&image, background);
    assert_eq!(regions.len(), 3, "{:?}", regions);

    // 左上の塗りつぶし (中央の行と列は輪郭で上書きされる)
    assert_eq!(regions[0].color, Color::YELLOW);
    assert_eq!(regions[0].bounds, Rect::from_corners((0, 0), (127, 127)));
    assert_eq!(regions[0].pixel_count, 128 * 128);

    // 2つの輪郭は中央の1ピクセルで接する
    assert_eq!(regions[1].color, Color::RED);
    assert_eq!(regions[1].bounds, Rect::from_corners((0, 0), (255, 255)));
    assert_eq!(regions[1].pixel_count, 765);

    // 右下の塗りつぶし
    assert_eq!(regions[2].color, Color::YELLOW);
    assert_eq!(regions[2].bounds, Rect::from_corners((129, 129), (255, 255)));
    assert_eq!(regions[2].pixel_count, 127 * 127);
}

#[test]
fn quadrants_are_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    Pattern::Quadrants.generate(&config).unwrap();
    let first = read_back(&config);
    let first_bytes = std::fs::read(&config.output).unwrap();

    Pattern::Quadrants.generate(&config).unwrap();
    let second = read_back(&config);
    let second_bytes = std::fs::read(&config.output).unwrap();

    assert_eq!(first.as_raw(), second.as_raw());
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn hues_file_matches_reference_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    Pattern::Hues.generate(&config).unwrap();

    let image = read_back(&config);
    assert_eq!(image.dimensions(), (180, 180));

    let mut validator = PixelValidator::new().with_size(180, 180);
    for i in 0..180 {
        validator.add_point(i, 0, Hsl::new((2 * i) as f64, 100.0, 50.0).to_color());
    }
    let result = validator.validate(&image);
    assert!(result.success, "{:?}", result.diff_points);

    for (x, y, pixel) in image.enumerate_pixels() {
        if y >= 90 {
            assert!(pixel.0[3] <= 1, "({}, {}) = {:?}", x, y, pixel);
        }
    }
}

#[test]
fn hues_form_distinct_monotonic_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let canvas = Pattern::Hues.generate(&config).unwrap();

    let row: Vec<Color> = (0..180).map(|x| canvas.pixel(x, 0).unwrap()).collect();

    let mut distinct = row.clone();
    distinct.sort_by_key(|c| c.to_array());
    distinct.dedup();
    assert_eq!(distinct.len(), 180);

    let hues: Vec<f64> = row.iter().map(|c| hue_degrees(*c)).collect();
    assert_eq!(hues[0], 0.0);
    assert!(hues[179] > 356.0 && hues[179] < 360.0, "{}", hues[179]);
    for pair in hues.windows(2) {
        assert!(pair[0] < pair[1], "{:?}", pair);
    }
}

#[test]
fn hues_columns_are_separate_strips() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    Pattern::Hues.generate(&config).unwrap();

    let image = read_back(&config);
    assert_eq!(background_color(&image), Some(Color::NEAR_TRANSPARENT));
    let regions = connected_regions(&image, Color::NEAR_TRANSPARENT);
    assert_eq!(regions.len(), 180);

    for (i, region) in regions.iter().enumerate() {
        let x = i as i32;
        assert_eq!(region.bounds, Rect::from_corners((x, 0), (x, 89)));
        assert_eq!(region.pixel_count, 90);
    }
}

#[test]
fn config_file_changes_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("custom.png");
    let config_path = dir.path().join("texture.ron");
    std::fs::write(
        &config_path,
        format!(
            "(output: {:?}, hues: (size: 60, hue_step: 6.0))",
            output.display().to_string()
        ),
    )
    .unwrap();

    let config = TextureConfig::from_file(&config_path).unwrap();
    Pattern::Hues.generate(&config).unwrap();

    let image = image::open(&output).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (60, 60));
    assert_eq!(image.get_pixel(20, 0).0, Color::rgb(0, 255, 0).to_array());
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("texture.ron");

    std::fs::write(&config_path, "(quadrants: (size: 0))").unwrap();
    assert!(TextureConfig::from_file(&config_path).is_err());

    std::fs::write(&config_path, "(quadrants: ").unwrap();
    assert!(TextureConfig::from_file(&config_path).is_err());

    assert!(TextureConfig::from_file(dir.path().join("missing.ron")).is_err());
}

#[test]
fn unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = TextureConfig {
        output: dir.path().join("no-such-dir").join("out.png"),
        ..TextureConfig::default()
    };
    assert!(Pattern::Quadrants.generate(&config).is_err());
}
