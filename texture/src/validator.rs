//! 出力検証モジュール
//!
//! 生成したテクスチャを検査するための機能を提供します。

use image::RgbaImage;
use model::{Color, Point, Rect};
use std::collections::{HashMap, VecDeque};

/// 検証結果
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// 検証成功フラグ
    pub success: bool,
    /// エラーメッセージ（失敗時）
    pub error_message: Option<String>,
    /// 差異点の座標リスト（ピクセル座標）
    pub diff_points: Vec<(u32, u32)>,
}

impl ValidationResult {
    /// 成功結果を作成
    pub fn success() -> Self {
        Self {
            success: true,
            error_message: None,
            diff_points: Vec::new(),
        }
    }

    /// 失敗結果を作成
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            error_message: Some(message.to_string()),
            diff_points: Vec::new(),
        }
    }

    /// 差異点を含む失敗結果を作成
    pub fn with_diff_points(message: &str, diff_points: Vec<(u32, u32)>) -> Self {
        Self {
            success: false,
            error_message: Some(message.to_string()),
            diff_points,
        }
    }
}

/// 出力検証器
pub trait OutputValidator {
    /// 画像を検証する
    fn validate(&self, image: &RgbaImage) -> ValidationResult;
}

/// ピクセル値検証器
///
/// 特定のピクセル位置での値を検証する検証器です。
pub struct PixelValidator {
    /// 期待されるサイズ
    pub expected_size: Option<(u32, u32)>,
    /// 検証するピクセルの座標リスト
    pub points: Vec<(u32, u32)>,
    /// 期待される色値
    pub expected_colors: Vec<Color>,
    /// 許容誤差
    pub tolerance: u8,
}

impl Default for PixelValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelValidator {
    /// 新しいピクセル検証器を作成 (許容誤差0)
    pub fn new() -> Self {
        Self {
            expected_size: None,
            points: Vec::new(),
            expected_colors: Vec::new(),
            tolerance: 0,
        }
    }

    /// 画像サイズを検証対象に加える
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.expected_size = Some((width, height));
        self
    }

    /// 検証ポイントを追加
    pub fn add_point(&mut self, x: u32, y: u32, color: Color) {
        self.points.push((x, y));
        self.expected_colors.push(color);
    }

    /// 許容誤差を設定
    pub fn set_tolerance(&mut self, tolerance: u8) {
        self.tolerance = tolerance;
    }
}

impl OutputValidator for PixelValidator {
    fn validate(&self, image: &RgbaImage) -> ValidationResult {
        let (width, height) = image.dimensions();

        if let Some((w, h)) = self.expected_size {
            if (w, h) != (width, height) {
                return ValidationResult::failure(&format!(
                    "画像サイズ ({}x{}) が期待値 ({}x{}) と一致しません",
                    width, height, w, h
                ));
            }
        }

        let mut diff_points = Vec::new();

        for (&(x, y), expected) in self.points.iter().zip(&self.expected_colors) {
            if x >= width || y >= height {
                return ValidationResult::failure(&format!(
                    "検証ポイント ({}, {}) が画像範囲外です ({}x{})",
                    x, y, width, height
                ));
            }

            let expected = expected.to_array();
            let actual = image.get_pixel(x, y).0;

            // 許容誤差より大きい差異があれば失敗
            let differs = expected
                .iter()
                .zip(actual.iter())
                .any(|(e, a)| e.abs_diff(*a) > self.tolerance);
            if differs {
                diff_points.push((x, y));
            }
        }

        if diff_points.is_empty() {
            ValidationResult::success()
        } else {
            ValidationResult::with_diff_points(
                &format!("{} ピクセルで色の不一致があります", diff_points.len()),
                diff_points,
            )
        }
    }
}

/// 同色の連結領域
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub color: Color,
    pub pixel_count: usize,
    /// 外接矩形 (両端含む)
    pub bounds: Rect,
}

/// 背景以外の同色ピクセルを4近傍で連結した領域を列挙
///
/// 領域は走査順 (行優先) で最初に見つかった位置の順に返されます。
pub fn connected_regions(image: &RgbaImage, background: Color) -> Vec<Region> {
    let (width, height) = image.dimensions();
    let background = background.to_array();
    let mut visited = vec![false; width as usize * height as usize];
    let index = |p: Point| p.y as usize * width as usize + p.x as usize;
    let color_at = |p: Point| image.get_pixel(p.x as u32, p.y as u32).0;

    let mut regions = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..height {
        for x in 0..width {
            let start = Point::new(x as i32, y as i32);
            let color = color_at(start);
            if visited[index(start)] || color == background {
                continue;
            }

            visited[index(start)] = true;
            queue.push_back(start);
            let mut bounds = Rect::from_corners(start, start);
            let mut pixel_count = 0;

            while let Some(p) = queue.pop_front() {
                pixel_count += 1;
                bounds = bounds.expanded_to(p);

                for n in p.neighbors_within(width, height) {
                    if !visited[index(n)] && color_at(n) == color {
                        visited[index(n)] = true;
                        queue.push_back(n);
                    }
                }
            }

            regions.push(Region {
                color: Color::from_array(color),
                pixel_count,
                bounds,
            });
        }
    }

    regions
}

/// 背景色を推定
///
/// 最もアルファ値の小さい色を背景とみなします。同じアルファ値の色が
/// 複数ある場合は使用ピクセル数の多い色、さらに同数なら値の小さい色を選びます。
pub fn background_color(image: &RgbaImage) -> Option<Color> {
    let mut counts: HashMap<[u8; 4], usize> = HashMap::new();
    for pixel in image.pixels() {
        *counts.entry(pixel.0).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .min_by(|a, b| {
            a.0[3]
                .cmp(&b.0[3])
                .then(b.1.cmp(&a.1))
                .then(a.0.cmp(&b.0))
        })
        .map(|(color, _)| Color::from_array(color))
}
