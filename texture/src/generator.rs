//! テクスチャ生成モジュール
//!
//! ハイライトトーラス用のテクスチャパターンを生成します。

use anyhow::Result;
use log::{debug, info};
use model::{Hsl, Rect};
use std::fmt;
use std::path::Path;

use crate::config::{HueConfig, QuadrantConfig, TextureConfig};
use crate::Canvas;

/// テクスチャジェネレーター
///
/// 固定パラメータからキャンバスを決定的に生成するユーティリティ
pub struct TextureGenerator;

impl TextureGenerator {
    /// 四分割パターンのテクスチャを生成
    ///
    /// 左上と右下を塗りつぶし、右上と左下は輪郭のみ描画します。
    /// 矩形の角は両端を含むため、中央の行と列は両側の矩形で共有されます。
    /// サイズは `MAX_SIZE` 以下であること (`TextureConfig::validate` で検証)。
    pub fn quadrants(config: &QuadrantConfig) -> Canvas {
        let size = config.size as i32;
        let half = size / 2;
        let fill = config.fill_color();
        let outline = config.outline_color();

        let mut canvas = Canvas::new(config.size, config.size, config.background_color());

        canvas.fill_rect(Rect::from_corners((0, 0), (half, half)), fill);
        canvas.fill_rect(Rect::from_corners((half, half), (size, size)), fill);
        canvas.outline_rect(Rect::from_corners((half, 0), (size, half)), outline);
        canvas.outline_rect(Rect::from_corners((0, half), (half, size)), outline);

        canvas
    }

    /// 色相グラデーションのテクスチャを生成
    ///
    /// 上半分に1ピクセル幅の縦帯を列ごとに描画し、下半分は背景のまま残します。
    pub fn hue_gradient(config: &HueConfig) -> Canvas {
        let mut canvas = Canvas::new(config.size, config.size, config.background_color());
        let strip_height = config.strip_height() as i32;

        for i in 0..config.size {
            let hsl = column_hsl(config, i);
            let color = hsl.to_color();
            debug!("{} {} {:?}", i, hsl, color.rgb_tuple());

            // N=1 の場合、上半分は0行
            if strip_height > 0 {
                let x = i as i32;
                canvas.fill_rect(Rect::from_corners((x, 0), (x, strip_height - 1)), color);
            }
        }

        canvas
    }
}

/// 指定列のHSL色 (色相 = 列番号 * 増分)
pub fn column_hsl(config: &HueConfig, column: u32) -> Hsl {
    Hsl::new(
        column as f64 * config.hue_step,
        config.saturation,
        config.lightness,
    )
}

/// テクスチャパターン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// 四分割パターン (256x256)
    Quadrants,
    /// 色相グラデーション (180x180)
    Hues,
}

impl Pattern {
    /// キャンバスを生成
    pub fn render(&self, config: &TextureConfig) -> Canvas {
        match self {
            Pattern::Quadrants => TextureGenerator::quadrants(&config.quadrants),
            Pattern::Hues => TextureGenerator::hue_gradient(&config.hues),
        }
    }

    /// 生成して設定の出力先へPNGとして書き込む
    pub fn generate(&self, config: &TextureConfig) -> Result<Canvas> {
        self.generate_to(config, &config.output)
    }

    /// 生成して指定パスへPNGとして書き込む
    pub fn generate_to<P: AsRef<Path>>(&self, config: &TextureConfig, path: P) -> Result<Canvas> {
        let path = path.as_ref();
        let canvas = self.render(config);
        canvas.save_png(path)?;

        let (width, height) = canvas.dimensions();
        info!("{}テクスチャを生成しました: {} ({}x{})", self, path.display(), width, height);
        Ok(canvas)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Quadrants => write!(f, "四分割"),
            Pattern::Hues => write!(f, "色相グラデーション"),
        }
    }
}
