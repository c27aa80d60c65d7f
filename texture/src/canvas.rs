//! キャンバスモジュール
//!
//! RGBAピクセルのラスタバッファと矩形描画、PNG出力を提供します。

use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use model::{Color, Rect};
use std::io::Cursor;
use std::path::Path;

/// キャンバス
///
/// 生成処理が専有するRGBA画像です。描画はキャンバス範囲で黙ってクリップされます。
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// 背景色で塗りつぶされた新しいキャンバスを作成
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, to_rgba(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// 指定座標のピクセル色を取得 (範囲外はNone)
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width() && y < self.height() {
            Some(Color::from_array(self.image.get_pixel(x, y).0))
        } else {
            None
        }
    }

    /// 矩形を塗りつぶす
    ///
    /// 矩形の角は両端を含みます。
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = rect.clip(self.width(), self.height()) else {
            return;
        };

        draw_filled_rect_mut(&mut self.image, to_imageproc_rect(&clipped), to_rgba(color));
    }

    /// 矩形の輪郭 (幅1ピクセル) を描画
    ///
    /// 内部は変更しません。キャンバス外にはみ出した辺は描画されません。
    pub fn outline_rect(&mut self, rect: Rect, color: Color) {
        let Rect { min, max } = rect;
        let edges = [
            Rect::from_corners((min.x, min.y), (max.x, min.y)), // 上
            Rect::from_corners((min.x, max.y), (max.x, max.y)), // 下
            Rect::from_corners((min.x, min.y), (min.x, max.y)), // 左
            Rect::from_corners((max.x, min.y), (max.x, max.y)), // 右
        ];

        for edge in edges {
            self.fill_rect(edge, color);
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// PNGとしてエンコード
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .context("PNGのエンコードに失敗しました")?;
        Ok(cursor.into_inner())
    }

    /// PNGファイルとして保存
    ///
    /// 拡張子に関係なくPNG形式で書き込みます。
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)
            .with_context(|| format!("画像の保存に失敗しました: {}", path.display()))
    }
}

fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba(color.to_array())
}

fn to_imageproc_rect(rect: &Rect) -> imageproc::rect::Rect {
    imageproc::rect::Rect::at(rect.min.x, rect.min.y).of_size(rect.width(), rect.height())
}
