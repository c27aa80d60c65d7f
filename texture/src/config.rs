//! 生成パラメータ設定モジュール
//!
//! RONファイルから読み込める生成パラメータを定義します。
//! すべての項目は省略可能で、省略時は既定のハイライトテクスチャになります。

use anyhow::{bail, Context, Result};
use model::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 既定の出力ファイル名
pub const DEFAULT_OUTPUT: &str = "highlight-texture.png";

/// キャンバスの一辺の上限 (ピクセル)
pub const MAX_SIZE: u32 = 16384;

/// テクスチャ生成設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// 出力先パス
    pub output: PathBuf,
    /// 四分割パターンの設定
    pub quadrants: QuadrantConfig,
    /// 色相グラデーションの設定
    pub hues: HueConfig,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            quadrants: QuadrantConfig::default(),
            hues: HueConfig::default(),
        }
    }
}

/// 四分割パターンの設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadrantConfig {
    /// キャンバスの一辺 (ピクセル)
    pub size: u32,
    /// 背景色 (R,G,B,A)
    pub background: (u8, u8, u8, u8),
    /// 塗りつぶし色 (R,G,B,A)
    pub fill: (u8, u8, u8, u8),
    /// 輪郭色 (R,G,B,A)
    pub outline: (u8, u8, u8, u8),
}

impl Default for QuadrantConfig {
    fn default() -> Self {
        Self {
            size: 256,
            background: tuple(Color::TRANSPARENT),
            fill: tuple(Color::YELLOW),
            outline: tuple(Color::RED),
        }
    }
}

impl QuadrantConfig {
    pub fn background_color(&self) -> Color {
        color(self.background)
    }

    pub fn fill_color(&self) -> Color {
        color(self.fill)
    }

    pub fn outline_color(&self) -> Color {
        color(self.outline)
    }
}

/// 色相グラデーションの設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueConfig {
    /// キャンバスの一辺 N (列数)
    pub size: u32,
    /// 背景色 (R,G,B,A)
    pub background: (u8, u8, u8, u8),
    /// 1列あたりの色相の増分 (度)
    pub hue_step: f64,
    /// 彩度 (%)
    pub saturation: f64,
    /// 明度 (%)
    pub lightness: f64,
}

impl Default for HueConfig {
    fn default() -> Self {
        Self {
            size: 180,
            background: tuple(Color::NEAR_TRANSPARENT),
            hue_step: 2.0,
            saturation: 100.0,
            lightness: 50.0,
        }
    }
}

impl HueConfig {
    pub fn background_color(&self) -> Color {
        color(self.background)
    }

    /// 色が塗られる上半分の行数
    pub fn strip_height(&self) -> u32 {
        self.size / 2
    }
}

impl TextureConfig {
    /// 設定をRONファイルから読み込んで検証する
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 設定をRONファイルから読み込む (検証なし)
    ///
    /// 値を上書きしてから `validate` を呼ぶ場合に使います。
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("設定ファイルを読み込めません: {}", path.display()))?;

        ron::from_str(&data)
            .with_context(|| format!("設定ファイルの解析に失敗しました: {}", path.display()))
    }

    /// 設定値を検証
    pub fn validate(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            bail!("出力先パスが空です");
        }
        if self.quadrants.size == 0 {
            bail!("四分割パターンのサイズは1以上である必要があります");
        }
        if self.hues.size == 0 {
            bail!("色相グラデーションのサイズは1以上である必要があります");
        }
        for (name, size) in [
            ("四分割パターン", self.quadrants.size),
            ("色相グラデーション", self.hues.size),
        ] {
            if size > MAX_SIZE {
                bail!("{}のサイズは{}以下である必要があります: {}", name, MAX_SIZE, size);
            }
        }
        if !self.hues.hue_step.is_finite() {
            bail!("色相の増分が不正です: {}", self.hues.hue_step);
        }
        for (name, value) in [
            ("彩度", self.hues.saturation),
            ("明度", self.hues.lightness),
        ] {
            if !(0.0..=100.0).contains(&value) {
                bail!("{}は0から100の範囲で指定してください: {}", name, value);
            }
        }
        Ok(())
    }
}

fn tuple(c: Color) -> (u8, u8, u8, u8) {
    (c.r, c.g, c.b, c.a)
}

fn color((r, g, b, a): (u8, u8, u8, u8)) -> Color {
    Color::rgba(r, g, b, a)
}
