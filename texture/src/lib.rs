//! ハイライトテクスチャ生成ライブラリ
//!
//! 3Dビューのハイライトトーラスを装飾する小さなPNGテクスチャを生成します。
//! 生成は決定的で、同じ設定からは常に同じピクセルデータが得られます。

pub mod config;
pub mod validator;

mod canvas;
mod generator;

pub use canvas::Canvas;
pub use config::{HueConfig, QuadrantConfig, TextureConfig, DEFAULT_OUTPUT, MAX_SIZE};
pub use generator::{column_hsl, Pattern, TextureGenerator};
pub use validator::{connected_regions, OutputValidator, PixelValidator, Region, ValidationResult};
