use std::fmt;
use std::str::FromStr;

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// RGBA色 (各チャンネル8ビット)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// 塗りつぶし色 (黄)
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    /// 輪郭色 (赤)
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// 完全透明の背景
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// ほぼ透明の背景 (alpha=1)
    pub const NEAR_TRANSPARENT: Color = Color::rgba(0, 0, 0, 1);

    /// 不透明な色を作成
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// アルファを除いたRGBタプル
    pub const fn rgb_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// HSL色
///
/// 色相は度数、彩度と明度はパーセントで保持します。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// 不透明なRGB色に変換
    ///
    /// 中間値m1/m2による古典的な変換式をf64で計算し、各チャンネルを
    /// `floor(v * 255 + 0.5)` で8ビットに丸めます。同じ入力には常に
    /// 同じ整数値が返ります。
    pub fn to_color(&self) -> Color {
        let h = self.hue / 360.0;
        let l = self.lightness / 100.0;
        let s = self.saturation / 100.0;

        if s == 0.0 {
            let v = to_channel(l);
            return Color::rgb(v, v, v);
        }

        let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let m1 = 2.0 * l - m2;

        Color::rgb(
            to_channel(hue_component(m1, m2, h + ONE_THIRD)),
            to_channel(hue_component(m1, m2, h)),
            to_channel(hue_component(m1, m2, h - ONE_THIRD)),
        )
    }
}

// 色相セクタごとの区分線形値
fn hue_component(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0 + 0.5) as u8
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// HSL文字列の解析エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHslError {
    input: String,
}

impl fmt::Display for ParseHslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HSL文字列として解析できません: {:?}", self.input)
    }
}

impl std::error::Error for ParseHslError {}

impl FromStr for Hsl {
    type Err = ParseHslError;

    /// `hsl(<色相>, <彩度>%, <明度>%)` 形式を解析
    ///
    /// 大文字小文字は区別しません。括弧の内側以外に空白は置けず、
    /// 数値と `%` の間にも空白は置けません。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseHslError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let body = lower
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(err());
        }

        let hue = parse_number(parts[0]).ok_or_else(err)?;
        let saturation = parts[1]
            .strip_suffix('%')
            .and_then(parse_number)
            .ok_or_else(err)?;
        let lightness = parts[2]
            .strip_suffix('%')
            .and_then(parse_number)
            .ok_or_else(err)?;

        Ok(Self::new(hue, saturation, lightness))
    }
}

// 符号なしの10進数 (`12`, `12.`, `12.5`) のみ受け付ける
fn parse_number(s: &str) -> Option<f64> {
    let mut chars = s.chars();
    if !chars.next()?.is_ascii_digit() {
        return None;
    }
    if s.chars().filter(|c| *c == '.').count() > 1 {
        return None;
    }
    if !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    s.parse().ok()
}
