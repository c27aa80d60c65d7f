/// 2Dピクセル座標
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 指定された方向に移動した新しい座標を返す
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// width x height の領域内にあるかどうか
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as i64) < width as i64 && (self.y as i64) < height as i64
    }

    /// 領域内にある上下左右の隣接座標
    pub fn neighbors_within(&self, width: u32, height: u32) -> Vec<Point> {
        let directions = [(0, -1), (1, 0), (0, 1), (-1, 0)]; // 上、右、下、左

        directions
            .iter()
            .map(|(dx, dy)| self.moved(*dx, *dy))
            .filter(|p| p.is_within(width, height))
            .collect()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// 軸平行な矩形
///
/// 2つの角を両端含む (inclusive) 形で保持します。
/// (0,0)-(128,128) は 129x129 ピクセルを覆います。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// 2つの角から矩形を作成 (角の順序は問わない)
    pub fn from_corners(a: impl Into<Point>, b: impl Into<Point>) -> Self {
        let (a, b) = (a.into(), b.into());
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x) as u32 + 1
    }

    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y) as u32 + 1
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// width x height の領域に収まる部分を返す
    pub fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        if width == 0 || height == 0 {
            return None;
        }
        let right = (width - 1).min(i32::MAX as u32) as i32;
        let bottom = (height - 1).min(i32::MAX as u32) as i32;

        let min = Point::new(self.min.x.max(0), self.min.y.max(0));
        let max = Point::new(self.max.x.min(right), self.max.y.min(bottom));
        if min.x > max.x || min.y > max.y {
            return None;
        }
        Some(Rect { min, max })
    }

    /// 別の座標を含むよう拡張した矩形
    pub fn expanded_to(&self, p: Point) -> Rect {
        Rect::from_corners(
            (self.min.x.min(p.x), self.min.y.min(p.y)),
            (self.max.x.max(p.x), self.max.y.max(p.y)),
        )
    }
}
