use crate::shape::Point;

/// Relative threshold under which three points count as collinear
pub const COLLINEAR_EPSILON: f64 = 1e-12;

#[derive(Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Clock Wise
    ///
    ///  a     b
    ///             c
    ///
    CW,
    /// Counter Clock Wise
    ///             c
    ///  a     b
    CCW,
    /// Collinear
    ///  a     b    c
    Collinear,
}

impl Orientation {
    pub fn is_cw(&self) -> bool {
        matches!(self, Self::CW)
    }

    pub fn is_collinear(&self) -> bool {
        matches!(self, Self::Collinear)
    }
}

pub fn orient_2d(a: Point, b: Point, c: Point) -> Orientation {
    let detleft = (a.x - c.x) * (b.y - c.y);
    let detright = (a.y - c.y) * (b.x - c.x);
    let val = detleft - detright;

    if val == 0. {
        Orientation::Collinear
    } else if val > 0. {
        Orientation::CCW
    } else {
        Orientation::CW
    }
}

/// Whether `a`, `b`, `c` are too close to collinear for a usable circumcircle.
///
/// Compares `|ab x ac|` against `|ab| * |ac|`, i.e. the sine of the angle at
/// `a`, so the test does not depend on the triangle's scale. Coincident
/// points are always degenerate.
pub fn is_degenerate(a: Point, b: Point, c: Point) -> bool {
    let ab = b - a;
    let ac = c - a;
    let scale = (ab.length_squared() * ac.length_squared()).sqrt();
    if scale == 0. || !scale.is_finite() {
        return true;
    }

    ab.cross(ac).abs() <= COLLINEAR_EPSILON * scale
}
