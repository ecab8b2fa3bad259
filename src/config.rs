use crate::Error;

/// Engine configuration.
///
/// Defaults match the interactive demo: 100 points moving at `0.02` units per
/// second inside a disk of radius `1.3`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// number of points generated on start
    pub point_count: usize,
    pub min_points: usize,
    pub max_points: usize,
    /// radius of the disk points are confined to
    pub playground: f64,
    /// the super triangle's inscribed circle has radius `playground * super_triangle_margin`
    pub super_triangle_margin: f64,
    pub point_speed: f64,
    /// pool slots reserved per point
    pub triangles_per_point: usize,
    /// seed for the motion model's generator
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            point_count: 100,
            min_points: 0,
            max_points: 5000,
            playground: 1.3,
            super_triangle_margin: 2.5,
            point_speed: 0.02,
            triangles_per_point: 3,
            seed: 0,
        }
    }
}

impl Config {
    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    pub fn with_point_range(mut self, min_points: usize, max_points: usize) -> Self {
        self.min_points = min_points;
        self.max_points = max_points;
        self
    }

    pub fn with_playground(mut self, playground: f64) -> Self {
        self.playground = playground;
        self
    }

    pub fn with_super_triangle_margin(mut self, margin: f64) -> Self {
        self.super_triangle_margin = margin;
        self
    }

    pub fn with_point_speed(mut self, point_speed: f64) -> Self {
        self.point_speed = point_speed;
        self
    }

    pub fn with_triangles_per_point(mut self, triangles_per_point: usize) -> Self {
        self.triangles_per_point = triangles_per_point;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.playground.is_finite() && self.playground > 0.) {
            return Err(Error::InvalidPlayground(self.playground));
        }
        // with a margin of 1 the playground would touch the super triangle's sides
        if !(self.super_triangle_margin.is_finite() && self.super_triangle_margin > 1.) {
            return Err(Error::InvalidSuperTriangleMargin(
                self.super_triangle_margin,
            ));
        }
        if self.min_points > self.max_points {
            return Err(Error::InvalidPointRange {
                min: self.min_points,
                max: self.max_points,
            });
        }
        if !(self.point_speed.is_finite() && self.point_speed >= 0.) {
            return Err(Error::InvalidSpeed(self.point_speed));
        }
        if self.triangles_per_point < 2 {
            return Err(Error::InvalidTrianglesPerPoint(self.triangles_per_point));
        }
        Ok(())
    }

    /// `point_count` clamped into `[min_points, max_points]`
    pub fn clamp_point_count(&self, point_count: usize) -> usize {
        point_count.clamp(self.min_points, self.max_points)
    }

    /// slots needed for `max_points`, plus one for the super triangle
    pub fn pool_capacity(&self) -> usize {
        self.max_points * self.triangles_per_point + 1
    }

    /// inradius of the super triangle
    pub fn super_triangle_inradius(&self) -> f64 {
        self.playground * self.super_triangle_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.pool_capacity(), 15001);
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            Config::default().with_playground(0.).validate(),
            Err(Error::InvalidPlayground(_))
        ));
        assert!(matches!(
            Config::default().with_playground(f64::NAN).validate(),
            Err(Error::InvalidPlayground(_))
        ));
        assert!(matches!(
            Config::default().with_super_triangle_margin(1.).validate(),
            Err(Error::InvalidSuperTriangleMargin(_))
        ));
        assert!(matches!(
            Config::default().with_point_range(10, 5).validate(),
            Err(Error::InvalidPointRange { min: 10, max: 5 })
        ));
        assert!(matches!(
            Config::default().with_point_speed(-1.).validate(),
            Err(Error::InvalidSpeed(_))
        ));
        assert!(matches!(
            Config::default().with_triangles_per_point(1).validate(),
            Err(Error::InvalidTrianglesPerPoint(1))
        ));
    }

    #[test]
    fn test_clamp_point_count() {
        let config = Config::default().with_point_range(3, 10);
        assert_eq!(config.clamp_point_count(0), 3);
        assert_eq!(config.clamp_point_count(7), 7);
        assert_eq!(config.clamp_point_count(100), 10);
    }
}
