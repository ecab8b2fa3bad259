//! Per triangle shading for renderers.
//!
//! A renderer colors each triangle with one scalar, usually in `[0, 1]`,
//! and multiplies it with its own main color.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::shape::Point;

/// Seed of the `Random` technique, fixed so colors hold still between frames
const RANDOM_SHADE_SEED: u64 = 1000;

/// Floats per vertex in [`vertex_buffer`]: x, y and shade
pub const FLOATS_PER_VERTEX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Technique {
    /// mean distance of the vertices from the origin
    #[default]
    AverageFromCenter,
    /// mean height, mapped from `[-1, 1]` to `[0, 1]`
    AverageY,
    /// where the middle vertex sits between the lowest and highest one
    VerticalBalance,
    /// a hundred times the area
    Area,
    Random,
}

impl Technique {
    pub const ALL: [Technique; 5] = [
        Technique::AverageFromCenter,
        Technique::AverageY,
        Technique::VerticalBalance,
        Technique::Area,
        Technique::Random,
    ];

    /// the technique after this one, wrapping around
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|t| t == self).unwrap_or_default();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Technique::AverageFromCenter => "average distance from center",
            Technique::AverageY => "average vertical position",
            Technique::VerticalBalance => "vertical balance of triangle",
            Technique::Area => "area of triangle",
            Technique::Random => "random",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShadeOptions {
    pub technique: Technique,
    /// use `1 - shade`
    pub invert: bool,
}

/// Computes shades for a sequence of triangles
#[derive(Debug)]
pub struct Shader {
    options: ShadeOptions,
    rng: StdRng,
}

impl Shader {
    pub fn new(options: ShadeOptions) -> Self {
        Self {
            options,
            rng: StdRng::seed_from_u64(RANDOM_SHADE_SEED),
        }
    }

    pub fn shade(&mut self, triangle: &[Point; 3]) -> f32 {
        let [a, b, c] = *triangle;
        let shade = match self.options.technique {
            Technique::AverageFromCenter => (a.length() + b.length() + c.length()) / 3.,
            Technique::AverageY => (a.y + b.y + c.y) / 3. / 2. + 0.5,
            Technique::VerticalBalance => vertical_balance(a.y, b.y, c.y),
            Technique::Area => ((b - a).cross(c - a) / 2.).abs() * 100.,
            Technique::Random => self.rng.gen::<f64>(),
        } as f32;

        if self.options.invert {
            1. - shade
        } else {
            shade
        }
    }
}

/// `(highest - middle) / (highest - lowest)`, zero for a flat triangle
fn vertical_balance(a: f64, b: f64, c: f64) -> f64 {
    let highest = a.max(b).max(c);
    let lowest = a.min(b).min(c);
    let middle = a + b + c - highest - lowest;
    if highest == lowest {
        return 0.;
    }
    (highest - middle) / (highest - lowest)
}

/// Flatten triangles into `[x, y, shade]` per vertex, three vertices per triangle
pub fn vertex_buffer<'a>(
    triangles: impl IntoIterator<Item = &'a [Point; 3]>,
    options: ShadeOptions,
) -> Vec<f32> {
    let mut shader = Shader::new(options);
    let triangles = triangles.into_iter();
    let mut buffer = Vec::with_capacity(triangles.size_hint().0 * 3 * FLOATS_PER_VERTEX);
    for triangle in triangles {
        let shade = shader.shade(triangle);
        for vertex in triangle {
            buffer.extend_from_slice(&[vertex.x as f32, vertex.y as f32, shade]);
        }
    }
    buffer
}
