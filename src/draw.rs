use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point as PixelPoint;

use crate::shade::{ShadeOptions, Shader};
use crate::shape::Point;
use crate::triangulator::Mesh;
use crate::Error;

/// Maps the playground square onto the image, y pointing up
#[derive(Debug, Clone, Copy)]
struct Map {
    /// half side of the square shown
    extent: f64,
    width: f64,
    height: f64,
}

impl Map {
    fn map_point(&self, point: Point) -> PixelPoint<i32> {
        let x = (point.x + self.extent) / (2. * self.extent) * self.width;
        let y = self.height - (point.y + self.extent) / (2. * self.extent) * self.height;
        PixelPoint::new(x.round() as i32, y.round() as i32)
    }
}

/// Raster target for a mesh
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    /// scaled by each triangle's shade
    pub main_color: Rgb<u8>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            background: Rgb([245, 245, 245]),
            main_color: Rgb([64, 128, 255]),
        }
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Fill every triangle of `mesh`, showing the square `[-playground, playground]²`
    pub fn render(&self, mesh: &Mesh, options: ShadeOptions, playground: f64) -> RgbImage {
        let mut image = RgbImage::from_pixel(self.width, self.height, self.background);
        let map = Map {
            extent: playground,
            width: self.width as f64,
            height: self.height as f64,
        };

        let mut shader = Shader::new(options);
        let mut skipped = 0;
        for triangle in mesh.triangles.iter() {
            let shade = shader.shade(triangle);
            let polygon = triangle.map(|p| map.map_point(p));
            // imageproc panics on a polygon whose first and last points are equal
            if polygon[0] == polygon[2] {
                skipped += 1;
                continue;
            }
            draw_polygon_mut(&mut image, &polygon, self.color(shade));
        }

        if skipped > 0 {
            tracing::debug!("{skipped} triangles too small to draw");
        }
        image
    }

    /// Render and write to a png file
    pub fn save_png(
        &self,
        mesh: &Mesh,
        options: ShadeOptions,
        playground: f64,
        path: impl AsRef<Path>,
    ) -> Result<(), Error> {
        let image = self.render(mesh, options, playground);
        image.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        tracing::info!("saved {}", path.as_ref().display());
        Ok(())
    }

    fn color(&self, shade: f32) -> Rgb<u8> {
        let shade = shade.clamp(0., 1.);
        Rgb(self.main_color.0.map(|c| (c as f32 * shade).round() as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shade::Technique;

    #[test]
    fn test_map_flips_y() {
        let map = Map {
            extent: 1.,
            width: 100.,
            height: 100.,
        };
        assert_eq!(map.map_point(Point::new(-1., 1.)), PixelPoint::new(0, 0));
        assert_eq!(map.map_point(Point::new(0., 0.)), PixelPoint::new(50, 50));
        assert_eq!(map.map_point(Point::new(1., -1.)), PixelPoint::new(100, 100));
    }

    #[test]
    fn test_render_fills_triangle() {
        let mesh = Mesh {
            triangles: vec![[Point::new(0., 0.9), Point::new(-0.9, -0.9), Point::new(0.9, -0.9)]],
            super_triangle: Default::default(),
        };
        let canvas = Canvas::new(64, 64);
        let options = ShadeOptions {
            technique: Technique::AverageY,
            invert: false,
        };
        let image = canvas.render(&mesh, options, 1.);
        assert_eq!(image.dimensions(), (64, 64));
        assert_ne!(*image.get_pixel(32, 40), canvas.background);
        assert_eq!(*image.get_pixel(1, 1), canvas.background);
    }

    #[test]
    fn test_render_skips_tiny_triangle() {
        let mesh = Mesh {
            triangles: vec![[Point::new(0., 0.), Point::new(0.5, 0.), Point::new(0., 1e-9)]],
            super_triangle: Default::default(),
        };
        let canvas = Canvas::new(16, 16);
        // must not panic
        canvas.render(&mesh, ShadeOptions::default(), 1.);
    }

    #[test]
    fn test_color_is_clamped() {
        let canvas = Canvas::default();
        assert_eq!(canvas.color(10.), canvas.main_color);
        assert_eq!(canvas.color(-1.), Rgb([0, 0, 0]));
    }
}
