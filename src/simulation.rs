use std::time::{Duration, Instant};

use crate::points::Particles;
use crate::shape::Point;
use crate::triangulator::{Algorithm, Mesh, RebuildStats, Triangulator};
use crate::{Config, Error};

/// Moving points plus their triangulation, advanced once per frame.
#[derive(Debug)]
pub struct Simulation {
    config: Config,
    point_count: usize,
    particles: Particles,
    triangulator: Triangulator,
    /// positions of the last rebuild, reused between frames
    positions: Vec<Point>,
}

impl Simulation {
    /// Generate the configured number of points and triangulate them once
    pub fn new(config: Config) -> Result<Self, Error> {
        let triangulator = Triangulator::new(&config)?;
        let point_count = config.clamp_point_count(config.point_count);
        let mut particles = Particles::new(config.playground, config.seed);
        particles.generate(point_count, config.point_speed);

        let mut simulation = Self {
            positions: Vec::with_capacity(config.max_points),
            config,
            point_count,
            particles,
            triangulator,
        };
        simulation.rebuild()?;
        Ok(simulation)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.triangulator.algorithm()
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.triangulator.set_algorithm(algorithm);
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn triangulator(&self) -> &Triangulator {
        &self.triangulator
    }

    pub fn mesh(&self) -> Mesh {
        self.triangulator.mesh()
    }

    /// Move every point then rebuild the mesh
    pub fn update(&mut self, delta_time: f64) -> Result<RebuildStats, Error> {
        self.particles.advance(delta_time);
        self.rebuild()
    }

    /// Replace all points with new random ones, the mesh follows on next update
    pub fn regenerate_points(&mut self) {
        self.particles.generate(self.point_count, self.config.point_speed);
        tracing::info!("generated {} new points", self.point_count);
    }

    /// Set the point count, clamped to the configured range, and regenerate points
    pub fn set_point_count(&mut self, point_count: usize) -> usize {
        let clamped = self.config.clamp_point_count(point_count);
        if clamped != point_count {
            tracing::info!(
                requested = point_count,
                "point count clamped to {clamped}"
            );
        }
        self.point_count = clamped;
        self.regenerate_points();
        clamped
    }

    /// Add (or remove, for negative `delta`) points
    pub fn adjust_point_count(&mut self, delta: isize) -> usize {
        let count = self.point_count.saturating_add_signed(delta);
        self.set_point_count(count)
    }

    fn rebuild(&mut self) -> Result<RebuildStats, Error> {
        self.particles.positions_into(&mut self.positions);
        self.triangulator.triangulate(&self.positions)
    }
}

/// Running average of frame durations, each frame weighs as much as all the previous ones
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    last: Instant,
    average: Option<Duration>,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            average: None,
        }
    }

    /// Record a frame ending now, returns the smoothed delta time in seconds
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        self.record(elapsed)
    }

    fn record(&mut self, elapsed: Duration) -> f64 {
        let average = match self.average {
            None => elapsed,
            Some(average) => (average + elapsed) / 2,
        };
        self.average = Some(average);
        average.as_secs_f64()
    }

    pub fn delta_time(&self) -> f64 {
        self.average.map(|d| d.as_secs_f64()).unwrap_or_default()
    }

    pub fn fps(&self) -> f64 {
        match self.delta_time() {
            dt if dt > 0. => 1. / dt,
            _ => 0.,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::default()
            .with_point_count(60)
            .with_point_range(0, 200)
            .with_point_speed(0.2)
            .with_seed(11)
    }

    #[test]
    fn test_new_builds_mesh() {
        let simulation = Simulation::new(config()).unwrap();
        assert_eq!(simulation.point_count(), 60);
        assert_eq!(simulation.particles().len(), 60);
        assert_eq!(simulation.mesh().len(), 2 * 60 + 1);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Simulation::new(config().with_playground(-1.)),
            Err(Error::InvalidPlayground(_))
        ));
    }

    #[test]
    fn test_update_both_algorithms() {
        let mut simulation = Simulation::new(config()).unwrap();
        for algorithm in [Algorithm::ContiguousBowyerWatson, Algorithm::BowyerWatson] {
            simulation.set_algorithm(algorithm);
            assert_eq!(simulation.algorithm(), algorithm);
            for _ in 0..30 {
                let stats = simulation.update(1. / 60.).unwrap();
                assert_eq!(stats.algorithm, algorithm);
                assert_eq!(stats.inserted + stats.skipped, 60);
                assert_eq!(stats.triangles, 2 * stats.inserted + 1);
                assert!(simulation.triangulator().broken_links().is_empty());
            }
        }
    }

    #[test]
    fn test_point_count_is_clamped() {
        let mut simulation = Simulation::new(config()).unwrap();
        assert_eq!(simulation.adjust_point_count(100), 160);
        assert_eq!(simulation.adjust_point_count(100), 200);
        assert_eq!(simulation.particles().len(), 200);
        assert_eq!(simulation.adjust_point_count(-1000), 0);
        assert_eq!(simulation.set_point_count(10), 10);

        let stats = simulation.update(0.01).unwrap();
        assert_eq!(stats.inserted, 10);
    }

    #[test]
    fn test_max_points_fit_the_pool() {
        let config = Config::default()
            .with_point_count(200)
            .with_point_range(0, 200)
            .with_triangles_per_point(2);
        let mut simulation = Simulation::new(config).unwrap();
        simulation.set_algorithm(Algorithm::ContiguousBowyerWatson);
        simulation.update(0.1).unwrap();
        let pool = simulation.triangulator().pool();
        assert_eq!(pool.capacity(), 401);
        assert!(pool.current_size() <= pool.capacity());
    }

    #[test]
    fn test_frame_timer() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.fps(), 0.);
        assert_eq!(timer.record(Duration::from_millis(20)), 0.02);
        assert!((timer.record(Duration::from_millis(10)) - 0.015).abs() < 1e-9);
        assert!((timer.fps() - 1. / 0.015).abs() < 1e-6);
    }
}
