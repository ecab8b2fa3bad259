mod config;
mod context;
#[cfg(feature = "draw")]
mod draw;
mod edge;
mod error;
mod points;
mod shade;
mod shape;
mod simulation;
mod triangles;
mod triangulator;
mod utils;

pub use config::Config;
#[cfg(feature = "draw")]
pub use draw::Canvas;
pub use edge::{Boundary, BoundaryEdge};
pub use error::Error;
pub use points::{Particle, Particles, DIRECTION_CHANGE_PROBABILITY};
pub use shade::{vertex_buffer, ShadeOptions, Shader, Technique, FLOATS_PER_VERTEX};
pub use shape::{Edge, Point, Triangle};
pub use simulation::{FrameTimer, Simulation};
pub use triangles::{TriangleId, TrianglePool};
pub use triangulator::{Algorithm, Mesh, RebuildStats, Triangulator};
pub use utils::{is_degenerate, orient_2d, Orientation, COLLINEAR_EPSILON};
