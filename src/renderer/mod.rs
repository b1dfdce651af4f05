//! Rendering module
//!
//! Produces colored quads for the graphics collaborator; issuing the draw
//! calls is up to the frontend.

pub mod shapes;
pub mod vertex;

pub use shapes::{projection, quad, scene};
pub use vertex::{Vertex, as_bytes, colors};
