//! Render boundary
//!
//! The simulation never draws. After each step it is turned into a flat list
//! of draw descriptors that any drawing surface can rasterize.

pub mod shapes;

pub use shapes::{DrawCommand, DrawKind, draw_list};
