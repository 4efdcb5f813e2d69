// src/image_processing.rs
pub mod conversions;
pub mod display;
pub mod edge_map;
pub mod edges;
pub mod io;

pub use display::{render_side_by_side, show_side_by_side};
pub use edge_map::{EdgeArray, EdgeMap};
pub use edges::{detect_edges, EdgeMethod, CANNY_SIGMA};
pub use io::{load_image, write_edge_map};
