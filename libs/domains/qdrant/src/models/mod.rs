mod cluster;
mod collections;
mod filter;
mod ids;
mod index;
mod params;
mod payload;
mod points;
mod vectors;

pub use cluster::*;
pub use collections::*;
pub use filter::*;
pub use ids::*;
pub use index::*;
pub use params::*;
pub use payload::*;
pub use points::*;
pub use vectors::*;
