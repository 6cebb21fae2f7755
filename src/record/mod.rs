pub mod dataset;
pub mod model;
pub mod status;

pub use dataset::*;
pub use model::*;
pub use status::*;
