pub mod error;
pub mod ids;
pub mod json;
pub mod result;

pub use error::*;
pub use ids::*;
pub use json::*;
pub use result::*;
