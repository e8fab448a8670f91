pub mod product;
pub mod review;

pub use product::*;
pub use review::*;
