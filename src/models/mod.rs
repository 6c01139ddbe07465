pub mod catalog;
pub mod request;
pub mod status;

pub use catalog::*;
pub use request::*;
pub use status::*;
