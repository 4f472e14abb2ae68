//! Application layer: services and use cases
//!
//! This layer feeds outline input into the domain and owns all I/O around it.

pub mod error;
pub mod error_ext;
pub mod outline;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use outline::OutlineService;
