//! Library domain module.
//!
//! # Module Structure
//!
//! - `model`: digital and physical book models
//! - `backend`: the listing/mutation seam the reactive store depends on

mod backend;
mod model;

pub use backend::LibraryBackend;
pub use model::{DigitalBook, IsbnLookup, NewPhysicalBook, PhysicalBook};
