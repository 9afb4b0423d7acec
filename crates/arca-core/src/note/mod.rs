//! Notebook domain module.

mod model;

pub use model::{NewNote, Note};
