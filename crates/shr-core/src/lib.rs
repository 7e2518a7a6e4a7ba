//! Core types shared by the payload shortener crates: the value model, key
//! paths, the transform seam, configuration and errors.

pub mod config;
pub mod error;
pub mod key;
pub mod transform;
pub mod value;

pub use config::ShortenerConfig;
pub use error::{Result, ShrError};
pub use key::{KeyPath, KeyPattern, KeySet};
pub use transform::Transform;
pub use value::{Mapping, Opaque, Value};
