//! Transform pipeline — runs keyed transforms over every node of a payload.

pub mod pipeline;

pub use pipeline::{TransformPipeline, TransformResult};
