//! Transform pipeline — applies each transform to the whole tree in turn.

use shr_core::config::DEFAULT_MAX_DEPTH;
use shr_core::{KeyPath, Transform, Value};
use tracing::{debug, warn};

/// Pipeline output with statistics.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub value: Value,
    pub transforms_applied: Vec<String>,
    /// Nodes handed to a transform, summed over all transforms.
    pub nodes_visited: usize,
}

/// Ordered list of transforms.
///
/// Each transform sees every node, pre-order: a node is transformed first and
/// then the children of the *result* are visited with their key paths
/// (field names, or list indices as decimal strings).
pub struct TransformPipeline {
    transforms: Vec<Box<dyn Transform>>,
    max_depth: usize,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self { transforms: Vec::new(), max_depth: DEFAULT_MAX_DEPTH }
    }

    pub fn with(mut self, transform: impl Transform + 'static) -> Self {
        self.push(Box::new(transform));
        self
    }

    pub fn push(&mut self, transform: Box<dyn Transform>) {
        self.transforms.push(transform);
    }

    /// Children below `max_depth` are left as they are.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn run(&self, value: Value) -> TransformResult {
        let mut value = value;
        let mut applied = Vec::with_capacity(self.transforms.len());
        let mut visited = 0;

        for transform in &self.transforms {
            let mut walk = Walk {
                transform: transform.as_ref(),
                path: KeyPath::root(),
                visited: 0,
                max_depth: self.max_depth,
            };
            value = walk.visit(value);
            debug!("Transform {} visited {} nodes", transform.name(), walk.visited);
            visited += walk.visited;
            applied.push(transform.name().to_string());
        }

        TransformResult { value, transforms_applied: applied, nodes_visited: visited }
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}

struct Walk<'a> {
    transform: &'a dyn Transform,
    path: KeyPath,
    visited: usize,
    max_depth: usize,
}

impl Walk<'_> {
    fn visit(&mut self, value: Value) -> Value {
        self.visited += 1;
        let key = if self.path.is_empty() { None } else { Some(&self.path) };
        let mut value = self.transform.transform(value, key);

        if !value.is_container() {
            return value;
        }
        if self.path.len() >= self.max_depth {
            warn!("Pipeline depth limit {} reached at {}, not descending", self.max_depth, self.path);
            return value;
        }

        match &mut value {
            Value::Map(map) => {
                for (key, child) in map.iter_mut() {
                    self.path.push(key);
                    *child = self.visit(std::mem::take(child));
                    self.path.pop();
                }
            }
            seq => {
                let mut index = 0usize;
                seq.for_each_child_mut(|child| {
                    self.path.push(index.to_string());
                    *child = self.visit(std::mem::take(child));
                    self.path.pop();
                    index += 1;
                });
            }
        }
        value
    }
}
