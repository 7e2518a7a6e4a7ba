//! Per-category limit table.

use crate::category::Category;
use shr_core::{Result, ShrError};

pub const DEFAULT_STRING: usize = 100;
pub const DEFAULT_LONG: usize = 40;
pub const DEFAULT_OTHER: usize = 100;
pub const DEFAULT_CONTAINER: usize = 10;
/// Nesting rendered inside a summary before collapsing to `...`.
pub const DEFAULT_LEVEL: usize = 5;

/// One limit per category, plus the summary nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    sizes: [usize; Category::COUNT],
    level: usize,
}

impl Default for Limits {
    fn default() -> Self {
        let mut sizes = [DEFAULT_CONTAINER; Category::COUNT];
        sizes[Category::String.index()] = DEFAULT_STRING;
        sizes[Category::Long.index()] = DEFAULT_LONG;
        sizes[Category::Other.index()] = DEFAULT_OTHER;
        Self { sizes, level: DEFAULT_LEVEL }
    }
}

impl Limits {
    /// Defaults overlaid with named overrides. Fails on the first name that
    /// is neither a category nor `level`.
    pub fn with_overrides<I, S>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        let mut limits = Self::default();
        for (name, size) in overrides {
            limits.set(name.as_ref(), size)?;
        }
        Ok(limits)
    }

    pub fn set(&mut self, name: &str, size: usize) -> Result<()> {
        if matches!(name, "level" | "maxlevel") {
            self.level = size;
            return Ok(());
        }
        let category: Category = name.parse()?;
        self.sizes[category.index()] = size;
        Ok(())
    }

    pub fn with(mut self, category: Category, size: usize) -> Self {
        self.sizes[category.index()] = size;
        self
    }

    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    pub fn get(&self, category: Category) -> usize {
        self.sizes[category.index()]
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl TryFrom<&std::collections::BTreeMap<String, usize>> for Limits {
    type Error = ShrError;

    fn try_from(sizes: &std::collections::BTreeMap<String, usize>) -> Result<Self> {
        Self::with_overrides(sizes.iter().map(|(name, size)| (name, *size)))
    }
}
