// Batching: the host list is cut into contiguous, ordered slices of at
// most `BATCH_SIZE` entries, and each slice gets a deterministic name.

use crate::error::ConfigError;

/// Largest number of hosts sent in one collection request.
pub const BATCH_SIZE: usize = 1000;

pub const INDEX_PLACEHOLDER: &str = "{index}";
pub const DEFAULT_NAME_TEMPLATE: &str = "defender-update-collection-{index}";

/// One contiguous slice of the host list. `index` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    pub index: usize,
    pub hosts: &'a [String],
}

/// Split `hosts` into ordered batches of at most `size` entries.
///
/// Panics if `size` is zero; `Config` never hands out a zero size.
pub fn batches(hosts: &[String], size: usize) -> impl Iterator<Item = Batch<'_>> {
    hosts
        .chunks(size)
        .enumerate()
        .map(|(i, hosts)| Batch { index: i + 1, hosts })
}

/// Number of batches `len` hosts produce.
pub fn batch_count(len: usize, size: usize) -> usize {
    len.div_ceil(size)
}

/// Collection name pattern with an `{index}` placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameTemplate(String);

impl NameTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        if !template.contains(INDEX_PLACEHOLDER) {
            return Err(ConfigError::InvalidTemplate(template));
        }
        Ok(NameTemplate(template))
    }

    pub fn render(&self, index: usize) -> String {
        self.0.replace(INDEX_PLACEHOLDER, &index.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NameTemplate {
    fn default() -> Self {
        NameTemplate(DEFAULT_NAME_TEMPLATE.to_string())
    }
}
