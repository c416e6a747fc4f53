//! Ordered parameter list
//!
//!     The list keeps tokens in encounter order. Order is significant: it is both the
//!     order the kernel sees and the serialization order. Keys are not unique, two
//!     `console=` entries are both kept.
//!
//! Editing
//!
//!     [`KernelParamList::add_param`] decides, in this order:
//!         1. merge into the first token with the same key (unique mode only)
//!         2. insert after the last token keyed `after`
//!         3. insert before the first token keyed `before`
//!         4. append
//!     A missing anchor falls back to appending.

use super::param::Param;
use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KernelParamList {
    params: Vec<Param>,
}

impl KernelParamList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a command line. Whitespace runs separate tokens; blank input gives an empty
    /// list.
    pub fn parse(text: &str) -> Self {
        let params = text.split_whitespace().map(Param::parse).collect();
        Self { params }
    }

    /// Add `key` (an atom when `values` is `None`) or merge its values into an existing
    /// token.
    ///
    /// With `unique` set and `key` already present, only the first matching token is
    /// touched and an atom request is a no-op. Otherwise a new token is placed after the
    /// last `after`, before the first `before`, or at the end. `after` wins when both
    /// anchors are given.
    pub fn add_param(
        &mut self,
        key: &str,
        values: Option<Vec<String>>,
        before: Option<&str>,
        after: Option<&str>,
        unique: bool,
    ) -> &mut Self {
        if unique && self.has_param(key) {
            self.merge(key, values);
            return self;
        }

        let index = self.insert_index(before, after);
        tracing::debug!(key, index, "inserting parameter");
        self.params.insert(index, Param::new(key, values));
        self
    }

    fn merge(&mut self, key: &str, values: Option<Vec<String>>) {
        let Some(values) = values else {
            tracing::debug!(key, "atom already present");
            return;
        };
        if let Some(param) = self.params.iter_mut().find(|p| p.key == key) {
            let added = param.merge_values(&values);
            tracing::debug!(key, added, "merged into existing parameter");
        }
    }

    fn insert_index(&self, before: Option<&str>, after: Option<&str>) -> usize {
        let end = self.params.len();
        if let Some(after) = after {
            return self
                .params
                .iter()
                .rposition(|p| p.key == after)
                .map_or(end, |i| i + 1);
        }
        if let Some(before) = before {
            return self
                .params
                .iter()
                .position(|p| p.key == before)
                .unwrap_or(end);
        }
        end
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.params.iter().any(|p| p.key == key)
    }

    /// First token carrying `key`
    pub fn first(&self, key: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.key == key)
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FromStr for KernelParamList {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<Vec<Param>> for KernelParamList {
    fn from(params: Vec<Param>) -> Self {
        Self { params }
    }
}

impl<'a> IntoIterator for &'a KernelParamList {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

impl fmt::Display for KernelParamList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", param)?;
        }
        Ok(())
    }
}
