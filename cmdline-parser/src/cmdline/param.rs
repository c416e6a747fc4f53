//! Parameter token
//!
//!     A parameter is one whitespace delimited token of the command line. It is either an
//!     atom, a bare key that is switched on by its presence, or a key carrying an ordered
//!     list of values.
//!
//! Syntax
//!
//!     <atom>
//!     <key> "=" <value> ("," <value>)*
//!
//!     Examples:
//!         rootwait
//!         console=serial0,115200
//!         root=PARTUUID=0f6fe73a-02
//!
//!     Only the first "=" is structural. Everything after it belongs to the value list, so
//!     `root=PARTUUID=0f6fe73a-02` has the single value `PARTUUID=0f6fe73a-02`.

use serde::Serialize;
use std::fmt;

/// The value half of a parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamValue {
    /// Bare key, serialized without `=`
    Atom,
    /// Ordered, non-empty value list, serialized as `=` + comma joined values
    Values(Vec<String>),
}

impl ParamValue {
    pub fn is_atom(&self) -> bool {
        matches!(self, ParamValue::Atom)
    }

    pub fn values(&self) -> &[String] {
        match self {
            ParamValue::Atom => &[],
            ParamValue::Values(values) => values,
        }
    }
}

/// A single command line token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Param {
    pub key: String,
    pub value: ParamValue,
}

impl Param {
    pub fn atom(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: ParamValue::Atom,
        }
    }

    pub fn keyed<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            value: ParamValue::Values(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Build a token from a caller supplied value list, `None` meaning an atom.
    pub fn new(key: impl Into<String>, values: Option<Vec<String>>) -> Self {
        match values {
            Some(values) => Self::keyed(key, values),
            None => Self::atom(key),
        }
    }

    /// Parse one whitespace free fragment.
    ///
    /// Splits on the first `=` only; the remainder is split on `,`. A trailing `=` yields a
    /// single empty value so that `key=` serializes back unchanged.
    pub fn parse(fragment: &str) -> Self {
        match fragment.split_once('=') {
            Some((key, rest)) => Self::keyed(key, rest.split(',')),
            None => Self::atom(fragment),
        }
    }

    /// Append every value in `values` that this token does not carry yet.
    ///
    /// An atom becomes a keyed token holding the new values. Returns whether anything was
    /// added.
    pub fn merge_values(&mut self, values: &[String]) -> bool {
        if values.is_empty() {
            return false;
        }
        if self.value.is_atom() {
            self.value = ParamValue::Values(Vec::new());
        }

        let mut added = false;
        if let ParamValue::Values(existing) = &mut self.value {
            for value in values {
                if !existing.contains(value) {
                    existing.push(value.clone());
                    added = true;
                }
            }
        }
        added
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ParamValue::Atom => write!(f, "{}", self.key),
            ParamValue::Values(values) => write!(f, "{}={}", self.key, values.join(",")),
        }
    }
}
