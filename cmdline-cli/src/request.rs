//! Edit requests as given on the command line, and their validation
//!
//! A request names either a `key` with `values` or a bare `atom`, plus an optional anchor.
//! Validation runs before the file is touched.

use cmdline_parser::KernelParamList;
use thiserror::Error;

/// Raw options, exactly as the user supplied them
#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    pub key: Option<String>,
    pub values: Option<Vec<String>>,
    pub atom: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("parameters are mutually exclusive: {0}|{1}")]
    MutuallyExclusive(&'static str, &'static str),
    #[error("one of the following is required: key, atom")]
    MissingTarget,
    #[error("parameters are required together: key, values")]
    MissingValues,
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} {1:?} contains {2:?}, which would split or rename the parameter")]
    ForbiddenChar(&'static str, String, char),
}

/// Names and anchors must come back as the same key when the line is re-parsed.
fn check_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    match name.chars().find(|c| c.is_whitespace() || *c == '=' || *c == ',') {
        Some(c) => Err(ValidationError::ForbiddenChar(field, name.to_string(), c)),
        None => Ok(()),
    }
}

/// Values may carry `=`, but a blank, a `,` or whitespace would change the value list.
fn check_value(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty("values"));
    }
    match value.chars().find(|c| c.is_whitespace() || *c == ',') {
        Some(c) => Err(ValidationError::ForbiddenChar("values", value.to_string(), c)),
        None => Ok(()),
    }
}

/// A validated request: one token to add, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub key: String,
    pub values: Option<Vec<String>>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub unique: bool,
}

impl EditRequest {
    pub fn validate(self) -> Result<Edit, ValidationError> {
        if self.key.is_some() && self.atom.is_some() {
            return Err(ValidationError::MutuallyExclusive("key", "atom"));
        }
        if self.values.is_some() && self.atom.is_some() {
            return Err(ValidationError::MutuallyExclusive("values", "atom"));
        }
        if self.before.is_some() && self.after.is_some() {
            return Err(ValidationError::MutuallyExclusive("before", "after"));
        }

        let (field, key, values) = match (self.key, self.values, self.atom) {
            (Some(key), Some(values), None) => ("key", key, Some(values)),
            (Some(_), None, None) => return Err(ValidationError::MissingValues),
            (None, _, Some(atom)) => ("atom", atom, None),
            _ => return Err(ValidationError::MissingTarget),
        };

        check_name(field, &key)?;
        if let Some(values) = &values {
            if values.is_empty() {
                return Err(ValidationError::Empty("values"));
            }
            values.iter().try_for_each(|v| check_value(v))?;
        }
        if let Some(before) = &self.before {
            check_name("before", before)?;
        }
        if let Some(after) = &self.after {
            check_name("after", after)?;
        }

        Ok(Edit {
            key,
            values,
            before: self.before,
            after: self.after,
            unique: self.unique,
        })
    }
}

impl Edit {
    pub fn apply<'a>(&self, params: &'a mut KernelParamList) -> &'a mut KernelParamList {
        params.add_param(
            &self.key,
            self.values.clone(),
            self.before.as_deref(),
            self.after.as_deref(),
            self.unique,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn keyed() -> EditRequest {
        EditRequest {
            key: Some("modules-load".to_string()),
            values: Some(vec!["dwc2".to_string(), "g_ether".to_string()]),
            unique: true,
            ..Default::default()
        }
    }

    fn atom() -> EditRequest {
        EditRequest {
            atom: Some("quiet".to_string()),
            unique: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_keyed_request() {
        let edit = EditRequest {
            after: Some("rootwait".to_string()),
            ..keyed()
        }
        .validate()
        .unwrap();
        assert_eq!(edit.key, "modules-load");
        assert_eq!(edit.values.as_deref().map(|v| v.len()), Some(2));
        assert_eq!(edit.after.as_deref(), Some("rootwait"));
    }

    #[test]
    fn test_atom_request() {
        let edit = atom().validate().unwrap();
        assert_eq!(edit.key, "quiet");
        assert_eq!(edit.values, None);
    }

    #[rstest]
    #[case::key_and_atom(
        EditRequest { atom: Some("quiet".into()), ..keyed() },
        ValidationError::MutuallyExclusive("key", "atom")
    )]
    #[case::values_and_atom(
        EditRequest { values: Some(vec!["x".into()]), ..atom() },
        ValidationError::MutuallyExclusive("values", "atom")
    )]
    #[case::before_and_after(
        EditRequest { before: Some("a".into()), after: Some("b".into()), ..atom() },
        ValidationError::MutuallyExclusive("before", "after")
    )]
    #[case::nothing(EditRequest::default(), ValidationError::MissingTarget)]
    #[case::values_only(
        EditRequest { key: None, ..keyed() },
        ValidationError::MissingTarget
    )]
    #[case::key_without_values(
        EditRequest { values: None, ..keyed() },
        ValidationError::MissingValues
    )]
    #[case::empty_atom(
        EditRequest { atom: Some(String::new()), ..atom() },
        ValidationError::Empty("atom")
    )]
    #[case::empty_values(
        EditRequest { values: Some(vec![]), ..keyed() },
        ValidationError::Empty("values")
    )]
    #[case::empty_anchor(
        EditRequest { after: Some(String::new()), ..atom() },
        ValidationError::Empty("after")
    )]
    #[case::blank_value(
        EditRequest { values: Some(vec!["dwc2".into(), String::new()]), ..keyed() },
        ValidationError::Empty("values")
    )]
    #[case::space_in_value(
        EditRequest { values: Some(vec!["a b".into()]), ..keyed() },
        ValidationError::ForbiddenChar("values", "a b".into(), ' ')
    )]
    #[case::comma_in_value(
        EditRequest { values: Some(vec!["a,b".into()]), ..keyed() },
        ValidationError::ForbiddenChar("values", "a,b".into(), ',')
    )]
    #[case::equals_in_key(
        EditRequest { key: Some("a=b".into()), ..keyed() },
        ValidationError::ForbiddenChar("key", "a=b".into(), '=')
    )]
    #[case::comma_in_key(
        EditRequest { key: Some("a,b".into()), ..keyed() },
        ValidationError::ForbiddenChar("key", "a,b".into(), ',')
    )]
    #[case::tab_in_atom(
        EditRequest { atom: Some("qu\tiet".into()), ..atom() },
        ValidationError::ForbiddenChar("atom", "qu\tiet".into(), '\t')
    )]
    #[case::space_in_before(
        EditRequest { before: Some("root wait".into()), ..atom() },
        ValidationError::ForbiddenChar("before", "root wait".into(), ' ')
    )]
    #[case::equals_in_after(
        EditRequest { after: Some("root=x".into()), ..atom() },
        ValidationError::ForbiddenChar("after", "root=x".into(), '=')
    )]
    fn test_rejected(#[case] request: EditRequest, #[case] expected: ValidationError) {
        assert_eq!(request.validate().unwrap_err(), expected);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let edit = EditRequest {
            key: Some("root".to_string()),
            values: Some(vec!["PARTUUID=0f6fe73a-02".to_string()]),
            unique: true,
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(edit.values, Some(vec!["PARTUUID=0f6fe73a-02".to_string()]));
    }

    #[test]
    fn test_apply() {
        let edit = EditRequest {
            before: Some("rootwait".to_string()),
            ..atom()
        }
        .validate()
        .unwrap();
        let mut params = KernelParamList::parse("console=tty1 rootwait");
        assert_eq!(edit.apply(&mut params).to_string(), "console=tty1 quiet rootwait");
    }
}
