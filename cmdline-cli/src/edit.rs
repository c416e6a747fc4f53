//! Read, edit and write a boot parameter file
//!
//! The file is read and parsed, the edit is applied in memory and the result is written
//! back only when it differs from what was read. Nothing guards against another process
//! rewriting the file in between, and the write is a plain overwrite.

use crate::error::EditError;
use crate::request::Edit;
use cmdline_parser::KernelParamList;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Result of an edit, as reported to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub changed: bool,
    pub original_message: String,
    pub message: String,
    /// Exact bytes for the file
    #[serde(skip)]
    pub contents: String,
}

#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    pub trailing_newline: bool,
    pub dry_run: bool,
}

/// Apply `edit` to the text of a boot parameter file.
///
/// `changed` compares the bytes that would be written with `original`, so normalizing
/// stray whitespace or a missing final newline counts as a change. Both messages show the
/// full file contents with control characters escaped, so such a change stays visible.
pub fn edit_contents(original: &str, edit: &Edit, trailing_newline: bool) -> EditOutcome {
    let mut params = KernelParamList::parse(original);
    let updated = edit.apply(&mut params).to_string();

    let contents = if trailing_newline {
        format!("{updated}\n")
    } else {
        updated
    };

    EditOutcome {
        changed: contents != original,
        original_message: format!("Old cmdline: '{}'", original.escape_debug()),
        message: format!("New cmdline: '{}'", contents.escape_debug()),
        contents,
    }
}

pub fn edit_file(path: &Path, edit: &Edit, options: WriteOptions) -> Result<EditOutcome, EditError> {
    let io_error = |source| EditError::Io {
        path: path.to_path_buf(),
        source,
    };

    let original = fs::read_to_string(path).map_err(io_error)?;
    let outcome = edit_contents(&original, edit, options.trailing_newline);

    if !outcome.changed {
        tracing::info!(path = %path.display(), "already up to date");
    } else if options.dry_run {
        tracing::info!(path = %path.display(), "dry run, not writing");
    } else {
        fs::write(path, &outcome.contents).map_err(io_error)?;
        tracing::info!(path = %path.display(), "written");
    }

    Ok(outcome)
}
