//! Batched text edits against a single source version
//!
//! Edits are immutable `{offset, delete-length, insert-text}` records
//! computed against one version of the text and applied in a single pass
//! in descending offset order, so no edit invalidates another's position
//! and no node ever needs re-resolution across edits.

use crate::error::RegionateError;
use crate::result::Result;

/// A single edit: delete `delete_len` bytes at `offset`, then insert `text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub offset: usize,
    pub delete_len: usize,
    pub text: String,
}

impl TextEdit {
    /// Pure insertion at an offset
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            delete_len: 0,
            text: text.into(),
        }
    }

    /// Pure deletion of a byte range
    pub fn delete(offset: usize, delete_len: usize) -> Self {
        Self {
            offset,
            delete_len,
            text: String::new(),
        }
    }

    fn end(&self) -> usize {
        self.offset + self.delete_len
    }
}

/// Apply a batch of edits to the text they were computed against
///
/// Deleted ranges must not overlap each other. Insertions sharing an
/// offset come out in collection order. Edits are applied back-to-front;
/// the input order of the batch does not matter beyond tie-breaking.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String> {
    let mut indexed: Vec<(usize, &TextEdit)> = edits.iter().enumerate().map(|(i, e)| (i, e)).collect();
    // Descending offset; at equal offsets apply deletions before
    // insertions, and later-collected insertions before earlier ones so
    // that the final text keeps collection order
    indexed.sort_by(|(ia, a), (ib, b)| {
        b.offset
            .cmp(&a.offset)
            .then((b.delete_len > 0).cmp(&(a.delete_len > 0)))
            .then(ib.cmp(ia))
    });

    // Validate bounds and overlap on the sorted view
    for window in indexed.windows(2) {
        let (_, later) = window[0];
        let (_, earlier) = window[1];
        if earlier.end() > later.offset {
            return Err(RegionateError::internal_error(format!(
                "overlapping edits at offsets {} and {}",
                earlier.offset, later.offset
            )));
        }
    }
    if let Some((_, last)) = indexed.first()
        && last.end() > source.len()
    {
        return Err(RegionateError::internal_error(format!(
            "edit past end of text: {}..{}",
            last.offset,
            last.end()
        )));
    }

    let mut result = source.to_string();
    for (_, edit) in indexed {
        result.replace_range(edit.offset..edit.end(), &edit.text);
    }
    Ok(result)
}
