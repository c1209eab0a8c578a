//! Script sections
//!
//! A `Section` is one slide's worth of expected narration, produced by the
//! offline alignment pipeline and consumed read-only here.

use crate::error::{NavError, NavResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One slide's expected narration with its ordinal position in the deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub content: String,
    pub index: usize,
}

impl Section {
    pub fn new(content: impl Into<String>, index: usize) -> Self {
        Self {
            content: content.into(),
            index,
        }
    }
}

/// Load an aligned section list from a JSON file.
///
/// The list must be dense: section `i` carries index `i`. A malformed
/// list is a startup failure, never a mid-session one.
pub fn load_sections(path: &Path) -> NavResult<Vec<Section>> {
    let content = std::fs::read_to_string(path)?;
    let sections: Vec<Section> = serde_json::from_str(&content)?;
    validate_sections(&sections)?;
    Ok(sections)
}

/// Check the density and ordering invariant on a section list
pub fn validate_sections(sections: &[Section]) -> NavResult<()> {
    if sections.is_empty() {
        return Err(NavError::Script("section list is empty".into()));
    }
    for (pos, section) in sections.iter().enumerate() {
        if section.index != pos {
            return Err(NavError::Script(format!(
                "section at position {} has index {} (list must be dense, 0..N-1)",
                pos, section.index
            )));
        }
    }
    Ok(())
}
