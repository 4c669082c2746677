//! Page record handed to downstream consumers

use serde::{Deserialize, Serialize};

/// One encyclopedia page: display title, dump language and raw wikitext.
///
/// Title and text are exactly as found in the dump; `text` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiPage {
    pub title: String,
    pub language: String,
    pub text: String,
}

impl WikiPage {
    pub fn new(
        title: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
            text: text.into(),
        }
    }
}
