use serde::Deserialize;
use validator::Validate;

use crate::domain::entry::NewEntry;
use crate::domain::types::{CONTENT_MIN_LEN, TITLE_MAX_LEN, TITLE_MIN_LEN};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// JSON payload for creating or replacing a blog post or news item.
pub struct EntryForm {
    #[validate(length(min = TITLE_MIN_LEN, max = TITLE_MAX_LEN))]
    pub title: String,
    #[validate(length(min = CONTENT_MIN_LEN))]
    pub content: String,
}

impl TryFrom<EntryForm> for NewEntry {
    type Error = FormError;

    fn try_from(form: EntryForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewEntry::new(form.title, form.content))
    }
}
