use crate::note::{Note, DEFAULT_COLOR};

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum FormState {
    Collapsed,
    Expanded,
}

/// The inline "take a note" form.
#[derive(Debug)]
pub struct InlineForm {
    pub state: FormState,
    pub title: String,
    pub text: String,
}

impl Default for InlineForm {
    fn default() -> Self {
        Self {
            state: FormState::Collapsed,
            title: String::new(),
            text: String::new(),
        }
    }
}

impl InlineForm {
    pub fn is_expanded(&self) -> bool {
        self.state == FormState::Expanded
    }

    pub fn expand(&mut self) {
        self.state = FormState::Expanded;
    }

    /// Collapses and hands back the `(title, text)` that were typed.
    pub fn collapse(&mut self) -> (String, String) {
        self.state = FormState::Collapsed;
        (
            std::mem::take(&mut self.title),
            std::mem::take(&mut self.text),
        )
    }
}

/// The edit dialog. Closing always yields the field values for committing.
#[derive(Debug)]
pub struct Modal {
    open: bool,
    pub title: String,
    pub text: String,
    tint: String,
}

impl Default for Modal {
    fn default() -> Self {
        Self {
            open: false,
            title: String::new(),
            text: String::new(),
            tint: DEFAULT_COLOR.to_string(),
        }
    }
}

impl Modal {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn tint(&self) -> &str {
        &self.tint
    }

    pub fn open(&mut self, note: &Note) {
        self.title = note.title.clone();
        self.text = note.text.clone();
        self.tint = note.color.clone();
        self.open = true;
    }

    pub fn close(&mut self) -> (String, String) {
        self.open = false;
        (self.title.clone(), self.text.clone())
    }
}
