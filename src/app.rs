use anyhow::Result;
use std::time::{Duration, Instant};

use crate::controller::{InlineForm, Modal};
use crate::logger;
use crate::store::NoteStore;

/// Text inputs that can hold keyboard focus.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Field {
    NoteTitle,
    NoteText,
    ModalTitle,
    ModalText,
    Search,
}

impl Field {
    pub fn in_form(self) -> bool {
        matches!(self, Field::NoteTitle | Field::NoteText)
    }

    pub fn in_modal(self) -> bool {
        matches!(self, Field::ModalTitle | Field::ModalText)
    }
}

/// All application state, owned by the entry point and lent to the router.
pub struct AppState {
    pub store: NoteStore,
    pub form: InlineForm,
    pub modal: Modal,
    pub selected_note_id: Option<String>,
    pub open_palette: Option<String>,
    pub mini_sidebar_collapsed: bool,
    pub dark_mode: bool,
    pub search_query: String,
    pub focus: Option<Field>,
    status: Option<(String, Instant)>,
}

impl AppState {
    pub fn new(mut store: NoteStore) -> Self {
        let dark_mode = store.storage_mut().load_dark_mode();
        Self {
            store,
            form: InlineForm::default(),
            modal: Modal::default(),
            selected_note_id: None,
            open_palette: None,
            mini_sidebar_collapsed: true,
            dark_mode,
            search_query: String::new(),
            focus: None,
            status: None,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::NoteTitle => &self.form.title,
            Field::NoteText => &self.form.text,
            Field::ModalTitle => &self.modal.title,
            Field::ModalText => &self.modal.text,
            Field::Search => &self.search_query,
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::NoteTitle => self.form.title = value,
            Field::NoteText => self.form.text = value,
            Field::ModalTitle => self.modal.title = value,
            Field::ModalText => self.modal.text = value,
            Field::Search => {
                self.search_query = value;
                self.refresh_search();
            }
        }
    }

    /// Pushes the filtered view straight to the board without touching the store.
    pub fn refresh_search(&mut self) {
        let hits = self.store.search(&self.search_query);
        self.store.board_mut().show(&hits);
    }

    pub fn toggle_dark_mode(&mut self) -> Result<()> {
        self.dark_mode = !self.dark_mode;
        logger::info(&format!("dark mode {}", if self.dark_mode { "on" } else { "off" }));
        self.store.storage_mut().save_dark_mode(self.dark_mode)
    }

    pub fn flash(&mut self, msg: impl Into<String>) {
        self.status = Some((msg.into(), Instant::now()));
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(msg, _)| msg.as_str())
    }

    /// Drops a status older than `ttl`. Returns whether anything changed.
    pub fn expire_status(&mut self, ttl: Duration) -> bool {
        match &self.status {
            Some((_, since)) if since.elapsed() >= ttl => {
                self.status = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::store::tests::{empty_store, SequentialIds};

    #[test]
    fn test_initial_state() {
        let app = AppState::new(empty_store());
        assert!(app.mini_sidebar_collapsed);
        assert!(!app.dark_mode);
        assert!(app.selected_note_id.is_none());
        assert!(app.open_palette.is_none());
        assert!(app.focus.is_none());
    }

    #[test]
    fn test_dark_mode_is_restored_from_storage() {
        let mut storage = Storage::memory();
        storage.save_dark_mode(true).unwrap();
        let store = NoteStore::load(storage, Box::<SequentialIds>::default());
        assert!(AppState::new(store).dark_mode);
    }

    #[test]
    fn test_toggle_dark_mode_persists() {
        let mut app = AppState::new(empty_store());
        app.toggle_dark_mode().unwrap();
        assert!(app.dark_mode);
        assert!(app.store.storage_mut().load_dark_mode());
        app.toggle_dark_mode().unwrap();
        assert!(!app.store.storage_mut().load_dark_mode());
    }

    #[test]
    fn test_search_field_filters_board_only() {
        let mut app = AppState::new(empty_store());
        app.store.create("Shopping", "Milk").unwrap();
        app.store.create("Work", "Deploy").unwrap();

        app.set_field(Field::Search, "milk".to_string());
        assert_eq!(app.store.board().visible().len(), 1);
        assert_eq!(app.store.notes().len(), 2);

        app.set_field(Field::Search, "  ".to_string());
        assert_eq!(app.store.board().visible().len(), 2);
    }

    #[test]
    fn test_status_expiry() {
        let mut app = AppState::new(empty_store());
        app.flash("Saved");
        assert_eq!(app.status(), Some("Saved"));
        assert!(!app.expire_status(Duration::from_secs(60)));
        assert!(app.expire_status(Duration::ZERO));
        assert_eq!(app.status(), None);
    }
}
