use anyhow::Result;
use uuid::Uuid;

use crate::logger;
use crate::note::Note;
use crate::render;
use crate::storage::Storage;

/// Supplies a fresh, globally unique id per created note.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// What is currently on screen: the last rendered markup and the notes it shows.
#[derive(Debug, Default)]
pub struct Board {
    markup: String,
    visible: Vec<Note>,
}

impl Board {
    /// Replaces the whole board. No diffing.
    pub fn show(&mut self, notes: &[Note]) {
        self.markup = render::render_notes(notes);
        self.visible = notes.to_vec();
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn visible(&self) -> &[Note] {
        &self.visible
    }
}

/// Sole owner of the note collection. Every effective mutation writes the
/// whole collection to storage and then re-renders the board.
pub struct NoteStore {
    notes: Vec<Note>,
    storage: Storage,
    ids: Box<dyn IdGenerator>,
    board: Board,
}

impl NoteStore {
    pub fn load(storage: Storage, ids: Box<dyn IdGenerator>) -> Self {
        let notes = storage.load_notes();
        logger::info(&format!("NoteStore::load: {} notes", notes.len()));
        let mut board = Board::default();
        board.show(&notes);
        Self {
            notes,
            storage,
            ids,
            board,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    #[cfg(test)]
    pub fn into_storage(self) -> Storage {
        self.storage
    }

    /// Persists, then redraws. The board follows the collection even when
    /// the write fails; the error is returned afterwards.
    fn render(&mut self) -> Result<()> {
        let saved = self.storage.save_notes(&self.notes);
        self.board.show(&self.notes);
        saved
    }

    /// Appends a white note. Empty `text` is ignored and yields `None`.
    pub fn create(&mut self, title: &str, text: &str) -> Result<Option<String>> {
        if text.is_empty() {
            logger::debug("create: empty text ignored");
            return Ok(None);
        }
        let id = self.ids.next_id();
        self.notes.push(Note::new(id.clone(), title, text));
        self.render()?;
        Ok(Some(id))
    }

    pub fn update(&mut self, id: &str, title: &str, text: &str) -> Result<()> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            logger::debug(&format!("update: unknown note {}", id));
            return Ok(());
        };
        note.title = title.to_string();
        note.text = text.to_string();
        self.render()
    }

    pub fn set_color(&mut self, id: &str, color: &str) -> Result<()> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            logger::debug(&format!("set_color: unknown note {}", id));
            return Ok(());
        };
        note.color = color.to_string();
        self.render()
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            logger::debug(&format!("remove: unknown note {}", id));
            return Ok(());
        }
        self.render()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.notes.clear();
        self.render()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Notes whose title or text contains `query`, ignoring case and
    /// surrounding whitespace. A blank query returns everything.
    pub fn search(&self, query: &str) -> Vec<Note> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.notes.clone();
        }
        self.notes
            .iter()
            .filter(|n| n.matches(&needle))
            .cloned()
            .collect()
    }
}
