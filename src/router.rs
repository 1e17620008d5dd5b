//! Single entry point for every user interaction.
//!
//! The presentation layer tags each interactive region with a [`Target`];
//! `dispatch` classifies clicks on that descriptor in a fixed order, since
//! regions nest (a swatch sits inside a card, the close button inside the
//! modal form).

use anyhow::Result;

use crate::app::{AppState, Field};
use crate::logger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    NoteCard,
    PaletteIcon,
    /// Inside a swatch panel but between swatches.
    PalettePanel,
    Swatch(String),
    ArchiveIcon,
    ModalForm,
    ModalField(Field),
    ModalClose,
    InactiveForm,
    ActiveForm,
    FormField(Field),
    FormSubmit,
    SearchBox,
    DarkModeToggle,
    Sidebar,
    Background,
}

impl Region {
    fn inside_modal_form(&self) -> bool {
        matches!(
            self,
            Region::ModalForm | Region::ModalField(_) | Region::ModalClose
        )
    }

    fn inside_active_form(&self) -> bool {
        matches!(
            self,
            Region::ActiveForm | Region::FormField(_) | Region::FormSubmit
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub region: Region,
    pub note: Option<String>,
}

impl Target {
    pub fn new(region: Region) -> Self {
        Self { region, note: None }
    }

    pub fn on_note(region: Region, id: &str) -> Self {
        Self {
            region,
            note: Some(id.to_string()),
        }
    }

    pub fn background() -> Self {
        Self::new(Region::Background)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    NoteForm,
    ModalForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Click(Target),
    Submit(Surface),
    Input { field: Field, value: String },
    Focus(Option<Field>),
    SidebarHover(bool),
}

pub fn dispatch(app: &mut AppState, event: Event) -> Result<()> {
    match event {
        Event::Click(target) => handle_click(app, &target),
        Event::Submit(Surface::NoteForm) => {
            commit_form(app)?;
            app.focus = None;
            Ok(())
        }
        // The modal only commits on dismissal; submitting from the title
        // just moves on to the text.
        Event::Submit(Surface::ModalForm) => {
            if app.focus == Some(Field::ModalTitle) {
                app.focus = Some(Field::ModalText);
            }
            Ok(())
        }
        Event::Input { field, value } => {
            app.set_field(field, value);
            Ok(())
        }
        Event::Focus(field) => {
            app.focus = field;
            Ok(())
        }
        Event::SidebarHover(hovering) => {
            app.mini_sidebar_collapsed = !hovering;
            Ok(())
        }
    }
}

fn handle_click(app: &mut AppState, target: &Target) -> Result<()> {
    handle_color_palette(app, target)?;
    handle_modal_dismiss(app, target)?;
    handle_modal_open(app, target);
    handle_archiving(app, target)?;
    handle_form_click(app, target)?;
    if target.region == Region::DarkModeToggle {
        app.toggle_dark_mode()?;
    }
    settle_focus(app, target);
    Ok(())
}

fn handle_color_palette(app: &mut AppState, target: &Target) -> Result<()> {
    match (&target.region, &target.note) {
        (Region::PaletteIcon, Some(id)) => {
            if app.open_palette.as_deref() == Some(id.as_str()) {
                app.open_palette = None;
            } else {
                app.open_palette = Some(id.clone());
            }
        }
        (Region::Swatch(color), Some(id)) => {
            app.store.set_color(id, color)?;
            app.open_palette = None;
        }
        _ => app.open_palette = None,
    }
    Ok(())
}

fn handle_modal_dismiss(app: &mut AppState, target: &Target) -> Result<()> {
    let outside = !target.region.inside_modal_form();
    if !app.modal.is_open() || !(outside || target.region == Region::ModalClose) {
        return Ok(());
    }

    let (title, text) = app.modal.close();
    let Some(id) = app.selected_note_id.clone() else {
        return Ok(());
    };
    if text.is_empty() {
        logger::info(&format!("modal closed with empty text, removing {}", id));
        app.store.remove(&id)?;
    } else {
        app.store.update(&id, &title, &text)?;
    }
    Ok(())
}

fn handle_modal_open(app: &mut AppState, target: &Target) {
    let (Region::NoteCard, Some(id)) = (&target.region, &target.note) else {
        return;
    };
    let Some(note) = app.store.find_by_id(id) else {
        logger::debug(&format!("modal open: stale target {}", id));
        return;
    };
    app.modal.open(note);
    app.selected_note_id = Some(id.clone());
}

fn handle_archiving(app: &mut AppState, target: &Target) -> Result<()> {
    if let (Region::ArchiveIcon, Some(id)) = (&target.region, &target.note) {
        app.selected_note_id = Some(id.clone());
        app.store.remove(id)?;
        app.flash("Note archived");
    }
    Ok(())
}

fn handle_form_click(app: &mut AppState, target: &Target) -> Result<()> {
    match target.region {
        Region::InactiveForm => {
            app.form.expand();
        }
        Region::FormSubmit => {
            commit_form(app)?;
        }
        ref region if !region.inside_active_form() && app.form.is_expanded() => {
            commit_form(app)?;
        }
        _ => {}
    }
    Ok(())
}

fn commit_form(app: &mut AppState) -> Result<()> {
    let (title, text) = app.form.collapse();
    if app.store.create(&title, &text)?.is_some() {
        app.flash("Note added");
    }
    Ok(())
}

fn settle_focus(app: &mut AppState, target: &Target) {
    app.focus = match target.region {
        Region::FormField(field) | Region::ModalField(field) => Some(field),
        Region::SearchBox => Some(Field::Search),
        _ if app.modal.is_open() => match app.focus {
            Some(field) if field.in_modal() => Some(field),
            _ => Some(Field::ModalText),
        },
        _ if app.form.is_expanded() => match app.focus {
            Some(field) if field.in_form() => Some(field),
            _ => Some(Field::NoteText),
        },
        _ => None,
    };
}
