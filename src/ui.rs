//! Terminal presentation layer.
//!
//! `draw` paints the board from `AppState` and records a [`HitMap`]: every
//! interactive rectangle with the router target it stands for. Later pushes
//! sit on top, so a mouse click resolves to the innermost region.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, Field};
use crate::config::{Palette, ThemeConfig, APP_VERSION};
use crate::note::{parse_hex, Note, PALETTE};
use crate::router::{Event, Region, Surface, Target};

const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 8;
const SIDEBAR_COLLAPSED: u16 = 5;
const SIDEBAR_EXPANDED: u16 = 18;
const SWATCH_WIDTH: u16 = 2;

const SIDEBAR_ITEMS: [(&str, &str); 5] = [
    ("◆", "Notes"),
    ("◔", "Reminders"),
    ("✎", "Edit labels"),
    ("▼", "Archive"),
    ("✖", "Trash"),
];

#[derive(Clone, Copy, PartialEq)]
enum Tool {
    Placeholder,
    Palette,
    Archive,
}

const TOOLBAR: [(&str, Tool); 6] = [
    ("◔", Tool::Placeholder),
    ("☺", Tool::Placeholder),
    ("◐", Tool::Palette),
    ("▣", Tool::Placeholder),
    ("▼", Tool::Archive),
    ("⋮", Tool::Placeholder),
];

#[derive(Default)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
    sidebar: Rect,
}

impl HitMap {
    fn clear(&mut self) {
        self.regions.clear();
        self.sidebar = Rect::default();
    }

    fn push(&mut self, rect: Rect, target: Target) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((rect, target));
        }
    }

    /// Topmost target under the cell, or the page background.
    pub fn hit(&self, x: u16, y: u16) -> Target {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| contains(rect, x, y))
            .map(|(_, target)| target.clone())
            .unwrap_or_else(Target::background)
    }

    pub fn in_sidebar(&self, x: u16, y: u16) -> bool {
        contains(&self.sidebar, x, y)
    }
}

fn contains(rect: &Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn note_color(hex: &str) -> Color {
    parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

fn field_line<'a>(app: &'a AppState, field: Field, placeholder: &'a str, style: Style) -> Line<'a> {
    let value = app.field(field);
    let focused = app.focus == Some(field);
    if value.is_empty() && !focused {
        return Line::from(Span::styled(
            placeholder,
            style.add_modifier(Modifier::DIM),
        ));
    }
    let mut spans = vec![Span::styled(value, style)];
    if focused {
        spans.push(Span::styled("▏", style.add_modifier(Modifier::SLOW_BLINK)));
    }
    Line::from(spans)
}

/// Multi-line field contents, cursor appended to the last line when focused.
fn field_lines<'a>(app: &'a AppState, field: Field, placeholder: &'a str, style: Style) -> Vec<Line<'a>> {
    let value = app.field(field);
    if value.is_empty() || !value.contains('\n') {
        return vec![field_line(app, field, placeholder, style)];
    }
    let mut lines: Vec<Line> = value
        .split('\n')
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    if app.focus == Some(field) {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled("▏", style.add_modifier(Modifier::SLOW_BLINK)));
        }
    }
    lines
}

pub fn draw(f: &mut Frame, app: &AppState, theme: &ThemeConfig, hits: &mut HitMap) {
    hits.clear();
    let palette = theme.palette(app.dark_mode);
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, app, palette, chunks[0], hits);

    let sidebar_width = if app.mini_sidebar_collapsed {
        SIDEBAR_COLLAPSED
    } else {
        SIDEBAR_EXPANDED
    };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
        .split(chunks[1]);

    draw_sidebar(f, app, palette, body[0], hits);

    let form_height = if app.form.is_expanded() { 8 } else { 3 };
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(1)])
        .split(body[1]);

    draw_form(f, app, palette, main[0], hits);
    let hidden = draw_board(f, app, palette, main[1], hits);
    draw_footer(f, app, palette, chunks[2], hidden);

    if app.modal.is_open() {
        draw_modal(f, app, area, hits);
    }
}

fn draw_header(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect, hits: &mut HitMap) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Min(10),
            Constraint::Length(12),
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(" Jotter ", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled(APP_VERSION, Style::default().fg(palette.muted)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(palette.border)));
    f.render_widget(logo, cols[0]);

    let border = if app.focus == Some(Field::Search) {
        palette.accent
    } else {
        palette.border
    };
    let search = Paragraph::new(field_line(
        app,
        Field::Search,
        "Search",
        Style::default().fg(palette.foreground),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(search, cols[1]);
    hits.push(cols[1], Target::new(Region::SearchBox));

    let label = if app.dark_mode { "☀ Light" } else { "☾ Dark" };
    let toggle = Paragraph::new(label)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.border)));
    f.render_widget(toggle, cols[2]);
    hits.push(cols[2], Target::new(Region::DarkModeToggle));
}

fn draw_sidebar(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect, hits: &mut HitMap) {
    let lines: Vec<Line> = SIDEBAR_ITEMS
        .iter()
        .enumerate()
        .map(|(i, (icon, label))| {
            let style = if i == 0 {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.muted)
            };
            if app.mini_sidebar_collapsed {
                Line::from(Span::styled(format!(" {} ", icon), style))
            } else {
                Line::from(Span::styled(format!(" {}  {}", icon, label), style))
            }
        })
        .collect();
    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(palette.border)),
    );
    f.render_widget(sidebar, area);
    hits.push(area, Target::new(Region::Sidebar));
    hits.sidebar = area;
}

fn draw_form(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect, hits: &mut HitMap) {
    let width = area.width.min(60);
    let rect = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);
    let text_style = Style::default().fg(palette.foreground);

    if !app.form.is_expanded() {
        let placeholder = Paragraph::new(Span::styled(
            "Take a note...",
            text_style.add_modifier(Modifier::DIM),
        ))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.border)));
        f.render_widget(placeholder, rect);
        hits.push(rect, Target::new(Region::InactiveForm));
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(rect);
    f.render_widget(block, rect);
    hits.push(rect, Target::new(Region::ActiveForm));
    if inner.height < 3 {
        return;
    }

    let title_rect = Rect::new(inner.x, inner.y, inner.width, 1);
    let text_rect = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 2);
    let button_rect = Rect::new(
        inner.x + inner.width.saturating_sub(9),
        inner.y + inner.height - 1,
        inner.width.min(9),
        1,
    );

    f.render_widget(
        Paragraph::new(field_line(app, Field::NoteTitle, "Title", text_style.add_modifier(Modifier::BOLD))),
        title_rect,
    );
    f.render_widget(
        Paragraph::new(field_lines(app, Field::NoteText, "Take a note...", text_style))
            .wrap(Wrap { trim: false }),
        text_rect,
    );
    f.render_widget(
        Paragraph::new(Span::styled("[ Close ]", Style::default().fg(palette.muted))),
        button_rect,
    );
    hits.push(title_rect, Target::new(Region::FormField(Field::NoteTitle)));
    hits.push(text_rect, Target::new(Region::FormField(Field::NoteText)));
    hits.push(button_rect, Target::new(Region::FormSubmit));
}

/// Draws visible cards in a grid. Returns how many did not fit.
fn draw_board(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect, hits: &mut HitMap) -> usize {
    let notes = app.store.board().visible();
    if notes.is_empty() {
        let empty = if app.search_query.trim().is_empty() {
            "Notes you add appear here"
        } else {
            "No matching notes"
        };
        f.render_widget(
            Paragraph::new(Span::styled(empty, Style::default().fg(palette.muted)))
                .alignment(Alignment::Center),
            Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(1).min(1)),
        );
        return 0;
    }

    let card_width = CARD_WIDTH.min(area.width);
    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let rows = (area.height.saturating_sub(1) / CARD_HEIGHT) as usize;
    let capacity = columns * rows;

    let mut open_panel = None;
    for (i, note) in notes.iter().take(capacity).enumerate() {
        let col = (i % columns) as u16;
        let row = (i / columns) as u16;
        let rect = Rect::new(
            area.x + col * CARD_WIDTH,
            area.y + 1 + row * CARD_HEIGHT,
            card_width,
            CARD_HEIGHT,
        );
        let toolbar_y = draw_card(f, note, palette, rect, hits);
        if app.open_palette.as_deref() == Some(note.id.as_str()) {
            open_panel = Some((note, rect, toolbar_y));
        }
    }

    // Drawn last so it overlays neighbouring cards.
    if let Some((note, card, toolbar_y)) = open_panel {
        draw_swatch_panel(f, note, area, card, toolbar_y, hits);
    }

    notes.len().saturating_sub(capacity)
}

fn draw_card(f: &mut Frame, note: &Note, palette: &Palette, rect: Rect, hits: &mut HitMap) -> u16 {
    let bg = note_color(&note.color);
    let style = Style::default().bg(bg).fg(palette.card_text);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border).bg(bg))
        .style(style);
    let inner = block.inner(rect);
    f.render_widget(block, rect);
    hits.push(rect, Target::on_note(Region::NoteCard, &note.id));

    let toolbar_y = inner.y + inner.height.saturating_sub(1);
    f.render_widget(
        Paragraph::new(Span::styled(note.title.as_str(), style.add_modifier(Modifier::BOLD))),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );
    f.render_widget(
        Paragraph::new(note.text.as_str())
            .style(style)
            .wrap(Wrap { trim: false }),
        Rect::new(inner.x, inner.y + 1, inner.width, inner.height.saturating_sub(2)),
    );

    for (i, (icon, tool)) in TOOLBAR.iter().enumerate() {
        let x = inner.x + (i as u16) * 3;
        if x + 3 > inner.x + inner.width {
            break;
        }
        let slot = Rect::new(x, toolbar_y, 3, 1);
        f.render_widget(Paragraph::new(format!(" {} ", icon)).style(style), slot);
        match tool {
            Tool::Palette => hits.push(slot, Target::on_note(Region::PaletteIcon, &note.id)),
            Tool::Archive => hits.push(slot, Target::on_note(Region::ArchiveIcon, &note.id)),
            Tool::Placeholder => {}
        }
    }
    toolbar_y
}

fn draw_swatch_panel(f: &mut Frame, note: &Note, area: Rect, card: Rect, toolbar_y: u16, hits: &mut HitMap) {
    let width = (PALETTE.len() as u16 * SWATCH_WIDTH + 2).min(area.width);
    let x = card.x.min(area.x + area.width - width);
    let y = if toolbar_y + 4 <= area.y + area.height {
        toolbar_y + 1
    } else {
        toolbar_y.saturating_sub(3)
    };
    let rect = Rect::new(x, y, width, 3);

    f.render_widget(Clear, rect);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::White).fg(Color::DarkGray)),
        rect,
    );
    hits.push(rect, Target::on_note(Region::PalettePanel, &note.id));

    for (i, color) in PALETTE.iter().enumerate() {
        let sx = rect.x + 1 + i as u16 * SWATCH_WIDTH;
        if sx + SWATCH_WIDTH > rect.x + rect.width - 1 {
            break;
        }
        let slot = Rect::new(sx, rect.y + 1, SWATCH_WIDTH, 1);
        let marker = if note.color == *color { "●●" } else { "  " };
        f.render_widget(
            Paragraph::new(marker).style(Style::default().bg(note_color(color)).fg(Color::DarkGray)),
            slot,
        );
        hits.push(
            slot,
            Target::on_note(Region::Swatch(color.to_string()), &note.id),
        );
    }
}

fn draw_footer(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect, hidden: usize) {
    let text = if let Some(status) = app.status() {
        status.to_string()
    } else if app.focus.is_some() {
        " Esc: done · Tab: next field · Enter: newline".to_string()
    } else {
        let mut hint = " n: new note · /: search · d: dark mode · q: quit".to_string();
        if hidden > 0 {
            hint.push_str(&format!(" · {} more not shown", hidden));
        }
        hint
    };
    f.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(palette.muted))),
        area,
    );
}

fn draw_modal(f: &mut Frame, app: &AppState, area: Rect, hits: &mut HitMap) {
    // Backdrop: everything outside the dialog counts as outside the modal form.
    hits.push(area, Target::background());

    let rect = centered_rect(60, 50, area);
    let bg = note_color(app.modal.tint());
    let style = Style::default().bg(bg).fg(Color::Rgb(32, 33, 36));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Edit note ")
        .style(style);
    let inner = block.inner(rect);
    f.render_widget(Clear, rect);
    f.render_widget(block, rect);
    hits.push(rect, Target::new(Region::ModalForm));
    if inner.height < 3 {
        return;
    }

    let title_rect = Rect::new(inner.x, inner.y, inner.width, 1);
    let text_rect = Rect::new(inner.x, inner.y + 2, inner.width, inner.height.saturating_sub(3));
    let close_rect = Rect::new(
        inner.x + inner.width.saturating_sub(9),
        inner.y + inner.height - 1,
        inner.width.min(9),
        1,
    );

    f.render_widget(
        Paragraph::new(field_line(app, Field::ModalTitle, "Title", style.add_modifier(Modifier::BOLD))),
        title_rect,
    );
    f.render_widget(
        Paragraph::new(field_lines(app, Field::ModalText, "Note", style)).wrap(Wrap { trim: false }),
        text_rect,
    );
    f.render_widget(Paragraph::new("[ Close ]").style(style), close_rect);

    hits.push(title_rect, Target::new(Region::ModalField(Field::ModalTitle)));
    hits.push(text_rect, Target::new(Region::ModalField(Field::ModalText)));
    hits.push(close_rect, Target::new(Region::ModalClose));
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub enum KeyAction {
    Quit,
    Dispatch(Event),
    Ignore,
}

fn edit(app: &AppState, field: Field, apply: impl FnOnce(&mut String)) -> KeyAction {
    let mut value = app.field(field).to_string();
    apply(&mut value);
    KeyAction::Dispatch(Event::Input { field, value })
}

/// Maps a key press to a router event, based on which field has focus.
pub fn key_to_action(app: &AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    let Some(field) = app.focus else {
        return match key.code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('n') => KeyAction::Dispatch(Event::Click(Target::new(Region::InactiveForm))),
            KeyCode::Char('/') => KeyAction::Dispatch(Event::Click(Target::new(Region::SearchBox))),
            KeyCode::Char('d') => KeyAction::Dispatch(Event::Click(Target::new(Region::DarkModeToggle))),
            KeyCode::Esc => KeyAction::Dispatch(Event::Click(Target::background())),
            _ => KeyAction::Ignore,
        };
    };

    match key.code {
        KeyCode::Esc => match field {
            Field::ModalTitle | Field::ModalText => {
                KeyAction::Dispatch(Event::Click(Target::new(Region::ModalClose)))
            }
            Field::NoteTitle | Field::NoteText => {
                KeyAction::Dispatch(Event::Submit(Surface::NoteForm))
            }
            Field::Search => KeyAction::Dispatch(Event::Focus(None)),
        },
        KeyCode::Tab | KeyCode::BackTab => {
            let next = match field {
                Field::NoteTitle => Field::NoteText,
                Field::NoteText => Field::NoteTitle,
                Field::ModalTitle => Field::ModalText,
                Field::ModalText => Field::ModalTitle,
                Field::Search => return KeyAction::Ignore,
            };
            KeyAction::Dispatch(Event::Focus(Some(next)))
        }
        KeyCode::Enter => match field {
            Field::NoteTitle => KeyAction::Dispatch(Event::Focus(Some(Field::NoteText))),
            Field::ModalTitle => KeyAction::Dispatch(Event::Submit(Surface::ModalForm)),
            Field::Search => KeyAction::Dispatch(Event::Focus(None)),
            Field::NoteText | Field::ModalText => edit(app, field, |v| v.push('\n')),
        },
        KeyCode::Backspace => edit(app, field, |v| {
            v.pop();
        }),
        KeyCode::Char(c) => edit(app, field, |v| v.push(c)),
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::dispatch;
    use crate::store::tests::empty_store;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &AppState) -> HitMap {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut hits = HitMap::default();
        terminal
            .draw(|f| draw(f, app, &ThemeConfig::default(), &mut hits))
            .unwrap();
        hits
    }

    fn find(hits: &HitMap, wanted: &Target) -> Rect {
        hits.regions
            .iter()
            .find(|(_, t)| t == wanted)
            .map(|(r, _)| *r)
            .unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_hits_resolve_to_innermost_region() {
        let mut app = AppState::new(empty_store());
        let id = app.store.create("T", "body").unwrap().unwrap();
        let hits = render(&app);

        let card = find(&hits, &Target::on_note(Region::NoteCard, &id));
        assert_eq!(hits.hit(card.x + 2, card.y + 1), Target::on_note(Region::NoteCard, &id));

        let icon = find(&hits, &Target::on_note(Region::PaletteIcon, &id));
        assert_eq!(hits.hit(icon.x, icon.y), Target::on_note(Region::PaletteIcon, &id));

        let archive = find(&hits, &Target::on_note(Region::ArchiveIcon, &id));
        assert_eq!(hits.hit(archive.x + 1, archive.y), Target::on_note(Region::ArchiveIcon, &id));
    }

    #[test]
    fn test_open_palette_exposes_swatches() {
        let mut app = AppState::new(empty_store());
        let id = app.store.create("T", "body").unwrap().unwrap();
        app.open_palette = Some(id.clone());
        let hits = render(&app);

        let swatch = Target::on_note(Region::Swatch("#f28b82".to_string()), &id);
        let rect = find(&hits, &swatch);
        assert_eq!(hits.hit(rect.x, rect.y), swatch);
    }

    #[test]
    fn test_modal_backdrop_covers_cards() {
        let mut app = AppState::new(empty_store());
        let id = app.store.create("T", "body").unwrap().unwrap();
        let card = find(&render(&app), &Target::on_note(Region::NoteCard, &id));

        dispatch(&mut app, Event::Click(Target::on_note(Region::NoteCard, &id))).unwrap();
        let hits = render(&app);
        assert_eq!(hits.hit(card.x, card.y), Target::background());
        let close = find(&hits, &Target::new(Region::ModalClose));
        assert_eq!(hits.hit(close.x, close.y), Target::new(Region::ModalClose));
    }

    #[test]
    fn test_sidebar_tracking() {
        let app = AppState::new(empty_store());
        let hits = render(&app);
        assert!(hits.in_sidebar(1, 5));
        assert!(!hits.in_sidebar(60, 5));
    }

    #[test]
    fn test_typing_into_focused_field() {
        let mut app = AppState::new(empty_store());
        app.focus = Some(Field::NoteText);
        app.form.text = "ab".to_string();
        match key_to_action(&app, press(KeyCode::Char('c'))) {
            KeyAction::Dispatch(Event::Input { field, value }) => {
                assert_eq!(field, Field::NoteText);
                assert_eq!(value, "abc");
            }
            _ => panic!("expected input"),
        }
        match key_to_action(&app, press(KeyCode::Backspace)) {
            KeyAction::Dispatch(Event::Input { value, .. }) => assert_eq!(value, "a"),
            _ => panic!("expected input"),
        }
    }

    #[test]
    fn test_unfocused_keys() {
        let app = AppState::new(empty_store());
        assert!(matches!(key_to_action(&app, press(KeyCode::Char('q'))), KeyAction::Quit));
        assert!(matches!(
            key_to_action(&app, press(KeyCode::Char('n'))),
            KeyAction::Dispatch(Event::Click(Target { region: Region::InactiveForm, .. }))
        ));
    }

    #[test]
    fn test_enter_in_modal_title_submits_without_saving() {
        let mut app = AppState::new(empty_store());
        let id = app.store.create("T", "body").unwrap().unwrap();
        dispatch(&mut app, Event::Click(Target::on_note(Region::NoteCard, &id))).unwrap();
        dispatch(&mut app, Event::Focus(Some(Field::ModalTitle))).unwrap();
        dispatch(
            &mut app,
            Event::Input { field: Field::ModalTitle, value: "Changed".to_string() },
        )
        .unwrap();

        let KeyAction::Dispatch(event) = key_to_action(&app, press(KeyCode::Enter)) else {
            panic!("expected dispatch");
        };
        assert_eq!(event, Event::Submit(Surface::ModalForm));
        dispatch(&mut app, event).unwrap();
        assert!(app.modal.is_open());
        assert_eq!(app.focus, Some(Field::ModalText));
        assert_eq!(app.store.find_by_id(&id).unwrap().title, "T");
    }

    #[test]
    fn test_escape_closes_modal_through_router() {
        let mut app = AppState::new(empty_store());
        app.focus = Some(Field::ModalText);
        assert!(matches!(
            key_to_action(&app, press(KeyCode::Esc)),
            KeyAction::Dispatch(Event::Click(Target { region: Region::ModalClose, .. }))
        ));
    }
}
