//! HTML markup for the note board.
//!
//! Everything here is a pure function of its inputs. Each card carries the
//! note id (`id` and `data-note-id`) and each swatch carries its color in
//! `data-color`, which is all a presentation layer needs to turn a click
//! back into a router target.

use crate::note::{Note, DEFAULT_COLOR, PALETTE};

/// Placeholder actions: drawn, never wired.
const PLACEHOLDER_ACTIONS: [(&str, &str); 4] = [
    ("add_alert", "Remind me"),
    ("person_add", "Collaborator"),
    ("image", "Add Image"),
    ("more_vert", "More"),
];

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn placeholder(icon: &str, tooltip: &str) -> String {
    format!(
        r#"<div class="tooltip"><span class="icon">{}</span><span class="tooltip-text">{}</span></div>"#,
        icon, tooltip
    )
}

fn swatch_panel(id: &str) -> String {
    let swatches: String = PALETTE
        .iter()
        .map(|color| {
            format!(
                r#"<div class="color-option" style="background-color: {c};" data-color="{c}" data-note-id="{id}"></div>"#,
                c = color,
                id = id
            )
        })
        .collect();
    format!(r#"<div class="color-palette">{}</div>"#, swatches)
}

pub fn render_note(note: &Note) -> String {
    let id = escape_html(&note.id);
    let color = if note.color.is_empty() {
        DEFAULT_COLOR.to_string()
    } else {
        escape_html(&note.color)
    };

    let mut footer = String::new();
    footer.push_str(&placeholder(PLACEHOLDER_ACTIONS[0].0, PLACEHOLDER_ACTIONS[0].1));
    footer.push_str(&placeholder(PLACEHOLDER_ACTIONS[1].0, PLACEHOLDER_ACTIONS[1].1));
    footer.push_str(&format!(
        r#"<div class="tooltip color-tooltip"><span class="icon palette-icon" data-note-id="{id}">palette</span><span class="tooltip-text">Change Color</span>{panel}</div>"#,
        id = id,
        panel = swatch_panel(&id)
    ));
    footer.push_str(&placeholder(PLACEHOLDER_ACTIONS[2].0, PLACEHOLDER_ACTIONS[2].1));
    footer.push_str(&format!(
        r#"<div class="tooltip archive" data-note-id="{}"><span class="icon">archive</span><span class="tooltip-text">Archive</span></div>"#,
        id
    ));
    footer.push_str(&placeholder(PLACEHOLDER_ACTIONS[3].0, PLACEHOLDER_ACTIONS[3].1));

    format!(
        r#"<div class="note" id="{id}" data-note-id="{id}" style="background-color: {color}"><div class="title">{title}</div><div class="text">{text}</div><div class="note-footer">{footer}</div></div>"#,
        id = id,
        color = color,
        title = escape_html(&note.title),
        text = escape_html(&note.text),
        footer = footer
    )
}

/// Cards concatenated in collection order.
pub fn render_notes(notes: &[Note]) -> String {
    notes.iter().map(render_note).collect()
}

/// Wraps already rendered cards (see [`render_notes`]) in a standalone page.
pub fn render_page(cards: &str, dark_mode: bool) -> String {
    let body_class = if dark_mode { "dark-mode" } else { "" };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Jotter</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
body.dark-mode {{ background: #202124; color: #e8eaed; }}
.notes {{ display: flex; flex-wrap: wrap; gap: 1rem; }}
.note {{ width: 240px; border: 1px solid #e0e0e0; border-radius: 8px; padding: 12px; color: #202124; }}
.title {{ font-weight: bold; margin-bottom: 8px; }}
.text {{ white-space: pre-wrap; }}
.note-footer, .color-palette {{ display: none; }}
</style>
</head>
<body class="{body_class}">
<div class="notes">{notes}</div>
</body>
</html>
"#,
        body_class = body_class,
        notes = cards
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, text: &str) -> Note {
        Note::new(id.to_string(), title, text)
    }

    #[test]
    fn test_card_carries_identity_and_content() {
        let mut n = note("abc", "Shopping", "Milk, eggs");
        n.color = "#f28b82".to_string();
        let html = render_note(&n);
        assert!(html.contains(r#"id="abc""#));
        assert!(html.contains("Shopping"));
        assert!(html.contains("Milk, eggs"));
        assert!(html.contains("background-color: #f28b82"));
        assert!(html.contains(r#"class="icon palette-icon" data-note-id="abc""#));
        assert!(html.contains(r#"class="tooltip archive" data-note-id="abc""#));
    }

    #[test]
    fn test_every_swatch_is_addressable() {
        let html = render_note(&note("n1", "", "x"));
        for color in PALETTE {
            assert!(html.contains(&format!(r#"data-color="{}" data-note-id="n1""#, color)));
        }
        assert_eq!(html.matches("color-option").count(), 12);
    }

    #[test]
    fn test_notes_render_in_collection_order() {
        let html = render_notes(&[note("first", "", "a"), note("second", "", "b")]);
        let a = html.find(r#"id="first""#).unwrap();
        let b = html.find(r#"id="second""#).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_empty_collection_renders_nothing() {
        assert_eq!(render_notes(&[]), "");
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render_note(&note("x", "<b>bold</b>", "a & \"b\""));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("a &amp; &quot;b&quot;"));
        assert!(!html.contains("<b>bold"));
    }

    #[test]
    fn test_page_marks_dark_mode() {
        assert!(render_page("", true).contains(r#"<body class="dark-mode">"#));
        assert!(render_page("", false).contains(r#"<body class="">"#));
    }

    #[test]
    fn test_page_embeds_cards() {
        let cards = render_notes(&[note("p1", "Title", "body")]);
        let page = render_page(&cards, false);
        assert!(page.contains(&format!(r#"<div class="notes">{}</div>"#, cards)));
    }
}
