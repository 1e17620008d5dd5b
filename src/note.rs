use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "#ffffff";

/// Swatches offered by the palette panel, in display order.
pub const PALETTE: [&str; 12] = [
    "#ffffff", "#f28b82", "#fbbc04", "#fff475", "#ccff90", "#a7ffeb", "#cbf0f8", "#aecbfa",
    "#d7aefb", "#fdcfe8", "#e6c9a8", "#e8eaed",
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub text: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Note {
    pub fn new(id: String, title: &str, text: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            text: text.to_string(),
            color: default_color(),
        }
    }

    /// Case-insensitive match on title or text. `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.text.to_lowercase().contains(needle)
    }
}

/// Parses `#rrggbb` into its components. Anything else yields `None`.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_is_white() {
        let note = Note::new("a".to_string(), "Title", "Body");
        assert_eq!(note.color, "#ffffff");
        assert_eq!(note.title, "Title");
        assert_eq!(note.text, "Body");
    }

    #[test]
    fn test_missing_color_defaults_to_white() {
        let note: Note = serde_json::from_str(r#"{"id":"x","title":"t","text":"b"}"#).unwrap();
        assert_eq!(note.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_matches_title_or_text() {
        let note = Note::new("a".to_string(), "Shopping", "Milk, eggs");
        assert!(note.matches("shop"));
        assert!(note.matches("eggs"));
        assert!(!note.matches("bread"));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#f28b82"), Some((0xf2, 0x8b, 0x82)));
        assert_eq!(parse_hex("f28b82"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_palette_starts_with_default() {
        assert_eq!(PALETTE[0], DEFAULT_COLOR);
        assert_eq!(PALETTE.len(), 12);
    }
}
