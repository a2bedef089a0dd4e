pub const BODY_SIZE: i32 = 20;        // Paragraph text
pub const BADGE_SIZE: i32 = 18;       // Badge label text
pub const BADGE_HEIGHT: f32 = 34.0;
pub const BADGE_GAP: f32 = 10.0;      // Between badges, both across and down
const BADGE_PADDING: f32 = 28.0;      // Horizontal padding inside a badge
const GLYPH_WIDTH: f32 = 0.55;        // Average glyph advance of the default font, per pixel of size

pub fn text_width(text: &str, font_size: i32) -> f32 {
    text.chars().count() as f32 * font_size as f32 * GLYPH_WIDTH
}

pub fn line_height(font_size: i32) -> i32 {
    (font_size as f32 * 1.4) as i32
}

/// Greedy word wrap against the approximate glyph width.
pub fn wrap(text: &str, font_size: i32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() { word.to_string() } else { format!("{line} {word}") };
        if !line.is_empty() && text_width(&candidate, font_size) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Height of a wrapped paragraph.
pub fn paragraph_height(text: &str, font_size: i32, max_width: f32) -> f32 {
    (wrap(text, font_size, max_width).len() as i32 * line_height(font_size)) as f32
}

/// Where one badge of a run sits, relative to the run's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeSlot {
    pub x: f32,
    pub row: usize,
    pub width: f32,
}

impl BadgeSlot {
    pub fn y(&self) -> f32 {
        self.row as f32 * (BADGE_HEIGHT + BADGE_GAP)
    }
}

/// Lays out pill badges left to right, starting a new row when one would overflow.
pub fn badge_slots(labels: &[String], font_size: i32, max_width: f32) -> Vec<BadgeSlot> {
    let mut slots = Vec::with_capacity(labels.len());
    let mut x = 0.0;
    let mut row = 0;
    for label in labels {
        let width = text_width(label, font_size) + BADGE_PADDING;
        if x > 0.0 && x + width > max_width {
            x = 0.0;
            row += 1;
        }
        slots.push(BadgeSlot { x, row, width });
        x += width + BADGE_GAP;
    }
    slots
}

/// Height of a badge run; zero when there are no badges.
pub fn badges_height(labels: &[String], font_size: i32, max_width: f32) -> f32 {
    badge_slots(labels, font_size, max_width)
        .last()
        .map_or(0.0, |slot| slot.y() + BADGE_HEIGHT)
}
