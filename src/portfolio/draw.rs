use raylib::prelude::*;
use crate::constants::*;
use crate::content::Project;
use crate::page::{
    CONTACT_BODY, HEADER_HEIGHT, PROJECT_ROW, SECTION_PADDING, SKILL_ROW, SOCIAL_ROW, Section, SectionKind,
    TIMELINE_GAP, TIMELINE_HEADING, TIMELINE_WIDTH, experience_height,
};
use super::backdrop::Backdrop;
use super::links::{Hotspots, NAV_FONT, Target, nav_items};
use crate::session::PageSession;
use crate::text::{BADGE_HEIGHT, BADGE_SIZE, BODY_SIZE, badge_slots, line_height, text_width, wrap};
use crate::theme::{Palette, Theme, faded};

const LEFT: f32 = 240.0;              // Content column left edge
const COLUMN_WIDTH: f32 = 700.0;      // One of two card columns
const COLUMN_GAP: f32 = 40.0;
const CONTENT_WIDTH: f32 = COLUMN_WIDTH * 2.0 + COLUMN_GAP;
const PORTRAIT_RADIUS: f32 = 190.0;
const LINK_SIZE: i32 = 20;

/// Opacity of an item that became current `since` seconds ago.
pub fn crossfade(since: f32) -> f32 {
    (since / FADE_DURATION).clamp(0.0, 1.0)
}

fn section_title(kind: SectionKind) -> (&'static str, &'static str) {
    match kind {
        SectionKind::Home => ("", ""),
        SectionKind::Experience => ("Professional Experience", "My journey in software development and AI/ML engineering"),
        SectionKind::Projects => ("Featured Projects", "Things I have built recently"),
        SectionKind::Skills => ("Technical Skills", "Tools and technologies I work with"),
        SectionKind::Socialworks => ("Social Works", "Contributing to community and helping others grow"),
        SectionKind::Contact => ("Get In Touch", "Let's connect and explore opportunities to work together"),
    }
}

/// Where and how strongly a section is drawn this frame.
struct Placement {
    top: f32,
    alpha: f32,
}

impl Placement {
    fn y(&self, offset: f32) -> i32 {
        (self.top + offset) as i32
    }

    fn color(&self, color: Color) -> Color {
        faded(color, self.alpha)
    }
}

fn draw_text_f(d: &mut RaylibDrawHandle, text: &str, x: f32, y: i32, size: i32, color: Color) {
    d.draw_text(text, x as i32, y, size, color);
}

fn draw_paragraph(d: &mut RaylibDrawHandle, text: &str, x: f32, y: i32, size: i32, max_width: f32, color: Color) -> i32 {
    let mut y = y;
    for line in wrap(text, size, max_width) {
        draw_text_f(d, &line, x, y, size, color);
        y += line_height(size);
    }
    y
}

/// Draws a run of pill badges, wrapping inside `max_width`. Returns the y below them.
fn draw_badges(d: &mut RaylibDrawHandle, labels: &[String], x: f32, y: i32, max_width: f32, color: Color, text: Color) -> i32 {
    let mut bottom = y;
    for (label, slot) in labels.iter().zip(badge_slots(labels, BADGE_SIZE, max_width)) {
        let top = y as f32 + slot.y();
        let rec = Rectangle::new(x + slot.x, top, slot.width, BADGE_HEIGHT);
        d.draw_rectangle_rounded(rec, 0.5, 8, faded(color, 0.2));
        draw_text_f(d, label, x + slot.x + 14.0, (top + 8.0) as i32, BADGE_SIZE, text);
        bottom = (top + BADGE_HEIGHT) as i32;
    }
    bottom
}

/// Draws underlined link text and makes it clickable.
fn draw_link(d: &mut RaylibDrawHandle, hotspots: &mut Hotspots, text: &str, x: f32, y: i32, size: i32, color: Color, target: Target) {
    draw_text_f(d, text, x, y, size, color);
    let underline = (y + size + 2) as f32;
    d.draw_line_ex(Vector2::new(x, underline), Vector2::new(x + text_width(text, size), underline), 1.0, faded(color, 0.6));
    hotspots.text(text, x, y, size, target);
}

fn draw_card(d: &mut RaylibDrawHandle, x: f32, y: i32, width: f32, height: f32, palette: &Palette, accent: Color, alpha: f32) {
    let rec = Rectangle::new(x, y as f32, width, height);
    d.draw_rectangle_rounded(rec, 0.08, 8, faded(palette.surface, alpha * 0.85));
    d.draw_rectangle_lines_ex(rec, 1.5, faded(accent, alpha * 0.3));
}

fn draw_header(d: &mut RaylibDrawHandle, kind: SectionKind, at: &Placement, palette: &Palette) {
    let (title, subtitle) = section_title(kind);
    let center = RENDER_WIDTH as f32 / 2.0;
    draw_text_f(d, title, center - text_width(title, 48) / 2.0, at.y(SECTION_PADDING), 48, at.color(palette.foreground));
    draw_text_f(d, subtitle, center - text_width(subtitle, 22) / 2.0, at.y(SECTION_PADDING + 70.0), 22, at.color(palette.muted));
}

fn body_top(at: &Placement) -> f32 {
    at.top + SECTION_PADDING + HEADER_HEIGHT
}

fn draw_hero(
    d: &mut RaylibDrawHandle,
    hotspots: &mut Hotspots,
    session: &PageSession,
    section: &Section,
    at: &Placement,
    shift: f32,
    palette: &Palette,
    photos: &[Texture2D],
) {
    let profile = &session.content().profile;
    let middle = at.top + section.height / 2.0 + shift;

    draw_text_f(d, "Hi, I'm", LEFT, (middle - 220.0) as i32, 64, at.color(palette.foreground));
    draw_text_f(d, &profile.name, LEFT + text_width("Hi, I'm ", 64), (middle - 220.0) as i32, 64, at.color(palette.blue));

    // Rotating role label, cross-faded with the one it replaced
    let roles = session.roles();
    let fade = crossfade(roles.since_advance());
    let previous = &roles.set().items()[roles.previous_index()];
    if fade < 1.0 {
        draw_text_f(d, previous, LEFT, (middle - 130.0 - fade * 20.0) as i32, 36, at.color(faded(palette.purple, 1.0 - fade)));
    }
    draw_text_f(d, roles.current(), LEFT, (middle - 110.0 - fade * 20.0) as i32, 36, at.color(faded(palette.blue, fade)));

    let after = draw_paragraph(d, &profile.tagline, LEFT, (middle - 50.0) as i32, 26, 760.0, at.color(palette.muted));
    draw_link(d, hotspots, "[6] Get In Touch", LEFT, after + 30, 26, at.color(palette.blue), Target::Section(SectionKind::Contact));
    if let Some(resume) = &profile.resume_url {
        draw_text_f(d, "Resume:", LEFT, after + 76, 20, at.color(palette.muted));
        let x = LEFT + text_width("Resume: ", 20);
        draw_link(d, hotspots, resume, x, after + 76, 20, at.color(palette.muted), Target::Url(resume.clone()));
    }

    let center = Vector2::new(LEFT + CONTENT_WIDTH - PORTRAIT_RADIUS - 60.0, middle);
    d.draw_circle_v(center, PORTRAIT_RADIUS + 24.0, at.color(faded(palette.purple, 0.15)));
    d.draw_circle_lines(center.x as i32, center.y as i32, PORTRAIT_RADIUS + 8.0, at.color(palette.blue));
    match session.photos() {
        Some(rotator) => {
            let fade = crossfade(rotator.since_advance());
            if fade < 1.0 {
                draw_portrait(d, &photos[rotator.previous_index()], center, 1.0 - fade, at.alpha);
            }
            draw_portrait(d, &photos[*rotator.current()], center, fade, at.alpha);
        }
        None => {
            let initials: String = profile.name.split_whitespace().filter_map(|w| w.chars().next()).collect();
            draw_text_f(d, &initials, center.x - text_width(&initials, 120) / 2.0, (center.y - 60.0) as i32, 120, at.color(palette.foreground));
        }
    }
}

fn draw_portrait(d: &mut RaylibDrawHandle, texture: &Texture2D, center: Vector2, fade: f32, alpha: f32) {
    // Incoming photos grow from 90% to full size as they fade in
    let size = PORTRAIT_RADIUS * 2.0 * (0.9 + 0.1 * fade);
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    let side = tex_width.min(tex_height);
    let source = Rectangle::new((tex_width - side) / 2.0, (tex_height - side) / 2.0, side, side);
    let origin = Vector2::new(size / 2.0, size / 2.0);
    d.draw_texture_pro(
        texture,
        source,
        Rectangle::new(center.x, center.y, size, size),
        origin,
        0.0,
        faded(Color::WHITE, fade * alpha),
    );
}

fn draw_experience(d: &mut RaylibDrawHandle, session: &PageSession, at: &Placement, palette: &Palette) {
    let accents = palette.accents();
    let line_x = LEFT + 20.0;
    let top = body_top(at);
    let entries = &session.content().experience;
    if !entries.is_empty() {
        let total: f32 = entries.iter().map(experience_height).sum();
        let bottom = top + total - TIMELINE_GAP;
        d.draw_line_ex(Vector2::new(line_x, top), Vector2::new(line_x, bottom), 2.0, at.color(faded(palette.blue, 0.4)));
    }
    let mut y = top;
    for (i, entry) in entries.iter().enumerate() {
        let accent = accents[i % accents.len()];
        d.draw_circle_v(Vector2::new(line_x, y + 18.0), 10.0, at.color(accent));
        let x = line_x + 50.0;
        draw_text_f(d, &entry.title, x, y as i32, 30, at.color(palette.foreground));
        let mut meta = format!("{}  |  {}", entry.company, entry.period);
        if let Some(location) = &entry.location {
            meta.push_str(&format!("  |  {location}"));
        }
        draw_text_f(d, &meta, x, (y + 40.0) as i32, 20, at.color(accent));
        let after = draw_paragraph(d, &entry.description, x, (y + TIMELINE_HEADING) as i32, BODY_SIZE, TIMELINE_WIDTH, at.color(palette.muted));
        draw_badges(d, &entry.skills, x, after + 6, TIMELINE_WIDTH, at.color(accent), at.color(palette.foreground));
        y += experience_height(entry);
    }
}

fn column_x(i: usize) -> f32 {
    LEFT + (i % 2) as f32 * (COLUMN_WIDTH + COLUMN_GAP)
}

/// Labels and URLs shown along the bottom of a project card.
fn project_links(project: &Project) -> Vec<(&'static str, &str)> {
    [("Code", &project.repository), ("Live Demo", &project.demo)]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|url| (label, url)))
        .collect()
}

fn draw_projects(d: &mut RaylibDrawHandle, hotspots: &mut Hotspots, session: &PageSession, at: &Placement, palette: &Palette) {
    let accents = palette.accents();
    let top = body_top(at);
    for (i, project) in session.content().projects.iter().enumerate() {
        let x = column_x(i);
        let y = (top + (i / 2) as f32 * PROJECT_ROW) as i32;
        let accent = accents[i % accents.len()];
        draw_card(d, x, y, COLUMN_WIDTH, PROJECT_ROW - 30.0, palette, accent, at.alpha);
        draw_text_f(d, &project.title, x + 28.0, y + 24, 28, at.color(accent));
        let after = draw_paragraph(d, &project.description, x + 28.0, y + 66, BODY_SIZE, COLUMN_WIDTH - 56.0, at.color(palette.muted));
        draw_badges(d, &project.tech, x + 28.0, after + 8, COLUMN_WIDTH - 56.0, at.color(accent), at.color(palette.foreground));

        // Links sit on the bottom edge of the card
        let links_y = y + (PROJECT_ROW - 30.0) as i32 - 44;
        let mut link_x = x + 28.0;
        for (label, url) in project_links(project) {
            draw_link(d, hotspots, label, link_x, links_y, LINK_SIZE, at.color(palette.blue), Target::Url(url.to_string()));
            link_x += text_width(label, LINK_SIZE) + 40.0;
        }
    }
}

fn draw_skills(d: &mut RaylibDrawHandle, session: &PageSession, at: &Placement, palette: &Palette) {
    let accents = palette.accents();
    let top = body_top(at);
    for (i, group) in session.content().skills.iter().enumerate() {
        let x = column_x(i);
        let y = (top + (i / 2) as f32 * SKILL_ROW) as i32;
        let accent = accents[i % accents.len()];
        draw_text_f(d, &group.category, x, y, 26, at.color(accent));
        draw_badges(d, &group.skills, x, y + 40, COLUMN_WIDTH, at.color(accent), at.color(palette.foreground));
    }
}

fn draw_social_works(d: &mut RaylibDrawHandle, session: &PageSession, at: &Placement, palette: &Palette) {
    let accents = palette.accents();
    let top = body_top(at);
    for (i, work) in session.content().social_works.iter().enumerate() {
        let x = column_x(i);
        let y = (top + (i / 2) as f32 * SOCIAL_ROW) as i32;
        let accent = accents[(i + 1) % accents.len()];
        draw_card(d, x, y, COLUMN_WIDTH, SOCIAL_ROW - 30.0, palette, accent, at.alpha);
        draw_text_f(d, &work.organization, x + 28.0, y + 24, 28, at.color(palette.foreground));
        let after = draw_badges(d, &work.roles, x + 28.0, y + 66, COLUMN_WIDTH - 56.0, at.color(accent), at.color(accent));
        draw_paragraph(d, &work.description, x + 28.0, after + 14, 20, COLUMN_WIDTH - 56.0, at.color(palette.muted));
    }
}

fn draw_contact(d: &mut RaylibDrawHandle, hotspots: &mut Hotspots, session: &PageSession, at: &Placement, palette: &Palette) {
    let contact = &session.content().contact;
    let top = body_top(at) as i32;
    draw_card(d, LEFT, top, CONTENT_WIDTH, CONTACT_BODY - 40.0, palette, palette.blue, at.alpha);
    let x = LEFT + 40.0;
    draw_text_f(d, "Let's start a conversation", x, top + 36, 32, at.color(palette.blue));

    let mut rows: Vec<(&str, &str, Option<Target>)> =
        vec![("Email", &contact.email, Some(Target::Url(format!("mailto:{}", contact.email))))];
    if let Some(phone) = &contact.phone {
        let dial: String = phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
        rows.push(("Phone", phone, Some(Target::Url(format!("tel:{dial}")))));
    }
    if let Some(location) = &contact.location {
        rows.push(("Location", location, None));
    }
    let mut y = top + 96;
    for (label, value, target) in rows {
        draw_text_f(d, label, x, y, 22, at.color(palette.foreground));
        match target {
            Some(target) => draw_link(d, hotspots, value, x + 140.0, y, 22, at.color(palette.blue), target),
            None => draw_text_f(d, value, x + 140.0, y, 22, at.color(palette.muted)),
        }
        y += 40;
    }

    let mut y = top + 96;
    let links_x = LEFT + CONTENT_WIDTH / 2.0 + 40.0;
    for link in &contact.links {
        draw_text_f(d, &link.label, links_x, y, 22, at.color(palette.foreground));
        draw_link(d, hotspots, &link.url, links_x + 140.0, y, 20, at.color(palette.blue), Target::Url(link.url.clone()));
        y += 40;
    }
}

fn draw_nav(d: &mut RaylibDrawHandle, hotspots: &mut Hotspots, session: &PageSession, theme: Theme, palette: &Palette) {
    d.draw_rectangle(0, 0, RENDER_WIDTH, NAV_HEIGHT as i32, faded(palette.surface, 0.9));
    let name = &session.content().profile.name;
    draw_text_f(d, name, 48.0, 24, 28, palette.blue);
    hotspots.nav(Rectangle::new(48.0, 0.0, text_width(name, 28), NAV_HEIGHT), Target::Section(SectionKind::Home));

    let active = session.page().section_at(session.scroll().offset() + NAV_HEIGHT);
    for item in nav_items() {
        let color = if active == Some(item.kind) { palette.blue } else { palette.muted };
        draw_text_f(d, &item.label, item.text_x, item.text_y, NAV_FONT, color);
        hotspots.nav(item.area, Target::Section(item.kind));
    }

    let theme_label = format!("[T] {theme:?}");
    draw_text_f(d, &theme_label, RENDER_WIDTH as f32 - text_width(&theme_label, NAV_FONT) - 48.0, 28, NAV_FONT, palette.muted);

    // Scroll progress along the bottom edge of the bar
    let progress = session.scroll().fraction() * RENDER_WIDTH as f32;
    d.draw_rectangle(0, NAV_HEIGHT as i32 - 3, progress as i32, 3, palette.blue);
}

/// Draws one frame of the page and records what is clickable in it.
pub fn draw_page(
    d: &mut RaylibDrawHandle,
    hotspots: &mut Hotspots,
    session: &PageSession,
    theme: Theme,
    backdrop: &Backdrop,
    photos: &[Texture2D],
) {
    hotspots.clear();
    let palette = theme.palette();
    let frame = session.frame();
    let offset = session.scroll().offset();
    let viewport = session.viewport_height();

    d.clear_background(palette.background);
    backdrop.draw(d, &frame, &palette, viewport);

    for (i, section) in session.page().sections().iter().enumerate() {
        let screen_top = section.top - offset;
        if screen_top >= viewport || screen_top + section.height <= 0.0 {
            continue;
        }
        if i % 2 == 1 {
            d.draw_rectangle(0, screen_top as i32, RENDER_WIDTH, section.height as i32, faded(palette.surface, 0.5));
        }
        let progress = section.gate.progress();
        if progress <= 0.0 {
            continue;
        }
        let at = Placement { top: screen_top + (1.0 - progress) * REVEAL_RISE, alpha: progress };
        match section.kind {
            SectionKind::Home => {
                let shift = frame.content_y / 100.0 * section.height;
                draw_hero(d, hotspots, session, section, &at, shift, &palette, photos);
            }
            kind => {
                draw_header(d, kind, &at, &palette);
                match kind {
                    SectionKind::Experience => draw_experience(d, session, &at, &palette),
                    SectionKind::Projects => draw_projects(d, hotspots, session, &at, &palette),
                    SectionKind::Skills => draw_skills(d, session, &at, &palette),
                    SectionKind::Socialworks => draw_social_works(d, session, &at, &palette),
                    SectionKind::Contact => draw_contact(d, hotspots, session, &at, &palette),
                    SectionKind::Home => {}
                }
            }
        }
    }

    draw_nav(d, hotspots, session, theme, &palette);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_cards_link_code_and_demo() {
        let content = crate::content::Content::default();
        assert_eq!(
            project_links(&content.projects[0]),
            vec![("Code", "https://example.com/alex/chatbot"), ("Live Demo", "https://example.com/alex/chatbot/demo")]
        );
        assert!(project_links(&content.projects[3]).is_empty());

        let mut demo_only = content.projects[3].clone();
        demo_only.demo = Some("https://example.com/drone".to_string());
        assert_eq!(project_links(&demo_only), vec![("Live Demo", "https://example.com/drone")]);
    }

    #[test]
    fn crossfade_saturates() {
        assert_eq!(crossfade(0.0), 0.0);
        assert_eq!(crossfade(FADE_DURATION / 2.0), 0.5);
        assert_eq!(crossfade(f32::INFINITY), 1.0);
    }
}
