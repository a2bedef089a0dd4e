use raylib::prelude::*;
use crate::constants::*;
use crate::page::SectionKind;
use crate::text::text_width;

const NAV_FIRST_X: f32 = 520.0;       // Left edge of the first section label
const NAV_TEXT_Y: i32 = 28;
pub const NAV_FONT: i32 = 20;
const NAV_SPACING: f32 = 36.0;        // Between section labels
const NAV_HIT_MARGIN: f32 = 12.0;     // Extra clickable width either side of a label

/// What a click on a hotspot does.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Section(SectionKind),
    Url(String),
}

#[derive(Debug, Clone)]
struct Hotspot {
    area: Rectangle,
    target: Target,
    nav: bool,
}

fn contains(area: &Rectangle, point: Vector2) -> bool {
    point.x >= area.x && point.x < area.x + area.width && point.y >= area.y && point.y < area.y + area.height
}

/// Clickable areas collected while drawing a frame, in render-texture pixels.
#[derive(Debug, Default)]
pub struct Hotspots {
    spots: Vec<Hotspot>,
}

impl Hotspots {
    pub fn clear(&mut self) {
        self.spots.clear();
    }

    /// Registers a line of page text drawn at `(x, y)`. Text fully under the
    /// nav bar is not clickable.
    pub fn text(&mut self, text: &str, x: f32, y: i32, font_size: i32, target: Target) {
        let area = Rectangle::new(x, y as f32, text_width(text, font_size), font_size as f32);
        if area.y + area.height <= NAV_HEIGHT {
            return;
        }
        self.spots.push(Hotspot { area, target, nav: false });
    }

    pub fn nav(&mut self, area: Rectangle, target: Target) {
        self.spots.push(Hotspot { area, target, nav: true });
    }

    /// The target under `point`. Inside the nav bar only nav entries count.
    pub fn hit(&self, point: Vector2) -> Option<&Target> {
        let in_nav = point.y < NAV_HEIGHT;
        self.spots
            .iter()
            .rev()
            .filter(|spot| spot.nav == in_nav)
            .find(|spot| contains(&spot.area, point))
            .map(|spot| &spot.target)
    }
}

/// One section label of the nav bar.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub kind: SectionKind,
    pub label: String,
    pub text_x: f32,
    pub text_y: i32,
    pub area: Rectangle,
}

pub fn nav_items() -> Vec<NavItem> {
    let mut x = NAV_FIRST_X;
    SectionKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let label = format!("{} {}", i + 1, kind.label());
            let width = text_width(&label, NAV_FONT);
            let area = Rectangle::new(x - NAV_HIT_MARGIN, 0.0, width + 2.0 * NAV_HIT_MARGIN, NAV_HEIGHT);
            let item = NavItem { kind: *kind, label, text_x: x, text_y: NAV_TEXT_Y, area };
            x += width + NAV_SPACING;
            item
        })
        .collect()
}

/// Maps a window mouse position onto the render texture it shows.
pub fn to_render_space(mouse: Vector2, screen_width: f32, screen_height: f32, render_height: f32) -> Vector2 {
    if screen_width <= 0.0 || screen_height <= 0.0 {
        return mouse;
    }
    Vector2::new(
        mouse.x * RENDER_WIDTH as f32 / screen_width,
        mouse.y * render_height / screen_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_hotspots() -> Hotspots {
        let mut hotspots = Hotspots::default();
        for item in nav_items() {
            hotspots.nav(item.area, Target::Section(item.kind));
        }
        hotspots
    }

    fn center(area: &Rectangle) -> Vector2 {
        Vector2::new(area.x + area.width / 2.0, area.y + area.height / 2.0)
    }

    #[test]
    fn nav_labels_hit_their_sections() {
        let hotspots = nav_hotspots();
        let items = nav_items();
        assert_eq!(items.len(), 6);
        for item in &items {
            assert_eq!(hotspots.hit(center(&item.area)), Some(&Target::Section(item.kind)));
            let left_edge = Vector2::new(item.text_x, item.text_y as f32);
            assert_eq!(hotspots.hit(left_edge), Some(&Target::Section(item.kind)));
        }
    }

    #[test]
    fn nav_labels_do_not_overlap() {
        for pair in nav_items().windows(2) {
            assert!(pair[0].area.x + pair[0].area.width < pair[1].area.x);
            let between = Vector2::new(pair[1].area.x - 1.0, NAV_HEIGHT / 2.0);
            assert_eq!(nav_hotspots().hit(between), None);
        }
    }

    #[test]
    fn misses_outside_every_label() {
        let hotspots = nav_hotspots();
        assert_eq!(hotspots.hit(Vector2::new(NAV_FIRST_X - 40.0, 30.0)), None);
        assert_eq!(hotspots.hit(Vector2::new(NAV_FIRST_X + 10.0, NAV_HEIGHT + 5.0)), None);
    }

    #[test]
    fn page_text_under_the_nav_bar_is_not_clickable() {
        let mut hotspots = nav_hotspots();
        let url = Target::Url("https://example.com".to_string());
        hotspots.text("https://example.com", 100.0, 20, 20, url.clone());
        assert_eq!(hotspots.hit(Vector2::new(110.0, 30.0)), None);

        // Half hidden: only the part below the bar responds
        hotspots.text("https://example.com", 100.0, NAV_HEIGHT as i32 - 10, 20, url.clone());
        assert_eq!(hotspots.hit(Vector2::new(110.0, NAV_HEIGHT - 5.0)), None);
        assert_eq!(hotspots.hit(Vector2::new(110.0, NAV_HEIGHT + 5.0)), Some(&url));
    }

    #[test]
    fn cleared_hotspots_hit_nothing() {
        let mut hotspots = nav_hotspots();
        hotspots.text("mail", 300.0, 500, 20, Target::Url("mailto:a@example.com".to_string()));
        assert!(hotspots.hit(Vector2::new(305.0, 505.0)).is_some());
        hotspots.clear();
        assert_eq!(hotspots.hit(Vector2::new(305.0, 505.0)), None);
        assert_eq!(hotspots.hit(center(&nav_items()[0].area)), None);
    }

    #[test]
    fn window_coordinates_scale_to_render_space() {
        let half = to_render_space(Vector2::new(480.0, 270.0), 960.0, 540.0, 1080.0);
        assert_eq!((half.x, half.y), (960.0, 540.0));
        let same = to_render_space(Vector2::new(100.0, 50.0), RENDER_WIDTH as f32, 1200.0, 1200.0);
        assert_eq!((same.x, same.y), (100.0, 50.0));
        let unsized = to_render_space(Vector2::new(7.0, 9.0), 0.0, 0.0, 1080.0);
        assert_eq!((unsized.x, unsized.y), (7.0, 9.0));
    }
}
