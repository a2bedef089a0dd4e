use std::path::PathBuf;
use anyhow::{Result, anyhow};
use raylib::prelude::*;
use tracing::{debug, info, warn};
use crate::constants::*;
use crate::content::Content;
use crate::page::SectionKind;
use crate::portfolio::autoscroll::AutoScroll;
use crate::portfolio::backdrop::Backdrop;
use crate::portfolio::draw::draw_page;
use crate::portfolio::links::{Hotspots, Target, to_render_space};
use crate::session::PageSession;
use crate::texture_loader::load_photos;
use crate::theme::Theme;

const SHORTCUTS: [(KeyboardKey, usize); 6] = [
    (KeyboardKey::KEY_ONE, 1),
    (KeyboardKey::KEY_TWO, 2),
    (KeyboardKey::KEY_THREE, 3),
    (KeyboardKey::KEY_FOUR, 4),
    (KeyboardKey::KEY_FIVE, 5),
    (KeyboardKey::KEY_SIX, 6),
];

pub struct PortfolioEngine {
    content: Option<Content>,
    theme: Theme,
    session: Option<PageSession>,
    photos: Vec<Texture2D>,
    backdrop: Backdrop,
    autoscroll: Option<AutoScroll>,
    hotspots: Hotspots,
}

impl PortfolioEngine {
    pub fn new(content: Content, theme: Theme, autoplay: bool) -> Self {
        Self {
            content: Some(content),
            theme,
            session: None,
            photos: Vec::new(),
            backdrop: Backdrop::new(),
            autoscroll: autoplay.then(AutoScroll::new),
            hotspots: Hotspots::default(),
        }
    }
}

fn follow(session: &mut PageSession, target: &Target) {
    match target {
        Target::Section(kind) => session.scroll_to_section(*kind),
        Target::Url(url) if url.contains('\0') => warn!(url = %url.escape_debug(), "refusing to open malformed link"),
        Target::Url(url) => {
            info!(url = %url, "opening link");
            open_url(url);
        }
    }
}

/// Clicks follow whatever was drawn under the pointer on the last frame.
fn handle_mouse(rl: &RaylibHandle, session: &mut PageSession, hotspots: &Hotspots) {
    let screen_width = rl.get_screen_width() as f32;
    let screen_height = rl.get_screen_height() as f32;
    let point = to_render_space(rl.get_mouse_position(), screen_width, screen_height, session.viewport_height());
    let target = hotspots.hit(point);

    let cursor = if target.is_some() { MouseCursor::MOUSE_CURSOR_POINTING_HAND } else { MouseCursor::MOUSE_CURSOR_DEFAULT };
    rl.set_mouse_cursor(cursor);

    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        if let Some(target) = target {
            follow(session, target);
        }
    }
}

fn handle_input(rl: &RaylibHandle, session: &mut PageSession, theme: &mut Theme, dt: f32) {
    let wheel = rl.get_mouse_wheel_move();
    if wheel != 0.0 {
        session.scroll_by(-wheel * WHEEL_STEP);
    }
    if rl.is_key_down(KeyboardKey::KEY_DOWN) {
        session.scroll_by(KEY_SCROLL_SPEED * dt);
    }
    if rl.is_key_down(KeyboardKey::KEY_UP) {
        session.scroll_by(-KEY_SCROLL_SPEED * dt);
    }

    let page = session.viewport_height() - NAV_HEIGHT;
    if rl.is_key_pressed(KeyboardKey::KEY_PAGE_DOWN) || rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
        session.scroll_by(page);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_PAGE_UP) {
        session.scroll_by(-page);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_HOME) {
        session.scroll_to(0.0);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_END) {
        let end = session.scroll().max();
        session.scroll_to(end);
    }

    for (key, number) in SHORTCUTS {
        if rl.is_key_pressed(key) {
            if let Some(kind) = SectionKind::from_shortcut(number) {
                session.scroll_to_section(kind);
            }
        }
    }

    if rl.is_key_pressed(KeyboardKey::KEY_T) {
        *theme = theme.next();
        info!(theme = ?theme, "theme changed");
    }
}

impl crate::engine::Engine for PortfolioEngine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, photos: &[PathBuf]) -> Result<()> {
        let content = self.content.take().ok_or_else(|| anyhow!("engine is already initialized"))?;
        self.photos = load_photos(rl, thread, photos);
        info!(requested = photos.len(), loaded = self.photos.len(), "photos loaded");

        let mut session = PageSession::new(content, self.photos.len(), RENDER_HEIGHT as f32)?;
        session.mount()?;
        self.session = Some(session);
        Ok(())
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        match self.autoscroll.as_mut() {
            Some(autoscroll) => {
                if !autoscroll.advance(session, dt) {
                    return false;
                }
            }
            None => {
                handle_mouse(rl, session, &self.hotspots);
                handle_input(rl, session, &mut self.theme, dt);
            }
        }
        session.update(dt);

        let theme = self.theme;
        let backdrop = &self.backdrop;
        let photos = &self.photos;
        let hotspots = &mut self.hotspots;
        rl.draw_texture_mode(thread, framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            draw_page(&mut d, hotspots, session, theme, backdrop, photos);
        });

        true
    }

    fn resize(&mut self, height: i32) {
        if let Some(session) = self.session.as_mut() {
            session.set_viewport(height as f32);
            debug!(height, page = session.page().height(), timers = session.active_timers(), "viewport resized");
        }
    }

    fn shutdown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.unmount();
        }
    }
}
