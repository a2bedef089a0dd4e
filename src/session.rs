use thiserror::Error;
use tracing::{debug, info, warn};
use crate::constants::*;
use crate::content::Content;
use crate::page::{Page, SectionKind};
use crate::rotation::{RotationError, RotationSet, Rotator};
use crate::scroll::{CurveError, Parallax, ParallaxFrame, ScrollPosition};
use crate::state::SessionState;
use crate::timer::Timers;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("invalid rotation: {0}")]
    Rotation(#[from] RotationError),
    #[error("invalid parallax layer: {0}")]
    Parallax(#[from] CurveError),
}

/// Everything one mounted page owns: layout, scroll position, timers and gates.
///
/// Timers and visibility subscriptions are acquired in [`PageSession::mount`] and
/// released in [`PageSession::unmount`], which also runs on drop.
pub struct PageSession {
    content: Content,
    page: Page,
    scroll: ScrollPosition,
    parallax: Parallax,
    viewport_height: f32,
    timers: Timers,
    roles: Rotator<String>,
    photos: Option<Rotator<usize>>,
    state: SessionState,
}

impl PageSession {
    pub fn new(content: Content, photo_count: usize, viewport_height: f32) -> Result<Self, SessionError> {
        let roles = Rotator::new("roles", RotationSet::new(content.profile.roles.clone(), ROLE_PERIOD)?);
        let photos = match RotationSet::new((0..photo_count).collect(), PHOTO_PERIOD) {
            Ok(set) => Some(Rotator::new("photos", set)),
            Err(RotationError::Empty) => {
                warn!("no photos loaded, hero is shown without a portrait");
                None
            }
            Err(e) => return Err(e.into()),
        };
        let parallax = Parallax::with_layers(&content.parallax)?;
        let page = Page::layout(&content, viewport_height);
        let mut scroll = ScrollPosition::new();
        scroll.set_extent(page.height(), viewport_height);

        Ok(Self {
            content,
            page,
            scroll,
            parallax,
            viewport_height,
            timers: Timers::new(),
            roles,
            photos,
            state: SessionState::Created,
        })
    }

    pub fn mount(&mut self) -> Result<(), RotationError> {
        if self.state == SessionState::Mounted {
            return Ok(());
        }
        self.roles.mount(&mut self.timers)?;
        if let Some(photos) = self.photos.as_mut() {
            if let Err(e) = photos.mount(&mut self.timers) {
                // Nothing stays acquired when mounting fails half way
                self.roles.unmount(&mut self.timers);
                return Err(e);
            }
        }
        self.page.subscribe_all();
        self.state = SessionState::Mounted;
        info!(height = self.page.height(), timers = self.timers.active(), "page mounted");
        self.sync();
        Ok(())
    }

    /// Releases every timer and subscription. Returns how many handles were released;
    /// calling it again releases nothing.
    pub fn unmount(&mut self) -> usize {
        if self.state != SessionState::Mounted {
            return 0;
        }
        let mut released = 0;
        if self.roles.unmount(&mut self.timers) {
            released += 1;
        }
        if let Some(photos) = self.photos.as_mut() {
            if photos.unmount(&mut self.timers) {
                released += 1;
            }
        }
        released += self.page.unsubscribe_all();
        self.state = SessionState::Unmounted;
        info!(released, "page unmounted");
        released
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll.scroll_by(delta);
        self.sync();
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.scroll.scroll_to(offset);
        self.sync();
    }

    pub fn scroll_to_section(&mut self, kind: SectionKind) {
        if let Some(top) = self.page.section(kind).map(|section| section.top) {
            debug!(section = kind.label(), top, "jumping to section");
            self.scroll_to(top);
        }
    }

    /// Resize notification: re-stacks the page and re-samples visibility.
    pub fn set_viewport(&mut self, viewport_height: f32) {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return;
        }
        self.viewport_height = viewport_height;
        self.page.relayout(&self.content, viewport_height);
        self.scroll.set_extent(self.page.height(), viewport_height);
        self.sync();
    }

    fn sync(&mut self) {
        if self.state != SessionState::Mounted {
            return;
        }
        for kind in self.page.observe(self.scroll.offset(), self.viewport_height) {
            info!(section = kind.label(), "section revealed");
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.state != SessionState::Mounted {
            return;
        }
        for fired in self.timers.advance(dt) {
            if self.roles.timer() == Some(fired.id) {
                self.roles.on_fired(fired.count);
            } else if let Some(photos) = self.photos.as_mut().filter(|photos| photos.timer() == Some(fired.id)) {
                photos.on_fired(fired.count);
            }
        }
        self.roles.update(dt);
        if let Some(photos) = self.photos.as_mut() {
            photos.update(dt);
        }
        self.page.update(dt);
    }

    pub fn frame(&self) -> ParallaxFrame {
        self.parallax.sample(self.scroll.fraction())
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn scroll(&self) -> &ScrollPosition {
        &self.scroll
    }

    pub fn roles(&self) -> &Rotator<String> {
        &self.roles
    }

    pub fn photos(&self) -> Option<&Rotator<usize>> {
        self.photos.as_ref()
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn active_timers(&self) -> usize {
        self.timers.active()
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.unmount();
    }
}
