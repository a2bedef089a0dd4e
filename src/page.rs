use crate::content::{Content, Experience};
use crate::reveal::{RevealGate, intersects};
use crate::text::{BADGE_SIZE, BODY_SIZE, badges_height, paragraph_height};

pub const SECTION_PADDING: f32 = 80.0;  // Space above and below section content
pub const HEADER_HEIGHT: f32 = 140.0;   // Section title and subtitle block
pub const TIMELINE_WIDTH: f32 = 1340.0; // Text column of a timeline entry
pub const TIMELINE_HEADING: f32 = 72.0; // Title and meta lines of a timeline entry
pub const TIMELINE_GAP: f32 = 56.0;     // Between timeline entries
pub const PROJECT_ROW: f32 = 300.0;     // One row of two project cards
pub const SKILL_ROW: f32 = 170.0;       // One row of two skill groups
pub const SOCIAL_ROW: f32 = 240.0;      // One row of two social work cards
pub const CONTACT_BODY: f32 = 360.0;    // Contact card

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SectionKind {
    Home,
    Experience,
    Projects,
    Skills,
    Socialworks,
    Contact,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Home,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Skills,
        SectionKind::Socialworks,
        SectionKind::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Home => "Home",
            SectionKind::Experience => "Experience",
            SectionKind::Projects => "Projects",
            SectionKind::Skills => "Skills",
            SectionKind::Socialworks => "Socialworks",
            SectionKind::Contact => "Contact",
        }
    }

    /// Navigation shortcut, 1-based as shown in the nav bar.
    pub fn from_shortcut(number: usize) -> Option<SectionKind> {
        number.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub top: f32,
    pub height: f32,
    pub gate: RevealGate,
}

/// Height of one timeline entry: heading, wrapped description, then its skill badges.
pub fn experience_height(entry: &Experience) -> f32 {
    TIMELINE_HEADING
        + paragraph_height(&entry.description, BODY_SIZE, TIMELINE_WIDTH)
        + 6.0
        + badges_height(&entry.skills, BADGE_SIZE, TIMELINE_WIDTH)
        + TIMELINE_GAP
}

fn rows(count: usize, per_row: usize) -> f32 {
    count.div_ceil(per_row) as f32
}

fn body_height(kind: SectionKind, content: &Content) -> f32 {
    match kind {
        SectionKind::Home => 0.0,
        SectionKind::Experience => content.experience.iter().map(experience_height).sum(),
        SectionKind::Projects => rows(content.projects.len(), 2) * PROJECT_ROW,
        SectionKind::Skills => rows(content.skills.len(), 2) * SKILL_ROW,
        SectionKind::Socialworks => rows(content.social_works.len(), 2) * SOCIAL_ROW,
        SectionKind::Contact => CONTACT_BODY,
    }
}

/// Vertical layout of the whole page in document pixels.
#[derive(Debug, Clone)]
pub struct Page {
    sections: Vec<Section>,
}

impl Page {
    pub fn layout(content: &Content, viewport_height: f32) -> Self {
        let mut top = 0.0;
        let mut sections = Vec::with_capacity(SectionKind::ALL.len());
        for kind in SectionKind::ALL {
            let height = match kind {
                SectionKind::Home => viewport_height.max(HEADER_HEIGHT),
                _ => SECTION_PADDING * 2.0 + HEADER_HEIGHT + body_height(kind, content),
            };
            sections.push(Section { kind, top, height, gate: RevealGate::new() });
            top += height;
        }
        Self { sections }
    }

    /// Re-stacks sections for a new viewport height. Gates keep their state.
    pub fn relayout(&mut self, content: &Content, viewport_height: f32) {
        let fresh = Self::layout(content, viewport_height);
        for (section, laid_out) in self.sections.iter_mut().zip(fresh.sections) {
            section.top = laid_out.top;
            section.height = laid_out.height;
        }
    }

    pub fn height(&self) -> f32 {
        self.sections.last().map_or(0.0, |section| section.top + section.height)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// The section under a document position, used to highlight the nav bar.
    pub fn section_at(&self, position: f32) -> Option<SectionKind> {
        self.sections
            .iter()
            .rev()
            .find(|section| section.top <= position)
            .map(|section| section.kind)
    }

    pub fn subscribe_all(&mut self) {
        for section in self.sections.iter_mut() {
            section.gate.subscribe();
        }
    }

    /// Returns how many live subscriptions were dropped.
    pub fn unsubscribe_all(&mut self) -> usize {
        let mut dropped = 0;
        for section in self.sections.iter_mut() {
            if section.gate.unsubscribe() {
                dropped += 1;
            }
        }
        dropped
    }

    /// Samples every observing section against the viewport; returns the newly revealed ones.
    pub fn observe(&mut self, viewport_top: f32, viewport_height: f32) -> Vec<SectionKind> {
        let mut revealed = Vec::new();
        for section in self.sections.iter_mut() {
            if !section.gate.is_observing() {
                continue;
            }
            let visible = intersects(section.top, section.height, viewport_top, viewport_height);
            if section.gate.observe(visible) {
                revealed.push(section.kind);
            }
        }
        revealed
    }

    pub fn update(&mut self, dt: f32) {
        for section in self.sections.iter_mut() {
            section.gate.update(dt);
        }
    }
}
