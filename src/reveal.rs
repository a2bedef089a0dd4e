use crate::constants::REVEAL_DURATION;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Visibility {
    Unrevealed, // Never intersected the viewport
    Revealed,   // Latched for the rest of the page view
}

/// Strict overlap between a section and the viewport, both as top + height.
pub fn intersects(top: f32, height: f32, viewport_top: f32, viewport_height: f32) -> bool {
    height > 0.0
        && viewport_height > 0.0
        && top < viewport_top + viewport_height
        && viewport_top < top + height
}

/// Latches the first time its section is seen and then plays the entrance
/// animation once.
#[derive(Debug, Clone)]
pub struct RevealGate {
    state: Visibility,
    subscribed: bool,
    animation_timer: f32,
}

impl RevealGate {
    pub fn new() -> Self {
        Self { state: Visibility::Unrevealed, subscribed: false, animation_timer: 0.0 }
    }

    pub fn subscribe(&mut self) {
        if self.state == Visibility::Unrevealed {
            self.subscribed = true;
        }
    }

    /// Returns `false` if there was no subscription to drop.
    pub fn unsubscribe(&mut self) -> bool {
        std::mem::replace(&mut self.subscribed, false)
    }

    pub fn is_observing(&self) -> bool {
        self.subscribed
    }

    /// Feeds one intersection sample. Returns `true` only on the reveal itself.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        if !self.subscribed || self.state == Visibility::Revealed || !intersecting {
            return false;
        }
        self.state = Visibility::Revealed;
        self.subscribed = false;
        self.animation_timer = 0.0;
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.state == Visibility::Revealed
    }

    pub fn update(&mut self, dt: f32) {
        if self.is_revealed() && self.animation_timer < REVEAL_DURATION {
            self.animation_timer = (self.animation_timer + dt).min(REVEAL_DURATION);
        }
    }

    /// Entrance progress in [0, 1], eased out. Zero until revealed.
    pub fn progress(&self) -> f32 {
        if !self.is_revealed() {
            return 0.0;
        }
        let t = (self.animation_timer / REVEAL_DURATION).clamp(0.0, 1.0);
        1.0 - (1.0 - t).powi(3) // easeOutCubic
    }
}

impl Default for RevealGate {
    fn default() -> Self {
        Self::new()
    }
}
