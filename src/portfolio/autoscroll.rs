use tracing::debug;
use crate::constants::*;
use crate::session::PageSession;
use crate::state::AutoScrollState;

/// Scripted scroll-through used when recording.
pub struct AutoScroll {
    state: AutoScrollState,
    timer: f32,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self { state: AutoScrollState::HoldTop, timer: 0.0 }
    }

    /// Moves the page for one frame. Returns `false` once the run is over.
    pub fn advance(&mut self, session: &mut PageSession, dt: f32) -> bool {
        match self.state {
            AutoScrollState::HoldTop => {
                self.timer += dt;
                if self.timer >= AUTO_SCROLL_HOLD {
                    self.state = AutoScrollState::Scrolling;
                    debug!("auto scroll started");
                }
            }
            AutoScrollState::Scrolling => {
                session.scroll_by(AUTO_SCROLL_SPEED * dt);
                if session.scroll().at_end() {
                    self.state = AutoScrollState::HoldBottom;
                    self.timer = 0.0;
                }
            }
            AutoScrollState::HoldBottom => {
                self.timer += dt;
                if self.timer >= AUTO_SCROLL_HOLD {
                    self.state = AutoScrollState::Finished;
                    debug!("auto scroll finished");
                }
            }
            AutoScrollState::Finished => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;

    #[test]
    fn runs_top_to_bottom_then_stops() {
        let mut session = PageSession::new(Content::default(), 0, RENDER_HEIGHT as f32).expect("session");
        session.mount().expect("mount");
        let mut auto = AutoScroll::new();

        let step = frame_time(FPS);
        let mut frames = 0;
        while auto.advance(&mut session, step) {
            session.update(step);
            frames += 1;
            assert!(frames < 100_000, "auto scroll never finished");
        }
        assert_eq!(auto.state, AutoScrollState::Finished);
        assert!(session.scroll().at_end());
        assert!(session.page().sections().iter().all(|section| section.gate.is_revealed()));

        let expected = session.scroll().max() / AUTO_SCROLL_SPEED + 2.0 * AUTO_SCROLL_HOLD;
        let elapsed = frames as f32 * step;
        assert!((elapsed - expected).abs() < 0.1, "took {elapsed}s, expected about {expected}s");
    }
}
