use rand::Rng;
use raylib::prelude::*;
use crate::constants::*;
use crate::scroll::ParallaxFrame;
use crate::theme::{Palette, faded};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Layer {
    Background, // Follows the background curve and spins with the page
    Grid,       // Follows the faster grid curve
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Shape {
    Glow,
    Diamond,
    Ring,
}

#[derive(Debug, Clone)]
pub struct Orb {
    position: Vector2, // Normalized viewport position at the top of the page
    size: f32,
    accent: usize,
    layer: Layer,
    shape: Shape,
    scales: bool,
}

impl Orb {
    /// Screen position for the current parallax frame. Layer offsets are a
    /// share of the viewport height.
    pub fn screen_position(&self, frame: &ParallaxFrame, viewport_height: f32) -> Vector2 {
        let percent = match self.layer {
            Layer::Background => frame.background_y,
            Layer::Grid => frame.grid_y,
        };
        Vector2::new(
            self.position.x * RENDER_WIDTH as f32,
            self.position.y * viewport_height + percent / 100.0 * viewport_height,
        )
    }

    pub fn screen_size(&self, frame: &ParallaxFrame) -> f32 {
        if self.scales { self.size * frame.scale } else { self.size }
    }
}

/// Floating decorative shapes behind the page content.
pub struct Backdrop {
    orbs: Vec<Orb>,
}

impl Backdrop {
    pub fn new() -> Self {
        let mut rng = rand::rng();
        // Anchor points of the hand-placed shapes, jittered a little per run
        let anchors = [
            (0.06, 0.12, 128.0, 0, Layer::Background, Shape::Glow, false),
            (0.88, 0.20, 96.0, 2, Layer::Background, Shape::Glow, false),
            (0.25, 0.78, 160.0, 3, Layer::Grid, Shape::Glow, false),
            (0.93, 0.50, 64.0, 0, Layer::Grid, Shape::Diamond, true),
            (0.66, 0.70, 80.0, 1, Layer::Background, Shape::Ring, false),
        ];
        let orbs = anchors
            .into_iter()
            .map(|(x, y, size, accent, layer, shape, scales)| Orb {
                position: Vector2::new(
                    x + rng.random_range(-0.02..0.02),
                    y + rng.random_range(-0.02..0.02),
                ),
                size: size * (1.0 + rng.random_range(-0.1..0.1)),
                accent,
                layer,
                shape,
                scales,
            })
            .collect();
        Self { orbs }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, frame: &ParallaxFrame, palette: &Palette, viewport_height: f32) {
        draw_grid(d, frame, palette, viewport_height);

        let accents = palette.accents();
        for orb in &self.orbs {
            let center = orb.screen_position(frame, viewport_height);
            let size = orb.screen_size(frame);
            let color = accents[orb.accent % accents.len()];
            match orb.shape {
                Shape::Glow => {
                    // Soft blob: stacked translucent discs
                    for step in 0..4 {
                        let radius = size * 0.5 * (1.0 - step as f32 * 0.2);
                        d.draw_circle_v(center, radius, faded(color, 0.04 + step as f32 * 0.02));
                    }
                }
                Shape::Diamond => {
                    let rec = Rectangle::new(center.x, center.y, size, size);
                    let origin = Vector2::new(size / 2.0, size / 2.0);
                    d.draw_rectangle_pro(rec, origin, 45.0 + frame.rotation, faded(color, 0.2));
                }
                Shape::Ring => {
                    d.draw_circle_lines(center.x as i32, center.y as i32, size / 2.0, faded(color, 0.3));
                }
            }
        }
    }
}

const GRID_SPACING: f32 = 64.0;

fn draw_grid(d: &mut RaylibDrawHandle, frame: &ParallaxFrame, palette: &Palette, viewport_height: f32) {
    let color = faded(palette.blue, 0.05);
    let shift = (frame.grid_y / 100.0 * viewport_height).rem_euclid(GRID_SPACING);
    let mut x = 0.0;
    while x <= RENDER_WIDTH as f32 {
        d.draw_line(x as i32, 0, x as i32, viewport_height as i32, color);
        x += GRID_SPACING;
    }
    let mut y = shift - GRID_SPACING;
    while y <= viewport_height {
        d.draw_line(0, y as i32, RENDER_WIDTH, y as i32, color);
        y += GRID_SPACING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::Parallax;

    #[test]
    fn grid_layer_outruns_background_layer() {
        let backdrop = Backdrop::new();
        let parallax = Parallax::default();
        let top = parallax.sample(0.0);
        let bottom = parallax.sample(1.0);

        for orb in &backdrop.orbs {
            let travel = orb.screen_position(&bottom, RENDER_HEIGHT as f32).y - orb.screen_position(&top, RENDER_HEIGHT as f32).y;
            let expected = match orb.layer {
                Layer::Background => 0.30,
                Layer::Grid => 0.70,
            } * RENDER_HEIGHT as f32;
            assert!((travel - expected).abs() < 0.5, "{:?} moved {travel}", orb.layer);
        }
    }

    #[test]
    fn only_flagged_shapes_follow_scale_curve() {
        let backdrop = Backdrop::new();
        let middle = Parallax::default().sample(0.5);
        for orb in &backdrop.orbs {
            let ratio = orb.screen_size(&middle) / orb.size;
            if orb.scales {
                assert!((ratio - 1.1).abs() < 1e-4);
            } else {
                assert_eq!(ratio, 1.0);
            }
        }
    }
}
