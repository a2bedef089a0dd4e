pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture before any resize
pub const MIN_RENDER_HEIGHT: i32 = 540;       // Render height range when following the window shape
pub const MAX_RENDER_HEIGHT: i32 = 2160;
pub const FPS: u32 = 60;                      // Default frames per second
pub const MAX_FPS: u32 = 240;

pub const ROLE_PERIOD: f32 = 3.0;             // Time between role label changes (seconds)
pub const PHOTO_PERIOD: f32 = 4.0;            // Time between portrait changes (seconds)
pub const FADE_DURATION: f32 = 0.5;           // Cross-fade between rotated items (seconds)
pub const REVEAL_DURATION: f32 = 0.6;         // Section entrance animation (seconds)
pub const REVEAL_RISE: f32 = 50.0;            // Entrance slide-up distance (pixels)

pub const NAV_HEIGHT: f32 = 72.0;             // Fixed navigation bar (pixels)
pub const WHEEL_STEP: f32 = 120.0;            // Scroll distance per wheel notch (pixels)
pub const KEY_SCROLL_SPEED: f32 = 1400.0;     // Scroll speed while an arrow key is held (pixels per second)

pub const AUTO_SCROLL_SPEED: f32 = 240.0;     // Record mode scroll speed (pixels per second)
pub const AUTO_SCROLL_HOLD: f32 = 2.0;        // Record mode pause at top and bottom (seconds)

/// Render texture height that keeps the window's aspect ratio at the fixed render width.
pub fn render_height_for(screen_width: i32, screen_height: i32) -> i32 {
    if screen_width <= 0 || screen_height <= 0 {
        return RENDER_HEIGHT;
    }
    let height = RENDER_WIDTH as i64 * screen_height as i64 / screen_width as i64;
    height.clamp(MIN_RENDER_HEIGHT as i64, MAX_RENDER_HEIGHT as i64) as i32
}

/// Time per frame (seconds).
pub fn frame_time(fps: u32) -> f32 {
    1.0 / fps.max(1) as f32
}
