use crate::geometry::Point;
use std::time::Duration;

/// Side of the square box every frame is scaled to fit into.
pub const SPRITE_SIZE: u32 = 120;

/// Tunables for the overlay. There is no settings file; everything here is
/// fixed at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct MascotConfig {
    pub sprite_size: u32,
    /// Pixels travelled per motion tick while chasing a click.
    pub speed: i32,
    pub motion_interval: Duration,
    /// Time spent on the idle frame before the waiting fidget starts.
    pub idle_timeout: Duration,
    /// Clicks buffered between the watcher thread and the UI thread.
    pub click_queue_capacity: usize,
    pub start_position: Point,
    pub debug_logging: bool,
}

impl Default for MascotConfig {
    fn default() -> Self {
        Self {
            sprite_size: SPRITE_SIZE,
            speed: 10,
            motion_interval: Duration::from_millis(16),
            idle_timeout: Duration::from_millis(5000),
            click_queue_capacity: 64,
            start_position: Point::new(200, 200),
            debug_logging: cfg!(debug_assertions),
        }
    }
}
