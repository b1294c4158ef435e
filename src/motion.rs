use crate::geometry::Point;

/// Outcome of one chase tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionStep {
    /// Still travelling. `flip` is true when heading left.
    Advance { position: Point, flip: bool },
    /// Close enough: snapped onto the destination.
    Arrived { position: Point },
}

/// Move `from` towards `to` by at most `speed` pixels.
///
/// Within `speed` of the target the step snaps exactly onto it. Otherwise each
/// axis moves by `speed * delta / distance`, truncated toward zero, so the
/// direction is preserved.
pub fn step_towards(from: Point, to: Point, speed: i32) -> MotionStep {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance <= speed as f64 {
        return MotionStep::Arrived { position: to };
    }
    let step = speed as f64;
    let position = Point::new(
        from.x + (dx / distance * step) as i32,
        from.y + (dy / distance * step) as i32,
    );
    MotionStep::Advance {
        position,
        flip: dx < 0.0,
    }
}
