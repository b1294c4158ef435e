//! Behaviour controller for the overlay sprite.
//!
//! [`Mascot`] is the only place that changes [`BehaviorState`]. Every input
//! (a global click, a local press, a timer tick) goes through one of its
//! methods on the UI thread, and each transition restarts the matching frame
//! sequence through [`Mascot::enter`].

use crate::animation::{Animator, FrameId, SequenceKind};
use crate::assets::{Frame, FrameStore};
use crate::clock::Clock;
use crate::config::MascotConfig;
use crate::geometry::{Point, Rect, Size};
use crate::motion::{step_towards, MotionStep};
use std::sync::Arc;
use std::time::Instant;

/// Surface size used while the current frame is blank.
const BLANK_SIZE: Size = Size::new(1, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorState {
    /// Standing still; switches to [`BehaviorState::Waiting`] at `waiting_at`.
    Idle { waiting_at: Instant },
    Waiting,
    Frozen,
    /// Chasing a click. `destination` is the target top-left position.
    Running { destination: Point },
    /// Held by the pointer. `offset` is the press position inside the sprite.
    Dragging { offset: Point },
}

impl BehaviorState {
    pub fn sequence(&self) -> SequenceKind {
        match self {
            BehaviorState::Idle { .. } => SequenceKind::Idle,
            BehaviorState::Waiting => SequenceKind::Waiting,
            BehaviorState::Frozen => SequenceKind::Frozen,
            BehaviorState::Running { .. } => SequenceKind::Running,
            BehaviorState::Dragging { .. } => SequenceKind::Dragging,
        }
    }
}

pub struct Mascot {
    config: MascotConfig,
    frames: FrameStore,
    clock: Arc<dyn Clock>,
    state: BehaviorState,
    frozen: bool,
    flip_horizontal: bool,
    position: Point,
    animator: Animator,
    next_motion_at: Option<Instant>,
}

impl Mascot {
    /// Create the mascot at the configured start position, already idle.
    pub fn new(config: MascotConfig, frames: FrameStore, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let position = config.start_position;
        let state = BehaviorState::Idle {
            waiting_at: now + config.idle_timeout,
        };
        Self {
            animator: Animator::new(state.sequence(), now),
            config,
            frames,
            clock,
            state,
            frozen: false,
            flip_horizontal: false,
            position,
            next_motion_at: None,
        }
    }

    fn enter(&mut self, state: BehaviorState) {
        let now = self.clock.now();
        let from = self.state.sequence();
        self.state = state;
        self.next_motion_at = match state {
            BehaviorState::Running { .. } => Some(now + self.config.motion_interval),
            _ => None,
        };
        self.animator.play(state.sequence(), now);
        tracing::debug!(from = ?from, to = ?state.sequence(), "behavior changed");
    }

    /// Settle into the resting state the freeze flag dictates.
    fn rest(&mut self) {
        if self.frozen {
            self.enter(BehaviorState::Frozen);
        } else {
            let waiting_at = self.clock.now() + self.config.idle_timeout;
            self.enter(BehaviorState::Idle { waiting_at });
        }
    }

    /// Start chasing a click at screen point `click`. Ignored while frozen or
    /// held by the pointer.
    pub fn set_destination(&mut self, click: Point) -> bool {
        if self.frozen || matches!(self.state, BehaviorState::Dragging { .. }) {
            tracing::trace!(?click, "click ignored");
            return false;
        }
        let destination = click - self.size().half();
        self.enter(BehaviorState::Running { destination });
        true
    }

    /// Advance one chase step. Does nothing unless running.
    pub fn motion_tick(&mut self) {
        let BehaviorState::Running { destination } = self.state else {
            return;
        };
        match step_towards(self.position, destination, self.config.speed) {
            MotionStep::Arrived { position } => {
                self.position = position;
                self.rest();
            }
            MotionStep::Advance { position, flip } => {
                self.position = position;
                self.flip_horizontal = flip;
            }
        }
    }

    /// Left button pressed at `local` (window coordinates). Starts a drag when
    /// the press lands on the sprite.
    pub fn press_left(&mut self, local: Point) -> bool {
        if !self.sprite_rect().contains(local) {
            return false;
        }
        self.enter(BehaviorState::Dragging { offset: local });
        true
    }

    /// Pointer now at screen point `cursor`. Keeps the grab offset under it.
    pub fn drag_to(&mut self, cursor: Point) {
        if let BehaviorState::Dragging { offset } = self.state {
            self.position = cursor - offset;
        }
    }

    pub fn release_left(&mut self) {
        if matches!(self.state, BehaviorState::Dragging { .. }) {
            self.rest();
        }
    }

    /// Right button pressed at `local`. Toggles freeze mode when on the sprite.
    pub fn press_right(&mut self, local: Point) -> bool {
        if !self.sprite_rect().contains(local) {
            return false;
        }
        self.frozen = !self.frozen;
        tracing::info!(frozen = self.frozen, "freeze mode toggled");
        self.rest();
        true
    }

    /// Run whatever timers are due: chase step, idle timeout, frame advance.
    pub fn update(&mut self) {
        let now = self.clock.now();
        if let Some(due) = self.next_motion_at {
            if now >= due {
                let mut next = due + self.config.motion_interval;
                if next <= now {
                    next = now + self.config.motion_interval;
                }
                self.next_motion_at = Some(next);
                self.motion_tick();
            }
        }
        if let BehaviorState::Idle { waiting_at } = self.state {
            if now >= waiting_at {
                self.enter(BehaviorState::Waiting);
            }
        }
        self.animator.tick(now);
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, BehaviorState::Dragging { .. })
    }

    pub fn destination(&self) -> Option<Point> {
        match self.state {
            BehaviorState::Running { destination } => Some(destination),
            _ => None,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn flip_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn current_frame_id(&self) -> Option<FrameId> {
        self.animator.current_frame()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.current_frame_id().and_then(|id| self.frames.get(id))
    }

    /// Surface size: exactly the current frame, or 1x1 when it is blank.
    pub fn size(&self) -> Size {
        self.current_frame().map(Frame::size).unwrap_or(BLANK_SIZE)
    }

    /// Window rectangle in screen coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size())
    }

    /// Rendered sprite in window coordinates. Empty when the frame is blank.
    fn sprite_rect(&self) -> Rect {
        let size = self.current_frame().map(Frame::size).unwrap_or_default();
        Rect::new(Point::default(), size)
    }

    pub fn config(&self) -> &MascotConfig {
        &self.config
    }
}
