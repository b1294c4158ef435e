use std::time::{Duration, Instant};

/// Number of a sprite file, `MiniSonicAnimations_<n>.png`.
pub type FrameId = u32;

/// Which looping animation is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    Idle,
    Waiting,
    Frozen,
    Running,
    Dragging,
}

impl SequenceKind {
    pub const ALL: [SequenceKind; 5] = [
        SequenceKind::Idle,
        SequenceKind::Waiting,
        SequenceKind::Frozen,
        SequenceKind::Running,
        SequenceKind::Dragging,
    ];
}

/// An ordered, looping list of frames shown at a fixed interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<FrameId>,
    interval: Duration,
}

impl FrameSequence {
    pub fn new(frames: Vec<FrameId>, interval: Duration) -> Self {
        Self { frames, interval }
    }

    pub fn for_kind(kind: SequenceKind) -> Self {
        match kind {
            SequenceKind::Idle => Self::new(vec![1], Duration::from_millis(350)),
            SequenceKind::Waiting => {
                let mut frames = [3, 4].repeat(5);
                frames.extend([5; 3]);
                Self::new(frames, Duration::from_millis(350))
            }
            SequenceKind::Frozen => Self::new(vec![6, 7], Duration::from_millis(350)),
            SequenceKind::Running => Self::new((16..24).collect(), Duration::from_millis(100)),
            SequenceKind::Dragging => Self::new((8..16).collect(), Duration::from_millis(100)),
        }
    }

    pub fn frames(&self) -> &[FrameId] {
        &self.frames
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Every frame number any sequence refers to, deduplicated and sorted.
pub fn all_frame_ids() -> Vec<FrameId> {
    let mut ids: Vec<FrameId> = SequenceKind::ALL
        .iter()
        .flat_map(|kind| FrameSequence::for_kind(*kind).frames)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Plays one [`FrameSequence`] at a time.
#[derive(Debug, Clone)]
pub struct Animator {
    kind: SequenceKind,
    sequence: FrameSequence,
    index: usize,
    next_frame_at: Instant,
}

impl Animator {
    pub fn new(kind: SequenceKind, now: Instant) -> Self {
        let sequence = FrameSequence::for_kind(kind);
        let next_frame_at = now + sequence.interval();
        Self {
            kind,
            sequence,
            index: 0,
            next_frame_at,
        }
    }

    /// Replace the active sequence and restart it from its first frame.
    pub fn play(&mut self, kind: SequenceKind, now: Instant) {
        *self = Self::new(kind, now);
    }

    /// Advance one frame if the interval elapsed. Returns whether the shown
    /// frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next_frame_at || self.sequence.is_empty() {
            return false;
        }
        let previous = self.current_frame();
        self.index = (self.index + 1) % self.sequence.len();
        self.next_frame_at += self.sequence.interval();
        if self.next_frame_at <= now {
            // Fell behind (e.g. the window was hidden); resync instead of bursting.
            self.next_frame_at = now + self.sequence.interval();
        }
        previous != self.current_frame()
    }

    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_frame(&self) -> Option<FrameId> {
        self.sequence.frames().get(self.index).copied()
    }
}
