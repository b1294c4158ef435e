use sonic_overlay::animation::{all_frame_ids, Animator, FrameSequence, SequenceKind};
use std::time::{Duration, Instant};

#[test]
fn waiting_sequence_alternates_then_holds() {
    let seq = FrameSequence::for_kind(SequenceKind::Waiting);
    assert_eq!(seq.frames(), &[3, 4, 3, 4, 3, 4, 3, 4, 3, 4, 5, 5, 5]);
    assert_eq!(seq.interval(), Duration::from_millis(350));
}

#[test]
fn motion_sequences_are_eight_frames_at_100ms() {
    let running = FrameSequence::for_kind(SequenceKind::Running);
    assert_eq!(running.frames(), &[16, 17, 18, 19, 20, 21, 22, 23]);
    assert_eq!(running.interval(), Duration::from_millis(100));

    let dragging = FrameSequence::for_kind(SequenceKind::Dragging);
    assert_eq!(dragging.frames(), &[8, 9, 10, 11, 12, 13, 14, 15]);
    assert_eq!(dragging.interval(), Duration::from_millis(100));
}

#[test]
fn idle_and_frozen_sequences() {
    assert_eq!(FrameSequence::for_kind(SequenceKind::Idle).frames(), &[1]);
    let frozen = FrameSequence::for_kind(SequenceKind::Frozen);
    assert_eq!(frozen.frames(), &[6, 7]);
    assert_eq!(frozen.interval(), Duration::from_millis(350));
}

#[test]
fn frame_ids_cover_every_sequence_once() {
    let ids = all_frame_ids();
    assert_eq!(ids.len(), 22);
    assert_eq!(ids.first(), Some(&1));
    assert_eq!(ids.last(), Some(&23));
    assert!(!ids.contains(&2));
}

#[test]
fn animator_advances_on_interval_and_wraps() {
    let t0 = Instant::now();
    let mut animator = Animator::new(SequenceKind::Frozen, t0);
    assert_eq!(animator.current_frame(), Some(6));

    assert!(!animator.tick(t0 + Duration::from_millis(349)));
    assert_eq!(animator.index(), 0);

    assert!(animator.tick(t0 + Duration::from_millis(350)));
    assert_eq!(animator.current_frame(), Some(7));

    assert!(animator.tick(t0 + Duration::from_millis(700)));
    assert_eq!(animator.current_frame(), Some(6));
}

#[test]
fn animator_resyncs_after_stall() {
    let t0 = Instant::now();
    let mut animator = Animator::new(SequenceKind::Running, t0);
    let late = t0 + Duration::from_secs(10);
    animator.tick(late);
    assert_eq!(animator.index(), 1);
    // No burst of catch-up frames.
    assert!(!animator.tick(late + Duration::from_millis(50)));
    assert!(animator.tick(late + Duration::from_millis(100)));
    assert_eq!(animator.index(), 2);
}

#[test]
fn play_restarts_from_first_frame() {
    let t0 = Instant::now();
    let mut animator = Animator::new(SequenceKind::Running, t0);
    animator.tick(t0 + Duration::from_millis(100));
    animator.tick(t0 + Duration::from_millis(200));
    assert_eq!(animator.index(), 2);

    animator.play(SequenceKind::Dragging, t0 + Duration::from_millis(250));
    assert_eq!(animator.kind(), SequenceKind::Dragging);
    assert_eq!(animator.index(), 0);
    assert_eq!(animator.current_frame(), Some(8));
}
