use sonic_overlay::geometry::Point;
use sonic_overlay::motion::{step_towards, MotionStep};

#[test]
fn straight_step_moves_full_speed() {
    assert_eq!(
        step_towards(Point::new(0, 0), Point::new(100, 0), 10),
        MotionStep::Advance {
            position: Point::new(10, 0),
            flip: false
        }
    );
}

#[test]
fn diagonal_step_keeps_direction() {
    assert_eq!(
        step_towards(Point::new(0, 0), Point::new(30, 40), 10),
        MotionStep::Advance {
            position: Point::new(6, 8),
            flip: false
        }
    );
}

#[test]
fn components_truncate_toward_zero() {
    assert_eq!(
        step_towards(Point::new(0, 0), Point::new(100, 33), 10),
        MotionStep::Advance {
            position: Point::new(9, 3),
            flip: false
        }
    );
    assert_eq!(
        step_towards(Point::new(0, 0), Point::new(-100, -33), 10),
        MotionStep::Advance {
            position: Point::new(-9, -3),
            flip: true
        }
    );
}

#[test]
fn snaps_when_within_one_step() {
    assert_eq!(
        step_towards(Point::new(0, 0), Point::new(6, 8), 10),
        MotionStep::Arrived {
            position: Point::new(6, 8)
        }
    );
    assert_eq!(
        step_towards(Point::new(3, 3), Point::new(3, 3), 10),
        MotionStep::Arrived {
            position: Point::new(3, 3)
        }
    );
}

#[test]
fn vertical_travel_does_not_flip() {
    match step_towards(Point::new(0, 0), Point::new(0, -200), 10) {
        MotionStep::Advance { position, flip } => {
            assert_eq!(position, Point::new(0, -10));
            assert!(!flip);
        }
        other => panic!("unexpected step {other:?}"),
    }
}
