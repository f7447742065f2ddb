use meshview::ui::trackball::{PointerInput, Trackball, TrackballEvent};
use nalgebra::{Point2, UnitQuaternion, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const VIEWPORT: Vector2<f32> = Vector2::new(860.0, 640.0);

#[test]
fn long_random_drag_keeps_unit_rotation() {
    let mut rng = StdRng::seed_from_u64(0x7ac6_ba11);
    let mut trackball = Trackball::new();
    let mut rotation = UnitQuaternion::identity();
    let mut rotated_frames = 0;

    for frame in 0..10_000 {
        // Occasional releases and re-presses, sometimes off-window.
        let primary_down = frame % 500 != 0;
        let position = if rng.random_range(0..100) == 0 {
            None
        } else {
            Some(Point2::new(
                rng.random_range(-100.0..VIEWPORT.x + 100.0),
                rng.random_range(-100.0..VIEWPORT.y + 100.0),
            ))
        };
        let input = PointerInput {
            position,
            primary_down,
            over_ui: false,
            viewport: VIEWPORT,
        };

        if let TrackballEvent::Rotated { axis, angle } = trackball.update(&mut rotation, &input) {
            assert!(angle.is_finite() && angle > 0.0);
            assert!(axis.iter().all(|c| c.is_finite()));
            rotated_frames += 1;
        }

        let q = rotation.quaternion();
        assert!(q.coords.iter().all(|c| c.is_finite()), "frame {frame}: {q:?}");
        assert!((q.norm() - 1.0).abs() < 1e-4, "frame {frame}: |q| = {}", q.norm());
    }

    assert!(rotated_frames > 8_000);
}

#[test]
fn tiny_jitter_never_moves_the_model() {
    let mut trackball = Trackball::new();
    let mut rotation = UnitQuaternion::identity();
    let press = |x: f32| PointerInput {
        position: Some(Point2::new(x, 320.0)),
        primary_down: true,
        over_ui: false,
        viewport: VIEWPORT,
    };

    trackball.update(&mut rotation, &press(430.0));
    for _ in 0..1000 {
        assert_eq!(trackball.update(&mut rotation, &press(430.0)), TrackballEvent::Skipped);
    }
    assert_eq!(rotation, UnitQuaternion::identity());
}

#[test]
fn small_step_random_walk_keeps_unit_rotation() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0003);
    let mut trackball = Trackball::new();
    let mut rotation = UnitQuaternion::identity();
    let mut position = Point2::new(VIEWPORT.x / 2.0, VIEWPORT.y / 2.0);
    let mut rotated_frames = 0;

    for frame in 0..10_000 {
        position.x = (position.x + rng.random_range(-3.0..=3.0)).clamp(0.0, VIEWPORT.x);
        position.y = (position.y + rng.random_range(-3.0..=3.0)).clamp(0.0, VIEWPORT.y);
        let input = PointerInput {
            position: Some(position),
            primary_down: true,
            over_ui: false,
            viewport: VIEWPORT,
        };

        match trackball.update(&mut rotation, &input) {
            TrackballEvent::Rotated { angle, .. } => {
                assert!(angle.is_finite() && angle > 0.0);
                rotated_frames += 1;
            }
            TrackballEvent::Anchored => assert_eq!(frame, 0),
            TrackballEvent::Skipped => {}
            other => panic!("frame {frame}: unexpected {other:?}"),
        }

        let q = rotation.quaternion();
        assert!(q.coords.iter().all(|c| c.is_finite()), "frame {frame}: {q:?}");
        assert!((q.norm() - 1.0).abs() < 1e-4, "frame {frame}: |q| = {}", q.norm());
    }

    assert!(rotated_frames > 5_000);
    assert!(rotation.angle().is_finite());
}
