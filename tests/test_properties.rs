use alien_defense::compute::{advance, fire, init_state};
use alien_defense::config::FieldConfig;
use alien_defense::entities::{GameStatus, Intents};
use alien_defense::geometry::{overlaps, Rect};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn arb_rect() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

/// One tick's worth of input: (move_left, move_right, fire).
fn arb_inputs() -> impl Strategy<Value = Vec<(bool, bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..400)
}

proptest! {
    #[test]
    fn overlaps_is_symmetric(a in arb_rect(), b in arb_rect()) {
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn solid_rect_overlaps_itself(
        x in -500.0f32..500.0,
        y in -500.0f32..500.0,
        w in 1.0f32..200.0,
        h in 1.0f32..200.0
    ) {
        let a = Rect::new(x, y, w, h);
        prop_assert!(overlaps(&a, &a));
    }

    #[test]
    fn touching_edges_do_not_overlap(a in arb_rect()) {
        let right_neighbour = Rect::new(a.right(), a.y, 10.0, a.height);
        let below = Rect::new(a.x, a.bottom(), a.width, 10.0);
        prop_assert!(!overlaps(&a, &right_neighbour));
        prop_assert!(!overlaps(&a, &below));
    }

    #[test]
    fn simulation_invariants_hold(seed in any::<u64>(), inputs in arb_inputs()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = init_state(FieldConfig::default());
        let height = world.field.height();

        for (move_left, move_right, shoot) in inputs {
            if world.status.is_terminal() {
                break;
            }
            let before = world.clone();
            let next = if shoot { fire(&world) } else { world.clone() };
            world = advance(&next, Intents { move_left, move_right }, &mut rng);

            prop_assert!(world.score >= before.score);
            prop_assert_eq!((world.score - before.score) % 10, 0);
            prop_assert!(world.lives <= before.lives);
            prop_assert_eq!(world.aliens.len(), 32);
            if world.lives == 0 && world.alive_aliens().next().is_some() {
                prop_assert_eq!(world.status, GameStatus::Lost);
            }
            if world.status == GameStatus::Won {
                prop_assert!(world.aliens.iter().all(|a| !a.alive));
            }
            for b in &world.bullets {
                prop_assert!(b.y >= 0.0 && b.y <= height, "bullet escaped at y={}", b.y);
            }
            prop_assert_eq!(world.frame, before.frame + 1);
        }
    }
}
