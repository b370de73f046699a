use alien_defense::config::FieldConfig;
use alien_defense::entities::{BulletOwner, Intents, STARTING_LIVES};
use alien_defense::{GameError, Session, SessionPhase, ShapeKind};

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_session() -> Session<StepRng> {
    Session::new(FieldConfig::default(), StepRng::new(u64::MAX, 0))
}

fn running_session() -> Session<StepRng> {
    let mut s = quiet_session();
    s.start();
    s
}

/// Fire straight up from a spot under the given column until it is cleared.
/// Returns the number of ticks spent.
fn clear_column(session: &mut Session<StepRng>, col: usize) -> usize {
    let target_x = 80.0 + col as f32 * 60.0 + 20.0 - 25.0; // ship centred under the column
    let mut ticks = 0;
    while (session.world().player.x - target_x).abs() >= 7.0 {
        let right = session.world().player.x < target_x;
        let intents = Intents { move_left: !right, move_right: right };
        session.tick(intents, false).unwrap();
        ticks += 1;
    }
    while session.phase() == SessionPhase::Running
        && session
            .world()
            .aliens
            .iter()
            .skip(col)
            .step_by(8)
            .any(|a| a.alive)
    {
        session.tick(Intents::default(), true).unwrap();
        ticks += 1;
    }
    ticks
}

// ── Phase transitions ────────────────────────────────────────────────────────

#[test]
fn new_session_is_idle() {
    let s = quiet_session();
    assert_eq!(s.phase(), SessionPhase::Idle);
    assert_eq!(s.snapshot().phase, SessionPhase::Idle);
}

#[test]
fn tick_before_start_fails_loudly() {
    let mut s = quiet_session();
    assert_eq!(
        s.tick(Intents::default(), false),
        Err(GameError::InvalidState { phase: SessionPhase::Idle })
    );
    assert_eq!(
        s.fire(),
        Err(GameError::InvalidState { phase: SessionPhase::Idle })
    );
}

#[test]
fn start_enters_running_with_fresh_world() {
    let s = running_session();
    assert_eq!(s.phase(), SessionPhase::Running);
    let snap = s.snapshot();
    assert_eq!(snap.score, 0);
    assert_eq!(snap.lives, STARTING_LIVES);
    assert_eq!(snap.shapes_of(ShapeKind::Alien).count(), 32);
    assert_eq!(snap.shapes_of(ShapeKind::Player).count(), 1);
}

#[test]
fn tick_with_fire_spawns_and_advances_bullet() {
    let mut s = running_session();
    let snap = s.tick(Intents::default(), true).unwrap();
    let bullets: Vec<_> = snap.shapes_of(ShapeKind::PlayerBullet).collect();
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].rect.y, 343.0);
}

#[test]
fn fire_spawns_immediately() {
    let mut s = running_session();
    s.fire().unwrap();
    assert_eq!(s.world().bullets_of(BulletOwner::Player).count(), 1);
    assert_eq!(s.world().bullets[0].y, 350.0);
}

#[test]
fn clearing_the_grid_wins_and_blocks_further_ticks() {
    let mut s = running_session();
    for col in 0..8 {
        clear_column(&mut s, col);
    }
    assert_eq!(s.phase(), SessionPhase::Won);
    let snap = s.snapshot();
    assert_eq!(snap.score, 320);
    assert_eq!(snap.phase.banner(), Some("You Win!"));
    assert!(snap.shapes_of(ShapeKind::Alien).all(|a| !a.alive));
    assert_eq!(
        s.tick(Intents::default(), false),
        Err(GameError::InvalidState { phase: SessionPhase::Won })
    );
}

#[test]
fn reset_after_win_restores_a_fresh_round() {
    let mut s = running_session();
    for col in 0..8 {
        clear_column(&mut s, col);
    }
    assert_eq!(s.phase(), SessionPhase::Won);

    s.reset();
    assert_eq!(s.phase(), SessionPhase::Running);
    let snap = s.snapshot();
    assert_eq!(snap.lives, 3);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.shapes_of(ShapeKind::Alien).filter(|a| a.alive).count(), 32);
    assert_eq!(snap.shapes_of(ShapeKind::PlayerBullet).count(), 0);
    assert!(s.tick(Intents::default(), false).is_ok());
}

#[test]
fn session_under_constant_fire_is_eventually_lost() {
    // Every tick the first living alien shoots.
    let mut s = Session::new(FieldConfig::default(), StepRng::new(0, 0));
    s.start();
    // Keep the ship under the first alien so its shots land.
    let mut ticks = 0;
    while s.phase() == SessionPhase::Running {
        let aim = s.world().aliens[0].x - s.world().player.x;
        let intents = Intents {
            move_left: aim < -7.0,
            move_right: aim > 7.0,
        };
        s.tick(intents, false).unwrap();
        ticks += 1;
        assert!(ticks < 10_000, "game never ended");
    }
    assert_eq!(s.phase(), SessionPhase::Lost);
    let snap = s.snapshot();
    assert_eq!(snap.lives, 0);
    assert_eq!(snap.phase.banner(), Some("Game Over!"));
    let player = snap.shapes_of(ShapeKind::Player).next().unwrap();
    assert!(!player.alive);
}

#[test]
fn reset_after_loss_and_from_running() {
    let mut s = Session::new(FieldConfig::default(), StdRng::seed_from_u64(5));
    s.start();
    for _ in 0..20 {
        s.tick(Intents::default(), true).unwrap();
    }
    s.reset();
    assert_eq!(s.phase(), SessionPhase::Running);
    assert_eq!(s.world().frame, 0);
    assert!(s.world().bullets.is_empty());
}

#[test]
fn start_twice_reinitialises() {
    let mut s = running_session();
    s.tick(Intents { move_left: false, move_right: true }, true).unwrap();
    s.start();
    assert_eq!(s.world().player.x, 275.0);
    assert!(s.world().bullets.is_empty());
}

#[test]
fn snapshot_tags_alien_bullets() {
    let mut s = Session::new(FieldConfig::default(), StepRng::new(0, 0));
    s.start();
    let snap = s.tick(Intents::default(), false).unwrap();
    assert_eq!(snap.shapes_of(ShapeKind::AlienBullet).count(), 1);
}

#[test]
fn error_messages_are_readable() {
    let err = GameError::InvalidState { phase: SessionPhase::Lost };
    assert_eq!(err.to_string(), "session is not running (phase: Lost)");
    let err = FieldConfig::new(0.0, 0.0).unwrap_err();
    assert!(err.to_string().starts_with("invalid field configuration"));
}
