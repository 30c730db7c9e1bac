//! Behavior scenarios: tick → cursor → FSM → geometry → surface.

use deskpet::app::commands::PetCommand;
use deskpet::app::events::PetEvent;
use deskpet::fsm::Behavior;
use deskpet::geometry::Point;

use super::mock_desktop::{
    SurfaceCall, config_starting_at, pet, pet_with, pinned, point_at_pet,
};

// ── Startup ──────────────────────────────────────────────────

#[test]
fn starts_idle_and_shown_at_start_position() {
    let cfg = config_starting_at(Point::new(1720, 995));
    let start = cfg.start_position();
    let pet = pet(cfg, Point::new(0, 0));

    assert_eq!(pet.service().behavior(), Behavior::Idle);
    assert_eq!(pet.service().position(), start);
    assert_eq!(
        pet.desktop().calls,
        vec![SurfaceCall::MoveTo(start), SurfaceCall::Show]
    );
    assert!(pet.sink().events.contains(&PetEvent::Started(Behavior::Idle)));
}

// ── Walking ──────────────────────────────────────────────────

#[test]
fn stationary_pointer_decides_direction_once() {
    let mut pet = pet(config_starting_at(Point::new(300, 400)), Point::new(500, 500));

    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::WalkRight);
    assert_eq!(pet.service().position().x, 306);

    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::WalkRight);
    assert_eq!(pet.service().position().x, 312);

    let changes = pet
        .sink()
        .count(|e| matches!(e, PetEvent::BehaviorChanged { .. }));
    assert_eq!(changes, 1, "direction must not be reconsidered");
}

#[test]
fn moving_pointer_flips_direction() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(1200, 500));
    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::WalkRight);

    pet.desktop_mut().pointer = Point::new(100, 500);
    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::WalkLeft);
}

#[test]
fn walk_left_clamps_at_min_x() {
    let mut pet = pet(config_starting_at(Point::new(12, 400)), Point::new(0, 0));

    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::WalkLeft);
    assert_eq!(pet.service().position().x, 10);

    pet.run_ticks(3);
    assert_eq!(pet.service().behavior(), Behavior::WalkLeft);
    assert_eq!(pet.service().position().x, 10);
}

#[test]
fn walk_right_clamps_at_max_x() {
    let mut cfg = config_starting_at(Point::new(1805, 400));
    cfg.sleep_delay_ms = pinned(60_000);
    let max_x = cfg.bounds().max_x;
    let mut pet = pet(cfg, Point::new(1919, 0));

    pet.run_ticks(5);
    assert_eq!(pet.service().behavior(), Behavior::WalkRight);
    assert_eq!(pet.service().position().x, max_x);
}

#[test]
fn walking_into_home_radius_enters_home() {
    let mut pet = pet(config_starting_at(Point::new(160, 100)), Point::new(0, 100));

    pet.run_ticks(2);
    assert_eq!(pet.service().behavior(), Behavior::WalkLeft);
    assert_eq!(pet.service().position().x, 148);

    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::InHome);
    assert!(!pet.desktop().visible());
    assert!(
        pet.sink()
            .events
            .contains(&PetEvent::EnteredHome { dwell_ms: 3_000 })
    );
}

// ── Sleep ────────────────────────────────────────────────────

#[test]
fn sleep_timer_expiring_on_first_tick_sleeps() {
    let mut cfg = config_starting_at(Point::new(300, 400));
    cfg.sleep_delay_ms = pinned(200);
    cfg.tick_interval_ms = 200;
    let mut pet = pet(cfg, Point::new(500, 500));

    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::Sleeping);
    assert_eq!(pet.service().position().x, 300, "sleeping pet does not walk");
}

#[test]
fn sleeping_pet_wakes_through_transition() {
    let mut cfg = config_starting_at(Point::new(300, 400));
    cfg.sleep_delay_ms = pinned(200);
    let mut pet = pet_with(cfg, Point::new(500, 500), 0.0, &[]);

    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::Sleeping);

    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::SleepToIdle);

    // sleep_to_idle has 5 frames
    pet.run_ticks(4);
    assert_eq!(pet.service().behavior(), Behavior::SleepToIdle);
    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::Idle);
}

#[test]
fn sleeping_pet_ignores_petting() {
    let mut cfg = config_starting_at(Point::new(300, 400));
    cfg.sleep_delay_ms = pinned(200);
    let mut pet = pet(cfg, Point::new(500, 500));
    pet.run_ticks(1);

    point_at_pet(&mut pet);
    pet.run_ticks(10);
    assert_eq!(pet.service().behavior(), Behavior::Sleeping);
}

// ── Heart ────────────────────────────────────────────────────

#[test]
fn petting_starts_heart_and_schedules_homing() {
    let cfg = config_starting_at(Point::new(1720, 995));
    let mut pet = pet(cfg, Point::new(1730, 1005));

    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::Heart);
    assert_eq!(pet.service().timers().heart.remaining_ms(), 5_000);
    assert_eq!(pet.service().timers().sleep.remaining_ms(), 5_000);

    let homing = pet.service().homing_task().expect("homing scheduled");
    assert_eq!(pet.scheduler().due_at(homing), Some(pet.now_ms() + 5_000));
}

#[test]
fn heart_suppresses_walking_while_running() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(810, 410));
    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::Heart);

    pet.desktop_mut().pointer = Point::new(100, 100);
    pet.run_ticks(1);
    pet.desktop_mut().pointer = Point::new(1500, 100);
    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::Heart);
    assert_eq!(pet.service().position(), Point::new(800, 400));
}

#[test]
fn continued_petting_keeps_heart_without_rescheduling() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(810, 410));
    pet.run_ticks(1);
    let first = pet.service().homing_task();

    pet.run_ticks(5);
    assert_eq!(pet.service().behavior(), Behavior::Heart);
    assert_eq!(pet.service().homing_task(), first);
    assert_eq!(
        pet.sink()
            .count(|e| matches!(e, PetEvent::BehaviorChanged { .. })),
        1
    );
}

#[test]
fn missing_frames_fall_back_to_idle() {
    let mut pet = pet_with(
        config_starting_at(Point::new(800, 400)),
        Point::new(810, 410),
        1.0,
        &["heart"],
    );
    assert!(pet.sink().events.contains(&PetEvent::AssetMissing("heart")));

    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::Idle);
    assert!(pet.sink().events.contains(&PetEvent::FellBackToIdle {
        from: Behavior::Heart
    }));

    // The pending homing check finds the pet outside Heart and does nothing.
    pet.advance(6_000);
    assert_ne!(pet.service().behavior(), Behavior::Homing);
}

#[test]
fn missing_walk_frames_keep_the_pet_in_place() {
    let mut pet = pet_with(
        config_starting_at(Point::new(800, 400)),
        Point::new(100, 500),
        1.0,
        &["walk_left"],
    );

    for y in 0..5 {
        pet.desktop_mut().pointer = Point::new(100, 500 + y);
        pet.run_ticks(1);
        assert_eq!(pet.service().behavior(), Behavior::Idle);
        assert_eq!(pet.service().position(), Point::new(800, 400));
    }
    assert_eq!(pet.desktop().position(), Some(Point::new(800, 400)));
    assert_eq!(
        pet.sink().count(|e| matches!(
            e,
            PetEvent::FellBackToIdle {
                from: Behavior::WalkLeft
            }
        )),
        5
    );
}

// ── Presentation ─────────────────────────────────────────────

#[test]
fn one_frame_per_visible_tick() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(100, 100));
    pet.run_ticks(7);
    assert_eq!(pet.desktop().frames_shown(), 7);
}

#[test]
fn status_snapshot_every_status_interval() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(100, 100));
    pet.advance(20_000);
    let snapshots: Vec<_> = pet
        .sink()
        .events
        .iter()
        .filter_map(|e| match e {
            PetEvent::Status(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].ticks, 50);
}

// ── Input ────────────────────────────────────────────────────

#[test]
fn primary_click_is_informational() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(100, 100));
    pet.handle_command(PetCommand::PrimaryClick);
    assert_eq!(pet.service().behavior(), Behavior::Idle);
    assert!(!pet.is_closed());
    assert!(
        pet.sink()
            .events
            .contains(&PetEvent::Clicked { at: Point::new(800, 400) })
    );
}

#[test]
fn force_behavior_transitions_immediately() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(100, 100));
    pet.handle_command(PetCommand::ForceBehavior(Behavior::Sleeping));
    assert_eq!(pet.service().behavior(), Behavior::Sleeping);
    assert!(pet.sink().events.contains(&PetEvent::BehaviorChanged {
        from: Behavior::Idle,
        to: Behavior::Sleeping,
    }));
}
