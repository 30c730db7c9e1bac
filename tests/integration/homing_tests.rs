//! Heart → Homing → InHome → Idle, and the single-walk-loop guarantee.

use deskpet::app::commands::PetCommand;
use deskpet::app::events::PetEvent;
use deskpet::app::service::PetTask;
use deskpet::fsm::Behavior;
use deskpet::geometry::Point;

use super::mock_desktop::{TestPet, config_starting_at, pet, pinned};

fn pending_steps(pet: &TestPet) -> usize {
    pet.scheduler()
        .pending_tasks()
        .filter(|t| **t == PetTask::HomingStep)
        .count()
}

/// Tick until `behavior` is active, checking the walk-loop invariant on the way.
fn tick_until(pet: &mut TestPet, behavior: Behavior, max_ticks: u32) -> u32 {
    for n in 1..=max_ticks {
        pet.run_ticks(1);
        assert!(pending_steps(pet) <= 1, "more than one homing step pending");
        if pet.service().behavior() == behavior {
            return n;
        }
    }
    panic!(
        "{behavior} not reached in {max_ticks} ticks, still {}",
        pet.service().behavior()
    );
}

#[test]
fn full_home_cycle() {
    let mut cfg = config_starting_at(Point::new(400, 300));
    cfg.home_dwell_ms = pinned(1_000);
    let home = cfg.home();
    let reach = f64::from(cfg.move_step_px + cfg.home_radius_px);
    let mut pet = pet(cfg, Point::new(410, 310));

    tick_until(&mut pet, Behavior::Heart, 1);
    tick_until(&mut pet, Behavior::Homing, 30);
    assert_eq!(pet.now_ms(), 5_200, "homing starts 5 s after the heart");

    tick_until(&mut pet, Behavior::InHome, 200);
    assert!(pet.service().position().distance_to(home) <= reach);
    assert!(!pet.desktop().visible());
    assert_eq!(pending_steps(&pet), 0);

    tick_until(&mut pet, Behavior::Idle, 10);
    assert_eq!(pet.service().position(), Point::new(50, 130));
    assert!(pet.desktop().visible());
    assert_eq!(pet.desktop().position(), Some(Point::new(50, 130)));
    assert!(pet.service().timers().sleep.is_running());
    assert!(pet.sink().events.contains(&PetEvent::LeftHome {
        at: Point::new(50, 130)
    }));
}

#[test]
fn homing_walk_moves_toward_home() {
    let mut pet = pet(config_starting_at(Point::new(400, 300)), Point::new(0, 0));
    pet.handle_command(PetCommand::ForceBehavior(Behavior::Homing));
    assert_eq!(pending_steps(&pet), 1);

    let home = pet.service().config().home();
    let before = pet.service().position().distance_to(home);
    pet.run_ticks(3);
    assert!(pet.service().position().distance_to(home) < before);
    assert_eq!(pet.service().behavior(), Behavior::Homing);
}

#[test]
fn in_home_expiry_restores_idle_outside_home() {
    let mut cfg = config_starting_at(Point::new(800, 400));
    cfg.home_dwell_ms = pinned(200);
    let mut pet = pet(cfg, Point::new(0, 0));

    pet.handle_command(PetCommand::ForceBehavior(Behavior::InHome));
    assert!(!pet.desktop().visible());

    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::Idle);
    assert_eq!(pet.service().position(), Point::new(50, 130));
    assert!(pet.desktop().visible());
}

#[test]
fn walking_away_from_home_does_not_re_enter_it() {
    let mut cfg = config_starting_at(Point::new(800, 400));
    cfg.home_dwell_ms = pinned(200);
    cfg.sleep_delay_ms = pinned(60_000);
    let mut pet = pet(cfg, Point::new(0, 0));

    pet.handle_command(PetCommand::ForceBehavior(Behavior::InHome));
    pet.run_ticks(1);
    assert_eq!(pet.service().position(), Point::new(50, 130));

    // Walk right across the home radius and out the other side.
    pet.desktop_mut().pointer = Point::new(900, 600);
    for _ in 0..20 {
        pet.run_ticks(1);
        assert_eq!(pet.service().behavior(), Behavior::WalkRight);
    }
    assert_eq!(pet.service().position().x, 170);
    assert_eq!(
        pet.sink()
            .count(|e| matches!(e, PetEvent::EnteredHome { .. })),
        1
    );

    // Once clear of home, walking back into it counts again.
    pet.desktop_mut().pointer = Point::new(0, 600);
    tick_until(&mut pet, Behavior::InHome, 10);
}

#[test]
fn leaving_homing_cancels_the_walk() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(0, 0));
    pet.handle_command(PetCommand::ForceBehavior(Behavior::Homing));
    assert_eq!(pending_steps(&pet), 1);

    pet.handle_command(PetCommand::ForceBehavior(Behavior::Idle));
    assert_eq!(pending_steps(&pet), 0);
    assert!(pet.service().step_task().is_none());

    let at = pet.service().position();
    pet.desktop_mut().pointer = Point::new(0, 0);
    pet.run_ticks(3);
    assert_ne!(pet.service().behavior(), Behavior::Homing);
    assert!(pet.service().position().distance_to(at) <= 18.0);
}

#[test]
fn homing_is_skipped_once_heart_is_left() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(810, 410));
    pet.run_ticks(1);
    assert_eq!(pet.service().behavior(), Behavior::Heart);

    pet.handle_command(PetCommand::ForceBehavior(Behavior::Sleeping));
    pet.advance(6_000);
    assert_eq!(pet.service().behavior(), Behavior::Sleeping);
    assert_eq!(pending_steps(&pet), 0);
}

#[test]
fn re_entering_heart_replaces_the_homing_check() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(810, 410));
    pet.run_ticks(1);
    let first = pet.service().homing_task().expect("first check");

    pet.handle_command(PetCommand::ForceBehavior(Behavior::Idle));
    pet.handle_command(PetCommand::ForceBehavior(Behavior::Heart));
    let second = pet.service().homing_task().expect("second check");

    assert_ne!(first, second);
    assert!(!pet.scheduler().is_pending(first));
    let checks = pet
        .scheduler()
        .pending_tasks()
        .filter(|t| **t == PetTask::StartHoming)
        .count();
    assert_eq!(checks, 1);
}
