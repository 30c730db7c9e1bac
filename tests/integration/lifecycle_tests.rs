//! Teardown: quit inputs, idempotence, and silence afterwards.

use deskpet::app::commands::PetCommand;
use deskpet::app::events::PetEvent;
use deskpet::geometry::Point;

use super::mock_desktop::{SurfaceCall, TestPet, config_starting_at, pet};

fn running_pet() -> TestPet {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(100, 100));
    pet.run_ticks(3);
    pet
}

fn stopped_events(pet: &TestPet) -> usize {
    pet.sink()
        .count(|e| matches!(e, PetEvent::Stopped { .. }))
}

#[test]
fn quit_twice_is_harmless() {
    let mut pet = running_pet();
    pet.quit();
    pet.quit();

    assert!(pet.is_closed());
    assert_eq!(pet.desktop().count(&SurfaceCall::Release), 1);
    assert_eq!(stopped_events(&pet), 1);
}

#[test]
fn quit_cancels_every_task() {
    let mut pet = pet(config_starting_at(Point::new(800, 400)), Point::new(810, 410));
    pet.run_ticks(1);
    assert!(pet.service().homing_task().is_some());

    pet.quit();
    assert_eq!(pet.scheduler().active_count(), 0);
    assert!(pet.service().homing_task().is_none());
    assert!(pet.sink().events.contains(&PetEvent::Stopped {
        cancelled_tasks: 3
    }));
}

#[test]
fn nothing_fires_after_quit() {
    let mut pet = running_pet();
    pet.quit();
    let calls = pet.desktop().calls.len();

    assert_eq!(pet.run_ticks(50), 0);
    assert_eq!(pet.desktop().calls.len(), calls);
}

#[test]
fn secondary_click_quits() {
    let mut pet = running_pet();
    pet.handle_command(PetCommand::SecondaryClick);
    assert!(pet.is_closed());
}

#[test]
fn quit_keys() {
    for key in ['q', 'Q'] {
        let mut pet = running_pet();
        pet.handle_command(PetCommand::KeyPress(key));
        assert!(pet.is_closed(), "'{key}' should quit");
    }
}

#[test]
fn other_keys_are_ignored() {
    let mut pet = running_pet();
    pet.handle_command(PetCommand::KeyPress('x'));
    assert!(!pet.is_closed());
}

#[test]
fn every_quit_trigger_after_close_is_ignored() {
    let mut pet = running_pet();
    pet.handle_command(PetCommand::KeyPress('q'));
    pet.handle_command(PetCommand::SecondaryClick);
    pet.handle_command(PetCommand::Quit);
    pet.quit();

    assert_eq!(pet.desktop().count(&SurfaceCall::Release), 1);
    assert_eq!(stopped_events(&pet), 1);
}
