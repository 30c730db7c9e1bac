//! Inbound commands to the pet service.
//!
//! These represent input from the outside world (mouse buttons on the pet
//! surface, keystrokes, a debug console) that the
//! [`PetService`](super::service::PetService) interprets and acts upon.

use crate::fsm::Behavior;

/// Commands that input adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetCommand {
    /// Primary button pressed on the pet.  Informational only.
    PrimaryClick,

    /// Secondary button pressed on the pet.  Tears the pet down.
    SecondaryClick,

    /// A key was pressed while the pet had focus.  `q`/`Q` quits.
    KeyPress(char),

    /// Force the FSM into a specific behavior (debug / testing only).
    ForceBehavior(Behavior),

    /// Tear the pet down.
    Quit,
}

impl PetCommand {
    /// Whether this command ends the pet's life.
    pub fn is_quit(self) -> bool {
        matches!(
            self,
            Self::SecondaryClick | Self::Quit | Self::KeyPress('q' | 'Q')
        )
    }
}
