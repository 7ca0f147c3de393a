//! Mob variant: a creature that fights and wanders.

use crate::direction::Direction;
use crate::entity::{Entity, Outcome, NEUTRAL_OUTCOME};
use crate::error::InitError;
use crate::registry::Handle;
use crate::room::{Exits, RoomId};

pub type MobId = Handle<Mob>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mob {
    pub name: String,
    pub description: String,
    /// Hit points; 0 means dead.
    pub health: u8,
    /// Damage dealt per `take_action`.
    pub attack: u8,
}

impl Mob {
    pub fn new(name: impl Into<String>, health: u8, attack: u8) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            health,
            attack,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Entity for Mob {
    fn class(&self) -> &'static str {
        "mob"
    }

    fn init(&mut self) -> Result<(), InitError> {
        if self.name.trim().is_empty() {
            return Err(InitError::EmptyName { class: "mob" });
        }
        if self.health == 0 {
            return Err(InitError::Lifeless {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    fn describe(&self, out: &mut String) {
        if self.is_alive() {
            out.push_str(&format!("{} is here.", self.name));
        } else {
            out.push_str(&format!("The body of {} lies here.", self.name));
        }
        if !self.description.is_empty() {
            out.push(' ');
            out.push_str(&self.description);
        }
        out.push('\n');
    }

    /// Damage dealt to `target`. The dead deal none.
    fn take_action(&self, _target: &dyn Entity) -> Outcome {
        if self.is_alive() {
            self.attack
        } else {
            NEUTRAL_OUTCOME
        }
    }

    /// Take `damage`. Refused once the mob is already dead.
    fn recv_action(&mut self, damage: Outcome) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(damage);
        true
    }

    fn move_action(&mut self, direction: Direction, exits: &Exits) -> Option<RoomId> {
        if !self.is_alive() {
            return None;
        }
        exits.get(direction)
    }
}
