//! Item variant. Beyond name validation, only overrides `describe`.

use crate::entity::Entity;
use crate::error::InitError;
use crate::registry::Handle;

pub type ItemId = Handle<Item>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub description: String,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Entity for Item {
    fn class(&self) -> &'static str {
        "item"
    }

    fn init(&mut self) -> Result<(), InitError> {
        if self.name.trim().is_empty() {
            return Err(InitError::EmptyName { class: "item" });
        }
        Ok(())
    }

    fn describe(&self, out: &mut String) {
        out.push_str(&format!("You see {}.", self.name));
        if !self.description.is_empty() {
            out.push(' ');
            out.push_str(&self.description);
        }
        out.push('\n');
    }
}
