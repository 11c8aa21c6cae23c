use crate::behavior::Behavior;
use crate::error::WorldResult;
use crate::object::{Body, Item, MASS_NOUNS, ObjectId};
use crate::report::capitalize;
use crate::world::World;

impl World {
    /// Render an object for the player.
    ///
    /// Brief rooms are just their name; brief items are an article plus their
    /// label. Full descriptions add text, writing and contents.
    pub fn describe(&self, id: ObjectId, brief: bool) -> WorldResult<String> {
        let object = self.get(id)?;
        match &object.body {
            Body::Room(room) if brief => Ok(room.name.clone()),
            Body::Room(room) => {
                let mut paragraphs = vec![room.name.to_uppercase(), room.description.clone()];
                for &child in object.items() {
                    let visitor = self.get(child)?;
                    if visitor.behavior == Behavior::Player || visitor.is_fixed() {
                        continue;
                    }
                    paragraphs.push(format!("There is {} here.", self.describe(child, true)?));
                }
                Ok(paragraphs.join("\n\n"))
            }
            Body::Item(item) if brief => Ok(format!("{} {}", article(item), item.label())),
            Body::Item(item) => {
                let mut head = match &item.description {
                    Some(description) => description.clone(),
                    None => format!("It's {} {}.", article(item), item.label()),
                };
                if !item.writing.is_empty() {
                    head.push_str(" Written on it are these words:");
                }
                let mut lines = vec![head];
                lines.extend(item.writing.iter().map(|line| format!("  {line}")));
                let noun = &item.descriptor.noun;
                if object.vessel.closure().is_closed() {
                    lines.push(format!("The {noun} is closed."));
                } else if !object.items().is_empty() {
                    lines.push(format!("The {noun} contains:"));
                    for &child in object.items() {
                        lines.push(format!("  {}.", capitalize(&self.describe(child, true)?)));
                    }
                }
                Ok(lines.join("\n"))
            }
        }
    }
}

/// `a`, `an`, `some`, or `N kg of`.
fn article(item: &Item) -> String {
    if let Some(quantity) = item.quantity {
        return format!("{quantity} kg of");
    }
    if MASS_NOUNS.contains(&item.category()) {
        return "some".to_string();
    }
    match item.label().chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an".to_string(),
        _ => "a".to_string(),
    }
}
