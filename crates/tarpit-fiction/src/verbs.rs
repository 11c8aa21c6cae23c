//! The verb table and every verb's handler.

use std::collections::BTreeMap;

use tarpit_core::{Blueprint, Heard, Move, ObjectId, Query, World, capitalize};
use tracing::warn;

use crate::error::{CommandError, CommandResult, FictionResult};
use crate::parser::{Arguments, VerbDescriptor, suggest_verb};
use crate::session::Session;

/// Runs a bound command on behalf of `subject`.
pub type Handler = fn(&mut Session, ObjectId, &Arguments) -> CommandResult<()>;

/// A verb's grammar plus the function that carries it out.
#[derive(Debug, Clone)]
pub struct Verb {
    /// Parsed usage grammar.
    pub descriptor: VerbDescriptor,
    /// Carries the command out.
    pub handler: Handler,
}

const STANDARD: &[(&str, Handler)] = &[
    ("INVENTORY", inventory),
    ("GO direction:str", go),
    ("LOOK thing?", look),
    ("WRITE text:str WITH :pen@ ON paper:parchment", write),
    ("ERASE :parchment", erase),
    ("DIG WITH :shovel@ IN where?", dig),
    ("CALL item name:str", call),
    ("OPEN vessel", open),
    ("CLOSE vessel", close),
    ("LOCK vessel", lock),
    ("UNLOCK vessel", unlock),
    ("TELL whom speech:str", tell),
    ("TALK TO whom", talk),
    ("TAKE *items", take),
    ("DROP *items@", drop),
    ("PUT *items@ IN vessel", put),
    ("GIVE *items@ TO vessel", give),
    ("PUSH item", push),
    ("OBEY orders", obey),
    ("THINK concept:line?", think),
    ("XYZZY", xyzzy),
    ("HELLO", hello),
    ("QUIT", quit),
    ("HELP", help),
];

/// Every verb the interpreter knows, keyed by lowercase name.
///
/// Built once per session and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct VerbTable {
    verbs: BTreeMap<String, Verb>,
}

impl VerbTable {
    /// The standard verbs.
    pub fn standard() -> FictionResult<Self> {
        let mut table = Self::default();
        for &(usage, handler) in STANDARD {
            table.register(usage, handler)?;
        }
        Ok(table)
    }

    /// Add or replace a verb.
    pub fn register(&mut self, usage: &str, handler: Handler) -> FictionResult<()> {
        let descriptor = VerbDescriptor::parse(usage)?;
        self.verbs
            .insert(descriptor.name.clone(), Verb { descriptor, handler });
        Ok(())
    }

    /// Look a verb up by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Verb> {
        self.verbs.get(&name.to_lowercase())
    }

    /// Every registered verb name, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.verbs.keys().map(String::as_str)
    }

    /// Every registered verb.
    pub fn iter(&self) -> impl Iterator<Item = &Verb> {
        self.verbs.values()
    }

    /// The known verb closest to a misspelt `word`.
    pub fn suggest(&self, word: &str) -> Option<&str> {
        suggest_verb(word, self.names())
    }
}

// ---------------------------------------------------------------------------
// Movement and perception
// ---------------------------------------------------------------------------

fn inventory(session: &mut Session, subject: ObjectId, _: &Arguments) -> CommandResult<()> {
    let world = session.world_mut();
    let items = world.contents(subject)?.to_vec();
    if items.is_empty() {
        world.say("You are empty-handed.");
        return Ok(());
    }
    world.say("You are currently holding:");
    for item in items {
        let brief = world.describe(item, true)?;
        world.say(format!("  {}.", capitalize(&brief)));
    }
    Ok(())
}

fn go(session: &mut Session, subject: ObjectId, args: &Arguments) -> CommandResult<()> {
    let direction = args.text("direction")?.to_lowercase();
    travel(session.world_mut(), subject, &direction)
}

/// Walk `subject` through the exit named `direction`.
pub(crate) fn travel(world: &mut World, subject: ObjectId, direction: &str) -> CommandResult<()> {
    let room = world.location(subject)?.ok_or(CommandError::NotHere)?;
    let exit = world
        .get(room)?
        .as_room()
        .and_then(|room| room.exits.get(direction))
        .cloned();
    let Some(name) = exit else {
        world.say("You can't go that way.");
        return Ok(());
    };
    match world.room_named(&name) {
        Ok(destination) => {
            world.attempt(Move::new(subject, destination).by_world())?;
        }
        Err(err) => {
            warn!(%err, direction, "exit leads to a room that was never built");
            world.say("You can't go that way.");
        }
    }
    Ok(())
}

fn look(session: &mut Session, subject: ObjectId, args: &Arguments) -> CommandResult<()> {
    let world = session.world_mut();
    let target = match args.optional_one("thing")? {
        Some(thing) => thing,
        None => world.location(subject)?.ok_or(CommandError::NotHere)?,
    };
    let text = world.describe(target, false)?;
    world.say(text);
    Ok(())
}

// ---------------------------------------------------------------------------
// Writing and digging
// ---------------------------------------------------------------------------

fn write(session: &mut Session, _: ObjectId, args: &Arguments) -> CommandResult<()> {
    let paper = args.one("paper")?;
    let text = args.text("text")?;
    let world = session.world_mut();
    world.item_mut(paper)?.write(text);
    let label = world.label(paper)?;
    world.say(format!("You write on the {label}."));
    Ok(())
}

fn erase(session: &mut Session, _: ObjectId, args: &Arguments) -> CommandResult<()> {
    let parchment = args.one("parchment")?;
    let world = session.world_mut();
    world.item_mut(parchment)?.writing.clear();
    let label = world.label(parchment)?;
    world.say(format!("You erase everything written on the {label}."));
    Ok(())
}

fn dig(session: &mut Session, subject: ObjectId, args: &Arguments) -> CommandResult<()> {
    let world = session.world_mut();
    let target = match args.optional_one("where")? {
        Some(place) => place,
        None => world.location(subject)?.ok_or(CommandError::NotHere)?,
    };

    if let Some(room) = world.get(target)?.as_room() {
        let Some(noun) = room.resources.get("dig").cloned() else {
            world.say("Digging here is fruitless.");
            return Ok(());
        };
        let heap = world.spawn(Blueprint::item(&noun).quantity(1.0));
        if world.attempt(Move::new(heap, subject))? {
            world.say(format!("You dig up some {noun} and add it to your inventory."));
        }
        return Ok(());
    }

    let piles = world.find(target, &Query::by_noun("dirt"))?;
    let Some(&pile) = piles.first() else {
        world.say("There's nothing worth digging there.");
        return Ok(());
    };
    let amount = world.item(pile)?.quantity.unwrap_or(0.0);
    if amount <= 1.0 {
        let label = world.label(pile)?;
        world.attempt(
            Move::new(pile, subject)
                .narrate(format!("You dig out the {label} and add it to your inventory.")),
        )?;
        return Ok(());
    }
    let scoop = world.spawn(Blueprint::item("dirt").quantity(1.0));
    if world.attempt(Move::new(scoop, subject))? {
        world.item_mut(pile)?.quantity = Some(amount - 1.0);
        world.say("You dig out some dirt and add it to your inventory.");
    }
    Ok(())
}

fn call(session: &mut Session, _: ObjectId, args: &Arguments) -> CommandResult<()> {
    let item = args.one("item")?;
    let name = args.text("name")?.to_string();
    let world = session.world_mut();
    let plain = world.item(item)?.descriptor.to_string();
    world.rename(item, Some(name.clone()))?;
    world.say(format!("We'll call the {plain} \"{name}\" from now on."));
    Ok(())
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

fn open(session: &mut Session, _: ObjectId, args: &Arguments) -> CommandResult<()> {
    session.world_mut().open(args.one("vessel")?)?;
    Ok(())
}

fn close(session: &mut Session, _: ObjectId, args: &Arguments) -> CommandResult<()> {
    session.world_mut().close(args.one("vessel")?)?;
    Ok(())
}

fn lock(session: &mut Session, _: ObjectId, args: &Arguments) -> CommandResult<()> {
    session.world_mut().lock(args.one("vessel")?)?;
    Ok(())
}

fn unlock(session: &mut Session, _: ObjectId, args: &Arguments) -> CommandResult<()> {
    session.world_mut().unlock(args.one("vessel")?)?;
    Ok(())
}

fn take(session: &mut Session, subject: ObjectId, args: &Arguments) -> CommandResult<()> {
    let world = session.world_mut();
    for item in args.many("items")? {
        let label = world.label(item)?;
        world.attempt(Move::new(item, subject).narrate(format!("{label} taken.")))?;
    }
    Ok(())
}

fn drop(session: &mut Session, subject: ObjectId, args: &Arguments) -> CommandResult<()> {
    let world = session.world_mut();
    let floor = world.location(subject)?.ok_or(CommandError::NotHere)?;
    for item in args.many("items")? {
        let label = world.label(item)?;
        world.attempt(Move::new(item, floor).narrate(format!("{label} dropped.")))?;
    }
    Ok(())
}

fn put(session: &mut Session, _: ObjectId, args: &Arguments) -> CommandResult<()> {
    let vessel = args.one("vessel")?;
    let world = session.world_mut();
    let target = world.label(vessel)?;
    for item in args.many("items")? {
        let label = world.label(item)?;
        world.attempt(
            Move::new(item, vessel).narrate(format!("You put the {label} into the {target}.")),
        )?;
    }
    Ok(())
}

fn give(session: &mut Session, _: ObjectId, args: &Arguments) -> CommandResult<()> {
    let vessel = args.one("vessel")?;
    let world = session.world_mut();
    let target = world.label(vessel)?;
    for item in args.many("items")? {
        let label = world.label(item)?;
        world.attempt(
            Move::new(item, vessel).narrate(format!("You give the {label} to the {target}.")),
        )?;
    }
    Ok(())
}

fn push(session: &mut Session, _: ObjectId, args: &Arguments) -> CommandResult<()> {
    session.world_mut().push(args.one("item")?)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Speech and scripts
// ---------------------------------------------------------------------------

fn tell(session: &mut Session, subject: ObjectId, args: &Arguments) -> CommandResult<()> {
    let whom = args.one("whom")?;
    let speech = args.text("speech")?.to_string();
    listen(session, whom, &speech, subject)
}

fn talk(session: &mut Session, subject: ObjectId, args: &Arguments) -> CommandResult<()> {
    let whom = args.one("whom")?;
    session.world_mut().say("\"Hello\", you say.");
    listen(session, whom, "Hello", subject)
}

fn listen(session: &mut Session, whom: ObjectId, speech: &str, source: ObjectId) -> CommandResult<()> {
    if let Heard::Obey(lines) = session.world_mut().hear(whom, speech, source)? {
        session.obey(whom, lines)?;
    }
    Ok(())
}

fn obey(session: &mut Session, subject: ObjectId, args: &Arguments) -> CommandResult<()> {
    let orders = args.one("orders")?;
    let lines = session
        .world()
        .get(orders)?
        .as_item()
        .map(|item| item.writing.clone())
        .unwrap_or_default();
    session.obey(subject, lines)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Miscellany
// ---------------------------------------------------------------------------

fn think(_: &mut Session, _: ObjectId, _: &Arguments) -> CommandResult<()> {
    Ok(())
}

fn xyzzy(session: &mut Session, _: ObjectId, _: &Arguments) -> CommandResult<()> {
    session.world_mut().say("Nothing happens.");
    Ok(())
}

fn hello(session: &mut Session, _: ObjectId, _: &Arguments) -> CommandResult<()> {
    session.world_mut().say("Uh...hello.");
    Ok(())
}

fn quit(session: &mut Session, subject: ObjectId, _: &Arguments) -> CommandResult<()> {
    let world = session.world_mut();
    world.say("Goodbye!");
    world.actor_mut(subject)?.active = false;
    Ok(())
}

fn help(session: &mut Session, _: ObjectId, _: &Arguments) -> CommandResult<()> {
    let usages: Vec<String> = session
        .verbs()
        .iter()
        .map(|verb| format!("  {}", verb.descriptor.usage()))
        .collect();
    let world = session.world_mut();
    world.say("You can say:");
    for usage in usages {
        world.say(usage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_parses() {
        let table = VerbTable::standard().unwrap();
        assert_eq!(table.names().count(), STANDARD.len());
        let put = table.get("PUT").unwrap();
        assert_eq!(put.descriptor.prepositions().collect::<Vec<_>>(), vec!["in"]);
        assert!(table.get("fly").is_none());
    }

    #[test]
    fn suggestions() {
        let table = VerbTable::standard().unwrap();
        assert_eq!(table.suggest("tkae"), Some("take"));
        assert_eq!(table.suggest("qwertyuiop"), None);
    }

    #[test]
    fn register_rejects_bad_usage() {
        let mut table = VerbTable::default();
        assert!(table.register("lowercase verb", think).is_err());
        assert!(table.register("PONDER thought:line?", think).is_ok());
        assert!(table.get("ponder").is_some());
    }
}
