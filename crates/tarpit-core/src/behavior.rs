use rand::seq::IndexedRandom;
use tracing::debug;

use crate::error::WorldResult;
use crate::movement::Move;
use crate::object::{Blueprint, MASS_NOUNS, ObjectId};
use crate::report::capitalize;
use crate::world::World;

/// How a listener responded to speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heard {
    /// Nothing happened beyond narration.
    Ignored,
    /// The listener wants to run these lines as commands.
    Obey(Vec<String>),
}

/// Reactions an object can have at fixed points of the world's rules.
///
/// `me` is always the object whose behavior is running. Every method has a
/// default so variants only override what they care about.
pub trait Hooks {
    /// The object itself has just arrived somewhere.
    fn on_arrive(&self, _world: &mut World, _me: ObjectId) -> WorldResult<()> {
        Ok(())
    }

    /// `item` has just arrived inside this container from `source`.
    fn on_take(
        &self,
        _world: &mut World,
        _me: ObjectId,
        _item: ObjectId,
        _source: Option<ObjectId>,
    ) -> WorldResult<()> {
        Ok(())
    }

    /// This container has just been closed.
    fn on_close(&self, _world: &mut World, _me: ObjectId) -> WorldResult<()> {
        Ok(())
    }

    /// `source` said something to this object.
    fn on_hear(
        &self,
        world: &mut World,
        _me: ObjectId,
        _speech: &str,
        _source: ObjectId,
    ) -> WorldResult<Heard> {
        world.say("It seems not to hear.");
        Ok(Heard::Ignored)
    }

    /// Someone pushed this object.
    fn on_push(&self, world: &mut World, _me: ObjectId) -> WorldResult<()> {
        world.say("That doesn't appear to do anything.");
        Ok(())
    }

    /// A command has just finished in this room.
    fn on_tick(&self, _world: &mut World, _me: ObjectId) -> WorldResult<()> {
        Ok(())
    }
}

/// Every special behavior in the game, as one closed set.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Behavior {
    /// Does nothing special.
    #[default]
    Inert,
    /// Describes each room it enters; briefly if visited before.
    Player,
    /// Swallows every arriving item that isn't an actor.
    Hazard {
        /// Printed after the item's name, e.g. "falls into the pit."
        fate: String,
    },
    /// On close, prints the writing on its contents and makes them vanish.
    Showcase,
    /// Steals a random item from a player arriving in this room.
    Thief {
        /// Who does the stealing, as narrated.
        thief: String,
        /// Room the stolen item is taken to.
        hideaway: String,
    },
    /// Two-pan scale: the heavier load swings to the front.
    Balance,
    /// Room that re-weighs its balance after every command.
    Tribunal {
        /// The balance to re-weigh.
        balance: ObjectId,
    },
    /// Writes its total weight on itself.
    PostalScale,
    /// When pushed, prints a metering label onto the scale.
    LabelPrinter {
        /// The postal scale whose reading goes on the label.
        scale: ObjectId,
    },
    /// Cuts multi-line parchment into one strip per line.
    Shredder,
    /// Prints the writing on arrivals, then they vanish.
    Drain,
    /// Accepts only dirt, up to `limit` kilograms.
    Pan {
        /// Most dirt it holds, in kilograms.
        limit: f64,
    },
    /// Makes a pitch when spoken to and trades doubled goods for `price`.
    Devil {
        /// Said to anyone who speaks to it.
        pitch: String,
        /// Noun of the item it accepts in trade.
        price: String,
    },
    /// Obeys whatever it is told, one command per `;`.
    Robot,
}

impl Hooks for Behavior {
    fn on_arrive(&self, world: &mut World, me: ObjectId) -> WorldResult<()> {
        match self {
            Self::Player => describe_surroundings(world, me),
            _ => Ok(()),
        }
    }

    fn on_take(
        &self,
        world: &mut World,
        me: ObjectId,
        item: ObjectId,
        source: Option<ObjectId>,
    ) -> WorldResult<()> {
        match self {
            Self::Hazard { fate } => {
                if world.get(item)?.actor.is_some() {
                    return Ok(());
                }
                let label = world.label(item)?;
                world.attempt(Move::unplace(item))?;
                world.say(format!("The {label} {fate}"));
                Ok(())
            }
            Self::Thief { thief, hideaway } => steal(world, item, thief, hideaway),
            Self::Balance => weigh(world, me),
            Self::PostalScale => {
                let weight = world.weight(me)?;
                world.item_mut(me)?.writing = vec![format!("{weight}")];
                Ok(())
            }
            Self::Shredder => shred(world, me, item),
            Self::Drain => {
                for vanished in world.contents(me)?.to_vec() {
                    let writing = world.item(vanished)?.writing.clone();
                    world.emit(&writing);
                    let label = world.label(vanished)?;
                    world.say(format!("The {label} vanishes into the drain."));
                    world.attempt(Move::unplace(vanished))?;
                }
                Ok(())
            }
            Self::Pan { limit } => fill_pan(world, me, item, source, *limit),
            Self::Devil { price, .. } => bargain(world, me, item, source, price),
            _ => Ok(()),
        }
    }

    fn on_close(&self, world: &mut World, me: ObjectId) -> WorldResult<()> {
        let Self::Showcase = self else {
            return Ok(());
        };
        let contents = world.contents(me)?.to_vec();
        if contents.is_empty() {
            return Ok(());
        }
        world.say("AN INFINITE EXHILARATION THRUMS IN YOUR HEART");
        for treasure in contents {
            let writing = world.item(treasure)?.writing.clone();
            world.emit(&writing);
            let label = world.label(treasure)?;
            world.say(format!("The {label} vanishes!"));
            world.attempt(Move::unplace(treasure))?;
        }
        Ok(())
    }

    fn on_hear(
        &self,
        world: &mut World,
        _me: ObjectId,
        speech: &str,
        _source: ObjectId,
    ) -> WorldResult<Heard> {
        match self {
            Self::Devil { pitch, .. } => {
                world.say(pitch);
                Ok(Heard::Ignored)
            }
            Self::Robot => Ok(Heard::Obey(
                speech.split(';').map(|line| line.trim().to_string()).collect(),
            )),
            _ => {
                world.say("It seems not to hear.");
                Ok(Heard::Ignored)
            }
        }
    }

    fn on_push(&self, world: &mut World, _me: ObjectId) -> WorldResult<()> {
        match self {
            Self::LabelPrinter { scale } => print_label(world, *scale),
            _ => {
                world.say("That doesn't appear to do anything.");
                Ok(())
            }
        }
    }

    fn on_tick(&self, world: &mut World, _me: ObjectId) -> WorldResult<()> {
        match self {
            Self::Tribunal { balance } => weigh(world, *balance),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

impl World {
    pub(crate) fn fire_arrive(&mut self, id: ObjectId) -> WorldResult<()> {
        let behavior = self.get(id)?.behavior.clone();
        debug!(%id, ?behavior, "on_arrive");
        behavior.on_arrive(self, id)
    }

    pub(crate) fn fire_take(
        &mut self,
        id: ObjectId,
        item: ObjectId,
        source: Option<ObjectId>,
    ) -> WorldResult<()> {
        let behavior = self.get(id)?.behavior.clone();
        debug!(%id, %item, ?behavior, "on_take");
        behavior.on_take(self, id, item, source)
    }

    pub(crate) fn fire_close(&mut self, id: ObjectId) -> WorldResult<()> {
        let behavior = self.get(id)?.behavior.clone();
        behavior.on_close(self, id)
    }

    /// Deliver speech from `source` to `id`.
    pub fn hear(&mut self, id: ObjectId, speech: &str, source: ObjectId) -> WorldResult<Heard> {
        let behavior = self.get(id)?.behavior.clone();
        debug!(%id, speech, "on_hear");
        behavior.on_hear(self, id, speech, source)
    }

    /// Push `id`.
    pub fn push(&mut self, id: ObjectId) -> WorldResult<()> {
        let behavior = self.get(id)?.behavior.clone();
        behavior.on_push(self, id)
    }

    /// Let a room react to a finished command.
    pub fn tick(&mut self, id: ObjectId) -> WorldResult<()> {
        let behavior = self.get(id)?.behavior.clone();
        behavior.on_tick(self, id)
    }
}

// ---------------------------------------------------------------------------
// Behavior helpers
// ---------------------------------------------------------------------------

fn describe_surroundings(world: &mut World, me: ObjectId) -> WorldResult<()> {
    let Some(room) = world.location(me)? else {
        return Ok(());
    };
    let Some(name) = world.get(room)?.as_room().map(|r| r.name.clone()) else {
        return Ok(());
    };
    let visited = world.actor(me).is_ok_and(|actor| actor.visited.contains(&name));
    let text = world.describe(room, visited)?;
    world.say(text);
    if let Ok(actor) = world.actor_mut(me) {
        actor.visited.insert(name);
    }
    Ok(())
}

fn steal(world: &mut World, whom: ObjectId, thief: &str, hideaway: &str) -> WorldResult<()> {
    if world.get(whom)?.behavior != Behavior::Player {
        return Ok(());
    }
    let holdings = world.contents(whom)?.to_vec();
    let Some(&loot) = holdings.choose(world.rng_mut()) else {
        return Ok(());
    };
    let destination = world.room_named(hideaway)?;
    if world.attempt(Move::new(loot, destination).by_world())? {
        let label = world.label(loot)?;
        world.say(format!(
            "Goddamn that {thief}. Your {label} got stolen and tossed somewhere into the {}.",
            hideaway.to_lowercase()
        ));
    }
    Ok(())
}

/// Swing the heavier of two loads to the front.
fn weigh(world: &mut World, balance: ObjectId) -> WorldResult<()> {
    let pans = world.contents(balance)?.to_vec();
    let &[near, far] = pans.as_slice() else {
        return Ok(());
    };
    if world.weight(far)? > world.weight(near)? {
        world.reverse_contents(balance)?;
        let scale = world.label(balance)?;
        let heavier = world.label(far)?;
        world.say(format!(
            "The far side of the {scale}, occupied by the {heavier}, rotates forwards."
        ));
    }
    Ok(())
}

fn shred(world: &mut World, shredder: ObjectId, item: ObjectId) -> WorldResult<()> {
    let document = world.item(item)?;
    if document.category() != "parchment" || document.writing.len() <= 1 {
        return Ok(());
    }
    let strips = document.writing.clone();
    let label = document.label();
    world.attempt(Move::unplace(item))?;
    for strip in &strips {
        let strip = world.spawn(Blueprint::item("shredded parchment").lines([strip.clone()]));
        world.attempt(Move::new(strip, shredder).by_world())?;
    }
    world.say(format!("The {label} is shredded into {} strips.", strips.len()));
    Ok(())
}

fn print_label(world: &mut World, scale: ObjectId) -> WorldResult<()> {
    let reading = world.item(scale)?.writing.clone();
    let label = world.spawn(Blueprint::item("metering label").lines(reading));
    world.attempt(Move::new(label, scale).by_world())?;
    let brief = world.describe(label, true)?;
    world.say(format!("Skrzzzzzzztkrrrrrzt... {} emerges.", capitalize(&brief)));
    Ok(())
}

fn fill_pan(
    world: &mut World,
    pan: ObjectId,
    item: ObjectId,
    source: Option<ObjectId>,
    limit: f64,
) -> WorldResult<()> {
    if !MASS_NOUNS.contains(&world.item(item)?.category()) {
        let label = world.label(item)?;
        match source {
            Some(source) => {
                world.attempt(Move::new(item, source).by_world())?;
            }
            None => {
                world.attempt(Move::unplace(item))?;
            }
        }
        world.say(format!("You can't put the {label} there."));
        return Ok(());
    }

    let Some(&filling) = world.contents(pan)?.first() else {
        return Ok(());
    };
    let amount = world.item(filling)?.quantity.unwrap_or(0.0);
    let excess = amount - limit;
    if excess <= 0.0 {
        return Ok(());
    }
    let label = world.label(pan)?;
    world.say(format!("The {label} is chock full."));
    world.item_mut(filling)?.quantity = Some(limit);
    let spill = world.spawn(Blueprint::item("dirt").quantity(excess));
    if let Some(source) = source {
        world.attempt(Move::new(spill, source).by_world())?;
    }
    Ok(())
}

fn bargain(
    world: &mut World,
    devil: ObjectId,
    gift: ObjectId,
    giver: Option<ObjectId>,
    price: &str,
) -> WorldResult<()> {
    if world.item(gift)?.category() != price {
        world.say("\"No, that won't do.\" The devil drops your gift.");
        if let Some(spot) = world.location(devil)? {
            world.attempt(Move::new(gift, spot).by_world())?;
        }
        return Ok(());
    }

    world.say("\"Very well.\"");
    world.attempt(Move::unplace(gift))?;
    let Some(giver) = giver else {
        return Ok(());
    };
    for held in world.contents(giver)?.to_vec() {
        let item = world.item_mut(held)?;
        if let Some(quantity) = item.quantity.as_mut() {
            *quantity *= 2.0;
            let noun = item.descriptor.noun.clone();
            world.say(format!("Your supply of {noun} is doubled."));
        }
    }
    Ok(())
}
