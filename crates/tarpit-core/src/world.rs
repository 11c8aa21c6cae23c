use std::collections::{HashMap, HashSet};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::behavior::Behavior;
use crate::error::{MoveError, MoveResult, WorldError, WorldResult};
use crate::movement::Move;
use crate::object::{Actor, Blueprint, Body, Capacity, Item, Object, ObjectId, Room, Vessel};
use crate::query::{Query, Selector};
use crate::report::{Line, Transcript, capitalize};

/// Words the resolver recognises, kept up to date by the [`World`].
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    nouns: HashSet<String>,
    adjectives: HashSet<String>,
    names: HashSet<String>,
    directions: HashSet<String>,
}

impl Vocabulary {
    /// Whether any item uses `word` as its noun.
    pub fn is_noun(&self, word: &str) -> bool {
        self.nouns.contains(&word.to_lowercase())
    }

    /// Whether any item uses `word` as its adjective.
    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjectives.contains(&word.to_lowercase())
    }

    /// Whether any item is called `word`.
    pub fn is_name(&self, word: &str) -> bool {
        self.names.contains(&word.to_lowercase())
    }

    /// Whether any room has an exit named `word`.
    pub fn is_direction(&self, word: &str) -> bool {
        self.directions.contains(&word.to_lowercase())
    }

    fn learn_item(&mut self, item: &Item) {
        self.nouns.insert(item.descriptor.noun.clone());
        if let Some(adjective) = &item.descriptor.adjective {
            self.adjectives.insert(adjective.clone());
        }
        if let Some(name) = &item.proper_name {
            self.names.insert(name.to_lowercase());
        }
    }
}

/// The arena that owns every room, item and actor.
///
/// Objects are never removed. Destroying something means moving it to
/// nowhere, after which its handle stays valid for narration.
#[derive(Debug)]
pub struct World {
    objects: Vec<Object>,
    rooms: HashMap<String, ObjectId>,
    vocabulary: Vocabulary,
    transcript: Transcript,
    rng: StdRng,
}

impl World {
    /// An empty world whose randomness is fixed by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            objects: Vec::new(),
            rooms: HashMap::new(),
            vocabulary: Vocabulary::default(),
            transcript: Transcript::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Register a room. Its exit directions join the vocabulary.
    pub fn add_room(&mut self, room: Room, behavior: Behavior) -> WorldResult<ObjectId> {
        if self.rooms.contains_key(&room.name) {
            return Err(WorldError::DuplicateRoom(room.name));
        }
        let id = ObjectId(self.objects.len());
        self.vocabulary
            .directions
            .extend(room.exits.keys().map(|d| d.to_lowercase()));
        self.rooms.insert(room.name.clone(), id);
        self.objects.push(Object {
            id,
            vessel: Vessel::new(Capacity::Unbounded),
            location: None,
            body: Body::Room(room),
            actor: None,
            behavior,
        });
        Ok(id)
    }

    /// Create an unplaced object from a blueprint.
    pub fn spawn(&mut self, blueprint: Blueprint) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.vocabulary.learn_item(&blueprint.item);
        self.objects.push(Object {
            id,
            vessel: blueprint.vessel,
            location: None,
            body: Body::Item(blueprint.item),
            actor: blueprint.actor,
            behavior: blueprint.behavior,
        });
        id
    }

    /// Create an object and place it, firing hooks as for any other arrival.
    pub fn spawn_in(&mut self, blueprint: Blueprint, location: ObjectId) -> MoveResult<ObjectId> {
        let id = self.spawn(blueprint);
        self.relocate(Move::new(id, location).by_world())?;
        Ok(id)
    }

    /// Set or clear an item's proper name.
    pub fn rename(&mut self, id: ObjectId, name: Option<String>) -> WorldResult<()> {
        if let Some(name) = &name {
            self.vocabulary.names.insert(name.to_lowercase());
        }
        self.item_mut(id)?.proper_name = name;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// The object behind `id`.
    pub fn get(&self, id: ObjectId) -> WorldResult<&Object> {
        self.objects.get(id.0).ok_or(WorldError::ObjectNotFound(id))
    }

    /// The object behind `id`, mutably.
    ///
    /// Containment is not reachable from here; use [`World::relocate`].
    pub fn get_mut(&mut self, id: ObjectId) -> WorldResult<&mut Object> {
        self.objects.get_mut(id.0).ok_or(WorldError::ObjectNotFound(id))
    }

    /// Item state of `id`, failing for rooms.
    pub fn item(&self, id: ObjectId) -> WorldResult<&Item> {
        self.get(id)?.as_item().ok_or(WorldError::NotAnItem(id))
    }

    /// Item state of `id`, mutably.
    pub fn item_mut(&mut self, id: ObjectId) -> WorldResult<&mut Item> {
        self.get_mut(id)?
            .as_item_mut()
            .ok_or(WorldError::NotAnItem(id))
    }

    /// Actor state of `id`, failing for anything that can't act.
    pub fn actor(&self, id: ObjectId) -> WorldResult<&Actor> {
        self.get(id)?.actor.as_ref().ok_or(WorldError::NotAnActor(id))
    }

    /// Actor state of `id`, mutably.
    pub fn actor_mut(&mut self, id: ObjectId) -> WorldResult<&mut Actor> {
        self.get_mut(id)?
            .actor
            .as_mut()
            .ok_or(WorldError::NotAnActor(id))
    }

    /// Look up a room by its exact name.
    pub fn room_named(&self, name: &str) -> WorldResult<ObjectId> {
        self.rooms
            .get(name)
            .copied()
            .ok_or_else(|| WorldError::RoomNotFound(name.to_string()))
    }

    /// The container directly holding `id`.
    pub fn location(&self, id: ObjectId) -> WorldResult<Option<ObjectId>> {
        Ok(self.get(id)?.location)
    }

    /// Direct children of a container, in insertion order.
    pub fn contents(&self, id: ObjectId) -> WorldResult<&[ObjectId]> {
        Ok(self.get(id)?.items())
    }

    /// Display label of any object.
    pub fn label(&self, id: ObjectId) -> WorldResult<String> {
        Ok(self.get(id)?.label())
    }

    /// Every handle in the arena, placed or not.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.iter().map(|object| object.id)
    }

    /// Every word some object answers to.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Match a query against the direct children of `container`.
    ///
    /// A selector picks from the children that are not scenery, after
    /// filtering by any stated descriptors.
    pub fn find(&self, container: ObjectId, query: &Query) -> WorldResult<Vec<ObjectId>> {
        let children = self.get(container)?.items();
        let Some(selector) = query.selector else {
            let mut found = Vec::new();
            for &child in children {
                if self.get(child)?.as_item().is_some_and(|item| query.matches(item)) {
                    found.push(child);
                }
            }
            return Ok(found);
        };

        let mut pool = Vec::new();
        for &child in children {
            let object = self.get(child)?;
            let Some(item) = object.as_item() else { continue };
            if item.is_scenery() {
                continue;
            }
            if query.has_descriptors() && !query.matches(item) {
                continue;
            }
            pool.push(child);
        }
        Ok(match selector {
            Selector::All => pool,
            Selector::First => pool.into_iter().take(1).collect(),
            Selector::Last => pool.pop().into_iter().collect(),
        })
    }

    /// Match a query against what `viewer` can see.
    ///
    /// Searches the viewer's room first. If nothing matches there, falls back
    /// to the insides of open furniture and the viewer's own inventory.
    pub fn visible(&self, viewer: ObjectId, query: &Query) -> WorldResult<Vec<ObjectId>> {
        let Some(room) = self.location(viewer)? else {
            return Ok(Vec::new());
        };
        let found = self.find(room, query)?;
        if !found.is_empty() {
            return Ok(found);
        }

        let mut fallback = Vec::new();
        for &child in self.contents(room)? {
            let object = self.get(child)?;
            if object.is_fixed() && !object.vessel.closure.is_closed() {
                fallback.extend(self.find(child, query)?);
            }
        }
        fallback.extend(self.find(viewer, query)?);
        Ok(fallback)
    }

    /// Own quantity plus the weight of everything inside, recursively.
    pub fn weight(&self, id: ObjectId) -> WorldResult<f64> {
        let object = self.get(id)?;
        let mut total = object.as_item().and_then(|item| item.quantity).unwrap_or(0.0);
        for &child in object.items() {
            total += self.weight(child)?;
        }
        Ok(total)
    }

    // -----------------------------------------------------------------------
    // Narration
    // -----------------------------------------------------------------------

    /// Report narration to the player. The first letter is capitalised and
    /// each line of `text` becomes one feedback line.
    pub fn say(&mut self, text: impl AsRef<str>) {
        for line in capitalize(text.as_ref()).split('\n') {
            self.transcript.push(Line::feedback(line));
        }
    }

    /// Print lines on the output channel.
    pub fn emit(&mut self, lines: &[String]) {
        for line in lines {
            self.transcript.push(Line::output(line.clone()));
        }
    }

    /// Take everything reported since the last drain.
    pub fn drain(&mut self) -> Vec<Line> {
        self.transcript.drain()
    }

    /// The world's seeded random source.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Run a move, narrating any refusal.
    ///
    /// Returns whether the move happened. Only internal errors propagate.
    pub fn attempt(&mut self, mv: Move) -> WorldResult<bool> {
        match self.relocate(mv) {
            Ok(moved) => {
                debug!(?moved, "move succeeded");
                Ok(true)
            }
            Err(MoveError::World(err)) => Err(err),
            Err(refusal) => {
                self.say(refusal.to_string());
                Ok(false)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Raw containment edits, used only by the move state machine
    // -----------------------------------------------------------------------

    pub(crate) fn detach(&mut self, id: ObjectId) -> WorldResult<()> {
        if let Some(parent) = self.get(id)?.location {
            self.get_mut(parent)?.vessel.items.retain(|&child| child != id);
        }
        self.get_mut(id)?.location = None;
        Ok(())
    }

    pub(crate) fn attach(&mut self, id: ObjectId, container: ObjectId) -> WorldResult<()> {
        self.get_mut(container)?.vessel.items.push(id);
        self.get_mut(id)?.location = Some(container);
        Ok(())
    }

    pub(crate) fn reverse_contents(&mut self, id: ObjectId) -> WorldResult<()> {
        self.get_mut(id)?.vessel.items.reverse();
        Ok(())
    }
}
