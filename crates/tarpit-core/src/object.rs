use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::behavior::Behavior;

/// Nouns whose category differs from the noun itself.
const CATEGORIES: &[(&str, &str)] = &[
    ("page", "parchment"),
    ("paper", "parchment"),
    ("letter", "parchment"),
    ("label", "parchment"),
];

/// Categories measured by mass rather than counted.
pub const MASS_NOUNS: &[&str] = &["dirt"];

/// Return the category a noun belongs to, used by type constraints and stacking.
pub fn category_of(noun: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(n, _)| *n == noun)
        .map(|(_, category)| *category)
        .unwrap_or(noun)
}

/// Stable handle for an object in the [`World`](crate::World) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How many objects a container may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// At most this many objects. Zero means "not a container".
    Limited(usize),
    /// No limit, as for rooms.
    Unbounded,
}

impl Capacity {
    /// Not a container at all.
    pub const NONE: Capacity = Capacity::Limited(0);

    /// Whether anything can be put inside.
    pub fn is_container(self) -> bool {
        self != Self::NONE
    }

    /// Whether one more object fits next to `count` existing ones.
    pub fn admits(self, count: usize) -> bool {
        match self {
            Self::Limited(limit) => count < limit,
            Self::Unbounded => true,
        }
    }

    /// Whether `count` objects are within the limit.
    pub fn holds(self, count: usize) -> bool {
        match self {
            Self::Limited(limit) => count <= limit,
            Self::Unbounded => true,
        }
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::NONE
    }
}

/// Whether a container has a lid, and if so whether it is shut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Closure {
    /// Cannot be opened or closed.
    #[default]
    Incapable,
    /// Has a lid, currently open.
    Open,
    /// Has a lid, currently shut.
    Closed,
}

impl Closure {
    /// True only for [`Closure::Closed`].
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

/// Whether a container has a lock, and if so whether it is engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lock {
    /// Cannot be locked or unlocked.
    #[default]
    Incapable,
    /// Has a lock, currently open.
    Unlocked,
    /// Has a lock, currently engaged.
    Locked,
}

/// The container capability shared by rooms, items and actors.
///
/// Only moves and the open/close/lock transitions change it.
#[derive(Debug, Clone, Default)]
pub struct Vessel {
    pub(crate) items: Vec<ObjectId>,
    pub(crate) capacity: Capacity,
    pub(crate) closure: Closure,
    pub(crate) lock: Lock,
}

impl Vessel {
    /// Create an empty vessel with the given capacity.
    pub fn new(capacity: Capacity) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Contained objects in insertion order.
    pub fn items(&self) -> &[ObjectId] {
        &self.items
    }

    /// Maximum number of contained objects.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Lid state.
    pub fn closure(&self) -> Closure {
        self.closure
    }

    /// Lock state.
    pub fn lock(&self) -> Lock {
        self.lock
    }
}

/// Optional adjective plus required noun, used to match noun phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// Distinguishing adjective, e.g. `small`.
    pub adjective: Option<String>,
    /// The noun, e.g. `key`.
    pub noun: String,
}

impl Descriptor {
    /// Parse `"noun"` or `"adjective noun"`. Words are stored lowercase.
    pub fn parse(phrase: &str) -> Self {
        let mut words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
        let noun = words.pop().unwrap_or_default();
        let adjective = if words.is_empty() {
            None
        } else {
            Some(words.join("-"))
        };
        Self { adjective, noun }
    }

    /// The noun's category.
    pub fn category(&self) -> &str {
        category_of(&self.noun)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.adjective {
            Some(adjective) => write!(f, "{adjective} {}", self.noun),
            None => write!(f, "{}", self.noun),
        }
    }
}

/// Item-specific state.
#[derive(Debug, Clone)]
pub struct Item {
    /// Adjective and noun.
    pub descriptor: Descriptor,
    /// Name given with `call`.
    pub proper_name: Option<String>,
    /// Scenery: never moves once placed.
    pub fixed: bool,
    /// Movable by world logic, but not carried about by actors.
    pub mobile: bool,
    /// Amount in kilograms for mass nouns.
    pub quantity: Option<f64>,
    /// Lines written on the item. Doubles as a script body.
    pub writing: Vec<String>,
    /// Text shown by `look`.
    pub description: Option<String>,
}

impl Item {
    /// Create a plain item from an `"adjective noun"` phrase.
    pub fn new(phrase: &str) -> Self {
        Self {
            descriptor: Descriptor::parse(phrase),
            proper_name: None,
            fixed: false,
            mobile: false,
            quantity: None,
            writing: Vec::new(),
            description: None,
        }
    }

    /// The item's category.
    pub fn category(&self) -> &str {
        self.descriptor.category()
    }

    /// Whether this item is excluded from `all`/`first`/`last` selections.
    pub fn is_scenery(&self) -> bool {
        self.fixed || self.mobile
    }

    /// Append text, one line per `;`-separated segment.
    pub fn write(&mut self, text: &str) {
        self.writing
            .extend(text.split(';').map(|line| line.trim().to_string()));
    }

    /// Display label, e.g. `nut bag called "rex"`.
    pub fn label(&self) -> String {
        match &self.proper_name {
            Some(name) => format!("{} called \"{name}\"", self.descriptor),
            None => self.descriptor.to_string(),
        }
    }
}

/// Room-specific state.
#[derive(Debug, Clone)]
pub struct Room {
    /// Unique room name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Direction name to destination room name.
    pub exits: BTreeMap<String, String>,
    /// Action name to the noun it yields, e.g. `dig` to `dirt`.
    pub resources: BTreeMap<String, String>,
}

impl Room {
    /// Create a room with no exits.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            exits: BTreeMap::new(),
            resources: BTreeMap::new(),
        }
    }

    /// Add an exit.
    pub fn with_exit(mut self, direction: impl Into<String>, room: impl Into<String>) -> Self {
        self.exits.insert(direction.into(), room.into());
        self
    }

    /// Add an infinite resource.
    pub fn with_resource(mut self, action: impl Into<String>, noun: impl Into<String>) -> Self {
        self.resources.insert(action.into(), noun.into());
        self
    }
}

/// One level of nested script execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
    cursor: usize,
}

impl Frame {
    /// Create a frame positioned before its first line.
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            cursor: 0,
        }
    }

    /// Take the next line, if any remain.
    pub fn advance(&mut self) -> Option<String> {
        let line = self.lines.get(self.cursor).cloned();
        if line.is_some() {
            self.cursor += 1;
        }
        line
    }
}

/// Actor-specific state.
#[derive(Debug, Clone)]
pub struct Actor {
    /// Cleared by `quit`; checked between script lines.
    pub active: bool,
    /// Script frames in progress, innermost last.
    pub stack: Vec<Frame>,
    /// Names of rooms already described in full.
    pub visited: HashSet<String>,
}

impl Actor {
    /// Number of items an actor can carry.
    pub const CAPACITY: usize = 9;

    /// An active actor with an empty call stack.
    pub fn new() -> Self {
        Self {
            active: true,
            stack: Vec::new(),
            visited: HashSet::new(),
        }
    }

    /// Current script nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

/// What kind of thing an object is.
#[derive(Debug, Clone)]
pub enum Body {
    /// A room: never placed inside anything.
    Room(Room),
    /// An item, including actors.
    Item(Item),
}

/// An entry in the world arena.
#[derive(Debug, Clone)]
pub struct Object {
    /// This object's handle.
    pub id: ObjectId,
    /// Container capability.
    pub vessel: Vessel,
    pub(crate) location: Option<ObjectId>,
    /// Room or item state.
    pub body: Body,
    /// Present for actors only.
    pub actor: Option<Actor>,
    /// Hook variant.
    pub behavior: Behavior,
}

impl Object {
    /// The container holding this object, if placed.
    pub fn location(&self) -> Option<ObjectId> {
        self.location
    }

    /// Contained objects in insertion order.
    pub fn items(&self) -> &[ObjectId] {
        self.vessel.items()
    }

    /// Item state, unless this is a room.
    pub fn as_item(&self) -> Option<&Item> {
        match &self.body {
            Body::Item(item) => Some(item),
            Body::Room(_) => None,
        }
    }

    /// Mutable item state, unless this is a room.
    pub fn as_item_mut(&mut self) -> Option<&mut Item> {
        match &mut self.body {
            Body::Item(item) => Some(item),
            Body::Room(_) => None,
        }
    }

    /// Room state, if this is a room.
    pub fn as_room(&self) -> Option<&Room> {
        match &self.body {
            Body::Room(room) => Some(room),
            Body::Item(_) => None,
        }
    }

    /// Whether this object is scenery (fixed or mobile).
    pub fn is_scenery(&self) -> bool {
        self.as_item().is_some_and(Item::is_scenery)
    }

    /// Whether this object is fixed furniture.
    pub fn is_fixed(&self) -> bool {
        self.as_item().is_some_and(|item| item.fixed)
    }

    /// The category of an item; rooms have none.
    pub fn category(&self) -> Option<&str> {
        self.as_item().map(Item::category)
    }

    /// Display label: room name or item label.
    pub fn label(&self) -> String {
        match &self.body {
            Body::Room(room) => room.name.clone(),
            Body::Item(item) => item.label(),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Builder describing an item or actor before it is spawned into the world.
#[derive(Debug, Clone)]
pub struct Blueprint {
    pub(crate) item: Item,
    pub(crate) vessel: Vessel,
    pub(crate) actor: Option<Actor>,
    pub(crate) behavior: Behavior,
}

impl Blueprint {
    /// A plain item that holds nothing.
    pub fn item(phrase: &str) -> Self {
        Self {
            item: Item::new(phrase),
            vessel: Vessel::default(),
            actor: None,
            behavior: Behavior::Inert,
        }
    }

    /// Fixed furniture with unbounded room inside.
    pub fn furniture(phrase: &str) -> Self {
        let mut blueprint = Self::item(phrase).capacity(Capacity::Unbounded);
        blueprint.item.fixed = true;
        blueprint
    }

    /// A mobile actor that can carry a few items.
    pub fn actor(phrase: &str) -> Self {
        let mut blueprint = Self::item(phrase).capacity(Capacity::Limited(Actor::CAPACITY));
        blueprint.item.mobile = true;
        blueprint.actor = Some(Actor::new());
        blueprint
    }

    /// Set the container capacity.
    pub fn capacity(mut self, capacity: Capacity) -> Self {
        self.vessel.capacity = capacity;
        self
    }

    /// Give it a lid, initially shut.
    pub fn closed(mut self) -> Self {
        self.vessel.closure = Closure::Closed;
        self
    }

    /// Give it a lid, initially open.
    pub fn open(mut self) -> Self {
        self.vessel.closure = Closure::Open;
        self
    }

    /// Give it a lock, initially engaged.
    pub fn locked(mut self) -> Self {
        self.vessel.lock = Lock::Locked;
        self
    }

    /// Attach a quantity in kilograms.
    pub fn quantity(mut self, kg: f64) -> Self {
        self.item.quantity = Some(kg);
        self
    }

    /// Set the `look` text.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.item.description = Some(text.into());
        self
    }

    /// Write `;`-separated lines on it.
    pub fn writing(mut self, text: &str) -> Self {
        self.item.write(text);
        self
    }

    /// Write these exact lines on it.
    pub fn lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.item.writing.extend(lines);
        self
    }

    /// Give it a proper name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.item.proper_name = Some(name.into());
        self
    }

    /// Attach a hook variant.
    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }
}
