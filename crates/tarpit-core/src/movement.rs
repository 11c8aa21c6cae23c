use tracing::debug;

use crate::error::{MoveError, MoveResult, StateError, StateResult, WorldResult};
use crate::object::{Closure, Lock, ObjectId};
use crate::report::capitalize;
use crate::world::World;

/// Who is asking for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mover {
    /// An actor carrying things about. Mobile objects refuse.
    #[default]
    Actor,
    /// World logic such as theft or construction.
    World,
}

/// A request to put `object` into `destination`, or nowhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    /// What is being moved.
    pub object: ObjectId,
    /// Where it goes. `None` takes it out of play.
    pub destination: Option<ObjectId>,
    /// Reported once the move has happened.
    pub narration: Option<String>,
    /// Who asked.
    pub mover: Mover,
}

impl Move {
    /// An actor moving `object` into `destination`.
    pub fn new(object: ObjectId, destination: ObjectId) -> Self {
        Self {
            object,
            destination: Some(destination),
            narration: None,
            mover: Mover::Actor,
        }
    }

    /// Move to nowhere, destroying the object as far as players can tell.
    pub fn unplace(object: ObjectId) -> Self {
        Self {
            object,
            destination: None,
            narration: None,
            mover: Mover::World,
        }
    }

    /// Text to report once the move has happened, before any hooks run.
    pub fn narrate(mut self, text: impl Into<String>) -> Self {
        self.narration = Some(text.into());
        self
    }

    /// Ask on behalf of world logic rather than an actor.
    pub fn by_world(mut self) -> Self {
        self.mover = Mover::World;
        self
    }
}

/// What a successful move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moved {
    /// Appended to the destination.
    Placed,
    /// Quantity folded into an existing object, which survives.
    Merged {
        /// The object that absorbed the quantity.
        into: ObjectId,
    },
    /// Now nowhere.
    Unplaced,
}

impl World {
    /// Move an object. This is the only operation that changes containment.
    ///
    /// Guards run in a fixed order and the first failure wins. On success
    /// the object's `on_arrive` hook fires, then the destination's `on_take`.
    pub fn relocate(&mut self, mv: Move) -> MoveResult<Moved> {
        let Move {
            object,
            destination,
            narration,
            mover,
        } = mv;
        let source = self.location(object)?;

        if let Some(dest) = destination {
            let mut cursor = Some(dest);
            while let Some(container) = cursor {
                if container == object {
                    return Err(MoveError::Impossible);
                }
                cursor = self.location(container)?;
            }
        }

        if source == destination {
            return Err(MoveError::AlreadyThere);
        }

        let moving = self.get(object)?;
        if source.is_some() && destination.is_some() {
            if moving.is_fixed() {
                return Err(MoveError::Fixed(moving.label()));
            }
            if mover == Mover::Actor && moving.as_item().is_some_and(|item| item.mobile) {
                return Err(MoveError::Unwilling(moving.label()));
            }
        }

        let Some(dest) = destination else {
            self.detach(object)?;
            self.narrate(narration);
            debug!(%object, "unplaced");
            return Ok(Moved::Unplaced);
        };

        let target = self.get(dest)?;
        if !target.vessel.capacity.is_container() {
            return Err(MoveError::NotAContainer);
        }
        if target.vessel.closure.is_closed() && source.is_some() {
            return Err(MoveError::Closed(target.label()));
        }

        if let Some(into) = self.stack_target(object, dest)? {
            let amount = self.item(object)?.quantity.unwrap_or(0.0);
            let existing = self.item_mut(into)?;
            existing.quantity = Some(existing.quantity.unwrap_or(0.0) + amount);
            self.detach(object)?;
            self.narrate(narration);
            debug!(%object, %into, %dest, "merged");
            self.fire_arrive(into)?;
            self.fire_take(dest, into, source)?;
            return Ok(Moved::Merged { into });
        }

        let target = self.get(dest)?;
        if !target.vessel.capacity.admits(target.items().len()) {
            return Err(MoveError::NoRoom);
        }

        self.detach(object)?;
        self.attach(object, dest)?;
        self.narrate(narration);
        debug!(%object, ?source, %dest, "placed");
        self.fire_arrive(object)?;
        self.fire_take(dest, object, source)?;
        Ok(Moved::Placed)
    }

    /// A quantity-bearing child of `dest` that `object` should merge into.
    fn stack_target(&self, object: ObjectId, dest: ObjectId) -> WorldResult<Option<ObjectId>> {
        let item = self.item(object)?;
        if item.quantity.is_none() {
            return Ok(None);
        }
        let category = item.category();
        for &child in self.contents(dest)? {
            let stacks = self
                .get(child)?
                .as_item()
                .is_some_and(|other| other.quantity.is_some() && other.category() == category);
            if stacks {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    fn narrate(&mut self, narration: Option<String>) {
        if let Some(text) = narration {
            self.say(text);
        }
    }

    // -----------------------------------------------------------------------
    // Open / close / lock / unlock
    // -----------------------------------------------------------------------

    /// Open a closed, unlocked container and list what it reveals.
    pub fn open(&mut self, id: ObjectId) -> StateResult<()> {
        let object = self.get(id)?;
        let label = object.label();
        match (object.vessel.closure, object.vessel.lock) {
            (Closure::Incapable, _) => return Err(StateError::CannotOpen(label)),
            (Closure::Open, _) => return Err(StateError::AlreadyOpen(label)),
            (Closure::Closed, Lock::Locked) => return Err(StateError::Locked(label)),
            (Closure::Closed, _) => {}
        }
        self.get_mut(id)?.vessel.closure = Closure::Open;

        let contents = self.contents(id)?.to_vec();
        if contents.is_empty() {
            self.say(format!("The {label} is now open. It is empty."));
            return Ok(());
        }
        self.say(format!("Opening the {label} reveals:"));
        for child in contents {
            let brief = self.describe(child, true)?;
            self.say(format!("  {}.", capitalize(&brief)));
        }
        Ok(())
    }

    /// Close an open container, then fire its `on_close` hook.
    pub fn close(&mut self, id: ObjectId) -> StateResult<()> {
        let object = self.get(id)?;
        let label = object.label();
        match object.vessel.closure {
            Closure::Incapable => return Err(StateError::CannotClose(label)),
            Closure::Closed => return Err(StateError::AlreadyClosed(label)),
            Closure::Open => {}
        }
        self.get_mut(id)?.vessel.closure = Closure::Closed;
        self.say(format!("The {label} is now closed."));
        self.fire_close(id)?;
        Ok(())
    }

    /// Unlock a locked container.
    pub fn unlock(&mut self, id: ObjectId) -> StateResult<()> {
        let object = self.get(id)?;
        let label = object.label();
        match object.vessel.lock {
            Lock::Incapable => return Err(StateError::CannotUnlock(label)),
            Lock::Unlocked => return Err(StateError::NotLocked(label)),
            Lock::Locked => {}
        }
        self.get_mut(id)?.vessel.lock = Lock::Unlocked;
        self.say(format!("You unlock the {label}."));
        Ok(())
    }

    /// Lock a container. It has to be closed first.
    pub fn lock(&mut self, id: ObjectId) -> StateResult<()> {
        let object = self.get(id)?;
        let label = object.label();
        match (object.vessel.lock, object.vessel.closure) {
            (Lock::Incapable, _) => return Err(StateError::CannotLock(label)),
            (_, Closure::Open | Closure::Incapable) => {
                return Err(StateError::CloseFirst(label));
            }
            (Lock::Locked, _) => return Err(StateError::AlreadyLocked(label)),
            (Lock::Unlocked, Closure::Closed) => {}
        }
        self.get_mut(id)?.vessel.lock = Lock::Locked;
        self.say(format!("You lock the {label}."));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;
    use crate::object::{Blueprint, Capacity, Room};
    use proptest::prelude::*;

    fn setup() -> (World, ObjectId, ObjectId) {
        let mut world = World::new(1);
        let room = world
            .add_room(Room::new("Test room", "A bare room."), Behavior::Inert)
            .unwrap();
        let actor = world.spawn_in(Blueprint::actor("you"), room).unwrap();
        world.drain();
        (world, room, actor)
    }

    fn feedback(world: &mut World) -> Vec<String> {
        world.drain().into_iter().map(|line| line.text).collect()
    }

    #[test]
    fn move_into_room_and_back() {
        let (mut world, room, actor) = setup();
        let key = world.spawn_in(Blueprint::item("key"), room).unwrap();
        let moved = world
            .relocate(Move::new(key, actor).narrate("key taken."))
            .unwrap();
        assert_eq!(moved, Moved::Placed);
        assert_eq!(world.location(key).unwrap(), Some(actor));
        assert!(!world.contents(room).unwrap().contains(&key));
        assert_eq!(feedback(&mut world), vec!["Key taken."]);
    }

    #[test]
    fn cannot_move_into_itself() {
        let (mut world, room, _) = setup();
        let bag = world
            .spawn_in(Blueprint::item("bag").capacity(Capacity::Unbounded), room)
            .unwrap();
        assert_eq!(world.relocate(Move::new(bag, bag)), Err(MoveError::Impossible));
    }

    #[test]
    fn already_there() {
        let (mut world, room, _) = setup();
        let key = world.spawn_in(Blueprint::item("key"), room).unwrap();
        assert_eq!(
            world.relocate(Move::new(key, room)),
            Err(MoveError::AlreadyThere)
        );
    }

    #[test]
    fn fixed_and_mobile_guards() {
        let (mut world, room, actor) = setup();
        let desk = world.spawn_in(Blueprint::furniture("oak desk"), room).unwrap();
        let robot = world.spawn_in(Blueprint::actor("robot"), room).unwrap();
        assert_eq!(
            world.relocate(Move::new(desk, actor)),
            Err(MoveError::Fixed("oak desk".to_string()))
        );
        assert_eq!(
            world.relocate(Move::new(robot, actor)),
            Err(MoveError::Unwilling("robot".to_string()))
        );
        // World logic may still carry a mobile object about.
        let other = world
            .add_room(Room::new("Other room", "Elsewhere."), Behavior::Inert)
            .unwrap();
        assert_eq!(
            world.relocate(Move::new(robot, other).by_world()),
            Ok(Moved::Placed)
        );
    }

    #[test]
    fn not_a_container() {
        let (mut world, room, actor) = setup();
        let key = world.spawn_in(Blueprint::item("key"), actor).unwrap();
        let pen = world.spawn_in(Blueprint::item("pen"), room).unwrap();
        assert_eq!(world.relocate(Move::new(key, pen)), Err(MoveError::NotAContainer));
    }

    #[test]
    fn closed_destination_refuses_and_leaves_item_in_place() {
        let (mut world, room, actor) = setup();
        let key = world.spawn_in(Blueprint::item("key"), actor).unwrap();
        let bx = world
            .spawn_in(Blueprint::item("box").capacity(Capacity::Limited(3)).closed(), room)
            .unwrap();
        assert_eq!(
            world.relocate(Move::new(key, bx)),
            Err(MoveError::Closed("box".to_string()))
        );
        assert_eq!(world.location(key).unwrap(), Some(actor));
    }

    #[test]
    fn construction_ignores_closed_lid() {
        let (mut world, room, _) = setup();
        let bx = world
            .spawn_in(Blueprint::item("box").capacity(Capacity::Limited(3)).closed(), room)
            .unwrap();
        let letter = world.spawn_in(Blueprint::item("letter"), bx).unwrap();
        assert_eq!(world.location(letter).unwrap(), Some(bx));
    }

    #[test]
    fn capacity_is_enforced() {
        let (mut world, room, _) = setup();
        let tin = world
            .spawn_in(Blueprint::item("tin").capacity(Capacity::Limited(1)), room)
            .unwrap();
        world.spawn_in(Blueprint::item("coin"), tin).unwrap();
        let button = world.spawn_in(Blueprint::item("button"), room).unwrap();
        assert_eq!(world.relocate(Move::new(button, tin)), Err(MoveError::NoRoom));
        assert_eq!(world.contents(tin).unwrap().len(), 1);
    }

    #[test]
    fn quantities_of_the_same_category_stack() {
        let (mut world, room, actor) = setup();
        let mine = world
            .spawn_in(Blueprint::item("dirt").quantity(2.0), actor)
            .unwrap();
        let pile = world
            .spawn_in(Blueprint::item("dirt").quantity(1.5), room)
            .unwrap();
        let moved = world.relocate(Move::new(pile, actor)).unwrap();
        assert_eq!(moved, Moved::Merged { into: mine });
        assert_eq!(world.contents(actor).unwrap(), &[mine]);
        assert_eq!(world.item(mine).unwrap().quantity, Some(3.5));
        assert_eq!(world.location(pile).unwrap(), None);
        assert!(!world.contents(room).unwrap().contains(&pile));
    }

    #[test]
    fn stacking_ignores_full_capacity() {
        let (mut world, room, _) = setup();
        let pan = world
            .spawn_in(Blueprint::item("pan").capacity(Capacity::Limited(1)), room)
            .unwrap();
        world.spawn_in(Blueprint::item("dirt").quantity(1.0), pan).unwrap();
        let more = world.spawn(Blueprint::item("dirt").quantity(1.0));
        assert!(matches!(
            world.relocate(Move::new(more, pan)),
            Ok(Moved::Merged { .. })
        ));
        assert_eq!(world.weight(pan).unwrap(), 2.0);
    }

    #[test]
    fn unplacing_detaches() {
        let (mut world, room, _) = setup();
        let key = world.spawn_in(Blueprint::item("key"), room).unwrap();
        assert_eq!(world.relocate(Move::unplace(key)), Ok(Moved::Unplaced));
        assert_eq!(world.location(key).unwrap(), None);
        assert!(!world.contents(room).unwrap().contains(&key));
    }

    #[test]
    fn unplacing_fires_no_hooks() {
        let (mut world, room, _) = setup();
        let visitor = world
            .spawn_in(Blueprint::actor("visitor").behavior(Behavior::Player), room)
            .unwrap();
        world.drain();
        assert_eq!(world.relocate(Move::unplace(visitor)), Ok(Moved::Unplaced));
        assert!(world.drain().is_empty());
        assert!(!world.attempt(Move::unplace(visitor)).unwrap());
        assert_eq!(feedback(&mut world), vec!["It's already there!"]);
    }

    #[test]
    fn attempt_narrates_refusals() {
        let (mut world, room, _) = setup();
        let key = world.spawn_in(Blueprint::item("key"), room).unwrap();
        assert!(!world.attempt(Move::new(key, room)).unwrap());
        assert_eq!(feedback(&mut world), vec!["It's already there!"]);
    }

    #[test]
    fn open_close_lock_unlock_transitions() {
        let (mut world, room, _) = setup();
        let case = world
            .spawn_in(
                Blueprint::furniture("trophy case").closed().locked(),
                room,
            )
            .unwrap();
        let pen = world.spawn_in(Blueprint::item("pen"), room).unwrap();
        world.drain();

        assert_eq!(world.open(case), Err(StateError::Locked("trophy case".into())));
        assert_eq!(world.lock(case), Err(StateError::AlreadyLocked("trophy case".into())));
        world.unlock(case).unwrap();
        assert_eq!(world.unlock(case), Err(StateError::NotLocked("trophy case".into())));
        world.open(case).unwrap();
        assert_eq!(world.open(case), Err(StateError::AlreadyOpen("trophy case".into())));
        assert_eq!(world.lock(case), Err(StateError::CloseFirst("trophy case".into())));
        world.close(case).unwrap();
        assert_eq!(world.close(case), Err(StateError::AlreadyClosed("trophy case".into())));
        world.lock(case).unwrap();

        assert_eq!(world.open(pen), Err(StateError::CannotOpen("pen".into())));
        assert_eq!(world.close(pen), Err(StateError::CannotClose("pen".into())));
        assert_eq!(world.lock(pen), Err(StateError::CannotLock("pen".into())));
        assert_eq!(world.unlock(pen), Err(StateError::CannotUnlock("pen".into())));

        assert_eq!(
            feedback(&mut world),
            vec![
                "You unlock the trophy case.",
                "The trophy case is now open. It is empty.",
                "The trophy case is now closed.",
                "You lock the trophy case.",
            ]
        );
    }

    #[test]
    fn opening_lists_contents() {
        let (mut world, room, _) = setup();
        let mailbox = world
            .spawn_in(Blueprint::furniture("mailbox").closed(), room)
            .unwrap();
        world.spawn_in(Blueprint::item("letter"), mailbox).unwrap();
        world.drain();
        world.open(mailbox).unwrap();
        assert_eq!(
            feedback(&mut world),
            vec!["Opening the mailbox reveals:", "  A letter."]
        );
    }

    /// Checks that every placed object sits in exactly one container,
    /// that containers respect their capacity, and that no object
    /// contains itself.
    fn assert_integrity(world: &World) {
        for id in world.ids() {
            let holders: Vec<ObjectId> = world
                .ids()
                .filter(|&c| world.contents(c).unwrap().contains(&id))
                .collect();
            match world.location(id).unwrap() {
                Some(parent) => assert_eq!(holders, vec![parent]),
                None => assert!(holders.is_empty()),
            }
            let object = world.get(id).unwrap();
            assert!(object.vessel.capacity.holds(object.items().len()));

            let mut cursor = world.location(id).unwrap();
            while let Some(container) = cursor {
                assert_ne!(container, id);
                cursor = world.location(container).unwrap();
            }
        }
    }

    proptest! {
        #[test]
        fn containment_survives_random_moves(
            capacities in prop::collection::vec(0usize..4, 2..8),
            moves in prop::collection::vec((0usize..8, 0usize..9), 0..40),
        ) {
            let (mut world, room, _) = setup();
            let items: Vec<ObjectId> = capacities
                .iter()
                .enumerate()
                .map(|(i, &cap)| {
                    world.spawn(Blueprint::item(&format!("thing{i}")).capacity(Capacity::Limited(cap)))
                })
                .collect();

            for (object, dest) in moves {
                let object = items[object % items.len()];
                let dest = match dest % (items.len() + 1) {
                    0 => room,
                    n => items[n - 1],
                };
                let _ = world.relocate(Move::new(object, dest).by_world());
                assert_integrity(&world);
            }
        }

        #[test]
        fn moving_into_any_descendant_is_impossible(depth in 1usize..8) {
            let (mut world, room, _) = setup();
            let root = world
                .spawn_in(Blueprint::item("crate").capacity(Capacity::Unbounded), room)
                .unwrap();
            let mut chain = vec![root];
            for i in 0..depth {
                let parent = chain[chain.len() - 1];
                let child = world
                    .spawn_in(Blueprint::item(&format!("box{i}")).capacity(Capacity::Unbounded), parent)
                    .unwrap();
                chain.push(child);
            }
            for &target in &chain {
                prop_assert_eq!(world.relocate(Move::new(root, target)), Err(MoveError::Impossible));
            }
            prop_assert_eq!(world.location(root).unwrap(), Some(room));
        }
    }
}
