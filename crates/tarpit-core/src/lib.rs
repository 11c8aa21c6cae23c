//! Core types for Tarpit: objects, containment, and the move state machine.
//!
//! Every room, item and actor lives in a single [`World`] arena and is
//! addressed by an [`ObjectId`] handle. Containers hold ordered lists of
//! handles, and an object's `location` is a handle back into the arena, so
//! hooks that relocate or destroy objects can never leave a dangling
//! reference. The only way to change an object's container is
//! [`World::relocate`].

/// Hook variants that let rooms and items react to arrivals, closing and speech.
pub mod behavior;
/// Text descriptions of rooms and items.
pub mod describe;
/// Error types used throughout the crate.
pub mod error;
/// The move state machine and open/close/lock transitions.
pub mod movement;
/// Object handles, descriptors, vessels, items, rooms and actors.
pub mod object;
/// Noun-phrase queries matched against container contents.
pub mod query;
/// Narration and program output collected while commands run.
pub mod report;
/// The arena that owns every object, plus its vocabulary.
pub mod world;

/// Re-export hook types.
pub use behavior::{Behavior, Heard, Hooks};
/// Re-export error types.
pub use error::{MoveError, MoveResult, StateError, StateResult, WorldError, WorldResult};
/// Re-export move types.
pub use movement::{Move, Moved, Mover};
/// Re-export object model types.
pub use object::{
    Actor, Blueprint, Body, Capacity, Closure, Descriptor, Frame, Item, Lock, MASS_NOUNS, Object,
    ObjectId, Room, Vessel, category_of,
};
/// Re-export query types.
pub use query::{Query, Selector};
/// Re-export report types.
pub use report::{Channel, Line, Transcript, capitalize};
/// Re-export world types.
pub use world::{Vocabulary, World};
