use crate::object::ObjectId;

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Alias for `Result<T, MoveError>`.
pub type MoveResult<T> = Result<T, MoveError>;

/// Alias for `Result<T, StateError>`.
pub type StateResult<T> = Result<T, StateError>;

/// Internal errors: a handle or name that does not lead anywhere.
///
/// These never come from player input. Seeing one means world construction
/// or a hook went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The handle does not exist in the arena.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// No room has been registered under this name.
    #[error("room not found: \"{0}\"")]
    RoomNotFound(String),

    /// A room with the same name already exists.
    #[error("room already exists: \"{0}\"")]
    DuplicateRoom(String),

    /// The object is a room where an item was expected.
    #[error("{0} is not an item")]
    NotAnItem(ObjectId),

    /// The object is not an actor.
    #[error("{0} is not an actor")]
    NotAnActor(ObjectId),
}

/// Reasons a move is refused, checked in this order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The destination is the object itself or sits inside it.
    #[error("That's...impossible.")]
    Impossible,

    /// The object is already in the destination.
    #[error("It's already there!")]
    AlreadyThere,

    /// Scenery never moves once placed.
    #[error("The {0} can't be moved.")]
    Fixed(String),

    /// A mobile object refuses to be carried about by an actor.
    #[error("The {0} doesn't care to be moved about.")]
    Unwilling(String),

    /// The destination cannot hold anything.
    #[error("Not a container!")]
    NotAContainer,

    /// The destination is closed.
    #[error("The {0} is closed.")]
    Closed(String),

    /// The destination is full.
    #[error("No more room!")]
    NoRoom,

    /// An internal error surfaced while moving or running a hook.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Reasons an open/close/lock/unlock transition is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The object has no lid or door.
    #[error("The {0} can't be opened.")]
    CannotOpen(String),

    /// Opening something already open.
    #[error("The {0} is already open.")]
    AlreadyOpen(String),

    /// Opening something locked.
    #[error("The {0} is locked.")]
    Locked(String),

    /// The object has no lid or door.
    #[error("The {0} can't be closed.")]
    CannotClose(String),

    /// Closing something already closed.
    #[error("The {0} is already closed.")]
    AlreadyClosed(String),

    /// The object has no lock.
    #[error("The {0} can't be unlocked.")]
    CannotUnlock(String),

    /// Unlocking something that is not locked.
    #[error("The {0} is not locked.")]
    NotLocked(String),

    /// The object has no lock.
    #[error("The {0} can't be locked.")]
    CannotLock(String),

    /// Locking requires the object to be closed first.
    #[error("You'll have to close the {0} first.")]
    CloseFirst(String),

    /// Locking something already locked.
    #[error("The {0} is already locked.")]
    AlreadyLocked(String),

    /// An internal error surfaced while running the close hook.
    #[error(transparent)]
    World(#[from] WorldError),
}
