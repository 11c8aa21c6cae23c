//! Error types for the fiction engine.

use tarpit_core::{MoveError, StateError, WorldError};
use thiserror::Error;

/// Result type for interpreting one command.
pub type CommandResult<T> = Result<T, CommandError>;

/// Result type for setting up a session.
pub type FictionResult<T> = Result<T, FictionError>;

/// Why a single command could not be carried out.
///
/// Every variant except the internal ones is told to the player and the
/// session moves on to the next line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// A word was left over with no parameter to absorb it.
    #[error("You lost me at \"{token}\".")]
    LostMe {
        /// The leftover word.
        token: String,
    },

    /// A required positional parameter was never filled.
    #[error("{verb} what {name}?")]
    MissingArgument {
        /// The verb being run.
        verb: String,
        /// The parameter's name.
        name: String,
    },

    /// A required prepositional parameter was never filled.
    #[error("{verb} {preposition} what?")]
    MissingPreposition {
        /// The verb being run.
        verb: String,
        /// The preposition that introduces the parameter.
        preposition: String,
    },

    /// No object matched the noun phrase.
    #[error("What {0}? I see nothing by that description.")]
    NotFound(String),

    /// More than one object matched where one was required.
    #[error("Which {0}? There's more than one.")]
    Ambiguous(String),

    /// `all` was used where only one object makes sense.
    #[error("You can't specify multiple objects here.")]
    MultipleNotAllowed,

    /// Nothing recognisable started the noun phrase.
    #[error("I didn't understand. {0}?")]
    NotUnderstood(String),

    /// `called` was not followed by a name.
    #[error("Called what?")]
    CalledWhat,

    /// The object is of the wrong category for this parameter.
    #[error("The {0} can't be used for that.")]
    TypeMismatch(String),

    /// A containment clause named a closed container.
    #[error("The {0} is closed.")]
    Closed(String),

    /// The actor is not anywhere, so `here` and room searches are meaningless.
    #[error("You aren't anywhere at all.")]
    NotHere,

    /// The first word is not a verb or a direction.
    #[error("I did not understand that.{}", did_you_mean(.suggestion))]
    UnknownCommand {
        /// The unrecognised word.
        word: String,
        /// The closest known verb, if any is close enough.
        suggestion: Option<String>,
    },

    /// A quoted string was never closed.
    #[error("Unbalanced quotes near \"{0}\".")]
    Unbalanced(String),

    /// A handler asked for an argument its usage does not declare.
    #[error("no argument bound for \"{0}\"")]
    Unbound(String),

    /// A move was refused.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// An open/close/lock/unlock was refused.
    #[error(transparent)]
    State(#[from] StateError),

    /// An internal inconsistency in the world.
    #[error(transparent)]
    World(#[from] WorldError),
}

impl CommandError {
    /// The internal error hidden inside this one, if any.
    ///
    /// Internal errors are logged instead of narrated and stop any script
    /// that is running.
    pub fn internal(&self) -> Option<&WorldError> {
        match self {
            Self::World(err)
            | Self::Move(MoveError::World(err))
            | Self::State(StateError::World(err)) => Some(err),
            _ => None,
        }
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(verb) => format!(" Did you mean \"{verb}\"?"),
        None => String::new(),
    }
}

/// Errors that prevent a session from starting.
#[derive(Debug, Error)]
pub enum FictionError {
    /// A verb's usage string is malformed.
    #[error("invalid usage \"{usage}\": {message}")]
    Usage {
        /// The usage string.
        usage: String,
        /// What the grammar parser objected to.
        message: String,
    },

    /// Building the world failed.
    #[error("world construction failed: {0}")]
    World(#[from] WorldError),

    /// Placing an object during construction failed.
    #[error("world construction failed: {0}")]
    Move(#[from] MoveError),
}
