//! Command interpretation for Tarpit.
//!
//! Player input is lexed into words, aliases are substituted, and the first
//! word selects a verb whose usage grammar binds the remaining words to typed
//! arguments. Noun phrases are resolved against what the acting character can
//! see or hold. Text written on in-world objects can be obeyed line by line,
//! which makes the adventure a small programming language.

/// Synonyms substituted before grammar matching.
pub mod alias;
/// Session configuration.
pub mod config;
/// The Tarpit map and its inhabitants.
mod content;
/// Error types for the fiction engine.
pub mod error;
/// Shell-style word splitting for command lines.
pub mod lexer;
/// Usage grammar, noun resolution and argument binding.
pub mod parser;
/// Nested execution of written commands.
mod script;
/// Interactive fiction session management.
pub mod session;
/// The verb table and its handlers.
pub mod verbs;

pub use config::{Feedback, SessionConfig};
pub use error::{CommandError, CommandResult, FictionError, FictionResult};
pub use lexer::{Tokens, tokenize};
pub use parser::{Arg, Arguments, Kind, ParamSpec, Resolver, Scope, VerbDescriptor};
pub use session::Session;
pub use verbs::{Handler, Verb, VerbTable};
