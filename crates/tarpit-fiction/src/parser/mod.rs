//! Command grammar: usage declarations, argument binding and noun resolution.

mod binder;
mod resolver;
mod suggest;
mod usage;

pub use binder::{Arg, Arguments, bind};
pub use resolver::{Resolver, Scope};
pub use suggest::suggest_verb;
pub use usage::{Kind, ParamSpec, VerbDescriptor};
