//! Binding a command's words to a verb's declared parameters.

use std::collections::HashMap;

use tarpit_core::{ObjectId, World};

use super::resolver::{Resolver, Scope};
use super::usage::{Kind, ParamSpec, VerbDescriptor};
use crate::error::{CommandError, CommandResult};
use crate::lexer::Tokens;

/// One bound parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Raw text from a `:str` or `:line` parameter.
    Text(String),
    /// A single resolved object.
    One(ObjectId),
    /// Every object a `*` parameter resolved to.
    Many(Vec<ObjectId>),
    /// An optional parameter nobody filled.
    Absent,
}

/// Named arguments handed to a verb handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: HashMap<String, Arg>,
}

impl Arguments {
    /// The raw value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.values.get(name)
    }

    fn bound(&self, name: &str) -> CommandResult<&Arg> {
        self.get(name)
            .ok_or_else(|| CommandError::Unbound(name.to_string()))
    }

    /// A required single object.
    pub fn one(&self, name: &str) -> CommandResult<ObjectId> {
        self.optional_one(name)?
            .ok_or_else(|| CommandError::Unbound(name.to_string()))
    }

    /// An optional single object.
    pub fn optional_one(&self, name: &str) -> CommandResult<Option<ObjectId>> {
        match self.bound(name)? {
            Arg::One(id) => Ok(Some(*id)),
            Arg::Many(ids) => Ok(ids.first().copied()),
            Arg::Absent => Ok(None),
            Arg::Text(_) => Err(CommandError::Unbound(name.to_string())),
        }
    }

    /// A required list of objects. A single object counts as a list of one.
    pub fn many(&self, name: &str) -> CommandResult<Vec<ObjectId>> {
        match self.bound(name)? {
            Arg::One(id) => Ok(vec![*id]),
            Arg::Many(ids) => Ok(ids.clone()),
            Arg::Absent | Arg::Text(_) => Err(CommandError::Unbound(name.to_string())),
        }
    }

    /// Required text.
    pub fn text(&self, name: &str) -> CommandResult<&str> {
        self.optional_text(name)?
            .ok_or_else(|| CommandError::Unbound(name.to_string()))
    }

    /// Optional text.
    pub fn optional_text(&self, name: &str) -> CommandResult<Option<&str>> {
        match self.bound(name)? {
            Arg::Text(text) => Ok(Some(text)),
            Arg::Absent => Ok(None),
            Arg::One(_) | Arg::Many(_) => Err(CommandError::Unbound(name.to_string())),
        }
    }

    fn insert(&mut self, name: &str, arg: Arg) {
        self.values.insert(name.to_string(), arg);
    }

    fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// Bind the words after the verb to `descriptor`'s parameters.
///
/// A word naming one of the verb's prepositions always introduces that
/// parameter. Any other word starts the next unfilled positional parameter.
pub fn bind(
    world: &World,
    subject: ObjectId,
    descriptor: &VerbDescriptor,
    tokens: &mut Tokens,
) -> CommandResult<Arguments> {
    let stop_words: Vec<String> = descriptor.prepositions().map(String::from).collect();
    let resolver = Resolver::new(world, subject).with_stop_words(&stop_words);
    let mut args = Arguments::default();
    let mut positional = descriptor.positional.iter();

    while let Some(word) = tokens.peek() {
        let spec = if let Some(spec) = descriptor.preposition(word) {
            tokens.pop();
            if tokens.is_empty() {
                break;
            }
            spec
        } else if let Some(spec) = positional.next() {
            spec
        } else {
            return Err(CommandError::LostMe {
                token: word.to_string(),
            });
        };
        let arg = bind_one(world, &resolver, spec, tokens)?;
        args.insert(&spec.name, arg);
    }

    for spec in &descriptor.positional {
        if args.contains(&spec.name) {
            continue;
        }
        if !spec.optional {
            return Err(CommandError::MissingArgument {
                verb: descriptor.name.clone(),
                name: spec.name.clone(),
            });
        }
        args.insert(&spec.name, Arg::Absent);
    }
    for (preposition, spec) in &descriptor.prepositional {
        if args.contains(&spec.name) {
            continue;
        }
        if !spec.optional {
            return Err(CommandError::MissingPreposition {
                verb: descriptor.name.clone(),
                preposition: preposition.clone(),
            });
        }
        args.insert(&spec.name, Arg::Absent);
    }

    Ok(args)
}

fn bind_one(
    world: &World,
    resolver: &Resolver<'_>,
    spec: &ParamSpec,
    tokens: &mut Tokens,
) -> CommandResult<Arg> {
    match &spec.kind {
        Some(Kind::Word) => Ok(tokens.pop().map(Arg::Text).unwrap_or(Arg::Absent)),
        Some(Kind::Line) => Ok(Arg::Text(tokens.rest().join(" "))),
        _ => {
            let scope = if spec.held { Scope::Held } else { Scope::Visible };
            let found = resolver.resolve(tokens, scope, spec.multi)?;
            if let Some(category) = spec.category() {
                for &id in &found {
                    let object = world.get(id)?;
                    if object.category() != Some(category) {
                        return Err(CommandError::TypeMismatch(object.label()));
                    }
                }
            }
            if spec.multi {
                return Ok(Arg::Many(found));
            }
            Ok(found.first().copied().map(Arg::One).unwrap_or(Arg::Absent))
        }
    }
}
