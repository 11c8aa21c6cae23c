//! The compact usage grammar verbs are declared with.
//!
//! ```text
//! PUT *items@ IN vessel
//! ```
//!
//! The first word names the verb. Uppercase words are prepositions that
//! introduce the parameter after them; any other word is a positional
//! parameter. A parameter reads `[*][name][:kind][@][?]`: `*` takes a list,
//! `@` must already be held, `?` is optional and `:kind` constrains the
//! category of the object, or with `str`/`line` binds raw text.

use chumsky::prelude::*;

use crate::error::{FictionError, FictionResult};

/// What a parameter binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// One raw word, unresolved.
    Word,
    /// The rest of the line, unresolved.
    Line,
    /// An object of this category.
    Category(String),
}

impl Kind {
    fn from_name(name: &str) -> Self {
        match name {
            "str" => Self::Word,
            "line" => Self::Line,
            other => Self::Category(other.to_string()),
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Key the handler looks the value up by.
    pub name: String,
    /// What the parameter binds; `None` accepts any object.
    pub kind: Option<Kind>,
    /// Marked `*`: `all` may bind several objects.
    pub multi: bool,
    /// Marked `@`: only what the subject carries is in scope.
    pub held: bool,
    /// Marked `?`.
    pub optional: bool,
}

impl ParamSpec {
    /// The category constraint, if this parameter binds objects of one.
    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            Some(Kind::Category(category)) => Some(category),
            _ => None,
        }
    }
}

/// A verb's declared parameter shape, built once from its usage string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbDescriptor {
    /// Lowercase verb name.
    pub name: String,
    /// Positional parameters in declaration order.
    pub positional: Vec<ParamSpec>,
    /// Lowercase prepositions and the parameters they introduce.
    pub prepositional: Vec<(String, ParamSpec)>,
    usage: String,
}

enum Slot {
    Positional(ParamSpec),
    Prepositional(String, ParamSpec),
}

impl VerbDescriptor {
    /// Parse a usage string such as `"WRITE text:str WITH :pen@ ON paper:parchment"`.
    pub fn parse(usage: &str) -> FictionResult<Self> {
        usage_parser()
            .parse(usage.trim())
            .into_result()
            .map(|(name, slots)| {
                let mut descriptor = Self {
                    name: name.to_lowercase(),
                    positional: Vec::new(),
                    prepositional: Vec::new(),
                    usage: usage.trim().to_string(),
                };
                for slot in slots {
                    match slot {
                        Slot::Positional(spec) => descriptor.positional.push(spec),
                        Slot::Prepositional(word, spec) => {
                            descriptor.prepositional.push((word.to_lowercase(), spec));
                        }
                    }
                }
                descriptor
            })
            .map_err(|errors| FictionError::Usage {
                usage: usage.to_string(),
                message: errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            })
    }

    /// The parameter introduced by `word`, if it is one of this verb's prepositions.
    pub fn preposition(&self, word: &str) -> Option<&ParamSpec> {
        let word = word.to_lowercase();
        self.prepositional
            .iter()
            .find(|(preposition, _)| *preposition == word)
            .map(|(_, spec)| spec)
    }

    /// This verb's prepositions.
    pub fn prepositions(&self) -> impl Iterator<Item = &str> {
        self.prepositional.iter().map(|(word, _)| word.as_str())
    }

    /// The usage string this descriptor was built from.
    pub fn usage(&self) -> &str {
        &self.usage
    }
}

fn usage_parser<'a>() -> impl Parser<'a, &'a str, (String, Vec<Slot>), extra::Err<Rich<'a, char>>> {
    let upper = any()
        .filter(|c: &char| c.is_ascii_uppercase())
        .repeated()
        .at_least(1)
        .collect::<String>();
    let lower = any()
        .filter(|c: &char| c.is_ascii_lowercase() || *c == '_')
        .repeated()
        .at_least(1)
        .collect::<String>();
    let gap = just(' ').repeated().at_least(1);

    let param = just('*')
        .or_not()
        .then(lower.clone().or_not())
        .then(just(':').ignore_then(lower).or_not())
        .then(just('@').or_not())
        .then(just('?').or_not())
        .try_map(|((((star, name), kind), held), optional), span| {
            let name = name
                .or_else(|| kind.clone())
                .ok_or_else(|| Rich::custom(span, "a parameter needs a name or a kind"))?;
            Ok(ParamSpec {
                name,
                kind: kind.as_deref().map(Kind::from_name),
                multi: star.is_some(),
                held: held.is_some(),
                optional: optional.is_some(),
            })
        });

    let prepositional = upper
        .clone()
        .then_ignore(gap.clone())
        .then(param.clone())
        .map(|(word, spec)| Slot::Prepositional(word, spec));
    let positional = param.map(Slot::Positional);

    upper
        .then(
            gap.ignore_then(choice((prepositional, positional)))
                .repeated()
                .collect::<Vec<_>>(),
        )
        .then_ignore(end())
}
