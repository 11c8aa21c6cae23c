use std::fmt;

use crate::object::Item;

/// A blanket modifier that picks from non-scenery children instead of
/// matching descriptors alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Every candidate.
    All,
    /// The earliest candidate in insertion order.
    First,
    /// The latest candidate in insertion order.
    Last,
}

impl Selector {
    /// Parse `all`, `first` or `last` (case-insensitive).
    pub fn parse(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "first" => Some(Self::First),
            "last" => Some(Self::Last),
            _ => None,
        }
    }

    /// The keyword for this selector.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

/// A parsed noun phrase: `[selector] [adjective] [noun] [called name]`.
///
/// Unstated fields are wildcards. All stored words are lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// `all`, `first` or `last`.
    pub selector: Option<Selector>,
    /// Adjective the object must carry.
    pub adjective: Option<String>,
    /// Noun the object must carry.
    pub noun: Option<String>,
    /// The proper name after `called`.
    pub name: Option<String>,
}

impl Query {
    /// A query matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a query matching a single noun.
    pub fn by_noun(noun: &str) -> Self {
        Self {
            noun: Some(noun.to_lowercase()),
            ..Self::default()
        }
    }

    /// Set the selector.
    pub fn selector(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Require this adjective.
    pub fn adjective(mut self, adjective: &str) -> Self {
        self.adjective = Some(adjective.to_lowercase());
        self
    }

    /// Require this noun.
    pub fn noun(mut self, noun: &str) -> Self {
        self.noun = Some(noun.to_lowercase());
        self
    }

    /// Require this proper name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_lowercase());
        self
    }

    /// True when nothing was captured at all.
    pub fn is_empty(&self) -> bool {
        self.selector.is_none() && !self.has_descriptors()
    }

    /// True when an adjective, noun or name was captured.
    pub fn has_descriptors(&self) -> bool {
        self.adjective.is_some() || self.noun.is_some() || self.name.is_some()
    }

    /// Match an item's descriptor fields.
    ///
    /// Every stated field must equal the item's, except that a stated name
    /// equal to the item's proper name matches on its own.
    pub fn matches(&self, item: &Item) -> bool {
        let proper = item.proper_name.as_deref().map(str::to_lowercase);
        if self.name.is_some() && self.name == proper {
            return true;
        }
        if !self.has_descriptors() {
            return false;
        }
        let adjective_ok = self
            .adjective
            .as_ref()
            .is_none_or(|a| item.descriptor.adjective.as_ref() == Some(a));
        let noun_ok = self
            .noun
            .as_ref()
            .is_none_or(|n| item.descriptor.noun == *n);
        let name_ok = self.name.as_ref().is_none_or(|n| proper.as_ref() == Some(n));
        adjective_ok && noun_ok && name_ok
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = [
            self.selector.map(Selector::as_str),
            self.adjective.as_deref(),
            self.noun.as_deref(),
            self.name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        write!(f, "{}", words.join(" "))
    }
}
