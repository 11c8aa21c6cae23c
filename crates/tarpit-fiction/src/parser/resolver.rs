//! Noun-phrase resolution against a scope of objects.

use tarpit_core::{ObjectId, Query, Selector, World, capitalize};

use crate::error::{CommandError, CommandResult};
use crate::lexer::Tokens;

/// Where a noun phrase is looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The subject's own inventory.
    Held,
    /// The subject's room, then open furniture and the inventory.
    Visible,
    /// The direct contents of one container.
    Within(ObjectId),
}

/// Turns noun phrases into object handles. Never mutates the world.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'w> {
    world: &'w World,
    subject: ObjectId,
    stop_words: &'w [String],
}

impl<'w> Resolver<'w> {
    /// A resolver acting on behalf of `subject`.
    pub fn new(world: &'w World, subject: ObjectId) -> Self {
        Self {
            world,
            subject,
            stop_words: &[],
        }
    }

    /// Words that end a phrase instead of starting a containment clause.
    ///
    /// The binder passes the verb's prepositions so `put key in box` leaves
    /// `in box` for the `IN` parameter.
    pub fn with_stop_words(mut self, stop_words: &'w [String]) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Consume one noun phrase from `tokens` and resolve it in `scope`.
    ///
    /// Returns exactly one handle. Several are returned only for an `all`
    /// phrase, and `all` is refused unless `multi` is set.
    pub fn resolve(
        &self,
        tokens: &mut Tokens,
        scope: Scope,
        multi: bool,
    ) -> CommandResult<Vec<ObjectId>> {
        if tokens.pop_if("self") {
            return Ok(vec![self.subject]);
        }
        if tokens.pop_if("here") {
            return match self.world.location(self.subject)? {
                Some(room) => Ok(vec![room]),
                None => Err(CommandError::NotHere),
            };
        }

        let query = self.phrase(tokens)?;
        if query.selector == Some(Selector::All) && !multi {
            return Err(CommandError::MultipleNotAllowed);
        }
        if query.is_empty() {
            let word = tokens.peek().unwrap_or_default();
            return Err(CommandError::NotUnderstood(capitalize(word)));
        }

        let scope = if tokens.peek_is("in") && !self.is_stop_word("in") {
            tokens.pop();
            let container = self.resolve_one(tokens, scope)?;
            if self.world.get(container)?.vessel.closure().is_closed() {
                return Err(CommandError::Closed(self.world.label(container)?));
            }
            Scope::Within(container)
        } else {
            scope
        };

        let found = self.search(scope, &query)?;
        match found.len() {
            0 => Err(CommandError::NotFound(query.to_string())),
            1 => Ok(found),
            _ if query.selector == Some(Selector::All) => Ok(found),
            _ => Err(CommandError::Ambiguous(query.to_string())),
        }
    }

    /// Resolve a phrase that must name exactly one object.
    pub fn resolve_one(&self, tokens: &mut Tokens, scope: Scope) -> CommandResult<ObjectId> {
        let found = self.resolve(tokens, scope, false)?;
        found
            .first()
            .copied()
            .ok_or_else(|| CommandError::NotFound(String::new()))
    }

    // -----------------------------------------------------------------------
    // Phrase parsing
    // -----------------------------------------------------------------------

    /// `[the] [selector] [adjective] [noun] [called name]`, or a bare name.
    fn phrase(&self, tokens: &mut Tokens) -> CommandResult<Query> {
        let vocabulary = self.world.vocabulary();
        let mut query = Query::new();

        tokens.pop_if("the");
        if let Some(selector) = tokens.peek().and_then(Selector::parse) {
            tokens.pop();
            query = query.selector(selector);
        }
        if let Some(word) = tokens.peek()
            && vocabulary.is_adjective(word)
            && !self.is_stop_word(word)
        {
            let adjective = word.to_string();
            tokens.pop();
            query = query.adjective(&adjective);
        }
        if let Some(word) = tokens.peek()
            && vocabulary.is_noun(word)
            && !self.is_stop_word(word)
        {
            let noun = word.to_string();
            tokens.pop();
            query = query.noun(&noun);
        }
        if tokens.pop_if("called") {
            let name = tokens.pop().ok_or(CommandError::CalledWhat)?;
            query = query.name(&name);
        }
        if !query.has_descriptors()
            && let Some(word) = tokens.peek()
            && vocabulary.is_name(word)
        {
            let name = word.to_string();
            tokens.pop();
            query = query.name(&name);
        }
        Ok(query)
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.iter().any(|stop| stop.eq_ignore_ascii_case(word))
    }

    fn search(&self, scope: Scope, query: &Query) -> CommandResult<Vec<ObjectId>> {
        let found = match scope {
            Scope::Held => self.world.find(self.subject, query)?,
            Scope::Visible => {
                if self.world.location(self.subject)?.is_none() {
                    return Err(CommandError::NotHere);
                }
                self.world.visible(self.subject, query)?
            }
            Scope::Within(container) => self.world.find(container, query)?,
        };
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use tarpit_core::{Behavior, Blueprint, Room};

    struct Fixture {
        world: World,
        you: ObjectId,
        room: ObjectId,
    }

    fn fixture() -> Fixture {
        let mut world = World::new(1);
        let room = world
            .add_room(Room::new("Den", "A den."), Behavior::Inert)
            .unwrap();
        let you = world
            .spawn_in(Blueprint::actor("you").behavior(Behavior::Player), room)
            .unwrap();
        Fixture { world, you, room }
    }

    fn resolve(f: &Fixture, line: &str, scope: Scope, multi: bool) -> CommandResult<Vec<ObjectId>> {
        let mut tokens = tokenize(line).unwrap();
        Resolver::new(&f.world, f.you).resolve(&mut tokens, scope, multi)
    }

    #[test]
    fn noun_and_adjective() {
        let mut f = fixture();
        let plain = f.world.spawn_in(Blueprint::item("key"), f.room).unwrap();
        let small = f.world.spawn_in(Blueprint::item("small key"), f.room).unwrap();

        assert_eq!(
            resolve(&f, "key", Scope::Visible, false),
            Err(CommandError::Ambiguous("key".into()))
        );
        assert_eq!(resolve(&f, "the small key", Scope::Visible, false), Ok(vec![small]));
        assert_eq!(
            resolve(&f, "key", Scope::Visible, true),
            Err(CommandError::Ambiguous("key".into()))
        );
        assert_eq!(resolve(&f, "all key", Scope::Visible, true), Ok(vec![plain, small]));
    }

    #[test]
    fn self_and_here() {
        let f = fixture();
        assert_eq!(resolve(&f, "self", Scope::Visible, false), Ok(vec![f.you]));
        assert_eq!(resolve(&f, "here", Scope::Visible, false), Ok(vec![f.room]));
    }

    #[test]
    fn here_without_a_room() {
        let mut f = fixture();
        let ghost = f.world.spawn(Blueprint::actor("ghost"));
        let mut tokens = tokenize("here").unwrap();
        let result = Resolver::new(&f.world, ghost).resolve(&mut tokens, Scope::Visible, false);
        assert_eq!(result, Err(CommandError::NotHere));
    }

    #[test]
    fn all_needs_a_multi_parameter() {
        let mut f = fixture();
        f.world.spawn_in(Blueprint::item("key"), f.room).unwrap();
        assert_eq!(
            resolve(&f, "all", Scope::Visible, false),
            Err(CommandError::MultipleNotAllowed)
        );
        assert_eq!(resolve(&f, "all", Scope::Visible, true).unwrap().len(), 1);
    }

    #[test]
    fn nothing_recognisable() {
        let f = fixture();
        assert_eq!(
            resolve(&f, "frobnitz", Scope::Visible, false),
            Err(CommandError::NotUnderstood("Frobnitz".into()))
        );
    }

    #[test]
    fn not_found_names_the_query() {
        let mut f = fixture();
        f.world.spawn_in(Blueprint::item("key"), f.you).unwrap();
        assert_eq!(
            resolve(&f, "key", Scope::Held, false).map(|v| v.len()),
            Ok(1)
        );
        f.world.spawn(Blueprint::item("lamp"));
        assert_eq!(
            resolve(&f, "lamp", Scope::Held, false),
            Err(CommandError::NotFound("lamp".into()))
        );
    }

    #[test]
    fn called_and_bare_names() {
        let mut f = fixture();
        let bag = f
            .world
            .spawn_in(Blueprint::item("nut bag").named("rex"), f.room)
            .unwrap();
        assert_eq!(resolve(&f, "bag called rex", Scope::Visible, false), Ok(vec![bag]));
        assert_eq!(resolve(&f, "rex", Scope::Visible, false), Ok(vec![bag]));
        assert_eq!(
            resolve(&f, "bag called", Scope::Visible, false),
            Err(CommandError::CalledWhat)
        );
    }

    #[test]
    fn containment_clause() {
        let mut f = fixture();
        let outside = f.world.spawn_in(Blueprint::item("key"), f.room).unwrap();
        let box_ = f
            .world
            .spawn_in(
                Blueprint::item("box").capacity(tarpit_core::Capacity::Limited(2)).open(),
                f.room,
            )
            .unwrap();
        let inside = f.world.spawn_in(Blueprint::item("key"), box_).unwrap();
        assert_eq!(resolve(&f, "key in box", Scope::Visible, false), Ok(vec![inside]));
        assert_ne!(inside, outside);

        f.world.close(box_).unwrap();
        assert_eq!(
            resolve(&f, "key in box", Scope::Visible, false),
            Err(CommandError::Closed("box".into()))
        );
    }

    #[test]
    fn stop_words_end_the_phrase() {
        let mut f = fixture();
        let key = f.world.spawn_in(Blueprint::item("key"), f.you).unwrap();
        f.world
            .spawn_in(Blueprint::item("box").capacity(tarpit_core::Capacity::Limited(2)), f.room)
            .unwrap();
        let stops = vec!["in".to_string()];
        let mut tokens = tokenize("key in box").unwrap();
        let found = Resolver::new(&f.world, f.you)
            .with_stop_words(&stops)
            .resolve(&mut tokens, Scope::Held, true)
            .unwrap();
        assert_eq!(found, vec![key]);
        assert_eq!(tokens.rest(), vec!["in", "box"]);
    }

    #[test]
    fn first_and_last_are_deterministic() {
        let mut f = fixture();
        let a = f.world.spawn_in(Blueprint::item("key"), f.room).unwrap();
        f.world.spawn_in(Blueprint::item("pen"), f.room).unwrap();
        let c = f.world.spawn_in(Blueprint::item("cup"), f.room).unwrap();
        for _ in 0..3 {
            assert_eq!(resolve(&f, "first", Scope::Visible, false), Ok(vec![a]));
            assert_eq!(resolve(&f, "last", Scope::Visible, false), Ok(vec![c]));
        }
    }
}
