//! A running game: the world, the verb table and the player.

use std::rc::Rc;

use tarpit_core::{Behavior, Blueprint, Line, ObjectId, World, WorldResult};
use tracing::{debug, error, info};

use crate::config::SessionConfig;
use crate::content;
use crate::error::{CommandError, CommandResult, FictionResult};
use crate::lexer::tokenize;
use crate::parser::bind;
use crate::verbs::{self, VerbTable};

/// One game of Tarpit Adventure.
pub struct Session {
    /// The world being explored.
    world: World,
    /// Shared so handlers can run while the table is borrowed.
    verbs: Rc<VerbTable>,
    /// The player's actor.
    player: ObjectId,
    config: SessionConfig,
}

impl Session {
    /// Build the standard world and put the player outside the small house.
    pub fn new(config: SessionConfig) -> FictionResult<Self> {
        let mut world = World::new(config.seed);
        let rooms = content::build(&mut world)?;
        world.say("Welcome to Tarpit Adventure!");
        world.say("");

        let player = world.spawn_in(
            Blueprint::actor("you")
                .behavior(Behavior::Player)
                .description("You are you. That's just who you are."),
            rooms.start,
        )?;
        content::place_parameters(&mut world, &rooms, &config.parameters)?;
        info!(seed = config.seed, parameters = config.parameters.len(), "session started");

        Self::from_parts(world, player, config)
    }

    /// Wrap an already-built world. `player` must be an actor in it.
    pub fn from_parts(world: World, player: ObjectId, config: SessionConfig) -> FictionResult<Self> {
        world.actor(player)?;
        Ok(Self {
            world,
            verbs: Rc::new(VerbTable::standard()?),
            player,
            config,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The world being played.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world being played, mutably.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The actor typed commands run as.
    pub fn player(&self) -> ObjectId {
        self.player
    }

    /// Verbs the parser dispatches to.
    pub fn verbs(&self) -> &VerbTable {
        &self.verbs
    }

    /// Settings the session started with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether the player is still playing.
    pub fn is_active(&self) -> bool {
        self.world
            .actor(self.player)
            .is_ok_and(|actor| actor.active)
    }

    /// Take everything reported since the last drain.
    pub fn drain(&mut self) -> Vec<Line> {
        self.world.drain()
    }

    // -----------------------------------------------------------------------
    // Running commands
    // -----------------------------------------------------------------------

    /// Run one line typed by the player.
    ///
    /// Never fails: refusals are narrated and internal errors are logged.
    pub fn submit(&mut self, line: &str) {
        if self.config.echo {
            self.world.say(format!("\n> {}", line.trim()));
        }
        if let Err(err) = self.run_line(self.player, line) {
            error!(%err, line, "command failed");
        }
    }

    /// Run lines until they run out or the player quits.
    pub fn execute<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            if !self.is_active() {
                break;
            }
            self.submit(line.as_ref());
        }
    }

    /// Interpret a line for `subject`, narrate any refusal, then let the
    /// subject's room react.
    ///
    /// Only internal errors are returned.
    pub fn run_line(&mut self, subject: ObjectId, line: &str) -> WorldResult<()> {
        if let Err(err) = self.interpret(subject, line) {
            if let Some(internal) = err.internal() {
                return Err(internal.clone());
            }
            debug!(%err, line, "command refused");
            self.world.say(err.to_string());
        }
        if let Some(room) = self.world.location(subject)? {
            self.world.tick(room)?;
        }
        Ok(())
    }

    /// Tokenize, bind and dispatch one line.
    pub fn interpret(&mut self, subject: ObjectId, line: &str) -> CommandResult<()> {
        let mut tokens = tokenize(line)?;
        let Some(word) = tokens.pop() else {
            return Ok(());
        };
        let word = word.to_lowercase();

        let table = Rc::clone(&self.verbs);
        if let Some(verb) = table.get(&word) {
            let args = bind(&self.world, subject, &verb.descriptor, &mut tokens)?;
            debug!(verb = %word, ?args, "dispatching");
            return (verb.handler)(self, subject, &args);
        }
        if self.world.vocabulary().is_direction(&word) {
            return verbs::travel(&mut self.world, subject, &word);
        }
        Err(CommandError::UnknownCommand {
            suggestion: table.suggest(&word).map(String::from),
            word,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarpit_core::{Capacity, Channel, Room};

    struct Fixture {
        session: Session,
        room: ObjectId,
    }

    fn fixture() -> Fixture {
        fixture_with(SessionConfig::new())
    }

    fn fixture_with(config: SessionConfig) -> Fixture {
        let mut world = World::new(11);
        let room = world
            .add_room(
                Room::new("Attic", "Dusty.").with_exit("down", "Cellar"),
                Behavior::Inert,
            )
            .unwrap();
        world
            .add_room(Room::new("Cellar", "Damp.").with_exit("up", "Attic"), Behavior::Inert)
            .unwrap();
        let you = world
            .spawn_in(Blueprint::actor("you").behavior(Behavior::Player), room)
            .unwrap();
        world.drain();
        Fixture {
            session: Session::from_parts(world, you, config).unwrap(),
            room,
        }
    }

    fn feedback(session: &mut Session) -> Vec<String> {
        session
            .drain()
            .into_iter()
            .filter(|line| line.channel == Channel::Feedback)
            .map(|line| line.text)
            .collect()
    }

    #[test]
    fn ambiguous_take() {
        let mut f = fixture();
        let world = f.session.world_mut();
        world.spawn_in(Blueprint::item("key"), f.room).unwrap();
        let small = world.spawn_in(Blueprint::item("small key"), f.room).unwrap();

        f.session.submit("take key");
        assert_eq!(feedback(&mut f.session), vec!["Which key? There's more than one."]);

        f.session.submit("take the small key");
        assert_eq!(feedback(&mut f.session), vec!["Small key taken."]);
        let player = f.session.player();
        assert_eq!(f.session.world().location(small).unwrap(), Some(player));
        assert_eq!(f.session.world().contents(player).unwrap(), &[small]);
    }

    #[test]
    fn closed_destination() {
        let mut f = fixture();
        let player = f.session.player();
        let world = f.session.world_mut();
        let gem = world.spawn_in(Blueprint::item("gem"), player).unwrap();
        world
            .spawn_in(Blueprint::item("box").capacity(Capacity::Limited(2)).closed(), f.room)
            .unwrap();

        f.session.submit("put gem in box");
        assert_eq!(feedback(&mut f.session), vec!["The box is closed."]);
        assert_eq!(f.session.world().location(gem).unwrap(), Some(player));
    }

    #[test]
    fn hazard_cascade() {
        let mut f = fixture();
        let player = f.session.player();
        let world = f.session.world_mut();
        let pit = world
            .add_room(
                Room::new("Pit", "Sticky.").with_exit("up", "Attic"),
                Behavior::Hazard {
                    fate: "sinks into the tar!".into(),
                },
            )
            .unwrap();
        let rock = world.spawn_in(Blueprint::item("rock"), player).unwrap();
        world
            .attempt(tarpit_core::Move::new(player, pit).by_world())
            .unwrap();
        f.session.drain();

        f.session.submit("drop rock");
        let lines = feedback(&mut f.session);
        assert_eq!(lines, vec!["Rock dropped.", "The rock sinks into the tar!"]);
        assert_eq!(f.session.world().location(rock).unwrap(), None);
        assert!(f.session.world().contents(pit).unwrap().iter().all(|&id| id != rock));
        assert_eq!(f.session.world().location(player).unwrap(), Some(pit));
    }

    #[test]
    fn optional_parameter_defaults_to_absent() {
        let mut f = fixture();
        f.session.submit("look");
        let lines = feedback(&mut f.session);
        assert_eq!(lines[0], "ATTIC");

        let player = f.session.player();
        f.session
            .world_mut()
            .spawn_in(Blueprint::item("shovel"), player)
            .unwrap();
        f.session.submit("dig with shovel");
        assert_eq!(feedback(&mut f.session), vec!["Digging here is fruitless."]);

        f.session.submit("dig");
        assert_eq!(feedback(&mut f.session), vec!["Dig with what?"]);
        f.session.submit("take");
        assert_eq!(feedback(&mut f.session), vec!["Take what items?"]);
    }

    #[test]
    fn directions_work_without_go() {
        let mut f = fixture();
        f.session.submit("down");
        let lines = feedback(&mut f.session);
        assert_eq!(lines[0], "CELLAR");
        f.session.submit("go sideways");
        assert_eq!(feedback(&mut f.session), vec!["You can't go that way."]);
    }

    #[test]
    fn unknown_words() {
        let mut f = fixture();
        f.session.submit("tkae key");
        assert_eq!(
            feedback(&mut f.session),
            vec!["I did not understand that. Did you mean \"take\"?"]
        );
        f.session.submit("");
        assert!(feedback(&mut f.session).is_empty());
    }

    #[test]
    fn echo_and_quit() {
        let mut f = fixture_with(SessionConfig::new().with_echo(true));
        f.session.execute(["hello", "quit", "xyzzy"]);
        let lines = feedback(&mut f.session);
        assert_eq!(
            lines,
            vec!["", "> hello", "Uh...hello.", "", "> quit", "Goodbye!"]
        );
        assert!(!f.session.is_active());
    }

    #[test]
    fn write_and_read() {
        let mut f = fixture();
        let player = f.session.player();
        let world = f.session.world_mut();
        world.spawn_in(Blueprint::item("pen"), player).unwrap();
        let page = world.spawn_in(Blueprint::item("blank page"), f.room).unwrap();

        f.session.submit("write \"go down;look\" with pen on page");
        assert_eq!(feedback(&mut f.session), vec!["You write on the blank page."]);
        assert_eq!(
            f.session.world().item(page).unwrap().writing,
            vec!["go down", "look"]
        );
        f.session.submit("erase page");
        assert_eq!(
            feedback(&mut f.session),
            vec!["You erase everything written on the blank page."]
        );
        assert!(f.session.world().item(page).unwrap().writing.is_empty());
    }

    #[test]
    fn call_names_things() {
        let mut f = fixture();
        let bag = f
            .session
            .world_mut()
            .spawn_in(Blueprint::item("nut bag"), f.room)
            .unwrap();
        f.session.submit("call bag rex");
        assert_eq!(
            feedback(&mut f.session),
            vec!["We'll call the nut bag \"rex\" from now on."]
        );
        f.session.submit("take rex");
        assert_eq!(feedback(&mut f.session), vec!["Nut bag called \"rex\" taken."]);
        let player = f.session.player();
        assert_eq!(f.session.world().location(bag).unwrap(), Some(player));
    }

    #[test]
    fn standard_world_starts_outside_the_house() {
        let mut session = Session::new(SessionConfig::new().with_seed(1)).unwrap();
        let lines = feedback(&mut session);
        assert_eq!(lines[0], "Welcome to Tarpit Adventure!");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "OUTSIDE OF A SMALL HOUSE");
        assert!(session.is_active());
    }
}
