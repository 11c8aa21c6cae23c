//! Running writing as commands.
//!
//! An actor's scripts live on its call stack as [`Frame`]s. Only the
//! outermost `obey` drives the stack; a nested `obey` just pushes a frame,
//! which the running loop picks up before returning to the outer one.

use tarpit_core::{Frame, ObjectId, WorldResult};
use tracing::{debug, error};

use crate::session::Session;

impl Session {
    /// Have `actor` run `lines` one at a time, as if typed.
    pub fn obey(&mut self, actor: ObjectId, lines: Vec<String>) -> WorldResult<()> {
        let state = self.world_mut().actor_mut(actor)?;
        let idle = state.stack.is_empty();
        state.stack.push(Frame::new(lines));
        state.active = true;
        debug!(%actor, depth = state.depth(), "script pushed");
        if idle { self.drive(actor) } else { Ok(()) }
    }

    fn drive(&mut self, actor: ObjectId) -> WorldResult<()> {
        loop {
            let state = self.world_mut().actor_mut(actor)?;
            if !state.active {
                state.stack.clear();
                break;
            }
            let depth = state.depth();
            let Some(frame) = state.stack.last_mut() else {
                break;
            };
            let Some(line) = frame.advance() else {
                state.stack.pop();
                continue;
            };

            self.world_mut()
                .say(format!("{} {}", ">".repeat(depth + 1), line));
            if let Err(err) = self.run_line(actor, &line) {
                error!(%err, %actor, %line, "script aborted");
                self.world_mut().actor_mut(actor)?.stack.clear();
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tarpit_core::{Behavior, Blueprint, Capacity, Channel, Closure, Room, World};

    use crate::config::SessionConfig;
    use crate::session::Session;

    fn session() -> (Session, tarpit_core::ObjectId) {
        let mut world = World::new(5);
        let room = world
            .add_room(Room::new("Study", "A study."), Behavior::Inert)
            .unwrap();
        let you = world
            .spawn_in(Blueprint::actor("you").behavior(Behavior::Player), room)
            .unwrap();
        world.drain();
        (Session::from_parts(world, you, SessionConfig::new()).unwrap(), room)
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
    fn nested_script_runs_one_level_deeper() {
        let (mut session, room) = session();
        let world = session.world_mut();
        let key = world.spawn_in(Blueprint::item("key"), room).unwrap();
        let chest = world
            .spawn_in(Blueprint::item("box").capacity(Capacity::Limited(3)).closed(), room)
            .unwrap();
        world
            .spawn_in(Blueprint::item("scroll").writing("take key;open box;put key in box"), room)
            .unwrap();

        session.submit("obey scroll");
        let lines = feedback(&mut session);
        let echoed: Vec<&String> = lines.iter().filter(|l| l.starts_with('>')).collect();
        assert_eq!(echoed, vec![">> take key", ">> open box", ">> put key in box"]);

        let world = session.world();
        assert_eq!(world.location(key).unwrap(), Some(chest));
        assert_eq!(world.get(chest).unwrap().vessel.closure(), Closure::Open);
        assert!(world.actor(session.player()).unwrap().stack.is_empty());
    }

    #[test]
    fn nested_obey_goes_deeper() {
        let (mut session, room) = session();
        let world = session.world_mut();
        world
            .spawn_in(Blueprint::item("note").writing("xyzzy"), room)
            .unwrap();
        world
            .spawn_in(Blueprint::item("scroll").writing("obey note;hello"), room)
            .unwrap();

        session.submit("obey scroll");
        let lines = feedback(&mut session);
        let echoed: Vec<&String> = lines.iter().filter(|l| l.starts_with('>')).collect();
        assert_eq!(echoed, vec![">> obey note", ">>> xyzzy", ">> hello"]);
        assert!(lines.contains(&"Nothing happens.".to_string()));
    }

    #[test]
    fn quit_stops_the_script() {
        let (mut session, room) = session();
        session
            .world_mut()
            .spawn_in(Blueprint::item("scroll").writing("quit;hello"), room)
            .unwrap();

        session.submit("obey scroll");
        let lines = feedback(&mut session);
        assert!(lines.contains(&"Goodbye!".to_string()));
        assert!(!lines.contains(&"Uh...hello.".to_string()));
        assert!(!session.is_active());
    }

    #[test]
    fn robot_obeys_what_it_is_told() {
        let (mut session, room) = session();
        let world = session.world_mut();
        let robot = world
            .spawn_in(
                Blueprint::actor("robot").named("Floyd").behavior(Behavior::Robot),
                room,
            )
            .unwrap();
        let pen = world.spawn_in(Blueprint::item("pen"), room).unwrap();

        session.submit("tell Floyd \"take pen; xyzzy\"");
        let lines = feedback(&mut session);
        assert!(lines.contains(&">> take pen".to_string()));
        assert!(lines.contains(&"Nothing happens.".to_string()));
        assert_eq!(session.world().location(pen).unwrap(), Some(robot));
    }

    #[test]
    fn failed_lines_do_not_stop_the_script() {
        let (mut session, room) = session();
        session
            .world_mut()
            .spawn_in(Blueprint::item("scroll").writing("take unicorn;hello"), room)
            .unwrap();

        session.submit("obey scroll");
        let lines = feedback(&mut session);
        assert!(lines.contains(&"I didn't understand. Unicorn?".to_string()));
        assert!(lines.contains(&"Uh...hello.".to_string()));
    }
}
