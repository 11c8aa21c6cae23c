//! The map of Tarpit Adventure: rooms, furniture and the things lying about.

use std::f64::consts::{PI, SQRT_2};

use rand::seq::IndexedRandom;
use tarpit_core::{Behavior, Blueprint, Capacity, ObjectId, Room, World};
use tracing::debug;

use crate::error::FictionResult;

/// Adjectives for the bags that hold command-line parameters.
const ORDINARY: &[&str] = &[
    "common",
    "regular",
    "ordinary",
    "everyday",
    "humdrum",
    "normal",
    "quotidian",
    "run-of-the-mill",
    "standard",
    "typical",
    "conventional",
    "orthodox",
    "garden-variety",
    "undistinguished",
    "average",
    "unexceptional",
    "bland",
    "mundane",
    "stereotypical",
    "boilerplate",
    "characterless",
    "prosaic",
    "unnoteworthy",
];

const START: &str = "Outside of a small house";

const DEVIL_PITCH: &str = "\"Greetings, friend. Fortune smiles on you today. I can tell life \
has treated you poorly: never the respect you deserve, never the rewards either. I can mend \
that, a little. For the trifling price of a soul I will double everything you carry. One \
small, worn-out soul, and you are twice the person you were. A bargain, surely?\"";

/// Handles that parameter placement needs after the map is built.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Landmarks {
    pub start: ObjectId,
    pub mailbox: ObjectId,
    pub cauldron: ObjectId,
}

/// Build every room and everything in them.
pub(crate) fn build(world: &mut World) -> FictionResult<Landmarks> {
    let start = world.add_room(
        Room::new(
            START,
            "A warm, sunny day. Bees drift between the flowers and the air smells of \
             peonies and adventure.\n\nA poor road runs east-west past a small white house. \
             A mailbox is planted in front of it.",
        )
        .with_exit("east", "Dirt road")
        .with_exit("west", "Crossroads")
        .with_exit("cheat", "Cheaterville")
        .with_exit("in", "Inside the small house"),
        Behavior::Inert,
    )?;
    let mailbox = world.spawn_in(
        Blueprint::furniture("mailbox")
            .capacity(Capacity::Limited(3))
            .closed()
            .description(
                "An ordinary mailbox with a flag on the side. The number \"200\" is \
                 stuck on in vinyl letters.",
            ),
        start,
    )?;

    let cheaterville = world.add_room(
        Room::new("Cheaterville", "Nothing to see here. Move along.").with_exit("uncheat", START),
        Behavior::Inert,
    )?;
    world.spawn_in(
        Blueprint::item("nut bag")
            .capacity(Capacity::Unbounded)
            .named("rex"),
        cheaterville,
    )?;

    build_house(world)?;
    build_roads(world)?;
    let cauldron = build_caves(world)?;
    build_offices(world)?;

    debug!(objects = world.ids().count(), "world built");
    Ok(Landmarks {
        start,
        mailbox,
        cauldron,
    })
}

fn build_house(world: &mut World) -> FictionResult<()> {
    let inside = world.add_room(
        Room::new(
            "Inside the small house",
            "Oppressively cozy country decor: needlepoint on every wall and pillow, \
             overstuffed furniture. Against one wall stands a case built for little \
             league trophies and the like.",
        )
        .with_exit("out", START),
        Behavior::Inert,
    )?;
    world.spawn_in(
        Blueprint::furniture("trophy case")
            .capacity(Capacity::Limited(3))
            .closed()
            .locked()
            .behavior(Behavior::Showcase)
            .description("This handsome case has room for a few treasured items."),
        inside,
    )?;
    Ok(())
}

fn build_roads(world: &mut World) -> FictionResult<()> {
    let road = world.add_room(
        Room::new(
            "Dirt road",
            "A dirt road running east-west. The road is dirt, beside the road is dirt, \
             and beyond that is more dirt. Piles of it, everywhere.",
        )
        .with_exit("east", "Fork in the road")
        .with_exit("west", START)
        .with_resource("dig", "dirt"),
        Behavior::Inert,
    )?;
    world.spawn_in(Blueprint::item("shovel"), road)?;

    world.add_room(
        Room::new(
            "Tar pit",
            "The road ends at a pit of tar that bubbles and reeks. Out of reach in the \
             middle, a tar-coated T-rex bobs half under.",
        )
        .with_exit("east", "Crossroads"),
        Behavior::Hazard {
            fate: "sinks into the tar!".to_string(),
        },
    )?;

    let crossroads = world.add_room(
        Room::new(
            "Crossroads",
            "A crossroads, with roads leading off in all the cardinal directions.",
        )
        .with_exit("north", "Dunno...")
        .with_exit("south", "Not sure")
        .with_exit("east", START)
        .with_exit("west", "Tar pit"),
        Behavior::Inert,
    )?;
    world.spawn_in(
        Blueprint::actor("devil")
            .named("Satan")
            .behavior(Behavior::Devil {
                pitch: DEVIL_PITCH.to_string(),
                price: "soul".to_string(),
            })
            .description(
                "Beelzebub himself. He has nothing much to do today, so he is hanging \
                 around here thinking about stuff.",
            ),
        crossroads,
    )?;
    world.spawn_in(Blueprint::item("soul"), crossroads)?;

    let dunno = world.add_room(
        Room::new(
            "Dunno...",
            "Hard to say what this is. It defies description.\nThe road goes on \
             north-south. Beyond that, nothing to report. (Sorry.)",
        )
        .with_exit("north", "Beyond the road")
        .with_exit("south", "Crossroads"),
        Behavior::Inert,
    )?;
    world.spawn_in(
        Blueprint::item("something").description("What on earth is this thing?"),
        dunno,
    )?;

    world.add_room(
        Room::new(
            "Fork in the road",
            "The road from the west forks. The northeast branch climbs toward rocky \
             hills; the southeast branch narrows between tall grass.",
        )
        .with_exit("west", "Dirt road")
        .with_exit("northeast", "Mouth of a cave")
        .with_exit("southeast", "Grassy knoll"),
        Behavior::Inert,
    )?;

    let knoll = world.add_room(
        Room::new(
            "Grassy knoll",
            "A path from the northwest climbs onto a grassy knoll, home to a greasy \
             gnoll named Bograt. Bograt is, regrettably, a jerk.",
        )
        .with_exit("northwest", "Fork in the road"),
        Behavior::Thief {
            thief: "Bograt".to_string(),
            hideaway: "Deep grass".to_string(),
        },
    )?;
    world.spawn_in(
        Blueprint::actor("gnoll")
            .named("Bograt")
            .description("Bograt, the greasy gnoll of the grassy knoll. A jerk, plainly."),
        knoll,
    )?;

    world.add_room(
        Room::new(
            "Deep grass",
            "The grass is deep here. A haystack with no needle in it.",
        )
        .with_exit("out", "Grassy knoll"),
        Behavior::Inert,
    )?;
    Ok(())
}

fn build_caves(world: &mut World) -> FictionResult<ObjectId> {
    world.add_room(
        Room::new(
            "Mouth of a cave",
            "A cave yawns open. Its breath smells of burnt garlic bread, and rows of \
             stalactites hang over the entrance like teeth.",
        )
        .with_exit("southwest", "Fork in the road")
        .with_exit("north", "Cave foyer")
        .with_exit("in", "Cave foyer"),
        Behavior::Inert,
    )?;

    let foyer = world.add_room(
        Room::new(
            "Cave foyer",
            "Just inside, the cave opens into a vaulted entryway. The remains of a very \
             unlucky spelunker slump against one wall. A low passage winds north.",
        )
        .with_exit("out", "Mouth of a cave")
        .with_exit("south", "Mouth of a cave")
        .with_exit("north", "Narrow passage"),
        Behavior::Inert,
    )?;
    let pack = world.spawn_in(
        Blueprint::item("backpack").capacity(Capacity::Limited(6)),
        foyer,
    )?;
    world.spawn_in(Blueprint::item("pen"), pack)?;
    world.spawn_in(
        Blueprint::item("journal page").writing(
            "August 13;;Out of food. All I have left is gum.;;The way out must be close \
             but I cannot go on looking.;;...",
        ),
        pack,
    )?;

    world.add_room(
        Room::new(
            "Narrow passage",
            "The passage drops so low you crawl on your belly in the dark. Cold stone \
             presses on both sides. Is that a glow up ahead?",
        )
        .with_exit("south", "Cave foyer")
        .with_exit("north", "Chamber"),
        Behavior::Inert,
    )?;

    let chamber = world.add_room(
        Room::new(
            "Chamber",
            "Cracks in the ceiling let daylight into a roomy chamber. Passages lead off \
             in all four directions.",
        )
        .with_exit("south", "Narrow passage")
        .with_exit("north", "North chamber")
        .with_exit("east", "East chamber")
        .with_exit("west", "West chamber"),
        Behavior::Inert,
    )?;
    world.spawn_in(
        Blueprint::actor("robot")
            .named("Floyd")
            .behavior(Behavior::Robot)
            .description("An eager robot. Far too eager, if anything."),
        chamber,
    )?;

    let east = world.add_room(
        Room::new(
            "East chamber",
            "One shaft of daylight falls from a hole high in the ceiling onto a large \
             cauldron. Openings lead west and southeast.",
        )
        .with_exit("west", "Chamber")
        .with_exit("southeast", "Hall of justice"),
        Behavior::Inert,
    )?;
    let cauldron = world.spawn_in(
        Blueprint::furniture("blackened cauldron").description("Sooty black all over."),
        east,
    )?;

    let hall = world.add_room(
        Room::new(
            "Hall of justice",
            "Carved from white marble, unlike the caves around it. On a dais stands a \
             blindfolded statue holding out a golden balance scale.\nThe only exit is \
             northwest.",
        )
        .with_exit("northwest", "East chamber"),
        Behavior::Inert,
    )?;
    let balance = world.spawn_in(
        Blueprint::furniture("balance scale")
            .capacity(Capacity::Limited(2))
            .behavior(Behavior::Balance)
            .description(
                "A working golden scale. It swivels so the heavier of its two pans \
                 faces front.",
            ),
        hall,
    )?;
    world.get_mut(hall)?.behavior = Behavior::Tribunal { balance };

    Ok(cauldron)
}

fn build_offices(world: &mut World) -> FictionResult<()> {
    world.add_room(
        Room::new(
            "North chamber",
            "Rough stone from the south gives way to a sleek glass and steel office \
             front. Over the door:\n  Calloway, Papermaster, Turban and Hoyt LLC\n  \
             Attorneys at Law",
        )
        .with_exit("south", "Chamber")
        .with_exit("north", "Reception"),
        Behavior::Inert,
    )?;

    let reception = world.add_room(
        Room::new(
            "Reception",
            "An all-glass reception desk with nobody behind it. Beside it, a document \
             shredder.\nThe exit is south, a small room lies east and a hallway runs north.",
        )
        .with_exit("south", "North chamber")
        .with_exit("north", "Hallway")
        .with_exit("east", "Supply closet"),
        Behavior::Inert,
    )?;
    world.spawn_in(
        Blueprint::furniture("shredder")
            .behavior(Behavior::Shredder)
            .description("Model 8678b Vellum Shredder. \"For When You've Got Something to Hide\"."),
        reception,
    )?;

    world.add_room(
        Room::new(
            "Hallway",
            "A north-south hallway lined with motivational posters and amateur \
             watercolors. Doors on either side.",
        )
        .with_exit("south", "Reception")
        .with_exit("north", "More hallway")
        .with_exit("east", "Bathroom")
        .with_exit("west", "Executive office"),
        Behavior::Inert,
    )?;

    let office = world.add_room(
        Room::new(
            "Executive office",
            "Mahogany panelling and a picture window with a fine view of solid rock. An \
             impressive desk and a roomy filing cabinet.",
        )
        .with_exit("east", "Hallway"),
        Behavior::Inert,
    )?;
    world.spawn_in(
        Blueprint::furniture("oak desk").description("An imposing oak desk."),
        office,
    )?;
    let cabinet = world.spawn_in(
        Blueprint::furniture("filing cabinet")
            .capacity(Capacity::Limited(40))
            .closed()
            .description("A tall filing cabinet in dark wood."),
        office,
    )?;
    let folder = world.spawn_in(
        Blueprint::item("file folder")
            .capacity(Capacity::Limited(24))
            .writing("Turban, Edward G."),
        cabinet,
    )?;
    world.spawn_in(
        Blueprint::item("personnel parchment").writing(
            "PERSONNEL REPORT;Edward G. Turban;;  ...antisocial tendencies...chronically \
             late...;;- Harold Papermaster",
        ),
        folder,
    )?;

    let bathroom = world.add_room(
        Room::new(
            "Bathroom",
            "The usual fixtures. A large drain sits in the floor.",
        )
        .with_exit("west", "Hallway")
        .with_exit("out", "Hallway"),
        Behavior::Inert,
    )?;
    world.spawn_in(
        Blueprint::furniture("drain pipe")
            .behavior(Behavior::Drain)
            .description("A floor drain stamped \"STANDARD PIPE CO.\"."),
        bathroom,
    )?;

    let closet = world.add_room(
        Room::new(
            "Supply closet",
            "The shelves were picked bare long ago. On one of them sits a postal scale.",
        )
        .with_exit("west", "Reception"),
        Behavior::Inert,
    )?;
    let scale = world.spawn_in(
        Blueprint::furniture("postal scale")
            .behavior(Behavior::PostalScale)
            .description("A postal scale with a digital readout and a red button."),
        closet,
    )?;
    world.spawn_in(
        Blueprint::furniture("red button")
            .behavior(Behavior::LabelPrinter { scale })
            .description("A tempting red button on the postal scale."),
        closet,
    )?;

    world.add_room(
        Room::new(
            "More hallway",
            "The hallway ends at a door to the north. There are doors east and west too.",
        )
        .with_exit("south", "Hallway")
        .with_exit("west", "Kitchen")
        .with_exit("east", "Cubicles"),
        Behavior::Inert,
    )?;

    world.add_room(
        Room::new("Cubicles", "You are in a maze of cubicles, all alike.")
            .with_exit("north", "Cubicles")
            .with_exit("south", "Cubicles")
            .with_exit("east", "Cubicles")
            .with_exit("west", "Cubicles"),
        Behavior::Inert,
    )?;

    let kitchen = world.add_room(
        Room::new(
            "Kitchen",
            "A small kitchen and break room: sink, cupboard, toaster oven, and a kitten \
             poster that says 'GET BACK TO WORK'.",
        )
        .with_exit("east", "More hallway"),
        Behavior::Inert,
    )?;
    let cupboard = world.spawn_in(
        Blueprint::furniture("cupboard")
            .closed()
            .description("Just a cupboard."),
        kitchen,
    )?;
    world.spawn_in(
        Blueprint::item("pie tin")
            .capacity(Capacity::Limited(3))
            .behavior(Behavior::Pan { limit: PI })
            .description("A round pie tin."),
        cupboard,
    )?;
    world.spawn_in(
        Blueprint::item("cake pan")
            .capacity(Capacity::Limited(1))
            .behavior(Behavior::Pan { limit: SQRT_2 })
            .description("A square cake pan."),
        cupboard,
    )?;
    Ok(())
}

/// Leave the command-line parameters where a curious player will find them.
///
/// A letter in the mailbox lists them all. Each also gets a bag in the
/// cauldron, holding that many kilograms of dirt if it is a number, or a
/// pebble otherwise.
pub(crate) fn place_parameters(
    world: &mut World,
    landmarks: &Landmarks,
    parameters: &[String],
) -> FictionResult<()> {
    if parameters.is_empty() {
        return Ok(());
    }
    world.spawn_in(
        Blueprint::item("letter").lines(parameters.iter().cloned()),
        landmarks.mailbox,
    )?;
    for parameter in parameters {
        let adjective = ORDINARY.choose(world.rng_mut()).copied().unwrap_or("plain");
        let bag = world.spawn_in(
            Blueprint::item(&format!("{adjective} bag")).capacity(Capacity::Unbounded),
            landmarks.cauldron,
        )?;
        match parameter.trim().parse::<f64>() {
            Ok(kg) => world.spawn_in(Blueprint::item("dirt").quantity(kg), bag)?,
            Err(_) => world.spawn_in(Blueprint::item("pebble"), bag)?,
        };
    }
    Ok(())
}
