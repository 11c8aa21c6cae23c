//! Synonyms substituted for their canonical word before grammar matching.

const ALIASES: &[(&str, &str)] = &[
    ("walk", "go"),
    ("get", "take"),
    ("grab", "take"),
    ("throw", "drop"),
    ("i", "inventory"),
    ("l", "look"),
    ("examine", "look"),
    ("read", "look"),
    ("n", "north"),
    ("s", "south"),
    ("e", "east"),
    ("w", "west"),
    ("ne", "northeast"),
    ("nw", "northwest"),
    ("se", "southeast"),
    ("sw", "southwest"),
    ("exit", "out"),
    ("enter", "in"),
    ("from", "in"),
    ("of", "in"),
    ("into", "in"),
    ("inside", "in"),
    ("onto", "in"),
    ("me", "self"),
    ("myself", "self"),
    ("yourself", "self"),
    ("rename", "call"),
    ("name", "call"),
    ("follow", "obey"),
    ("execute", "obey"),
    ("perform", "obey"),
    ("interpret", "obey"),
    ("wonder", "think"),
    ("muse", "think"),
    ("believe", "think"),
    ("?", "help"),
    ("commands", "help"),
];

/// The canonical form of `word`, or `word` itself if it has no alias.
pub fn canonical(word: &str) -> &str {
    let lower = word.to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, target)| *target)
        .unwrap_or(word)
}
