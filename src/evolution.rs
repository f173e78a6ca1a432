//! Evolution paths and name normalization.
//!
//! A path row reads: a child with personality `child` whose dominant memory
//! is `child_memory` becomes the young archetype `young`; that archetype
//! with dominant memory `young_memory` becomes the adult `adult`.

use crate::personality::{BasePersonality, Personality};
use crate::stage::LifeStage;

use BasePersonality::{Anxious, Edgy, Geek, Intelectual, Neutral, Sassy};

/// Name given to a pet that was neglected during a stage. Sticky.
pub const NEGLECTED: &str = "Descuidado";

/// Name given when there is no memory to evolve from.
pub const NO_MEMORY: &str = "Patata";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvolutionPath {
    pub child: BasePersonality,
    pub child_memory: BasePersonality,
    pub young: &'static str,
    pub young_memory: BasePersonality,
    pub adult: &'static str,
}

const fn path(
    child: BasePersonality,
    child_memory: BasePersonality,
    young: &'static str,
    young_memory: BasePersonality,
    adult: &'static str,
) -> EvolutionPath {
    EvolutionPath {
        child,
        child_memory,
        young,
        young_memory,
        adult,
    }
}

pub const PATHS: &[EvolutionPath] = &[
    path(Intelectual, Edgy, "Ingeniero", Sassy, "Glados"),
    path(Intelectual, Edgy, "Ingeniero", Anxious, "Tails"),
    path(Intelectual, Edgy, "Ingeniero", Geek, "Hideo Kojima"),
    path(Intelectual, Sassy, "El personaje prodigioso", Edgy, "Shadow"),
    path(Intelectual, Sassy, "El personaje prodigioso", Anxious, "Elsa"),
    path(Intelectual, Sassy, "El personaje prodigioso", Geek, "Neo"),
    path(Intelectual, Geek, "Jugador de rol", Edgy, "H.P. Lovecraft"),
    path(Intelectual, Geek, "Jugador de rol", Anxious, "Frodo Bolson"),
    path(Intelectual, Geek, "Jugador de rol", Sassy, "The Dungeon Master"),
    path(Intelectual, Anxious, "Nerd", Edgy, "Dr. Eggman"),
    path(Intelectual, Anxious, "Nerd", Sassy, "Sheldon Cooper"),
    path(Intelectual, Anxious, "Nerd", Geek, "Hackerman"),
    path(Intelectual, Intelectual, "Cerebro Galaxia", Anxious, "R2-D2"),
    path(Intelectual, Intelectual, "Cerebro Galaxia", Geek, "Dr. Who"),
    path(Intelectual, Intelectual, "Cerebro Galaxia", Sassy, "Tyrion Lannister"),
    path(Intelectual, Intelectual, "Cerebro Galaxia", Edgy, "Dr. House"),
    path(Geek, Edgy, "Otaku Cringe", Intelectual, "Kira"),
    path(Geek, Edgy, "Otaku Cringe", Anxious, "Shinji"),
    path(Geek, Edgy, "Otaku Cringe", Sassy, "Sasuke"),
    path(Geek, Sassy, "Cosplayer", Edgy, "Ghostface"),
    path(Geek, Sassy, "Cosplayer", Anxious, "James"),
    path(Geek, Sassy, "Cosplayer", Intelectual, "Spiderman"),
    path(Geek, Intelectual, "Jugador de rol", Edgy, "H.P. Lovecraft"),
    path(Geek, Intelectual, "Jugador de rol", Anxious, "Frodo Bolson"),
    path(Geek, Intelectual, "Jugador de rol", Sassy, "The Dungeon Master"),
    path(Geek, Anxious, "Otaku", Edgy, "Muzan"),
    path(Geek, Anxious, "Otaku", Sassy, "Asuka"),
    path(Geek, Anxious, "Otaku", Intelectual, "Bulma"),
    path(Geek, Geek, "Fanatico", Anxious, "Gollum"),
    path(Geek, Geek, "Fanatico", Intelectual, "Viktor"),
    path(Geek, Geek, "Fanatico", Sassy, "Edna Moda"),
    path(Geek, Geek, "Fanatico", Edgy, "Conspiranoico"),
    path(Anxious, Edgy, "Emo", Intelectual, "L"),
    path(Anxious, Edgy, "Emo", Sassy, "Mewtwo"),
    path(Anxious, Edgy, "Emo", Geek, "Millenials 2008"),
    path(Anxious, Sassy, "El villano que en realidad es buen tipo", Edgy, "Godzilla"),
    path(Anxious, Sassy, "El villano que en realidad es buen tipo", Geek, "Dwight"),
    path(Anxious, Sassy, "El villano que en realidad es buen tipo", Intelectual, "Doofenshmirtz"),
    path(Anxious, Intelectual, "Nerd", Edgy, "Dr. Eggman"),
    path(Anxious, Intelectual, "Nerd", Sassy, "Sheldon Cooper"),
    path(Anxious, Intelectual, "Nerd", Geek, "Hackerman"),
    path(Anxious, Geek, "Otaku", Edgy, "Alucard"),
    path(Anxious, Geek, "Otaku", Sassy, "Asuka"),
    path(Anxious, Geek, "Otaku", Intelectual, "Bulma"),
    path(Anxious, Anxious, "Overthinker", Geek, "Morty"),
    path(Anxious, Anxious, "Overthinker", Intelectual, "Van Gogh"),
    path(Anxious, Anxious, "Overthinker", Sassy, "Marceline"),
    path(Anxious, Anxious, "Overthinker", Edgy, "Bella Swan"),
    path(Edgy, Anxious, "Absoluto Edgy", Geek, "Reddit User"),
    path(Edgy, Anxious, "Absoluto Edgy", Sassy, "Lucifer"),
    path(Edgy, Anxious, "Absoluto Edgy", Intelectual, "Edgar Alan Poe"),
    path(Edgy, Anxious, "Absoluto Edgy", Anxious, "Gerard Way"),
    path(Sassy, Edgy, "El villano de tu serie favorita", Intelectual, "Dracula"),
    path(Sassy, Edgy, "El villano de tu serie favorita", Anxious, "Megamind"),
    path(Sassy, Edgy, "El villano de tu serie favorita", Geek, "Bowser"),
    path(Sassy, Anxious, "El villano que en realidad es buen tipo", Edgy, "Godzilla"),
    path(Sassy, Anxious, "El villano que en realidad es buen tipo", Geek, "Dwight"),
    path(Sassy, Anxious, "El villano que en realidad es buen tipo", Intelectual, "Doofenshmirtz"),
    path(Sassy, Intelectual, "El personaje prodigioso", Edgy, "Shadow"),
    path(Sassy, Intelectual, "El personaje prodigioso", Anxious, "Elsa"),
    path(Sassy, Intelectual, "El personaje prodigioso", Geek, "Neo"),
    path(Sassy, Geek, "Cosplayer", Edgy, "Ghostface"),
    path(Sassy, Geek, "Cosplayer", Anxious, "James"),
    path(Sassy, Geek, "Cosplayer", Intelectual, "Spiderman"),
    path(Sassy, Sassy, "Showman", Geek, "Mettaton"),
    path(Sassy, Sassy, "Showman", Intelectual, "Sherlock Holmes"),
    path(Sassy, Sassy, "Showman", Anxious, "Michael Scott"),
    path(Sassy, Sassy, "Showman", Edgy, "Joker"),
];

/// Archetype and final names mapped back to the base tag whose sprite set
/// they fall back to.
const BASE_OF: &[(&str, BasePersonality)] = &[
    ("Ingeniero", Intelectual),
    ("El personaje prodigioso", Intelectual),
    ("Jugador de rol", Geek),
    ("Nerd", Anxious),
    ("Cerebro Galaxia", Intelectual),
    ("Otaku Cringe", Geek),
    ("Cosplayer", Geek),
    ("Otaku", Geek),
    ("Fanatico", Geek),
    ("Emo", Anxious),
    ("El villano que en realidad es buen tipo", Sassy),
    ("Overthinker", Anxious),
    ("Absoluto Edgy", Edgy),
    ("El villano de tu serie favorita", Sassy),
    ("Showman", Sassy),
    ("Glados", Sassy),
    ("Tails", Anxious),
    ("Hideo Kojima", Geek),
    ("Shadow", Edgy),
    ("Elsa", Anxious),
    ("Neo", Geek),
    ("H.P. Lovecraft", Edgy),
    ("Frodo Bolson", Anxious),
    ("The Dungeon Master", Sassy),
    ("Dr. Eggman", Edgy),
    ("Sheldon Cooper", Sassy),
    ("Hackerman", Geek),
    ("R2-D2", Anxious),
    ("Dr. Who", Geek),
    ("Tyrion Lannister", Sassy),
    ("Dr. House", Edgy),
    ("Kira", Intelectual),
    ("Shinji", Anxious),
    ("Sasuke", Sassy),
    ("Ghostface", Edgy),
    ("James", Anxious),
    ("Spiderman", Intelectual),
    ("Muzan", Edgy),
    ("Asuka", Sassy),
    ("Bulma", Intelectual),
    ("Gollum", Anxious),
    ("Viktor", Intelectual),
    ("Edna Moda", Sassy),
    ("Conspiranoico", Edgy),
    ("L", Intelectual),
    ("Mewtwo", Sassy),
    ("Millenials 2008", Geek),
    ("Godzilla", Edgy),
    ("Dwight", Geek),
    ("Doofenshmirtz", Intelectual),
    ("Alucard", Edgy),
    ("Morty", Geek),
    ("Van Gogh", Intelectual),
    ("Marceline", Sassy),
    ("Bella Swan", Edgy),
    ("Reddit User", Geek),
    ("Lucifer", Sassy),
    ("Edgar Alan Poe", Intelectual),
    ("Gerard Way", Anxious),
    ("Dracula", Intelectual),
    ("Megamind", Anxious),
    ("Bowser", Geek),
    ("Mettaton", Geek),
    ("Sherlock Holmes", Intelectual),
    ("Michael Scott", Anxious),
    ("Joker", Edgy),
    (NEGLECTED, Neutral),
    (NO_MEMORY, Neutral),
];

/// Lowercased name -> sprite key.
const SPRITE_KEYS: &[(&str, &str)] = &[
    ("absoluto edgy", "AbsolutoEdgy"),
    ("cerebro galaxia", "CerebroGalaxia"),
    ("cosplayer", "Cosplayer"),
    (
        "el villano que en realidad es buen tipo",
        "El villano que en realidad es buen tipo",
    ),
    ("el personaje prodigioso", "ElPersonajeProdigioso"),
    ("el villano de tu serie favorita", "ElVillanoDeTuSerieFavorita"),
    ("emo", "Emo"),
    ("fanatico", "Fanatico"),
    ("ingeniero", "Ingeniero"),
    ("jugador de rol", "JugadorDeRol"),
    ("nerd", "Nerd"),
    ("otaku", "Otaku"),
    ("otaku cringe", "OtakuCringe"),
    ("overthinker", "Overthinker"),
    ("showman", "Showman"),
    ("glados", "Glados"),
    ("tails", "Tails"),
    ("hideo kojima", "Kojima"),
    ("kojima", "Kojima"),
    ("shadow", "Shadow"),
    ("elsa", "Elsa"),
    ("neo", "Neo"),
    ("h.p. lovecraft", "Lovecraft"),
    ("lovecraft", "Lovecraft"),
    ("frodo bolson", "Frodo"),
    ("frodo", "Frodo"),
    ("the dungeon master", "Dungeon Master"),
    ("dr. eggman", "Eggman"),
    ("eggman", "Eggman"),
    ("sheldon cooper", "Sheldon Cooper"),
    ("sheldon", "Sheldon Cooper"),
    ("hackerman", "Hackerman"),
    ("r2-d2", "R2D2"),
    ("r2d2", "R2D2"),
    ("dr. who", "Dr Who"),
    ("tyrion lannister", "Tyrion"),
    ("dr. house", "House"),
    ("house", "House"),
    ("kira", "Kira"),
    ("shinji", "Shinji"),
    ("sasuke", "Sasuke"),
    ("ghostface", "Ghostface"),
    ("james", "James"),
    ("spiderman", "Spiderman"),
    ("muzan", "Muzan"),
    ("asuka", "Asuka"),
    ("bulma", "Bulma"),
    ("gollum", "Gollum"),
    ("viktor", "Viktor"),
    ("edna moda", "Edna Moda"),
    ("conspiranoico", "Conspiranoico"),
    ("l", "L"),
    ("mewtwo", "Mewtwo"),
    ("millenials 2008", "Milenial"),
    ("milenial", "Milenial"),
    ("godzilla", "Godzilla"),
    ("dwight", "Dwight"),
    ("doofenshmirtz", "Doofenshmirtz"),
    ("alucard", "Alucard"),
    ("morty", "Morty"),
    ("van gogh", "Van Gogh"),
    ("marceline", "Marceline"),
    ("bella swan", "Bella Swan"),
    ("reddit user", "Reddit"),
    ("lucifer", "Lucifer"),
    ("edgar alan poe", "Edgar Allan Poe"),
    ("edgar allan poe", "Edgar Allan Poe"),
    ("gerard way", "Gerard Way"),
    ("dracula", "Drácula"),
    ("drácula", "Drácula"),
    ("megamind", "Megamente"),
    ("megamente", "Megamente"),
    ("bowser", "Bowser"),
    ("mettaton", "Mettaton"),
    ("sherlock holmes", "Sherlock"),
    ("michael scott", "Michael Scott"),
    ("joker", "Joker"),
    ("anxious", "anxious"),
    ("edgy", "edgy"),
    ("geek", "geek"),
    ("intelectual", "intelectual"),
    ("sassy", "sassy"),
    ("neutral", "neutral"),
    ("descuidado", "neutral"),
    ("patata", "neutral"),
];

/// Case-insensitive name comparison (Unicode aware).
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Next personality for a pet growing out of `stage`.
///
/// Neglect wins over everything, then a missing memory, then the path
/// table. `None` means the table has no row for this combination.
pub fn resolve(
    stage: LifeStage,
    current: Option<&Personality>,
    dominant_memory: Option<BasePersonality>,
    was_neglected: bool,
) -> Option<Personality> {
    if was_neglected || current.is_some_and(Personality::is_neglected) {
        return Some(Personality::Named(NEGLECTED.to_string()));
    }

    let Some(memory) = dominant_memory else {
        return Some(Personality::Named(NO_MEMORY.to_string()));
    };

    let current_name = current.map(Personality::name).unwrap_or("");

    match stage {
        LifeStage::Baby => Some(Personality::Base(memory)),
        LifeStage::Child => PATHS
            .iter()
            .find(|p| same_name(p.child.as_str(), current_name) && p.child_memory == memory)
            .map(|p| Personality::Named(p.young.to_string())),
        LifeStage::Young => PATHS
            .iter()
            .find(|p| same_name(p.young, current_name) && p.young_memory == memory)
            .map(|p| Personality::Named(p.adult.to_string())),
        _ => None,
    }
}

/// [`resolve`] with the gap policy applied: when the table has no row the
/// pet keeps its personality, and a pet with none becomes neutral.
pub fn next_personality(
    stage: LifeStage,
    current: Option<&Personality>,
    dominant_memory: Option<BasePersonality>,
    was_neglected: bool,
) -> Personality {
    resolve(stage, current, dominant_memory, was_neglected)
        .or_else(|| current.cloned())
        .unwrap_or(Personality::Base(Neutral))
}

pub fn is_valid_evolution(
    stage: LifeStage,
    current: &Personality,
    dominant_memory: BasePersonality,
) -> bool {
    resolve(stage, Some(current), Some(dominant_memory), false).is_some()
}

/// Every name reachable from `current` at `stage`, in table order.
pub fn possible_evolutions(stage: LifeStage, current: &str) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for p in PATHS {
        let candidate = match stage {
            LifeStage::Child if same_name(p.child.as_str(), current) => p.young,
            LifeStage::Young if same_name(p.young, current) => p.adult,
            _ => continue,
        };
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

/// Base tag a name falls back to for sprites.
pub fn base_personality_of(name: &str) -> Option<BasePersonality> {
    if let Ok(base) = name.parse::<BasePersonality>() {
        return Some(base);
    }
    BASE_OF
        .iter()
        .find(|(n, _)| same_name(n, name))
        .map(|(_, base)| *base)
}

/// Canonical sprite key for a personality name. Unknown names get their
/// first letter uppercased and are otherwise kept as written.
pub fn sprite_key_for(name: &str) -> String {
    let normalized = name.trim().to_lowercase();
    if let Some((_, key)) = SPRITE_KEYS.iter().find(|(n, _)| *n == normalized) {
        return (*key).to_string();
    }

    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
