//! Default project name generation
//!
//! Picks a random `word-word` name that does not clash with anything in the
//! target directory. An existing empty directory counts as free, since cloning
//! into it succeeds.

use rand::seq::IndexedRandom;
use rand::Rng;
use std::fs;
use std::path::Path;

const WORDS: &[&str] = &[
    "able", "acres", "alive", "amber", "angle", "apple", "arrow", "aspen", "atlas", "autumn",
    "badge", "baker", "bamboo", "basin", "beacon", "berry", "birch", "blaze", "bloom", "brave",
    "breeze", "brick", "bright", "brook", "cabin", "candle", "canyon", "castle", "cedar", "chalk",
    "cherry", "cliff", "cloud", "clover", "comet", "coral", "cotton", "crane", "creek", "crisp",
    "dawn", "delta", "desert", "dune", "eagle", "ember", "echo", "fable", "falcon", "feather",
    "fern", "field", "flame", "flint", "forest", "fossil", "frost", "garden", "gentle", "glacier",
    "glow", "granite", "grove", "harbor", "hazel", "heron", "hollow", "honey", "island", "ivory",
    "jade", "jolly", "juniper", "kettle", "lagoon", "lantern", "laurel", "lemon", "linen", "lively",
    "lunar", "maple", "marble", "meadow", "mellow", "mint", "misty", "moss", "nectar", "noble",
    "oasis", "ocean", "olive", "orbit", "orchid", "otter", "pebble", "pepper", "pine", "planet",
    "plume", "polar", "prairie", "quartz", "quiet", "rapid", "raven", "reef", "ridge", "river",
    "robin", "rustic", "saddle", "sage", "sandy", "shadow", "silver", "slate", "smoky", "solar",
    "spark", "spruce", "steady", "stone", "summit", "sunny", "swift", "thistle", "thunder", "timber",
    "topaz", "trail", "tulip", "tundra", "valley", "velvet", "violet", "walnut", "willow", "winter",
];

/// Suggest a free project name inside `dir`
///
/// Draws until a candidate is free. There is no attempt limit.
pub fn suggest_name(dir: &Path) -> String {
    let mut rng = rand::rng();
    suggest_with(dir, || random_pair(&mut rng))
}

/// Like [`suggest_name`], but candidates come from `draw`
pub fn suggest_with(dir: &Path, mut draw: impl FnMut() -> String) -> String {
    loop {
        let candidate = draw();
        if is_available(&dir.join(&candidate)) {
            return candidate;
        }
        tracing::debug!(candidate = %candidate, "suggested name is taken, drawing again");
    }
}

/// Two random dictionary words joined by a hyphen
pub fn random_pair<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = WORDS.choose(rng).copied().unwrap_or("new");
    let second = WORDS.choose(rng).copied().unwrap_or("project");
    format!("{}-{}", first, second)
}

/// True if nothing exists at `path`, or it is an empty directory
pub fn is_available(path: &Path) -> bool {
    // symlink_metadata so a dangling symlink still counts as taken
    match fs::symlink_metadata(path) {
        Err(e) => e.kind() == std::io::ErrorKind::NotFound,
        Ok(meta) if meta.is_dir() => fs::read_dir(path)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false),
        Ok(_) => false,
    }
}
