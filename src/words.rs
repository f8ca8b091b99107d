//! Built in practice words.

use rand::{seq::SliceRandom, Rng};

const WORDS: &[&str] = &[
    "able", "about", "above", "act", "add", "after", "again", "air", "all", "also", "am", "and",
    "animal", "answer", "any", "are", "ask", "at", "away", "back", "base", "be", "bear", "beat",
    "bed", "best", "big", "bird", "black", "blue", "boat", "body", "book", "box", "boy", "bring",
    "call", "came", "can", "car", "care", "carry", "cat", "city", "class", "clear", "close",
    "cold", "come", "copy", "could", "cover", "cross", "cry", "dark", "day", "deep", "did", "do",
    "dog", "door", "down", "draw", "dry", "each", "early", "earth", "east", "eat", "end", "even",
    "ever", "eye", "face", "fact", "fall", "far", "farm", "fast", "feel", "few", "field", "fill",
    "find", "fine", "fire", "first", "fish", "five", "fly", "food", "foot", "form", "found",
    "four", "free", "friend", "from", "full", "game", "gave", "get", "girl", "give", "go", "gold",
    "good", "got", "great", "green", "ground", "group", "grow", "hand", "hard", "has", "have",
    "head", "hear", "heat", "help", "here", "high", "hold", "home", "horse", "hot", "hour",
    "house", "how", "idea", "into", "iron", "island", "just", "keep", "key", "kind", "king",
    "knew", "know", "land", "large", "last", "late", "lead", "learn", "left", "less", "letter",
    "life", "light", "line", "list", "little", "live", "long", "look", "low", "made", "main",
    "make", "man", "map", "mark", "may", "mean", "men", "might", "mile", "mind", "miss", "moon",
    "more", "most", "move", "much", "music", "must", "name", "near", "need", "never", "new",
    "next", "night", "north", "note", "now", "number", "ocean", "off", "often", "old", "once",
    "one", "only", "open", "order", "other", "our", "out", "over", "own", "page", "paper", "part",
    "pass", "people", "picture", "place", "plain", "plan", "plant", "play", "point", "port",
    "power", "press", "pull", "put", "question", "quick", "rain", "ran", "read", "ready", "real",
    "red", "rest", "right", "river", "road", "rock", "room", "round", "rule", "run", "said",
    "same", "saw", "say", "sea", "second", "see", "send", "sentence", "set", "ship", "short",
    "show", "side", "signal", "simple", "sing", "size", "sleep", "slow", "small", "snow", "some",
    "song", "soon", "sound", "south", "space", "spell", "stand", "star", "start", "state", "stay",
    "step", "still", "stop", "story", "street", "strong", "study", "sun", "sure", "table", "tail",
    "take", "talk", "tell", "test", "than", "that", "then", "there", "they", "thing", "think",
    "three", "time", "tone", "took", "top", "town", "tree", "true", "try", "turn", "two", "under",
    "unit", "until", "up", "use", "very", "voice", "walk", "want", "warm", "watch", "water", "wave",
    "way", "well", "went", "west", "what", "wheel", "when", "where", "while", "white", "wind",
    "with", "wood", "word", "work", "world", "would", "write", "year", "yes", "you", "young",
];

/// Picks a random practice word.
/// All words are lowercase letters only.
pub fn random_word(rng: &mut impl Rng) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("morse")
}
