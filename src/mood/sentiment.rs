//! Lexicon sentiment score for short phrases.

/// Word valences in [-3, 3]
const LEXICON: &[(&str, i8)] = &[
    // Positive
    ("love", 3),
    ("joy", 3),
    ("beautiful", 3),
    ("radiant", 3),
    ("bright", 2),
    ("calm", 2),
    ("peace", 2),
    ("peaceful", 2),
    ("gentle", 2),
    ("warm", 2),
    ("hope", 2),
    ("serene", 2),
    ("bloom", 2),
    ("laughter", 2),
    ("sweet", 2),
    ("alive", 2),
    ("golden", 1),
    ("dawn", 1),
    ("glow", 1),
    ("soft", 1),
    ("light", 1),
    // Negative
    ("dark", -1),
    ("cold", -1),
    ("storm", -1),
    ("shadow", -1),
    ("lonely", -2),
    ("sad", -2),
    ("fear", -2),
    ("lost", -2),
    ("empty", -2),
    ("broken", -2),
    ("cry", -2),
    ("ruin", -2),
    ("sorrow", -3),
    ("grief", -3),
    ("pain", -3),
    ("dread", -3),
];

const MAX_VALENCE: f32 = 3.0;

/// Mean normalized valence of the lexicon words in `text`, in [-1, 1].
/// Text without any known word scores 0.
pub fn score(text: &str) -> f32 {
    let (sum, matched) = text
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .filter_map(|w| valence(&w.to_lowercase()))
        .fold((0i32, 0u32), |(sum, n), v| (sum + v as i32, n + 1));

    if matched == 0 {
        return 0.0;
    }
    (sum as f32 / (matched as f32 * MAX_VALENCE)).clamp(-1.0, 1.0)
}

fn valence(word: &str) -> Option<i8> {
    let lookup = |w: &str| LEXICON.iter().find(|(k, _)| *k == w).map(|(_, v)| *v);
    // Plain plural: "shadows" → "shadow"
    lookup(word).or_else(|| word.strip_suffix('s').and_then(lookup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text_scores_zero() {
        assert_eq!(score(""), 0.0);
        assert_eq!(score("the forest at noon"), 0.0);
    }

    #[test]
    fn test_polarity() {
        assert!(score("Whispers of dawn") > 0.0);
        assert!(score("Grief in the cold rain") < 0.0);
        assert_eq!(score("LOVE!"), 1.0);
        assert_eq!(score("pain, dread"), -1.0);
    }

    #[test]
    fn test_plurals_and_mixed() {
        // shadows (-1) + bloom (2) → 1 / 6
        let s = score("Shadows bloom");
        assert!((s - 1.0 / 6.0).abs() < 1e-6);
    }
}
