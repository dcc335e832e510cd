use crate::core::types::DotSet;

/// Placeholder emitted for a dot-set with no letter.
pub const UNKNOWN_SYMBOL: char = '?';

/// Physical keys in dot order: key `KEYS[n - 1]` raises dot `n`.
const KEYS: [char; 6] = ['D', 'W', 'Q', 'K', 'O', 'P'];

/// Stateless converter between chord tokens, dot-sets and letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrailleCodec;

impl BrailleCodec {
    pub fn new() -> Self {
        Self
    }

    /// Maps one chord token (e.g. `"DW"`) to its dot-set.
    /// Unrecognized keys are dropped, so an all-unknown token is a space.
    pub fn encode_chord(&self, key_combo: &str) -> DotSet {
        let mut dots = DotSet::EMPTY;
        for c in key_combo.chars() {
            if let Some(dot) = self.key_to_dot(c) {
                dots.insert(dot);
            }
        }
        dots
    }

    pub fn decode_dot_set(&self, dots: DotSet) -> char {
        self.get_letter(dots).unwrap_or(UNKNOWN_SYMBOL)
    }

    /// Unmapped characters become the empty (space) pattern.
    pub fn word_to_patterns(&self, word: &str) -> Vec<DotSet> {
        word.chars()
            .map(|c| self.get_pattern(c.to_ascii_uppercase()).unwrap_or(DotSet::EMPTY))
            .collect()
    }

    pub fn patterns_to_word(&self, patterns: &[DotSet]) -> String {
        patterns.iter().map(|&p| self.decode_dot_set(p)).collect()
    }

    /// The chord token that types `letter`, keys in dot order.
    pub fn chord_for(&self, letter: char) -> Option<String> {
        let dots = self.get_pattern(letter.to_ascii_uppercase())?;
        Some(dots.dots().map(|dot| KEYS[(dot - 1) as usize]).collect())
    }

    /// Space-separated chord tokens that type `word`. Characters with no
    /// braille letter are skipped.
    pub fn word_to_chords(&self, word: &str) -> String {
        word.chars()
            .filter(|c| !c.is_whitespace())
            .filter_map(|c| self.chord_for(c))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn key_to_dot(&self, key: char) -> Option<u8> {
        KEYS.iter()
            .position(|&k| k == key.to_ascii_uppercase())
            .map(|idx| idx as u8 + 1)
    }

    fn get_pattern(&self, letter: char) -> Option<DotSet> {
        let dots: &[u8] = match letter {
            'A' => &[1],
            'B' => &[1, 2],
            'C' => &[1, 4],
            'D' => &[1, 4, 5],
            'E' => &[1, 5],
            'F' => &[1, 2, 4],
            'G' => &[1, 2, 4, 5],
            'H' => &[1, 2, 5],
            'I' => &[2, 4],
            'J' => &[2, 4, 5],
            'K' => &[1, 3],
            'L' => &[1, 2, 3],
            'M' => &[1, 3, 4],
            'N' => &[1, 3, 4, 5],
            'O' => &[1, 3, 5],
            'P' => &[1, 2, 3, 4],
            'Q' => &[1, 2, 3, 4, 5],
            'R' => &[1, 2, 3, 5],
            'S' => &[2, 3, 4],
            'T' => &[2, 3, 4, 5],
            'U' => &[1, 3, 6],
            'V' => &[1, 2, 3, 6],
            'W' => &[2, 4, 5, 6],
            'X' => &[1, 3, 4, 6],
            'Y' => &[1, 3, 4, 5, 6],
            'Z' => &[1, 3, 5, 6],
            ' ' => &[],
            _ => return None,
        };
        Some(DotSet::from_dots(dots))
    }

    fn get_letter(&self, dots: DotSet) -> Option<char> {
        ('A'..='Z')
            .chain(std::iter::once(' '))
            .find(|&letter| self.get_pattern(letter) == Some(dots))
    }
}
