//! Address normalization before geocoding.

use regex::{Captures, Regex};

/// Accented letters found in Québec addresses and their plain equivalents
const ACCENT_REPLACEMENTS: &[(char, char)] = &[
    ('à', 'a'),
    ('â', 'a'),
    ('ä', 'a'),
    ('é', 'e'),
    ('è', 'e'),
    ('ê', 'e'),
    ('ë', 'e'),
    ('î', 'i'),
    ('ï', 'i'),
    ('ô', 'o'),
    ('ö', 'o'),
    ('û', 'u'),
    ('ü', 'u'),
    ('ç', 'c'),
];

/// Lowercases, strips accents and joins words with `+` for URL embedding.
#[derive(Debug, Clone)]
pub struct AddressNormalizer {
    accents: Regex,
}

impl AddressNormalizer {
    pub fn new() -> Self {
        let class: String = ACCENT_REPLACEMENTS.iter().map(|(from, _)| *from).collect();
        Self {
            accents: Regex::new(&format!("[{}]", class)).expect("Invalid accent pattern"),
        }
    }

    pub fn normalize(&self, line: &str) -> String {
        let lowered = line.to_lowercase();
        let unaccented = self.accents.replace_all(&lowered, |caps: &Captures| {
            caps[0]
                .chars()
                .next()
                .and_then(unaccent)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        });
        unaccented.replace(' ', "+")
    }
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn unaccent(c: char) -> Option<char> {
    ACCENT_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_street_address() {
        let normalizer = AddressNormalizer::new();
        assert_eq!(
            normalizer.normalize("123 Rue Général Montréal"),
            "123+rue+general+montreal"
        );
    }

    #[test]
    fn test_every_accent_is_stripped() {
        let normalizer = AddressNormalizer::new();
        assert_eq!(
            normalizer.normalize("àâäéèêëîïôöûüç"),
            "aaaeeeeiioouuc"
        );
    }

    #[test]
    fn test_uppercase_accents_are_lowered_first() {
        let normalizer = AddressNormalizer::new();
        assert_eq!(normalizer.normalize("ÎLE-DES-SŒURS"), "ile-des-sœurs");
        assert_eq!(normalizer.normalize("Église Ç"), "eglise+c");
    }

    #[test]
    fn test_only_spaces_become_plus() {
        let normalizer = AddressNormalizer::new();
        assert_eq!(normalizer.normalize("a  b\tc"), "a++b\tc");
        assert_eq!(normalizer.normalize(""), "");
    }

    #[test]
    fn test_idempotent() {
        let normalizer = AddressNormalizer::new();
        for input in [
            "500 Saint-Laurent Montreal",
            "1 Place Ville-Marie, Montréal, QC",
            "Chemin de la Côte-Sainte-Catherine",
            "already+normal",
        ] {
            let once = normalizer.normalize(input);
            assert_eq!(normalizer.normalize(&once), once, "input: {}", input);
        }
    }
}
