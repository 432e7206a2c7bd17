use log::{debug, trace};

/// One bucket per leading letter, A to Z.
pub const BUCKETS: usize = 26;

#[derive(Debug, Clone)]
struct SuspectEntry {
    clue: String,
    suspect: String,
}

/// Maps a clue text to the suspect it implicates.
///
/// Entries are spread over 26 buckets by the first letter of the clue. Inside a
/// bucket the most recently inserted entry is scanned first, so if the same clue
/// text is configured twice the later suspect wins.
#[derive(Debug, Clone, Default)]
pub struct SuspectIndex {
    // Each chain is stored oldest-first and scanned in reverse.
    buckets: [Vec<SuspectEntry>; BUCKETS],
    suspects: Vec<String>,
}

/// Bucket for a clue: its uppercased first letter, or bucket 0 when the clue
/// does not start with an ASCII letter.
pub fn bucket_of(clue: &str) -> usize {
    match clue.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => (c.to_ascii_uppercase() as u8 - b'A') as usize,
        _ => 0,
    }
}

impl SuspectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(clue, suspect)` pairs, inserted in the given order.
    pub fn build<I, C, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (C, S)>,
        C: Into<String>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for (clue, suspect) in entries {
            index.insert(clue, suspect);
        }
        index
    }

    pub fn insert(&mut self, clue: impl Into<String>, suspect: impl Into<String>) {
        let clue = clue.into();
        let suspect = suspect.into();
        let bucket = bucket_of(&clue);
        debug!("Indexing clue '{clue}' -> {suspect} (bucket {bucket})");

        if !self.suspects.contains(&suspect) {
            self.suspects.push(suspect.clone());
        }
        self.buckets[bucket].push(SuspectEntry { clue, suspect });
    }

    /// The suspect implicated by exactly this clue text, if any.
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        let found = self.buckets[bucket_of(clue)]
            .iter()
            .rev()
            .find(|entry| entry.clue == clue)
            .map(|entry| entry.suspect.as_str());
        trace!("Lookup '{clue}' -> {found:?}");
        found
    }

    /// Distinct suspect names, in the order they were first configured.
    pub fn suspects(&self) -> &[String] {
        &self.suspects
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_index() -> SuspectIndex {
        SuspectIndex::build([
            ("Chave antiga", "Sr. Preto"),
            ("Livro aberto", "Sra. Branca"),
            ("Faca com resíduo", "Sr. Verde"),
            ("Caixa trancada", "Sra. Branca"),
            ("Pegadas misteriosas", "Sr. Preto"),
            ("Carta cifrada", "Sr. Verde"),
        ])
    }

    #[test]
    fn test_bucket_of() {
        assert_eq!(bucket_of("Chave antiga"), 2);
        assert_eq!(bucket_of("chave antiga"), 2);
        assert_eq!(bucket_of("Zebra"), 25);
        assert_eq!(bucket_of("apple"), 0);
        assert_eq!(bucket_of("42 pistas"), 0);
        assert_eq!(bucket_of("Óculos"), 0);
        assert_eq!(bucket_of(""), 0);
    }

    #[test]
    fn test_lookup_configured_clues() {
        let index = reference_index();
        assert_eq!(index.len(), 6);
        assert_eq!(index.lookup("Chave antiga"), Some("Sr. Preto"));
        assert_eq!(index.lookup("Caixa trancada"), Some("Sra. Branca"));
        assert_eq!(index.lookup("Carta cifrada"), Some("Sr. Verde"));
        assert_eq!(index.lookup("Faca com resíduo"), Some("Sr. Verde"));
        assert_eq!(index.lookup("Pegadas misteriosas"), Some("Sr. Preto"));
        assert_eq!(index.lookup("Livro aberto"), Some("Sra. Branca"));
    }

    #[test]
    fn test_lookup_misses() {
        let index = reference_index();
        // same bucket, different text
        assert_eq!(index.lookup("Chave nova"), None);
        assert_eq!(index.lookup("chave antiga"), None);
        assert_eq!(index.lookup(""), None);
        assert_eq!(index.lookup("Xícara"), None);
    }

    #[test]
    fn test_duplicate_clue_later_entry_wins() {
        let index = SuspectIndex::build([("Luva", "Sr. Preto"), ("Luva", "Sra. Branca")]);
        assert_eq!(index.lookup("Luva"), Some("Sra. Branca"));
    }

    #[test]
    fn test_non_letter_clues_share_bucket_zero() {
        let index = SuspectIndex::build([("#1 bilhete", "Sr. Verde"), ("anel", "Sr. Preto")]);
        assert_eq!(index.lookup("#1 bilhete"), Some("Sr. Verde"));
        assert_eq!(index.lookup("anel"), Some("Sr. Preto"));
    }

    #[test]
    fn test_suspects_listed_once_in_order() {
        let index = reference_index();
        assert_eq!(index.suspects(), ["Sr. Preto", "Sra. Branca", "Sr. Verde"]);
    }
}
