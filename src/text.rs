use std::collections::HashSet;

use regex::Regex;

use crate::error::Result;

/// Fixed English stop-word list.
pub const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// scikit-learn's `english` list, used by the TF-IDF backend.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his", "how", "however",
    "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its",
    "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly", "move",
    "much", "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next",
    "nine", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of",
    "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
    "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put",
    "rather", "re", "rest", "same", "see", "seem", "seemed", "seeming", "seems", "serious",
    "several", "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so", "some",
    "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still", "such",
    "system", "take", "ten", "than", "that", "the", "their", "them", "themselves", "then",
    "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these",
    "they", "thick", "thin", "third", "this", "those", "though", "three", "through", "throughout",
    "thru", "thus", "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two",
    "un", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Normalizes raw text and splits it into stop-word-free tokens.
///
/// Built once per backend; holds no per-call state.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    non_alpha: Regex,
    stop_words: HashSet<&'static str>,
}

impl TextNormalizer {
    pub fn new() -> Result<Self> {
        Self::with_stop_words(STOP_WORDS)
    }

    pub fn with_stop_words(stop_words: &'static [&'static str]) -> Result<Self> {
        Ok(Self {
            non_alpha: Regex::new(r"[^a-zA-Z\s]")?,
            stop_words: stop_words.iter().copied().collect(),
        })
    }

    /// Replaces everything outside `[A-Za-z\s]` with a space, lowercases,
    /// collapses whitespace and trims.
    pub fn normalize(&self, text: &str) -> String {
        let letters_only = self.non_alpha.replace_all(text, " ");
        letters_only
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Splits already normalized text on whitespace and drops stop-words.
    pub fn tokenize(&self, normalized: &str) -> Vec<String> {
        normalized
            .split_whitespace()
            .filter(|token| !self.is_stop_word(token))
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub normalized: String,
    pub tokens: Vec<String>,
}

impl Document {
    pub fn new(raw: &str, normalizer: &TextNormalizer) -> Self {
        let normalized = normalizer.normalize(raw);
        let tokens = normalizer.tokenize(&normalized);
        Self { normalized, tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new().unwrap()
    }

    #[test]
    fn test_normalize_strips_digits_and_punctuation() {
        let text = "Built 3 REST APIs (Python/SQL), 2019-2023!";
        assert_eq!(normalizer().normalize(text), "built rest apis python sql");
    }

    #[test]
    fn test_normalize_collapses_whitespace_and_trims() {
        assert_eq!(normalizer().normalize("  Senior \n\t Engineer  "), "senior engineer");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalizer().normalize(""), "");
        assert_eq!(normalizer().normalize("1234 -- !!"), "");
    }

    #[test]
    fn test_normalize_replaces_non_ascii_letters() {
        assert_eq!(normalizer().normalize("café résumé"), "caf r sum");
    }

    #[test]
    fn test_tokenize_drops_stop_words() {
        let n = normalizer();
        let tokens = n.tokenize(&n.normalize("Looking for a Python developer with SQL"));
        assert_eq!(tokens, vec!["looking", "python", "developer", "sql"]);
    }

    #[test]
    fn test_english_list_drops_more_than_nltk() {
        let text = "Full stack developer, back end systems";
        let nltk = normalizer();
        assert_eq!(
            nltk.tokenize(&nltk.normalize(text)),
            vec!["full", "stack", "developer", "back", "end", "systems"]
        );
        let english = TextNormalizer::with_stop_words(ENGLISH_STOP_WORDS).unwrap();
        assert_eq!(
            english.tokenize(&english.normalize(text)),
            vec!["stack", "developer", "end", "systems"]
        );
    }

    #[test]
    fn test_document_normalizes_and_tokenizes() {
        let n = normalizer();
        let doc = Document::new("The Docker expert", &n);
        assert_eq!(doc.normalized, "the docker expert");
        assert_eq!(doc.tokens, vec!["docker", "expert"]);
        assert!(!doc.is_empty());
        assert!(Document::new("and the", &n).is_empty());
    }
}
