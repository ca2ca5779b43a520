//! Review preprocessing and n-gram tokenization.
//!
//! Reviews are split into phrases at clause breaks (`<br />` markup,
//! sentence punctuation runs, semicolons, dashes), tokens are stripped of
//! non-word characters and lowercased, and the cleaned stream is turned
//! into space-joined n-grams. For unigrams a stopword filter is applied;
//! higher-order n-grams keep stopwords so that phrases like "not good"
//! survive as features.

use regex::Regex;
use std::collections::HashSet;

/// Marker inserted between phrases so n-grams do not silently span a
/// clause break.
pub const PHRASE_BOUNDARY: &str = "<br />";

/// English stopwords, already stripped of apostrophes to match cleaned
/// tokens ("don't" cleans to "dont").
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "youre", "youve",
    "youll", "youd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "shes", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "thatll", "these",
    "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
    "so", "than", "too", "very", "s", "t", "can", "will", "just", "don", "dont", "should",
    "shouldve", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "arent",
    "couldn", "couldnt", "didn", "didnt", "doesn", "doesnt", "hadn", "hadnt", "hasn",
    "hasnt", "haven", "havent", "isn", "isnt", "ma", "mightn", "mightnt", "mustn", "mustnt",
    "needn", "neednt", "shan", "shant", "shouldn", "shouldnt", "wasn", "wasnt", "weren",
    "werent", "won", "wont", "wouldn", "wouldnt",
];

/// Tokenize reviews and emit n-grams, one token list per review.
///
/// `n_gram` must be >= 1. For `n_gram == 1` the stopword filter applies;
/// for larger n all cleaned tokens are kept.
///
/// ```
/// use sentilab::bow::tokenize::tokenize_reviews;
///
/// let grams = tokenize_reviews(&["I like apples".to_string()], 2);
/// assert_eq!(grams[0], vec!["i like".to_string(), "like apples".to_string()]);
/// ```
pub fn tokenize_reviews(reviews: &[String], n_gram: usize) -> Vec<Vec<String>> {
    let clause_break = Regex::new(r"<br />|\.+|,+|\?+|!+|\(+|\)+|;|--+| - ").unwrap();
    let non_word = Regex::new(r"[^\w]").unwrap();
    let stopwords: HashSet<&str> = STOPWORDS.iter().cloned().collect();

    reviews
        .iter()
        .map(|review| {
            let tokens = clean_review(review, n_gram, &clause_break, &non_word, &stopwords);
            ngrams(&tokens, n_gram)
        })
        .collect()
}

/// Split one review into cleaned tokens with phrase boundary markers
/// between clauses.
fn clean_review(
    review: &str,
    n_gram: usize,
    clause_break: &Regex,
    non_word: &Regex,
    stopwords: &HashSet<&str>,
) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    for phrase in clause_break.split(review) {
        let cleaned: Vec<String> = phrase
            .split_whitespace()
            .map(|raw| non_word.replace_all(raw, "").to_lowercase())
            .filter(|token| {
                if token.is_empty() {
                    return false;
                }
                // Stopword removal only makes sense at the unigram level
                n_gram > 1 || !stopwords.contains(token.as_str())
            })
            .collect();

        if cleaned.is_empty() {
            continue;
        }
        if !tokens.is_empty() {
            tokens.push(PHRASE_BOUNDARY.to_string());
        }
        tokens.extend(cleaned);
    }

    tokens
}

/// Contiguous n-grams joined by single spaces. A stream shorter than n
/// yields nothing.
fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bigrams_simple_sentence() {
        let grams = tokenize_reviews(&strings(&["I like apples"]), 2);
        assert_eq!(grams[0], vec!["i like", "like apples"]);
    }

    #[test]
    fn test_unigrams_drop_stopwords() {
        let grams = tokenize_reviews(&strings(&["I like the apples"]), 1);
        assert_eq!(grams[0], vec!["like", "apples"]);
    }

    #[test]
    fn test_bigrams_keep_stopwords() {
        let grams = tokenize_reviews(&strings(&["not good at all"]), 2);
        assert!(grams[0].contains(&"not good".to_string()));
    }

    #[test]
    fn test_punctuation_breaks_phrases() {
        let grams = tokenize_reviews(&strings(&["Great movie. Bad ending"]), 2);
        // The boundary marker keeps "movie bad" from forming silently
        assert!(grams[0].contains(&format!("movie {}", PHRASE_BOUNDARY)));
        assert!(grams[0].contains(&format!("{} bad", PHRASE_BOUNDARY)));
        assert!(!grams[0].contains(&"movie bad".to_string()));
    }

    #[test]
    fn test_html_break_is_clause_break() {
        let grams = tokenize_reviews(&strings(&["fine film<br />watch twice"]), 1);
        assert_eq!(
            grams[0],
            vec!["fine", "film", PHRASE_BOUNDARY, "watch", "twice"]
        );
    }

    #[test]
    fn test_token_cleanup_lowercase_and_strip() {
        let grams = tokenize_reviews(&strings(&["LOVED don't stop"]), 2);
        assert!(grams[0].contains(&"loved dont".to_string()));
    }

    #[test]
    fn test_short_sentence_yields_no_ngrams() {
        let grams = tokenize_reviews(&strings(&["apples"]), 2);
        assert!(grams[0].is_empty());
    }

    #[test]
    fn test_trigrams() {
        let grams = tokenize_reviews(&strings(&["one two three four"]), 3);
        assert_eq!(grams[0], vec!["one two three", "two three four"]);
    }
}
