//! Keyword heuristics over item text.
//!
//! These are deliberately simple substring heuristics, not a language
//! model: presence counting only, with ties always resolving to
//! [`Sentiment::Neutral`].

use redscout_core::{Item, ResearchConfig, Sentiment};

/// Returns the tracked entities mentioned in `text`, preserving the
/// input ordering. Matching is case-insensitive substring containment.
#[must_use]
pub fn find_entities(text: &str, entities: &[String]) -> Vec<String> {
    let text_lower = text.to_lowercase();
    entities
        .iter()
        .filter(|entity| text_lower.contains(&entity.to_lowercase()))
        .cloned()
        .collect()
}

/// Classifies `text` by counting which keywords appear in it.
///
/// Each keyword contributes at most one hit regardless of how often it
/// repeats. Positive iff positive hits exceed negative hits, Negative
/// iff the reverse, Neutral on any tie (including zero–zero).
#[must_use]
pub fn classify_sentiment(text: &str, positive: &[String], negative: &[String]) -> Sentiment {
    let text_lower = text.to_lowercase();
    let hits = |keywords: &[String]| {
        keywords
            .iter()
            .filter(|kw| text_lower.contains(&kw.to_lowercase()))
            .count()
    };

    match hits(positive).cmp(&hits(negative)) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Fills each item's `entities_mentioned` and `sentiment` from its
/// combined title and body text.
pub fn enrich(items: &mut [Item], config: &ResearchConfig) {
    for item in items.iter_mut() {
        let full_text = item.full_text();
        item.entities_mentioned = find_entities(&full_text, &config.entities_to_track);
        item.sentiment = classify_sentiment(
            &full_text,
            &config.keywords_positive,
            &config.keywords_negative,
        );
    }
    tracing::debug!(items = items.len(), "classified items");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn entity_match_is_case_insensitive() {
        assert_eq!(
            find_entities("Great PRODUCT", &kw(&["product"])),
            vec!["product".to_string()]
        );
    }

    #[test]
    fn entities_preserve_input_order() {
        let entities = kw(&["zeta", "alpha"]);
        assert_eq!(
            find_entities("alpha and zeta", &entities),
            vec!["zeta".to_string(), "alpha".to_string()]
        );
    }

    #[test]
    fn unmentioned_entities_are_omitted() {
        assert!(find_entities("nothing here", &kw(&["desk"])).is_empty());
    }

    #[test]
    fn positive_when_positive_hits_exceed_negative() {
        let s = classify_sentiment("this is great and perfect", &kw(&["great", "perfect"]), &kw(&["bad"]));
        assert_eq!(s, Sentiment::Positive);
    }

    #[test]
    fn negative_when_negative_hits_exceed_positive() {
        let s = classify_sentiment("I hate it", &kw(&["great"]), &kw(&["hate"]));
        assert_eq!(s, Sentiment::Negative);
    }

    #[test]
    fn tie_resolves_to_neutral() {
        let s = classify_sentiment("great but terrible", &kw(&["great"]), &kw(&["terrible"]));
        assert_eq!(s, Sentiment::Neutral);
    }

    #[test]
    fn zero_zero_is_neutral() {
        let s = classify_sentiment("nothing notable", &kw(&["great"]), &kw(&["bad"]));
        assert_eq!(s, Sentiment::Neutral);
    }

    #[test]
    fn empty_keyword_lists_are_neutral() {
        assert_eq!(classify_sentiment("anything", &[], &[]), Sentiment::Neutral);
    }

    #[test]
    fn keyword_presence_counts_once_regardless_of_repeats() {
        // "great" three times is still one positive hit; two distinct
        // negative keywords outweigh it.
        let s = classify_sentiment(
            "great great great but bad and terrible",
            &kw(&["great"]),
            &kw(&["bad", "terrible"]),
        );
        assert_eq!(s, Sentiment::Negative);
    }

    #[test]
    fn multi_word_keywords_match_as_substrings() {
        let s = classify_sentiment("it was worth it", &kw(&["worth it"]), &kw(&["waste"]));
        assert_eq!(s, Sentiment::Positive);
    }
}
