use super::*;

fn minimal_json() -> &'static str {
    r#"{
        "topic": "standing desks",
        "search_terms": ["standing desk", "sit stand desk"],
        "subreddits": ["BuyItForLife", "HomeOffice"]
    }"#
}

#[test]
fn minimal_config_gets_defaults() {
    let config = parse_research_config(minimal_json()).unwrap();
    assert_eq!(config.topic, "standing desks");
    assert_eq!(config.limits.posts, 50);
    assert_eq!(config.limits.comments, 3);
    assert!(config.include_all_reddit);
    assert_eq!(config.all_reddit_limit, 10);
    assert!(config.entities_to_track.is_empty());
    assert!(config
        .keywords_positive
        .iter()
        .any(|k| k == "game changer"));
    assert!(config.keywords_negative.iter().any(|k| k == "toxic"));
}

#[test]
fn explicit_fields_override_defaults() {
    let json = r#"{
        "topic": "t",
        "search_terms": ["a"],
        "subreddits": ["s"],
        "entities_to_track": ["Brand X"],
        "keywords_positive": ["nice"],
        "keywords_negative": ["nasty"],
        "limits": {"posts": 5, "comments": 1},
        "include_all_reddit": false,
        "all_reddit_limit": 2
    }"#;
    let config = parse_research_config(json).unwrap();
    assert_eq!(config.limits.posts, 5);
    assert_eq!(config.limits.comments, 1);
    assert!(!config.include_all_reddit);
    assert_eq!(config.all_reddit_limit, 2);
    assert_eq!(config.keywords_positive, vec!["nice".to_string()]);
    assert_eq!(config.entities_to_track, vec!["Brand X".to_string()]);
}

#[test]
fn partial_limits_object_fills_missing_field() {
    let json = r#"{
        "topic": "t",
        "search_terms": ["a"],
        "subreddits": ["s"],
        "limits": {"posts": 7}
    }"#;
    let config = parse_research_config(json).unwrap();
    assert_eq!(config.limits.posts, 7);
    assert_eq!(config.limits.comments, 3);
}

#[test]
fn rejects_invalid_json() {
    let result = parse_research_config("not json");
    assert!(matches!(result, Err(ConfigError::ResearchFileParse(_))));
}

#[test]
fn rejects_empty_topic() {
    let json = r#"{"topic": "  ", "search_terms": ["a"], "subreddits": ["s"]}"#;
    let result = parse_research_config(json);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref m)) if m.contains("topic")),
        "expected topic validation error, got: {result:?}"
    );
}

#[test]
fn rejects_missing_search_terms() {
    let json = r#"{"topic": "t", "search_terms": [], "subreddits": ["s"]}"#;
    let result = parse_research_config(json);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref m)) if m.contains("search_terms")),
        "expected search_terms validation error, got: {result:?}"
    );
}

#[test]
fn rejects_empty_subreddit_name() {
    let json = r#"{"topic": "t", "search_terms": ["a"], "subreddits": [""]}"#;
    let result = parse_research_config(json);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref m)) if m.contains("empty names")),
        "expected subreddit validation error, got: {result:?}"
    );
}

#[test]
fn rejects_duplicate_subreddits_case_insensitively() {
    let json = r#"{"topic": "t", "search_terms": ["a"], "subreddits": ["Rust", "rust"]}"#;
    let result = parse_research_config(json);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref m)) if m.contains("duplicate")),
        "expected duplicate-subreddit error, got: {result:?}"
    );
}

#[test]
fn search_term_order_is_preserved() {
    let config = parse_research_config(minimal_json()).unwrap();
    assert_eq!(config.search_terms[0], "standing desk");
    assert_eq!(config.search_terms[1], "sit stand desk");
}
