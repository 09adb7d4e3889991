//! Wildcard terms are resolved against the item's own tokens.

use crate::common::{highlight_count, hl, numbered_tokens, tokens};
use findkit::extract_snippet;
use findkit::snippet::terms::resolve_terms;

#[test]
fn star_expansion_is_highlighted() {
    let toks = tokens("i saw the figure 5 in gold on a red firetruck");
    let snippet = extract_snippet(&toks, None, "gol*", 40);
    assert!(snippet.contains(&hl("gold")), "{}", snippet);
}

#[test]
fn question_mark_matches_exactly_one_character() {
    let toks = tokens("weak and weary and wary");
    let snippet = extract_snippet(&toks, None, "w?ary", 40);
    assert!(snippet.contains(&hl("weary")));
    assert!(!snippet.contains(&hl("wary")));
}

#[test]
fn every_expansion_is_highlighted_but_the_first_one_anchors_the_window() {
    let mut toks = numbered_tokens(200);
    toks[10] = "gold".to_string();
    toks[12] = "golden".to_string();
    toks[190] = "goldfinch".to_string();

    let resolved = resolve_terms(&["gold*".to_string()], &toks);
    assert_eq!(resolved.match_terms, vec!["gold"]);
    assert_eq!(resolved.highlight_terms, vec!["gold", "golden", "goldfinch"]);

    let snippet = extract_snippet(&toks, None, "gold*", 40);
    assert_eq!(highlight_count(&snippet), 2, "{}", snippet);
    assert!(snippet.contains(&hl("golden")));
}

#[test]
fn unmatched_wildcard_falls_back_to_the_lead() {
    let toks = numbered_tokens(10);
    assert_eq!(extract_snippet(&toks, None, "zz*", 4), "w0 w1 w2 w3 …");
}

#[test]
fn wildcards_are_anchored_to_whole_tokens() {
    let toks = tokens("the marigold bloomed");
    let snippet = extract_snippet(&toks, None, "gol*", 40);
    assert_eq!(highlight_count(&snippet), 0);
}

#[test]
fn regex_metacharacters_are_literal() {
    let toks = tokens("c++ and c# and cxx");
    let resolved = resolve_terms(&["c+*".to_string()], &toks);
    assert_eq!(resolved.highlight_terms, vec!["c++"]);
}
