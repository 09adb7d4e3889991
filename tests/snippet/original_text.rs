//! Snippets are shown from the original text when there is one.

use crate::common::{hl, tokens};
use findkit::{extract_snippet, tokenize};
use findkit::testing::RAVEN;

#[test]
fn punctuation_and_case_come_back() {
    let toks = tokenize(RAVEN);
    let snippet = extract_snippet(&toks, Some(RAVEN), "pondered", 40);
    assert!(
        snippet.starts_with(&format!("Once upon a midnight dreary, while I {}, weak", hl("pondered"))),
        "{}",
        snippet
    );
}

#[test]
fn highlighting_ignores_case() {
    let toks = tokens("spiritus mundi troubles my sight");
    let original = "Spiritus Mundi troubles my sight";
    let snippet = extract_snippet(&toks, Some(original), "\"Spiritus Mundi\"", 40);
    assert_eq!(
        snippet,
        format!("{} {} troubles my sight", hl("Spiritus"), hl("Mundi"))
    );
}

#[test]
fn mid_word_occurrences_are_not_highlighted() {
    let toks = tokens("the falcon cannot hear the falconer");
    let original = "The falcon cannot hear the falconer;";
    let snippet = extract_snippet(&toks, Some(original), "falcon", 40);
    assert_eq!(snippet.matches("<strong").count(), 1);
    assert!(snippet.ends_with("falconer"), "{}", snippet);
}

#[test]
fn markup_in_original_text_is_escaped() {
    let toks = tokens("tom jerry are friends");
    let original = "Tom & Jerry <are> friends";
    let snippet = extract_snippet(&toks, Some(original), "jerry", 40);
    assert_eq!(
        snippet,
        format!("Tom &amp; {} &lt;are&gt; friends", hl("Jerry"))
    );
}

#[test]
fn tokens_are_used_when_the_original_does_not_match() {
    let toks = tokens("the raven sat");
    let snippet = extract_snippet(&toks, Some("Something else entirely."), "raven", 40);
    assert_eq!(snippet, format!("the {} sat", hl("raven")));
}

#[test]
fn line_breaks_in_the_original_collapse_to_spaces() {
    let toks = tokens("turning and turning in the widening gyre");
    let original = "Turning and turning\n    in the widening gyre";
    let snippet = extract_snippet(&toks, Some(original), "gyre", 40);
    assert_eq!(snippet, format!("Turning and turning in the widening {}", hl("gyre")));
}

#[test]
#[cfg(feature = "unicode-normalization")]
fn accented_originals_keep_case_accents_and_punctuation() {
    let original = "Le Café, au lait. Très bien!";
    let toks = tokenize(original);
    assert_eq!(toks, tokens("le cafe au lait tres bien"));

    let snippet = extract_snippet(&toks, Some(original), "lait", 40);
    assert_eq!(snippet, format!("Le Café, au {}. Très bien", hl("lait")));

    let snippet = extract_snippet(&toks, Some(original), "café", 40);
    assert_eq!(snippet, format!("Le {}, au lait. Très bien", hl("Café")));
}
