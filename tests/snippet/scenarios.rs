//! The reference scenarios: lead, centered window, merged window.

use crate::common::{hl, numbered_tokens, tokens, visible_words};
use findkit::extract_snippet;

#[test]
fn empty_query_shows_the_lead_with_trailing_ellipsis() {
    let toks = tokens("the raven sat upon the bust");
    assert_eq!(extract_snippet(&toks, None, "", 4), "the raven sat upon …");
}

#[test]
fn lead_has_no_ellipsis_when_everything_fits() {
    let toks = tokens("the raven sat upon the bust");
    assert_eq!(extract_snippet(&toks, None, "", 6), "the raven sat upon the bust");
}

#[test]
fn single_term_is_centered_with_ellipses_on_both_ends() {
    let mut toks = numbered_tokens(100);
    toks[50] = "gold".to_string();

    let snippet = extract_snippet(&toks, None, "gold", 40);
    assert!(snippet.starts_with("… w30 "), "{}", snippet);
    assert!(snippet.ends_with(" w70 …"), "{}", snippet);
    assert!(snippet.contains(&format!("w49 {} w51", hl("gold"))));
    assert_eq!(snippet.matches('…').count(), 2);
    assert_eq!(visible_words(&snippet, "…"), 41);
}

#[test]
fn close_terms_share_one_padded_window() {
    let mut toks = numbered_tokens(100);
    toks[50] = "alpha".to_string();
    toks[53] = "omega".to_string();

    let snippet = extract_snippet(&toks, None, "alpha omega", 40);
    // span 3, padding (40 - 3) / 2 = 18 on each side: tokens 32..71
    assert!(snippet.starts_with("… w32 "), "{}", snippet);
    assert!(snippet.ends_with(" w70 …"), "{}", snippet);
    assert_eq!(snippet.matches('…').count(), 2);
    assert!(snippet.contains(&format!("{} w51 w52 {}", hl("alpha"), hl("omega"))));
}

#[test]
fn distant_terms_get_separate_windows_in_text_order() {
    let mut toks = numbered_tokens(200);
    toks[150] = "omega".to_string();
    toks[20] = "alpha".to_string();

    // Query order is reversed on purpose; output follows the text.
    let snippet = extract_snippet(&toks, None, "omega alpha", 40);
    let alpha = snippet.find(&hl("alpha")).unwrap();
    let omega = snippet.find(&hl("omega")).unwrap();
    assert!(alpha < omega);
    assert_eq!(snippet.matches('…').count(), 3);
    assert!(snippet.contains("w30 … w140"), "{}", snippet);
}

#[test]
fn term_near_the_start_slides_the_window_right() {
    let mut toks = numbered_tokens(100);
    toks[2] = "gold".to_string();

    let snippet = extract_snippet(&toks, None, "gold", 40);
    assert!(snippet.starts_with(&format!("w0 w1 {}", hl("gold"))), "{}", snippet);
    assert!(snippet.ends_with(" w40 …"), "{}", snippet);
}

#[test]
fn term_near_the_end_has_no_trailing_ellipsis() {
    let mut toks = numbered_tokens(100);
    toks[98] = "gold".to_string();

    let snippet = extract_snippet(&toks, None, "gold", 40);
    assert!(snippet.starts_with("… w78 "), "{}", snippet);
    assert!(snippet.ends_with(" w99"), "{}", snippet);
}
