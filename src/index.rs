// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The full-text index capability the engine reads from.
//!
//! The engine never owns an index. The host hands in something implementing
//! [`FullTextIndex`]: it answers ranked queries and returns the stored token
//! stream for a row. [`MemoryIndex`] is a small in-process implementation used
//! by the CLI, tests and benches.
//!
//! Ranked queries are the only blocking call on the render path, so
//! [`query_with_timeout`] runs them on a worker thread with a deadline. A
//! worker that misses its deadline cannot be cancelled and keeps running
//! until the index answers; [`WorkerLimit`] caps how many of those may pile
//! up before new ranked queries are refused.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::snippet::terms::{has_wildcard, wildcard_regex};
use crate::types::{Content, Rid};
use crate::utils::{normalize, tokenize};

/// One ranked row: which item, and how relevant it is to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    pub rid: Rid,
    pub score: f64,
}

/// Per-row data stored by the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexData {
    /// Normalized word tokens, starting with the content id and title words.
    pub fulltext: Vec<String>,
}

/// Read-only full-text index capability.
///
/// Implementations must be safe for concurrent reads; the engine never
/// mutates them.
pub trait FullTextIndex: Send + Sync {
    /// Rows matching `query`, score-descending, at most `max_rows` of them.
    ///
    /// Malformed query syntax is reported as [`IndexError::Parse`].
    fn query(&self, query: &str, max_rows: usize) -> Result<Vec<RankedRow>, IndexError>;

    /// Stored data for a row, or `None` for rows without text.
    fn index_data(&self, rid: Rid) -> Option<IndexData>;
}

/// Ranking workers allowed to run at once by default.
pub const DEFAULT_MAX_PENDING_QUERIES: usize = 4;

/// Caps the ranking worker threads alive at once.
///
/// Clones share the count, so one limit handed to every page render bounds
/// the workers a stalled index can strand across all of them.
#[derive(Debug, Clone)]
pub struct WorkerLimit {
    pending: Arc<AtomicUsize>,
    max: usize,
}

impl WorkerLimit {
    pub fn new(max: usize) -> Self {
        WorkerLimit {
            pending: Arc::new(AtomicUsize::new(0)),
            max,
        }
    }

    /// Workers started and not yet finished.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> Option<WorkerSlot> {
        self.pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| (n < self.max).then_some(n + 1))
            .ok()
            .map(|_| WorkerSlot(Arc::clone(&self.pending)))
    }
}

impl Default for WorkerLimit {
    fn default() -> Self {
        WorkerLimit::new(DEFAULT_MAX_PENDING_QUERIES)
    }
}

/// Held by a running worker; releases its place on drop, panics included.
struct WorkerSlot(Arc<AtomicUsize>);

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Run a ranked query, giving up after `timeout`.
///
/// Without a timeout the query runs inline. With one, it runs on a worker
/// thread; a late answer is dropped, but the thread lives until the index
/// returns. While `workers` is at its limit no new worker is started and the
/// query fails with [`IndexError::Unavailable`].
pub fn query_with_timeout(
    index: &Arc<dyn FullTextIndex>,
    query: &str,
    max_rows: usize,
    timeout: Option<Duration>,
    workers: &WorkerLimit,
) -> Result<Vec<RankedRow>, IndexError> {
    let Some(timeout) = timeout else {
        return index.query(query, max_rows);
    };

    let slot = workers.acquire().ok_or_else(|| {
        IndexError::Unavailable(format!(
            "{} ranking queries still running",
            workers.pending()
        ))
    })?;

    let (tx, rx) = channel();
    let worker = Arc::clone(index);
    let query = query.to_string();
    thread::Builder::new()
        .name("findkit-ranking".to_string())
        .spawn(move || {
            let _slot = slot;
            // Receiver may be gone after a timeout; nothing to do then.
            let _ = tx.send(worker.query(&query, max_rows));
        })
        .map_err(|e| IndexError::Unavailable(e.to_string()))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(IndexError::Timeout(timeout.as_millis() as u64)),
        Err(RecvTimeoutError::Disconnected) => Err(IndexError::Unavailable(
            "ranking worker exited without an answer".to_string(),
        )),
    }
}

// =============================================================================
// IN-MEMORY INDEX
// =============================================================================

/// In-process index over tokenized documents.
///
/// Query syntax: bare terms, `"quoted phrases"`, `?`/`*` wildcards, `AND`,
/// `OR`, `NOT` and parentheses. Adjacent operands are implicitly ANDed.
/// Scores are hit counts.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    rows: BTreeMap<Rid, Vec<String>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-tokenized text for a row.
    pub fn insert_tokens(&mut self, rid: impl Into<Rid>, tokens: Vec<String>) {
        self.rows.insert(rid.into(), tokens);
    }

    /// Tokenize and store `text` for a row.
    pub fn insert_text(&mut self, rid: impl Into<Rid>, text: &str) {
        self.insert_tokens(rid, tokenize(text));
    }

    /// Store a content object the way a catalog does: id words, title words,
    /// then the body tokens.
    pub fn insert_content(&mut self, rid: impl Into<Rid>, content: &Content, body: &str) {
        let mut tokens: Vec<String> = content
            .id
            .split_whitespace()
            .chain(content.title.split_whitespace())
            .map(normalize)
            .collect();
        tokens.extend(tokenize(body));
        self.insert_tokens(rid, tokens);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FullTextIndex for MemoryIndex {
    fn query(&self, query: &str, max_rows: usize) -> Result<Vec<RankedRow>, IndexError> {
        let lexemes = lex(query)?;
        if lexemes.is_empty() {
            return Ok(Vec::new());
        }
        let node = Parser::new(lexemes).parse()?;

        let mut rows: Vec<RankedRow> = self
            .rows
            .iter()
            .filter_map(|(rid, tokens)| {
                let hits = node.hits(tokens);
                (hits > 0).then(|| RankedRow {
                    rid: *rid,
                    score: hits as f64,
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.rid.cmp(&b.rid))
        });
        rows.truncate(max_rows);
        Ok(rows)
    }

    fn index_data(&self, rid: Rid) -> Option<IndexData> {
        self.rows.get(&rid).map(|tokens| IndexData {
            fulltext: tokens.clone(),
        })
    }
}

// =============================================================================
// QUERY PARSING
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Lexeme {
    Word(String),
    Phrase(Vec<String>),
    And,
    Or,
    Not,
    Open,
    Close,
}

fn lex(query: &str) -> Result<Vec<Lexeme>, IndexError> {
    let mut lexemes = Vec::new();
    let mut chars = query.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                lexemes.push(Lexeme::Open);
            }
            ')' => {
                chars.next();
                lexemes.push(Lexeme::Close);
            }
            '"' => {
                chars.next();
                let mut phrase = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    phrase.push(c);
                }
                if !closed {
                    return Err(IndexError::Parse("unbalanced quote".to_string()));
                }
                let tokens = tokenize(&phrase);
                if !tokens.is_empty() {
                    lexemes.push(Lexeme::Phrase(tokens));
                }
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | '"') {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                match word.as_str() {
                    "AND" => lexemes.push(Lexeme::And),
                    "OR" => lexemes.push(Lexeme::Or),
                    "NOT" => lexemes.push(Lexeme::Not),
                    _ if has_wildcard(&word) => lexemes.push(Lexeme::Word(normalize(&word))),
                    _ => {
                        let mut tokens = tokenize(&word);
                        match tokens.len() {
                            0 => {}
                            1 => lexemes.push(Lexeme::Word(tokens.remove(0))),
                            _ => lexemes.push(Lexeme::Phrase(tokens)),
                        }
                    }
                }
            }
        }
    }
    Ok(lexemes)
}

enum Node {
    Term(String),
    Glob(Regex),
    Phrase(Vec<String>),
    And { all: Vec<Node>, none: Vec<Node> },
    Or(Vec<Node>),
}

impl Node {
    fn hits(&self, tokens: &[String]) -> usize {
        match self {
            Node::Term(term) => tokens.iter().filter(|t| *t == term).count(),
            Node::Glob(re) => tokens.iter().filter(|t| re.is_match(t)).count(),
            Node::Phrase(words) => tokens
                .windows(words.len())
                .filter(|window| window == words)
                .count(),
            Node::And { all, none } => {
                if none.iter().any(|node| node.hits(tokens) > 0) {
                    return 0;
                }
                let mut total = 0;
                for node in all {
                    let hits = node.hits(tokens);
                    if hits == 0 {
                        return 0;
                    }
                    total += hits;
                }
                total
            }
            Node::Or(branches) => branches.iter().map(|node| node.hits(tokens)).sum(),
        }
    }
}

/// Deepest parenthesis nesting a query may use.
const MAX_NESTING: usize = 64;

struct Parser {
    lexemes: Vec<Lexeme>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(lexemes: Vec<Lexeme>) -> Self {
        Parser {
            lexemes,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn eat(&mut self, expected: &Lexeme) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse(mut self) -> Result<Node, IndexError> {
        let node = self.parse_or()?;
        match self.peek() {
            None => Ok(node),
            Some(Lexeme::Close) => Err(IndexError::Parse("unexpected ')'".to_string())),
            Some(other) => Err(IndexError::Parse(format!("unexpected {:?}", other))),
        }
    }

    fn parse_or(&mut self) -> Result<Node, IndexError> {
        let mut branches = vec![self.parse_and()?];
        while self.eat(&Lexeme::Or) {
            branches.push(self.parse_and()?);
        }
        Ok(if branches.len() == 1 {
            branches.remove(0)
        } else {
            Node::Or(branches)
        })
    }

    fn parse_and(&mut self) -> Result<Node, IndexError> {
        let mut all = Vec::new();
        let mut none = Vec::new();

        loop {
            match self.peek() {
                None | Some(Lexeme::Or) | Some(Lexeme::Close) => break,
                Some(Lexeme::And) => {
                    self.pos += 1;
                    if !self.operand_follows() {
                        return Err(IndexError::Parse("dangling AND".to_string()));
                    }
                    continue;
                }
                _ => {}
            }

            let negated = self.eat(&Lexeme::Not);
            if negated && !self.operand_follows() {
                return Err(IndexError::Parse("dangling NOT".to_string()));
            }
            let node = self.parse_atom()?;
            if negated {
                none.push(node);
            } else {
                all.push(node);
            }
        }

        if all.is_empty() {
            let reason = if none.is_empty() {
                "expected a term"
            } else {
                "query has only negative terms"
            };
            return Err(IndexError::Parse(reason.to_string()));
        }
        if all.len() == 1 && none.is_empty() {
            return Ok(all.remove(0));
        }
        Ok(Node::And { all, none })
    }

    fn operand_follows(&self) -> bool {
        matches!(
            self.peek(),
            Some(Lexeme::Word(_)) | Some(Lexeme::Phrase(_)) | Some(Lexeme::Open) | Some(Lexeme::Not)
        )
    }

    fn parse_atom(&mut self) -> Result<Node, IndexError> {
        let lexeme = self
            .lexemes
            .get(self.pos)
            .cloned()
            .ok_or_else(|| IndexError::Parse("unexpected end of query".to_string()))?;
        self.pos += 1;

        match lexeme {
            Lexeme::Word(word) if has_wildcard(&word) => wildcard_regex(&word)
                .map(Node::Glob)
                .map_err(|e| IndexError::Parse(e.to_string())),
            Lexeme::Word(word) => Ok(Node::Term(word)),
            Lexeme::Phrase(words) => Ok(Node::Phrase(words)),
            Lexeme::Open => {
                if self.depth >= MAX_NESTING {
                    return Err(IndexError::Parse("query nested too deeply".to_string()));
                }
                self.depth += 1;
                let node = self.parse_or()?;
                self.depth -= 1;
                if !self.eat(&Lexeme::Close) {
                    return Err(IndexError::Parse("unbalanced '('".to_string()));
                }
                Ok(node)
            }
            other => Err(IndexError::Parse(format!("unexpected {:?}", other))),
        }
    }
}
