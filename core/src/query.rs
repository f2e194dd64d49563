//! Boolean queries: parsing, validation and scoring.
//!
//! A query is a disjunction of conjunctions. `and` binds tighter than `or`
//! and is implied between adjacent words, so `a b or c` means
//! `(a and b) or c`. A conjunction scores the minimum count of its words in
//! each document; disjuncts are summed.

use std::fmt;

use thiserror::Error;

use crate::{Index, PostingSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Term(String),
    And,
    Or,
}

impl Token {
    fn from_word(word: &str) -> Self {
        match word.to_lowercase().as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            other => Token::Term(other.to_string()),
        }
    }

    pub fn is_operator(&self) -> bool { !matches!(self, Token::Term(_)) }

    pub fn as_str(&self) -> &str {
        match self {
            Token::Term(t) => t,
            Token::And => "and",
            Token::Or => "or",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("bad character '{0}' in query")]
    IllegalCharacter(char),
    #[error("empty query")]
    Empty,
    #[error("'{0}' cannot be first")]
    LeadingOperator(Token),
    #[error("'{0}' cannot be last")]
    TrailingOperator(Token),
    #[error("'{0}' and '{1}' cannot be adjacent")]
    AdjacentOperators(Token, Token),
}

/// A validated token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    tokens: Vec<Token>,
}

impl Query {
    pub fn parse(line: &str) -> Result<Self, QueryError> {
        if let Some(c) = line.chars().find(|c| !c.is_alphabetic() && !c.is_whitespace()) {
            return Err(QueryError::IllegalCharacter(c));
        }
        let tokens: Vec<Token> = line.split_whitespace().map(Token::from_word).collect();

        let (first, last) = match (tokens.first(), tokens.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(QueryError::Empty),
        };
        if first.is_operator() {
            return Err(QueryError::LeadingOperator(first.clone()));
        }
        if last.is_operator() {
            return Err(QueryError::TrailingOperator(last.clone()));
        }
        if let Some(pair) = tokens.windows(2).find(|w| w[0].is_operator() && w[1].is_operator()) {
            return Err(QueryError::AdjacentOperators(pair[0].clone(), pair[1].clone()));
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] { &self.tokens }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Term(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Documents present in both sets, each scored by the smaller count.
pub fn intersect(acc: PostingSet, other: PostingSet) -> PostingSet {
    acc.into_iter()
        .map(|(doc_id, count)| (doc_id, count.min(other.get(doc_id))))
        .collect()
}

/// Documents present in either set, counts summed.
pub fn union(mut acc: PostingSet, other: PostingSet) -> PostingSet {
    for (doc_id, count) in other {
        acc.add(doc_id, count);
    }
    acc
}

/// Score `query` against `index`. `None` means no document matched.
pub fn score(index: &Index, query: &Query) -> Option<PostingSet> {
    let mut any = PostingSet::new();
    let mut all: Option<PostingSet> = None;
    // set once a word of the current conjunction is missing from the index
    let mut dead = false;

    for token in query.tokens() {
        match token {
            Token::Or => {
                if let Some(clause) = all.take() {
                    any = union(any, clause);
                }
                dead = false;
            }
            Token::And => {}
            Token::Term(_) if dead => {}
            Token::Term(word) => match index.find(word) {
                None => {
                    dead = true;
                    all = None;
                }
                Some(set) => {
                    let copy = set.clone();
                    all = Some(match all.take() {
                        None => copy,
                        Some(acc) => intersect(acc, copy),
                    });
                }
            },
        }
    }
    if let Some(clause) = all {
        any = union(any, clause);
    }

    if any.is_empty() { None } else { Some(any) }
}
