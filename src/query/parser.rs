// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The Query Parser: CNF-with-negation and quoted-phrase grammars (spec
//! §4.6).
//!
//! ```text
//! Query       := PhraseQuery | CnfQuery
//! PhraseQuery := '"' Term (' ' Term)* '"'
//! CnfQuery    := Clause (' ' Clause)*
//! Clause      := Term ('|' Term)*
//! Term        := ('~')? Word
//! ```

use crate::error::{EngineError, Result};

/// One term in a CNF clause: a word with its negation flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub word: String,
    pub negated: bool,
}

impl Term {
    fn parse(raw: &str) -> Term {
        match raw.strip_prefix('~') {
            Some(word) => Term {
                word: word.to_string(),
                negated: true,
            },
            None => Term {
                word: raw.to_string(),
                negated: false,
            },
        }
    }
}

/// A parsed query: either a CNF clause list or a phrase's term sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Cnf(Vec<Vec<Term>>),
    Phrase(Vec<Term>),
}

impl Query {
    /// Parse raw query text per the grammar above.
    pub fn parse(text: &str) -> Result<Query> {
        let trimmed = text.trim();
        if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
            Self::parse_phrase(trimmed)
        } else {
            Ok(Self::parse_cnf(trimmed))
        }
    }

    fn parse_phrase(trimmed: &str) -> Result<Query> {
        let inner = &trimmed[1..trimmed.len() - 1];
        let terms: Vec<Term> = inner
            .split(' ')
            .filter(|s| !s.is_empty())
            .map(Term::parse)
            .collect();
        if terms.is_empty() {
            return Err(EngineError::EmptyQuery);
        }
        Ok(Query::Phrase(terms))
    }

    fn parse_cnf(trimmed: &str) -> Query {
        let clauses: Vec<Vec<Term>> = trimmed
            .split(' ')
            .filter(|s| !s.is_empty())
            .map(|clause| clause.split('|').map(Term::parse).collect())
            .collect();
        Query::Cnf(clauses)
    }

    /// Every term's word with any leading `~` already stripped, in input
    /// order (spec §4.6's `get_words`).
    pub fn get_words(&self) -> Vec<&str> {
        match self {
            Query::Cnf(clauses) => clauses
                .iter()
                .flat_map(|clause| clause.iter().map(|t| t.word.as_str()))
                .collect(),
            Query::Phrase(terms) => terms.iter().map(|t| t.word.as_str()).collect(),
        }
    }
}
