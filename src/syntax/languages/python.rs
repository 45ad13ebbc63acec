//! Python grammar.

use super::{c, identifier, keywords};
use crate::syntax::grammar::{
    any_char, but, ch, choice, highlight, optional, repetition, sequence, Expr, Grammar, Style,
};

const KEYWORDS: &[&str] = &[
    "lambda", "and", "or", "not", "if", "elif", "else", "for", "in", "while", "break",
    "continue", "return", "def", "class",
];

fn comment() -> Expr {
    sequence![ch('#'), repetition(but(ch('\n')))]
}

fn string() -> Expr {
    choice![
        sequence![
            ch('\''),
            repetition(choice![c::escape(), but(choice![ch('\''), ch('\n')])]),
            optional(ch('\'')),
        ],
        sequence![
            ch('"'),
            repetition(choice![c::escape(), but(choice![ch('"'), ch('\n')])]),
            optional(ch('"')),
        ],
    ]
}

pub(super) fn grammar() -> Grammar {
    Grammar::new(repetition(choice![
        // comments
        highlight(Style::Comment, comment()),
        // strings
        highlight(Style::Word, highlight(Style::Str, string())),
        // keywords
        highlight(Style::Word, highlight(Style::Keyword, keywords(KEYWORDS))),
        // identifiers
        highlight(Style::Word, identifier()),
        any_char(),
    ]))
}
