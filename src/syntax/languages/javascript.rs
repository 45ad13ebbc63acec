//! JavaScript grammar.

use super::{c, hex_digit};
use crate::syntax::grammar::{
    any_char, but, ch, choice, highlight, not, one_or_more, optional, range, repetition,
    sequence, text, Expr, Grammar, Style,
};

const KEYWORDS: &[&str] = &[
    "function", "this", "var", "let", "const", "if", "else", "for", "in", "of", "while",
    "do", "switch", "case", "default", "break", "continue", "try", "catch", "finally",
    "throw", "return", "new", "class", "extends", "static", "import", "export",
];

// JavaScript identifiers admit `$` on top of the C shape.

fn identifier_begin_char() -> Expr {
    choice![range('a', 'z'), range('A', 'Z'), ch('$'), ch('_')]
}

fn identifier_char() -> Expr {
    choice![range('a', 'z'), range('A', 'Z'), ch('$'), ch('_'), range('0', '9')]
}

fn identifier() -> Expr {
    sequence![identifier_begin_char(), repetition(identifier_char())]
}

fn keyword(token: Expr) -> Expr {
    sequence![token, not(identifier_char())]
}

fn keywords(words: &[&'static str]) -> Expr {
    Expr::Choice(words.iter().map(|w| keyword(text(w))).collect())
}

fn string() -> Expr {
    choice![
        sequence![
            ch('"'),
            repetition(choice![c::escape(), but(choice![ch('"'), ch('\n')])]),
            optional(ch('"')),
        ],
        sequence![
            ch('\''),
            repetition(choice![c::escape(), but(choice![ch('\''), ch('\n')])]),
            optional(ch('\'')),
        ],
        // template literals span lines and have no escapes worth modelling
        sequence![ch('`'), repetition(but(ch('`'))), optional(ch('`'))],
    ]
}

fn number() -> Expr {
    sequence![
        choice![
            // hex
            sequence![ch('0'), choice![ch('x'), ch('X')], one_or_more(hex_digit())],
            // binary
            sequence![ch('0'), choice![ch('b'), ch('B')], one_or_more(range('0', '1'))],
            // octal
            sequence![ch('0'), choice![ch('o'), ch('O')], one_or_more(range('0', '7'))],
            // decimal
            sequence![
                choice![
                    sequence![
                        one_or_more(range('0', '9')),
                        optional(ch('.')),
                        repetition(range('0', '9')),
                    ],
                    sequence![ch('.'), one_or_more(range('0', '9'))],
                ],
                // exponent
                optional(sequence![
                    choice![ch('e'), ch('E')],
                    optional(choice![ch('+'), ch('-')]),
                    one_or_more(range('0', '9')),
                ]),
            ],
        ],
        // suffix
        optional(ch('n')),
    ]
}

/// `function` declarations get their name styled.
fn function_declaration() -> Expr {
    sequence![
        highlight(Style::Word, highlight(Style::Keyword, keyword(text("function")))),
        one_or_more(ch(' ')),
        highlight(Style::Word, highlight(Style::Function, identifier())),
    ]
}

pub(super) fn grammar() -> Grammar {
    Grammar::new(repetition(choice![
        // comments
        highlight(Style::Comment, c::comment()),
        // strings
        highlight(Style::Word, highlight(Style::Str, string())),
        // numbers
        highlight(Style::Literal, number()),
        // literals
        highlight(Style::Literal, keywords(&["null", "false", "true"])),
        // function declarations, before the bare keyword alternative
        function_declaration(),
        // keywords
        highlight(Style::Keyword, keywords(KEYWORDS)),
        // identifiers
        identifier(),
        any_char(),
    ]))
}
