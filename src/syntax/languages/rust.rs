//! Rust grammar.

use super::{c, hex_digit, identifier, keyword, keywords};
use crate::syntax::grammar::{
    any_char, but, ch, choice, highlight, one_or_more, optional, range, repetition, rule,
    sequence, text, Expr, Grammar, Style,
};

const KEYWORDS: &[&str] = &[
    "let", "mut", "if", "else", "while", "for", "in", "loop", "match", "break",
    "continue", "return", "fn", "struct", "enum", "trait", "type", "impl", "where",
    "pub", "use", "mod",
];

// Block comments nest, so the rule refers to itself.
const BLOCK_COMMENT: usize = 0;

fn block_comment() -> Expr {
    sequence![
        text("/*"),
        repetition(choice![rule(BLOCK_COMMENT), but(text("*/"))]),
        optional(text("*/")),
    ]
}

fn string() -> Expr {
    // Strings may span lines.
    sequence![
        ch('"'),
        repetition(choice![c::escape(), but(ch('"'))]),
        optional(ch('"')),
    ]
}

fn digits() -> Expr {
    sequence![
        range('0', '9'),
        repetition(sequence![optional(ch('_')), range('0', '9')]),
    ]
}

fn number() -> Expr {
    choice![
        sequence![
            ch('0'),
            choice![ch('x'), ch('X')],
            one_or_more(choice![hex_digit(), ch('_')]),
        ],
        sequence![
            ch('0'),
            choice![ch('b'), ch('B')],
            one_or_more(choice![range('0', '1'), ch('_')]),
        ],
        sequence![digits(), optional(ch('.')), optional(digits())],
    ]
}

fn types() -> Expr {
    choice![
        keyword(text("bool")),
        keyword(text("char")),
        keyword(sequence![
            choice![ch('u'), ch('i')],
            choice![text("8"), text("16"), text("32"), text("64"), text("128"), text("size")],
        ]),
        keyword(sequence![ch('f'), choice![text("32"), text("64")]]),
        keyword(text("str")),
    ]
}

/// `fn` declarations get their name styled as a function.
fn fn_declaration() -> Expr {
    sequence![
        highlight(Style::Word, highlight(Style::Keyword, keyword(text("fn")))),
        one_or_more(ch(' ')),
        highlight(Style::Word, highlight(Style::Function, identifier())),
    ]
}

pub(super) fn grammar() -> Grammar {
    let top = repetition(choice![
        // comments
        highlight(
            Style::Comment,
            choice![
                rule(BLOCK_COMMENT),
                sequence![text("//"), repetition(but(ch('\n')))],
            ],
        ),
        // strings
        highlight(Style::Word, highlight(Style::Str, string())),
        // numbers
        highlight(Style::Word, highlight(Style::Literal, number())),
        // literals
        highlight(Style::Word, highlight(Style::Literal, keywords(&["false", "true"]))),
        // function declarations, before the bare keyword alternative
        fn_declaration(),
        // keywords
        highlight(Style::Word, highlight(Style::Keyword, keywords(KEYWORDS))),
        // types
        highlight(Style::Word, highlight(Style::Type, types())),
        // identifiers
        highlight(Style::Word, identifier()),
        any_char(),
    ]);
    Grammar::with_rules(vec![block_comment()], top)
}
