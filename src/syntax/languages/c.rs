//! C grammar.

use super::{hex_digit, identifier, keyword, keywords};
use crate::syntax::grammar::{
    any_char, but, ch, choice, highlight, one_or_more, optional, range, repetition, sequence,
    text, Expr, Grammar, Style,
};

const KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default", "goto", "break",
    "continue", "return", "struct", "enum", "union", "typedef", "const", "static",
    "extern", "inline",
];

const TYPES: &[&str] = &[
    "void", "char", "short", "int", "long", "float", "double", "unsigned", "signed",
];

pub(super) fn comment() -> Expr {
    choice![
        sequence![text("/*"), repetition(but(text("*/"))), optional(text("*/"))],
        sequence![text("//"), repetition(but(ch('\n')))],
    ]
}

pub(super) fn escape() -> Expr {
    sequence![ch('\\'), any_char()]
}

fn encoding_prefix() -> Expr {
    optional(choice![ch('L'), text("u8"), ch('u'), ch('U')])
}

pub(super) fn string() -> Expr {
    sequence![
        encoding_prefix(),
        ch('"'),
        repetition(choice![escape(), but(choice![ch('"'), ch('\n')])]),
        optional(ch('"')),
    ]
}

fn character() -> Expr {
    sequence![
        encoding_prefix(),
        ch('\''),
        repetition(choice![escape(), but(choice![ch('\''), ch('\n')])]),
        optional(ch('\'')),
    ]
}

fn digits() -> Expr {
    sequence![
        range('0', '9'),
        repetition(sequence![optional(ch('\'')), range('0', '9')]),
    ]
}

fn hex_digits() -> Expr {
    sequence![
        hex_digit(),
        repetition(sequence![optional(ch('\'')), hex_digit()]),
    ]
}

fn binary_digits() -> Expr {
    sequence![
        range('0', '1'),
        repetition(sequence![optional(ch('\'')), range('0', '1')]),
    ]
}

fn number() -> Expr {
    sequence![
        choice![
            // hex
            sequence![
                ch('0'),
                choice![ch('x'), ch('X')],
                choice![
                    sequence![hex_digits(), optional(ch('.')), optional(hex_digits())],
                    sequence![ch('.'), hex_digits()],
                ],
                // exponent
                optional(sequence![
                    choice![ch('p'), ch('P')],
                    optional(choice![ch('+'), ch('-')]),
                    digits(),
                ]),
            ],
            // binary
            sequence![ch('0'), choice![ch('b'), ch('B')], binary_digits()],
            // decimal or octal
            sequence![
                choice![
                    sequence![digits(), optional(ch('.')), optional(digits())],
                    sequence![ch('.'), digits()],
                ],
                // exponent
                optional(sequence![
                    choice![ch('e'), ch('E')],
                    optional(choice![ch('+'), ch('-')]),
                    digits(),
                ]),
            ],
        ],
        // suffix
        repetition(choice![ch('u'), ch('U'), ch('l'), ch('L'), ch('f'), ch('F')]),
    ]
}

fn operator_chars() -> Expr {
    choice![
        ch('+'),
        ch('-'),
        ch('*'),
        ch('/'),
        ch('%'),
        ch('='),
        ch('!'),
        ch('<'),
        ch('>'),
        ch('&'),
        ch('|'),
        ch('^'),
        ch('~'),
        ch('?'),
        ch(':'),
        ch('.'),
    ]
}

pub(super) fn grammar() -> Grammar {
    Grammar::new(repetition(choice![
        // comments
        highlight(Style::Comment, comment()),
        // strings and characters
        highlight(Style::Word, highlight(Style::Str, string())),
        highlight(Style::Word, highlight(Style::Str, character())),
        // numbers
        highlight(Style::Word, highlight(Style::Literal, number())),
        // keywords
        highlight(Style::Word, highlight(Style::Keyword, keywords(KEYWORDS))),
        // operators
        highlight(Style::Word, highlight(Style::Operator, keyword(text("sizeof")))),
        highlight(Style::Word, highlight(Style::Operator, one_or_more(operator_chars()))),
        // types
        highlight(Style::Word, highlight(Style::Type, keywords(TYPES))),
        // identifiers
        highlight(Style::Word, identifier()),
        any_char(),
    ]))
}
