//! Identifier case transforms.
//!
//! Pure functions over a canonical lowercase word-separated identifier
//! (`basic_math`). Templates reach them through the renderer's pipeline
//! stages; the generator also uses them to pre-compute name variants.
//!
//! ## Word rules
//!
//! Separators are `_`, `-` and ASCII whitespace. Tokens are the maximal runs
//! between separators; empty tokens are dropped, so `a__b` and `_a_b_`
//! tokenize like `a_b`.
//!
//! Capitalisation only touches the *first character* of a token and only if
//! it is an ASCII lowercase letter. Digit-leading tokens are left as they are
//! and everything that is not ASCII passes through untouched:
//!
//! | Input | `to_pascal_case` | `to_title_case` |
//! |-------|------------------|-----------------|
//! | `basic_math` | `BasicMath` | `Basic Math` |
//! | `gpt_4o` | `Gpt4o` | `Gpt 4o` |
//! | `v2_api` | `V2Api` | `V2 Api` |
//! | `2fa_helper` | `2faHelper` | `2fa Helper` |
//! | `""` | `""` | `""` |
//!
//! `to_title_case_from_pascal` does not group acronyms: every uppercase
//! letter after the first starts a word (`HTTPTool` → `H T T P Tool`).
//! Identifiers produced by `to_pascal_case` from a validated plugin name never
//! contain consecutive capitals, so the round trip is exact for them.

fn is_separator(c: char) -> bool {
    c == '_' || c == '-' || c.is_ascii_whitespace()
}

fn tokens(input: &str) -> impl Iterator<Item = &str> {
    input.split(is_separator).filter(|t| !t.is_empty())
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(token.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// `basic_math` → `BasicMath`.
pub fn to_pascal_case(input: &str) -> String {
    tokens(input).map(capitalize).collect()
}

/// `basic_math` → `Basic Math`.
pub fn to_title_case(input: &str) -> String {
    tokens(input).map(capitalize).collect::<Vec<_>>().join(" ")
}

/// `BasicMath` → `Basic Math`.
///
/// Inserts a space before each ASCII uppercase letter that is not the first
/// character and is not already preceded by a space, then trims.
pub fn to_title_case_from_pascal(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;

    for c in input.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p != ' ') {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }

    out.trim().to_string()
}

/// `Basic-Math` → `basic_math`.
pub fn to_snake_case(input: &str) -> String {
    tokens(input)
        .map(|t| t.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `basic_math` → `basic-math`.
pub fn to_kebab_case(input: &str) -> String {
    tokens(input)
        .map(|t| t.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
