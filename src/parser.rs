//! Go declaration parser using nom.
//!
//! Parses just enough of a Go source file to see every type declaration:
//!
//! ```text
//! package models
//!
//! type User struct {
//!     ID             int64
//!     Name           string `db:"name"`
//!     InvitationCode string
//! }
//! ```
//!
//! Imports, type parameters, field types and tags are recognized and
//! dropped. Only struct types and field names make it into the tree.
//!
//! Function bodies and `var`/`const` initializers are skimmed as balanced
//! token runs. Local `type` declarations found while skimming are kept.
//! Skimmed text is not syntax-checked: an invalid statement inside a body
//! is not reported, as long as its brackets, strings and comments balance.
//!
//! Newlines matter in Go: a line break ends a field, a spec or a function
//! signature. [`ws`] crosses lines, [`sp`] never does.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while, take_while1},
    character::complete::{anychar, char, multispace1, satisfy},
    combinator::{cut, eof, map, not, opt, peek, recognize, value, verify},
    error::ErrorKind,
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::ast::*;
use crate::error::{Error, Result};

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Parse a complete Go source file.
pub fn parse(source: &str) -> Result<SourceFile> {
    match parse_source_file(source) {
        Ok((_, file)) => Ok(file),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let offset = source.len() - e.input.len();
            Err(Error::syntax(
                source,
                offset,
                format!("unexpected {}", describe(e.input)),
            ))
        }
        Err(nom::Err::Incomplete(_)) => Err(Error::syntax(
            source,
            source.len(),
            "unexpected end of file",
        )),
    }
}

/// Short description of the token at the start of `rest`.
fn describe(rest: &str) -> String {
    match rest.chars().next() {
        None => "end of file".to_string(),
        Some('\n') => "newline".to_string(),
        Some(c) if is_ident_char(c) => {
            let word: String = rest.chars().take_while(|&c| is_ident_char(c)).collect();
            format!("`{}`", word)
        }
        Some(c) => format!("`{}`", c),
    }
}

/// Parse the package clause, imports and top-level declarations.
fn parse_source_file(input: &str) -> IResult<&str, SourceFile> {
    let (input, _) = opt(char('\u{feff}'))(input)?;
    let (input, _) = ws(input)?;
    let (input, package) = preceded(pair(keyword("package"), sp), name)(input)?;
    let (mut input, _) = terminator(input)?;

    loop {
        let (rest, _) = ws(input)?;
        if peek(keyword("import"))(rest).is_err() {
            input = rest;
            break;
        }
        let (rest, _) = import_decl(rest)?;
        let (rest, _) = terminator(rest)?;
        input = rest;
    }

    let mut decls = Vec::new();
    loop {
        let (rest, _) = ws(input)?;
        if rest.is_empty() {
            input = rest;
            break;
        }
        let (rest, decl) = top_level_decl(rest)?;
        let (rest, _) = terminator(rest)?;
        decls.push(decl);
        input = rest;
    }

    Ok((
        input,
        SourceFile {
            package: package.to_string(),
            decls,
        },
    ))
}

/// Dispatch on the leading keyword so errors point inside the declaration.
fn top_level_decl(input: &str) -> IResult<&str, Decl> {
    let (_, word) = peek(identifier)(input)?;
    match word {
        "type" => map(type_decl, Decl::Type)(input),
        "func" => map(func_decl, Decl::Other)(input),
        "var" | "const" => map(value_decl, Decl::Other)(input),
        _ => Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::Tag))),
    }
}

// =============================================================================
// Declarations
// =============================================================================

/// `import "fmt"` or `import ( ... )`
fn import_decl(input: &str) -> IResult<&str, ()> {
    let (input, _) = keyword("import")(input)?;
    let (input, _) = sp(input)?;

    if let Some(mut input) = input.strip_prefix('(') {
        loop {
            let (rest, _) = ws(input)?;
            if let Some(rest) = rest.strip_prefix(')') {
                return Ok((rest, ()));
            }
            let (rest, _) = import_spec(rest)?;
            let (rest, _) = terminator(rest)?;
            input = rest;
        }
    }

    import_spec(input)
}

/// `"path"`, `alias "path"`, `. "path"` or `_ "path"`
fn import_spec(input: &str) -> IResult<&str, ()> {
    value((), pair(opt(terminated(alt((name, tag("."))), sp)), string_lit))(input)
}

/// `type X ...` or `type ( ... )`.
fn type_decl(input: &str) -> IResult<&str, Vec<TypeSpec>> {
    let (input, _) = keyword("type")(input)?;
    let (input, _) = sp(input)?;

    if let Some(mut input) = input.strip_prefix('(') {
        let mut specs = Vec::new();
        loop {
            let (rest, _) = ws(input)?;
            if let Some(rest) = rest.strip_prefix(')') {
                return Ok((rest, specs));
            }
            let (rest, spec) = type_spec(rest)?;
            let (rest, _) = terminator(rest)?;
            specs.push(spec);
            input = rest;
        }
    }

    map(type_spec, |spec| vec![spec])(input)
}

/// `Name Type`, `Name[T any] Type` or `Name = Type`.
///
/// Type parameters must follow the name directly; `Name [4]int` is an
/// array type.
fn type_spec(input: &str) -> IResult<&str, TypeSpec> {
    let (input, name) = name(input)?;
    let (input, _) = opt(balanced('[', ']'))(input)?;
    let (input, _) = sp(input)?;
    let (input, _) = opt(terminated(char('='), sp))(input)?;
    let (input, ty) = type_expr(input)?;

    Ok((
        input,
        TypeSpec {
            name: name.to_string(),
            ty,
        },
    ))
}

/// `func (r *Recv) Name[T any](params) results { body }`
///
/// Body-less (external) functions yield an empty block.
fn func_decl(input: &str) -> IResult<&str, Block> {
    let (input, _) = keyword("func")(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = opt(terminated(balanced('(', ')'), ws))(input)?;
    let (input, _) = name(input)?;
    let (input, _) = opt(balanced('[', ']'))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = balanced('(', ')')(input)?;
    let (input, _) = opt(preceded(sp, func_results))(input)?;
    let (input, body) = opt(preceded(sp, skim_group('{', '}')))(input)?;

    Ok((
        input,
        Block {
            types: body.unwrap_or_default(),
        },
    ))
}

/// `var ...` / `const ...`, single or grouped.
fn value_decl(input: &str) -> IResult<&str, Block> {
    let (input, _) = alt((keyword("var"), keyword("const")))(input)?;
    let (input, _) = sp(input)?;
    let (input, types) = alt((skim_group('(', ')'), skim_line))(input)?;

    Ok((input, Block { types }))
}

// =============================================================================
// Types
// =============================================================================

/// Parse a type expression. Anything but a struct collapses to `Other`.
fn type_expr(input: &str) -> IResult<&str, TypeExpr> {
    alt((
        map(struct_type, TypeExpr::Struct),
        value(TypeExpr::Other, other_type),
    ))(input)
}

fn other_type(input: &str) -> IResult<&str, ()> {
    alt((
        value((), pair(keyword("interface"), preceded(ws, balanced('{', '}')))),
        value((), preceded(pair(char('*'), ws), type_expr)),
        func_type,
        value((), tuple((keyword("map"), ws, balanced('[', ']'), sp, type_expr))),
        chan_type,
        // []T, [N]T, [...]T
        value((), pair(balanced('[', ']'), preceded(sp, type_expr))),
        value((), delimited(pair(char('('), ws), type_expr, pair(ws, char(')')))),
        named_type,
    ))(input)
}

/// `T`, `pkg.T`, `T[int]`
fn named_type(input: &str) -> IResult<&str, ()> {
    value(
        (),
        tuple((name, opt(preceded(char('.'), name)), opt(balanced('[', ']')))),
    )(input)
}

/// `chan T`, `chan<- T`, `<-chan T`
fn chan_type(input: &str) -> IResult<&str, ()> {
    let (input, _) = alt((
        recognize(tuple((tag("<-"), ws, keyword("chan")))),
        recognize(tuple((keyword("chan"), ws, tag("<-")))),
        keyword("chan"),
    ))(input)?;
    value((), preceded(ws, type_expr))(input)
}

/// `func(params) results`
fn func_type(input: &str) -> IResult<&str, ()> {
    value(
        (),
        tuple((
            keyword("func"),
            ws,
            balanced('(', ')'),
            opt(preceded(sp, func_results)),
        )),
    )(input)
}

/// Result list: `(int, error)` or a single type on the same line.
fn func_results(input: &str) -> IResult<&str, ()> {
    alt((value((), balanced('(', ')')), value((), type_expr)))(input)
}

/// `struct { ... }`. Errors inside the braces are not backtracked.
fn struct_type(input: &str) -> IResult<&str, StructType> {
    let (input, _) = keyword("struct")(input)?;
    cut(struct_body)(input)
}

fn struct_body(input: &str) -> IResult<&str, StructType> {
    let (input, _) = ws(input)?;
    let (mut input, _) = char('{')(input)?;

    let mut fields = Vec::new();
    loop {
        let (rest, _) = ws(input)?;
        if let Some(rest) = rest.strip_prefix('}') {
            return Ok((rest, StructType { fields }));
        }
        let (rest, field) = field_decl(rest)?;
        let (rest, _) = terminator(rest)?;
        fields.push(field);
        input = rest;
    }
}

/// A named field group (`A, B int`) or an embedded field (`*pkg.Base`),
/// with an optional tag.
fn field_decl(input: &str) -> IResult<&str, Field> {
    let (input, names) = alt((
        terminated(field_names, preceded(sp1, type_expr)),
        value(Vec::new(), embedded_type),
    ))(input)?;
    let (input, _) = opt(preceded(sp, string_lit))(input)?;

    Ok((input, Field { names }))
}

fn field_names(input: &str) -> IResult<&str, Vec<String>> {
    separated_list1(tuple((sp, char(','), ws)), map(name, String::from))(input)
}

fn embedded_type(input: &str) -> IResult<&str, ()> {
    alt((preceded(pair(char('*'), ws), named_type), named_type))(input)
}


// =============================================================================
// Skimming
// =============================================================================

/// Consume an `open ... close` group, honouring nesting, comments and
/// literals. Type declarations anywhere inside are parsed and returned.
fn skim_group(open: char, close: char) -> impl FnMut(&str) -> IResult<&str, Vec<TypeSpec>> {
    move |input: &str| {
        let (mut rest, _) = char(open)(input)?;
        let mut depth = 0usize;
        let mut types = Vec::new();

        loop {
            if let Ok((r, _)) = opaque_token(rest) {
                rest = r;
                continue;
            }
            if let Ok((r, word)) = identifier(rest) {
                if word == "type" {
                    if let Ok((r, specs)) = type_decl(rest) {
                        types.extend(specs);
                        rest = r;
                        continue;
                    }
                }
                rest = r;
                continue;
            }

            let mut chars = rest.chars();
            match chars.next() {
                None => {
                    return Err(nom::Err::Error(nom::error::Error::new(rest, ErrorKind::Eof)));
                }
                Some(c) if c == close && depth == 0 => return Ok((chars.as_str(), types)),
                Some(c) if c == open => depth += 1,
                Some(c) if c == close => depth -= 1,
                Some(_) => {}
            }
            rest = chars.as_str();
        }
    }
}

/// Text between balanced delimiters, delimiters excluded.
fn balanced(open: char, close: char) -> impl FnMut(&str) -> IResult<&str, &str> {
    move |input: &str| {
        let (rest, text) = recognize(skim_group(open, close))(input)?;
        Ok((rest, &text[open.len_utf8()..text.len() - close.len_utf8()]))
    }
}

/// Consume the rest of a one-line statement. Bracketed groups are stepped
/// over as units and may span lines.
fn skim_line(input: &str) -> IResult<&str, Vec<TypeSpec>> {
    let mut rest = input;
    let mut types = Vec::new();

    loop {
        let (r, _) = sp(rest)?;
        rest = r;
        if rest.is_empty()
            || rest.starts_with(['\n', ';', '}', ')', ']'])
            || rest.starts_with("//")
        {
            return Ok((rest, types));
        }
        if let Ok((r, _)) = opaque_token(rest) {
            rest = r;
            continue;
        }
        let group = alt((
            skim_group('{', '}'),
            skim_group('(', ')'),
            skim_group('[', ']'),
        ))(rest);
        if let Ok((r, nested)) = group {
            types.extend(nested);
            rest = r;
            continue;
        }

        let mut chars = rest.chars();
        chars.next();
        rest = chars.as_str();
    }
}

// =============================================================================
// Lexical helpers
// =============================================================================

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_alphabetic() || c == '_'),
        take_while(is_ident_char),
    ))(input)
}

/// An identifier that is not a reserved word.
fn name(input: &str) -> IResult<&str, &str> {
    verify(identifier, |s: &str| !KEYWORDS.contains(&s))(input)
}

fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag(kw), not(satisfy(is_ident_char)))
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("//"), take_while(|c: char| c != '\n')))(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

/// Skip whitespace, line breaks and comments.
fn ws(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((multispace1, line_comment, block_comment))))(input)
}

/// Skip blanks and single-line block comments, never a line break.
fn sp(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            take_while1(|c: char| c == ' ' || c == '\t' || c == '\r'),
            verify(block_comment, |s: &str| !s.contains('\n')),
        ))),
    )(input)
}

/// At least one blank, then [`sp`].
fn sp1(input: &str) -> IResult<&str, ()> {
    value((), pair(take_while1(|c: char| c == ' ' || c == '\t'), sp))(input)
}

/// End of a field, spec or declaration: `;`, a line break (optionally
/// after a comment), end of input, or a closing `}`/`)` left for the caller.
fn terminator(input: &str) -> IResult<&str, ()> {
    let (input, _) = sp(input)?;
    alt((
        value((), char(';')),
        value(
            (),
            pair(opt(line_comment), alt((value((), char('\n')), value((), eof)))),
        ),
        value((), verify(block_comment, |s: &str| s.contains('\n'))),
        value((), peek(alt((char('}'), char(')'))))),
    ))(input)
}

fn interpreted_string(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('"'),
        many0(alt((recognize(pair(char('\\'), anychar)), is_not("\"\\\n")))),
        char('"'),
    ))(input)
}

fn raw_string(input: &str) -> IResult<&str, &str> {
    recognize(delimited(char('`'), take_while(|c: char| c != '`'), char('`')))(input)
}

fn rune_lit(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('\''),
        many0(alt((recognize(pair(char('\\'), anychar)), is_not("'\\\n")))),
        char('\''),
    ))(input)
}

fn string_lit(input: &str) -> IResult<&str, &str> {
    alt((interpreted_string, raw_string))(input)
}

/// Tokens whose contents must not be scanned for delimiters.
fn opaque_token(input: &str) -> IResult<&str, &str> {
    alt((line_comment, block_comment, interpreted_string, raw_string, rune_lit))(input)
}
