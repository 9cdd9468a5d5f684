//! Nom-based structural splitter for IRC lines.
//!
//! Splits an already trimmed line into its raw parts, borrowing from the
//! input. Tag values are left escaped; the caller unescapes them.

use nom::{
    bytes::complete::{take_till, take_till1, take_while},
    character::complete::char,
    combinator::{cut, opt},
    error::{context, ErrorKind, ParseError, VerboseError, VerboseErrorKind},
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::MessageParseError;

type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

fn spaces(input: &str) -> ParseResult<&str, &str> {
    take_while(|c: char| c == ' ')(input)
}

/// Parse the tag section (after `@`, up to and including the next space).
///
/// Once `@` is seen the section must be closed by a space, otherwise no
/// command can follow.
fn parse_tags(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing IRCv3 message tags",
        preceded(
            char('@'),
            cut(terminated(take_till(|c: char| c == ' '), char(' '))),
        ),
    )(input)
}

/// Parse the prefix (after `:`, up to and including the next space).
fn parse_prefix(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing message prefix",
        preceded(
            char(':'),
            cut(terminated(take_till(|c: char| c == ' '), char(' '))),
        ),
    )(input)
}

/// Nothing but spaces remain on the line.
#[inline]
fn at_line_end(rest: &str) -> bool {
    rest.bytes().all(|b| b == b' ')
}

#[inline]
fn trim_whitespace_end(token: &str) -> &str {
    token.trim_end_matches(|c: char| c.is_ascii_whitespace())
}

/// Parse the command token.
///
/// A command that ends the line loses any trailing whitespace.
fn parse_command(input: &str) -> ParseResult<&str, &str> {
    let (rest, command) = context("parsing IRC command", take_till1(|c: char| c == ' '))(input)?;
    if !at_line_end(rest) {
        return Ok((rest, command));
    }
    match trim_whitespace_end(command) {
        "" => Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::TakeTill1,
        ))),
        command => Ok((rest, command)),
    }
}

/// Split the parameter region.
///
/// Runs of spaces separate middle parameters. The first token starting with
/// `:` begins the trailing parameter, which keeps the rest of the line
/// verbatim. Whitespace at the end of an unframed last parameter is dropped.
fn parse_params(mut rest: &str) -> Vec<&str> {
    let mut params = Vec::new();
    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }
        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }
        let end = rest.find(' ').unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        rest = tail;
        if at_line_end(rest) {
            let token = trim_whitespace_end(token);
            if !token.is_empty() {
                params.push(token);
            }
            break;
        }
        params.push(token);
    }
    params
}

/// Parse a complete line into its components.
///
/// ```text
/// [@tags SPACE] [:prefix SPACE] <command> [params...] [:trailing]
/// ```
pub fn parse_line(input: &str) -> ParseResult<&str, ParsedLine<'_>> {
    let (input, tags) = opt(parse_tags)(input)?;
    let (input, _) = spaces(input)?;

    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = spaces(input)?;

    let (input, command) = parse_command(input)?;
    let params = parse_params(input);

    Ok((
        "",
        ParsedLine {
            tags,
            prefix,
            command,
            params,
        },
    ))
}

/// A split IRC line with borrowed string slices.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine<'a> {
    /// Raw tag section (without the leading `@`), if present.
    pub tags: Option<&'a str>,
    /// Raw prefix (without the leading `:`), if present.
    pub prefix: Option<&'a str>,
    /// The command token, as written.
    pub command: &'a str,
    /// Parameters, the trailing one included.
    pub params: Vec<&'a str>,
}

impl<'a> ParsedLine<'a> {
    /// Split a line that has already been cut at its line ending.
    ///
    /// The only structural failure is a line that carries no command.
    pub fn parse(input: &'a str) -> Result<Self, MessageParseError> {
        match parse_line(input) {
            Ok((_, line)) => Ok(line),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                let stage = e.errors.iter().rev().find_map(|(_, kind)| match kind {
                    VerboseErrorKind::Context(ctx) => Some(*ctx),
                    _ => None,
                });
                tracing::trace!(stage, "line carries no command");
                Err(MessageParseError::LineIsEmpty)
            }
            Err(nom::Err::Incomplete(_)) => Err(MessageParseError::LineIsEmpty),
        }
    }
}
