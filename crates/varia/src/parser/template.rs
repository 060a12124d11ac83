//! Template parser.
//!
//! winnow splits the input into brace, pipe and text tokens; a single
//! forward pass over the tokens then builds the brace tree with an explicit
//! stack of open groups:
//! - Literal text outside groups (including stray `|`)
//! - Groups `{alt|alt|...}` whose alternatives may contain nested groups
//! - Unmatched `{` or `}` as literal characters
//!
//! Groups nest at most [`MAX_DEPTH`] deep. Braces beyond that depth are
//! literal text inside the deepest group.

use std::mem::take;
use std::ops::Range;

use winnow::combinator::{alt, repeat};
use winnow::prelude::*;
use winnow::stream::LocatingSlice;
use winnow::token::{one_of, take_while};

use super::ast::{Group, Segment, Template};

/// Maximum nesting depth of groups in a parsed template.
pub const MAX_DEPTH: usize = 128;

type Input<'i> = LocatingSlice<&'i str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind<'i> {
    Text(&'i str),
    Open,
    Pipe,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token<'i> {
    kind: TokenKind<'i>,
    span: Range<usize>,
}

/// Parse a template string into a brace tree.
///
/// Parsing is total: any input produces a tree, and `to_string()` on the
/// result reproduces the input exactly.
pub fn parse_template(input: &str) -> Template {
    let mut stream = LocatingSlice::new(input);
    match tokens.parse_next(&mut stream) {
        Ok(tokens) => build_tree(tokens),
        Err(_) => Template {
            segments: vec![Segment::Literal(input.to_string())],
        },
    }
}

fn tokens<'i>(input: &mut Input<'i>) -> ModalResult<Vec<Token<'i>>> {
    repeat(0.., token).parse_next(input)
}

fn token<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    alt((
        take_while(1.., |c: char| !matches!(c, '{' | '|' | '}')).map(TokenKind::Text),
        one_of(['{', '|', '}']).map(|c: char| match c {
            '{' => TokenKind::Open,
            '|' => TokenKind::Pipe,
            _ => TokenKind::Close,
        }),
    ))
    .with_span()
    .map(|(kind, span)| Token { kind, span })
    .parse_next(input)
}

/// A group whose closing brace has not been seen yet.
struct OpenGroup {
    start: usize,
    alternatives: Vec<Template>,
    current: Vec<Segment>,
}

impl OpenGroup {
    fn new(start: usize) -> Self {
        OpenGroup {
            start,
            alternatives: Vec::new(),
            current: Vec::new(),
        }
    }

    fn split(&mut self) {
        let segments = take(&mut self.current);
        self.alternatives.push(Template { segments });
    }

    fn close(mut self, end: usize) -> Group {
        self.split();
        Group {
            alternatives: self.alternatives,
            span: self.start..end,
        }
    }

    /// The source of a group that never closed, as literal text around its
    /// already-parsed contents.
    fn into_segments(self) -> Vec<Segment> {
        let mut segments = vec![Segment::Literal("{".to_string())];
        for alternative in self.alternatives {
            push_all(&mut segments, alternative.segments);
            push_literal(&mut segments, "|");
        }
        push_all(&mut segments, self.current);
        segments
    }
}

fn build_tree(tokens: Vec<Token<'_>>) -> Template {
    let mut root = Vec::new();
    let mut open = Vec::new();
    // Braces opened past MAX_DEPTH and not yet closed.
    let mut overflow = 0usize;

    for token in tokens {
        match token.kind {
            TokenKind::Text(text) => push_literal(innermost(&mut root, &mut open), text),
            TokenKind::Open if overflow == 0 && open.len() < MAX_DEPTH => {
                open.push(OpenGroup::new(token.span.start));
            }
            TokenKind::Open => {
                overflow += 1;
                push_literal(innermost(&mut root, &mut open), "{");
            }
            TokenKind::Close if overflow > 0 => {
                overflow -= 1;
                push_literal(innermost(&mut root, &mut open), "}");
            }
            TokenKind::Close => match open.pop() {
                Some(group) => {
                    let group = group.close(token.span.end);
                    innermost(&mut root, &mut open).push(Segment::Group(group));
                }
                None => push_literal(&mut root, "}"),
            },
            TokenKind::Pipe if overflow == 0 && !open.is_empty() => {
                if let Some(group) = open.last_mut() {
                    group.split();
                }
            }
            TokenKind::Pipe => push_literal(innermost(&mut root, &mut open), "|"),
        }
    }

    while let Some(group) = open.pop() {
        push_all(innermost(&mut root, &mut open), group.into_segments());
    }

    Template { segments: root }
}

/// The segment list new content goes into: the innermost open group's
/// current alternative, or the top level.
fn innermost<'a>(
    root: &'a mut Vec<Segment>,
    open: &'a mut [OpenGroup],
) -> &'a mut Vec<Segment> {
    match open.last_mut() {
        Some(group) => &mut group.current,
        None => root,
    }
}

/// Append literal text, merging with a trailing literal.
fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if let Some(Segment::Literal(prev)) = segments.last_mut() {
        prev.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}

fn push_all(segments: &mut Vec<Segment>, tail: Vec<Segment>) {
    for segment in tail {
        match segment {
            Segment::Literal(text) => push_literal(segments, &text),
            group @ Segment::Group(_) => segments.push(group),
        }
    }
}
