//! Public AST types for parsed templates.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Range;

/// A parsed template: a sequence of literal text and brace groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, including any unmatched braces.
    Literal(String),
    /// A balanced `{...}` group.
    Group(Group),
}

/// A balanced brace group with `|`-separated alternatives.
///
/// `{name}` is a group with one alternative, `{a|b|c}` has three. Whether a
/// group is spintax, a placeholder, a conditional tag or a modifier
/// expression is decided at resolution time, not by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub alternatives: Vec<Template>,
    /// Byte range of the group in the source text, braces included.
    pub span: Range<usize>,
}

impl Template {
    /// Iterates over the groups at the top level of this template.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Group(group) => Some(group),
            Segment::Literal(_) => None,
        })
    }

    /// Returns true if the template contains no groups at any depth.
    pub fn is_flat(&self) -> bool {
        self.groups().next().is_none()
    }

    /// Returns the literal text if this template has no groups.
    pub fn as_literal(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [] => Some(""),
            [Segment::Literal(text)] => Some(text),
            _ => None,
        }
    }
}

impl Group {
    /// Returns true if no alternative contains a nested group.
    pub fn is_leaf(&self) -> bool {
        self.alternatives.iter().all(Template::is_flat)
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Group(group) => write!(f, "{group}")?,
            }
        }
        Ok(())
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("{")?;
        for (i, alternative) in self.alternatives.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{alternative}")?;
        }
        f.write_str("}")
    }
}
