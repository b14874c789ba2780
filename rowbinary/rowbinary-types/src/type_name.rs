//! Type name grammar using nom parser combinators.
//!
//! ```text
//! type_expr := identifier [ '(' [ arg { ',' arg } ] ')' ]
//! arg       := quoted_string | integer | identifier type_expr | type_expr
//! ```
//!
//! The `identifier type_expr` form covers named tuple elements such as
//! `Tuple(id UInt64, name String)`.

use std::fmt::{self, Display, Formatter};

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0, multispace1},
    combinator::{all_consuming, map, map_res, opt, recognize},
    error::{Error, ErrorKind},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
};

use crate::error::ResolveError;

/// Parsed type name: a family plus its (possibly nested) arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub family: String,
    pub args: Vec<TypeArg>,
}

/// One argument inside a type name's parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArg {
    Type(TypeExpr),
    /// Named tuple element: `name Type`.
    Named(String, TypeExpr),
    Int(i64),
    Str(String),
}

impl TypeExpr {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(family: impl Into<String>, args: Vec<TypeArg>) -> Self {
        Self {
            family: family.into(),
            args,
        }
    }

    /// Build an [`ResolveError::InvalidTypeName`] for this expression.
    pub fn invalid(&self, detail: impl Into<String>) -> ResolveError {
        ResolveError::InvalidTypeName {
            type_name: self.to_string(),
            detail: detail.into(),
        }
    }

    pub fn expect_no_args(&self) -> Result<(), ResolveError> {
        if self.args.is_empty() {
            return Ok(());
        }
        Err(self.invalid(format!("{} takes no arguments", self.family)))
    }

    /// Return exactly `n` type arguments, rejecting names, literals and other counts.
    pub fn type_args(&self, n: usize) -> Result<Vec<&TypeExpr>, ResolveError> {
        if self.args.len() != n {
            return Err(self.invalid(format!(
                "{} expects {n} type argument(s), got {}",
                self.family,
                self.args.len()
            )));
        }
        self.args
            .iter()
            .map(|arg| match arg {
                TypeArg::Type(expr) => Ok(expr),
                other => Err(self.invalid(format!("expected a type argument, got `{other}`"))),
            })
            .collect()
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.family)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

impl Display for TypeArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeArg::Type(expr) => write!(f, "{expr}"),
            TypeArg::Named(name, expr) => write!(f, "{name} {expr}"),
            TypeArg::Int(n) => write!(f, "{n}"),
            TypeArg::Str(s) => {
                f.write_str("'")?;
                for ch in s.chars() {
                    if ch == '\'' || ch == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{ch}")?;
                }
                f.write_str("'")
            }
        }
    }
}

/// Deepest parenthesis nesting accepted in a type name.
pub const MAX_TYPE_DEPTH: usize = 64;

/// Parse a full type name; surrounding whitespace is ignored, trailing input is not.
///
/// Names nested deeper than [`MAX_TYPE_DEPTH`] are rejected before parsing.
pub fn parse_type_name(type_name: &str) -> Result<TypeExpr, ResolveError> {
    let depth = nesting_depth(type_name);
    if depth > MAX_TYPE_DEPTH {
        return Err(ResolveError::InvalidTypeName {
            type_name: truncate_name(type_name),
            detail: format!("nesting depth {depth} exceeds {MAX_TYPE_DEPTH}"),
        });
    }
    all_consuming(delimited(multispace0, type_expr, multispace0))(type_name)
        .map(|(_, expr)| expr)
        .map_err(|e| ResolveError::InvalidTypeName {
            type_name: type_name.to_string(),
            detail: format!("failed to parse type name: {e}"),
        })
}

/// Maximum parenthesis depth, ignoring parentheses inside quoted strings.
fn nesting_depth(type_name: &str) -> usize {
    let (mut depth, mut max) = (0usize, 0usize);
    let mut in_quote = false;
    let mut chars = type_name.chars();
    while let Some(ch) = chars.next() {
        match (in_quote, ch) {
            (true, '\\') => {
                chars.next();
            }
            (_, '\'') => in_quote = !in_quote,
            (false, '(') => {
                depth += 1;
                max = max.max(depth);
            }
            (false, ')') => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Error messages keep at most the first 64 characters of a rejected name.
fn truncate_name(type_name: &str) -> String {
    match type_name.char_indices().nth(64) {
        Some((i, _)) => format!("{}...", &type_name[..i]),
        None => type_name.to_string(),
    }
}

/// Parse an identifier (alphanumeric + underscore, must start with alpha or _)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn type_expr(input: &str) -> IResult<&str, TypeExpr> {
    map(
        pair(identifier, opt(preceded(multispace0, arg_list))),
        |(family, args)| TypeExpr::with_args(family, args.unwrap_or_default()),
    )(input)
}

fn arg_list(input: &str) -> IResult<&str, Vec<TypeArg>> {
    delimited(
        terminated(char('('), multispace0),
        separated_list0(tuple((multispace0, char(','), multispace0)), type_arg),
        preceded(multispace0, char(')')),
    )(input)
}

fn type_arg(input: &str) -> IResult<&str, TypeArg> {
    alt((
        map(quoted_string, TypeArg::Str),
        map(integer, TypeArg::Int),
        map(
            separated_pair(identifier, multispace1, type_expr),
            |(name, expr)| TypeArg::Named(name.to_string(), expr),
        ),
        map(type_expr, TypeArg::Type),
    ))(input)
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i64>()
    })(input)
}

/// Single-quoted string with backslash escapes.
fn quoted_string(input: &str) -> IResult<&str, String> {
    let Some(body) = input.strip_prefix('\'') else {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Char)));
    };
    let mut out = String::new();
    let mut chars = body.char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            '\'' => return Ok((&body[i + 1..], out)),
            other => out.push(other),
        }
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::Escaped)))
}
