//! Text front-end: generating functions such as `x/(1-x-x^2)` and
//! bracketed value lists such as `[1, 1/2, -3]`.
//!
//! Expressions are read in two passes. A `nom` grammar builds a
//! `ParseNode` tree, then lowering turns the tree into a rational
//! function over Q and reports what kind of input was not acceptable.

use std::str::FromStr;

use cfinite_poly::RationalFunction;
use cfinite_rings::rationals::Q;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{digit0, digit1, multispace0, satisfy};
use nom::combinator::{map, map_res, opt, recognize};
use nom::multi::{fold_many0, separated_list0};
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;

use crate::error::{CFiniteError, Result};
use crate::sequence::CFiniteSequence;
use crate::term::SeqKey;

#[derive(Clone, Debug, PartialEq, Eq)]
enum ParseNode {
    Integer(String),
    Decimal(String),
    Variable(String),
    Call(String),
    Neg(Box<ParseNode>),
    Add(Box<ParseNode>, Box<ParseNode>),
    Sub(Box<ParseNode>, Box<ParseNode>),
    Mul(Box<ParseNode>, Box<ParseNode>),
    Div(Box<ParseNode>, Box<ParseNode>),
    Pow(Box<ParseNode>, Box<ParseNode>),
}

fn symbol<'a>(s: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(multispace0, tag(s))
}

// Integers, and decimals so they can be rejected with a precise error
fn parse_number(input: &str) -> IResult<&str, ParseNode> {
    map(
        recognize(pair(digit1, opt(pair(tag("."), digit0)))),
        |text: &str| {
            if text.contains('.') {
                ParseNode::Decimal(text.to_string())
            } else {
                ParseNode::Integer(text.to_string())
            }
        },
    )(input)
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn parse_function(input: &str) -> IResult<&str, ParseNode> {
    let (input, name) = parse_identifier(input)?;
    let (input, _) = symbol("(")(input)?;
    let (input, _) = separated_list0(symbol(","), parse_expr)(input)?;
    let (input, _) = symbol(")")(input)?;
    Ok((input, ParseNode::Call(name.to_string())))
}

fn parse_variable(input: &str) -> IResult<&str, ParseNode> {
    map(parse_identifier, |s: &str| ParseNode::Variable(s.to_string()))(input)
}

fn parse_parens(input: &str) -> IResult<&str, ParseNode> {
    delimited(symbol("("), parse_expr, symbol(")"))(input)
}

fn parse_atom(input: &str) -> IResult<&str, ParseNode> {
    preceded(
        multispace0,
        alt((parse_number, parse_function, parse_variable, parse_parens)),
    )(input)
}

// Right associative: x^2^3 = x^(2^3)
fn parse_power(input: &str) -> IResult<&str, ParseNode> {
    let (input, base) = parse_atom(input)?;
    let (input, exp) = opt(preceded(
        alt((symbol("^"), symbol("**"))),
        parse_power_exponent,
    ))(input)?;

    let node = match exp {
        Some(exp) => ParseNode::Pow(Box::new(base), Box::new(exp)),
        None => base,
    };
    Ok((input, node))
}

// Exponents may carry a sign: x^-2
fn parse_power_exponent(input: &str) -> IResult<&str, ParseNode> {
    preceded(
        multispace0,
        alt((
            map(preceded(tag("-"), parse_power_exponent), |e| {
                ParseNode::Neg(Box::new(e))
            }),
            preceded(tag("+"), parse_power_exponent),
            parse_power,
        )),
    )(input)
}

fn parse_unary(input: &str) -> IResult<&str, ParseNode> {
    alt((
        map(preceded(symbol("-"), parse_unary), |e| ParseNode::Neg(Box::new(e))),
        preceded(symbol("+"), parse_unary),
        parse_power,
    ))(input)
}

fn parse_term(input: &str) -> IResult<&str, ParseNode> {
    let (input, init) = parse_unary(input)?;
    fold_many0(
        pair(alt((symbol("*"), symbol("/"))), parse_unary),
        move || init.clone(),
        |acc, (op, val)| match op {
            "*" => ParseNode::Mul(Box::new(acc), Box::new(val)),
            _ => ParseNode::Div(Box::new(acc), Box::new(val)),
        },
    )(input)
}

fn parse_expr(input: &str) -> IResult<&str, ParseNode> {
    let (input, init) = parse_term(input)?;
    fold_many0(
        pair(alt((symbol("+"), symbol("-"))), parse_term),
        move || init.clone(),
        |acc, (op, val)| match op {
            "+" => ParseNode::Add(Box::new(acc), Box::new(val)),
            _ => ParseNode::Sub(Box::new(acc), Box::new(val)),
        },
    )(input)
}

/// Turns a parse tree into a rational function in its single variable.
#[derive(Default)]
struct Lowering {
    variable: Option<String>,
}

impl Lowering {
    fn lower(&mut self, node: &ParseNode) -> Result<RationalFunction<Q>> {
        match node {
            ParseNode::Integer(text) => text
                .parse::<Q>()
                .map(RationalFunction::constant)
                .map_err(|e| CFiniteError::TypeMismatch(e.to_string())),
            ParseNode::Decimal(text) => Err(CFiniteError::InvalidDomain(format!(
                "inexact literal {text}"
            ))),
            ParseNode::Variable(name) => self.variable(name),
            ParseNode::Call(name) => Err(CFiniteError::TypeMismatch(format!(
                "{name}(...) is not a polynomial"
            ))),
            ParseNode::Neg(a) => Ok(self.lower(a)?.neg()),
            ParseNode::Add(a, b) => {
                let (a, b) = (self.lower(a)?, self.lower(b)?);
                Ok(a.add_ref(&b))
            }
            ParseNode::Sub(a, b) => {
                let (a, b) = (self.lower(a)?, self.lower(b)?);
                Ok(a.sub_ref(&b))
            }
            ParseNode::Mul(a, b) => {
                let (a, b) = (self.lower(a)?, self.lower(b)?);
                Ok(a.mul_ref(&b))
            }
            ParseNode::Div(a, b) => {
                let (a, b) = (self.lower(a)?, self.lower(b)?);
                a.checked_div(&b).ok_or(CFiniteError::DivisionByZero)
            }
            ParseNode::Pow(base, exp) => {
                let base = self.lower(base)?;
                let n = integer_exponent(&self.lower(exp)?)?;
                if n < 0 && base.is_zero() {
                    return Err(CFiniteError::DivisionByZero);
                }
                base.pow(n).ok_or_else(|| {
                    CFiniteError::TypeMismatch(format!("exponent {n} out of range"))
                })
            }
        }
    }

    fn variable(&mut self, name: &str) -> Result<RationalFunction<Q>> {
        match &self.variable {
            Some(known) if known != name => Err(CFiniteError::UnsupportedDimension(format!(
                "variables {known} and {name}"
            ))),
            Some(_) => Ok(RationalFunction::x()),
            None => {
                self.variable = Some(name.to_string());
                Ok(RationalFunction::x())
            }
        }
    }
}

fn integer_exponent(exp: &RationalFunction<Q>) -> Result<i64> {
    exp.as_polynomial()
        .filter(|p| p.is_constant())
        .map(|p| p.constant_coeff())
        .filter(|c| c.is_integer())
        .and_then(Q::to_i64)
        .ok_or_else(|| CFiniteError::TypeMismatch(format!("exponent {exp} is not an integer")))
}

/// Reads a rational function in one variable, e.g. `"x/(1-x-x^2)"`.
///
/// The variable may have any name; using two different names fails.
///
/// # Errors
///
/// - [`CFiniteError::InvalidDomain`] for decimal literals
/// - [`CFiniteError::UnsupportedDimension`] for a second variable
/// - [`CFiniteError::TypeMismatch`] for function applications, non-integer
///   exponents or text that is not an expression
/// - [`CFiniteError::DivisionByZero`] for division by zero
pub fn parse_rational_function(text: &str) -> Result<RationalFunction<Q>> {
    let unreadable = || CFiniteError::TypeMismatch(format!("cannot read {text:?}"));

    let (rest, node) = parse_expr(text).map_err(|_| unreadable())?;
    if !rest.trim().is_empty() {
        return Err(unreadable());
    }

    Lowering::default().lower(&node)
}

/// Reads a bracketed list of rationals, e.g. `"[1, -1/2, 3]"`.
///
/// # Errors
///
/// Returns [`CFiniteError::InvalidArgumentType`] if the text is not a
/// bracketed list or an entry is not a rational literal.
pub fn parse_rational_list(text: &str) -> Result<Vec<Q>> {
    match parse_list(text) {
        Ok((rest, values)) if rest.trim().is_empty() => Ok(values),
        _ => Err(CFiniteError::InvalidArgumentType(format!("list {text:?}"))),
    }
}

fn parse_rational_literal(input: &str) -> IResult<&str, Q> {
    map_res(
        preceded(
            multispace0,
            recognize(tuple((
                opt(tag("-")),
                digit1,
                opt(pair(symbol("/"), preceded(multispace0, digit1))),
            ))),
        ),
        Q::from_str,
    )(input)
}

fn parse_list(input: &str) -> IResult<&str, Vec<Q>> {
    delimited(
        symbol("["),
        separated_list0(symbol(","), parse_rational_literal),
        symbol("]"),
    )(input)
}

fn parse_index(input: &str) -> IResult<&str, i64> {
    map_res(
        preceded(
            multispace0,
            recognize(pair(opt(alt((tag("-"), tag("+")))), digit1)),
        ),
        str::parse::<i64>,
    )(input)
}

type KeyParts = (Option<i64>, Option<(i64, Option<Option<i64>>)>);

// start, then optionally `:stop` and `:step`; the step itself may be empty
fn parse_key_parts(input: &str) -> IResult<&str, KeyParts> {
    pair(
        opt(parse_index),
        opt(preceded(
            symbol(":"),
            pair(parse_index, opt(preceded(symbol(":"), opt(parse_index)))),
        )),
    )(input)
}

/// Reads `"k"`, `"start:stop"` or `"start:stop:step"`.
pub(crate) fn parse_seq_key(text: &str) -> Result<SeqKey> {
    let invalid = || CFiniteError::InvalidIndexType(text.to_string());

    let (start, slice) = match parse_key_parts(text) {
        Ok((rest, parts)) if rest.trim().is_empty() => parts,
        _ => return Err(invalid()),
    };

    match (start, slice) {
        (Some(k), None) => Ok(SeqKey::Index(k)),
        (start, Some((stop, step))) => {
            let step = step.flatten().unwrap_or(1);
            match (start, step) {
                (_, 0) | (None, i64::MIN..=-1) => Err(invalid()),
                (start, step) => Ok(SeqKey::Slice {
                    start: start.unwrap_or(0),
                    stop,
                    step,
                }),
            }
        }
        (None, None) => Err(invalid()),
    }
}

impl CFiniteSequence {
    /// Builds the sequence whose o.g.f. is written in `text`.
    ///
    /// # Errors
    ///
    /// See [`parse_rational_function`].
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_rational_function(&parse_rational_function(text)?)
    }
}

impl FromStr for CFiniteSequence {
    type Err = CFiniteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
