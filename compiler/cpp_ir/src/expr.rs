//! Literal expressions and trivial constant folding.
//!
//! Expressions appear as default arguments, initializers, enum values, array
//! bounds, value template arguments and manifest bodies. Only literal folding
//! is supported: identifiers and raw text are not constants.

use std::fmt;

/// Unary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
}

impl UnaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

/// Binary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
        }
    }

    /// Operators whose result is a truth value.
    pub const fn is_boolean(self) -> bool {
        matches!(
            self,
            BinaryOp::And
                | BinaryOp::Or
                | BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Gt
                | BinaryOp::Le
                | BinaryOp::Ge
        )
    }
}

/// An expression tree.
///
/// Floating-point literals keep their source spelling so the tree stays
/// `Eq + Ord + Hash`; they are parsed only when evaluated.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    Integer(i64),
    Float(String),
    Char(char),
    String(String),
    Bool(bool),
    Nullptr,
    /// A name: a variable, an enum value, or a value template parameter.
    Ident(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// Expression text that was not parsed further.
    Raw(String),
}

/// The value-category of a literal, used to pick a type for a manifest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Integer,
    Real,
    Char,
    String,
    Bool,
    Null,
}

/// Result of folding an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprResult {
    Integer(i64),
    Real(f64),
    /// A constant that is neither integral nor real (a string literal or a
    /// null pointer).
    Literal,
    /// Not a constant, or the fold failed (e.g. division by zero).
    Error,
}

impl ExprResult {
    /// The value as an integer, truncating reals.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "C++ semantics: reals truncate toward zero"
    )]
    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            ExprResult::Integer(i) => Some(i),
            ExprResult::Real(r) => Some(r as i64),
            ExprResult::Literal | ExprResult::Error => None,
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "integer to real promotion matches C++ usual arithmetic conversions"
    )]
    fn as_real(&self) -> Option<f64> {
        match *self {
            ExprResult::Integer(i) => Some(i as f64),
            ExprResult::Real(r) => Some(r),
            ExprResult::Literal | ExprResult::Error => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExprResult::Error)
    }
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Fold the expression to a constant.
    pub fn evaluate(&self) -> ExprResult {
        match self {
            Expr::Integer(i) => ExprResult::Integer(*i),
            Expr::Float(text) => parse_float(text).map_or(ExprResult::Error, ExprResult::Real),
            Expr::Char(c) => ExprResult::Integer(i64::from(u32::from(*c))),
            Expr::Bool(b) => ExprResult::Integer(i64::from(*b)),
            Expr::String(_) | Expr::Nullptr => ExprResult::Literal,
            Expr::Ident(_) | Expr::Raw(_) => ExprResult::Error,
            Expr::Unary(op, operand) => eval_unary(*op, &operand.evaluate()),
            Expr::Binary(op, lhs, rhs) => eval_binary(*op, &lhs.evaluate(), &rhs.evaluate()),
        }
    }

    /// The literal kind this expression would produce, if it is a constant.
    pub fn literal_kind(&self) -> Option<LiteralKind> {
        match self {
            Expr::Integer(_) => Some(LiteralKind::Integer),
            Expr::Float(_) => Some(LiteralKind::Real),
            Expr::Char(_) => Some(LiteralKind::Char),
            Expr::String(_) => Some(LiteralKind::String),
            Expr::Bool(_) => Some(LiteralKind::Bool),
            Expr::Nullptr => Some(LiteralKind::Null),
            Expr::Ident(_) | Expr::Raw(_) => None,
            Expr::Unary(UnaryOp::Not, operand) => operand.literal_kind().map(|_| LiteralKind::Bool),
            Expr::Unary(_, operand) => match operand.literal_kind()? {
                LiteralKind::Char | LiteralKind::Bool => Some(LiteralKind::Integer),
                kind => Some(kind),
            },
            Expr::Binary(op, lhs, rhs) => {
                let (l, r) = (lhs.literal_kind()?, rhs.literal_kind()?);
                if op.is_boolean() {
                    Some(LiteralKind::Bool)
                } else if l == LiteralKind::Real || r == LiteralKind::Real {
                    Some(LiteralKind::Real)
                } else {
                    Some(LiteralKind::Integer)
                }
            }
        }
    }

    /// Rebuild the expression with identifiers replaced by `f`.
    ///
    /// Returns `None` when `f` replaced nothing, so callers can keep the
    /// original.
    pub fn replace_idents(&self, f: &impl Fn(&str) -> Option<Expr>) -> Option<Expr> {
        match self {
            Expr::Ident(name) => f(name),
            Expr::Unary(op, operand) => operand
                .replace_idents(f)
                .map(|operand| Expr::unary(*op, operand)),
            Expr::Binary(op, lhs, rhs) => {
                let new_lhs = lhs.replace_idents(f);
                let new_rhs = rhs.replace_idents(f);
                if new_lhs.is_none() && new_rhs.is_none() {
                    return None;
                }
                Some(Expr::binary(
                    *op,
                    new_lhs.unwrap_or_else(|| (**lhs).clone()),
                    new_rhs.unwrap_or_else(|| (**rhs).clone()),
                ))
            }
            _ => None,
        }
    }

    /// Whether any identifier in the tree satisfies `pred`.
    pub fn mentions_ident(&self, pred: &impl Fn(&str) -> bool) -> bool {
        match self {
            Expr::Ident(name) => pred(name),
            Expr::Unary(_, operand) => operand.mentions_ident(pred),
            Expr::Binary(_, lhs, rhs) => lhs.mentions_ident(pred) || rhs.mentions_ident(pred),
            _ => false,
        }
    }
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim_end_matches(['f', 'F', 'l', 'L']).parse().ok()
}

fn eval_unary(op: UnaryOp, value: &ExprResult) -> ExprResult {
    match (op, value) {
        (_, ExprResult::Error | ExprResult::Literal) => ExprResult::Error,
        (UnaryOp::Plus, v) => v.clone(),
        (UnaryOp::Neg, ExprResult::Integer(i)) => ExprResult::Integer(i.wrapping_neg()),
        (UnaryOp::Neg, ExprResult::Real(r)) => ExprResult::Real(-r),
        (UnaryOp::Not, ExprResult::Integer(i)) => ExprResult::Integer(i64::from(*i == 0)),
        (UnaryOp::Not, ExprResult::Real(r)) => ExprResult::Integer(i64::from(*r == 0.0)),
        (UnaryOp::BitNot, ExprResult::Integer(i)) => ExprResult::Integer(!i),
        (UnaryOp::BitNot, ExprResult::Real(_)) => ExprResult::Error,
    }
}

fn eval_binary(op: BinaryOp, lhs: &ExprResult, rhs: &ExprResult) -> ExprResult {
    if let (ExprResult::Integer(l), ExprResult::Integer(r)) = (lhs, rhs) {
        return eval_integer(op, *l, *r);
    }
    match (lhs.as_real(), rhs.as_real()) {
        (Some(l), Some(r)) => eval_real(op, l, r),
        _ => ExprResult::Error,
    }
}

fn eval_integer(op: BinaryOp, l: i64, r: i64) -> ExprResult {
    let value = match op {
        BinaryOp::Add => l.wrapping_add(r),
        BinaryOp::Sub => l.wrapping_sub(r),
        BinaryOp::Mul => l.wrapping_mul(r),
        BinaryOp::Div => match l.checked_div(r) {
            Some(v) => v,
            None => return ExprResult::Error,
        },
        BinaryOp::Mod => match l.checked_rem(r) {
            Some(v) => v,
            None => return ExprResult::Error,
        },
        BinaryOp::Shl | BinaryOp::Shr => {
            let Ok(shift) = u32::try_from(r) else {
                return ExprResult::Error;
            };
            let shifted = if op == BinaryOp::Shl {
                l.checked_shl(shift)
            } else {
                l.checked_shr(shift)
            };
            match shifted {
                Some(v) => v,
                None => return ExprResult::Error,
            }
        }
        BinaryOp::BitAnd => l & r,
        BinaryOp::BitOr => l | r,
        BinaryOp::BitXor => l ^ r,
        BinaryOp::And => i64::from(l != 0 && r != 0),
        BinaryOp::Or => i64::from(l != 0 || r != 0),
        BinaryOp::Eq => i64::from(l == r),
        BinaryOp::Ne => i64::from(l != r),
        BinaryOp::Lt => i64::from(l < r),
        BinaryOp::Gt => i64::from(l > r),
        BinaryOp::Le => i64::from(l <= r),
        BinaryOp::Ge => i64::from(l >= r),
    };
    ExprResult::Integer(value)
}

#[expect(clippy::float_cmp, reason = "C++ equality on reals is exact")]
fn eval_real(op: BinaryOp, l: f64, r: f64) -> ExprResult {
    match op {
        BinaryOp::Add => ExprResult::Real(l + r),
        BinaryOp::Sub => ExprResult::Real(l - r),
        BinaryOp::Mul => ExprResult::Real(l * r),
        BinaryOp::Div => ExprResult::Real(l / r),
        BinaryOp::And => ExprResult::Integer(i64::from(l != 0.0 && r != 0.0)),
        BinaryOp::Or => ExprResult::Integer(i64::from(l != 0.0 || r != 0.0)),
        BinaryOp::Eq => ExprResult::Integer(i64::from(l == r)),
        BinaryOp::Ne => ExprResult::Integer(i64::from(l != r)),
        BinaryOp::Lt => ExprResult::Integer(i64::from(l < r)),
        BinaryOp::Gt => ExprResult::Integer(i64::from(l > r)),
        BinaryOp::Le => ExprResult::Integer(i64::from(l <= r)),
        BinaryOp::Ge => ExprResult::Integer(i64::from(l >= r)),
        BinaryOp::Mod
        | BinaryOp::Shl
        | BinaryOp::Shr
        | BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor => ExprResult::Error,
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Integer(i) => write!(f, "{i}"),
            Expr::Float(text) | Expr::Raw(text) | Expr::Ident(text) => f.write_str(text),
            Expr::Char(c) => write!(f, "'{}'", c.escape_default()),
            Expr::String(s) => write!(f, "\"{}\"", s.escape_default()),
            Expr::Bool(b) => write!(f, "{b}"),
            Expr::Nullptr => f.write_str("nullptr"),
            Expr::Unary(op, operand) => write!(f, "{}{operand}", op.symbol()),
            Expr::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.symbol()),
        }
    }
}

#[cfg(test)]
mod tests;
