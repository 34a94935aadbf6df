//! Abstract syntax tree for compiled expressions.

/// A parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),
    /// String literal.
    String(String),
    /// Boolean literal.
    Bool(bool),
    /// `null` literal.
    Null,
    /// Array literal.
    Array(Vec<Expr>),
    /// Variable reference, resolved against the evaluation scope.
    Var(String),
    /// Member access: `object.field`.
    Member(Box<Expr>, String),
    /// Index access: `object[expr]`.
    Index(Box<Expr>, Box<Expr>),
    /// Unary operation.
    Unary(UnaryOp, Box<Expr>),
    /// Binary operation.
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// Ternary conditional: `cond ? a : b`.
    Conditional {
        /// The condition.
        cond: Box<Expr>,
        /// Value when the condition is truthy.
        then_branch: Box<Expr>,
        /// Value when the condition is falsy.
        else_branch: Box<Expr>,
    },
    /// Formula function call: `SUM(items, 'price')`.
    Call {
        /// Function name in the formula library.
        function: String,
        /// Argument expressions, evaluated eagerly left to right.
        args: Vec<Expr>,
    },
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical negation (`!`).
    Not,
    /// Numeric negation (`-`).
    Neg,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+` — numeric addition or string concatenation.
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==` — loose equality with coercion.
    LooseEq,
    /// `!=`
    LooseNe,
    /// `===` — strict equality.
    StrictEq,
    /// `!==`
    StrictNe,
    /// `&&` — short-circuiting, value-returning.
    And,
    /// `||` — short-circuiting, value-returning.
    Or,
}
