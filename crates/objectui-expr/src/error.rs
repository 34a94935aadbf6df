//! Error types for the expression engine.

/// Result type alias for expression operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling or evaluating expressions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The expression source failed to parse.
    #[error("parse error at offset {offset}: {message}")]
    Parse {
        /// What went wrong.
        message: String,
        /// Byte offset into the source where parsing failed.
        offset: usize,
    },

    /// The expression referenced a variable that is not bound in the
    /// evaluation scope.
    #[error("unknown variable '{name}'")]
    UnknownVariable {
        /// The unbound variable name.
        name: String,
    },

    /// The expression called a function that is not in the formula library.
    #[error("unknown function '{name}'")]
    UnknownFunction {
        /// The unknown function name.
        name: String,
    },

    /// A formula function rejected its arguments.
    #[error("{function}: {message}")]
    Function {
        /// The formula function that failed.
        function: String,
        /// Why it failed.
        message: String,
    },

    /// A runtime evaluation failure (type mismatch, division by zero, ...).
    #[error("evaluation error: {message}")]
    Eval {
        /// What went wrong.
        message: String,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, offset: usize) -> Self {
        Self::Parse {
            message: message.into(),
            offset,
        }
    }

    /// Create an evaluation error.
    pub fn eval(message: impl Into<String>) -> Self {
        Self::Eval {
            message: message.into(),
        }
    }

    /// Create a function-argument error.
    pub fn function(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Function {
            function: function.into(),
            message: message.into(),
        }
    }
}
