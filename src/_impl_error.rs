use thiserror::Error;

/// A structural failure: the requested operation was aborted and no partial result
/// was produced.
///
/// Every variant carries the name of the offending node, variable or token.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("`{0}` is not a valid name (expected a letter followed by letters, digits or `_`, and not a keyword).")]
    InvalidName(String),
    #[error("Node `{0}` is declared more than once.")]
    DuplicateNode(String),
    #[error("Unknown node `{0}`.")]
    UnknownNode(String),
    #[error("Node `{0}` has no logic.")]
    MissingLogic(String),
    #[error("Syntax error in logic `{expression}`: {message}")]
    LogicSyntax { expression: String, message: String },
    #[error("Unknown variable `{variable}` in logic `{expression}`.")]
    UndefinedVariable { expression: String, variable: String },
    #[error("Invalid rate `{rate}` of node `{node}`: rates must be nonnegative.")]
    InvalidRate { node: String, rate: String },
    #[error("Invalid initial state of {target}: {message}")]
    InvalidInitialState { target: String, message: String },
    #[error("Invalid value of parameter `{name}`: {message}")]
    InvalidParameter { name: String, message: String },
    #[error("Invalid mutation state `{0}` (expected `ON`, `OFF` or `WT`).")]
    InvalidMutation(String),
    #[error("Rate of node `{node}` uses undeclared external variable `${variable}`.")]
    UndeclaredExternal { node: String, variable: String },
    #[error("Invalid Boolean value `{0}` (expected `0`, `1`, `True` or `False`).")]
    InvalidBoolean(String),
    #[error("Invalid .{format} file (line {line}): {message}")]
    Parse {
        format: &'static str,
        line: usize,
        message: String,
    },
    #[error("File `{path}` not readable: {message}")]
    Io { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use crate::Error;

    #[test]
    fn error_messages_name_the_culprit() {
        let error = Error::UndeclaredExternal {
            node: "p53".to_string(),
            variable: "rate".to_string(),
        };
        assert_eq!(
            "Rate of node `p53` uses undeclared external variable `$rate`.",
            error.to_string()
        );
        let error = Error::Parse {
            format: "cfg",
            line: 3,
            message: "Expected `;`.".to_string(),
        };
        assert_eq!("Invalid .cfg file (line 3): Expected `;`.", error.to_string());
    }
}
