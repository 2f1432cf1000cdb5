use crate::BinaryOp::*;
use crate::Expression;
use crate::Expression::*;
use crate::ID_REGEX;
use std::convert::TryFrom;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

impl TryFrom<&str> for Expression {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let tokens = tokenize_group(&mut value.chars().peekable(), true)?;
        Ok(*(parse_expression(&tokens)?))
    }
}

impl FromStr for Expression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::try_from(s)
    }
}

/// **(internal)** An enum of possible tokens occurring in a logic string.
#[derive(Debug, Eq, PartialEq)]
enum Token {
    Not,                // '!', 'NOT'
    And,                // '&', '&&', 'AND'
    Or,                 // '|', '||', 'OR'
    Xor,                // '^', 'XOR'
    Const(bool),        // 'True', 'False'
    Name(String),       // 'name'
    Tokens(Vec<Token>), // A block of tokens inside parentheses
}

/// **(internal)** Process a peekable iterator of characters into a vector of `Token`s.
///
/// The outer method always consumes the opening parenthesis and the recursive call consumes the
/// closing parenthesis. Use `top_level` to indicate that there will be no closing parenthesis.
fn tokenize_group(data: &mut Peekable<Chars>, top_level: bool) -> Result<Vec<Token>, String> {
    let mut output = Vec::new();
    while let Some(c) = data.next() {
        match c {
            c if c.is_whitespace() => { /* Skip whitespace */ }
            '!' => output.push(Token::Not),
            '^' => output.push(Token::Xor),
            '&' => {
                if data.peek() == Some(&'&') {
                    data.next();
                }
                output.push(Token::And);
            }
            '|' => {
                if data.peek() == Some(&'|') {
                    data.next();
                }
                output.push(Token::Or);
            }
            ')' => {
                return if !top_level {
                    Ok(output)
                } else {
                    Err("Unexpected ')'.".to_string())
                };
            }
            '(' => {
                // start a nested token group
                let tokens = tokenize_group(data, false)?;
                output.push(Token::Tokens(tokens));
            }
            c if is_valid_in_name(c) => {
                let mut word = vec![c];
                while let Some(c) = data.peek() {
                    if !is_valid_in_name(*c) {
                        break;
                    } else {
                        word.push(*c);
                        data.next(); // advance iterator
                    }
                }
                output.push(word_to_token(word.into_iter().collect())?);
            }
            _ => return Err(format!("Unexpected '{}'.", c)),
        }
    }
    if top_level {
        Ok(output)
    } else {
        Err("Expected ')'.".to_string())
    }
}

/// **(internal)** Check if given char can appear in a name or a keyword.
fn is_valid_in_name(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// **(internal)** Convert a complete word into a keyword or a name token.
///
/// Keywords are only recognized as whole words, so `NOTCH` or `ORC` are ordinary names.
fn word_to_token(word: String) -> Result<Token, String> {
    Ok(match word.as_str() {
        "NOT" => Token::Not,
        "AND" => Token::And,
        "OR" => Token::Or,
        "XOR" => Token::Xor,
        "True" => Token::Const(true),
        "False" => Token::Const(false),
        "Node" => return Err("'Node' is a keyword and cannot be used as a name.".to_string()),
        _ if ID_REGEX.is_match(&word) => Token::Name(word),
        _ => return Err(format!("'{}' is not a valid name.", word)),
    })
}

/// **(internal)** Parse an `Expression` using the recursive steps.
fn parse_expression(data: &[Token]) -> Result<Box<Expression>, String> {
    xor(data)
}

/// **(internal)** Utility method to find first occurrence of a specific token in the token tree.
fn index_of_first(data: &[Token], token: Token) -> Option<usize> {
    data.iter().position(|t| *t == token)
}

/// **(internal)** Recursive parsing step 1: extract `^` operators.
fn xor(data: &[Token]) -> Result<Box<Expression>, String> {
    let xor_token = index_of_first(data, Token::Xor);
    Ok(if let Some(i) = xor_token {
        Box::new(Binary(Xor, or(&data[..i])?, xor(&data[(i + 1)..])?))
    } else {
        or(data)?
    })
}

/// **(internal)** Recursive parsing step 2: extract `|` operators.
fn or(data: &[Token]) -> Result<Box<Expression>, String> {
    let or_token = index_of_first(data, Token::Or);
    Ok(if let Some(i) = or_token {
        Box::new(Binary(Or, and(&data[..i])?, or(&data[(i + 1)..])?))
    } else {
        and(data)?
    })
}

/// **(internal)** Recursive parsing step 3: extract `&` operators.
fn and(data: &[Token]) -> Result<Box<Expression>, String> {
    let and_token = index_of_first(data, Token::And);
    Ok(if let Some(i) = and_token {
        Box::new(Binary(And, terminal(&data[..i])?, and(&data[(i + 1)..])?))
    } else {
        terminal(data)?
    })
}

/// **(internal)** Recursive parsing step 4: extract terminals and negations.
///
/// A negation applies to exactly one atom, so `!!a` is rejected (write `!(!a)` instead).
fn terminal(data: &[Token]) -> Result<Box<Expression>, String> {
    match data {
        [] => Err("Expected formula, found nothing.".to_string()),
        [Token::Not] => Err("Expected formula after negation.".to_string()),
        [Token::Not, Token::Not, ..] => Err("Negation cannot be repeated.".to_string()),
        [Token::Not, atom] => Ok(Box::new(Not(parse_atom(atom)?))),
        [atom] => parse_atom(atom),
        _ => Err(format!(
            "Missing operator in `{}`.",
            data.iter().map(describe).collect::<Vec<_>>().join(" ")
        )),
    }
}

/// **(internal)** An atom is a literal, a name or a parenthesised sub-expression.
fn parse_atom(token: &Token) -> Result<Box<Expression>, String> {
    match token {
        Token::Const(value) => Ok(Box::new(Const(*value))),
        Token::Name(name) => Ok(Box::new(Var(name.clone()))),
        Token::Tokens(inner) => parse_expression(inner),
        other => Err(format!("Unexpected operator '{}'.", describe(other))),
    }
}

/// **(internal)** Human readable form of a token for error messages.
fn describe(token: &Token) -> String {
    match token {
        Token::Not => "!".to_string(),
        Token::And => "&".to_string(),
        Token::Or => "|".to_string(),
        Token::Xor => "^".to_string(),
        Token::Const(true) => "True".to_string(),
        Token::Const(false) => "False".to_string(),
        Token::Name(name) => name.clone(),
        Token::Tokens(inner) => format!(
            "({})",
            inner.iter().map(describe).collect::<Vec<_>>().join(" ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::BinaryOp;
    use crate::Expression;
    use crate::Expression::{Binary, Const, Not, Var};
    use std::convert::TryFrom;

    fn var(name: &str) -> Box<Expression> {
        Box::new(Var(name.to_string()))
    }

    #[test]
    fn parse_expression_basic() {
        let inputs = vec![
            "var",
            "!foo",
            "(var | x)",
            "(xyz123 & abc)",
            "(a ^ b)",
            "!(a & (b | !c))",
            "((a & b) | True)",
        ];
        for str in inputs {
            assert_eq!(str, format!("{}", Expression::try_from(str).unwrap()))
        }
    }

    #[test]
    fn operator_spellings() {
        let canonical = Expression::try_from("!a & b | c ^ d").unwrap();
        for alternative in [
            "NOT a AND b OR c XOR d",
            "!a && b || c ^ d",
            "NOT a & b || c XOR d",
            "  !a&b|c^d  ",
        ] {
            assert_eq!(canonical, Expression::try_from(alternative).unwrap());
        }
    }

    #[test]
    fn expression_constants() {
        assert_eq!(Expression::try_from("True").unwrap(), Const(true));
        assert_eq!(Expression::try_from("False").unwrap(), Const(false));
        assert_eq!(
            Expression::try_from("!False").unwrap(),
            Not(Box::new(Const(false)))
        );
        // Only the capitalized spelling is a literal.
        assert_eq!(Expression::try_from("true").unwrap(), Var("true".to_string()));
        assert!(Expression::try_from("1").is_err());
    }

    #[test]
    fn keywords_are_whole_words() {
        assert_eq!(Expression::try_from("NOTCH").unwrap(), Var("NOTCH".to_string()));
        assert_eq!(
            Expression::try_from("ORC AND Nodes").unwrap(),
            Binary(BinaryOp::And, var("ORC"), var("Nodes"))
        );
        assert!(Expression::try_from("Node").is_err());
        assert!(Expression::try_from("a & Node").is_err());
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(Expression::try_from("a = b").is_err());
        assert!(Expression::try_from("a > b").is_err());
        assert!(Expression::try_from("a => b").is_err());
        assert!(Expression::try_from("a ? b : c").is_err());
        assert!(Expression::try_from("$a & b").is_err());
        assert!(Expression::try_from("@logic").is_err());
        assert!(Expression::try_from("_a").is_err());
        assert!(Expression::try_from("1a").is_err());
    }

    #[test]
    fn test_invalid_parentheses() {
        assert!(Expression::try_from("a & (b | c").is_err());
        assert!(Expression::try_from("(f | g))").is_err());
        assert!(Expression::try_from("()").is_err());
        assert!(Expression::try_from("a (b)").is_err());
    }

    #[test]
    fn test_missing_formula() {
        assert!(Expression::try_from("").is_err());
        assert!(Expression::try_from("   ").is_err());
        assert!(Expression::try_from("a & | g").is_err());
        assert!(Expression::try_from("a &").is_err());
        assert!(Expression::try_from("a & !").is_err());
        assert!(Expression::try_from("a & a b c").is_err());
        assert!(Expression::try_from("foo bar").is_err());
        assert!(Expression::try_from("a & ^x").is_err());
        assert!(Expression::try_from("a & x^").is_err());
        assert!(Expression::try_from("!!a").is_err());
        assert!(Expression::try_from("a &&& b").is_err());
    }

    #[test]
    fn operator_priority_test() {
        let formula = "a & b | c ^ d & e | f";
        let expected = "(((a & b) | c) ^ ((d & e) | f))".to_string();
        assert_eq!(expected, Expression::try_from(formula).unwrap().to_string());
        assert_eq!(
            Expression::try_from("!a & b").unwrap(),
            Binary(BinaryOp::And, Box::new(Not(var("a"))), var("b"))
        );
    }
}
