//! Integer calculator used by the console demo

use clikit::console::{Bindings, EvalOutcome, Evaluator};

/// Evaluates `name = expr` assignments and `+ - * /` expressions over
/// integers and bound names. A trailing `\` continues the statement.
#[derive(Debug, Default)]
pub struct Calculator;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(i64),
    Name(String),
    Op(char),
    Open,
    Close,
}

fn raised(name: &str, message: impl Into<String>) -> EvalOutcome {
    EvalOutcome::Raised {
        name: name.to_string(),
        message: Some(message.into()),
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, EvalOutcome> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' => {
                let mut value: i64 = 0;
                while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(i64::from(digit)))
                        .ok_or_else(|| raised("OverflowError", "number too large"))?;
                    chars.next();
                }
                tokens.push(Token::Number(value));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if !(c.is_alphanumeric() || c == '_') {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                tokens.push(Token::Name(name));
            }
            '+' | '-' | '*' | '/' => {
                tokens.push(Token::Op(c));
                chars.next();
            }
            '(' => {
                tokens.push(Token::Open);
                chars.next();
            }
            ')' => {
                tokens.push(Token::Close);
                chars.next();
            }
            other => return Err(raised("SyntaxError", format!("unexpected {other:?}"))),
        }
    }
    Ok(tokens)
}

/// Recursive descent over the token list
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    bindings: &'a Bindings,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<i64, EvalOutcome> {
        let mut value = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek() {
            let op = *op;
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' {
                value.checked_add(rhs)
            } else {
                value.checked_sub(rhs)
            }
            .ok_or_else(|| raised("OverflowError", "result too large"))?;
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<i64, EvalOutcome> {
        let mut value = self.factor()?;
        while let Some(Token::Op(op @ ('*' | '/'))) = self.peek() {
            let op = *op;
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == '*' {
                value
                    .checked_mul(rhs)
                    .ok_or_else(|| raised("OverflowError", "result too large"))?
            } else {
                value
                    .checked_div(rhs)
                    .ok_or_else(|| raised("ZeroDivisionError", "division by zero"))?
            };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<i64, EvalOutcome> {
        match self.next().cloned() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Name(name)) => {
                let value = self
                    .bindings
                    .get(&name)
                    .ok_or_else(|| raised("NameError", format!("name '{name}' is not defined")))?;
                value
                    .trim()
                    .parse()
                    .map_err(|_| raised("TypeError", format!("'{name}' is not a number")))
            }
            Some(Token::Op('-')) => Ok(-self.factor()?),
            Some(Token::Open) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(raised("SyntaxError", "expected ')'")),
                }
            }
            _ => Err(raised("SyntaxError", "invalid syntax")),
        }
    }
}

fn evaluate(source: &str, bindings: &Bindings) -> Result<i64, EvalOutcome> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        bindings,
    };
    let value = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(raised("SyntaxError", "invalid syntax"));
    }
    Ok(value)
}

impl Evaluator for Calculator {
    fn eval(&mut self, source: &str, bindings: &mut Bindings) -> EvalOutcome {
        if source.trim_end().ends_with('\\') {
            return EvalOutcome::Incomplete;
        }
        let source = source.replace("\\\n", " ");
        let source = source.trim();
        if source == "exit()" {
            return EvalOutcome::Exit;
        }

        if let Some((name, expr)) = source.split_once('=') {
            let name = name.trim();
            if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return raised("SyntaxError", "cannot assign to expression");
            }
            return match evaluate(expr, bindings) {
                Ok(value) => {
                    bindings.insert(name.to_string(), value.to_string());
                    EvalOutcome::Value(None)
                }
                Err(outcome) => outcome,
            };
        }

        match evaluate(source, bindings) {
            Ok(value) => EvalOutcome::Value(Some(value.to_string())),
            Err(outcome) => outcome,
        }
    }
}
