// Reader for require.js configuration sources
//
// Locates the configuration object inside a main config file and evaluates
// the literal subset of JavaScript it is written in.

use crate::error::{ReadError, SourceLocation};
use layerlint_lexer::{LexError, Lexer, Token, TokenSpan};
use serde_json::{Map, Number, Value};

const LOADER_NAMES: &[&str] = &["require", "requirejs"];

/// Read a configuration object out of `source`.
///
/// Plain JSON documents are accepted as-is. Otherwise the first of these
/// forms wins:
/// - `require.config({...})` / `requirejs.config({...})`
/// - `require({...})` / `requirejs({...})`
/// - `var require = {...}` (also `let`, `const`, `window.require = {...}`)
/// - a source consisting of a bare object literal
pub fn read_config_source(source: &str) -> Result<Map<String, Value>, ReadError> {
    if let Ok(value) = serde_json::from_str::<Value>(source) {
        return match value {
            Value::Object(map) => Ok(map),
            other => Err(ReadError::NotAnObject(crate::error::describe(&other))),
        };
    }

    let mut parser = ObjectParser::new(source);
    let start = parser
        .find_config_object()
        .ok_or(ReadError::NoConfigObject)?;
    log::debug!(
        "require.js config object found at {}",
        SourceLocation::from_offset(source, parser.tokens[start].span.start)
    );

    parser.current = start;
    let object_start = parser.tokens[start].span.start;
    let parsed = parser.parse_object();

    // Unreadable characters only matter inside the config object
    let object_end = match &parsed {
        Ok(_) => parser.offset_before_current(),
        Err(_) => parser.current_offset(),
    };
    if let Some(err) = parser.take_invalid_within(object_start, object_end) {
        return Err(ReadError::Lex {
            location: SourceLocation::from_offset(source, err.span().start),
            source: err,
        });
    }

    parsed
}

/// Recursive-descent reader over the token stream of a config source.
///
/// Characters the lexer cannot read are set aside; they only fail the read
/// when they fall inside the config object.
pub(crate) struct ObjectParser<'a> {
    tokens: Vec<TokenSpan>,
    invalid: Vec<LexError>,
    current: usize,
    source: &'a str,
}

impl<'a> ObjectParser<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut invalid = Vec::new();

        for result in Lexer::new(source) {
            match result {
                Ok(token) => tokens.push(token),
                Err(err) => {
                    log::trace!(
                        "unreadable input at {}",
                        SourceLocation::from_offset(source, err.span().start)
                    );
                    invalid.push(err);
                }
            }
        }

        Self {
            tokens,
            invalid,
            current: 0,
            source,
        }
    }

    /// First unreadable token starting in `start..end`
    fn take_invalid_within(&mut self, start: usize, end: usize) -> Option<LexError> {
        let index = self
            .invalid
            .iter()
            .position(|err| (start..end).contains(&err.span().start))?;
        Some(self.invalid.remove(index))
    }

    fn current_offset(&self) -> usize {
        self.tokens
            .get(self.current)
            .map(|t| t.span.start)
            .unwrap_or(self.source.len())
    }

    fn offset_before_current(&self) -> usize {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map(|t| t.span.end)
            .unwrap_or(0)
    }

    /// Index of the `{` that opens the configuration object
    fn find_config_object(&self) -> Option<usize> {
        for i in 0..self.tokens.len() {
            if !self.is_loader_name(i) {
                continue;
            }
            let after_dot = i > 0 && self.token_at(i - 1) == Some(&Token::Dot);
            let on_window = after_dot
                && i > 1
                && matches!(self.token_at(i - 2), Some(Token::Ident(name)) if name == "window");

            // require.config({ ... })
            if !after_dot
                && self.token_at(i + 1) == Some(&Token::Dot)
                && matches!(self.token_at(i + 2), Some(Token::Ident(name)) if name == "config")
                && self.token_at(i + 3) == Some(&Token::LParen)
                && self.token_at(i + 4) == Some(&Token::LBrace)
            {
                return Some(i + 4);
            }

            // require({ ... })
            if !after_dot
                && self.token_at(i + 1) == Some(&Token::LParen)
                && self.token_at(i + 2) == Some(&Token::LBrace)
            {
                return Some(i + 2);
            }

            // var require = { ... }
            if (!after_dot || on_window)
                && self.token_at(i + 1) == Some(&Token::Eq)
                && self.token_at(i + 2) == Some(&Token::LBrace)
            {
                return Some(i + 2);
            }
        }

        // A bare object literal, e.g. a JSON5-flavoured config
        match self.token_at(0) {
            Some(Token::LBrace) => Some(0),
            Some(Token::LParen) if self.token_at(1) == Some(&Token::LBrace) => Some(1),
            _ => None,
        }
    }

    fn is_loader_name(&self, index: usize) -> bool {
        matches!(self.token_at(index), Some(Token::Ident(name)) if LOADER_NAMES.contains(&name.as_str()))
    }

    pub(crate) fn parse_object(&mut self) -> Result<Map<String, Value>, ReadError> {
        self.consume(&Token::LBrace, "Expected '{'")?;
        let mut map = Map::new();

        loop {
            if self.match_token(&Token::RBrace) {
                break;
            }

            let key = self.parse_key()?;

            if self.match_token(&Token::Colon) {
                let value = self.parse_value()?;
                map.insert(key, value);
            } else if self.check(&Token::Comma) || self.check(&Token::RBrace) {
                // Shorthand property `{ foo }` refers to a variable we cannot see
                log::debug!("skipping shorthand property '{}'", key);
                map.insert(key, Value::Null);
            } else {
                // Method definition `foo() { ... }`
                log::debug!("skipping method property '{}'", key);
                self.skip_expression()?;
                map.insert(key, Value::Null);
            }

            if !self.match_token(&Token::Comma) {
                self.consume(&Token::RBrace, "Expected ',' or '}' after property")?;
                break;
            }
        }

        Ok(map)
    }

    fn parse_key(&mut self) -> Result<String, ReadError> {
        let key = match self.peek() {
            Some(Token::Ident(name)) => name.clone(),
            Some(Token::StringLiteral(s)) => s.clone(),
            Some(Token::NumberLiteral(n)) => n.clone(),
            Some(Token::Var) => "var".to_string(),
            Some(Token::Let) => "let".to_string(),
            Some(Token::Const) => "const".to_string(),
            Some(Token::Function) => "function".to_string(),
            Some(Token::True) => "true".to_string(),
            Some(Token::False) => "false".to_string(),
            Some(Token::Null) => "null".to_string(),
            Some(Token::Undefined) => "undefined".to_string(),
            _ => return Err(self.error("Expected property name")),
        };
        self.advance();
        Ok(key)
    }

    fn parse_value(&mut self) -> Result<Value, ReadError> {
        let value = match self.peek() {
            Some(Token::LBrace) => return self.parse_object().map(Value::Object),
            Some(Token::LBracket) => return self.parse_array(),
            Some(Token::StringLiteral(s)) => Value::String(s.clone()),
            Some(Token::NumberLiteral(n)) => number_value(n, false),
            Some(Token::Minus) | Some(Token::Plus)
                if matches!(self.peek_at(1), Some(Token::NumberLiteral(_))) =>
            {
                let negative = self.check(&Token::Minus);
                self.advance();
                match self.peek() {
                    Some(Token::NumberLiteral(n)) => number_value(n, negative),
                    _ => return Err(self.error("Expected number")),
                }
            }
            Some(Token::True) => Value::Bool(true),
            Some(Token::False) => Value::Bool(false),
            Some(Token::Null) | Some(Token::Undefined) => Value::Null,
            Some(Token::Comma)
            | Some(Token::RBrace)
            | Some(Token::RBracket)
            | Some(Token::RParen) => return Err(self.error("Expected a value")),
            Some(_) => {
                // Functions, identifiers, calls: not data we can read
                let start = self.current;
                self.skip_expression()?;
                log::debug!(
                    "skipping non-literal value at {}",
                    SourceLocation::from_offset(self.source, self.tokens[start].span.start)
                );
                return Ok(Value::Null);
            }
            None => return Err(self.error("Unexpected end of input, expected a value")),
        };

        // Literals that continue into an expression (`'a' + b`) cannot be evaluated
        self.advance();
        if self.continues_expression() {
            self.skip_expression()?;
            Ok(Value::Null)
        } else {
            Ok(value)
        }
    }

    fn parse_array(&mut self) -> Result<Value, ReadError> {
        self.consume(&Token::LBracket, "Expected '['")?;
        let mut items = Vec::new();

        loop {
            if self.match_token(&Token::RBracket) {
                break;
            }
            items.push(self.parse_value()?);

            if !self.match_token(&Token::Comma) {
                self.consume(&Token::RBracket, "Expected ',' or ']' after array element")?;
                break;
            }
        }

        Ok(Value::Array(items))
    }

    /// Skip tokens up to the next `,`, `}` or `]` that is not nested
    fn skip_expression(&mut self) -> Result<(), ReadError> {
        let mut depth = 0usize;

        while let Some(token) = self.peek() {
            match token {
                Token::LParen | Token::LBrace | Token::LBracket => depth += 1,
                Token::RParen | Token::RBrace | Token::RBracket if depth > 0 => depth -= 1,
                Token::Comma | Token::RBrace | Token::RBracket if depth == 0 => return Ok(()),
                Token::RParen => return Err(self.error("Unbalanced ')'")),
                _ => {}
            }
            self.advance();
        }

        Err(self.error("Unexpected end of input inside value"))
    }

    fn continues_expression(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::Plus)
                | Some(Token::Minus)
                | Some(Token::Star)
                | Some(Token::Slash)
                | Some(Token::Operator(_))
                | Some(Token::Dot)
                | Some(Token::LParen)
                | Some(Token::LBracket)
        )
    }

    // ==================== Helper Methods ====================

    fn match_token(&mut self, kind: &Token) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: &Token) -> bool {
        match self.peek() {
            Some(token) => std::mem::discriminant(token) == std::mem::discriminant(kind),
            None => false,
        }
    }

    fn advance(&mut self) {
        if self.current < self.tokens.len() {
            self.current += 1;
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.token_at(self.current)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.token_at(self.current + offset)
    }

    fn token_at(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index).map(|t| &t.token)
    }

    fn consume(&mut self, kind: &Token, message: &str) -> Result<(), ReadError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn error(&self, message: &str) -> ReadError {
        ReadError::Syntax {
            location: SourceLocation::from_offset(self.source, self.current_offset()),
            message: message.to_string(),
        }
    }
}

fn number_value(text: &str, negative: bool) -> Value {
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"));

    if let Some(digits) = hex {
        if let Ok(n) = i64::from_str_radix(digits, 16) {
            return Value::Number(Number::from(if negative { -n } else { n }));
        }
    } else if let Ok(n) = text.parse::<i64>() {
        return Value::Number(Number::from(if negative { -n } else { n }));
    }

    let parsed = match hex {
        Some(digits) => u128::from_str_radix(digits, 16).ok().map(|n| n as f64),
        None => text.parse::<f64>().ok(),
    };

    parsed
        .map(|n| if negative { -n } else { n })
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
