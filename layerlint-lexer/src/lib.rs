use logos::Logos;

/// Helper function to unescape JavaScript string literals
fn unescape_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('b') => result.push('\x08'),
            Some('f') => result.push('\x0C'),
            Some('v') => result.push('\x0B'),
            Some('0') => result.push('\0'),
            Some('x') => {
                // Latin-1 escape: \xHH
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut result, &hex);
            }
            Some('u') => {
                // Unicode escape: \uXXXX or \u{X...}
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                push_code_point(&mut result, &hex);
            }
            // Line continuation
            Some('\n') => {}
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            // \" \' \\ \/ and any other escaped character stand for themselves
            Some(c) => result.push(c),
            None => result.push('\\'),
        }
    }

    result
}

fn push_code_point(result: &mut String, hex: &str) {
    if let Ok(code) = u32::from_str_radix(hex, 16) {
        if let Some(c) = char::from_u32(code) {
            result.push(c);
        }
    }
}

/// Token types for require.js configuration sources.
///
/// Only the subset of JavaScript needed to locate and read a configuration
/// object literal gets its own variant; every other operator collapses into
/// [`Token::Operator`].
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f\u{FEFF}\u{A0}]+")]
pub enum Token {
    // Keywords
    #[token("var")]
    Var,
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("function")]
    Function,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("undefined")]
    Undefined,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // Everything else: comparison, arrows, logical and arithmetic operators
    #[regex(r"===?|!==?|=>|[%!?<>&|^~]+|\+\+|--", |lex| lex.slice().to_string())]
    Operator(String),

    // Literals
    // Kept as source text so the reader can decide between integer and float
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    NumberLiteral(String),

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#, |lex| {
        let s = lex.slice();
        unescape_string(&s[1..s.len()-1])
    })]
    #[regex(r#"'([^'\\\n]|\\(.|\n))*'"#, |lex| {
        let s = lex.slice();
        unescape_string(&s[1..s.len()-1])
    })]
    StringLiteral(String),

    // Template literals are never config values we can read, keep the raw body
    #[regex(r"`[^`]*`", |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    TemplateLiteral(String),

    #[regex(r"[\p{XID_Start}_$][\p{XID_Continue}$]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,
}

/// Skip to the closing `*/`; an unterminated comment is an invalid token
fn block_comment(lex: &mut logos::Lexer<Token>) -> logos::FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            logos::FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            logos::FilterResult::Error(())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Token>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: Token::lexer(source),
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Result<TokenSpan, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let span = self.inner.span();

        match token {
            Ok(tok) => Some(Ok(TokenSpan { token: tok, span })),
            Err(_) => Some(Err(LexError::InvalidToken { span: span.clone() })),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("Invalid token at {span:?}")]
    InvalidToken { span: std::ops::Range<usize> },
}

impl LexError {
    pub fn span(&self) -> std::ops::Range<usize> {
        match self {
            LexError::InvalidToken { span } => span.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        Lexer::new(source).map(|r| r.unwrap().token).collect()
    }

    #[test]
    fn test_keywords() {
        let source = "var let const function true false null undefined";
        let mut lexer = Lexer::new(source);

        assert_eq!(lexer.next().unwrap().unwrap().token, Token::Var);
        assert_eq!(lexer.next().unwrap().unwrap().token, Token::Let);
        assert_eq!(lexer.next().unwrap().unwrap().token, Token::Const);
        assert_eq!(lexer.next().unwrap().unwrap().token, Token::Function);
        assert_eq!(lexer.next().unwrap().unwrap().token, Token::True);
        assert_eq!(lexer.next().unwrap().unwrap().token, Token::False);
        assert_eq!(lexer.next().unwrap().unwrap().token, Token::Null);
        assert_eq!(lexer.next().unwrap().unwrap().token, Token::Undefined);
    }

    #[test]
    fn test_string_quotes() {
        let source = r#""double" 'single' 'it\'s' "say \"hi\"""#;

        assert_eq!(
            tokens(source),
            vec![
                Token::StringLiteral("double".to_string()),
                Token::StringLiteral("single".to_string()),
                Token::StringLiteral("it's".to_string()),
                Token::StringLiteral("say \"hi\"".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let source = r#"'a\/b' "A\x42\u{43}" 'tab\there'"#;

        assert_eq!(
            tokens(source),
            vec![
                Token::StringLiteral("a/b".to_string()),
                Token::StringLiteral("ABC".to_string()),
                Token::StringLiteral("tab\there".to_string()),
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        let source = "require requirejs $ _private jQuery2";

        assert_eq!(
            tokens(source),
            vec![
                Token::Ident("require".to_string()),
                Token::Ident("requirejs".to_string()),
                Token::Ident("$".to_string()),
                Token::Ident("_private".to_string()),
                Token::Ident("jQuery2".to_string()),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let source = "42 3.14 .5 1e3 0xFF";

        assert_eq!(
            tokens(source),
            vec![
                Token::NumberLiteral("42".to_string()),
                Token::NumberLiteral("3.14".to_string()),
                Token::NumberLiteral(".5".to_string()),
                Token::NumberLiteral("1e3".to_string()),
                Token::NumberLiteral("0xFF".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "// line\nfoo /* block ** with stars */ bar /**/ /** doc */ baz /* a **/";

        assert_eq!(
            tokens(source),
            vec![
                Token::Ident("foo".to_string()),
                Token::Ident("bar".to_string()),
                Token::Ident("baz".to_string()),
            ]
        );
    }

    #[test]
    fn test_leading_block_comment() {
        assert_eq!(
            tokens("/* global requirejs */ a"),
            vec![Token::Ident("a".to_string())]
        );
        assert_eq!(tokens("/* x */ a"), vec![Token::Ident("a".to_string())]);
        assert_eq!(tokens("/**/ a"), vec![Token::Ident("a".to_string())]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let result: Result<Vec<_>, _> = Lexer::new("a /* never closed").collect();
        assert_eq!(result.unwrap_err().span(), 2..17);
    }

    #[test]
    fn test_non_ascii_identifiers() {
        assert_eq!(
            tokens("café naïve $el π2"),
            vec![
                Token::Ident("café".to_string()),
                Token::Ident("naïve".to_string()),
                Token::Ident("$el".to_string()),
                Token::Ident("π2".to_string()),
            ]
        );
    }

    #[test]
    fn test_require_config_call() {
        let source = "require.config({ paths: { vendor: 'lib' } });";
        let tokens = tokens(source);

        assert_eq!(tokens[0], Token::Ident("require".to_string()));
        assert_eq!(tokens[1], Token::Dot);
        assert_eq!(tokens[2], Token::Ident("config".to_string()));
        assert_eq!(tokens[3], Token::LParen);
        assert_eq!(tokens[4], Token::LBrace);
        assert_eq!(tokens[5], Token::Ident("paths".to_string()));
        assert_eq!(tokens[6], Token::Colon);
        assert_eq!(tokens[12], Token::RBrace);
        assert_eq!(tokens[13], Token::RParen);
        assert_eq!(tokens[14], Token::Semicolon);
    }

    #[test]
    fn test_operators() {
        let source = "a === b => !c || d - e";

        assert_eq!(
            tokens(source),
            vec![
                Token::Ident("a".to_string()),
                Token::Operator("===".to_string()),
                Token::Ident("b".to_string()),
                Token::Operator("=>".to_string()),
                Token::Operator("!".to_string()),
                Token::Ident("c".to_string()),
                Token::Operator("||".to_string()),
                Token::Ident("d".to_string()),
                Token::Minus,
                Token::Ident("e".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_token() {
        let result: Result<Vec<_>, _> = Lexer::new("foo # bar").collect();
        let err = result.unwrap_err();
        assert_eq!(err.span(), 4..5);
    }
}
