//! Lexer for quill arithmetic expressions.

use logos::Logos;

/// Tokens of an operand expression.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[token("pi")]
    Pi,

    #[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Variable(String),

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Pi => write!(f, "pi"),
            Token::Number(v) => write!(f, "{v}"),
            Token::Variable(name) => write!(f, "{name}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// A token with its span information.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize an expression.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (std::ops::Range<usize>, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if let Ok(token) = result {
            tokens.push(Ok(SpannedToken { token, span }));
        } else {
            let slice = source[span.clone()].to_string();
            tokens.push(Err((span, slice)));
        }
    }

    tokens
}

/// Whether `word` is a well-formed `$name` variable token.
pub fn is_variable(word: &str) -> bool {
    let mut lexer = Token::lexer(word);
    matches!(lexer.next(), Some(Ok(Token::Variable(_)))) && lexer.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .filter_map(Result::ok)
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokens("12"), vec![Token::Number(12.0)]);
        assert_eq!(tokens("1.5"), vec![Token::Number(1.5)]);
        assert_eq!(tokens(".5"), vec![Token::Number(0.5)]);
        assert_eq!(tokens("2."), vec![Token::Number(2.0)]);
    }

    #[test]
    fn test_angle_expression() {
        assert_eq!(
            tokens("pi/(2*$k)"),
            vec![
                Token::Pi,
                Token::Slash,
                Token::LParen,
                Token::Number(2.0),
                Token::Star,
                Token::Variable("$k".into()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_invalid_token_reported_with_span() {
        let results = tokenize("1+q");
        let err = results.into_iter().find_map(Result::err).unwrap();
        assert_eq!(err.0, 2..3);
        assert_eq!(err.1, "q");
    }

    #[test]
    fn test_is_variable() {
        assert!(is_variable("$i"));
        assert!(is_variable("$qubit_2"));
        assert!(!is_variable("i"));
        assert!(!is_variable("$"));
        assert!(!is_variable("$1"));
        assert!(!is_variable("$a+1"));
    }
}
