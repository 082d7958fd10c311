//! This lexer tokenizes ASMP source text.
//!
//! Tokenizing is total: characters that do not belong to the language
//! are stepped over without producing a token, and the output always
//! ends with a single `EndOfInput` token.
use std::fmt;

/// Words that are reserved for statements. Matching is case-sensitive.
pub const KEYWORDS: [&str; 14] = [
    "let", "add", "sub", "mul", "div",
    "cmp", "jmp", "je",  "jne", "jl",
    "jg",  "jle", "jge", "print",
];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Integer,
    Identifier,
    Keyword,
    Plus,
    Minus,
    Star,
    Slash,
    Equals,
    Comma,
    Newline,
    Label,
    Colon,
    EndOfInput,
}

/// A token carries its lexeme and the position of its first character.
/// Lines start at 1, columns at 0.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind:   TokenKind,
    pub text:   String,
    pub line:   usize,
    pub column: usize,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, text: S, line: usize, column: usize) -> Self {
        Token { kind, text: text.into(), line, column }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenKind::*;
        match self.kind {
            Integer    => write!(f, "integer `{}`", self.text),
            Identifier => write!(f, "identifier `{}`", self.text),
            Keyword    => write!(f, "keyword `{}`", self.text),
            Label      => write!(f, "label `{}:`", self.text),
            Newline    => write!(f, "newline"),
            EndOfInput => write!(f, "end of input"),
            _          => write!(f, "`{}`", self.text),
        }
    }
}

/// Converts source text into a flat sequence of tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).run()
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Lexer {
    chars:  Vec<char>,
    pos:    usize,
    line:   usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Lexer {
            chars:  source.chars().collect(),
            pos:    0,
            line:   1,
            column: 0,
            tokens: Vec::with_capacity(source.len() / 2 + 1),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.current() {
            match c {
                ' ' | '\t' | '\r' => self.advance(),
                ';'  => self.skip_comment(),
                '\n' => self.single(TokenKind::Newline),
                '+'  => self.single(TokenKind::Plus),
                '-'  => self.single(TokenKind::Minus),
                '*'  => self.single(TokenKind::Star),
                '/'  => self.single(TokenKind::Slash),
                '='  => self.single(TokenKind::Equals),
                ','  => self.single(TokenKind::Comma),
                ':'  => self.single(TokenKind::Colon),
                c if c.is_ascii_digit() => self.number(),
                c if is_word_start(c)   => self.word(),
                _ => {
                    debug!("skipping unrecognized character {:?} at {}:{}", c, self.line, self.column);
                    self.advance();
                }
            }
        }

        let (line, column) = (self.line, self.column);
        self.tokens.push(Token::new(TokenKind::EndOfInput, "", line, column));
        self.tokens
    }

    #[inline]
    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
            self.pos += 1;
        }
    }

    /// Emits a one-character token for the current character.
    fn single(&mut self, kind: TokenKind) {
        if let Some(c) = self.current() {
            self.tokens.push(Token::new(kind, c.to_string(), self.line, self.column));
            self.advance();
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.current() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn take_while(&mut self, pred: fn(char) -> bool) -> String {
        let mut sb = String::new();
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            sb.push(c);
            self.advance();
        }
        sb
    }

    fn number(&mut self) {
        let (line, column) = (self.line, self.column);
        let text = self.take_while(|c| c.is_ascii_digit());
        self.tokens.push(Token::new(TokenKind::Integer, text, line, column));
    }

    /// A word directly followed by a colon is a label definition; the colon
    /// is consumed but not kept in the lexeme. Otherwise the word is a
    /// keyword or an identifier.
    fn word(&mut self) {
        let (line, column) = (self.line, self.column);
        let text = self.take_while(is_word_char);

        let kind = if self.current() == Some(':') {
            self.advance();
            TokenKind::Label
        } else if KEYWORDS.contains(&text.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.tokens.push(Token::new(kind, text, line, column));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::TokenKind::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(tokenize(""), vec![Token::new(EndOfInput, "", 1, 0)]);
    }

    #[test]
    fn test_keywords() {
        for kw in KEYWORDS.iter() {
            let toks = tokenize(kw);
            assert_eq!(toks[0], Token::new(Keyword, *kw, 1, 0));
            assert_eq!(toks.len(), 2);
        }

        // Keywords are case-sensitive.
        assert_eq!(tokenize("LET")[0].kind, Identifier);
        assert_eq!(tokenize("Print")[0].kind, Identifier);
        assert_eq!(tokenize("letter")[0].kind, Identifier);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(tokenize("_tmp1")[0], Token::new(Identifier, "_tmp1", 1, 0));
        assert_eq!(tokenize("r2d2")[0], Token::new(Identifier, "r2d2", 1, 0));
    }

    #[test]
    fn test_integers() {
        assert_eq!(tokenize("0")[0], Token::new(Integer, "0", 1, 0));
        assert_eq!(tokenize("007")[0], Token::new(Integer, "007", 1, 0));
        assert_eq!(tokenize("99999999999")[0], Token::new(Integer, "99999999999", 1, 0));

        // No radix prefixes: the letters start a new word.
        let toks = tokenize("0x1F");
        assert_eq!(toks[0], Token::new(Integer, "0", 1, 0));
        assert_eq!(toks[1], Token::new(Identifier, "x1F", 1, 1));
    }

    #[test]
    fn test_labels() {
        assert_eq!(tokenize("done:")[0], Token::new(Label, "done", 1, 0));
        assert_eq!(tokenize("_start:")[0], Token::new(Label, "_start", 1, 0));
        // A keyword-shaped word followed by a colon is still a label.
        assert_eq!(tokenize("print:")[0], Token::new(Label, "print", 1, 0));

        // Whitespace before the colon breaks the label.
        assert_eq!(kinds("done :"), vec![Identifier, Colon, EndOfInput]);
        assert_eq!(kinds(":"), vec![Colon, EndOfInput]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("+ - * / = , :"),
            vec![Plus, Minus, Star, Slash, Equals, Comma, Colon, EndOfInput]
        );
        assert_eq!(tokenize("-5")[0], Token::new(Minus, "-", 1, 0));
        assert_eq!(tokenize("-5")[1], Token::new(Integer, "5", 1, 1));
    }

    #[test]
    fn test_comments() {
        assert_eq!(kinds("; nothing here"), vec![EndOfInput]);
        assert_eq!(
            kinds("print 1 ; print 2\nprint 3"),
            vec![Keyword, Integer, Newline, Keyword, Integer, EndOfInput]
        );
    }

    #[test]
    fn test_unrecognized_characters_are_skipped() {
        assert_eq!(kinds("# @ $ ! ( ) ?"), vec![EndOfInput]);
        let toks = tokenize("let x = 5 #");
        assert_eq!(toks.len(), 5);
        assert_eq!(toks[4], Token::new(EndOfInput, "", 1, 11));
        assert_eq!(kinds("é1"), vec![Integer, EndOfInput]);
    }

    #[test]
    fn test_invalid_utf8_is_skipped() {
        let bytes: &[u8] = b"print 1 ; caf\xe9\nprint \xe9\xff2\n";
        let source = String::from_utf8_lossy(bytes);
        let toks = tokenize(&source);
        assert_eq!(
            toks.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![Keyword, Integer, Newline, Keyword, Integer, Newline, EndOfInput]
        );
        assert_eq!(toks[0], Token::new(Keyword, "print", 1, 0));
        assert_eq!(toks[1], Token::new(Integer, "1", 1, 6));
        assert_eq!(toks[4], Token::new(Integer, "2", 2, 8));
    }

    #[test]
    fn test_positions() {
        let toks = tokenize("let x = 5\n  print x\n");
        assert_eq!(toks, vec![
            Token::new(Keyword,    "let",   1, 0),
            Token::new(Identifier, "x",     1, 4),
            Token::new(Equals,     "=",     1, 6),
            Token::new(Integer,    "5",     1, 8),
            Token::new(Newline,    "\n",    1, 9),
            Token::new(Keyword,    "print", 2, 2),
            Token::new(Identifier, "x",     2, 8),
            Token::new(Newline,    "\n",    2, 9),
            Token::new(EndOfInput, "",      3, 0),
        ]);
    }

    #[test]
    fn test_tokenize() {
        let src = "
        let x = 5
        add x, 3\r
        cmp x, 8
        je done ; skip the zero
        print 0
        done:
        print x
        ";
        assert_eq!(kinds(src), vec![
            Newline,
            Keyword, Identifier, Equals, Integer, Newline,
            Keyword, Identifier, Comma, Integer, Newline,
            Keyword, Identifier, Comma, Integer, Newline,
            Keyword, Identifier, Newline,
            Keyword, Integer, Newline,
            Label, Newline,
            Keyword, Identifier, Newline,
            EndOfInput,
        ]);
    }
}
