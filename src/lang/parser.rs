//! The Parser module takes a token stream from the lexer
//! and converts it into a list of statements.
//!
//! Every malformed statement is handled the same way: a `ParseError`
//! is reported, the token at which the mismatch was found is dropped,
//! and parsing resumes with the next statement.
use std::collections::{HashSet, VecDeque};

use super::ast::*;
use super::error::ParseError;
use super::lexer::{Token, TokenKind, KEYWORDS};

pub struct Parser {
    tokens: VecDeque<Token>,
    eof:    Token,
    ast:    Vec<Node>,
    errors: Vec<ParseError>,
    labels: HashSet<String>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens = VecDeque::from(tokens);
        let eof = match tokens.back().map(|tok| (tok.kind, tok.line, tok.column)) {
            Some((TokenKind::EndOfInput, _, _)) => tokens.pop_back(),
            Some((_, line, column)) => Some(Token::new(TokenKind::EndOfInput, "", line, column)),
            None => None,
        }.unwrap_or_else(|| Token::new(TokenKind::EndOfInput, "", 1, 0));

        let capacity = tokens.len() / 2 + 1;
        Parser {
            tokens,
            eof,
            ast: Vec::with_capacity(capacity),
            errors: Vec::new(),
            labels: HashSet::new(),
        }
    }

    /// Run the parser, consuming itself and returning the statements
    /// together with every diagnostic reported along the way.
    pub fn run(mut self) -> (Vec<Node>, Vec<ParseError>) {
        'mainloop: loop {
            self.skip_newlines();
            if self.at_end() {
                break 'mainloop;
            }

            match self.statement() {
                Ok(node) => {
                    trace!("parsed `{}`", node);
                    self.ast.push(node);
                }
                Err(e) => self.report(e),
            }
        }

        if !self.errors.is_empty() {
            warn!("parsing finished with {} error(s); malformed statements were skipped", self.errors.len());
        }
        info!("parsed {} statement(s)", self.ast.len());

        (self.ast, self.errors)
    }

    fn report(&mut self, e: ParseError) {
        error!("{}", e);
        if let ParseError::Unexpected { .. } = e {
            self.consume();
        }
        self.errors.push(e);
    }

    fn statement(&mut self) -> Result<Node, ParseError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Keyword => match tok.text.as_str() {
                "let"   => return self.assignment(),
                "cmp"   => return self.compare(),
                "print" => return self.print(),
                kw => {
                    if let Some(op) = BinaryOperator::from_keyword(kw) {
                        return self.binary_op(op);
                    }
                    if let Some(kind) = JumpKind::from_keyword(kw) {
                        return self.jump(kind);
                    }
                }
            },
            TokenKind::Label => return self.label(),
            TokenKind::Integer | TokenKind::Identifier => {
                return Ok(Node::Expression(self.expression("a statement")?));
            }
            _ => {}
        }
        Err(ParseError::unexpected("a statement", tok))
    }

    /// let IDENT = EXPR
    fn assignment(&mut self) -> Result<Node, ParseError> {
        self.consume();
        let target = self.expect(TokenKind::Identifier, "a register name after `let`")?;
        self.expect(TokenKind::Equals, "`=` after the register name")?;
        let value = self.expression("an integer or register name after `=`")?;
        Ok(Node::Assignment { target: target.text, value })
    }

    /// (add|sub|mul|div) IDENT , EXPR
    fn binary_op(&mut self, op: BinaryOperator) -> Result<Node, ParseError> {
        self.consume();
        let left = self.expect(
            TokenKind::Identifier,
            format!("a register name after `{}`", op.keyword()),
        )?;
        self.expect(TokenKind::Comma, format!("`,` after the register in `{}`", op.keyword()))?;
        let right = self.expression(format!("an integer or register name as the second operand of `{}`", op.keyword()))?;
        Ok(Node::BinaryOp { left: left.text, op, right })
    }

    /// (jmp|je|jne|jl|jle|jg|jge) IDENT
    fn jump(&mut self, kind: JumpKind) -> Result<Node, ParseError> {
        self.consume();
        let target = self.expect(
            TokenKind::Identifier,
            format!("a label name after `{}`", kind.keyword()),
        )?;
        Ok(Node::Jump { kind, target: target.text })
    }

    /// cmp EXPR , EXPR
    fn compare(&mut self) -> Result<Node, ParseError> {
        self.consume();
        let left = self.expression("an integer or register name after `cmp`")?;
        self.expect(TokenKind::Comma, "`,` after the first operand of `cmp`")?;
        let right = self.expression("an integer or register name as the second operand of `cmp`")?;
        Ok(Node::Compare { left, right })
    }

    /// print EXPR
    fn print(&mut self) -> Result<Node, ParseError> {
        self.consume();
        let expr = self.expression("an integer or register name after `print`")?;
        Ok(Node::Print(expr))
    }

    /// Keyword-named labels could never be jumped to, so they are rejected
    /// like redefinitions.
    fn label(&mut self) -> Result<Node, ParseError> {
        let tok = self.bump();

        if KEYWORDS.contains(&tok.text.as_str()) {
            return Err(ParseError::ReservedLabel {
                name:   tok.text,
                line:   tok.line,
                column: tok.column,
            });
        }

        if !self.labels.insert(tok.text.clone()) {
            return Err(ParseError::DuplicateLabel {
                name:   tok.text,
                line:   tok.line,
                column: tok.column,
            });
        }
        Ok(Node::Label(tok.text))
    }

    fn expression<S: Into<String>>(&mut self, expected: S) -> Result<Expr, ParseError> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::Integer => Ok(Expr::Number(self.bump().text)),
            TokenKind::Identifier => Ok(Expr::Identifier(self.bump().text)),
            _ => Err(ParseError::unexpected(expected, self.peek().clone())),
        }
    }

    /// Consumes the current token if it is of the given kind. On a mismatch
    /// the token is left in place for `report` to drop.
    fn expect<S: Into<String>>(&mut self, kind: TokenKind, expected: S) -> Result<Token, ParseError> {
        if self.peek().kind == kind {
            Ok(self.bump())
        } else {
            Err(ParseError::unexpected(expected, self.peek().clone()))
        }
    }

    fn skip_newlines(&mut self) {
        while self.peek().kind == TokenKind::Newline {
            self.consume();
        }
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfInput
    }

    /// Returns the current token without consuming it.
    #[inline]
    fn peek(&self) -> &Token {
        self.tokens.front().unwrap_or(&self.eof)
    }

    /// Pops a token off the input stream and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Like `consume`, for callers that have already peeked a real token.
    fn bump(&mut self) -> Token {
        let eof = &self.eof;
        self.tokens.pop_front().unwrap_or_else(|| eof.clone())
    }
}
