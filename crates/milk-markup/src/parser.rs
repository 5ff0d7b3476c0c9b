use crate::ast::{Attr, Document, Element, Node};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .map(|t| (t.line, t.col))
            .or_else(|| self.tokens.last().map(|t| (t.line, t.col)))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos).map(|t| t.token.clone()).unwrap_or(Token::Eof);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        let (line, col) = self.current_pos();
        ParseError::new(msg, line, col)
    }

    // ── Document ──────────────────────────────────────────────────────────

    pub fn parse_document(&mut self) -> Result<Document, ParseError> {
        match self.peek() {
            Token::TagOpen(_) => {}
            Token::Eof => return Err(self.err("document is empty")),
            tok => return Err(self.err(format!("expected root element, got {tok:?}"))),
        }
        let root = self.parse_element()?;

        match self.peek() {
            Token::Eof => Ok(Document { root }),
            Token::TagOpen(name) => Err(self.err(format!("extra content after root element: <{name}>"))),
            tok => Err(self.err(format!("extra content after root element: {tok:?}"))),
        }
    }

    // ── Element ───────────────────────────────────────────────────────────

    fn parse_element(&mut self) -> Result<Element, ParseError> {
        let (line, _) = self.current_pos();
        let name = match self.advance() {
            Token::TagOpen(n) => n,
            tok => return Err(self.err(format!("expected start tag, got {tok:?}"))),
        };
        let mut element = Element { name, line, ..Element::default() };

        // Attributes until `>` or `/>`.
        loop {
            match self.advance() {
                Token::AttrName(attr) => {
                    if self.advance() != Token::Eq {
                        return Err(self.err(format!("expected '=' after attribute {attr:?}")));
                    }
                    match self.advance() {
                        Token::AttrValue(value) => element.attrs.push(Attr { name: attr, value }),
                        tok => return Err(self.err(format!("expected quoted value for {attr:?}, got {tok:?}"))),
                    }
                }
                Token::SelfClose => return Ok(element),
                Token::TagEnd => break,
                tok => return Err(self.err(format!("unexpected {tok:?} in <{}>", element.name))),
            }
        }

        // Content until the matching close tag.
        loop {
            match self.peek() {
                Token::TagOpen(_) => {
                    let child = self.parse_element()?;
                    element.children.push(Node::Element(child));
                }
                Token::Text(_) => {
                    if let Token::Text(t) = self.advance() {
                        element.children.push(Node::Text(t));
                    }
                }
                Token::TagClose(close) => {
                    if *close != element.name {
                        return Err(self.err(format!(
                            "mismatched closing tag: expected </{}>, found </{close}>",
                            element.name
                        )));
                    }
                    self.advance();
                    return Ok(element);
                }
                Token::Eof => return Err(self.err(format!("unclosed element <{}>", element.name))),
                tok => return Err(self.err(format!("unexpected {tok:?} in content"))),
            }
        }
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parse an XML source string into a [`Document`].
pub fn parse_str(src: &str) -> Result<Document, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_document()
}
