use crate::error::ParseError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `<name`
    TagOpen(String),
    /// `</name>`
    TagClose(String),
    /// `name` inside a tag.
    AttrName(String),
    Eq,
    /// Quoted attribute value, entities decoded.
    AttrValue(String),
    /// `>`
    TagEnd,
    /// `/>`
    SelfClose,
    /// Character data between tags (entities decoded; CDATA verbatim).
    Text(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

/// Context-sensitive XML lexer: inside a tag it produces attribute tokens,
/// outside it produces text. Comments, processing instructions and
/// `<!DOCTYPE>` are skipped.
pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
    col: usize,
    in_tag: bool,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, col: 1, in_tag: false }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let eof = tok.token == Token::Eof;
            // Whitespace-only text between tags carries no meaning.
            if !matches!(&tok.token, Token::Text(t) if t.trim().is_empty()) {
                tokens.push(tok);
            }
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line, self.col)
    }

    fn at(&self, token: Token, line: usize, col: usize) -> TokenWithPos {
        TokenWithPos { token, line, col }
    }

    /// Skips until `end` (consumed). Errors with `what` if input runs out.
    fn skip_past(&mut self, end: &str, what: &str) -> Result<(), ParseError> {
        let (line, col) = (self.line, self.col);
        loop {
            if self.rest().starts_with(end) {
                self.advance_n(end.chars().count());
                return Ok(());
            }
            if self.advance().is_none() {
                return Err(ParseError::new(format!("unterminated {what}"), line, col));
            }
        }
    }

    fn next_token(&mut self) -> Result<TokenWithPos, ParseError> {
        if self.in_tag {
            self.next_in_tag()
        } else {
            self.next_in_content()
        }
    }

    // ── content ───────────────────────────────────────────────────────────

    fn next_in_content(&mut self) -> Result<TokenWithPos, ParseError> {
        loop {
            let (line, col) = (self.line, self.col);
            let rest = self.rest();

            if rest.is_empty() {
                return Ok(self.at(Token::Eof, line, col));
            }
            if rest.starts_with("<!--") {
                self.advance_n(4);
                self.skip_past("-->", "comment")?;
                continue;
            }
            if rest.starts_with("<?") {
                self.advance_n(2);
                self.skip_past("?>", "processing instruction")?;
                continue;
            }
            if rest.starts_with("<![CDATA[") {
                self.advance_n(9);
                let start = self.pos;
                self.skip_past("]]>", "CDATA section")?;
                let text = self.src[start..self.pos - 3].to_string();
                return Ok(self.at(Token::Text(text), line, col));
            }
            if rest.starts_with("<!") {
                self.advance_n(2);
                self.skip_past(">", "declaration")?;
                continue;
            }
            if rest.starts_with("</") {
                self.advance_n(2);
                let name = self.lex_name()?;
                self.skip_ws();
                if self.advance() != Some('>') {
                    return Err(self.err(format!("expected '>' to close </{name}")));
                }
                return Ok(self.at(Token::TagClose(name), line, col));
            }
            if rest.starts_with('<') {
                self.advance();
                let name = self.lex_name()?;
                self.in_tag = true;
                return Ok(self.at(Token::TagOpen(name), line, col));
            }

            let start = self.pos;
            while !matches!(self.peek(), None | Some('<')) {
                self.advance();
            }
            let raw = &self.src[start..self.pos];
            let text = decode_entities(raw).map_err(|m| ParseError::new(m, line, col))?;
            return Ok(self.at(Token::Text(text), line, col));
        }
    }

    // ── tag interior ──────────────────────────────────────────────────────

    fn next_in_tag(&mut self) -> Result<TokenWithPos, ParseError> {
        self.skip_ws();
        let (line, col) = (self.line, self.col);

        match self.peek() {
            None => Err(self.err("unexpected end of input inside tag")),
            Some('>') => {
                self.advance();
                self.in_tag = false;
                Ok(self.at(Token::TagEnd, line, col))
            }
            Some('/') => {
                self.advance();
                if self.advance() != Some('>') {
                    return Err(ParseError::new("expected '>' after '/'", line, col));
                }
                self.in_tag = false;
                Ok(self.at(Token::SelfClose, line, col))
            }
            Some('=') => {
                self.advance();
                Ok(self.at(Token::Eq, line, col))
            }
            Some(q @ ('"' | '\'')) => {
                self.advance();
                let start = self.pos;
                loop {
                    match self.peek() {
                        None => return Err(ParseError::new("unterminated attribute value", line, col)),
                        Some(c) if c == q => break,
                        Some('<') => return Err(self.err("'<' not allowed in attribute value")),
                        Some(_) => {
                            self.advance();
                        }
                    }
                }
                let src = self.src;
                let raw = &src[start..self.pos];
                self.advance();
                let value = decode_entities(raw).map_err(|m| ParseError::new(m, line, col))?;
                Ok(self.at(Token::AttrValue(value), line, col))
            }
            Some(c) if is_attr_name_start(c) => {
                let name = self.lex_name_from(is_attr_name_start)?;
                Ok(self.at(Token::AttrName(name), line, col))
            }
            Some(other) => Err(self.err(format!("unexpected character {other:?} in tag"))),
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn lex_name(&mut self) -> Result<String, ParseError> {
        self.lex_name_from(is_name_start)
    }

    fn lex_name_from(&mut self, starts: fn(char) -> bool) -> Result<String, ParseError> {
        match self.peek() {
            Some(c) if starts(c) => {}
            Some(c) => return Err(self.err(format!("invalid name start {c:?}"))),
            None => return Err(self.err("expected a name, got end of input")),
        }
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_name_char(c)) {
            self.advance();
        }
        Ok(self.src[start..self.pos].to_string())
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

/// Attribute names may also start with a digit (`24hour`).
fn is_attr_name_start(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-' || c == '.'
}

/// Decodes the five predefined entities plus numeric character references.
pub fn decode_entities(raw: &str) -> Result<String, String> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let semi = after.find(';').ok_or_else(|| "unterminated entity reference".to_string())?;
        let name = &after[..semi];
        let ch = match name {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            n if n.starts_with("#x") || n.starts_with("#X") => u32::from_str_radix(&n[2..], 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| format!("invalid character reference &{n};"))?,
            n if n.starts_with('#') => n[1..]
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| format!("invalid character reference &{n};"))?,
            n => return Err(format!("unknown entity &{n};")),
        };
        out.push(ch);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn self_closing_tag_with_attrs() {
        assert_eq!(
            kinds(r#"<progress id="cpu" bg='#333'/>"#),
            vec![
                Token::TagOpen("progress".into()),
                Token::AttrName("id".into()),
                Token::Eq,
                Token::AttrValue("cpu".into()),
                Token::AttrName("bg".into()),
                Token::Eq,
                Token::AttrValue("#333".into()),
                Token::SelfClose,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn comments_and_declarations_are_skipped() {
        let toks = kinds("<?xml version=\"1.0\"?>\n<!-- hi -->\n<!DOCTYPE x>\n<a></a>");
        assert_eq!(toks, vec![Token::TagOpen("a".into()), Token::TagEnd, Token::TagClose("a".into()), Token::Eof]);
    }

    #[test]
    fn entities_and_cdata() {
        let toks = kinds("<t>a &amp; b &#65;<![CDATA[<raw>]]></t>");
        assert_eq!(toks[2], Token::Text("a & b A".into()));
        assert_eq!(toks[3], Token::Text("<raw>".into()));
    }

    #[test]
    fn attribute_names_may_start_with_a_digit() {
        let toks = kinds(r#"<clock 24hour="true"/>"#);
        assert_eq!(toks[1], Token::AttrName("24hour".into()));
        assert!(Lexer::new("<24clock/>").tokenize().is_err());
    }

    #[test]
    fn positions_are_one_based() {
        let toks = Lexer::new("\n  <a/>").tokenize().unwrap();
        assert_eq!((toks[0].line, toks[0].col), (2, 3));
    }

    #[test]
    fn unterminated_comment_reports_start() {
        let e = Lexer::new("\n<!-- nope").tokenize().unwrap_err();
        assert_eq!((e.line, e.col), (2, 5));
    }
}
