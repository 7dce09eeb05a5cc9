//! # Dump Decoder
//!
//! Recursive descent decoder for the compiler's S-expression dump.
//!
//! ## Grammar
//!
//! ```text
//! node       = "(" name { attribute | key value | node } ")"
//! key        = word ( "=" | ":" ) | "interface type="
//! attribute  = double-quoted | single-quoted | bracketed | angle-bracketed
//!            | declaration-location | declaration | identifier
//! ```
//!
//! The order of the attribute alternatives matters: each one is a stricter
//! grammar than the next, so a declaration location is tried before a plain
//! declaration, which is tried before an identifier.
//!
//! ## Example
//!
//! ```rust
//! use dump_decoder::decoder::Decoder;
//!
//! let mut decoder = Decoder::new("(integer_literal_expr type='Int' value=5)");
//! let node = decoder.decode().unwrap();
//! assert_eq!(node.name, "Integer Literal Expression");
//! assert_eq!(node.attribute("value"), Some("5"));
//! ```

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeErrorKind};
use crate::names::expand_node_name;
use crate::raw_node::RawNode;
use config::constants::{
    EXTENSION_CONTINUATION, INTERFACE_TYPE_KEY, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES,
};
use stacker::maybe_grow;

// =============================================================================
// DECODER
// =============================================================================

/// Decoder state: a cursor over the dump.
pub struct Decoder<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Decoder<'a> {
    /// Create a decoder at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Unread part of the dump.
    pub fn remaining(&self) -> &'a str {
        self.cursor.remaining()
    }

    /// Decode one node, skipping leading whitespace.
    ///
    /// ## Returns
    ///
    /// The node; the cursor is left after its closing parenthesis and any
    /// whitespace that follows it.
    pub fn decode(&mut self) -> Result<RawNode, DecodeError> {
        self.cursor.skip_whitespace();
        self.decode_node()
    }

    fn decode_node(&mut self) -> Result<RawNode, DecodeError> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.decode_node_inner()
        })
    }

    fn decode_node_inner(&mut self) -> Result<RawNode, DecodeError> {
        self.read_opening_parenthesis()?;
        let name = expand_node_name(&self.read_identifier());
        let mut node = RawNode::new(name);

        loop {
            self.cursor.skip_whitespace();
            let before = self.cursor.position().byte;

            match self.cursor.peek() {
                None => {
                    return Err(self.error(DecodeErrorKind::UnexpectedEnd {
                        expected: format!("')' closing '{}'", node.name),
                    }))
                }
                Some(')') => {
                    self.read_closing_parenthesis()?;
                    break;
                }
                Some('(') => {
                    let subtree = self.decode_node()?;
                    node.subtrees.push(subtree);
                }
                Some(_) => {
                    if let Some(key) = self.read_key() {
                        let value = self.read_value(&key)?;
                        node.key_value_attributes.insert(key, value);
                    } else {
                        let attribute = self.read_standalone_attribute()?;
                        node.standalone_attributes.push(attribute);
                    }
                }
            }

            if self.cursor.position().byte == before {
                let found = self.cursor.peek().unwrap_or(' ');
                return Err(self.error(DecodeErrorKind::Stalled { found }));
            }
        }

        Ok(node)
    }

    // =========================================================================
    // PARENTHESES
    // =========================================================================

    fn read_opening_parenthesis(&mut self) -> Result<(), DecodeError> {
        self.expect('(')
    }

    fn read_closing_parenthesis(&mut self) -> Result<(), DecodeError> {
        self.expect(')')?;
        self.cursor.skip_whitespace();
        Ok(())
    }

    fn expect(&mut self, expected: char) -> Result<(), DecodeError> {
        match self.cursor.peek() {
            Some(c) if c == expected => {
                self.cursor.advance();
                Ok(())
            }
            Some(found) => Err(self.error(DecodeErrorKind::UnexpectedCharacter {
                expected: format!("'{}'", expected),
                found,
            })),
            None => Err(self.error(DecodeErrorKind::UnexpectedEnd {
                expected: format!("'{}'", expected),
            })),
        }
    }

    fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, self.cursor.position(), self.cursor.remaining())
    }

    // =========================================================================
    // KEYS AND VALUES
    // =========================================================================

    /// Read `key=` or `key: ` and return the key.
    ///
    /// A key is a run of characters other than whitespace, parentheses and
    /// quotes. A colon only ends a key when whitespace follows it, so
    /// locations such as `/a.swift:1:2` are not keys. Nothing is consumed
    /// when the text under the cursor is not a key.
    pub fn read_key(&mut self) -> Option<String> {
        if self.cursor.starts_with(INTERFACE_TYPE_KEY)
            && self.cursor.peek_nth(INTERFACE_TYPE_KEY.chars().count()) == Some('=')
        {
            self.cursor.advance_bytes(INTERFACE_TYPE_KEY.len() + 1);
            return Some(INTERFACE_TYPE_KEY.to_string());
        }

        let mut lookahead = self.cursor.clone();
        let mut key = String::new();
        let terminator = loop {
            match lookahead.peek() {
                Some('=') => break '=',
                Some(':') if lookahead.peek_nth(1).map_or(true, char::is_whitespace) => break ':',
                Some(c) if !is_key_delimiter(c) => {
                    key.push(c);
                    lookahead.advance();
                }
                _ => return None,
            }
        };

        if key.is_empty() {
            return None;
        }

        lookahead.advance();
        if terminator == ':' {
            lookahead.advance_while(|c| c == ' ');
        }
        self.cursor = lookahead;
        Some(key)
    }

    fn read_value(&mut self, key: &str) -> Result<String, DecodeError> {
        match key {
            "location" => match self.read_location() {
                Some(location) => Ok(location),
                None => self.read_standalone_attribute(),
            },
            "decl" | "bind" => {
                if let Some(declaration) = self.read_declaration_location() {
                    Ok(declaration)
                } else if let Some(declaration) = self.read_declaration() {
                    Ok(declaration)
                } else {
                    self.read_standalone_attribute()
                }
            }
            "inherits" => Ok(self.read_identifier_list()),
            "captures" if self.cursor.peek() == Some('(') => self.read_balanced('(', ')'),
            _ => self.read_standalone_attribute(),
        }
    }

    // =========================================================================
    // STANDALONE ATTRIBUTES
    // =========================================================================

    /// Read an unlabeled attribute, trying each attribute grammar in order.
    ///
    /// An opening parenthesis yields an empty string and consumes nothing;
    /// the subtree is read by the node loop.
    pub fn read_standalone_attribute(&mut self) -> Result<String, DecodeError> {
        match self.cursor.peek() {
            Some('(') => Ok(String::new()),
            Some('"') => self.read_double_quoted_string(),
            Some('\'') => self.read_single_quoted_string(),
            Some('[') => self.read_balanced('[', ']'),
            Some('<') => self.read_balanced('<', '>'),
            _ => {
                if let Some(declaration) = self.read_declaration_location() {
                    Ok(declaration)
                } else if let Some(declaration) = self.read_declaration() {
                    Ok(declaration)
                } else {
                    Ok(self.read_identifier())
                }
            }
        }
    }

    /// Read an identifier.
    ///
    /// Parentheses and angle brackets nest (the `>` of `->` does not count),
    /// so spaces inside them are kept. A line break followed by anything but
    /// indentation is dropped: the compiler sometimes breaks a single name
    /// across lines.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use dump_decoder::decoder::Decoder;
    ///
    /// let mut decoder = Decoder::new("foo(bar baz)qux rest");
    /// assert_eq!(decoder.read_identifier(), "foo(bar baz)qux");
    /// ```
    pub fn read_identifier(&mut self) -> String {
        let mut identifier = String::new();
        let mut nesting: i32 = 0;
        let mut escaping = false;

        while let Some(c) = self.cursor.peek() {
            if escaping {
                escaping = false;
            } else {
                match c {
                    '\\' => escaping = true,
                    '\n' => {
                        if is_spurious_line_break(&self.cursor) {
                            self.cursor.advance();
                            continue;
                        }
                        break;
                    }
                    ' ' | '\t' | '\r' if nesting <= 0 => break,
                    ')' if nesting <= 0 => break,
                    '(' | '<' => nesting += 1,
                    ')' => nesting -= 1,
                    '>' if !identifier.ends_with('-') => nesting -= 1,
                    _ => {}
                }
            }
            identifier.push(c);
            self.cursor.advance();
        }

        identifier
    }

    fn read_identifier_list(&mut self) -> String {
        let mut identifiers = Vec::new();
        loop {
            let identifier = self.read_identifier();
            match identifier.strip_suffix(',') {
                Some(stripped) => {
                    identifiers.push(stripped.to_string());
                    self.cursor.advance_while(|c| c == ' ');
                }
                None => {
                    identifiers.push(identifier);
                    break;
                }
            }
        }
        identifiers.join(", ")
    }

    fn read_double_quoted_string(&mut self) -> Result<String, DecodeError> {
        self.read_quoted('"')
    }

    /// Single-quoted strings may be comma-joined (`'',foo,'',bar`); the parts
    /// after a comma are read as further attributes and joined with `,`.
    fn read_single_quoted_string(&mut self) -> Result<String, DecodeError> {
        let mut text = self.read_quoted('\'')?;
        if self.cursor.peek() == Some(',') {
            self.cursor.advance();
            let rest = self.read_standalone_attribute()?;
            text.push(',');
            text.push_str(&rest);
        }
        Ok(text)
    }

    /// Read a quoted string without its quotes. Escapes are kept verbatim.
    fn read_quoted(&mut self, quote: char) -> Result<String, DecodeError> {
        self.expect(quote)?;
        let mut text = String::new();
        let mut escaping = false;
        loop {
            let Some(c) = self.cursor.advance() else {
                return Err(self.error(DecodeErrorKind::UnexpectedEnd {
                    expected: format!("closing {}", quote),
                }));
            };
            if escaping {
                escaping = false;
            } else if c == '\\' {
                escaping = true;
            } else if c == quote {
                break;
            }
            text.push(c);
        }
        Ok(text)
    }

    /// Read a balanced region, delimiters included.
    fn read_balanced(&mut self, open: char, close: char) -> Result<String, DecodeError> {
        self.expect(open)?;
        let mut text = String::from(open);
        let mut level = 1;
        while level > 0 {
            let previous = text.chars().last();
            let Some(c) = self.cursor.advance() else {
                return Err(self.error(DecodeErrorKind::UnexpectedEnd {
                    expected: format!("'{}'", close),
                }));
            };
            if c == open {
                level += 1;
            } else if c == close && !(close == '>' && previous == Some('-')) {
                level -= 1;
            }
            text.push(c);
        }
        Ok(text)
    }

    // =========================================================================
    // LOCATIONS AND DECLARATIONS
    // =========================================================================

    /// Read `path:line:column`.
    pub fn read_location(&mut self) -> Option<String> {
        let mut lookahead = self.cursor.clone();
        let location = scan_location(&mut lookahead)?;
        self.cursor = lookahead;
        Some(location)
    }

    /// Read `declaration@path:line:column`.
    pub fn read_declaration_location(&mut self) -> Option<String> {
        let mut lookahead = self.cursor.clone();
        let declaration = scan_declaration(&mut lookahead, DeclarationEnd::Location)?;
        self.cursor = lookahead;
        Some(declaration)
    }

    /// Read a dotted declaration such as `Swift.(file).Int extension.+`.
    pub fn read_declaration(&mut self) -> Option<String> {
        let mut lookahead = self.cursor.clone();
        let declaration = scan_declaration(&mut lookahead, DeclarationEnd::Whitespace)?;
        self.cursor = lookahead;
        Some(declaration)
    }
}

// =============================================================================
// SCANNERS
// =============================================================================

/// A line break not followed by indentation.
fn is_spurious_line_break(cursor: &Cursor<'_>) -> bool {
    cursor.peek() == Some('\n') && matches!(cursor.peek_nth(1), Some(c) if !c.is_whitespace())
}

fn is_key_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\'')
}

fn scan_location(cursor: &mut Cursor<'_>) -> Option<String> {
    let mut text = String::new();
    loop {
        let c = cursor.peek()?;
        if c == ':' {
            break;
        }
        if c.is_whitespace() || c == '(' || c == ')' {
            return None;
        }
        text.push(c);
        cursor.advance();
    }
    if text.is_empty() {
        return None;
    }

    for _ in 0..2 {
        if cursor.peek() != Some(':') {
            return None;
        }
        text.push(':');
        cursor.advance();

        let digits_start = text.len();
        while let Some(digit) = cursor.peek().filter(char::is_ascii_digit) {
            text.push(digit);
            cursor.advance();
        }
        if text.len() == digits_start {
            return None;
        }
    }

    Some(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclarationEnd {
    /// Ends with `@` and a location.
    Location,
    /// Ends at whitespace; must contain a `.`.
    Whitespace,
}

fn scan_declaration(cursor: &mut Cursor<'_>, end: DeclarationEnd) -> Option<String> {
    if matches!(cursor.peek(), None | Some('"' | '\'' | '[' | '(' | '<')) {
        return None;
    }

    let mut text = String::new();
    let mut nesting: i32 = 0;

    loop {
        if cursor.starts_with(EXTENSION_CONTINUATION) {
            text.push_str(EXTENSION_CONTINUATION);
            cursor.advance_bytes(EXTENSION_CONTINUATION.len());
            continue;
        }
        if is_spurious_line_break(cursor) {
            cursor.advance();
            continue;
        }

        let Some(c) = cursor.peek() else { break };
        match c {
            '@' if end == DeclarationEnd::Location => {
                cursor.advance();
                let location = scan_location(cursor)?;
                text.push('@');
                text.push_str(&location);
                return Some(text);
            }
            ')' if nesting <= 0 => break,
            c if c.is_whitespace() && nesting <= 0 => break,
            '(' => nesting += 1,
            ')' => nesting -= 1,
            _ => {}
        }
        text.push(c);
        cursor.advance();
    }

    match end {
        DeclarationEnd::Location => None,
        DeclarationEnd::Whitespace => (text.contains('.') && nesting == 0).then_some(text),
    }
}

// =============================================================================
// TESTS
// =============================================================================
