//! Markup front end for **MilkWidget** theme files.
//!
//! This crate is dependency-free so theme validators and editor tooling can
//! use it without pulling in the engine.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `Document`, `Element`, `Attr`, `Node` |
//! | [`error`] | `ParseError` |
//! | [`lexer`] | XML `Lexer`, `Token` |
//! | [`parser`] | `parse_str` entry point |
//! | [`css`] | lenient CSS rule tokenizer |
//!
//! ```rust
//! use milk_markup::parse_str;
//!
//! let doc = parse_str(r#"<widget width="320"><progress id="cpu"/></widget>"#).unwrap();
//! assert_eq!(doc.root.name, "widget");
//! assert_eq!(doc.root.attr("width"), Some("320"));
//! ```

pub mod ast;
pub mod css;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Attr, Document, Element, Node};
pub use error::ParseError;
pub use parser::parse_str;

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(src: &str) -> Document { parse_str(src).unwrap() }
    fn err(src: &str) -> ParseError { parse_str(src).unwrap_err() }

    #[test] fn single_widget() { ok(r#"<widget width="320" height="200"/>"#); }
    #[test] fn nested_children() {
        ok(r#"<widgets><widget><text>Hi</text><progress value="50"/></widget></widgets>"#);
    }
    #[test] fn declaration_and_comment() {
        ok("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- theme -->\n<milk></milk>");
    }
    #[test] fn single_quoted_attr() { ok("<widget bg='#333'/>"); }
    #[test] fn whitespace_around_eq() { ok(r#"<widget width = "10" />"#); }
    #[test] fn text_content() {
        let doc = ok("<text>  CPU &amp; RAM  </text>");
        assert_eq!(doc.root.text(), "CPU & RAM");
    }
    #[test] fn element_iteration_skips_text() {
        let doc = ok("<w>a<b/>c<d/></w>");
        let names: Vec<_> = doc.root.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d"]);
    }
    #[test] fn err_mismatched_close() {
        let e = err("<widget>\n  <text></label>\n</widget>");
        assert_eq!(e.line, 2);
        assert!(e.message.contains("mismatched"));
    }
    #[test] fn err_unclosed() { err("<widget><text>"); }
    #[test] fn err_unquoted_attr() { err("<widget width=10/>"); }
    #[test] fn err_two_roots() { err("<a/><b/>"); }
    #[test] fn err_empty() { err("   "); }
    #[test] fn err_unknown_entity() { err("<a>&nbsp;</a>"); }
}
