//! Lenient CSS rule tokenizer.
//!
//! Produces `selector { property: value; ... }` rules. Comments are stripped;
//! anything that does not form a rule is skipped rather than reported, so a
//! broken block never hides the rules after it.

/// One `property: value` pair. The property is lower-cased; the value trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// A rule with one or more comma-separated selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

/// Removes `/* ... */` comments. An unterminated comment swallows the rest.
pub fn strip_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Parses declarations of one block body (`a: b; c: d`).
pub fn parse_declarations(body: &str) -> Vec<Declaration> {
    body.split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let property = prop.trim().to_ascii_lowercase();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some(Declaration { property, value: value.to_string() })
        })
        .collect()
}

/// Parses a style sheet into rules in source order.
pub fn parse_rules(src: &str) -> Vec<Rule> {
    let clean = strip_comments(src);
    let mut rules = Vec::new();
    let mut rest = clean.as_str();

    while let Some(open) = rest.find('{') {
        let selector_text = &rest[..open];
        let Some(close) = rest[open + 1..].find('}') else {
            break;
        };
        let body = &rest[open + 1..open + 1 + close];
        rest = &rest[open + 1 + close + 1..];

        // A stray `}` earlier in the selector text belongs to a broken rule.
        let selector_text = selector_text.rsplit('}').next().unwrap_or(selector_text);
        let selectors: Vec<String> = selector_text
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if selectors.is_empty() {
            continue;
        }
        rules.push(Rule { selectors, declarations: parse_declarations(body) });
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rule() {
        let rules = parse_rules(".title { color: #4A9EFF; font-size: 18px; }");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selectors, vec![".title"]);
        assert_eq!(
            rules[0].declarations,
            vec![
                Declaration { property: "color".into(), value: "#4A9EFF".into() },
                Declaration { property: "font-size".into(), value: "18px".into() },
            ]
        );
    }

    #[test]
    fn comma_selectors_and_comments() {
        let rules = parse_rules("/* c */ .a, .b /* x */ { Opacity: 0.5 }\nwidget{bg:red}");
        assert_eq!(rules[0].selectors, vec![".a", ".b"]);
        assert_eq!(rules[0].declarations[0].property, "opacity");
        assert_eq!(rules[1].selectors, vec!["widget"]);
    }

    #[test]
    fn value_keeps_later_colons() {
        let d = parse_declarations("background-image: url(http://x/y.png)");
        assert_eq!(d[0].value, "url(http://x/y.png)");
    }

    #[test]
    fn malformed_pieces_are_skipped() {
        let rules = parse_rules("garbage ; .ok { nonsense; color: red } .open { color: blue");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selectors, vec!["garbage ; .ok"]);
        assert_eq!(rules[0].declarations.len(), 1);
    }

    #[test]
    fn unterminated_comment_swallows_rest() {
        assert_eq!(strip_comments("a /* b"), "a ");
    }
}
