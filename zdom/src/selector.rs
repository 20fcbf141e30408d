//! CSS selector subset used for component lookup.
//!
//! Supported: type (`div`), universal (`*`), `#id`, `.class`, `[attr]`,
//! `[attr=value]` with optional quotes, descendant and child (`>`)
//! combinators, and comma-separated groups.

use std::str::FromStr;

use crate::document::{Document, Tree};
use crate::element::NodeId;
use crate::error::{DomError, Result};

/// A parsed selector, reusable across queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    groups: Vec<Vec<Part>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    step: Step,
    // Relation to the part on the left.
    combinator: Option<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Step {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrCondition {
    name: String,
    value: Option<String>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = || DomError::InvalidSelector(source.to_string());

        let mut groups = Vec::new();
        for group in split_groups(source).ok_or_else(invalid)? {
            groups.push(parse_chain(group).ok_or_else(invalid)?);
        }
        if groups.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            source: source.trim().to_string(),
            groups,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn matches_in(&self, tree: &Tree, node: NodeId) -> bool {
        tree.get(node).is_some()
            && self
                .groups
                .iter()
                .any(|parts| matches_chain(tree, node, parts))
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl Document {
    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        selector.matches_in(&self.tree(), node)
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let tree = self.tree();
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if selector.matches_in(&tree, current) {
                return Some(current);
            }
            cursor = tree.parent(current);
        }
        None
    }

    /// First descendant of `scope` (document order) matching `selector`.
    pub fn select(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        let tree = self.tree();
        tree.descendants(scope)
            .into_iter()
            .find(|node| selector.matches_in(&tree, *node))
    }

    /// All descendants of `scope` matching `selector`, in document order.
    ///
    /// Combinators may match ancestors outside `scope`, the same way
    /// `querySelectorAll` behaves in a browser.
    pub fn select_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        let tree = self.tree();
        tree.descendants(scope)
            .into_iter()
            .filter(|node| selector.matches_in(&tree, *node))
            .collect()
    }

    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.select(scope, &Selector::parse(selector)?))
    }

    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        Ok(self.select_all(scope, &Selector::parse(selector)?))
    }
}

fn matches_chain(tree: &Tree, node: NodeId, parts: &[Part]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return false;
    };
    if !matches_step(tree, node, &last.step) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }

    match last.combinator.unwrap_or(Combinator::Descendant) {
        Combinator::Child => tree
            .parent(node)
            .is_some_and(|parent| matches_chain(tree, parent, rest)),
        Combinator::Descendant => {
            let mut cursor = tree.parent(node);
            while let Some(ancestor) = cursor {
                if matches_chain(tree, ancestor, rest) {
                    return true;
                }
                cursor = tree.parent(ancestor);
            }
            false
        }
    }
}

fn matches_step(tree: &Tree, node: NodeId, step: &Step) -> bool {
    let Some(data) = tree.get(node) else {
        return false;
    };
    if step.tag.as_ref().is_some_and(|tag| *tag != data.tag) {
        return false;
    }
    if let Some(id) = &step.id {
        if data.attrs.get("id") != Some(id) {
            return false;
        }
    }
    if !step.classes.iter().all(|class| data.has_class(class)) {
        return false;
    }
    step.attrs.iter().all(|cond| match (&cond.value, data.attrs.get(&cond.name)) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(expected), Some(actual)) => expected == actual,
    })
}

/// Split on commas that are not inside brackets or quotes.
fn split_groups(source: &str) -> Option<Vec<&str>> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in source.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.checked_sub(1)?,
            (None, ',') if depth == 0 => {
                groups.push(source[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 || quote.is_some() {
        return None;
    }
    groups.push(source[start..].trim());

    if groups.iter().any(|g| g.is_empty()) {
        return None;
    }
    Some(groups)
}

fn tokenize(group: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in group.chars() {
        if let Some(q) = quote {
            current.push(ch);
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' if depth > 0 => {
                quote = Some(ch);
                current.push(ch);
            }
            '[' => {
                depth += 1;
                current.push(ch);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            '>' if depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(">".to_string());
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_chain(group: &str) -> Option<Vec<Part>> {
    let mut parts = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in tokenize(group) {
        if token == ">" {
            if pending.is_some() || parts.is_empty() {
                return None;
            }
            pending = Some(Combinator::Child);
            continue;
        }

        let step = parse_step(&token)?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(pending.take().unwrap_or(Combinator::Descendant))
        };
        parts.push(Part { step, combinator });
    }

    if parts.is_empty() || pending.is_some() {
        return None;
    }
    Some(parts)
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn read_ident(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && is_ident_char(chars[end]) {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

fn parse_step(token: &str) -> Option<Step> {
    let chars: Vec<char> = token.chars().collect();
    let mut step = Step::default();
    let mut i = 0;

    if chars.first() == Some(&'*') {
        i = 1;
    } else if chars.first().copied().is_some_and(is_ident_char) {
        let (tag, next) = read_ident(&chars, 0);
        step.tag = Some(tag.to_ascii_lowercase());
        i = next;
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                let (id, next) = read_ident(&chars, i + 1);
                if id.is_empty() || step.id.is_some() {
                    return None;
                }
                step.id = Some(id);
                i = next;
            }
            '.' => {
                let (class, next) = read_ident(&chars, i + 1);
                if class.is_empty() {
                    return None;
                }
                step.classes.push(class);
                i = next;
            }
            '[' => {
                let close = find_closing_bracket(&chars, i + 1)?;
                let inner: String = chars[i + 1..close].iter().collect();
                step.attrs.push(parse_attr_condition(&inner)?);
                i = close + 1;
            }
            _ => return None,
        }
    }

    Some(step)
}

fn find_closing_bracket(chars: &[char], start: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (offset, ch) in chars[start..].iter().enumerate() {
        match (quote, *ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(*ch),
            (None, ']') => return Some(start + offset),
            _ => {}
        }
    }
    None
}

fn parse_attr_condition(inner: &str) -> Option<AttrCondition> {
    let (name, value) = match inner.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.trim())),
        None => (inner.trim(), None),
    };
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return None;
    }

    let value = match value {
        None => None,
        Some(raw) => {
            let unquoted = match raw.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    if raw.len() < 2 || !raw.ends_with(q) {
                        return None;
                    }
                    &raw[1..raw.len() - 1]
                }
                Some(_) => {
                    if !raw.chars().all(is_ident_char) {
                        return None;
                    }
                    raw
                }
                None => return None,
            };
            Some(unquoted.to_string())
        }
    };

    Some(AttrCondition {
        name: name.to_string(),
        value,
    })
}
