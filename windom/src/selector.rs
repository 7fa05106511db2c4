//! A small CSS selector engine.
//!
//! Supports type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`,
//! compound steps (`button.primary[disabled]`), the descendant (whitespace)
//! and child (`>`) combinators, and comma-separated selector groups.

use std::str::FromStr;

use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unsupported selector: {0}")]
    Unsupported(String),
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    groups: Vec<Vec<Part>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Step {
    universal: bool,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrCondition {
    Exists { name: String },
    Eq { name: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    step: Step,
    // Relation to the part on the left
    combinator: Option<Combinator>,
}

impl Selector {
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }

        let groups = split_groups(trimmed)?
            .iter()
            .map(|group| parse_chain(group))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: trimmed.to_string(),
            groups,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test `element` against the selector. `ancestors` runs from the document
    /// root down to the element's parent.
    pub fn matches(&self, element: &Element, ancestors: &[&Element]) -> bool {
        self.groups
            .iter()
            .any(|parts| match_part(parts, parts.len() - 1, element, ancestors))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn match_part(parts: &[Part], idx: usize, element: &Element, ancestors: &[&Element]) -> bool {
    if !step_matches(&parts[idx].step, element) {
        return false;
    }
    if idx == 0 {
        return true;
    }

    match parts[idx].combinator.unwrap_or(Combinator::Descendant) {
        Combinator::Child => match ancestors.split_last() {
            Some((parent, rest)) => match_part(parts, idx - 1, parent, rest),
            None => false,
        },
        Combinator::Descendant => (0..ancestors.len())
            .rev()
            .any(|i| match_part(parts, idx - 1, ancestors[i], &ancestors[..i])),
    }
}

fn step_matches(step: &Step, element: &Element) -> bool {
    if let Some(tag) = &step.tag {
        if !element.tag.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &step.id {
        if element.dom_id() != Some(id.as_str()) {
            return false;
        }
    }
    if !step.classes.iter().all(|c| element.has_class(c)) {
        return false;
    }
    step.attrs.iter().all(|cond| match cond {
        AttrCondition::Exists { name } => element.has_attribute(name),
        AttrCondition::Eq { name, value } => {
            element.get_attribute(name).as_deref() == Some(value.as_str())
        }
    })
}

fn unsupported(src: &str) -> SelectorError {
    SelectorError::Unsupported(src.to_string())
}

fn split_groups(selector: &str) -> Result<Vec<String>, SelectorError> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(ch);
            }
            (Some(_), _) => current.push(ch),
            (None, '"' | '\'') => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, '[') => {
                bracket_depth += 1;
                current.push(ch);
            }
            (None, ']') => {
                bracket_depth = bracket_depth
                    .checked_sub(1)
                    .ok_or_else(|| unsupported(selector))?;
                current.push(ch);
            }
            (None, ',') if bracket_depth == 0 => {
                let trimmed = current.trim();
                if trimmed.is_empty() {
                    return Err(unsupported(selector));
                }
                groups.push(trimmed.to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if bracket_depth != 0 || quote.is_some() {
        return Err(unsupported(selector));
    }
    let trimmed = current.trim();
    if trimmed.is_empty() {
        return Err(unsupported(selector));
    }
    groups.push(trimmed.to_string());
    Ok(groups)
}

fn tokenize(selector: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            current.push(ch);
            continue;
        }
        match ch {
            '"' | '\'' if bracket_depth > 0 => {
                quote = Some(ch);
                current.push(ch);
            }
            '[' => {
                bracket_depth += 1;
                current.push(ch);
            }
            ']' => {
                bracket_depth = bracket_depth.saturating_sub(1);
                current.push(ch);
            }
            '>' if bracket_depth == 0 => {
                flush(&mut current, &mut tokens);
                tokens.push(">".to_string());
            }
            c if c.is_ascii_whitespace() && bracket_depth == 0 => {
                flush(&mut current, &mut tokens);
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, &mut tokens);
    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

fn parse_chain(selector: &str) -> Result<Vec<Part>, SelectorError> {
    let mut parts: Vec<Part> = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in tokenize(selector) {
        if token == ">" {
            if pending.is_some() || parts.is_empty() {
                return Err(unsupported(selector));
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
        return Err(unsupported(selector));
    }
    Ok(parts)
}

fn parse_step(part: &str) -> Result<Step, SelectorError> {
    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut step = Step::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if step.universal || step.tag.is_some() || i != 0 {
                    return Err(unsupported(part));
                }
                step.universal = true;
                i += 1;
            }
            b'#' => {
                let (id, next) = parse_ident(part, i + 1).ok_or_else(|| unsupported(part))?;
                if step.id.replace(id).is_some() {
                    return Err(unsupported(part));
                }
                i = next;
            }
            b'.' => {
                let (class, next) = parse_ident(part, i + 1).ok_or_else(|| unsupported(part))?;
                step.classes.push(class);
                i = next;
            }
            b'[' => {
                let (cond, next) = parse_attr(part, i)?;
                step.attrs.push(cond);
                i = next;
            }
            _ => {
                if i != 0 {
                    return Err(unsupported(part));
                }
                let (tag, next) = parse_ident(part, i).ok_or_else(|| unsupported(part))?;
                step.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
        }
    }

    Ok(step)
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn parse_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let mut end = start;
    while end < bytes.len() && is_ident_char(bytes[end]) {
        end += 1;
    }
    if end == start {
        return None;
    }
    Some((src.get(start..end)?.to_string(), end))
}

fn parse_attr(src: &str, open: usize) -> Result<(AttrCondition, usize), SelectorError> {
    let close = src[open..]
        .find(']')
        .map(|offset| open + offset)
        .ok_or_else(|| unsupported(src))?;
    let inner = src[open + 1..close].trim();

    let cond = match inner.split_once('=') {
        None => {
            let (name, rest) = parse_ident(inner, 0).ok_or_else(|| unsupported(src))?;
            if rest != inner.len() {
                return Err(unsupported(src));
            }
            AttrCondition::Exists {
                name: name.to_ascii_lowercase(),
            }
        }
        Some((name, value)) => {
            let name = name.trim();
            if name.is_empty() || !name.bytes().all(is_ident_char) {
                return Err(unsupported(src));
            }
            AttrCondition::Eq {
                name: name.to_ascii_lowercase(),
                value: unquote(value.trim()).ok_or_else(|| unsupported(src))?,
            }
        }
    };

    Ok((cond, close + 1))
}

fn unquote(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    match bytes.first() {
        Some(&q @ (b'"' | b'\'')) => {
            if bytes.len() < 2 || bytes[bytes.len() - 1] != q {
                return None;
            }
            Some(value[1..value.len() - 1].to_string())
        }
        Some(_) if value.bytes().all(is_ident_char) => Some(value.to_string()),
        _ => None,
    }
}
