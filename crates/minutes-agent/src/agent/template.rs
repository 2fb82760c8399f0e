//! Prompt templates with `{placeholder}` substitution.

use std::collections::HashMap;

use crate::{Error, Result};

/// Values substituted into a template, keyed by placeholder name.
pub type TemplateValues<'a> = HashMap<&'a str, String>;

/// Capability interface for prompt templates.
///
/// Only [`format`](Self::format) and [`input_variables`](Self::input_variables)
/// are required. The remaining extension points are part of the interface but
/// fail with [`Error::NotImplemented`] unless an implementation opts in.
pub trait BasePromptTemplate: Send + Sync {
    /// Returns the placeholder names referenced by the template, in order of
    /// first appearance.
    fn input_variables(&self) -> Vec<&str>;

    /// Renders the template with the given values.
    fn format(&self, values: &TemplateValues<'_>) -> Result<String>;

    /// Returns an identifier for the template kind.
    fn prompt_type(&self) -> Result<&'static str> {
        Err(Error::NotImplemented("prompt_type"))
    }

    /// Binds a subset of the placeholders ahead of time.
    fn partial(&self, _values: &TemplateValues<'_>) -> Result<Box<dyn BasePromptTemplate>> {
        Err(Error::NotImplemented("partial"))
    }

    /// Serializes the template for storage.
    fn serialize(&self) -> Result<serde_json::Value> {
        Err(Error::NotImplemented("serialize"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A text template with `{name}` placeholders.
///
/// `{{` and `}}` render as literal braces.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parses a template.
    ///
    /// Fails with [`Error::Template`] on an unclosed `{`, a stray `}` or an
    /// empty placeholder.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let segments = parse_segments(&source)?;
        Ok(Self { source, segments })
    }

    /// Returns the raw template text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl BasePromptTemplate for PromptTemplate {
    fn input_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Variable(name) = segment
                && !names.contains(&name.as_str())
            {
                names.push(name);
            }
        }
        names
    }

    fn format(&self, values: &TemplateValues<'_>) -> Result<String> {
        let mut rendered = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Variable(name) => {
                    let value = values
                        .get(name.as_str())
                        .ok_or_else(|| Error::missing_variable(name.as_str()))?;
                    rendered.push_str(value);
                }
            }
        }
        Ok(rendered)
    }
}

fn parse_segments(source: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(Error::template(format!(
                                "unclosed placeholder starting with `{{{name}`"
                            )));
                        }
                        Some(other) => name.push(other),
                    }
                }
                if name.trim().is_empty() {
                    return Err(Error::template("empty placeholder `{}`"));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(name));
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '}' => return Err(Error::template("single `}` encountered in template")),
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(pairs: &[(&'a str, &str)]) -> TemplateValues<'a> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn format_substitutes_placeholders() {
        let template = PromptTemplate::new("Task: {input}\n{agent_scratchpad}").unwrap();
        let rendered = template
            .format(&values(&[("input", "send notes"), ("agent_scratchpad", "")]))
            .unwrap();

        assert_eq!(rendered, "Task: send notes\n");
    }

    #[test]
    fn format_fails_on_missing_variable() {
        let template = PromptTemplate::new("Task: {input}\n{agent_scratchpad}").unwrap();
        let error = template
            .format(&values(&[("input", "send notes")]))
            .unwrap_err();

        assert!(matches!(error, Error::MissingVariable { name } if name == "agent_scratchpad"));
    }

    #[test]
    fn format_ignores_unreferenced_values() {
        let template = PromptTemplate::new("{input}").unwrap();
        let rendered = template
            .format(&values(&[("input", "a"), ("unused", "b")]))
            .unwrap();

        assert_eq!(rendered, "a");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let template = PromptTemplate::new("{{\"body\": \"{input}\"}}").unwrap();
        let rendered = template.format(&values(&[("input", "hi")])).unwrap();

        assert_eq!(rendered, "{\"body\": \"hi\"}");
        assert_eq!(template.input_variables(), vec!["input"]);
    }

    #[test]
    fn input_variables_in_first_appearance_order() {
        let template = PromptTemplate::new("{b} {a} {b} {c}").unwrap();
        assert_eq!(template.input_variables(), vec!["b", "a", "c"]);
    }

    #[test]
    fn malformed_templates_are_rejected() {
        assert!(matches!(
            PromptTemplate::new("open {input").unwrap_err(),
            Error::Template(_)
        ));
        assert!(matches!(
            PromptTemplate::new("stray } brace").unwrap_err(),
            Error::Template(_)
        ));
        assert!(matches!(
            PromptTemplate::new("empty {}").unwrap_err(),
            Error::Template(_)
        ));
    }

    #[test]
    fn extension_points_are_not_implemented() {
        let template = PromptTemplate::new("{input}").unwrap();

        assert!(matches!(
            template.prompt_type().unwrap_err(),
            Error::NotImplemented("prompt_type")
        ));
        assert!(matches!(
            template.partial(&values(&[("input", "x")])).err(),
            Some(Error::NotImplemented("partial"))
        ));
        assert!(matches!(
            template.serialize().unwrap_err(),
            Error::NotImplemented("serialize")
        ));
    }
}
