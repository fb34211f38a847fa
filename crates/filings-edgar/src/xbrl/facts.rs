//! Revenue fact extraction from plain XBRL and inline XBRL.

use super::scanner::{Element, TagScanner, Token};
use crate::concepts::REVENUE_CONCEPTS;
use filings_core::{Result, RevenueFact};
use tracing::trace;

/// Inline XBRL numeric fact wrapper.
const NON_FRACTION: &str = "nonFraction";

/// A fact whose value text is still being collected.
#[derive(Debug)]
struct PendingFact {
    concept: String,
    context_ref: String,
    unit_ref: Option<String>,
    scale: i32,
    negate: bool,
    /// Qualified name of the tag that closes this fact.
    closing: String,
    text: String,
}

impl PendingFact {
    fn plain(element: &Element, context_ref: &str) -> Self {
        Self {
            concept: element.name.clone(),
            context_ref: context_ref.to_string(),
            unit_ref: element.attribute("unitRef").map(str::to_string),
            scale: 0,
            negate: false,
            closing: element.name.clone(),
            text: String::new(),
        }
    }

    fn inline(element: &Element, concept: &str, context_ref: &str) -> Self {
        let scale = element
            .attribute("scale")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);

        Self {
            concept: concept.to_string(),
            context_ref: context_ref.to_string(),
            unit_ref: element.attribute("unitRef").map(str::to_string),
            scale,
            negate: element.attribute("sign").is_some_and(|s| s.trim() == "-"),
            closing: element.name.clone(),
            text: String::new(),
        }
    }

    fn finish(self) -> Option<RevenueFact> {
        let Some(displayed) = parse_number(&self.text) else {
            trace!(concept = %self.concept, text = %self.text, "Skipping unparseable fact value");
            return None;
        };
        let value = displayed * 10f64.powi(self.scale);

        Some(RevenueFact {
            concept: self.concept,
            context_ref: self.context_ref,
            value: if self.negate { -value } else { value },
            unit_ref: self.unit_ref,
        })
    }
}

/// Parse a displayed number.
///
/// Thousands separators and whitespace are ignored. A body consisting only of dashes is
/// the conventional rendering of zero. A leading minus or surrounding parentheses negate.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|c| matches!(c, '-' | '\u{2013}' | '\u{2014}')) {
        return Some(0.0);
    }

    let negative =
        trimmed.starts_with('-') || (trimmed.starts_with('(') && trimmed.ends_with(')'));
    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '-' | '(' | ')' | '$'))
        .collect();

    let value: f64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Extract facts for the given concepts from instance text.
///
/// Recognizes both wire syntaxes:
///
/// - plain XBRL, where the tag name is the concept (`<us-gaap:Revenues contextRef=..>`)
/// - inline XBRL, where `ix:nonFraction` carries the concept in its `name` attribute and the
///   true value is the displayed number × 10^`scale`
///
/// Nil facts, facts without a `contextRef` and unparseable values are skipped.
pub fn parse_facts(text: &str, concepts: &[&str]) -> Result<Vec<RevenueFact>> {
    let mut facts = Vec::new();
    let mut pending: Option<PendingFact> = None;

    for token in TagScanner::new(text) {
        match token? {
            Token::Open(element) => {
                // Markup nested inside a fact contributes only its text
                if pending.is_some() || element.is_nil() {
                    continue;
                }
                let Some(context_ref) = element.attribute("contextRef") else {
                    continue;
                };

                if element.local_name() == NON_FRACTION {
                    if let Some(name) = element.attribute("name").map(str::trim)
                        && concepts.contains(&name)
                    {
                        pending = Some(PendingFact::inline(&element, name, context_ref));
                    }
                } else if concepts.contains(&element.name.as_str()) {
                    pending = Some(PendingFact::plain(&element, context_ref));
                }
            }
            Token::Text(chunk) => {
                if let Some(fact) = pending.as_mut() {
                    fact.text.push_str(&chunk);
                }
            }
            Token::Close(name) => {
                if pending.as_ref().is_some_and(|fact| fact.closing == name)
                    && let Some(fact) = pending.take().and_then(PendingFact::finish)
                {
                    facts.push(fact);
                }
            }
        }
    }

    trace!(count = facts.len(), "Parsed revenue facts");
    Ok(facts)
}

/// Extract revenue facts (see [`REVENUE_CONCEPTS`]) from instance text.
pub fn parse_revenue_facts(text: &str) -> Result<Vec<RevenueFact>> {
    parse_facts(text, REVENUE_CONCEPTS)
}
