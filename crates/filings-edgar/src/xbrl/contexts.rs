//! Context extraction.

use super::parse_date;
use super::scanner::{TagScanner, Token, local_name};
use filings_core::{ContextPeriod, Dimension, Result, XbrlContext};
use tracing::trace;

/// Which child of a context is collecting text.
#[derive(Debug)]
enum Field {
    StartDate,
    EndDate,
    Instant,
    Member(String),
}

#[derive(Debug, Default)]
struct ContextBuilder {
    id: String,
    dimensions: Vec<Dimension>,
    start: Option<String>,
    end: Option<String>,
    instant: Option<String>,
}

impl ContextBuilder {
    fn set(&mut self, field: Field, text: &str) {
        let text = text.trim().to_string();
        match field {
            Field::StartDate => self.start = Some(text),
            Field::EndDate => self.end = Some(text),
            Field::Instant => self.instant = Some(text),
            Field::Member(axis) if !axis.is_empty() && !text.is_empty() => {
                self.dimensions.push(Dimension::new(axis, text));
            }
            Field::Member(_) => {}
        }
    }

    fn build(self) -> Option<XbrlContext> {
        if self.dimensions.is_empty() {
            return None;
        }

        let period = match (&self.instant, &self.start, &self.end) {
            (Some(instant), _, _) => ContextPeriod::Instant(parse_date(instant)?),
            (None, Some(start), Some(end)) => ContextPeriod::Duration {
                start: parse_date(start)?,
                end: parse_date(end)?,
            },
            _ => {
                trace!(context = %self.id, "Context without a usable period");
                return None;
            }
        };

        Some(XbrlContext {
            context_id: self.id,
            dimensions: self.dimensions,
            period,
        })
    }
}

/// Extract every dimensionally-qualified context from instance text.
///
/// Accepts `context` elements with or without a namespace prefix. `explicitMember`s may sit
/// under `segment` or `scenario`. Contexts with no explicit members are undifferentiated
/// totals and are dropped, as are contexts whose period cannot be read.
pub fn parse_contexts(text: &str) -> Result<Vec<XbrlContext>> {
    let mut contexts = Vec::new();
    let mut current: Option<ContextBuilder> = None;
    let mut field: Option<Field> = None;
    let mut buffer = String::new();

    for token in TagScanner::new(text) {
        match token? {
            Token::Open(element) => {
                if element.local_name() == "context" {
                    current = Some(ContextBuilder {
                        id: element.attribute("id").unwrap_or_default().to_string(),
                        ..ContextBuilder::default()
                    });
                    field = None;
                    continue;
                }
                if current.is_none() {
                    continue;
                }
                let next = match element.local_name() {
                    "startDate" => Field::StartDate,
                    "endDate" => Field::EndDate,
                    "instant" => Field::Instant,
                    "explicitMember" => Field::Member(
                        element
                            .attribute("dimension")
                            .unwrap_or_default()
                            .trim()
                            .to_string(),
                    ),
                    _ => continue,
                };
                field = Some(next);
                buffer.clear();
            }
            Token::Text(chunk) => {
                if field.is_some() {
                    buffer.push_str(&chunk);
                }
            }
            Token::Close(name) => match local_name(&name) {
                "startDate" | "endDate" | "instant" | "explicitMember" => {
                    if let (Some(done), Some(context)) = (field.take(), current.as_mut()) {
                        context.set(done, &buffer);
                    }
                }
                "context" => {
                    field = None;
                    if let Some(context) = current.take().and_then(ContextBuilder::build) {
                        contexts.push(context);
                    }
                }
                _ => {}
            },
        }
    }

    trace!(count = contexts.len(), "Parsed dimensioned contexts");
    Ok(contexts)
}
