//! Tag scanner over raw instance text.
//!
//! A thin, lenient layer over [`quick_xml::Reader`] that turns XBRL and inline-XBRL
//! (HTML) documents into a flat stream of open/close/text tokens. Self-closing tags are
//! expanded into an open/close pair, CDATA is surfaced as text, and mismatched or
//! unmatched end tags (common in HTML) are tolerated.

use filings_core::{FilingsError, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;

/// Strip any namespace prefix from a qualified name.
#[must_use]
pub fn local_name(qualified: &str) -> &str {
    qualified.rsplit_once(':').map_or(qualified, |(_, local)| local)
}

/// An opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name as written, e.g. `xbrli:context`.
    pub name: String,
    /// Attributes in document order, values unescaped.
    pub attributes: Vec<(String, String)>,
}

impl Element {
    /// Tag name without its namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Look up an attribute by its qualified name, falling back to its local name.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .or_else(|| self.attributes.iter().find(|(k, _)| local_name(k) == key))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true for `xsi:nil="true"` elements.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.attribute("nil")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    fn from_start(start: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let attributes = start
            .html_attributes()
            .with_checks(false)
            .filter_map(|attr| attr.ok())
            .map(|attr| {
                let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                let value = attr
                    .unescape_value()
                    .map(Cow::into_owned)
                    .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
                (key, value)
            })
            .collect();

        Self { name, attributes }
    }
}

/// One token of the scanned document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An opening (or expanded self-closing) tag.
    Open(Element),
    /// A closing tag, by qualified name.
    Close(String),
    /// Character data, unescaped.
    Text(String),
}

/// Iterator of [`Token`]s over a document.
pub struct TagScanner<'a> {
    reader: Reader<&'a [u8]>,
    done: bool,
}

impl std::fmt::Debug for TagScanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagScanner")
            .field("position", &self.reader.buffer_position())
            .field("done", &self.done)
            .finish()
    }
}

impl<'a> TagScanner<'a> {
    /// Start scanning `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut reader = Reader::from_str(text);
        let config = reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = true;
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        Self {
            reader,
            done: false,
        }
    }
}

fn resolve_html_entity(entity: &str) -> Option<&'static str> {
    resolve_predefined_entity(entity).or(match entity {
        "nbsp" | "#160" | "#xA0" | "#xa0" => Some(" "),
        "mdash" | "#8212" => Some("\u{2014}"),
        "ndash" | "#8211" => Some("\u{2013}"),
        _ => None,
    })
}

impl Iterator for TagScanner<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    self.done = true;
                    return Some(Err(FilingsError::Xml(format!(
                        "at byte {}: {e}",
                        self.reader.buffer_position()
                    ))));
                }
            };

            let token = match event {
                Event::Start(start) => Token::Open(Element::from_start(&start)),
                Event::Empty(start) => Token::Open(Element::from_start(&start)),
                Event::End(end) => {
                    Token::Close(String::from_utf8_lossy(end.name().as_ref()).into_owned())
                }
                Event::Text(text) => Token::Text(
                    text.unescape_with(resolve_html_entity)
                        .map(Cow::into_owned)
                        .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned()),
                ),
                Event::CData(data) => Token::Text(String::from_utf8_lossy(&data).into_owned()),
                Event::Eof => {
                    self.done = true;
                    return None;
                }
                // Comments, declarations, processing instructions, doctype
                _ => continue,
            };
            return Some(Ok(token));
        }
        None
    }
}
