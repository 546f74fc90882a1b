//! Reading XML documentation comments.
//!
//! Doc comment lines are stripped of their markers, concatenated under a
//! synthetic root element and read with `quick-xml`. Every position in the
//! synthetic document maps back to the source buffer, so elements can be
//! reported where they were written.

use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use stylist_core::{Span, Trivia, TriviaKind};
use tracing::debug;

static NAME_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bname\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid name attribute regex")
});

const ROOT_OPEN: &str = "<doc>";
const ROOT_CLOSE: &str = "</doc>";

/// A top-level element of a documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocElement {
    /// Tag name.
    pub name: String,
    /// Source span from the start tag to the end of the end tag.
    pub span: Span,
    /// Value and source span of the `name` attribute.
    pub name_attribute: Option<(String, Span)>,
    /// True when the element holds nothing but whitespace.
    pub is_blank: bool,
}

/// One contiguous documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    comments: Vec<Span>,
}

/// Slice of the synthetic document copied from the source.
#[derive(Debug, Clone, Copy)]
struct Piece {
    xml_start: usize,
    source_start: usize,
    len: usize,
}

struct OpenElement {
    name: String,
    start: usize,
    content_start: usize,
}

impl DocBlock {
    /// Source span from the first marker to the end of the last comment.
    #[must_use]
    pub fn span(&self) -> Span {
        match (self.comments.first(), self.comments.last()) {
            (Some(first), Some(last)) => first.cover(*last),
            _ => Span::empty(0),
        }
    }

    /// Reads the top-level elements of the block.
    ///
    /// Self-closing elements are skipped. Reading stops at the first XML
    /// error, keeping the elements completed before it.
    #[must_use]
    pub fn elements(&self, source: &str) -> Vec<DocElement> {
        let mut xml = String::from(ROOT_OPEN);
        let mut pieces = Vec::with_capacity(self.comments.len());
        for comment in &self.comments {
            let text = source.get(comment.start..comment.end).unwrap_or("");
            let (offset, body) = strip_markers(text);
            pieces.push(Piece {
                xml_start: xml.len(),
                source_start: comment.start + offset,
                len: body.len(),
            });
            xml.push_str(body);
            xml.push('\n');
        }
        xml.push_str(ROOT_CLOSE);

        let to_source = |pos: usize| map_position(&pieces, pos);
        let mut reader = Reader::from_str(&xml);
        let mut depth = 0usize;
        let mut open: Option<OpenElement> = None;
        let mut elements = Vec::new();

        loop {
            let before = position(&reader);
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    depth += 1;
                    if depth == 2 {
                        open = Some(OpenElement {
                            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
                            start: before,
                            content_start: position(&reader),
                        });
                    }
                }
                Ok(Event::End(_)) => {
                    if depth == 2 {
                        if let Some(element) = open.take() {
                            let end = position(&reader);
                            let content = xml.get(element.content_start..before).unwrap_or("");
                            let tag = xml.get(element.start..element.content_start).unwrap_or("");
                            let name_attribute = NAME_ATTRIBUTE.captures(tag).and_then(|c| {
                                let whole = c.get(0)?;
                                let value = c.get(1).or_else(|| c.get(2))?;
                                Some((
                                    value.as_str().to_string(),
                                    Span::new(
                                        to_source(element.start + whole.start()),
                                        to_source(element.start + whole.end()),
                                    ),
                                ))
                            });
                            elements.push(DocElement {
                                name: element.name,
                                span: Span::new(to_source(element.start), to_source(end)),
                                name_attribute,
                                is_blank: content.trim().is_empty(),
                            });
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Err(err) => {
                    debug!(error = %err, "Stopped reading documentation comment");
                    break;
                }
                Ok(_) => {}
            }
        }
        elements
    }
}

/// Groups the documentation comments of a leading trivia list into blocks.
///
/// `///` lines form one block while only whitespace and a single line
/// break separate them. A `/** */` comment is a block on its own.
#[must_use]
pub fn doc_blocks(source: &str, leading: &[Trivia]) -> Vec<DocBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<DocBlock> = None;
    let mut breaks = 0usize;

    for trivia in leading {
        match trivia.kind {
            TriviaKind::DocComment if trivia.text(source).starts_with("/**") => {
                blocks.extend(current.take());
                blocks.push(DocBlock {
                    comments: vec![trivia.span],
                });
            }
            TriviaKind::DocComment => {
                if breaks > 1 {
                    blocks.extend(current.take());
                }
                current
                    .get_or_insert_with(|| DocBlock {
                        comments: Vec::new(),
                    })
                    .comments
                    .push(trivia.span);
                breaks = 0;
            }
            TriviaKind::EndOfLine => breaks += 1,
            TriviaKind::Whitespace => {}
            _ => blocks.extend(current.take()),
        }
    }
    blocks.extend(current);
    blocks
}

/// Returns the body of a doc comment and its offset within the comment.
fn strip_markers(text: &str) -> (usize, &str) {
    if let Some(body) = text.strip_prefix("/**") {
        (3, body.strip_suffix("*/").unwrap_or(body))
    } else {
        (3, text.get(3..).unwrap_or(""))
    }
}

fn map_position(pieces: &[Piece], pos: usize) -> usize {
    match pieces.iter().rev().find(|p| p.xml_start <= pos) {
        Some(piece) => piece.source_start + (pos - piece.xml_start).min(piece.len),
        None => pieces.first().map_or(0, |p| p.source_start),
    }
}

fn position(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}
