//! Event-driven HTML scanner behind the block extractor.
//!
//! HTML is close enough to XML for an event reader once end-name checking
//! is relaxed; the scanner keeps a stack of open elements, tolerates void
//! tags and stray end tags, and slices inner markup out of the input by
//! byte offset instead of reassembling it.

use super::{BlockType, TextBlock};
use quick_xml::events::Event;
use quick_xml::Reader;

/// HTML void elements: never pushed onto the open-element stack because
/// they have no end tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A block-level element currently being captured.
struct OpenCapture {
    /// Document-order sequence number (start-tag order)
    seq: usize,
    tag: String,
    block_type: BlockType,
    text: String,
    /// Byte offset of the inner markup's first byte
    inner_start: usize,
    /// Nesting depth of `<ul>`/`<ol>` opened inside this capture.
    /// Text is only accumulated at depth zero, which is what keeps
    /// sub-item text out of a parent list item.
    list_suppress: usize,
}

/// One entry of the open-element stack.
struct StackEntry {
    tag: String,
    capture: Option<OpenCapture>,
}

/// A finished capture, before empty-drop and index assignment.
struct RawBlock {
    seq: usize,
    tag: String,
    block_type: BlockType,
    text: String,
    html: String,
}

/// Scan HTML and return kept blocks (dense-indexed, document order) plus
/// scan warnings. Never fails: a parse error ends the scan early and keeps
/// what was collected.
pub(super) fn scan_html(html: &str) -> (Vec<TextBlock>, Vec<String>) {
    let mut reader = Reader::from_str(html);
    reader.check_end_names(false);

    let mut buf = Vec::new();
    let mut stack: Vec<StackEntry> = Vec::new();
    let mut raw_blocks: Vec<RawBlock> = Vec::new();
    let mut warnings = Vec::new();
    let mut next_seq = 0usize;

    loop {
        // Offset where the next event begins; used as the inner-markup end
        // boundary when that event turns out to be a closing tag.
        let event_start = reader.buffer_position();

        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_lowercase();

                if VOID_TAGS.contains(&tag.as_str()) {
                    if tag == "br" {
                        append_text(&mut stack, " ");
                    }
                } else {
                    if tag == "ul" || tag == "ol" {
                        suppress_list_items(&mut stack);
                    }
                    let capture = BlockType::from_tag(&tag).map(|block_type| OpenCapture {
                        seq: {
                            let seq = next_seq;
                            next_seq += 1;
                            seq
                        },
                        tag: tag.clone(),
                        block_type,
                        text: String::new(),
                        inner_start: reader.buffer_position(),
                        list_suppress: 0,
                    });
                    stack.push(StackEntry { tag, capture });
                }
            },
            Ok(Event::Empty(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_lowercase();
                if tag == "br" {
                    append_text(&mut stack, " ");
                }
            },
            Ok(Event::End(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_lowercase();

                // Stray end tags are ignored; otherwise pop down to the
                // matching element, closing anything left open in between.
                if let Some(pos) = stack.iter().rposition(|entry| entry.tag == tag) {
                    while stack.len() > pos {
                        let entry = stack.pop().expect("stack entry present");
                        if entry.tag == "ul" || entry.tag == "ol" {
                            unsuppress_list_items(&mut stack);
                        }
                        if let Some(capture) = entry.capture {
                            raw_blocks.push(finish_capture(capture, html, event_start));
                        }
                    }
                }
            },
            Ok(Event::Text(ref e)) => {
                let text = match e.unescape() {
                    Ok(cow) => cow.into_owned(),
                    Err(_) => decode_common_entities(&String::from_utf8_lossy(e.as_ref())),
                };
                append_text(&mut stack, &text);
            },
            Ok(Event::CData(ref e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                append_text(&mut stack, &text);
            },
            Ok(Event::Eof) => {
                if !stack.is_empty() {
                    warnings.push(format!(
                        "{} element(s) left unclosed at end of input",
                        stack.len()
                    ));
                }
                // Close anything still open at the end of input.
                while let Some(entry) = stack.pop() {
                    if let Some(capture) = entry.capture {
                        raw_blocks.push(finish_capture(capture, html, html.len()));
                    }
                }
                break;
            },
            Ok(_) => {}, // comments, doctype, processing instructions
            Err(e) => {
                warnings.push(format!(
                    "HTML scan stopped at byte {}: {}",
                    reader.buffer_position(),
                    e
                ));
                // Keep blocks already captured; close open ones at the
                // failure point.
                while let Some(entry) = stack.pop() {
                    if let Some(capture) = entry.capture {
                        raw_blocks.push(finish_capture(capture, html, event_start));
                    }
                }
                break;
            },
        }
        buf.clear();
    }

    // Captures finish in end-tag order; document order is start-tag order.
    raw_blocks.sort_by_key(|b| b.seq);

    let mut blocks = Vec::new();
    for raw in raw_blocks {
        let text = normalize_whitespace(&raw.text);
        if text.is_empty() {
            continue;
        }
        blocks.push(TextBlock {
            index: blocks.len(),
            block_type: raw.block_type,
            text,
            html: raw.html,
            tag: raw.tag,
        });
    }

    (blocks, warnings)
}

/// Append text to every open capture that is not inside a nested list.
fn append_text(stack: &mut [StackEntry], text: &str) {
    for entry in stack.iter_mut() {
        if let Some(capture) = entry.capture.as_mut() {
            if capture.list_suppress == 0 {
                capture.text.push_str(text);
            }
        }
    }
}

/// A nested list opened: suppress text accumulation for open list items.
fn suppress_list_items(stack: &mut [StackEntry]) {
    for entry in stack.iter_mut() {
        if let Some(capture) = entry.capture.as_mut() {
            if capture.block_type == BlockType::ListItem {
                capture.list_suppress += 1;
            }
        }
    }
}

/// A nested list closed: re-enable text accumulation.
fn unsuppress_list_items(stack: &mut [StackEntry]) {
    for entry in stack.iter_mut() {
        if let Some(capture) = entry.capture.as_mut() {
            if capture.block_type == BlockType::ListItem {
                capture.list_suppress = capture.list_suppress.saturating_sub(1);
            }
        }
    }
}

/// Turn an open capture into a raw block, slicing inner markup from input.
fn finish_capture(capture: OpenCapture, html: &str, inner_end: usize) -> RawBlock {
    let inner = if capture.inner_start <= inner_end && inner_end <= html.len() {
        html[capture.inner_start..inner_end].trim()
    } else {
        ""
    };
    RawBlock {
        seq: capture.seq,
        tag: capture.tag,
        block_type: capture.block_type,
        text: capture.text,
        html: inner.to_string(),
    }
}

/// Trim and collapse internal whitespace runs to single spaces.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fallback for text the XML unescaper rejects (HTML-only entities).
fn decode_common_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
