// src/sitemap/parse.rs
// =============================================================================
// This module extracts page URLs from sitemap XML.
//
// Sitemaps in the wild are not consistent about namespaces:
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"><url><loc>
//   <s:urlset xmlns:s="..."><s:url><s:loc>
//   <urlset><url><loc>            (no namespace at all)
//
// So instead of binding to one namespace URI we walk every element with
// quick-xml and keep the text of any element whose *local* name is `loc`.
//
// Rust concepts:
// - Streaming parsers: quick-xml hands us one event at a time
// - BTreeSet: A sorted set, which gives us dedup + ordering in one step
// =============================================================================

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::BTreeSet;
use thiserror::Error;
use url::Url;

// Ways a sitemap body can fail to be well-formed XML
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML at byte {position}: {source}")]
    Syntax {
        position: u64,
        source: quick_xml::Error,
    },

    #[error("document ended inside <{0}>")]
    Unclosed(String),

    #[error("no element found")]
    NoRootElement,

    #[error("text outside the root element at byte {0}")]
    TextOutsideRoot(u64),

    #[error("second top-level element <{0}> after the root element")]
    MultipleRoots(String),
}

// Extracts the text of every `loc` element, in document order
//
// Text is trimmed and empty entries are skipped. Duplicates are kept here;
// `same_origin_urls` is where the set semantics happen.
pub fn extract_locs(xml: &str) -> Result<Vec<String>, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // Stack of open elements: (qualified name, is this a `loc`?)
    let mut open: Vec<(String, bool)> = Vec::new();
    let mut seen_root = false;
    let mut current = String::new();
    // Only the text before a `loc`'s first child element counts
    let mut loc_has_child = false;
    let mut locs = Vec::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(source) => {
                return Err(XmlError::Syntax {
                    position: reader.buffer_position(),
                    source,
                })
            }
        };

        match event {
            Event::Start(e) => {
                check_single_root(&open, seen_root, e.name().as_ref())?;
                seen_root = true;
                if inside_loc(&open) {
                    loc_has_child = true;
                }
                let is_loc = e.local_name().as_ref() == b"loc";
                if is_loc {
                    current.clear();
                    loc_has_child = false;
                }
                open.push((String::from_utf8_lossy(e.name().as_ref()).into_owned(), is_loc));
            }
            // <loc/> has no text, but it still counts as an element
            Event::Empty(e) => {
                check_single_root(&open, seen_root, e.name().as_ref())?;
                seen_root = true;
                if inside_loc(&open) {
                    loc_has_child = true;
                }
            }
            // trim_text drops whitespace-only text, so anything left at
            // depth 0 is real content outside the root
            Event::Text(_) | Event::CData(_) if open.is_empty() => {
                return Err(XmlError::TextOutsideRoot(reader.buffer_position()));
            }
            Event::Text(e) => {
                if inside_loc(&open) && !loc_has_child {
                    let text = e.unescape().map_err(|source| XmlError::Syntax {
                        position: reader.buffer_position(),
                        source,
                    })?;
                    current.push_str(&text);
                }
            }
            Event::CData(e) => {
                if inside_loc(&open) && !loc_has_child {
                    current.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                // quick-xml already rejects mismatched end tags, so the top of
                // the stack is the element being closed
                if let Some((_, true)) = open.pop() {
                    let text = current.trim();
                    if !text.is_empty() {
                        locs.push(text.to_string());
                    }
                    current.clear();
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((name, _)) = open.pop() {
        return Err(XmlError::Unclosed(name));
    }
    if !seen_root {
        return Err(XmlError::NoRootElement);
    }

    Ok(locs)
}

fn inside_loc(open: &[(String, bool)]) -> bool {
    matches!(open.last(), Some((_, true)))
}

// A document has exactly one top-level element
fn check_single_root(open: &[(String, bool)], seen_root: bool, name: &[u8]) -> Result<(), XmlError> {
    if open.is_empty() && seen_root {
        return Err(XmlError::MultipleRoots(String::from_utf8_lossy(name).into_owned()));
    }
    Ok(())
}

// Deduplicates and keeps only http(s) URLs with the same origin as `base`
//
// Origin = scheme + host + port. Deduplication is exact string matching:
// "https://a.com/x" and "https://a.com/x/" are two different pages.
//
// Returns the URLs sorted lexicographically.
pub fn same_origin_urls<I>(base: &Url, urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let base_origin = base.origin();

    // BTreeSet both deduplicates and sorts
    let unique: BTreeSet<String> = urls.into_iter().collect();

    unique
        .into_iter()
        .filter(|candidate| match Url::parse(candidate) {
            Ok(parsed) => {
                matches!(parsed.scheme(), "http" | "https") && parsed.origin() == base_origin
            }
            Err(_) => false,
        })
        .collect()
}
