//! Parsing of the `.pidx` pack index document.
//!
//! The index looks like:
//!
//! ```xml
//! <index schemaVersion="1.1.0">
//!   <vendor>Keil</vendor>
//!   <url>http://www.keil.com/pack/</url>
//!   <timestamp>2021-05-06T09:35:21.7016525+00:00</timestamp>
//!   <pindex>
//!     <pdsc url="http://www.keil.com/pack/" vendor="Keil" name="ARM_Compiler" version="1.6.3"/>
//!   </pindex>
//! </index>
//! ```
//!
//! Only `timestamp` and the `pindex/pdsc` entries are read.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use roxmltree::{Document, Node};
use thiserror::Error;

use super::{IndexSnapshot, PackageDescriptor};

/// Reasons an index document cannot be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexParseError {
    /// The body is not well-formed XML.
    #[error("malformed index XML: {0}")]
    Xml(String),

    /// The root element has no `timestamp` child.
    #[error("missing index timestamp")]
    MissingTimestamp,

    /// The `timestamp` text is not an ISO-8601 date/time.
    #[error("invalid index timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// Parse an index document into a snapshot.
///
/// `pdsc` entries lacking one of `url`, `vendor`, `name` or `version`, or
/// with an empty value, are skipped with a warning.
pub fn parse_index(xml: &str) -> Result<IndexSnapshot, IndexParseError> {
    let doc = Document::parse(xml).map_err(|e| IndexParseError::Xml(e.to_string()))?;
    let root = doc.root_element();

    let ts_text = child_elements(root, "timestamp")
        .next()
        .ok_or(IndexParseError::MissingTimestamp)?
        .text()
        .unwrap_or_default();
    let timestamp = parse_timestamp(ts_text)
        .ok_or_else(|| IndexParseError::InvalidTimestamp(ts_text.trim().to_string()))?;

    let descriptors = child_elements(root, "pindex")
        .flat_map(|pindex| child_elements(pindex, "pdsc"))
        .filter_map(|node| {
            let descriptor = descriptor_from_node(node);
            if descriptor.is_none() {
                tracing::warn!(
                    line = doc.text_pos_at(node.range().start).row,
                    "skipping pdsc entry with missing attributes"
                );
            }
            descriptor
        })
        .collect();

    Ok(IndexSnapshot::new(timestamp, descriptors))
}

fn child_elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn descriptor_from_node(node: Node<'_, '_>) -> Option<PackageDescriptor> {
    let attr = |name: &str| node.attribute(name).filter(|v| !v.trim().is_empty());
    Some(PackageDescriptor::new(
        attr("url")?,
        attr("vendor")?,
        attr("name")?,
        attr("version")?,
    ))
}

/// Parse an ISO-8601 timestamp.
///
/// Values without an offset are taken as UTC; a bare date is midnight UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}
