//! `set.nfo` descriptor synthesis.
//!
//! Layout (tab-indented, trailing newline):
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <set>
//!     <title>James Bond</title>
//!     <overview>Exploits of 007</overview>
//!     <originaltitle>007</originaltitle>
//! </set>
//! ```

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::de::from_str as from_xml_str;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::source::Record;

pub const ROOT_ELEMENT: &str = "set";
/// Child elements, in document order.
pub const ELEMENTS: [&str; 3] = ["title", "overview", "originaltitle"];

/// File name used for the descriptor inside each set folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptorName {
    #[default]
    Nfo,
    /// Legacy name used by older skins/scrapers.
    Xml,
}

impl DescriptorName {
    pub fn file_name(&self) -> &'static str {
        match self {
            DescriptorName::Nfo => "set.nfo",
            DescriptorName::Xml => "set.xml",
        }
    }
}

impl fmt::Display for DescriptorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DescriptorName::Nfo => "nfo",
            DescriptorName::Xml => "xml",
        })
    }
}

impl FromStr for DescriptorName {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nfo" | "set.nfo" => Ok(DescriptorName::Nfo),
            "xml" | "set.xml" => Ok(DescriptorName::Xml),
            _ => Err(format!("invalid descriptor name: '{s}' (expected nfo or xml)")),
        }
    }
}

/// Parsed form of an on-disk descriptor. Missing elements read as empty.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename = "set")]
pub struct SetDescriptor {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub originaltitle: String,
}

// XML 1.0 forbids most C0 controls even when escaped.
fn xml_safe(text: &str) -> std::borrow::Cow<'_, str> {
    if text
        .chars()
        .all(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
    {
        return text.into();
    }
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect::<String>()
        .into()
}

/// Serialize a record into descriptor bytes.
pub fn to_xml(record: &Record) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

    let values = [&record.name, &record.overview, &record.original_name];
    for (element, value) in ELEMENTS.iter().zip(values) {
        let clean = xml_safe(value);
        writer.write_event(Event::Start(BytesStart::new(*element)))?;
        writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(clean.as_ref()))))?;
        writer.write_event(Event::End(BytesEnd::new(*element)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse descriptor text (used to sanity-check files we leave untouched).
pub fn parse(xml: &str) -> Result<SetDescriptor> {
    Ok(from_xml_str(xml)?)
}
