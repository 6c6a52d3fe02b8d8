//! Shared writer helpers and constants for feed output.

use std::io::Write;

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

/// Media type of the rendered feed.
pub const CONTENT_TYPE: &str = "application/xml";

/// Encoding declared in and used for the rendered feed.
pub const ENCODING: &str = "UTF-8";

/// Format of the root `date` attribute.
pub const FEED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const CDATA_END: &str = "]]>";

/// Write a simple text element.
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write an element whose content is emitted unescaped inside CDATA.
pub fn write_cdata_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    content: &str,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    for section in cdata_sections(content) {
        writer.write_event(Event::CData(BytesCData::new(section)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write `<param name="...">value</param>`.
pub fn write_param<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    let mut param = BytesStart::new("param");
    param.push_attribute(("name", name));
    writer.write_event(Event::Start(param))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("param")))?;
    Ok(())
}

/// Split content so no section contains the CDATA terminator.
///
/// Each `]]>` is broken between `]]` and `>`, which land in adjacent sections.
pub fn cdata_sections(content: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = content;
    while let Some(pos) = rest.find(CDATA_END) {
        let split = pos + 2;
        sections.push(&rest[..split]);
        rest = &rest[split..];
    }
    sections.push(rest);
    sections
}
