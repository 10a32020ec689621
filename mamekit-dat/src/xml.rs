//! Small helpers shared by the XML readers and writers.

use quick_xml::events::BytesStart;

use crate::error::DatError;

/// Read and unescape a single attribute, if present.
pub(crate) fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, DatError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Element name as a lossy string, for error messages.
pub(crate) fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Escape text for element content. Characters XML 1.0 cannot carry at all
/// (C0 controls other than tab, newline, carriage return) are dropped.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

/// Append `<tag>value</tag>` on its own line at the given indent.
pub(crate) fn write_tag(xml: &mut String, indent: &str, tag: &str, value: &str) {
    xml.push_str(indent);
    xml.push('<');
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&escape_xml(value));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push_str(">\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape_xml("a < b > c"), "a &lt; b &gt; c");
        assert_eq!(escape_xml("bell\u{7}"), "bell");
    }
}
