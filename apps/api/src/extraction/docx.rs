//! DOCX reader: pulls `word/document.xml` out of the zip container and walks it
//! with `quick-xml`.
//!
//! Output layout: every body paragraph followed by `\n`, then every top-level
//! table row as `cell + " "` per cell followed by `\n`. Paragraphs inside a cell
//! are joined with `\n`; nested tables fold into the enclosing cell. Text-box
//! paragraphs follow the paragraph that anchors them, and `mc:Fallback` copies
//! are skipped.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let xml = read_document_part(bytes)?;
    let layout = walk_document(&xml)?;
    Ok(layout.render())
}

fn read_document_part(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Corrupt(format!("not a DOCX container: {e}")))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Corrupt(format!("missing {DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Corrupt(format!("unreadable {DOCUMENT_PART}: {e}")))?;
    Ok(xml)
}

#[derive(Debug, Default)]
struct DocumentLayout {
    paragraphs: Vec<String>,
    tables: Vec<Vec<Vec<String>>>,
}

impl DocumentLayout {
    fn render(&self) -> String {
        let mut text = String::new();
        for paragraph in &self.paragraphs {
            text.push_str(paragraph);
            text.push('\n');
        }
        for row in self.tables.iter().flatten() {
            for cell in row {
                text.push_str(cell);
                text.push(' ');
            }
            text.push('\n');
        }
        text
    }
}

/// WordprocessingML elements the walker reacts to, resolved by namespace so the
/// prefix a producer binds (`w:`, another prefix, or the default) does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Table,
    Row,
    Cell,
    Paragraph,
    Text,
    Tab,
    Break,
    /// `mc:Fallback`: a down-level copy of the preceding `mc:Choice`.
    Fallback,
    Other,
}

const WORDML_NAMESPACES: [&[u8]; 2] = [
    b"http://schemas.openxmlformats.org/wordprocessingml/2006/main",
    b"http://purl.oclc.org/ooxml/wordprocessingml/main",
];
const MARKUP_COMPATIBILITY_NAMESPACE: &[u8] =
    b"http://schemas.openxmlformats.org/markup-compatibility/2006";

impl Tag {
    fn resolve(namespace: &ResolveResult<'_>, local_name: &[u8]) -> Self {
        match namespace {
            ResolveResult::Bound(Namespace(ns)) if WORDML_NAMESPACES.contains(ns) => {
                match local_name {
                    b"tbl" => Tag::Table,
                    b"tr" => Tag::Row,
                    b"tc" => Tag::Cell,
                    b"p" => Tag::Paragraph,
                    b"t" => Tag::Text,
                    b"tab" => Tag::Tab,
                    b"br" | b"cr" => Tag::Break,
                    _ => Tag::Other,
                }
            }
            ResolveResult::Bound(Namespace(ns))
                if *ns == MARKUP_COMPATIBILITY_NAMESPACE && local_name == b"Fallback" =>
            {
                Tag::Fallback
            }
            _ => Tag::Other,
        }
    }
}

/// A paragraph still being read. Paragraphs nested inside it (text boxes)
/// are emitted right after it.
#[derive(Debug, Default)]
struct OpenParagraph {
    text: String,
    nested: Vec<String>,
}

#[derive(Debug, Default)]
struct Walker {
    layout: DocumentLayout,
    table_depth: usize,
    fallback_depth: usize,
    in_text_run: bool,
    paragraphs: Vec<OpenParagraph>,
    cell_paragraphs: Vec<String>,
    row: Vec<String>,
    table: Vec<Vec<String>>,
}

impl Walker {
    fn open(&mut self, tag: Tag) {
        if self.fallback_depth > 0 {
            if tag == Tag::Fallback {
                self.fallback_depth += 1;
            }
            return;
        }
        match tag {
            Tag::Fallback => self.fallback_depth += 1,
            Tag::Table => self.table_depth += 1,
            Tag::Row if self.table_depth == 1 => self.row.clear(),
            Tag::Cell if self.table_depth == 1 => self.cell_paragraphs.clear(),
            Tag::Paragraph => self.paragraphs.push(OpenParagraph::default()),
            Tag::Text => self.in_text_run = true,
            _ => {}
        }
    }

    fn close(&mut self, tag: Tag) {
        if self.fallback_depth > 0 {
            if tag == Tag::Fallback {
                self.fallback_depth -= 1;
            }
            return;
        }
        match tag {
            Tag::Table => {
                self.table_depth = self.table_depth.saturating_sub(1);
                if self.table_depth == 0 {
                    self.layout.tables.push(std::mem::take(&mut self.table));
                }
            }
            Tag::Row if self.table_depth == 1 => self.table.push(std::mem::take(&mut self.row)),
            Tag::Cell if self.table_depth == 1 => {
                self.row.push(self.cell_paragraphs.join("\n"));
                self.cell_paragraphs.clear();
            }
            Tag::Paragraph => self.finish_paragraph(),
            Tag::Text => self.in_text_run = false,
            _ => {}
        }
    }

    fn empty(&mut self, tag: Tag) {
        if self.fallback_depth > 0 {
            return;
        }
        match tag {
            Tag::Tab => self.push_text("\t"),
            Tag::Break => self.push_text("\n"),
            // Self-closing paragraph or cell: open and close in one step.
            Tag::Paragraph | Tag::Cell | Tag::Row => {
                self.open(tag);
                self.close(tag);
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraphs.last_mut() {
            paragraph.text.push_str(text);
        }
    }

    fn finish_paragraph(&mut self) {
        let Some(done) = self.paragraphs.pop() else {
            return;
        };
        if let Some(outer) = self.paragraphs.last_mut() {
            outer.nested.push(done.text);
            outer.nested.extend(done.nested);
            return;
        }
        let sink = if self.table_depth == 0 {
            &mut self.layout.paragraphs
        } else {
            &mut self.cell_paragraphs
        };
        sink.push(done.text);
        sink.extend(done.nested);
    }
}

fn walk_document(xml: &str) -> Result<DocumentLayout, ExtractionError> {
    let mut reader = NsReader::from_str(xml);
    let mut walker = Walker::default();

    loop {
        let event = reader.read_resolved_event().map(|(namespace, event)| {
            let tag = match &event {
                Event::Start(e) | Event::Empty(e) => {
                    Tag::resolve(&namespace, e.local_name().as_ref())
                }
                Event::End(e) => Tag::resolve(&namespace, e.local_name().as_ref()),
                _ => Tag::Other,
            };
            (tag, event)
        });

        match event {
            Ok((tag, Event::Start(_))) => walker.open(tag),
            Ok((tag, Event::End(_))) => walker.close(tag),
            Ok((tag, Event::Empty(_))) => walker.empty(tag),
            Ok((_, Event::Text(e))) if walker.in_text_run => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractionError::Corrupt(format!("bad text run: {err}")))?;
                walker.push_text(&text);
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractionError::Corrupt(format!(
                    "malformed {DOCUMENT_PART} at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }

    Ok(walker.layout)
}

#[cfg(test)]
pub(super) mod tests {
    use std::io::Write;

    use super::*;

    /// Builds a minimal DOCX whose `<w:body>` holds `body`.
    pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
        docx_with_document(&format!(
            r#"<w:document xmlns:w="{W}" xmlns:mc="{MC}" xmlns:wps="{WPS}"><w:body>{body}</w:body></w:document>"#
        ))
    }

    const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    const MC: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
    const WPS: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingShape";

    fn docx_with_document(document: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
{document}"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    fn cell(text: &str) -> String {
        format!("<w:tc><w:tcPr/>{}</w:tc>", para(text))
    }

    #[test]
    fn test_paragraphs_each_end_with_newline() {
        let bytes = docx_with_body(&format!("{}{}", para("Jane Doe"), para("jane@example.com")));
        assert_eq!(extract(&bytes).unwrap(), "Jane Doe\njane@example.com\n");
    }

    #[test]
    fn test_runs_within_paragraph_are_concatenated() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>Engineer</w:t></w:r></w:p>",
        );
        assert_eq!(extract(&bytes).unwrap(), "Senior Engineer\n");
    }

    #[test]
    fn test_tables_follow_paragraphs_row_by_row() {
        let body = format!(
            "{}<w:tbl><w:tr>{}{}</w:tr><w:tr>{}{}</w:tr></w:tbl>{}",
            para("Skills"),
            cell("Rust"),
            cell("Go"),
            cell("SQL"),
            cell("Kafka"),
            para("References on request"),
        );
        let bytes = docx_with_body(&body);
        assert_eq!(
            extract(&bytes).unwrap(),
            "Skills\nReferences on request\nRust Go \nSQL Kafka \n"
        );
    }

    #[test]
    fn test_entities_tabs_and_breaks() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>R&amp;D</w:t><w:tab/><w:t>Lead</w:t><w:br/><w:t>2020</w:t></w:r></w:p>",
        );
        assert_eq!(extract(&bytes).unwrap(), "R&D\tLead\n2020\n");
    }

    #[test]
    fn test_empty_paragraph_still_emits_newline() {
        let bytes = docx_with_body(&format!("{}<w:p/>{}", para("A"), para("B")));
        assert_eq!(extract(&bytes).unwrap(), "A\n\nB\n");
    }

    #[test]
    fn test_text_box_keeps_anchoring_paragraph_text() {
        let body = format!(
            "<w:p><w:r><w:t xml:space=\"preserve\">Outer before </w:t></w:r>\
             <w:r><w:drawing><wps:txbx><w:txbxContent>{}</w:txbxContent></wps:txbx></w:drawing></w:r>\
             <w:r><w:t>outer after</w:t></w:r></w:p>{}",
            para("Inner box"),
            para("Next"),
        );
        let bytes = docx_with_body(&body);
        assert_eq!(
            extract(&bytes).unwrap(),
            "Outer before outer after\nInner box\nNext\n"
        );
    }

    #[test]
    fn test_alternate_content_fallback_is_not_duplicated() {
        let body = format!(
            "<w:p><w:r><mc:AlternateContent>\
             <mc:Choice Requires=\"wps\"><w:drawing><wps:txbx><w:txbxContent>{}</w:txbxContent></wps:txbx></w:drawing></mc:Choice>\
             <mc:Fallback><w:pict><w:txbxContent>{}</w:txbxContent></w:pict></mc:Fallback>\
             </mc:AlternateContent></w:r><w:r><w:t>Anchor</w:t></w:r></w:p>",
            para("Sidebar"),
            para("Sidebar"),
        );
        let bytes = docx_with_body(&body);
        assert_eq!(extract(&bytes).unwrap(), "Anchor\nSidebar\n");
    }

    #[test]
    fn test_default_namespace_is_recognised() {
        let bytes = docx_with_document(&format!(
            r#"<document xmlns="{W}"><body><p><r><t>Jane Doe</t></r></p><tbl><tr><tc><p><r><t>Rust</t></r></p></tc></tr></tbl></body></document>"#
        ));
        assert_eq!(extract(&bytes).unwrap(), "Jane Doe\nRust \n");
    }

    #[test]
    fn test_other_prefix_is_recognised() {
        let bytes = docx_with_document(&format!(
            r#"<wx:document xmlns:wx="{W}"><wx:body><wx:p><wx:r><wx:t>Jane Doe</wx:t></wx:r></wx:p></wx:body></wx:document>"#
        ));
        assert_eq!(extract(&bytes).unwrap(), "Jane Doe\n");
    }

    #[test]
    fn test_other_namespaces_with_same_local_names_are_ignored() {
        let body = "<w:p><w:r><w:t>Kept</w:t></w:r></w:p>\
             <x:p xmlns:x=\"urn:example\"><x:t>Dropped</x:t></x:p>";
        let bytes = docx_with_body(body);
        assert_eq!(extract(&bytes).unwrap(), "Kept\n");
    }

    #[test]
    fn test_non_zip_bytes_are_corrupt() {
        let err = extract(b"PK\x03\x04 but not really").unwrap_err();
        assert!(matches!(err, ExtractionError::Corrupt(_)));
    }

    #[test]
    fn test_missing_document_part_is_corrupt() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract(&bytes).unwrap_err();
        assert!(err.to_string().contains(DOCUMENT_PART));
    }
}
