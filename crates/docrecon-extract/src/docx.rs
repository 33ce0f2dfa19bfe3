//! DOCX markup-conversion backend
//!
//! DOCX files are ZIP archives; the main content lives in
//! `word/document.xml`. This backend walks that XML once and emits two
//! artifacts: a simple HTML rendition (headings, paragraphs, tables) and
//! a plain-text fallback, since the downstream prompts want both.

use crate::ExtractError;
use docrecon_domain::{MarkupConverter, MarkupExtraction};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;
use zip::ZipArchive;

/// DOCX to HTML + plain text converter
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxConverter;

impl DocxConverter {
    /// Create the backend
    pub fn new() -> Self {
        Self
    }

    fn read_document_xml(path: &Path) -> Result<String, ExtractError> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| ExtractError::Zip(e.to_string()))?;
        let mut entry = archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractError::Zip(e.to_string()))?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        Ok(xml)
    }
}

impl MarkupConverter for DocxConverter {
    type Error = ExtractError;

    fn convert(&self, path: &Path) -> Result<MarkupExtraction, Self::Error> {
        info!(path = %path.display(), "parsing DOCX");

        let xml = Self::read_document_xml(path)?;
        let mut walker = DocumentWalker::default();
        walker.walk(&xml)?;
        Ok(walker.finish())
    }
}

/// Single-pass event walker over `word/document.xml`
#[derive(Default)]
struct DocumentWalker {
    html: String,
    text: String,

    para: String,
    heading: Option<usize>,
    in_text: bool,

    in_table: bool,
    cell: String,
    row: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DocumentWalker {
    fn walk(&mut self, xml: &str) -> Result<(), ExtractError> {
        let mut reader = Reader::from_str(xml);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => self.on_start(&e),
                Ok(Event::Empty(e)) => self.on_empty(&e),
                Ok(Event::Text(t)) => {
                    if self.in_text {
                        let value = t
                            .unescape()
                            .map_err(|e| ExtractError::Xml(e.to_string()))?;
                        self.para.push_str(&value);
                    }
                }
                Ok(Event::End(e)) => self.on_end(e.name().as_ref()),
                Ok(Event::Eof) => break,
                Err(e) => return Err(ExtractError::Xml(e.to_string())),
                _ => {}
            }
        }
        Ok(())
    }

    fn on_start(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            b"w:p" => {
                self.para.clear();
                self.heading = None;
            }
            b"w:t" => self.in_text = true,
            b"w:tbl" => {
                self.in_table = true;
                self.rows.clear();
            }
            b"w:tr" => self.row.clear(),
            b"w:tc" => self.cell.clear(),
            b"w:pStyle" => self.on_style(e),
            _ => {}
        }
    }

    fn on_empty(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            b"w:pStyle" => self.on_style(e),
            b"w:br" | b"w:tab" => self.para.push(' '),
            _ => {}
        }
    }

    fn on_style(&mut self, e: &BytesStart<'_>) {
        let style = e
            .attributes()
            .flatten()
            .find(|a| a.key.as_ref() == b"w:val")
            .map(|a| String::from_utf8_lossy(&a.value).into_owned());

        if let Some(style) = style {
            if let Some(level) = style.strip_prefix("Heading") {
                self.heading = level.parse::<usize>().ok().filter(|l| (1..=6).contains(l));
            }
        }
    }

    fn on_end(&mut self, name: &[u8]) {
        match name {
            b"w:t" => self.in_text = false,
            b"w:p" => self.flush_paragraph(),
            b"w:tc" => {
                let cell = std::mem::take(&mut self.cell);
                self.row.push(cell.trim().to_string());
            }
            b"w:tr" => {
                let row = std::mem::take(&mut self.row);
                self.rows.push(row);
            }
            b"w:tbl" => self.flush_table(),
            _ => {}
        }
    }

    fn flush_paragraph(&mut self) {
        let para = std::mem::take(&mut self.para);
        let trimmed = para.trim();
        if trimmed.is_empty() {
            return;
        }

        if self.in_table {
            if !self.cell.is_empty() {
                self.cell.push(' ');
            }
            self.cell.push_str(trimmed);
            return;
        }

        match self.heading.take() {
            Some(level) => {
                self.html.push_str(&format!(
                    "<h{level}>{}</h{level}>\n",
                    escape_html(trimmed)
                ));
                self.text.push_str(&format!("# {}\n\n", trimmed));
            }
            None => {
                self.html
                    .push_str(&format!("<p>{}</p>\n", escape_html(trimmed)));
                self.text.push_str(trimmed);
                self.text.push_str("\n\n");
            }
        }
    }

    fn flush_table(&mut self) {
        self.in_table = false;
        if self.rows.is_empty() {
            return;
        }

        self.html.push_str("<table>\n");
        for row in &self.rows {
            self.html.push_str("<tr>");
            for cell in row {
                self.html
                    .push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            self.html.push_str("</tr>\n");
        }
        self.html.push_str("</table>\n");

        for row in &self.rows {
            self.text.push_str(&row.join(" | "));
            self.text.push('\n');
        }
        self.text.push('\n');
        self.rows.clear();
    }

    fn finish(self) -> MarkupExtraction {
        MarkupExtraction {
            html: self.html.trim_end().to_string(),
            text: self.text.trim_end().to_string(),
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
