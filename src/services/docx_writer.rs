//! DOCX 写入服务 - 业务能力层
//!
//! 只负责把段落写成 WordprocessingML 包，不关心段落从哪里来

use std::io::{Cursor, Write};
use std::path::Path;

use tokio::io::AsyncWriteExt;
use tracing::debug;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{AppError, AppResult};
use crate::formatter::{Paragraph, StyledBlock};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_XML_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

/// DOCX 文件的 MIME 类型
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// 页边距（英寸）
const PAGE_MARGIN_IN: f32 = 0.8;

/// DOCX 写入服务
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxWriter;

impl DocxWriter {
    pub fn new() -> Self {
        Self
    }

    /// 将文档块渲染为 DOCX 字节
    pub fn render(&self, blocks: &[StyledBlock]) -> AppResult<Vec<u8>> {
        let document_xml = document_xml(blocks);
        let bytes = package(&document_xml)?;
        debug!("DOCX 渲染完成: {} 个段落, {} 字节", blocks.len(), bytes.len());
        Ok(bytes)
    }

    /// 渲染并写入新文件，文件已存在时报错（只写一次，不覆盖）
    pub async fn save(&self, blocks: &[StyledBlock], path: &Path) -> AppResult<Vec<u8>> {
        let bytes = self.render(blocks)?;
        write_new_file(path, &bytes).await?;
        Ok(bytes)
    }
}

/// 以 create-new 方式写入文件
async fn write_new_file(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let path_str = path.display().to_string();
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| AppError::file_write_failed(&path_str, e))?;

    file.write_all(bytes)
        .await
        .map_err(|e| AppError::file_write_failed(&path_str, e))?;
    file.flush()
        .await
        .map_err(|e| AppError::file_write_failed(&path_str, e))?;

    debug!("文件已写入: {}", path_str);
    Ok(())
}

fn package(document_xml: &str) -> ZipResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;
    zip.start_file("_rels/.rels", options)?;
    zip.write_all(ROOT_RELS_XML.as_bytes())?;
    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml.as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

fn document_xml(blocks: &[StyledBlock]) -> String {
    let mut xml = String::from(DOCUMENT_XML_HEAD);
    for block in blocks {
        push_paragraph(&mut xml, &block.paragraph());
    }
    let margin = inches_to_twips(PAGE_MARGIN_IN);
    xml.push_str(&format!(
        r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#,
        m = margin
    ));
    xml.push_str("</w:body></w:document>");
    xml
}

fn push_paragraph(xml: &mut String, paragraph: &Paragraph) {
    xml.push_str("<w:p><w:pPr>");
    if paragraph.space_before_pt.is_some() || paragraph.space_after_pt.is_some() {
        xml.push_str("<w:spacing");
        if let Some(before) = paragraph.space_before_pt {
            xml.push_str(&format!(r#" w:before="{}""#, points_to_twips(before)));
        }
        if let Some(after) = paragraph.space_after_pt {
            xml.push_str(&format!(r#" w:after="{}""#, points_to_twips(after)));
        }
        xml.push_str("/>");
    }
    if let Some(indent) = paragraph.left_indent_in {
        xml.push_str(&format!(r#"<w:ind w:left="{}"/>"#, inches_to_twips(indent)));
    }
    xml.push_str("</w:pPr>");

    for run in &paragraph.runs {
        xml.push_str("<w:r>");
        if run.bold || run.size_pt.is_some() {
            xml.push_str("<w:rPr>");
            if run.bold {
                xml.push_str("<w:b/>");
            }
            if let Some(size) = run.size_pt {
                // 字号单位为半磅
                xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, (size * 2.0).round() as u32));
            }
            xml.push_str("</w:rPr>");
        }
        xml.push_str(r#"<w:t xml:space="preserve">"#);
        xml.push_str(&escape_xml(&run.text));
        xml.push_str("</w:t></w:r>");
    }
    xml.push_str("</w:p>");
}

fn points_to_twips(pt: f32) -> u32 {
    (pt * 20.0).round() as u32
}

fn inches_to_twips(inches: f32) -> u32 {
    (inches * 1440.0).round() as u32
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // XML 1.0 不允许的控制字符直接丢弃
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}
