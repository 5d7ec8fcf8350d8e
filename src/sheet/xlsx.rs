//! Serialization of a [`Worksheet`] into a minimal Office Open XML
//! spreadsheet package (a ZIP archive of XML parts).

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{Seek, Write};
use std::path::Path;

use zip::write::{SimpleFileOptions, ZipWriter};

use crate::color::RGBColor;
use crate::error::Error;
use crate::sheet::Worksheet;
use crate::Result;

const MAIN_NAMESPACE: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIPS_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_RELATIONSHIPS_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// Writes a worksheet as an xlsx package to any `Write + Seek` sink.
pub struct XlsxWriter<W: Write + Seek> {
    zip_writer: ZipWriter<W>,
}

/// Solid fills of the stylesheet, deduplicated in first-seen order.
///
/// Fill indices 0 (none) and 1 (gray125) are fixed defaults expected by
/// spreadsheet consumers, so custom fills start at index 2. Each custom fill
/// owns one entry in cellXfs, referenced by cell `s` attributes starting
/// at 1.
struct FillTable {
    colors: Vec<RGBColor>,
    style_indices: HashMap<RGBColor, usize>,
}

impl FillTable {
    fn from_worksheet(sheet: &Worksheet) -> Self {
        let mut colors = Vec::new();
        let mut style_indices = HashMap::new();
        for (_, color) in sheet.cells() {
            if !style_indices.contains_key(&color) {
                colors.push(color);
                style_indices.insert(color, colors.len());
            }
        }
        FillTable {
            colors,
            style_indices,
        }
    }

    fn style_index(&self, color: &RGBColor) -> usize {
        self.style_indices[color]
    }
}

impl<W: Write + Seek> XlsxWriter<W> {
    pub fn new(writer: W) -> Self {
        XlsxWriter {
            zip_writer: ZipWriter::new(writer),
        }
    }

    /// Writes the complete package and returns the underlying sink.
    pub fn write(mut self, sheet: &Worksheet) -> Result<W> {
        let fill_table = FillTable::from_worksheet(sheet);
        self.add_part("[Content_Types].xml", &content_types_xml())
            .map_err(|_| Error::FailedToWriteContentTypes)?;
        self.add_part("_rels/.rels", &package_relationships_xml())
            .map_err(|_| Error::FailedToWritePackageRelationships)?;
        self.add_part("xl/workbook.xml", &workbook_xml(sheet.title()))
            .map_err(|_| Error::FailedToWriteWorkbook)?;
        self.add_part("xl/_rels/workbook.xml.rels", &workbook_relationships_xml())
            .map_err(|_| Error::FailedToWriteWorkbook)?;
        self.add_part("xl/styles.xml", &stylesheet_xml(&fill_table))
            .map_err(|_| Error::FailedToWriteStylesheet)?;
        self.add_part("xl/worksheets/sheet1.xml", &worksheet_xml(sheet, &fill_table))
            .map_err(|_| Error::FailedToWriteWorksheet)?;
        self.zip_writer
            .finish()
            .map_err(|_| Error::FailedToFinishPackage)
    }

    fn add_part(&mut self, path: &str, content: &str) -> zip::result::ZipResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip_writer.start_file(path, options)?;
        self.zip_writer.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Writes the worksheet as `<path>`, truncating any existing file.
pub fn write_worksheet_to_file(sheet: &Worksheet, path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(path.display().to_string(), e))?;
    XlsxWriter::new(file).write(sheet)?;
    Ok(())
}

/// Spreadsheet column letters in bijective base 26: 1 -> A, 26 -> Z,
/// 27 -> AA.
fn column_letter(column: u32) -> String {
    let mut remaining = column;
    let mut letters = Vec::new();
    while remaining > 0 {
        let digit = ((remaining - 1) % 26) as u8;
        letters.push((b'A' + digit) as char);
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn cell_reference(column: u32, row: u32) -> String {
    format!("{}{}", column_letter(column), row)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn content_types_xml() -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(concat!(
        "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
        "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
        "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
        "<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>",
        "<Override PartName=\"/xl/worksheets/sheet1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
        "<Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>",
        "</Types>",
    ));
    xml
}

fn package_relationships_xml() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\">\
         <Relationship Id=\"rId1\" Type=\"{}/officeDocument\" Target=\"xl/workbook.xml\"/>\
         </Relationships>",
        XML_DECLARATION, PACKAGE_RELATIONSHIPS_NAMESPACE, RELATIONSHIPS_NAMESPACE
    )
}

fn workbook_xml(title: &str) -> String {
    format!(
        "{}<workbook xmlns=\"{}\" xmlns:r=\"{}\">\
         <sheets><sheet name=\"{}\" sheetId=\"1\" r:id=\"rId1\"/></sheets>\
         </workbook>",
        XML_DECLARATION,
        MAIN_NAMESPACE,
        RELATIONSHIPS_NAMESPACE,
        escape_xml(title)
    )
}

fn workbook_relationships_xml() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\">\
         <Relationship Id=\"rId1\" Type=\"{}/worksheet\" Target=\"worksheets/sheet1.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"{}/styles\" Target=\"styles.xml\"/>\
         </Relationships>",
        XML_DECLARATION,
        PACKAGE_RELATIONSHIPS_NAMESPACE,
        RELATIONSHIPS_NAMESPACE,
        RELATIONSHIPS_NAMESPACE
    )
}

fn stylesheet_xml(fill_table: &FillTable) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(&format!("<styleSheet xmlns=\"{}\">", MAIN_NAMESPACE));
    xml.push_str("<fonts count=\"1\"><font><sz val=\"11\"/><name val=\"Calibri\"/></font></fonts>");
    xml.push_str(&format!("<fills count=\"{}\">", fill_table.colors.len() + 2));
    xml.push_str("<fill><patternFill patternType=\"none\"/></fill>");
    xml.push_str("<fill><patternFill patternType=\"gray125\"/></fill>");
    for color in &fill_table.colors {
        xml.push_str(&format!(
            "<fill><patternFill patternType=\"solid\">\
             <fgColor rgb=\"FF{0}\"/><bgColor rgb=\"FF{0}\"/>\
             </patternFill></fill>",
            color.hex_digits()
        ));
    }
    xml.push_str("</fills>");
    xml.push_str(
        "<borders count=\"1\"><border><left/><right/><top/><bottom/><diagonal/></border></borders>",
    );
    xml.push_str(
        "<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>",
    );
    xml.push_str(&format!("<cellXfs count=\"{}\">", fill_table.colors.len() + 1));
    xml.push_str("<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>");
    for fill_index in 0..fill_table.colors.len() {
        xml.push_str(&format!(
            "<xf numFmtId=\"0\" fontId=\"0\" fillId=\"{}\" borderId=\"0\" xfId=\"0\" applyFill=\"1\"/>",
            fill_index + 2
        ));
    }
    xml.push_str("</cellXfs>");
    xml.push_str("</styleSheet>");
    xml
}

fn worksheet_xml(sheet: &Worksheet, fill_table: &FillTable) -> String {
    let (max_column, max_row) = sheet.dimensions();
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(&format!("<worksheet xmlns=\"{}\">", MAIN_NAMESPACE));
    if max_column > 0 && max_row > 0 {
        xml.push_str(&format!(
            "<dimension ref=\"A1:{}\"/>",
            cell_reference(max_column, max_row)
        ));
        xml.push_str(&format!(
            "<cols><col min=\"1\" max=\"{}\" width=\"{}\" customWidth=\"1\"/></cols>",
            max_column,
            sheet.column_width()
        ));
    }
    xml.push_str("<sheetData>");
    let mut current_row = 0;
    for ((column, row), color) in sheet.cells() {
        if row != current_row {
            if current_row != 0 {
                xml.push_str("</row>");
            }
            xml.push_str(&format!(
                "<row r=\"{}\" ht=\"{}\" customHeight=\"1\">",
                row,
                sheet.row_height()
            ));
            current_row = row;
        }
        xml.push_str(&format!(
            "<c r=\"{}\" s=\"{}\"/>",
            cell_reference(column, row),
            fill_table.style_index(&color)
        ));
    }
    if current_row != 0 {
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData>");
    xml.push_str("</worksheet>");
    xml
}
