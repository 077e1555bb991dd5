//! Plain-text to PDF rendering.
//!
//! Output is A4 portrait in the built-in Helvetica font. Text is word-wrapped
//! to a fixed character width and paginated automatically. The built-in fonts
//! only cover Latin-1, so anything outside it is replaced with `?`.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, Mm, PdfDocument};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::templates::FilledDocument;

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;
const PT_TO_MM: f32 = 0.35;
/// Generous average glyph width used to size the wrap column.
const CHAR_WIDTH_PT: f32 = 7.0;
const MARGIN_MM: f32 = 10.0;
const LAYER_NAME: &str = "Layer 1";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to write pdf {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render pdf: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfSettings {
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_margin_bottom_mm")]
    pub margin_bottom_mm: f32,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            margin_bottom_mm: default_margin_bottom_mm(),
        }
    }
}

fn default_font_size() -> f32 {
    10.0
}

fn default_margin_bottom_mm() -> f32 {
    10.0
}

/// One line of text positioned on a page, coordinates from the bottom left.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
}

/// Characters per wrapped line on an A4 page.
pub fn line_width_chars() -> usize {
    (A4_WIDTH_MM / (CHAR_WIDTH_PT * PT_TO_MM)) as usize
}

/// Replace every character outside Latin-1 with `?`.
pub fn to_latin1_lossy(text: &str) -> String {
    text.chars().map(|c| if u32::from(c) <= 0xFF { c } else { '?' }).collect()
}

/// Split `text` into lines and word-wrap each to `width` characters.
///
/// Blank source lines are kept as empty lines so paragraph spacing survives.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        out.extend(textwrap::wrap(line, width).into_iter().map(|l| l.into_owned()));
    }
    out
}

/// Assign wrapped lines to pages, starting a new page whenever the next line
/// would run into the bottom margin.
pub fn layout_pages(lines: &[String], settings: &PdfSettings) -> Vec<Vec<PlacedLine>> {
    let line_height = settings.font_size * PT_TO_MM;
    let top = A4_HEIGHT_MM - MARGIN_MM;

    let mut pages = Vec::new();
    let mut current = Vec::new();
    let mut cursor = top;

    for line in lines {
        if cursor < top && cursor - line_height < settings.margin_bottom_mm {
            pages.push(std::mem::take(&mut current));
            cursor = top;
        }
        cursor -= line_height;
        if !line.is_empty() {
            current.push(PlacedLine { text: line.clone(), x_mm: MARGIN_MM, y_mm: cursor });
        }
    }
    pages.push(current);

    pages
}

/// Render `doc` as a PDF file at `path`.
pub fn write_pdf(
    doc: &FilledDocument,
    path: &Path,
    settings: &PdfSettings,
) -> Result<(), PdfError> {
    let text = to_latin1_lossy(doc.as_str());
    let lines = wrap_lines(&text, line_width_chars());
    let pages = layout_pages(&lines, settings);
    debug!(lines = lines.len(), pages = pages.len(), "laid out pdf");

    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let (pdf, first_page, first_layer) =
        PdfDocument::new(title.as_str(), Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), LAYER_NAME);
    let font = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(e.to_string()))?;

    let (mut page, mut layer) = (first_page, first_layer);
    for (i, placed) in pages.iter().enumerate() {
        if i > 0 {
            (page, layer) = pdf.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), LAYER_NAME);
        }
        let current = pdf.get_page(page).get_layer(layer);
        for line in placed {
            current.use_text(
                line.text.as_str(),
                settings.font_size,
                Mm(line.x_mm),
                Mm(line.y_mm),
                &font,
            );
        }
    }

    let file = File::create(path)
        .map_err(|source| PdfError::Io { path: path.to_path_buf(), source })?;
    pdf.save(&mut BufWriter::new(file))
        .map_err(|e| PdfError::Render(e.to_string()))?;

    Ok(())
}
