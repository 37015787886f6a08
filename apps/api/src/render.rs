//! PDF download rendering — turns feedback or an improved resume into a
//! simple single-font PDF: Helvetica 11pt on US letter, greedy word wrap,
//! page break when the cursor runs off the bottom margin.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::errors::AppError;

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 15.0;
const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const BLANK_LINE_MM: f32 = 4.0;
/// Wrap width in characters — Helvetica 11pt fits ~95 chars inside the margins.
const WRAP_WIDTH: usize = 95;

/// Renders plain text to PDF bytes. Failure is an `AppError::Render`; the
/// caller still has the raw text to offer as a download.
pub fn render_pdf(text: &str) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) = PdfDocument::new(
        "Improved Resume",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Render(e.to_string()))?;

    let mut current_layer = doc.get_page(page).get_layer(layer);
    let mut cursor_y = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in text.lines() {
        let wrapped = wrap_line(line, WRAP_WIDTH);
        if wrapped.is_empty() {
            cursor_y -= BLANK_LINE_MM;
            continue;
        }
        for segment in wrapped {
            if cursor_y < MARGIN_MM {
                let (next_page, next_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                current_layer = doc.get_page(next_page).get_layer(next_layer);
                cursor_y = PAGE_HEIGHT_MM - MARGIN_MM;
            }
            draw_line(&current_layer, &segment, cursor_y, &font);
            cursor_y -= LINE_HEIGHT_MM;
        }
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::Render(e.to_string()))
}

fn draw_line(layer: &printpdf::PdfLayerReference, text: &str, y_mm: f32, font: &IndirectFontRef) {
    layer.use_text(text, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y_mm), font);
}

/// Greedy word wrap at `width` chars. Words longer than the width are
/// hard-split so no segment ever exceeds it. Returns no segments for
/// whitespace-only input.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        for chunk in split_long_word(word, width) {
            let needed = if current.is_empty() {
                chunk.chars().count()
            } else {
                current.chars().count() + 1 + chunk.chars().count()
            };
            if needed > width && !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&chunk);
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn split_long_word(word: &str, width: usize) -> Vec<String> {
    if word.chars().count() <= width {
        return vec![word.to_string()];
    }
    word.chars()
        .collect::<Vec<_>>()
        .chunks(width)
        .map(|c| c.iter().collect())
        .collect()
}
