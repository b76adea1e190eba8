// src/export/pdf.rs

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};
use std::fs;
use std::path::Path;

const PAGE_W: f32 = 595.0; // A4
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 50.0;
const ROW_H: f32 = 20.0;
const IMAGE_ROW_H: f32 = 56.0;
const CELL_PAD: f32 = 4.0;

const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 9.0;
const HEADER_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;

/// Approximate Helvetica advance, used to clip text to its column.
const CHAR_W: f32 = 0.52;

/// Baseline-encoded JPEG that PDF readers decode themselves (`DCTDecode`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jpeg {
    pub data: Vec<u8>,
    pub width: u16,
    pub height: u16,
    pub components: u8,
}

impl Jpeg {
    /// Read the frame header of a JPEG stream. Returns `None` for anything
    /// that is not a gray or RGB JPEG with a usable size.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if !bytes.starts_with(&[0xFF, 0xD8]) {
            return None;
        }

        let mut i = 2;
        while i + 4 <= bytes.len() {
            if bytes[i] != 0xFF {
                return None;
            }
            let marker = bytes[i + 1];
            match marker {
                // fill byte
                0xFF => {
                    i += 1;
                    continue;
                }
                0x01 | 0xD0..=0xD7 => {
                    i += 2;
                    continue;
                }
                // start of scan or end of image before any frame header
                0xDA | 0xD9 => return None,
                _ => {}
            }

            let len = usize::from(u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]));
            let is_frame = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
            if is_frame {
                let seg = bytes.get(i + 4..i + 2 + len)?;
                if seg.len() < 6 {
                    return None;
                }
                let height = u16::from_be_bytes([seg[1], seg[2]]);
                let width = u16::from_be_bytes([seg[3], seg[4]]);
                let components = seg[5];
                if width == 0 || height == 0 || !matches!(components, 1 | 3) {
                    return None;
                }
                return Some(Self {
                    data: bytes.to_vec(),
                    width,
                    height,
                    components,
                });
            }
            i += 2 + len;
        }
        None
    }
}

/// One table row: text cells plus an optional picture drawn in the last
/// column, on top of that cell's text.
#[derive(Debug, Clone, Default)]
pub struct PdfRow {
    pub cells: Vec<String>,
    pub picture: Option<Jpeg>,
}

impl PdfRow {
    fn height(&self) -> f32 {
        if self.picture.is_some() {
            IMAGE_ROW_H
        } else {
            ROW_H
        }
    }
}

/// Paginated event table: a title block on the first page, a repeated
/// column header on every page and a page number in the footer.
pub struct TimelinePdf {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    next_id: i32,
    page_refs: Vec<Ref>,
    image_count: usize,
}

impl Default for TimelinePdf {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelinePdf {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            next_id: 4,
            page_refs: Vec::new(),
            image_count: 0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Write `jpeg` as an image XObject and return its resource name.
    fn embed_jpeg(&mut self, jpeg: &Jpeg) -> (String, Ref) {
        let id = self.fresh_ref();
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);

        let mut image = self.pdf.image_xobject(id, &jpeg.data);
        image.filter(Filter::DctDecode);
        image.width(i32::from(jpeg.width));
        image.height(i32::from(jpeg.height));
        if jpeg.components == 1 {
            image.color_space().device_gray();
        } else {
            image.color_space().device_rgb();
        }
        image.bits_per_component(8);

        (name, id)
    }

    /// Lay out `rows` under `headers`. `widths` are column fractions of the
    /// printable width and must sum to 1.
    pub fn write_table(
        &mut self,
        title: &str,
        subtitle: &str,
        headers: &[&str],
        widths: &[f32],
        rows: &[PdfRow],
    ) {
        let usable = PAGE_W - 2.0 * MARGIN;
        let cols: Vec<f32> = widths.iter().map(|f| f * usable).collect();
        let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

        let mut remaining: &[PdfRow] = rows;
        let mut page_no = 1;

        loop {
            let mut content = Content::new();
            let mut images: Vec<(String, Ref)> = Vec::new();
            let mut top = PAGE_H - MARGIN + ROW_H;

            if page_no == 1 {
                text(&mut content, MARGIN, top - ROW_H, TITLE_SIZE, title);
                top -= 18.0;
                text(&mut content, MARGIN, top - ROW_H, SUBTITLE_SIZE, subtitle);
                top -= 28.0;
            } else {
                top -= 10.0;
            }

            fill_band(&mut content, top, ROW_H, usable, (0.85, 0.87, 0.90));
            draw_row(&mut content, top, ROW_H, &cols, &header_row, HEADER_SIZE);
            top -= ROW_H;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                let h = row.height();
                if top - h < MARGIN && consumed > 0 {
                    break;
                }
                if i % 2 == 0 {
                    fill_band(&mut content, top, h, usable, (0.96, 0.96, 0.96));
                }
                draw_row(&mut content, top, h, &cols, &row.cells, BODY_SIZE);

                if let (Some(jpeg), Some(col_w)) = (&row.picture, cols.last()) {
                    let (name, id) = self.embed_jpeg(jpeg);
                    let x = MARGIN + usable - col_w;
                    draw_picture(&mut content, x, top, *col_w, h, jpeg, &name);
                    images.push((name, id));
                }

                top -= h;
                consumed += 1;
            }

            text(
                &mut content,
                PAGE_W - MARGIN - 40.0,
                MARGIN - 30.0,
                BODY_SIZE,
                &format!("Page {page_no}"),
            );
            self.finish_page(content, &images);

            remaining = &remaining[consumed..];
            if remaining.is_empty() {
                break;
            }
            page_no += 1;
        }
    }

    fn finish_page(&mut self, content: Content, images: &[(String, Ref)]) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
                .contents(content_id);
            let mut resources = page.resources();
            resources.fonts().pair(Name(b"F1"), self.font_id);
            if !images.is_empty() {
                let mut x_objects = resources.x_objects();
                for (name, id) in images {
                    x_objects.pair(Name(name.as_bytes()), *id);
                }
            }
        }

        self.pdf.stream(content_id, &content.finish());
    }

    pub fn to_bytes(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let count = self.page_refs.len() as i32;
        self.pdf
            .pages(self.pages_id)
            .count(count)
            .kids(self.page_refs.iter().copied());
        self.pdf.finish()
    }

    pub fn save(self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.to_bytes())
    }
}

fn text(content: &mut Content, x: f32, y: f32, size: f32, s: &str) {
    let encoded = latin1(s);
    content.begin_text();
    content.set_font(Name(b"F1"), size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(&encoded));
    content.end_text();
}

fn fill_band(content: &mut Content, top: f32, h: f32, w: f32, rgb: (f32, f32, f32)) {
    content.save_state();
    content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
    content.rect(MARGIN, top - h, w, h);
    content.fill_nonzero();
    content.restore_state();
}

fn draw_row(content: &mut Content, top: f32, h: f32, cols: &[f32], row: &[String], size: f32) {
    let mut x = MARGIN;
    for (w, cell) in cols.iter().zip(row) {
        let max_chars = ((w - 2.0 * CELL_PAD) / (size * CHAR_W)).max(1.0) as usize;
        text(content, x + CELL_PAD, top - 14.0, size, &clip(cell, max_chars));

        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, top - h, *w, h);
        content.stroke();
        content.restore_state();
        x += w;
    }
}

/// Scale the picture into the cell at (`x`, `top`), keeping its aspect ratio.
fn draw_picture(content: &mut Content, x: f32, top: f32, w: f32, h: f32, jpeg: &Jpeg, name: &str) {
    let box_w = w - 2.0 * CELL_PAD;
    let box_h = h - 2.0 * CELL_PAD;
    let (iw, ih) = (f32::from(jpeg.width), f32::from(jpeg.height));
    let scale = (box_w / iw).min(box_h / ih);
    let (dw, dh) = (iw * scale, ih * scale);

    content.save_state();
    content.transform([dw, 0.0, 0.0, dh, x + CELL_PAD, top - CELL_PAD - dh]);
    content.x_object(Name(name.as_bytes()));
    content.restore_state();
}

fn clip(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// The built-in font only covers Latin-1; anything else prints as `?`.
fn latin1(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SOI, an APP0 segment, then a baseline frame header for 3x2 RGB.
    fn tiny_jpeg() -> Vec<u8> {
        let mut b = vec![0xFF, 0xD8];
        b.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00]);
        b.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x02, 0x00, 0x03, 0x03]);
        b.extend_from_slice(&[0; 9]);
        b.extend_from_slice(&[0xFF, 0xD9]);
        b
    }

    #[test]
    fn frame_header_gives_size_and_components() {
        let jpeg = Jpeg::parse(&tiny_jpeg()).unwrap();
        assert_eq!((jpeg.width, jpeg.height, jpeg.components), (3, 2, 3));
    }

    #[test]
    fn non_jpeg_payloads_are_not_embedded() {
        assert!(Jpeg::parse(&[0x89, b'P', b'N', b'G', 0, 0, 0, 0]).is_none());
        assert!(Jpeg::parse(&[0xFF, 0xD8, 0xFF, 0xD9]).is_none());
    }

    #[test]
    fn embedded_picture_is_a_dct_xobject() {
        let rows = vec![PdfRow {
            cells: vec!["1".into(), "2020-01-01".into(), "Launch".into(), String::new()],
            picture: Jpeg::parse(&tiny_jpeg()),
        }];
        let mut pdf = TimelinePdf::new();
        pdf.write_table("T", "S", &["#", "date", "event", "image"], &[0.1, 0.2, 0.5, 0.2], &rows);
        let bytes = pdf.to_bytes();
        let haystack = String::from_utf8_lossy(&bytes);
        assert!(haystack.contains("/DCTDecode"));
        assert!(haystack.contains("/Im1"));
    }
}
