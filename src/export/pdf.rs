use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const A4_SHORT: f32 = 595.0;
const A4_LONG: f32 = 842.0;

/// Approximate Helvetica advance width, as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.52;

/// Header and body of a table, plus what goes around it on every page.
pub struct TableDoc<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub headers: &'a [&'a str],
    pub rows: &'a [Vec<String>],
    /// Column indexes rendered right-aligned.
    pub numeric: &'a [usize],
    pub footer: &'a str,
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    bold_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,
    font_size: f32,
    title_size: f32,
}

impl PdfManager {
    /// Wide tables switch to landscape.
    pub fn new(landscape: bool) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_id = Ref::new(4);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));

        let (page_w, page_h) = if landscape {
            (A4_LONG, A4_SHORT)
        } else {
            (A4_SHORT, A4_LONG)
        };

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            bold_id,
            page_refs: Vec::new(),
            next_id: 5,
            page_w,
            page_h,
            margin: 40.0,
            row_h: 18.0,
            font_size: 9.0,
            title_size: 15.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * AVG_CHAR_WIDTH
    }

    fn draw_text(content: &mut Content, font: &[u8], x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(font), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(latin1(text).as_slice()));
        content.end_text();
    }

    fn fill_band(content: &mut Content, x: f32, y: f32, w: f32, h: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    /// Column widths from content, scaled down to fit the printable width.
    fn column_widths(&self, doc: &TableDoc<'_>) -> Vec<f32> {
        let pad = 8.0;
        let mut widths: Vec<f32> = doc
            .headers
            .iter()
            .map(|h| self.text_width(h, self.font_size) + pad)
            .collect();

        for row in doc.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = w.max(self.text_width(cell, self.font_size) + pad);
                }
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;
        if total > max {
            let scale = max / total;
            widths.iter_mut().for_each(|w| *w *= scale);
        }
        widths
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_row(
        &self,
        content: &mut Content,
        font: &[u8],
        y: f32,
        widths: &[f32],
        cells: &[String],
        numeric: &[usize],
        align_numeric: bool,
    ) {
        let mut x = self.margin;
        for (i, w) in widths.iter().enumerate() {
            let text = cells.get(i).map(String::as_str).unwrap_or("");
            let tx = if align_numeric && numeric.contains(&i) {
                x + w - 4.0 - self.text_width(text, self.font_size)
            } else {
                x + 4.0
            };
            Self::draw_text(content, font, tx, y + 5.0, self.font_size, text);

            content.save_state();
            content.set_stroke_rgb(0.7, 0.7, 0.7);
            content.rect(x, y, *w, self.row_h);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    fn draw_frame(&self, content: &mut Content, doc: &TableDoc<'_>, page: usize) -> f32 {
        let mut y = self.page_h - self.margin - self.title_size;
        Self::draw_text(content, b"F2", self.margin, y, self.title_size, doc.title);

        if let Some(sub) = doc.subtitle {
            y -= self.title_size;
            Self::draw_text(content, b"F1", self.margin, y, self.font_size + 1.0, sub);
        }

        let foot_y = self.margin - 20.0;
        Self::draw_text(content, b"F1", self.margin, foot_y, self.font_size - 1.0, doc.footer);
        let label = format!("Page {}", page);
        let lx = self.page_w - self.margin - self.text_width(&label, self.font_size);
        Self::draw_text(content, b"F1", lx, foot_y, self.font_size, &label);

        y - 2.0 * self.row_h
    }

    /// Multi-page table; the header row repeats on every page.
    pub fn write_table(&mut self, doc: &TableDoc<'_>) {
        let widths = self.column_widths(doc);
        let table_w: f32 = widths.iter().sum();
        let header_row: Vec<String> = doc.headers.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = doc.rows;
        let mut page_no = 1;

        loop {
            let page_id = self.fresh_ref();
            let content_id = self.fresh_ref();
            self.page_refs.push(page_id);

            {
                let (pages_id, font_id, bold_id) = (self.pages_id, self.font_id, self.bold_id);
                let mut page = self.pdf.page(page_id);
                page.parent(pages_id)
                    .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                    .contents(content_id);
                let mut resources = page.resources();
                let mut fonts = resources.fonts();
                fonts.pair(Name(b"F1"), font_id);
                fonts.pair(Name(b"F2"), bold_id);
            }

            let mut content = Content::new();
            let mut y = self.draw_frame(&mut content, doc, page_no);

            Self::fill_band(&mut content, self.margin, y, table_w, self.row_h, 0.85);
            self.draw_row(&mut content, b"F2", y, &widths, &header_row, doc.numeric, false);
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y < self.margin {
                    break;
                }
                if i % 2 == 1 {
                    Self::fill_band(&mut content, self.margin, y, table_w, self.row_h, 0.96);
                }
                self.draw_row(&mut content, b"F1", y, &widths, row, doc.numeric, true);
                y -= self.row_h;
                consumed += 1;
            }

            self.pdf.stream(content_id, &content.finish());
            remaining = &remaining[consumed..];
            page_no += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .count(self.page_refs.len() as i32)
            .kids(self.page_refs.iter().copied());

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Type1 base fonts use a single-byte encoding; map what fits and replace the rest.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '→' => b'>',
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect()
}
