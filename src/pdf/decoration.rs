//! Per-page decoration: the hook a report uses to draw page chrome (frame,
//! footer, "page N of M") around the streamed table.
//!
//! A decorator is built once, from the already computed page plan, before the
//! first page is streamed. The writer then calls [`PageDecorator::on_page_start`]
//! before any body content of a page and [`PageDecorator::on_page_end`] after
//! the last body content, with 1-based page numbers in increasing order.
//! Start-of-page drawing sits beneath the body; end-of-page drawing belongs in
//! the margins so it never covers table rows.

use chrono::{DateTime, Local};
use pdf_writer::Content;

use crate::assets::fit_in_box;
use crate::config::PageGeometry;
use crate::fonts::FontSet;
use crate::model::{Alignment, AssetId, BLACK, Rgb};

use super::images::EmbeddedImages;
use super::layout::{draw_image, draw_text, stroke_line, stroke_rect};

#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    pub font_size: f32,
    pub bold: bool,
    pub alignment: Alignment,
    pub color: Rgb,
}

impl TextStyle {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            bold: false,
            alignment: Alignment::Left,
            color: BLACK,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Drawing surface for one page, handed to a [`PageDecorator`].
pub struct PageCanvas<'a> {
    content: &'a mut Content,
    fonts: &'a FontSet,
    images: &'a EmbeddedImages,
    geometry: &'a PageGeometry,
}

impl<'a> PageCanvas<'a> {
    pub(super) fn new(
        content: &'a mut Content,
        fonts: &'a FontSet,
        images: &'a EmbeddedImages,
        geometry: &'a PageGeometry,
    ) -> Self {
        Self {
            content,
            fonts,
            images,
            geometry,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        self.geometry
    }

    pub fn text_width(&self, text: &str, font_size: f32, bold: bool) -> f32 {
        self.fonts.get(bold, false).text_width(text, font_size)
    }

    /// One line of text aligned inside `[x, x + width]`, truncated to fit.
    pub fn text(&mut self, text: &str, style: TextStyle, x: f32, width: f32, baseline_y: f32) {
        let font = self.fonts.get(style.bold, false);
        draw_text(
            self.content,
            font,
            style.font_size,
            text,
            style.alignment,
            x,
            width,
            baseline_y,
            Some(style.color),
        );
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, gray: f32) {
        stroke_line(self.content, width, gray, x1, y1, x2, y2);
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, gray: f32) {
        stroke_rect(self.content, width, gray, x, y, w, h);
    }

    /// Draw a report image scaled into the box, bottom-left at (x, y).
    /// Returns false, drawing nothing, when the image was not loaded.
    pub fn image(&mut self, asset: AssetId, x: f32, y: f32, max_width: f32, max_height: f32) -> bool {
        let Some(img) = self.images.get(asset) else {
            return false;
        };
        let (w, h) = fit_in_box(img.aspect_ratio, max_width, max_height);
        draw_image(self.content, &img.pdf_name, x, y, w, h);
        true
    }
}

pub trait PageDecorator {
    fn on_page_start(&mut self, _canvas: &mut PageCanvas<'_>, _page_number: usize) {}

    fn on_page_end(&mut self, _canvas: &mut PageCanvas<'_>, _page_number: usize) {}
}

/// Draws nothing.
pub struct NoDecoration;

impl PageDecorator for NoDecoration {}

/// The report's page chrome: a thin frame around the content area and a
/// footer with the generation time and "Página N de M".
pub struct ReportDecorator {
    total_pages: usize,
    generated_at: String,
    pub font_size: f32,
    pub frame: bool,
}

impl ReportDecorator {
    pub fn new(total_pages: usize, generated_at: &DateTime<Local>) -> Self {
        Self {
            total_pages,
            generated_at: generated_at.format("%d/%m/%Y %H:%M").to_string(),
            font_size: 9.0,
            frame: true,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_label(&self, page_number: usize) -> String {
        format!("Página {page_number} de {}", self.total_pages)
    }
}

impl PageDecorator for ReportDecorator {
    fn on_page_start(&mut self, canvas: &mut PageCanvas<'_>, _page_number: usize) {
        if !self.frame {
            return;
        }
        let g = canvas.geometry().clone();
        canvas.rect(
            g.margin_left - 4.0,
            g.margin_bottom - 4.0,
            g.content_width() + 8.0,
            g.content_height() + 8.0,
            0.5,
            0.75,
        );
    }

    fn on_page_end(&mut self, canvas: &mut PageCanvas<'_>, page_number: usize) {
        let g = canvas.geometry().clone();
        let rule_y = g.margin_bottom - 10.0;
        canvas.line(g.margin_left, rule_y, g.content_right(), rule_y, 0.5, 0.5);

        let baseline = rule_y - 12.0;
        let half = g.content_width() / 2.0;
        let style = TextStyle::new(self.font_size);
        canvas.text(
            &format!("Gerado em {}", self.generated_at),
            style,
            g.margin_left,
            half,
            baseline,
        );
        canvas.text(
            &self.page_label(page_number),
            style.aligned(Alignment::Right),
            g.margin_left + half,
            half,
            baseline,
        );
    }
}
