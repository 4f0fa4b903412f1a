use std::borrow::Cow;

use pdf_writer::{Content, Name, Rect, Str};

use crate::fonts::{FontEntry, to_winansi_bytes};
use crate::model::{Alignment, Rgb};

const ELLIPSIS: &str = "...";

pub(super) struct LinkAnnotation {
    pub(super) rect: Rect,
    pub(super) url: String,
}

fn rgb_f32([r, g, b]: Rgb) -> (f32, f32, f32) {
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`.
pub(super) fn fit_text<'a>(font: &FontEntry, text: &'a str, font_size: f32, max_width: f32) -> Cow<'a, str> {
    if font.text_width(text, font_size) <= max_width {
        return Cow::Borrowed(text);
    }
    let ellipsis_w = font.text_width(ELLIPSIS, font_size);
    let mut width = 0.0f32;
    let mut end = 0usize;
    for (idx, ch) in text.char_indices() {
        let w = font.char_width_1000(ch) * font_size / 1000.0;
        if width + w + ellipsis_w > max_width {
            break;
        }
        width += w;
        end = idx + ch.len_utf8();
    }
    Cow::Owned(format!("{}{ELLIPSIS}", text[..end].trim_end()))
}

/// X where a line of `line_width` starts inside the box `[x, x + box_width]`.
pub(super) fn aligned_x(alignment: Alignment, x: f32, box_width: f32, line_width: f32) -> f32 {
    match alignment {
        Alignment::Left => x,
        Alignment::Center => x + (box_width - line_width) / 2.0,
        Alignment::Right => x + box_width - line_width,
    }
}

/// Draw one line of text aligned in a box, truncated to fit it.
/// Returns the drawn (x, width).
pub(super) fn draw_text(
    content: &mut Content,
    font: &FontEntry,
    font_size: f32,
    text: &str,
    alignment: Alignment,
    x: f32,
    box_width: f32,
    baseline_y: f32,
    color: Option<Rgb>,
) -> (f32, f32) {
    let text = fit_text(font, text, font_size, box_width);
    let line_w = font.text_width(&text, font_size);
    let start_x = aligned_x(alignment, x, box_width, line_w);

    content.save_state();
    if let Some(color) = color {
        let (r, g, b) = rgb_f32(color);
        content.set_fill_rgb(r, g, b);
    } else {
        content.set_fill_gray(0.0);
    }
    content.begin_text();
    content.set_font(Name(font.pdf_name.as_bytes()), font_size);
    content.next_line(start_x, baseline_y);
    content.show(Str(&to_winansi_bytes(&text)));
    content.end_text();
    content.restore_state();

    (start_x, line_w)
}

pub(super) fn fill_rect(content: &mut Content, color: Rgb, x: f32, y: f32, w: f32, h: f32) {
    let (r, g, b) = rgb_f32(color);
    content.save_state();
    content.set_fill_rgb(r, g, b);
    content.rect(x, y, w, h);
    content.fill_nonzero();
    content.restore_state();
}

pub(super) fn stroke_rect(content: &mut Content, width: f32, gray: f32, x: f32, y: f32, w: f32, h: f32) {
    content.save_state();
    content.set_line_width(width);
    content.set_stroke_gray(gray);
    content.rect(x, y, w, h);
    content.stroke();
    content.restore_state();
}

pub(super) fn stroke_line(content: &mut Content, width: f32, gray: f32, x1: f32, y1: f32, x2: f32, y2: f32) {
    content.save_state();
    content.set_line_width(width);
    content.set_stroke_gray(gray);
    content.move_to(x1, y1);
    content.line_to(x2, y2);
    content.stroke();
    content.restore_state();
}

pub(super) fn draw_image(content: &mut Content, pdf_name: &str, x: f32, y: f32, w: f32, h: f32) {
    content.save_state();
    content.transform([w, 0.0, 0.0, h, x, y]);
    content.x_object(Name(pdf_name.as_bytes()));
    content.restore_state();
}

/// Baseline that centers a line's cap height in `[bottom, bottom + height]`.
pub(super) fn centered_baseline(font: &FontEntry, font_size: f32, bottom: f32, height: f32) -> f32 {
    bottom + (height - font_size * font.ascender_ratio) / 2.0
}
