use pdf_writer::Content;

use crate::assets::fit_in_box;
use crate::fonts::FontSet;
use crate::model::{CellContent, Table, TableCell};
use crate::pagination::FIT_EPSILON;
use crate::table::normalize_widths;

use super::decoration::PageDecorator;
use super::images::EmbeddedImages;
use super::layout::{aligned_x, centered_baseline, draw_image, draw_text, fill_rect, stroke_line};
use super::stream::PageStream;

/// Horizontal padding inside each cell.
const CELL_PADDING_X: f32 = 2.0;

fn render_cell(
    content: &mut Content,
    fonts: &FontSet,
    images: &EmbeddedImages,
    cell: &TableCell,
    cell_x: f32,
    row_bottom: f32,
    col_w: f32,
    row_h: f32,
) {
    let style = &cell.style;
    fill_rect(content, style.background, cell_x, row_bottom, col_w, row_h);

    match &cell.content {
        CellContent::Text(text) => {
            let font = fonts.get(style.bold, style.italic);
            let baseline_y = centered_baseline(
                font,
                style.font_size,
                row_bottom + style.padding_bottom,
                row_h - style.padding_bottom,
            );
            draw_text(
                content,
                font,
                style.font_size,
                text,
                style.alignment,
                cell_x + CELL_PADDING_X,
                (col_w - 2.0 * CELL_PADDING_X).max(0.0),
                baseline_y,
                None,
            );
        }
        CellContent::Image {
            asset,
            max_width,
            max_height,
        } => {
            // Loaded assets are checked when the table is built; this only
            // misses if the table came from a different asset set.
            if let Some(img) = images.get(*asset) {
                let (w, h) = fit_in_box(img.aspect_ratio, *max_width, *max_height);
                let x = aligned_x(style.alignment, cell_x, col_w, w);
                let y = row_bottom + (row_h - h) / 2.0;
                draw_image(content, &img.pdf_name, x, y, w, h);
            }
        }
        CellContent::Empty => {}
    }

    if style.border_bottom > 0.0 {
        stroke_line(
            content,
            style.border_bottom,
            0.0,
            cell_x,
            row_bottom,
            cell_x + col_w,
            row_bottom,
        );
    }
}

/// Flow the table's rows down the pages, starting at `slot_top`. A row that
/// would cross the bottom margin moves to the next page, unless the page is
/// still empty. Returns the number of rows placed on each page touched.
pub(super) fn render_table<D: PageDecorator>(
    table: &Table,
    stream: &mut PageStream<'_, D>,
    slot_top: &mut f32,
) -> Vec<usize> {
    let geometry = stream.geometry();
    let fonts = stream.fonts();
    let images = stream.images();
    let col_widths = normalize_widths(&table.col_widths, geometry.content_width());
    let page_top = geometry.content_top();

    let mut rows_per_page = vec![0usize];

    for (ri, row) in table.rows.iter().enumerate() {
        let row_h = row.height;
        let at_page_top = (*slot_top - page_top).abs() < 1.0;

        if !at_page_top && *slot_top - row_h < geometry.margin_bottom - FIT_EPSILON {
            stream.break_page();
            rows_per_page.push(0);
            *slot_top = page_top;
        }
        log::debug!(
            "TABLE row={} row_h={:.2} cells={} slot_top={:.2}",
            ri,
            row_h,
            row.cells.len(),
            *slot_top
        );

        let row_top = *slot_top;
        let row_bottom = row_top - row_h;

        let mut cell_x = geometry.margin_left;
        for (cell, &col_w) in row.cells.iter().zip(col_widths.iter()) {
            render_cell(
                stream.content(),
                fonts,
                images,
                cell,
                cell_x,
                row_bottom,
                col_w,
                row_h,
            );
            cell_x += col_w;
        }

        if let Some(count) = rows_per_page.last_mut() {
            *count += 1;
        }
        *slot_top = row_bottom;
    }

    rows_per_page
}
