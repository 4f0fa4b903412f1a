mod decoration;
mod images;
mod layout;
mod stream;
mod table;

use pdf_writer::{Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::assets::{ReportAssets, fit_in_box};
use crate::config::{ReportConfig, TitleBlock, mm};
use crate::error::Error;
use crate::fonts::FontSet;
use crate::model::{Alignment, AssetId, LINK_BLUE, PersonRecord};
use crate::pagination::PageLayoutPlan;
use crate::table::build_table;

pub use decoration::{NoDecoration, PageCanvas, PageDecorator, ReportDecorator, TextStyle};

use images::EmbeddedImages;
use layout::{LinkAnnotation, draw_image, draw_text};
use stream::PageStream;
use table::render_table;

/// A finished document, still in memory.
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub plan: PageLayoutPlan,
    pub page_count: usize,
}

/// Title, logo and link at the top of page 1. Returns the y where the table starts.
fn draw_title_block<D: PageDecorator>(stream: &mut PageStream<'_, D>, block: &TitleBlock) -> f32 {
    let geometry = stream.geometry();
    let fonts = stream.fonts();
    let images = stream.images();
    let top = geometry.content_top();

    let title_font = &fonts.regular;
    draw_text(
        stream.content(),
        title_font,
        block.font_size,
        &block.title,
        Alignment::Left,
        geometry.margin_left,
        geometry.content_width() * 0.75,
        top - block.font_size * title_font.ascender_ratio,
        None,
    );

    if let Some(logo) = images.get(AssetId::Logo) {
        let (w, h) = fit_in_box(
            logo.aspect_ratio,
            block.logo_height * logo.aspect_ratio,
            block.logo_height,
        );
        draw_image(
            stream.content(),
            &logo.pdf_name,
            geometry.content_right() - w,
            top - block.logo_bottom_offset,
            w,
            h,
        );
    } else {
        log::debug!("Title block drawn without logo");
    }

    if let Some(link) = &block.link {
        let baseline_y = top - mm(18.0) - link.font_size;
        let (x, w) = draw_text(
            stream.content(),
            &fonts.regular,
            link.font_size,
            &link.text,
            Alignment::Right,
            geometry.margin_left,
            geometry.content_width(),
            baseline_y,
            Some(LINK_BLUE),
        );
        stream.add_link(LinkAnnotation {
            rect: Rect::new(
                x,
                baseline_y - link.font_size * 0.2,
                x + w,
                baseline_y + link.font_size * 0.8,
            ),
            url: link.url.clone(),
        });
    }

    top - block.height()
}

/// Render `records` as a paginated PDF.
///
/// The page plan is computed first and handed to `make_decorator`, so the
/// decorator knows the total page count before page 1 is drawn. Returns
/// `Ok(None)` for an empty record set: no document is produced.
pub fn render<D, F>(
    records: &[PersonRecord],
    config: &ReportConfig,
    assets: &ReportAssets,
    make_decorator: F,
) -> Result<Option<RenderedReport>, Error>
where
    D: PageDecorator,
    F: FnOnce(&PageLayoutPlan) -> D,
{
    if records.is_empty() {
        log::info!("No records to report, nothing rendered");
        return Ok(None);
    }

    let t0 = std::time::Instant::now();

    // Phase 1: page plan, fixed before anything is streamed
    let plan = config.layout_plan(records.len())?;
    log::info!(
        "Page plan: rows={} first_capacity={} later_capacity={} pages={}",
        plan.total_rows,
        plan.first_page_capacity,
        plan.later_page_capacity,
        plan.total_pages
    );
    let mut decorator = make_decorator(&plan);

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    // Phase 2: shared resources
    let fonts = FontSet::register(&mut pdf, &mut alloc);
    let images = EmbeddedImages::embed(&mut pdf, &mut alloc, assets);
    let table = build_table(records, &config.table, &config.styler, assets);

    let t_resources = t0.elapsed();

    // Phase 3: stream pages
    let mut stream = PageStream::begin(&mut decorator, &fonts, &images, &config.geometry);
    let mut slot_top = draw_title_block(&mut stream, &config.title_block);
    let rows_per_page = render_table(&table, &mut stream, &mut slot_top);
    let pages = stream.finish();
    log::debug!("Rows per page (header included): {rows_per_page:?}");

    if pages.len() != plan.total_pages {
        log::error!(
            "Rendered {} pages but the decorator was told {}; capacities do not match the layout",
            pages.len(),
            plan.total_pages
        );
        return Err(Error::PageCountMismatch {
            planned: plan.total_pages,
            rendered: pages.len(),
        });
    }

    let t_layout = t0.elapsed();

    // Phase 4: page objects now that the page count is known
    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let page_annot_refs: Vec<Vec<Ref>> = pages
        .iter()
        .map(|page| {
            page.links
                .iter()
                .map(|link| {
                    let annot_ref = alloc();
                    let mut annot = pdf.annotation(annot_ref);
                    annot
                        .subtype(pdf_writer::types::AnnotationType::Link)
                        .rect(link.rect)
                        .border(0.0, 0.0, 0.0, None);
                    annot
                        .action()
                        .action_type(pdf_writer::types::ActionType::Uri)
                        .uri(Str(link.url.as_bytes()));
                    annot_ref
                })
                .collect()
        })
        .collect();

    for (i, page) in pages.into_iter().enumerate() {
        let raw = page.content.finish();
        if config.compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
        } else {
            pdf.stream(content_ids[i], raw.as_slice());
        }
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);
    pdf.document_info(info_id)
        .title(TextStr(&config.title_block.title))
        .producer(TextStr(concat!("relatorio-pessoas ", env!("CARGO_PKG_VERSION"))));

    let geometry = &config.geometry;
    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, geometry.width, geometry.height))
            .parent(pages_id)
            .contents(content_ids[i]);
        if !page_annot_refs[i].is_empty() {
            page.annotations(page_annot_refs[i].iter().copied());
        }
        {
            let mut resources = page.resources();
            {
                let mut font_dict = resources.fonts();
                for entry in fonts.entries() {
                    font_dict.pair(Name(entry.pdf_name.as_bytes()), entry.font_ref);
                }
            }
            if !images.is_empty() {
                let mut xobjects = resources.x_objects();
                for img in images.iter() {
                    xobjects.pair(Name(img.pdf_name.as_bytes()), img.xobj_ref);
                }
            }
        }
    }

    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases: resources={:.1}ms, layout={:.1}ms, assembly={:.1}ms ({} pages)",
        t_resources.as_secs_f64() * 1000.0,
        (t_layout - t_resources).as_secs_f64() * 1000.0,
        (t_assembly - t_layout).as_secs_f64() * 1000.0,
        n,
    );

    Ok(Some(RenderedReport {
        bytes: pdf.finish(),
        plan,
        page_count: n,
    }))
}
