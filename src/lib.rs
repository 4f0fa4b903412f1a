mod assets;
mod config;
mod error;
mod fonts;
mod format;
mod model;
mod pagination;
mod pdf;
mod records;
mod styler;
mod table;

pub use assets::{ImageAsset, ReportAssets};
pub use config::{
    AssetPaths, HeaderLink, PageGeometry, POINTS_PER_MM, ReportConfig, TitleBlock, mm,
    output_file_name,
};
pub use error::Error;
pub use format::{CurrencyFormat, format_id};
pub use model::{
    Alignment, AssetId, BLACK, CellContent, CellRole, CellStyle, ColumnDef, ColumnKind,
    LIGHT_GRAY, LINK_BLUE, PersonRecord, Profession, Rgb, Table, TableCell, TableRow, WHITE,
};
pub use pagination::{PageLayoutPlan, compute_total_pages, derive_capacities};
pub use pdf::{
    NoDecoration, PageCanvas, PageDecorator, RenderedReport, ReportDecorator, TextStyle,
    render as render_report,
};
pub use records::RecordStore;
pub use rust_decimal::Decimal;
pub use styler::CellStyler;
pub use table::{TableSpec, build_table, normalize_widths};

use std::path::PathBuf;
use std::time::Instant;

/// Load the records named by `config`, render them and write the PDF.
///
/// Returns the written path, or `None` when there was nothing to report
/// (missing or empty input); in that case no file is created.
pub fn generate_report(config: &ReportConfig) -> Result<Option<PathBuf>, Error> {
    let t0 = Instant::now();

    let store = RecordStore::load(&config.input)?;
    let records = store.take(config.limit);
    let t_load = t0.elapsed();

    if records.is_empty() {
        log::info!(
            "No records in {}, no report generated",
            config.input.display()
        );
        return Ok(None);
    }

    let assets = ReportAssets::load(&config.assets);
    let now = chrono::Local::now();

    let Some(report) = render_report(records, config, &assets, |plan| {
        ReportDecorator::new(plan.total_pages, &now)
    })?
    else {
        return Ok(None);
    };
    let t_render = t0.elapsed();

    std::fs::create_dir_all(&config.output_dir).map_err(Error::Io)?;
    let output = config.output_path(&now);
    std::fs::write(&output, &report.bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: load={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms ({} records, {} pages, {} bytes)",
        t_load.as_secs_f64() * 1000.0,
        (t_render - t_load).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        records.len(),
        report.page_count,
        report.bytes.len(),
    );

    Ok(Some(output))
}
