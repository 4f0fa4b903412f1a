mod common;

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use common::{PageEvent, RecordingDecorator};
use relatorio_pessoas::{
    Alignment, AssetPaths, Decimal, Error, NoDecoration, PageCanvas, PageDecorator, PersonRecord,
    RecordStore, ReportAssets, ReportConfig, ReportDecorator, TextStyle, generate_report,
    render_report,
};

/// Render `n` records with a recording decorator; returns (pages, events).
fn render_recorded(n: usize, assets: &ReportAssets) -> (usize, Vec<PageEvent>) {
    let _ = env_logger::try_init();
    let records = common::people(n);
    let events = Rc::new(RefCell::new(Vec::new()));
    let report = render_report(&records, &ReportConfig::default(), assets, |plan| {
        RecordingDecorator::new(plan.total_pages, events.clone())
    })
    .expect("render")
    .expect("non-empty report");
    assert_eq!(report.page_count, report.plan.total_pages);
    assert!(report.bytes.starts_with(b"%PDF-"));
    let events = events.borrow().clone();
    (report.page_count, events)
}

#[test]
fn zero_records_produce_nothing() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let result = render_report(&[], &ReportConfig::default(), &ReportAssets::none(), |plan| {
        RecordingDecorator::new(plan.total_pages, events.clone())
    })
    .unwrap();
    assert!(result.is_none());
    assert!(events.borrow().is_empty(), "decorator must not be invoked");
}

#[test]
fn one_record_is_one_page() {
    let (pages, events) = render_recorded(1, &ReportAssets::none());
    assert_eq!(pages, 1);
    assert_eq!(
        events,
        vec![
            PageEvent::Start { page: 1, total: 1 },
            PageEvent::End { page: 1, total: 1 },
        ]
    );
}

#[test]
fn twenty_five_records_are_two_pages() {
    let (pages, events) = render_recorded(25, &ReportAssets::none());
    assert_eq!(pages, 2);
    assert_eq!(common::starts(&events), vec![(1, 2), (2, 2)]);
    assert_eq!(
        events,
        vec![
            PageEvent::Start { page: 1, total: 2 },
            PageEvent::End { page: 1, total: 2 },
            PageEvent::Start { page: 2, total: 2 },
            PageEvent::End { page: 2, total: 2 },
        ]
    );
}

#[test]
fn page_boundaries_at_53_and_54() {
    assert_eq!(render_recorded(24, &ReportAssets::none()).0, 1);
    assert_eq!(render_recorded(53, &ReportAssets::none()).0, 2);
    let (pages, events) = render_recorded(54, &ReportAssets::none());
    assert_eq!(pages, 3);
    assert_eq!(common::starts(&events), vec![(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn rendered_pages_always_match_the_plan() {
    let _ = env_logger::try_init();
    let config = ReportConfig::default();
    let assets = ReportAssets::none();
    for n in 1..=150 {
        let records = common::people(n);
        let report = render_report(&records, &config, &assets, |_| NoDecoration)
            .unwrap_or_else(|e| panic!("n={n}: {e}"))
            .unwrap();
        assert_eq!(report.page_count, report.plan.total_pages, "n={n}");
    }
}

#[test]
fn changed_geometry_stays_consistent() {
    let mut config = ReportConfig::default();
    config.styler.row_height = 18.0;
    config.title_block.lines = 3;
    config.title_block.link = None;
    let (first, later) = config.capacities().unwrap();
    assert!(first > 24 && later > 29);

    for n in [first, first + 1, first + later, first + later + 1, 200] {
        let records = common::people(n);
        let report = render_report(&records, &config, &ReportAssets::none(), |_| NoDecoration)
            .unwrap()
            .unwrap();
        assert_eq!(report.page_count, report.plan.total_pages, "n={n}");
    }
}

#[test]
fn missing_icons_do_not_stop_rendering() {
    let dir = common::output_dir("missing_icons");
    // only the employed icon exists
    common::write_png(&dir.join("img/emoji_feliz.png"), 16, 16, [250, 200, 0, 255]);
    let assets = ReportAssets::load(&AssetPaths::in_dir(dir.join("img")));
    assert!(assets.get(relatorio_pessoas::AssetId::EmployedIcon).is_some());
    assert!(assets.get(relatorio_pessoas::AssetId::UnemployedIcon).is_none());
    assert!(assets.get(relatorio_pessoas::AssetId::Logo).is_none());

    let (pages, events) = render_recorded(60, &assets);
    assert_eq!(pages, 3);
    assert_eq!(events.len(), 6);
}

/// Writes an ASCII "page N of M" footer so it can be found in the raw PDF.
struct AsciiFooter {
    total: usize,
}

impl PageDecorator for AsciiFooter {
    fn on_page_end(&mut self, canvas: &mut PageCanvas<'_>, page_number: usize) {
        let g = canvas.geometry().clone();
        canvas.text(
            &format!("page {page_number} of {}", self.total),
            TextStyle::new(9.0).aligned(Alignment::Right),
            g.margin_left,
            g.content_width(),
            g.margin_bottom - 20.0,
        );
    }
}

#[test]
fn footer_shows_page_of_total() {
    let records = common::people(30);
    let config = ReportConfig {
        compress: false,
        ..ReportConfig::default()
    };
    let report = render_report(&records, &config, &ReportAssets::none(), |plan| AsciiFooter {
        total: plan.total_pages,
    })
    .unwrap()
    .unwrap();
    assert_eq!(report.page_count, 2);
    assert!(common::contains_bytes(&report.bytes, b"(page 1 of 2)"));
    assert!(common::contains_bytes(&report.bytes, b"(page 2 of 2)"));
    assert!(!common::contains_bytes(&report.bytes, b"page 3"));
    assert!(common::contains_bytes(&report.bytes, b"(000030)"));
    assert!(!common::contains_bytes(&report.bytes, b"(Gerado"));
    assert!(common::contains_bytes(&report.bytes, b"https://github.com/LeonarDev"));
}

#[test]
fn report_decorator_renders() {
    let records = common::people(30);
    let config = ReportConfig {
        compress: false,
        ..ReportConfig::default()
    };
    let now = chrono::Local::now();
    let report = render_report(&records, &config, &ReportAssets::none(), |plan| {
        ReportDecorator::new(plan.total_pages, &now)
    })
    .unwrap()
    .unwrap();
    assert_eq!(report.page_count, 2);
    assert!(common::contains_bytes(&report.bytes, b"(Gerado em "));
}

/// Measures a few strings on page 1 with the document's fonts.
struct Measure {
    widths: Rc<RefCell<Vec<f32>>>,
}

impl PageDecorator for Measure {
    fn on_page_start(&mut self, canvas: &mut PageCanvas<'_>, page_number: usize) {
        if page_number != 1 {
            return;
        }
        let mut widths = self.widths.borrow_mut();
        for (text, bold) in [("r", false), ("r", true), ("i", false), ("W", false), ("ção", false)] {
            widths.push(canvas.text_width(text, 1000.0, bold));
        }
        widths.push(canvas.text_width("R$ 1.864,15", 12.0, false));
    }
}

#[test]
fn text_is_measured_with_helvetica_metrics() {
    let widths = Rc::new(RefCell::new(Vec::new()));
    render_report(&common::people(1), &ReportConfig::default(), &ReportAssets::none(), |_| {
        Measure {
            widths: widths.clone(),
        }
    })
    .unwrap()
    .unwrap();
    let widths = widths.borrow();
    assert_eq!(&widths[..5], &[333.0, 389.0, 222.0, 944.0, 500.0 + 556.0 + 556.0]);
    // "R$ " 1556, six digits 3336, "." and "," 556
    assert!((widths[5] - 5448.0 * 12.0 / 1000.0).abs() < 1e-3, "{}", widths[5]);
}

#[test]
fn report_decorator_labels() {
    let decorator = ReportDecorator::new(3, &chrono::Local::now());
    assert_eq!(decorator.total_pages(), 3);
    assert_eq!(decorator.page_label(2), "Página 2 de 3");
}

#[test]
fn generate_report_writes_one_timestamped_file() {
    let _ = env_logger::try_init();
    let dir = common::output_dir("generate");
    common::write_all_assets(&dir.join("img"));
    let json = serde_json::to_string(
        &common::people(40)
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "firstName": p.first_name,
                    "lastName": p.last_name,
                    "profession": { "name": p.profession.name },
                    "salary": p.salary,
                    "employed": p.employed,
                })
            })
            .collect::<Vec<_>>(),
    )
    .unwrap();
    fs::write(dir.join("pessoas.json"), json).unwrap();

    let path = generate_report(&common::config_in(&dir))
        .unwrap()
        .expect("a report is written");
    assert!(path.exists());
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("pessoas.") && name.ends_with(".pdf"), "{name}");
    // pessoas.YYYY.MM.DD.HH.MM.SS.pdf
    assert_eq!(name.split('.').count(), 8, "{name}");
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn generate_report_without_input_writes_nothing() {
    let dir = common::output_dir("no_input");
    let result = generate_report(&common::config_in(&dir)).unwrap();
    assert!(result.is_none());
    let pdfs = fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|x| x == "pdf"))
        .count();
    assert_eq!(pdfs, 0);
}

#[test]
fn generate_report_with_empty_array_writes_nothing() {
    let dir = common::output_dir("empty_array");
    fs::write(dir.join("pessoas.json"), "[]").unwrap();
    assert!(generate_report(&common::config_in(&dir)).unwrap().is_none());
}

#[test]
fn limit_caps_the_report() {
    let dir = common::output_dir("limit");
    let store = RecordStore::new(common::people(250));
    assert_eq!(store.take(100).len(), 100);
    assert_eq!(store.take(1000).len(), 250);
    let config = ReportConfig {
        limit: 100,
        ..common::config_in(&dir)
    };
    let report = render_report(store.take(config.limit), &config, &ReportAssets::none(), |_| {
        NoDecoration
    })
    .unwrap()
    .unwrap();
    // 24 + 29 + 29 + 18
    assert_eq!(report.page_count, 4);
}

#[test]
fn legacy_json_keys_are_accepted() {
    let json = r#"[
        {"IdPessoa": 7, "Nome": "Ana", "Sobrenome": "Souza",
         "Profissao": {"Nome": "Engenheira"}, "Salario": 4500.5, "Empregado": true},
        {"id": 8, "firstName": "Bruno", "lastName": "Lima",
         "profession": {"name": "Professor"}, "salary": 3200, "employed": false}
    ]"#;
    let store = RecordStore::from_json(json).unwrap();
    assert_eq!(store.len(), 2);
    let first: &PersonRecord = &store.records()[0];
    assert_eq!(first.id, 7);
    assert_eq!(first.full_name(), "Ana Souza");
    assert_eq!(first.profession.name, "Engenheira");
    assert!(first.employed);
    assert_eq!(store.records()[1].salary, Decimal::from(3200));
}

#[test]
fn malformed_json_is_an_input_error() {
    let _ = env_logger::try_init();
    let dir = common::output_dir("malformed");
    fs::write(dir.join("pessoas.json"), "{ not json").unwrap();
    let err = generate_report(&common::config_in(&dir)).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)), "{err}");
}
