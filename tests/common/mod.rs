#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use relatorio_pessoas::{
    AssetPaths, Decimal, PageCanvas, PageDecorator, PersonRecord, Profession, ReportConfig,
};

const PROFESSIONS: [&str; 5] = ["Engenheira", "Professor", "Médica", "Analista", "Designer"];

pub fn person(id: u32) -> PersonRecord {
    PersonRecord {
        id,
        first_name: format!("Nome{id}"),
        last_name: format!("Sobrenome{id}"),
        profession: Profession {
            name: PROFESSIONS[id as usize % PROFESSIONS.len()].to_string(),
        },
        // 1000 + id * 123.45
        salary: Decimal::new(100_000, 2) + Decimal::new(12_345, 2) * Decimal::from(id),
        employed: id % 3 != 0,
    }
}

pub fn people(n: usize) -> Vec<PersonRecord> {
    (1..=n as u32).map(person).collect()
}

/// Output directory: tests/output/<name>/, emptied first.
pub fn output_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(name);
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).expect("create output dir");
    dir
}

/// Config that writes into `dir` and looks for images in `dir/img`.
pub fn config_in(dir: &Path) -> ReportConfig {
    ReportConfig {
        input: dir.join("pessoas.json"),
        output_dir: dir.to_path_buf(),
        assets: AssetPaths::in_dir(dir.join("img")),
        ..ReportConfig::default()
    }
}

/// Write a small solid PNG with a transparent corner.
pub fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    img.put_pixel(0, 0, image::Rgba([0, 0, 0, 0]));
    img.save(path).expect("write png");
}

/// Create the logo and both status icons in `dir`.
pub fn write_all_assets(dir: &Path) {
    write_png(&dir.join("github.png"), 64, 32, [20, 20, 20, 255]);
    write_png(&dir.join("emoji_feliz.png"), 16, 16, [250, 200, 0, 255]);
    write_png(&dir.join("emoji_triste.png"), 16, 16, [0, 120, 250, 255]);
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    Start { page: usize, total: usize },
    End { page: usize, total: usize },
}

/// Records every callback together with the total it was constructed with.
pub struct RecordingDecorator {
    pub total_pages: usize,
    pub events: Rc<RefCell<Vec<PageEvent>>>,
}

impl RecordingDecorator {
    pub fn new(total_pages: usize, events: Rc<RefCell<Vec<PageEvent>>>) -> Self {
        Self {
            total_pages,
            events,
        }
    }
}

impl PageDecorator for RecordingDecorator {
    fn on_page_start(&mut self, _canvas: &mut PageCanvas<'_>, page_number: usize) {
        self.events.borrow_mut().push(PageEvent::Start {
            page: page_number,
            total: self.total_pages,
        });
    }

    fn on_page_end(&mut self, canvas: &mut PageCanvas<'_>, page_number: usize) {
        let g = canvas.geometry().clone();
        canvas.line(g.margin_left, 20.0, g.content_right(), 20.0, 0.5, 0.0);
        self.events.borrow_mut().push(PageEvent::End {
            page: page_number,
            total: self.total_pages,
        });
    }
}

pub fn starts(events: &[PageEvent]) -> Vec<(usize, usize)> {
    events
        .iter()
        .filter_map(|e| match e {
            PageEvent::Start { page, total } => Some((*page, *total)),
            PageEvent::End { .. } => None,
        })
        .collect()
}

pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
