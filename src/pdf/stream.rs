use pdf_writer::Content;

use crate::config::PageGeometry;
use crate::fonts::FontSet;

use super::decoration::{PageCanvas, PageDecorator};
use super::images::EmbeddedImages;
use super::layout::LinkAnnotation;

pub(super) struct PageOutput {
    pub(super) content: Content,
    pub(super) links: Vec<LinkAnnotation>,
}

impl PageOutput {
    fn new() -> Self {
        Self {
            content: Content::new(),
            links: Vec::new(),
        }
    }
}

/// Pages in the order they are filled. The decorator sees every page start
/// before its body and every page end after it.
pub(super) struct PageStream<'a, D: PageDecorator> {
    decorator: &'a mut D,
    fonts: &'a FontSet,
    images: &'a EmbeddedImages,
    geometry: &'a PageGeometry,
    finished: Vec<PageOutput>,
    current: PageOutput,
    page_number: usize,
}

impl<'a, D: PageDecorator> PageStream<'a, D> {
    pub(super) fn begin(
        decorator: &'a mut D,
        fonts: &'a FontSet,
        images: &'a EmbeddedImages,
        geometry: &'a PageGeometry,
    ) -> Self {
        let mut stream = Self {
            decorator,
            fonts,
            images,
            geometry,
            finished: Vec::new(),
            current: PageOutput::new(),
            page_number: 1,
        };
        stream.decorate_start();
        stream
    }

    fn decorate_start(&mut self) {
        let mut canvas =
            PageCanvas::new(&mut self.current.content, self.fonts, self.images, self.geometry);
        self.decorator.on_page_start(&mut canvas, self.page_number);
    }

    fn decorate_end(&mut self) {
        let mut canvas =
            PageCanvas::new(&mut self.current.content, self.fonts, self.images, self.geometry);
        self.decorator.on_page_end(&mut canvas, self.page_number);
    }

    pub(super) fn break_page(&mut self) {
        self.decorate_end();
        let done = std::mem::replace(&mut self.current, PageOutput::new());
        self.finished.push(done);
        self.page_number += 1;
        log::debug!("PAGE break → page {}", self.page_number);
        self.decorate_start();
    }

    pub(super) fn content(&mut self) -> &mut Content {
        &mut self.current.content
    }

    pub(super) fn add_link(&mut self, link: LinkAnnotation) {
        self.current.links.push(link);
    }

    pub(super) fn fonts(&self) -> &'a FontSet {
        self.fonts
    }

    pub(super) fn images(&self) -> &'a EmbeddedImages {
        self.images
    }

    pub(super) fn geometry(&self) -> &'a PageGeometry {
        self.geometry
    }

    pub(super) fn finish(mut self) -> Vec<PageOutput> {
        self.decorate_end();
        let mut pages = self.finished;
        pages.push(self.current);
        pages
    }
}
