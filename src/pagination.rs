use crate::config::PageGeometry;
use crate::error::Error;

/// Tolerance for "row fits above the bottom margin". The renderer breaks pages
/// with the same tolerance, so derived capacities and actual breaks agree.
pub(crate) const FIT_EPSILON: f32 = 0.01;

/// Total pages for `row_count` data rows when the first page holds
/// `first_capacity` rows and every later page `later_capacity`.
///
/// An empty report still has one page. Capacities must be positive; a zero
/// capacity is treated as one so the function never divides by zero, but
/// [`PageLayoutPlan::new`] rejects it up front.
pub fn compute_total_pages(row_count: usize, first_capacity: usize, later_capacity: usize) -> usize {
    debug_assert!(first_capacity > 0 && later_capacity > 0);
    let first = first_capacity.max(1);
    let later = later_capacity.max(1);
    if row_count <= first {
        return 1;
    }
    1 + (row_count - first).div_ceil(later)
}

/// How many rows of `row_height` fit into `available` points.
pub(crate) fn rows_fitting(available: f32, row_height: f32) -> usize {
    if available <= 0.0 || row_height <= 0.0 {
        return 0;
    }
    ((available + FIT_EPSILON) / row_height).floor() as usize
}

/// Data-row capacities (first page, later pages) from page geometry.
///
/// The first page loses `title_block_height` to the title block and one row
/// slot to the table header; later pages carry neither.
pub fn derive_capacities(
    geometry: &PageGeometry,
    title_block_height: f32,
    row_height: f32,
) -> Result<(usize, usize), Error> {
    if row_height <= 0.0 {
        return Err(Error::Layout(format!("row height must be positive, got {row_height}")));
    }
    let content_h = geometry.content_height();
    let later = rows_fitting(content_h, row_height);
    let first_slots = rows_fitting(content_h - title_block_height, row_height);
    if first_slots < 2 {
        return Err(Error::Layout(format!(
            "title block of {title_block_height:.1}pt leaves no room for a data row \
             (content height {content_h:.1}pt, row height {row_height:.1}pt)"
        )));
    }
    if later == 0 {
        return Err(Error::Layout(format!(
            "row height {row_height:.1}pt exceeds content height {content_h:.1}pt"
        )));
    }
    Ok((first_slots - 1, later))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLayoutPlan {
    pub first_page_capacity: usize,
    pub later_page_capacity: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

impl PageLayoutPlan {
    pub fn new(total_rows: usize, first_capacity: usize, later_capacity: usize) -> Result<Self, Error> {
        if first_capacity == 0 || later_capacity == 0 {
            return Err(Error::Layout(format!(
                "page capacities must be positive (first={first_capacity}, later={later_capacity})"
            )));
        }
        Ok(Self {
            first_page_capacity: first_capacity,
            later_page_capacity: later_capacity,
            total_rows,
            total_pages: compute_total_pages(total_rows, first_capacity, later_capacity),
        })
    }

    /// Data rows expected on the 1-based page `page`.
    pub fn rows_on_page(&self, page: usize) -> usize {
        if page == 0 || page > self.total_pages {
            return 0;
        }
        if page == 1 {
            return self.total_rows.min(self.first_page_capacity);
        }
        let before = self.first_page_capacity + (page - 2) * self.later_page_capacity;
        self.total_rows
            .saturating_sub(before)
            .min(self.later_page_capacity)
    }
}
