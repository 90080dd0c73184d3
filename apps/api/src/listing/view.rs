//! View Engine — stable filter, page window, and the per-board UI state.

use serde::Serialize;

use crate::listing::predicate::{self, Facets, Predicate, ALL};
use crate::listing::selection::Selection;
use crate::models::Record;

/// One page of a filtered collection.
#[derive(Debug, Clone, Serialize)]
pub struct ViewPage<R> {
    pub visible: Vec<R>,
    pub total: usize,
    pub total_pages: usize,
    /// The page actually shown, after clamping.
    pub page: usize,
    pub page_size: usize,
}

impl<R: Record> ViewPage<R> {
    pub fn visible_ids(&self) -> Vec<String> {
        self.visible.iter().map(|r| r.id().to_string()).collect()
    }
}

pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Filters `records` (keeping their relative order) and slices out `page`.
/// `page` is clamped into `1..=total_pages` so the slice is never out of range.
pub fn apply<R: Record>(
    records: &[R],
    predicate: &Predicate,
    page: usize,
    page_size: usize,
) -> ViewPage<R> {
    let page_size = page_size.max(1);
    let filtered: Vec<&R> = records.iter().filter(|r| predicate.matches(*r)).collect();
    let total = filtered.len();
    let total_pages = total_pages(total, page_size);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);
    let visible = filtered[start.min(end)..end]
        .iter()
        .map(|r| (*r).clone())
        .collect();

    ViewPage {
        visible,
        total,
        total_pages,
        page,
        page_size,
    }
}

/// Filters without paginating.
pub fn filter<R: Record>(records: &[R], predicate: &Predicate) -> Vec<R> {
    records
        .iter()
        .filter(|r| predicate.matches(*r))
        .cloned()
        .collect()
}

/// UI-state companion of a board: query, facets, page window, selection and
/// the single open overlay (row menu, filter dropdown, dialog).
#[derive(Debug, Clone, Serialize)]
pub struct ListState {
    query: String,
    facets: Facets,
    page: usize,
    page_size: usize,
    selection: Selection,
    active_overlay: Option<String>,
    #[serde(skip)]
    searchable: &'static [&'static str],
}

impl ListState {
    pub fn new(page_size: usize, searchable: &'static [&'static str]) -> Self {
        Self {
            query: String::new(),
            facets: Facets::new(),
            page: 1,
            page_size: page_size.max(1),
            selection: Selection::new(),
            active_overlay: None,
            searchable,
        }
    }

    pub fn for_record<R: Record>(page_size: usize) -> Self {
        Self::new(page_size, R::SEARCHABLE)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    #[cfg(test)]
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn active_overlay(&self) -> Option<&str> {
        self.active_overlay.as_deref()
    }

    /// Any filter change lands the view back on page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Sets one facet; `"all"` removes the constraint. Resets the page.
    pub fn set_facet(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        if value == ALL {
            self.facets.remove(&key);
        } else {
            self.facets.insert(key, value);
        }
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.facets.clear();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Requests a page; the value is clamped against the current total pages.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to(self.page.saturating_add(1), total_pages);
    }

    pub fn prev_page(&mut self, total_pages: usize) {
        self.go_to(self.page.saturating_sub(1), total_pages);
    }

    pub fn predicate<R: Record>(&self) -> Predicate {
        predicate::build::<R>(&self.query, &self.facets, self.searchable)
    }

    /// Current page, re-clamping the stored page if the collection shrank.
    pub fn view<R: Record>(&mut self, records: &[R]) -> ViewPage<R> {
        let page = apply(records, &self.predicate::<R>(), self.page, self.page_size);
        self.page = page.page;
        page
    }

    /// Opens `id`, or closes it if it is the overlay already open.
    pub fn toggle_overlay(&mut self, id: &str) {
        if self.active_overlay.as_deref() == Some(id) {
            self.active_overlay = None;
        } else {
            self.active_overlay = Some(id.to_string());
        }
    }

    /// An interaction outside the open overlay closes it.
    pub fn dismiss_outside(&mut self, target: Option<&str>) {
        if self.active_overlay.as_deref() != target {
            self.active_overlay = None;
        }
    }
}
