//! Filter, sort and page state over one dataset.

use std::num::NonZeroUsize;

use serde::Serialize;

use seedscope_model::VarietyRecord;

use crate::dataset::Dataset;
use crate::filter::{Criteria, filter_indices};
use crate::page::Pager;
use crate::sort::{SortKey, SortState, sort_indices};

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot<'a> {
    /// Position of the first record of the page within the filtered view.
    pub offset: usize,
    /// Records matching the criteria.
    pub filtered_count: usize,
    /// Records in the dataset.
    pub total_count: usize,
    /// 1-based.
    pub page_index: usize,
    pub total_pages: usize,
    pub records: Vec<&'a VarietyRecord>,
}

impl PageSnapshot<'_> {
    /// No record matches the criteria. Distinct from a failed load.
    pub fn is_empty_result(&self) -> bool {
        self.filtered_count == 0
    }
}

/// The explorer view: a dataset plus the criteria, sort and page applied
/// to it.
///
/// The visible order is recomputed from (dataset, criteria, sort) whenever
/// criteria or sort change, so it never drifts from those inputs.
#[derive(Debug, Clone)]
pub struct Explorer {
    dataset: Dataset,
    criteria: Criteria,
    sort: SortState,
    pager: Pager,
    /// Indices into the dataset: filtered, then sorted.
    view: Vec<usize>,
}

impl Explorer {
    pub fn new(dataset: Dataset) -> Self {
        let view = (0..dataset.len()).collect();
        Self {
            dataset,
            criteria: Criteria::default(),
            sort: SortState::default(),
            pager: Pager::default(),
            view,
        }
    }

    pub fn with_page_size(mut self, size: NonZeroUsize) -> Self {
        self.pager.set_size(size);
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self.recompute();
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    /// Replace the criteria, re-filter and return to the first page.
    pub fn set_criteria(&mut self, criteria: Criteria) {
        self.criteria = criteria;
        self.recompute();
        self.pager.first();
        tracing::debug!(
            matched = self.view.len(),
            total = self.dataset.len(),
            "criteria applied"
        );
    }

    /// Edit the criteria in place; same effects as [`Explorer::set_criteria`].
    pub fn update_criteria(&mut self, edit: impl FnOnce(&mut Criteria)) {
        let mut criteria = self.criteria.clone();
        edit(&mut criteria);
        self.set_criteria(criteria);
    }

    /// Select a sort column, toggling direction on repeated selection.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.recompute();
    }

    pub fn go_to_page(&mut self, index: usize) {
        self.pager.go_to(index, self.view.len());
    }

    pub fn next_page(&mut self) {
        self.pager.next(self.view.len());
    }

    pub fn previous_page(&mut self) {
        self.pager.previous(self.view.len());
    }

    pub fn set_page_size(&mut self, size: NonZeroUsize) {
        self.pager.set_size(size);
    }

    pub fn filtered_count(&self) -> usize {
        self.view.len()
    }

    /// All matching records in the current order.
    pub fn filtered(&self) -> impl Iterator<Item = &VarietyRecord> + '_ {
        self.view
            .iter()
            .filter_map(|&index| self.dataset.get(index))
    }

    pub fn snapshot(&self) -> PageSnapshot<'_> {
        let total = self.view.len();
        let range = self.pager.range(total);
        PageSnapshot {
            offset: range.start,
            records: self.view[range]
                .iter()
                .filter_map(|&index| self.dataset.get(index))
                .collect(),
            filtered_count: total,
            total_count: self.dataset.len(),
            page_index: self.pager.index(),
            total_pages: self.pager.total_pages(total),
        }
    }

    fn recompute(&mut self) {
        let records = self.dataset.records();
        let mut view = filter_indices(records, &self.criteria);
        sort_indices(records, &mut view, self.sort);
        self.view = view;
        self.pager.clamp(self.view.len());
    }
}
