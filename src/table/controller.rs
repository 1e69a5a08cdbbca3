//! Table controller - derives the visible page from the store's records
//!
//! Holds only view state (sort, pagination, filter). Every query runs the
//! full filter -> sort -> paginate pipeline over the records it is given, so
//! nothing can go stale when the store changes underneath it.

use crate::error::TableError;
use crate::models::UserRecord;
use crate::table::column::{Column, TableRow};
use crate::table::filter::UserFilter;
use crate::table::pagination::PaginationState;
use crate::table::sort::{self, SortDirection, SortState};

#[derive(Clone, Debug, Default)]
pub struct UserTableController {
    sort: Option<SortState>,
    pagination: PaginationState,
    filter: UserFilter,
}

impl UserTableController {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Pipeline
    // ========================

    /// Filtered and sorted rows, before pagination
    pub fn rows<'a>(&self, records: &'a [UserRecord]) -> Vec<&'a UserRecord> {
        let mut rows: Vec<&UserRecord> = records
            .iter()
            .filter(|user| self.filter.matches(user))
            .collect();

        // sort_by is stable: ties keep their filtered order
        if let Some(SortState { column, direction }) = self.sort {
            rows.sort_by(|a, b| match direction {
                SortDirection::Ascending => column.compare(a, b),
                SortDirection::Descending => column.compare(b, a),
            });
        }
        rows
    }

    /// Records on the current page
    pub fn page_records<'a>(&self, records: &'a [UserRecord]) -> Vec<&'a UserRecord> {
        let mut rows = self.rows(records);
        let range = self.pagination.range(rows.len());
        rows.truncate(range.end);
        rows.drain(..range.start);
        rows
    }

    /// Current page as rendering rows
    pub fn page_rows(&self, records: &[UserRecord]) -> Vec<TableRow> {
        self.page_records(records)
            .into_iter()
            .map(TableRow::from_user)
            .collect()
    }

    pub fn filtered_len(&self, records: &[UserRecord]) -> usize {
        records.iter().filter(|user| self.filter.matches(user)).count()
    }

    pub fn page_count(&self, records: &[UserRecord]) -> usize {
        self.pagination.page_count(self.filtered_len(records))
    }

    /// Current page index, clamped to the rows that exist now
    pub fn page_index(&self, records: &[UserRecord]) -> usize {
        self.pagination.page_index(self.filtered_len(records))
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn can_go_previous(&self, records: &[UserRecord]) -> bool {
        self.page_index(records) > 0
    }

    pub fn can_go_next(&self, records: &[UserRecord]) -> bool {
        self.page_index(records) + 1 < self.page_count(records)
    }

    // ========================
    // Pagination
    // ========================

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        self.pagination.set_page_size(page_size)?;
        tracing::debug!(page_size, "Page size changed");
        Ok(())
    }

    pub fn set_page_index(&mut self, page_index: usize, records: &[UserRecord]) {
        self.pagination
            .set_page_index(page_index, self.filtered_len(records));
    }

    pub fn next_page(&mut self, records: &[UserRecord]) {
        if self.can_go_next(records) {
            let next = self.page_index(records) + 1;
            self.set_page_index(next, records);
        }
    }

    pub fn previous_page(&mut self, records: &[UserRecord]) {
        if self.can_go_previous(records) {
            let previous = self.page_index(records) - 1;
            self.set_page_index(previous, records);
        }
    }

    // ========================
    // Sorting
    // ========================

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn sort_direction(&self, column: Column) -> Option<SortDirection> {
        sort::direction_for(self.sort, column)
    }

    /// Advance `column` through Unsorted -> Ascending -> Descending
    pub fn toggle_sort(&mut self, column: Column) {
        if !column.is_sortable() {
            return;
        }
        self.sort = sort::toggle(self.sort, column);
        self.pagination.reset();
        tracing::debug!(column = column.id(), sort = ?self.sort, "Sort toggled");
    }

    /// Sort by `column` in `direction`; `None` clears the sort if it is on `column`
    pub fn set_sort(&mut self, column: Column, direction: Option<SortDirection>) {
        if !column.is_sortable() {
            return;
        }
        match direction {
            Some(direction) => self.sort = Some(SortState::new(column, direction)),
            None if self.sort.is_some_and(|s| s.column == column) => self.sort = None,
            None => return,
        }
        self.pagination.reset();
    }

    // ========================
    // Filtering
    // ========================

    pub fn filter(&self) -> &UserFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: UserFilter) {
        self.filter = filter;
        self.pagination.reset();
        tracing::debug!(filter = ?self.filter, "Filter applied");
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(UserFilter::default());
    }
}
