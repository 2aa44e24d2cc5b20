//! # Entity Table Hook
//!
//! Client-side sorting, filtering, pagination and row selection over the
//! rows currently loaded. Row actions are only emitted: the page owning the
//! table performs the mutation and refetches.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use dioxus::prelude::*;
use sejour_core::{EntityId, Identifiable, Price, StatusTone};
use sejour_model::{BookingAction, VerificationAction};

// ============================================================================
// Cells
// ============================================================================

/// Value of one table cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Money(Price),
    Flag(bool),
    Badge { label: String, tone: StatusTone },
    Empty,
}

impl CellValue {
    /// Text shown in the cell
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            CellValue::Number(n) => format!("{:.2}", n),
            CellValue::Money(price) => price.to_string(),
            CellValue::Flag(true) => "Yes".to_string(),
            CellValue::Flag(false) => "No".to_string(),
            CellValue::Badge { label, .. } => label.clone(),
            CellValue::Empty => "-".to_string(),
        }
    }

    fn sort_key(&self) -> Option<SortKey> {
        match self {
            CellValue::Text(text) => Some(SortKey::Text(text.to_lowercase())),
            CellValue::Badge { label, .. } => Some(SortKey::Text(label.to_lowercase())),
            CellValue::Number(n) => Some(SortKey::Number(*n)),
            CellValue::Money(price) => Some(SortKey::Number(price.amount())),
            CellValue::Flag(flag) => Some(SortKey::Number(f64::from(u8::from(*flag)))),
            CellValue::Empty => None,
        }
    }

    /// Empty cells sort last whatever the direction
    fn compare(&self, other: &CellValue, direction: SortDirection) -> Ordering {
        match (self.sort_key(), other.sort_key()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => direction.apply(a.compare(&b)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map(CellValue::Text).unwrap_or(CellValue::Empty)
    }
}

impl From<Price> for CellValue {
    fn from(value: Price) -> Self {
        CellValue::Money(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Flag(value)
    }
}

enum SortKey {
    Text(String),
    Number(f64),
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

// ============================================================================
// Columns
// ============================================================================

/// Column definition over a row type
pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub value: fn(&T) -> CellValue,
}

impl<T> Column<T> {
    /// Sortable column
    pub fn new(key: &'static str, label: &'static str, value: fn(&T) -> CellValue) -> Self {
        Self {
            key,
            label,
            sortable: true,
            value,
        }
    }

    /// Disable sorting on this column
    pub fn fixed(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Header part of the column, without the row type
    pub fn header(&self) -> ColumnHeader {
        ColumnHeader {
            key: self.key,
            label: self.label,
            sortable: self.sortable,
        }
    }
}

/// Rendered column header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnHeader {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

// ============================================================================
// Row Actions
// ============================================================================

/// Action emitted by a row button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Edit,
    Delete,
    /// Switch the availability flag to the given value
    SetAvailable(bool),
    Booking(BookingAction),
    Receipt,
    Verification(VerificationAction),
    ShowQr,
}

impl RowAction {
    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
            RowAction::SetAvailable(true) => "Mark available",
            RowAction::SetAvailable(false) => "Mark unavailable",
            RowAction::Booking(action) => action.label(),
            RowAction::Receipt => "Receipt",
            RowAction::Verification(action) => action.label(),
            RowAction::ShowQr => "QR code",
        }
    }

    /// Whether the action must be confirmed in a dialog first
    pub fn needs_confirmation(&self) -> bool {
        match self {
            RowAction::Delete => true,
            RowAction::Booking(action) => action.is_destructive(),
            RowAction::Verification(action) => action.is_destructive(),
            _ => false,
        }
    }

    /// Button classes
    pub fn class(&self) -> &'static str {
        if self.needs_confirmation() {
            "text-rose-400 hover:text-rose-300"
        } else {
            "text-sky-400 hover:text-sky-300"
        }
    }
}

/// An action button of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowActionSlot {
    pub action: RowAction,
    pub enabled: bool,
}

impl RowActionSlot {
    pub fn enabled(action: RowAction) -> Self {
        Self {
            action,
            enabled: true,
        }
    }

    pub fn when(action: RowAction, enabled: bool) -> Self {
        Self { action, enabled }
    }
}

// ============================================================================
// Table State
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header arrow
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sort, filter, page and selection of one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    sort: Option<(&'static str, SortDirection)>,
    filter: String,
    page: usize,
    page_size: usize,
    client_paging: bool,
    selected: BTreeSet<EntityId>,
}

impl TableState {
    /// Table paginated client-side
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            filter: String::new(),
            page: 0,
            page_size: page_size.max(1),
            client_paging: true,
            selected: BTreeSet::new(),
        }
    }

    /// Table whose rows are one server page already
    pub fn server_paged() -> Self {
        Self {
            client_paging: false,
            ..Self::new(1)
        }
    }

    /// Sort by a column; sorting again by the same column flips the direction
    pub fn sort_by(&mut self, key: &'static str) {
        self.sort = match self.sort {
            Some((current, direction)) if current == key => Some((key, direction.toggle())),
            _ => Some((key, SortDirection::Ascending)),
        };
    }

    pub fn sort(&self) -> Option<(&'static str, SortDirection)> {
        self.sort
    }

    /// Set the free-text filter and go back to the first page
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
        self.page = 0;
    }

    pub fn reset_filter(&mut self) {
        self.set_filter(String::new());
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Current page, zero-based
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Select or deselect one row
    pub fn toggle_selected(&mut self, id: EntityId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Filter, sort and slice `rows` for display
    pub fn view<T: Identifiable>(
        &self,
        rows: &[T],
        columns: &[Column<T>],
        actions: impl Fn(&T) -> Vec<RowActionSlot>,
    ) -> TableView {
        let needle = self.filter.trim().to_lowercase();
        let mut matched: Vec<TableRow> = rows
            .iter()
            .map(|row| TableRow {
                id: row.id(),
                cells: columns.iter().map(|c| (c.value)(row)).collect(),
                actions: actions(row),
                selected: self.is_selected(row.id()),
            })
            .filter(|row| {
                needle.is_empty()
                    || row
                        .cells
                        .iter()
                        .any(|cell| cell.display().to_lowercase().contains(&needle))
            })
            .collect();

        if let Some((key, direction)) = self.sort {
            if let Some(index) = columns.iter().position(|c| c.key == key) {
                matched.sort_by(|a, b| a.cells[index].compare(&b.cells[index], direction));
            }
        }

        let matched_count = matched.len();
        let (page, page_count, visible) = if self.client_paging {
            let page_count = matched_count.div_ceil(self.page_size).max(1);
            let page = self.page.min(page_count - 1);
            let visible = matched
                .into_iter()
                .skip(page * self.page_size)
                .take(self.page_size)
                .collect();
            (page, page_count, visible)
        } else {
            (0, 1, matched)
        };

        TableView {
            headers: columns.iter().map(Column::header).collect(),
            rows: visible,
            page,
            page_count,
            matched: matched_count,
            total: rows.len(),
            filtered: !needle.is_empty(),
        }
    }
}

// ============================================================================
// Table View
// ============================================================================

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: EntityId,
    pub cells: Vec<CellValue>,
    pub actions: Vec<RowActionSlot>,
    pub selected: bool,
}

/// What the table component renders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableView {
    pub headers: Vec<ColumnHeader>,
    pub rows: Vec<TableRow>,
    /// Visible page, zero-based
    pub page: usize,
    pub page_count: usize,
    /// Rows left after filtering
    pub matched: usize,
    /// Rows loaded
    pub total: usize,
    /// Whether a filter is active
    pub filtered: bool,
}

impl TableView {
    /// Whether the "no results" state is shown instead of rows
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }

    /// Caption of the empty state
    pub fn empty_message(&self) -> &'static str {
        if self.total > 0 && self.filtered {
            "No results match the filter"
        } else {
            "No results"
        }
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}

// ============================================================================
// Hook
// ============================================================================

/// Table state signal, paginated client-side with the given page size
pub fn use_table(page_size: usize) -> Signal<TableState> {
    use_signal(move || TableState::new(page_size))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone)]
    struct Row {
        id: u64,
        name: &'static str,
        price: f64,
        city: Option<&'static str>,
    }

    impl Identifiable for Row {
        fn id(&self) -> EntityId {
            EntityId(self.id)
        }
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("name", "Name", |r: &Row| r.name.into()),
            Column::new("price", "Price", |r: &Row| Price::new(r.price).into()),
            Column::new("city", "City", |r: &Row| r.city.map(str::to_string).into()),
        ]
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "Akwa Palace", price: 120.0, city: Some("Douala") },
            Row { id: 2, name: "Hilton", price: 210.5, city: Some("Yaounde") },
            Row { id: 3, name: "Ibis", price: 75.0, city: None },
        ]
    }

    fn no_actions(_: &Row) -> Vec<RowActionSlot> {
        vec![RowActionSlot::enabled(RowAction::Edit)]
    }

    fn names(view: &TableView) -> Vec<String> {
        view.rows.iter().map(|r| r.cells[0].display()).collect()
    }

    #[test]
    fn test_empty_collection_shows_no_results() {
        let state = TableState::new(10);
        let view = state.view(&Vec::<Row>::new(), &columns(), no_actions);

        assert!(view.is_empty());
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_message(), "No results");
        assert_eq!(view.page_count, 1);
        assert_eq!(view.headers.len(), 3);
    }

    #[test]
    fn test_filter_matches_any_cell() {
        let mut state = TableState::new(10);
        state.set_filter("douala");
        let view = state.view(&rows(), &columns(), no_actions);
        assert_eq!(names(&view), vec!["Akwa Palace"]);

        state.set_filter("nowhere");
        let view = state.view(&rows(), &columns(), no_actions);
        assert!(view.is_empty());
        assert_eq!(view.empty_message(), "No results match the filter");

        state.reset_filter();
        assert_eq!(state.view(&rows(), &columns(), no_actions).matched, 3);
    }

    #[test]
    fn test_sort_toggles_direction() {
        let mut state = TableState::new(10);
        state.sort_by("price");
        let view = state.view(&rows(), &columns(), no_actions);
        assert_eq!(names(&view), vec!["Ibis", "Akwa Palace", "Hilton"]);

        state.sort_by("price");
        let view = state.view(&rows(), &columns(), no_actions);
        assert_eq!(names(&view), vec!["Hilton", "Akwa Palace", "Ibis"]);
    }

    #[test]
    fn test_empty_cells_sort_last() {
        let mut state = TableState::new(10);
        state.sort_by("city");
        state.sort_by("city");
        let view = state.view(&rows(), &columns(), no_actions);
        assert_eq!(names(&view), vec!["Hilton", "Akwa Palace", "Ibis"]);
    }

    #[test]
    fn test_client_pagination() {
        let mut state = TableState::new(2);
        let view = state.view(&rows(), &columns(), no_actions);
        assert_eq!(view.page_count, 2);
        assert_eq!(view.rows.len(), 2);
        assert!(view.has_next());

        state.next_page();
        let view = state.view(&rows(), &columns(), no_actions);
        assert_eq!(view.rows.len(), 1);
        assert!(!view.has_next());
        assert!(view.has_previous());

        // Filtering goes back to the first page
        state.set_filter("a");
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let mut state = TableState::new(2);
        state.set_page(9);
        let view = state.view(&rows(), &columns(), no_actions);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_server_paged_shows_every_row() {
        let state = TableState::server_paged();
        let view = state.view(&rows(), &columns(), no_actions);
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.page_count, 1);
    }

    #[test]
    fn test_selection_is_tracked() {
        let mut state = TableState::new(10);
        state.toggle_selected(EntityId(2));
        let view = state.view(&rows(), &columns(), no_actions);
        assert!(view.rows.iter().any(|r| r.id == EntityId(2) && r.selected));
        assert_eq!(state.selected_count(), 1);

        state.toggle_selected(EntityId(2));
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn test_destructive_actions_need_confirmation() {
        assert!(RowAction::Delete.needs_confirmation());
        assert!(RowAction::Booking(BookingAction::Cancel).needs_confirmation());
        assert!(!RowAction::Booking(BookingAction::Confirm).needs_confirmation());
        assert!(RowAction::Verification(VerificationAction::Reject).needs_confirmation());
        assert!(!RowAction::SetAvailable(false).needs_confirmation());
        assert_eq!(RowAction::SetAvailable(true).label(), "Mark available");
    }
}
