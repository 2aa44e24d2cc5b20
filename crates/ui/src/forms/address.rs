//! Address autocomplete
//!
//! Every keystroke bumps a generation counter. A search only goes out after
//! the debounce delay if no newer keystroke arrived, and results are only
//! applied if they still belong to the latest generation. Picking a
//! suggestion fills the whole address block and mutes the echo of that
//! value until the user types again.

use std::time::Duration;

use sejour_client::{AddressSuggestion, ClientResult, Geocoder};
use sejour_model::AddressFields;

/// Delay between the last keystroke and the search
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Shortest query worth sending
pub const MIN_QUERY_CHARS: usize = 2;

/// A search waiting for its debounce delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

/// Autocomplete state of one address field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressAutocomplete {
    query: String,
    generation: u64,
    suppressed: bool,
    loading: bool,
    suggestions: Vec<AddressSuggestion>,
}

impl AddressAutocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an edit of the address text
    ///
    /// Returns the search to run after the debounce delay, or `None` when
    /// the text is too short or is the echo of a picked suggestion.
    pub fn on_input(&mut self, text: &str) -> Option<SearchTicket> {
        if self.suppressed && text == self.query {
            return None;
        }
        self.suppressed = false;
        self.query = text.to_string();
        self.generation += 1;

        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            self.suggestions.clear();
            self.loading = false;
            return None;
        }

        self.loading = true;
        Some(SearchTicket {
            generation: self.generation,
            query: trimmed.to_string(),
        })
    }

    /// Whether a ticket still matches the latest edit
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        !self.suppressed && ticket.generation == self.generation
    }

    /// Apply search results; stale results are dropped
    pub fn resolve(
        &mut self,
        ticket: &SearchTicket,
        result: ClientResult<Vec<AddressSuggestion>>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::trace!(query = %ticket.query, "Discarding stale address results");
            return false;
        }
        self.loading = false;
        match result {
            Ok(suggestions) => self.suggestions = suggestions,
            Err(e) => {
                tracing::warn!("Address search failed: {}", e);
                self.suggestions.clear();
            }
        }
        true
    }

    /// Pick a suggestion, filling every address field at once
    pub fn select(&mut self, index: usize, fields: &mut AddressFields) -> bool {
        let Some(suggestion) = self.suggestions.get(index).cloned() else {
            return false;
        };
        suggestion.apply_to(fields);
        self.query = fields.address.clone();
        self.suppressed = true;
        self.loading = false;
        self.suggestions.clear();
        true
    }

    /// Close the dropdown
    pub fn dismiss(&mut self) {
        self.suggestions.clear();
        self.loading = false;
    }

    pub fn suggestions(&self) -> &[AddressSuggestion] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Wait for the debounce delay, then search if the ticket is still current
///
/// `still_current` is asked after the delay; returning `false` skips the
/// request entirely.
pub async fn debounced_search(
    geocoder: &dyn Geocoder,
    ticket: &SearchTicket,
    still_current: impl Fn(&SearchTicket) -> bool,
) -> Option<ClientResult<Vec<AddressSuggestion>>> {
    tokio::time::sleep(DEBOUNCE).await;
    if !still_current(ticket) {
        return None;
    }
    Some(geocoder.search(&ticket.query).await)
}
