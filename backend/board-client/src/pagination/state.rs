use crate::error::RequestError;

/// Coarse state of one paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// Not loading. More pages may or may not exist.
    Idle,
    Loading,
    /// The last page load failed; `load_next` retries it.
    Errored,
}

/// Client-side accumulation of one paginated collection.
///
/// Invariants:
/// - `has_more` is true only if the latest page returned a continuation key
///   (or nothing has been loaded yet)
/// - `continuation_key` is `None` whenever `has_more` is false
/// - a failed load never touches `items`
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<T> {
    pub(crate) items: Vec<T>,
    pub(crate) continuation_key: Option<String>,
    pub(crate) has_more: bool,
    pub(crate) is_loading: bool,
    pub(crate) last_error: Option<RequestError>,
}

impl<T> PageState<T> {
    /// Empty and optimistic: the first load is always attempted.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            continuation_key: None,
            has_more: true,
            is_loading: false,
            last_error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn continuation_key(&self) -> Option<&str> {
        self.continuation_key.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&RequestError> {
        self.last_error.as_ref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn status(&self) -> PageStatus {
        if self.is_loading {
            PageStatus::Loading
        } else if self.last_error.is_some() {
            PageStatus::Errored
        } else {
            PageStatus::Idle
        }
    }

    /// Append a successfully fetched page.
    pub(crate) fn apply_page(&mut self, items: Vec<T>, continuation_key: Option<String>) {
        self.items.extend(items);
        self.has_more = continuation_key.is_some();
        self.continuation_key = continuation_key;
        self.last_error = None;
    }
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self::new()
    }
}
