//! The page navigation stack.
//!
//! Entry 0 is the home page and is never popped. Every other entry is created
//! by a push, mirrored by one breadcrumb marker, and dropped exactly once when
//! it is popped or the stack is cleared.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::breadcrumb::{BreadcrumbTrail, Breadcrumbs};
use crate::models::NavRequest;

/// Reason a page factory could not build a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct FactoryError(pub String);

impl FactoryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Builds a page for a navigation request.
pub trait PageFactory<V> {
    fn create(&mut self, request: &NavRequest) -> Result<V, FactoryError>;
}

impl<V, F> PageFactory<V> for F
where
    F: FnMut(&NavRequest) -> Result<V, FactoryError>,
{
    fn create(&mut self, request: &NavRequest) -> Result<V, FactoryError> {
        self(request)
    }
}

/// An opened page.
#[derive(Debug)]
pub struct PageEntry<V> {
    label: String,
    icon: String,
    view: V,
    search_active: bool,
}

impl<V> PageEntry<V> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// True when the page was opened by a search.
    pub fn search_active(&self) -> bool {
        self.search_active
    }

    pub fn set_search_active(&mut self, active: bool) {
        self.search_active = active;
    }
}

/// Result of a push that did not fail.
#[derive(Debug)]
pub enum Push<'a, V> {
    /// A new page was opened and is now on top.
    Opened(&'a PageEntry<V>),
    /// Double activation; the current top page is returned unchanged.
    Suppressed(&'a PageEntry<V>),
}

impl<'a, V> Push<'a, V> {
    pub fn entry(&self) -> &'a PageEntry<V> {
        match self {
            Push::Opened(e) | Push::Suppressed(e) => e,
        }
    }

    pub fn is_opened(&self) -> bool {
        matches!(self, Push::Opened(_))
    }
}

/// A push that has passed the guards and is waiting for its page.
///
/// The stack stays busy until the token is handed back to
/// [`NavigationStack::finish_push`] or [`NavigationStack::cancel_push`] of the
/// stack that issued it.
#[derive(Debug)]
#[must_use = "the stack stays busy until the pending push is finished"]
pub struct PendingPush {
    stack_id: u64,
    label: String,
    icon: String,
    search_active: bool,
}

impl PendingPush {
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("Page label must not be empty")]
    EmptyLabel,
    #[error("Navigation is busy constructing a page")]
    Busy,
    #[error("Stack index {index} out of range (depth {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Failed to open {label}: {reason}")]
    ConstructionFailed { label: String, reason: FactoryError },
    #[error("Pending push for {label} belongs to another stack")]
    ForeignPush { label: String },
}

static NEXT_STACK_ID: AtomicU64 = AtomicU64::new(1);

fn is_search(request: &NavRequest) -> bool {
    matches!(request, NavRequest::Search(r) if r.search.is_some())
}

type ClearListener = Box<dyn FnMut()>;

/// Ordered history of opened pages plus its breadcrumb trail.
pub struct NavigationStack<V, B = BreadcrumbTrail> {
    id: u64,
    entries: Vec<PageEntry<V>>,
    busy: bool,
    breadcrumbs: B,
    clear_listeners: Vec<ClearListener>,
}

impl<V, B: Breadcrumbs> NavigationStack<V, B> {
    /// Create a stack holding only the home page.
    pub fn new(root_label: &str, root_icon: &str, root_view: V, mut breadcrumbs: B) -> Self {
        breadcrumbs.push_marker(root_icon, root_label, false);
        Self {
            id: NEXT_STACK_ID.fetch_add(1, Ordering::Relaxed),
            entries: vec![PageEntry {
                label: root_label.to_string(),
                icon: root_icon.to_string(),
                view: root_view,
                search_active: false,
            }],
            busy: false,
            breadcrumbs,
            clear_listeners: Vec::new(),
        }
    }

    /// Push a page built by `factory` from `request`.
    ///
    /// Pushing while busy, or pushing the label already on top, is a no-op
    /// that hands back the current top entry. A factory failure leaves the
    /// stack exactly as it was.
    pub fn push_page<F>(
        &mut self,
        label: &str,
        icon: &str,
        factory: &mut F,
        request: &NavRequest,
    ) -> Result<Push<'_, V>, NavError>
    where
        F: PageFactory<V> + ?Sized,
    {
        let pending = match self.begin_push(label, icon, is_search(request))? {
            Some(p) => p,
            None => return Ok(Push::Suppressed(self.top())),
        };
        debug!(label, kind = request.kind(), "Constructing page");
        let result = factory.create(request);
        self.finish_push(pending, result)
    }

    /// Replace the top page with one built by `factory`.
    ///
    /// Same guards as [`push_page`](Self::push_page). The old top page is
    /// popped only once the new page exists, so a factory failure leaves the
    /// stack unchanged. At home this is a plain push.
    pub fn replace_top<F>(
        &mut self,
        label: &str,
        icon: &str,
        factory: &mut F,
        request: &NavRequest,
    ) -> Result<Push<'_, V>, NavError>
    where
        F: PageFactory<V> + ?Sized,
    {
        if self.entries.len() == 1 {
            return self.push_page(label, icon, factory, request);
        }
        let pending = match self.begin_push(label, icon, is_search(request))? {
            Some(p) => p,
            None => return Ok(Push::Suppressed(self.top())),
        };
        debug!(label, kind = request.kind(), "Constructing replacement page");
        let result = factory.create(request);
        if result.is_ok() {
            if let Some(old) = self.entries.pop() {
                self.breadcrumbs.pop_marker();
                debug!(label = %old.label, "Replaced page");
            }
        }
        self.finish_push(pending, result)
    }

    /// First half of a push: apply the guards and mark the stack busy.
    ///
    /// Returns `None` when the push is suppressed as a double activation.
    pub fn begin_push(
        &mut self,
        label: &str,
        icon: &str,
        search_active: bool,
    ) -> Result<Option<PendingPush>, NavError> {
        if label.is_empty() {
            return Err(NavError::EmptyLabel);
        }
        if self.busy {
            debug!(label, "Push suppressed: page construction in flight");
            return Ok(None);
        }
        if self.top().label == label {
            debug!(label, "Push suppressed: page already on top");
            return Ok(None);
        }
        self.busy = true;
        Ok(Some(PendingPush {
            stack_id: self.id,
            label: label.to_string(),
            icon: icon.to_string(),
            search_active,
        }))
    }

    /// Second half of a push: store the constructed page or report the failure.
    pub fn finish_push(
        &mut self,
        pending: PendingPush,
        result: Result<V, FactoryError>,
    ) -> Result<Push<'_, V>, NavError> {
        if pending.stack_id != self.id {
            return Err(NavError::ForeignPush {
                label: pending.label,
            });
        }
        self.busy = false;
        let PendingPush {
            stack_id: _,
            label,
            icon,
            search_active,
        } = pending;

        match result {
            Ok(view) => {
                self.breadcrumbs.push_marker(&icon, &label, search_active);
                self.entries.push(PageEntry {
                    label,
                    icon,
                    view,
                    search_active,
                });
                Ok(Push::Opened(self.top()))
            }
            Err(reason) => {
                warn!(label = %label, %reason, "Page construction failed");
                Err(NavError::ConstructionFailed { label, reason })
            }
        }
    }

    /// Abandon a pending push without a page.
    pub fn cancel_push(&mut self, pending: PendingPush) -> Result<(), NavError> {
        if pending.stack_id != self.id {
            return Err(NavError::ForeignPush {
                label: pending.label,
            });
        }
        debug!(label = %pending.label, "Push cancelled");
        self.busy = false;
        Ok(())
    }

    /// Pop pages from the top, one at a time, until `index` is the top.
    pub fn pop_to(&mut self, index: usize) -> Result<(), NavError> {
        let len = self.entries.len();
        if index >= len {
            return Err(NavError::IndexOutOfRange { index, len });
        }
        if self.busy {
            return Err(NavError::Busy);
        }
        while self.entries.len() > index + 1 {
            if let Some(entry) = self.entries.pop() {
                self.breadcrumbs.pop_marker();
                debug!(label = %entry.label, "Popped page");
            }
        }
        Ok(())
    }

    /// Pop the top page. Returns false when already at home.
    pub fn pop(&mut self) -> Result<bool, NavError> {
        if self.entries.len() == 1 {
            if self.busy {
                return Err(NavError::Busy);
            }
            return Ok(false);
        }
        self.pop_to(self.entries.len() - 2)?;
        Ok(true)
    }

    /// Return to the home page and notify clear listeners.
    pub fn clear(&mut self) -> Result<(), NavError> {
        self.pop_to(0)?;
        self.entries[0].search_active = false;
        for listener in self.clear_listeners.iter_mut() {
            listener();
        }
        Ok(())
    }

    /// Register a callback run after every [`clear`](Self::clear).
    pub fn on_clear(&mut self, listener: impl FnMut() + 'static) {
        self.clear_listeners.push(Box::new(listener));
    }

    /// Handle a click on breadcrumb `index` by popping back to it.
    pub fn activate_breadcrumb(&mut self, index: usize) -> Result<(), NavError> {
        if self.busy {
            return Err(NavError::Busy);
        }
        let len = self.entries.len();
        let target = self
            .breadcrumbs
            .click_at(index)
            .ok_or(NavError::IndexOutOfRange { index, len })?;
        self.pop_to(target)
    }

    pub fn top(&self) -> &PageEntry<V> {
        &self.entries[self.entries.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut PageEntry<V> {
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    pub fn root(&self) -> &PageEntry<V> {
        &self.entries[0]
    }

    pub fn entries(&self) -> &[PageEntry<V>] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of pages above home.
    pub fn depth(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn breadcrumbs(&self) -> &B {
        &self.breadcrumbs
    }

    pub fn breadcrumbs_mut(&mut self) -> &mut B {
        &mut self.breadcrumbs
    }
}
