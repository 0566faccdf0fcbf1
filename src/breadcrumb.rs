//! Breadcrumb trail kept in lock-step with the navigation stack.

/// Breadcrumb display capability.
///
/// The stack pushes one marker per page and pops one marker per popped page,
/// so an implementation never has to reconcile its length with the stack.
pub trait Breadcrumbs {
    /// Append a marker for a freshly pushed page.
    fn push_marker(&mut self, icon: &str, label: &str, is_search: bool);

    /// Remove the last marker.
    fn pop_marker(&mut self);

    /// Label of the active marker, if any.
    fn current_label(&self) -> Option<&str>;

    /// A click on the marker at `index`.
    ///
    /// Returns the stack index to pop to, or `None` when there is no such marker.
    fn click_at(&mut self, index: usize) -> Option<usize>;

    /// Number of markers.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single crumb.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub icon: String,
    pub label: String,
    pub is_search: bool,
}

/// In-memory trail. The last pushed or last clicked marker is the active one.
#[derive(Debug, Clone, Default)]
pub struct BreadcrumbTrail {
    markers: Vec<Marker>,
    active: Option<usize>,
}

impl BreadcrumbTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn labels(&self) -> Vec<&str> {
        self.markers.iter().map(|m| m.label.as_str()).collect()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Whether the "clear search" affordance should be shown.
    pub fn show_search_clear(&self) -> bool {
        self.active
            .and_then(|i| self.markers.get(i))
            .map(|m| m.is_search)
            .unwrap_or(false)
    }

    /// Render the trail as `Home > Games > Foo`, with the active crumb in brackets.
    pub fn render(&self) -> String {
        self.markers
            .iter()
            .enumerate()
            .map(|(i, m)| {
                if Some(i) == self.active {
                    format!("[{}]", m.label)
                } else {
                    m.label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

impl Breadcrumbs for BreadcrumbTrail {
    fn push_marker(&mut self, icon: &str, label: &str, is_search: bool) {
        self.markers.push(Marker {
            icon: icon.to_string(),
            label: label.to_string(),
            is_search,
        });
        self.active = Some(self.markers.len() - 1);
    }

    fn pop_marker(&mut self) {
        self.markers.pop();
        let last = self.markers.len().checked_sub(1);
        self.active = match (self.active, last) {
            (Some(a), Some(l)) if a > l => Some(l),
            (_, None) => None,
            (a, _) => a,
        };
    }

    fn current_label(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.markers.get(i))
            .map(|m| m.label.as_str())
    }

    fn click_at(&mut self, index: usize) -> Option<usize> {
        if index >= self.markers.len() {
            return None;
        }
        self.active = Some(index);
        Some(index)
    }

    fn len(&self) -> usize {
        self.markers.len()
    }
}
