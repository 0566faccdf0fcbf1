//! Navigation entry points used by the shell.
//!
//! Each operation fixes the request shape for one destination and routes it
//! to the matching page factory. Top-level entry points (home, category from
//! the menu, MIME search, origin) clear the stack first; drilling into the
//! current context pushes on top.

use crate::breadcrumb::Breadcrumbs;
use crate::models::{
    AddonsRequest, CategoryRequest, DetailRequest, NavRequest, ReviewsRequest, SearchRequest,
};
use crate::stack::{FactoryError, NavError, NavigationStack, PageFactory};

type BoxedFactory<V> = Box<dyn PageFactory<V>>;

/// One page factory per destination kind.
pub struct PageFactories<V> {
    pub category: BoxedFactory<V>,
    pub application_list: BoxedFactory<V>,
    pub application: BoxedFactory<V>,
    pub reviews: BoxedFactory<V>,
    pub addons: BoxedFactory<V>,
}

impl<V> PageFactories<V> {
    /// Use the same factory for every destination.
    pub fn uniform<F>(factory: F) -> Self
    where
        F: PageFactory<V> + Clone + 'static,
    {
        Self {
            category: Box::new(factory.clone()),
            application_list: Box::new(factory.clone()),
            application: Box::new(factory.clone()),
            reviews: Box::new(factory.clone()),
            addons: Box::new(factory),
        }
    }

    fn for_request(&mut self, request: &NavRequest) -> &mut dyn PageFactory<V> {
        match request {
            NavRequest::Category(_) => self.category.as_mut(),
            NavRequest::Search(_) => self.application_list.as_mut(),
            NavRequest::Detail(_) => self.application.as_mut(),
            NavRequest::Reviews(_) => self.reviews.as_mut(),
            NavRequest::Addons(_) => self.addons.as_mut(),
        }
    }
}

impl<V> PageFactory<V> for PageFactories<V> {
    fn create(&mut self, request: &NavRequest) -> Result<V, FactoryError> {
        self.for_request(request).create(request)
    }
}

/// Derived navigation operations over an explicitly passed stack.
pub struct Navigator<V> {
    factories: PageFactories<V>,
}

impl<V> Navigator<V> {
    pub fn new(factories: PageFactories<V>) -> Self {
        Self { factories }
    }

    /// Back to the home page.
    pub fn go_home<B: Breadcrumbs>(&mut self, stack: &mut NavigationStack<V, B>) -> Result<(), NavError> {
        stack.clear()
    }

    /// Category picked from the top-level menu: a fresh entry point.
    pub fn open_category_from_menu<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        category: &str,
        icon: &str,
    ) -> Result<(), NavError> {
        stack.clear()?;
        self.open_category(stack, category, icon)
    }

    /// Subcategory opened from the current page.
    pub fn open_category<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        category: &str,
        icon: &str,
    ) -> Result<(), NavError> {
        let request = NavRequest::Category(CategoryRequest {
            category: category.to_string(),
            icon: icon.to_string(),
        });
        self.push(stack, category, icon, request)
    }

    /// Filtered application list pushed on top of the current page.
    pub fn open_application_list<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        request: SearchRequest,
        icon: &str,
    ) -> Result<(), NavError> {
        let label = list_label(&request);
        self.push(stack, &label, icon, NavRequest::Search(request))
    }

    /// Search within the current category.
    ///
    /// An empty search pops the search page, returning to the list it was
    /// started from.
    pub fn open_search<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        text: &str,
        current_category: Option<&str>,
    ) -> Result<(), NavError> {
        let text = text.trim();
        if text.is_empty() {
            if stack.top().search_active() {
                stack.pop()?;
            }
            return Ok(());
        }
        let request = SearchRequest {
            category: current_category.map(String::from),
            search: Some(text.to_string()),
            ..Default::default()
        };
        if !stack.top().search_active() {
            return self.open_application_list(stack, request, "edit-find");
        }
        // Refining a search replaces the search page instead of stacking another.
        let label = list_label(&request);
        stack.replace_top(&label, "edit-find", &mut self.factories, &NavRequest::Search(request))?;
        Ok(())
    }

    /// Applications able to open a MIME type.
    pub fn open_mime_search<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        mime_type: &str,
    ) -> Result<(), NavError> {
        stack.clear()?;
        let request = SearchRequest {
            mime_type: Some(mime_type.to_string()),
            ..Default::default()
        };
        self.open_application_list(stack, request, "document-open")
    }

    /// Applications from one origin (repository).
    pub fn open_origin<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        origin: &str,
    ) -> Result<(), NavError> {
        stack.clear()?;
        let request = SearchRequest {
            origin: Some(origin.to_string()),
            ..Default::default()
        };
        self.open_application_list(stack, request, "repository")
    }

    /// Resources extending a package (plugins and the like).
    pub fn open_extends<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        package_name: &str,
    ) -> Result<(), NavError> {
        let request = SearchRequest {
            extends: Some(package_name.to_string()),
            ..Default::default()
        };
        self.open_application_list(stack, request, "preferences-plugin")
    }

    pub fn open_application<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        request: DetailRequest,
    ) -> Result<(), NavError> {
        let label = request.name.clone();
        let icon = request.icon.clone();
        self.push(stack, &label, &icon, NavRequest::Detail(request))
    }

    pub fn open_reviews<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        package_name: &str,
        name: &str,
    ) -> Result<(), NavError> {
        let request = NavRequest::Reviews(ReviewsRequest {
            package_name: package_name.to_string(),
            name: name.to_string(),
        });
        self.push(stack, &format!("Reviews: {name}"), "rating", request)
    }

    pub fn open_addons<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        package_name: &str,
        name: &str,
    ) -> Result<(), NavError> {
        let request = NavRequest::Addons(AddonsRequest {
            package_name: package_name.to_string(),
            name: name.to_string(),
        });
        self.push(stack, &format!("Addons: {name}"), "preferences-plugin", request)
    }

    fn push<B: Breadcrumbs>(
        &mut self,
        stack: &mut NavigationStack<V, B>,
        label: &str,
        icon: &str,
        request: NavRequest,
    ) -> Result<(), NavError> {
        stack.push_page(label, icon, &mut self.factories, &request)?;
        Ok(())
    }
}

fn list_label(request: &SearchRequest) -> String {
    if let Some(title) = request.title.as_deref().filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    if let Some(search) = request.search.as_deref() {
        return format!("Search: {search}");
    }
    if let Some(mime) = request.mime_type.as_deref() {
        return mime.to_string();
    }
    if let Some(extends) = request.extends.as_deref() {
        return format!("Extends: {extends}");
    }
    if let Some(origin) = request.origin.as_deref() {
        return origin.to_string();
    }
    request
        .category
        .clone()
        .unwrap_or_else(|| "Applications".to_string())
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::breadcrumb::BreadcrumbTrail;

    type Log = Rc<RefCell<Vec<NavRequest>>>;

    fn recording(log: &Log) -> impl FnMut(&NavRequest) -> Result<String, FactoryError> + Clone {
        let log = log.clone();
        move |req: &NavRequest| {
            log.borrow_mut().push(req.clone());
            Ok(req.kind().to_string())
        }
    }

    fn setup() -> (Navigator<String>, NavigationStack<String>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let nav = Navigator::new(PageFactories::uniform(recording(&log)));
        let stack = NavigationStack::new("Home", "go-home", "home".to_string(), BreadcrumbTrail::new());
        (nav, stack, log)
    }

    #[test]
    fn menu_category_clears_but_drill_down_pushes() {
        let (mut nav, mut stack, _) = setup();
        nav.open_category_from_menu(&mut stack, "Games", "games").unwrap();
        nav.open_category(&mut stack, "Arcade", "arcade").unwrap();
        nav.open_application(
            &mut stack,
            DetailRequest {
                package_name: "org.kde.kpat".into(),
                name: "KPatience".into(),
                icon: "kpat".into(),
            },
        )
        .unwrap();
        nav.open_reviews(&mut stack, "org.kde.kpat", "KPatience").unwrap();
        assert_eq!(
            stack.labels(),
            vec!["Home", "Games", "Arcade", "KPatience", "Reviews: KPatience"]
        );

        nav.open_category_from_menu(&mut stack, "Graphics", "graphics").unwrap();
        assert_eq!(stack.labels(), vec!["Home", "Graphics"]);
    }

    #[test]
    fn filters_reach_the_factory_unchanged() {
        let (mut nav, mut stack, log) = setup();
        nav.open_category(&mut stack, "Office", "").unwrap();
        nav.open_search(&mut stack, " calc ", Some("Office")).unwrap();
        nav.open_mime_search(&mut stack, "image/png").unwrap();
        nav.open_extends(&mut stack, "org.kde.krita").unwrap();

        let log = log.borrow();
        assert_eq!(
            log[1],
            NavRequest::Search(SearchRequest {
                category: Some("Office".into()),
                search: Some("calc".into()),
                ..Default::default()
            })
        );
        assert_eq!(
            log[2],
            NavRequest::Search(SearchRequest {
                mime_type: Some("image/png".into()),
                ..Default::default()
            })
        );
        assert!(matches!(&log[3], NavRequest::Search(r) if r.extends.as_deref() == Some("org.kde.krita")));
        assert_eq!(stack.labels(), vec!["Home", "image/png", "Extends: org.kde.krita"]);
    }

    #[test]
    fn search_refines_in_place_and_empty_search_pops() {
        let (mut nav, mut stack, _) = setup();
        nav.open_category(&mut stack, "Office", "").unwrap();
        nav.open_search(&mut stack, "calc", Some("Office")).unwrap();
        nav.open_search(&mut stack, "calcu", Some("Office")).unwrap();
        assert_eq!(stack.labels(), vec!["Home", "Office", "Search: calcu"]);
        assert!(stack.breadcrumbs().show_search_clear());

        nav.open_search(&mut stack, "", Some("Office")).unwrap();
        assert_eq!(stack.labels(), vec!["Home", "Office"]);
    }

    /// Factory that counts builds and fails once `fail` is set.
    fn switchable(
        builds: &Rc<Cell<usize>>,
        fail: &Rc<Cell<bool>>,
    ) -> impl FnMut(&NavRequest) -> Result<String, FactoryError> + Clone {
        let builds = builds.clone();
        let fail = fail.clone();
        move |req: &NavRequest| {
            if fail.get() {
                return Err(FactoryError::new("backend offline"));
            }
            builds.set(builds.get() + 1);
            Ok(req.kind().to_string())
        }
    }

    #[test]
    fn failed_refine_keeps_previous_search() {
        let builds = Rc::new(Cell::new(0));
        let fail = Rc::new(Cell::new(false));
        let mut nav = Navigator::new(PageFactories::uniform(switchable(&builds, &fail)));
        let mut stack = NavigationStack::new("Home", "", "home".to_string(), BreadcrumbTrail::new());

        nav.open_category(&mut stack, "Office", "").unwrap();
        nav.open_search(&mut stack, "calc", Some("Office")).unwrap();
        fail.set(true);
        let err = nav.open_search(&mut stack, "calcu", Some("Office")).unwrap_err();
        assert!(matches!(err, NavError::ConstructionFailed { .. }));
        assert_eq!(stack.labels(), vec!["Home", "Office", "Search: calc"]);
        assert_eq!(stack.breadcrumbs().labels(), vec!["Home", "Office", "Search: calc"]);
        assert!(stack.top().search_active());
        assert!(!stack.is_busy());
    }

    #[test]
    fn repeated_search_does_not_rebuild_page() {
        let builds = Rc::new(Cell::new(0));
        let fail = Rc::new(Cell::new(false));
        let mut nav = Navigator::new(PageFactories::uniform(switchable(&builds, &fail)));
        let mut stack = NavigationStack::new("Home", "", "home".to_string(), BreadcrumbTrail::new());

        nav.open_category(&mut stack, "Office", "").unwrap();
        nav.open_search(&mut stack, "calc", Some("Office")).unwrap();
        assert_eq!(builds.get(), 2);
        nav.open_search(&mut stack, "calc", Some("Office")).unwrap();
        assert_eq!(builds.get(), 2);
        assert_eq!(stack.labels(), vec!["Home", "Office", "Search: calc"]);
    }

    #[test]
    fn failing_destination_keeps_current_page() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut factories = PageFactories::uniform(recording(&log));
        factories.addons = Box::new(|_: &NavRequest| -> Result<String, FactoryError> {
            Err(FactoryError::new("no addons backend"))
        });
        let mut nav = Navigator::new(factories);
        let mut stack = NavigationStack::new("Home", "", "home".to_string(), BreadcrumbTrail::new());

        nav.open_origin(&mut stack, "flathub").unwrap();
        let err = nav.open_addons(&mut stack, "org.kde.krita", "Krita").unwrap_err();
        assert!(matches!(err, NavError::ConstructionFailed { .. }));
        assert_eq!(stack.labels(), vec!["Home", "flathub"]);
        assert_eq!(stack.top().view(), "search");
    }
}
