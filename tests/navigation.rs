use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use dnav::models::{CategoryRequest, DetailRequest, FeaturedDescriptor};
use dnav::{
    populate_featured, BreadcrumbTrail, Breadcrumbs, FactoryError, FeaturedListing, NavRequest,
    NavigationStack, Navigator, PageFactories, Resource, ResourceLookup, ShellState,
};

/// Breadcrumb capability that only counts calls.
#[derive(Default)]
struct CountingCrumbs {
    pushed: usize,
    popped: usize,
    labels: Vec<String>,
}

impl Breadcrumbs for CountingCrumbs {
    fn push_marker(&mut self, _icon: &str, label: &str, _is_search: bool) {
        self.pushed += 1;
        self.labels.push(label.to_string());
    }

    fn pop_marker(&mut self) {
        self.popped += 1;
        self.labels.pop();
    }

    fn current_label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    fn click_at(&mut self, index: usize) -> Option<usize> {
        (index < self.labels.len()).then_some(index)
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

fn page(req: &NavRequest) -> Result<String, FactoryError> {
    Ok(req.kind().to_string())
}

#[test]
fn games_then_app_then_home() {
    let mut stack = NavigationStack::new("Home", "go-home", String::new(), CountingCrumbs::default());
    let mut factory = page;

    let games = NavRequest::Category(CategoryRequest {
        category: "Games".into(),
        icon: "iconA".into(),
    });
    stack.push_page("Category:Games", "iconA", &mut factory, &games).unwrap();
    let foo = NavRequest::Detail(DetailRequest {
        package_name: "foo".into(),
        name: "Foo".into(),
        icon: "iconB".into(),
    });
    stack.push_page("App:Foo", "iconB", &mut factory, &foo).unwrap();

    stack.pop_to(0).unwrap();
    assert_eq!(stack.labels(), vec!["Home"]);
    assert_eq!(stack.breadcrumbs().popped, 2);
    assert_eq!(stack.breadcrumbs().pushed, 3);
}

#[test]
fn pop_to_k_leaves_k_plus_one_entries() {
    for depth in 1..6 {
        for k in 0..=depth {
            let mut stack = NavigationStack::new("Home", "", String::new(), BreadcrumbTrail::new());
            let mut factory = page;
            for i in 0..depth {
                let label = format!("P{i}");
                let req = NavRequest::Category(CategoryRequest {
                    category: label.clone(),
                    icon: String::new(),
                });
                stack.push_page(&label, "", &mut factory, &req).unwrap();
            }
            assert_eq!(stack.len(), depth + 1);
            stack.pop_to(k).unwrap();
            assert_eq!(stack.len(), k + 1);
            assert_eq!(stack.breadcrumbs().len(), k + 1);
        }
    }
}

#[test]
fn clear_returns_to_root_and_resets_shell() {
    let counter = Rc::new(Cell::new(0usize));
    let made = counter.clone();
    let factory = move |req: &NavRequest| -> Result<String, FactoryError> {
        made.set(made.get() + 1);
        Ok(req.kind().to_string())
    };
    let mut navigator = Navigator::new(PageFactories::uniform(factory));
    let mut stack = NavigationStack::new("Home", "go-home", String::new(), BreadcrumbTrail::new());
    let shell = ShellState::attach(&mut stack);

    navigator.open_category_from_menu(&mut stack, "Games", "games").unwrap();
    shell.borrow_mut().set_top_level("Games");
    navigator.open_category(&mut stack, "Card", "").unwrap();
    navigator.open_search(&mut stack, "solitaire", Some("Card")).unwrap();
    navigator.open_reviews(&mut stack, "org.kde.kpat", "KPatience").unwrap();
    assert_eq!(stack.len(), 5);
    assert_eq!(counter.get(), 4);

    navigator.go_home(&mut stack).unwrap();
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.breadcrumbs().render(), "[Home]");
    assert_eq!(shell.borrow().top_level(), None);
}

#[test]
fn double_click_during_construction_adds_one_page() {
    let mut stack = NavigationStack::new("Home", "", String::new(), BreadcrumbTrail::new());
    let pending = stack.begin_push("App:Foo", "", false).unwrap().unwrap();

    let calls = RefCell::new(0);
    let mut factory = |req: &NavRequest| -> Result<String, FactoryError> {
        *calls.borrow_mut() += 1;
        Ok(req.kind().to_string())
    };
    let req = NavRequest::Detail(DetailRequest {
        package_name: "foo".into(),
        name: "Foo".into(),
        icon: String::new(),
    });
    let second = stack.push_page("App:Foo", "", &mut factory, &req).unwrap();
    assert!(!second.is_opened());
    assert_eq!(*calls.borrow(), 0);

    stack.finish_push(pending, Ok("detail".to_string())).unwrap();
    assert_eq!(stack.labels(), vec!["Home", "App:Foo"]);
}

struct Lookup(HashMap<&'static str, Resource>);

impl ResourceLookup for Lookup {
    fn resource_by_package_name(&self, name: &str) -> Option<Resource> {
        self.0.get(name).cloned()
    }
}

#[test]
fn featured_list_skips_unresolved_packages() {
    let mut listing = FeaturedListing::new();
    listing.insert(
        "pkg1".into(),
        FeaturedDescriptor {
            package: "a.b.c".into(),
            image: None,
        },
    );
    listing.insert(
        "pkg2".into(),
        FeaturedDescriptor {
            package: "x.y.z".into(),
            image: None,
        },
    );
    let lookup = Lookup(HashMap::from([(
        "a.b.c",
        Resource {
            package_name: "a.b.c".into(),
            name: "ABC".into(),
            icon: "abc".into(),
            comment: "Letters".into(),
            screenshot: None,
        },
    )]));

    let rows = populate_featured(&listing, &lookup, "https://example.org/none.png");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].package_name, "a.b.c");
    assert_eq!(rows[0].image, "https://example.org/none.png");
}
