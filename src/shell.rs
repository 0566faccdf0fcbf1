//! Shell state that lives beside the stack: the highlighted top-level entry
//! and the navigation drawer.

use std::cell::RefCell;
use std::rc::Rc;

use crate::breadcrumb::Breadcrumbs;
use crate::stack::NavigationStack;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    top_level: Option<String>,
    drawer_open: bool,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share a fresh state with `stack`, reset on every clear.
    pub fn attach<V, B: Breadcrumbs>(stack: &mut NavigationStack<V, B>) -> Rc<RefCell<Self>> {
        let shared = Rc::new(RefCell::new(Self::new()));
        let state = Rc::clone(&shared);
        stack.on_clear(move || state.borrow_mut().reset());
        shared
    }

    pub fn top_level(&self) -> Option<&str> {
        self.top_level.as_deref()
    }

    pub fn set_top_level(&mut self, name: &str) {
        self.top_level = Some(name.to_string());
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    pub fn reset(&mut self) {
        self.top_level = None;
        self.drawer_open = false;
    }
}
