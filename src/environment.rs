use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use crate::object::Object;

pub type Env = Rc<RefCell<Environment>>;

/// One scope frame. Lookups fall through to `outer`; writes never do.
#[derive(Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Self {
        Environment { store: HashMap::new(), outer: None }
    }

    /// A fresh root frame, ready to be shared.
    pub fn new_root() -> Env {
        Rc::new(RefCell::new(Environment::new()))
    }

    /// A child frame of `outer`, as created for every function call.
    pub fn new_enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment { store: HashMap::new(), outer: Some(outer) }))
    }

    pub fn get(&self, key: &str) -> Option<Object> {
        match self.store.get(key) {
            Some(obj) => Some(obj.clone()),
            None => match &self.outer {
                Some(env) => env.borrow().get(key),
                None => None,
            },
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: Object) {
        self.store.insert(key.into(), value);
    }
}
