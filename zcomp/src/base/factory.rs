use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use zdom::{Document, DomError, NodeId, Selector};

use super::{Component, ComponentOptions};
use crate::error::Result;

struct FactoryInner<C: Component> {
    name: &'static str,
    doc: Document,
    defaults: RefCell<C::Options>,
    services: C::Services,
    /// Root element -> instance bound to it.
    registry: RefCell<HashMap<NodeId, Rc<C>>>,
}

/// Constructs components and remembers which instance owns which root.
///
/// A factory is a cheap-to-clone handle; clones share the registry. At most
/// one instance is ever registered per root element.
pub struct ComponentFactory<C: Component> {
    inner: Rc<FactoryInner<C>>,
}

impl<C: Component> Clone for ComponentFactory<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: Component> std::fmt::Debug for ComponentFactory<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentFactory")
            .field("name", &self.inner.name)
            .field("registered", &self.len())
            .finish_non_exhaustive()
    }
}

impl<C: Component> ComponentFactory<C> {
    /// Create a factory using the declared default options.
    pub fn new(name: &'static str, doc: &Document, services: C::Services) -> Self {
        Self::with_defaults(name, doc, C::Options::default(), services)
    }

    pub fn with_defaults(
        name: &'static str,
        doc: &Document,
        defaults: C::Options,
        services: C::Services,
    ) -> Self {
        Self {
            inner: Rc::new(FactoryInner {
                name,
                doc: doc.clone(),
                defaults: RefCell::new(defaults),
                services,
                registry: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    pub fn document(&self) -> &Document {
        &self.inner.doc
    }

    /// Options used for instances constructed without explicit options.
    pub fn defaults(&self) -> C::Options {
        self.inner.defaults.borrow().clone()
    }

    pub fn set_defaults(&self, defaults: C::Options) {
        *self.inner.defaults.borrow_mut() = defaults;
    }

    /// Merge a JSON object of option overrides into the factory defaults.
    pub fn configure_json(&self, json: &str) -> Result<()> {
        let merged = self.inner.defaults.borrow().merge_json(json)?;
        self.set_defaults(merged);
        Ok(())
    }

    /// Construct and register a component on `root` with the factory defaults.
    pub fn create_comp(&self, root: NodeId) -> Result<Rc<C>> {
        self.create_comp_with(root, self.defaults())
    }

    /// Construct and register a component on `root`.
    ///
    /// If `root` already has an instance, that instance is returned and
    /// `options` is ignored.
    pub fn create_comp_with(&self, root: NodeId, options: C::Options) -> Result<Rc<C>> {
        if let Some(existing) = self.from_root(root) {
            log::debug!("[{}] {} already bound", self.inner.name, root);
            return Ok(existing);
        }
        if !self.inner.doc.is_valid(root) {
            return Err(DomError::UnknownNode(root).into());
        }

        // The registry must not stay borrowed here: binding dispatches events
        // whose listeners may look instances up.
        let comp = C::bind(&self.inner.doc, root, options, &self.inner.services)?;
        self.inner
            .registry
            .borrow_mut()
            .insert(root, Rc::clone(&comp));
        log::debug!("[{}] bound to {}", self.inner.name, root);
        Ok(comp)
    }

    /// The instance registered for `root`, if any.
    pub fn from_root(&self, root: NodeId) -> Option<Rc<C>> {
        self.inner.registry.borrow().get(&root).cloned()
    }

    /// Construct components on every element matching the default root
    /// selector, in document order, skipping roots that are already bound.
    ///
    /// Returns the newly constructed instances. Stops at the first failure.
    pub fn init(&self) -> Result<Vec<Rc<C>>> {
        let defaults = self.defaults();
        let Some(selector) = defaults.root_selector().filter(|s| !s.is_empty()) else {
            log::debug!("[{}] init skipped: no root selector", self.inner.name);
            return Ok(Vec::new());
        };
        let selector = Selector::parse(selector)?;
        let doc = &self.inner.doc;

        let mut created = Vec::new();
        for root in doc.select_all(doc.body(), &selector) {
            if self.from_root(root).is_some() {
                continue;
            }
            created.push(self.create_comp_with(root, defaults.clone())?);
        }
        log::debug!(
            "[{}] init constructed {} instance(s)",
            self.inner.name,
            created.len()
        );
        Ok(created)
    }

    pub fn len(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every registered instance.
    pub fn clear(&self) {
        // Instances drop after the borrow ends; their Drop may reach the document.
        let registry = std::mem::take(&mut *self.inner.registry.borrow_mut());
        drop(registry);
    }
}
