use conform_shared::Value;

use super::{tables::vtable::VTable, Symbol};

/// Catch-all dispatch for method names a class has no entry for.
///
/// A handler that answers `true` from [`responds_to_missing`] for a name
/// satisfies any interface declaring that name, even though no concrete
/// method exists.
///
/// [`responds_to_missing`]: MissingMethodHandler::responds_to_missing
pub trait MissingMethodHandler: Send + Sync {
    fn responds_to_missing(&self, method: &str, include_private: bool) -> bool;

    fn method_missing(&self, method: &str, args: &[Value]) -> Value;
}

pub struct Class {
    pub name: Symbol,
    pub parent: Option<Symbol>,
    pub vtable: VTable,
    /// Attached modules, highest precedence first
    includes: Vec<Symbol>,
    pub missing_method_handler: Option<Box<dyn MissingMethodHandler>>,
}

impl Class {
    pub fn new(
        name: Symbol,
        parent: Option<Symbol>,
        vtable: VTable,
    ) -> Self {
        Class {
            name,
            parent,
            vtable,
            includes: Vec::new(),
            missing_method_handler: None,
        }
    }

    pub fn includes(&self) -> &[Symbol] {
        &self.includes
    }

    /// Puts `module` ahead of everything attached so far.
    pub(crate) fn include_front(&mut self, module: Symbol) {
        self.includes.insert(0, module);
    }

    pub fn get_missing_method_handler(&self) -> Option<&dyn MissingMethodHandler> {
        self.missing_method_handler.as_deref()
    }
}

impl std::fmt::Debug for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("vtable", &self.vtable)
            .field("includes", &self.includes)
            .field("missing_method_handler", &self.missing_method_handler.is_some())
            .finish()
    }
}
