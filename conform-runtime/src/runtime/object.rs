use super::{tables::vtable::VTable, Symbol};

/// An instance of a class.
///
/// Objects carry their own method table for singleton methods, which take
/// precedence over anything their class provides.
#[derive(Debug)]
pub struct Object {
    class: Symbol,
    pub(crate) singleton_methods: VTable,
}

impl Object {
    pub(crate) fn new(class: Symbol) -> Self {
        Object {
            class,
            singleton_methods: VTable::new(),
        }
    }

    pub fn class(&self) -> Symbol {
        self.class
    }

    pub fn singleton_methods(&self) -> &VTable {
        &self.singleton_methods
    }
}
