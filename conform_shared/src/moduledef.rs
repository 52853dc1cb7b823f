//! A module is a named group of method signatures that can be mixed into a
//! class. Bodies are optional; a module meant to be used as an interface
//! usually carries only [`MethodBody::Blank`](crate::MethodBody::Blank) entries.

use crate::{MethodDefinition, SignatureEntry};

#[derive(Debug, Clone)]
pub struct ModuleDefinition {
    /// Module name
    pub name: String,
    /// Methods in declaration order
    pub methods: Vec<MethodDefinition>,
}

impl ModuleDefinition {
    pub fn new(name: impl AsRef<str>) -> Self {
        ModuleDefinition {
            name: String::from(name.as_ref()),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a blank declaration for each name, all taking no arguments.
    pub fn with_declarations(mut self, names: &[impl AsRef<str>]) -> Self {
        for name in names {
            self.methods.push(MethodDefinition::blank(name, SignatureEntry::nullary()));
        }
        self
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|m| m.name.as_str())
    }
}
