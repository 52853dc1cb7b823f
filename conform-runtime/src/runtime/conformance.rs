//! Declaring conformance and computing implementation gaps.
//!
//! Nothing here is cached. Methods can be defined, removed or handed to a
//! catch-all handler between two queries, so every gap is worked out from the
//! method tables as they are at query time.

use indexmap::IndexMap;
use log::{debug, trace};

use super::{object::Object, tables::vtable::VTable, Owner, Runtime, Symbol};
use crate::error::{ConformanceError, ConformanceResult};

impl Runtime {
    /// Marks each of `modules` as an interface and attaches it to `class`.
    ///
    /// When several modules declare the same method name, the first one
    /// listed wins. Modules attached by a later call take precedence over
    /// those attached by an earlier one. A module already among the class's
    /// ancestors is not attached again.
    ///
    /// All arguments are checked before anything is changed.
    pub fn declare_conformance(&mut self, class: Symbol, modules: &[Symbol]) -> ConformanceResult<()> {
        self.class(class)?;
        for module in modules {
            self.module(*module)?;
        }

        for module in modules.iter().rev() {
            self.mark_as_interface(*module)?;
            if self.ancestors(class)?.contains(&Owner::Module(*module)) {
                debug!(
                    "[Conformance] {} already includes {}",
                    self.describe(class),
                    self.describe(*module)
                );
                continue;
            }
            self.class_mut(class)?.include_front(*module);
            debug!("[Conformance] {} implements {}", self.describe(class), self.describe(*module));
        }
        Ok(())
    }

    /// Same as [`Runtime::declare_conformance`].
    pub fn implements(&mut self, class: Symbol, modules: &[Symbol]) -> ConformanceResult<()> {
        self.declare_conformance(class, modules)
    }

    /// Interfaces attached to `class` or any of its superclasses, in method
    /// resolution order.
    pub fn interfaces(&self, class: Symbol) -> ConformanceResult<Vec<Symbol>> {
        let mut output: Vec<Symbol> = Vec::new();
        for owner in self.ancestors(class)? {
            if let Owner::Module(module) = owner {
                if self.is_interface(module) && !output.contains(&module) {
                    output.push(module);
                }
            }
        }
        Ok(output)
    }

    /// Declared methods of `interface` that instances of `class` do not
    /// implement, sorted.
    pub fn unimplemented_methods_for(&self, class: Symbol, interface: Symbol) -> ConformanceResult<Vec<String>> {
        self.gap(class, None, interface)
    }

    /// Like [`Runtime::unimplemented_methods_for`], but singleton methods of
    /// `object` count as implementations.
    pub fn object_unimplemented_methods_for(&self, object: &Object, interface: Symbol) -> ConformanceResult<Vec<String>> {
        self.gap(object.class(), Some(object.singleton_methods()), interface)
    }

    /// Every interface of `class` with at least one unimplemented method,
    /// mapped to those methods.
    pub fn class_unimplemented_methods(&self, class: Symbol) -> ConformanceResult<IndexMap<Symbol, Vec<String>>> {
        self.gaps(class, None)
    }

    /// Every interface of `object`'s class with at least one method the
    /// object does not implement, mapped to those methods.
    pub fn unimplemented_methods(&self, object: &Object) -> ConformanceResult<IndexMap<Symbol, Vec<String>>> {
        self.gaps(object.class(), Some(object.singleton_methods()))
    }

    fn gaps(&self, class: Symbol, singleton: Option<&VTable>) -> ConformanceResult<IndexMap<Symbol, Vec<String>>> {
        let mut output = IndexMap::new();
        for interface in self.interfaces(class)? {
            let methods = self.gap(class, singleton, interface)?;
            if !methods.is_empty() {
                output.insert(interface, methods);
            }
        }
        Ok(output)
    }

    fn gap(&self, class: Symbol, singleton: Option<&VTable>, interface: Symbol) -> ConformanceResult<Vec<String>> {
        let module = self.module(interface)?;
        if !module.is_interface() {
            return Err(ConformanceError::NotAnInterface(self.describe(interface)));
        }
        let handler = self.missing_method_handler(class)?;

        let mut output = Vec::new();
        for method in module.declared_methods() {
            let name = self.describe(method);
            // Any resolving owner other than the interface counts, including
            // another module or a superclass.
            let overridden = self
                .lookup_method(class, singleton, method)?
                .is_some_and(|function| function.owner != Owner::Module(interface));
            let caught = handler.is_some_and(|handler| handler.responds_to_missing(&name, true));
            trace!(
                "[Conformance] {}#{name}: overridden={overridden} caught={caught}",
                self.describe(class)
            );
            if !overridden && !caught {
                output.push(name);
            }
        }
        output.sort();
        Ok(output)
    }
}
