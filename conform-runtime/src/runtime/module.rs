//! Modules and the interface marker.
//!
//! A module starts out as a plain capability grouping. Marking it turns it
//! into an interface for good: the tag is never cleared and the method table
//! is sealed from then on.

use conform_shared::{MethodDefinition, ModuleDefinition};
use log::debug;

use super::{tables::vtable::VTable, Owner, Runtime, Symbol};
use crate::error::{ConformanceError, ConformanceResult};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ModuleKind {
    Capability,
    Interface,
}

#[derive(Debug)]
pub struct Module {
    pub name: Symbol,
    kind: ModuleKind,
    pub vtable: VTable,
}

impl Module {
    pub fn new(name: Symbol, vtable: VTable) -> Self {
        Module {
            name,
            kind: ModuleKind::Capability,
            vtable,
        }
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ModuleKind::Interface
    }

    /// Returns `true` if this call did the marking.
    fn mark(&mut self) -> bool {
        let newly_marked = self.kind != ModuleKind::Interface;
        self.kind = ModuleKind::Interface;
        newly_marked
    }

    /// The method names that make up the contract. Private helpers are not
    /// part of it.
    pub fn declared_methods(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.vtable.iter().filter(|f| f.is_public()).map(|f| f.name)
    }
}

impl Runtime {
    /// Links a module into the runtime as a plain capability grouping.
    pub fn load_module(&mut self, definition: ModuleDefinition) -> ConformanceResult<Symbol> {
        let ModuleDefinition { name, methods } = definition;
        if self.entity_map.contains_key(&name) {
            return Err(ConformanceError::DuplicateDefinition(name));
        }

        let name_symbol = self.intern(&name);
        let module_symbol = self.symbol_table.add_module(self.module_table.len());
        let vtable = self.link_methods(Owner::Module(module_symbol), methods);
        self.module_table.insert_module(Module::new(name_symbol, vtable));
        self.entity_map.insert(name.clone(), module_symbol);

        debug!("[Runtime] loaded module {name} as symbol {module_symbol}");
        Ok(module_symbol)
    }

    /// Adds a method to a module that has not been marked yet.
    pub fn define_module_method(&mut self, module: Symbol, method: MethodDefinition) -> ConformanceResult<()> {
        if self.module(module)?.is_interface() {
            return Err(ConformanceError::InterfaceSealed(self.describe(module)));
        }
        let function = self.link_method(Owner::Module(module), method);
        self.module_mut(module)?.vtable.insert(function);
        Ok(())
    }

    /// Tags `module` as an interface. Marking twice is a no-op.
    pub fn mark_as_interface(&mut self, module: Symbol) -> ConformanceResult<Symbol> {
        if self.module_mut(module)?.mark() {
            debug!("[Interface] marked {} as an interface", self.describe(module));
        }
        Ok(module)
    }

    /// Whether `entity` is a module tagged as an interface. Anything else,
    /// including unbound symbols, is not.
    pub fn is_interface(&self, entity: Symbol) -> bool {
        self.module(entity).is_ok_and(Module::is_interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::init_test_logger;
    use conform_shared::{ClassDefinition, SignatureEntry};

    fn remote(runtime: &mut Runtime) -> Symbol {
        runtime
            .load_module(ModuleDefinition::new("Remote").with_declarations(&["on", "off"]))
            .unwrap()
    }

    #[test]
    fn test_modules_start_as_capabilities() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let remote = remote(&mut runtime);
        assert_eq!(runtime.module(remote).unwrap().kind(), ModuleKind::Capability);
        assert!(!runtime.is_interface(remote));
    }

    #[test]
    fn test_marking_is_idempotent() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let remote = remote(&mut runtime);

        let once = runtime.mark_as_interface(remote).unwrap();
        let twice = runtime.mark_as_interface(once).unwrap();
        assert_eq!(once, twice);
        assert!(runtime.is_interface(twice));

        let mut declared = runtime
            .module(remote)
            .unwrap()
            .declared_methods()
            .map(|m| runtime.name_of(m).unwrap())
            .collect::<Vec<_>>();
        declared.sort();
        assert_eq!(declared, vec!["off", "on"]);
    }

    #[test]
    fn test_marking_rejects_non_modules() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let device = runtime.define_class(ClassDefinition::new("Device")).unwrap();
        assert_eq!(
            runtime.mark_as_interface(device).unwrap_err(),
            ConformanceError::NotAModule(String::from("Device"))
        );
        assert_eq!(runtime.mark_as_interface(4242).unwrap_err(), ConformanceError::UnknownSymbol(4242));
        assert!(!runtime.is_interface(device));
        assert!(!runtime.is_interface(4242));
    }

    #[test]
    fn test_interfaces_are_sealed() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let remote = remote(&mut runtime);
        runtime
            .define_module_method(remote, MethodDefinition::blank("volume", SignatureEntry::nullary()))
            .unwrap();
        runtime.mark_as_interface(remote).unwrap();

        assert_eq!(
            runtime
                .define_module_method(remote, MethodDefinition::blank("mute", SignatureEntry::nullary()))
                .unwrap_err(),
            ConformanceError::InterfaceSealed(String::from("Remote"))
        );
        assert_eq!(runtime.module(remote).unwrap().vtable.len(), 3);
    }

    #[test]
    fn test_private_methods_are_not_declared() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let module = runtime
            .load_module(
                ModuleDefinition::new("Switch")
                    .with_declarations(&["toggle"])
                    .with_method(MethodDefinition::blank("wire", SignatureEntry::nullary()).private()),
            )
            .unwrap();
        let declared = runtime.module(module).unwrap().declared_methods().collect::<Vec<_>>();
        assert_eq!(declared, vec![runtime.method_symbol("toggle").unwrap()]);
    }

    #[test]
    fn test_duplicate_module_names_are_rejected() {
        init_test_logger();
        let mut runtime = Runtime::new();
        remote(&mut runtime);
        assert_eq!(
            runtime.load_module(ModuleDefinition::new("Remote")).unwrap_err(),
            ConformanceError::DuplicateDefinition(String::from("Remote"))
        );
    }
}
