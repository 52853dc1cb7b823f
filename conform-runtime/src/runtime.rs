use std::collections::HashMap;

use conform_shared::{ClassDefinition, MethodDefinition};
use log::debug;

use class::{Class, MissingMethodHandler};
use module::Module;
use object::Object;
use tables::{
    class_table::ClassTable,
    module_table::ModuleTable,
    string_table::StringTable,
    symbol_table::{SymbolEntry, SymbolTable},
    vtable::{Function, VTable},
};

use crate::error::{ConformanceError, ConformanceResult};

pub mod class;
pub mod conformance;
pub mod dispatch;
pub mod module;
pub mod object;
pub mod tables;

pub type Symbol = usize;

pub type Index = usize;

/// Where a method table entry came from.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Owner {
    Class(Symbol),
    Module(Symbol),
    /// Defined on a single object
    Singleton,
}

/// The type system the conformance ledger lives in.
///
/// Holds every class and module by symbol. Definitions go in through
/// [`Runtime::define_class`] and [`Runtime::load_module`]; queries only ever
/// need `&self`.
pub struct Runtime {
    symbol_table: SymbolTable,
    string_table: StringTable,
    class_table: ClassTable,
    module_table: ModuleTable,
    /// Interned method names
    string_map: HashMap<String, Symbol>,
    /// Class and module names
    entity_map: HashMap<String, Symbol>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Runtime {
            symbol_table: SymbolTable::new(),
            string_table: StringTable::new(),
            class_table: ClassTable::new(),
            module_table: ModuleTable::new(),
            string_map: HashMap::new(),
            entity_map: HashMap::new(),
        }
    }

    /// Returns the symbol for `name`, creating it on first use.
    pub fn intern(&mut self, name: impl AsRef<str>) -> Symbol {
        let name = name.as_ref();
        if let Some(symbol) = self.string_map.get(name) {
            return *symbol;
        }
        let index = self.string_table.add_string(name);
        let symbol = self.symbol_table.add_string(index);
        self.string_map.insert(String::from(name), symbol);
        symbol
    }

    /// The symbol of an interned method name, if it was ever interned.
    pub fn method_symbol(&self, name: &str) -> Option<Symbol> {
        self.string_map.get(name).copied()
    }

    /// Finds a class or module by name.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.entity_map.get(name).copied()
    }

    pub fn name_of(&self, symbol: Symbol) -> Option<&str> {
        match self.symbol_table.get(symbol)? {
            SymbolEntry::StringRef(index) => self.string_table.get_string(index),
            SymbolEntry::ClassRef(index) => self.name_of(self.class_table.get(index)?.name),
            SymbolEntry::ModuleRef(index) => self.name_of(self.module_table.get(index)?.name),
        }
    }

    /// Name for error messages, falls back to the raw symbol.
    pub(crate) fn describe(&self, symbol: Symbol) -> String {
        match self.name_of(symbol) {
            Some(name) => String::from(name),
            None => format!("#<symbol {symbol}>"),
        }
    }

    pub fn is_class(&self, symbol: Symbol) -> bool {
        matches!(self.symbol_table.get(symbol), Some(SymbolEntry::ClassRef(_)))
    }

    pub fn is_module(&self, symbol: Symbol) -> bool {
        matches!(self.symbol_table.get(symbol), Some(SymbolEntry::ModuleRef(_)))
    }

    pub fn class(&self, symbol: Symbol) -> ConformanceResult<&Class> {
        match self.symbol_table.get(symbol) {
            Some(SymbolEntry::ClassRef(index)) => match self.class_table.get(index) {
                Some(class) => Ok(class),
                None => unreachable!("class symbol {symbol} points past the class table"),
            },
            Some(_) => Err(ConformanceError::NotAClass(self.describe(symbol))),
            None => Err(ConformanceError::UnknownSymbol(symbol)),
        }
    }

    pub(crate) fn class_mut(&mut self, symbol: Symbol) -> ConformanceResult<&mut Class> {
        match self.symbol_table.get(symbol) {
            Some(SymbolEntry::ClassRef(index)) => match self.class_table.get_mut(index) {
                Some(class) => Ok(class),
                None => unreachable!("class symbol {symbol} points past the class table"),
            },
            Some(_) => Err(ConformanceError::NotAClass(self.describe(symbol))),
            None => Err(ConformanceError::UnknownSymbol(symbol)),
        }
    }

    pub fn module(&self, symbol: Symbol) -> ConformanceResult<&Module> {
        match self.symbol_table.get(symbol) {
            Some(SymbolEntry::ModuleRef(index)) => match self.module_table.get(index) {
                Some(module) => Ok(module),
                None => unreachable!("module symbol {symbol} points past the module table"),
            },
            Some(_) => Err(ConformanceError::NotAModule(self.describe(symbol))),
            None => Err(ConformanceError::UnknownSymbol(symbol)),
        }
    }

    pub(crate) fn module_mut(&mut self, symbol: Symbol) -> ConformanceResult<&mut Module> {
        match self.symbol_table.get(symbol) {
            Some(SymbolEntry::ModuleRef(index)) => match self.module_table.get_mut(index) {
                Some(module) => Ok(module),
                None => unreachable!("module symbol {symbol} points past the module table"),
            },
            Some(_) => Err(ConformanceError::NotAModule(self.describe(symbol))),
            None => Err(ConformanceError::UnknownSymbol(symbol)),
        }
    }

    /// Turns a method definition into a table entry owned by `owner`.
    pub(crate) fn link_method(&mut self, owner: Owner, method: MethodDefinition) -> Function {
        let MethodDefinition { name, signature, visibility, body } = method;
        let name = self.intern(name);
        Function::new(
            name,
            owner,
            signature.arguments().into(),
            signature.return_type(),
            visibility,
            body.into(),
        )
    }

    pub(crate) fn link_methods(&mut self, owner: Owner, methods: Vec<MethodDefinition>) -> VTable {
        let mut vtable = VTable::new();
        for method in methods {
            let function = self.link_method(owner, method);
            vtable.insert(function);
        }
        vtable
    }

    /// Links a class into the runtime. The superclass, if any, must already
    /// be defined.
    pub fn define_class(&mut self, definition: ClassDefinition) -> ConformanceResult<Symbol> {
        let ClassDefinition { name, parent, methods } = definition;
        if self.entity_map.contains_key(&name) {
            return Err(ConformanceError::DuplicateDefinition(name));
        }
        let parent = match parent {
            Some(parent_name) => {
                let Some(parent) = self.lookup(&parent_name) else {
                    return Err(ConformanceError::UnknownName(parent_name));
                };
                if !self.is_class(parent) {
                    return Err(ConformanceError::NotAClass(parent_name));
                }
                Some(parent)
            }
            None => None,
        };

        let name_symbol = self.intern(&name);
        let class_symbol = self.symbol_table.add_class(self.class_table.len());
        let vtable = self.link_methods(Owner::Class(class_symbol), methods);
        self.class_table.insert_class(Class::new(name_symbol, parent, vtable));
        self.entity_map.insert(name.clone(), class_symbol);

        debug!("[Runtime] defined class {name} as symbol {class_symbol}");
        Ok(class_symbol)
    }

    /// Defines or redefines a method on `class` itself.
    pub fn define_method(&mut self, class: Symbol, method: MethodDefinition) -> ConformanceResult<()> {
        self.class(class)?;
        let function = self.link_method(Owner::Class(class), method);
        let name = function.name;
        self.class_mut(class)?.vtable.insert(function);
        debug!("[Runtime] defined {}#{}", self.describe(class), self.describe(name));
        Ok(())
    }

    /// Removes a method `class` defines itself. Methods reached through
    /// superclasses or modules are left alone.
    pub fn remove_method(&mut self, class: Symbol, name: &str) -> ConformanceResult<bool> {
        let Some(symbol) = self.method_symbol(name) else {
            self.class(class)?;
            return Ok(false);
        };
        let removed = self.class_mut(class)?.vtable.remove(symbol).is_some();
        if removed {
            debug!("[Runtime] removed {}#{name}", self.describe(class));
        }
        Ok(removed)
    }

    /// Installs the catch-all handler consulted for names `class` has no
    /// method for.
    pub fn set_missing_method_handler<H>(&mut self, class: Symbol, handler: H) -> ConformanceResult<()>
    where
        H: MissingMethodHandler + 'static,
    {
        self.class_mut(class)?.missing_method_handler = Some(Box::new(handler));
        debug!("[Runtime] installed missing method handler on {}", self.describe(class));
        Ok(())
    }

    pub fn clear_missing_method_handler(&mut self, class: Symbol) -> ConformanceResult<()> {
        self.class_mut(class)?.missing_method_handler = None;
        Ok(())
    }

    pub fn instantiate(&self, class: Symbol) -> ConformanceResult<Object> {
        self.class(class)?;
        Ok(Object::new(class))
    }

    pub fn define_singleton_method(&mut self, object: &mut Object, method: MethodDefinition) -> ConformanceResult<()> {
        let function = self.link_method(Owner::Singleton, method);
        object.singleton_methods.insert(function);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
