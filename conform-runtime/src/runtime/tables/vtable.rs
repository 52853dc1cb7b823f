use std::fmt::Debug;

use conform_shared::{MethodBody, NativeFn, TypeTag, Value, Visibility};
use fxhash::FxHashMap;

use crate::error::{ConformanceError, ConformanceResult};
use crate::runtime::{Index, Owner, Symbol};

/// Method table keyed by name symbol.
///
/// Every entry remembers which class, module or singleton defined it so that
/// lookups can tell a real implementation apart from an interface stand-in.
#[derive(Debug, Default)]
pub struct VTable {
    symbol_mapper: FxHashMap<Symbol, Index>,
    table: Vec<Function>,
}

impl VTable {
    pub fn new() -> Self {
        VTable {
            symbol_mapper: FxHashMap::default(),
            table: Vec::new(),
        }
    }

    /// Adds `function`, replacing any entry with the same name.
    /// Returns the replaced entry.
    pub fn insert(&mut self, function: Function) -> Option<Function> {
        match self.symbol_mapper.get(&function.name) {
            Some(index) => Some(std::mem::replace(&mut self.table[*index], function)),
            None => {
                self.symbol_mapper.insert(function.name, self.table.len());
                self.table.push(function);
                None
            }
        }
    }

    pub fn get_function(&self, symbol: Symbol) -> Option<&Function> {
        let index = self.symbol_mapper.get(&symbol)?;
        Some(&self.table[*index])
    }

    pub fn remove(&mut self, symbol: Symbol) -> Option<Function> {
        let index = self.symbol_mapper.remove(&symbol)?;
        let removed = self.table.swap_remove(index);
        if let Some(moved) = self.table.get(index) {
            self.symbol_mapper.insert(moved.name, index);
        }
        Some(removed)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbol_mapper.contains_key(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Function> {
        self.table.iter()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}


#[derive(Clone)]
pub struct Function {
    pub name: Symbol,
    pub owner: Owner,
    pub arguments: Box<[TypeTag]>,
    pub return_type: TypeTag,
    pub visibility: Visibility,
    pub value: FunctionValue,
}

impl Function {
    pub fn new(
        name: Symbol,
        owner: Owner,
        arguments: Box<[TypeTag]>,
        return_type: TypeTag,
        visibility: Visibility,
        value: FunctionValue,
    ) -> Self {
        Function {
            name,
            owner,
            arguments,
            return_type,
            visibility,
            value,
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Checks `args` against the declared parameter types.
    pub fn check_arguments(&self, method: &str, args: &[Value]) -> ConformanceResult<()> {
        if args.len() != self.arguments.len() {
            return Err(ConformanceError::ArityMismatch {
                method: String::from(method),
                expected: self.arguments.len(),
                found: args.len(),
            });
        }
        for (index, (expected, arg)) in self.arguments.iter().zip(args).enumerate() {
            let found = arg.type_tag();
            if *expected != found {
                return Err(ConformanceError::TypeMismatch {
                    method: String::from(method),
                    index,
                    expected: *expected,
                    found,
                });
            }
        }
        Ok(())
    }

    pub fn invoke(&self, args: &[Value]) -> Value {
        match &self.value {
            FunctionValue::Native(f) => f(args),
            FunctionValue::Blank => Value::Void,
        }
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        f.debug_struct("Function")
        .field("name", &self.name)
        .field("owner", &self.owner)
        .field("arguments", &self.arguments)
        .field("return_type", &self.return_type)
        .field("visibility", &self.visibility)
        .field("value", &self.value)
        .finish()
    }
}


#[derive(Clone)]
pub enum FunctionValue {
    Native(NativeFn),
    Blank,
}

impl FunctionValue {
    pub fn is_blank(&self) -> bool {
        match self {
            FunctionValue::Blank => true,
            _ => false,
        }
    }
}

impl From<MethodBody> for FunctionValue {
    fn from(body: MethodBody) -> Self {
        match body {
            MethodBody::Native(f) => FunctionValue::Native(f),
            MethodBody::Blank => FunctionValue::Blank,
        }
    }
}

impl Debug for FunctionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            FunctionValue::Native(ptr) => {
                f.debug_struct("Native")
                .field("ptr", &std::sync::Arc::as_ptr(ptr))
                .finish()
            }
            FunctionValue::Blank => f.debug_struct("Blank").finish(),
        }
    }
}
