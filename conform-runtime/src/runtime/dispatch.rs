//! Method resolution and calls.
//!
//! Lookup order for a class is: the class's own table, then its attached
//! modules front to back, then the superclass the same way. An object checks
//! its singleton table before any of that.

use conform_shared::Value;
use log::trace;

use super::{
    class::MissingMethodHandler,
    object::Object,
    tables::vtable::{Function, VTable},
    Owner, Runtime, Symbol,
};
use crate::error::{ConformanceError, ConformanceResult};

impl Runtime {
    /// Every class and module consulted when resolving a method on `class`,
    /// in the order they are consulted.
    pub fn ancestors(&self, class: Symbol) -> ConformanceResult<Vec<Owner>> {
        let mut output = Vec::new();
        let mut current = Some(class);
        while let Some(symbol) = current {
            let class = self.class(symbol)?;
            output.push(Owner::Class(symbol));
            output.extend(class.includes().iter().map(|m| Owner::Module(*m)));
            current = class.parent;
        }
        Ok(output)
    }

    fn vtable_of(&self, owner: Owner) -> ConformanceResult<Option<&VTable>> {
        match owner {
            Owner::Class(symbol) => Ok(Some(&self.class(symbol)?.vtable)),
            Owner::Module(symbol) => Ok(Some(&self.module(symbol)?.vtable)),
            Owner::Singleton => Ok(None),
        }
    }

    /// The entry that would run for `method`, ignoring visibility.
    pub(crate) fn lookup_method<'a>(
        &'a self,
        class: Symbol,
        singleton: Option<&'a VTable>,
        method: Symbol,
    ) -> ConformanceResult<Option<&'a Function>> {
        if let Some(function) = singleton.and_then(|table| table.get_function(method)) {
            return Ok(Some(function));
        }
        for owner in self.ancestors(class)? {
            if let Some(function) = self.vtable_of(owner)?.and_then(|table| table.get_function(method)) {
                return Ok(Some(function));
            }
        }
        Ok(None)
    }

    /// The catch-all handler of `class` or its nearest superclass that has one.
    pub(crate) fn missing_method_handler(&self, class: Symbol) -> ConformanceResult<Option<&dyn MissingMethodHandler>> {
        let mut current = Some(class);
        while let Some(symbol) = current {
            let class = self.class(symbol)?;
            if let Some(handler) = class.get_missing_method_handler() {
                return Ok(Some(handler));
            }
            current = class.parent;
        }
        Ok(None)
    }

    /// Resolves `name` on instances of `class`.
    pub fn class_resolve_method(&self, class: Symbol, name: &str) -> ConformanceResult<Option<&Function>> {
        match self.method_symbol(name) {
            Some(method) => self.lookup_method(class, None, method),
            None => {
                self.class(class)?;
                Ok(None)
            }
        }
    }

    /// Resolves `name` on `object`, singleton methods first.
    pub fn resolve_method<'a>(&'a self, object: &'a Object, name: &str) -> ConformanceResult<Option<&'a Function>> {
        match self.method_symbol(name) {
            Some(method) => self.lookup_method(object.class(), Some(object.singleton_methods()), method),
            None => {
                self.class(object.class())?;
                Ok(None)
            }
        }
    }

    /// Whether calling `name` on `object` would be handled, either by a
    /// method or by a catch-all handler.
    pub fn responds_to(&self, object: &Object, name: &str, include_private: bool) -> ConformanceResult<bool> {
        if let Some(function) = self.resolve_method(object, name)? {
            if include_private || function.is_public() {
                return Ok(true);
            }
        }
        Ok(self
            .missing_method_handler(object.class())?
            .is_some_and(|handler| handler.responds_to_missing(name, include_private)))
    }

    /// Calls a public method.
    pub fn call(&self, object: &Object, name: &str, args: &[Value]) -> ConformanceResult<Value> {
        self.dispatch(object, name, args, false)
    }

    /// Calls a method regardless of its visibility.
    pub fn send(&self, object: &Object, name: &str, args: &[Value]) -> ConformanceResult<Value> {
        self.dispatch(object, name, args, true)
    }

    fn dispatch(&self, object: &Object, name: &str, args: &[Value], include_private: bool) -> ConformanceResult<Value> {
        let class = object.class();
        if let Some(function) = self.resolve_method(object, name)? {
            if !include_private && !function.is_public() {
                return Err(ConformanceError::PrivateMethod {
                    class: self.describe(class),
                    method: String::from(name),
                });
            }
            function.check_arguments(name, args)?;
            trace!("[Dispatch] {}#{name} -> {:?}", self.describe(class), function.owner);
            return Ok(function.invoke(args));
        }

        if let Some(handler) = self.missing_method_handler(class)? {
            if handler.responds_to_missing(name, include_private) {
                trace!("[Dispatch] {}#{name} -> missing method handler", self.describe(class));
                return Ok(handler.method_missing(name, args));
            }
        }

        Err(ConformanceError::NoMethod {
            class: self.describe(class),
            method: String::from(name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::init_test_logger;
    use conform_shared::{ClassDefinition, MethodDefinition, ModuleDefinition, SignatureEntry, TypeTag};

    struct Echo;

    impl MissingMethodHandler for Echo {
        fn responds_to_missing(&self, method: &str, _include_private: bool) -> bool {
            method.starts_with("echo_")
        }

        fn method_missing(&self, method: &str, _args: &[Value]) -> Value {
            Value::Str(String::from(method))
        }
    }

    fn returns(name: &str, value: u64) -> MethodDefinition {
        MethodDefinition::native(name, SignatureEntry::new(vec![TypeTag::U64]), move |_| Value::U64(value))
    }

    #[test]
    fn test_ancestors_order() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let a = runtime.load_module(ModuleDefinition::new("A")).unwrap();
        let b = runtime.load_module(ModuleDefinition::new("B")).unwrap();
        let base = runtime.define_class(ClassDefinition::new("Base")).unwrap();
        let derived = runtime.define_class(ClassDefinition::new("Derived").with_parent("Base")).unwrap();
        runtime.declare_conformance(base, &[b]).unwrap();
        runtime.declare_conformance(derived, &[a]).unwrap();

        assert_eq!(
            runtime.ancestors(derived).unwrap(),
            vec![Owner::Class(derived), Owner::Module(a), Owner::Class(base), Owner::Module(b)]
        );
    }

    #[test]
    fn test_class_methods_beat_modules_and_modules_beat_superclass() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let module = runtime
            .load_module(ModuleDefinition::new("Levels").with_method(returns("level", 1)).with_method(returns("depth", 1)))
            .unwrap();
        runtime
            .define_class(ClassDefinition::new("Base").with_method(returns("depth", 0)).with_method(returns("base", 0)))
            .unwrap();
        let derived = runtime
            .define_class(ClassDefinition::new("Derived").with_parent("Base").with_method(returns("level", 2)))
            .unwrap();
        runtime.declare_conformance(derived, &[module]).unwrap();
        let object = runtime.instantiate(derived).unwrap();

        assert_eq!(runtime.call(&object, "level", &[]).unwrap(), Value::U64(2));
        assert_eq!(runtime.call(&object, "depth", &[]).unwrap(), Value::U64(1));
        assert_eq!(runtime.call(&object, "base", &[]).unwrap(), Value::U64(0));
    }

    #[test]
    fn test_class_resolve_reports_owner() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let remote = runtime.load_module(ModuleDefinition::new("Remote").with_declarations(&["on"])).unwrap();
        let class = runtime.define_class(ClassDefinition::new("Device")).unwrap();
        runtime.declare_conformance(class, &[remote]).unwrap();

        let resolved = runtime.class_resolve_method(class, "on").unwrap().unwrap();
        assert_eq!(resolved.owner, Owner::Module(remote));
        assert!(resolved.value.is_blank());
        assert!(runtime.class_resolve_method(class, "off").unwrap().is_none());
    }

    #[test]
    fn test_singleton_methods_come_first() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let class = runtime.define_class(ClassDefinition::new("Device").with_method(returns("id", 1))).unwrap();
        let mut special = runtime.instantiate(class).unwrap();
        let plain = runtime.instantiate(class).unwrap();
        runtime.define_singleton_method(&mut special, returns("id", 7)).unwrap();

        assert_eq!(runtime.call(&special, "id", &[]).unwrap(), Value::U64(7));
        assert_eq!(runtime.call(&plain, "id", &[]).unwrap(), Value::U64(1));
        assert_eq!(runtime.resolve_method(&special, "id").unwrap().map(|f| f.owner), Some(Owner::Singleton));
    }

    #[test]
    fn test_private_methods_need_send() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let class = runtime
            .define_class(ClassDefinition::new("Device").with_method(returns("secret", 3).private()))
            .unwrap();
        let object = runtime.instantiate(class).unwrap();

        assert_eq!(
            runtime.call(&object, "secret", &[]).unwrap_err(),
            ConformanceError::PrivateMethod { class: String::from("Device"), method: String::from("secret") }
        );
        assert_eq!(runtime.send(&object, "secret", &[]).unwrap(), Value::U64(3));
        assert!(!runtime.responds_to(&object, "secret", false).unwrap());
        assert!(runtime.responds_to(&object, "secret", true).unwrap());
    }

    #[test]
    fn test_missing_method_handler_is_inherited() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let base = runtime.define_class(ClassDefinition::new("Base")).unwrap();
        let derived = runtime.define_class(ClassDefinition::new("Derived").with_parent("Base")).unwrap();
        runtime.set_missing_method_handler(base, Echo).unwrap();
        let object = runtime.instantiate(derived).unwrap();

        assert!(runtime.responds_to(&object, "echo_hello", false).unwrap());
        assert_eq!(
            runtime.call(&object, "echo_hello", &[Value::Bool(true)]).unwrap(),
            Value::Str(String::from("echo_hello"))
        );
        assert_eq!(
            runtime.call(&object, "shout", &[]).unwrap_err(),
            ConformanceError::NoMethod { class: String::from("Derived"), method: String::from("shout") }
        );

        runtime.clear_missing_method_handler(base).unwrap();
        assert!(!runtime.responds_to(&object, "echo_hello", false).unwrap());
    }

    #[test]
    fn test_blank_stand_in_runs_as_no_op() {
        init_test_logger();
        let mut runtime = Runtime::new();
        let remote = runtime.load_module(ModuleDefinition::new("Remote").with_declarations(&["on"])).unwrap();
        let class = runtime.define_class(ClassDefinition::new("Device")).unwrap();
        runtime.declare_conformance(class, &[remote]).unwrap();
        let object = runtime.instantiate(class).unwrap();

        assert!(runtime.responds_to(&object, "on", false).unwrap());
        assert_eq!(runtime.call(&object, "on", &[]).unwrap(), Value::Void);
        assert_eq!(
            runtime.call(&object, "on", &[Value::U8(1)]).unwrap_err(),
            ConformanceError::ArityMismatch { method: String::from("on"), expected: 0, found: 1 }
        );
    }
}
