//! A runtime ledger of declared interfaces.
//!
//! Classes declare that they implement interfaces, and the runtime can be
//! asked at any time which of the declared methods still have no
//! implementation behind them:
//!
//! ```
//! use conform_runtime::Runtime;
//! use conform_shared::{ClassDefinition, MethodDefinition, ModuleDefinition, SignatureEntry};
//!
//! let mut runtime = Runtime::new();
//! let remote = runtime
//!     .load_module(ModuleDefinition::new("Remote").with_declarations(&["on", "off"]))
//!     .unwrap();
//! let device = runtime
//!     .define_class(ClassDefinition::new("Device").with_method(MethodDefinition::native(
//!         "on",
//!         SignatureEntry::nullary(),
//!         |_| conform_shared::Value::Void,
//!     )))
//!     .unwrap();
//!
//! runtime.implements(device, &[remote]).unwrap();
//! assert!(runtime.is_interface(remote));
//! assert_eq!(runtime.unimplemented_methods_for(device, remote).unwrap(), vec!["off"]);
//! ```

mod error;
mod runtime;

pub use error::{ConformanceError, ConformanceResult};
pub use runtime::class::{Class, MissingMethodHandler};
pub use runtime::module::{Module, ModuleKind};
pub use runtime::object::Object;
pub use runtime::tables::vtable::{Function, FunctionValue, VTable};
pub use runtime::{Index, Owner, Runtime, Symbol};
