//! Plain definitions handed to the conform runtime.
//!
//! Nothing in here knows about symbols or tables. A [`ModuleDefinition`] or
//! [`ClassDefinition`] is built up front and then linked into a runtime, which
//! interns the names and builds method tables out of it.

use std::fmt;
use std::sync::Arc;

pub mod classdef;
pub mod moduledef;

pub use classdef::ClassDefinition;
pub use moduledef::ModuleDefinition;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TypeTag {
    Void,
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Str,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Void => "void",
            TypeTag::Bool => "bool",
            TypeTag::U8 => "u8",
            TypeTag::U16 => "u16",
            TypeTag::U32 => "u32",
            TypeTag::U64 => "u64",
            TypeTag::I8 => "i8",
            TypeTag::I16 => "i16",
            TypeTag::I32 => "i32",
            TypeTag::I64 => "i64",
            TypeTag::F32 => "f32",
            TypeTag::F64 => "f64",
            TypeTag::Str => "str",
        };
        f.write_str(name)
    }
}

/// A value passed to or returned from a method.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Void,
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Void => TypeTag::Void,
            Value::Bool(_) => TypeTag::Bool,
            Value::U8(_) => TypeTag::U8,
            Value::U16(_) => TypeTag::U16,
            Value::U32(_) => TypeTag::U32,
            Value::U64(_) => TypeTag::U64,
            Value::I8(_) => TypeTag::I8,
            Value::I16(_) => TypeTag::I16,
            Value::I32(_) => TypeTag::I32,
            Value::I64(_) => TypeTag::I64,
            Value::F32(_) => TypeTag::F32,
            Value::F64(_) => TypeTag::F64,
            Value::Str(_) => TypeTag::Str,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Represents the shape of a method
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SignatureEntry {
    /// The types of the parameters in the signature
    /// The return type is always the first type in the vector
    pub types: Vec<TypeTag>,
}

impl SignatureEntry {
    pub fn new(types: Vec<TypeTag>) -> Self {
        SignatureEntry { types }
    }

    /// A signature taking no arguments and returning nothing.
    pub fn nullary() -> Self {
        SignatureEntry { types: vec![TypeTag::Void] }
    }

    pub fn return_type(&self) -> TypeTag {
        self.types.first().copied().unwrap_or(TypeTag::Void)
    }

    pub fn arguments(&self) -> &[TypeTag] {
        self.types.get(1..).unwrap_or(&[])
    }

    pub fn arity(&self) -> usize {
        self.arguments().len()
    }
}

pub type NativeFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

#[derive(Clone)]
pub enum MethodBody {
    /// Declared only. Calling it does nothing and returns [`Value::Void`].
    Blank,
    Native(NativeFn),
}

impl MethodBody {
    pub fn native<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        MethodBody::Native(Arc::new(f))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, MethodBody::Blank)
    }
}

impl fmt::Debug for MethodBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodBody::Blank => f.debug_struct("Blank").finish(),
            MethodBody::Native(ptr) => f
                .debug_struct("Native")
                .field("ptr", &Arc::as_ptr(ptr))
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MethodDefinition {
    pub name: String,
    pub signature: SignatureEntry,
    pub visibility: Visibility,
    pub body: MethodBody,
}

impl MethodDefinition {
    pub fn new(name: impl AsRef<str>, signature: SignatureEntry, body: MethodBody) -> Self {
        MethodDefinition {
            name: String::from(name.as_ref()),
            signature,
            visibility: Visibility::Public,
            body,
        }
    }

    /// A signature with no body, the usual shape of an interface method.
    pub fn blank(name: impl AsRef<str>, signature: SignatureEntry) -> Self {
        MethodDefinition::new(name, signature, MethodBody::Blank)
    }

    pub fn native<F>(name: impl AsRef<str>, signature: SignatureEntry, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        MethodDefinition::new(name, signature, MethodBody::native(f))
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }
}
