use crate::MethodDefinition;

/// A class to be linked into the runtime.
#[derive(Debug, Clone)]
pub struct ClassDefinition {
    /// Class name
    pub name: String,
    /// Superclass name, `None` for a root class
    pub parent: Option<String>,
    /// Methods the class defines itself
    pub methods: Vec<MethodDefinition>,
}

impl ClassDefinition {
    pub fn new(name: impl AsRef<str>) -> Self {
        ClassDefinition {
            name: String::from(name.as_ref()),
            parent: None,
            methods: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl AsRef<str>) -> Self {
        self.parent = Some(String::from(parent.as_ref()));
        self
    }

    pub fn with_method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }
}
