use crate::runtime::module::Module;

pub struct ModuleTable {
    modules: Vec<Module>,
}

impl ModuleTable {
    pub fn new() -> Self {
        ModuleTable {
            modules: Vec::new(),
        }
    }

    pub fn insert_module(&mut self, module: Module) -> usize {
        let index = self.modules.len();
        self.modules.push(module);
        index
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn get(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Module> {
        self.modules.get_mut(index)
    }
}
