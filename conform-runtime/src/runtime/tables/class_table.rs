use crate::runtime::class::Class;



pub struct ClassTable {
    table: Vec<Class>,
}

impl ClassTable {
    pub fn new() -> Self {
        ClassTable {
            table: Vec::new()
        }
    }

    pub fn insert_class(&mut self, class: Class) -> usize {
        let out = self.table.len();
        self.table.push(class);
        out
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn get(&self, index: usize) -> Option<&Class> {
        self.table.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Class> {
        self.table.get_mut(index)
    }
}
