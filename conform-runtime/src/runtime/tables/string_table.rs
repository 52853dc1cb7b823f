pub struct StringTable {
    table: Vec<String>,
}

impl StringTable {
    pub fn new() -> Self {
        StringTable {
            table: Vec::new(),
        }
    }

    pub fn add_string(&mut self, string: &str) -> usize {
        let out = self.table.len();
        self.table.push(String::from(string));
        out
    }

    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.table.get(index).map(String::as_str)
    }
}
