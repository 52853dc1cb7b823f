use crate::runtime::Symbol;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SymbolEntry {
    StringRef(usize),
    ClassRef(usize),
    ModuleRef(usize),
}


#[derive(Debug)]
pub struct SymbolTable {
    table: Vec<SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            table: Vec::new()
        }
    }

    pub fn add_string(&mut self, index: usize) -> Symbol {
        let out = self.table.len();
        self.table.push(SymbolEntry::StringRef(index));
        out
    }

    pub fn add_class(&mut self, index: usize) -> Symbol {
        let out = self.table.len();
        self.table.push(SymbolEntry::ClassRef(index));
        out
    }

    pub fn add_module(&mut self, index: usize) -> Symbol {
        let out = self.table.len();
        self.table.push(SymbolEntry::ModuleRef(index));
        out
    }

    pub fn get(&self, symbol: Symbol) -> Option<SymbolEntry> {
        self.table.get(symbol).copied()
    }
}


impl std::ops::Index<usize> for SymbolTable {
    type Output = SymbolEntry;
    fn index(&self, index: usize) -> &Self::Output {
        &self.table[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_handed_out_in_order() {
        let mut table = SymbolTable::new();
        assert_eq!(table.add_string(0), 0);
        assert_eq!(table.add_class(0), 1);
        assert_eq!(table.add_module(0), 2);
        assert_eq!(table.get(1), Some(SymbolEntry::ClassRef(0)));
        assert_eq!(table[2], SymbolEntry::ModuleRef(0));
        assert_eq!(table.get(3), None);
    }
}
