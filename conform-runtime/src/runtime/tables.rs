pub mod vtable;
pub mod class_table;
pub mod module_table;
pub mod symbol_table;
pub mod string_table;
