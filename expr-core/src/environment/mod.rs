pub mod symbol_table;
pub mod value;

pub mod prelude {
    pub use super::{
        symbol_table::*,
        value::*
    };
}
