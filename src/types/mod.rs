//! Data types for grid column state.

mod column;
mod data_type;
mod state;

pub use column::*;
pub use data_type::*;
pub use state::*;
