pub mod document;
pub mod loan;

pub use document::*;
pub use loan::*;
