//! Kernel command line tokens and the list that edits them

pub mod list;
pub mod param;

pub use list::KernelParamList;
pub use param::{Param, ParamValue};
