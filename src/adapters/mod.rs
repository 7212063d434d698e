//! Default collaborators plugged into the signup controller.

mod email;
mod memory;

pub use email::*;
pub use memory::*;
