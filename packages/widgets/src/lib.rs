mod dom;
mod listen;
mod placement;
mod util;

pub mod button;
pub mod caret;
pub mod class;
pub mod dropdown;
