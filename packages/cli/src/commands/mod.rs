pub mod init;
pub mod inspect;
pub mod reorder;
pub mod replay;

pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use reorder::{reorder, ReorderArgs};
pub use replay::{replay, ReplayArgs};
