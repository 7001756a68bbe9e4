mod compare;
mod explorer;
mod filter;
mod index;
mod loadnet;
mod network;
mod opt;
mod viewmodel;

pub mod format;

#[cfg(target_arch = "wasm32")]
mod wasm;


pub use compare::*;
pub use explorer::*;
pub use filter::*;
pub use index::*;
pub use loadnet::*;
pub use network::*;
pub use opt::*;
pub use viewmodel::*;
