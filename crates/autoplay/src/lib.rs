//! Look-ahead play for fireside: state features, a linear value function
//! trained by TD updates, action enumeration and simulation, beam-limited
//! alternating search, turn policies and a match series driver.

mod action;
mod arena;
mod config;
mod error;
mod features;
mod mulligan;
mod policy;
mod search;
mod simulator;
mod trace;
mod value;

pub use action::*;
pub use arena::*;
pub use config::*;
pub use error::*;
pub use features::*;
pub use mulligan::*;
pub use policy::*;
pub use search::*;
pub use simulator::*;
pub use trace::*;
pub use value::*;
