//! yarnstats - resource manager application statistics
//!
//! The command implementations behind the `yarnappstats` and `yarnpoll`
//! binaries, written against the `StateStore` and `ResourceManager` traits so
//! they can be driven from tests.

mod commands;
mod logging;
mod lookup;

pub use commands::*;
pub use logging::*;
pub use lookup::*;
