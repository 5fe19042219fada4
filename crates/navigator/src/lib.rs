//! Look-at camera navigation driven by gesture recognizers.

pub mod config;
pub mod error;
pub mod globe;
pub mod limits;
pub mod look_at;
pub mod state;
pub mod view;

pub use config::*;
pub use error::*;
pub use globe::*;
pub use limits::*;
pub use look_at::*;
pub use state::*;
pub use view::*;
