pub mod arena;
pub mod handles;
pub mod math;
pub mod time;
pub mod viewport;

// Foundation crate: small, well-tested primitives only.
pub use arena::*;
pub use handles::*;
pub use time::*;
pub use viewport::*;
