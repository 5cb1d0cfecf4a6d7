pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{fixtures::eve::factory, TestBuilder, TestContext, TestError};
}
