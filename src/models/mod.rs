pub mod op_result;
pub mod query;
pub mod recommendation;
pub mod user;

pub use op_result::*;
pub use query::*;
pub use recommendation::*;
pub use user::*;
