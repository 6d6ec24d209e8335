//! Request extractors.

mod acting_user;
mod path;
mod query;
mod validated_json;

pub use acting_user::{ActingUser, ACTING_USER_HEADER};
pub use path::Path;
pub use query::Query;
pub use validated_json::ValidatedJson;
