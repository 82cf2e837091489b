pub mod identity_map;
pub mod session;

pub use identity_map::{new_handle, Handle, IdentityMap};
pub use session::Session;
