//! # services
//!
//! Use-case layer of the newsroom: the authorization policy, the session
//! (identity resolver), and the services orchestrating the store ports.
//! Everything here is framework-free; rendering layers are external
//! consumers.

pub mod articles;
pub mod assist;
pub mod categories;
pub mod comments;
pub mod policy;
pub mod roster;
pub mod session;

pub use articles::ArticleService;
pub use assist::AssistService;
pub use categories::CategoryService;
pub use comments::CommentService;
pub use roster::RosterService;
pub use session::{resolve_profile, Session};
