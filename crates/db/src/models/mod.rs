//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and draft updates where applicable
//! - A serializable "view" struct exposing only effective (draft-resolved)
//!   content, never raw draft columns

pub mod client_component;
pub mod client_page;
pub mod client_site;
pub mod page_version;
