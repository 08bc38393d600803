//! # Murmur Shared
//!
//! Wire-level types shared between the API server and its clients:
//! request/response DTOs, RFC 7807 error bodies, and pagination.

pub mod dto;
pub mod page;
pub mod response;

pub use page::{POSTS_PER_PAGE, Page};
pub use response::ErrorResponse;
