//! Query module
//!
//! Turns caller parameters into an immutable, validated [`QuerySpec`] and
//! maps a spec plus continuation token onto a concrete [`Request`].
//!
//! # Overview
//!
//! | operation   | endpoint | discriminant                   |
//! |-------------|----------|--------------------------------|
//! | Search      | search   | `q` or `relatedToVideoId`      |
//! | MostPopular | videos   | `chart=mostPopular`            |
//! | ById        | videos   | `id=a,b,c`                     |

mod spec;
mod types;

pub use spec::{QuerySpec, MAX_PAGE_SIZE, RESERVED_PARAMS};
pub use types::{Operation, Request, SearchParam};
