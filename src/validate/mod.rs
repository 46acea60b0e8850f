//! Documentation-contract validation core.
//!
//! - `types`: the violation model shared by every validator and reporter
//! - `pragma`: inline exemption matching
//! - `content`: exit-code completeness heuristics
//! - `dispatch`: extension routing and the batch façade

pub mod content;
pub mod dispatch;
pub mod pragma;
mod types;

pub use content::validate_exit_codes_content;
pub use dispatch::{validate_file, validate_files, Language};
pub use types::ValidationError;
