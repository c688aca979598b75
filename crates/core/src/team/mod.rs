//! Teams and the membership directory.
//!
//! The ledger consumes membership through [`MembershipDirectory`]; the write
//! side ([`TeamRegistry`]) is only used by the HTTP binding and tooling.

pub mod directory;
pub mod error;
pub mod memory;
pub mod types;

pub use directory::{MembershipDirectory, TeamRegistry};
pub use error::TeamError;
pub use memory::InMemoryDirectory;
pub use types::{Team, TeamMember};
