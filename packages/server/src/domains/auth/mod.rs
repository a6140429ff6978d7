// Authentication domain
//
// Token issuance lives in the external auth service; this module only needs
// to mint (for tests/tools) and verify tokens sharing the same secret.

pub mod jwt;

pub use jwt::{Claims, JwtService};
