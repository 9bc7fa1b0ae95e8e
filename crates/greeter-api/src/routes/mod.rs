//! # Route Modules
//!
//! | Path      | Module       | Purpose                     |
//! |-----------|--------------|-----------------------------|
//! | `/`       | [`greeting`] | Current greeting            |
//! | `/health` | [`health`]   | Database liveness probe     |

pub mod greeting;
pub mod health;
