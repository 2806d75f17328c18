//! ARPA Protocol - Core Types
//!
//! Always-available kernel of the crate:
//!
//! - **Constants**: wire tags, header layout, and protocol timing
//! - **Errors**: per-layer error enums and the top-level [`ArpaError`]
//! - **Configuration**: [`RadioConfig`] and [`LinkConfig`] with the
//!   protocol's default radio settings
//! - **Identity**: [`NodeIdentity`] and the configured [`NodeType`]

pub mod config;
pub mod constants;
mod error;
mod identity;

pub use config::{LinkConfig, RadioConfig};
pub use error::{ArpaError, FrameError, LinkError, RadioError, SessionError};
pub use identity::{NodeIdentity, NodeType};
