//! Types of the clusters management API.
//!
//! Every type is an immutable value with a companion builder. Values track
//! which of their attributes are present in a bitmap, so that an attribute
//! which was never set is distinguishable from one set to its zero value,
//! and only present attributes are written to JSON.

#[macro_use]
mod macros;
pub use macros::{Build, Resource};

mod aws;
mod clusters;
mod codec;
mod credentials;
mod enums;
mod external_auth;
mod ingresses;
mod list;
mod machine_pools;
mod migrations;

pub use aws::*;
pub use clusters::*;
pub use codec::{
    marshal, marshal_list, marshal_to_string, unmarshal, unmarshal_list, unmarshal_slice,
    unmarshal_str, Error,
};
pub use credentials::*;
pub use enums::*;
pub use external_auth::*;
pub use ingresses::*;
pub use list::{List, ListBuilder};
pub use machine_pools::*;
pub use migrations::*;
