//! Station data source boundary.
//!
//! The source is a GeoJSON feature collection of repair stations, either
//! fetched from a remote `/data/dropoffs` endpoint or cached from local
//! files at startup. Records are validated into typed [`Station`]s
//! exactly once, here; nothing downstream touches raw feature shapes.
//!
//! [`Station`]: crate::domain::Station

mod client;
mod error;
mod index;
mod types;

pub use client::{DropoffClient, DropoffClientConfig};
pub use error::DropoffError;
pub use index::{DropoffSource, StationIndex};
pub use types::{Feature, FeatureCollection, Geometry, Properties, into_stations, to_collection};
