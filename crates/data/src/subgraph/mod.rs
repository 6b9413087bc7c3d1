//! GraphQL access to the exchange and blocks subgraphs.

mod client;
pub mod queries;

pub use client::{GraphQlRequest, SubgraphClient};
