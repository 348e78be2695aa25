//! minimal graphql executor
//!
//! post a query and its variables to an endpoint, classify the response,
//! and hand the `data` object to a mapper you supply. start with
//! [`Executor`] (blocking) or [`AsyncExecutor`], configured through
//! [`ExecutorConfig`] when you need more than an endpoint and headers.
//!
//! responses are checked in a fixed order: a non-200 status is
//! [`Error::Status`], a body that is not a json object is
//! [`Error::MalformedResponse`], an `error` or `errors` field is
//! [`Error::GraphQl`], and only then is `data` extracted.
//!
//! ## quick start
//!
//! ```no_run
//! use graphql_executor::Executor;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = Executor::with_headers(
//!     "https://api.example.com/graphql",
//!     [("Authorization", "Bearer token")],
//! )?;
//! let name = executor.execute("{ viewer { name } }", None, |data| {
//!     data["viewer"]["name"].as_str().unwrap_or_default().to_string()
//! })?;
//! println!("{name}");
//! # Ok(())
//! # }
//! ```

mod async_executor;
mod config;
mod error;
mod executor;
mod graphql;
mod operation;

pub use async_executor::AsyncExecutor;
pub use config::ExecutorConfig;
pub use error::{Error, Result};
pub use executor::Executor;
pub use graphql::{GraphQlError, GraphQlLocation, GraphQlRequest, JsonObject};
pub use operation::Operation;
