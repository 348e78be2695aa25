//! static operation helper
//!
//! implement [`Operation`] for a query document known at compile time and
//! run it with `execute_operation`.

use serde::de::DeserializeOwned;

/// graphql operation with a fixed document and response shape
///
/// ```
/// use graphql_executor::Operation;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Viewer {
///     login: String,
/// }
///
/// #[derive(Deserialize)]
/// struct ViewerData {
///     viewer: Viewer,
/// }
///
/// struct ViewerQuery;
///
/// impl Operation for ViewerQuery {
///     const QUERY: &'static str = "query { viewer { login } }";
///     type Response = ViewerData;
/// }
/// ```
pub trait Operation {
    /// graphql query or mutation string
    const QUERY: &'static str;
    /// type the `data` payload is decoded into
    type Response: DeserializeOwned;
}
