use graphql_executor::{Executor, Operation};
use serde::Deserialize;
use serde_json::json;
use std::env;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Data {
    country: Option<Country>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Country {
    name: String,
    capital: Option<String>,
}

struct CountryQuery;

impl Operation for CountryQuery {
    const QUERY: &'static str = "query($code: ID!) { country(code: $code) { name capital } }";
    type Response = Data;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = env::var("GRAPHQL_ENDPOINT")
        .unwrap_or_else(|_| "https://countries.trevorblades.com/graphql".to_string());
    let code = env::args().nth(1).unwrap_or_else(|| "NZ".to_string());

    let executor = Executor::new(endpoint)?;
    let variables = json!({ "code": code }).as_object().cloned();
    let response = executor.execute_operation::<CountryQuery>(variables)?;

    println!("response: {response:?}");
    Ok(())
}
