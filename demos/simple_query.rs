use graphql_executor::Executor;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = env::var("GRAPHQL_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4000/graphql".to_string());
    let headers: Vec<(String, String)> = env::var("GRAPHQL_TOKEN")
        .map(|token| vec![("Authorization".to_string(), format!("Bearer {token}"))])
        .unwrap_or_default();

    let executor = Executor::with_headers(endpoint, headers)?;
    let data = executor.execute("{ __schema { queryType { name } } }", None, |data| data)?;

    println!("data: {}", serde_json::Value::Object(data));
    Ok(())
}
