/// Query update usage example
use urlquery::{QueryParams, Url};

fn main() -> Result<(), urlquery::Error> {
    // Show the trace events emitted by the query operations
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    // Parse a URL; `&` and `;` both separate pairs
    let url = Url::parse("http://example.com/search?name=John;age=30&tag=a&tag=b#results")?;

    // Get values
    println!("name: {:?}", url.query().get("name")); // Some("John")
    println!("tags: {:?}", url.query().get_all("tag")); // ["a", "b"]
    println!();

    // Update (first occurrence replaced, new keys appended)
    let updated = url.update_query([("age", "31"), ("city", "São Paulo")])?;
    println!("After update: {updated}");
    println!();

    // Append without overwriting
    let extended = updated.extend_query([("tag", "c")])?;
    println!("After extend: {extended}");
    println!();

    // Replace the whole query, numbers are stringified
    let replaced = url.with_query([("page", 2), ("limit", 50)])?;
    println!("After with_query: {replaced}");
    println!();

    // Drop the query
    println!("Without query: {}", url.without_query());
    println!();

    // Build parameters directly
    let params: QueryParams = [("q", "rust & url"), ("lang", "en")].into_iter().collect();
    println!("Serialized: {params}");
    for (key, value) in &params {
        println!("  {key} = {value}");
    }

    Ok(())
}
