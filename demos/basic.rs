use serde_json::json;
use shopify_rest_http::{ClientOptions, ShopifyHttpClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url = std::env::var("SHOPIFY_LIVE_URL")?;
    let token = std::env::var("SHOPIFY_ACCESS_TOKEN")?;

    let shop = ShopifyHttpClient::with_access_token(token).with_options(ClientOptions {
        max_rate_limit_retries: Some(20),
        ..ClientOptions::default()
    });

    let created = shop
        .post(
            &format!("{base_url}/products.json"),
            json!({"product": {"title": "Demo product", "status": "draft"}}),
            (),
        )
        .await?;
    println!("create -> {} ({} attempts)", created.status, created.attempts);

    let product: serde_json::Value = created.json()?;
    let Some(id) = product["product"]["id"].as_u64() else {
        anyhow::bail!("unexpected create response: {}", created.text());
    };

    let updated = shop
        .put(
            &format!("{base_url}/products/{id}.json"),
            json!({"product": {"id": id, "title": "Demo product (renamed)"}}),
            (),
        )
        .await?;
    println!("update -> {}", updated.status);

    let fetched = shop
        .get(&format!("{base_url}/products/{id}.json"), ())
        .await?;
    if let Some(limit) = fetched.call_limit() {
        println!("call limit: {}/{}", limit.used, limit.limit);
    }

    let deleted = shop
        .delete(&format!("{base_url}/products/{id}.json"), ())
        .await?;
    println!("delete -> {}", deleted.status);

    Ok(())
}
