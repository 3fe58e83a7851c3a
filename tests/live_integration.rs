use shopify_rest_http::{ShopifyHttpClient, ShopifyHttpError};

/// Reads the Admin API base URL, e.g.
/// `https://my-store.myshopify.com/admin/api/2024-01`.
fn load_live_base_url() -> Result<String, String> {
    let base_url = std::env::var("SHOPIFY_LIVE_URL")
        .map_err(|_| "SHOPIFY_LIVE_URL env is required".to_owned())?;
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("SHOPIFY_LIVE_URL is set but empty".to_owned());
    }
    Ok(trimmed.to_owned())
}

#[tokio::test]
async fn live_shop_roundtrip() {
    let (base_url, shop) = match (load_live_base_url(), ShopifyHttpClient::from_env()) {
        (Ok(base_url), Ok(shop)) => (base_url, shop),
        _ => {
            eprintln!("skipping live test: SHOPIFY_LIVE_URL / SHOPIFY_ACCESS_TOKEN not set");
            return;
        }
    };

    let response = match shop.get(&format!("{base_url}/shop.json"), ()).await {
        Ok(response) => response,
        Err(ShopifyHttpError::RateLimitExceeded { body, .. }) => {
            panic!("shop.json rejected with spare call-limit capacity: {body}")
        }
        Err(err) => panic!("shop.json request failed: {err}"),
    };

    assert!(response.is_success(), "unexpected status {}", response.status);
    let call_limit = response
        .call_limit()
        .expect("Shopify must report the call limit header");
    assert!(call_limit.limit > 0);

    let shop_json: serde_json::Value = response.json().expect("shop.json must be JSON");
    assert!(shop_json["shop"]["id"].is_number());
}
