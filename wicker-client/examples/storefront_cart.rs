// wicker-client/examples/storefront_cart.rs
// Cart walkthrough against a running storefront API.

use std::sync::Arc;

use wicker_client::cart::CartSynchronizer;
use wicker_client::{ClientConfig, SessionHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <email> <password>", args[0]);
        println!("  Example: {} asha@example.com secret123", args[0]);
        return Ok(());
    }

    let base_url =
        std::env::var("WICKER_API_URL").unwrap_or_else(|_| "http://localhost:8081/api".to_string());

    let session = SessionHandle::new();
    let http = Arc::new(ClientConfig::new(base_url).build_http_client(session.clone())?);

    let login = http.login(&args[1], &args[2]).await?;
    tracing::info!("Logged in as: {}", login.user.name);

    let cart = CartSynchronizer::new(http.clone(), session.clone());
    cart.initialize().await?;
    tracing::info!(
        "Cart: {} items, total {}",
        cart.store().count(),
        cart.store().total()
    );

    // Add the first catalog product and show the new totals.
    if let Some(product) = http.products().await?.into_iter().next() {
        tracing::info!("Adding {} to cart", product.name);
        cart.add_item(&product, 1).await?;
        tracing::info!(
            "Cart now: {} items, total {}",
            cart.store().count(),
            cart.store().total()
        );
    }

    Ok(())
}
