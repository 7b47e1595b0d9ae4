use std::sync::Arc;

use dotenv::dotenv;
use futures_util::future::join_all;
use tracing_subscriber::EnvFilter;
use trekzone_core::AppConfig;
use trekzone_core::stores::{CategoryStore, TrekStore};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env();
    let gateway = config.gateway();
    if !gateway.is_configured() {
        tracing::warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set; nothing to load");
        return;
    }
    if config.razorpay_key_id.is_some() {
        tracing::info!("Payment gateway configured");
    } else {
        tracing::warn!("RAZORPAY_KEY_ID not set; checkout is disabled");
    }

    let treks = Arc::new(TrekStore::new(gateway.clone(), config.category_index_ttl));
    let categories = CategoryStore::new(gateway.clone());

    match treks.refresh().await {
        Ok(list) => tracing::info!("Loaded {} trek(s)", list.len()),
        Err(e) => tracing::error!("Failed to load treks: {e}"),
    }

    let active = match categories.refresh_active().await {
        Ok(list) => {
            tracing::info!("Loaded {} active categories", list.len());
            list
        }
        Err(e) => {
            tracing::error!("Failed to load categories: {e}");
            Vec::new()
        }
    };

    // Fill the per-category index up front so the first render of every
    // category page comes from memory.
    let lookups = active.iter().map(|category| {
        let treks = Arc::clone(&treks);
        let category_id = category.id;
        async move { (category_id, treks.treks_in_category(category_id).await) }
    });
    for (category_id, result) in join_all(lookups).await {
        match result {
            Ok(list) => tracing::info!("Category {category_id}: {} trek(s)", list.len()),
            Err(e) => tracing::error!("Failed to index category {category_id}: {e}"),
        }
    }
}
