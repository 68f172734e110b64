//! Secure LRU demo driver
//!
//! Runs a scripted sequence of cache operations and prints a JSON snapshot of
//! the cache after each mutation.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use secure_lru::{Config, LruCache};

/// Main entry point for the LRU cache demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache with the configured capacity
/// 4. Run the demo script, printing snapshots to stdout
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "secure_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, enable_metrics={}",
        config.capacity, config.enable_metrics
    );

    let cache = LruCache::from_config(&config).context("Error creating cache")?;
    run_demo(&cache, config.capacity)?;

    info!("Demo complete");
    Ok(())
}

fn run_demo(cache: &LruCache, capacity: usize) -> anyhow::Result<()> {
    println!("=== Secure LRU Cache Demo (Capacity: {}) ===", capacity);
    println!();

    put_and_show(cache, 1, 1)?;
    put_and_show(cache, 2, 2)?;
    show_get(cache, 1);
    put_and_show(cache, 3, 3)?;
    show_get(cache, 2);
    println!("GetOrDefault(2, 999): {}", cache.get_or_default(2, 999));
    put_and_show(cache, 4, 4)?;
    show_get(cache, 1);
    show_get(cache, 3);
    show_get(cache, 4);

    println!("Cache size: {}", cache.len());
    println!("Cache capacity: {}", cache.capacity());
    println!("Contains key 3: {}", cache.contains(3));
    println!("Contains key 99: {}", cache.contains(99));

    let peeked = cache.peek(3);
    println!(
        "Peek(3): {}, Found: {}",
        peeked.unwrap_or_default(),
        peeked.is_some()
    );
    println!("Keys in cache: {:?}", cache.keys());

    match cache.resize(capacity.saturating_add(1)) {
        Ok(()) => println!("Resized to capacity: {}", cache.capacity()),
        Err(e) => println!("Resize error: {}", e),
    }

    cache.put(5, 5)?;
    println!("After Put(5, 5) - Cache: {}", cache.to_json()?);
    println!("Remove(4): {}", cache.remove(4));

    cache.clear();
    println!("After Clear - Size: {}", cache.len());

    if cache.metrics_enabled() {
        let stats = cache.stats();
        println!(
            "Stats: hits={}, misses={}, evictions={}, hit_rate={:.2}",
            stats.hits,
            stats.misses,
            stats.evictions,
            stats.hit_rate()
        );
    }

    println!();
    println!("=== Demo Complete ===");
    Ok(())
}

fn put_and_show(cache: &LruCache, key: i64, value: i64) -> anyhow::Result<()> {
    cache
        .put(key, value)
        .with_context(|| format!("Put({}, {}) failed", key, value))?;
    println!("Put({}, {}) - Cache: {}", key, value, cache.to_json()?);
    Ok(())
}

fn show_get(cache: &LruCache, key: i64) {
    let value = cache.get(key);
    println!(
        "Get({}): {}, Found: {}",
        key,
        value.unwrap_or_default(),
        value.is_some()
    );
}
