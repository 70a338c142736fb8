//! `ytbatch probe` – classify links without downloading.

use anyhow::Result;

use ytbatch_core::classify::{self, ShapeCache};
use ytbatch_core::config::YtbatchConfig;
use ytbatch_core::engine::YtDlp;
use ytbatch_core::url_model::Link;

pub async fn run_probe(cfg: &YtbatchConfig, urls: &[String]) -> Result<()> {
    let engine = YtDlp::locate(&cfg.engine)?;
    let cache = ShapeCache::new();

    for raw in urls {
        match Link::parse(raw) {
            Some(link) => {
                let shape = classify::classify(&engine, &cache, &link).await;
                println!("{:<10} {link}", shape.label());
            }
            None => println!("{:<10} {raw}", "rejected"),
        }
    }

    Ok(())
}
