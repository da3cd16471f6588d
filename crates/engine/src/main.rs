//! Lorelink Engine - reference lookup from the command line.
//!
//! ```text
//! lorelink-engine <kind> <name> [source]
//! lorelink-engine text "<text with {@tags}>"
//! ```
//!
//! Prints the resolution as JSON on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lorelink_domain::{EntityKind, ReferenceLookup};
use lorelink_engine::infrastructure::settings::EngineConfig;
use lorelink_engine::App;

const USAGE: &str = "usage: lorelink-engine <kind> <name> [source] | lorelink-engine text \"<text>\"";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary is usually run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lorelink_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        anyhow::bail!(USAGE);
    }

    let config = EngineConfig::from_env()?;
    let app = App::from_config(config)?;
    app.warm_up().await;

    let resolver = &app.use_cases.reference;
    let output = if args[0] == "text" {
        let text = args[1..].join(" ");
        let resolved: Vec<_> = resolver
            .resolve_text(&text)
            .await
            .into_iter()
            .map(|(tag, result)| {
                serde_json::json!({
                    "tag": tag.raw_type,
                    "payload": tag.payload,
                    "result": result,
                })
            })
            .collect();
        serde_json::to_string_pretty(&resolved)?
    } else {
        let kind: EntityKind = args[0].parse()?;
        let mut lookup = ReferenceLookup::new(kind, args[1].as_str())?;
        if let Some(source) = args.get(2) {
            lookup = lookup.with_source(source.as_str());
        }
        let resolved = resolver.resolve(kind, &lookup.name, lookup.source.as_deref()).await?;
        serde_json::to_string_pretty(&resolved)?
    };

    println!("{}", output);
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
