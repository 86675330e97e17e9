//! Synset batch runner
//!
//! Reads a query batch from stdin and writes the batch output document to
//! stdout. Input is either a bare list or an object with a `compare` pair:
//!
//! ```text
//! [{"word": "dogs", "pos": "n"}, {"word": "cat", "pos": "n"}]
//! {"queries": [...], "compare": [0, 1]}
//! ```
//!
//! Configuration comes from the environment (or a `.env` file):
//!   LEXIGRAPH_LEXICON_PATH=models/wordnet_full.bin synset_batch < queries.json

use std::io::{self, Read, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use lexigraph::{BatchRequest, EngineConfig, SynsetQueryService, SynsetQueryServiceImpl};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = EngineConfig::from_env().context("Invalid engine configuration")?;
    let lexicon = config.load_lexicon()?;
    tracing::info!(
        synsets = lexicon.synsets().len(),
        digest = lexicon.digest().unwrap_or("-"),
        "lexicon ready"
    );

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read query batch from stdin")?;
    let request: BatchRequest =
        serde_json::from_str(&input).context("Failed to parse query batch")?;
    let (queries, pair) = request.into_parts();

    let service = SynsetQueryServiceImpl::from_config(Arc::new(lexicon), &config);
    let output = service.run_batch_with_relation(&queries, pair);

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output).context("Failed to write batch output")?;
    writeln!(stdout)?;
    Ok(())
}
