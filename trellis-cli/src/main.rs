use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use trellis_graph_ir::Term;
use trellis_pipeline::{PatternSpec, Pipeline};

#[derive(Parser)]
#[command(name = "trellis", about = "Normalize a JSON document into triples and query them")]
struct Args {
    /// JSON document to ingest; a built-in demo document is used when absent
    #[arg(long)]
    doc: Option<PathBuf>,

    /// Subject IRI for the document's triples (default: derived from @id or
    /// a generated blank node)
    #[arg(long)]
    subject: Option<String>,

    /// Triple pattern as three whitespace-separated positions,
    /// e.g. "?s <http://schema.org/name> ?o"
    #[arg(long, default_value = "?s ?p ?o")]
    pattern: String,

    /// Maximum number of bindings to print (0 = unrestricted)
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Print bindings as JSON objects instead of text
    #[arg(long)]
    json: bool,

    /// Suppress all logs
    #[arg(long)]
    quiet: bool,

    /// Show info-level logs for trellis crates
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(args: &Args) {
    // CLI tracing policy:
    //   --quiet  → always "off"
    //   --verbose → "debug" for trellis crates
    //   default  → "off"; RUST_LOG is honoured when set
    let filter = if args.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if args.verbose {
        tracing_subscriber::EnvFilter::new(
            "trellis_pipeline=debug,trellis_store=debug,trellis_query=debug,trellis_graph_json_ld=debug",
        )
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// The classic schema.org person document
fn demo_doc() -> serde_json::Value {
    serde_json::json!({
        "http://schema.org/name": "Manu Sporny",
        "http://schema.org/url": {"@id": "http://manu.sporny.org/"},
        "http://schema.org/image": {"@id": "http://manu.sporny.org/images/manu.png"}
    })
}

fn load_doc(args: &Args) -> anyhow::Result<serde_json::Value> {
    match &args.doc {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(demo_doc()),
    }
}

fn parse_pattern(input: &str) -> anyhow::Result<PatternSpec> {
    let positions: Vec<&str> = input.split_whitespace().collect();
    let [s, p, o] = positions.as_slice() else {
        bail!(
            "pattern must have exactly three positions, got {}: '{input}'",
            positions.len()
        );
    };
    Ok(PatternSpec::new(*s, *p, *o))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let doc = load_doc(&args)?;
    let pattern = parse_pattern(&args.pattern)?;

    let mut pipeline = Pipeline::new(doc, pattern).with_limit(args.limit);
    if let Some(subject) = &args.subject {
        pipeline = pipeline.with_subject(Term::iri(subject));
    }

    let bindings = pipeline.run().await?;

    let mut count = 0usize;
    for binding in bindings {
        if args.json {
            println!("{}", binding.to_json());
        } else {
            println!("{binding}");
        }
        count += 1;
    }

    info!(count, "query complete");
    Ok(())
}
