use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use classifier_core::core::scoring::ClassScore;
use classifier_core::{corpus, evaluation};
use classifier_core::{MystemTokenizer, PlainTokenizer, Registry, RegistryConfig, Tokenizer};
use crossterm::style::Stylize;
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = "classifier", about = "Naive Bayes text classifiers kept in a data directory")]
struct Opt {
    /// JSON config file; flags below override it.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Directory holding one `<id>.bc` file per classifier.
    #[clap(long, env = "CLASSIFIER_DATA_PATH")]
    data_dir: Option<PathBuf>,

    /// mystem binary used for lemmatization. Plain word splitting when unset.
    #[clap(long, env = "MYSTEM_TOKENIZER_BIN_PATH")]
    mystem_bin: Option<PathBuf>,

    /// Fail on the first unreadable classifier file instead of skipping it.
    #[clap(long)]
    strict: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a JSON array of {class, text} documents to a classifier, creating it if needed.
    Train { id: String, docs: PathBuf },
    /// Print the most probable class for some text.
    Classify {
        id: String,
        #[clap(required = true)]
        text: Vec<String>,
        /// Also print every class score.
        #[clap(long)]
        scores: bool,
    },
    /// Classify labeled documents and report failure rates.
    Evaluate { id: String, docs: PathBuf },
    /// Show a classifier's classes and whether it is training.
    Status { id: String },
    /// Delete a classifier and its file.
    Remove { id: String },
    /// List known classifiers.
    List,
    /// Classify lines typed on stdin until `exit`.
    Repl { id: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::parse();

    let mut config = match &opt.config {
        Some(path) => RegistryConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!(e))
            .with_context(|| format!("read config {}", path.display()))?,
        None => RegistryConfig::default(),
    };
    if let Some(data_dir) = opt.data_dir {
        config.data_dir = data_dir;
    }
    config.strict_discovery |= opt.strict;

    let tokenizer: Arc<dyn Tokenizer> = match opt.mystem_bin {
        Some(bin) => {
            let mystem = MystemTokenizer::new(bin);
            tracing::info!(bin = %mystem.bin_path().display(), "using mystem tokenizer");
            Arc::new(mystem)
        }
        None => Arc::new(PlainTokenizer),
    };

    let registry = Registry::open(&config, tokenizer).context("open classifier registry")?;

    match opt.command {
        Command::Train { id, docs } => {
            let docs = corpus::load_documents(&docs)
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("load documents {}", docs.display()))?;
            corpus::log_stats(&docs);

            let resolved = registry.resolve(&id, true)?;
            let existed = resolved.existed_before();
            let Some(model) = resolved.into_model() else {
                bail!("classifier {id:?} could not be created");
            };
            let summary = model.train(&docs)?;
            println!(
                "{} {} documents, {} words, {} new classes{}",
                "trained".green(),
                summary.documents,
                summary.words_added,
                summary.new_classes,
                if existed { "" } else { " (new classifier)" }
            );
        }
        Command::Classify { id, text, scores } => {
            let model = registry.get(&id)?;
            let text = text.join(" ");
            if scores {
                print_scores(&model.scores(&text)?);
            }
            println!("{}", model.classify(&text)?);
        }
        Command::Evaluate { id, docs } => {
            let model = registry.get(&id)?;
            let docs = corpus::load_documents(&docs)
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("load documents {}", docs.display()))?;
            let report = evaluation::evaluate(&model, &docs)?;
            report.log();
            println!(
                "{} / {} misclassified ({:.2}%)",
                report.overall.errors,
                report.overall.total,
                report.overall.fail_rate()
            );
        }
        Command::Status { id } => {
            let model = registry.get(&id)?;
            println!("classifier: {}", model.id());
            println!("file:       {}", model.storage_path().display());
            println!("training:   {}", model.is_training());
            println!("classes:    {}", model.classes().join(", "));
        }
        Command::Remove { id } => {
            registry.remove(&id)?;
            println!("{} {id}", "removed".red());
        }
        Command::List => {
            for id in registry.ids() {
                println!("{id}");
            }
            for failed in &registry.discovery().failed {
                eprintln!("{} {}", "unreadable".yellow(), failed);
            }
        }
        Command::Repl { id } => repl(&registry, &id)?,
    }

    Ok(())
}

fn repl(registry: &Registry, id: &str) -> anyhow::Result<()> {
    let model = registry.get(id)?;

    println!("Classifier '{}' ({} classes). Type 'exit' to quit.", id, model.classes().len());
    println!("---------------------------------------------------------------");

    loop {
        print!("\n> ");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "exit" => break,
            "" => continue,
            text => match model.scores(text) {
                Ok(scores) => {
                    print_scores(&scores);
                    if let Some(best) = classifier_core::core::scoring::best(&scores) {
                        println!("=> {}", best.class.as_str().bold().green());
                    }
                }
                Err(err) => println!("{} {}", "error:".red(), err),
            },
        }
    }

    Ok(())
}

fn print_scores(scores: &[ClassScore]) {
    for score in scores {
        println!("  {:<24} {:>14.4}", score.class, score.score);
    }
}
