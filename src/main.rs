use anyhow::Context;
use clap::{Args, Parser as ClapParser, Subcommand};
use persian_text_cleaner::{dataset, PipelineConfig, TextField};
use std::path::PathBuf;
use std::time::Instant;

#[derive(ClapParser)]
#[command(
    author,
    version,
    about = "Persian social-media text cleaner for sentiment pipelines"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a CSV/TSV/JSONL dataset file or a directory of them.
    Clean {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        out: PathBuf,

        #[arg(long)]
        limit: Option<usize>,

        /// Write a JSON run report here.
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        opts: PipelineArgs,
    },
    /// Clean a single text value and print the result as JSON.
    Text {
        text: String,

        #[command(flatten)]
        opts: PipelineArgs,
    },
}

#[derive(Args)]
struct PipelineArgs {
    /// JSON pipeline config; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    primary_column: Option<String>,

    #[arg(long)]
    reply_column: Option<String>,

    /// Keep ASCII digits so they are remapped to Persian digits.
    #[arg(long)]
    latin_digits: bool,

    /// Admit Arabic Supplement and presentation forms before glyph folding.
    #[arg(long)]
    extended_script: bool,

    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Skip word-level normalization.
    #[arg(long)]
    passthrough: bool,
}

impl PipelineArgs {
    fn resolve(self) -> anyhow::Result<PipelineConfig> {
        let mut cfg = match &self.config {
            Some(path) => PipelineConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(col) = self.primary_column {
            cfg.columns.primary = col;
        }
        if let Some(col) = self.reply_column {
            cfg.columns.reply = col;
        }
        if self.lexicon.is_some() {
            cfg.lexicon = self.lexicon;
        }
        cfg.whitelist.latin_digits |= self.latin_digits;
        cfg.whitelist.extended_script |= self.extended_script;
        cfg.passthrough |= self.passthrough;
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            input,
            out,
            limit,
            report,
            opts,
        } => {
            let cfg = opts.resolve()?;
            let pipeline = cfg
                .build_pipeline()
                .context("building cleaning pipeline")?;
            log::debug!("pipeline: {:?}", pipeline.cleaner());

            println!("🚀 Starting cleaning run...");
            println!("📂 Input Path: {}", input.display());

            let start_time = Instant::now();
            let summary = dataset::clean_dataset(&input, &out, &pipeline, &cfg.columns, limit)
                .with_context(|| format!("cleaning {}", input.display()))?;
            let duration = start_time.elapsed();

            if let Some(path) = &report {
                summary
                    .save(path)
                    .with_context(|| format!("writing report {}", path.display()))?;
            }

            let separator = "=".repeat(40);
            println!("\n{}", separator);
            println!("✅ Cleaning completed successfully.");
            println!("⏱ Time Elapsed: {:.2?}", duration);
            println!("📄 Files: {}  Records: {}", summary.files, summary.records);
            println!(
                "🔗 Links: {}  #️⃣ Hashtags: {}  @ Mentions: {}",
                summary.links, summary.hashtags, summary.mentions
            );
            println!("🕳 Fields emptied by cleaning: {}", summary.emptied);
            println!("💾 Saved to: {}", out.display());
            println!("{}", separator);
        }
        Commands::Text { text, opts } => {
            let cfg = opts.resolve()?;
            let pipeline = cfg
                .build_pipeline()
                .context("building cleaning pipeline")?;
            let cleaned = pipeline.process_field(&TextField::from(text))?;
            println!("{}", serde_json::to_string_pretty(&cleaned)?);
        }
    }

    Ok(())
}
