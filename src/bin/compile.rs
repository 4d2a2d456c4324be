//! hostlist-compiler: CLI tool for compiling DNS blocklists.

use clap::{Parser, Subcommand};
use hostlist_compiler::source::{read_source_list, split_lines, write_lines};
use hostlist_compiler::{
    compile_sources, dedupe_sources, CompilerConfig, HttpFetcher, Pipeline, SourceFetcher,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hostlist-compiler")]
#[command(version)]
#[command(about = "Compile DNS blocklists from adblock-style and /etc/hosts sources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every source in a list and compile them into one blocklist
    Compile {
        /// File with one source URL or path per line
        #[arg(short, long, default_value = "list.txt")]
        input: PathBuf,

        /// Output file for the combined rules
        #[arg(short, long, default_value = "outfile.txt")]
        output: PathBuf,

        /// YAML config with extra sources, exclusions and timeout
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the pipeline over a single local rules file
    Transform {
        /// Rules file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            input,
            output,
            config,
            verbose,
        } => {
            init_logging(verbose);
            compile(&input, &output, config.as_deref())
        }
        Commands::Transform {
            input,
            output,
            verbose,
        } => {
            init_logging(verbose);
            transform(&input, &output)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn compile(input: &Path, output: &Path, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => CompilerConfig::from_file(path)?,
        None => CompilerConfig::default(),
    };

    let mut sources = if config.sources.is_empty() || input.exists() {
        read_source_list(input)?
    } else {
        Vec::new()
    };
    sources.extend(config.sources.iter().cloned());
    let sources = dedupe_sources(sources);

    if let Some(name) = &config.name {
        log::info!("Compiling {} from {} sources", name, sources.len());
    }

    let fetcher = HttpFetcher::with_timeout(config.timeout())?;
    let pipeline = Pipeline::with_exclusions(config.exclusion_wildcards()?);
    let rules = compile_sources(&sources, &fetcher, &pipeline)?;

    write_lines(output, &rules)?;
    println!("Wrote {} rules to {}", rules.len(), output.display());
    Ok(())
}

fn transform(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = HttpFetcher::new()?;
    let input_str = input.to_str().ok_or("input path is not valid UTF-8")?;
    let content = fetcher.fetch(input_str)?;

    let rules = Pipeline::new().run(split_lines(&content).collect());

    write_lines(output, &rules)?;
    println!("Wrote {} rules to {}", rules.len(), output.display());
    Ok(())
}
