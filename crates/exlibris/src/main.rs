//! Ex Libris command line driver.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use exlibris::library::catalog;
use exlibris::{ExistLibraryDao, ExlibrisConfig, LibraryReport, init_logging};
use exlibris_store::{ExistRestStore, QueryExecutor};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "exlibris", version)]
#[command(about = "Library records as XML document collections")]
struct Cli {
    #[command(flatten)]
    config: ExlibrisConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the sample catalog files, optionally uploading them.
    Create {
        /// Directory receiving libreria.xml, poemario.xml and ensayos.xml.
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Collection to upload the files under (e.g. /db/Libreria).
        #[arg(long)]
        upload_to: Option<String>,
    },

    /// Run the library queries and print the results.
    Query {
        /// Collection holding the Novelas, Poemas and Ensayos collections.
        #[arg(long, default_value = "/db/Libreria/")]
        base: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn create(config: &ExlibrisConfig, output_dir: &Path, upload_to: Option<&str>) -> anyhow::Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create output directory {}", output_dir.display()))?;

    let written = catalog::write_all(output_dir)?;
    info!(files = written.len(), dir = %output_dir.display(), "Catalog written");

    if let Some(target) = upload_to {
        let store = ExistRestStore::new(config.exist_config())?;
        let target = target.trim_end_matches('/');
        for entry in catalog::entries()? {
            let collection = format!("{target}/{}", entry.collection);
            store
                .put_document(&collection, entry.file_name, &entry.document)
                .with_context(|| format!("upload of {} failed", entry.file_name))?;
        }
        info!(target = %target, "Catalog uploaded");
    }

    Ok(())
}

fn query(config: &ExlibrisConfig, base: &str, json: bool) -> anyhow::Result<()> {
    let store = ExistRestStore::new(config.exist_config())?;
    let dao = ExistLibraryDao::new(QueryExecutor::new(store), base);

    info!(base = %base, url = %config.exist_url, "Querying library");
    let report = LibraryReport::collect(&dao);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.config.log_level);

    if let Err(errors) = cli.config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    match &cli.command {
        Command::Create {
            output_dir,
            upload_to,
        } => create(&cli.config, output_dir, upload_to.as_deref()),
        Command::Query { base, json } => query(&cli.config, base, *json),
    }
}
