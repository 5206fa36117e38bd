use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ldraw_bricklink::export::{output_path_for, write_bricklink};
use ldraw_bricklink::model::Mapping;
use ldraw_bricklink::parser::read_ldraw_file;

#[derive(Parser, Debug)]
#[command(name = "ldraw-bricklink")]
#[command(about = "Convert an LDraw model into a BrickLink XML inventory")]
#[command(version)]
struct Args {
    /// The input LDraw file
    #[arg(required = true)]
    ldraw: PathBuf,

    /// Split by submodel (not supported, ignored)
    #[arg(long)]
    split: bool,

    /// LDraw-BrickLink mapping document
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    if args.split {
        debug!("splitting by submodel is not supported, writing a single inventory");
    }

    println!("Reading LDraw file: {}", args.ldraw.display());
    let inventory = read_ldraw_file(&args.ldraw)?;
    println!("- Number of different elements: {}", inventory.distinct_count());
    println!("- Number of different colors: {}", inventory.colors().len());
    println!("- Number of different parts: {}", inventory.parts().len());
    println!("- Total number of elements: {}", inventory.total_count());

    let bricklink = output_path_for(&args.ldraw);
    println!("Writing BrickLink file: {}", bricklink.display());
    let mapping = args.map.as_ref().map(Mapping::from_path).transpose()?;
    write_bricklink(&bricklink, &inventory, mapping.as_ref())?;

    Ok(())
}
