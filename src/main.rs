use anyhow::Result;
use clap::Parser;
use retina_lib::app::{run, Args};

fn main() -> Result<()> {
    retina_core::init_logging();

    let args = Args::parse();
    let report = run(&args)?;
    println!("{}", report.to_json(args.pretty)?);
    Ok(())
}
