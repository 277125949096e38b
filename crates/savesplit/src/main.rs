use clap::Parser;
use savesplit::{Args, default_data_dir, init_logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let report = run(&args)?;
    print!("{report}");

    tracing::info!("done");
    Ok(())
}
