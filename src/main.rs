use anyhow::Result;
use clap::Parser;
use dev_bump::{
    arguments::Arguments,
    bumper::{Bumper, Outcome},
    project::Project,
    runner::SystemRunner,
};
use log::{LevelFilter, info};

fn main() -> Result<()> {
    let args = Arguments::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    pretty_env_logger::env_logger::builder()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let runner = SystemRunner;
    let project = Project::new(&args.path, &runner);

    match Bumper::new(&project, args.bump_options()).run()? {
        Outcome::Skipped => info!("Nothing to do"),
        Outcome::Released { version, tag } => info!("Released {} as {}", version, tag),
        Outcome::DevBumped { from, to, tag } => {
            info!("Bumped {} to {} and pushed {}", from, to, tag)
        }
    }

    Ok(())
}
