use crate::bumper::BumpOptions;
use crate::version::DEFAULT_DEV_SUFFIX;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, bin_name = "dev-bump")]
pub struct Arguments {
    /// Suffix placed before the development counter
    #[arg(
        long,
        short = 's',
        default_value = DEFAULT_DEV_SUFFIX,
        allow_hyphen_values = true
    )]
    pub dev_suffix: String,
    /// Message of the triggering commit; defaults to the HEAD commit message
    #[arg(long = "commit-msg", short = 'm')]
    pub commit_message: Option<String>,
    #[arg(long, short, default_value = "./")]
    pub path: String,
    /// Remote to fetch tags from and push to
    #[arg(long, short, default_value = "origin")]
    pub remote: String,
    #[arg(long, short)]
    pub verbose: bool,
}

impl Arguments {
    pub fn bump_options(&self) -> BumpOptions {
        BumpOptions {
            dev_suffix: self.dev_suffix.clone(),
            remote: self.remote.clone(),
            commit_message: self.commit_message.clone(),
        }
    }
}
