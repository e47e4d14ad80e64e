use crate::prelude::*;
use clap::Parser;

mod error;
mod notion;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Download a Notion diary page and convert it to Markdown grouped by date"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(
        long,
        env = "NOTION_DIARY_VERBOSE",
        global = true,
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Download a page from the Notion API and save it as JSON and Markdown
    Download(crate::notion::download::DownloadOptions),

    /// Convert a saved Notion JSON file to Markdown
    Convert(crate::notion::convert::ConvertOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Download(options) => crate::notion::download::handler(options, app.global).await,
        SubCommands::Convert(options) => crate::notion::convert::handler(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
