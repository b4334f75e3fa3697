use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Print the description override of a repository")]
    Show {
        #[arg(value_name = "REPO_ID", help = "Repository id as listed by the directory")]
        id: String,
    },
    #[command(
        about = "Store a description override",
        long_about = "Store a description override for a repository. The text is trimmed; an empty text is kept as an explicit blank description."
    )]
    Set {
        #[arg(value_name = "REPO_ID", help = "Repository id as listed by the directory")]
        id: String,
        #[arg(value_name = "TEXT", help = "Override text")]
        text: String,
    },
    #[command(about = "Remove a description override (no-op when none exists)")]
    Clear {
        #[arg(value_name = "REPO_ID", help = "Repository id as listed by the directory")]
        id: String,
    },
    #[command(about = "Print every stored override as a JSON document")]
    Export,
}
