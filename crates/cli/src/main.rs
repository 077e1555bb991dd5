mod cmd;
mod logging;
mod prompt;

use clap::{Args, Parser};
use cmd::fill::TemplateSource;
use coverletter_core::config::loader::{ConfigLoader, default_config_path};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "coverletter",
    version,
    about = "Fill ${var} text templates from the command line"
)]
struct Cli {
    /// Save the filled document as a PDF in the current directory
    #[arg(short, long)]
    pdf: bool,

    #[command(flatten)]
    source: SourceArgs,

    /// Config file (defaults to $XDG_CONFIG_HOME/coverletter/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Template database to use instead of the configured one
    #[arg(long)]
    db: Option<PathBuf>,
}

#[derive(Debug, Args)]
#[group(multiple = false)]
struct SourceArgs {
    /// Name of a stored template
    #[arg(short, long)]
    name: Option<String>,

    /// Path to a template text file
    #[arg(long)]
    path: Option<PathBuf>,

    /// Path of a text file to add to the store before filling it
    #[arg(short, long)]
    add: Option<PathBuf>,

    /// Name of a stored template to delete
    #[arg(short, long)]
    delete: Option<String>,
}

enum Action {
    Fill(TemplateSource),
    Delete(String),
}

impl SourceArgs {
    fn into_action(self) -> Option<Action> {
        if let Some(name) = self.delete {
            Some(Action::Delete(name))
        } else if let Some(path) = self.add {
            Some(Action::Fill(TemplateSource::Add(path)))
        } else if let Some(name) = self.name {
            Some(Action::Fill(TemplateSource::Name(name)))
        } else {
            self.path.map(|path| Action::Fill(TemplateSource::Path(path)))
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    let mut cfg = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL coverletter");
            println!("{e}");
            if cli.config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            return ExitCode::FAILURE;
        }
    };
    if let Some(db) = cli.db {
        cfg.store_path = db;
    }

    let logs = match logging::init(&cfg.logging) {
        Ok(logs) => logs,
        Err(e) => {
            println!("FAIL coverletter");
            println!("{e}");
            return ExitCode::FAILURE;
        }
    };
    debug!(config = ?cfg.source, store = %cfg.store_path.display(), "resolved config");

    // Interrupting a prompt is a normal way to leave.
    let on_interrupt = logs.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        on_interrupt.flush();
        std::process::exit(0);
    }) {
        debug!("could not install interrupt handler: {e}");
    }

    let code = match cli.source.into_action() {
        Some(Action::Delete(name)) => cmd::delete::run(&cfg, &name),
        Some(Action::Fill(source)) => cmd::fill::run(&cfg, source, cli.pdf),
        None => {
            println!("Must specify either a stored template name or a path to a template file");
            ExitCode::FAILURE
        }
    };

    logs.flush();
    code
}
