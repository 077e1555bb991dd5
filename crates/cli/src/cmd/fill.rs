//! Fill a template and export the result.
//!
//! The run goes: pick the source, extract its variables, prompt for each one,
//! substitute, optionally write a PDF, then copy to the clipboard.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use coverletter_core::config::types::ResolvedConfig;
use coverletter_core::export::{
    ClipboardError, PdfError, SELECTION_ENDS_WITH_PROCESS, copy_to_clipboard, write_pdf,
};
use coverletter_core::store::{StoreError, TemplateStore};
use coverletter_core::templates::{
    FilledDocument, SourceError, extract_variables, fill, read_template_file,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{open_store, report_store_error};
use crate::prompt::{self, PromptError, Prompter};

/// Where the template text comes from.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// A template already in the store.
    Name(String),
    /// A file on disk, used as-is.
    Path(PathBuf),
    /// A file on disk that is first saved to the store.
    Add(PathBuf),
}

/// How a run ended, when it did not fail.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Completed,
    Declined,
    NotFound(String),
}

#[derive(Debug, Error)]
enum FillError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Pdf(#[from] PdfError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

pub fn run(cfg: &ResolvedConfig, source: TemplateSource, pdf: bool) -> ExitCode {
    debug!(?source, pdf, "Running fill");
    let mut prompter = prompt::for_session();

    match execute(cfg, source, pdf, prompter.as_mut()) {
        Ok(Outcome::Completed) | Ok(Outcome::Declined) => ExitCode::SUCCESS,
        Ok(Outcome::NotFound(name)) => {
            println!("Could not find template with that name: {name}");
            ExitCode::SUCCESS
        }
        Err(FillError::Prompt(PromptError::Cancelled)) => {
            println!();
            debug!("input ended, stopping");
            ExitCode::SUCCESS
        }
        Err(FillError::Store(e)) => {
            println!("FAIL coverletter");
            report_store_error(&e);
            ExitCode::FAILURE
        }
        Err(e) => {
            println!("FAIL coverletter");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(
    cfg: &ResolvedConfig,
    source: TemplateSource,
    mut pdf: bool,
    prompter: &mut dyn Prompter,
) -> Result<Outcome, FillError> {
    let (base_name, template) = match source {
        TemplateSource::Name(name) => {
            let store = open_store(cfg)?;
            match store.find_by_name(&name)? {
                Some(found) => (found.name, found.template),
                None => return Ok(Outcome::NotFound(name)),
            }
        }
        TemplateSource::Path(path) => {
            let text = read_template_file(&path)?;
            (file_base_name(&path), text)
        }
        TemplateSource::Add(path) => {
            let text = read_template_file(&path)?;
            let store = open_store(cfg)?;
            let name = add_to_store(&store, &text, prompter)?;

            if !prompt::confirm(prompter, "Generate a cover letter from this template?")? {
                return Ok(Outcome::Declined);
            }
            if !pdf {
                pdf = prompt::confirm(prompter, "Export a pdf?")?;
            }
            (name, text)
        }
    };

    let filled = fill_template(&template, prompter)?;

    if pdf {
        let default = default_pdf_stem(&base_name, Local::now().date_naive());
        let answer = prompter.ask("Enter pdf filename", Some(default.as_str()))?;
        let file = pdf_file_name(&answer, &default);
        write_pdf(&filled, Path::new(&file), &cfg.pdf)?;
        info!(file = %file, "wrote pdf");
        println!("PDF saved: {file}");
    }

    match copy_to_clipboard(filled.as_str()) {
        Ok(()) => {
            println!("Content saved to clipboard.");
            if SELECTION_ENDS_WITH_PROCESS {
                println!(
                    "(Without a clipboard manager running, the copy lasts only while coverletter runs.)"
                );
            }
        }
        Err(e) => {
            warn!(error = %e, "clipboard copy failed");
            eprintln!("{}", clipboard_warning(&e));
        }
    }

    Ok(Outcome::Completed)
}

/// Save `text` under a name chosen by the user, re-asking on conflicts.
fn add_to_store(
    store: &dyn TemplateStore,
    text: &str,
    prompter: &mut dyn Prompter,
) -> Result<String, FillError> {
    let default_name = format!("template_{}", store.count()? + 1);

    loop {
        let answer = prompter.ask("Name of template", Some(default_name.as_str()))?;
        let name = match answer.trim() {
            "" => default_name.clone(),
            trimmed => trimmed.to_string(),
        };

        match store.insert(&name, text) {
            Ok(()) => {
                println!("Saved template '{name}'.");
                return Ok(name);
            }
            Err(StoreError::NameConflict(_)) => {
                println!(
                    "There is already a template with that name in the database. Please choose another."
                );
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Prompt for every variable in `template` and substitute the answers.
fn fill_template(
    template: &str,
    prompter: &mut dyn Prompter,
) -> Result<FilledDocument, PromptError> {
    let variables = extract_variables(template);
    debug!(count = variables.len(), "extracted template variables");
    let values = prompt::collect_values(prompter, &variables)?;
    Ok(fill(template, &values))
}

/// One warning for every clipboard failure, whatever its kind.
fn clipboard_warning(e: &ClipboardError) -> String {
    format!("Warning: could not save content to clipboard: {e}")
}

fn file_base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "template".to_string())
}

/// `<base>_MM_DD_YYYY`, the filename offered when exporting a PDF.
fn default_pdf_stem(base: &str, date: NaiveDate) -> String {
    format!("{base}{}", date.format("_%m_%d_%Y"))
}

fn pdf_file_name(answer: &str, default: &str) -> String {
    let stem = match answer.trim() {
        "" => default,
        trimmed => trimmed,
    };
    if stem.to_lowercase().ends_with(".pdf") {
        stem.to_string()
    } else {
        format!("{stem}.pdf")
    }
}
