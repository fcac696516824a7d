mod command;
mod presenter;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use form_builder::{BuilderError, BuilderSession};
use form_spec::{FileStore, RenderPayload, render_json_ui, render_text, storage_schema};

use command::{CliFieldKind, ShellCommand};
use presenter::{ShellPresenter, Verbosity};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Dynamic form builder CLI",
    long_about = "Builds form schemas interactively, persists every change to a durable store, and collects entered values"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive builder shell over the stored schema.
    Edit {
        /// Directory holding the durable store (defaults to DYNFORM_STORE_DIR or the current directory).
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,
        /// Show verbose output (status lines, parse expectations).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Also emit collected values as pretty JSON on submit.
        #[arg(long)]
        values_json: bool,
        /// Render output mode for the form display.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Render the stored schema once.
    Show {
        /// Directory holding the durable store.
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Append one field to the stored schema.
    Add {
        /// Directory holding the durable store.
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,
        /// Display label of the new field.
        #[arg(long)]
        label: String,
        /// Hint text; ignored for radio fields.
        #[arg(long, default_value = "")]
        placeholder: String,
        #[arg(long, value_enum, default_value_t = CliFieldKind::Text)]
        kind: CliFieldKind,
    },
    /// Print the JSON Schema of the persisted schema document.
    StorageSchema,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Edit {
            store,
            verbose,
            values_json,
            format,
        } => run_edit(store, verbose, values_json, format),
        Command::Show { store, format } => run_show(store, format),
        Command::Add {
            store,
            label,
            placeholder,
            kind,
        } => run_add(store, label, placeholder, kind),
        Command::StorageSchema => run_storage_schema(),
    }
}

fn resolve_store_dir(dir: Option<PathBuf>) -> CliResult<PathBuf> {
    let candidate = match dir {
        Some(path) => path,
        None => env::var_os("DYNFORM_STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    if candidate.as_os_str().is_empty() {
        return Err("store directory cannot be empty".into());
    }
    Ok(candidate)
}

fn open_session(dir: Option<PathBuf>) -> CliResult<BuilderSession> {
    let root = resolve_store_dir(dir)?;
    Ok(BuilderSession::open(Box::new(FileStore::new(root)))?)
}

fn print_screen(mode: RenderMode, payload: &RenderPayload) {
    match mode {
        RenderMode::Text => println!("{}", render_text(payload)),
        RenderMode::Json => println!("{}", render_json_ui(payload)),
    }
}

/// Renders the form, then drains the deferred focus request so the view
/// reacts after the render pass, not before.
fn render_pass(mode: RenderMode, session: &mut BuilderSession, presenter: &ShellPresenter) {
    let payload = session.render_payload();
    print_screen(mode, &payload);
    presenter.show_status(&payload);
    if let Some(index) = session.take_pending_focus() {
        presenter.show_focus(index);
    }
}

/// Surfaces recoverable errors as notices; storage failures abort the
/// session.
fn report(presenter: &ShellPresenter, result: Result<(), BuilderError>) -> CliResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(BuilderError::EmptyLabel) => {
            presenter.show_notice("Please provide a label.");
            Ok(false)
        }
        Err(BuilderError::Schema(err)) => {
            presenter.show_notice(&err.to_string());
            Ok(false)
        }
        Err(BuilderError::Store(err)) => Err(err.into()),
    }
}

fn run_show(store: Option<PathBuf>, format: RenderMode) -> CliResult<()> {
    let session = open_session(store)?;
    print_screen(format, &session.render_payload());
    Ok(())
}

fn run_add(
    store: Option<PathBuf>,
    label: String,
    placeholder: String,
    kind: CliFieldKind,
) -> CliResult<()> {
    let mut session = open_session(store)?;
    let index = session.add_field(&label, &placeholder, kind.into())?;
    let key = session.schema().field(index)?.key.clone();
    println!("Added field '{}' as {} at row {}", label, key, index);
    Ok(())
}

fn run_storage_schema() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&storage_schema())?);
    Ok(())
}

fn run_edit(
    store: Option<PathBuf>,
    verbose: bool,
    values_json: bool,
    format: RenderMode,
) -> CliResult<()> {
    let mut session = open_session(store)?;
    let mut presenter = ShellPresenter::new(Verbosity::from_verbose(verbose), values_json);
    presenter.show_header();
    render_pass(format, &mut session, &presenter);

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        // While an inline edit is open, plain lines are keystrokes into
        // the edit buffer; only submit and quit keep their meaning.
        if session.is_editing() {
            match line {
                "quit" | "exit" => break,
                "submit" => {
                    if report(&presenter, session.commit_field_edit())? {
                        render_pass(format, &mut session, &presenter);
                    }
                }
                _ => {
                    session.edit_keystroke(line);
                    render_pass(format, &mut session, &presenter);
                }
            }
            continue;
        }

        let parsed = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(err) => {
                presenter.show_parse_error(&err);
                continue;
            }
        };

        match parsed {
            ShellCommand::Quit => break,
            ShellCommand::Help => presenter.show_help(),
            ShellCommand::Show => render_pass(format, &mut session, &presenter),
            ShellCommand::Submit => presenter.show_completion(session.submit_form_values()),
            ShellCommand::Add {
                label,
                placeholder,
                kind,
            } => {
                session.set_draft_label(&label);
                session.set_draft_placeholder(&placeholder);
                session.set_draft_kind(kind.into());
                let result = session.add_field_from_draft().map(|_| ());
                if report(&presenter, result)? {
                    render_pass(format, &mut session, &presenter);
                }
            }
            ShellCommand::Label(index) => {
                if report(&presenter, session.begin_label_edit(index))? {
                    render_pass(format, &mut session, &presenter);
                }
            }
            ShellCommand::Placeholder(index) => {
                if report(&presenter, session.begin_placeholder_edit(index))? {
                    render_pass(format, &mut session, &presenter);
                }
            }
            ShellCommand::Menu(index) => {
                session.toggle_menu(index);
                render_pass(format, &mut session, &presenter);
            }
            ShellCommand::Delete(index) => {
                if report(&presenter, session.delete_field(index))? {
                    render_pass(format, &mut session, &presenter);
                }
            }
            ShellCommand::Move { from, to } => {
                session.drag_start(from);
                if report(&presenter, session.drop_on(to))? {
                    render_pass(format, &mut session, &presenter);
                }
            }
            ShellCommand::Fill { index, value } => {
                let key = match session.schema().field(index) {
                    Ok(field) => Some(field.key.clone()),
                    Err(err) => {
                        presenter.show_notice(&err.to_string());
                        None
                    }
                };
                if let Some(key) = key {
                    session.record_value(&key, &value);
                    render_pass(format, &mut session, &presenter);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use serde_json::Value;
    use std::fs;
    use std::path::Path;

    fn stored_blob(store: &Path) -> Value {
        let blob = fs::read_to_string(store.join("dynamicJson.json")).expect("stored blob");
        serde_json::from_str(&blob).expect("blob is json")
    }

    #[test]
    fn resolve_store_dir_rejects_empty_paths() {
        assert!(resolve_store_dir(Some(PathBuf::new())).is_err());
        let resolved = resolve_store_dir(Some(PathBuf::from("/tmp/forms"))).expect("resolve");
        assert_eq!(resolved, PathBuf::from("/tmp/forms"));
    }

    #[test]
    fn edit_shell_add_persists_the_field() -> CliResult<()> {
        let workspace = assert_fs::TempDir::new()?;
        let store = workspace.path().join("store");

        let mut cmd = Command::cargo_bin("dynform")?;
        cmd.arg("edit")
            .arg("--store")
            .arg(&store)
            .write_stdin("add Phone | Enter phone | text\nquit\n")
            .assert()
            .success();

        let fields = stored_blob(&store);
        let entries = fields.as_array().expect("array");
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3]["key"], "new_field_4");
        assert_eq!(entries[3]["label"], "Phone");
        assert_eq!(entries[3]["placeholder"], "Enter phone");
        assert_eq!(entries[3]["type"], "text");
        Ok(())
    }

    #[test]
    fn edit_shell_relabels_through_the_submachine() -> CliResult<()> {
        let workspace = assert_fs::TempDir::new()?;
        let store = workspace.path().join("store");

        let mut cmd = Command::cargo_bin("dynform")?;
        cmd.arg("edit")
            .arg("--store")
            .arg(&store)
            .write_stdin("label 1\nMiddle\nsubmit\nquit\n")
            .assert()
            .success();

        let fields = stored_blob(&store);
        assert_eq!(fields[1]["label"], "Middle");
        assert_eq!(fields[1]["key"], "middle_name");
        Ok(())
    }

    #[test]
    fn edit_shell_survives_a_blank_label() -> CliResult<()> {
        let workspace = assert_fs::TempDir::new()?;
        let store = workspace.path().join("store");

        let mut cmd = Command::cargo_bin("dynform")?;
        let output = cmd
            .arg("edit")
            .arg("--store")
            .arg(&store)
            .write_stdin("add  | x | text\nquit\n")
            .output()?;
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Please provide a label."));

        // The rejected add never reached the store.
        assert!(!store.join("dynamicJson.json").exists());
        Ok(())
    }

    #[test]
    fn show_renders_the_default_schema_without_writing() -> CliResult<()> {
        let workspace = assert_fs::TempDir::new()?;
        let store = workspace.path().join("store");

        let mut cmd = Command::cargo_bin("dynform")?;
        let output = cmd
            .arg("show")
            .arg("--store")
            .arg(&store)
            .arg("--format")
            .arg("json")
            .output()?;
        assert!(output.status.success());

        let ui: Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(ui["field_count"], 3);
        assert_eq!(ui["rows"][0]["key"], "first_name");
        assert_eq!(ui["rows"][0]["type"], "text");
        assert!(!store.exists());
        Ok(())
    }

    #[test]
    fn add_subcommand_appends_to_the_store() -> CliResult<()> {
        let workspace = assert_fs::TempDir::new()?;
        let store = workspace.path().join("store");

        let mut cmd = Command::cargo_bin("dynform")?;
        cmd.arg("add")
            .arg("--store")
            .arg(&store)
            .arg("--label")
            .arg("Gender")
            .arg("--placeholder")
            .arg("ignored for radio")
            .arg("--kind")
            .arg("radio")
            .assert()
            .success();

        let fields = stored_blob(&store);
        let entries = fields.as_array().expect("array");
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3]["type"], "radio");
        assert_eq!(entries[3]["placeholder"], "");
        Ok(())
    }

    #[test]
    fn add_subcommand_resolves_the_store_from_the_environment() -> CliResult<()> {
        let workspace = assert_fs::TempDir::new()?;
        let store = workspace.path().join("env-store");

        let mut cmd = Command::cargo_bin("dynform")?;
        cmd.env("DYNFORM_STORE_DIR", &store)
            .arg("add")
            .arg("--label")
            .arg("Phone")
            .assert()
            .success();

        let fields = stored_blob(&store);
        assert_eq!(fields.as_array().expect("array").len(), 4);
        Ok(())
    }

    #[test]
    fn storage_schema_emits_json() -> CliResult<()> {
        let mut cmd = Command::cargo_bin("dynform")?;
        let output = cmd.arg("storage-schema").output()?;
        assert!(output.status.success());
        let schema: Value = serde_json::from_slice(&output.stdout)?;
        assert!(schema.is_object());
        Ok(())
    }
}
