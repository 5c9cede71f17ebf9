// crates/htforge-cli/src/main.rs
// ============================================================================
// Module: htforge CLI Entry Point
// Description: Command dispatcher for building and inspecting .htaccess output.
// Purpose: Provide a localized CLI around the htforge build hook.
// Dependencies: clap, htforge-config, htforge-core, serde_json, thiserror.
// ============================================================================

//! ## Overview
//! The htforge CLI loads an options file, overlays the documented defaults and
//! runs the build hook through an [`ImmediateHost`]. Auxiliary commands check
//! options, print rendered content, detect drift against the file on disk and
//! print the options schema, example, and defaults. All user-facing strings
//! are routed through the i18n catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use htforge_cli::i18n::Locale;
use htforge_cli::i18n::set_locale;
use htforge_cli::t;
use htforge_config::LoadedOptions;
use htforge_config::Recognizers;
use htforge_config::default_options_value;
use htforge_config::load_raw_options;
use htforge_config::merge_defaults;
use htforge_config::options_schema;
use htforge_config::options_toml_example;
use htforge_config::validate_options;
use htforge_core::BuildObserver;
use htforge_core::BuildOutcome;
use htforge_core::DEFAULT_OUTPUT_PATH;
use htforge_core::FileArtifactWriter;
use htforge_core::FileBuildObserver;
use htforge_core::HtaccessPlugin;
use htforge_core::ImmediateHost;
use htforge_core::NoopBuildObserver;
use htforge_core::PluginContext;
use htforge_core::StderrBuildObserver;
use htforge_core::StderrDiagnosticSink;
use htforge_core::render_content;
use htforge_core::verify_rendered;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "HTFORGE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "htforge", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `HTFORGE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate options, render, and write the .htaccess file.
    Build(BuildCommand),
    /// Validate options without rendering.
    Check(OptionsArgs),
    /// Print the rendered content without writing it.
    Render(OptionsArgs),
    /// Fail when the file on disk differs from the rendered content.
    Verify(VerifyCommand),
    /// Print the JSON schema for the options file.
    Schema,
    /// Print a canonical example options file.
    Example,
    /// Print the documented default options as JSON.
    Defaults,
}

/// Options file selection shared by several commands.
#[derive(Args, Debug)]
struct OptionsArgs {
    /// Optional options file path (defaults to htforge.toml or `HTFORGE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `build`.
#[derive(Args, Debug)]
struct BuildCommand {
    /// Options file selection.
    #[command(flatten)]
    options: OptionsArgs,
    /// Output path for the rendered file.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Append build events as JSON lines to this file.
    #[arg(long, value_name = "PATH", conflicts_with = "trace")]
    events: Option<PathBuf>,
    /// Print build events as JSON lines on stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    trace: bool,
    /// Exit with a failure code when the options are rejected.
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
}

/// Arguments for `verify`.
#[derive(Args, Debug)]
struct VerifyCommand {
    /// Options file selection.
    #[command(flatten)]
    options: OptionsArgs,
    /// Path of the rendered file to compare.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

/// Converts CLI language selections into locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Build(command) => command_build(&command),
        Commands::Check(command) => command_check(&command),
        Commands::Render(command) => command_render(&command),
        Commands::Verify(command) => command_verify(&command),
        Commands::Schema => command_schema(),
        Commands::Example => command_example(),
        Commands::Defaults => command_defaults(),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Build Command
// ============================================================================

/// Executes the `build` command.
fn command_build(command: &BuildCommand) -> CliResult<ExitCode> {
    let loaded = load_options(command.options.config.as_deref())?;
    let observer = build_observer(command)?;
    let writer = FileArtifactWriter;
    let diagnostics = StderrDiagnosticSink;
    let context = PluginContext {
        recognizers: Recognizers::standard(),
        writer: &writer,
        observer: observer.as_ref(),
        diagnostics: &diagnostics,
    };
    let mut plugin =
        HtaccessPlugin::new(loaded.raw, context).with_output(output_path(command.output.as_deref()));
    let outcome = plugin
        .register(&mut ImmediateHost)
        .map_err(|err| CliError::new(t!("build.failed", error = err)))?;

    match &outcome {
        BuildOutcome::Written {
            path,
            bytes,
        } => {
            write_stdout_line(&t!("build.written", bytes = bytes, path = path.display()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        BuildOutcome::Skipped => {
            write_stdout_line(&t!("build.skipped", path = plugin.output().display()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        BuildOutcome::Failed(_) => {
            write_stderr_line(&t!("build.rejected", path = plugin.output().display()))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        }
    }

    if rejects_build(&outcome, command.strict) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Selects the event observer requested on the command line.
fn build_observer(command: &BuildCommand) -> CliResult<Box<dyn BuildObserver>> {
    if let Some(path) = &command.events {
        let observer = FileBuildObserver::new(path).map_err(|err| {
            CliError::new(t!("build.observer_failed", path = path.display(), error = err))
        })?;
        return Ok(Box::new(observer));
    }
    if command.trace {
        return Ok(Box::new(StderrBuildObserver));
    }
    Ok(Box::new(NoopBuildObserver))
}

/// Returns true when the outcome should fail the process.
///
/// Rejected options fail the process only in strict mode.
const fn rejects_build(outcome: &BuildOutcome, strict: bool) -> bool {
    strict && matches!(outcome, BuildOutcome::Failed(_))
}

// ============================================================================
// SECTION: Inspection Commands
// ============================================================================

/// Executes the `check` command.
fn command_check(command: &OptionsArgs) -> CliResult<ExitCode> {
    let loaded = load_options(command.config.as_deref())?;
    validate_options(&loaded.raw, &Recognizers::standard())
        .map_err(|err| invalid_options(&loaded.path, &err))?;
    write_stdout_line(&t!("check.ok")).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `render` command.
fn command_render(command: &OptionsArgs) -> CliResult<ExitCode> {
    let loaded = load_options(command.config.as_deref())?;
    let content = render_content(&loaded.raw, &Recognizers::standard())
        .map_err(|err| invalid_options(&loaded.path, &err))?;
    write_stdout_bytes(content.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `verify` command.
fn command_verify(command: &VerifyCommand) -> CliResult<ExitCode> {
    let loaded = load_options(command.options.config.as_deref())?;
    let content = render_content(&loaded.raw, &Recognizers::standard())
        .map_err(|err| invalid_options(&loaded.path, &err))?;
    let output = output_path(command.output.as_deref());
    verify_rendered(&output, &content)
        .map_err(|err| CliError::new(t!("verify.failed", error = err)))?;
    write_stdout_line(&t!("verify.ok", path = output.display()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `schema` command.
fn command_schema() -> CliResult<ExitCode> {
    write_json(&options_schema(), |err| t!("schema.serialize_failed", error = err))
}

/// Executes the `example` command.
fn command_example() -> CliResult<ExitCode> {
    write_stdout_bytes(options_toml_example().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `defaults` command.
fn command_defaults() -> CliResult<ExitCode> {
    write_json(&default_options_value(), |err| t!("defaults.serialize_failed", error = err))
}

// ============================================================================
// SECTION: Options Helpers
// ============================================================================

/// Loads the options file and overlays it on the documented defaults.
fn load_options(config: Option<&Path>) -> CliResult<LoadedOptions> {
    let LoadedOptions {
        path,
        raw,
    } = load_raw_options(config)
        .map_err(|err| CliError::new(t!("options.load_failed", error = err)))?;
    Ok(LoadedOptions {
        path,
        raw: merge_defaults(raw),
    })
}

/// Formats a validation failure for an options file.
fn invalid_options(path: &Path, error: &impl std::fmt::Display) -> CliError {
    CliError::new(t!("options.invalid", path = path.display(), error = error))
}

/// Resolves the output path, falling back to the default location.
fn output_path(output: Option<&Path>) -> PathBuf {
    output.map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH), Path::to_path_buf)
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the output locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes pretty-printed JSON followed by a newline to stdout.
fn write_json(
    value: &Value,
    on_error: impl FnOnce(serde_json::Error) -> String,
) -> CliResult<ExitCode> {
    let text = serde_json::to_string_pretty(value).map_err(|err| CliError::new(on_error(err)))?;
    write_stdout_line(&text).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
