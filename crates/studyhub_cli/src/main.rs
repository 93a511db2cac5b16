//! `studyhub` command-line probe.
//!
//! # Responsibility
//! - Run portal form validation and YouTube parsing from a shell.
//! - Print machine-readable JSON so results can be diffed in scripts.

use clap::{Parser, Subcommand};
use log::info;
use serde_json::{json, Value};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use studyhub_core::{
    extract_video_id, init_from_config, youtube, ContactInput, FieldErrors, PdfFile, PdfInput,
    PortalConfig, SignInInput, SignUpInput, SubjectInput, Validate, VideoInput,
};

#[derive(Parser)]
#[command(name = "studyhub")]
#[command(about = "Inspect StudyHub form validation and link parsing", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON config file; enables file logging when it sets `log_dir`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the video identifier contained in a YouTube URL
    YoutubeId { url: String },
    /// Validate one form and print the accepted payload or field errors
    Check {
        #[command(subcommand)]
        form: FormCommand,
    },
    /// Validate a config file and print the effective settings
    Config { path: PathBuf },
}

#[derive(Subcommand)]
enum FormCommand {
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    SignUp {
        #[arg(long, default_value = "")]
        full_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    SignIn {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    Subject {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Pdf {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "")]
        subject_id: String,
        /// PDF file to check
        #[arg(long)]
        file: Option<PathBuf>,
        /// Declared media type; guessed from the file name when omitted
        #[arg(long)]
        content_type: Option<String>,
    },
    Video {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "")]
        subject_id: String,
        #[arg(long, default_value = "")]
        youtube_url: String,
    },
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = cli.config.as_deref() {
        let config = PortalConfig::load(path)?;
        if init_from_config(&config)? {
            info!("event=cli_start module=cli status=ok");
        }
    }

    let (report, accepted) = match cli.command {
        Command::YoutubeId { url } => youtube_report(&url),
        Command::Check { form } => check_form(form)?,
        Command::Config { path } => config_report(&path),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn youtube_report(url: &str) -> (Value, bool) {
    match extract_video_id(url) {
        Some(video_id) => (
            json!({
                "status": "ok",
                "video_id": video_id,
                "embed_url": youtube::embed_url(video_id),
            }),
            true,
        ),
        None => (
            json!({ "status": "invalid", "message": "Invalid YouTube URL" }),
            false,
        ),
    }
}

fn config_report(path: &Path) -> (Value, bool) {
    match PortalConfig::load(path) {
        Ok(config) => (json!({ "status": "ok", "config": config }), true),
        Err(err) => (
            json!({ "status": "invalid", "message": err.to_string() }),
            false,
        ),
    }
}

fn check_form(form: FormCommand) -> Result<(Value, bool), Box<dyn Error>> {
    let outcome = match form {
        FormCommand::Contact {
            name,
            email,
            message,
        } => ContactInput {
            name,
            email,
            message,
        }
        .validate()
        .map(|accepted| json!(accepted)),
        FormCommand::SignUp {
            full_name,
            email,
            password,
        } => SignUpInput {
            full_name,
            email,
            password,
        }
        .validate()
        .map(|accepted| json!({ "full_name": accepted.full_name, "email": accepted.email })),
        FormCommand::SignIn { email, password } => SignInInput { email, password }
            .validate()
            .map(|accepted| json!({ "email": accepted.email })),
        FormCommand::Subject { name, description } => SubjectInput { name, description }
            .validate()
            .map(|accepted| json!(accepted)),
        FormCommand::Pdf {
            title,
            description,
            subject_id,
            file,
            content_type,
        } => {
            let file = file.map(|path| read_pdf(&path, content_type)).transpose()?;
            PdfInput {
                title,
                description,
                subject_id,
                file,
            }
            .validate()
            .map(|accepted| json!(accepted))
        }
        FormCommand::Video {
            title,
            description,
            subject_id,
            youtube_url,
        } => VideoInput {
            title,
            description,
            subject_id,
            youtube_url,
        }
        .validate()
        .map(|accepted| {
            let video_id = extract_video_id(&accepted.youtube_url).map(str::to_string);
            json!({ "video": accepted, "video_id": video_id })
        }),
    };

    Ok(match outcome {
        Ok(accepted) => (json!({ "status": "ok", "accepted": accepted }), true),
        Err(errors) => (invalid_report(&errors), false),
    })
}

fn invalid_report(errors: &FieldErrors) -> Value {
    json!({ "status": "invalid", "errors": errors })
}

fn read_pdf(path: &Path, content_type: Option<String>) -> Result<PdfFile, Box<dyn Error>> {
    let bytes = std::fs::read(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut file = PdfFile::new(file_name, bytes);
    file.content_type = content_type;
    Ok(file)
}
