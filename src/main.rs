use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use apibeast::commands::{self, Context};
use apibeast::models::{find_template, HttpMethod, RequestForm};
use apibeast::utils::ExportFormat;
use apibeast::{logger, AppError, Config};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the APIBeast backend
    #[arg(long, global = true, env = "APIBEAST_API_URL")]
    api_url: Option<String>,

    /// Directory where saved suites are stored
    #[arg(long, global = true, env = "APIBEAST_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory where exports are written
    #[arg(long, global = true, env = "APIBEAST_EXPORT_DIR")]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate test cases for an endpoint
    Generate {
        #[command(flatten)]
        form: FormArgs,

        /// Write the generated tests to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate test cases and execute them right away
    Run {
        #[command(flatten)]
        form: FormArgs,

        /// Save the generated tests as a named suite
        #[arg(long)]
        save: Option<String>,

        /// Export the results: json, csv, postman or clipboard
        #[arg(short = 'x', long)]
        export: Option<ExportFormat>,
    },
    /// Execute a saved suite or a tests file
    Execute {
        /// Id of a saved suite
        #[arg(long, conflicts_with = "tests", required_unless_present = "tests")]
        suite: Option<u64>,

        /// JSON file written by `generate --output`
        #[arg(long)]
        tests: Option<PathBuf>,

        /// Request the tests file belongs to (used in reports)
        #[command(flatten)]
        form: FormArgs,

        /// Export the results: json, csv, postman or clipboard
        #[arg(short = 'x', long)]
        export: Option<ExportFormat>,
    },
    /// Manage saved suites
    Suites {
        #[command(subcommand)]
        action: SuiteAction,
    },
    /// List the built-in API templates
    Templates,
    /// Check that the backend is reachable
    Health,
}

#[derive(Subcommand)]
enum SuiteAction {
    /// List saved suites, newest first
    List,
    /// Show a suite and its tests
    Show { id: u64 },
    /// Delete a suite
    Delete { id: u64 },
}

/// Request form fields
#[derive(Args, Clone, Debug, Default)]
struct FormArgs {
    /// Endpoint to test
    #[arg(short, long)]
    endpoint: Option<String>,

    /// HTTP method: GET, POST, PUT, DELETE or PATCH
    #[arg(short, long)]
    method: Option<HttpMethod>,

    /// Headers as a JSON object
    #[arg(short = 'H', long)]
    headers: Option<String>,

    /// Request body (only sent for POST, PUT and PATCH)
    #[arg(short, long)]
    body: Option<String>,

    /// Start from a built-in template (see `templates`)
    #[arg(short, long)]
    template: Option<String>,
}

impl FormArgs {
    /// Construye el formulario: primero la plantilla, luego los flags
    fn into_form(self) -> Result<RequestForm, AppError> {
        let mut form = match &self.template {
            Some(id) => {
                let template = find_template(id)
                    .ok_or_else(|| AppError::validation(format!("Unknown template '{}'", id)))?;
                RequestForm::from_template(&template)
            }
            None => RequestForm::default(),
        };

        if let Some(endpoint) = self.endpoint {
            form.endpoint = endpoint;
        }
        if let Some(method) = self.method {
            form.method = method;
        }
        if let Some(headers) = self.headers {
            form.headers = headers;
        }
        if let Some(body) = self.body {
            form.body = body;
        }

        Ok(form)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init();

    // Cargar configuración; los flags tienen prioridad sobre el entorno
    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(dir) = cli.export_dir {
        config = config.with_export_dir(dir);
    }
    debug!(?config, "configuration loaded");

    let ctx = Context::new(config).context("failed to initialise the backend client")?;

    match cli.command {
        Some(Commands::Generate { form, output }) => {
            commands::generate_tests(&ctx, form.into_form()?, output.as_deref()).await?;
        }
        Some(Commands::Run { form, save, export }) => {
            commands::run_tests(&ctx, form.into_form()?, save, export).await?;
        }
        Some(Commands::Execute {
            suite,
            tests,
            form,
            export,
        }) => match (suite, tests) {
            (Some(id), _) => {
                commands::execute_suite(&ctx, id, export).await?;
            }
            (None, Some(path)) => {
                commands::execute_tests_file(&ctx, &path, form.into_form()?, export).await?;
            }
            (None, None) => anyhow::bail!("either --suite or --tests is required"),
        },
        Some(Commands::Suites { action }) => match action {
            SuiteAction::List => commands::list_suites(&ctx)?,
            SuiteAction::Show { id } => commands::show_suite(&ctx, id)?,
            SuiteAction::Delete { id } => commands::delete_suite(&ctx, id)?,
        },
        Some(Commands::Templates) => commands::list_templates(),
        Some(Commands::Health) => commands::check_health(&ctx.client).await?,
        None => commands::run_interactive(&ctx).await?,
    }

    Ok(())
}
