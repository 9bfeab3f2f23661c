use colored::*;
use inquire::{Select, Text};

use crate::commands::{check_health, export_session, save_session, Context};
use crate::error::Result;
use crate::models::{builtin_templates, HttpMethod};
use crate::session::Session;
use crate::utils::{print_results, print_suites, print_tests, ExportFormat};

const EDIT_REQUEST: &str = "Edit request";
const LOAD_TEMPLATE: &str = "Load a template";
const GENERATE: &str = "Generate tests";
const EXECUTE: &str = "Execute tests";
const EXPORT: &str = "Export";
const SAVE_SUITE: &str = "Save suite";
const LOAD_SUITE: &str = "Load suite";
const DELETE_SUITE: &str = "Delete suite";
const HEALTH: &str = "Check backend";
const QUIT: &str = "Quit";

/// Menú interactivo: reproduce el flujo del formulario paso a paso
pub async fn run_interactive(ctx: &Context) -> Result<()> {
    let mut session = Session::default();

    loop {
        print_request(&session);

        // Las opciones dependen de lo que ya hay en la sesión
        let mut options = vec![EDIT_REQUEST, LOAD_TEMPLATE, GENERATE];
        if !session.tests.is_empty() {
            options.extend([EXECUTE, SAVE_SUITE, EXPORT]);
        }
        options.extend([LOAD_SUITE, DELETE_SUITE, HEALTH, QUIT]);

        let selection = match Select::new("What do you want to do?", options).prompt() {
            Ok(selection) => selection,
            Err(_) => break,
        };

        let outcome = match selection {
            EDIT_REQUEST => {
                edit_request(&mut session);
                Ok(())
            }
            LOAD_TEMPLATE => {
                load_template(&mut session);
                Ok(())
            }
            GENERATE => generate(ctx, &mut session).await,
            EXECUTE => execute(ctx, &mut session).await,
            SAVE_SUITE => save(ctx, &session),
            EXPORT => export(ctx, &session),
            LOAD_SUITE => load_suite(ctx, &mut session),
            DELETE_SUITE => delete_suite(ctx),
            HEALTH => check_health(&ctx.client).await,
            _ => break,
        };

        // Los errores se muestran y el menú sigue abierto
        if let Err(e) = outcome {
            println!("{}", e.to_string().red());
        }
        println!();
    }

    println!("Bye!");
    Ok(())
}

fn print_request(session: &Session) {
    if session.form.endpoint.is_empty() {
        println!("{}", "No request configured yet.".dimmed());
    } else {
        println!(
            "{} {} {}",
            "Request:".blue(),
            session.form.method,
            session.form.endpoint
        );
        if session.form.has_advanced() {
            if !session.form.headers.trim().is_empty() {
                println!("{} {}", "Headers:".blue(), session.form.headers);
            }
            if !session.form.body.trim().is_empty() {
                println!("{} {}", "Body:".blue(), session.form.body);
            }
        }
    }
    if !session.tests.is_empty() {
        println!(
            "{}",
            format!(
                "{} tests loaded, {} results",
                session.tests.len(),
                session.results.len()
            )
            .dimmed()
        );
    }
}

fn edit_request(session: &mut Session) {
    let current = session.form.clone();

    let endpoint = Text::new("API endpoint:")
        .with_initial_value(&current.endpoint)
        .with_placeholder("https://api.example.com/users")
        .prompt()
        .unwrap_or_else(|_| current.endpoint.clone());

    let methods: Vec<HttpMethod> = HttpMethod::ALL.to_vec();
    let cursor = methods.iter().position(|m| *m == current.method).unwrap_or(0);
    let method = Select::new("Method:", methods)
        .with_starting_cursor(cursor)
        .prompt()
        .unwrap_or(current.method);

    let headers = Text::new("Headers (JSON object, optional):")
        .with_initial_value(&current.headers)
        .prompt()
        .unwrap_or_else(|_| current.headers.clone());

    // El cuerpo sólo se pide para métodos que lo envían
    let body = if method.allows_body() {
        Text::new("Body (optional):")
            .with_initial_value(&current.body)
            .prompt()
            .unwrap_or_else(|_| current.body.clone())
    } else {
        current.body.clone()
    };

    session.form.endpoint = endpoint;
    session.form.method = method;
    session.form.headers = headers;
    session.form.body = body;
    session.error = None;
}

fn load_template(session: &mut Session) {
    let templates = builtin_templates();
    let labels: Vec<String> = templates
        .iter()
        .map(|t| format!("[{}] {} - {}", t.category, t.name, t.description))
        .collect();

    let Ok(selected) = Select::new("Choose a template:", labels.clone()).prompt() else {
        println!("{}", "Cancelled.".yellow());
        return;
    };

    if let Some(index) = labels.iter().position(|l| *l == selected) {
        session.load_template(&templates[index]);
        println!("{}", format!("Loaded template '{}'", templates[index].name).green());
    }
}

async fn generate(ctx: &Context, session: &mut Session) -> Result<()> {
    println!("{}", "Generating tests...".blue());
    let tests = session.generate(&ctx.client).await?;
    print_tests(tests);
    Ok(())
}

async fn execute(ctx: &Context, session: &mut Session) -> Result<()> {
    println!("{}", "Running...".blue());
    let results = session.execute(&ctx.client).await?;
    print_results(results);
    Ok(())
}

fn save(ctx: &Context, session: &Session) -> Result<()> {
    let default_name = format!("{} {}", session.form.method, session.form.endpoint);
    let name = Text::new("Suite name:")
        .with_default(&default_name)
        .prompt()
        .unwrap_or_else(|_| default_name.clone());

    save_session(ctx, session, &name)?;
    Ok(())
}

fn export(ctx: &Context, session: &Session) -> Result<()> {
    let formats: Vec<ExportFormat> = ExportFormat::ALL
        .into_iter()
        .filter(|f| !f.needs_results() || !session.results.is_empty())
        .collect();

    let Ok(format) = Select::new("Export format:", formats).prompt() else {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    };

    export_session(ctx, session, format)?;
    Ok(())
}

fn load_suite(ctx: &Context, session: &mut Session) -> Result<()> {
    let suites = ctx.store.list()?;
    if suites.is_empty() {
        print_suites(&suites);
        return Ok(());
    }

    let labels: Vec<String> = suites
        .iter()
        .map(|s| format!("{}: {} ({} tests)", s.id, s.name, s.tests.len()))
        .collect();

    let Ok(selected) = Select::new("Choose a suite:", labels.clone()).prompt() else {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    };

    if let Some(index) = labels.iter().position(|l| *l == selected) {
        session.load_suite(&suites[index]);
        println!("{}", format!("Loaded suite '{}'", suites[index].name).green());
        print_tests(&session.tests);
    }

    Ok(())
}

fn delete_suite(ctx: &Context) -> Result<()> {
    let suites = ctx.store.list()?;
    if suites.is_empty() {
        print_suites(&suites);
        return Ok(());
    }

    let labels: Vec<String> = suites
        .iter()
        .map(|s| format!("{}: {}", s.id, s.name))
        .collect();

    let Ok(selected) = Select::new("Suite to delete:", labels.clone()).prompt() else {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    };

    let confirm = Select::new(
        format!("Delete '{}'?", selected).as_str(),
        vec!["Yes", "No"],
    )
    .prompt();

    if let Ok("Yes") = confirm {
        if let Some(index) = labels.iter().position(|l| *l == selected) {
            ctx.store.delete(suites[index].id)?;
            println!("{}", "Suite deleted.".green());
        }
    } else {
        println!("{}", "Cancelled.".yellow());
    }

    Ok(())
}
