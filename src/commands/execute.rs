use colored::*;
use std::path::Path;
use tracing::info;

use crate::commands::{export_session, Context};
use crate::error::Result;
use crate::models::RequestForm;
use crate::session::Session;
use crate::utils::{load_tests_file, print_results, ExportFormat};

/// Ejecuta las pruebas de una suite guardada
pub async fn execute_suite(ctx: &Context, id: u64, export: Option<ExportFormat>) -> Result<Session> {
    let suite = ctx.store.load(id)?;
    info!(id, name = %suite.name, "executing saved suite");

    let mut session = Session::default();
    session.load_suite(&suite);

    println!(
        "{}",
        format!("Executing suite '{}' ({} tests)...", suite.name, suite.tests.len()).blue()
    );

    execute_session(ctx, session, export).await
}

/// Ejecuta las pruebas de un archivo JSON generado con `generate --output`
pub async fn execute_tests_file(
    ctx: &Context,
    path: &Path,
    form: RequestForm,
    export: Option<ExportFormat>,
) -> Result<Session> {
    let mut session = Session::new(form);
    session.tests = load_tests_file(path)?;

    println!(
        "{}",
        format!("Executing {} tests from {}...", session.tests.len(), path.display()).blue()
    );

    execute_session(ctx, session, export).await
}

async fn execute_session(
    ctx: &Context,
    mut session: Session,
    export: Option<ExportFormat>,
) -> Result<Session> {
    if session.tests.is_empty() {
        println!("{}", "No tests to execute.".yellow());
        return Ok(session);
    }

    session.execute(&ctx.client).await?;
    print_results(&session.results);

    if let Some(format) = export {
        export_session(ctx, &session, format)?;
    }

    Ok(session)
}
