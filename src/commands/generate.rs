use colored::*;
use std::path::Path;

use crate::commands::{export_session, save_session, Context};
use crate::error::{AppError, Result};
use crate::models::RequestForm;
use crate::session::Session;
use crate::utils::{print_results, print_tests, ExportFormat};

/// Genera casos de prueba para el formulario y los muestra.
///
/// Con `output` los casos se guardan además como un array JSON, que luego
/// se puede ejecutar con `execute --tests`.
pub async fn generate_tests(ctx: &Context, form: RequestForm, output: Option<&Path>) -> Result<Session> {
    let mut session = Session::new(form);

    println!(
        "{}",
        format!(
            "Generating tests for {} {}...",
            session.form.method, session.form.endpoint
        )
        .blue()
    );

    session.generate(&ctx.client).await?;
    print_tests(&session.tests);

    if let Some(path) = output {
        let contents = serde_json::to_string_pretty(&session.tests)?;
        std::fs::write(path, contents).map_err(|e| AppError::storage(path, e))?;
        println!("{}", format!("Tests written to {}", path.display()).green());
    }

    Ok(session)
}

/// Genera y ejecuta en un solo paso, con guardado y exportación opcionales
pub async fn run_tests(
    ctx: &Context,
    form: RequestForm,
    save_as: Option<String>,
    export: Option<ExportFormat>,
) -> Result<Session> {
    let mut session = generate_tests(ctx, form, None).await?;

    if let Some(name) = save_as {
        save_session(ctx, &session, &name)?;
    }

    println!("{}", "Executing tests...".blue());
    session.execute(&ctx.client).await?;
    print_results(&session.results);

    if let Some(format) = export {
        export_session(ctx, &session, format)?;
    }

    Ok(session)
}
