use colored::*;

use crate::commands::Context;
use crate::error::{AppError, Result};
use crate::models::SavedSuite;
use crate::session::Session;
use crate::utils::{print_suites, print_tests};

/// Guarda el formulario y las pruebas de la sesión como una suite con nombre
pub fn save_session(ctx: &Context, session: &Session, name: &str) -> Result<SavedSuite> {
    if session.tests.is_empty() {
        return Err(AppError::validation("No tests to save. Generate tests first."));
    }

    let name = if name.trim().is_empty() {
        format!("{} {}", session.form.method, session.form.endpoint)
    } else {
        name.trim().to_string()
    };

    let mut suite = SavedSuite::new(name, &session.form, session.tests.clone());
    ctx.store.save(&mut suite)?;

    println!(
        "{}",
        format!("Suite '{}' saved with id {}", suite.name, suite.id).green()
    );

    Ok(suite)
}

/// Lista las suites guardadas
pub fn list_suites(ctx: &Context) -> Result<()> {
    let suites = ctx.store.list()?;
    print_suites(&suites);
    Ok(())
}

/// Muestra una suite con sus pruebas
pub fn show_suite(ctx: &Context, id: u64) -> Result<()> {
    let suite = ctx.store.load(id)?;

    println!("{} {}", "Suite:".blue(), suite.name.bold());
    println!("{} {} {}", "Request:".blue(), suite.method, suite.endpoint);
    if !suite.headers.trim().is_empty() {
        println!("{} {}", "Headers:".blue(), suite.headers);
    }
    if !suite.body.trim().is_empty() {
        println!("{} {}", "Body:".blue(), suite.body);
    }
    println!(
        "{} {}\n",
        "Saved:".blue(),
        suite.timestamp.format("%Y-%m-%d %H:%M:%S")
    );

    print_tests(&suite.tests);
    Ok(())
}

pub fn delete_suite(ctx: &Context, id: u64) -> Result<()> {
    ctx.store.delete(id)?;
    println!("{}", format!("Suite {} deleted.", id).green());
    Ok(())
}
