use chrono::Utc;
use colored::*;
use std::path::PathBuf;

use crate::commands::Context;
use crate::error::{AppError, Result};
use crate::session::Session;
use crate::utils::{clipboard_text, csv_report, json_report, postman_collection, write_export, ExportFormat};

/// Exporta la sesión en el formato pedido.
///
/// Los informes se escriben en el directorio de exportación; el texto para
/// el portapapeles se imprime en stdout (por ejemplo `| pbcopy`).
pub fn export_session(ctx: &Context, session: &Session, format: ExportFormat) -> Result<Option<PathBuf>> {
    if format.needs_results() && session.results.is_empty() {
        return Err(AppError::validation("No results to export. Execute the tests first."));
    }
    if !format.needs_results() && session.tests.is_empty() {
        return Err(AppError::validation("No tests to export. Generate tests first."));
    }

    let now = Utc::now();
    let contents = match format {
        ExportFormat::Json => json_report(&session.form, &session.results, now)?,
        ExportFormat::Csv => csv_report(&session.results)?,
        ExportFormat::Postman => {
            serde_json::to_string_pretty(&postman_collection(&session.form, &session.tests))?
        }
        ExportFormat::Clipboard => {
            println!("{}", clipboard_text(&session.results));
            return Ok(None);
        }
    };

    let Some(file_name) = format.file_name(now.timestamp_millis()) else {
        return Ok(None);
    };

    let path = write_export(&ctx.config.export_dir, &file_name, &contents)?;
    println!("{}", format!("Exported {} to {}", format, path.display()).green());

    Ok(Some(path))
}
