use colored::*;

use crate::models::{ApiTemplate, ResultSummary, SavedSuite, TestCase, TestResult, TestStatus};

/// Colorea un texto según el estado del resultado
pub fn paint_status(status: TestStatus, text: &str) -> ColoredString {
    match status {
        TestStatus::Passed => text.green(),
        TestStatus::Failed => text.red(),
        TestStatus::Error => text.yellow(),
    }
}

/// Muestra las pruebas generadas
pub fn print_tests(tests: &[TestCase]) {
    if tests.is_empty() {
        println!("{}", "No tests generated.".yellow());
        return;
    }

    println!("{}", format!("Generated {} tests:", tests.len()).blue().bold());
    for (i, test) in tests.iter().enumerate() {
        println!(
            "{:>3}. {} {} {}",
            i + 1,
            format!("[{}]", test.method.to_uppercase()).cyan(),
            test.name.bold(),
            format!("(expected: {})", test.expected_status).dimmed()
        );
        if !test.description.is_empty() {
            println!("     {}", test.description);
        }
    }
    println!();
}

/// Muestra los resultados de la ejecución y el resumen final
pub fn print_results(results: &[TestResult]) {
    if results.is_empty() {
        println!("{}", "No results.".yellow());
        return;
    }

    println!("{}", "Results:".blue().bold());
    for (i, result) in results.iter().enumerate() {
        let status_code = result
            .response_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        println!(
            "{:>3}. {} {} {}",
            i + 1,
            paint_status(result.status, &result.status.to_string()),
            result.test_name.bold(),
            format!("({}ms, status {})", result.duration_ms, status_code).dimmed()
        );

        for error in &result.errors {
            println!("       {} {}", "•".red(), error.red());
        }
    }
    println!();

    print_summary(&ResultSummary::from_results(results));
}

pub fn print_summary(summary: &ResultSummary) {
    println!(
        "Total: {}  {}  {}  {}",
        summary.total,
        format!("Passed: {}", summary.passed).green(),
        format!("Failed: {}", summary.failed).red(),
        format!("Errors: {}", summary.errored).yellow()
    );
}

pub fn print_suites(suites: &[SavedSuite]) {
    if suites.is_empty() {
        println!("{}", "No saved suites.".yellow());
        return;
    }

    println!("{}", "Saved suites:".green());
    for suite in suites {
        println!(
            "{}: {} - {} {} ({} tests, {})",
            suite.id,
            suite.name.bold(),
            suite.method,
            suite.endpoint,
            suite.tests.len(),
            suite.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

/// Muestra el catálogo de plantillas agrupado por categoría
pub fn print_templates(templates: &[ApiTemplate]) {
    for category in crate::models::template_categories(templates) {
        println!("{}", category.green().bold());
        for t in templates.iter().filter(|t| t.category == category) {
            println!("  {} {} {}", t.id.cyan(), format!("[{}]", t.method).dimmed(), t.name);
            println!("      {}", t.description);
        }
    }
}
