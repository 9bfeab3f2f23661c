use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::HttpMethod;

/// Plantilla de API pública para rellenar el formulario rápidamente
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub endpoint: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub category: String,
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    name: &str,
    description: &str,
    endpoint: &str,
    method: HttpMethod,
    headers: &[(&str, &str)],
    body: &str,
    category: &str,
) -> ApiTemplate {
    ApiTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        endpoint: endpoint.to_string(),
        method,
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body: body.to_string(),
        category: category.to_string(),
    }
}

/// Catálogo de plantillas incluidas
pub fn builtin_templates() -> Vec<ApiTemplate> {
    let json_content = [("Content-Type", "application/json")];
    let github_accept = [("Accept", "application/vnd.github.v3+json")];
    let httpbin_body = format!(
        "{{\n  \"test\": \"data\",\n  \"timestamp\": {}\n}}",
        chrono::Utc::now().timestamp_millis()
    );

    vec![
        template(
            "jsonplaceholder-posts",
            "JSONPlaceholder - Posts",
            "Free fake REST API for testing",
            "https://jsonplaceholder.typicode.com/posts",
            HttpMethod::Get,
            &[],
            "",
            "Demo",
        ),
        template(
            "jsonplaceholder-create",
            "JSONPlaceholder - Create Post",
            "Test POST request with JSON body",
            "https://jsonplaceholder.typicode.com/posts",
            HttpMethod::Post,
            &json_content,
            "{\n  \"title\": \"foo\",\n  \"body\": \"bar\",\n  \"userId\": 1\n}",
            "Demo",
        ),
        template(
            "github-user",
            "GitHub - User Profile",
            "Get GitHub user information",
            "https://api.github.com/users/github",
            HttpMethod::Get,
            &github_accept,
            "",
            "Real APIs",
        ),
        template(
            "github-repos",
            "GitHub - User Repositories",
            "List user repositories",
            "https://api.github.com/users/github/repos",
            HttpMethod::Get,
            &github_accept,
            "",
            "Real APIs",
        ),
        template(
            "httpbin-get",
            "HTTPBin - Test GET",
            "Simple HTTP request & response service",
            "https://httpbin.org/get",
            HttpMethod::Get,
            &[],
            "",
            "Demo",
        ),
        template(
            "httpbin-post",
            "HTTPBin - Test POST",
            "Test POST with JSON data",
            "https://httpbin.org/post",
            HttpMethod::Post,
            &json_content,
            &httpbin_body,
            "Demo",
        ),
        template(
            "weather-api",
            "Open-Meteo - Weather",
            "Free weather forecast API",
            "https://api.open-meteo.com/v1/forecast?latitude=52.52&longitude=13.41&current_weather=true",
            HttpMethod::Get,
            &[],
            "",
            "Real APIs",
        ),
        template(
            "rest-countries",
            "REST Countries - All",
            "Get information about countries",
            "https://restcountries.com/v3.1/all",
            HttpMethod::Get,
            &[],
            "",
            "Real APIs",
        ),
    ]
}

/// Busca una plantilla por id
pub fn find_template(id: &str) -> Option<ApiTemplate> {
    builtin_templates().into_iter().find(|t| t.id == id)
}

/// Categorías en el orden en que aparecen en el catálogo
pub fn template_categories(templates: &[ApiTemplate]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for t in templates {
        if !categories.contains(&t.category) {
            categories.push(t.category.clone());
        }
    }
    categories
}
