use crate::models::builtin_templates;
use crate::utils::print_templates;

/// Lista las plantillas de API incluidas
pub fn list_templates() {
    print_templates(&builtin_templates());
}
