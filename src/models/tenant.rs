use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Tenant {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Staff {
    pub id: i64,
    pub tenant_id: i64,
    pub code: String,
    pub full_name: String,
    pub role: String,
    pub active: bool,
    pub created_at: String,
}

impl Staff {
    /// "RN Jane Doe (jdoe)" style label used in CLI output.
    pub fn label(&self) -> String {
        if self.role.is_empty() {
            format!("{} ({})", self.full_name, self.code)
        } else {
            format!("{} {} ({})", self.role, self.full_name, self.code)
        }
    }
}

/// Normalize a tenant slug: lowercase, spaces → '-'.
pub fn normalize_slug(raw: &str) -> String {
    raw.trim().to_lowercase().replace(char::is_whitespace, "-")
}
