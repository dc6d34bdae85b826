use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub license_number: String, // ⇔ drivers.license_number (TEXT UNIQUE)
    pub created_at: String,
}
