use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin id or student id, depending on role
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(sub: &str, role: Role, section_id: Option<&str>, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: sub.to_string(),
            role,
            section_id: section_id.map(str::to_string),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("student-7", Role::Student, Some("section-a"), 24);

        assert_eq!(claims.sub, "student-7");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.section_id.as_deref(), Some("section-a"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_value(Claims::new("admin-1", Role::Admin, None, 1)).unwrap();

        assert_eq!(json["role"], "admin");
        assert!(json.get("section_id").is_none());
    }
}
