use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};

use crate::{
    auth::claims::{Claims, Role},
    errors::{AppError, AppResult},
};

/// The authenticated caller, derived from validated token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Admin {
        admin_id: String,
    },
    Student {
        student_id: String,
        section_id: Option<String>,
    },
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        match claims.role {
            Role::Admin => Principal::Admin {
                admin_id: claims.sub,
            },
            Role::Student => Principal::Student {
                student_id: claims.sub,
                section_id: claims.section_id,
            },
        }
    }
}

fn principal_from_request(req: &HttpRequest) -> AppResult<Principal> {
    req.extensions()
        .get::<Claims>()
        .cloned()
        .map(Principal::from)
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))
}

/// Extractor for handlers restricted to administrators.
#[derive(Debug, Clone)]
pub struct AdminPrincipal {
    pub admin_id: String,
}

impl TryFrom<Principal> for AdminPrincipal {
    type Error = AppError;

    fn try_from(principal: Principal) -> AppResult<Self> {
        match principal {
            Principal::Admin { admin_id } => Ok(AdminPrincipal { admin_id }),
            Principal::Student { .. } => Err(AppError::Unauthorized("Unauthorized".to_string())),
        }
    }
}

impl FromRequest for AdminPrincipal {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(principal_from_request(req).and_then(AdminPrincipal::try_from))
    }
}

/// Extractor for handlers restricted to students.
#[derive(Debug, Clone)]
pub struct StudentPrincipal {
    pub student_id: String,
    pub section_id: Option<String>,
}

impl StudentPrincipal {
    pub fn require_section(&self) -> AppResult<&str> {
        self.section_id
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Unauthorized or No Section Assigned".to_string()))
    }
}

impl TryFrom<Principal> for StudentPrincipal {
    type Error = AppError;

    fn try_from(principal: Principal) -> AppResult<Self> {
        match principal {
            Principal::Student {
                student_id,
                section_id,
            } => Ok(StudentPrincipal {
                student_id,
                section_id,
            }),
            Principal::Admin { .. } => Err(AppError::Unauthorized("Unauthorized".to_string())),
        }
    }
}

impl FromRequest for StudentPrincipal {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(principal_from_request(req).and_then(StudentPrincipal::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, role: Role, section_id: Option<&str>) -> Claims {
        Claims::new(sub, role, section_id, 1)
    }

    #[test]
    fn test_admin_claims_become_admin_principal() {
        let principal = Principal::from(claims("admin-1", Role::Admin, None));

        assert_eq!(
            principal,
            Principal::Admin {
                admin_id: "admin-1".to_string()
            }
        );
        assert!(AdminPrincipal::try_from(principal.clone()).is_ok());
        assert!(StudentPrincipal::try_from(principal).is_err());
    }

    #[test]
    fn test_student_claims_carry_section() {
        let principal = Principal::from(claims("student-1", Role::Student, Some("section-a")));
        let student = StudentPrincipal::try_from(principal.clone()).expect("student principal");

        assert_eq!(student.student_id, "student-1");
        assert_eq!(student.require_section().unwrap(), "section-a");
        assert!(AdminPrincipal::try_from(principal).is_err());
    }

    #[test]
    fn test_student_without_section() {
        let student = StudentPrincipal::try_from(Principal::from(claims(
            "student-2",
            Role::Student,
            None,
        )))
        .unwrap();

        match student.require_section() {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("No Section")),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_extractor_without_claims_is_unauthorized() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let result = AdminPrincipal::extract(&req).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
