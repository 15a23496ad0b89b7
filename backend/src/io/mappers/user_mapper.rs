use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use shared::{User as SharedUser, UserProfile};

use crate::domain::models::User as DomainUser;

/// Mapper to convert between shared User DTOs and domain User models.
pub struct UserMapper;

impl UserMapper {
    pub fn to_domain(dto: SharedUser) -> Result<DomainUser> {
        let created_at = DateTime::parse_from_rfc3339(&dto.created_at)
            .with_context(|| format!("Failed to parse createdAt for student {}", dto.student_id))?
            .with_timezone(&Utc);

        Ok(DomainUser {
            student_id: dto.student_id,
            name: dto.name,
            email: dto.email,
            password: dto.password,
            created_at,
        })
    }

    pub fn to_dto(domain: DomainUser) -> SharedUser {
        SharedUser {
            student_id: domain.student_id,
            name: domain.name,
            email: domain.email,
            password: domain.password,
            created_at: domain.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// The public part of a user, safe to hand to the UI
    pub fn to_profile(domain: &DomainUser) -> UserProfile {
        UserProfile {
            student_id: domain.student_id.clone(),
            name: domain.name.clone(),
            email: domain.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_round_trip_and_profile() {
        let dto = SharedUser {
            student_id: "S100".to_string(),
            name: "Priya".to_string(),
            email: "priya@example.edu".to_string(),
            password: "secret".to_string(),
            created_at: "2024-03-01T12:00:00.000Z".to_string(),
        };

        let domain = UserMapper::to_domain(dto.clone()).unwrap();
        let profile = UserMapper::to_profile(&domain);
        assert_eq!(profile.student_id, "S100");
        assert_eq!(profile.email, "priya@example.edu");
        assert_eq!(UserMapper::to_dto(domain), dto);
    }
}
