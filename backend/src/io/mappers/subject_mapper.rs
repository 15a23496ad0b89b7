use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use shared::{Subject as SharedSubject, SubjectSummary};

use crate::domain::attendance::SubjectOverview;
use crate::domain::models::{Subject as DomainSubject, SubjectId};
use crate::io::formatting;

/// Mapper to convert between shared Subject DTOs and domain Subject models.
pub struct SubjectMapper;

impl SubjectMapper {
    /// Converts a shared Subject DTO to a domain Subject model.
    pub fn to_domain(dto: SharedSubject) -> Result<DomainSubject> {
        let created_at = DateTime::parse_from_rfc3339(&dto.created_at)
            .with_context(|| format!("Failed to parse createdAt for subject {}", dto.id))?
            .with_timezone(&Utc);

        Ok(DomainSubject {
            id: SubjectId(dto.id),
            name: dto.name,
            code: dto.code,
            credits: dto.credits,
            total_classes: dto.total_classes,
            attended_classes: dto.attended_classes,
            total_classes_planned: dto.total_classes_planned,
            created_at,
        })
    }

    /// Converts a domain Subject model to a shared Subject DTO.
    pub fn to_dto(domain: DomainSubject) -> SharedSubject {
        SharedSubject {
            id: domain.id.value(),
            name: domain.name,
            code: domain.code,
            credits: domain.credits,
            total_classes: domain.total_classes,
            attended_classes: domain.attended_classes,
            total_classes_planned: domain.total_classes_planned,
            created_at: domain.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Subject card with every derived figure and its display text.
    pub fn to_summary(overview: SubjectOverview) -> SubjectSummary {
        let SubjectOverview {
            subject,
            derived,
            prediction,
        } = overview;
        let guidance = formatting::guidance_message(&derived, subject.total_classes);

        SubjectSummary {
            subject: Self::to_dto(subject),
            percentage: derived.percentage,
            formatted_percentage: formatting::format_percentage(derived.percentage),
            status: derived.status,
            status_label: formatting::status_label(derived.status).to_string(),
            classes_needed_for_75: derived.classes_needed_for_75,
            remaining: derived.remaining,
            plan_progress: derived.plan_progress,
            prediction_message: prediction.to_string(),
            guidance_message: guidance,
        }
    }
}
