//! The interface the UI talks to.
//!
//! `DashboardApi` accepts the `shared` request DTOs, validates them, drives
//! the account and attendance services and answers with `shared` response
//! DTOs. It holds at most one open [`AttendanceService`]: the logged-in
//! student's session.

use std::sync::Arc;
use tracing::{info, warn};

use shared::{
    CreateSubjectRequest, DashboardResponse, DashboardStats, DeleteSubjectRequest,
    DeleteSubjectResponse, LoginRequest, MarkAttendanceRequest, RegisterRequest, SessionResponse,
    SubjectResponse, UpdateSubjectRequest,
};

use super::formatting;
use super::mappers::{SubjectMapper, UserMapper};
use crate::domain::attendance::AggregateStats;
use crate::domain::clock::Clock;
use crate::domain::commands::account::RegisterCommand;
use crate::domain::commands::subject::{CreateSubjectCommand, UpdateSubjectCommand};
use crate::domain::error::{AccountError, ServiceResult};
use crate::domain::models::{SubjectId, User};
use crate::domain::validation;
use crate::domain::{AccountService, AttendanceService};
use crate::storage::KeyValueStorage;

pub struct DashboardApi<S: KeyValueStorage> {
    connection: S,
    clock: Arc<dyn Clock>,
    account_service: AccountService<S>,
    session: Option<AttendanceService<S>>,
}

impl<S: KeyValueStorage> DashboardApi<S> {
    pub fn new(connection: S, clock: Arc<dyn Clock>) -> Self {
        let account_service = AccountService::new(connection.clone(), clock.clone());
        Self {
            connection,
            clock,
            account_service,
            session: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Reopen the stored session, if there is one.
    pub async fn restore_session(&mut self) -> ServiceResult<Option<SessionResponse>> {
        let Some(user) = self.account_service.current_user().await? else {
            info!("No stored session");
            return Ok(None);
        };

        info!("Restoring session for {}", user.student_id);
        let profile = UserMapper::to_profile(&user);
        let success_message = format!("Welcome back, {}!", user.name);
        self.open_session(user).await?;
        Ok(Some(SessionResponse {
            student: profile,
            success_message,
        }))
    }

    pub async fn register(&mut self, request: RegisterRequest) -> ServiceResult<SessionResponse> {
        let command = RegisterCommand {
            student_id: request.student_id.trim().to_string(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            password: request.password,
        };
        validation::validate_registration(&command)?;

        let user = self.account_service.register(command).await?;
        let profile = UserMapper::to_profile(&user);
        self.open_session(user).await?;

        Ok(SessionResponse {
            student: profile,
            success_message: "Registration successful!".to_string(),
        })
    }

    pub async fn login(&mut self, request: LoginRequest) -> ServiceResult<SessionResponse> {
        let user = self
            .account_service
            .login(request.student_id.trim(), &request.password)
            .await?;
        let profile = UserMapper::to_profile(&user);
        self.open_session(user).await?;

        Ok(SessionResponse {
            student: profile,
            success_message: "Login successful!".to_string(),
        })
    }

    pub async fn logout(&mut self) -> ServiceResult<String> {
        if let Some(session) = self.session.take() {
            session.close();
        }
        self.account_service.logout().await?;
        Ok("You have been logged out.".to_string())
    }

    pub fn dashboard(&self) -> ServiceResult<DashboardResponse> {
        let session = self.session()?;
        Ok(DashboardResponse {
            student: UserMapper::to_profile(session.user()),
            subjects: session.summaries().into_iter().map(SubjectMapper::to_summary).collect(),
            stats: to_stats_dto(session.stats()),
        })
    }

    pub async fn add_subject(
        &mut self,
        request: CreateSubjectRequest,
    ) -> ServiceResult<SubjectResponse> {
        let command = CreateSubjectCommand {
            name: request.name.trim().to_string(),
            code: request.code.trim().to_string(),
            credits: request.credits,
            total_classes_planned: request.total_classes_planned.unwrap_or(0),
        };
        validation::validate_create_subject(&command)?;

        let session = self.session_mut()?;
        let subject = session.create_subject(command).await?;
        let message = format!("Subject \"{}\" added successfully!", subject.name);
        subject_response(session, subject.id, message)
    }

    pub async fn update_subject(
        &mut self,
        request: UpdateSubjectRequest,
    ) -> ServiceResult<SubjectResponse> {
        let command = UpdateSubjectCommand {
            name: request.name.trim().to_string(),
            code: request.code.trim().to_string(),
            credits: request.credits,
            total_classes_planned: request.total_classes_planned.unwrap_or(0),
            total_classes: request.total_classes,
            attended_classes: request.attended_classes,
        };
        validation::validate_update_subject(&command)?;

        let session = self.session_mut()?;
        let subject = session.update_subject(SubjectId(request.subject_id), command).await?;
        let message = format!("Subject \"{}\" updated successfully!", subject.name);
        subject_response(session, subject.id, message)
    }

    pub async fn delete_subject(
        &mut self,
        request: DeleteSubjectRequest,
    ) -> ServiceResult<DeleteSubjectResponse> {
        let session = self.session_mut()?;
        let removed = session.delete_subject(SubjectId(request.subject_id)).await?;

        Ok(DeleteSubjectResponse {
            subject_id: removed.id.value(),
            success_message: "Subject deleted successfully!".to_string(),
        })
    }

    pub async fn mark_attendance(
        &mut self,
        request: MarkAttendanceRequest,
    ) -> ServiceResult<SubjectResponse> {
        let session = self.session_mut()?;
        let subject = session
            .mark_attendance(SubjectId(request.subject_id), request.is_present)
            .await?;
        let status = if request.is_present { "Present" } else { "Absent" };
        subject_response(session, subject.id, format!("Marked {} for today", status))
    }

    /// Whether the mark buttons for a subject should be disabled
    pub fn is_marked_today(&self, subject_id: u64) -> ServiceResult<bool> {
        Ok(self.session()?.is_marked_today(SubjectId(subject_id)))
    }

    async fn open_session(&mut self, user: User) -> ServiceResult<()> {
        if let Some(previous) = self.session.take() {
            warn!("Replacing open session for {}", previous.user().student_id);
            previous.close();
        }
        let session =
            AttendanceService::open(self.connection.clone(), self.clock.clone(), user).await?;
        self.session = Some(session);
        Ok(())
    }

    fn session(&self) -> ServiceResult<&AttendanceService<S>> {
        self.session.as_ref().ok_or_else(|| AccountError::NotLoggedIn.into())
    }

    fn session_mut(&mut self) -> ServiceResult<&mut AttendanceService<S>> {
        self.session.as_mut().ok_or_else(|| AccountError::NotLoggedIn.into())
    }
}

fn subject_response<S: KeyValueStorage>(
    session: &AttendanceService<S>,
    id: SubjectId,
    success_message: String,
) -> ServiceResult<SubjectResponse> {
    Ok(SubjectResponse {
        subject: SubjectMapper::to_summary(session.summary(id)?),
        success_message,
    })
}

fn to_stats_dto(stats: AggregateStats) -> DashboardStats {
    DashboardStats {
        total_subjects: stats.total_subjects,
        avg_attendance: stats.avg_attendance,
        formatted_avg_attendance: formatting::format_percentage(stats.avg_attendance),
        safe_count: stats.safe_count,
        warning_count: stats.warning_count,
        risk_count: stats.risk_count,
    }
}
