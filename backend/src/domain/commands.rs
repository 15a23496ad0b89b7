//! Domain-level command types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed to the UI. The io layer maps the public DTOs defined in the
//! `shared` crate to these internal types after validating them.

pub mod subject {
    /// Input for creating a new subject.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CreateSubjectCommand {
        pub name: String,
        pub code: String,
        pub credits: u8,
        /// 0 when no plan is tracked
        pub total_classes_planned: u32,
    }

    /// Full overwrite of a subject's mutable fields (manual correction).
    #[derive(Debug, Clone, PartialEq)]
    pub struct UpdateSubjectCommand {
        pub name: String,
        pub code: String,
        pub credits: u8,
        pub total_classes_planned: u32,
        pub total_classes: u32,
        pub attended_classes: u32,
    }
}

pub mod account {
    /// Input for registering a new student.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RegisterCommand {
        pub student_id: String,
        pub name: String,
        pub email: String,
        pub password: String,
    }
}
