// src/flow.rs

//! Client-side interaction state: the assignment-taking flow and the admin
//! module-list view-model. The backend stays the authority on completion;
//! these state machines only prevent the common-case mistakes (double
//! submit, re-entering a finished sub-assignment, concurrent deletes).

use std::fmt;

use crate::models::assignment::{Assignment, Question};
use crate::normalize::join_codes;

#[derive(Debug, PartialEq, Eq)]
pub enum FlowError {
    UnknownAssignment(String),
    UnknownSubAssignment(String),
    /// The sub-assignment is already completed; its start action is
    /// disabled.
    AlreadyCompleted(String),
    /// The requested transition is not legal from the current state.
    InvalidTransition,
    /// A mutation is already in flight (the processing overlay).
    Busy,
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::UnknownAssignment(id) => write!(f, "unknown assignment '{}'", id),
            FlowError::UnknownSubAssignment(id) => write!(f, "unknown sub-assignment '{}'", id),
            FlowError::AlreadyCompleted(id) => {
                write!(f, "sub-assignment '{}' is already completed", id)
            }
            FlowError::InvalidTransition => write!(f, "action not available in this view"),
            FlowError::Busy => write!(f, "another operation is still in progress"),
        }
    }
}

impl std::error::Error for FlowError {}

/// Where the student currently is in the taking flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TakingState {
    List,
    SubList { assignment_id: String },
    QuestionView {
        assignment_id: String,
        /// None for parent-level (legacy) modules.
        sub_assignment_id: Option<String>,
    },
}

/// LIST -> SUB_LIST (when the module has sub-assignments) -> QUESTION_VIEW
/// -> submit -> SUB_LIST advancing to the next incomplete sub-assignment,
/// or LIST when none remain.
pub struct TakingFlow {
    assignments: Vec<Assignment>,
    state: TakingState,
}

impl TakingFlow {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self {
            assignments,
            state: TakingState::List,
        }
    }

    pub fn state(&self) -> &TakingState {
        &self.state
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Opens a module from the list: sub-assignment modules go to the sub
    /// list, parent-level modules straight to their questions.
    pub fn select(&mut self, assignment_id: &str) -> Result<&TakingState, FlowError> {
        if self.state != TakingState::List {
            return Err(FlowError::InvalidTransition);
        }
        let assignment = self
            .assignments
            .iter()
            .find(|a| a.id == assignment_id)
            .ok_or_else(|| FlowError::UnknownAssignment(assignment_id.to_string()))?;

        self.state = if assignment.has_sub_assignments() {
            TakingState::SubList {
                assignment_id: assignment.id.clone(),
            }
        } else {
            TakingState::QuestionView {
                assignment_id: assignment.id.clone(),
                sub_assignment_id: None,
            }
        };
        Ok(&self.state)
    }

    /// Starts one sub-assignment. Rejected when it is already completed:
    /// at most one submission per sub-assignment per student, enforced
    /// client-side for the common case.
    pub fn start_sub(&mut self, sub_id: &str) -> Result<&TakingState, FlowError> {
        let TakingState::SubList { assignment_id } = &self.state else {
            return Err(FlowError::InvalidTransition);
        };
        let assignment_id = assignment_id.clone();

        let sub = self
            .assignments
            .iter()
            .find(|a| a.id == assignment_id)
            .and_then(|a| a.sub_assignments.iter().find(|s| s.id == sub_id))
            .ok_or_else(|| FlowError::UnknownSubAssignment(sub_id.to_string()))?;

        if sub.is_completed {
            return Err(FlowError::AlreadyCompleted(sub_id.to_string()));
        }

        self.state = TakingState::QuestionView {
            assignment_id,
            sub_assignment_id: Some(sub_id.to_string()),
        };
        Ok(&self.state)
    }

    /// Records a successful submission for the current question view and
    /// advances: back to the sub list while incomplete sub-assignments
    /// remain, otherwise back to the assignment list.
    pub fn record_submission(&mut self) -> Result<&TakingState, FlowError> {
        let TakingState::QuestionView {
            assignment_id,
            sub_assignment_id,
        } = self.state.clone()
        else {
            return Err(FlowError::InvalidTransition);
        };

        if let Some(sub_id) = sub_assignment_id {
            let assignment = self
                .assignments
                .iter_mut()
                .find(|a| a.id == assignment_id)
                .ok_or_else(|| FlowError::UnknownAssignment(assignment_id.clone()))?;

            if let Some(sub) = assignment
                .sub_assignments
                .iter_mut()
                .find(|s| s.id == sub_id)
            {
                sub.is_completed = true;
            }

            let remaining = assignment.sub_assignments.iter().any(|s| !s.is_completed);
            self.state = if remaining {
                TakingState::SubList { assignment_id }
            } else {
                TakingState::List
            };
        } else {
            // Parent-level module: one submission finishes it.
            self.state = TakingState::List;
        }
        Ok(&self.state)
    }

    pub fn back_to_list(&mut self) {
        self.state = TakingState::List;
    }
}

/// Admin module-list view-model. The `busy` flag models the processing
/// overlay that disables further input while a delete/save is in flight;
/// it is advisory client-side mutual exclusion, not a queue.
pub struct ModuleListState {
    modules: Vec<Assignment>,
    busy: bool,
}

impl ModuleListState {
    pub fn new(modules: Vec<Assignment>) -> Self {
        Self {
            modules,
            busy: false,
        }
    }

    pub fn modules(&self) -> &[Assignment] {
        &self.modules
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Claims the processing overlay. A second mutation cannot start while
    /// one is in flight.
    pub fn begin_mutation(&mut self) -> Result<(), FlowError> {
        if self.busy {
            return Err(FlowError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    /// Releases the overlay. On failure the list is left untouched, in its
    /// pre-action state.
    pub fn finish_mutation(&mut self) {
        self.busy = false;
    }

    /// Applies a confirmed delete: removes exactly that module's id and
    /// leaves every other module and its sub-assignments unchanged.
    pub fn remove(&mut self, module_id: &str) {
        self.modules.retain(|m| m.id != module_id);
    }
}

/// Renders one level's question list for display. An empty list yields the
/// placeholder instead of an error.
pub fn question_panel(questions: &[Question]) -> String {
    if questions.is_empty() {
        return "No questions available".to_string();
    }

    let mut lines = Vec::with_capacity(questions.len());
    for (idx, question) in questions.iter().enumerate() {
        match question {
            Question::Dynamic(q) => {
                if q.options.is_empty() {
                    lines.push(format!("{}. {}", idx + 1, q.question_text));
                } else {
                    lines.push(format!(
                        "{}. {} [{}]",
                        idx + 1,
                        q.question_text,
                        join_codes(&q.options)
                    ));
                }
            }
            Question::Predefined { answer_key } => {
                lines.push(format!(
                    "{}. Predefined answer key ({} ICD, {} CPT)",
                    idx + 1,
                    answer_key.icd_codes.len(),
                    answer_key.cpt_codes.len()
                ));
            }
        }
    }
    lines.join("\n")
}
