// src/models/assignment.rs

use serde::{Deserialize, Deserializer, Serialize};

use crate::normalize::split_codes;

/// The predefined-mode answer record: patient/code/notes fields, all
/// optional. This same shape appears nested (`answerKey`) and flattened
/// directly onto an assignment object, depending on the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerKey {
    pub patient_name: Option<String>,
    #[serde(alias = "ageDob", alias = "age")]
    pub age_or_dob: Option<String>,
    #[serde(deserialize_with = "codes_field")]
    pub icd_codes: Vec<String>,
    #[serde(deserialize_with = "codes_field")]
    pub cpt_codes: Vec<String>,
    #[serde(deserialize_with = "codes_field")]
    pub pcs_codes: Vec<String>,
    #[serde(deserialize_with = "codes_field")]
    pub hcpcs_codes: Vec<String>,
    pub drg_value: Option<String>,
    #[serde(deserialize_with = "codes_field")]
    pub modifiers: Vec<String>,
    pub adx: Option<String>,
    pub notes: Option<String>,
}

impl AnswerKey {
    /// True when no field carries data. An empty key is treated as absent
    /// by the normalizer.
    pub fn is_empty(&self) -> bool {
        self.patient_name.is_none()
            && self.age_or_dob.is_none()
            && self.icd_codes.is_empty()
            && self.cpt_codes.is_empty()
            && self.pcs_codes.is_empty()
            && self.hcpcs_codes.is_empty()
            && self.drg_value.is_none()
            && self.modifiers.is_empty()
            && self.adx.is_none()
            && self.notes.is_none()
    }
}

/// A free-form or multiple-choice question with an explicit correct answer.
/// Empty `options` means free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicQuestion {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub question_text: String,
    #[serde(default, deserialize_with = "codes_field")]
    pub options: Vec<String>,
    #[serde(default, alias = "correctAnswer")]
    pub answer: Option<String>,
}

/// Canonical question entry. Every level of a normalized assignment exposes
/// one `Vec<Question>`; downstream code matches on the tag instead of
/// probing field presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    #[serde(rename = "dynamic")]
    Dynamic(DynamicQuestion),
    #[serde(rename = "predefined")]
    Predefined {
        #[serde(rename = "answerKey")]
        answer_key: AnswerKey,
    },
}

/// Raw sub-assignment as the backend sends it, tolerant of all shapes:
/// a dynamic-question list, a nested answer key, pre-flattened key fields,
/// or an already-normalized `questions` list. Missing fields never fail
/// deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSubAssignment {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub sub_module_name: Option<String>,
    pub assignment_pdf: Option<String>,
    pub dynamic_questions: Vec<DynamicQuestion>,
    #[serde(alias = "answers")]
    pub answer_key: Option<AnswerKey>,
    #[serde(flatten)]
    pub flat_key: AnswerKey,
    pub questions: Vec<Question>,
    pub is_completed: bool,
}

/// Raw top-level assignment (module). Legacy rows may carry both
/// parent-level answer data and sub-assignments; both are preserved here
/// and the normalizer handles each level independently.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAssignment {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub module_name: Option<String>,
    pub category: Option<String>,
    pub assigned_date: Option<chrono::NaiveDate>,
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    pub assigned_students: Vec<String>,
    pub sub_assignments: Vec<RawSubAssignment>,
    pub dynamic_questions: Vec<DynamicQuestion>,
    #[serde(alias = "answers")]
    pub answer_key: Option<AnswerKey>,
    #[serde(flatten)]
    pub flat_key: AnswerKey,
    pub questions: Vec<Question>,
}

/// Optional submission window on a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start: chrono::DateTime<chrono::Utc>,
    pub end: chrono::DateTime<chrono::Utc>,
}

/// Normalized sub-assignment: a single tagged question list regardless of
/// which representation the backend used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAssignment {
    pub id: String,
    pub sub_module_name: String,
    pub assignment_pdf: Option<String>,
    pub questions: Vec<Question>,
    pub is_completed: bool,
}

/// Normalized module. Parent-level `questions` is non-empty only for
/// legacy/parent-level modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub module_name: String,
    pub category: Option<String>,
    pub assigned_date: Option<chrono::NaiveDate>,
    pub window: Option<TimeWindow>,
    pub assigned_students: Vec<String>,
    pub questions: Vec<Question>,
    pub sub_assignments: Vec<SubAssignment>,
}

impl Assignment {
    /// Whether the taking flow should go through the sub-assignment list.
    pub fn has_sub_assignments(&self) -> bool {
        !self.sub_assignments.is_empty()
    }
}

/// Accepts a code/option field as either a JSON array of strings or a
/// single comma-separated string (the list-view endpoint flattens arrays
/// into display strings).
fn codes_field<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrSeq {
        Seq(Vec<String>),
        Str(String),
        None,
    }

    match StringOrSeq::deserialize(deserializer)? {
        StringOrSeq::Seq(v) => Ok(v),
        StringOrSeq::Str(s) => Ok(split_codes(&s)),
        StringOrSeq::None => Ok(Vec::new()),
    }
}
