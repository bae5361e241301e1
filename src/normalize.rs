// src/normalize.rs

//! Unifies the backend's three assignment representations (dynamic-question
//! arrays, predefined answer-key objects, pre-flattened list-view fields)
//! into one canonical shape. Pure and deterministic; missing data never
//! panics, it normalizes to an empty question list.

use crate::models::assignment::{
    AnswerKey, Assignment, DynamicQuestion, Question, RawAssignment, RawSubAssignment,
    SubAssignment, TimeWindow,
};

/// Converts a raw assignment into the canonical shape. Parent level and
/// every sub-assignment each end up with a single tagged `questions` list.
pub fn normalize_assignment(raw: RawAssignment) -> Assignment {
    let parent_questions = normalize_level(
        raw.dynamic_questions,
        effective_key(raw.answer_key, raw.flat_key),
        raw.questions,
    );

    let sub_assignments = raw
        .sub_assignments
        .into_iter()
        .enumerate()
        .map(|(idx, sub)| normalize_sub_assignment(sub, idx))
        .collect();

    let window = match (raw.start_time, raw.end_time) {
        (Some(start), Some(end)) => Some(TimeWindow { start, end }),
        _ => None,
    };

    Assignment {
        id: raw.id.unwrap_or_default(),
        module_name: raw.module_name.unwrap_or_default(),
        category: raw.category,
        assigned_date: raw.assigned_date,
        window,
        assigned_students: raw.assigned_students,
        questions: parent_questions,
        sub_assignments,
    }
}

fn normalize_sub_assignment(sub: RawSubAssignment, idx: usize) -> SubAssignment {
    let questions = normalize_level(
        sub.dynamic_questions,
        effective_key(sub.answer_key, sub.flat_key),
        sub.questions,
    );

    SubAssignment {
        id: sub.id.unwrap_or_else(|| format!("sub-{}", idx)),
        sub_module_name: sub.sub_module_name.unwrap_or_default(),
        assignment_pdf: sub.assignment_pdf,
        questions,
        is_completed: sub.is_completed,
    }
}

/// Tag-and-merge for one level:
/// 1. a non-empty dynamic-question array wins, every entry tagged dynamic;
/// 2. else a present answer key wraps as exactly one predefined entry;
/// 3. else an already-normalized `questions` list passes through;
/// 4. else empty.
fn normalize_level(
    dynamic: Vec<DynamicQuestion>,
    answer_key: Option<AnswerKey>,
    pre_normalized: Vec<Question>,
) -> Vec<Question> {
    if !dynamic.is_empty() {
        return dynamic.into_iter().map(Question::Dynamic).collect();
    }
    if let Some(key) = answer_key {
        return vec![Question::Predefined { answer_key: key }];
    }
    pre_normalized
}

/// Prefers an explicit nested answer key; falls back to the flattened
/// list-view fields when they carry data.
fn effective_key(nested: Option<AnswerKey>, flat: AnswerKey) -> Option<AnswerKey> {
    match nested {
        Some(key) if !key.is_empty() => Some(key),
        _ if !flat.is_empty() => Some(flat),
        _ => None,
    }
}

/// Splits display-editable comma-separated text back into a code sequence:
/// split on ',', trim, drop empty tokens.
pub fn split_codes(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins a code sequence into display-editable text with ", ".
pub fn join_codes(codes: &[String]) -> String {
    codes.join(", ")
}
