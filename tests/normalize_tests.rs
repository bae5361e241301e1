// tests/normalize_tests.rs

use medcode_client::flow::question_panel;
use medcode_client::models::assignment::{Question, RawAssignment};
use medcode_client::normalize::{join_codes, normalize_assignment, split_codes};

fn raw_from_json(value: serde_json::Value) -> RawAssignment {
    serde_json::from_value(value).expect("raw assignment should deserialize")
}

#[test]
fn dynamic_questions_win_over_answer_key() {
    // Both representations present at the same level: the dynamic array is
    // preferred and no predefined entry is synthesized alongside it.
    let raw = raw_from_json(serde_json::json!({
        "_id": "a1",
        "moduleName": "ICD Basics",
        "dynamicQuestions": [
            { "questionText": "Q1", "options": ["A", "B"], "answer": "A" },
            { "questionText": "Q2", "options": [], "answer": "free" }
        ],
        "answerKey": { "patientName": "Doe", "icdCodes": ["A01.1"] }
    }));

    let assignment = normalize_assignment(raw);

    assert_eq!(assignment.questions.len(), 2);
    assert!(assignment
        .questions
        .iter()
        .all(|q| matches!(q, Question::Dynamic(_))));
}

#[test]
fn answer_key_wraps_as_exactly_one_predefined_entry() {
    let raw = raw_from_json(serde_json::json!({
        "_id": "a2",
        "moduleName": "ED Coding",
        "dynamicQuestions": [],
        "answerKey": {
            "patientName": "Jane Roe",
            "icdCodes": ["S72.001A", "W01.0XXA"],
            "cptCodes": ["99283"]
        }
    }));

    let assignment = normalize_assignment(raw);

    assert_eq!(assignment.questions.len(), 1);
    match &assignment.questions[0] {
        Question::Predefined { answer_key } => {
            assert_eq!(answer_key.patient_name.as_deref(), Some("Jane Roe"));
            assert_eq!(answer_key.icd_codes, vec!["S72.001A", "W01.0XXA"]);
        }
        other => panic!("expected predefined entry, got {:?}", other),
    }
}

#[test]
fn flattened_list_view_fields_count_as_answer_key() {
    // The list-view endpoint flattens key fields onto the object itself,
    // with code arrays collapsed to comma-separated strings.
    let raw = raw_from_json(serde_json::json!({
        "_id": "a3",
        "moduleName": "Surgery Case 4",
        "patientName": "John Doe",
        "icdCodes": "K35.80, K65.0",
        "cptCodes": "44950"
    }));

    let assignment = normalize_assignment(raw);

    assert_eq!(assignment.questions.len(), 1);
    match &assignment.questions[0] {
        Question::Predefined { answer_key } => {
            assert_eq!(answer_key.icd_codes, vec!["K35.80", "K65.0"]);
            assert_eq!(answer_key.cpt_codes, vec!["44950"]);
        }
        other => panic!("expected predefined entry, got {:?}", other),
    }
}

#[test]
fn sub_assignment_with_no_sources_normalizes_to_empty_and_renders_placeholder() {
    let raw = raw_from_json(serde_json::json!({
        "_id": "a4",
        "moduleName": "Empty Module",
        "subAssignments": [
            { "_id": "s1", "subModuleName": "Part 1" }
        ]
    }));

    let assignment = normalize_assignment(raw);

    assert_eq!(assignment.sub_assignments.len(), 1);
    let sub = &assignment.sub_assignments[0];
    assert!(sub.questions.is_empty());
    assert_eq!(question_panel(&sub.questions), "No questions available");
}

#[test]
fn legacy_module_with_both_levels_does_not_crash() {
    // Legacy data: parent-level answer key AND sub-assignments. Each level
    // normalizes independently.
    let raw = raw_from_json(serde_json::json!({
        "_id": "a5",
        "moduleName": "Legacy",
        "answerKey": { "drgValue": "470" },
        "subAssignments": [
            {
                "_id": "s1",
                "subModuleName": "Part 1",
                "dynamicQuestions": [
                    { "questionText": "Q1", "options": ["A", "B"], "answer": "B" }
                ]
            }
        ]
    }));

    let assignment = normalize_assignment(raw);

    assert_eq!(assignment.questions.len(), 1);
    assert!(matches!(
        assignment.questions[0],
        Question::Predefined { .. }
    ));
    assert_eq!(assignment.sub_assignments[0].questions.len(), 1);
    assert!(matches!(
        assignment.sub_assignments[0].questions[0],
        Question::Dynamic(_)
    ));
}

#[test]
fn normalized_dynamic_entry_keeps_fields_and_tag() {
    // The canonical wire shape of a normalized dynamic entry.
    let raw = raw_from_json(serde_json::json!({
        "_id": "a6",
        "moduleName": "Tagging",
        "subAssignments": [
            {
                "_id": "s1",
                "subModuleName": "Part 1",
                "dynamicQuestions": [
                    { "questionText": "Q1", "options": ["A", "B"], "answer": "A" }
                ]
            }
        ]
    }));

    let assignment = normalize_assignment(raw);
    let encoded =
        serde_json::to_value(&assignment.sub_assignments[0].questions).expect("serializes");

    assert_eq!(encoded[0]["type"], "dynamic");
    assert_eq!(encoded[0]["questionText"], "Q1");
    assert_eq!(encoded[0]["options"], serde_json::json!(["A", "B"]));
    assert_eq!(encoded[0]["answer"], "A");
}

#[test]
fn pre_normalized_questions_pass_through() {
    let raw = raw_from_json(serde_json::json!({
        "_id": "a7",
        "moduleName": "Formatted",
        "questions": [
            { "type": "dynamic", "questionText": "Q1", "options": [], "answer": "42" }
        ]
    }));

    let assignment = normalize_assignment(raw);

    assert_eq!(assignment.questions.len(), 1);
    assert!(matches!(assignment.questions[0], Question::Dynamic(_)));
}

#[test]
fn codes_round_trip_through_display_text() {
    let codes = vec![
        "A01.1".to_string(),
        "B20".to_string(),
        "Z51.11".to_string(),
    ];

    let display = join_codes(&codes);
    assert_eq!(display, "A01.1, B20, Z51.11");
    assert_eq!(split_codes(&display), codes);
}

#[test]
fn split_codes_trims_and_drops_empty_tokens() {
    assert_eq!(
        split_codes("  A01.1 ,, B20 ,  "),
        vec!["A01.1".to_string(), "B20".to_string()]
    );
    assert!(split_codes("").is_empty());
    assert!(split_codes(" , , ").is_empty());
}
