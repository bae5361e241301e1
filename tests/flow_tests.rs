// tests/flow_tests.rs

use medcode_client::flow::{FlowError, ModuleListState, TakingFlow, TakingState, question_panel};
use medcode_client::models::assignment::{
    AnswerKey, Assignment, DynamicQuestion, Question, SubAssignment,
};

fn dynamic(text: &str) -> Question {
    Question::Dynamic(DynamicQuestion {
        id: None,
        question_text: text.to_string(),
        options: vec!["A".to_string(), "B".to_string()],
        answer: Some("A".to_string()),
    })
}

fn sub(id: &str, completed: bool) -> SubAssignment {
    SubAssignment {
        id: id.to_string(),
        sub_module_name: format!("Part {}", id),
        assignment_pdf: None,
        questions: vec![dynamic("Q")],
        is_completed: completed,
    }
}

fn module(id: &str, subs: Vec<SubAssignment>, questions: Vec<Question>) -> Assignment {
    Assignment {
        id: id.to_string(),
        module_name: format!("Module {}", id),
        category: Some("CPC".to_string()),
        assigned_date: None,
        window: None,
        assigned_students: vec![],
        questions,
        sub_assignments: subs,
    }
}

#[test]
fn selecting_module_with_subs_opens_sub_list() {
    let mut flow = TakingFlow::new(vec![module("m1", vec![sub("s1", false)], vec![])]);

    let state = flow.select("m1").expect("select works");
    assert_eq!(
        *state,
        TakingState::SubList {
            assignment_id: "m1".to_string()
        }
    );
}

#[test]
fn selecting_parent_level_module_opens_questions_directly() {
    let mut flow = TakingFlow::new(vec![module("m1", vec![], vec![dynamic("Q1")])]);

    let state = flow.select("m1").expect("select works");
    assert_eq!(
        *state,
        TakingState::QuestionView {
            assignment_id: "m1".to_string(),
            sub_assignment_id: None,
        }
    );
}

#[test]
fn completed_sub_assignment_cannot_be_restarted() {
    let mut flow = TakingFlow::new(vec![module(
        "m1",
        vec![sub("s1", true), sub("s2", false)],
        vec![],
    )]);
    flow.select("m1").expect("select works");

    let err = flow.start_sub("s1").expect_err("completed sub is locked");
    assert_eq!(err, FlowError::AlreadyCompleted("s1".to_string()));

    // The incomplete one still starts.
    flow.start_sub("s2").expect("incomplete sub starts");
}

#[test]
fn submission_advances_to_sub_list_then_back_to_list() {
    let mut flow = TakingFlow::new(vec![module(
        "m1",
        vec![sub("s1", false), sub("s2", false)],
        vec![],
    )]);

    flow.select("m1").expect("select");
    flow.start_sub("s1").expect("start s1");

    // One incomplete sub remains: back to the sub list.
    let state = flow.record_submission().expect("submit s1");
    assert_eq!(
        *state,
        TakingState::SubList {
            assignment_id: "m1".to_string()
        }
    );

    flow.start_sub("s2").expect("start s2");

    // Nothing incomplete remains: back to the assignment list.
    let state = flow.record_submission().expect("submit s2");
    assert_eq!(*state, TakingState::List);
}

#[test]
fn parent_level_submission_returns_to_list() {
    let mut flow = TakingFlow::new(vec![module("m1", vec![], vec![dynamic("Q1")])]);
    flow.select("m1").expect("select");

    let state = flow.record_submission().expect("submit");
    assert_eq!(*state, TakingState::List);
}

#[test]
fn start_sub_outside_sub_list_is_rejected() {
    let mut flow = TakingFlow::new(vec![module("m1", vec![sub("s1", false)], vec![])]);

    assert_eq!(flow.start_sub("s1"), Err(FlowError::InvalidTransition));
}

#[test]
fn unknown_assignment_is_reported() {
    let mut flow = TakingFlow::new(vec![]);
    assert_eq!(
        flow.select("nope"),
        Err(FlowError::UnknownAssignment("nope".to_string()))
    );
}

#[test]
fn module_list_delete_removes_exactly_one_id() {
    let mut list = ModuleListState::new(vec![
        module("m1", vec![sub("s1", false), sub("s2", true)], vec![]),
        module("m2", vec![sub("s3", false)], vec![]),
    ]);

    list.begin_mutation().expect("overlay claimed");
    list.remove("m1");
    list.finish_mutation();

    assert_eq!(list.modules().len(), 1);
    assert_eq!(list.modules()[0].id, "m2");
    // The surviving module's sub-assignments are untouched.
    assert_eq!(list.modules()[0].sub_assignments.len(), 1);
    assert_eq!(list.modules()[0].sub_assignments[0].id, "s3");
}

#[test]
fn second_mutation_is_blocked_while_busy() {
    let mut list = ModuleListState::new(vec![module("m1", vec![], vec![])]);

    list.begin_mutation().expect("first claim works");
    assert_eq!(list.begin_mutation(), Err(FlowError::Busy));

    list.finish_mutation();
    list.begin_mutation().expect("claim works again after release");
}

#[test]
fn question_panel_renders_dynamic_and_predefined_entries() {
    let questions = vec![
        dynamic("Which code applies?"),
        Question::Predefined {
            answer_key: AnswerKey {
                icd_codes: vec!["A01.1".to_string()],
                cpt_codes: vec!["99283".to_string(), "99284".to_string()],
                ..AnswerKey::default()
            },
        },
    ];

    let panel = question_panel(&questions);
    assert!(panel.contains("1. Which code applies? [A, B]"));
    assert!(panel.contains("2. Predefined answer key (1 ICD, 2 CPT)"));
}
