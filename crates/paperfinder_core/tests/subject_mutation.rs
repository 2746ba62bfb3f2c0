use paperfinder_core::{
    AddSubjectRequest, CatalogRepository, JsonCatalogRepository, MutationError, MutationOutcome,
    MutationPolicy, SubjectService, SubmissionError,
};
use std::fs;

fn request(code: &str, name: &str, papers: &str) -> AddSubjectRequest {
    AddSubjectRequest {
        code: code.to_string(),
        name: name.to_string(),
        papers: papers.to_string(),
    }
}

#[test]
fn valid_submission_is_persisted_with_parsed_papers() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonCatalogRepository::new(dir.path().join("subjects.json"), dir.path().join("topics.json"));
    let service = SubjectService::new(&repo, MutationPolicy::SilentDrop);

    let outcome = service
        .add_subject(&request(" 9702 ", "Physics", "1:Multiple Choice, 2:Structured: Section A"))
        .unwrap();
    assert_eq!(
        outcome,
        MutationOutcome::Saved {
            code: "9702".to_string(),
            papers: 2
        }
    );

    let subjects = repo.load_subjects().unwrap();
    let physics = &subjects["9702"];
    assert_eq!(physics.name, "Physics");
    assert_eq!(physics.papers.get("1"), Some("Multiple Choice"));
    assert_eq!(physics.papers.get("2"), Some("Structured: Section A"));
}

#[test]
fn resubmission_overwrites_existing_subject() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonCatalogRepository::new(dir.path().join("subjects.json"), dir.path().join("topics.json"));
    let service = SubjectService::new(&repo, MutationPolicy::SilentDrop);

    service.add_subject(&request("0625", "Physics", "1:MCQ")).unwrap();
    service.add_subject(&request("0620", "Chemistry", "1:MCQ")).unwrap();
    service
        .add_subject(&request("0625", "Physics IGCSE", "2:Theory"))
        .unwrap();

    let subjects = repo.load_subjects().unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects["0625"].name, "Physics IGCSE");
    assert_eq!(subjects["0625"].papers.get("1"), None);
}

#[test]
fn silent_policy_discards_invalid_input_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonCatalogRepository::new(dir.path().join("subjects.json"), dir.path().join("topics.json"));
    let service = SubjectService::new(&repo, MutationPolicy::SilentDrop);

    let outcome = service
        .add_subject(&request("9702", "Physics", "no colons here"))
        .unwrap();
    assert_eq!(outcome, MutationOutcome::Discarded(SubmissionError::NoPapers));
    assert!(!dir.path().join("subjects.json").exists());
}

#[test]
fn strict_policy_reports_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonCatalogRepository::new(dir.path().join("subjects.json"), dir.path().join("topics.json"));
    let service = SubjectService::new(&repo, MutationPolicy::Strict);

    let err = service.add_subject(&request("", "Physics", "1:MCQ")).unwrap_err();
    assert!(matches!(err, MutationError::Invalid(SubmissionError::EmptyCode)));

    let err = service.add_subject(&request("9702", " ", "1:MCQ")).unwrap_err();
    assert!(matches!(err, MutationError::Invalid(SubmissionError::EmptyName)));
}

#[test]
fn malformed_catalog_is_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let subjects_path = dir.path().join("subjects.json");
    fs::write(&subjects_path, "[broken").unwrap();
    let repo = JsonCatalogRepository::new(&subjects_path, dir.path().join("topics.json"));
    let service = SubjectService::new(&repo, MutationPolicy::SilentDrop);

    let err = service.add_subject(&request("9702", "Physics", "1:MCQ")).unwrap_err();
    assert!(matches!(err, MutationError::Catalog(_)));
    assert_eq!(fs::read_to_string(&subjects_path).unwrap(), "[broken");
}
