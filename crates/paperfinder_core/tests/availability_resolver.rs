use chrono::NaiveDate;
use paperfinder_core::{
    ArtifactKind, AvailabilityResolver, FsAssetProbe, IndexedAssetProbe, PaperCatalog, PruneMode,
    ResolveOptions, ResolveRequest,
};
use std::fs;
use std::path::Path;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn touch(root: &Path, subject: &str, file: &str) {
    let dir = root.join(subject);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), b"%PDF-1.4").unwrap();
}

fn resolver(root: &Path, prune: PruneMode) -> AvailabilityResolver<FsAssetProbe> {
    AvailabilityResolver::new(
        FsAssetProbe::new(root),
        ResolveOptions {
            public_prefix: "/static/yearly_papers".to_string(),
            prune,
        },
    )
}

#[test]
fn single_question_paper_is_found_under_expected_labels() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "PHY", "PHY_w23_qp_12.pdf");

    let papers: PaperCatalog = [("1", "Core")].into_iter().collect();
    let variants = strings(&["2"]);
    let sessions = strings(&["w"]);
    let kinds = ArtifactKind::ALL;
    let request = ResolveRequest {
        subject_code: "PHY",
        start_year: 2023,
        end_year: 2023,
        papers: &papers,
        variants: &variants,
        sessions: &sessions,
        kinds: &kinds,
    };

    let result = resolver(dir.path(), PruneMode::PruneEmpty).resolve(&request, date(2024, 3, 1));

    let paper = result
        .year("2023")
        .and_then(|year| year.session("Oct/Nov 2023"))
        .and_then(|session| session.paper("Paper 1: Core"))
        .expect("paper should be present");
    assert_eq!(
        paper.question_papers,
        vec!["/static/yearly_papers/PHY/PHY_w23_qp_12.pdf".to_string()]
    );
    assert!(paper.mark_schemes.is_empty());
    assert_eq!(result.file_count(), 1);
}

#[test]
fn years_descend_and_inverted_range_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let papers: PaperCatalog = [("1", "Core")].into_iter().collect();
    let variants = strings(&["1"]);
    let sessions = strings(&["s"]);
    let kinds = [ArtifactKind::QuestionPaper];
    let mut request = ResolveRequest {
        subject_code: "PHY",
        start_year: 2019,
        end_year: 2022,
        papers: &papers,
        variants: &variants,
        sessions: &sessions,
        kinds: &kinds,
    };
    let keep = resolver(dir.path(), PruneMode::KeepEmpty);

    let result = keep.resolve(&request, date(2024, 1, 1));
    let years: Vec<_> = result.years.iter().map(|y| y.year.as_str()).collect();
    assert_eq!(years, vec!["2022", "2021", "2020", "2019"]);

    request.start_year = 2022;
    request.end_year = 2019;
    assert!(keep.resolve(&request, date(2024, 1, 1)).is_empty());
}

#[test]
fn feb_march_ignores_variants_other_than_two() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "CHEM", "CHEM_m22_qp_11.pdf");
    touch(dir.path(), "CHEM", "CHEM_m22_qp_13.pdf");
    touch(dir.path(), "CHEM", "CHEM_m22_qp_12.pdf");

    let papers: PaperCatalog = [("1", "MCQ")].into_iter().collect();
    let sessions = strings(&["m"]);
    let kinds = ArtifactKind::ALL;
    let resolver = resolver(dir.path(), PruneMode::PruneEmpty);

    let odd_variants = strings(&["1", "3"]);
    let request = ResolveRequest {
        subject_code: "CHEM",
        start_year: 2022,
        end_year: 2022,
        papers: &papers,
        variants: &odd_variants,
        sessions: &sessions,
        kinds: &kinds,
    };
    assert!(resolver.resolve(&request, date(2023, 1, 1)).is_empty());

    let all_variants = strings(&["1", "2", "3"]);
    let request = ResolveRequest {
        variants: &all_variants,
        ..request
    };
    let result = resolver.resolve(&request, date(2023, 1, 1));
    assert_eq!(result.file_count(), 1);
}

#[test]
fn current_oct_nov_is_hidden_until_october() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "BIO", "BIO_w25_qp_21.pdf");

    let papers: PaperCatalog = [("2", "Theory")].into_iter().collect();
    let variants = strings(&["1"]);
    let sessions = strings(&["w"]);
    let kinds = ArtifactKind::ALL;
    let request = ResolveRequest {
        subject_code: "BIO",
        start_year: 2025,
        end_year: 2025,
        papers: &papers,
        variants: &variants,
        sessions: &sessions,
        kinds: &kinds,
    };

    let keep = resolver(dir.path(), PruneMode::KeepEmpty);
    let before = keep.resolve(&request, date(2025, 9, 15));
    assert_eq!(before.years.len(), 1);
    assert!(before.years[0].sessions.is_empty());

    let after = keep.resolve(&request, date(2025, 10, 1));
    assert!(after
        .year("2025")
        .and_then(|y| y.session("Oct/Nov 2025"))
        .and_then(|s| s.paper("Paper 2: Theory"))
        .is_some_and(|p| p.question_papers.len() == 1));
}

#[test]
fn paper_order_and_variant_order_follow_inputs() {
    let dir = tempfile::tempdir().unwrap();
    for file in [
        "ECO_s21_qp_41.pdf",
        "ECO_s21_qp_43.pdf",
        "ECO_s21_ms_43.pdf",
        "ECO_s21_qp_13.pdf",
    ] {
        touch(dir.path(), "ECO", file);
    }

    let papers: PaperCatalog = [("4", "Data Response"), ("1", "MCQ")].into_iter().collect();
    let variants = strings(&["3", "1"]);
    let sessions = strings(&["s", "zz"]);
    let kinds = ArtifactKind::ALL;
    let request = ResolveRequest {
        subject_code: "ECO",
        start_year: 2021,
        end_year: 2021,
        papers: &papers,
        variants: &variants,
        sessions: &sessions,
        kinds: &kinds,
    };
    let result = resolver(dir.path(), PruneMode::PruneEmpty).resolve(&request, date(2022, 1, 1));

    let session = result.year("2021").unwrap().session("May/June 2021").unwrap();
    let labels: Vec<_> = session.papers.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Paper 4: Data Response", "Paper 1: MCQ"]);
    assert_eq!(
        session.papers[0].question_papers,
        vec![
            "/static/yearly_papers/ECO/ECO_s21_qp_43.pdf".to_string(),
            "/static/yearly_papers/ECO/ECO_s21_qp_41.pdf".to_string(),
        ]
    );
    assert_eq!(session.papers[0].mark_schemes.len(), 1);
    assert_eq!(session.short_code, "s21");
}

#[test]
fn missing_subject_directory_resolves_empty() {
    let dir = tempfile::tempdir().unwrap();
    let papers: PaperCatalog = [("1", "Core")].into_iter().collect();
    let variants = strings(&["1", "2", "3"]);
    let sessions = strings(&["w", "s", "m"]);
    let kinds = ArtifactKind::ALL;
    let request = ResolveRequest {
        subject_code: "NONE",
        start_year: 2015,
        end_year: 2024,
        papers: &papers,
        variants: &variants,
        sessions: &sessions,
        kinds: &kinds,
    };

    let direct = resolver(&dir.path().join("absent"), PruneMode::PruneEmpty);
    assert!(direct.resolve(&request, date(2024, 12, 1)).is_empty());

    let indexed = AvailabilityResolver::new(
        IndexedAssetProbe::scan(&dir.path().join("absent"), ["NONE"]),
        ResolveOptions::default(),
    );
    assert!(indexed.resolve(&request, date(2024, 12, 1)).is_empty());
}
