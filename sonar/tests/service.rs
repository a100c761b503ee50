use std::io::Cursor;

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use sonar::{
    ActivityStatus, JsonDirStore, JsonlWarehouse, MemoryStore, MemoryWarehouse, ResponseRow,
    ScriptedForm, Segment, ServiceError, Survey, SurveyService, SurveyType,
};
use zip::ZipArchive;

fn brand_lift_form() -> ScriptedForm {
    ScriptedForm::new()
        .with_field("surveyname", "Spring Promo")
        .with_field("surveytype", "brand_lift")
        .with_field("question1", "Have you seen our ad?")
        .with_field("answer1a", "Yes")
        .with_field("answer1anext", "2")
        .with_field("answer1b", "No")
        .with_field("answer1bnext", "end")
        .with_field("question2", "Where?")
        .with_field("question2type", "MULTIPLE_OPTION")
        .with_field("answer2a", "TV")
        .with_field("answer2b", "Online")
}

fn at(day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

#[test]
fn create_then_report() {
    let service = SurveyService::new(MemoryStore::new(), MemoryWarehouse::new());
    let id = service.create_with(&brand_lift_form()).unwrap();

    service
        .warehouse()
        .record(id.as_str(), ResponseRow::new(at(8), "default_expose", "1:A|2:A"));
    service
        .warehouse()
        .record(id.as_str(), ResponseRow::new(at(9), "default_control", "1:B"));

    let report = service.report(&id).unwrap();
    assert_eq!(report.survey.name, "Spring Promo");
    assert_eq!(report.tables.len(), 2);
    assert_eq!(report.tables[0].share(Segment::Expose, "A"), Some(1.0));
    assert_eq!(report.tables[0].lift_for("B"), Some(-1.0));

    let index = service.index(today(), false).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].activity.status, ActivityStatus::Active);
    assert_eq!(index[0].activity.last_change, 1);
    assert!(index[0].has_reporting());
    assert_eq!(index[0].question_text(), vec!["Have you seen our ad?", "Where?"]);
}

#[test]
fn invalid_submission_writes_nothing() {
    let service = SurveyService::new(MemoryStore::new(), MemoryWarehouse::new());
    let survey = Survey::new("Broken");

    match service.create(&survey).unwrap_err() {
        ServiceError::Validation(errors) => {
            assert!(errors.for_field("question1").count() > 0);
            assert!(errors.for_field("surveyname").next().is_none());
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(service.store().is_empty());
}

#[test]
fn link_to_empty_question_is_rejected_by_form() {
    let service = SurveyService::new(MemoryStore::new(), MemoryWarehouse::new());
    let form = brand_lift_form().with_field("answer1bnext", "4");

    let error = service.create_with(&form).unwrap_err();
    assert!(matches!(error, ServiceError::Form(_)));
    assert!(error.to_string().contains(
        "Answer B from question 1 linked to this question, please fill in this section."
    ));
    assert!(service.store().is_empty());
}

#[test]
fn edit_keeps_untouched_fields_and_archive_hides() {
    let service = SurveyService::new(MemoryStore::new(), MemoryWarehouse::new());
    let id = service.create_with(&brand_lift_form()).unwrap();

    service
        .edit_with(&id, &ScriptedForm::new().with_field("surveyname", "Summer Promo"))
        .unwrap();
    let survey = service.get(&id).unwrap();
    assert_eq!(survey.name, "Summer Promo");
    assert_eq!(survey.survey_type, SurveyType::BrandLift);

    service.set_archived(&id, true).unwrap();
    assert!(service.index(today(), false).unwrap().is_empty());
    assert_eq!(service.index(today(), true).unwrap().len(), 1);

    service.delete(&id).unwrap();
    assert!(service.get(&id).unwrap_err().is_not_found());
    assert!(
        service
            .edit_with(&id, &ScriptedForm::new())
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn editing_can_return_to_the_default_stylesheet() {
    let service = SurveyService::new(MemoryStore::new(), MemoryWarehouse::new());
    let form = brand_lift_form().with_field("custom_css", ".Qbox { color: red; }");
    let id = service.create_with(&form).unwrap();
    assert!(service.get(&id).unwrap().custom_css.is_some());

    service
        .edit_with(&id, &ScriptedForm::new().with_field("custom_css", ""))
        .unwrap();
    assert_eq!(service.get(&id).unwrap().custom_css, None);

    let mut survey = service.get(&id).unwrap();
    survey.custom_css = Some(".x{}".to_string());
    service.update(&id, &survey).unwrap();
    survey.custom_css = None;
    service.update(&id, &survey).unwrap();
    assert_eq!(service.get(&id).unwrap().custom_css, None);
}

#[test]
fn exports_from_file_backed_service() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::open(dir.path().join("surveys")).unwrap();
    let warehouse = JsonlWarehouse::open(dir.path().join("responses.jsonl"));
    let service = SurveyService::new(store, warehouse)
        .with_receiver_url(Some("https://receiver.example/collect".to_string()));

    let id = service.create_with(&brand_lift_form()).unwrap();
    service
        .warehouse()
        .append(&id, &ResponseRow::new(at(1), "default_expose", "1:A|2:AB"))
        .unwrap();

    let csv = service.responses_csv_with_context(&id).unwrap();
    assert_eq!(
        csv,
        "Date,Control/Expose,Dimension 2,Have you seen our ad?,Where?\n\
         2024-03-01 12:00:00+00:00,default_expose,,A,AB\n"
    );
    assert!(
        service
            .responses_csv(&id)
            .unwrap()
            .starts_with("Date,Control/Expose,Dimension 2,Response 1,Response 2\n")
    );

    let preview = service.preview(&id).unwrap();
    assert!(preview.contains("\"segmentation\":\"preview\""));
    assert!(preview.contains("id=\"back_button\""));

    let export = service
        .export_zip(&id, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        .unwrap();
    assert_eq!(export.file_name, "20240301_Spring-Promo.zip");
    let archive = zip_names(export.data);
    assert_eq!(
        archive,
        vec![
            "20240301_Spring-Promo_default_control.zip",
            "20240301_Spring-Promo_default_expose.zip",
        ]
    );

    let index = service.index(today(), false).unwrap();
    assert_eq!(index[0].activity.status, ActivityStatus::Stale);
}

fn zip_names(data: Vec<u8>) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    names
}
