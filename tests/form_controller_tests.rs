use roster_form::api::{Operation, PayloadImage};
use roster_form::domain::{Record, RecordField, RecordTable};
use roster_form::form::{FormController, FormFields, FormMode, ValidationError};
use roster_form::preview::SelectedImage;

fn table() -> RecordTable {
    RecordTable::new(vec![
        Record::new("101", "DOE", "JANE", "bscs", "1").with_image("a.png"),
        Record::new("102", "ROE", "RICHARD", "bsit", "2"),
    ])
}

fn fill(form: &mut FormController, id: &str) {
    form.fill(&FormFields {
        id: id.into(),
        last_name: "Santos".into(),
        first_name: "Maria".into(),
        course: "bscs".into(),
        level: "3".into(),
    });
}

#[test]
fn create_with_new_id_resolves_create_request() {
    let rows = table();
    let mut form = FormController::default();
    form.begin_create();
    fill(&mut form, "103");

    let request = form.validate_and_submit(rows.ids()).unwrap();
    assert_eq!(request.operation, Operation::Create);
    assert_eq!(request.payload.id, "103");
    assert_eq!(request.payload.last_name, "SANTOS");
    assert_eq!(request.payload.image, PayloadImage::None);
    assert_eq!(request.route(), "/add");
}

#[test]
fn create_payload_is_trimmed() {
    let rows = table();
    let mut form = FormController::default();
    form.fill(&FormFields {
        id: "  104 ".into(),
        last_name: " Santos".into(),
        first_name: "Maria  ".into(),
        course: "\tbscs".into(),
        level: " 3 ".into(),
    });

    let payload = form.validate_and_submit(rows.ids()).unwrap().payload;
    assert_eq!(payload.id, "104");
    assert_eq!(payload.last_name, "SANTOS");
    assert_eq!(payload.first_name, "MARIA");
    assert_eq!(payload.course, "bscs");
    assert_eq!(payload.level, "3");
}

#[test]
fn create_with_existing_id_is_duplicate() {
    let rows = table();
    for id in ["101", "102", " 101 "] {
        let mut form = FormController::default();
        fill(&mut form, id);
        assert_eq!(
            form.validate_and_submit(rows.ids()),
            Err(ValidationError::DuplicateId(id.trim().to_string()))
        );
    }
}

#[test]
fn edit_keeping_own_id_never_collides() {
    let rows = table();
    let mut form = FormController::default();
    form.begin_edit(rows.find("101").unwrap());
    form.set_field(RecordField::FirstName, "Janet");

    // With and without the edited id among the known ids.
    let with_own = form.validate_and_submit(rows.ids()).unwrap();
    let without_own = form.validate_and_submit(["102"]).unwrap();
    assert_eq!(with_own, without_own);
    assert_eq!(
        with_own.operation,
        Operation::Update {
            id: "101".to_string()
        }
    );
}

#[test]
fn edit_preserves_stored_image_when_none_selected() {
    let rows = table();
    let mut form = FormController::default();
    form.begin_edit(rows.find("101").unwrap());
    form.set_field(RecordField::Level, "2");
    form.set_field(RecordField::LastName, "Doe-Smith");

    let request = form.validate_and_submit(rows.ids()).unwrap();
    assert_eq!(request.route(), "/update/101");
    assert_eq!(request.payload.image, PayloadImage::Stored("a.png".into()));
    assert_eq!(request.payload.last_name, "DOE-SMITH");
    assert_eq!(request.payload.level, "2");
}

#[test]
fn edit_with_new_image_uploads_it() {
    let rows = table();
    let mut form = FormController::default();
    form.begin_edit(rows.find("101").unwrap());
    let image = SelectedImage::from_path("/tmp/new.jpg");
    form.select_image(Some(image.clone())).unwrap();

    let request = form.validate_and_submit(rows.ids()).unwrap();
    assert_eq!(request.payload.image, PayloadImage::Upload(image));
}

#[test]
fn edit_without_stored_image_sends_none() {
    let rows = table();
    let mut form = FormController::default();
    form.begin_edit(rows.find("102").unwrap());
    let request = form.validate_and_submit(rows.ids()).unwrap();
    assert_eq!(request.payload.image, PayloadImage::None);
}

#[test]
fn edit_to_another_existing_id_is_duplicate() {
    let rows = table();
    let mut form = FormController::default();
    form.begin_edit(rows.find("101").unwrap());
    form.set_field(RecordField::Id, "102");

    assert_eq!(
        form.validate_and_submit(rows.ids()),
        Err(ValidationError::DuplicateId("102".into()))
    );
}

#[test]
fn edit_may_move_to_a_free_id() {
    let rows = table();
    let mut form = FormController::default();
    form.begin_edit(rows.find("101").unwrap());
    form.set_field(RecordField::Id, "150");

    let request = form.validate_and_submit(rows.ids()).unwrap();
    assert_eq!(request.route(), "/update/101");
    assert_eq!(request.payload.id, "150");
}

#[test]
fn blank_or_whitespace_field_is_missing() {
    let rows = table();
    for field in RecordField::ALL {
        for blank in ["", "   ", "\t"] {
            let mut form = FormController::default();
            fill(&mut form, "103");
            form.set_field(field, blank);
            assert_eq!(
                form.validate_and_submit(rows.ids()),
                Err(ValidationError::MissingField(field))
            );
        }
    }
}

#[test]
fn missing_field_wins_over_duplicate_id() {
    let rows = table();
    let mut form = FormController::default();
    fill(&mut form, "101");
    form.set_field(RecordField::LastName, "");
    assert_eq!(
        form.validate_and_submit(rows.ids()),
        Err(ValidationError::MissingField(RecordField::LastName))
    );
}

#[test]
fn failed_submission_leaves_state_unchanged() {
    let rows = table();
    let mut form = FormController::default();
    form.begin_edit(rows.find("101").unwrap());
    form.set_field(RecordField::Id, "102");
    let before = form.state().clone();

    assert!(form.validate_and_submit(rows.ids()).is_err());
    assert_eq!(form.state(), &before);
}

#[test]
fn begin_create_after_edit_clears_everything() {
    let rows = table();
    let mut form = FormController::default();
    form.begin_edit(rows.find("101").unwrap());
    assert_eq!(form.avatar().src(), "/static/images/a.png");
    form.select_image(Some(SelectedImage::from_path("/tmp/new.png")));

    form.begin_create();
    assert_eq!(form.mode(), &FormMode::Create);
    assert_eq!(form.mode().editing_id(), None);
    assert!(form.pending_image().is_none());
    assert!(form.avatar().is_placeholder());
    assert_eq!(form.fields(), &FormFields::default());
    assert_eq!(form.submit_label(), "SAVE");
}

#[test]
fn begin_edit_without_image_shows_placeholder() {
    let rows = table();
    let mut form = FormController::default();
    form.begin_edit(rows.find("101").unwrap());
    form.begin_edit(rows.find("102").unwrap());
    assert!(form.avatar().is_placeholder());
    assert_eq!(form.mode().editing_id(), Some("102"));
}

#[test]
fn select_image_without_file_is_noop() {
    let mut form = FormController::default();
    let before = form.state().clone();
    assert!(form.select_image(None).is_none());
    assert_eq!(form.state(), &before);
}

#[test]
fn edit_mirrors_names_verbatim_when_uppercasing_is_off() {
    let config = roster_form::config::Config {
        uppercase_input: false,
        ..Default::default()
    };
    let mut form = FormController::new(config);
    form.begin_edit(&Record::new("101", "Doe", "Jane", "BSCS", "1"));

    assert_eq!(form.fields().last_name, "Doe");
    let request = form.validate_and_submit(["101"]).unwrap();
    assert_eq!(request.payload.last_name, "Doe");
    assert_eq!(request.payload.first_name, "Jane");
    assert_eq!(request.payload.course, "bscs");
}

#[test]
fn edit_keeps_stored_image_name_untouched() {
    let mut form = FormController::default();
    form.begin_edit(&Record::new("101", "DOE", "JANE", "bscs", "1").with_image(" a.png "));

    let request = form.validate_and_submit(["101"]).unwrap();
    assert_eq!(request.payload.image, PayloadImage::Stored(" a.png ".into()));
}
