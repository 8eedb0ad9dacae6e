use std::io::Write;

use roster_form::form::FormController;
use roster_form::preview::{load_preview, AvatarSource, SelectedImage};
use tempfile::NamedTempFile;

fn image_file(suffix: &str, bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file
}

#[tokio::test]
async fn latest_selection_wins_when_reads_finish_out_of_order() {
    let first = image_file(".png", b"first");
    let second = image_file(".gif", b"second");

    let mut form = FormController::default();
    let first_ticket = form
        .select_image(Some(SelectedImage::from_path(first.path())))
        .unwrap();
    let second_ticket = form
        .select_image(Some(SelectedImage::from_path(second.path())))
        .unwrap();

    let second_loaded = load_preview(second_ticket).await.unwrap();
    let first_loaded = load_preview(first_ticket).await.unwrap();

    assert!(form.apply_preview(second_loaded.clone()));
    assert!(!form.apply_preview(first_loaded));
    assert_eq!(form.avatar(), &AvatarSource::Preview(second_loaded.data_url));
    assert!(form.avatar().src().starts_with("data:image/gif;base64,"));
    assert_eq!(
        form.pending_image().map(|image| image.path.as_path()),
        Some(second.path())
    );
}

#[tokio::test]
async fn preview_applies_after_edit_began() {
    let file = image_file(".jpg", b"jpeg-bytes");
    let mut form = FormController::default();
    form.begin_edit(
        &roster_form::domain::Record::new("101", "DOE", "JANE", "bscs", "1").with_image("a.png"),
    );

    let ticket = form
        .select_image(Some(SelectedImage::from_path(file.path())))
        .unwrap();
    let loaded = load_preview(ticket).await.unwrap();
    assert!(form.apply_preview(loaded));
    assert!(form.avatar().src().starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn failed_read_leaves_nothing_to_upload() {
    let file = image_file(".png", b"gone");
    let path = file.path().to_path_buf();
    let mut form = FormController::default();

    let ticket = form
        .select_image(Some(SelectedImage::from_path(&path)))
        .unwrap();
    let generation = ticket.generation;
    drop(file);

    assert!(load_preview(ticket).await.is_err());
    assert!(form.discard_selection(generation));
    assert!(form.pending_image().is_none());
    assert!(form.avatar().is_placeholder());
}

#[test]
fn discarding_a_superseded_read_keeps_the_newer_selection() {
    let mut form = FormController::default();
    let first = form
        .select_image(Some(SelectedImage::from_path("/tmp/one.png")))
        .unwrap();
    form.select_image(Some(SelectedImage::from_path("/tmp/two.png")))
        .unwrap();

    assert!(!form.discard_selection(first.generation));
    assert_eq!(form.pending_image().unwrap().file_name, "two.png");
}
