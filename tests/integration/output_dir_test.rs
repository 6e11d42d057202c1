use tempfile::TempDir;
use tunedl::core::batch::prepare_output_dir;
use tunedl::platform::{resolve_output_dir, DEFAULT_OUTPUT_FOLDER};
use tunedl::ui::{output_folder_prompt, PlainReporter};
use tunedl::Config;

#[test]
fn test_blank_output_folder_resolves_to_desktop_music_and_is_created() {
    let temp = TempDir::new().unwrap();
    let desktop = temp.path().join("Desktop");

    let resolved = resolve_output_dir("", Some(desktop.as_path())).unwrap();
    assert_eq!(resolved, desktop.join(DEFAULT_OUTPUT_FOLDER));
    assert!(!resolved.exists());

    let reporter = PlainReporter::new(Vec::new());
    prepare_output_dir(&resolved, &reporter).unwrap();

    assert!(resolved.is_dir());
    assert_eq!(
        reporter.contents(),
        format!("[info] Created folder: {}\n", resolved.display())
    );
}

#[test]
fn test_existing_output_folder_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let reporter = PlainReporter::new(Vec::new());

    prepare_output_dir(temp.path(), &reporter).unwrap();

    assert!(reporter.contents().is_empty());
}

#[test]
fn test_blank_answer_ignores_remembered_folder() {
    let temp = TempDir::new().unwrap();
    let desktop = temp.path().join("Desktop");
    let previous = temp.path().join("Previous");

    let mut config = Config::default();
    config.set_last_output_dir(&previous);
    let remembered = config.last_output_dir.as_deref();

    // The remembered folder is only named in the question
    assert!(output_folder_prompt(remembered).contains(&*previous.to_string_lossy()));

    let resolved = resolve_output_dir("", Some(desktop.as_path())).unwrap();
    assert_eq!(resolved, desktop.join(DEFAULT_OUTPUT_FOLDER));

    let typed = resolve_output_dir(&previous.to_string_lossy(), Some(desktop.as_path())).unwrap();
    assert_eq!(typed, previous);
}
