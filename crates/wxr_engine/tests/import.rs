use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wxr_engine::{run_import, ImportConfig, ImportError, DEFAULT_INPUT};

const SAMPLE_EXPORT: &str = include_str!("fixtures/sample-export.xml");

fn init_logging() {
    wxr_logging::initialize_for_tests();
}

fn config_with_export(base: &Path, xml: &str) -> ImportConfig {
    let config = ImportConfig::default_with_base(base);
    fs::create_dir_all(config.input_path.parent().unwrap()).unwrap();
    fs::write(&config.input_path, xml).unwrap();
    config
}

fn listed(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn wrap_items(items: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:wp="http://wordpress.org/export/1.2/">
<channel><title>Site</title>{items}</channel>
</rss>"#
    )
}

#[test]
fn only_published_posts_are_written() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let config = config_with_export(temp.path(), SAMPLE_EXPORT);

    let summary = run_import(&config).unwrap();

    assert_eq!(summary.items_seen, 3);
    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 2);
    assert!(summary.collisions.is_empty());
    assert_eq!(listed(&config.output_dir), vec!["fish-and-chips.html".to_string()]);
}

#[test]
fn written_document_carries_escaped_fields_and_clean_content() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let config = config_with_export(temp.path(), SAMPLE_EXPORT);
    run_import(&config).unwrap();

    let html = fs::read_to_string(config.output_dir.join("fish-and-chips.html")).unwrap();
    assert!(html.contains("<title>Fish &amp; Chips &lt;Friday&gt;</title>"));
    assert!(html.contains("<h1>Fish &amp; Chips &lt;Friday&gt;</h1>"));
    assert!(html.contains(
        r#"<link rel="canonical" href="https://www.example.com/2024/09/fish-and-chips/">"#
    ));
    assert!(html.contains(r#"<time datetime="2024-09-14T10:00:00.000Z">"#));
    assert!(html.contains("<p>Batter &amp; <strong>fry</strong>.</p>"));
    assert!(!html.contains("wp:paragraph"));
    assert!(html.contains("<footer><p>Categories: Food, R&amp;D</p></footer>"));
}

#[test]
fn single_item_channel_is_accepted() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let xml = wrap_items(
        "<item><title>Only One</title><wp:post_type>post</wp:post_type><wp:status>publish</wp:status></item>",
    );
    let config = config_with_export(temp.path(), &xml);

    let summary = run_import(&config).unwrap();
    assert_eq!(summary.written, 1);
    assert_eq!(listed(&config.output_dir), vec!["only-one.html".to_string()]);
}

#[test]
fn unparsable_date_does_not_stop_the_run() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let xml = wrap_items(concat!(
        "<item><title>Odd Date</title><pubDate>not-a-date</pubDate>",
        "<wp:post_type>post</wp:post_type><wp:status>publish</wp:status></item>",
        "<item><title>Fine</title><pubDate>Sat, 14 Sep 2024 10:00:00 +0000</pubDate>",
        "<wp:post_type>post</wp:post_type><wp:status>publish</wp:status></item>",
    ));
    let config = config_with_export(temp.path(), &xml);

    let summary = run_import(&config).unwrap();
    assert_eq!(summary.written, 2);
    let html = fs::read_to_string(config.output_dir.join("odd-date.html")).unwrap();
    assert!(html.contains("<time>not-a-date</time>"));
}

#[test]
fn latin1_byte_in_export_is_replaced_and_post_written() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let config = ImportConfig::default_with_base(temp.path());
    fs::create_dir_all(config.input_path.parent().unwrap()).unwrap();
    let mut bytes = b"<rss><channel><item><title>Caf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(
        b" Society</title><wp:post_type>post</wp:post_type><wp:status>publish</wp:status></item></channel></rss>",
    );
    fs::write(&config.input_path, bytes).unwrap();

    let summary = run_import(&config).unwrap();
    assert_eq!(summary.written, 1);
    assert_eq!(listed(&config.output_dir), vec!["caf-society.html".to_string()]);
    let html = fs::read_to_string(config.output_dir.join("caf-society.html")).unwrap();
    assert!(html.contains("<h1>Caf\u{FFFD} Society</h1>"));
}

#[test]
fn colliding_names_are_reported_and_last_write_wins() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let xml = wrap_items(concat!(
        "<item><title>Hello World</title><content:encoded>first</content:encoded>",
        "<wp:post_type>post</wp:post_type><wp:status>publish</wp:status></item>",
        "<item><title>Hello, World!</title><content:encoded>second</content:encoded>",
        "<wp:post_type>post</wp:post_type><wp:status>publish</wp:status></item>",
    ));
    let config = config_with_export(temp.path(), &xml);

    let summary = run_import(&config).unwrap();
    assert_eq!(summary.written, 2);
    assert_eq!(summary.collisions, vec!["hello-world.html".to_string()]);
    assert_eq!(listed(&config.output_dir), vec!["hello-world.html".to_string()]);
    let html = fs::read_to_string(config.output_dir.join("hello-world.html")).unwrap();
    assert!(html.contains("second"));
    assert!(!html.contains("first"));
}

#[test]
fn missing_export_fails_after_creating_output_dir() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let config = ImportConfig::default_with_base(temp.path());

    let err = run_import(&config).unwrap_err();
    assert!(matches!(err, ImportError::InputUnavailable { .. }));
    assert!(err.to_string().contains("wordpress-export.xml"));
    assert!(config.output_dir.is_dir());
    assert!(listed(&config.output_dir).is_empty());
}

#[test]
fn malformed_export_is_fatal_without_snapshot() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let config = config_with_export(temp.path(), "<rss><channel><item></channel></rss>");

    let err = run_import(&config).unwrap_err();
    assert!(matches!(err, ImportError::InputMalformed { .. }), "{err}");
    assert!(!config.snapshot_path().exists());
}

#[test]
fn channel_without_items_writes_snapshot() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let config = config_with_export(temp.path(), &wrap_items(""));

    let err = run_import(&config).unwrap_err();
    assert!(matches!(err, ImportError::NoItems { .. }));
    assert_eq!(err.snapshot(), Some(&config.snapshot_path()));

    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.snapshot_path()).unwrap()).unwrap();
    assert_eq!(snapshot["rss"]["version"], "2.0");
    assert_eq!(snapshot["rss"]["channel"]["title"], "Site");
    assert_eq!(listed(&config.output_dir), vec!["parsed-debug.json".to_string()]);
}

#[test]
fn document_without_channel_writes_snapshot() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let config = config_with_export(temp.path(), "<feed><entry><title>x</title></entry></feed>");

    let err = run_import(&config).unwrap_err();
    assert!(matches!(err, ImportError::MissingChannel { .. }));

    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.snapshot_path()).unwrap()).unwrap();
    assert_eq!(snapshot["feed"]["entry"]["title"], "x");
}

#[test]
fn default_layout_is_relative_to_base() {
    let config = ImportConfig::default_with_base(Path::new("/srv/site"));
    assert_eq!(config.input_path, PathBuf::from("/srv/site").join(DEFAULT_INPUT));
    assert_eq!(config.output_dir, PathBuf::from("/srv/site/artifacts/posts"));
    assert_eq!(config.snapshot_path(), PathBuf::from("/srv/site/artifacts/posts/parsed-debug.json"));
    assert_eq!(config.document_extension, "html");
}
