use okshow_core::{Config, Discard, Document, Palette, Renderer};
use std::fs;
use std::path::Path;

fn test_fixture(name: &str) {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let input_path = fixtures_dir.join(format!("{name}.ok"));
    let expected_path = fixtures_dir.join(format!("{name}.expected"));

    let input = fs::read_to_string(&input_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", input_path.display()));
    let expected = fs::read_to_string(&expected_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", expected_path.display()));

    let config = Config {
        palette: Palette::plain(),
        ..Config::default()
    };
    let document = Document::analyze(&input, &config, &mut Discard);
    let result = Renderer::new(&document, &config).document(&document);

    assert_eq!(
        result, expected,
        "Fixture {name} did not match expected output"
    );
}

macro_rules! fixture_tests {
    ($($name:ident),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                test_fixture(stringify!($name));
            }
        )*
    };
}

fixture_tests!(simple, sections, named, wrapping);
