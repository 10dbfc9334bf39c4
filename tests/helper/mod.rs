use std::fs;
use std::path::PathBuf;

use tinyscript::compile;
use tinyscript::constants::common::SOURCE_EXT;

const PATH_TO_TEST_FILES: &str = "static/test_files";

/// Compiles the program in `static/test_files/<test_name>` and compares the pretty-printed
/// tree, or the diagnostics when compilation fails, with the `output` file next to it.
pub fn test_with(test_name: &str) {
    let path_to_test = format!("{PATH_TO_TEST_FILES}/{test_name}");

    let files = fs::read_dir(path_to_test)
        .unwrap()
        .map(Result::unwrap)
        .map(|entry| {
            let os_filename = entry.file_name();
            let filename = os_filename.to_string_lossy();
            (filename.into_owned(), entry.path())
        })
        .collect::<Vec<(String, PathBuf)>>();
    let (_, output) = files
        .iter()
        .find(|(filename, _)| filename == "output")
        .unwrap();
    let output = fs::read_to_string(output).unwrap();

    let program = files
        .iter()
        .find(|(filename, _)| filename.ends_with(SOURCE_EXT))
        .map(|(_, file)| fs::read_to_string(file).unwrap())
        .unwrap();

    test_output(&program, &output);
}

fn test_output(source_code: &str, expected: &str) {
    let actual = match compile(source_code) {
        Ok(program) => program.to_string(),
        Err(error) => format!("{error}\n"),
    };
    assert_eq!(actual, expected);
}
