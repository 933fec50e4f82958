use std::io::Write;
use std::path::Path;

use ls8_runner::{Executor, ExecutorConfiguration, ProgramLoader};
use tempfile::NamedTempFile;

#[test]
fn test_load_and_run_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "# print 3\n\
         10000010 # LDI R0,3\n\
         00000000\n\
         00000011\n\
         01000111 # PRN R0\n\
         00000000\n\
         00000001 # HLT"
    )
    .unwrap();

    let program = ProgramLoader::from_file(file.path()).unwrap();
    assert_eq!(vec![0x82, 0x00, 0x03, 0x47, 0x00, 0x01], program);

    let mut output: Vec<u8> = Vec::new();
    let report = Executor::new(ExecutorConfiguration::default())
        .run(&program, &mut output, Vec::new())
        .unwrap();
    assert_eq!("3\n", String::from_utf8(output).unwrap());
    assert_eq!(3, report.steps);
}

#[test]
fn test_missing_file() {
    let error = ProgramLoader::from_file(Path::new("/this/file/does/not/exist.ls8")).unwrap_err();
    assert!(error.to_string().contains("could not open program file"));
}

#[test]
fn test_invalid_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "10000010\n00000000\n0000100\n").unwrap();

    let error = ProgramLoader::from_file(file.path()).unwrap_err();
    assert_eq!("line 3: invalid program line '0000100'", error.to_string());
}

#[test]
fn test_empty_file() {
    let file = NamedTempFile::new().unwrap();
    let program = ProgramLoader::from_file(file.path()).unwrap();
    assert!(program.is_empty());
}
