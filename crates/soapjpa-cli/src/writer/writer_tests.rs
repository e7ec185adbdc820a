#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

#[test]
fn OutputWriter___path_of___maps_package_to_directories() {
    let writer = OutputWriter::new("/out");

    let path = writer.path_of(&SourceFile::new("com.pi", "OfferJPA"));

    assert_eq!(path, Path::new("/out/com/pi/OfferJPA.java"));
}

#[test]
fn OutputWriter___write_if_absent___creates_directories_and_file() {
    let dir = TempDir::new().unwrap();
    let writer = OutputWriter::new(dir.path());
    let file = SourceFile::new("com.pi", "OfferJPA");

    let outcome = writer
        .write_if_absent(&file, || "class OfferJPA {}".to_string())
        .unwrap();

    assert_eq!(outcome, WriteOutcome::Created);
    let written = fs::read_to_string(dir.path().join("com/pi/OfferJPA.java")).unwrap();
    assert_eq!(written, "class OfferJPA {}");
}

#[test]
fn OutputWriter___write_if_absent___existing_file_skipped_without_render() {
    let dir = TempDir::new().unwrap();
    let writer = OutputWriter::new(dir.path());
    let file = SourceFile::new("com.pi", "OfferJPA");
    writer.write(&file, "hand edited").unwrap();

    let outcome = writer
        .write_if_absent(&file, || panic!("rendered an existing file"))
        .unwrap();

    assert_eq!(outcome, WriteOutcome::Skipped);
    let content = fs::read_to_string(writer.path_of(&file)).unwrap();
    assert_eq!(content, "hand edited");
}

#[test]
fn OutputWriter___write___overwrites() {
    let dir = TempDir::new().unwrap();
    let writer = OutputWriter::new(dir.path());
    let file = SourceFile::new("org.apache.maven.soap.jpa.factory", "JPAEntitiesFactory");
    writer.write(&file, "first").unwrap();

    let outcome = writer.write(&file, "second").unwrap();

    assert_eq!(outcome, WriteOutcome::Created);
    assert_eq!(fs::read_to_string(writer.path_of(&file)).unwrap(), "second");
}

#[test]
fn OutputWriter___write___unwritable_root_fails() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let writer = OutputWriter::new(&blocker);

    let result = writer.write(&SourceFile::new("a", "B"), "x");

    assert!(result.is_err());
}
