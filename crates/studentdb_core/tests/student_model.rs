use studentdb_core::{StudentRecord, StudentValidationError};

#[test]
fn valid_record_passes_validation() {
    let student = StudentRecord::new("1", "Alice", "20");
    assert!(student.validate().is_ok());
}

#[test]
fn each_empty_field_is_reported_by_name() {
    assert_eq!(
        StudentRecord::new("", "Alice", "20").validate(),
        Err(StudentValidationError::EmptyId)
    );
    assert_eq!(
        StudentRecord::new("1", "", "20").validate(),
        Err(StudentValidationError::EmptyName)
    );
    assert_eq!(
        StudentRecord::new("1", "Alice", "").validate(),
        Err(StudentValidationError::EmptyAge)
    );
}

#[test]
fn age_is_not_coerced_to_a_number() {
    // Text ages are stored as entered; only presence is checked.
    let student = StudentRecord::new("1", "Alice", "twenty");
    assert!(student.validate().is_ok());
    assert_eq!(student.age, "twenty");
}

#[test]
fn record_serializes_with_stable_field_names() {
    let student = StudentRecord::new("1", "Alice", "20");
    let json = serde_json::to_string(&student).unwrap();
    assert_eq!(json, r#"{"id":"1","name":"Alice","age":"20"}"#);

    let parsed: StudentRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, student);
}
