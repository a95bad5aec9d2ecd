use super::edit::new_end_byte;

#[test]
fn new_end_adds_inserted_length() {
    assert_eq!(new_end_byte(4, "2"), Some(5));
    assert_eq!(new_end_byte(3, ""), Some(3));
}

#[test]
fn new_end_overflow_is_rejected() {
    assert_eq!(new_end_byte(usize::MAX, "x"), None);
    assert_eq!(new_end_byte(usize::MAX, ""), Some(usize::MAX));
}
