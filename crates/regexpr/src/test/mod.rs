pub mod test_errors;
pub mod test_find_matches;
