//! Tests for SpaceType.

use crate::config::SpaceType;

#[test]
fn test_space_default_is_l2() {
    assert_eq!(SpaceType::default(), SpaceType::L2);
}

#[test]
fn test_space_names() {
    assert_eq!(SpaceType::L2.as_str(), "l2");
    assert_eq!(SpaceType::Cosine.as_str(), "cosine");
}

#[test]
fn test_space_display() {
    assert_eq!(SpaceType::L2.to_string(), "L2");
    assert_eq!(SpaceType::Cosine.to_string(), "Cosine");
}

#[test]
fn test_space_from_str_is_case_insensitive() {
    assert_eq!("l2".parse::<SpaceType>().unwrap(), SpaceType::L2);
    assert_eq!("L2".parse::<SpaceType>().unwrap(), SpaceType::L2);
    assert_eq!("Cosine".parse::<SpaceType>().unwrap(), SpaceType::Cosine);
}

#[test]
fn test_space_from_str_rejects_unknown() {
    let err = "ip".parse::<SpaceType>().unwrap_err();
    assert!(err.to_string().contains("'ip'"));
}

#[test]
fn test_space_serde_lowercase() {
    assert_eq!(serde_json::to_string(&SpaceType::Cosine).unwrap(), "\"cosine\"");
    let parsed: SpaceType = serde_json::from_str("\"l2\"").unwrap();
    assert_eq!(parsed, SpaceType::L2);
}
