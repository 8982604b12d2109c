//! Topic name validation
//!
//! Topics are identified by their raw string. Nothing here trims or folds
//! case: "Vectors" and "vectors " are two different topics.

/// Reject topics that cannot be a meaningful identifier
pub fn validate_topic(topic: &str) -> Result<(), String> {
    if topic.trim().is_empty() {
        return Err("topic must not be empty".to_string());
    }
    if topic.chars().any(char::is_control) {
        return Err(format!("topic {:?} contains control characters", topic));
    }
    Ok(())
}
