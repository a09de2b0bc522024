//! Case conversion for resource paths, identifiers and file names

/// Split a string into lower-cased words
///
/// Word boundaries are any non-alphanumeric character, a lower-to-upper
/// transition (`pushSubscription`) and the end of an acronym (`HTTPServer`).
pub fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(ch.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Uppercase the first character
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `push_subscriptions` -> `pushSubscriptions`
pub fn camel_case(s: &str) -> String {
    words(s)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
        .collect()
}

/// `push_subscriptions` -> `PushSubscriptions`
pub fn pascal_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// `pushSubscriptions` -> `push_subscriptions`
pub fn snake_case(s: &str) -> String {
    words(s).join("_")
}

/// `push_subscriptions` -> `push-subscriptions`
///
/// Path separators are preserved so that multi-level resource paths map onto
/// nested file names.
pub fn hyphen_case(s: &str) -> String {
    s.split('/')
        .map(|segment| words(segment).join("-"))
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        assert_eq!(words("pushSubscriptions"), vec!["push", "subscriptions"]);
        assert_eq!(words("HTTPServer"), vec!["http", "server"]);
        assert_eq!(words("users_push-subscriptions"), vec!["users", "push", "subscriptions"]);
        assert!(words("--").is_empty());
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(camel_case("notification_id"), "notificationId");
        assert_eq!(camel_case("users-push-subscriptions"), "usersPushSubscriptions");
        assert_eq!(pascal_case("notifications_preferences"), "NotificationsPreferences");
        assert_eq!(snake_case("notificationId"), "notification_id");
        assert_eq!(hyphen_case("users/push_subscriptions"), "users/push-subscriptions");
        assert_eq!(capitalize("users push"), "Users push");
    }
}
