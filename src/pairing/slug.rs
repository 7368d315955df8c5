//! Stable folder ids derived from folder labels.

use sha2::{Digest, Sha256};

/// `<slug>-<hash>` for `label`. Identical labels always yield identical ids,
/// which lets an interrupted pairing be retried without a second folder.
pub fn generate_folder_id(label: &str) -> String {
    let slug = slugify(label);
    let hash = short_hash(label);
    if slug.is_empty() {
        hash
    } else {
        format!("{slug}-{hash}")
    }
}

/// Lowercase, runs of non-alphanumerics collapsed to one hyphen, no hyphen at
/// either end.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_hyphen = false;
    for ch in label.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// First two bytes of the SHA-256 digest as four lowercase hex characters.
pub fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    hex::encode(&digest[..2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hash(s: &str) -> bool {
        s.len() == 4 && s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn slug_rules() {
        assert_eq!(slugify("My Project"), "my-project");
        assert_eq!(slugify("my_project"), "my-project");
        assert_eq!(slugify("My Project!@#$%"), "my-project");
        assert_eq!(slugify("my---project"), "my-project");
        assert_eq!(slugify("-my-project-"), "my-project");
        assert_eq!(slugify("MyProject"), "myproject");
        assert_eq!(slugify("project 123"), "project-123");
        assert_eq!(slugify("Node.js Backend API"), "node-js-backend-api");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("Café"), "caf");
    }

    #[test]
    fn short_hash_is_four_hex_chars() {
        assert!(is_hash(&short_hash("test")));
        assert!(is_hash(&short_hash("")));
        // sha256("test") = 9f86d081...
        assert_eq!(short_hash("test"), "9f86");
    }

    #[test]
    fn short_hash_differs_for_different_inputs() {
        assert_ne!(short_hash("test1"), short_hash("test2"));
    }

    #[test]
    fn folder_id_is_deterministic() {
        assert_eq!(generate_folder_id("My Project"), generate_folder_id("My Project"));
        assert_ne!(generate_folder_id("My Project"), generate_folder_id("my project"));
    }

    #[test]
    fn folder_id_shape() {
        let id = generate_folder_id("My Project");
        let (slug, hash) = id.rsplit_once('-').unwrap();
        assert_eq!(slug, "my-project");
        assert!(is_hash(hash));
    }

    #[test]
    fn hash_uses_original_label() {
        let id = generate_folder_id("My Project");
        assert!(id.ends_with(&short_hash("My Project")));
    }

    #[test]
    fn punctuation_only_label_is_just_the_hash() {
        assert!(is_hash(&generate_folder_id("!!!")));
    }
}
