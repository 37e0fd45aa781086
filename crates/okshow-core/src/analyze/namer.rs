//! Shortest unique prefixes for declared names.

use super::line::{Command, Line, NameSet};

/// Length in characters of the shortest prefix of `name` that no other entry
/// of `names` shares.
///
/// A name that is itself a prefix of another name needs all of its
/// characters.
#[must_use]
pub fn unique_prefix_len(name: &str, names: &NameSet) -> usize {
    let mut len = 0;
    for (end, c) in name.char_indices() {
        len += 1;
        let prefix = &name[..end + c.len_utf8()];
        let sharing = names.iter().filter(|n| n.starts_with(prefix)).count();
        if sharing == 1 {
            break;
        }
    }
    len
}

/// Fill in `prefix_len` for every named command.
pub fn assign_prefixes(lines: &mut [Line], names: &NameSet) {
    for line in lines {
        if let Line::Command(Command {
            name: Some(name),
            prefix_len,
            ..
        }) = line
        {
            *prefix_len = unique_prefix_len(name, names);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> NameSet {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_collision_needs_full_name() {
        let set = names(&["cat", "car", "dog"]);
        assert_eq!(unique_prefix_len("cat", &set), 3);
        assert_eq!(unique_prefix_len("car", &set), 3);
        assert_eq!(unique_prefix_len("dog", &set), 1);
    }

    #[test]
    fn test_name_that_prefixes_another() {
        let set = names(&["install", "inst", "in"]);
        assert_eq!(unique_prefix_len("install", &set), 5);
        assert_eq!(unique_prefix_len("inst", &set), 4);
        assert_eq!(unique_prefix_len("in", &set), 2);
    }

    #[test]
    fn test_reserved_names_count() {
        let set = names(&["list", "l", "lint"]);
        assert_eq!(unique_prefix_len("lint", &set), 3);
    }

    #[test]
    fn test_multibyte_name() {
        let set = names(&["über", "ufo"]);
        assert_eq!(unique_prefix_len("über", &set), 1);
        assert_eq!(unique_prefix_len("ufo", &set), 1);
    }
}
