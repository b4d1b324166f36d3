//! String clean-up helpers.

const ACCENTED: &str = "ąàáäâãåæăćęèéëêìíïîłńòóöôõøśșțùúüûñçżź";
const PLAIN: &str = "aaaaaaaaaceeeeeiiiilnoooooosstuuuunczz";

/// Removes one trailing occurrence of `suffix` from `s`.
pub fn chomp<'a>(s: &'a str, suffix: &str) -> &'a str {
    s.strip_suffix(suffix).unwrap_or(s)
}

/// Normalises `s` into a slug.
///
/// Lowercases, transliterates common accented letters, drops every character other
/// than ASCII letters, digits, whitespace, `-` and `_`, then collapses each run of
/// whitespace, `-` and `_` into a single `-`. A trailing separator is dropped.
pub fn norm(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_separator = false;

    for c in s.to_lowercase().chars().map(transliterate) {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_separator {
                slug.push('-');
                pending_separator = false;
            }
            slug.push(c);
        }
    }
    slug
}

fn transliterate(c: char) -> char {
    ACCENTED
        .chars()
        .position(|accented| accented == c)
        .map(|i| PLAIN.chars().nth(i).unwrap_or('-'))
        .unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chomp_removes_trailing_suffix() {
        assert_eq!(chomp("hello/", "/"), "hello");
        assert_eq!(chomp("helloworld", "world"), "hello");
    }

    #[test]
    fn test_chomp_leaves_other_strings_alone() {
        assert_eq!(chomp("/hello", "/"), "/hello");
        assert_eq!(chomp("hel/lo", "/"), "hel/lo");
        assert_eq!(chomp("hello", "/"), "hello");
    }

    #[test]
    fn test_norm() {
        let input = "\"&3535$£5$ ëêìîłńõ   £$£$\"!!!!!\") ąàćę(_-++++==     __=-   øśțùúñçżź-";
        assert_eq!(norm(input), "35355-eeiilno-aace-ostuunczz");
    }

    #[test]
    fn test_norm_keeps_leading_separator() {
        assert_eq!(norm("  Hello World"), "-hello-world");
    }
}
