//! Identifier casing and pluralisation helpers.
//!
//! Generators derive class names, table names, route names and variables
//! from a single user-supplied model or type name:
//!
//! | Helper       | `"blogPost"`  | `"real-estate"` |
//! |--------------|---------------|-----------------|
//! | [`studly`]   | `BlogPost`    | `RealEstate`    |
//! | [`camel`]    | `blogPost`    | `realEstate`    |
//! | [`snake`]    | `blog_post`   | `real_estate`   |
//! | [`kebab`]    | `blog-post`   | `real-estate`   |
//! | [`title`]    | `Blog Post`   | `Real Estate`   |

use crate::domain::error::DomainError;

/// Split a string into lowercase words.
///
/// Boundaries are `_`, `-` and whitespace, a lower-to-upper case change
/// (`myApp`), and the end of an acronym (`HTTPServer` -> `http`, `server`).
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            let lower_to_upper = (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase();
            let acronym_end = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase());

            if lower_to_upper || acronym_end {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// `blog post` -> `BlogPost`
pub fn studly(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// `blog post` -> `blogPost`
pub fn camel(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::new();
    for (i, w) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(w);
        } else {
            out.push_str(&capitalize(w));
        }
    }
    out
}

/// `BlogPost` -> `blog_post`
pub fn snake(s: &str) -> String {
    split_words(s).join("_")
}

/// `BlogPost` -> `blog-post`
pub fn kebab(s: &str) -> String {
    split_words(s).join("-")
}

/// `real-estate` -> `Real Estate`
pub fn title(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace `-` with a space and upper-case the first letter of every word,
/// keeping the rest of each word as written (`real-estate` -> `Real Estate`,
/// `my-CMS` -> `My CMS`).
pub fn ucwords(s: &str) -> String {
    s.replace('-', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first character only (`first_name` -> `First_name`).
pub fn ucfirst(s: &str) -> String {
    capitalize(s)
}

const UNCOUNTABLE: &[&str] = &[
    "audio",
    "data",
    "equipment",
    "feedback",
    "fish",
    "information",
    "media",
    "metadata",
    "money",
    "news",
    "series",
    "sheep",
    "species",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Pluralise a single lowercase English word.
fn plural_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_owned();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_owned();
    }

    let ends_with_consonant_y = word.ends_with('y')
        && word
            .chars()
            .rev()
            .nth(1)
            .is_some_and(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));

    if ends_with_consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| word.ends_with(suffix)) {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

/// Pluralise the last word of an identifier, keeping the separator style of
/// the input's snake form.
///
/// `post` -> `posts`, `category` -> `categories`, `blog_post` -> `blog_posts`.
pub fn plural(s: &str) -> String {
    let mut words = split_words(s);
    if let Some(last) = words.pop() {
        words.push(plural_word(&last));
    }
    words.join("_")
}

/// Table name for a model: plural snake case (`BlogPost` -> `blog_posts`).
pub fn table_name(model: &str) -> String {
    plural(&snake(model))
}

/// Route name for a model: plural kebab case (`BlogPost` -> `blog-posts`).
pub fn route_name(model: &str) -> String {
    plural(&snake(model)).replace('_', "-")
}

/// Normalise a user-supplied model name to a class name (`blog post` ->
/// `BlogPost`).
pub fn model_class(name: &str) -> Result<String, DomainError> {
    let invalid = |reason: &str| DomainError::InvalidModelName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ' ')
    {
        return Err(invalid("only letters, digits, '_', '-' and spaces are allowed"));
    }
    let class = studly(name);
    match class.chars().next() {
        None => Err(invalid("name is empty")),
        Some(c) if !c.is_ascii_alphabetic() => Err(invalid("name must start with a letter")),
        Some(_) => Ok(class),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_across_styles() {
        assert_eq!(split_words("my awesome project"), vec!["my", "awesome", "project"]);
        assert_eq!(split_words("blogPost"), vec!["blog", "post"]);
        assert_eq!(split_words("HTTPServer"), vec!["http", "server"]);
        assert_eq!(split_words("real-estate"), vec!["real", "estate"]);
        assert_eq!(split_words("__a__b"), vec!["a", "b"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn casing_helpers() {
        assert_eq!(studly("blog_post"), "BlogPost");
        assert_eq!(studly("real-estate"), "RealEstate");
        assert_eq!(camel("BlogPost"), "blogPost");
        assert_eq!(camel("product"), "product");
        assert_eq!(snake("BlogPost"), "blog_post");
        assert_eq!(kebab("BlogPost"), "blog-post");
        assert_eq!(title("real-estate"), "Real Estate");
    }

    #[test]
    fn ucwords_keeps_inner_case() {
        assert_eq!(ucwords("real-estate"), "Real Estate");
        assert_eq!(ucwords("my-CMS"), "My CMS");
        assert_eq!(ucfirst("first_name"), "First_name");
    }

    #[test]
    fn pluralisation_rules() {
        assert_eq!(plural("post"), "posts");
        assert_eq!(plural("category"), "categories");
        assert_eq!(plural("day"), "days");
        assert_eq!(plural("box"), "boxes");
        assert_eq!(plural("class"), "classes");
        assert_eq!(plural("person"), "people");
        assert_eq!(plural("news"), "news");
        assert_eq!(plural("BlogPost"), "blog_posts");
    }

    #[test]
    fn model_class_normalises_and_validates() {
        assert_eq!(model_class("blog post").unwrap(), "BlogPost");
        assert_eq!(model_class("Product").unwrap(), "Product");
        assert!(model_class("").is_err());
        assert!(model_class("2fast").is_err());
        assert!(model_class("Post;drop").is_err());
    }

    #[test]
    fn table_and_route_names() {
        assert_eq!(table_name("Product"), "products");
        assert_eq!(table_name("BlogCategory"), "blog_categories");
        assert_eq!(route_name("BlogCategory"), "blog-categories");
        assert_eq!(route_name("Person"), "people");
    }
}
