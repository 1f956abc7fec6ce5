//! Regex utilities for testgen
//! Extracted to a separate crate for compilation optimization

use once_cell::sync::Lazy;
use regex::Regex;

/// Java names and package declarations
pub mod names {
    use super::*;

    pub static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*$").expect("Invalid regex pattern")
    });

    pub static PACKAGE_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^\s*package\s+([\w$.]+)\s*;").expect("Invalid regex pattern")
    });

    /// Check that `name` is a dotted sequence of Java identifiers
    pub fn is_qualified_name(name: &str) -> bool {
        QUALIFIED_NAME.is_match(name)
    }

    /// Extract the package declared by a compilation unit
    pub fn package_of(source: &str) -> Option<String> {
        PACKAGE_DECL
            .captures(source)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Type declarations (class, interface, enum, record)
pub mod types {
    use super::*;

    pub static TYPE_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\b(?:class|interface|enum|record)\s+([A-Za-z_$][\w$]*)")
            .expect("Invalid regex pattern")
    });

    /// Name of the first type declared in the source text
    pub fn primary_type(source: &str) -> Option<String> {
        TYPE_DECL
            .captures(source)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Check whether the source text declares a type named `name`
    pub fn declares_type(source: &str, name: &str) -> bool {
        TYPE_DECL
            .captures_iter(source)
            .any(|caps| caps.get(1).is_some_and(|m| m.as_str() == name))
    }

    /// Byte offset of the opening brace of the type declaration named `name`
    pub fn body_start(source: &str, name: &str) -> Option<usize> {
        let decl = TYPE_DECL
            .captures_iter(source)
            .find(|caps| caps.get(1).is_some_and(|m| m.as_str() == name))?;
        let after_name = decl.get(1)?.end();
        source[after_name..].find('{').map(|offset| after_name + offset)
    }
}

/// Method declarations
pub mod methods {
    use super::*;

    pub static METHOD_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?m)^[ \t]*(?:@[\w.]+(?:\([^)]*\))?\s+)*(?P<modifiers>(?:(?:public|protected|private|static|final|abstract|synchronized|native|default|strictfp)\s+)*)(?:<[^>{};]*>\s+)?(?P<ret>[\w$.]+(?:<[^(){};=]*>)?(?:\[\])*)\s+(?P<name>[A-Za-z_$][\w$]*)\s*\((?P<params>[^)]*)\)",
        )
        .expect("Invalid regex pattern")
    });

    pub static PARAMETER: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?:(?:@[\w.]+(?:\([^)]*\))?|final)\s+)*(?P<ty>.+?)\s+(?P<name>[A-Za-z_$][\w$]*)$")
            .expect("Invalid regex pattern")
    });

    const STATEMENT_KEYWORDS: &[&str] =
        &["return", "new", "throw", "else", "case", "if", "while", "for", "switch", "catch"];

    const TYPE_KEYWORDS: &[&str] = &["class", "interface", "enum", "record"];

    const MODIFIERS: &[&str] = &[
        "public",
        "protected",
        "private",
        "static",
        "final",
        "abstract",
        "synchronized",
        "native",
        "default",
        "strictfp",
    ];

    /// A method declaration as written in source text.
    /// Constructors carry an empty `return_type`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct MethodDecl {
        pub modifiers: Vec<String>,
        pub return_type: String,
        pub name: String,
        pub parameters: Vec<ParameterDecl>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ParameterDecl {
        pub type_name: String,
        pub name: String,
    }

    /// Find every method declaration in a compilation unit, in source order
    pub fn find_methods(source: &str) -> Vec<MethodDecl> {
        METHOD_DECL.captures_iter(source).filter_map(|caps| from_captures(&caps)).collect()
    }

    /// Parse a single declaration such as `int add(int a, int b)`
    pub fn parse_declaration(text: &str) -> Option<MethodDecl> {
        METHOD_DECL.captures(text.trim()).and_then(|caps| from_captures(&caps))
    }

    fn from_captures(caps: &regex::Captures<'_>) -> Option<MethodDecl> {
        let mut return_type = caps.name("ret")?.as_str().to_string();
        let name = caps.name("name")?.as_str().to_string();
        if STATEMENT_KEYWORDS.contains(&return_type.as_str())
            || STATEMENT_KEYWORDS.contains(&name.as_str())
            || TYPE_KEYWORDS.contains(&return_type.as_str())
        {
            return None;
        }

        let mut modifiers: Vec<String> = caps
            .name("modifiers")
            .map(|m| m.as_str().split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        // `public Repo(...)`: the last modifier lands in `ret`, leaving a constructor
        if MODIFIERS.contains(&return_type.as_str()) {
            modifiers.push(std::mem::take(&mut return_type));
        }

        let mut parameters = Vec::new();
        for raw in split_parameters(caps.name("params").map_or("", |m| m.as_str())) {
            parameters.push(parse_parameter(&raw)?);
        }

        Some(MethodDecl { modifiers, return_type, name, parameters })
    }

    /// Parse `Type name`, dropping annotations and `final`
    pub fn parse_parameter(text: &str) -> Option<ParameterDecl> {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let caps = PARAMETER.captures(&normalized)?;
        Some(ParameterDecl {
            type_name: caps.name("ty")?.as_str().to_string(),
            name: caps.name("name")?.as_str().to_string(),
        })
    }

    /// Split a parameter list at top-level commas, keeping generic arguments intact
    pub fn split_parameters(list: &str) -> Vec<String> {
        let mut parts = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;

        for c in list.chars() {
            match c {
                '<' => {
                    depth += 1;
                    current.push(c);
                }
                '>' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                ',' if depth == 0 => {
                    parts.push(std::mem::take(&mut current));
                }
                _ => current.push(c),
            }
        }
        parts.push(current);

        parts.into_iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect()
    }
}
