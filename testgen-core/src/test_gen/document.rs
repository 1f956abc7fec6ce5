//! Minimal model of a Java compilation unit
//!
//! Holds the header (comments and `package`), the import list, and the
//! remaining body verbatim. Enough structure to insert members into a class
//! and edit imports without a full parser.

use super::ImportSpec;
use regex_utils::types;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JavaSourceFile {
    header: Vec<String>,
    /// Comments found between import statements
    import_comments: Vec<String>,
    imports: Vec<String>,
    body: String,
    crlf: bool,
}

impl JavaSourceFile {
    pub fn parse(text: &str) -> Self {
        let mut file = Self { crlf: text.contains("\r\n"), ..Self::default() };
        let lines: Vec<&str> = text.lines().collect();
        let mut in_comment = false;
        // comment and blank lines not yet assigned to a section
        let mut pending: Vec<&str> = Vec::new();
        let mut body_start = None;

        for (index, line) in lines.iter().enumerate() {
            let trimmed = line.trim();

            let is_comment = if in_comment {
                in_comment = !trimmed.contains("*/");
                true
            } else if trimmed.starts_with("//") {
                true
            } else if let Some(rest) = trimmed.strip_prefix("/*") {
                match rest.find("*/") {
                    Some(end) => rest[end + 2..].trim().is_empty(),
                    None => {
                        in_comment = true;
                        true
                    }
                }
            } else {
                false
            };

            if is_comment || trimmed.is_empty() {
                pending.push(line.trim_end());
                continue;
            }

            if trimmed.starts_with("import ") {
                if file.imports.is_empty() {
                    file.header.extend(pending.drain(..).map(str::to_string));
                } else {
                    file.import_comments
                        .extend(pending.drain(..).filter(|l| !l.trim().is_empty()).map(str::to_string));
                }
                file.imports.push(trimmed.to_string());
            } else if file.imports.is_empty() && trimmed.starts_with("package ") {
                file.header.extend(pending.drain(..).map(str::to_string));
                file.header.push(line.trim_end().to_string());
            } else {
                // Without package or imports, only the comment touching the declaration is its own
                let attached = if file.header.is_empty() && file.imports.is_empty() {
                    pending.iter().rev().take_while(|l| !l.trim().is_empty()).count()
                } else {
                    pending.len()
                };
                let detached = pending.len() - attached;
                file.header.extend(pending.drain(..detached).map(str::to_string));
                body_start = Some(index - attached);
                break;
            }
        }

        if body_start.is_none() && !pending.is_empty() {
            if file.imports.is_empty() {
                file.header.extend(pending.drain(..).map(str::to_string));
            } else {
                body_start = Some(lines.len() - pending.len());
            }
        }

        while file.header.first().is_some_and(|l| l.trim().is_empty()) {
            file.header.remove(0);
        }
        while file.header.last().is_some_and(|l| l.trim().is_empty()) {
            file.header.pop();
        }
        if let Some(start) = body_start {
            let body = &lines[start..];
            let skip = body.iter().take_while(|l| l.trim().is_empty()).count();
            file.body = body[skip..].join("\n");
        }
        file
    }

    /// A file holding one empty public class
    pub fn new_class(package: Option<&str>, class_name: &str) -> Self {
        Self {
            header: package.map(|p| vec![format!("package {};", p)]).unwrap_or_default(),
            body: format!("public class {} {{\n}}", class_name),
            ..Self::default()
        }
    }

    pub fn render(&self) -> String {
        let mut sections = Vec::new();
        if !self.header.is_empty() {
            sections.push(self.header.join("\n"));
        }
        if !self.import_comments.is_empty() {
            sections.push(self.import_comments.join("\n"));
        }
        if !self.imports.is_empty() {
            let (statics, regular): (Vec<&String>, Vec<&String>) =
                self.imports.iter().partition(|i| i.starts_with("import static "));
            let groups: Vec<String> = [regular, statics]
                .into_iter()
                .filter(|group| !group.is_empty())
                .map(|group| group.iter().map(|s| s.as_str()).collect::<Vec<_>>().join("\n"))
                .collect();
            sections.push(groups.join("\n\n"));
        }
        if !self.body.trim().is_empty() {
            sections.push(self.body.trim_end().to_string());
        }

        let mut text = sections.join("\n\n");
        text.push('\n');
        if self.crlf { text.replace('\n', "\r\n") } else { text }
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// The import list serialized as source text
    pub fn import_list_text(&self) -> String {
        self.imports.join("\n")
    }

    pub fn add_import(&mut self, spec: &ImportSpec) {
        self.imports.push(spec.statement());
    }

    /// Drop duplicate statements and sort regular imports ahead of static ones
    pub fn optimize_imports(&mut self) {
        let mut regular: Vec<String> = Vec::new();
        let mut statics: Vec<String> = Vec::new();
        for import in self.imports.drain(..) {
            let group = if import.starts_with("import static ") { &mut statics } else { &mut regular };
            if !group.contains(&import) {
                group.push(import);
            }
        }
        regular.sort();
        statics.sort();
        self.imports = regular.into_iter().chain(statics).collect();
    }

    pub fn declares_type(&self, name: &str) -> bool {
        types::declares_type(&self.body, name)
    }

    /// Append `member` as the last member of class `class_name`.
    /// Returns false when the class or its closing brace cannot be found.
    pub fn insert_member(&mut self, class_name: &str, member: &str) -> bool {
        let Some(open) = types::body_start(&self.body, class_name) else {
            return false;
        };
        let Some(close) = matching_brace(&self.body, open) else {
            return false;
        };

        let line_start = self.body[..open].rfind('\n').map_or(0, |i| i + 1);
        let class_indent: String =
            self.body[line_start..].chars().take_while(|c| *c == ' ' || *c == '\t').collect();
        let member_indent = class_indent.len() + 4;

        let before = self.body[..close].trim_end();
        let separator = if before.ends_with('{') { "\n" } else { "\n\n" };

        let mut updated = String::with_capacity(self.body.len() + member.len() + 16);
        updated.push_str(before);
        updated.push_str(separator);
        updated.push_str(&super::frameworks::codegen::indent(member.trim_end(), member_indent));
        updated.push('\n');
        updated.push_str(&class_indent);
        updated.push_str(&self.body[close..]);

        self.body = updated;
        true
    }
}

/// Offset of the `}` closing the block opened at `open`, skipping literals and comments
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}
