//! Import statement scanning.
//!
//! A line-based reader for `import a.b as c, d` and `from a.b import c`
//! statements. Relative imports name the project itself and are skipped,
//! as is anything inside a triple-quoted string.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::lint::Span;
use crate::resolver::ImportReference;

static IMPORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+").expect("IMPORT_REGEX must compile"));

static FROM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*from\s+([\w.]+)\s+import\b").expect("FROM_REGEX must compile")
});

static MODULE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*").expect("MODULE_REGEX must compile")
});

const TRIPLE_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

/// Every absolute import in `text`, with spans pointing into `file`.
pub fn scan_imports(file: &Path, text: &str) -> Vec<ImportReference> {
    let mut references = Vec::new();
    let mut open_string: Option<&str> = None;

    for (index, line) in text.lines().enumerate() {
        if let Some(delim) = open_string {
            if line.matches(delim).count() % 2 == 1 {
                open_string = None;
            }
            continue;
        }

        let code = line.split('#').next().unwrap_or_default();
        for delim in TRIPLE_QUOTES {
            if code.matches(delim).count() % 2 == 1 {
                open_string = Some(delim);
            }
        }

        let mut offset = 0;
        for statement in code.split(';') {
            for (column, module) in statement_modules(statement) {
                let span = Span::at(file, index + 1, offset + column + 1, module.len());
                references.push(ImportReference::from_dotted(module).with_span(span));
            }
            offset += statement.len() + 1;
        }
    }

    references
}

/// Module names in one statement with their byte offsets.
fn statement_modules(statement: &str) -> Vec<(usize, &str)> {
    if let Some(m) = FROM_REGEX.captures(statement).and_then(|c| c.get(1)) {
        let module = m.as_str();
        let absolute = MODULE_REGEX
            .find(module)
            .is_some_and(|found| found.len() == module.len());
        return if absolute {
            vec![(m.start(), module)]
        } else {
            Vec::new()
        };
    }

    let Some(keyword) = IMPORT_REGEX.find(statement) else {
        return Vec::new();
    };

    let mut modules = Vec::new();
    let mut offset = keyword.end();
    for part in statement[keyword.end()..].split(',') {
        let trimmed = part.trim_start();
        let leading = part.len() - trimmed.len();
        if let Some(m) = MODULE_REGEX.find(trimmed) {
            modules.push((offset + leading, m.as_str()));
        }
        offset += part.len() + 1;
    }
    modules
}
