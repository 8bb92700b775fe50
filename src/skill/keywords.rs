//! Fallback keyword extraction for skills that declare none

/// Most keywords a skill gets from extraction
pub const MAX_EXTRACTED: usize = 10;

/// How much of the body is scanned alongside the description
const BODY_PREFIX_CHARS: usize = 500;

/// Technology vocabulary recognised in skill text
const TECH_KEYWORDS: &[&str] = &[
    "react",
    "vue",
    "angular",
    "typescript",
    "javascript",
    "python",
    "node",
    "express",
    "django",
    "flask",
    "fastapi",
    "next.js",
    "authentication",
    "auth",
    "jwt",
    "oauth",
    "security",
    "database",
    "sql",
    "mongodb",
    "postgres",
    "mysql",
    "api",
    "rest",
    "graphql",
    "websocket",
    "ui",
    "ux",
    "design",
    "css",
    "tailwind",
    "styling",
    "test",
    "testing",
    "jest",
    "pytest",
    "unit test",
    "debug",
    "error",
    "bug",
    "fix",
    "deploy",
    "devops",
    "docker",
    "kubernetes",
    "performance",
    "optimize",
    "cache",
    "mobile",
    "ios",
    "android",
    "react-native",
    "payment",
    "stripe",
    "shopify",
    "3d",
    "threejs",
    "webgl",
    "canvas",
    "pdf",
    "excel",
    "word",
    "document",
    "planning",
    "architecture",
    "design pattern",
];

/// Pick vocabulary terms that occur as whole words in the description or the start of the body
pub fn extract_keywords(description: &str, body: &str) -> Vec<String> {
    let prefix: String = body.chars().take(BODY_PREFIX_CHARS).collect();
    let haystack = format!(" {} ", phrase(&format!("{} {}", description, prefix)));

    TECH_KEYWORDS
        .iter()
        .filter(|k| haystack.contains(&format!(" {} ", phrase(k))))
        .take(MAX_EXTRACTED)
        .map(|k| k.to_string())
        .collect()
}

/// Lowercase `text` and collapse every run of non-alphanumerics into one space.
///
/// `.` and `-` survive inside words so terms like `next.js` and `react-native`
/// stay intact.
pub fn phrase(text: &str) -> String {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '.' || c == '-'))
        .map(|w| w.trim_matches(['.', '-']))
        .filter(|w| !w.is_empty())
        .collect();
    words.join(" ")
}
