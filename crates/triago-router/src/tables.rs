// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static lookup tables and compiled pattern sets for message routing.
//!
//! Everything here is process-wide read-only state, built once on first use
//! and safe to share across concurrent requests without locking.

use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

/// Characters left unencoded when building redirect query strings.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Build a letmegooglethat redirect URL from a raw query.
pub fn lmgtfy_url(query: &str) -> String {
    format!(
        "https://letmegooglethat.com/?q={}",
        utf8_percent_encode(query, QUERY_SET)
    )
}

/// Build a man-page mirror URL for a command.
pub fn man_page_url(command: &str) -> String {
    format!("https://man.cx/{command}")
}

/// Whole-word containment: `needle` must be the entire string, or bounded
/// by spaces (start/end of string count as boundaries). Both sides are
/// expected lowercased. Partial-word hits ("goal" for "go") never match.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack == needle
        || haystack.starts_with(&format!("{needle} "))
        || haystack.ends_with(&format!(" {needle}"))
        || haystack.contains(&format!(" {needle} "))
}

/// Technical terms whose presence marks a message as answerable in-house.
/// Matched whole-word, lowercased.
pub static TECHNICAL_TERMS: &[&str] = &[
    // Programming languages
    "javascript", "python", "java", "typescript", "c#", "c++", "ruby", "go", "rust", "php",
    "swift", "kotlin", "scala", "perl", "haskell", "clojure", "erlang", "fortran", "cobol",
    "bash", "powershell", "assembly", "matlab", "r language", "dart", "groovy", "lua",
    "julia", "lisp", "racket", "scheme",
    // Web technologies
    "html", "css", "dom", "json", "xml", "ajax", "xpath", "xquery", "webassembly", "wasm",
    "rest", "graphql", "soap", "oauth", "jwt", "cors", "websocket",
    // Frameworks and libraries
    "react", "angular", "vue", "svelte", "jquery", "ember", "backbone", "redux", "mobx",
    "rxjs", "express", "nest.js", "django", "flask", "spring", "laravel", "rails",
    "asp.net", "symfony", "tensorflow", "pytorch", "keras", "scikit-learn", "pandas",
    "numpy", "matplotlib", "bootstrap", "tailwind", "material-ui", "chakra ui", "next.js",
    "gatsby", "nuxt", "webpack", "vite", "rollup", "parcel", "babel", "jest", "mocha",
    "cypress", "selenium", "postman", "lodash", "moment", "axios", "requests",
    "beautiful soup", "puppeteer", "playwright", "node.js", "npm", "yarn", "pnpm", "pip",
    "conda", "maven", "gradle", "nuget",
    // Databases and data
    "sql", "nosql", "mysql", "postgresql", "mongodb", "cassandra", "redis", "neo4j",
    "sqlite", "oracle", "mariadb", "dynamodb", "firebase", "supabase", "elasticsearch",
    "influxdb", "graphdb", "query", "index", "transaction", "acid", "orm", "dao", "dto",
    "hibernate", "sequelize", "mongoose", "prisma", "typeorm", "normalization",
    "denormalization",
    // Cloud and devops
    "aws", "azure", "gcp", "cloud", "serverless", "lambda", "ec2", "s3", "docker",
    "kubernetes", "terraform", "ansible", "jenkins", "github actions", "gitlab ci",
    "travis", "circleci", "nginx", "apache", "iis", "heroku", "vercel", "netlify",
    "digitalocean", "devops", "ci/cd", "load balancer", "cdn", "dns", "vpc", "subnet",
    "firewall", "api gateway", "iaas", "paas", "saas",
    // Security
    "openid", "authentication", "authorization", "csrf", "xss", "sql injection",
    "encryption", "ssl", "tls", "https", "sha", "md5", "hash", "cyber",
    "penetration testing", "ddos", "vpn", "proxy", "reverse proxy", "waf",
    // Development concepts
    "algorithm", "data structure", "api", "sdk", "ide", "compiler", "interpreter",
    "runtime", "debug", "breakpoint", "stack trace", "exception", "error handling",
    "memory leak", "garbage collection", "thread", "async", "promise", "callback",
    "concurrency", "parallelism", "deadlock", "race condition", "mutex", "semaphore",
    "singleton", "factory", "observer", "design pattern", "solid",
    "dependency injection", "inversion of control", "middleware", "service",
    "controller", "model", "view", "repository", "facade", "memoization",
    "big o notation", "time complexity", "space complexity", "recursion", "iteration",
    "object-oriented", "functional programming", "immutable", "higher-order function",
    "closure", "monorepo", "microservice", "monolith", "backend", "frontend",
    "fullstack",
    // Operating systems
    "linux", "unix", "macos", "windows", "ubuntu", "debian", "redhat", "centos",
    "alpine", "arch", "fedora", "suse", "cmd", "terminal", "shell", "kernel",
];

/// Command line tools with their documentation index pages. Substring
/// matched; a doc-intent phrase must also be present to redirect.
pub static COMMAND_LINE_TOOLS: &[(&str, &str)] = &[
    ("npm", "https://docs.npmjs.com/cli/commands/"),
    ("yarn", "https://yarnpkg.com/cli/"),
    ("pip", "https://pip.pypa.io/en/stable/cli/"),
    ("git", "https://git-scm.com/docs/"),
    ("docker", "https://docs.docker.com/engine/reference/commandline/"),
    ("kubectl", "https://kubernetes.io/docs/reference/kubectl/"),
    ("terraform", "https://developer.hashicorp.com/terraform/cli"),
    (
        "aws",
        "https://awscli.amazonaws.com/v2/documentation/api/latest/index.html",
    ),
    ("gcloud", "https://cloud.google.com/sdk/gcloud/reference"),
    (
        "az",
        "https://learn.microsoft.com/en-us/cli/azure/reference-index",
    ),
];

/// Shell commands that route straight to their man page.
pub static BASH_COMMANDS: &[&str] = &[
    "ls", "cd", "mkdir", "touch", "cp", "mv", "rm", "chmod", "chown", "grep",
    "find", "sed", "awk", "cat", "less", "more", "head", "tail", "sort", "uniq",
    "wc", "diff", "ssh", "scp", "rsync", "curl", "wget", "tar", "zip", "unzip",
    "ps", "top", "kill", "systemctl", "journalctl", "df", "du", "free", "ifconfig",
    "ip", "netstat", "ping", "traceroute", "nslookup", "dig", "cron", "useradd",
    "usermod", "passwd", "sudo", "su", "which", "alias", "echo", "env", "export",
];

/// Technologies with official documentation, whole-word matched.
/// First matching entry wins.
pub static DOCUMENTATION_LINKS: &[(&str, &str)] = &[
    (
        "javascript",
        "https://developer.mozilla.org/en-US/docs/Web/JavaScript",
    ),
    ("python", "https://docs.python.org/3/"),
    ("java", "https://docs.oracle.com/en/java/"),
    ("typescript", "https://www.typescriptlang.org/docs/"),
    ("react", "https://reactjs.org/docs/getting-started.html"),
    ("angular", "https://angular.io/docs"),
    ("vue", "https://vuejs.org/guide/introduction.html"),
    ("node.js", "https://nodejs.org/en/docs/"),
    ("django", "https://docs.djangoproject.com/"),
    ("flask", "https://flask.palletsprojects.com/"),
    ("spring", "https://spring.io/guides"),
    ("mongodb", "https://docs.mongodb.com/"),
    ("mysql", "https://dev.mysql.com/doc/"),
    ("postgresql", "https://www.postgresql.org/docs/"),
    ("docker", "https://docs.docker.com/"),
    ("kubernetes", "https://kubernetes.io/docs/home/"),
    ("aws", "https://docs.aws.amazon.com/"),
    ("azure", "https://learn.microsoft.com/en-us/azure/"),
    ("gcp", "https://cloud.google.com/docs"),
    ("linux", "https://www.kernel.org/doc/html/latest/"),
    ("bash", "https://www.gnu.org/software/bash/manual/bash.html"),
    ("css", "https://developer.mozilla.org/en-US/docs/Web/CSS"),
    ("html", "https://developer.mozilla.org/en-US/docs/Web/HTML"),
];

/// Source-code shapes across several language families.
pub static CODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // JS/TS functions
        Regex::new(r"(?i)function\s+\w+\s*\([^)]*\)\s*\{").unwrap(),
        Regex::new(r"(?i)const\s+\w+\s*=\s*\([^)]*\)\s*=>").unwrap(),
        // Variable declarations
        Regex::new(r"(?i)\b(var|let|const)\s+\w+\s*=").unwrap(),
        // Control structures
        Regex::new(r"(?i)\b(if|for|while|switch|try|catch)\s*\(").unwrap(),
        // Class/interface definitions
        Regex::new(r"(?i)\b(class|interface|type|enum)\s+\w+").unwrap(),
        // Import statements
        Regex::new(r"(?i)\b(import|export|require)\b").unwrap(),
        // Python
        Regex::new(r"(?i)\bdef\s+\w+\s*\([^)]*\):").unwrap(),
        Regex::new(r"(?i)\bclass\s+\w+\s*(\([^)]*\))?:").unwrap(),
        // SQL
        Regex::new(r"\b(?i:SELECT|UPDATE|DELETE|INSERT|FROM|WHERE|JOIN)\b").unwrap(),
        // HTML tags
        Regex::new(r"(?is)</?[a-z].*?>").unwrap(),
        // JSON-like
        Regex::new(r#"(?i)\{\s*["']\w+["']\s*:"#).unwrap(),
        // YAML-like
        Regex::new(r"(?m)^[\w-]+:\s+.+$").unwrap(),
    ]
});

/// Error-message shapes: exception names, HTTP statuses, OS error codes.
pub static ERROR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"(?i)\b(error|exception|failed|undefined|null reference|NaN|cannot|not found|syntax error)\b",
        )
        .unwrap(),
        Regex::new(r"\b(TypeError|ReferenceError|SyntaxError|RangeError|EvalError|URIError)\b")
            .unwrap(),
        Regex::new(r"(?i)\b(status code|404|500|403|401|ENOENT|EACCES|ETIMEDOUT)\b").unwrap(),
    ]
});

/// General-knowledge shapes that a search engine answers better than we do.
pub static NON_TECHNICAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // News, events, weather
        Regex::new(r"(?i)\b(news|weather|forecast|what happened|who won|when is|where is)\b")
            .unwrap(),
        // Entertainment
        Regex::new(r"(?i)\b(movie|song|tv show|actor|actress|singer|celebrity|book|author)\b")
            .unwrap(),
        // Facts and trivia
        Regex::new(
            r"(?i)\b(tallest|longest|biggest|smallest|fastest|capital of|population of|distance between)\b",
        )
        .unwrap(),
        // Health and lifestyle
        Regex::new(
            r"(?i)\b(symptoms of|how to cure|diet|exercise|workout|recipe|how to make|how to cook)\b",
        )
        .unwrap(),
        // Shopping and products
        Regex::new(r"(?i)\b(where to buy|how much is|price of|best|review|vs|versus|compared to)\b")
            .unwrap(),
        // Travel and locations
        Regex::new(r"(?i)\b(hotel|flight|ticket|restaurant|address|direction|map)\b").unwrap(),
        // People and history
        Regex::new(r"(?i)\b(who is|who was|when did|when was|history of|biography)\b").unwrap(),
        // Leading simple factual question
        Regex::new(r"(?i)^(what|who|where|when|how) (is|are|was|were|did) ").unwrap(),
    ]
});

/// Phrases signalling the user wants documentation rather than an answer.
pub static DOC_INTENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bhow to use\b").unwrap(),
        Regex::new(r"(?i)\bhow to install\b").unwrap(),
        Regex::new(r"(?i)\bsyntax for\b").unwrap(),
        Regex::new(r"(?i)\bexample of\b").unwrap(),
        Regex::new(r"(?i)\bapi reference\b").unwrap(),
        Regex::new(r"(?i)\bdocumentation for\b").unwrap(),
        Regex::new(r"(?i)\bwhat is the syntax\b").unwrap(),
        Regex::new(r"(?i)\bfeatures of\b").unwrap(),
        Regex::new(r"(?i)\bguide\b").unwrap(),
        Regex::new(r"(?i)\btutorial\b").unwrap(),
        Regex::new(r"(?i)\bhelp with\b").unwrap(),
    ]
});

/// Shape of a bare command line: tokens plus optional dashed flags.
pub static COMMAND_LINE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([a-z0-9-_]+)(\s+[a-z0-9-_]+)*(\s+(-{1,2}[a-z0-9-_]+))*\s*$").unwrap()
});
