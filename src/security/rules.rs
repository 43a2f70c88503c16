//! Exposure rule table.
//!
//! Order matters: more specific rules come first, and overlapping matches
//! collapse to the earliest rule, so a raw wallet key inside a
//! `privateKey = "..."` assignment reports once, as a wallet key.

use crate::core::Severity;
use crate::scan::PatternRule;
use once_cell::sync::Lazy;

pub static SECURITY_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(
            "security/private-key-block",
            r"-----BEGIN [A-Z ]*PRIVATE KEY-----",
            Severity::Critical,
            "Embedded PEM private key block",
            "Remove the key from source and load it from a secrets manager",
        ),
        PatternRule::new(
            "security/wallet-key",
            r#"["'`](0x)?[0-9a-fA-F]{64}["'`]"#,
            Severity::Critical,
            "Raw wallet private key literal",
            "Never embed wallet keys; use a signer service or hardware wallet",
        ),
        PatternRule::new(
            "security/mnemonic",
            r#"(?i)(mnemonic|seed[_-]?phrase|recovery[_-]?phrase)\s*[:=]\s*["'][^"']+["']"#,
            Severity::Critical,
            "Hardcoded mnemonic or seed phrase",
            "Remove the phrase and rotate the affected wallet immediately",
        ),
        PatternRule::new(
            "security/private-key-assignment",
            r#"(?i)(private[_-]?key|priv[_-]?key|secret[_-]?key)\s*[:=]\s*["'][^"']{16,}["']"#,
            Severity::Critical,
            "Assignment to a private-key-named variable",
            "Move the value to an environment variable or vault",
        ),
        PatternRule::new(
            "security/db-credentials",
            r#"(?i)(postgres(ql)?|mysql|mongodb(\+srv)?|redis|amqp)://[^\s"']*:[^\s"'@]+@"#,
            Severity::Critical,
            "Database connection string with embedded credentials",
            "Use credential-free connection config and inject secrets at deploy time",
        ),
        PatternRule::new(
            "security/api-key",
            r#"(?i)(api[_-]?key|apikey|access[_-]?token|auth[_-]?token|client[_-]?secret)\s*[:=]\s*["'][\w.\-]{16,}["']"#,
            Severity::High,
            "Hardcoded API key or access token",
            "Move the token to an environment variable and rotate it",
        ),
        PatternRule::new(
            "security/signing-secret",
            r#"(?i)(signing[_-]?secret|jwt[_-]?secret|webhook[_-]?secret|session[_-]?secret)\s*[:=]\s*["'][^"']{8,}["']"#,
            Severity::High,
            "Hardcoded signing secret",
            "Load signing material from a secrets manager and rotate it",
        ),
        PatternRule::new(
            "security/ssh-key",
            r"ssh-(rsa|ed25519|dss) [A-Za-z0-9+/=]{40,}",
            Severity::High,
            "Embedded SSH key material",
            "Remove the key and revoke it from authorized hosts",
        ),
        PatternRule::new(
            "security/sensitive-logging",
            r"(?i)console\.(log|info|debug|warn|error)\([^)\n]*(password|secret|private[_-]?key|mnemonic|token)",
            Severity::Medium,
            "Sensitive value written to a logging call",
            "Strip secrets from log statements before shipping",
        ),
        PatternRule::new(
            "security/sensitive-env",
            r"(?i)process\.env\.[A-Z0-9_]*(KEY|SECRET|PRIVATE|MNEMONIC|PASSWORD|TOKEN)[A-Z0-9_]*",
            Severity::Low,
            "Environment variable naming a sensitive category",
            "Confirm the variable is injected at runtime and never bundled",
        ),
    ]
});
