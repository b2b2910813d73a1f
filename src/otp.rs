//! One-time passcode detection
//!
//! Rules are tried in a fixed order and the first one that yields a
//! candidate wins. Each rule reads the normalized text lane first and the
//! flattened HTML lane second, except the short-number rules which only
//! trust a single lane.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

// Latin, Cyrillic and Turkish labels; matched on word boundaries
const WORD_LABELS: &[&str] = &[
    // English
    "code",
    "passcode",
    "password",
    "verification",
    "otp",
    "pin",
    "security code",
    "one-time",
    // German
    "bestätigungscode",
    "verifizierungscode",
    "sicherheitscode",
    "passwort",
    "kennwort",
    // Russian
    "код",
    "кода",
    "пароль",
    "подтверждения",
    // Spanish / Portuguese
    "código",
    "codigo",
    "verificación",
    "contraseña",
    "clave",
    "verificação",
    "senha",
    // French
    "vérification",
    "mot de passe",
    // Italian
    "codice",
    "verifica",
    // Dutch
    "verificatiecode",
    "toegangscode",
    "wachtwoord",
    // Turkish
    "kod",
    "kodu",
    "kodunuz",
    "doğrulama",
    "şifre",
    "parola",
    // Polish
    "hasło",
    "weryfikacyjny",
];

// Labels in scripts without word separators; matched anywhere
const SCRIPT_LABELS: &[&str] = &[
    // Chinese (simplified, traditional)
    "验证码",
    "校验码",
    "动态码",
    "认证码",
    "密码",
    "驗證碼",
    "認證碼",
    "密碼",
    // Japanese
    "認証コード",
    "確認コード",
    "認証番号",
    "確認番号",
    "パスワード",
    "コード",
    // Korean
    "인증번호",
    "인증 코드",
    "인증코드",
    "확인 코드",
    "비밀번호",
    "코드",
    // Arabic
    "رمز",
    "كود",
    "كلمة المرور",
    // Hindi
    "कोड",
    "सत्यापन",
    "पासवर्ड",
    "ओटीपी",
    // Thai
    "รหัส",
];

fn label_pattern() -> String {
    let words: Vec<String> = WORD_LABELS.iter().map(|l| regex::escape(l)).collect();
    let scripts: Vec<String> = SCRIPT_LABELS.iter().map(|l| regex::escape(l)).collect();
    format!(
        r"(?:\b(?:{})\b|{})",
        words.join("|"),
        scripts.join("|")
    )
}

// Label, up to 40 non-digit characters, code
static LABELED_NUMERIC: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)({})[^0-9]{{0,40}}?([0-9]{{4,8}})(?:[^0-9A-Za-z]|$)",
        label_pattern()
    ))
    .unwrap()
});

static LABELED_ALPHANUMERIC: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){}(?:\s*[:：]\s*|\s+is\s*[:：]?\s*)([A-Z0-9]{{4,8}})(?:[^A-Za-z0-9]|$)",
        label_pattern()
    ))
    .unwrap()
});

static COLON_ADJACENT: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[:：]\s*([0-9]{4,8})(?:[^0-9]|$)").unwrap());

static GOOGLE_PREFIX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9])G-([0-9]{6})(?:[^0-9]|$)").unwrap()
});

static TRAILING_LABEL: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^0-9A-Za-z])([0-9]{4,8})\s+is\s+your\s+(?:[\w-]+\s+){0,3}?(?:code|otp|pin|passcode)\b",
    )
    .unwrap()
});

static LINK_CODE_PARAM: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)[?&]code=([0-9]{4,8})(?:[^0-9A-Za-z]|$)").unwrap()
});

static DIGIT_RUN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Search surfaces for OTP matching
#[derive(Debug, Clone, Copy)]
pub struct OtpInput<'a> {
    /// Normalized plain text lane
    pub text: &'a str,

    /// Normalized, flattened HTML lane
    pub html: &'a str,

    /// Verification links already extracted from the email
    pub links: &'a [String],
}

impl<'a> OtpInput<'a> {
    #[must_use]
    pub const fn new(text: &'a str, html: &'a str, links: &'a [String]) -> Self {
        Self { text, html, links }
    }

    fn lanes(&self) -> [&'a str; 2] {
        [self.text, self.html]
    }

    /// The lane trusted for bare numbers: text, or HTML when text is blank
    fn primary_lane(&self) -> &'a str {
        if self.text.trim().is_empty() {
            self.html
        } else {
            self.text
        }
    }
}

/// Matching strategy that produced an OTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpRule {
    /// Localized label followed by the code
    Labeled,
    /// Code directly after a colon
    ColonAdjacent,
    /// `G-123456`
    GooglePrefix,
    /// `123456 is your code`
    TrailingLabel,
    /// `code=` parameter in a verification link
    LinkParameter,
    /// First standalone six-digit number
    BareSixDigit,
    /// The only five-digit number
    UniqueFiveDigit,
    /// The only four-digit number
    UniqueFourDigit,
}

impl OtpRule {
    /// All rules, highest priority first
    pub const PRIORITY: [Self; 8] = [
        Self::Labeled,
        Self::ColonAdjacent,
        Self::GooglePrefix,
        Self::TrailingLabel,
        Self::LinkParameter,
        Self::BareSixDigit,
        Self::UniqueFiveDigit,
        Self::UniqueFourDigit,
    ];

    /// Apply this rule alone
    #[must_use]
    pub fn apply(self, input: &OtpInput<'_>) -> Option<String> {
        match self {
            Self::Labeled => labeled(input),
            Self::ColonAdjacent => first_in_lanes(input, &COLON_ADJACENT),
            Self::GooglePrefix => first_in_lanes(input, &GOOGLE_PREFIX),
            Self::TrailingLabel => first_in_lanes(input, &TRAILING_LABEL),
            Self::LinkParameter => input
                .links
                .iter()
                .find_map(|link| first_capture(&LINK_CODE_PARAM, link)),
            Self::BareSixDigit => input
                .lanes()
                .iter()
                .find_map(|lane| standalone_numbers(lane, 6).into_iter().next())
                .map(str::to_string),
            Self::UniqueFiveDigit => unique_number(input.primary_lane(), 5),
            Self::UniqueFourDigit => unique_number(input.primary_lane(), 4),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Labeled => "labeled",
            Self::ColonAdjacent => "colon_adjacent",
            Self::GooglePrefix => "google_prefix",
            Self::TrailingLabel => "trailing_label",
            Self::LinkParameter => "link_parameter",
            Self::BareSixDigit => "bare_six_digit",
            Self::UniqueFiveDigit => "unique_five_digit",
            Self::UniqueFourDigit => "unique_four_digit",
        }
    }
}

impl fmt::Display for OtpRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selected code and the rule that selected it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpMatch {
    pub code: String,
    pub rule: OtpRule,
}

/// Run the rules in priority order and return the first match
#[must_use]
pub fn find_otp(input: &OtpInput<'_>) -> Option<OtpMatch> {
    OtpRule::PRIORITY
        .into_iter()
        .find_map(|rule| rule.apply(input).map(|code| OtpMatch { code, rule }))
}

fn labeled(input: &OtpInput<'_>) -> Option<String> {
    let lanes = input.lanes();
    lanes
        .iter()
        .find_map(|lane| labeled_numeric(lane))
        .or_else(|| lanes.iter().find_map(|lane| labeled_alphanumeric(lane)))
}

fn labeled_numeric(text: &str) -> Option<String> {
    let mut start = 0;
    while let Some(caps) = LABELED_NUMERIC.captures_at(text, start) {
        let label = caps.get(1)?;
        let code = caps.get(2)?;
        let glued = text[..code.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphabetic());
        if !glued && !crosses_sentence_end(&text[label.end()..code.start()]) {
            return Some(code.as_str().to_string());
        }
        // Retry from the next label so one inside the rejected gap still counts
        start = label.start() + text[label.start()..].chars().next()?.len_utf8();
    }
    None
}

// A terminator only ends a sentence when whitespace follows it; full-width
// terminators always do
fn crosses_sentence_end(gap: &str) -> bool {
    let mut chars = gap.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '。' | '！' | '？' => return true,
            '.' | '!' | '?' if chars.peek().is_some_and(|n| n.is_whitespace()) => return true,
            _ => {}
        }
    }
    false
}

fn labeled_alphanumeric(text: &str) -> Option<String> {
    LABELED_ALPHANUMERIC.captures_iter(text).find_map(|caps| {
        let code = caps.get(1)?.as_str();
        let has_digit = code.chars().any(|c| c.is_ascii_digit());
        let has_letter = code.chars().any(|c| c.is_ascii_alphabetic());
        (has_digit && has_letter).then(|| code.to_string())
    })
}

fn first_in_lanes(input: &OtpInput<'_>, re: &Regex) -> Option<String> {
    input.lanes().iter().find_map(|lane| first_capture(re, lane))
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Digit runs of exactly `len` digits not glued to letters or other digits
#[must_use]
pub fn standalone_numbers(text: &str, len: usize) -> Vec<&str> {
    DIGIT_RUN
        .find_iter(text)
        .filter(|m| m.len() == len)
        .filter(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !before.is_some_and(|c| c.is_ascii_alphabetic())
                && !after.is_some_and(|c| c.is_ascii_alphabetic())
        })
        .map(|m| m.as_str())
        .collect()
}

// Short numbers are ambiguous (years, prices), so only a lone occurrence counts
fn unique_number(text: &str, len: usize) -> Option<String> {
    match standalone_numbers(text, len).as_slice() {
        [only] => Some((*only).to_string()),
        _ => None,
    }
}
