use otp_relay::{decode, decode_base64, decode_quoted_printable, looks_quoted_printable};

#[test]
fn test_decode_plain_text_unchanged() {
    let text = "Hello world, your code is 123456.";
    assert_eq!(decode(text), text);
}

#[test]
fn test_decode_idempotent_on_clean_text() {
    let samples = [
        "Your code is: 789012. Confirm at https://ex.com/confirm?token=abc",
        "a=b and c=d plus some more text here",
        "您的验证码是：654321",
        "",
    ];
    for sample in samples {
        let once = decode(sample);
        assert_eq!(decode(&once), once);
    }
}

#[test]
fn test_decode_split_multibyte_qp() {
    assert_eq!(decode_quoted_printable("caf=C3=A9 ouvert"), "café ouvert");
    assert_eq!(decode_quoted_printable("price =E2=82=AC10"), "price €10");
}

#[test]
fn test_decode_qp_soft_line_breaks() {
    let raw = "Your verification co=\r\nde is 12=\n3456";
    assert_eq!(decode(raw), "Your verification code is 123456");
}

#[test]
fn test_decode_qp_latin1_fallback() {
    assert_eq!(decode_quoted_printable("na=EFve"), "naïve");
}

#[test]
fn test_decode_qp_encoded_equals() {
    assert_eq!(decode_quoted_printable("a=3Db"), "a=b");
}

#[test]
fn test_decode_lowercase_hex_untouched() {
    let text = "https://ex.com/confirm?token=abc";
    assert_eq!(decode(text), text);
}

#[test]
fn test_decode_base64_body() {
    let raw = "WW91ciB2ZXJpZmljYXRpb24gY29kZSBpcyA0ODI5MTA=";
    assert_eq!(decode(raw), "Your verification code is 482910");
}

#[test]
fn test_decode_base64_wrapped_lines() {
    let raw = "WW91ciB2ZXJpZmljYXRpb24g\r\nY29kZSBpcyA0ODI5MTA=\r\n";
    assert_eq!(decode(raw), "Your verification code is 482910");
}

#[test]
fn test_decode_base64_too_short() {
    assert!(decode_base64("SGVsbG8=").is_none());
    assert_eq!(decode("SGVsbG8="), "SGVsbG8=");
}

#[test]
fn test_decode_base64_binary_rejected() {
    let raw = "////////////////////////////";
    assert!(decode_base64(raw).is_none());
    assert_eq!(decode(raw), raw);
}

#[test]
fn test_decode_base64_requires_whole_body() {
    let raw = "Code below WW91ciB2ZXJpZmljYXRpb24gY29kZSBpcyA0ODI5MTA=";
    assert!(decode_base64(raw).is_none());
}

#[test]
fn test_looks_quoted_printable() {
    assert!(looks_quoted_printable("href=3D\"https://ex.com\""));
    assert!(looks_quoted_printable("long line=\r\ncontinues"));
    assert!(!looks_quoted_printable("token=abc%3D123"));
}
