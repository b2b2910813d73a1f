use otp_relay::{NormalizedBody, RawEmail, extract, is_invisible, process};

#[test]
fn test_extract_end_to_end() {
    let result = extract(
        "Your code is: 789012. Confirm at https://ex.com/confirm?token=abc",
        "",
    );

    assert_eq!(result.otp.as_deref(), Some("789012"));
    assert_eq!(result.links, vec!["https://ex.com/confirm?token=abc"]);
}

#[test]
fn test_extract_empty_input() {
    let result = extract("", "");
    assert!(result.is_empty());
}

#[test]
fn test_extract_deterministic() {
    let text = "Votre code : 3141. Vérifiez https://ex.com/verify?k=1";
    let html = "<p>Code <b>3141</b></p><a href=\"https://ex.com/verify?k=1\">ok</a>";
    assert_eq!(extract(text, html), extract(text, html));
}

#[test]
fn test_extract_qp_html_part() {
    let html = "<p style=3D\"color:red\">Your verification code</p>=\r\n\
                <p>9=E2=80=8B8=E2=80=8B7=E2=80=8B6=E2=80=8B5=E2=80=8B4</p>\
                <a href=3D\"https://ex.com/activate?id=3D7&amp;sig=3Dab%2F\">Activate</a>";
    let result = extract("", html);

    assert_eq!(result.otp.as_deref(), Some("987654"));
    assert_eq!(result.links, vec!["https://ex.com/activate?id=7&sig=ab%2F"]);
}

#[test]
fn test_extract_html_in_text_part() {
    let text = "<div>Your PIN</div><div><span>4</span><span>4</span><span>1</span><span>9</span></div>";
    assert_eq!(extract(text, "").otp.as_deref(), Some("4419"));
}

#[test]
fn test_normalized_body_lanes() {
    let body = NormalizedBody::new(
        "caf=C3=A9 1\u{200B}2\u{FEFF}3",
        "<p>Hi&#8203;there</p><script>x()</script>",
    );

    assert_eq!(body.decoded_text, "café 123");
    assert_eq!(body.decoded_html, "Hithere");
    for lane in [&body.decoded_text, &body.decoded_html] {
        assert!(!lane.chars().any(is_invisible));
        assert!(!lane.contains('<'));
        assert!(!lane.contains("=C3"));
    }
}

#[test]
fn test_process_prepares_stored_bodies() {
    let email = RawEmail {
        to: "abc@relay.test".into(),
        from: "svc@ex.com".into(),
        subject: "Hi".into(),
        text: "--=_part_0001\nContent-Type: text/plain\n\nCode: 1\u{200B}234\n\n\n\nBye\n--=_part_0001--".into(),
        html: "<p>Code: 1234</p>".into(),
        raw_size: 100,
    };
    let processed = process(&email);

    assert_eq!(processed.text_body, "Code: 1234\n\nBye");
    assert_eq!(processed.html_body, "<p>Code: 1234</p>");
    assert_eq!(processed.verification.otp.as_deref(), Some("1234"));
}
