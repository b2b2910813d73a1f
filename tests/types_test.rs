use otp_relay::{EmailAddress, IngestStatus, MailboxId, VerificationResult};

#[test]
fn test_email_address_with_name() {
    let addr = EmailAddress::parse("Acme Security <NoReply@acme.test>").unwrap();
    assert_eq!(addr.name.as_deref(), Some("Acme Security"));
    assert_eq!(addr.address, "NoReply@acme.test");
    assert_eq!(addr.local_part, "NoReply");
    assert_eq!(addr.domain, "acme.test");
    assert_eq!(addr.mailbox_key(), "noreply");
    assert_eq!(addr.to_string(), "Acme Security <NoReply@acme.test>");
}

#[test]
fn test_email_address_plain() {
    let addr = EmailAddress::parse("  box42@relay.test ").unwrap();
    assert!(addr.name.is_none());
    assert_eq!(addr.local_part, "box42");
    assert_eq!(addr.to_string(), "box42@relay.test");
}

#[test]
fn test_email_address_invalid() {
    assert!(EmailAddress::parse("not-an-address").is_none());
    assert!(EmailAddress::parse("@relay.test").is_none());
    assert!(EmailAddress::parse("").is_none());
}

#[test]
fn test_verification_result_serialization() {
    let result = VerificationResult {
        otp: Some("123456".into()),
        links: vec!["https://ex.com/verify".into()],
    };
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["otp"], "123456");
    assert_eq!(json["verification_links"][0], "https://ex.com/verify");
    assert!(!result.is_empty());
    assert!(VerificationResult::default().is_empty());
}

#[test]
fn test_ingest_status_serialization() {
    assert_eq!(serde_json::to_string(&IngestStatus::RateLimited).unwrap(), "\"rate_limited\"");
    assert_eq!(IngestStatus::Delivered.to_string(), "delivered");
    assert_eq!(IngestStatus::Dropped.as_str(), "dropped");
}

#[test]
fn test_mailbox_id() {
    let id = MailboxId::new("mbx_1");
    assert_eq!(id.as_str(), "mbx_1");
    assert_eq!(id.to_string(), "mbx_1");
}
