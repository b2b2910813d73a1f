use otp_relay::{decode_entities, html_to_text, looks_like_html};

#[test]
fn test_html_strips_script_style_comments() {
    let html = "<style>.x{color:red}</style><script>var code=999999;</script>\
                <!-- 111111 --><p>Hello</p>";
    assert_eq!(html_to_text(html), "Hello");
}

#[test]
fn test_html_script_case_insensitive() {
    let html = "<SCRIPT type=\"text/javascript\">\nlet a = 1;\n</SCRIPT >Visible";
    assert_eq!(html_to_text(html), "Visible");
}

#[test]
fn test_html_block_elements_separate() {
    assert_eq!(html_to_text("<div>12</div><div>34</div>"), "12 34");
    assert_eq!(html_to_text("<table><tr><td>12</td></tr><tr><td>34</td></tr></table>"), "12 34");
}

#[test]
fn test_html_inline_elements_join() {
    assert_eq!(html_to_text("<span>12</span><span>34</span>"), "1234");
    assert_eq!(html_to_text("<b>5</b><i>6</i><font>7</font>"), "567");
}

#[test]
fn test_html_line_breaks() {
    assert_eq!(html_to_text("line1<br>line2<BR/>line3"), "line1 line2 line3");
}

#[test]
fn test_html_entities() {
    let html = "&lt;b&gt; &amp; &quot;x&quot; &#39;y&#39; &#x41;&#66;";
    assert_eq!(html_to_text(html), "<b> & \"x\" 'y' AB");
}

#[test]
fn test_html_entities_not_double_decoded() {
    assert_eq!(decode_entities("&amp;lt;"), "&lt;");
}

#[test]
fn test_html_unknown_entity_kept() {
    assert_eq!(decode_entities("&copy; 2025"), "&copy; 2025");
}

#[test]
fn test_html_comparison_text_not_a_tag() {
    assert_eq!(html_to_text("5 < 6 and 7 > 3"), "5 < 6 and 7 > 3");
}

#[test]
fn test_html_collapses_whitespace() {
    let html = "\n  <p>  Your   code\n\n is </p>\t<p> 4242 </p>  ";
    assert_eq!(html_to_text(html), "Your code is 4242");
}

#[test]
fn test_looks_like_html() {
    assert!(looks_like_html("<p>Hello</p>"));
    assert!(looks_like_html("Text with <br> inside"));
    assert!(!looks_like_html("if a < b then"));
}
