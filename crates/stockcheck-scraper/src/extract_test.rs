use super::*;

fn page(script_body: &str) -> String {
    format!(
        "<html><head><script src=\"/app.js\"></script>\
         <script type=\"text/javascript\">{script_body}</script></head><body></body></html>"
    )
}

fn extract(html: &str) -> Result<i64, ExtractionError> {
    InlinedPageTypeExtractor::new().extract_product_id(html)
}

#[test]
fn extracts_id_from_entity_escaped_payload() {
    let html = page(
        r#"window.INLINED_PAGE_TYPE = JSON.parse("{&quot;id&quot;:173874,&quot;type&quot;:&quot;PRODUCT&quot;}".replace(/&quot;/g, '"'));"#,
    );
    assert_eq!(extract(&html).unwrap(), 173_874);
}

#[test]
fn extracts_string_id_from_single_quoted_payload() {
    let html = page(
        r#"var INLINED_PAGE_TYPE = JSON.parse('{&quot;id&quot;:&quot;98765&quot;}'.replace(/&quot;/g, '"'));"#,
    );
    assert_eq!(extract(&html).unwrap(), 98_765);
}

#[test]
fn accepts_integral_float_id() {
    let html = page(r#"INLINED_PAGE_TYPE; JSON.parse("{&quot;id&quot;:12.0}".replace(1,2))"#);
    assert_eq!(extract(&html).unwrap(), 12);
}

#[test]
fn missing_marker_is_reported() {
    let html = page(r#"JSON.parse("{&quot;id&quot;:1}".replace(/x/g, 'y'))"#);
    assert!(matches!(extract(&html), Err(ExtractionError::MarkerNotFound)));
}

#[test]
fn page_without_scripts_reports_missing_marker() {
    assert!(matches!(
        extract("<html><body>INLINED_PAGE_TYPE in text only</body></html>"),
        Err(ExtractionError::MarkerNotFound)
    ));
}

#[test]
fn marker_without_payload_is_pattern_not_found() {
    let html = page("window.INLINED_PAGE_TYPE = {id: 5};");
    assert!(matches!(extract(&html), Err(ExtractionError::PatternNotFound)));
}

#[test]
fn malformed_json_is_reported() {
    let html = page(r#"INLINED_PAGE_TYPE = JSON.parse("{&quot;id&quot;: 5,}".replace(/a/, 'b'))"#);
    assert!(matches!(extract(&html), Err(ExtractionError::InvalidJson(_))));
}

#[test]
fn missing_id_field_is_reported() {
    let html =
        page(r#"INLINED_PAGE_TYPE = JSON.parse("{&quot;sku&quot;:&quot;x&quot;}".replace(/a/, 'b'))"#);
    assert!(matches!(extract(&html), Err(ExtractionError::MissingId)));
}

#[test]
fn non_numeric_id_is_reported() {
    let html = page(
        r#"INLINED_PAGE_TYPE = JSON.parse("{&quot;id&quot;:&quot;abc&quot;}".replace(/a/, 'b'))"#,
    );
    assert!(matches!(extract(&html), Err(ExtractionError::InvalidId(ref s)) if s == "abc"));
}

#[test]
fn first_qualifying_script_wins() {
    let html = format!(
        "{}{}{}",
        "<script>INLINED_PAGE_TYPE without payload</script>",
        r#"<script>INLINED_PAGE_TYPE = JSON.parse("{&quot;id&quot;:111}".replace(1,2))</script>"#,
        r#"<script>INLINED_PAGE_TYPE = JSON.parse("{&quot;id&quot;:222}".replace(1,2))</script>"#,
    );
    assert_eq!(extract(&html).unwrap(), 111);
}

#[test]
fn first_match_stops_even_when_its_json_is_bad() {
    let html = format!(
        "{}{}",
        r#"<script>INLINED_PAGE_TYPE = JSON.parse("{&quot;nope&quot;:1}".replace(1,2))</script>"#,
        r#"<script>INLINED_PAGE_TYPE = JSON.parse("{&quot;id&quot;:222}".replace(1,2))</script>"#,
    );
    assert!(matches!(extract(&html), Err(ExtractionError::MissingId)));
}

#[test]
fn script_tag_matching_is_case_insensitive() {
    let html = r#"<SCRIPT type="module">INLINED_PAGE_TYPE = JSON.parse("{&quot;id&quot;:7}".replace(1,2))</SCRIPT>"#;
    assert_eq!(extract(html).unwrap(), 7);
}

#[test]
fn works_through_trait_object() {
    let extractor: Box<dyn ProductIdExtractor> = Box::new(InlinedPageTypeExtractor::default());
    let html = page(r#"INLINED_PAGE_TYPE = JSON.parse("{&quot;id&quot;:3}".replace(1,2))"#);
    assert_eq!(extractor.extract_product_id(&html).unwrap(), 3);
}
