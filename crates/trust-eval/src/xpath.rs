//! XPath extraction from XML payloads.

use sxd_document::parser;
use sxd_xpath::evaluate_xpath;
use tracing::warn;

use trust_core::traits::QueryEvaluator;

/// Runs XPath queries against namespace-aware XML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct XPathEvaluator;

impl QueryEvaluator for XPathEvaluator {
    fn query(&self, query: &str, payload: &str) -> String {
        evaluate_xpath_to_string(query, payload)
    }
}

/// Evaluate `query` against `xml` and return the XPath string value of the
/// result: the text of the first selected node in document order, or the
/// string form of a number/boolean result.
///
/// Malformed XML and invalid queries yield an empty string.
pub fn evaluate_xpath_to_string(query: &str, xml: &str) -> String {
    match try_evaluate(query, xml) {
        Ok(value) => value,
        Err(reason) => {
            warn!(%query, %reason, "impossible to evaluate the XPath expression");
            String::new()
        }
    }
}

fn try_evaluate(query: &str, xml: &str) -> Result<String, String> {
    let package = parser::parse(xml).map_err(|e| format!("invalid XML payload: {e:?}"))?;
    let document = package.as_document();
    let value = evaluate_xpath(&document, query).map_err(|e| format!("{e:?}"))?;
    Ok(value.string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = "<Response>\n    <node1>1</node1>\n    <node2>2</node2>\n    <description>Valid response</description>\n    <node5>5</node5>\n</Response>";

    #[test]
    fn extracts_element_text() {
        assert_eq!(evaluate_xpath_to_string("/Response/description", XML), "Valid response");
        assert_eq!(evaluate_xpath_to_string("//node2", XML), "2");
    }

    #[test]
    fn scalar_results_are_stringified() {
        assert_eq!(evaluate_xpath_to_string("count(/Response/*)", XML), "4");
        assert_eq!(evaluate_xpath_to_string("boolean(/Response/node1)", XML), "true");
    }

    #[test]
    fn missing_node_is_empty() {
        assert_eq!(evaluate_xpath_to_string("/Response/absent", XML), "");
    }

    #[test]
    fn namespaced_documents_are_queryable() {
        let xml = r#"<r:Response xmlns:r="urn:test"><r:status>OK</r:status></r:Response>"#;
        assert_eq!(
            evaluate_xpath_to_string("/*[local-name()='Response']/*[local-name()='status']", xml),
            "OK"
        );
    }

    #[test]
    fn errors_yield_empty_string() {
        assert_eq!(evaluate_xpath_to_string("/Response/description", "not xml <"), "");
        assert_eq!(evaluate_xpath_to_string("/Response/[", XML), "");
        assert_eq!(XPathEvaluator.query("/Response/description", ""), "");
    }
}
